#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use serde::Serialize;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use tsz_capi::{CompileFlags, CompileOptions, CompileOutput, StatusCode, compile};

const EXIT_SUCCESS: u8 = 0;
const EXIT_COMPILE_ERROR: u8 = 1;
const EXIT_FAULT: u8 = 2;

/// Compile one TypeScript file to an ES module through the tsz boundary.
#[derive(Parser, Debug)]
#[command(name = "tsz-compile", version)]
struct Args {
    /// TypeScript file to compile.
    file: PathBuf,

    /// Skip type checking; only syntax errors fail.
    #[arg(long)]
    transpile_only: bool,

    /// Enable strict null checks.
    #[arg(long)]
    strict: bool,

    /// Append an inline source map to the module.
    #[arg(long)]
    inline_source_map: bool,

    /// Treat the file as a declaration file.
    #[arg(long)]
    declaration: bool,

    /// Parse JSX (implied by a `.tsx` file).
    #[arg(long)]
    tsx: bool,

    /// Module specifier to treat as resolvable (repeatable, one `*` allowed).
    #[arg(long = "module", value_name = "NAME")]
    modules: Vec<String>,

    /// Print `{"status", "module" | "diagnostic"}` as JSON on stdout.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn options(&self) -> CompileOptions {
        let mut flags = CompileFlags::empty();
        flags.set(CompileFlags::TRANSPILE_ONLY, self.transpile_only);
        flags.set(CompileFlags::STRICT, self.strict);
        flags.set(CompileFlags::INLINE_SOURCE_MAP, self.inline_source_map);
        flags.set(CompileFlags::DECLARATION, self.declaration);
        flags.set(CompileFlags::TSX, self.tsx);
        CompileOptions {
            flags,
            known_modules: self.modules.clone(),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    module: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostic: Option<&'a str>,
}

fn main() -> ExitCode {
    tsz_capi::tracing_config::init_tracing();

    let args = Args::parse();
    match run(&args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(EXIT_FAULT)
        }
    }
}

fn run(args: &Args) -> Result<u8> {
    let source = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let file_name = args.file.to_string_lossy();

    let output = match compile(&source, &file_name, &args.options()) {
        Ok(output) => output,
        Err(fault) => {
            if args.json {
                let message = fault.to_string();
                print_json(&JsonReport {
                    status: fault.status().name(),
                    module: None,
                    diagnostic: Some(&message),
                })?;
                return Ok(EXIT_FAULT);
            }
            return Err(fault).context("compilation aborted");
        }
    };

    if args.json {
        let text = output.buffer().as_str();
        let (module, diagnostic) = if output.is_module() {
            (Some(text), None)
        } else {
            (None, Some(text))
        };
        print_json(&JsonReport {
            status: output.status().name(),
            module,
            diagnostic,
        })?;
        return Ok(exit_code(output.status()));
    }

    match output {
        CompileOutput::Module(module) => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(module.as_bytes())
                .context("failed to write module")?;
            Ok(EXIT_SUCCESS)
        }
        CompileOutput::Diagnostic(diagnostic) => {
            report_diagnostic(diagnostic.as_str());
            Ok(EXIT_COMPILE_ERROR)
        }
    }
}

fn exit_code(status: StatusCode) -> u8 {
    match status {
        StatusCode::Ok => EXIT_SUCCESS,
        StatusCode::CompileError => EXIT_COMPILE_ERROR,
        StatusCode::InvalidInput | StatusCode::InternalError => EXIT_FAULT,
    }
}

fn print_json(report: &JsonReport<'_>) -> Result<()> {
    let json = serde_json::to_string(report).context("failed to serialize report")?;
    println!("{json}");
    Ok(())
}

/// Diagnostics go to stderr, with the `error TSxxxx` label colored when
/// stderr is a terminal.
fn report_diagnostic(diagnostic: &str) {
    let colorize = std::io::stderr().is_terminal();
    for line in diagnostic.lines() {
        if colorize && let Some((location, rest)) = line.split_once(": error ") {
            eprintln!("{}: {} {}", location.cyan(), "error".red().bold(), rest);
        } else {
            eprintln!("{line}");
        }
    }
}
