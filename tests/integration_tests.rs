//! End-to-end tests of the compilation boundary.
//!
//! The same scenarios run through the safe Rust API and the C ABI:
//! - valid source compiles to a module
//! - a type error and an unresolved import come back as diagnostics
//! - empty source is an empty module
//! - concurrent calls do not interfere

use rayon::prelude::*;
use tsz_capi::ffi::{
    TSZ_STATUS_COMPILE_ERROR, TSZ_STATUS_OK, TszBuffer, tsz_buffer_free, tsz_compile,
};
use tsz_capi::{CompileFlags, CompileOptions, CompileOutput, StatusCode, compile};

/// Helper to compile through the safe API with default options
fn compile_ts(source: &str) -> CompileOutput {
    compile(source, "a.ts", &CompileOptions::default()).expect("no boundary fault")
}

/// Helper to compile through the C ABI, copying out whichever buffer was
/// filled and releasing both slots
fn compile_c(source: &str, filename: &str) -> (u32, String) {
    let mut module = TszBuffer::EMPTY;
    let mut diagnostic = TszBuffer::EMPTY;
    let status = unsafe {
        tsz_compile(
            source.as_ptr(),
            source.len(),
            filename.as_ptr(),
            filename.len(),
            0,
            &mut module,
            &mut diagnostic,
        )
    };
    let filled = if status == TSZ_STATUS_OK { &module } else { &diagnostic };
    let text = if filled.ptr.is_null() {
        String::new()
    } else {
        let bytes = unsafe { std::slice::from_raw_parts(filled.ptr, filled.len) };
        String::from_utf8(bytes.to_vec()).expect("UTF-8 output")
    };
    unsafe {
        tsz_buffer_free(&mut module);
        tsz_buffer_free(&mut diagnostic);
    }
    (status, text)
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_valid_source_yields_module() {
    let output = compile_ts("let x: number = 1;");
    assert_eq!(output.status(), StatusCode::Ok);
    assert!(!output.buffer().is_empty());

    let (status, module) = compile_c("let x: number = 1;", "a.ts");
    assert_eq!(status, TSZ_STATUS_OK);
    assert_eq!(module, "let x = 1;\n");
}

#[test]
fn test_type_mismatch_yields_diagnostic() {
    let output = compile_ts("let x: number = \"oops\";");
    assert_eq!(output.status(), StatusCode::CompileError);
    assert!(
        output
            .buffer()
            .as_str()
            .contains("Type 'string' is not assignable to type 'number'.")
    );

    let (status, diagnostic) = compile_c("let x: number = \"oops\";", "a.ts");
    assert_eq!(status, TSZ_STATUS_COMPILE_ERROR);
    assert_eq!(
        diagnostic,
        "a.ts(1,5): error TS2322: Type 'string' is not assignable to type 'number'."
    );
}

#[test]
fn test_missing_module_yields_diagnostic() {
    let source = "import {thing} from \"missing.d.ts\"; let x: thing;";
    let output = compile_ts(source);
    assert_eq!(output.status(), StatusCode::CompileError);
    let diagnostic = output.buffer().as_str();
    assert!(diagnostic.contains("TS2307"), "Unexpected diagnostic: {diagnostic}");
    assert!(diagnostic.contains("missing.d.ts"), "Unexpected diagnostic: {diagnostic}");
}

#[test]
fn test_empty_source_yields_empty_module() {
    let output = compile_ts("");
    assert_eq!(output.status(), StatusCode::Ok);
    assert!(output.buffer().is_empty());

    let (status, module) = compile_c("", "empty.ts");
    assert_eq!(status, TSZ_STATUS_OK);
    assert_eq!(module, "");
}

#[test]
fn test_every_input_yields_exactly_one_outcome() {
    let sources = [
        "let x: number = 1;",
        "let x: number = \"oops\";",
        "function (",
        "const c = 1; c = 2;",
        "enum E { A, B }\nexport namespace N { export const v = E.A; }",
        "",
    ];
    for source in sources {
        let output = compile_ts(source);
        match &output {
            CompileOutput::Module(_) => assert_eq!(output.status(), StatusCode::Ok),
            CompileOutput::Diagnostic(buffer) => {
                assert_eq!(output.status(), StatusCode::CompileError);
                assert!(!buffer.is_empty(), "Diagnostic for {source:?} is empty");
            }
        }
    }
}

#[test]
fn test_realistic_module() {
    let source = r#"
import { readFile } from "fs";
import type { Stats } from "fs";

export interface Options {
    verbose?: boolean;
}

export enum Level { Info, Warn, Error }

export class Logger {
    constructor(private readonly prefix: string, public level: Level = Level.Info) {}

    log(message: string, stats?: Stats): void {
        console.log(`${this.prefix}: ${message}`);
    }
}

export function load(path: string, options: Options = {}): void {
    readFile(path, () => {});
}
"#;
    let options = CompileOptions::default().with_known_module("fs");
    let output = compile(source, "logger.ts", &options).expect("no boundary fault");
    let module = output.into_result().expect("module expected");
    let module = module.as_str();
    assert!(module.contains("import { readFile } from \"fs\";"), "{module}");
    assert!(!module.contains("Stats"), "{module}");
    assert!(!module.contains("interface"), "{module}");
    assert!(module.contains("export var Level;"), "{module}");
    assert!(module.contains("this.prefix = prefix;"), "{module}");
    assert!(module.contains("export function load(path, options = {})"), "{module}");
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_concurrent_calls_are_independent() {
    let sources: Vec<String> = (0..64)
        .map(|i| {
            if i % 2 == 0 {
                format!("let v{i}: number = {i};")
            } else {
                format!("let v{i}: number = \"{i}\";")
            }
        })
        .collect();

    let results: Vec<(u32, String)> = sources
        .par_iter()
        .map(|source| compile_c(source, "a.ts"))
        .collect();

    for (i, (status, text)) in results.iter().enumerate() {
        if i % 2 == 0 {
            assert_eq!(*status, TSZ_STATUS_OK);
            assert_eq!(text, &format!("let v{i} = {i};\n"));
        } else {
            assert_eq!(*status, TSZ_STATUS_COMPILE_ERROR);
            assert!(text.contains("TS2322"));
        }
    }
}

#[test]
fn test_conditional_with_parenthesized_true_branch() {
    let output = compile_ts("let b: any, c: any, e: any;\nlet a = b ? (c) : d => e;");
    assert_eq!(
        output.status(),
        StatusCode::Ok,
        "{}",
        output.buffer().as_str()
    );
    assert!(output.buffer().as_str().contains("let a = b ? (c) : d => e;"));
}

// =============================================================================
// Host threads
// =============================================================================

#[test]
fn test_deep_nesting_on_small_host_stack() {
    let nested = format!("let x = {}1{};", "(".repeat(120), ")".repeat(120));
    let generic = format!("let y: {}number{} = [];", "Array<".repeat(120), ">".repeat(120));
    let handle = std::thread::Builder::new()
        .stack_size(128 * 1024)
        .spawn(move || {
            let safe = compile_ts(&nested).status();
            let (status, _) = compile_c(&nested, "a.ts");
            let transpile_only = CompileOptions {
                flags: CompileFlags::TRANSPILE_ONLY,
                ..CompileOptions::default()
            };
            let transpiled = compile(&generic, "a.ts", &transpile_only)
                .expect("no boundary fault")
                .status();
            (safe, status, transpiled)
        })
        .expect("spawn host thread");
    let (safe, status, transpiled) = handle.join().expect("host thread completes");
    assert_eq!(safe, StatusCode::Ok);
    assert_eq!(status, TSZ_STATUS_OK);
    assert_eq!(transpiled, StatusCode::Ok);
}

#[test]
fn test_nesting_past_the_limit_is_a_diagnostic() {
    let source = format!("let x = {}1{};", "(".repeat(400), ")".repeat(400));
    let output = compile_ts(&source);
    assert_eq!(output.status(), StatusCode::CompileError);
    assert!(
        output.buffer().as_str().contains("Expression nesting is too deep."),
        "{}",
        output.buffer().as_str()
    );
}

#[test]
fn test_tsx_file_lowers_jsx_through_the_c_abi() {
    let source = "const items: string[] = [];\nexport const list = <ul>{items.map(i => <li key={i}>{i}</li>)}</ul>;";
    let (status, module) = compile_c(source, "list.tsx");
    assert_eq!(status, TSZ_STATUS_OK, "{module}");
    assert_eq!(
        module,
        "const items = [];\nexport const list = React.createElement(\"ul\", null, items.map(i => React.createElement(\"li\", { key: i }, i)));\n"
    );

    let (status, diagnostic) = compile_c("let v = <a></b>;", "view.tsx");
    assert_eq!(status, TSZ_STATUS_COMPILE_ERROR);
    assert!(diagnostic.contains("error TS17002: Expected corresponding JSX closing tag for 'a'."));
}

// =============================================================================
// Driver
// =============================================================================

#[cfg(feature = "cli")]
mod driver {
    use std::process::Command;

    fn run(source: &str, extra: &[&str]) -> std::process::Output {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("input.ts");
        std::fs::write(&path, source).expect("write input");
        Command::new(env!("CARGO_BIN_EXE_tsz-compile"))
            .arg(&path)
            .args(extra)
            .env_remove("TSZ_LOG")
            .env_remove("RUST_LOG")
            .output()
            .expect("run tsz-compile")
    }

    #[test]
    fn test_driver_prints_module() {
        let output = run("let x: number = 1;", &[]);
        assert_eq!(output.status.code(), Some(0));
        assert_eq!(String::from_utf8_lossy(&output.stdout), "let x = 1;\n");
    }

    #[test]
    fn test_driver_reports_diagnostic() {
        let output = run("let x: number = \"oops\";", &[]);
        assert_eq!(output.status.code(), Some(1));
        assert!(output.stdout.is_empty());
        assert!(String::from_utf8_lossy(&output.stderr).contains("error TS2322"));
    }

    #[test]
    fn test_driver_transpile_only() {
        let output = run("let x: number = \"oops\";", &["--transpile-only"]);
        assert_eq!(output.status.code(), Some(0));
    }

    #[test]
    fn test_driver_json_report() {
        let output = run("let x: number = \"oops\";", &["--json"]);
        assert_eq!(output.status.code(), Some(1));
        let report: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("JSON report");
        assert_eq!(report["status"], "compile_error");
        assert!(report["diagnostic"].as_str().unwrap().contains("TS2322"));
        assert!(report.get("module").is_none());
    }

    #[test]
    fn test_driver_tsx_flag() {
        let source = "let v = <br />;";
        assert_eq!(run(source, &["--transpile-only"]).status.code(), Some(1));
        let output = run(source, &["--tsx"]);
        assert_eq!(output.status.code(), Some(0));
        assert_eq!(
            String::from_utf8_lossy(&output.stdout),
            "let v = React.createElement(\"br\", null);\n"
        );
    }

    #[test]
    fn test_driver_known_modules() {
        let source = "import { a } from \"pkg\";\nconsole.log(a);";
        assert_eq!(run(source, &[]).status.code(), Some(1));
        assert_eq!(run(source, &["--module", "pkg"]).status.code(), Some(0));
    }

    #[test]
    fn test_driver_missing_file_is_a_fault() {
        let output = Command::new(env!("CARGO_BIN_EXE_tsz-compile"))
            .arg("/nonexistent/input.ts")
            .output()
            .expect("run tsz-compile");
        assert_eq!(output.status.code(), Some(2));
        assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read"));
    }
}
