//! The compiler core behind the boundary.
//!
//! The boundary only knows [`CompilerCore`]; [`TszCompiler`] wires the
//! workspace's parser, checker and emitter into it.

use tracing::{debug, debug_span};
use tsz_checker::check_program;
use tsz_common::diagnostics::{Diagnostic, has_errors, render_diagnostics};
use tsz_emitter::print_source_file;
use tsz_parser::ParserState;

use crate::options::CompileOptions;

/// A compiler reachable through the boundary.
///
/// Implementations must be stateless between calls: the boundary may call
/// `compile` concurrently from several threads with the same instance.
pub trait CompilerCore: Send + Sync {
    /// Compile one file. `Ok` carries the emitted module, `Err` a readable
    /// diagnostic.
    fn compile(&self, source: &str, file_name: &str) -> Result<String, String>;
}

impl<F> CompilerCore for F
where
    F: Fn(&str, &str) -> Result<String, String> + Send + Sync,
{
    fn compile(&self, source: &str, file_name: &str) -> Result<String, String> {
        self(source, file_name)
    }
}

/// parse -> bind -> check -> emit over the tsz crates.
#[derive(Clone, Debug, Default)]
pub struct TszCompiler {
    options: CompileOptions,
}

impl TszCompiler {
    pub fn new(options: CompileOptions) -> Self {
        TszCompiler { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }
}

impl CompilerCore for TszCompiler {
    fn compile(&self, source: &str, file_name: &str) -> Result<String, String> {
        let mut parser = ParserState::new(file_name.to_string(), source);
        parser.set_jsx(self.options.is_tsx(file_name));
        let root = {
            let _span = debug_span!("parse", file = file_name).entered();
            parser.parse_source_file()
        };

        let parse_diagnostics: Vec<Diagnostic> = parser
            .get_diagnostics()
            .iter()
            .map(|diagnostic| diagnostic.to_diagnostic(file_name))
            .collect();
        if !parse_diagnostics.is_empty() {
            debug!(count = parse_diagnostics.len(), "syntax errors");
            return Err(render_diagnostics(&parse_diagnostics, source));
        }

        let arena = parser.get_arena();
        if !self.options.transpile_only() {
            let diagnostics = {
                let _span = debug_span!("check", file = file_name).entered();
                check_program(arena, root, file_name, &self.options.checker_options())
            };
            if has_errors(&diagnostics) {
                debug!(count = diagnostics.len(), "semantic errors");
                return Err(render_diagnostics(&diagnostics, source));
            }
        }

        if self.options.is_declaration(file_name) {
            return Ok(String::new());
        }
        let output = print_source_file(arena, root, source, file_name, self.options.print_options());
        Ok(output.code)
    }
}
