//! Binder and type checker for one TypeScript file.
//!
//! This crate is organized into several modules:
//! - `binder` - scopes, symbols and block-scoped redeclarations
//! - `context` - `CheckerContext` for shared state and `CheckerOptions`
//! - `state` - `CheckerState`, the entry point, and symbol typing
//! - `type_nodes` - type annotations to `Type`
//! - `expressions` - expression typing and contextual assignability
//! - `statements` - statement and declaration checking
//! - `import_checker` - module specifier resolution
//! - `error_reporter` - diagnostic emission
//!
//! ```
//! use tsz_checker::{CheckerOptions, check_program};
//! use tsz_parser::ParserState;
//!
//! let mut parser = ParserState::new("a.ts".to_string(), "let x: number = \"oops\";");
//! let root = parser.parse_source_file();
//! let diagnostics = check_program(parser.get_arena(), root, "a.ts", &CheckerOptions::default());
//! assert_eq!(diagnostics[0].code, 2322);
//! ```

pub mod assignability;
pub mod binder;
pub mod context;
mod error_reporter;
mod expressions;
pub mod globals;
pub mod import_checker;
pub mod state;
mod statements;
mod type_nodes;
pub mod types;

pub use assignability::is_assignable;
pub use binder::{BinderState, SymbolFlags};
pub use context::{CheckerContext, CheckerOptions};
pub use state::CheckerState;
pub use types::Type;

pub mod diagnostics {
    pub use tsz_common::diagnostics::{
        Diagnostic, DiagnosticCategory, diagnostic_codes, diagnostic_messages, format_message,
    };
}

use tsz_common::Diagnostic;
use tsz_parser::{NodeArena, NodeIndex};

/// Bind and check a parsed file. Binder and checker diagnostics are merged,
/// deduplicated on `(start, code)` and sorted by position.
pub fn check_program(
    arena: &NodeArena,
    root: NodeIndex,
    file_name: &str,
    options: &CheckerOptions,
) -> Vec<Diagnostic> {
    let mut binder = BinderState::new(file_name);
    binder.bind_source_file(arena, root);

    let mut checker = CheckerState::new(arena, &binder, file_name, options.clone());
    checker.check_source_file(root);

    let mut diagnostics: Vec<Diagnostic> = binder.diagnostics().to_vec();
    diagnostics.extend(checker.into_diagnostics());
    diagnostics.sort_by_key(|d| (d.start, d.code));
    diagnostics.dedup_by_key(|d| (d.start, d.code));
    diagnostics
}

#[cfg(test)]
#[path = "../tests/test_utils.rs"]
mod test_utils;
#[cfg(test)]
#[path = "../tests/ts2322_tests.rs"]
mod ts2322_tests;
#[cfg(test)]
#[path = "../tests/ts2304_tests.rs"]
mod ts2304_tests;
#[cfg(test)]
#[path = "../tests/ts2307_tests.rs"]
mod ts2307_tests;
#[cfg(test)]
#[path = "../tests/ts2451_tests.rs"]
mod ts2451_tests;
#[cfg(test)]
#[path = "../tests/call_checker_tests.rs"]
mod call_checker_tests;
#[cfg(test)]
#[path = "../tests/arithmetic_tests.rs"]
mod arithmetic_tests;
#[cfg(test)]
#[path = "../tests/strict_null_tests.rs"]
mod strict_null_tests;
#[cfg(test)]
#[path = "../tests/binder_tests.rs"]
mod binder_tests;
