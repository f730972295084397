//! Shared helpers for the checker unit tests.

use tsz_common::Diagnostic;
use tsz_parser::ParserState;

use crate::{CheckerOptions, check_program};

pub(crate) fn diagnostics_with(source: &str, options: CheckerOptions) -> Vec<Diagnostic> {
    let mut parser = ParserState::new("test.ts".to_string(), source);
    let root = parser.parse_source_file();
    let parse_codes: Vec<u32> = parser.get_diagnostics().iter().map(|d| d.code).collect();
    assert!(parse_codes.is_empty(), "unexpected parse errors: {parse_codes:?}");
    check_program(parser.get_arena(), root, "test.ts", &options)
}

pub(crate) fn diagnostics(source: &str) -> Vec<Diagnostic> {
    diagnostics_with(source, CheckerOptions::default())
}

pub(crate) fn strict_diagnostics(source: &str) -> Vec<Diagnostic> {
    diagnostics_with(
        source,
        CheckerOptions {
            strict_null_checks: true,
            ..CheckerOptions::default()
        },
    )
}

pub(crate) fn codes(source: &str) -> Vec<u32> {
    diagnostics(source).iter().map(|d| d.code).collect()
}

/// `(start, code, message)` triples.
pub(crate) fn summarize(diagnostics: &[Diagnostic]) -> Vec<(u32, u32, String)> {
    diagnostics
        .iter()
        .map(|d| (d.start, d.code, d.message_text.clone()))
        .collect()
}
