//! End-to-end tests for `check_program` through the public API.

use tsz_checker::{CheckerOptions, check_program};
use tsz_common::Diagnostic;
use tsz_parser::ParserState;

fn check(source: &str, options: &CheckerOptions) -> Vec<Diagnostic> {
    let mut parser = ParserState::new("input.ts".to_string(), source);
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty());
    check_program(parser.get_arena(), root, "input.ts", options)
}

#[test]
fn test_clean_program_has_no_diagnostics() {
    let source = "let x: number = 1;\n\
                  function greet(name: string): string { return `hi ${name}`; }\n\
                  const message = greet(\"tsz\");\n\
                  class Counter { count = 0; increment(): number { return ++this.count; } }\n";
    assert!(check(source, &CheckerOptions::default()).is_empty());
}

#[test]
fn test_empty_program() {
    assert!(check("", &CheckerOptions::default()).is_empty());
}

#[test]
fn test_diagnostics_are_sorted_by_position() {
    let source = "let b: string = 2;\nlet a = missing;\nlet a = 3;";
    let diagnostics = check(source, &CheckerOptions::default());
    let starts: Vec<u32> = diagnostics.iter().map(|d| d.start).collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
    let codes: Vec<u32> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![2322, 2451, 2304, 2451]);
}

#[test]
fn test_diagnostics_carry_the_file_name() {
    let diagnostics = check("let x: number = \"oops\";", &CheckerOptions::default());
    assert_eq!(diagnostics[0].file, "input.ts");
    assert_eq!(diagnostics[0].length, 1);
}

#[test]
fn test_known_modules_are_patterns() {
    let options = CheckerOptions {
        known_modules: vec!["node:*".to_string()],
        ..CheckerOptions::default()
    };
    assert!(check("import { readFile } from \"node:fs\";", &options).is_empty());
    let diagnostics = check("import { readFile } from \"fs\";", &options);
    assert_eq!(diagnostics[0].code, 2307);
}
