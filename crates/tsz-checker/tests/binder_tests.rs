//! Tests for scopes and symbols.

use tsz_parser::ParserState;

use crate::binder::{BinderState, SymbolFlags};

fn bind(source: &str) -> BinderState {
    let mut parser = ParserState::new("test.ts".to_string(), source);
    let root = parser.parse_source_file();
    let mut binder = BinderState::new("test.ts");
    binder.bind_source_file(parser.get_arena(), root);
    binder
}

#[test]
fn test_var_hoists_to_function_scope() {
    let binder = bind("var x; function f() { if (x) { var y; } }");
    let root = binder.root_scope();
    assert!(binder.resolve_name(root, "x", SymbolFlags::VALUE).is_some());
    assert!(binder.resolve_name(root, "f", SymbolFlags::FUNCTION).is_some());
    assert!(binder.resolve_name(root, "y", SymbolFlags::VALUE).is_none());
}

#[test]
fn test_meanings_are_separate() {
    let binder = bind("interface Shape {}\nconst value = 1;");
    let root = binder.root_scope();
    assert!(binder.resolve_name(root, "Shape", SymbolFlags::TYPE).is_some());
    assert!(binder.resolve_name(root, "Shape", SymbolFlags::VALUE).is_none());
    let value = binder
        .resolve_name(root, "value", SymbolFlags::VALUE)
        .expect("value is declared");
    assert!(binder.symbol(value).flags.contains(SymbolFlags::CONST));
}

#[test]
fn test_ambient_modules_are_recorded() {
    let binder = bind("declare module \"foo\" {}\ndeclare module \"*.svg\";");
    assert_eq!(binder.declared_modules(), ["foo".to_string(), "*.svg".to_string()]);
}

#[test]
fn test_redeclaration_diagnostics() {
    let binder = bind("let a; const a = 1;");
    let codes: Vec<u32> = binder.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![2451, 2451]);
}
