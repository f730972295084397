//! Tests for TS2304 "Cannot find name".

use crate::test_utils::{codes, diagnostics, summarize};

#[test]
fn test_unknown_value_name() {
    let diags = diagnostics("let x = y;");
    assert_eq!(
        summarize(&diags),
        vec![(8, 2304, "Cannot find name 'y'.".to_string())]
    );
}

#[test]
fn test_unknown_type_name() {
    let diags = diagnostics("let x: Foo;");
    assert_eq!(
        summarize(&diags),
        vec![(7, 2304, "Cannot find name 'Foo'.".to_string())]
    );
}

#[test]
fn test_globals_resolve() {
    assert!(codes("console.log(Math.max(1, 2));\nlet p: Promise<string>;").is_empty());
}

#[test]
fn test_function_declarations_are_hoisted() {
    assert!(codes("f();\nfunction f() {}").is_empty());
}

#[test]
fn test_block_scoped_name_is_not_visible_outside_block() {
    let diags = diagnostics("{ let a = 1; } a;");
    assert_eq!(summarize(&diags)[0].0, 15);
    assert_eq!(diags.len(), 1);
}

#[test]
fn test_type_parameters_are_in_scope() {
    assert!(codes("function id<T>(x: T): T { return x; }").is_empty());
    assert!(codes("type Box<T> = { value: T };\ninterface List<T> { items: T[] }").is_empty());
}

#[test]
fn test_enum_members_refer_to_each_other() {
    assert!(codes("enum E { A = 1, B = A * 2 }\nlet e: E = E.B;").is_empty());
}

#[test]
fn test_interface_heritage_must_resolve() {
    let diags = diagnostics("interface A extends Missing {}");
    assert_eq!(summarize(&diags)[0].0, 20);
    assert_eq!(diags[0].code, 2304);
}

#[test]
fn test_local_export_must_resolve() {
    let diags = diagnostics("export { nope };");
    assert_eq!(summarize(&diags)[0].0, 9);
    assert!(codes("const here = 1;\nexport { here as there };").is_empty());
}

#[test]
fn test_namespace_members_resolve_inside_namespace() {
    let source = "namespace NS { export const v = 1; const w = v + 1; }";
    assert!(codes(source).is_empty());
}

#[test]
fn test_catch_variable_is_scoped_to_clause() {
    assert!(codes("try {} catch (e) { console.log(e); }").is_empty());
    let diags = diagnostics("try {} catch (e) {} e;");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, 2304);
}
