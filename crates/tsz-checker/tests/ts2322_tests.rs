//! Tests for TS2322 "Type 'X' is not assignable to type 'Y'".

use crate::diagnostics::diagnostic_codes;
use crate::test_utils::{codes, diagnostics, summarize};

#[test]
fn test_string_initializer_for_number_annotation() {
    let diags = diagnostics("let x: number = \"oops\";");
    assert_eq!(
        summarize(&diags),
        vec![(
            4,
            diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE,
            "Type 'string' is not assignable to type 'number'.".to_string()
        )]
    );
}

#[test]
fn test_matching_initializer_is_clean() {
    assert!(codes("let x: number = 1;").is_empty());
    assert!(codes("const s: string = `a${1}b`;").is_empty());
    assert!(codes("let b: boolean = !0;").is_empty());
}

#[test]
fn test_literal_target_keeps_literal_source() {
    let diags = diagnostics("let x: \"a\" | \"b\" = \"c\";");
    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags[0].message_text,
        "Type '\"c\"' is not assignable to type '\"a\" | \"b\"'."
    );
}

#[test]
fn test_array_literal_element_is_reported_at_element() {
    let diags = diagnostics("let xs: number[] = [1, \"two\", 3];");
    assert_eq!(
        summarize(&diags),
        vec![(
            23,
            2322,
            "Type 'string' is not assignable to type 'number'.".to_string()
        )]
    );
}

#[test]
fn test_object_literal_property_is_reported_at_name() {
    let diags = diagnostics("let p: { name: string } = { name: 42 };");
    assert_eq!(
        summarize(&diags),
        vec![(
            28,
            2322,
            "Type 'number' is not assignable to type 'string'.".to_string()
        )]
    );
}

#[test]
fn test_missing_required_property_reports_on_declaration() {
    let diags = diagnostics("let p: { a: number; b: number } = { a: 1 };");
    assert_eq!(diags.len(), 1);
    assert_eq!((diags[0].start, diags[0].code), (4, 2322));
}

#[test]
fn test_return_statement_is_anchored_at_keyword() {
    let diags = diagnostics("function f(): number { return \"s\"; }");
    assert_eq!(diags.len(), 1);
    assert_eq!((diags[0].start, diags[0].length, diags[0].code), (23, 6, 2322));
}

#[test]
fn test_concise_arrow_body_checked_against_annotation() {
    let diags = diagnostics("const f = (): number => \"s\";");
    assert_eq!(summarize(&diags)[0].0, 24);
    assert_eq!(diags[0].code, 2322);
}

#[test]
fn test_assignment_to_inferred_let() {
    let diags = diagnostics("let n = 1; n = \"s\";");
    assert_eq!(
        summarize(&diags),
        vec![(
            11,
            2322,
            "Type 'string' is not assignable to type 'number'.".to_string()
        )]
    );
}

#[test]
fn test_class_property_initializer() {
    let diags = diagnostics("class C { x: number = \"s\"; }");
    assert_eq!(summarize(&diags)[0].0, 10);
    assert_eq!(diags.len(), 1);
}

#[test]
fn test_interface_and_alias_shapes() {
    let source = "interface Point { x: number; y: number }\n\
                  type Named = { name: string };\n\
                  const p: Point = { x: 1, y: 2 };\n\
                  const n: Named = { name: \"n\" };";
    assert!(codes(source).is_empty());
}

#[test]
fn test_const_assertion_is_not_a_type_reference() {
    let source = "const t = [1, 2] as const;\nlet n: number = t.length;";
    assert!(codes(source).is_empty());
}

#[test]
fn test_any_and_unknown_targets_accept_everything() {
    assert!(codes("let a: any = 1; let u: unknown = \"s\"; let b: number = a;").is_empty());
}

#[test]
fn test_conditional_expression_checks_each_branch() {
    let diags = diagnostics("function g(c: boolean) { let x: number = c ? 1 : \"no\"; }");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, 2322);
    assert_eq!(diags[0].start, 49);
}
