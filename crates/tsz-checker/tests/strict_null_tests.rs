//! Tests for `strict_null_checks`.

use crate::test_utils::{codes, diagnostics, strict_diagnostics, summarize};

#[test]
fn test_null_is_assignable_without_strict() {
    assert!(codes("let x: number = null;").is_empty());
}

#[test]
fn test_null_is_rejected_with_strict() {
    let diags = strict_diagnostics("let x: number = null;");
    assert_eq!(
        summarize(&diags),
        vec![(
            4,
            2322,
            "Type 'null' is not assignable to type 'number'.".to_string()
        )]
    );
}

#[test]
fn test_optional_parameter_includes_undefined() {
    let source = "function f(a?: number) { let n: number = a; }";
    assert!(diagnostics(source).is_empty());
    let diags = strict_diagnostics(source);
    assert_eq!(
        diags[0].message_text,
        "Type 'number | undefined' is not assignable to type 'number'."
    );
}

#[test]
fn test_explicit_undefined_union_accepts_undefined() {
    assert!(strict_diagnostics("let u: string | undefined = undefined;").is_empty());
}
