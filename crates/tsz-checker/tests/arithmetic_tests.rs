//! Tests for arithmetic operand checks (TS2362, TS2363) and assignments to
//! constants (TS2588).

use crate::test_utils::{codes, diagnostics, summarize};

#[test]
fn test_string_left_operand() {
    let diags = diagnostics("let s = \"a\"; let n = s * 2;");
    assert_eq!(summarize(&diags)[0].0, 21);
    assert_eq!(diags[0].code, 2362);
    assert_eq!(diags.len(), 1);
}

#[test]
fn test_string_right_operand() {
    let diags = diagnostics("let n = 2 - \"x\";");
    assert_eq!(summarize(&diags)[0].0, 12);
    assert_eq!(diags[0].code, 2363);
}

#[test]
fn test_plus_concatenates() {
    assert!(codes("let s: string = 1 + \"a\";").is_empty());
}

#[test]
fn test_enum_operands_are_numeric() {
    assert!(codes("enum E { A, B }\nlet n = E.A + 1;\nlet m = E.B * 2;").is_empty());
}

#[test]
fn test_assignment_to_constant() {
    let diags = diagnostics("const k = 1; k = 2;");
    assert_eq!(
        summarize(&diags),
        vec![(
            13,
            2588,
            "Cannot assign to 'k' because it is a constant.".to_string()
        )]
    );
    assert_eq!(codes("const k = 1; k++;"), vec![2588]);
    assert_eq!(codes("const k = 1; k += 1;"), vec![2588]);
}
