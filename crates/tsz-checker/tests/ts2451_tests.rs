//! Tests for TS2451 "Cannot redeclare block-scoped variable".

use crate::test_utils::{codes, diagnostics, summarize};

#[test]
fn test_let_redeclaration_reports_every_declaration() {
    let diags = diagnostics("let a = 1; let a = 2;");
    let message = "Cannot redeclare block-scoped variable 'a'.".to_string();
    assert_eq!(
        summarize(&diags),
        vec![(4, 2451, message.clone()), (15, 2451, message)]
    );
}

#[test]
fn test_var_redeclaration_is_allowed() {
    assert!(codes("var b; var b;").is_empty());
}

#[test]
fn test_shadowing_in_nested_block_is_allowed() {
    assert!(codes("let c = 1; { let c = 2; }").is_empty());
}
