//! Tests for call arity (TS2554, TS2555) and argument types (TS2345).

use crate::test_utils::{codes, diagnostics, summarize};

#[test]
fn test_too_few_arguments_reported_at_callee() {
    let diags = diagnostics("function f(a: number, b: string) {}\nf(1);");
    assert_eq!(
        summarize(&diags),
        vec![(36, 2554, "Expected 2 arguments, but got 1.".to_string())]
    );
}

#[test]
fn test_too_many_arguments_reported_at_excess() {
    let diags = diagnostics("function g(a: number) {}\ng(1, 2, 3);");
    assert_eq!(
        summarize(&diags),
        vec![(30, 2554, "Expected 1 arguments, but got 3.".to_string())]
    );
}

#[test]
fn test_optional_parameters_give_a_range() {
    let diags = diagnostics("function h(a: number, b?: number) {}\nh();");
    assert_eq!(diags[0].message_text, "Expected 1-2 arguments, but got 0.");
    assert_eq!(diags[0].code, 2554);
}

#[test]
fn test_rest_parameter_gives_lower_bound() {
    let diags = diagnostics("function r(a: number, ...rest: number[]) {}\nr();");
    assert_eq!(diags[0].message_text, "Expected at least 1 arguments, but got 0.");
    assert_eq!(diags[0].code, 2555);
    assert!(codes("function r(a: number, ...rest: number[]) {}\nr(1, 2, 3);").is_empty());
}

#[test]
fn test_argument_type_mismatch() {
    let diags = diagnostics("function f(a: number) {}\nf(\"x\");");
    assert_eq!(
        summarize(&diags),
        vec![(
            27,
            2345,
            "Argument of type 'string' is not assignable to parameter of type 'number'."
                .to_string()
        )]
    );
}

#[test]
fn test_untyped_callees_are_not_checked() {
    assert!(codes("declare const o: any;\no.foo(1, 2);").is_empty());
    assert!(codes("console.log(1, \"two\", [3]);").is_empty());
}

#[test]
fn test_arrow_function_variable_is_callable() {
    let diags = diagnostics("const add = (a: number, b: number) => a + b;\nadd(1);");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, 2554);
}
