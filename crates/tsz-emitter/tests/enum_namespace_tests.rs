use tsz_emitter::{PrintOptions, print_source_file};
use tsz_parser::ParserState;

fn emit(source: &str) -> String {
    let mut parser = ParserState::new("test.ts".to_string(), source);
    let root = parser.parse_source_file();
    print_source_file(parser.get_arena(), root, source, "test.ts", PrintOptions::default()).code
}

// =============================================================================
// Enums
// =============================================================================

#[test]
fn test_enum_members_fold_and_auto_increment() {
    let output = emit("enum Color { Red, Green = \"g\", Blue = 4, Mask = Blue << 1 }");
    let expected = r#"var Color;
(function (Color) {
    Color[Color["Red"] = 0] = "Red";
    Color["Green"] = "g";
    Color[Color["Blue"] = 4] = "Blue";
    Color[Color["Mask"] = 8] = "Mask";
})(Color || (Color = {}));
"#;
    assert_eq!(output, expected);
}

#[test]
fn test_exported_enum() {
    let output = emit("export enum E { A = 1, B }");
    let expected = r#"export var E;
(function (E) {
    E[E["A"] = 1] = "A";
    E[E["B"] = 2] = "B";
})(E || (E = {}));
"#;
    assert_eq!(output, expected);
}

#[test]
fn test_declare_enum_emits_nothing() {
    assert_eq!(emit("declare enum D { A }"), "");
}

#[test]
fn test_computed_initializers_reference_the_enum_object() {
    let output = emit("enum F { A = \"x\".length, B = A * 2 }");
    assert!(
        output.contains("F[F[\"A\"] = \"x\".length] = \"A\";"),
        "Non-constant initializer should be emitted as written: {output}"
    );
    assert!(
        output.contains("F[F[\"B\"] = F.A * 2] = \"B\";"),
        "Sibling member references should be qualified: {output}"
    );
}

#[test]
fn test_merged_enum_declares_its_variable_once() {
    let output = emit("enum M { A }\nenum M { B = 2 }");
    let expected = r#"var M;
(function (M) {
    M[M["A"] = 0] = "A";
})(M || (M = {}));
(function (M) {
    M[M["B"] = 2] = "B";
})(M || (M = {}));
"#;
    assert_eq!(output, expected);
}

// =============================================================================
// Namespaces
// =============================================================================

#[test]
fn test_namespace_exports_are_qualified() {
    let source = r#"namespace NS {
    export const x = 1;
    export function f() { return x; }
    const hidden = 2;
    export interface I {}
}"#;
    let expected = r#"var NS;
(function (NS) {
    NS.x = 1;
    function f() { return NS.x; }
    NS.f = f;
    const hidden = 2;
})(NS || (NS = {}));
"#;
    assert_eq!(emit(source), expected);
}

#[test]
fn test_dotted_namespace_nests_iifes() {
    let expected = r#"var A;
(function (A) {
    let B;
    (function (B) {
        B.y = 2;
    })(B = A.B || (A.B = {}));
})(A || (A = {}));
"#;
    assert_eq!(emit("namespace A.B { export let y = 2; }"), expected);
}

#[test]
fn test_uninstantiated_namespaces_emit_nothing() {
    assert_eq!(emit("namespace T { export type X = number; }"), "");
    assert_eq!(emit("declare namespace D { const z: number; }"), "");
}

#[test]
fn test_enum_inside_namespace_is_attached_to_it() {
    let output = emit("namespace N { export enum K { A } }");
    assert!(output.contains("    let K;\n"), "Nested enum binding should be block scoped: {output}");
    assert!(
        output.contains("})(K = N.K || (N.K = {}));"),
        "Exported nested enum should be attached to the namespace: {output}"
    );
}
