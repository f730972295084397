use tsz_emitter::{PrintOptions, print_source_file};
use tsz_parser::ParserState;

fn emit(source: &str) -> String {
    let mut parser = ParserState::new("test.ts".to_string(), source);
    let root = parser.parse_source_file();
    print_source_file(parser.get_arena(), root, source, "test.ts", PrintOptions::default()).code
}

#[test]
fn test_imports_used_only_as_types_are_elided() {
    let output = emit("import { A, b } from \"./m\";\nlet x: A = b;");
    assert_eq!(output, "import { b } from \"./m\";\nlet x = b;\n");
}

#[test]
fn test_fully_elided_module_keeps_export_marker() {
    let output = emit("import type { T } from \"./t\";\nimport { U } from \"./u\";\nlet v: T | U;");
    assert_eq!(output, "let v;\nexport {};\n");
}

#[test]
fn test_type_only_module_emits_export_marker() {
    assert_eq!(emit("export interface I { }"), "export {};\n");
}

#[test]
fn test_default_and_namespace_imports() {
    let output = emit("import d, * as ns from \"./m\";\nconsole.log(ns);");
    assert_eq!(output, "import * as ns from \"./m\";\nconsole.log(ns);\n");
}

#[test]
fn test_side_effect_import_is_kept() {
    assert_eq!(emit("import \"./side-effect\";"), "import \"./side-effect\";\n");
}

#[test]
fn test_export_list_drops_types() {
    let source = r#"interface Shape { }
type Alias = number;
const value = 1;
export { Shape, value as renamed };
export type { Alias };
export * from "./all";
export default value;"#;
    let expected = r#"const value = 1;
export { value as renamed };
export * from "./all";
export default value;
"#;
    assert_eq!(emit(source), expected);
}

#[test]
fn test_exported_declarations() {
    let output = emit(
        "export const a = 1;\nexport function f(): void {}\nexport default class C {}\nexport declare const d: number;",
    );
    assert_eq!(
        output,
        "export const a = 1;\nexport function f() { }\nexport default class C {\n}\n"
    );
}

#[test]
fn test_import_used_in_value_and_type_positions_is_kept() {
    let output = emit("import { Foo } from \"./foo\";\nconst f: Foo = new Foo();");
    assert_eq!(output, "import { Foo } from \"./foo\";\nconst f = new Foo();\n");
}

#[test]
fn test_import_alias_of_namespace_member() {
    let output = emit("namespace A { export const b = 1; }\nimport c = A.b;\nconsole.log(c);");
    assert!(output.contains("var c = A.b;"), "Referenced alias should become a var: {output}");
}

#[test]
fn test_unreferenced_import_alias_is_dropped() {
    let output = emit("namespace A { export const b = 1; }\nimport c = A.b;");
    assert!(!output.contains("var c"), "Unused alias should be elided: {output}");
}
