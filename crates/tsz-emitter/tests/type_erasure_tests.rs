use tsz_emitter::{PrintOptions, print_source_file};
use tsz_parser::ParserState;

fn emit(source: &str) -> String {
    let mut parser = ParserState::new("test.ts".to_string(), source);
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected parse errors for {source:?}"
    );
    print_source_file(parser.get_arena(), root, source, "test.ts", PrintOptions::default()).code
}

#[test]
fn test_type_annotations_are_removed() {
    assert_eq!(emit("let x: number = 1;"), "let x = 1;\n");
    assert_eq!(
        emit("function add(a: number, b?: number): number {\n    return a + (b ?? 0);\n}"),
        "function add(a, b) {\n    return a + (b ?? 0);\n}\n"
    );
}

#[test]
fn test_type_only_declarations_emit_nothing() {
    let output = emit("interface A { x: number }\ntype B = string;\n");
    assert_eq!(output, "", "Interfaces and aliases have no runtime form");
}

#[test]
fn test_assertions_are_erased() {
    let output = emit(
        "const el = (document as any).body!;\nconst n = <number>value;\nconst s = obj satisfies object;",
    );
    assert_eq!(
        output,
        "const el = document.body;\nconst n = value;\nconst s = obj;\n"
    );
}

#[test]
fn test_type_arguments_and_parameters_are_removed() {
    let output = emit("function id<T>(x: T): T { return x; }\nconst y = id<string>(\"a\");");
    assert_eq!(output, "function id(x) { return x; }\nconst y = id(\"a\");\n");
}

#[test]
fn test_ambient_declarations_and_overloads_are_dropped() {
    let output = emit(
        "declare const g: number;\ndeclare function h(): void;\nfunction over(a: string): void;\nfunction over(a: any) {}",
    );
    assert_eq!(output, "function over(a) { }\n");
}

#[test]
fn test_this_parameter_is_dropped() {
    assert_eq!(
        emit("function f(this: Window, a: number) {}"),
        "function f(a) { }\n"
    );
}

#[test]
fn test_arrow_functions() {
    let output = emit("const f = (x: number): number => x * 2;\nconst g = x => x;");
    assert_eq!(output, "const f = (x) => x * 2;\nconst g = x => x;\n");
}

#[test]
fn test_arrow_body_object_keeps_parentheses_after_erasure() {
    let output = emit("const h = () => <any>{ a: 1 };");
    assert_eq!(output, "const h = () => ({ a: 1 });\n");
}

#[test]
fn test_class_parameter_properties_and_modifiers() {
    let source = r#"abstract class Point extends Base implements Shape {
    private z: number = 0;
    declare w: string;
    abstract area(): number;
    constructor(public x: number, readonly y: number) {
        super();
        this.init();
    }
    get len(): number { return 1; }
}"#;
    let expected = r#"class Point extends Base {
    z = 0;
    constructor(x, y) {
        super();
        this.x = x;
        this.y = y;
        this.init();
    }
    get len() { return 1; }
}
"#;
    assert_eq!(emit(source), expected);
}

#[test]
fn test_object_and_array_literals() {
    let output = emit("const o = { a: 1, b, [k]: 2, ...rest, m() { return 1; } };\nconst arr = [1, , 3];");
    assert_eq!(
        output,
        "const o = { a: 1, b, [k]: 2, ...rest, m() { return 1; } };\nconst arr = [1, , 3];\n"
    );
}

#[test]
fn test_multi_line_object_literal_is_reindented() {
    let output = emit("const cfg = {\n  a: 1,\n  b: \"two\",\n};");
    assert_eq!(output, "const cfg = {\n    a: 1,\n    b: \"two\"\n};\n");
}

#[test]
fn test_control_flow_layout() {
    let output = emit("if (a) b();\nelse if (c) { d(); }\nelse e();\nfor (let i = 0; i < 3; i++) {}");
    assert_eq!(
        output,
        "if (a)\n    b();\nelse if (c) { d(); } else\n    e();\nfor (let i = 0; i < 3; i++) { }\n"
    );
}

#[test]
fn test_empty_source_emits_nothing() {
    assert_eq!(emit(""), "");
}
