//! Tests for the parser: statements, expressions, types and error recovery.

use tsz_parser::{ModifierFlags, NodeArena, NodeData, NodeIndex, ParserState, VariableKind};

fn parse(source: &str) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new("test.ts".to_string(), source);
    let root = parser.parse_source_file();
    (parser, root)
}

fn statements(parser: &ParserState, root: NodeIndex) -> Vec<NodeIndex> {
    parser.get_arena().statements(root).to_vec()
}

fn error_codes(parser: &ParserState) -> Vec<u32> {
    parser.get_diagnostics().iter().map(|d| d.code).collect()
}

fn first_statement<'a>(parser: &'a ParserState, root: NodeIndex) -> &'a NodeData {
    let arena = parser.get_arena();
    let stmt = arena.statements(root)[0];
    arena.data(stmt).expect("statement exists")
}

fn expression_of(arena: &NodeArena, stmt: NodeIndex) -> NodeIndex {
    match arena.data(stmt) {
        Some(NodeData::ExpressionStatement { expression }) => *expression,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

// =============================================================================
// Statements
// =============================================================================

#[test]
fn test_empty_source() {
    let (parser, root) = parse("");
    assert!(parser.get_diagnostics().is_empty());
    assert!(statements(&parser, root).is_empty());
}

#[test]
fn test_variable_statement_kinds() {
    let (parser, root) = parse("var a = 1;\nlet b = 2;\nconst c = 3;");
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let kinds: Vec<VariableKind> = statements(&parser, root)
        .into_iter()
        .map(|stmt| match arena.data(stmt) {
            Some(NodeData::VariableStatement {
                declaration_list, ..
            }) => match arena.data(*declaration_list) {
                Some(NodeData::VariableDeclarationList { kind, .. }) => *kind,
                other => panic!("unexpected {other:?}"),
            },
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(
        kinds,
        vec![VariableKind::Var, VariableKind::Let, VariableKind::Const]
    );
}

#[test]
fn test_const_without_initializer_is_error() {
    let (parser, _) = parse("const x;");
    assert_eq!(error_codes(&parser), vec![1155]);
}

#[test]
fn test_declare_const_without_initializer_is_allowed() {
    let (parser, _) = parse("declare const x: number;");
    assert!(parser.get_diagnostics().is_empty());
}

#[test]
fn test_control_flow_statements() {
    let source = r#"
if (a) { b(); } else if (c) { d(); } else { e(); }
for (let i = 0; i < 10; i++) { continue; }
for (const k in obj) {}
for (const v of list) { break; }
while (x) { x--; }
do { y++; } while (y < 3);
switch (z) { case 1: f(); break; default: g(); }
try { h(); } catch (err) { throw err; } finally { cleanup(); }
outer: for (;;) { break outer; }
debugger;
"#;
    let (parser, root) = parse(source);
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.get_diagnostics()
    );
    assert_eq!(statements(&parser, root).len(), 10);
}

#[test]
fn test_asi_with_line_breaks() {
    let (parser, root) = parse("let a = 1\nlet b = a\nb++");
    assert!(parser.get_diagnostics().is_empty());
    assert_eq!(statements(&parser, root).len(), 3);
}

#[test]
fn test_missing_semicolon_on_same_line() {
    let (parser, _) = parse("let a = 1 let b = 2;");
    assert_eq!(error_codes(&parser), vec![1005]);
}

#[test]
fn test_unclosed_brace_reports_error() {
    let (parser, _) = parse("function f() {\n  return 1;\n");
    assert!(error_codes(&parser).contains(&1005));
}

#[test]
fn test_shebang_is_skipped() {
    let (parser, root) = parse("#!/usr/bin/env node\nconsole.log(1);");
    assert!(parser.get_diagnostics().is_empty());
    assert_eq!(statements(&parser, root).len(), 1);
}

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn test_function_declaration_with_types() {
    let (parser, root) = parse("export async function f<T>(a: T, b?: number, ...rest: string[]): Promise<T> { return a; }");
    assert!(parser.get_diagnostics().is_empty());
    match first_statement(&parser, root) {
        NodeData::FunctionDeclaration(function) => {
            assert!(function.modifiers.contains(ModifierFlags::EXPORT));
            assert!(function.modifiers.contains(ModifierFlags::ASYNC));
            assert_eq!(function.type_parameters.len(), 1);
            assert_eq!(function.parameters.len(), 3);
            assert!(function.return_type.is_some());
            assert!(function.body.is_some());
        }
        other => panic!("expected function declaration, got {other:?}"),
    }
}

#[test]
fn test_overload_signature_has_no_body() {
    let (parser, root) = parse("function f(a: string): void;\nfunction f(a: any) {}");
    assert!(parser.get_diagnostics().is_empty());
    match first_statement(&parser, root) {
        NodeData::FunctionDeclaration(function) => assert!(function.body.is_none()),
        other => panic!("expected function declaration, got {other:?}"),
    }
}

#[test]
fn test_class_members() {
    let source = r#"
abstract class Animal<T> extends Base implements Named, Other {
    static count = 0;
    private readonly name: string;
    #secret?: number;
    [key: string]: any;
    constructor(public id: number, protected tag?: string) { super(); }
    get label(): string { return this.name; }
    set label(value: string) {}
    abstract speak(): void;
    static { Animal.count++; }
    *items() { yield 1; }
    async load() { await this.fetch(); }
}
"#;
    let (parser, root) = parse(source);
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.get_diagnostics()
    );
    let arena = parser.get_arena();
    match first_statement(&parser, root) {
        NodeData::ClassDeclaration(class) => {
            assert!(class.modifiers.contains(ModifierFlags::ABSTRACT));
            assert!(class.extends.is_some());
            assert_eq!(class.implements.len(), 2);
            let kinds: Vec<&str> = class
                .members
                .iter()
                .filter_map(|m| arena.get(*m))
                .map(|node| node.kind_name())
                .collect();
            assert!(kinds.contains(&"Constructor"));
            assert!(kinds.contains(&"GetAccessor"));
            assert!(kinds.contains(&"SetAccessor"));
            assert!(kinds.contains(&"IndexSignature"));
            assert!(kinds.contains(&"ClassStaticBlock"));
            let constructor = class
                .members
                .iter()
                .find_map(|m| match arena.data(*m) {
                    Some(NodeData::Constructor(function)) => Some(function),
                    _ => None,
                })
                .expect("constructor");
            let first_param = match arena.data(constructor.parameters[0]) {
                Some(NodeData::Parameter(param)) => param,
                other => panic!("expected parameter, got {other:?}"),
            };
            assert!(first_param.modifiers.contains(ModifierFlags::PUBLIC));
        }
        other => panic!("expected class declaration, got {other:?}"),
    }
}

#[test]
fn test_interface_and_type_alias() {
    let source = r#"
interface Shape extends Base<number> {
    readonly kind: "circle" | "square";
    area(): number;
    new (x: number): Shape;
    (y: string): void;
    [index: number]: string;
    optional?: boolean
}
type Pair<A, B = A> = [first: A, second?: B, ...rest: unknown[]];
"#;
    let (parser, root) = parse(source);
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.get_diagnostics()
    );
    let arena = parser.get_arena();
    match first_statement(&parser, root) {
        NodeData::InterfaceDeclaration { members, heritage, .. } => {
            assert_eq!(members.len(), 6);
            assert_eq!(heritage.len(), 1);
            let kinds: Vec<&str> = members
                .iter()
                .filter_map(|m| arena.get(*m))
                .map(|node| node.kind_name())
                .collect();
            assert_eq!(
                kinds,
                vec![
                    "PropertySignature",
                    "MethodSignature",
                    "ConstructSignature",
                    "CallSignature",
                    "IndexSignature",
                    "PropertySignature"
                ]
            );
        }
        other => panic!("expected interface, got {other:?}"),
    }
}

#[test]
fn test_enum_and_namespace() {
    let (parser, root) = parse(
        "const enum Color { Red, Green = 2, Blue }\nnamespace A.B { export const x = 1; }\ndeclare module \"lib\" { export function f(): void; }",
    );
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let stmts = statements(&parser, root);
    match arena.data(stmts[0]) {
        Some(NodeData::EnumDeclaration { modifiers, members, .. }) => {
            assert!(modifiers.contains(ModifierFlags::CONST));
            assert_eq!(members.len(), 3);
        }
        other => panic!("expected enum, got {other:?}"),
    }
    match arena.data(stmts[1]) {
        Some(NodeData::ModuleDeclaration(module)) => {
            // `A.B` nests a second module declaration as the body
            assert!(matches!(
                arena.data(module.body),
                Some(NodeData::ModuleDeclaration(_))
            ));
        }
        other => panic!("expected namespace, got {other:?}"),
    }
    match arena.data(stmts[2]) {
        Some(NodeData::ModuleDeclaration(module)) => {
            assert!(module.modifiers.contains(ModifierFlags::DECLARE));
            assert!(matches!(
                arena.data(module.name),
                Some(NodeData::Literal { .. })
            ));
        }
        other => panic!("expected ambient module, got {other:?}"),
    }
}

#[test]
fn test_import_forms() {
    let source = r#"
import "side-effect";
import def from "a";
import * as ns from "b";
import { x, y as z, type T } from "c";
import type { U } from "d";
import def2, { w } from "e";
import data from "./data.json" with { type: "json" };
"#;
    let (parser, root) = parse(source);
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.get_diagnostics()
    );
    let arena = parser.get_arena();
    let stmts = statements(&parser, root);
    assert_eq!(stmts.len(), 7);
    match arena.data(stmts[4]) {
        Some(NodeData::ImportDeclaration(import)) => match arena.data(import.import_clause) {
            Some(NodeData::ImportClause { is_type_only, .. }) => assert!(*is_type_only),
            other => panic!("expected import clause, got {other:?}"),
        },
        other => panic!("expected import, got {other:?}"),
    }
}

#[test]
fn test_export_forms() {
    let source = r#"
export { a, b as c };
export * from "m";
export * as ns from "n";
export type { T } from "t";
export default function () {}
export const value = 1;
"#;
    let (parser, root) = parse(source);
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.get_diagnostics()
    );
    assert_eq!(statements(&parser, root).len(), 6);
}

#[test]
fn test_export_default_expression() {
    let (parser, root) = parse("export default 42;");
    assert!(parser.get_diagnostics().is_empty());
    assert!(matches!(
        first_statement(&parser, root),
        NodeData::ExportAssignment {
            is_export_equals: false,
            ..
        }
    ));
}

#[test]
fn test_import_equals_require_is_error() {
    let (parser, _) = parse("import fs = require(\"fs\");");
    assert_eq!(error_codes(&parser), vec![1202]);
}

#[test]
fn test_export_equals_is_error() {
    let (parser, _) = parse("export = foo;");
    assert_eq!(error_codes(&parser), vec![1203]);
}

#[test]
fn test_decorated_class() {
    let (parser, root) = parse("@sealed\nclass A { @log method() {} }");
    assert!(parser.get_diagnostics().is_empty());
    match first_statement(&parser, root) {
        NodeData::ClassDeclaration(class) => assert_eq!(class.decorators.len(), 1),
        other => panic!("expected class, got {other:?}"),
    }
}

// =============================================================================
// Expressions
// =============================================================================

#[test]
fn test_binary_precedence() {
    let (parser, root) = parse("a + b * c;");
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let expr = expression_of(arena, statements(&parser, root)[0]);
    match arena.data(expr) {
        Some(NodeData::BinaryExpression { right, .. }) => {
            assert!(matches!(
                arena.data(*right),
                Some(NodeData::BinaryExpression { .. })
            ));
        }
        other => panic!("expected binary expression, got {other:?}"),
    }
}

#[test]
fn test_exponent_is_right_associative() {
    let (parser, root) = parse("a ** b ** c;");
    let arena = parser.get_arena();
    let expr = expression_of(arena, statements(&parser, root)[0]);
    match arena.data(expr) {
        Some(NodeData::BinaryExpression { left, right, .. }) => {
            assert!(matches!(arena.data(*left), Some(NodeData::Identifier { .. })));
            assert!(matches!(
                arena.data(*right),
                Some(NodeData::BinaryExpression { .. })
            ));
        }
        other => panic!("expected binary expression, got {other:?}"),
    }
}

#[test]
fn test_arrow_functions() {
    let source = r#"
const a = x => x + 1;
const b = (x: number, y = 2): number => x * y;
const c = async () => { await d(); };
const e = <T,>(v: T) => v;
const f = ({ p, q }: Obj) => p;
"#;
    let (parser, root) = parse(source);
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.get_diagnostics()
    );
    assert_eq!(statements(&parser, root).len(), 5);
}

#[test]
fn test_parenthesized_expression_is_not_arrow() {
    let (parser, root) = parse("(a + b) * c;");
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let expr = expression_of(arena, statements(&parser, root)[0]);
    assert!(matches!(
        arena.data(expr),
        Some(NodeData::BinaryExpression { .. })
    ));
}

#[test]
fn test_conditional_inside_parens_is_not_arrow() {
    let (parser, _) = parse("const v = (a ? (b) : c);");
    assert!(parser.get_diagnostics().is_empty());
}

#[test]
fn test_conditional_true_branch_is_not_arrow_with_return_type() {
    let (parser, root) = parse("let a = b ? (c) : d => e;");
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.get_diagnostics()
    );
    let arena = parser.get_arena();
    let NodeData::VariableStatement {
        declaration_list, ..
    } = first_statement(&parser, root)
    else {
        panic!("expected variable statement");
    };
    let Some(NodeData::VariableDeclarationList { declarations, .. }) = arena.data(*declaration_list) else {
        panic!("expected declaration list");
    };
    let Some(NodeData::VariableDeclaration(decl)) = arena.data(declarations[0]) else {
        panic!("expected declaration");
    };
    match arena.data(decl.initializer) {
        Some(NodeData::ConditionalExpression {
            when_true,
            when_false,
            ..
        }) => {
            assert!(matches!(
                arena.data(*when_true),
                Some(NodeData::ParenthesizedExpression { .. })
            ));
            assert!(matches!(
                arena.data(*when_false),
                Some(NodeData::ArrowFunction(_))
            ));
        }
        other => panic!("expected conditional expression, got {other:?}"),
    }
}

#[test]
fn test_conditional_true_branch_arrow_with_return_type() {
    let (parser, _) = parse("let f = b ? (x): number => x : null;");
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.get_diagnostics()
    );
}

#[test]
fn test_type_assertions_and_non_null() {
    let (parser, _) = parse("const a = x as unknown as string;\nconst b = y!.z;\nconst c = w satisfies T;\nconst d = <number>e;");
    assert!(parser.get_diagnostics().is_empty());
}

#[test]
fn test_call_with_type_arguments() {
    let (parser, root) = parse("f<string>(a);");
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let expr = expression_of(arena, statements(&parser, root)[0]);
    match arena.data(expr) {
        Some(NodeData::CallExpression {
            type_arguments,
            arguments,
            ..
        }) => {
            assert_eq!(type_arguments.len(), 1);
            assert_eq!(arguments.len(), 1);
        }
        other => panic!("expected call, got {other:?}"),
    }
}

#[test]
fn test_less_than_comparison_is_not_type_arguments() {
    let (parser, root) = parse("a < b;");
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let expr = expression_of(arena, statements(&parser, root)[0]);
    assert!(matches!(
        arena.data(expr),
        Some(NodeData::BinaryExpression { .. })
    ));
}

#[test]
fn test_optional_chaining() {
    let (parser, root) = parse("a?.b?.[c]?.(d);");
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let expr = expression_of(arena, statements(&parser, root)[0]);
    assert!(matches!(
        arena.data(expr),
        Some(NodeData::CallExpression {
            question_dot: true,
            ..
        })
    ));
}

#[test]
fn test_templates_and_regex() {
    let (parser, _) = parse("const t = `a${b}c${d + 1}e`;\nconst r = /ab+c/gi.test(s);\ntag`x${y}`;");
    assert!(parser.get_diagnostics().is_empty());
}

#[test]
fn test_object_and_array_literals() {
    let source = "const o = { a, b: 1, [c]: 2, ...d, m() {}, get g() { return 1; }, async *h() {} };\nconst arr = [1, , ...rest];";
    let (parser, _) = parse(source);
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.get_diagnostics()
    );
}

#[test]
fn test_new_and_meta_properties() {
    let (parser, _) = parse("const a = new Foo<number>(1);\nconst b = new Bar;\nconst u = import.meta.url;\nconst m = import(\"./m\");");
    assert!(parser.get_diagnostics().is_empty());
}

#[test]
fn test_missing_expression_is_reported() {
    let (parser, _) = parse("let x = ;");
    assert_eq!(error_codes(&parser), vec![1109]);
}

// =============================================================================
// Types
// =============================================================================

#[test]
fn test_type_forms() {
    let source = r#"
type A = string | number[] | readonly string[];
type B = { [K in keyof T]?: T[K] };
type C<T> = T extends (infer U)[] ? U : never;
type D = (a: number) => void;
type E = new () => object;
type F = typeof value.prop;
type G = `prefix-${string}`;
type H = import("./mod").Thing<number>;
type I = -1 | true | "lit" | null | undefined;
type J = A & B;
type K = unique symbol;
type L = { (x: number): string; readonly y: number };
"#;
    let (parser, root) = parse(source);
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.get_diagnostics()
    );
    assert_eq!(statements(&parser, root).len(), 12);
}

#[test]
fn test_conditional_type_shape() {
    let (parser, root) = parse("type X<T> = T extends string ? 1 : 2;");
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    match first_statement(&parser, root) {
        NodeData::TypeAliasDeclaration { type_node, .. } => assert!(matches!(
            arena.data(*type_node),
            Some(NodeData::ConditionalType { .. })
        )),
        other => panic!("expected type alias, got {other:?}"),
    }
}

#[test]
fn test_type_predicates() {
    let (parser, _) = parse(
        "function isString(x: unknown): x is string { return true; }\nfunction check(x: unknown): asserts x is number {}\nfunction ok(v: unknown): asserts v {}",
    );
    assert!(parser.get_diagnostics().is_empty());
}

#[test]
fn test_missing_type_is_reported() {
    let (parser, _) = parse("let x: = 1;");
    assert_eq!(error_codes(&parser), vec![1110]);
}

// =============================================================================
// Recovery and limits
// =============================================================================

#[test]
fn test_deep_nesting_aborts_with_single_error() {
    let source = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
    let (parser, _) = parse(&source);
    let codes = error_codes(&parser);
    assert_eq!(codes, vec![1001]);
    assert_eq!(
        parser.get_diagnostics()[0].message,
        "Expression nesting is too deep."
    );
}

#[test]
fn test_nesting_within_limit_parses_on_small_stack() {
    let source = format!("let x = {}1{};", "(".repeat(120), ")".repeat(120));
    let type_source = format!("let y: {}number{};", "Array<".repeat(120), ">".repeat(120));
    let handle = std::thread::Builder::new()
        .stack_size(128 * 1024)
        .spawn(move || {
            let (expr_parser, _) = parse(&source);
            let (type_parser, _) = parse(&type_source);
            (error_codes(&expr_parser), error_codes(&type_parser))
        })
        .expect("spawn parser thread");
    let (expr_codes, type_codes) = handle.join().expect("parser thread completes");
    assert!(expr_codes.is_empty(), "unexpected diagnostics: {expr_codes:?}");
    assert!(type_codes.is_empty(), "unexpected diagnostics: {type_codes:?}");
}

#[test]
fn test_deep_array_nesting_does_not_overflow() {
    let source = format!("x = {}{};", "[".repeat(3000), "]".repeat(3000));
    let (parser, _) = parse(&source);
    assert!(!parser.get_diagnostics().is_empty());
}

#[test]
fn test_long_flat_chain_parses() {
    let source = format!("x = {}1;", "1 + ".repeat(2000));
    let (parser, root) = parse(&source);
    assert!(parser.get_diagnostics().is_empty());
    assert_eq!(statements(&parser, root).len(), 1);
}

#[test]
fn test_garbage_input_terminates() {
    let (parser, _) = parse(")))}}}]]] @@@ ### ;;; <<<>>>");
    assert!(!parser.get_diagnostics().is_empty());
}

#[test]
fn test_unterminated_string_is_reported_once() {
    let (parser, _) = parse("let s = \"abc");
    let codes = error_codes(&parser);
    assert_eq!(codes.iter().filter(|c| **c == 1002).count(), 1);
}

#[test]
fn test_diagnostics_are_sorted_by_position() {
    let (parser, _) = parse("let a = ;\nlet b: = 1;\nconst c;");
    let starts: Vec<u32> = parser.get_diagnostics().iter().map(|d| d.start).collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
}

#[test]
fn test_declaration_file_is_ambient() {
    let mut parser = ParserState::new("lib.d.ts".to_string(), "const x: number;\nfunction f(): void;");
    parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty());
}

#[test]
fn test_node_spans_cover_source() {
    let source = "let value = compute(1, 2);";
    let (parser, root) = parse(source);
    let arena = parser.get_arena();
    let stmt = statements(&parser, root)[0];
    assert_eq!(arena.span(stmt).slice(source), source);
}

#[test]
fn test_parse_diagnostic_converts_to_diagnostic() {
    let (parser, _) = parse("let x = ;");
    let diagnostic = parser.get_diagnostics()[0].to_diagnostic("test.ts");
    assert_eq!(diagnostic.code, 1109);
    assert_eq!(diagnostic.file, "test.ts");
    assert_eq!(diagnostic.start, 8);
}

#[test]
fn test_const_assertion_parses_as_type_reference() {
    let (parser, root) = parse("let t = [1, 2] as const;");
    assert!(parser.get_diagnostics().is_empty(), "{:?}", error_codes(&parser));
    let arena = parser.get_arena();
    let Some(NodeData::VariableStatement {
        declaration_list, ..
    }) = arena.data(statements(&parser, root)[0])
    else {
        panic!("expected variable statement");
    };
    let Some(NodeData::VariableDeclarationList { declarations, .. }) = arena.data(*declaration_list) else {
        panic!("expected declaration list");
    };
    let Some(NodeData::VariableDeclaration(decl)) = arena.data(declarations[0]) else {
        panic!("expected declaration");
    };
    match arena.data(decl.initializer) {
        Some(NodeData::AsExpression { type_node, .. }) => match arena.data(*type_node) {
            Some(NodeData::TypeReference { type_name, .. }) => {
                assert_eq!(arena.identifier_text(*type_name), Some("const"));
            }
            other => panic!("expected type reference, got {other:?}"),
        },
        other => panic!("expected as expression, got {other:?}"),
    }
}

// =============================================================================
// JSX
// =============================================================================

fn parse_tsx(source: &str) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new("view.tsx".to_string(), source);
    let root = parser.parse_source_file();
    (parser, root)
}

#[test]
fn test_tsx_element_tree() {
    let (parser, root) = parse_tsx("<div id=\"a\"><br/>don't {x}</div>;");
    assert!(parser.get_diagnostics().is_empty(), "{:?}", error_codes(&parser));
    let arena = parser.get_arena();
    let element = expression_of(arena, statements(&parser, root)[0]);
    let Some(NodeData::JsxElement {
        opening,
        children,
        closing,
    }) = arena.data(element)
    else {
        panic!("expected JSX element, got {:?}", arena.data(element));
    };
    let Some(NodeData::JsxOpeningElement {
        tag_name, attributes, ..
    }) = arena.data(*opening)
    else {
        panic!("expected opening element");
    };
    assert_eq!(arena.jsx_tag_name_text(*tag_name), "div");
    assert_eq!(attributes.len(), 1);
    let kinds: Vec<&str> = children
        .iter()
        .map(|&child| arena.get(child).map_or("none", tsz_parser::parser::Node::kind_name))
        .collect();
    assert_eq!(kinds, ["JsxSelfClosingElement", "JsxText", "JsxExpression"]);
    assert!(closing.is_some());
}

#[test]
fn test_tsx_fragment_and_namespaced_tag() {
    let (parser, root) = parse_tsx("<><svg:rect data-x=\"1\" /></>;");
    assert!(parser.get_diagnostics().is_empty(), "{:?}", error_codes(&parser));
    let arena = parser.get_arena();
    let fragment = expression_of(arena, statements(&parser, root)[0]);
    let Some(NodeData::JsxFragment { children }) = arena.data(fragment) else {
        panic!("expected fragment");
    };
    let Some(NodeData::JsxSelfClosingElement {
        tag_name, attributes, ..
    }) = arena.data(children[0])
    else {
        panic!("expected self-closing element");
    };
    assert_eq!(arena.jsx_tag_name_text(*tag_name), "svg:rect");
    assert!(arena.is_intrinsic_jsx_tag(*tag_name));
    let Some(NodeData::JsxAttribute { name, .. }) = arena.data(attributes[0]) else {
        panic!("expected attribute");
    };
    assert_eq!(arena.identifier_text(*name), Some("data-x"));
}

#[test]
fn test_tsx_mismatched_closing_tag_reports_17002() {
    let (parser, _) = parse_tsx("<a></b>;");
    assert_eq!(error_codes(&parser), vec![17002]);
}

#[test]
fn test_tsx_unclosed_element_reports_17008() {
    let (parser, _) = parse_tsx("<a>text");
    assert_eq!(error_codes(&parser), vec![17008]);
}

#[test]
fn test_tsx_empty_attribute_expression_reports_17000() {
    let (parser, _) = parse_tsx("<a b={} />;");
    assert_eq!(error_codes(&parser), vec![17000]);
}

#[test]
fn test_angle_bracket_assertion_only_outside_jsx() {
    let (parser, root) = parse("<number>x;");
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let expression = expression_of(arena, statements(&parser, root)[0]);
    assert!(matches!(arena.data(expression), Some(NodeData::TypeAssertion { .. })));

    let (parser, _) = parse_tsx("<number>x;");
    assert!(error_codes(&parser).contains(&17008));
}

#[test]
fn test_tsx_generic_arrow_needs_trailing_comma() {
    let (parser, root) = parse_tsx("const f = <T,>(x: T) => x;");
    assert!(parser.get_diagnostics().is_empty(), "{:?}", error_codes(&parser));
    let arena = parser.get_arena();
    let Some(NodeData::VariableStatement {
        declaration_list, ..
    }) = arena.data(statements(&parser, root)[0])
    else {
        panic!("expected variable statement");
    };
    let Some(NodeData::VariableDeclarationList { declarations, .. }) = arena.data(*declaration_list) else {
        panic!("expected declaration list");
    };
    let Some(NodeData::VariableDeclaration(decl)) = arena.data(declarations[0]) else {
        panic!("expected declaration");
    };
    assert!(matches!(arena.data(decl.initializer), Some(NodeData::ArrowFunction(_))));
}

#[test]
fn test_set_jsx_enables_jsx_for_any_file_name() {
    let mut parser = ParserState::new("view.ts".to_string(), "let v = <p>hi</p>;");
    assert!(!parser.is_jsx());
    parser.set_jsx(true);
    parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty(), "{:?}", error_codes(&parser));
}
