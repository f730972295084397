use tsz_emitter::{PrintOptions, print_source_file};
use tsz_parser::ParserState;

fn emit_tsx(source: &str) -> String {
    let mut parser = ParserState::new("view.tsx".to_string(), source);
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    print_source_file(parser.get_arena(), root, source, "view.tsx", PrintOptions::default()).code
}

#[test]
fn test_host_element_becomes_string_tag() {
    assert_eq!(
        emit_tsx("const a = <div className=\"x\">Hello</div>;"),
        "const a = React.createElement(\"div\", { className: \"x\" }, \"Hello\");\n"
    );
}

#[test]
fn test_self_closing_component_with_spread_and_bare_attribute() {
    assert_eq!(
        emit_tsx("const b = <Button {...props} disabled data-id=\"1\" />;"),
        "const b = React.createElement(Button, { ...props, disabled: true, \"data-id\": \"1\" });\n"
    );
}

#[test]
fn test_fragment_drops_formatting_whitespace_and_empty_expressions() {
    let source = r#"const c = (
    <>
        <h1>Title</h1>
        {items.map(item => <li key={item}>{item}</li>)}
        {/* note */}
    </>
);"#;
    assert_eq!(
        emit_tsx(source),
        "const c = (React.createElement(React.Fragment, null, React.createElement(\"h1\", null, \"Title\"), items.map(item => React.createElement(\"li\", { key: item }, item))));\n"
    );
}

#[test]
fn test_member_tag_and_entities() {
    assert_eq!(
        emit_tsx("let d = <Foo.Bar title=\"a &amp; b\">x &lt; y</Foo.Bar>;"),
        "let d = React.createElement(Foo.Bar, { title: \"a & b\" }, \"x < y\");\n"
    );
}

#[test]
fn test_namespaced_attribute_and_spread_child() {
    assert_eq!(
        emit_tsx("let e = <svg xlink:href=\"#a\">{...icons}</svg>;"),
        "let e = React.createElement(\"svg\", { \"xlink:href\": \"#a\" }, ...icons);\n"
    );
}

#[test]
fn test_jsx_keeps_react_import_and_component_imports() {
    let source = r#"import React from "react";
import { Button } from "./button";
import type { Props } from "./props";
export const view = (p: Props) => <Button label="ok" />;"#;
    assert_eq!(
        emit_tsx(source),
        "import React from \"react\";\nimport { Button } from \"./button\";\nexport const view = (p) => React.createElement(Button, { label: \"ok\" });\n"
    );
}
