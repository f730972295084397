use super::*;

#[test]
fn test_flag_bits_are_stable() {
    assert_eq!(CompileFlags::TRANSPILE_ONLY.bits(), 1);
    assert_eq!(CompileFlags::INLINE_SOURCE_MAP.bits(), 2);
    assert_eq!(CompileFlags::STRICT.bits(), 4);
    assert_eq!(CompileFlags::DECLARATION.bits(), 8);
    assert_eq!(CompileFlags::TSX.bits(), 16);
}

#[test]
fn test_from_bits_rejects_unknown_bits() {
    let options = CompileOptions::from_bits(0b0101).expect("known bits");
    assert!(options.transpile_only());
    assert!(options.checker_options().strict_null_checks);

    let fault = CompileOptions::from_bits(0b10_0001).unwrap_err();
    assert!(matches!(fault, BoundaryFault::UnknownFlags(0b10_0000)));
    assert_eq!(fault.status(), StatusCode::InvalidInput);
}

#[test]
fn test_declaration_files() {
    let options = CompileOptions::default();
    assert!(options.is_declaration("types/index.d.ts"));
    assert!(!options.is_declaration("index.ts"));
    assert!(CompileOptions::new(CompileFlags::DECLARATION).is_declaration("index.ts"));
}

#[test]
fn test_declaration_file_is_checked_but_emits_nothing() {
    let clean = compile("declare const x: number;", "a.d.ts", &CompileOptions::default()).unwrap();
    assert_eq!(clean.status(), StatusCode::Ok);
    assert!(clean.buffer().is_empty());

    let options = CompileOptions::new(CompileFlags::DECLARATION);
    let broken = compile("let y: string = 1;", "a.ts", &options).unwrap();
    assert_eq!(broken.status(), StatusCode::CompileError);
}

#[test]
fn test_tsx_by_flag_or_file_name() {
    let options = CompileOptions::default();
    assert!(options.is_tsx("view.tsx"));
    assert!(!options.is_tsx("view.ts"));
    assert!(CompileOptions::new(CompileFlags::TSX).is_tsx("view.ts"));

    let source = "import React from \"react\";\nexport const v = <p class=\"x\">hi</p>;";
    let plain = compile(source, "view.ts", &CompileOptions::default().with_known_module("react")).unwrap();
    assert_eq!(plain.status(), StatusCode::CompileError);

    let options = CompileOptions::new(CompileFlags::TSX).with_known_module("react");
    let jsx = compile(source, "view.ts", &options).unwrap();
    assert_eq!(jsx.status(), StatusCode::Ok);
    assert_eq!(
        jsx.buffer().as_str(),
        "import React from \"react\";\nexport const v = React.createElement(\"p\", { class: \"x\" }, \"hi\");\n"
    );
}

#[test]
fn test_jsx_component_names_are_checked() {
    let output = compile("let v = <Missing />;", "view.tsx", &CompileOptions::default()).unwrap();
    assert_eq!(output.status(), StatusCode::CompileError);
    assert!(output.buffer().as_str().contains("Cannot find name 'Missing'."));

    let host = compile("let v = <div />;", "view.tsx", &CompileOptions::default()).unwrap();
    assert_eq!(host.status(), StatusCode::Ok);
}

#[test]
fn test_known_modules_resolve_imports() {
    let source = "import { a } from \"pkg\";\nconsole.log(a);";
    let unresolved = compile(source, "a.ts", &CompileOptions::default()).unwrap();
    assert!(unresolved.buffer().as_str().contains("TS2307"));

    let options = CompileOptions::default().with_known_module("pkg");
    let resolved = compile(source, "a.ts", &options).unwrap();
    assert_eq!(
        resolved.buffer().as_str(),
        "import { a } from \"pkg\";\nconsole.log(a);\n"
    );
}

#[test]
fn test_strict_flag_enables_null_checks() {
    let source = "let s: string = null;";
    let loose = compile(source, "a.ts", &CompileOptions::default()).unwrap();
    assert_eq!(loose.status(), StatusCode::Ok);

    let strict = compile(source, "a.ts", &CompileOptions::new(CompileFlags::STRICT)).unwrap();
    assert_eq!(strict.status(), StatusCode::CompileError);
    assert!(
        strict
            .buffer()
            .as_str()
            .contains("Type 'null' is not assignable to type 'string'.")
    );
}

#[test]
fn test_log_format_parsing() {
    use crate::tracing_config::LogFormat;
    assert_eq!(LogFormat::parse("TREE"), LogFormat::Tree);
    assert_eq!(LogFormat::parse("json"), LogFormat::Json);
    assert_eq!(LogFormat::parse(""), LogFormat::Text);
}
