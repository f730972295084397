//! Tests for TS2307 "Cannot find module".

use crate::CheckerOptions;
use crate::test_utils::{codes, diagnostics, diagnostics_with, summarize};

#[test]
fn test_unresolved_import_reports_only_module_error() {
    let diags = diagnostics("import { thing } from \"missing.d.ts\"; let x: thing;");
    assert_eq!(
        summarize(&diags),
        vec![(
            22,
            2307,
            "Cannot find module 'missing.d.ts' or its corresponding type declarations.".to_string()
        )]
    );
}

#[test]
fn test_known_modules_resolve() {
    let options = CheckerOptions {
        known_modules: vec!["react".to_string(), "@app/*".to_string()],
        ..CheckerOptions::default()
    };
    let source = "import React from \"react\";\nimport { util } from \"@app/util\";";
    assert!(diagnostics_with(source, options).is_empty());
}

#[test]
fn test_ambient_module_declarations_resolve() {
    let source = "declare module \"*.css\";\ndeclare module \"lib\" { export const v: number; }\n\
                  import \"./a.css\";\nimport { v } from \"lib\";";
    assert!(codes(source).is_empty());
}

#[test]
fn test_dynamic_import_and_reexport() {
    let diags = diagnostics("const m = import(\"nope\");");
    assert_eq!(summarize(&diags)[0].0, 17);
    assert_eq!(diags[0].code, 2307);
    assert_eq!(codes("export * from \"gone\";"), vec![2307]);
}
