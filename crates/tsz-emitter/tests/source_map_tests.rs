use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tsz_emitter::{PrintOptions, PrintOutput, print_source_file};
use tsz_parser::ParserState;

const INLINE_PREFIX: &str = "//# sourceMappingURL=data:application/json;base64,";

fn emit_with_map(source: &str, file_name: &str) -> PrintOutput {
    let mut parser = ParserState::new(file_name.to_string(), source);
    let root = parser.parse_source_file();
    print_source_file(
        parser.get_arena(),
        root,
        source,
        file_name,
        PrintOptions {
            inline_source_map: true,
        },
    )
}

fn inline_map(code: &str) -> serde_json::Value {
    let start = code.find(INLINE_PREFIX).expect("inline source map comment");
    let payload = code[start + INLINE_PREFIX.len()..].trim_end();
    let json = String::from_utf8(STANDARD.decode(payload).expect("valid base64")).expect("utf-8 JSON");
    serde_json::from_str(&json).expect("valid source map JSON")
}

#[test]
fn test_inline_map_is_appended_after_code() {
    let output = emit_with_map("let x: number = 1;", "src/a.ts");
    assert!(
        output.code.starts_with("let x = 1;\n//# sourceMappingURL=data:application/json;base64,"),
        "Unexpected output: {}",
        output.code
    );
    let map = inline_map(&output.code);
    assert_eq!(map["version"], 3);
    assert_eq!(map["file"], "a.js");
    assert_eq!(map["sources"][0], "a.ts");
    assert_eq!(map["sourcesContent"][0], "let x: number = 1;");
}

#[test]
fn test_inline_map_matches_returned_json() {
    let output = emit_with_map("const s = \"hi\";", "b.ts");
    let returned: serde_json::Value =
        serde_json::from_str(output.source_map.as_deref().expect("map requested")).expect("valid JSON");
    assert_eq!(inline_map(&output.code), returned);
}

#[test]
fn test_mappings_point_at_original_columns() {
    // `let` at 0:0, `x` at 0:4, `1` moves from column 16 to column 8
    let output = emit_with_map("let x: number = 1;", "a.ts");
    let map = inline_map(&output.code);
    assert_eq!(map["mappings"], "AAAA,IAAI,IAAY");
}

#[test]
fn test_mappings_follow_lines() {
    let output = emit_with_map("let a = 1;\ninterface I {}\nlet b = 2;", "a.ts");
    let map = inline_map(&output.code);
    let mappings = map["mappings"].as_str().expect("mappings string");
    let lines: Vec<&str> = mappings.split(';').collect();
    assert_eq!(lines.len(), 2, "Two generated lines expected: {mappings}");
    // Back to column 0 of source line 2, after ending at column 8 of line 0
    assert!(lines[1].starts_with("AAER"), "Unexpected mappings: {mappings}");
}

#[test]
fn test_empty_output_has_no_comment() {
    let output = emit_with_map("type T = string;", "a.ts");
    assert_eq!(output.code, "");
    assert!(output.source_map.is_some());
}

#[test]
fn test_no_map_without_option() {
    let source = "let x = 1;";
    let mut parser = ParserState::new("a.ts".to_string(), source);
    let root = parser.parse_source_file();
    let output = print_source_file(parser.get_arena(), root, source, "a.ts", PrintOptions::default());
    assert_eq!(output.code, "let x = 1;\n");
    assert!(output.source_map.is_none());
}
