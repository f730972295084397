//! Indentation-aware output buffer with optional source-map recording.
//!
//! The writer tracks the generated line and column (in UTF-16 code units)
//! so that a mapping can be recorded at the exact position where a node's
//! text begins. Indentation is written lazily, on the first write of a line,
//! so blank lines never carry trailing whitespace.

use tsz_common::source_map::{Mapping, SourceMapGenerator};

const INDENT: &str = "    ";

/// A 0-based line and column in the original source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

pub struct SourceWriter {
    output: String,
    indent_level: u32,
    line: u32,
    column: u32,
    at_line_start: bool,
    source_map: Option<SourceMapGenerator>,
}

impl Default for SourceWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceWriter {
    pub fn new() -> Self {
        SourceWriter {
            output: String::new(),
            indent_level: 0,
            line: 0,
            column: 0,
            at_line_start: true,
            source_map: None,
        }
    }

    /// Create a writer that records mappings into `generator`.
    pub fn with_source_map(generator: SourceMapGenerator) -> Self {
        SourceWriter {
            source_map: Some(generator),
            ..Self::new()
        }
    }

    pub fn has_source_map(&self) -> bool {
        self.source_map.is_some()
    }

    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn indent_level(&self) -> u32 {
        self.indent_level
    }

    pub fn is_at_line_start(&self) -> bool {
        self.at_line_start
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn flush_indent(&mut self) {
        if !self.at_line_start {
            return;
        }
        self.at_line_start = false;
        for _ in 0..self.indent_level {
            self.output.push_str(INDENT);
        }
        self.column += self.indent_level * INDENT.len() as u32;
    }

    fn advance(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += ch.len_utf16() as u32;
            }
        }
    }

    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.flush_indent();
        self.output.push_str(text);
        self.advance(text);
    }

    pub fn write_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.write(ch.encode_utf8(&mut buf));
    }

    pub fn write_space(&mut self) {
        self.write(" ");
    }

    pub fn write_usize(&mut self, value: usize) {
        self.write(&value.to_string());
    }

    /// Write `text`, recording a mapping from its first character back to
    /// `source_pos`.
    pub fn write_node(&mut self, text: &str, source_pos: SourcePosition) {
        if text.is_empty() {
            return;
        }
        self.flush_indent();
        if let Some(generator) = self.source_map.as_mut() {
            generator.add_mapping(Mapping {
                generated_line: self.line,
                generated_column: self.column,
                source_line: source_pos.line,
                source_column: source_pos.column,
            });
        }
        self.output.push_str(text);
        self.advance(text);
    }

    /// End the current line. Consecutive calls produce blank lines.
    pub fn write_line(&mut self) {
        self.output.push('\n');
        self.line += 1;
        self.column = 0;
        self.at_line_start = true;
    }

    /// Start a new line unless the writer already sits at the start of one.
    pub fn ensure_line(&mut self) {
        if !self.at_line_start {
            self.write_line();
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn finish(self) -> (String, Option<SourceMapGenerator>) {
        (self.output, self.source_map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_is_written_lazily() {
        let mut writer = SourceWriter::new();
        writer.write("{");
        writer.write_line();
        writer.increase_indent();
        writer.write_line();
        writer.write("a;");
        writer.write_line();
        writer.decrease_indent();
        writer.write("}");
        assert_eq!(writer.output(), "{\n\n    a;\n}");
    }

    #[test]
    fn test_mapping_column_follows_indent() {
        let mut writer = SourceWriter::with_source_map(SourceMapGenerator::new("a.js", "a.ts"));
        writer.increase_indent();
        writer.write_node("x", SourcePosition { line: 3, column: 7 });
        let (_, generator) = writer.finish();
        let generator = generator.expect("source map requested");
        assert_eq!(
            generator.mappings(),
            &[Mapping {
                generated_line: 0,
                generated_column: 4,
                source_line: 3,
                source_column: 7,
            }]
        );
    }

    #[test]
    fn test_multiline_text_advances_line() {
        let mut writer = SourceWriter::with_source_map(SourceMapGenerator::new("a.js", "a.ts"));
        writer.write("`a\nbc`");
        writer.write_node(";", SourcePosition { line: 1, column: 3 });
        let (_, generator) = writer.finish();
        let mapping = generator.expect("source map requested").mappings()[0];
        assert_eq!((mapping.generated_line, mapping.generated_column), (1, 3));
    }
}
