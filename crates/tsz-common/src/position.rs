//! Line/column positions.
//!
//! Diagnostics and source maps use line/column positions, while the AST uses
//! byte offsets. This module provides the conversion.

/// A position in a source file (0-indexed line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column (UTF-16 code units, as tsc and source maps count them)
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

/// Line map for efficient offset -> position conversion.
/// Stores the starting offset of each line.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Starting offset of each line (line_starts[0] is always 0)
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn build(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0u32];

        for i in memchr::memchr2_iter(b'\n', b'\r', bytes) {
            if bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
                // \r\n: the \n creates the line start
                continue;
            }
            line_starts.push((i + 1) as u32);
        }

        LineMap { line_starts }
    }

    /// Convert a byte offset to a Position (line, character).
    pub fn offset_to_position(&self, offset: u32, source: &str) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };

        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let clamped_end = (offset as usize).min(source.len());
        let start = (line_start as usize).min(clamped_end);
        let slice = source.get(start..clamped_end).unwrap_or("");
        let character = slice.chars().map(|ch| ch.len_utf16() as u32).sum();

        Position {
            line: line as u32,
            character,
        }
    }

    /// Get the number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the starting offset of a line.
    pub fn line_start(&self, line: usize) -> Option<u32> {
        self.line_starts.get(line).copied()
    }
}

#[cfg(test)]
mod position_tests {
    use super::*;

    #[test]
    fn test_line_map_simple() {
        let source = "let a = 1;\nlet b = 2;\n";
        let map = LineMap::build(source);
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.offset_to_position(15, source), Position::new(1, 4));
    }

    #[test]
    fn test_line_map_crlf() {
        let source = "a\r\nb\rc";
        let map = LineMap::build(source);
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.line_start(1), Some(3));
        assert_eq!(map.line_start(2), Some(5));
        assert_eq!(map.offset_to_position(5, source), Position::new(2, 0));
    }

    #[test]
    fn test_columns_count_utf16_units() {
        let source = "const s = \"\u{1F600}\"; x";
        let map = LineMap::build(source);
        let offset = source.find('x').unwrap() as u32;
        // The emoji is 4 bytes but 2 UTF-16 units
        assert_eq!(map.offset_to_position(offset, source).character, 16);
    }
}
