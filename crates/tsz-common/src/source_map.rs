//! Source Map v3 generation.
//!
//! The emitter records (generated line/column -> source line/column) pairs as
//! it writes; this module encodes them into the `mappings` VLQ string and the
//! JSON document, optionally as an inline `data:` URL comment.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

/// Base64 VLQ encoding used by the `mappings` field.
pub mod vlq {
    const BASE64_CHARS: &[u8; 64] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    const VLQ_BASE_SHIFT: u32 = 5;
    const VLQ_BASE: i64 = 1 << VLQ_BASE_SHIFT;
    const VLQ_BASE_MASK: i64 = VLQ_BASE - 1;
    const VLQ_CONTINUATION_BIT: i64 = VLQ_BASE;

    pub fn encode(value: i64) -> String {
        let mut out = String::new();
        encode_into(value, &mut out);
        out
    }

    pub fn encode_into(value: i64, out: &mut String) {
        // Sign goes in the least significant bit
        let mut vlq = if value < 0 {
            ((-value) << 1) | 1
        } else {
            value << 1
        };
        loop {
            let mut digit = vlq & VLQ_BASE_MASK;
            vlq >>= VLQ_BASE_SHIFT;
            if vlq > 0 {
                digit |= VLQ_CONTINUATION_BIT;
            }
            out.push(BASE64_CHARS[digit as usize] as char);
            if vlq == 0 {
                break;
            }
        }
    }

    /// Decode one value, returning it with the number of characters consumed.
    pub fn decode(input: &str) -> Option<(i64, usize)> {
        let mut result: i64 = 0;
        let mut shift = 0u32;
        for (consumed, byte) in input.bytes().enumerate() {
            let digit = BASE64_CHARS.iter().position(|&c| c == byte)? as i64;
            result += (digit & VLQ_BASE_MASK) << shift;
            if digit & VLQ_CONTINUATION_BIT == 0 {
                let value = if result & 1 == 1 {
                    -(result >> 1)
                } else {
                    result >> 1
                };
                return Some((value, consumed + 1));
            }
            shift += VLQ_BASE_SHIFT;
            if shift > 60 {
                return None;
            }
        }
        None
    }
}

/// One generated -> original position pair (0-based lines and columns).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mapping {
    pub generated_line: u32,
    pub generated_column: u32,
    pub source_line: u32,
    pub source_column: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RawSourceMap<'a> {
    version: u32,
    file: &'a str,
    sources: [&'a str; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    sources_content: Option<[&'a str; 1]>,
    names: [&'a str; 0],
    mappings: String,
}

/// Builds a single-source source map.
#[derive(Debug, Clone)]
pub struct SourceMapGenerator {
    file: String,
    source: String,
    source_content: Option<String>,
    mappings: Vec<Mapping>,
}

impl SourceMapGenerator {
    pub fn new(file: impl Into<String>, source: impl Into<String>) -> Self {
        SourceMapGenerator {
            file: file.into(),
            source: source.into(),
            source_content: None,
            mappings: Vec::new(),
        }
    }

    /// Embed the original text in `sourcesContent`.
    pub fn set_source_content(&mut self, content: impl Into<String>) {
        self.source_content = Some(content.into());
    }

    pub fn add_mapping(&mut self, mapping: Mapping) {
        // Consecutive writes at the same generated position keep the first
        if let Some(last) = self.mappings.last()
            && last.generated_line == mapping.generated_line
            && last.generated_column == mapping.generated_column
        {
            return;
        }
        self.mappings.push(mapping);
    }

    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    /// Encode the `mappings` string. Mappings must be added in generated order.
    pub fn encode_mappings(&self) -> String {
        let mut out = String::new();
        let mut current_line = 0u32;
        let mut prev_generated_column = 0i64;
        let mut prev_source_line = 0i64;
        let mut prev_source_column = 0i64;
        let mut first_in_line = true;

        for mapping in &self.mappings {
            while current_line < mapping.generated_line {
                out.push(';');
                current_line += 1;
                prev_generated_column = 0;
                first_in_line = true;
            }
            if !first_in_line {
                out.push(',');
            }
            first_in_line = false;

            vlq::encode_into(
                i64::from(mapping.generated_column) - prev_generated_column,
                &mut out,
            );
            // Single source: index delta is always 0 after the first segment
            vlq::encode_into(0, &mut out);
            vlq::encode_into(i64::from(mapping.source_line) - prev_source_line, &mut out);
            vlq::encode_into(
                i64::from(mapping.source_column) - prev_source_column,
                &mut out,
            );

            prev_generated_column = i64::from(mapping.generated_column);
            prev_source_line = i64::from(mapping.source_line);
            prev_source_column = i64::from(mapping.source_column);
        }
        out
    }

    pub fn to_json(&self) -> String {
        let raw = RawSourceMap {
            version: 3,
            file: &self.file,
            sources: [&self.source],
            sources_content: self.source_content.as_deref().map(|content| [content]),
            names: [],
            mappings: self.encode_mappings(),
        };
        // Serializing plain strings and integers cannot fail
        serde_json::to_string(&raw).unwrap_or_default()
    }

    /// `//# sourceMappingURL=data:application/json;base64,...`
    pub fn to_inline_comment(&self) -> String {
        format!(
            "//# sourceMappingURL=data:application/json;base64,{}",
            STANDARD.encode(self.to_json())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vlq_encode() {
        assert_eq!(vlq::encode(0), "A");
        assert_eq!(vlq::encode(1), "C");
        assert_eq!(vlq::encode(-1), "D");
        assert_eq!(vlq::encode(15), "e");
        assert_eq!(vlq::encode(16), "gB");
    }

    #[test]
    fn test_vlq_decode_matches_encode() {
        for value in [-100, -1, 0, 1, 100, 1000] {
            let encoded = vlq::encode(value);
            let (decoded, consumed) = vlq::decode(&encoded).unwrap();
            assert_eq!(decoded, value, "Failed for value {value}");
            assert_eq!(consumed, encoded.len());
        }
    }

    #[test]
    fn test_mappings_separate_lines() {
        let mut generator = SourceMapGenerator::new("a.js", "a.ts");
        generator.add_mapping(Mapping {
            generated_line: 0,
            generated_column: 0,
            source_line: 0,
            source_column: 0,
        });
        generator.add_mapping(Mapping {
            generated_line: 2,
            generated_column: 4,
            source_line: 3,
            source_column: 4,
        });
        assert_eq!(generator.encode_mappings(), "AAAA;;IAGI");
    }

    #[test]
    fn test_inline_comment_round_trips_json() {
        let mut generator = SourceMapGenerator::new("a.js", "a.ts");
        generator.set_source_content("let x = 1;");
        let comment = generator.to_inline_comment();
        let payload = comment
            .strip_prefix("//# sourceMappingURL=data:application/json;base64,")
            .unwrap();
        let json = String::from_utf8(STANDARD.decode(payload).unwrap()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], 3);
        assert_eq!(value["sources"][0], "a.ts");
        assert_eq!(value["sourcesContent"][0], "let x = 1;");
    }
}
