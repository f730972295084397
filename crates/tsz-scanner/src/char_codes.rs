//! Character classification used by the scanner.

/// Zero width non-joiner, allowed inside identifiers.
pub const ZWNJ: char = '\u{200C}';
/// Zero width joiner, allowed inside identifiers.
pub const ZWJ: char = '\u{200D}';
pub const LINE_SEPARATOR: char = '\u{2028}';
pub const PARAGRAPH_SEPARATOR: char = '\u{2029}';
pub const BYTE_ORDER_MARK: char = '\u{FEFF}';

#[inline]
pub fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR)
}

/// Whitespace that is not a line break.
#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t' | '\u{000B}' | '\u{000C}' | '\u{00A0}' | '\u{1680}' | '\u{202F}'
            | '\u{205F}' | '\u{3000}' | BYTE_ORDER_MARK
    ) || ('\u{2000}'..='\u{200B}').contains(&ch)
}

#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch == '$' || ch == '_' || ch.is_ascii_alphabetic() || (!ch.is_ascii() && ch.is_alphabetic())
}

#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch)
        || ch.is_ascii_digit()
        || ch == ZWNJ
        || ch == ZWJ
        || (!ch.is_ascii() && ch.is_alphanumeric())
}

#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[inline]
pub fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

#[inline]
pub fn is_octal_digit(ch: char) -> bool {
    ('0'..='7').contains(&ch)
}

#[inline]
pub fn is_binary_digit(ch: char) -> bool {
    ch == '0' || ch == '1'
}

/// Whether `text` is a valid identifier name (used by the emitter to decide
/// between `obj.name` and `obj["name"]`).
pub fn is_identifier_text(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_part),
        _ => false,
    }
}
