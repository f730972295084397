//! Scanner state machine.
//!
//! Produces one token per `scan()` call and always skips trivia; whether a line
//! break preceded the token is recorded in `TokenFlags` for ASI. Tokens whose
//! meaning depends on parser context (`/` vs a regex, `>` vs `>>`, `}` vs a
//! template continuation) are scanned in their simplest form and re-scanned on
//! request. JSX children, tag names and attribute strings have their own
//! scanning entry points, driven by the parser.

use std::sync::Arc;

use bitflags::bitflags;
use tsz_common::diagnostics::{diagnostic_codes, diagnostic_messages};

use crate::SyntaxKind;
use crate::char_codes::*;
use crate::text_to_keyword;

bitflags! {
    /// Per-token facts the parser needs beyond the kind.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TokenFlags: u32 {
        const PRECEDING_LINE_BREAK = 1 << 0;
        const UNTERMINATED = 1 << 1;
        const HEX_SPECIFIER = 1 << 2;
        const BINARY_SPECIFIER = 1 << 3;
        const OCTAL_SPECIFIER = 1 << 4;
        const SCIENTIFIC = 1 << 5;
        const CONTAINS_SEPARATOR = 1 << 6;
    }
}

/// A lexical error with its byte range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: usize,
    pub length: usize,
    pub message: &'static str,
    pub code: u32,
}

/// Saved scanner position for speculative parsing.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: TokenFlags,
    diagnostics_len: usize,
}

pub struct ScannerState {
    text: Arc<str>,
    pos: usize,
    end: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: TokenFlags,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        let text: Arc<str> = text.into();
        let end = text.len();
        ScannerState {
            text,
            pos: 0,
            end,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: TokenFlags::empty(),
            diagnostics: Vec::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn source_text(&self) -> &str {
        &self.text
    }

    pub fn source_text_arc(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    pub fn get_token(&self) -> SyntaxKind {
        self.token
    }

    /// Cooked value: identifier name, unescaped string contents, or numeric
    /// text without separators.
    pub fn get_token_value(&self) -> &str {
        &self.token_value
    }

    /// Start of the token, excluding leading trivia.
    pub fn get_token_start(&self) -> usize {
        self.token_start
    }

    /// Start of the token, including leading trivia.
    pub fn get_token_full_start(&self) -> usize {
        self.full_start
    }

    pub fn get_token_end(&self) -> usize {
        self.pos
    }

    /// Raw source text of the current token.
    pub fn get_token_text(&self) -> &str {
        &self.text[self.token_start..self.pos]
    }

    pub fn get_token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    pub fn is_unterminated(&self) -> bool {
        self.token_flags.contains(TokenFlags::UNTERMINATED)
    }

    pub fn get_scanner_diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<ScannerDiagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    // =========================================================================
    // Speculation
    // =========================================================================

    pub fn snapshot(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
            diagnostics_len: self.diagnostics.len(),
        }
    }

    pub fn restore(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.full_start = snapshot.full_start;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_value = snapshot.token_value;
        self.token_flags = snapshot.token_flags;
        self.diagnostics.truncate(snapshot.diagnostics_len);
    }

    // =========================================================================
    // Character helpers
    // =========================================================================

    #[inline]
    fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    #[inline]
    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.text.get(self.pos + offset..)?.chars().next()
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.text.as_bytes().get(pos).copied()
    }

    fn error(&mut self, pos: usize, length: usize, message: &'static str, code: u32) {
        self.diagnostics.push(ScannerDiagnostic {
            pos,
            length,
            message,
            code,
        });
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Skip a `#!` line at the very start of the file.
    pub fn scan_shebang_trivia(&mut self) {
        if self.pos == 0 && self.text.starts_with("#!") {
            self.pos = memchr::memchr2(b'\n', b'\r', self.text.as_bytes()).unwrap_or(self.end);
        }
    }

    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_flags = TokenFlags::empty();
        self.token_value.clear();

        loop {
            self.token_start = self.pos;
            let Some(ch) = self.peek_char() else {
                self.token = SyntaxKind::EndOfFileToken;
                return self.token;
            };

            match ch {
                '\n' | '\r' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR => {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += ch.len_utf8();
                    continue;
                }
                c if is_white_space_single_line(c) => {
                    self.pos += c.len_utf8();
                    continue;
                }
                '/' if self.byte_at(self.pos + 1) == Some(b'/') => {
                    self.skip_single_line_comment();
                    continue;
                }
                '/' if self.byte_at(self.pos + 1) == Some(b'*') => {
                    self.skip_multi_line_comment();
                    continue;
                }
                _ => {}
            }

            self.token = self.scan_token(ch);
            return self.token;
        }
    }

    fn skip_single_line_comment(&mut self) {
        let rest = &self.text.as_bytes()[self.pos..];
        self.pos += memchr::memchr2(b'\n', b'\r', rest).unwrap_or(rest.len());
    }

    fn skip_multi_line_comment(&mut self) {
        let start = self.pos;
        self.pos += 2;
        let rest = &self.text[self.pos..];
        match rest.find("*/") {
            Some(close) => {
                if rest[..close].chars().any(is_line_break) {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                }
                self.pos += close + 2;
            }
            None => {
                self.pos = self.end;
                self.error(
                    start,
                    self.end - start,
                    diagnostic_messages::ASTERISK_SLASH_EXPECTED,
                    diagnostic_codes::ASTERISK_SLASH_EXPECTED,
                );
            }
        }
    }

    fn scan_token(&mut self, ch: char) -> SyntaxKind {
        use SyntaxKind::*;

        let next = self.peek_char_at(1);
        let next2 = self.peek_char_at(2);

        // (kind, byte length) for fixed-text tokens
        let (kind, len) = match ch {
            '{' => (OpenBraceToken, 1),
            '}' => (CloseBraceToken, 1),
            '(' => (OpenParenToken, 1),
            ')' => (CloseParenToken, 1),
            '[' => (OpenBracketToken, 1),
            ']' => (CloseBracketToken, 1),
            ';' => (SemicolonToken, 1),
            ',' => (CommaToken, 1),
            ':' => (ColonToken, 1),
            '~' => (TildeToken, 1),
            '@' => (AtToken, 1),
            '.' => {
                if next.is_some_and(is_digit) {
                    return self.scan_number();
                }
                if next == Some('.') && next2 == Some('.') {
                    (DotDotDotToken, 3)
                } else {
                    (DotToken, 1)
                }
            }
            '?' => match next {
                // `a?.5:b` is a conditional, not optional chaining
                Some('.') if !next2.is_some_and(is_digit) => (QuestionDotToken, 2),
                Some('?') if next2 == Some('=') => (QuestionQuestionEqualsToken, 3),
                Some('?') => (QuestionQuestionToken, 2),
                _ => (QuestionToken, 1),
            },
            '<' => match (next, next2) {
                (Some('<'), Some('=')) => (LessThanLessThanEqualsToken, 3),
                (Some('<'), _) => (LessThanLessThanToken, 2),
                (Some('='), _) => (LessThanEqualsToken, 2),
                _ => (LessThanToken, 1),
            },
            // `>` is always scanned alone; see `re_scan_greater_token`
            '>' => (GreaterThanToken, 1),
            '=' => match (next, next2) {
                (Some('='), Some('=')) => (EqualsEqualsEqualsToken, 3),
                (Some('='), _) => (EqualsEqualsToken, 2),
                (Some('>'), _) => (EqualsGreaterThanToken, 2),
                _ => (EqualsToken, 1),
            },
            '!' => match (next, next2) {
                (Some('='), Some('=')) => (ExclamationEqualsEqualsToken, 3),
                (Some('='), _) => (ExclamationEqualsToken, 2),
                _ => (ExclamationToken, 1),
            },
            '+' => match next {
                Some('+') => (PlusPlusToken, 2),
                Some('=') => (PlusEqualsToken, 2),
                _ => (PlusToken, 1),
            },
            '-' => match next {
                Some('-') => (MinusMinusToken, 2),
                Some('=') => (MinusEqualsToken, 2),
                _ => (MinusToken, 1),
            },
            '*' => match (next, next2) {
                (Some('*'), Some('=')) => (AsteriskAsteriskEqualsToken, 3),
                (Some('*'), _) => (AsteriskAsteriskToken, 2),
                (Some('='), _) => (AsteriskEqualsToken, 2),
                _ => (AsteriskToken, 1),
            },
            '/' => match next {
                Some('=') => (SlashEqualsToken, 2),
                _ => (SlashToken, 1),
            },
            '%' => match next {
                Some('=') => (PercentEqualsToken, 2),
                _ => (PercentToken, 1),
            },
            '&' => match (next, next2) {
                (Some('&'), Some('=')) => (AmpersandAmpersandEqualsToken, 3),
                (Some('&'), _) => (AmpersandAmpersandToken, 2),
                (Some('='), _) => (AmpersandEqualsToken, 2),
                _ => (AmpersandToken, 1),
            },
            '|' => match (next, next2) {
                (Some('|'), Some('=')) => (BarBarEqualsToken, 3),
                (Some('|'), _) => (BarBarToken, 2),
                (Some('='), _) => (BarEqualsToken, 2),
                _ => (BarToken, 1),
            },
            '^' => match next {
                Some('=') => (CaretEqualsToken, 2),
                _ => (CaretToken, 1),
            },
            '"' | '\'' => return self.scan_string(ch),
            '`' => return self.scan_template(true),
            '#' if next.is_some_and(is_identifier_start) => {
                self.pos += 1;
                self.scan_identifier_rest();
                self.token_value = self.text[self.token_start..self.pos].to_string();
                return PrivateIdentifier;
            }
            c if is_digit(c) => return self.scan_number(),
            c if is_identifier_start(c) => {
                self.scan_identifier_rest();
                let text = &self.text[self.token_start..self.pos];
                self.token_value = text.to_string();
                return text_to_keyword(text).unwrap_or(Identifier);
            }
            c => {
                self.pos += c.len_utf8();
                self.error(
                    self.token_start,
                    c.len_utf8(),
                    diagnostic_messages::INVALID_CHARACTER,
                    diagnostic_codes::INVALID_CHARACTER,
                );
                return Unknown;
            }
        };

        self.pos += len;
        kind
    }

    fn scan_identifier_rest(&mut self) {
        // First char is already validated by the caller
        if let Some(first) = self.peek_char() {
            self.pos += first.len_utf8();
        }
        while let Some(c) = self.peek_char() {
            if !is_identifier_part(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn scan_digits(&mut self, is_valid: fn(char) -> bool) -> bool {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if is_valid(c) {
                self.pos += 1;
            } else if c == '_' && self.peek_char_at(1).is_some_and(is_valid) && self.pos > start {
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
                self.pos += 1;
            } else {
                break;
            }
        }
        self.pos > start
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let first = self.byte_at(self.pos);
        let second = self.byte_at(self.pos + 1).map(|b| b.to_ascii_lowercase());

        if first == Some(b'0') && matches!(second, Some(b'x' | b'b' | b'o')) {
            self.pos += 2;
            let (flag, valid, message, code): (TokenFlags, fn(char) -> bool, _, _) = match second
            {
                Some(b'x') => (
                    TokenFlags::HEX_SPECIFIER,
                    is_hex_digit,
                    diagnostic_messages::HEXADECIMAL_DIGIT_EXPECTED,
                    diagnostic_codes::HEXADECIMAL_DIGIT_EXPECTED,
                ),
                Some(b'b') => (
                    TokenFlags::BINARY_SPECIFIER,
                    is_binary_digit,
                    diagnostic_messages::DIGIT_EXPECTED,
                    diagnostic_codes::DIGIT_EXPECTED,
                ),
                _ => (
                    TokenFlags::OCTAL_SPECIFIER,
                    is_octal_digit,
                    diagnostic_messages::DIGIT_EXPECTED,
                    diagnostic_codes::DIGIT_EXPECTED,
                ),
            };
            self.token_flags |= flag;
            if !self.scan_digits(valid) {
                self.error(self.pos, 0, message, code);
            }
        } else {
            self.scan_digits(is_digit);
            if self.byte_at(self.pos) == Some(b'.') {
                self.pos += 1;
                self.scan_digits(is_digit);
            }
            if matches!(self.byte_at(self.pos), Some(b'e' | b'E')) {
                let exponent_start = self.pos;
                self.pos += 1;
                if matches!(self.byte_at(self.pos), Some(b'+' | b'-')) {
                    self.pos += 1;
                }
                self.token_flags |= TokenFlags::SCIENTIFIC;
                if !self.scan_digits(is_digit) {
                    self.error(
                        exponent_start,
                        self.pos - exponent_start,
                        diagnostic_messages::DIGIT_EXPECTED,
                        diagnostic_codes::DIGIT_EXPECTED,
                    );
                }
            }
        }

        let kind = if self.byte_at(self.pos) == Some(b'n') {
            self.pos += 1;
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };

        self.token_value = self.text[start..self.pos].replace('_', "");

        // `3in x` is invalid: an identifier may not follow a numeric literal
        if let Some(c) = self.peek_char()
            && is_identifier_start(c)
        {
            let ident_start = self.pos;
            self.scan_identifier_rest();
            self.error(
                ident_start,
                self.pos - ident_start,
                diagnostic_messages::INVALID_CHARACTER,
                diagnostic_codes::INVALID_CHARACTER,
            );
        }
        kind
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(c) = self.peek_char() else {
                self.unterminated_string();
                break;
            };
            if c == quote {
                self.pos += 1;
                break;
            }
            if c == '\\' {
                self.scan_escape_sequence(&mut value);
                continue;
            }
            if c == '\n' || c == '\r' {
                self.unterminated_string();
                break;
            }
            value.push(c);
            self.pos += c.len_utf8();
        }
        self.token_value = value;
        SyntaxKind::StringLiteral
    }

    fn unterminated_string(&mut self) {
        self.token_flags |= TokenFlags::UNTERMINATED;
        self.error(
            self.token_start,
            self.pos - self.token_start,
            diagnostic_messages::UNTERMINATED_STRING_LITERAL,
            diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        );
    }

    /// Scan `\...` at `pos` and push the cooked character(s) into `out`.
    fn scan_escape_sequence(&mut self, out: &mut String) {
        let escape_start = self.pos;
        self.pos += 1;
        let Some(c) = self.peek_char() else {
            return;
        };
        self.pos += c.len_utf8();
        match c {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'v' => out.push('\u{000B}'),
            '0' if !self.peek_char().is_some_and(is_digit) => out.push('\0'),
            'x' => {
                let cooked = self
                    .read_hex_digits(2, 2)
                    .and_then(char::from_u32);
                match cooked {
                    Some(ch) => out.push(ch),
                    None => self.hex_digit_expected(escape_start),
                }
            }
            'u' => {
                let code_point = if self.byte_at(self.pos) == Some(b'{') {
                    self.pos += 1;
                    let value = self.read_hex_digits(1, 6);
                    if self.byte_at(self.pos) == Some(b'}') {
                        self.pos += 1;
                        value
                    } else {
                        None
                    }
                } else {
                    self.read_hex_digits(4, 4)
                };
                match code_point {
                    // Lone surrogates cannot be represented in a Rust string
                    Some(cp) => out.push(char::from_u32(cp).unwrap_or('\u{FFFD}')),
                    None => self.hex_digit_expected(escape_start),
                }
            }
            '\r' => {
                // Line continuation
                if self.byte_at(self.pos) == Some(b'\n') {
                    self.pos += 1;
                }
            }
            '\n' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR => {}
            other => out.push(other),
        }
    }

    fn hex_digit_expected(&mut self, escape_start: usize) {
        self.error(
            escape_start,
            self.pos - escape_start,
            diagnostic_messages::HEXADECIMAL_DIGIT_EXPECTED,
            diagnostic_codes::HEXADECIMAL_DIGIT_EXPECTED,
        );
    }

    fn read_hex_digits(&mut self, min: usize, max: usize) -> Option<u32> {
        let start = self.pos;
        let mut value: u32 = 0;
        while self.pos - start < max {
            let Some(digit) = self.peek_char().and_then(|c| c.to_digit(16)) else {
                break;
            };
            value = value * 16 + digit;
            self.pos += 1;
        }
        if self.pos - start < min {
            return None;
        }
        Some(value)
    }

    /// Scan a template chunk starting at `pos` (a backtick when `is_start`,
    /// otherwise the `}` closing a substitution).
    fn scan_template(&mut self, is_start: bool) -> SyntaxKind {
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(c) = self.peek_char() else {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(
                    self.token_start,
                    self.pos - self.token_start,
                    diagnostic_messages::UNTERMINATED_TEMPLATE_LITERAL,
                    diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL,
                );
                self.token_value = value;
                return if is_start {
                    SyntaxKind::NoSubstitutionTemplateLiteral
                } else {
                    SyntaxKind::TemplateTail
                };
            };
            match c {
                '`' => {
                    self.pos += 1;
                    self.token_value = value;
                    return if is_start {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    };
                }
                '$' if self.byte_at(self.pos + 1) == Some(b'{') => {
                    self.pos += 2;
                    self.token_value = value;
                    return if is_start {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    };
                }
                '\\' => self.scan_escape_sequence(&mut value),
                _ => {
                    value.push(c);
                    self.pos += c.len_utf8();
                }
            }
        }
    }

    // =========================================================================
    // Re-scanning
    // =========================================================================

    /// Re-scan the current `}` as the continuation of a template literal.
    pub fn re_scan_template_token(&mut self) -> SyntaxKind {
        self.pos = self.token_start;
        self.token_value.clear();
        self.token = self.scan_template(false);
        self.token
    }

    /// Re-scan the current `/` or `/=` as a regular expression literal.
    pub fn re_scan_slash_token(&mut self) -> SyntaxKind {
        if !matches!(self.token, SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken) {
            return self.token;
        }
        self.pos = self.token_start + 1;
        let mut in_class = false;
        loop {
            let Some(c) = self.peek_char() else {
                self.unterminated_regex();
                return self.token;
            };
            if is_line_break(c) {
                self.unterminated_regex();
                return self.token;
            }
            self.pos += c.len_utf8();
            match c {
                '\\' => {
                    if let Some(escaped) = self.peek_char()
                        && !is_line_break(escaped)
                    {
                        self.pos += escaped.len_utf8();
                    }
                }
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => break,
                _ => {}
            }
        }
        while let Some(c) = self.peek_char() {
            if !is_identifier_part(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        self.token_value = self.text[self.token_start..self.pos].to_string();
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }

    fn unterminated_regex(&mut self) {
        self.token_flags |= TokenFlags::UNTERMINATED;
        self.error(
            self.token_start,
            self.pos - self.token_start,
            diagnostic_messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
            diagnostic_codes::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
        );
        self.token_value = self.text[self.token_start..self.pos].to_string();
        self.token = SyntaxKind::RegularExpressionLiteral;
    }

    // =========================================================================
    // JSX
    // =========================================================================

    /// Scan the next token of JSX element content: `<`, `</`, `{`, or a run
    /// of `JsxText` up to the next of those. Whitespace is part of the text.
    pub fn scan_jsx_token(&mut self) -> SyntaxKind {
        use SyntaxKind::*;
        self.full_start = self.pos;
        self.token_start = self.pos;
        self.token_flags = TokenFlags::empty();
        self.token_value.clear();
        let rest = &self.text.as_bytes()[self.pos..];
        self.token = match rest.first() {
            None => EndOfFileToken,
            Some(b'<') if rest.get(1) == Some(&b'/') => {
                self.pos += 2;
                LessThanSlashToken
            }
            Some(b'<') => {
                self.pos += 1;
                LessThanToken
            }
            Some(b'{') => {
                self.pos += 1;
                OpenBraceToken
            }
            Some(_) => {
                let len = memchr::memchr2(b'<', b'{', rest).unwrap_or(rest.len());
                self.pos += len;
                self.token_value = self.text[self.token_start..self.pos].to_string();
                JsxText
            }
        };
        self.token
    }

    /// Extend the current identifier or keyword with `-`-separated parts
    /// (`data-id`, `aria-label`).
    pub fn scan_jsx_identifier(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::Identifier && !crate::token_is_keyword(self.token) {
            return self.token;
        }
        while let Some(c) = self.peek_char() {
            if c == '-' || is_identifier_part(c) {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        self.token_value = self.text[self.token_start..self.pos].to_string();
        self.token = SyntaxKind::Identifier;
        self.token
    }

    /// Re-scan the current string literal as a JSX attribute value: no
    /// escape sequences, and line breaks are allowed.
    pub fn re_scan_jsx_attribute_value(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::StringLiteral {
            return self.token;
        }
        let Some(quote) = self.text[self.token_start..].chars().next() else {
            return self.token;
        };
        self.pos = self.token_start + 1;
        self.token_flags.remove(TokenFlags::UNTERMINATED);
        // Escape and line-break errors from the ordinary string scan
        while self
            .diagnostics
            .last()
            .is_some_and(|d| d.pos >= self.token_start)
        {
            self.diagnostics.pop();
        }
        let rest = &self.text[self.pos..];
        match rest.find(quote) {
            Some(close) => {
                self.token_value = rest[..close].to_string();
                self.pos += close + 1;
            }
            None => {
                self.token_value = rest.to_string();
                self.pos = self.end;
                self.unterminated_string();
            }
        }
        self.token
    }

    /// Combine the current `>` with following characters into `>=`, `>>`,
    /// `>>>`, `>>=` or `>>>=`. Only valid in expression context; in type
    /// argument lists each `>` closes one list.
    pub fn re_scan_greater_token(&mut self) -> SyntaxKind {
        use SyntaxKind::*;
        if self.token != GreaterThanToken {
            return self.token;
        }
        let rest = &self.text.as_bytes()[self.token_start..];
        let (kind, len) = if rest.starts_with(b">>>=") {
            (GreaterThanGreaterThanGreaterThanEqualsToken, 4)
        } else if rest.starts_with(b">>>") {
            (GreaterThanGreaterThanGreaterThanToken, 3)
        } else if rest.starts_with(b">>=") {
            (GreaterThanGreaterThanEqualsToken, 3)
        } else if rest.starts_with(b">>") {
            (GreaterThanGreaterThanToken, 2)
        } else if rest.starts_with(b">=") {
            (GreaterThanEqualsToken, 2)
        } else {
            (GreaterThanToken, 1)
        };
        self.pos = self.token_start + len;
        self.token = kind;
        kind
    }
}
