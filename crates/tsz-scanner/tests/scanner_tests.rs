//! Tests for the scanner.

use tsz_scanner::*;

fn kinds(source: &str) -> Vec<SyntaxKind> {
    let mut scanner = ScannerState::new(source.to_string());
    let mut out = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            return out;
        }
        out.push(kind);
    }
}

#[test]
fn test_scan_empty() {
    let mut scanner = ScannerState::new(String::new());
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_scan_punctuation() {
    assert_eq!(
        kinds("{}()[];,"),
        vec![
            SyntaxKind::OpenBraceToken,
            SyntaxKind::CloseBraceToken,
            SyntaxKind::OpenParenToken,
            SyntaxKind::CloseParenToken,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::CloseBracketToken,
            SyntaxKind::SemicolonToken,
            SyntaxKind::CommaToken,
        ]
    );
}

#[test]
fn test_scan_compound_operators() {
    assert_eq!(
        kinds("=== !== == != => && || ?? ??= ?. ..."),
        vec![
            SyntaxKind::EqualsEqualsEqualsToken,
            SyntaxKind::ExclamationEqualsEqualsToken,
            SyntaxKind::EqualsEqualsToken,
            SyntaxKind::ExclamationEqualsToken,
            SyntaxKind::EqualsGreaterThanToken,
            SyntaxKind::AmpersandAmpersandToken,
            SyntaxKind::BarBarToken,
            SyntaxKind::QuestionQuestionToken,
            SyntaxKind::QuestionQuestionEqualsToken,
            SyntaxKind::QuestionDotToken,
            SyntaxKind::DotDotDotToken,
        ]
    );
}

#[test]
fn test_question_dot_before_digit_is_conditional() {
    assert_eq!(
        kinds("a?.5:b"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::QuestionToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::ColonToken,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn test_keywords_and_identifiers() {
    let mut scanner = ScannerState::new("let value = typeof foo".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "value");
    assert_eq!(scanner.scan(), SyntaxKind::EqualsToken);
    assert_eq!(scanner.scan(), SyntaxKind::TypeOfKeyword);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
}

#[test]
fn test_keyword_classification() {
    assert!(token_is_keyword(SyntaxKind::BreakKeyword));
    assert!(token_is_reserved_word(SyntaxKind::ConstKeyword));
    assert!(!token_is_reserved_word(SyntaxKind::TypeKeyword));
    assert!(token_is_identifier(SyntaxKind::TypeKeyword));
    assert!(token_is_identifier(SyntaxKind::Identifier));
    assert!(!token_is_identifier(SyntaxKind::ClassKeyword));
    assert!(token_is_assignment_operator(SyntaxKind::PlusEqualsToken));
    assert!(!token_is_assignment_operator(SyntaxKind::PlusToken));
    assert_eq!(text_to_keyword("instanceof"), Some(SyntaxKind::InstanceOfKeyword));
    assert_eq!(text_to_keyword("Let"), None);
    assert_eq!(token_to_text(SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken), Some(">>>="));
    assert_eq!(token_to_text(SyntaxKind::SatisfiesKeyword), Some("satisfies"));
}

#[test]
fn test_scan_string_with_escapes() {
    let mut scanner = ScannerState::new(r#""a\n\x41B\u{43}\'""#.to_string());
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value(), "a\nABC'");
    assert!(scanner.get_scanner_diagnostics().is_empty());
}

#[test]
fn test_unterminated_string_reports_1002() {
    let mut scanner = ScannerState::new("'abc\nx".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert!(scanner.is_unterminated());
    assert_eq!(scanner.get_scanner_diagnostics()[0].code, 1002);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert!(scanner.has_preceding_line_break());
}

#[test]
fn test_numeric_literals() {
    let mut scanner = ScannerState::new("1_000 0xFF 0b1010 1.5e-3 .25 10n".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
    assert_eq!(scanner.get_token_value(), "1000");
    assert!(scanner.get_token_flags().contains(TokenFlags::CONTAINS_SEPARATOR));
    assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
    assert!(scanner.get_token_flags().contains(TokenFlags::HEX_SPECIFIER));
    assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
    assert!(scanner.get_token_flags().contains(TokenFlags::BINARY_SPECIFIER));
    assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
    assert_eq!(scanner.get_token_value(), "1.5e-3");
    assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
    assert_eq!(scanner.get_token_value(), ".25");
    assert_eq!(scanner.scan(), SyntaxKind::BigIntLiteral);
    assert_eq!(scanner.get_token_value(), "10n");
}

#[test]
fn test_comments_are_trivia() {
    let mut scanner = ScannerState::new("a // line\n/* block\n */ b /* c */ d".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "b");
    assert!(scanner.has_preceding_line_break());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "d");
    assert!(!scanner.has_preceding_line_break());
}

#[test]
fn test_unterminated_block_comment() {
    let mut scanner = ScannerState::new("x /* never closed".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    assert_eq!(scanner.get_scanner_diagnostics()[0].code, 1010);
}

#[test]
fn test_template_rescan() {
    let mut scanner = ScannerState::new("`a${x}b${y}c`".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::TemplateHead);
    assert_eq!(scanner.get_token_value(), "a");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
    assert_eq!(scanner.re_scan_template_token(), SyntaxKind::TemplateMiddle);
    assert_eq!(scanner.get_token_text(), "}b${");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
    assert_eq!(scanner.re_scan_template_token(), SyntaxKind::TemplateTail);
    assert_eq!(scanner.get_token_value(), "c");
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_regex_rescan() {
    let mut scanner = ScannerState::new("/[/]+\\//gi.test".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
    assert_eq!(scanner.re_scan_slash_token(), SyntaxKind::RegularExpressionLiteral);
    assert_eq!(scanner.get_token_text(), "/[/]+\\//gi");
    assert_eq!(scanner.scan(), SyntaxKind::DotToken);
}

#[test]
fn test_greater_than_rescan() {
    let mut scanner = ScannerState::new("a >>>= b".to_string());
    scanner.scan();
    assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
    assert_eq!(
        scanner.re_scan_greater_token(),
        SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
    );
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
}

#[test]
fn test_snapshot_restore() {
    let mut scanner = ScannerState::new("a b c".to_string());
    scanner.scan();
    let snapshot = scanner.snapshot();
    scanner.scan();
    scanner.scan();
    scanner.restore(snapshot);
    assert_eq!(scanner.get_token_value(), "a");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "b");
}

#[test]
fn test_invalid_character() {
    let mut scanner = ScannerState::new("a \u{00A7} b".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::Unknown);
    assert_eq!(scanner.get_scanner_diagnostics()[0].code, 1127);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
}

#[test]
fn test_private_identifier_and_shebang() {
    let mut scanner = ScannerState::new("#!/usr/bin/env node\nthis.#count".to_string());
    scanner.scan_shebang_trivia();
    assert_eq!(scanner.scan(), SyntaxKind::ThisKeyword);
    assert_eq!(scanner.scan(), SyntaxKind::DotToken);
    assert_eq!(scanner.scan(), SyntaxKind::PrivateIdentifier);
    assert_eq!(scanner.get_token_value(), "#count");
}

#[test]
fn test_jsx_children_scan_as_text() {
    let mut scanner = ScannerState::new("<p>don't {x}</p>".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::LessThanToken);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
    assert_eq!(scanner.scan_jsx_token(), SyntaxKind::JsxText);
    assert_eq!(scanner.get_token_value(), "don't ");
    assert_eq!(scanner.scan_jsx_token(), SyntaxKind::OpenBraceToken);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
    assert_eq!(scanner.scan_jsx_token(), SyntaxKind::LessThanSlashToken);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
    assert_eq!(scanner.scan_jsx_token(), SyntaxKind::EndOfFileToken);
    assert!(scanner.get_scanner_diagnostics().is_empty());
}

#[test]
fn test_jsx_identifier_takes_dashes() {
    let mut scanner = ScannerState::new("data-test-id=1".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "data");
    assert_eq!(scanner.scan_jsx_identifier(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "data-test-id");
    assert_eq!(scanner.scan(), SyntaxKind::EqualsToken);
}

#[test]
fn test_jsx_attribute_value_keeps_backslashes() {
    let mut scanner = ScannerState::new(r#""C:\new" x"#.to_string());
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.re_scan_jsx_attribute_value(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value(), r"C:\new");
    assert!(scanner.get_scanner_diagnostics().is_empty());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
}
