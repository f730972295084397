//! Diagnostic types, message templates and tsc-style rendering.
//!
//! Messages use tsc's wording and codes so that hosts can match on either.
//! Templates use `{0}`, `{1}`... placeholders filled by [`format_message`].

use serde::Serialize;
use std::fmt;

use crate::limits::MAX_REPORTED_DIAGNOSTICS;
use crate::position::LineMap;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

impl DiagnosticCategory {
    pub fn name(self) -> &'static str {
        match self {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        }
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A compiler diagnostic anchored at a byte range of one file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            file: file.into(),
            start,
            length,
            message_text: message.into(),
            category: DiagnosticCategory::Error,
            code,
        }
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    /// Format as `file(line,col): error TS2322: message`, the way tsc prints
    /// diagnostics with `--pretty false`.
    pub fn format(&self, line_map: &LineMap, source: &str) -> String {
        let pos = line_map.offset_to_position(self.start, source);
        format!(
            "{}({},{}): {} TS{}: {}",
            self.file,
            pos.line + 1,
            pos.character + 1,
            self.category,
            self.code,
            self.message_text
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[TS{}]: {}",
            self.category, self.code, self.message_text
        )
    }
}

/// Whether any diagnostic in the list is an error.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

/// Render diagnostics for one source file, one per line, in source order.
pub fn render_diagnostics(diagnostics: &[Diagnostic], source: &str) -> String {
    let line_map = LineMap::build(source);
    let mut sorted: Vec<&Diagnostic> = diagnostics.iter().collect();
    sorted.sort_by_key(|d| (d.start, d.code));

    let mut out = String::new();
    for (index, diagnostic) in sorted.iter().take(MAX_REPORTED_DIAGNOSTICS).enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&diagnostic.format(&line_map, source));
    }
    if sorted.len() > MAX_REPORTED_DIAGNOSTICS {
        out.push_str(&format!(
            "\n... and {} more diagnostics",
            sorted.len() - MAX_REPORTED_DIAGNOSTICS
        ));
    }
    out
}

/// Fill `{0}`, `{1}`... placeholders in a message template.
pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

// =============================================================================
// Codes and Messages
// =============================================================================

pub mod diagnostic_codes {
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const TOKEN_EXPECTED: u32 = 1005;
    pub const ASTERISK_SLASH_EXPECTED: u32 = 1010;
    pub const UNEXPECTED_TOKEN: u32 = 1012;
    pub const NESTING_TOO_DEEP: u32 = 1001;
    pub const EXPRESSION_EXPECTED: u32 = 1109;
    pub const TYPE_EXPECTED: u32 = 1110;
    pub const DIGIT_EXPECTED: u32 = 1124;
    pub const HEXADECIMAL_DIGIT_EXPECTED: u32 = 1125;
    pub const INVALID_CHARACTER: u32 = 1127;
    pub const DECLARATION_OR_STATEMENT_EXPECTED: u32 = 1128;
    pub const CONST_DECLARATIONS_MUST_BE_INITIALIZED: u32 = 1155;
    pub const UNTERMINATED_TEMPLATE_LITERAL: u32 = 1160;
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: u32 = 1161;
    pub const IMPORT_ASSIGNMENT_CANNOT_BE_USED_WITH_ESM: u32 = 1202;
    pub const EXPORT_ASSIGNMENT_CANNOT_BE_USED_WITH_ESM: u32 = 1203;
    pub const DECORATORS_ARE_NOT_VALID_HERE: u32 = 1206;
    pub const CANNOT_FIND_NAME: u32 = 2304;
    pub const CANNOT_FIND_MODULE: u32 = 2307;
    pub const TYPE_IS_NOT_ASSIGNABLE_TO_TYPE: u32 = 2322;
    pub const ARGUMENT_NOT_ASSIGNABLE_TO_PARAMETER: u32 = 2345;
    pub const LEFT_HAND_SIDE_OF_ARITHMETIC_MUST_BE_NUMBER: u32 = 2362;
    pub const RIGHT_HAND_SIDE_OF_ARITHMETIC_MUST_BE_NUMBER: u32 = 2363;
    pub const CANNOT_REDECLARE_BLOCK_SCOPED_VARIABLE: u32 = 2451;
    pub const EXPECTED_ARGUMENTS: u32 = 2554;
    pub const EXPECTED_AT_LEAST_ARGUMENTS: u32 = 2555;
    pub const CANNOT_ASSIGN_TO_CONSTANT: u32 = 2588;
    pub const JSX_ATTRIBUTES_MUST_BE_NON_EMPTY_EXPRESSION: u32 = 17000;
    pub const EXPECTED_CORRESPONDING_JSX_CLOSING_TAG: u32 = 17002;
    pub const JSX_ELEMENT_HAS_NO_CORRESPONDING_CLOSING_TAG: u32 = 17008;
    pub const JSX_FRAGMENT_HAS_NO_CORRESPONDING_CLOSING_TAG: u32 = 17014;
    pub const EXPECTED_CORRESPONDING_CLOSING_TAG_FOR_JSX_FRAGMENT: u32 = 17015;
}

pub mod diagnostic_messages {
    pub const UNTERMINATED_STRING_LITERAL: &str = "Unterminated string literal.";
    pub const IDENTIFIER_EXPECTED: &str = "Identifier expected.";
    pub const TOKEN_EXPECTED: &str = "'{0}' expected.";
    pub const ASTERISK_SLASH_EXPECTED: &str = "'*/' expected.";
    pub const UNEXPECTED_TOKEN: &str = "Unexpected token.";
    pub const NESTING_TOO_DEEP: &str = "Expression nesting is too deep.";
    pub const EXPRESSION_EXPECTED: &str = "Expression expected.";
    pub const TYPE_EXPECTED: &str = "Type expected.";
    pub const DIGIT_EXPECTED: &str = "Digit expected.";
    pub const HEXADECIMAL_DIGIT_EXPECTED: &str = "Hexadecimal digit expected.";
    pub const INVALID_CHARACTER: &str = "Invalid character.";
    pub const DECLARATION_OR_STATEMENT_EXPECTED: &str = "Declaration or statement expected.";
    pub const CONST_DECLARATIONS_MUST_BE_INITIALIZED: &str =
        "'const' declarations must be initialized.";
    pub const UNTERMINATED_TEMPLATE_LITERAL: &str = "Unterminated template literal.";
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: &str =
        "Unterminated regular expression literal.";
    pub const IMPORT_ASSIGNMENT_CANNOT_BE_USED_WITH_ESM: &str = "Import assignment cannot be used when targeting ECMAScript modules. Consider using 'import * as ns from \"mod\"', 'import {a} from \"mod\"', 'import d from \"mod\"', or another module format instead.";
    pub const EXPORT_ASSIGNMENT_CANNOT_BE_USED_WITH_ESM: &str = "Export assignment cannot be used when targeting ECMAScript modules. Consider using 'export default' or another module format instead.";
    pub const DECORATORS_ARE_NOT_VALID_HERE: &str = "Decorators are not valid here.";
    pub const CANNOT_FIND_NAME: &str = "Cannot find name '{0}'.";
    pub const CANNOT_FIND_MODULE: &str =
        "Cannot find module '{0}' or its corresponding type declarations.";
    pub const TYPE_IS_NOT_ASSIGNABLE_TO_TYPE: &str = "Type '{0}' is not assignable to type '{1}'.";
    pub const ARGUMENT_NOT_ASSIGNABLE_TO_PARAMETER: &str =
        "Argument of type '{0}' is not assignable to parameter of type '{1}'.";
    pub const LEFT_HAND_SIDE_OF_ARITHMETIC_MUST_BE_NUMBER: &str = "The left-hand side of an arithmetic operation must be of type 'any', 'number', 'bigint' or an enum type.";
    pub const RIGHT_HAND_SIDE_OF_ARITHMETIC_MUST_BE_NUMBER: &str = "The right-hand side of an arithmetic operation must be of type 'any', 'number', 'bigint' or an enum type.";
    pub const CANNOT_REDECLARE_BLOCK_SCOPED_VARIABLE: &str =
        "Cannot redeclare block-scoped variable '{0}'.";
    pub const EXPECTED_ARGUMENTS: &str = "Expected {0} arguments, but got {1}.";
    pub const EXPECTED_ARGUMENTS_RANGE: &str = "Expected {0}-{1} arguments, but got {2}.";
    pub const EXPECTED_AT_LEAST_ARGUMENTS: &str = "Expected at least {0} arguments, but got {1}.";
    pub const CANNOT_ASSIGN_TO_CONSTANT: &str =
        "Cannot assign to '{0}' because it is a constant.";
    pub const JSX_ATTRIBUTES_MUST_BE_NON_EMPTY_EXPRESSION: &str =
        "JSX attributes must only be assigned a non-empty 'expression'.";
    pub const EXPECTED_CORRESPONDING_JSX_CLOSING_TAG: &str =
        "Expected corresponding JSX closing tag for '{0}'.";
    pub const JSX_ELEMENT_HAS_NO_CORRESPONDING_CLOSING_TAG: &str =
        "JSX element '{0}' has no corresponding closing tag.";
    pub const JSX_FRAGMENT_HAS_NO_CORRESPONDING_CLOSING_TAG: &str =
        "JSX fragment has no corresponding closing tag.";
    pub const EXPECTED_CORRESPONDING_CLOSING_TAG_FOR_JSX_FRAGMENT: &str =
        "Expected corresponding closing tag for JSX fragment.";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message_fills_placeholders() {
        let message = format_message(
            diagnostic_messages::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE,
            &["string", "number"],
        );
        assert_eq!(message, "Type 'string' is not assignable to type 'number'.");
    }

    #[test]
    fn test_render_is_tsc_style_and_sorted() {
        let source = "let a = 1;\nlet b: number = \"x\";\n";
        let diagnostics = vec![
            Diagnostic::error("a.ts", 27, 3, "second", 2322),
            Diagnostic::error("a.ts", 4, 1, "first", 2304),
        ];
        let rendered = render_diagnostics(&diagnostics, source);
        assert_eq!(
            rendered,
            "a.ts(1,5): error TS2304: first\na.ts(2,17): error TS2322: second"
        );
    }

    #[test]
    fn test_render_truncates_long_lists() {
        let diagnostics: Vec<Diagnostic> = (0..(MAX_REPORTED_DIAGNOSTICS as u32 + 5))
            .map(|i| Diagnostic::error("a.ts", i, 1, "x", 1))
            .collect();
        let rendered = render_diagnostics(&diagnostics, "");
        assert!(rendered.ends_with("... and 5 more diagnostics"));
    }

    #[test]
    fn test_has_errors() {
        let mut warning = Diagnostic::error("a.ts", 0, 0, "w", 1);
        warning.category = DiagnosticCategory::Warning;
        assert!(!has_errors(std::slice::from_ref(&warning)));
        assert!(has_errors(&[warning, Diagnostic::error("a.ts", 0, 0, "e", 2)]));
    }
}
