//! Parser state and token-level helpers.
//!
//! `ParserState` is a recursive-descent parser over `ScannerState`. Parsing
//! methods are split by syntactic area:
//! - `state_statements.rs` - statements, declarations and class members
//! - `state_expressions.rs` - expressions and arrow functions
//! - `state_types.rs` - type annotations and type members

use std::sync::Arc;

use tsz_common::Diagnostic;
use tsz_common::Span;
use tsz_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use tsz_common::limits::{MAX_PARSER_RECURSION_DEPTH, STACK_GROWTH, STACK_RED_ZONE};
use tsz_scanner::{ScannerSnapshot, ScannerState, SyntaxKind, token_is_identifier, token_to_text};

use super::node::{NodeData, NodeIndex};
use super::node_arena::NodeArena;

// =============================================================================
// Context flags
// =============================================================================

pub const CONTEXT_FLAG_ASYNC: u32 = 1 << 0;
pub const CONTEXT_FLAG_GENERATOR: u32 = 1 << 1;
/// The `in` operator is not allowed (for-statement initializers).
pub const CONTEXT_FLAG_DISALLOW_IN: u32 = 1 << 2;
/// Inside a `declare` declaration or a `.d.ts` file.
pub const CONTEXT_FLAG_AMBIENT: u32 = 1 << 3;
/// Conditional types are not allowed (the extends clause of a conditional).
pub const CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES: u32 = 1 << 4;

/// A syntax error found while parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
}

impl ParseDiagnostic {
    pub fn to_diagnostic(&self, file_name: &str) -> Diagnostic {
        Diagnostic::error(
            file_name,
            self.start,
            self.length,
            self.message.clone(),
            self.code,
        )
    }
}

/// Everything needed to roll back a speculative parse.
struct ParserSnapshot {
    scanner: ScannerSnapshot,
    current_token: SyntaxKind,
    previous_token_end: u32,
    arena_len: usize,
    diagnostics_len: usize,
    context_flags: u32,
}

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    pub(crate) current_token: SyntaxKind,
    pub(crate) context_flags: u32,
    pub(crate) recursion_depth: u32,
    /// End of the most recently consumed token; node spans end here.
    pub(crate) previous_token_end: u32,
    /// Set once the recursion limit is hit. Every later token reads as
    /// end-of-file so the parser unwinds without further diagnostics.
    aborted: bool,
    /// `<` in expression position starts a JSX element, not a type assertion.
    jsx: bool,
}

impl ParserState {
    pub fn new(file_name: String, source_text: impl Into<Arc<str>>) -> ParserState {
        let source_text: Arc<str> = source_text.into();
        let arena = NodeArena::with_capacity_for_source(source_text.len());
        let mut context_flags = 0;
        if file_name.ends_with(".d.ts") {
            context_flags |= CONTEXT_FLAG_AMBIENT;
        }
        let jsx = file_name.ends_with(".tsx");
        ParserState {
            scanner: ScannerState::new(source_text),
            arena,
            file_name,
            parse_diagnostics: Vec::new(),
            current_token: SyntaxKind::Unknown,
            context_flags,
            recursion_depth: 0,
            previous_token_end: 0,
            aborted: false,
            jsx,
        }
    }

    /// Enable or disable JSX syntax. `.tsx` files start with it enabled.
    pub fn set_jsx(&mut self, jsx: bool) {
        self.jsx = jsx;
    }

    pub fn is_jsx(&self) -> bool {
        self.jsx
    }

    // =========================================================================
    // Results
    // =========================================================================

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    pub fn get_file_name(&self) -> &str {
        &self.file_name
    }

    pub fn get_source_text(&self) -> &str {
        self.scanner.source_text()
    }

    pub fn source_text_arc(&self) -> Arc<str> {
        self.scanner.source_text_arc()
    }

    // =========================================================================
    // Token access
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.get_token_start() as u32
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.get_token_end() as u32
    }

    pub(crate) fn token_value(&self) -> String {
        self.scanner.get_token_value().to_string()
    }

    #[inline]
    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    #[inline]
    pub(crate) fn in_context(&self, flag: u32) -> bool {
        self.context_flags & flag != 0
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.previous_token_end = self.token_end();
        if self.aborted {
            self.current_token = SyntaxKind::EndOfFileToken;
        } else {
            self.current_token = self.scanner.scan();
        }
        self.current_token
    }

    /// Consume the current token if it matches.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume the current token, reporting `'x' expected.` if it does not match.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        self.error_token_expected(token_to_text(kind).unwrap_or("token"));
        false
    }

    // =========================================================================
    // Re-scanning
    // =========================================================================

    pub(crate) fn re_scan_greater_token(&mut self) -> SyntaxKind {
        if !self.aborted {
            self.current_token = self.scanner.re_scan_greater_token();
        }
        self.current_token
    }

    pub(crate) fn re_scan_slash_token(&mut self) -> SyntaxKind {
        if !self.aborted {
            self.current_token = self.scanner.re_scan_slash_token();
        }
        self.current_token
    }

    pub(crate) fn re_scan_template_token(&mut self) -> SyntaxKind {
        if !self.aborted {
            self.current_token = self.scanner.re_scan_template_token();
        }
        self.current_token
    }

    /// Advance inside JSX element content, where text runs up to `<` or `{`.
    pub(crate) fn next_jsx_token(&mut self) -> SyntaxKind {
        self.previous_token_end = self.token_end();
        if self.aborted {
            self.current_token = SyntaxKind::EndOfFileToken;
        } else {
            self.current_token = self.scanner.scan_jsx_token();
        }
        self.current_token
    }

    pub(crate) fn scan_jsx_identifier(&mut self) -> SyntaxKind {
        if !self.aborted {
            self.current_token = self.scanner.scan_jsx_identifier();
        }
        self.current_token
    }

    pub(crate) fn re_scan_jsx_attribute_value(&mut self) -> SyntaxKind {
        if !self.aborted {
            self.current_token = self.scanner.re_scan_jsx_attribute_value();
        }
        self.current_token
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn parse_error_at(&mut self, start: u32, length: u32, message: &str, code: u32) {
        if self.aborted {
            return;
        }
        // One error per position keeps cascades out of the output
        if self
            .parse_diagnostics
            .last()
            .is_some_and(|last| last.start == start)
        {
            return;
        }
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message: message.to_string(),
            code,
        });
    }

    pub(crate) fn parse_error_at_current_token(&mut self, message: &str, code: u32) {
        let start = self.token_pos();
        let length = self.token_end().saturating_sub(start);
        self.parse_error_at(start, length, message, code);
    }

    pub(crate) fn error_token_expected(&mut self, token: &str) {
        let message = format_message(diagnostic_messages::TOKEN_EXPECTED, &[token]);
        self.parse_error_at_current_token(&message, diagnostic_codes::TOKEN_EXPECTED);
    }

    // =========================================================================
    // Automatic semicolon insertion
    // =========================================================================

    pub(crate) fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.has_preceding_line_break()
    }

    pub(crate) fn parse_semicolon(&mut self) -> bool {
        if self.can_parse_semicolon() {
            self.parse_optional(SyntaxKind::SemicolonToken);
            true
        } else {
            self.error_token_expected(";");
            false
        }
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    /// Run `f` one level of syntactic nesting deeper, on a grown stack when
    /// the current one runs low. Returns `NodeIndex::NONE` (after reporting
    /// once and aborting the parse) when the nesting limit is exceeded.
    pub(crate) fn nested(&mut self, f: impl FnOnce(&mut Self) -> NodeIndex) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || f(self));
        self.exit_recursion();
        result
    }

    fn enter_recursion(&mut self) -> bool {
        if self.aborted {
            return false;
        }
        if self.recursion_depth >= MAX_PARSER_RECURSION_DEPTH {
            tracing::debug!(depth = self.recursion_depth, "parser recursion limit reached");
            self.parse_error_at_current_token(
                diagnostic_messages::NESTING_TOO_DEEP,
                diagnostic_codes::NESTING_TOO_DEEP,
            );
            self.aborted = true;
            self.current_token = SyntaxKind::EndOfFileToken;
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Speculation
    // =========================================================================

    fn snapshot(&self) -> ParserSnapshot {
        ParserSnapshot {
            scanner: self.scanner.snapshot(),
            current_token: self.current_token,
            previous_token_end: self.previous_token_end,
            arena_len: self.arena.len(),
            diagnostics_len: self.parse_diagnostics.len(),
            context_flags: self.context_flags,
        }
    }

    fn restore(&mut self, snapshot: ParserSnapshot) {
        if self.aborted {
            return;
        }
        self.scanner.restore(snapshot.scanner);
        self.current_token = snapshot.current_token;
        self.previous_token_end = snapshot.previous_token_end;
        self.arena.truncate(snapshot.arena_len);
        self.parse_diagnostics.truncate(snapshot.diagnostics_len);
        self.context_flags = snapshot.context_flags;
    }

    /// Run `f` and then rewind to the current position regardless of result.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.snapshot();
        let result = f(self);
        self.restore(snapshot);
        result
    }

    /// Run `f`; rewind if it returns `None` or reported any new diagnostic.
    pub(crate) fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let snapshot = self.snapshot();
        let diagnostics_before = self.parse_diagnostics.len();
        match f(self) {
            Some(result) if self.parse_diagnostics.len() == diagnostics_before => Some(result),
            _ => {
                self.restore(snapshot);
                None
            }
        }
    }

    /// Run `f` with context flags adjusted, restoring them afterwards.
    pub(crate) fn do_inside_context<T>(
        &mut self,
        set: u32,
        clear: u32,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = self.context_flags;
        self.context_flags = (saved & !clear) | set;
        let result = f(self);
        self.context_flags = saved;
        result
    }

    /// Whether the token after the current one satisfies `predicate`.
    pub(crate) fn next_token_is(&mut self, predicate: impl FnOnce(&mut Self) -> bool) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            predicate(p)
        })
    }

    pub(crate) fn next_token_is_kind(&mut self, kind: SyntaxKind) -> bool {
        self.next_token_is(|p| p.is_token(kind))
    }

    pub(crate) fn next_token_is_identifier_on_same_line(&mut self) -> bool {
        self.next_token_is(|p| !p.has_preceding_line_break() && p.is_identifier())
    }

    // =========================================================================
    // Node construction
    // =========================================================================

    /// Add a node spanning from `start` to the end of the last consumed token.
    pub(crate) fn finish_node(&mut self, start: u32, data: NodeData) -> NodeIndex {
        let end = self.previous_token_end.max(start);
        self.arena.add(Span::new(start, end), data)
    }

    pub(crate) fn is_identifier(&self) -> bool {
        token_is_identifier(self.token())
    }

    /// Placeholder identifier for a missing name; consumes nothing.
    pub(crate) fn create_missing_identifier(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.arena.add(
            Span::at(pos),
            NodeData::Identifier {
                text: String::new(),
            },
        )
    }

    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        if self.is_identifier() {
            return self.parse_identifier_token();
        }
        if self.is_token(SyntaxKind::EndOfFileToken) || !self.is_reserved_word_token() {
            self.parse_error_at_current_token(
                diagnostic_messages::IDENTIFIER_EXPECTED,
                diagnostic_codes::IDENTIFIER_EXPECTED,
            );
            return self.create_missing_identifier();
        }
        // A reserved word where a name belongs: report and keep it as the name
        self.parse_error_at_current_token(
            diagnostic_messages::IDENTIFIER_EXPECTED,
            diagnostic_codes::IDENTIFIER_EXPECTED,
        );
        self.parse_identifier_token()
    }

    /// Identifier or any keyword, as used after `.` and in property names.
    pub(crate) fn parse_identifier_name(&mut self) -> NodeIndex {
        if tsz_scanner::token_is_identifier_or_keyword(self.token()) {
            return self.parse_identifier_token();
        }
        if self.is_token(SyntaxKind::PrivateIdentifier) {
            let start = self.token_pos();
            let text = self.token_value();
            self.next_token();
            return self.finish_node(start, NodeData::PrivateIdentifier { text });
        }
        self.parse_error_at_current_token(
            diagnostic_messages::IDENTIFIER_EXPECTED,
            diagnostic_codes::IDENTIFIER_EXPECTED,
        );
        self.create_missing_identifier()
    }

    fn is_reserved_word_token(&self) -> bool {
        tsz_scanner::token_is_reserved_word(self.token())
    }

    fn parse_identifier_token(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let text = self.token_value();
        self.next_token();
        self.finish_node(start, NodeData::Identifier { text })
    }

    /// Create a `Literal` node from the current token and consume it.
    pub(crate) fn parse_literal_node(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let kind = self.token();
        let text = self.token_value();
        self.next_token();
        self.finish_node(start, NodeData::Literal { kind, text })
    }

    /// Parse a comma-separated list up to (not including) `close`.
    pub(crate) fn parse_delimited_list(
        &mut self,
        close: SyntaxKind,
        mut parse_element: impl FnMut(&mut Self) -> NodeIndex,
    ) -> Vec<NodeIndex> {
        let mut elements = Vec::new();
        while !self.is_token(close) && !self.is_token(SyntaxKind::EndOfFileToken) {
            let before = self.token_pos();
            let element = parse_element(self);
            if element.is_some() {
                elements.push(element);
            }
            if self.parse_optional(SyntaxKind::CommaToken) {
                continue;
            }
            if self.is_token(close) || self.token_pos() == before {
                break;
            }
            // The element ended early; try the next one from here
            self.error_token_expected(",");
        }
        elements
    }
}
