//! Error emission (`error_*` methods).
//!
//! Every checker diagnostic goes through one of these helpers so anchoring
//! and message formatting stay consistent.

use tsz_common::Diagnostic;
use tsz_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use tsz_common::Span;
use tsz_parser::NodeIndex;

use crate::state::CheckerState;
use crate::types::Type;

impl<'a> CheckerState<'a> {
    pub(crate) fn error_at_span(&mut self, span: Span, message: String, code: u32) {
        let diagnostic = Diagnostic::error(
            self.ctx.file_name.clone(),
            span.start,
            span.len(),
            message,
            code,
        );
        self.ctx.push_diagnostic(diagnostic);
    }

    pub(crate) fn error_at_node(&mut self, node: NodeIndex, message: String, code: u32) {
        let span = self.ctx.arena.span(node);
        self.error_at_span(span, message, code);
    }

    /// Source and target display strings. Literal sources widen unless the
    /// target itself mentions literal or enum types.
    pub(crate) fn format_type_pair(source: &Type, target: &Type) -> (String, String) {
        let source = if target.contains_literal() {
            source.clone()
        } else {
            source.widen()
        };
        (source.to_string(), target.to_string())
    }

    // =========================================================================
    // Assignability
    // =========================================================================

    pub(crate) fn error_type_not_assignable_at_span(&mut self, source: &Type, target: &Type, span: Span) {
        let (source, target) = Self::format_type_pair(source, target);
        self.error_at_span(
            span,
            format_message(
                diagnostic_messages::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE,
                &[&source, &target],
            ),
            diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE,
        );
    }

    pub(crate) fn error_type_not_assignable(&mut self, source: &Type, target: &Type, node: NodeIndex) {
        let span = self.ctx.arena.span(node);
        self.error_type_not_assignable_at_span(source, target, span);
    }

    pub(crate) fn error_argument_not_assignable(&mut self, source: &Type, target: &Type, span: Span) {
        let (source, target) = Self::format_type_pair(source, target);
        self.error_at_span(
            span,
            format_message(
                diagnostic_messages::ARGUMENT_NOT_ASSIGNABLE_TO_PARAMETER,
                &[&source, &target],
            ),
            diagnostic_codes::ARGUMENT_NOT_ASSIGNABLE_TO_PARAMETER,
        );
    }

    // =========================================================================
    // Names and modules
    // =========================================================================

    pub(crate) fn error_cannot_find_name(&mut self, name: &str, node: NodeIndex) {
        self.error_at_node(
            node,
            format_message(diagnostic_messages::CANNOT_FIND_NAME, &[name]),
            diagnostic_codes::CANNOT_FIND_NAME,
        );
    }

    pub(crate) fn error_cannot_find_module(&mut self, specifier: &str, node: NodeIndex) {
        self.error_at_node(
            node,
            format_message(diagnostic_messages::CANNOT_FIND_MODULE, &[specifier]),
            diagnostic_codes::CANNOT_FIND_MODULE,
        );
    }

    pub(crate) fn error_cannot_assign_to_constant(&mut self, name: &str, node: NodeIndex) {
        self.error_at_node(
            node,
            format_message(diagnostic_messages::CANNOT_ASSIGN_TO_CONSTANT, &[name]),
            diagnostic_codes::CANNOT_ASSIGN_TO_CONSTANT,
        );
    }

    // =========================================================================
    // Operators and calls
    // =========================================================================

    pub(crate) fn error_arithmetic_operand(&mut self, node: NodeIndex, is_left: bool) {
        let (message, code) = if is_left {
            (
                diagnostic_messages::LEFT_HAND_SIDE_OF_ARITHMETIC_MUST_BE_NUMBER,
                diagnostic_codes::LEFT_HAND_SIDE_OF_ARITHMETIC_MUST_BE_NUMBER,
            )
        } else {
            (
                diagnostic_messages::RIGHT_HAND_SIDE_OF_ARITHMETIC_MUST_BE_NUMBER,
                diagnostic_codes::RIGHT_HAND_SIDE_OF_ARITHMETIC_MUST_BE_NUMBER,
            )
        };
        self.error_at_node(node, message.to_string(), code);
    }

    /// TS2554 / TS2555 for a call with the wrong number of arguments.
    pub(crate) fn error_argument_count(&mut self, min: usize, max: Option<usize>, got: usize, span: Span) {
        let got_text = got.to_string();
        let message = match max {
            None => {
                self.error_at_span(
                    span,
                    format_message(
                        diagnostic_messages::EXPECTED_AT_LEAST_ARGUMENTS,
                        &[&min.to_string(), &got_text],
                    ),
                    diagnostic_codes::EXPECTED_AT_LEAST_ARGUMENTS,
                );
                return;
            }
            Some(max) if max == min => format_message(
                diagnostic_messages::EXPECTED_ARGUMENTS,
                &[&min.to_string(), &got_text],
            ),
            Some(max) => format_message(
                diagnostic_messages::EXPECTED_ARGUMENTS_RANGE,
                &[&min.to_string(), &max.to_string(), &got_text],
            ),
        };
        self.error_at_span(span, message, diagnostic_codes::EXPECTED_ARGUMENTS);
    }
}
