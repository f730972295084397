use tsz_parser::{NodeData, NodeIndex};
use tsz_scanner::SyntaxKind;

use super::Printer;

impl<'a> Printer<'a> {
    // =========================================================================
    // Expressions
    // =========================================================================

    pub(super) fn emit_binary_expression(&mut self, left: NodeIndex, operator: SyntaxKind, right: NodeIndex) {
        self.emit(left);
        // Comma operator: no space before, space after (e.g., `(1, 2, 3)`)
        if operator == SyntaxKind::CommaToken {
            self.write(", ");
        } else {
            self.write_space();
            self.write_operator(operator);
            self.write_space();
        }
        self.emit(right);
    }

    pub(super) fn emit_prefix_unary(&mut self, operator: SyntaxKind, operand: NodeIndex) {
        self.write_operator(operator);
        let needs_space = match operator {
            SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::AwaitKeyword => true,
            // `- -x` and `+ ++x` must not fuse into `--x` / `+++x`
            SyntaxKind::PlusToken | SyntaxKind::MinusToken => matches!(
                self.arena.data(operand),
                Some(NodeData::PrefixUnaryExpression { operator: inner, .. })
                    if same_sign(operator, *inner)
            ),
            _ => false,
        };
        if needs_space {
            self.write_space();
        }
        self.emit(operand);
    }

    pub(super) fn emit_arguments(&mut self, arguments: &[NodeIndex]) {
        self.write("(");
        self.emit_comma_separated(arguments);
        self.write(")");
    }

    /// Parentheses are kept as written, except around a type assertion
    /// whose erased operand is a plain reference: `(x as Foo).y` prints as
    /// `x.y`.
    pub(super) fn emit_parenthesized(&mut self, expression: NodeIndex) {
        if self.is_type_assertion(expression) {
            let inner = self.skip_type_assertions(expression);
            if self.is_plain_reference(inner) {
                self.emit(inner);
                return;
            }
        }
        self.write("(");
        self.emit(expression);
        self.write(")");
    }

    pub(super) fn emit_keyword(&mut self, kind: SyntaxKind) {
        self.write_operator(kind);
    }

    // =========================================================================
    // Type erasure
    // =========================================================================

    pub(crate) fn is_type_assertion(&self, idx: NodeIndex) -> bool {
        matches!(
            self.arena.data(idx),
            Some(
                NodeData::AsExpression { .. }
                    | NodeData::SatisfiesExpression { .. }
                    | NodeData::TypeAssertion { .. }
                    | NodeData::NonNullExpression { .. }
            )
        )
    }

    /// The expression left after erasing `as`, `satisfies`, `<T>` and `!`.
    pub(crate) fn skip_type_assertions(&self, mut idx: NodeIndex) -> NodeIndex {
        loop {
            match self.arena.data(idx) {
                Some(
                    NodeData::AsExpression { expression, .. }
                    | NodeData::SatisfiesExpression { expression, .. }
                    | NodeData::TypeAssertion { expression, .. }
                    | NodeData::NonNullExpression { expression },
                ) => idx = *expression,
                _ => return idx,
            }
        }
    }

    /// Identifiers, `this` and non-optional member chains over them.
    fn is_plain_reference(&self, idx: NodeIndex) -> bool {
        match self.arena.data(idx) {
            Some(NodeData::Identifier { .. }) => true,
            Some(NodeData::Keyword { kind }) => *kind == SyntaxKind::ThisKeyword,
            Some(
                NodeData::PropertyAccessExpression {
                    expression,
                    question_dot: false,
                    ..
                }
                | NodeData::ElementAccessExpression {
                    expression,
                    question_dot: false,
                    ..
                },
            ) => self.is_plain_reference(*expression),
            _ => false,
        }
    }
}

fn same_sign(outer: SyntaxKind, inner: SyntaxKind) -> bool {
    use SyntaxKind::*;
    matches!(
        (outer, inner),
        (PlusToken, PlusToken | PlusPlusToken) | (MinusToken, MinusToken | MinusMinusToken)
    )
}
