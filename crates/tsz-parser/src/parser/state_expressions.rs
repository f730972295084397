//! Parser state - expression parsing methods

use tsz_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use tsz_scanner::{SyntaxKind, token_is_assignment_operator, token_is_identifier_or_keyword};

use super::node::{FunctionData, ModifierFlags, NodeData, NodeIndex, NodeList, ParameterData};
use super::state::{
    CONTEXT_FLAG_ASYNC, CONTEXT_FLAG_DISALLOW_IN, CONTEXT_FLAG_GENERATOR, ParserState,
};

/// Binary operator precedence; higher binds tighter. Zero means the token
/// is not a binary operator.
fn binary_operator_precedence(kind: SyntaxKind) -> u8 {
    use SyntaxKind::*;
    match kind {
        QuestionQuestionToken => 4,
        BarBarToken => 5,
        AmpersandAmpersandToken => 6,
        BarToken => 7,
        CaretToken => 8,
        AmpersandToken => 9,
        EqualsEqualsToken | ExclamationEqualsToken | EqualsEqualsEqualsToken
        | ExclamationEqualsEqualsToken => 10,
        LessThanToken | GreaterThanToken | LessThanEqualsToken | GreaterThanEqualsToken
        | InstanceOfKeyword | InKeyword | AsKeyword | SatisfiesKeyword => 11,
        LessThanLessThanToken | GreaterThanGreaterThanToken
        | GreaterThanGreaterThanGreaterThanToken => 12,
        PlusToken | MinusToken => 13,
        AsteriskToken | SlashToken | PercentToken => 14,
        AsteriskAsteriskToken => 15,
        _ => 0,
    }
}

impl ParserState {
    // =========================================================================
    // Comma and assignment expressions
    // =========================================================================

    /// `a, b, c`
    pub fn parse_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut expression = self.parse_assignment_expression_or_higher();
        while self.is_token(SyntaxKind::CommaToken) {
            self.next_token();
            let right = self.parse_assignment_expression_or_higher();
            expression = self.finish_node(
                start,
                NodeData::BinaryExpression {
                    left: expression,
                    operator: SyntaxKind::CommaToken,
                    right,
                },
            );
        }
        expression
    }

    pub(crate) fn parse_assignment_expression_or_higher(&mut self) -> NodeIndex {
        self.parse_assignment_expression_with(true)
    }

    /// With `allow_arrow_return_type` off, `(a): b => c` is only an arrow
    /// function when a `:` follows its body. This resolves `x ? (a) : b => c`
    /// in the true branch of a conditional.
    fn parse_assignment_expression_with(&mut self, allow_arrow_return_type: bool) -> NodeIndex {
        self.nested(|p| p.parse_assignment_expression_worker(allow_arrow_return_type))
    }

    fn parse_assignment_expression_worker(&mut self, allow_arrow_return_type: bool) -> NodeIndex {
        use SyntaxKind::*;
        if self.is_token(YieldKeyword) && self.in_context(CONTEXT_FLAG_GENERATOR) {
            return self.parse_yield_expression();
        }
        if let Some(arrow) = self.try_parse_arrow_function(allow_arrow_return_type) {
            return arrow;
        }

        let start = self.token_pos();
        let left = self.parse_binary_expression_or_higher(0);

        if token_is_assignment_operator(self.token()) && self.is_left_hand_side(left) {
            let operator = self.token();
            self.next_token();
            let right = self.parse_assignment_expression_with(allow_arrow_return_type);
            return self.finish_node(
                start,
                NodeData::BinaryExpression {
                    left,
                    operator,
                    right,
                },
            );
        }

        if self.is_token(QuestionToken) {
            self.next_token();
            let when_true = self.do_inside_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
                p.parse_assignment_expression_with(false)
            });
            self.parse_expected(ColonToken);
            let when_false = self.parse_assignment_expression_with(allow_arrow_return_type);
            return self.finish_node(
                start,
                NodeData::ConditionalExpression {
                    condition: left,
                    when_true,
                    when_false,
                },
            );
        }
        left
    }

    fn is_left_hand_side(&self, index: NodeIndex) -> bool {
        matches!(
            self.arena.data(index),
            Some(
                NodeData::Identifier { .. }
                    | NodeData::PropertyAccessExpression { .. }
                    | NodeData::ElementAccessExpression { .. }
                    | NodeData::ParenthesizedExpression { .. }
                    | NodeData::ObjectLiteralExpression { .. }
                    | NodeData::ArrayLiteralExpression { .. }
                    | NodeData::NonNullExpression { .. }
                    | NodeData::AsExpression { .. }
                    | NodeData::SatisfiesExpression { .. }
                    | NodeData::TypeAssertion { .. }
                    | NodeData::CallExpression { .. }
            )
        )
    }

    fn parse_yield_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let asterisk = !self.has_preceding_line_break() && self.parse_optional(SyntaxKind::AsteriskToken);
        let expression = if asterisk || (!self.has_preceding_line_break() && self.is_start_of_expression())
        {
            self.parse_assignment_expression_or_higher()
        } else {
            NodeIndex::NONE
        };
        self.finish_node(
            start,
            NodeData::YieldExpression {
                asterisk,
                expression,
            },
        )
    }

    fn is_start_of_expression(&self) -> bool {
        use SyntaxKind::*;
        !matches!(
            self.token(),
            CloseParenToken
                | CloseBracketToken
                | CloseBraceToken
                | ColonToken
                | CommaToken
                | SemicolonToken
                | EndOfFileToken
                | EqualsGreaterThanToken
        ) && binary_operator_precedence(self.token()) == 0
            || matches!(self.token(), PlusToken | MinusToken | LessThanToken | SlashToken)
    }

    // =========================================================================
    // Arrow functions
    // =========================================================================

    fn try_parse_arrow_function(&mut self, allow_return_type: bool) -> Option<NodeIndex> {
        use SyntaxKind::*;
        match self.token() {
            // x => ...
            _ if self.is_identifier()
                && !self.is_token(AsyncKeyword)
                && self.next_token_is(|p| {
                    p.is_token(EqualsGreaterThanToken) && !p.has_preceding_line_break()
                }) =>
            {
                Some(self.parse_simple_arrow_function(ModifierFlags::empty(), allow_return_type))
            }
            // async x => ...
            AsyncKeyword
                if self.look_ahead(|p| {
                    p.next_token();
                    if p.has_preceding_line_break() || !p.is_identifier() {
                        return false;
                    }
                    p.next_token();
                    p.is_token(EqualsGreaterThanToken)
                }) =>
            {
                self.next_token();
                Some(self.parse_simple_arrow_function(ModifierFlags::ASYNC, allow_return_type))
            }
            AsyncKeyword if self.next_token_is(|p| {
                !p.has_preceding_line_break() && matches!(p.token(), OpenParenToken | LessThanToken)
            }) =>
            {
                self.try_parse(|p| p.parse_parenthesized_arrow_function(allow_return_type))
            }
            OpenParenToken if self.could_start_arrow_parameters() => {
                self.try_parse(|p| p.parse_parenthesized_arrow_function(allow_return_type))
            }
            LessThanToken if !self.is_jsx() || self.is_jsx_generic_arrow_head() => {
                self.try_parse(|p| p.parse_parenthesized_arrow_function(allow_return_type))
            }
            _ => None,
        }
    }

    /// In JSX mode `<T>` starts an element; a generic arrow must be written
    /// `<T,>` or `<T extends U>`.
    fn is_jsx_generic_arrow_head(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if !p.is_identifier() {
                return false;
            }
            p.next_token();
            matches!(p.token(), SyntaxKind::CommaToken | SyntaxKind::ExtendsKeyword)
        })
    }

    /// Cheap check of the tokens after `(` before speculating on an arrow
    /// function head.
    fn could_start_arrow_parameters(&mut self) -> bool {
        use SyntaxKind::*;
        self.look_ahead(|p| {
            p.next_token();
            match p.token() {
                CloseParenToken | DotDotDotToken | OpenBraceToken | OpenBracketToken | AtToken => {
                    true
                }
                PublicKeyword | PrivateKeyword | ProtectedKeyword | ReadonlyKeyword => true,
                ThisKeyword => true,
                _ if p.is_identifier() => {
                    p.next_token();
                    matches!(
                        p.token(),
                        ColonToken | CommaToken | QuestionToken | EqualsToken | CloseParenToken
                    )
                }
                _ => false,
            }
        })
    }

    fn parse_simple_arrow_function(
        &mut self,
        modifiers: ModifierFlags,
        allow_return_type: bool,
    ) -> NodeIndex {
        let start = self.token_pos();
        let param_start = self.token_pos();
        let name = self.parse_identifier();
        let parameter = self.finish_node(
            param_start,
            NodeData::Parameter(ParameterData {
                modifiers: ModifierFlags::empty(),
                decorators: Vec::new(),
                dot_dot_dot: false,
                name,
                question: false,
                type_annotation: NodeIndex::NONE,
                initializer: NodeIndex::NONE,
            }),
        );
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
        let body = self.parse_arrow_body(modifiers, allow_return_type);
        self.finish_node(
            start,
            NodeData::ArrowFunction(FunctionData {
                modifiers,
                parameters: vec![parameter],
                body,
                ..FunctionData::default()
            }),
        )
    }

    /// Speculatively parse `[async] [<T>](params)[: R] => body`. Returns
    /// `None` when the tokens turn out not to be an arrow function head.
    fn parse_parenthesized_arrow_function(&mut self, allow_return_type: bool) -> Option<NodeIndex> {
        use SyntaxKind::*;
        let start = self.token_pos();
        let mut modifiers = ModifierFlags::empty();
        if self.is_token(AsyncKeyword) {
            self.next_token();
            modifiers |= ModifierFlags::ASYNC;
        }
        let type_parameters = self.parse_type_parameters();
        if !self.is_token(OpenParenToken) {
            return None;
        }
        let async_flag = if modifiers.contains(ModifierFlags::ASYNC) {
            CONTEXT_FLAG_ASYNC
        } else {
            0
        };
        let parameters = self.do_inside_context(async_flag, CONTEXT_FLAG_ASYNC, |p| p.parse_parameters());
        let return_type = if self.parse_optional(ColonToken) {
            self.parse_return_type()
        } else {
            NodeIndex::NONE
        };
        if !self.is_token(EqualsGreaterThanToken) || self.has_preceding_line_break() {
            return None;
        }
        self.next_token();
        let body = self.parse_arrow_body(modifiers, allow_return_type);
        if !allow_return_type && return_type.is_some() && !self.is_token(ColonToken) {
            return None;
        }
        Some(self.finish_node(
            start,
            NodeData::ArrowFunction(FunctionData {
                modifiers,
                decorators: Vec::new(),
                asterisk: false,
                name: NodeIndex::NONE,
                question: false,
                type_parameters,
                parameters,
                return_type,
                body,
            }),
        ))
    }

    fn parse_arrow_body(&mut self, modifiers: ModifierFlags, allow_return_type: bool) -> NodeIndex {
        let flags = if modifiers.contains(ModifierFlags::ASYNC) {
            CONTEXT_FLAG_ASYNC
        } else {
            0
        };
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.do_inside_context(
                flags,
                CONTEXT_FLAG_ASYNC | CONTEXT_FLAG_GENERATOR | CONTEXT_FLAG_DISALLOW_IN,
                |p| p.parse_block(),
            )
        } else {
            self.do_inside_context(flags, CONTEXT_FLAG_ASYNC | CONTEXT_FLAG_GENERATOR, |p| {
                p.parse_assignment_expression_with(allow_return_type)
            })
        }
    }

    // =========================================================================
    // Binary expressions
    // =========================================================================

    fn parse_binary_expression_or_higher(&mut self, precedence: u8) -> NodeIndex {
        let start = self.token_pos();
        let left = self.parse_unary_expression_or_higher();
        self.parse_binary_expression_rest(start, precedence, left)
    }

    fn parse_binary_expression_rest(&mut self, start: u32, precedence: u8, mut left: NodeIndex) -> NodeIndex {
        use SyntaxKind::*;
        loop {
            if self.is_token(GreaterThanToken) {
                self.re_scan_greater_token();
            }
            let operator = self.token();
            let new_precedence = binary_operator_precedence(operator);
            let consume = if operator == AsteriskAsteriskToken {
                new_precedence >= precedence
            } else {
                new_precedence > precedence
            };
            if new_precedence == 0 || !consume {
                break;
            }
            if operator == InKeyword && self.in_context(CONTEXT_FLAG_DISALLOW_IN) {
                break;
            }
            if matches!(operator, AsKeyword | SatisfiesKeyword) {
                if self.has_preceding_line_break() {
                    break;
                }
                self.next_token();
                let type_node = self.parse_type();
                let data = if operator == AsKeyword {
                    NodeData::AsExpression {
                        expression: left,
                        type_node,
                    }
                } else {
                    NodeData::SatisfiesExpression {
                        expression: left,
                        type_node,
                    }
                };
                left = self.finish_node(start, data);
                continue;
            }
            self.next_token();
            let right = self.parse_binary_expression_or_higher(new_precedence);
            left = self.finish_node(
                start,
                NodeData::BinaryExpression {
                    left,
                    operator,
                    right,
                },
            );
        }
        left
    }

    // =========================================================================
    // Unary expressions
    // =========================================================================

    fn parse_unary_expression_or_higher(&mut self) -> NodeIndex {
        self.nested(|p| p.parse_unary_expression_worker())
    }

    fn parse_unary_expression_worker(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        match self.token() {
            PlusToken | MinusToken | TildeToken | ExclamationToken | PlusPlusToken
            | MinusMinusToken | TypeOfKeyword | VoidKeyword | DeleteKeyword => {
                let operator = self.token();
                self.next_token();
                let operand = self.parse_unary_expression_or_higher();
                self.finish_node(start, NodeData::PrefixUnaryExpression { operator, operand })
            }
            AwaitKeyword if self.is_await_expression() => {
                self.next_token();
                let operand = self.parse_unary_expression_or_higher();
                self.finish_node(
                    start,
                    NodeData::PrefixUnaryExpression {
                        operator: AwaitKeyword,
                        operand,
                    },
                )
            }
            LessThanToken if !self.is_jsx() => {
                // <T>expr
                self.next_token();
                let type_node = self.parse_type();
                self.parse_expected(GreaterThanToken);
                let expression = self.parse_unary_expression_or_higher();
                self.finish_node(
                    start,
                    NodeData::TypeAssertion {
                        type_node,
                        expression,
                    },
                )
            }
            _ => self.parse_update_expression(),
        }
    }

    /// `await` is an operator inside async functions and at module top
    /// level; elsewhere it is an identifier unless an operand follows.
    fn is_await_expression(&mut self) -> bool {
        if self.in_context(CONTEXT_FLAG_ASYNC) {
            return true;
        }
        self.next_token_is(|p| {
            !p.has_preceding_line_break()
                && (p.is_identifier()
                    || matches!(
                        p.token(),
                        SyntaxKind::OpenParenToken
                            | SyntaxKind::OpenBracketToken
                            | SyntaxKind::ThisKeyword
                            | SyntaxKind::NewKeyword
                            | SyntaxKind::StringLiteral
                            | SyntaxKind::NumericLiteral
                    ))
        })
    }

    fn parse_update_expression(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        let expression = self.parse_left_hand_side_expression_or_higher();
        if matches!(self.token(), PlusPlusToken | MinusMinusToken) && !self.has_preceding_line_break() {
            let operator = self.token();
            self.next_token();
            return self.finish_node(
                start,
                NodeData::PostfixUnaryExpression {
                    operand: expression,
                    operator,
                },
            );
        }
        expression
    }

    // =========================================================================
    // Left-hand-side expressions
    // =========================================================================

    fn parse_left_hand_side_expression_or_higher(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = self.parse_member_expression_or_higher();
        self.parse_call_expression_rest(start, expression)
    }

    /// Member access chain without calls, as used by `new` targets and
    /// heritage clauses.
    pub(crate) fn parse_left_hand_side_expression_without_call(&mut self) -> NodeIndex {
        self.parse_member_expression_or_higher()
    }

    /// `@expr` decorator: a member chain with an optional call.
    pub(crate) fn parse_decorator_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = self.parse_member_expression_or_higher();
        if self.is_token(SyntaxKind::OpenParenToken) {
            let arguments = self.parse_argument_list();
            return self.finish_node(
                start,
                NodeData::CallExpression {
                    expression,
                    question_dot: false,
                    type_arguments: Vec::new(),
                    arguments,
                },
            );
        }
        expression
    }

    fn parse_member_expression_or_higher(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        self.parse_member_expression_rest(start, expression)
    }

    fn parse_member_expression_rest(&mut self, start: u32, mut expression: NodeIndex) -> NodeIndex {
        use SyntaxKind::*;
        loop {
            match self.token() {
                DotToken => {
                    self.next_token();
                    let name = self.parse_identifier_name();
                    expression = self.finish_node(
                        start,
                        NodeData::PropertyAccessExpression {
                            expression,
                            question_dot: false,
                            name,
                        },
                    );
                }
                QuestionDotToken
                    if self.next_token_is(|p| {
                        token_is_identifier_or_keyword(p.token())
                            || p.is_token(PrivateIdentifier)
                    }) =>
                {
                    self.next_token();
                    let name = self.parse_identifier_name();
                    expression = self.finish_node(
                        start,
                        NodeData::PropertyAccessExpression {
                            expression,
                            question_dot: true,
                            name,
                        },
                    );
                }
                QuestionDotToken if self.next_token_is_kind(OpenBracketToken) => {
                    self.next_token();
                    expression = self.parse_element_access(start, expression, true);
                }
                OpenBracketToken => {
                    expression = self.parse_element_access(start, expression, false);
                }
                ExclamationToken if !self.has_preceding_line_break() => {
                    self.next_token();
                    expression = self.finish_node(start, NodeData::NonNullExpression { expression });
                }
                NoSubstitutionTemplateLiteral | TemplateHead => {
                    let template = self.parse_template_expression();
                    expression = self.finish_node(
                        start,
                        NodeData::TaggedTemplateExpression {
                            tag: expression,
                            type_arguments: Vec::new(),
                            template,
                        },
                    );
                }
                _ => return expression,
            }
        }
    }

    fn parse_element_access(&mut self, start: u32, expression: NodeIndex, question_dot: bool) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let argument = self.do_inside_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| p.parse_expression());
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.finish_node(
            start,
            NodeData::ElementAccessExpression {
                expression,
                question_dot,
                argument,
            },
        )
    }

    fn parse_call_expression_rest(&mut self, start: u32, mut expression: NodeIndex) -> NodeIndex {
        use SyntaxKind::*;
        loop {
            expression = self.parse_member_expression_rest(start, expression);
            let question_dot = self.is_token(QuestionDotToken)
                && self.next_token_is(|p| matches!(p.token(), OpenParenToken | LessThanToken));
            if question_dot {
                self.next_token();
            }
            let type_arguments = if self.is_token(LessThanToken) {
                match self.try_parse(|p| p.parse_type_arguments_in_expression()) {
                    Some(arguments) => arguments,
                    None if question_dot => {
                        self.error_token_expected("(");
                        return expression;
                    }
                    None => return expression,
                }
            } else {
                Vec::new()
            };
            if self.is_token(OpenParenToken) {
                let arguments = self.parse_argument_list();
                expression = self.finish_node(
                    start,
                    NodeData::CallExpression {
                        expression,
                        question_dot,
                        type_arguments,
                        arguments,
                    },
                );
                continue;
            }
            if !type_arguments.is_empty() {
                // f<T>`...` or an instantiation expression
                if matches!(self.token(), NoSubstitutionTemplateLiteral | TemplateHead) {
                    let template = self.parse_template_expression();
                    expression = self.finish_node(
                        start,
                        NodeData::TaggedTemplateExpression {
                            tag: expression,
                            type_arguments,
                            template,
                        },
                    );
                    continue;
                }
                expression = self.finish_node(
                    start,
                    NodeData::ExpressionWithTypeArguments {
                        expression,
                        type_arguments,
                    },
                );
                continue;
            }
            if question_dot {
                self.error_token_expected("(");
            }
            return expression;
        }
    }

    /// `<T, U>` followed by a token that can follow type arguments in an
    /// expression. Fails (for rollback) when this is a comparison instead.
    fn parse_type_arguments_in_expression(&mut self) -> Option<NodeList> {
        use SyntaxKind::*;
        if !self.is_token(LessThanToken) {
            return None;
        }
        let arguments = self.parse_type_arguments();
        match self.token() {
            OpenParenToken | NoSubstitutionTemplateLiteral | TemplateHead => Some(arguments),
            // Instantiation expression: `f<T>;`, `f<T>)`
            CloseParenToken | CloseBracketToken | ColonToken | SemicolonToken | CommaToken
            | DotToken | QuestionDotToken | EqualsEqualsToken | EqualsEqualsEqualsToken
            | ExclamationEqualsToken | ExclamationEqualsEqualsToken | CloseBraceToken
            | EndOfFileToken => Some(arguments),
            _ => None,
        }
    }

    pub(crate) fn parse_argument_list(&mut self) -> NodeList {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let arguments = self.do_inside_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
            p.parse_delimited_list(SyntaxKind::CloseParenToken, |p| p.parse_argument_or_array_element())
        });
        self.parse_expected(SyntaxKind::CloseParenToken);
        arguments
    }

    fn parse_argument_or_array_element(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::DotDotDotToken) {
            let start = self.token_pos();
            self.next_token();
            let expression = self.parse_assignment_expression_or_higher();
            return self.finish_node(start, NodeData::SpreadElement { expression });
        }
        self.parse_assignment_expression_or_higher()
    }

    fn parse_new_expression(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        self.parse_expected(NewKeyword);
        if self.is_token(DotToken) {
            self.next_token();
            let name = self.parse_identifier_name();
            return self.finish_node(
                start,
                NodeData::MetaProperty {
                    keyword: NewKeyword,
                    name,
                },
            );
        }
        let expression_start = self.token_pos();
        let target = if self.is_token(NewKeyword) {
            self.nested(|p| p.parse_new_expression())
        } else {
            self.parse_primary_expression()
        };
        let expression = self.parse_member_expression_rest_without_templates(expression_start, target);
        let type_arguments = if self.is_token(LessThanToken) {
            self.try_parse(|p| p.parse_type_arguments_in_expression())
                .unwrap_or_default()
        } else {
            Vec::new()
        };
        let arguments = if self.is_token(OpenParenToken) {
            Some(self.parse_argument_list())
        } else {
            None
        };
        self.finish_node(
            start,
            NodeData::NewExpression {
                expression,
                type_arguments,
                arguments,
            },
        )
    }

    /// Member chain for `new` targets: property and element access only.
    fn parse_member_expression_rest_without_templates(
        &mut self,
        start: u32,
        mut expression: NodeIndex,
    ) -> NodeIndex {
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let name = self.parse_identifier_name();
                    expression = self.finish_node(
                        start,
                        NodeData::PropertyAccessExpression {
                            expression,
                            question_dot: false,
                            name,
                        },
                    );
                }
                SyntaxKind::OpenBracketToken => {
                    expression = self.parse_element_access(start, expression, false);
                }
                _ => return expression,
            }
        }
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        match self.token() {
            NumericLiteral | BigIntLiteral | StringLiteral | NoSubstitutionTemplateLiteral => {
                self.parse_literal_node()
            }
            TemplateHead => self.parse_template_expression(),
            ThisKeyword | SuperKeyword | NullKeyword | TrueKeyword | FalseKeyword => {
                let kind = self.token();
                self.next_token();
                self.finish_node(start, NodeData::Keyword { kind })
            }
            ImportKeyword => {
                self.next_token();
                if self.is_token(DotToken) {
                    self.next_token();
                    let name = self.parse_identifier_name();
                    return self.finish_node(
                        start,
                        NodeData::MetaProperty {
                            keyword: ImportKeyword,
                            name,
                        },
                    );
                }
                self.finish_node(start, NodeData::Keyword { kind: ImportKeyword })
            }
            OpenParenToken => self.parse_parenthesized_expression(),
            LessThanToken if self.is_jsx() => self.parse_jsx_element_or_fragment(false),
            OpenBracketToken => self.parse_array_literal_expression(),
            OpenBraceToken => self.parse_object_literal_expression(),
            AsyncKeyword if self.next_token_is(|p| {
                !p.has_preceding_line_break() && p.is_token(FunctionKeyword)
            }) =>
            {
                self.next_token();
                self.parse_function_expression(start, ModifierFlags::ASYNC)
            }
            FunctionKeyword => self.parse_function_expression(start, ModifierFlags::empty()),
            ClassKeyword => self.parse_class(start, ModifierFlags::empty(), Vec::new(), true),
            AtToken => {
                let decorators = self.parse_decorators();
                self.parse_class(start, ModifierFlags::empty(), decorators, true)
            }
            SlashToken | SlashEqualsToken => {
                self.re_scan_slash_token();
                self.parse_literal_node()
            }
            PrivateIdentifier => self.parse_identifier_name(),
            _ if self.is_identifier() => self.parse_identifier(),
            _ => {
                self.parse_error_at_current_token(
                    diagnostic_messages::EXPRESSION_EXPECTED,
                    diagnostic_codes::EXPRESSION_EXPECTED,
                );
                self.create_missing_identifier()
            }
        }
    }

    fn parse_parenthesized_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.do_inside_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| p.parse_expression());
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.finish_node(start, NodeData::ParenthesizedExpression { expression })
    }

    fn parse_function_expression(&mut self, start: u32, modifiers: ModifierFlags) -> NodeIndex {
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let asterisk = self.parse_optional(SyntaxKind::AsteriskToken);
        let name = if self.is_identifier() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let function = self.parse_function_rest(modifiers, Vec::new(), asterisk, name, false);
        self.finish_node(start, NodeData::FunctionExpression(function))
    }

    /// `` `a${b}c` `` starting at a `TemplateHead` or a no-substitution template.
    pub(crate) fn parse_template_expression(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        if self.is_token(NoSubstitutionTemplateLiteral) {
            return self.parse_literal_node();
        }
        let head = self.parse_literal_node();
        let mut spans = Vec::new();
        loop {
            let span_start = self.token_pos();
            let expression = self.do_inside_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| p.parse_expression());
            if !self.is_token(CloseBraceToken) {
                self.error_token_expected("}");
                break;
            }
            self.re_scan_template_token();
            let is_tail = self.is_token(TemplateTail);
            let literal = self.parse_literal_node();
            spans.push(self.finish_node(span_start, NodeData::TemplateSpan { expression, literal }));
            if is_tail {
                break;
            }
        }
        self.finish_node(start, NodeData::TemplateExpression { head, spans })
    }

    fn parse_array_literal_expression(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        self.parse_expected(OpenBracketToken);
        let multi_line = self.has_preceding_line_break();
        let mut elements = Vec::new();
        self.do_inside_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
            while !p.is_token(CloseBracketToken) && !p.is_token(EndOfFileToken) {
                if p.is_token(CommaToken) {
                    let hole_start = p.token_pos();
                    elements.push(p.arena.add(tsz_common::Span::at(hole_start), NodeData::OmittedExpression));
                    p.next_token();
                    continue;
                }
                let before = p.token_pos();
                elements.push(p.parse_argument_or_array_element());
                if !p.parse_optional(CommaToken) {
                    if !p.is_token(CloseBracketToken) && p.token_pos() != before {
                        p.error_token_expected(",");
                        continue;
                    }
                    break;
                }
            }
        });
        self.parse_expected(CloseBracketToken);
        self.finish_node(start, NodeData::ArrayLiteralExpression { elements, multi_line })
    }

    pub(crate) fn parse_object_literal_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let multi_line = self.has_preceding_line_break();
        let properties = self.do_inside_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
            p.parse_delimited_list(SyntaxKind::CloseBraceToken, |p| p.parse_object_literal_element())
        });
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(
            start,
            NodeData::ObjectLiteralExpression {
                properties,
                multi_line,
            },
        )
    }

    fn parse_object_literal_element(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        if self.parse_optional(DotDotDotToken) {
            let expression = self.parse_assignment_expression_or_higher();
            return self.finish_node(start, NodeData::SpreadAssignment { expression });
        }

        let is_property_name_start = |p: &mut ParserState| {
            !p.has_preceding_line_break()
                && (token_is_identifier_or_keyword(p.token())
                    || matches!(
                        p.token(),
                        StringLiteral | NumericLiteral | BigIntLiteral | OpenBracketToken
                            | PrivateIdentifier | AsteriskToken
                    ))
        };

        // get/set accessors
        if matches!(self.token(), GetKeyword | SetKeyword) && self.next_token_is(is_property_name_start) {
            let is_get = self.is_token(GetKeyword);
            self.next_token();
            let name = self.parse_property_name();
            let function =
                self.parse_function_rest(ModifierFlags::empty(), Vec::new(), false, name, false);
            let data = if is_get {
                NodeData::GetAccessor(function)
            } else {
                NodeData::SetAccessor(function)
            };
            return self.finish_node(start, data);
        }

        let mut modifiers = ModifierFlags::empty();
        if self.is_token(AsyncKeyword) && self.next_token_is(is_property_name_start) {
            self.next_token();
            modifiers |= ModifierFlags::ASYNC;
        }
        let asterisk = self.parse_optional(AsteriskToken);
        let name_is_identifier = self.is_identifier();
        let name = self.parse_property_name();
        let question = self.parse_optional(QuestionToken);

        if asterisk || !modifiers.is_empty() || matches!(self.token(), OpenParenToken | LessThanToken) {
            let function = self.parse_function_rest(modifiers, Vec::new(), asterisk, name, question);
            return self.finish_node(start, NodeData::MethodDeclaration(function));
        }

        if name_is_identifier && !self.is_token(ColonToken) {
            // { a } or { a = 1 } in a destructuring assignment target
            let initializer = self.parse_initializer();
            return self.finish_node(start, NodeData::ShorthandPropertyAssignment { name, initializer });
        }

        self.parse_expected(ColonToken);
        let initializer = self.parse_assignment_expression_or_higher();
        self.finish_node(start, NodeData::PropertyAssignment { name, initializer })
    }

    // =========================================================================
    // JSX
    // =========================================================================

    /// `<tag ...>...</tag>`, `<tag ... />` or `<>...</>` at the current `<`.
    /// When `in_children` is set the element is itself a child, so the token
    /// after its last `>` is scanned as element content.
    fn parse_jsx_element_or_fragment(&mut self, in_children: bool) -> NodeIndex {
        self.nested(|p| p.parse_jsx_element_worker(in_children))
    }

    fn parse_jsx_element_worker(&mut self, in_children: bool) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        self.next_token();
        if self.is_token(GreaterThanToken) {
            return self.parse_jsx_fragment_rest(start, in_children);
        }

        let tag_name = self.parse_jsx_tag_name();
        let type_arguments = if self.is_token(LessThanToken) {
            self.parse_type_arguments()
        } else {
            Vec::new()
        };
        let attributes = self.parse_jsx_attributes();
        if self.parse_optional(SlashToken) {
            self.parse_jsx_tag_end(in_children);
            return self.finish_node(
                start,
                NodeData::JsxSelfClosingElement {
                    tag_name,
                    type_arguments,
                    attributes,
                },
            );
        }
        self.parse_jsx_tag_end(true);
        let opening = self.finish_node(
            start,
            NodeData::JsxOpeningElement {
                tag_name,
                type_arguments,
                attributes,
            },
        );

        let children = self.parse_jsx_children();
        let closing = if self.is_token(LessThanSlashToken) {
            let closing_start = self.token_pos();
            self.next_token();
            let closing_tag = self.parse_jsx_tag_name();
            let opening_text = self.arena.jsx_tag_name_text(tag_name);
            if self.arena.jsx_tag_name_text(closing_tag) != opening_text {
                let span = self.arena.span(closing_tag);
                self.parse_error_at(
                    span.start,
                    span.len(),
                    &format_message(
                        diagnostic_messages::EXPECTED_CORRESPONDING_JSX_CLOSING_TAG,
                        &[opening_text.as_str()],
                    ),
                    diagnostic_codes::EXPECTED_CORRESPONDING_JSX_CLOSING_TAG,
                );
            }
            self.parse_jsx_tag_end(in_children);
            self.finish_node(closing_start, NodeData::JsxClosingElement { tag_name: closing_tag })
        } else {
            let span = self.arena.span(tag_name);
            let opening_text = self.arena.jsx_tag_name_text(tag_name);
            self.parse_error_at(
                span.start,
                span.len(),
                &format_message(
                    diagnostic_messages::JSX_ELEMENT_HAS_NO_CORRESPONDING_CLOSING_TAG,
                    &[opening_text.as_str()],
                ),
                diagnostic_codes::JSX_ELEMENT_HAS_NO_CORRESPONDING_CLOSING_TAG,
            );
            NodeIndex::NONE
        };
        self.finish_node(
            start,
            NodeData::JsxElement {
                opening,
                children,
                closing,
            },
        )
    }

    /// The rest of `<>...</>` after `<`; the current token is `>`.
    fn parse_jsx_fragment_rest(&mut self, start: u32, in_children: bool) -> NodeIndex {
        use SyntaxKind::*;
        self.next_jsx_token();
        let children = self.parse_jsx_children();
        if self.is_token(LessThanSlashToken) {
            self.next_token();
            if !self.is_token(GreaterThanToken) {
                self.parse_error_at_current_token(
                    diagnostic_messages::EXPECTED_CORRESPONDING_CLOSING_TAG_FOR_JSX_FRAGMENT,
                    diagnostic_codes::EXPECTED_CORRESPONDING_CLOSING_TAG_FOR_JSX_FRAGMENT,
                );
                if token_is_identifier_or_keyword(self.token()) {
                    self.parse_jsx_tag_name();
                }
            }
            self.parse_jsx_tag_end(in_children);
        } else {
            self.parse_error_at(
                start,
                2,
                diagnostic_messages::JSX_FRAGMENT_HAS_NO_CORRESPONDING_CLOSING_TAG,
                diagnostic_codes::JSX_FRAGMENT_HAS_NO_CORRESPONDING_CLOSING_TAG,
            );
        }
        self.finish_node(start, NodeData::JsxFragment { children })
    }

    /// Consume the `>` that ends a tag.
    fn parse_jsx_tag_end(&mut self, in_children: bool) {
        if !self.is_token(SyntaxKind::GreaterThanToken) {
            self.error_token_expected(">");
            return;
        }
        if in_children {
            self.next_jsx_token();
        } else {
            self.next_token();
        }
    }

    /// Children up to (not including) the closing `</`.
    fn parse_jsx_children(&mut self) -> NodeList {
        use SyntaxKind::*;
        let mut children = Vec::new();
        loop {
            match self.token() {
                JsxText => {
                    let start = self.token_pos();
                    let text = self.token_value();
                    self.next_jsx_token();
                    children.push(self.finish_node(start, NodeData::JsxText { text }));
                }
                OpenBraceToken => children.push(self.parse_jsx_expression_container(true)),
                LessThanToken => children.push(self.parse_jsx_element_or_fragment(true)),
                _ => return children,
            }
        }
    }

    /// `div`, `my-element`, `Foo.Bar`, `this.x` or `svg:rect`.
    fn parse_jsx_tag_name(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        let mut expression = if self.is_token(ThisKeyword) {
            self.next_token();
            self.finish_node(start, NodeData::Keyword { kind: ThisKeyword })
        } else {
            let name = self.parse_jsx_identifier();
            if self.parse_optional(ColonToken) {
                let local = self.parse_jsx_identifier();
                return self.finish_node(
                    start,
                    NodeData::JsxNamespacedName {
                        namespace: name,
                        name: local,
                    },
                );
            }
            name
        };
        while self.parse_optional(DotToken) {
            let name = self.parse_identifier_name();
            expression = self.finish_node(
                start,
                NodeData::PropertyAccessExpression {
                    expression,
                    question_dot: false,
                    name,
                },
            );
        }
        expression
    }

    /// An identifier that may contain `-`.
    fn parse_jsx_identifier(&mut self) -> NodeIndex {
        if token_is_identifier_or_keyword(self.token()) {
            self.scan_jsx_identifier();
        }
        self.parse_identifier_name()
    }

    fn parse_jsx_attributes(&mut self) -> NodeList {
        use SyntaxKind::*;
        let mut attributes = Vec::new();
        loop {
            if self.is_token(OpenBraceToken) {
                let start = self.token_pos();
                self.next_token();
                self.parse_expected(DotDotDotToken);
                let expression = self.do_inside_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
                    p.parse_assignment_expression_or_higher()
                });
                self.parse_expected(CloseBraceToken);
                attributes.push(self.finish_node(start, NodeData::JsxSpreadAttribute { expression }));
            } else if token_is_identifier_or_keyword(self.token()) {
                attributes.push(self.parse_jsx_attribute());
            } else {
                return attributes;
            }
        }
    }

    fn parse_jsx_attribute(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        let mut name = self.parse_jsx_identifier();
        if self.parse_optional(ColonToken) {
            let local = self.parse_jsx_identifier();
            name = self.finish_node(
                start,
                NodeData::JsxNamespacedName {
                    namespace: name,
                    name: local,
                },
            );
        }
        let initializer = if self.parse_optional(EqualsToken) {
            match self.token() {
                StringLiteral => {
                    self.re_scan_jsx_attribute_value();
                    self.parse_literal_node()
                }
                OpenBraceToken => {
                    let value = self.parse_jsx_expression_container(false);
                    let empty = matches!(
                        self.arena.data(value),
                        Some(NodeData::JsxExpression { expression, .. }) if expression.is_none()
                    );
                    if empty {
                        let span = self.arena.span(value);
                        self.parse_error_at(
                            span.start,
                            span.len(),
                            diagnostic_messages::JSX_ATTRIBUTES_MUST_BE_NON_EMPTY_EXPRESSION,
                            diagnostic_codes::JSX_ATTRIBUTES_MUST_BE_NON_EMPTY_EXPRESSION,
                        );
                    }
                    value
                }
                LessThanToken => self.parse_jsx_element_or_fragment(false),
                _ => {
                    self.parse_error_at_current_token(
                        diagnostic_messages::EXPRESSION_EXPECTED,
                        diagnostic_codes::EXPRESSION_EXPECTED,
                    );
                    NodeIndex::NONE
                }
            }
        } else {
            NodeIndex::NONE
        };
        self.finish_node(start, NodeData::JsxAttribute { name, initializer })
    }

    /// `{expr}`, `{}` or (as a child) `{...expr}` at the current `{`.
    fn parse_jsx_expression_container(&mut self, in_children: bool) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        self.next_token();
        let dot_dot_dot = in_children && self.parse_optional(DotDotDotToken);
        let expression = if self.is_token(CloseBraceToken) {
            NodeIndex::NONE
        } else {
            self.do_inside_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| p.parse_expression())
        };
        if self.is_token(CloseBraceToken) {
            if in_children {
                self.next_jsx_token();
            } else {
                self.next_token();
            }
        } else {
            self.error_token_expected("}");
        }
        self.finish_node(
            start,
            NodeData::JsxExpression {
                dot_dot_dot,
                expression,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::binary_operator_precedence;
    use tsz_scanner::SyntaxKind;

    #[test]
    fn test_precedence_ordering() {
        assert!(
            binary_operator_precedence(SyntaxKind::AsteriskToken)
                > binary_operator_precedence(SyntaxKind::PlusToken)
        );
        assert!(
            binary_operator_precedence(SyntaxKind::AmpersandAmpersandToken)
                > binary_operator_precedence(SyntaxKind::BarBarToken)
        );
        assert_eq!(binary_operator_precedence(SyntaxKind::EqualsToken), 0);
    }
}
