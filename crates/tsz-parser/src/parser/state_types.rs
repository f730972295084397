//! Parser state - type annotation parsing methods

use tsz_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use tsz_scanner::{SyntaxKind, token_is_identifier_or_keyword};

use super::node::{ModifierFlags, NodeData, NodeIndex, NodeList, SignatureData};
use super::state::{CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES, ParserState};

impl ParserState {
    /// `: Type` if present.
    pub(crate) fn parse_type_annotation(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        }
    }

    pub fn parse_type(&mut self) -> NodeIndex {
        self.nested(|p| {
            p.do_inside_context(0, CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES, |p| {
                p.parse_type_worker()
            })
        })
    }

    fn parse_type_worker(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        if let Some(function_type) = self.try_parse_function_type() {
            return function_type;
        }
        let check_type = self.parse_union_type_or_higher();
        if !self.in_context(CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES)
            && !self.has_preceding_line_break()
            && self.parse_optional(ExtendsKeyword)
        {
            let extends_type = self.do_inside_context(CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES, 0, |p| {
                p.parse_type_in_extends_clause()
            });
            self.parse_expected(QuestionToken);
            let true_type = self.parse_type();
            self.parse_expected(ColonToken);
            let false_type = self.parse_type();
            return self.finish_node(
                start,
                NodeData::ConditionalType {
                    check_type,
                    extends_type,
                    true_type,
                    false_type,
                },
            );
        }
        check_type
    }

    /// The extends operand of a conditional type cannot itself be an
    /// unparenthesized conditional type.
    fn parse_type_in_extends_clause(&mut self) -> NodeIndex {
        self.nested(|p| match p.try_parse_function_type() {
            Some(function_type) => function_type,
            None => p.parse_union_type_or_higher(),
        })
    }

    // =========================================================================
    // Function and constructor types
    // =========================================================================

    fn try_parse_function_type(&mut self) -> Option<NodeIndex> {
        use SyntaxKind::*;
        match self.token() {
            LessThanToken | OpenParenToken => self.try_parse(|p| p.parse_function_type(false)),
            NewKeyword => Some(self.parse_function_type(true).unwrap_or(NodeIndex::NONE)),
            AbstractKeyword if self.next_token_is_kind(NewKeyword) => {
                self.next_token();
                Some(self.parse_function_type(true).unwrap_or(NodeIndex::NONE))
            }
            _ => None,
        }
    }

    fn parse_function_type(&mut self, is_constructor: bool) -> Option<NodeIndex> {
        let start = self.token_pos();
        if is_constructor {
            self.parse_expected(SyntaxKind::NewKeyword);
        }
        let type_parameters = self.parse_type_parameters();
        if !self.is_token(SyntaxKind::OpenParenToken) {
            return None;
        }
        let parameters = self.parse_parameters();
        if !self.parse_optional(SyntaxKind::EqualsGreaterThanToken) {
            if is_constructor {
                self.error_token_expected("=>");
            } else {
                return None;
            }
        }
        let return_type = self.parse_return_type();
        let signature = SignatureData {
            type_parameters,
            parameters,
            return_type,
        };
        let data = if is_constructor {
            NodeData::ConstructorType(signature)
        } else {
            NodeData::FunctionType(signature)
        };
        Some(self.finish_node(start, data))
    }

    /// A return type, which may be a type predicate (`x is T`,
    /// `asserts x is T`, `asserts x`).
    pub(crate) fn parse_return_type(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        if self.is_token(AssertsKeyword)
            && self.next_token_is(|p| {
                !p.has_preceding_line_break() && (p.is_identifier() || p.is_token(ThisKeyword))
            })
        {
            self.next_token();
            let parameter_name = self.parse_predicate_parameter_name();
            let type_node = if self.parse_optional(IsKeyword) {
                self.parse_type()
            } else {
                NodeIndex::NONE
            };
            return self.finish_node(
                start,
                NodeData::TypePredicate {
                    asserts: true,
                    parameter_name,
                    type_node,
                },
            );
        }
        if (self.is_identifier() || self.is_token(ThisKeyword))
            && self.next_token_is(|p| !p.has_preceding_line_break() && p.is_token(IsKeyword))
        {
            let parameter_name = self.parse_predicate_parameter_name();
            self.parse_expected(IsKeyword);
            let type_node = self.parse_type();
            return self.finish_node(
                start,
                NodeData::TypePredicate {
                    asserts: false,
                    parameter_name,
                    type_node,
                },
            );
        }
        self.parse_type()
    }

    fn parse_predicate_parameter_name(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::ThisKeyword) {
            let start = self.token_pos();
            self.next_token();
            return self.finish_node(
                start,
                NodeData::KeywordType {
                    kind: SyntaxKind::ThisKeyword,
                },
            );
        }
        self.parse_identifier()
    }

    // =========================================================================
    // Union, intersection and operators
    // =========================================================================

    fn parse_union_type_or_higher(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let leading = self.parse_optional(SyntaxKind::BarToken);
        let first = self.parse_intersection_type_or_higher();
        if !self.is_token(SyntaxKind::BarToken) {
            if leading {
                return self.finish_node(start, NodeData::UnionType { types: vec![first] });
            }
            return first;
        }
        let mut types = vec![first];
        while self.parse_optional(SyntaxKind::BarToken) {
            types.push(self.parse_intersection_type_or_higher());
        }
        self.finish_node(start, NodeData::UnionType { types })
    }

    fn parse_intersection_type_or_higher(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let leading = self.parse_optional(SyntaxKind::AmpersandToken);
        let first = self.parse_type_operator_or_higher();
        if !self.is_token(SyntaxKind::AmpersandToken) {
            if leading {
                return self.finish_node(start, NodeData::IntersectionType { types: vec![first] });
            }
            return first;
        }
        let mut types = vec![first];
        while self.parse_optional(SyntaxKind::AmpersandToken) {
            types.push(self.parse_type_operator_or_higher());
        }
        self.finish_node(start, NodeData::IntersectionType { types })
    }

    fn parse_type_operator_or_higher(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        match self.token() {
            KeyOfKeyword | UniqueKeyword | ReadonlyKeyword => {
                let operator = self.token();
                self.next_token();
                let type_node = self.nested(|p| p.parse_type_operator_or_higher());
                self.finish_node(start, NodeData::TypeOperator { operator, type_node })
            }
            InferKeyword => {
                self.next_token();
                let param_start = self.token_pos();
                let name = self.parse_identifier();
                let constraint = if self.is_token(ExtendsKeyword)
                    && self.look_ahead(|p| {
                        // `infer U extends X ?` is the outer conditional; only
                        // treat `extends` as a constraint when no `?` follows
                        p.next_token();
                        p.do_inside_context(CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES, 0, |p| {
                            p.parse_type_in_extends_clause()
                        });
                        !p.is_token(QuestionToken)
                    }) {
                    self.next_token();
                    self.do_inside_context(CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES, 0, |p| {
                        p.parse_type_in_extends_clause()
                    })
                } else {
                    NodeIndex::NONE
                };
                let type_parameter = self.finish_node(
                    param_start,
                    NodeData::TypeParameter {
                        modifiers: ModifierFlags::empty(),
                        name,
                        constraint,
                        default: NodeIndex::NONE,
                    },
                );
                self.finish_node(start, NodeData::InferType { type_parameter })
            }
            _ => self.parse_postfix_type_or_higher(),
        }
    }

    fn parse_postfix_type_or_higher(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        let mut type_node = self.parse_non_array_type();
        while self.is_token(OpenBracketToken) && !self.has_preceding_line_break() {
            self.next_token();
            if self.parse_optional(CloseBracketToken) {
                type_node = self.finish_node(start, NodeData::ArrayType { element_type: type_node });
            } else {
                let index_type = self.parse_type();
                self.parse_expected(CloseBracketToken);
                type_node = self.finish_node(
                    start,
                    NodeData::IndexedAccessType {
                        object_type: type_node,
                        index_type,
                    },
                );
            }
        }
        type_node
    }

    // =========================================================================
    // Primary types
    // =========================================================================

    fn parse_non_array_type(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        match self.token() {
            AnyKeyword | UnknownKeyword | NumberKeyword | BigIntKeyword | BooleanKeyword
            | StringKeyword | SymbolKeyword | ObjectKeyword | NeverKeyword | UndefinedKeyword
                if !self.next_token_is_kind(DotToken) =>
            {
                self.parse_keyword_type()
            }
            VoidKeyword | NullKeyword | ThisKeyword => self.parse_keyword_type(),
            StringLiteral | NumericLiteral | BigIntLiteral | NoSubstitutionTemplateLiteral => {
                let literal = self.parse_literal_node();
                self.finish_node(start, NodeData::LiteralType { literal })
            }
            TrueKeyword | FalseKeyword => {
                let kind = self.token();
                self.next_token();
                let literal = self.finish_node(start, NodeData::Keyword { kind });
                self.finish_node(start, NodeData::LiteralType { literal })
            }
            MinusToken if self.next_token_is(|p| {
                matches!(p.token(), NumericLiteral | BigIntLiteral)
            }) =>
            {
                self.next_token();
                let operand = self.parse_literal_node();
                let literal = self.finish_node(
                    start,
                    NodeData::PrefixUnaryExpression {
                        operator: MinusToken,
                        operand,
                    },
                );
                self.finish_node(start, NodeData::LiteralType { literal })
            }
            TemplateHead => self.parse_template_literal_type(),
            TypeOfKeyword => self.parse_type_query(),
            ImportKeyword => self.parse_import_type(),
            OpenBraceToken => {
                if self.is_start_of_mapped_type() {
                    self.parse_mapped_type()
                } else {
                    let members = self.parse_object_type_members();
                    self.finish_node(start, NodeData::TypeLiteral { members })
                }
            }
            OpenBracketToken => self.parse_tuple_type(),
            // `as const`
            ConstKeyword => {
                let type_name = self.parse_identifier_name();
                self.finish_node(
                    start,
                    NodeData::TypeReference {
                        type_name,
                        type_arguments: Vec::new(),
                    },
                )
            }
            OpenParenToken => {
                self.next_token();
                let type_node = self.parse_type();
                self.parse_expected(CloseParenToken);
                self.finish_node(start, NodeData::ParenthesizedType { type_node })
            }
            _ if token_is_identifier_or_keyword(self.token()) && !self.is_reserved_type_start() => {
                self.parse_type_reference()
            }
            _ => {
                self.parse_error_at_current_token(
                    diagnostic_messages::TYPE_EXPECTED,
                    diagnostic_codes::TYPE_EXPECTED,
                );
                self.arena.add(
                    tsz_common::Span::at(start),
                    NodeData::KeywordType { kind: AnyKeyword },
                )
            }
        }
    }

    /// Reserved words that cannot name a type.
    fn is_reserved_type_start(&self) -> bool {
        tsz_scanner::token_is_reserved_word(self.token())
    }

    fn parse_keyword_type(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let kind = self.token();
        self.next_token();
        self.finish_node(start, NodeData::KeywordType { kind })
    }

    fn parse_type_reference(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let type_name = self.parse_entity_name();
        let type_arguments = if self.is_token(SyntaxKind::LessThanToken) && !self.has_preceding_line_break() {
            self.parse_type_arguments()
        } else {
            Vec::new()
        };
        self.finish_node(
            start,
            NodeData::TypeReference {
                type_name,
                type_arguments,
            },
        )
    }

    /// `A.B.C` as a chain of `QualifiedName` nodes.
    pub(crate) fn parse_entity_name(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut name = if token_is_identifier_or_keyword(self.token()) && !self.is_reserved_type_start() {
            self.parse_identifier_name()
        } else {
            self.parse_identifier()
        };
        while self.is_token(SyntaxKind::DotToken) {
            self.next_token();
            let right = self.parse_identifier_name();
            name = self.finish_node(start, NodeData::QualifiedName { left: name, right });
        }
        name
    }

    fn parse_type_query(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::TypeOfKeyword);
        let expr_name = if self.is_token(SyntaxKind::ImportKeyword) {
            self.parse_import_type()
        } else {
            let name_start = self.token_pos();
            let mut name = if self.is_token(SyntaxKind::ThisKeyword) {
                self.next_token();
                self.finish_node(
                    name_start,
                    NodeData::Identifier {
                        text: "this".to_string(),
                    },
                )
            } else {
                self.parse_identifier()
            };
            while self.is_token(SyntaxKind::DotToken) {
                self.next_token();
                let right = self.parse_identifier_name();
                name = self.finish_node(name_start, NodeData::QualifiedName { left: name, right });
            }
            name
        };
        let type_arguments = if self.is_token(SyntaxKind::LessThanToken) && !self.has_preceding_line_break() {
            self.parse_type_arguments()
        } else {
            Vec::new()
        };
        self.finish_node(
            start,
            NodeData::TypeQuery {
                expr_name,
                type_arguments,
            },
        )
    }

    /// `import("mod").Name<T>`
    fn parse_import_type(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        self.parse_expected(ImportKeyword);
        self.parse_expected(OpenParenToken);
        let argument = if self.is_token(StringLiteral) {
            self.parse_literal_node()
        } else {
            self.parse_error_at_current_token(
                diagnostic_messages::TYPE_EXPECTED,
                diagnostic_codes::TYPE_EXPECTED,
            );
            NodeIndex::NONE
        };
        self.parse_expected(CloseParenToken);
        let qualifier = if self.parse_optional(DotToken) {
            self.parse_entity_name()
        } else {
            NodeIndex::NONE
        };
        let type_arguments = if self.is_token(LessThanToken) && !self.has_preceding_line_break() {
            self.parse_type_arguments()
        } else {
            Vec::new()
        };
        self.finish_node(
            start,
            NodeData::ImportType {
                argument,
                qualifier,
                type_arguments,
            },
        )
    }

    fn parse_template_literal_type(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        self.next_token();
        let mut types = Vec::new();
        loop {
            types.push(self.parse_type());
            if !self.is_token(CloseBraceToken) {
                self.error_token_expected("}");
                break;
            }
            self.re_scan_template_token();
            let is_tail = self.is_token(TemplateTail);
            self.next_token();
            if is_tail {
                break;
            }
        }
        self.finish_node(start, NodeData::TemplateLiteralType { types })
    }

    fn parse_tuple_type(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        self.parse_expected(OpenBracketToken);
        let elements = self.parse_delimited_list(CloseBracketToken, |p| {
            let element_start = p.token_pos();
            let is_named = p.look_ahead(|p| {
                p.parse_optional(DotDotDotToken);
                if !token_is_identifier_or_keyword(p.token()) {
                    return false;
                }
                p.next_token();
                p.parse_optional(QuestionToken);
                p.is_token(ColonToken)
            });
            if is_named {
                let dot_dot_dot = p.parse_optional(DotDotDotToken);
                let name = p.parse_identifier_name();
                let question = p.parse_optional(QuestionToken);
                p.parse_expected(ColonToken);
                let type_node = p.parse_type();
                return p.finish_node(
                    element_start,
                    NodeData::NamedTupleMember {
                        dot_dot_dot,
                        name,
                        question,
                        type_node,
                    },
                );
            }
            if p.parse_optional(DotDotDotToken) {
                let type_node = p.parse_type();
                return p.finish_node(element_start, NodeData::RestType { type_node });
            }
            let type_node = p.parse_type();
            if p.parse_optional(QuestionToken) {
                return p.finish_node(element_start, NodeData::OptionalType { type_node });
            }
            type_node
        });
        self.parse_expected(CloseBracketToken);
        self.finish_node(start, NodeData::TupleType { elements })
    }

    // =========================================================================
    // Mapped types
    // =========================================================================

    fn is_start_of_mapped_type(&mut self) -> bool {
        use SyntaxKind::*;
        self.look_ahead(|p| {
            p.next_token();
            if matches!(p.token(), PlusToken | MinusToken) {
                p.next_token();
                if !p.is_token(ReadonlyKeyword) {
                    return false;
                }
            }
            if p.is_token(ReadonlyKeyword) {
                p.next_token();
            }
            if !p.parse_optional(OpenBracketToken) {
                return false;
            }
            if !p.is_identifier() {
                return false;
            }
            p.next_token();
            p.is_token(InKeyword)
        })
    }

    fn parse_mapped_type(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        self.parse_expected(OpenBraceToken);
        if matches!(self.token(), PlusToken | MinusToken) {
            self.next_token();
        }
        self.parse_optional(ReadonlyKeyword);
        self.parse_expected(OpenBracketToken);
        let param_start = self.token_pos();
        let name = self.parse_identifier();
        self.parse_expected(InKeyword);
        let constraint = self.parse_type();
        let type_parameter = self.finish_node(
            param_start,
            NodeData::TypeParameter {
                modifiers: ModifierFlags::empty(),
                name,
                constraint,
                default: NodeIndex::NONE,
            },
        );
        let name_type = if self.parse_optional(AsKeyword) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        self.parse_expected(CloseBracketToken);
        if matches!(self.token(), PlusToken | MinusToken) {
            self.next_token();
            self.parse_expected(QuestionToken);
        } else {
            self.parse_optional(QuestionToken);
        }
        let type_node = self.parse_type_annotation();
        self.parse_optional(SemicolonToken);
        self.parse_optional(CommaToken);
        self.parse_expected(CloseBraceToken);
        self.finish_node(
            start,
            NodeData::MappedType {
                type_parameter,
                name_type,
                type_node,
            },
        )
    }

    // =========================================================================
    // Object type members (interfaces and type literals)
    // =========================================================================

    /// `{ member; member, ... }`
    pub(crate) fn parse_object_type_members(&mut self) -> NodeList {
        use SyntaxKind::*;
        if !self.parse_expected(OpenBraceToken) {
            return Vec::new();
        }
        let mut members = Vec::new();
        while !self.is_token(CloseBraceToken) && !self.is_token(EndOfFileToken) {
            let before = self.token_pos();
            let member = self.parse_type_member();
            if member.is_some() {
                members.push(member);
            }
            if !self.parse_optional(SemicolonToken) && !self.parse_optional(CommaToken) {
                if !self.is_token(CloseBraceToken) && !self.has_preceding_line_break() {
                    self.error_token_expected(";");
                }
            }
            if self.token_pos() == before {
                self.next_token();
            }
        }
        self.parse_expected(CloseBraceToken);
        members
    }

    fn parse_type_member(&mut self) -> NodeIndex {
        self.nested(|p| p.parse_type_member_worker())
    }

    fn parse_type_member_worker(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        if matches!(self.token(), OpenParenToken | LessThanToken) {
            let signature = self.parse_signature_member();
            self.finish_node(start, NodeData::CallSignature(signature))
        } else if self.is_token(NewKeyword)
            && self.next_token_is(|p| matches!(p.token(), OpenParenToken | LessThanToken))
        {
            self.next_token();
            let signature = self.parse_signature_member();
            self.finish_node(start, NodeData::ConstructSignature(signature))
        } else {
            let mut modifiers = ModifierFlags::empty();
            if self.is_token(ReadonlyKeyword)
                && self.next_token_is(|p| {
                    token_is_identifier_or_keyword(p.token())
                        || matches!(p.token(), OpenBracketToken | StringLiteral | NumericLiteral)
                })
            {
                self.next_token();
                modifiers |= ModifierFlags::READONLY;
            }
            if self.is_token(OpenBracketToken) && self.is_index_signature() {
                self.parse_index_signature(start, modifiers)
            } else {
                if matches!(self.token(), GetKeyword | SetKeyword)
                    && self.next_token_is(|p| {
                        token_is_identifier_or_keyword(p.token())
                            || matches!(p.token(), OpenBracketToken | StringLiteral | NumericLiteral)
                    })
                {
                    // Accessor signatures are treated as method signatures
                    self.next_token();
                }
                let name = self.parse_property_name();
                let question = self.parse_optional(QuestionToken);
                if matches!(self.token(), OpenParenToken | LessThanToken) {
                    let signature = self.parse_signature_member();
                    self.finish_node(
                        start,
                        NodeData::MethodSignature {
                            name,
                            question,
                            signature,
                        },
                    )
                } else {
                    let type_annotation = self.parse_type_annotation();
                    self.finish_node(
                        start,
                        NodeData::PropertySignature {
                            modifiers,
                            name,
                            question,
                            type_annotation,
                        },
                    )
                }
            }
        }
    }

    fn parse_signature_member(&mut self) -> SignatureData {
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        let return_type = if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_return_type()
        } else {
            NodeIndex::NONE
        };
        SignatureData {
            type_parameters,
            parameters,
            return_type,
        }
    }

    /// `[key: K]` as opposed to a computed property name.
    pub(crate) fn is_index_signature(&mut self) -> bool {
        use SyntaxKind::*;
        self.look_ahead(|p| {
            p.next_token();
            if matches!(p.token(), DotDotDotToken | CloseBracketToken) {
                return true;
            }
            if !p.is_identifier() {
                return false;
            }
            p.next_token();
            matches!(p.token(), ColonToken | CommaToken)
        })
    }

    pub(crate) fn parse_index_signature(&mut self, start: u32, modifiers: ModifierFlags) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let parameters = self.parse_delimited_list(SyntaxKind::CloseBracketToken, |p| {
            let param_start = p.token_pos();
            let name = p.parse_identifier();
            let type_annotation = p.parse_type_annotation();
            p.finish_node(
                param_start,
                NodeData::Parameter(super::node::ParameterData {
                    modifiers: ModifierFlags::empty(),
                    decorators: Vec::new(),
                    dot_dot_dot: false,
                    name,
                    question: false,
                    type_annotation,
                    initializer: NodeIndex::NONE,
                }),
            )
        });
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let type_annotation = self.parse_type_annotation();
        self.finish_node(
            start,
            NodeData::IndexSignature {
                modifiers,
                parameters,
                type_annotation,
            },
        )
    }

    // =========================================================================
    // Type parameters and arguments
    // =========================================================================

    /// `<T extends U = D, ...>` if present.
    pub(crate) fn parse_type_parameters(&mut self) -> NodeList {
        use SyntaxKind::*;
        if !self.is_token(LessThanToken) {
            return Vec::new();
        }
        self.next_token();
        let parameters = self.parse_delimited_list(GreaterThanToken, |p| {
            let start = p.token_pos();
            let mut modifiers = ModifierFlags::empty();
            while matches!(p.token(), InKeyword | ConstKeyword)
                || (p.is_token(Identifier) && p.scanner.get_token_value() == "out" && p.next_token_is(|p| p.is_identifier()))
            {
                modifiers |= match p.token() {
                    InKeyword => ModifierFlags::IN,
                    ConstKeyword => ModifierFlags::CONST,
                    _ => ModifierFlags::OUT,
                };
                p.next_token();
            }
            let name = p.parse_identifier();
            let constraint = if p.parse_optional(ExtendsKeyword) {
                p.parse_type()
            } else {
                NodeIndex::NONE
            };
            let default = if p.parse_optional(EqualsToken) {
                p.parse_type()
            } else {
                NodeIndex::NONE
            };
            p.finish_node(
                start,
                NodeData::TypeParameter {
                    modifiers,
                    name,
                    constraint,
                    default,
                },
            )
        });
        self.parse_expected(GreaterThanToken);
        parameters
    }

    /// `<A, B>`; the current token must be `<`.
    pub(crate) fn parse_type_arguments(&mut self) -> NodeList {
        self.parse_expected(SyntaxKind::LessThanToken);
        let arguments = self.parse_delimited_list(SyntaxKind::GreaterThanToken, |p| p.parse_type());
        self.parse_expected(SyntaxKind::GreaterThanToken);
        arguments
    }
}
