//! Parser state - statement and declaration parsing methods

use tsz_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use tsz_scanner::{SyntaxKind, token_is_identifier_or_keyword};

use super::node::{
    ClassData, ExportDeclData, FunctionData, ImportDeclData, ModifierFlags, ModuleDeclData,
    NodeData, NodeIndex, NodeList, ParameterData, PropertyDeclarationData, VariableDeclarationData,
    VariableKind,
};
use super::state::{
    CONTEXT_FLAG_AMBIENT, CONTEXT_FLAG_ASYNC, CONTEXT_FLAG_DISALLOW_IN, CONTEXT_FLAG_GENERATOR,
    ParseDiagnostic, ParserState,
};

impl ParserState {
    // =========================================================================
    // Source file
    // =========================================================================

    /// Parse the whole source file and return the `SourceFile` node.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        let _span = tracing::debug_span!("parse_source_file", file = %self.file_name).entered();

        self.scanner.scan_shebang_trivia();
        self.next_token();

        let statements = self.parse_statement_list(false);

        // Scanner diagnostics come first at equal positions
        let scanner_diagnostics = self.scanner.take_diagnostics();
        for diag in scanner_diagnostics {
            let start = diag.pos as u32;
            if self.parse_diagnostics.iter().any(|d| d.start == start) {
                continue;
            }
            self.parse_diagnostics.push(ParseDiagnostic {
                start,
                length: diag.length as u32,
                message: diag.message.to_string(),
                code: diag.code,
            });
        }
        self.parse_diagnostics.sort_by_key(|d| d.start);

        let end = self.scanner.source_text().len() as u32;
        let root = self
            .arena
            .add(tsz_common::Span::new(0, end), NodeData::SourceFile { statements });
        tracing::debug!(
            nodes = self.arena.len(),
            errors = self.parse_diagnostics.len(),
            "parsed source file"
        );
        root
    }

    /// Parse statements until end of file, or until `}` when `in_block`.
    pub(crate) fn parse_statement_list(&mut self, in_block: bool) -> NodeList {
        let mut statements = Vec::new();
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::CloseBraceToken if in_block => break,
                _ => {}
            }
            let before = self.token_pos();
            let statement = self.parse_statement();
            if statement.is_some() {
                statements.push(statement);
            }
            if self.token_pos() == before && !self.is_token(SyntaxKind::EndOfFileToken) {
                // No progress: report and skip the offending token
                self.parse_error_at_current_token(
                    diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                );
                self.next_token();
            }
        }
        statements
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub fn parse_statement(&mut self) -> NodeIndex {
        self.nested(|p| p.parse_statement_worker())
    }

    fn parse_statement_worker(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        match self.token() {
            OpenBraceToken => self.parse_block(),
            SemicolonToken => {
                self.next_token();
                self.finish_node(start, NodeData::EmptyStatement)
            }
            VarKeyword => self.parse_variable_statement(start, ModifierFlags::empty()),
            LetKeyword if self.next_token_starts_binding() => {
                self.parse_variable_statement(start, ModifierFlags::empty())
            }
            ConstKeyword if !self.next_token_is_kind(EnumKeyword) => {
                self.parse_variable_statement(start, ModifierFlags::empty())
            }
            FunctionKeyword => {
                self.parse_function_declaration(start, ModifierFlags::empty(), Vec::new())
            }
            ClassKeyword => self.parse_class(start, ModifierFlags::empty(), Vec::new(), false),
            IfKeyword => self.parse_if_statement(),
            DoKeyword => self.parse_do_statement(),
            WhileKeyword => self.parse_while_statement(),
            ForKeyword => self.parse_for_statement(),
            ContinueKeyword | BreakKeyword => self.parse_break_or_continue_statement(),
            ReturnKeyword => self.parse_return_statement(),
            SwitchKeyword => self.parse_switch_statement(),
            ThrowKeyword => self.parse_throw_statement(),
            TryKeyword => self.parse_try_statement(),
            DebuggerKeyword => {
                self.next_token();
                self.parse_semicolon();
                self.finish_node(start, NodeData::DebuggerStatement)
            }
            ImportKeyword
                if !self.next_token_is(|p| {
                    matches!(p.token(), OpenParenToken | DotToken | LessThanToken)
                }) =>
            {
                self.parse_declaration()
            }
            _ if self.is_start_of_declaration() => self.parse_declaration(),
            _ if self.is_identifier() && self.next_token_is_kind(ColonToken) => {
                self.parse_labeled_statement()
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// `let` starts a declaration only when a binding follows it.
    fn next_token_starts_binding(&mut self) -> bool {
        self.next_token_is(|p| {
            p.is_identifier()
                || matches!(
                    p.token(),
                    SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken
                )
        })
    }

    /// Whether the current token begins a declaration that takes modifiers.
    fn is_start_of_declaration(&mut self) -> bool {
        use SyntaxKind::*;
        match self.token() {
            AtToken | ExportKeyword | EnumKeyword | ConstKeyword => true,
            InterfaceKeyword | TypeKeyword => self.next_token_is_identifier_on_same_line(),
            NamespaceKeyword | ModuleKeyword => self.next_token_is(|p| {
                !p.has_preceding_line_break()
                    && (p.is_identifier() || p.is_token(StringLiteral))
            }),
            GlobalKeyword => self
                .next_token_is(|p| !p.has_preceding_line_break() && p.is_token(OpenBraceToken)),
            AsyncKeyword => self
                .next_token_is(|p| !p.has_preceding_line_break() && p.is_token(FunctionKeyword)),
            AbstractKeyword => self
                .next_token_is(|p| !p.has_preceding_line_break() && p.is_token(ClassKeyword)),
            DeclareKeyword => self.next_token_is(|p| {
                !p.has_preceding_line_break() && token_is_identifier_or_keyword(p.token())
            }),
            _ => false,
        }
    }

    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statement_list(true);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(start, NodeData::Block { statements })
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = self.parse_expression();
        self.parse_semicolon();
        self.finish_node(start, NodeData::ExpressionStatement { expression })
    }

    fn parse_labeled_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let label = self.parse_identifier();
        self.parse_expected(SyntaxKind::ColonToken);
        let statement = self.parse_statement();
        self.finish_node(start, NodeData::LabeledStatement { label, statement })
    }

    fn parse_parenthesized_condition(&mut self) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.do_inside_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| p.parse_expression());
        self.parse_expected(SyntaxKind::CloseParenToken);
        expression
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let expression = self.parse_parenthesized_condition();
        let then_statement = self.parse_statement();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            self.parse_statement()
        } else {
            NodeIndex::NONE
        };
        self.finish_node(
            start,
            NodeData::IfStatement {
                expression,
                then_statement,
                else_statement,
            },
        )
    }

    fn parse_do_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let statement = self.parse_statement();
        self.parse_expected(SyntaxKind::WhileKeyword);
        let expression = self.parse_parenthesized_condition();
        // ASI after do-while is allowed even without a line break
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.finish_node(
            start,
            NodeData::DoStatement {
                statement,
                expression,
            },
        )
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let expression = self.parse_parenthesized_condition();
        let statement = self.parse_statement();
        self.finish_node(
            start,
            NodeData::WhileStatement {
                expression,
                statement,
            },
        )
    }

    fn parse_for_statement(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        self.next_token();
        let await_modifier = self.parse_optional(AwaitKeyword);
        self.parse_expected(OpenParenToken);

        let initializer = if self.is_token(SemicolonToken) {
            NodeIndex::NONE
        } else if self.is_token(VarKeyword)
            || self.is_token(ConstKeyword)
            || (self.is_token(LetKeyword) && self.next_token_starts_binding())
        {
            self.do_inside_context(CONTEXT_FLAG_DISALLOW_IN, 0, |p| {
                p.parse_variable_declaration_list(false)
            })
        } else {
            self.do_inside_context(CONTEXT_FLAG_DISALLOW_IN, 0, |p| p.parse_expression())
        };

        let node = if initializer.is_some() && self.parse_optional(OfKeyword) {
            let expression = self.parse_assignment_expression_or_higher();
            self.parse_expected(CloseParenToken);
            let statement = self.parse_statement();
            NodeData::ForOfStatement {
                await_modifier,
                initializer,
                expression,
                statement,
            }
        } else if initializer.is_some() && self.parse_optional(InKeyword) {
            let expression = self.parse_expression();
            self.parse_expected(CloseParenToken);
            let statement = self.parse_statement();
            NodeData::ForInStatement {
                initializer,
                expression,
                statement,
            }
        } else {
            self.parse_expected(SemicolonToken);
            let condition = if self.is_token(SemicolonToken) {
                NodeIndex::NONE
            } else {
                self.parse_expression()
            };
            self.parse_expected(SemicolonToken);
            let incrementor = if self.is_token(CloseParenToken) {
                NodeIndex::NONE
            } else {
                self.parse_expression()
            };
            self.parse_expected(CloseParenToken);
            let statement = self.parse_statement();
            NodeData::ForStatement {
                initializer,
                condition,
                incrementor,
                statement,
            }
        };
        self.finish_node(start, node)
    }

    fn parse_break_or_continue_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let is_break = self.is_token(SyntaxKind::BreakKeyword);
        self.next_token();
        let label = if !self.can_parse_semicolon() && self.is_identifier() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        let data = if is_break {
            NodeData::BreakStatement { label }
        } else {
            NodeData::ContinueStatement { label }
        };
        self.finish_node(start, data)
    }

    fn parse_return_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let expression = if self.can_parse_semicolon() {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_semicolon();
        self.finish_node(start, NodeData::ReturnStatement { expression })
    }

    fn parse_throw_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let expression = if self.has_preceding_line_break() {
            self.parse_error_at_current_token(
                diagnostic_messages::EXPRESSION_EXPECTED,
                diagnostic_codes::EXPRESSION_EXPECTED,
            );
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_semicolon();
        self.finish_node(start, NodeData::ThrowStatement { expression })
    }

    fn parse_switch_statement(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        self.next_token();
        let expression = self.parse_parenthesized_condition();
        self.parse_expected(OpenBraceToken);
        let mut clauses = Vec::new();
        while !self.is_token(CloseBraceToken) && !self.is_token(EndOfFileToken) {
            let clause_start = self.token_pos();
            let clause = if self.parse_optional(CaseKeyword) {
                let expression = self.parse_expression();
                self.parse_expected(ColonToken);
                let statements = self.parse_case_clause_statements();
                NodeData::CaseClause {
                    expression,
                    statements,
                }
            } else if self.parse_optional(DefaultKeyword) {
                self.parse_expected(ColonToken);
                let statements = self.parse_case_clause_statements();
                NodeData::DefaultClause { statements }
            } else {
                self.error_token_expected("case");
                break;
            };
            clauses.push(self.finish_node(clause_start, clause));
        }
        self.parse_expected(CloseBraceToken);
        self.finish_node(start, NodeData::SwitchStatement { expression, clauses })
    }

    fn parse_case_clause_statements(&mut self) -> NodeList {
        use SyntaxKind::*;
        let mut statements = Vec::new();
        while !matches!(
            self.token(),
            CaseKeyword | DefaultKeyword | CloseBraceToken | EndOfFileToken
        ) {
            let before = self.token_pos();
            let statement = self.parse_statement();
            if statement.is_some() {
                statements.push(statement);
            }
            if self.token_pos() == before {
                self.parse_error_at_current_token(
                    diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                );
                self.next_token();
            }
        }
        statements
    }

    fn parse_try_statement(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        self.next_token();
        let try_block = self.parse_block();
        let catch_clause = if self.is_token(CatchKeyword) {
            let catch_start = self.token_pos();
            self.next_token();
            let variable_declaration = if self.parse_optional(OpenParenToken) {
                let decl_start = self.token_pos();
                let name = self.parse_binding_name();
                let type_annotation = self.parse_type_annotation();
                self.parse_expected(CloseParenToken);
                self.finish_node(
                    decl_start,
                    NodeData::VariableDeclaration(VariableDeclarationData {
                        name,
                        exclamation: false,
                        type_annotation,
                        initializer: NodeIndex::NONE,
                    }),
                )
            } else {
                NodeIndex::NONE
            };
            let block = self.parse_block();
            self.finish_node(
                catch_start,
                NodeData::CatchClause {
                    variable_declaration,
                    block,
                },
            )
        } else {
            NodeIndex::NONE
        };
        let finally_block = if self.parse_optional(FinallyKeyword) {
            self.parse_block()
        } else {
            NodeIndex::NONE
        };
        if catch_clause.is_none() && finally_block.is_none() {
            self.error_token_expected("catch");
        }
        self.finish_node(
            start,
            NodeData::TryStatement {
                try_block,
                catch_clause,
                finally_block,
            },
        )
    }

    // =========================================================================
    // Variables and binding patterns
    // =========================================================================

    fn parse_variable_statement(&mut self, start: u32, modifiers: ModifierFlags) -> NodeIndex {
        let check_initializers = !modifiers.contains(ModifierFlags::DECLARE);
        let declaration_list = self.parse_variable_declaration_list(check_initializers);
        self.parse_semicolon();
        self.finish_node(
            start,
            NodeData::VariableStatement {
                modifiers,
                declaration_list,
            },
        )
    }

    /// Parse `var|let|const decl, decl...`. `check_initializers` reports
    /// missing `const` initializers, which for-in/of heads do not need.
    pub(crate) fn parse_variable_declaration_list(&mut self, check_initializers: bool) -> NodeIndex {
        let start = self.token_pos();
        let kind = match self.token() {
            SyntaxKind::LetKeyword => VariableKind::Let,
            SyntaxKind::ConstKeyword => VariableKind::Const,
            _ => VariableKind::Var,
        };
        self.next_token();

        let check_const = check_initializers
            && kind == VariableKind::Const
            && !self.in_context(CONTEXT_FLAG_AMBIENT);
        let mut declarations = Vec::new();
        loop {
            let decl_start = self.token_pos();
            let name = self.parse_binding_name();
            let exclamation = self.parse_optional(SyntaxKind::ExclamationToken);
            let type_annotation = self.parse_type_annotation();
            let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_assignment_expression_or_higher()
            } else {
                NodeIndex::NONE
            };
            if check_const && initializer.is_none() {
                let span = self.arena.span(name);
                self.parse_error_at(
                    span.start,
                    span.len(),
                    diagnostic_messages::CONST_DECLARATIONS_MUST_BE_INITIALIZED,
                    diagnostic_codes::CONST_DECLARATIONS_MUST_BE_INITIALIZED,
                );
            }
            declarations.push(self.finish_node(
                decl_start,
                NodeData::VariableDeclaration(VariableDeclarationData {
                    name,
                    exclamation,
                    type_annotation,
                    initializer,
                }),
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.finish_node(start, NodeData::VariableDeclarationList { kind, declarations })
    }

    /// Identifier, `{...}` or `[...]` binding target.
    pub(crate) fn parse_binding_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(),
            _ => self.parse_identifier(),
        }
    }

    fn parse_object_binding_pattern(&mut self) -> NodeIndex {
        self.nested(|p| p.parse_object_binding_pattern_worker())
    }

    fn parse_object_binding_pattern_worker(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let elements = self.parse_delimited_list(SyntaxKind::CloseBraceToken, |p| {
            let element_start = p.token_pos();
            let dot_dot_dot = p.parse_optional(SyntaxKind::DotDotDotToken);
            let (property_name, name) = if dot_dot_dot {
                (NodeIndex::NONE, p.parse_identifier())
            } else {
                let property = p.parse_property_name();
                if p.parse_optional(SyntaxKind::ColonToken) {
                    (property, p.parse_binding_name())
                } else {
                    (NodeIndex::NONE, property)
                }
            };
            let initializer = p.parse_initializer();
            p.finish_node(
                element_start,
                NodeData::BindingElement {
                    dot_dot_dot,
                    property_name,
                    name,
                    initializer,
                },
            )
        });
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(start, NodeData::ObjectBindingPattern { elements })
    }

    fn parse_array_binding_pattern(&mut self) -> NodeIndex {
        self.nested(|p| p.parse_array_binding_pattern_worker())
    }

    fn parse_array_binding_pattern_worker(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let element_start = self.token_pos();
            if self.is_token(SyntaxKind::CommaToken) {
                self.next_token();
                elements.push(self.finish_node(element_start, NodeData::OmittedExpression));
                continue;
            }
            let dot_dot_dot = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_name();
            let initializer = self.parse_initializer();
            elements.push(self.finish_node(
                element_start,
                NodeData::BindingElement {
                    dot_dot_dot,
                    property_name: NodeIndex::NONE,
                    name,
                    initializer,
                },
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.finish_node(start, NodeData::ArrayBindingPattern { elements })
    }

    pub(crate) fn parse_initializer(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression_or_higher()
        } else {
            NodeIndex::NONE
        }
    }

    /// Identifier-or-keyword, string, number, private name or `[computed]`.
    pub(crate) fn parse_property_name(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        match self.token() {
            StringLiteral | NumericLiteral | BigIntLiteral | NoSubstitutionTemplateLiteral => {
                self.parse_literal_node()
            }
            OpenBracketToken => {
                let start = self.token_pos();
                self.next_token();
                let expression = self.do_inside_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| {
                    p.parse_assignment_expression_or_higher()
                });
                self.parse_expected(CloseBracketToken);
                self.finish_node(start, NodeData::ComputedPropertyName { expression })
            }
            _ => self.parse_identifier_name(),
        }
    }

    // =========================================================================
    // Declarations with modifiers
    // =========================================================================

    pub(crate) fn parse_decorators(&mut self) -> NodeList {
        let mut decorators = Vec::new();
        while self.is_token(SyntaxKind::AtToken) {
            let start = self.token_pos();
            self.next_token();
            let expression = self.parse_decorator_expression();
            decorators.push(self.finish_node(start, NodeData::Decorator { expression }));
        }
        decorators
    }

    /// Parse a declaration that may carry decorators or modifiers.
    fn parse_declaration(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        let decorators = self.parse_decorators();

        let mut modifiers = ModifierFlags::empty();
        if self.is_token(ExportKeyword) {
            self.next_token();
            modifiers |= ModifierFlags::EXPORT;
            match self.token() {
                OpenBraceToken | AsteriskToken => return self.parse_export_declaration(start, false),
                TypeKeyword
                    if self.next_token_is(|p| {
                        matches!(p.token(), OpenBraceToken | AsteriskToken)
                    }) =>
                {
                    self.next_token();
                    return self.parse_export_declaration(start, true);
                }
                EqualsToken => return self.parse_export_assignment(start, true),
                DefaultKeyword => {
                    self.next_token();
                    modifiers |= ModifierFlags::DEFAULT;
                    if !self.is_start_of_default_exported_declaration() {
                        return self.parse_export_assignment(start, false);
                    }
                }
                _ => {}
            }
        }

        loop {
            let flag = match self.token() {
                DeclareKeyword | AbstractKeyword => {
                    if !self.next_token_is(|p| {
                        !p.has_preceding_line_break() && token_is_identifier_or_keyword(p.token())
                    }) {
                        break;
                    }
                    ModifierFlags::from_keyword(self.token())
                }
                AsyncKeyword => {
                    if !self.next_token_is(|p| {
                        !p.has_preceding_line_break() && p.is_token(FunctionKeyword)
                    }) {
                        break;
                    }
                    Some(ModifierFlags::ASYNC)
                }
                ConstKeyword if self.next_token_is_kind(EnumKeyword) => Some(ModifierFlags::CONST),
                _ => None,
            };
            let Some(flag) = flag else { break };
            modifiers |= flag;
            self.next_token();
        }

        if !decorators.is_empty() && !self.is_token(ClassKeyword) {
            let span = self.arena.span(decorators[0]);
            self.parse_error_at(
                span.start,
                span.len(),
                diagnostic_messages::DECORATORS_ARE_NOT_VALID_HERE,
                diagnostic_codes::DECORATORS_ARE_NOT_VALID_HERE,
            );
        }

        let ambient = if modifiers.contains(ModifierFlags::DECLARE) {
            CONTEXT_FLAG_AMBIENT
        } else {
            0
        };
        self.do_inside_context(ambient, 0, |p| {
            p.parse_declaration_worker(start, modifiers, decorators)
        })
    }

    fn parse_declaration_worker(
        &mut self,
        start: u32,
        modifiers: ModifierFlags,
        decorators: NodeList,
    ) -> NodeIndex {
        use SyntaxKind::*;
        match self.token() {
            VarKeyword | LetKeyword | ConstKeyword => self.parse_variable_statement(start, modifiers),
            FunctionKeyword => self.parse_function_declaration(start, modifiers, decorators),
            ClassKeyword => self.parse_class(start, modifiers, decorators, false),
            InterfaceKeyword => self.parse_interface_declaration(start, modifiers),
            TypeKeyword => self.parse_type_alias_declaration(start, modifiers),
            EnumKeyword => self.parse_enum_declaration(start, modifiers),
            NamespaceKeyword | ModuleKeyword | GlobalKeyword => {
                self.parse_module_declaration(start, modifiers)
            }
            ImportKeyword => self.parse_import_declaration_or_import_equals(start, modifiers),
            _ => {
                self.parse_error_at_current_token(
                    diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                );
                NodeIndex::NONE
            }
        }
    }

    fn is_start_of_default_exported_declaration(&mut self) -> bool {
        use SyntaxKind::*;
        match self.token() {
            FunctionKeyword | ClassKeyword | AtToken => true,
            InterfaceKeyword => self.next_token_is_identifier_on_same_line(),
            AsyncKeyword => self
                .next_token_is(|p| !p.has_preceding_line_break() && p.is_token(FunctionKeyword)),
            AbstractKeyword => self
                .next_token_is(|p| !p.has_preceding_line_break() && p.is_token(ClassKeyword)),
            _ => false,
        }
    }

    // =========================================================================
    // Functions
    // =========================================================================

    fn parse_function_declaration(
        &mut self,
        start: u32,
        modifiers: ModifierFlags,
        decorators: NodeList,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let asterisk = self.parse_optional(SyntaxKind::AsteriskToken);
        let name = if self.is_identifier() {
            self.parse_identifier()
        } else {
            if !modifiers.contains(ModifierFlags::DEFAULT) {
                self.parse_identifier();
            }
            NodeIndex::NONE
        };
        let function = self.parse_function_rest(modifiers, decorators, asterisk, name, false);
        self.finish_node(start, NodeData::FunctionDeclaration(function))
    }

    /// Parse type parameters, parameters, return type and body of any
    /// function-like declaration.
    pub(crate) fn parse_function_rest(
        &mut self,
        modifiers: ModifierFlags,
        decorators: NodeList,
        asterisk: bool,
        name: NodeIndex,
        question: bool,
    ) -> FunctionData {
        let mut flags = 0;
        if modifiers.contains(ModifierFlags::ASYNC) {
            flags |= CONTEXT_FLAG_ASYNC;
        }
        if asterisk {
            flags |= CONTEXT_FLAG_GENERATOR;
        }
        let type_parameters = self.parse_type_parameters();
        let parameters = self.do_inside_context(flags, CONTEXT_FLAG_ASYNC | CONTEXT_FLAG_GENERATOR, |p| {
            p.parse_parameters()
        });
        let return_type = if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_return_type()
        } else {
            NodeIndex::NONE
        };
        let body = self.do_inside_context(
            flags,
            CONTEXT_FLAG_ASYNC | CONTEXT_FLAG_GENERATOR | CONTEXT_FLAG_DISALLOW_IN,
            |p| p.parse_function_body(),
        );
        FunctionData {
            modifiers,
            decorators,
            asterisk,
            name,
            question,
            type_parameters,
            parameters,
            return_type,
            body,
        }
    }

    /// A block body, or nothing for overload signatures and ambient
    /// declarations.
    fn parse_function_body(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::OpenBraceToken) {
            return self.parse_block();
        }
        self.parse_semicolon();
        NodeIndex::NONE
    }

    /// Parse `( param, ... )`.
    pub(crate) fn parse_parameters(&mut self) -> NodeList {
        if !self.parse_expected(SyntaxKind::OpenParenToken) {
            return Vec::new();
        }
        let parameters =
            self.parse_delimited_list(SyntaxKind::CloseParenToken, |p| p.parse_parameter());
        self.parse_expected(SyntaxKind::CloseParenToken);
        parameters
    }

    fn parse_parameter(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        let decorators = self.parse_decorators();
        let mut modifiers = ModifierFlags::empty();
        while matches!(
            self.token(),
            PublicKeyword | PrivateKeyword | ProtectedKeyword | ReadonlyKeyword | OverrideKeyword
        ) && self.next_token_is(|p| {
            p.is_identifier() || matches!(p.token(), OpenBraceToken | OpenBracketToken)
        }) {
            if let Some(flag) = ModifierFlags::from_keyword(self.token()) {
                modifiers |= flag;
            }
            self.next_token();
        }
        let dot_dot_dot = self.parse_optional(DotDotDotToken);
        let name = if self.is_token(ThisKeyword) {
            let this_start = self.token_pos();
            self.next_token();
            self.finish_node(
                this_start,
                NodeData::Identifier {
                    text: "this".to_string(),
                },
            )
        } else {
            self.parse_binding_name()
        };
        let question = self.parse_optional(QuestionToken);
        let type_annotation = self.parse_type_annotation();
        let initializer = self.parse_initializer();
        self.finish_node(
            start,
            NodeData::Parameter(ParameterData {
                modifiers,
                decorators,
                dot_dot_dot,
                name,
                question,
                type_annotation,
                initializer,
            }),
        )
    }

    // =========================================================================
    // Classes
    // =========================================================================

    /// Parse a class declaration or expression starting at `class`.
    pub(crate) fn parse_class(
        &mut self,
        start: u32,
        modifiers: ModifierFlags,
        decorators: NodeList,
        is_expression: bool,
    ) -> NodeIndex {
        use SyntaxKind::*;
        self.parse_expected(ClassKeyword);
        let name = if self.is_identifier() && !self.is_token(ImplementsKeyword) {
            self.parse_identifier()
        } else {
            if !is_expression && !modifiers.contains(ModifierFlags::DEFAULT) {
                self.parse_identifier();
            }
            NodeIndex::NONE
        };
        let type_parameters = self.parse_type_parameters();

        let mut extends = NodeIndex::NONE;
        let mut implements = Vec::new();
        loop {
            if self.parse_optional(ExtendsKeyword) {
                extends = self.parse_expression_with_type_arguments();
            } else if self.parse_optional(ImplementsKeyword) {
                loop {
                    implements.push(self.parse_expression_with_type_arguments());
                    if !self.parse_optional(CommaToken) {
                        break;
                    }
                }
            } else {
                break;
            }
        }

        self.parse_expected(OpenBraceToken);
        let mut members = Vec::new();
        while !self.is_token(CloseBraceToken) && !self.is_token(EndOfFileToken) {
            let before = self.token_pos();
            let member = self.parse_class_member();
            if member.is_some() {
                members.push(member);
            }
            if self.token_pos() == before {
                self.parse_error_at_current_token(
                    diagnostic_messages::UNEXPECTED_TOKEN,
                    diagnostic_codes::UNEXPECTED_TOKEN,
                );
                self.next_token();
            }
        }
        self.parse_expected(CloseBraceToken);

        let class = ClassData {
            modifiers,
            decorators,
            name,
            type_parameters,
            extends,
            implements,
            members,
        };
        let data = if is_expression {
            NodeData::ClassExpression(class)
        } else {
            NodeData::ClassDeclaration(class)
        };
        self.finish_node(start, data)
    }

    /// `Base<T>` in heritage clauses.
    fn parse_expression_with_type_arguments(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = self.parse_left_hand_side_expression_without_call();
        let type_arguments = if self.is_token(SyntaxKind::LessThanToken) {
            self.parse_type_arguments()
        } else {
            Vec::new()
        };
        self.finish_node(
            start,
            NodeData::ExpressionWithTypeArguments {
                expression,
                type_arguments,
            },
        )
    }

    /// Whether the current modifier keyword is used as a modifier rather than
    /// as a member name.
    fn next_token_can_follow_class_modifier(&mut self) -> bool {
        use SyntaxKind::*;
        self.next_token_is(|p| {
            if p.has_preceding_line_break() {
                return false;
            }
            matches!(
                p.token(),
                OpenBracketToken
                    | OpenBraceToken
                    | AsteriskToken
                    | StringLiteral
                    | NumericLiteral
                    | PrivateIdentifier
                    | DotDotDotToken
            ) || token_is_identifier_or_keyword(p.token())
        })
    }

    fn parse_class_member(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let start = self.token_pos();
        if self.parse_optional(SemicolonToken) {
            return self.finish_node(start, NodeData::SemicolonClassElement);
        }
        if self.is_token(StaticKeyword) && self.next_token_is_kind(OpenBraceToken) {
            self.next_token();
            let body = self.do_inside_context(0, CONTEXT_FLAG_ASYNC | CONTEXT_FLAG_GENERATOR, |p| {
                p.parse_block()
            });
            return self.finish_node(start, NodeData::ClassStaticBlock { body });
        }

        let decorators = self.parse_decorators();
        let mut modifiers = ModifierFlags::empty();
        loop {
            let flag = match self.token() {
                StaticKeyword | PublicKeyword | PrivateKeyword | ProtectedKeyword
                | ReadonlyKeyword | AbstractKeyword | OverrideKeyword | DeclareKeyword
                | AccessorKeyword | AsyncKeyword => ModifierFlags::from_keyword(self.token()),
                _ => None,
            };
            let Some(flag) = flag else { break };
            if !self.next_token_can_follow_class_modifier() {
                break;
            }
            modifiers |= flag;
            self.next_token();
        }

        // get/set accessors
        if matches!(self.token(), GetKeyword | SetKeyword) && self.next_token_can_follow_class_modifier()
        {
            let is_get = self.is_token(GetKeyword);
            self.next_token();
            let name = self.parse_property_name();
            let function = self.parse_function_rest(modifiers, decorators, false, name, false);
            let data = if is_get {
                NodeData::GetAccessor(function)
            } else {
                NodeData::SetAccessor(function)
            };
            return self.finish_node(start, data);
        }

        // Constructor
        if (self.is_token(ConstructorKeyword)
            || (self.is_token(StringLiteral) && self.scanner.get_token_value() == "constructor"))
            && self.next_token_is_kind(OpenParenToken)
        {
            self.next_token();
            let function =
                self.parse_function_rest(modifiers, decorators, false, NodeIndex::NONE, false);
            return self.finish_node(start, NodeData::Constructor(function));
        }

        // Index signature
        if self.is_token(OpenBracketToken) && self.is_index_signature() {
            let signature = self.parse_index_signature(start, modifiers);
            self.parse_semicolon();
            return signature;
        }

        let asterisk = self.parse_optional(AsteriskToken);
        let name = self.parse_property_name();
        let question = self.parse_optional(QuestionToken);
        if asterisk || matches!(self.token(), OpenParenToken | LessThanToken) {
            let function = self.parse_function_rest(modifiers, decorators, asterisk, name, question);
            return self.finish_node(start, NodeData::MethodDeclaration(function));
        }

        let exclamation = !question && self.parse_optional(ExclamationToken);
        let type_annotation = self.parse_type_annotation();
        let initializer = self.do_inside_context(
            0,
            CONTEXT_FLAG_ASYNC | CONTEXT_FLAG_GENERATOR | CONTEXT_FLAG_DISALLOW_IN,
            |p| p.parse_initializer(),
        );
        self.parse_semicolon();
        self.finish_node(
            start,
            NodeData::PropertyDeclaration(PropertyDeclarationData {
                modifiers,
                decorators,
                name,
                question,
                exclamation,
                type_annotation,
                initializer,
            }),
        )
    }

    // =========================================================================
    // Interfaces, type aliases and enums
    // =========================================================================

    fn parse_interface_declaration(&mut self, start: u32, modifiers: ModifierFlags) -> NodeIndex {
        self.parse_expected(SyntaxKind::InterfaceKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        let mut heritage = Vec::new();
        if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            loop {
                heritage.push(self.parse_expression_with_type_arguments());
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        }
        let members = self.parse_object_type_members();
        self.finish_node(
            start,
            NodeData::InterfaceDeclaration {
                modifiers,
                name,
                type_parameters,
                heritage,
                members,
            },
        )
    }

    fn parse_type_alias_declaration(&mut self, start: u32, modifiers: ModifierFlags) -> NodeIndex {
        self.parse_expected(SyntaxKind::TypeKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        self.parse_expected(SyntaxKind::EqualsToken);
        let type_node = self.parse_type();
        self.parse_semicolon();
        self.finish_node(
            start,
            NodeData::TypeAliasDeclaration {
                modifiers,
                name,
                type_parameters,
                type_node,
            },
        )
    }

    fn parse_enum_declaration(&mut self, start: u32, modifiers: ModifierFlags) -> NodeIndex {
        self.parse_expected(SyntaxKind::EnumKeyword);
        let name = self.parse_identifier();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let members = self.parse_delimited_list(SyntaxKind::CloseBraceToken, |p| {
            let member_start = p.token_pos();
            let name = p.parse_property_name();
            let initializer = p.parse_initializer();
            p.finish_node(member_start, NodeData::EnumMember { name, initializer })
        });
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(
            start,
            NodeData::EnumDeclaration {
                modifiers,
                name,
                members,
            },
        )
    }

    // =========================================================================
    // Namespaces and ambient modules
    // =========================================================================

    fn parse_module_declaration(&mut self, start: u32, modifiers: ModifierFlags) -> NodeIndex {
        use SyntaxKind::*;
        if self.is_token(GlobalKeyword) {
            let name = self.parse_identifier_name();
            let body = self.parse_module_block();
            return self.finish_node(
                start,
                NodeData::ModuleDeclaration(ModuleDeclData {
                    modifiers,
                    name,
                    body,
                    is_global: true,
                }),
            );
        }
        self.next_token();
        if self.is_token(StringLiteral) {
            let name = self.parse_literal_node();
            let body = if self.is_token(OpenBraceToken) {
                self.parse_module_block()
            } else {
                self.parse_semicolon();
                NodeIndex::NONE
            };
            return self.finish_node(
                start,
                NodeData::ModuleDeclaration(ModuleDeclData {
                    modifiers,
                    name,
                    body,
                    is_global: false,
                }),
            );
        }
        self.parse_namespace_body(start, modifiers)
    }

    /// `A.B.C { ... }`: each dotted segment becomes a nested declaration.
    fn parse_namespace_body(&mut self, start: u32, modifiers: ModifierFlags) -> NodeIndex {
        let name = self.parse_identifier();
        let body = if self.is_token(SyntaxKind::DotToken) {
            self.next_token();
            let inner_start = self.token_pos();
            self.nested(|p| p.parse_namespace_body(inner_start, ModifierFlags::EXPORT))
        } else {
            self.parse_module_block()
        };
        self.finish_node(
            start,
            NodeData::ModuleDeclaration(ModuleDeclData {
                modifiers,
                name,
                body,
                is_global: false,
            }),
        )
    }

    fn parse_module_block(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statement_list(true);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(start, NodeData::ModuleBlock { statements })
    }

    // =========================================================================
    // Imports and exports
    // =========================================================================

    fn parse_import_declaration_or_import_equals(
        &mut self,
        start: u32,
        modifiers: ModifierFlags,
    ) -> NodeIndex {
        use SyntaxKind::*;
        self.parse_expected(ImportKeyword);

        // import "mod";
        if self.is_token(StringLiteral) {
            let module_specifier = self.parse_literal_node();
            let attributes = self.parse_import_attributes();
            self.parse_semicolon();
            return self.finish_node(
                start,
                NodeData::ImportDeclaration(ImportDeclData {
                    import_clause: NodeIndex::NONE,
                    module_specifier,
                    attributes,
                }),
            );
        }

        let clause_start = self.token_pos();
        let is_type_only = self.is_token(TypeKeyword)
            && self.next_token_is(|p| {
                matches!(p.token(), OpenBraceToken | AsteriskToken)
                    || (p.is_identifier() && !p.is_token(FromKeyword))
            });
        if is_type_only {
            self.next_token();
        }

        let mut name = NodeIndex::NONE;
        if self.is_identifier() && !(self.is_token(FromKeyword) && self.next_token_is_kind(StringLiteral)) {
            name = self.parse_identifier();
            if self.is_token(EqualsToken) {
                return self.parse_import_equals_rest(start, modifiers, is_type_only, name);
            }
        }

        let named_bindings = if name.is_none() || self.parse_optional(CommaToken) {
            match self.token() {
                AsteriskToken => {
                    let ns_start = self.token_pos();
                    self.next_token();
                    self.parse_expected(AsKeyword);
                    let ns_name = self.parse_identifier();
                    self.finish_node(ns_start, NodeData::NamespaceImport { name: ns_name })
                }
                OpenBraceToken => self.parse_named_imports(),
                _ => {
                    self.error_token_expected("{");
                    NodeIndex::NONE
                }
            }
        } else {
            NodeIndex::NONE
        };
        let import_clause = self.finish_node(
            clause_start,
            NodeData::ImportClause {
                is_type_only,
                name,
                named_bindings,
            },
        );

        self.parse_expected(FromKeyword);
        let module_specifier = if self.is_token(StringLiteral) {
            self.parse_literal_node()
        } else {
            self.parse_error_at_current_token(
                diagnostic_messages::EXPRESSION_EXPECTED,
                diagnostic_codes::EXPRESSION_EXPECTED,
            );
            NodeIndex::NONE
        };
        let attributes = self.parse_import_attributes();
        self.parse_semicolon();
        self.finish_node(
            start,
            NodeData::ImportDeclaration(ImportDeclData {
                import_clause,
                module_specifier,
                attributes,
            }),
        )
    }

    fn parse_import_equals_rest(
        &mut self,
        start: u32,
        modifiers: ModifierFlags,
        is_type_only: bool,
        name: NodeIndex,
    ) -> NodeIndex {
        use SyntaxKind::*;
        self.parse_expected(EqualsToken);
        let module_reference = if self.is_token(RequireKeyword) && self.next_token_is_kind(OpenParenToken) {
            let reference_start = self.token_pos();
            self.next_token();
            self.next_token();
            let expression = if self.is_token(StringLiteral) {
                self.parse_literal_node()
            } else {
                self.parse_error_at_current_token(
                    diagnostic_messages::EXPRESSION_EXPECTED,
                    diagnostic_codes::EXPRESSION_EXPECTED,
                );
                NodeIndex::NONE
            };
            self.parse_expected(CloseParenToken);
            self.parse_error_at(
                start,
                self.previous_token_end.saturating_sub(start),
                diagnostic_messages::IMPORT_ASSIGNMENT_CANNOT_BE_USED_WITH_ESM,
                diagnostic_codes::IMPORT_ASSIGNMENT_CANNOT_BE_USED_WITH_ESM,
            );
            self.finish_node(reference_start, NodeData::ExternalModuleReference { expression })
        } else {
            self.parse_entity_name()
        };
        self.parse_semicolon();
        self.finish_node(
            start,
            NodeData::ImportEqualsDeclaration {
                modifiers,
                is_type_only,
                name,
                module_reference,
            },
        )
    }

    /// `with { type: "json" }` (or the older `assert`) after a specifier.
    fn parse_import_attributes(&mut self) -> NodeIndex {
        let is_attributes = (self.is_token(SyntaxKind::WithKeyword)
            || (self.is_token(SyntaxKind::Identifier) && self.scanner.get_token_value() == "assert"))
            && !self.has_preceding_line_break();
        if !is_attributes {
            return NodeIndex::NONE;
        }
        self.next_token();
        self.parse_object_literal_expression()
    }

    fn parse_named_imports(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let elements = self.parse_delimited_list(SyntaxKind::CloseBraceToken, |p| {
            let element_start = p.token_pos();
            let (is_type_only, property_name, name) = p.parse_import_or_export_specifier();
            p.finish_node(
                element_start,
                NodeData::ImportSpecifier {
                    is_type_only,
                    property_name,
                    name,
                },
            )
        });
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(start, NodeData::NamedImports { elements })
    }

    /// `[type] name [as alias]`, shared by import and export specifiers.
    fn parse_import_or_export_specifier(&mut self) -> (bool, NodeIndex, NodeIndex) {
        use SyntaxKind::*;
        let is_type_only = self.is_token(TypeKeyword)
            && self.next_token_is(|p| {
                (token_is_identifier_or_keyword(p.token()) || p.is_token(StringLiteral))
                    && !p.is_token(AsKeyword)
            });
        if is_type_only {
            self.next_token();
        }
        let first = self.parse_module_export_name();
        if self.parse_optional(AsKeyword) {
            let alias = self.parse_module_export_name();
            (is_type_only, first, alias)
        } else {
            (is_type_only, NodeIndex::NONE, first)
        }
    }

    fn parse_module_export_name(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::StringLiteral) {
            self.parse_literal_node()
        } else {
            self.parse_identifier_name()
        }
    }

    fn parse_export_declaration(&mut self, start: u32, is_type_only: bool) -> NodeIndex {
        use SyntaxKind::*;
        let export_clause = if self.is_token(AsteriskToken) {
            let clause_start = self.token_pos();
            self.next_token();
            if self.parse_optional(AsKeyword) {
                let name = self.parse_module_export_name();
                self.finish_node(clause_start, NodeData::NamespaceExport { name })
            } else {
                NodeIndex::NONE
            }
        } else {
            let clause_start = self.token_pos();
            self.parse_expected(OpenBraceToken);
            let elements = self.parse_delimited_list(CloseBraceToken, |p| {
                let element_start = p.token_pos();
                let (is_type_only, property_name, name) = p.parse_import_or_export_specifier();
                p.finish_node(
                    element_start,
                    NodeData::ExportSpecifier {
                        is_type_only,
                        property_name,
                        name,
                    },
                )
            });
            self.parse_expected(CloseBraceToken);
            self.finish_node(clause_start, NodeData::NamedExports { elements })
        };

        let module_specifier = if self.parse_optional(FromKeyword) {
            if self.is_token(StringLiteral) {
                self.parse_literal_node()
            } else {
                self.parse_error_at_current_token(
                    diagnostic_messages::EXPRESSION_EXPECTED,
                    diagnostic_codes::EXPRESSION_EXPECTED,
                );
                NodeIndex::NONE
            }
        } else {
            if export_clause.is_none() {
                self.error_token_expected("from");
            }
            NodeIndex::NONE
        };
        let attributes = if module_specifier.is_some() {
            self.parse_import_attributes()
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        self.finish_node(
            start,
            NodeData::ExportDeclaration(ExportDeclData {
                is_type_only,
                export_clause,
                module_specifier,
                attributes,
            }),
        )
    }

    /// `export default expr;` or `export = expr;`.
    fn parse_export_assignment(&mut self, start: u32, is_export_equals: bool) -> NodeIndex {
        if is_export_equals {
            self.parse_expected(SyntaxKind::EqualsToken);
        }
        let expression = self.parse_assignment_expression_or_higher();
        self.parse_semicolon();
        if is_export_equals {
            self.parse_error_at(
                start,
                self.previous_token_end.saturating_sub(start),
                diagnostic_messages::EXPORT_ASSIGNMENT_CANNOT_BE_USED_WITH_ESM,
                diagnostic_codes::EXPORT_ASSIGNMENT_CANNOT_BE_USED_WITH_ESM,
            );
        }
        self.finish_node(
            start,
            NodeData::ExportAssignment {
                is_export_equals,
                expression,
            },
        )
    }
}
