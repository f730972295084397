//! Statement and declaration checking.
//!
//! Statements are visited in source order inside the scope the binder
//! created for them. Declarations check their annotations, their
//! initializers against those annotations and their module specifiers.

use tsz_common::Span;
use tsz_parser::{ClassData, NodeData, NodeIndex, VariableDeclarationData};

use crate::binder::{STACK_GROWTH, STACK_RED_ZONE, SymbolFlags};
use crate::globals::{is_global_type, is_global_value};
use crate::state::CheckerState;
use crate::types::Type;

/// Length of the `return` keyword, which anchors return type errors.
const RETURN_KEYWORD_LEN: u32 = 6;

impl<'a> CheckerState<'a> {
    pub(crate) fn check_statement(&mut self, idx: NodeIndex) {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || {
            self.check_statement_worker(idx)
        })
    }

    fn check_statement_worker(&mut self, idx: NodeIndex) {
        let arena = self.ctx.arena;
        let Some(data) = arena.data(idx) else {
            return;
        };
        match data {
            NodeData::VariableStatement {
                declaration_list, ..
            } => self.check_variable_declaration_list(*declaration_list),
            NodeData::FunctionDeclaration(function) => {
                self.check_function_like(idx, function);
            }
            NodeData::ClassDeclaration(class) => self.check_class(idx, class),
            NodeData::InterfaceDeclaration {
                type_parameters,
                heritage,
                members,
                ..
            } => self.with_node_scope(idx, |checker| {
                checker.check_type_parameters(type_parameters);
                for &clause in heritage {
                    checker.check_heritage_type(clause);
                }
                checker.resolve_type_members(members);
            }),
            NodeData::TypeAliasDeclaration {
                type_parameters,
                type_node,
                ..
            } => self.with_node_scope(idx, |checker| {
                checker.check_type_parameters(type_parameters);
                checker.resolve_type_node(*type_node);
            }),
            NodeData::EnumDeclaration { members, .. } => self.check_enum_members(members),
            NodeData::ModuleDeclaration(module) => {
                let body = module.body;
                self.with_node_scope(idx, |checker| match arena.data(body) {
                    Some(NodeData::ModuleBlock { statements }) => {
                        for &statement in statements {
                            checker.check_statement(statement);
                        }
                    }
                    Some(NodeData::ModuleDeclaration(_)) => checker.check_statement(body),
                    _ => {}
                });
            }
            NodeData::ImportDeclaration(import) => {
                self.check_module_specifier(import.module_specifier);
            }
            NodeData::ImportEqualsDeclaration {
                module_reference, ..
            } => self.check_module_reference(*module_reference),
            NodeData::ExportDeclaration(export) => {
                if export.module_specifier.is_some() {
                    self.check_module_specifier(export.module_specifier);
                } else if let Some(NodeData::NamedExports { elements }) =
                    arena.data(export.export_clause)
                {
                    for &element in elements {
                        self.check_local_export(element);
                    }
                }
            }
            NodeData::ExportAssignment { expression, .. } => {
                self.get_type_of_expression(*expression);
            }
            NodeData::Block { statements } => self.with_node_scope(idx, |checker| {
                for &statement in statements {
                    checker.check_statement(statement);
                }
            }),
            NodeData::ExpressionStatement { expression } => {
                self.get_type_of_expression(*expression);
            }
            NodeData::IfStatement {
                expression,
                then_statement,
                else_statement,
            } => {
                self.get_type_of_expression(*expression);
                self.check_statement(*then_statement);
                self.check_statement(*else_statement);
            }
            NodeData::DoStatement {
                statement,
                expression,
            } => {
                self.check_statement(*statement);
                self.get_type_of_expression(*expression);
            }
            NodeData::WhileStatement {
                expression,
                statement,
            } => {
                self.get_type_of_expression(*expression);
                self.check_statement(*statement);
            }
            NodeData::ForStatement {
                initializer,
                condition,
                incrementor,
                statement,
            } => self.with_node_scope(idx, |checker| {
                checker.check_for_initializer(*initializer);
                checker.get_type_of_expression(*condition);
                checker.get_type_of_expression(*incrementor);
                checker.check_statement(*statement);
            }),
            NodeData::ForInStatement {
                initializer,
                expression,
                statement,
            } => self.with_node_scope(idx, |checker| {
                checker.get_type_of_expression(*expression);
                checker.check_loop_variable(*initializer, Type::String);
                checker.check_statement(*statement);
            }),
            NodeData::ForOfStatement {
                await_modifier,
                initializer,
                expression,
                statement,
            } => self.with_node_scope(idx, |checker| {
                let iterated = checker.get_type_of_expression(*expression);
                let element = if *await_modifier {
                    Type::Any
                } else {
                    iterated.element_type()
                };
                checker.check_loop_variable(*initializer, element);
                checker.check_statement(*statement);
            }),
            NodeData::ReturnStatement { expression } => {
                self.check_return_statement(idx, *expression);
            }
            NodeData::SwitchStatement {
                expression,
                clauses,
            } => {
                self.get_type_of_expression(*expression);
                self.with_node_scope(idx, |checker| {
                    for &clause in clauses {
                        checker.check_switch_clause(clause);
                    }
                });
            }
            NodeData::LabeledStatement { statement, .. } => self.check_statement(*statement),
            NodeData::ThrowStatement { expression } => {
                self.get_type_of_expression(*expression);
            }
            NodeData::TryStatement {
                try_block,
                catch_clause,
                finally_block,
            } => {
                self.check_statement(*try_block);
                if let Some(NodeData::CatchClause {
                    variable_declaration,
                    block,
                }) = arena.data(*catch_clause)
                {
                    self.with_node_scope(*catch_clause, |checker| {
                        if let Some(NodeData::VariableDeclaration(decl)) =
                            arena.data(*variable_declaration)
                        {
                            checker.check_binding_name(decl.name);
                            checker.resolve_type_node(decl.type_annotation);
                        }
                        checker.check_statement(*block);
                    });
                }
                self.check_statement(*finally_block);
            }
            _ => {}
        }
    }

    // =========================================================================
    // Variables
    // =========================================================================

    fn check_variable_declaration_list(&mut self, list: NodeIndex) {
        let arena = self.ctx.arena;
        if let Some(NodeData::VariableDeclarationList { declarations, .. }) = arena.data(list) {
            for &declaration in declarations {
                if let Some(NodeData::VariableDeclaration(decl)) = arena.data(declaration) {
                    self.check_variable_declaration(declaration, decl);
                }
            }
        }
    }

    fn check_variable_declaration(&mut self, idx: NodeIndex, decl: &VariableDeclarationData) {
        let arena = self.ctx.arena;
        self.check_binding_name(decl.name);
        let symbol = match arena.data(decl.name) {
            Some(NodeData::Identifier { .. }) => self.ctx.binder.symbol_of_name(decl.name),
            _ => None,
        };

        if decl.type_annotation.is_some() {
            let declared = self.resolve_type_node(decl.type_annotation);
            if decl.initializer.is_some() {
                let span = arena.span(decl.name);
                self.check_expression_assignable(decl.initializer, &declared, span, false);
            }
            if let Some(symbol) = symbol {
                self.ctx.symbol_types.entry(symbol).or_insert(declared);
            }
            return;
        }
        if decl.initializer.is_none() {
            return;
        }
        // The first declaration of an unresolved symbol computes its type
        // from the initializer; every other case just checks the initializer.
        if let Some(symbol) = symbol
            && !self.ctx.symbol_types.contains_key(&symbol)
            && self
                .ctx
                .binder
                .symbol(symbol)
                .declarations
                .first()
                .is_some_and(|d| d.node == idx)
        {
            self.get_type_of_symbol(symbol);
        } else {
            self.get_type_of_expression(decl.initializer);
        }
    }

    fn check_for_initializer(&mut self, initializer: NodeIndex) {
        match self.ctx.arena.data(initializer) {
            Some(NodeData::VariableDeclarationList { .. }) => {
                self.check_variable_declaration_list(initializer)
            }
            _ => {
                self.get_type_of_expression(initializer);
            }
        }
    }

    /// The variable of a `for-in`/`for-of` loop takes the iterated element
    /// type unless it is annotated.
    fn check_loop_variable(&mut self, initializer: NodeIndex, element: Type) {
        let arena = self.ctx.arena;
        let Some(NodeData::VariableDeclarationList { declarations, .. }) = arena.data(initializer) else {
            self.get_type_of_expression(initializer);
            return;
        };
        for &declaration in declarations {
            let Some(NodeData::VariableDeclaration(decl)) = arena.data(declaration) else {
                continue;
            };
            self.check_binding_name(decl.name);
            let ty = if decl.type_annotation.is_some() {
                self.resolve_type_node(decl.type_annotation)
            } else {
                element.clone()
            };
            if let Some(symbol) = self.ctx.binder.symbol_of_name(decl.name) {
                self.ctx.symbol_types.entry(symbol).or_insert(ty);
            }
        }
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    fn check_return_statement(&mut self, idx: NodeIndex, expression: NodeIndex) {
        if expression.is_none() {
            return;
        }
        match self.ctx.return_types.last().cloned().flatten() {
            Some(expected) => {
                let start = self.ctx.arena.span(idx).start;
                let span = Span::new(start, start + RETURN_KEYWORD_LEN);
                self.check_expression_assignable(expression, &expected, span, false);
            }
            None => {
                self.get_type_of_expression(expression);
            }
        }
    }

    fn check_switch_clause(&mut self, clause: NodeIndex) {
        let arena = self.ctx.arena;
        let statements = match arena.data(clause) {
            Some(NodeData::CaseClause {
                expression,
                statements,
            }) => {
                self.get_type_of_expression(*expression);
                statements
            }
            Some(NodeData::DefaultClause { statements }) => statements,
            _ => return,
        };
        for &statement in statements {
            self.check_statement(statement);
        }
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub(crate) fn check_class(&mut self, idx: NodeIndex, class: &ClassData) {
        let arena = self.ctx.arena;
        for &decorator in &class.decorators {
            if let Some(NodeData::Decorator { expression }) = arena.data(decorator) {
                self.get_type_of_expression(*expression);
            }
        }
        self.with_node_scope(idx, |checker| {
            checker.check_type_parameters(&class.type_parameters);
            if class.extends.is_some() {
                checker.get_type_of_expression(class.extends);
            }
            for &clause in &class.implements {
                checker.check_heritage_type(clause);
            }
            for &member in &class.members {
                checker.check_class_member(member);
            }
        });
    }

    fn check_class_member(&mut self, member: NodeIndex) {
        let arena = self.ctx.arena;
        match arena.data(member) {
            Some(NodeData::PropertyDeclaration(property)) => {
                for &decorator in &property.decorators {
                    if let Some(NodeData::Decorator { expression }) = arena.data(decorator) {
                        self.get_type_of_expression(*expression);
                    }
                }
                self.check_computed_name(property.name);
                if property.type_annotation.is_some() {
                    let declared = self.resolve_type_node(property.type_annotation);
                    if property.initializer.is_some() {
                        let span = arena.span(property.name);
                        self.check_expression_assignable(property.initializer, &declared, span, false);
                    }
                } else if property.initializer.is_some() {
                    self.get_type_of_expression(property.initializer);
                }
            }
            Some(
                NodeData::MethodDeclaration(function)
                | NodeData::Constructor(function)
                | NodeData::GetAccessor(function)
                | NodeData::SetAccessor(function),
            ) => {
                self.check_computed_name(function.name);
                self.check_function_like(member, function);
            }
            Some(NodeData::ClassStaticBlock { body }) => {
                let body = *body;
                self.with_node_scope(member, |checker| {
                    for &statement in arena.statements(body) {
                        checker.check_statement(statement);
                    }
                });
            }
            Some(NodeData::IndexSignature {
                parameters,
                type_annotation,
                ..
            }) => {
                for &parameter in parameters {
                    if let Some(NodeData::Parameter(param)) = arena.data(parameter) {
                        self.resolve_type_node(param.type_annotation);
                    }
                }
                self.resolve_type_node(*type_annotation);
            }
            _ => {}
        }
    }

    /// `implements X` and interface `extends X`: the leftmost name must
    /// resolve to something.
    fn check_heritage_type(&mut self, clause: NodeIndex) {
        let arena = self.ctx.arena;
        let Some(NodeData::ExpressionWithTypeArguments {
            expression,
            type_arguments,
        }) = arena.data(clause)
        else {
            return;
        };
        for &argument in type_arguments {
            self.resolve_type_node(argument);
        }
        self.check_entity_name_resolves(*expression);
    }

    /// TS2304 on the leftmost identifier of `a.b.c` when it resolves to
    /// nothing local or global.
    fn check_entity_name_resolves(&mut self, entity: NodeIndex) {
        let arena = self.ctx.arena;
        let leftmost = arena.leftmost_identifier(entity);
        let Some(name) = arena.identifier_text(leftmost) else {
            return;
        };
        if self
            .resolve_name(name, SymbolFlags::VALUE | SymbolFlags::TYPE)
            .is_none()
            && !is_global_type(name)
            && !is_global_value(name)
        {
            self.error_cannot_find_name(name, leftmost);
        }
    }

    // =========================================================================
    // Enums and modules
    // =========================================================================

    /// Member initializers may refer to earlier members by bare name.
    fn check_enum_members(&mut self, members: &[NodeIndex]) {
        let arena = self.ctx.arena;
        let names: Vec<String> = members
            .iter()
            .filter_map(|&member| match arena.data(member) {
                Some(NodeData::EnumMember { name, .. }) => {
                    arena.property_name_text(*name).map(str::to_string)
                }
                _ => None,
            })
            .collect();
        let pushed = names.len();
        self.ctx.enum_member_names.extend(names);
        for &member in members {
            if let Some(NodeData::EnumMember { name, initializer }) = arena.data(member) {
                self.check_computed_name(*name);
                if initializer.is_some() {
                    self.get_type_of_expression(*initializer);
                }
            }
        }
        let len = self.ctx.enum_member_names.len();
        self.ctx.enum_member_names.truncate(len - pushed);
    }

    /// `import x = require("m")` checks the module; `import x = a.b`
    /// checks the namespace name.
    fn check_module_reference(&mut self, reference: NodeIndex) {
        match self.ctx.arena.data(reference) {
            Some(NodeData::ExternalModuleReference { expression }) => {
                self.check_module_specifier(*expression);
            }
            _ => self.check_entity_name_resolves(reference),
        }
    }

    /// `export { a as b }` without a module specifier must name a local.
    fn check_local_export(&mut self, specifier: NodeIndex) {
        let arena = self.ctx.arena;
        let Some(NodeData::ExportSpecifier {
            property_name,
            name,
            ..
        }) = arena.data(specifier)
        else {
            return;
        };
        let local = if property_name.is_some() {
            *property_name
        } else {
            *name
        };
        // String-literal export names have no local binding to check.
        if arena.identifier_text(local).is_some() {
            self.check_entity_name_resolves(local);
        }
    }
}

