use tsz_parser::{ModifierFlags, NodeData, NodeIndex, VariableDeclarationData, VariableKind};

use super::Printer;

impl<'a> Printer<'a> {
    // =========================================================================
    // Statements
    // =========================================================================

    pub(super) fn emit_block(&mut self, idx: NodeIndex, statements: &[NodeIndex]) {
        let single_line = self.is_single_line_in_source(idx);
        if statements.is_empty() {
            if single_line {
                self.write("{ }");
            } else {
                self.write("{");
                self.write_line();
                self.write("}");
            }
            return;
        }

        // Keep `{ return x; }` on one line when the source had it that way
        if single_line && statements.len() == 1 && self.is_simple_statement(statements[0]) {
            self.write("{ ");
            self.emit(statements[0]);
            self.write(" }");
            return;
        }

        self.write("{");
        self.write_line();
        self.increase_indent();
        self.emit_statements(statements);
        self.decrease_indent();
        self.write("}");
    }

    fn is_simple_statement(&self, idx: NodeIndex) -> bool {
        matches!(
            self.arena.data(idx),
            Some(
                NodeData::ExpressionStatement { .. }
                    | NodeData::ReturnStatement { .. }
                    | NodeData::ThrowStatement { .. }
                    | NodeData::BreakStatement { .. }
                    | NodeData::ContinueStatement { .. }
                    | NodeData::VariableStatement { .. }
            )
        ) && !self.is_erased_statement(idx)
    }

    /// The body of `if`, loops and `else`: blocks stay on the same line,
    /// anything else moves to an indented line of its own.
    pub(super) fn emit_embedded_statement(&mut self, statement: NodeIndex) {
        if matches!(self.arena.data(statement), Some(NodeData::Block { .. })) {
            self.write_space();
            self.emit(statement);
        } else {
            self.write_line();
            self.increase_indent();
            self.emit(statement);
            self.decrease_indent();
        }
    }

    // =========================================================================
    // Variables
    // =========================================================================

    pub(super) fn emit_variable_statement(&mut self, modifiers: ModifierFlags, list: NodeIndex) {
        if modifiers.contains(ModifierFlags::DECLARE) {
            return;
        }
        if modifiers.contains(ModifierFlags::EXPORT)
            && let Some(namespace) = self.current_namespace()
        {
            self.emit_namespace_exported_variables(&namespace, list);
            return;
        }
        self.write_export_modifiers(modifiers);
        self.emit(list);
        self.write_semicolon();
    }

    pub(super) fn emit_variable_declaration_list(&mut self, kind: VariableKind, declarations: &[NodeIndex]) {
        self.write(kind.keyword());
        self.write_space();
        self.emit_comma_separated(declarations);
    }

    pub(super) fn emit_variable_declaration(&mut self, declaration: &VariableDeclarationData) {
        self.emit_binding_name(declaration.name);
        if declaration.initializer.is_some() {
            self.write(" = ");
            self.emit(declaration.initializer);
        }
    }

    /// `export const x = 1` inside a namespace becomes `NS.x = 1;`. Exported
    /// destructuring keeps a local declaration and copies each name out.
    fn emit_namespace_exported_variables(&mut self, namespace: &str, list: NodeIndex) {
        let arena = self.arena;
        let Some(NodeData::VariableDeclarationList { kind, declarations }) = arena.data(list) else {
            return;
        };
        for &declaration in declarations {
            let Some(NodeData::VariableDeclaration(data)) = arena.data(declaration) else {
                continue;
            };
            if data.initializer.is_none() {
                continue;
            }
            self.writer.ensure_line();
            if let Some(name) = arena.identifier_text(data.name) {
                self.write(&format!("{namespace}.{name} = "));
                self.emit(data.initializer);
                self.write_semicolon();
                continue;
            }

            self.write(kind.keyword());
            self.write_space();
            self.emit_variable_declaration(data);
            self.write_semicolon();
            let mut names = Vec::new();
            self.collect_bound_names(data.name, &mut names);
            for name in names {
                self.write_line();
                self.write(&format!("{namespace}.{name} = {name};"));
            }
        }
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    pub(super) fn emit_if_statement(
        &mut self,
        expression: NodeIndex,
        then_statement: NodeIndex,
        else_statement: NodeIndex,
    ) {
        self.write("if (");
        self.emit(expression);
        self.write(")");
        self.emit_embedded_statement(then_statement);
        if else_statement.is_none() {
            return;
        }
        if matches!(self.arena.data(then_statement), Some(NodeData::Block { .. })) {
            self.write_space();
        } else {
            self.write_line();
        }
        self.write("else");
        if matches!(self.arena.data(else_statement), Some(NodeData::IfStatement { .. })) {
            self.write_space();
            self.emit(else_statement);
        } else {
            self.emit_embedded_statement(else_statement);
        }
    }

    pub(super) fn emit_do_statement(&mut self, statement: NodeIndex, expression: NodeIndex) {
        self.write("do");
        self.emit_embedded_statement(statement);
        if matches!(self.arena.data(statement), Some(NodeData::Block { .. })) {
            self.write_space();
        } else {
            self.write_line();
        }
        self.write("while (");
        self.emit(expression);
        self.write(");");
    }

    pub(super) fn emit_for_statement(
        &mut self,
        initializer: NodeIndex,
        condition: NodeIndex,
        incrementor: NodeIndex,
        statement: NodeIndex,
    ) {
        self.write("for (");
        self.emit(initializer);
        self.write(";");
        if condition.is_some() {
            self.write_space();
            self.emit(condition);
        }
        self.write(";");
        if incrementor.is_some() {
            self.write_space();
            self.emit(incrementor);
        }
        self.write(")");
        self.emit_embedded_statement(statement);
    }

    pub(super) fn emit_jump(&mut self, keyword: &str, label: NodeIndex) {
        self.write(keyword);
        if label.is_some() {
            self.write_space();
            self.write_name(label);
        }
        self.write_semicolon();
    }

    pub(super) fn emit_switch_statement(&mut self, expression: NodeIndex, clauses: &[NodeIndex]) {
        let arena = self.arena;
        self.write("switch (");
        self.emit(expression);
        self.write(") {");
        self.write_line();
        self.increase_indent();
        for &clause in clauses {
            let statements = match arena.data(clause) {
                Some(NodeData::CaseClause {
                    expression,
                    statements,
                }) => {
                    self.write("case ");
                    self.emit(*expression);
                    self.write(":");
                    statements
                }
                Some(NodeData::DefaultClause { statements }) => {
                    self.write("default:");
                    statements
                }
                _ => continue,
            };
            if let [only] = statements.as_slice()
                && matches!(arena.data(*only), Some(NodeData::Block { .. }))
            {
                self.write_space();
                self.emit(*only);
            } else if !statements.is_empty() {
                self.write_line();
                self.increase_indent();
                self.emit_statements(statements);
                self.decrease_indent();
            }
            self.writer.ensure_line();
        }
        self.decrease_indent();
        self.write("}");
    }

    pub(super) fn emit_try_statement(
        &mut self,
        try_block: NodeIndex,
        catch_clause: NodeIndex,
        finally_block: NodeIndex,
    ) {
        self.write("try ");
        self.emit(try_block);
        if let Some(NodeData::CatchClause {
            variable_declaration,
            block,
        }) = self.arena.data(catch_clause)
        {
            self.write(" catch ");
            if let Some(NodeData::VariableDeclaration(declaration)) =
                self.arena.data(*variable_declaration)
            {
                self.write("(");
                self.emit_binding_name(declaration.name);
                self.write(") ");
            }
            self.emit(*block);
        }
        if finally_block.is_some() {
            self.write(" finally ");
            self.emit(finally_block);
        }
    }
}
