use tsz_parser::{ModifierFlags, NodeData, NodeIndex};
use tsz_scanner::{SyntaxKind, token_to_text};

use super::Printer;

impl<'a> Printer<'a> {
    // =========================================================================
    // Output Helpers (delegate to SourceWriter)
    // =========================================================================

    /// Write text to output, attaching any pending source position.
    pub(crate) fn write(&mut self, text: &str) {
        if let Some(source_pos) = self.pending_source_pos.take() {
            self.writer.write_node(text, source_pos);
        } else {
            self.writer.write(text);
        }
    }

    pub(crate) fn write_identifier(&mut self, text: &str) {
        self.write(text);
    }

    pub(crate) fn write_line(&mut self) {
        self.writer.write_line();
    }

    pub(crate) fn write_space(&mut self) {
        self.writer.write_space();
    }

    pub(crate) fn write_semicolon(&mut self) {
        self.write(";");
    }

    pub(crate) fn increase_indent(&mut self) {
        self.writer.increase_indent();
    }

    pub(crate) fn decrease_indent(&mut self) {
        self.writer.decrease_indent();
    }

    /// Text of a fixed token such as an operator or keyword.
    pub(crate) fn write_operator(&mut self, kind: SyntaxKind) {
        self.write(token_to_text(kind).unwrap_or_default());
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// Text of an identifier node, or `""`.
    pub(crate) fn name_text(&self, idx: NodeIndex) -> &'a str {
        self.arena.identifier_text(idx).unwrap_or_default()
    }

    /// Write an identifier exactly as declared, without substitution.
    pub(crate) fn write_name(&mut self, idx: NodeIndex) {
        let text = self.name_text(idx);
        self.write_identifier(text);
    }

    /// Source text covered by a node.
    pub(crate) fn source_slice(&self, idx: NodeIndex) -> &'a str {
        self.arena.span(idx).slice(self.source_text)
    }

    pub(crate) fn is_single_line_in_source(&self, idx: NodeIndex) -> bool {
        !self.source_slice(idx).contains('\n')
    }

    /// Replacement for a reference to `name` in the current scope.
    pub(crate) fn lookup_substitution(&self, name: &str) -> Option<String> {
        self.substitutions
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).cloned())
    }

    pub(crate) fn emit_identifier_reference(&mut self, text: &str) {
        match self.lookup_substitution(text) {
            Some(replacement) => self.write(&replacement),
            None => self.write_identifier(text),
        }
    }

    // =========================================================================
    // Lists
    // =========================================================================

    pub(crate) fn emit_comma_separated(&mut self, nodes: &[NodeIndex]) {
        for (i, &idx) in nodes.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit(idx);
        }
    }

    /// Emit statements one per line. Statements that print nothing (types,
    /// ambient declarations) leave no blank line behind.
    pub(crate) fn emit_statements(&mut self, statements: &[NodeIndex]) {
        for &statement in statements {
            let before = self.writer.len();
            self.emit(statement);
            if self.writer.len() > before {
                self.writer.ensure_line();
            } else {
                self.clear_pending_source_pos();
            }
        }
    }

    pub(crate) fn emit_decorators_on_lines(&mut self, decorators: &[NodeIndex]) {
        for &decorator in decorators {
            self.emit(decorator);
            self.write_line();
        }
    }

    // =========================================================================
    // Modifier Helpers
    // =========================================================================

    pub(crate) fn current_namespace(&self) -> Option<String> {
        self.namespace_stack.last().cloned()
    }

    /// `export ` / `export default ` for a top-level declaration.
    pub(crate) fn write_export_modifiers(&mut self, modifiers: ModifierFlags) {
        if !modifiers.contains(ModifierFlags::EXPORT) || !self.namespace_stack.is_empty() {
            return;
        }
        self.wrote_module_syntax = true;
        self.write("export ");
        if modifiers.contains(ModifierFlags::DEFAULT) {
            self.write("default ");
        }
    }

    /// `NS.name = name;` after an exported function or class inside a
    /// namespace body.
    pub(crate) fn write_namespace_export(&mut self, modifiers: ModifierFlags, name: &str) {
        if !modifiers.contains(ModifierFlags::EXPORT) || name.is_empty() {
            return;
        }
        let Some(namespace) = self.current_namespace() else {
            return;
        };
        self.writer.ensure_line();
        self.write(&format!("{namespace}.{name} = {name};"));
    }

    pub(crate) fn declare_name(&mut self, name: &str) {
        if let Some(scope) = self.declared_names.last_mut() {
            scope.insert(name.to_string());
        }
    }

    /// Whether a statement is an ambient or type-only declaration that
    /// produces no JavaScript.
    pub(crate) fn is_erased_statement(&self, idx: NodeIndex) -> bool {
        match self.arena.data(idx) {
            Some(NodeData::InterfaceDeclaration { .. } | NodeData::TypeAliasDeclaration { .. }) => true,
            Some(
                NodeData::VariableStatement { modifiers, .. }
                | NodeData::EnumDeclaration { modifiers, .. },
            ) => modifiers.contains(ModifierFlags::DECLARE),
            Some(NodeData::FunctionDeclaration(function)) => {
                function.modifiers.contains(ModifierFlags::DECLARE) || function.body.is_none()
            }
            Some(NodeData::ClassDeclaration(class)) => class.modifiers.contains(ModifierFlags::DECLARE),
            Some(NodeData::ModuleDeclaration(module)) => !self.is_instantiated_module(module),
            Some(NodeData::ImportEqualsDeclaration { is_type_only, .. }) => *is_type_only,
            Some(NodeData::ExportDeclaration(export)) => export.is_type_only,
            _ => false,
        }
    }
}
