use tsz_parser::{NodeData, NodeIndex};
use tsz_scanner::SyntaxKind;

use super::Printer;

impl<'a> Printer<'a> {
    // =========================================================================
    // Literals
    // =========================================================================

    /// Literals print their raw source text so escapes, quotes and numeric
    /// spelling survive unchanged.
    pub(super) fn emit_literal(&mut self, idx: NodeIndex, kind: SyntaxKind, cooked: &str) {
        let raw = self.source_slice(idx);
        if !raw.is_empty() {
            self.write(raw);
            return;
        }
        match kind {
            SyntaxKind::StringLiteral => self.write(&quote_string(cooked)),
            _ => self.write(cooked),
        }
    }

    pub(super) fn emit_template_expression(&mut self, head: NodeIndex, spans: &[NodeIndex]) {
        self.emit(head);
        for &span in spans {
            self.emit(span);
        }
    }

    pub(super) fn emit_array_literal(&mut self, elements: &[NodeIndex], multi_line: bool) {
        if elements.is_empty() {
            self.write("[]");
            return;
        }
        self.write("[");
        if multi_line {
            self.write_line();
            self.increase_indent();
        }
        for (i, &element) in elements.iter().enumerate() {
            if i > 0 {
                if multi_line {
                    self.write(",");
                    self.write_line();
                } else {
                    self.write(", ");
                }
            }
            self.emit(element);
        }
        // A trailing hole needs its comma: `[a, ,]` has two elements
        if let Some(&last) = elements.last()
            && matches!(self.arena.data(last), Some(NodeData::OmittedExpression))
        {
            self.write(",");
        }
        if multi_line {
            self.decrease_indent();
            self.write_line();
        }
        self.write("]");
    }

    pub(super) fn emit_object_literal(&mut self, properties: &[NodeIndex], multi_line: bool) {
        if properties.is_empty() {
            self.write("{}");
            return;
        }
        if !multi_line {
            self.write("{ ");
            self.emit_comma_separated(properties);
            self.write(" }");
            return;
        }
        self.write("{");
        self.write_line();
        self.increase_indent();
        for (i, &property) in properties.iter().enumerate() {
            if i > 0 {
                self.write(",");
                self.write_line();
            }
            self.emit(property);
        }
        self.decrease_indent();
        self.write_line();
        self.write("}");
    }

    /// Property and member names: identifiers, private names, string and
    /// numeric literals, and computed names.
    pub(crate) fn emit_property_name(&mut self, name: NodeIndex) {
        match self.arena.data(name) {
            Some(NodeData::Identifier { text } | NodeData::PrivateIdentifier { text }) => {
                self.write_identifier(text)
            }
            _ => self.emit(name),
        }
    }

    /// `{ x }` keeps its shorthand unless `x` is rewritten, as for exported
    /// namespace members: `{ x: NS.x }`.
    pub(super) fn emit_shorthand_property(&mut self, name: NodeIndex, initializer: NodeIndex) {
        let text = self.name_text(name);
        match self.lookup_substitution(text) {
            Some(replacement) if initializer.is_none() => {
                self.write_identifier(text);
                self.write(": ");
                self.write(&replacement);
            }
            _ => {
                self.write_identifier(text);
                if initializer.is_some() {
                    self.write(" = ");
                    self.emit(initializer);
                }
            }
        }
    }
}

/// A double-quoted JavaScript string literal for `value`.
pub(crate) fn quote_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}
