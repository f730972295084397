//! Lowerings for TypeScript-only runtime constructs.
//!
//! - `enum_iife` - enums to an IIFE filling a forward/reverse map
//! - `namespace_iife` - instantiated namespaces to an IIFE over an object
//!
//! Both attach to `Printer` and share the declaration rules in this module:
//! the first declaration of a name in a scope introduces the binding, later
//! (merged) declarations reuse it.

mod enum_iife;
mod namespace_iife;

pub use enum_iife::{EnumValue, evaluate_numeric_literal, format_number};

use tsz_parser::ModifierFlags;

use crate::emitter::Printer;

impl<'a> Printer<'a> {
    /// `var X;` at top level (`export var X;` when exported), `let X;`
    /// inside a namespace. Skipped when `X` is already declared here.
    pub(crate) fn write_iife_binding(&mut self, name: &str, modifiers: ModifierFlags) {
        let already_declared = self
            .declared_names
            .last()
            .is_some_and(|scope| scope.contains(name));
        if already_declared {
            return;
        }
        self.declare_name(name);
        if self.namespace_stack.is_empty() {
            self.write_export_modifiers(modifiers - ModifierFlags::DEFAULT);
            self.write("var ");
        } else {
            self.write("let ");
        }
        self.write_identifier(name);
        self.write_semicolon();
        self.write_line();
    }

    /// Open `(function (X) {` and indent the body.
    pub(crate) fn open_iife(&mut self, name: &str) {
        self.write("(function (");
        self.write_identifier(name);
        self.write(") {");
        self.write_line();
        self.increase_indent();
    }

    /// Close with `})(X || (X = {}));`, or `})(X = NS.X || (NS.X = {}));`
    /// for a member exported from the enclosing namespace.
    pub(crate) fn close_iife(&mut self, name: &str, exported: bool) {
        self.decrease_indent();
        self.writer.ensure_line();
        let argument = match self.current_namespace() {
            Some(parent) if exported => format!("{name} = {parent}.{name} || ({parent}.{name} = {{}})"),
            _ => format!("{name} || ({name} = {{}})"),
        };
        self.write(&format!("}})({argument});"));
    }
}
