//! Namespace lowering.
//!
//! ```typescript
//! namespace A.B {
//!     export const x = 1;
//!     export function f() { return x; }
//! }
//! ```
//!
//! Becomes:
//!
//! ```javascript
//! var A;
//! (function (A) {
//!     let B;
//!     (function (B) {
//!         B.x = 1;
//!         function f() { return B.x; }
//!         B.f = f;
//!     })(B = A.B || (A.B = {}));
//! })(A || (A = {}));
//! ```
//!
//! Namespaces holding only types are not instantiated and emit nothing.

use rustc_hash::{FxHashMap, FxHashSet};
use tsz_parser::{ModifierFlags, ModuleDeclData, NodeData, NodeIndex};

use crate::emitter::Printer;

impl<'a> Printer<'a> {
    pub(crate) fn emit_module_declaration(&mut self, module: &ModuleDeclData) {
        if module.modifiers.contains(ModifierFlags::DECLARE) || module.is_global {
            return;
        }
        // `module "name" {}` is always ambient
        if self.arena.identifier_text(module.name).is_none() || !self.is_instantiated_module(module) {
            return;
        }
        self.emit_namespace_iife(module.modifiers, module.name, module.body);
    }

    fn emit_namespace_iife(&mut self, modifiers: ModifierFlags, name: NodeIndex, body: NodeIndex) {
        let arena = self.arena;
        let namespace = self.name_text(name);
        self.write_iife_binding(namespace, modifiers);
        self.open_iife(namespace);
        self.namespace_stack.push(namespace.to_string());

        match arena.data(body) {
            Some(NodeData::ModuleBlock { statements }) => {
                let exported = self.exported_variable_names(statements);
                self.substitutions.push(
                    exported
                        .into_iter()
                        .map(|variable| (variable.to_string(), format!("{namespace}.{variable}")))
                        .collect::<FxHashMap<_, _>>(),
                );
                self.declared_names.push(FxHashSet::default());
                self.emit_statements(statements);
                self.declared_names.pop();
                self.substitutions.pop();
            }
            // `namespace A.B {}`: the inner namespace is an implicit export
            Some(NodeData::ModuleDeclaration(inner)) => {
                self.declared_names.push(FxHashSet::default());
                self.emit_namespace_iife(ModifierFlags::EXPORT, inner.name, inner.body);
                self.declared_names.pop();
            }
            _ => {}
        }

        self.namespace_stack.pop();
        self.close_iife(namespace, modifiers.contains(ModifierFlags::EXPORT));
    }

    /// Exported variables live only on the namespace object, so every
    /// reference to them is qualified.
    fn exported_variable_names(&self, statements: &[NodeIndex]) -> Vec<&'a str> {
        let arena = self.arena;
        let mut names = Vec::new();
        for &statement in statements {
            let Some(NodeData::VariableStatement {
                modifiers,
                declaration_list,
            }) = arena.data(statement)
            else {
                continue;
            };
            if !modifiers.contains(ModifierFlags::EXPORT) || modifiers.contains(ModifierFlags::DECLARE) {
                continue;
            }
            let Some(NodeData::VariableDeclarationList { declarations, .. }) = arena.data(*declaration_list)
            else {
                continue;
            };
            for &declaration in declarations {
                if let Some(NodeData::VariableDeclaration(data)) = arena.data(declaration)
                    && let Some(name) = arena.identifier_text(data.name)
                {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Whether a namespace declares any runtime value.
    pub(crate) fn is_instantiated_module(&self, module: &ModuleDeclData) -> bool {
        if module.modifiers.contains(ModifierFlags::DECLARE) || module.is_global {
            return false;
        }
        match self.arena.data(module.body) {
            Some(NodeData::ModuleBlock { statements }) => statements
                .iter()
                .any(|&statement| !self.is_erased_statement(statement) && !self.is_export_declaration(statement)),
            Some(NodeData::ModuleDeclaration(inner)) => self.is_instantiated_module(inner),
            _ => false,
        }
    }

    /// Re-exports inside a namespace body produce no code.
    fn is_export_declaration(&self, statement: NodeIndex) -> bool {
        matches!(self.arena.data(statement), Some(NodeData::ExportDeclaration(_)))
    }
}
