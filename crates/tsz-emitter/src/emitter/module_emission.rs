use rustc_hash::FxHashSet;
use tsz_parser::{ExportDeclData, ImportDeclData, ModifierFlags, NodeData, NodeIndex};

use super::jsx::JSX_FACTORY_ROOT;
use super::{Printer, STACK_GROWTH, STACK_RED_ZONE};

impl<'a> Printer<'a> {
    // =========================================================================
    // Module analysis
    // =========================================================================

    /// A file with any top-level import or export is an ES module.
    pub(super) fn is_external_module(&self, statements: &[NodeIndex]) -> bool {
        statements.iter().any(|&statement| match self.arena.data(statement) {
            Some(
                NodeData::ImportDeclaration(_)
                | NodeData::ExportDeclaration(_)
                | NodeData::ExportAssignment { .. },
            ) => true,
            Some(NodeData::ImportEqualsDeclaration {
                modifiers,
                module_reference,
                ..
            }) => {
                modifiers.contains(ModifierFlags::EXPORT)
                    || matches!(
                        self.arena.data(*module_reference),
                        Some(NodeData::ExternalModuleReference { .. })
                    )
            }
            Some(
                NodeData::VariableStatement { modifiers, .. }
                | NodeData::InterfaceDeclaration { modifiers, .. }
                | NodeData::TypeAliasDeclaration { modifiers, .. }
                | NodeData::EnumDeclaration { modifiers, .. },
            ) => modifiers.contains(ModifierFlags::EXPORT),
            Some(NodeData::FunctionDeclaration(function)) => {
                function.modifiers.contains(ModifierFlags::EXPORT)
            }
            Some(NodeData::ClassDeclaration(class)) => class.modifiers.contains(ModifierFlags::EXPORT),
            Some(NodeData::ModuleDeclaration(module)) => module.modifiers.contains(ModifierFlags::EXPORT),
            _ => false,
        })
    }

    /// Collect every identifier read in a value position. Type syntax,
    /// type-only declarations, member names and import clauses are skipped.
    pub(super) fn collect_value_references(&self, idx: NodeIndex, out: &mut FxHashSet<String>) {
        if idx.is_none() {
            return;
        }
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || {
            self.collect_value_references_worker(idx, out)
        })
    }

    fn collect_value_references_worker(&self, idx: NodeIndex, out: &mut FxHashSet<String>) {
        let arena = self.arena;
        let Some(data) = arena.data(idx) else {
            return;
        };
        if data.is_type_node() {
            return;
        }
        match data {
            NodeData::Identifier { text } => {
                out.insert(text.clone());
            }
            NodeData::InterfaceDeclaration { .. }
            | NodeData::TypeAliasDeclaration { .. }
            | NodeData::ImportDeclaration(_) => {}
            NodeData::ImportEqualsDeclaration {
                module_reference, ..
            } => self.collect_value_references(*module_reference, out),
            NodeData::QualifiedName { left, .. }
            | NodeData::PropertyAccessExpression {
                expression: left, ..
            } => self.collect_value_references(*left, out),
            NodeData::PropertyAssignment { name, initializer } => {
                self.collect_computed_name(*name, out);
                self.collect_value_references(*initializer, out);
            }
            NodeData::ExportDeclaration(export) => {
                if export.is_type_only || export.module_specifier.is_some() {
                    return;
                }
                if let Some(NodeData::NamedExports { elements }) = arena.data(export.export_clause) {
                    for &element in elements {
                        if let Some(NodeData::ExportSpecifier {
                            is_type_only: false,
                            property_name,
                            name,
                        }) = arena.data(element)
                        {
                            let local = if property_name.is_some() { *property_name } else { *name };
                            if let Some(text) = arena.identifier_text(local) {
                                out.insert(text.to_string());
                            }
                        }
                    }
                }
            }
            NodeData::ClassDeclaration(class) | NodeData::ClassExpression(class) => {
                for &decorator in &class.decorators {
                    self.collect_value_references(decorator, out);
                }
                self.collect_value_references(class.extends, out);
                for &member in &class.members {
                    self.collect_value_references(member, out);
                }
            }
            NodeData::MethodDeclaration(function)
            | NodeData::GetAccessor(function)
            | NodeData::SetAccessor(function) => {
                for &decorator in &function.decorators {
                    self.collect_value_references(decorator, out);
                }
                self.collect_computed_name(function.name, out);
                for &parameter in &function.parameters {
                    self.collect_value_references(parameter, out);
                }
                self.collect_value_references(function.body, out);
            }
            NodeData::PropertyDeclaration(property) => {
                for &decorator in &property.decorators {
                    self.collect_value_references(decorator, out);
                }
                self.collect_computed_name(property.name, out);
                self.collect_value_references(property.initializer, out);
            }
            NodeData::EnumMember { name, initializer } => {
                self.collect_computed_name(*name, out);
                self.collect_value_references(*initializer, out);
            }
            NodeData::JsxOpeningElement {
                tag_name,
                attributes,
                ..
            }
            | NodeData::JsxSelfClosingElement {
                tag_name,
                attributes,
                ..
            } => {
                out.insert(JSX_FACTORY_ROOT.to_string());
                if !arena.is_intrinsic_jsx_tag(*tag_name) {
                    self.collect_value_references(*tag_name, out);
                }
                for &attribute in attributes {
                    self.collect_value_references(attribute, out);
                }
            }
            NodeData::JsxElement {
                opening, children, ..
            } => {
                self.collect_value_references(*opening, out);
                for &child in children {
                    self.collect_value_references(child, out);
                }
            }
            NodeData::JsxFragment { children } => {
                out.insert(JSX_FACTORY_ROOT.to_string());
                for &child in children {
                    self.collect_value_references(child, out);
                }
            }
            NodeData::JsxAttribute { initializer, .. } => {
                self.collect_value_references(*initializer, out)
            }
            _ => {
                for child in arena.children(idx) {
                    self.collect_value_references(child, out);
                }
            }
        }
    }

    fn collect_computed_name(&self, name: NodeIndex, out: &mut FxHashSet<String>) {
        if let Some(NodeData::ComputedPropertyName { expression }) = self.arena.data(name) {
            self.collect_value_references(*expression, out);
        }
    }

    /// Top-level names declared only as types: interfaces, type aliases,
    /// uninstantiated namespaces and type-only imports. A name that also
    /// has a value declaration is not type-only.
    pub(super) fn collect_type_only_names(&self, statements: &[NodeIndex]) -> FxHashSet<String> {
        let arena = self.arena;
        let mut types = FxHashSet::default();
        let mut values = FxHashSet::default();
        for &statement in statements {
            match arena.data(statement) {
                Some(
                    NodeData::InterfaceDeclaration { name, .. }
                    | NodeData::TypeAliasDeclaration { name, .. },
                ) => {
                    types.insert(self.name_text(*name));
                }
                Some(NodeData::ModuleDeclaration(module)) => {
                    if self.is_instantiated_module(module) {
                        values.insert(self.name_text(module.name));
                    } else {
                        types.insert(self.name_text(module.name));
                    }
                }
                Some(NodeData::ImportDeclaration(import)) => {
                    self.collect_import_names(import, &mut types, &mut values);
                }
                Some(NodeData::VariableStatement {
                    declaration_list, ..
                }) => {
                    if let Some(NodeData::VariableDeclarationList { declarations, .. }) =
                        arena.data(*declaration_list)
                    {
                        for &declaration in declarations {
                            if let Some(NodeData::VariableDeclaration(data)) = arena.data(declaration) {
                                let mut names = Vec::new();
                                self.collect_bound_names(data.name, &mut names);
                                values.extend(names);
                            }
                        }
                    }
                }
                Some(NodeData::FunctionDeclaration(function)) => {
                    values.insert(self.name_text(function.name));
                }
                Some(NodeData::ClassDeclaration(class)) => {
                    values.insert(self.name_text(class.name));
                }
                Some(NodeData::EnumDeclaration { name, .. }) => {
                    values.insert(self.name_text(*name));
                }
                _ => {}
            }
        }
        types
            .into_iter()
            .filter(|name| !name.is_empty() && !values.contains(name))
            .map(str::to_string)
            .collect()
    }

    fn collect_import_names(
        &self,
        import: &ImportDeclData,
        types: &mut FxHashSet<&'a str>,
        values: &mut FxHashSet<&'a str>,
    ) {
        let arena = self.arena;
        let Some(NodeData::ImportClause {
            is_type_only,
            name,
            named_bindings,
        }) = arena.data(import.import_clause)
        else {
            return;
        };
        let mut add = |name: NodeIndex, type_only: bool| {
            let text = self.name_text(name);
            if type_only {
                types.insert(text);
            } else {
                values.insert(text);
            }
        };
        if name.is_some() {
            add(*name, *is_type_only);
        }
        match arena.data(*named_bindings) {
            Some(NodeData::NamespaceImport { name }) => add(*name, *is_type_only),
            Some(NodeData::NamedImports { elements }) => {
                for &element in elements {
                    if let Some(NodeData::ImportSpecifier {
                        is_type_only: specifier_type_only,
                        name,
                        ..
                    }) = arena.data(element)
                    {
                        add(*name, *is_type_only || *specifier_type_only);
                    }
                }
            }
            _ => {}
        }
    }

    fn is_value_referenced(&self, name: NodeIndex) -> bool {
        self.value_references.contains(self.name_text(name))
    }

    // =========================================================================
    // Imports
    // =========================================================================

    /// Imports keep only the bindings read as values. An import whose
    /// bindings are all elided disappears; `import "m";` always stays.
    pub(super) fn emit_import_declaration(&mut self, import: &ImportDeclData) {
        let arena = self.arena;
        if import.import_clause.is_none() {
            self.wrote_module_syntax = true;
            self.write("import ");
            self.emit(import.module_specifier);
            self.emit_import_attributes(import.attributes);
            self.write_semicolon();
            return;
        }
        let Some(NodeData::ImportClause {
            is_type_only,
            name,
            named_bindings,
        }) = arena.data(import.import_clause)
        else {
            return;
        };
        if *is_type_only {
            return;
        }

        let default_name = (name.is_some() && self.is_value_referenced(*name)).then_some(*name);
        let mut namespace_name = None;
        let mut specifiers = Vec::new();
        let mut had_named_imports = false;
        match arena.data(*named_bindings) {
            Some(NodeData::NamespaceImport { name }) => {
                if self.is_value_referenced(*name) {
                    namespace_name = Some(*name);
                }
            }
            Some(NodeData::NamedImports { elements }) => {
                had_named_imports = true;
                specifiers = elements
                    .iter()
                    .copied()
                    .filter(|&element| match arena.data(element) {
                        Some(NodeData::ImportSpecifier {
                            is_type_only, name, ..
                        }) => !is_type_only && self.is_value_referenced(*name),
                        _ => false,
                    })
                    .collect();
            }
            _ => {}
        }

        let keeps_named = had_named_imports
            && (!specifiers.is_empty() || (name.is_none() && self.named_imports_are_empty(*named_bindings)));
        if default_name.is_none() && namespace_name.is_none() && !keeps_named {
            return;
        }

        self.wrote_module_syntax = true;
        self.write("import ");
        if let Some(default_name) = default_name {
            self.write_name(default_name);
            if namespace_name.is_some() || keeps_named {
                self.write(", ");
            }
        }
        if let Some(namespace_name) = namespace_name {
            self.write("* as ");
            self.write_name(namespace_name);
        }
        if keeps_named {
            self.emit_specifier_list(&specifiers);
        }
        self.write(" from ");
        self.emit(import.module_specifier);
        self.emit_import_attributes(import.attributes);
        self.write_semicolon();
    }

    /// `import {} from "m"` is written as-is.
    fn named_imports_are_empty(&self, named_bindings: NodeIndex) -> bool {
        matches!(
            self.arena.data(named_bindings),
            Some(NodeData::NamedImports { elements }) if elements.is_empty()
        )
    }

    fn emit_specifier_list(&mut self, specifiers: &[NodeIndex]) {
        if specifiers.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{ ");
        for (i, &specifier) in specifiers.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            let (property_name, name) = match self.arena.data(specifier) {
                Some(
                    NodeData::ImportSpecifier {
                        property_name, name, ..
                    }
                    | NodeData::ExportSpecifier {
                        property_name, name, ..
                    },
                ) => (*property_name, *name),
                _ => continue,
            };
            if property_name.is_some() {
                self.emit_property_name(property_name);
                self.write(" as ");
            }
            self.emit_property_name(name);
        }
        self.write(" }");
    }

    fn emit_import_attributes(&mut self, attributes: NodeIndex) {
        if attributes.is_some() {
            self.write(" with ");
            self.emit(attributes);
        }
    }

    /// `import x = A.B;` is an alias; it prints as `var x = A.B;` when `x`
    /// is read as a value.
    pub(super) fn emit_import_equals(
        &mut self,
        modifiers: ModifierFlags,
        is_type_only: bool,
        name: NodeIndex,
        module_reference: NodeIndex,
    ) {
        if is_type_only
            || matches!(
                self.arena.data(module_reference),
                Some(NodeData::ExternalModuleReference { .. })
            )
        {
            return;
        }
        let exported = modifiers.contains(ModifierFlags::EXPORT);
        if !exported && !self.is_value_referenced(name) {
            return;
        }
        let local = self.name_text(name);
        if exported && let Some(namespace) = self.current_namespace() {
            self.write(&format!("{namespace}.{local} = "));
        } else {
            self.write_export_modifiers(modifiers);
            self.write("var ");
            self.write_identifier(local);
            self.write(" = ");
        }
        self.emit(module_reference);
        self.write_semicolon();
    }

    // =========================================================================
    // Exports
    // =========================================================================

    pub(super) fn emit_export_declaration(&mut self, export: &ExportDeclData) {
        let arena = self.arena;
        if export.is_type_only || !self.namespace_stack.is_empty() {
            return;
        }
        let has_specifier = export.module_specifier.is_some();
        match arena.data(export.export_clause) {
            None => {
                self.wrote_module_syntax = true;
                self.write("export *");
            }
            Some(NodeData::NamespaceExport { name }) => {
                self.wrote_module_syntax = true;
                self.write("export * as ");
                self.emit_property_name(*name);
            }
            Some(NodeData::NamedExports { elements }) => {
                let kept: Vec<NodeIndex> = elements
                    .iter()
                    .copied()
                    .filter(|&element| self.is_exported_value(element, has_specifier))
                    .collect();
                if kept.is_empty() && !elements.is_empty() {
                    return;
                }
                self.wrote_module_syntax = true;
                self.write("export ");
                self.emit_specifier_list(&kept);
            }
            Some(_) => return,
        }
        if has_specifier {
            self.write(" from ");
            self.emit(export.module_specifier);
            self.emit_import_attributes(export.attributes);
        }
        self.write_semicolon();
    }

    fn is_exported_value(&self, specifier: NodeIndex, has_module_specifier: bool) -> bool {
        let Some(NodeData::ExportSpecifier {
            is_type_only,
            property_name,
            name,
        }) = self.arena.data(specifier)
        else {
            return false;
        };
        if *is_type_only {
            return false;
        }
        if has_module_specifier {
            return true;
        }
        let local = if property_name.is_some() { *property_name } else { *name };
        !self.type_only_names.contains(self.name_text(local))
    }

    /// `export default expr;`. `export =` has no ES module form.
    pub(super) fn emit_export_assignment(&mut self, is_export_equals: bool, expression: NodeIndex) {
        if is_export_equals || !self.namespace_stack.is_empty() {
            return;
        }
        if let Some(text) = self.arena.identifier_text(expression)
            && self.type_only_names.contains(text)
        {
            return;
        }
        self.wrote_module_syntax = true;
        self.write("export default ");
        self.emit(expression);
        self.write_semicolon();
    }
}
