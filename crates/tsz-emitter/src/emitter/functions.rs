use tsz_parser::{FunctionData, ModifierFlags, NodeData, NodeIndex, ParameterData};

use super::Printer;

impl<'a> Printer<'a> {
    // =========================================================================
    // Functions
    // =========================================================================

    pub(super) fn emit_function_declaration(&mut self, function: &FunctionData) {
        // Overload signatures and `declare function` have no body to emit
        if function.body.is_none() || function.modifiers.contains(ModifierFlags::DECLARE) {
            return;
        }
        let name = self.name_text(function.name);
        self.declare_name(name);
        self.write_export_modifiers(function.modifiers);
        self.emit_function_keyword_form(function);
        self.write_namespace_export(function.modifiers, name);
    }

    pub(super) fn emit_function_expression(&mut self, function: &FunctionData) {
        self.emit_function_keyword_form(function);
    }

    /// `async function* name(params) body`
    fn emit_function_keyword_form(&mut self, function: &FunctionData) {
        if function.modifiers.contains(ModifierFlags::ASYNC) {
            self.write("async ");
        }
        self.write("function");
        if function.asterisk {
            self.write("*");
        }
        self.write_space();
        if function.name.is_some() {
            self.write_name(function.name);
        }
        self.emit_parameters(&function.parameters);
        self.write_space();
        self.emit(function.body);
    }

    pub(super) fn emit_arrow_function(&mut self, idx: NodeIndex, function: &FunctionData) {
        if function.modifiers.contains(ModifierFlags::ASYNC) {
            self.write("async ");
        }
        if self.arrow_has_parentheses(idx, function) {
            self.emit_parameters(&function.parameters);
        } else {
            self.emit_comma_separated(&function.parameters);
        }
        self.write(" => ");

        let body = function.body;
        if matches!(self.arena.data(body), Some(NodeData::Block { .. })) {
            self.emit(body);
            return;
        }
        // `() => <T>{}` loses its parentheses-free form once the assertion
        // is erased, so the object literal needs wrapping
        let erased = self.skip_type_assertions(body);
        if erased != body
            && matches!(self.arena.data(erased), Some(NodeData::ObjectLiteralExpression { .. }))
        {
            self.write("(");
            self.emit(erased);
            self.write(")");
        } else {
            self.emit(body);
        }
    }

    /// `x => x` keeps its bare parameter; everything else is parenthesized.
    fn arrow_has_parentheses(&self, idx: NodeIndex, function: &FunctionData) -> bool {
        let [parameter] = function.parameters.as_slice() else {
            return true;
        };
        let Some(NodeData::Parameter(data)) = self.arena.data(*parameter) else {
            return true;
        };
        if data.type_annotation.is_some() || data.initializer.is_some() || data.dot_dot_dot {
            return true;
        }
        let arrow_start = self.arena.span(idx).start as usize;
        let parameter_start = self.arena.span(*parameter).start as usize;
        self.source_text
            .get(arrow_start..parameter_start)
            .is_none_or(|prefix| prefix.contains('('))
    }

    /// Methods and accessors, in classes and object literals.
    pub(crate) fn emit_method_like(&mut self, prefix: &str, function: &FunctionData) {
        if function.body.is_none() {
            return;
        }
        self.emit_decorators_on_lines(&function.decorators);
        if function.modifiers.contains(ModifierFlags::STATIC) {
            self.write("static ");
        }
        if function.modifiers.contains(ModifierFlags::ASYNC) {
            self.write("async ");
        }
        self.write(prefix);
        if function.asterisk {
            self.write("*");
        }
        self.emit_property_name(function.name);
        self.emit_parameters(&function.parameters);
        self.write_space();
        self.emit(function.body);
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Parenthesized parameter list without a TypeScript `this` parameter.
    pub(crate) fn emit_parameters(&mut self, parameters: &[NodeIndex]) {
        self.write("(");
        let mut first = true;
        for &parameter in parameters {
            if self.is_this_parameter(parameter) {
                continue;
            }
            if !first {
                self.write(", ");
            }
            first = false;
            self.emit(parameter);
        }
        self.write(")");
    }

    fn is_this_parameter(&self, parameter: NodeIndex) -> bool {
        let Some(NodeData::Parameter(data)) = self.arena.data(parameter) else {
            return false;
        };
        self.arena.identifier_text(data.name) == Some("this")
    }

    pub(super) fn emit_parameter(&mut self, parameter: &ParameterData) {
        if parameter.dot_dot_dot {
            self.write("...");
        }
        self.emit_binding_name(parameter.name);
        if parameter.initializer.is_some() {
            self.write(" = ");
            self.emit(parameter.initializer);
        }
    }

    // =========================================================================
    // Binding patterns
    // =========================================================================

    /// A declared name: an identifier (never substituted) or a pattern.
    pub(crate) fn emit_binding_name(&mut self, name: NodeIndex) {
        let arena = self.arena;
        match arena.data(name) {
            Some(NodeData::Identifier { text }) => self.write_identifier(text),
            Some(NodeData::ObjectBindingPattern { elements }) => {
                if elements.is_empty() {
                    self.write("{}");
                    return;
                }
                self.write("{ ");
                self.emit_binding_elements(elements);
                self.write(" }");
            }
            Some(NodeData::ArrayBindingPattern { elements }) => {
                self.write("[");
                self.emit_binding_elements(elements);
                if let Some(&last) = elements.last()
                    && matches!(arena.data(last), Some(NodeData::OmittedExpression))
                {
                    self.write(",");
                }
                self.write("]");
            }
            Some(NodeData::BindingElement {
                dot_dot_dot,
                property_name,
                name,
                initializer,
            }) => {
                if *dot_dot_dot {
                    self.write("...");
                }
                if property_name.is_some() {
                    self.emit_property_name(*property_name);
                    self.write(": ");
                }
                self.emit_binding_name(*name);
                if initializer.is_some() {
                    self.write(" = ");
                    self.emit(*initializer);
                }
            }
            _ => {}
        }
    }

    fn emit_binding_elements(&mut self, elements: &[NodeIndex]) {
        for (i, &element) in elements.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_binding_name(element);
        }
    }

    /// Every identifier a binding name declares, in source order.
    pub(crate) fn collect_bound_names(&self, name: NodeIndex, out: &mut Vec<&'a str>) {
        match self.arena.data(name) {
            Some(NodeData::Identifier { text }) => out.push(text),
            Some(
                NodeData::ObjectBindingPattern { elements } | NodeData::ArrayBindingPattern { elements },
            ) => {
                for &element in elements {
                    self.collect_bound_names(element, out);
                }
            }
            Some(NodeData::BindingElement { name, .. }) => self.collect_bound_names(*name, out),
            _ => {}
        }
    }
}
