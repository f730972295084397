use tsz_parser::{ClassData, FunctionData, ModifierFlags, NodeData, NodeIndex, PropertyDeclarationData};
use tsz_scanner::SyntaxKind;

use super::Printer;

impl<'a> Printer<'a> {
    // =========================================================================
    // Classes
    // =========================================================================

    pub(super) fn emit_class_declaration(&mut self, class: &ClassData) {
        if class.modifiers.contains(ModifierFlags::DECLARE) {
            return;
        }
        let name = self.name_text(class.name);
        self.declare_name(name);
        self.emit_decorators_on_lines(&class.decorators);
        self.write_export_modifiers(class.modifiers);
        self.emit_class_body(class);
        self.write_namespace_export(class.modifiers, name);
    }

    /// Class expressions keep their decorators inline.
    pub(super) fn emit_class_like(&mut self, class: &ClassData) {
        for &decorator in &class.decorators {
            self.emit(decorator);
            self.write_space();
        }
        self.emit_class_body(class);
    }

    fn emit_class_body(&mut self, class: &ClassData) {
        self.write("class");
        if class.name.is_some() {
            self.write_space();
            self.write_name(class.name);
        }
        // `extends Base<T>` keeps only the expression; `implements` is erased
        if let Some(NodeData::ExpressionWithTypeArguments { expression, .. }) = self.arena.data(class.extends) {
            self.write(" extends ");
            self.emit(*expression);
        }
        self.write(" {");
        self.write_line();
        self.increase_indent();
        let has_extends = class.extends.is_some();
        for &member in &class.members {
            let before = self.writer.len();
            self.emit_class_member(member, has_extends);
            if self.writer.len() > before {
                self.writer.ensure_line();
            } else {
                self.clear_pending_source_pos();
            }
        }
        self.decrease_indent();
        self.write("}");
    }

    fn emit_class_member(&mut self, member: NodeIndex, has_extends: bool) {
        let arena = self.arena;
        match arena.data(member) {
            Some(NodeData::PropertyDeclaration(property)) => self.emit_property_declaration(property),
            Some(NodeData::MethodDeclaration(method)) => {
                if !method.modifiers.contains(ModifierFlags::ABSTRACT) {
                    self.emit(member);
                }
            }
            Some(NodeData::GetAccessor(accessor) | NodeData::SetAccessor(accessor)) => {
                if !accessor.modifiers.contains(ModifierFlags::ABSTRACT) {
                    self.emit(member);
                }
            }
            Some(NodeData::Constructor(constructor)) => self.emit_constructor(constructor, has_extends),
            Some(NodeData::ClassStaticBlock { body }) => {
                self.write("static ");
                self.emit(*body);
            }
            Some(NodeData::SemicolonClassElement) => self.write(";"),
            // Index signatures and anything else type-only
            _ => {}
        }
    }

    fn emit_property_declaration(&mut self, property: &PropertyDeclarationData) {
        if property
            .modifiers
            .intersects(ModifierFlags::DECLARE | ModifierFlags::ABSTRACT)
        {
            return;
        }
        self.emit_decorators_on_lines(&property.decorators);
        if property.modifiers.contains(ModifierFlags::STATIC) {
            self.write("static ");
        }
        if property.modifiers.contains(ModifierFlags::ACCESSOR) {
            self.write("accessor ");
        }
        self.emit_property_name(property.name);
        if property.initializer.is_some() {
            self.write(" = ");
            self.emit(property.initializer);
        }
        self.write_semicolon();
    }

    // =========================================================================
    // Constructors and parameter properties
    // =========================================================================

    /// Parameter properties (`constructor(private x: T)`) become
    /// `this.x = x;` at the top of the body, after the `super(...)` call
    /// when the class extends another.
    fn emit_constructor(&mut self, constructor: &FunctionData, has_extends: bool) {
        if constructor.body.is_none() {
            return;
        }
        self.emit_decorators_on_lines(&constructor.decorators);
        self.write("constructor");
        self.emit_parameters(&constructor.parameters);
        self.write_space();

        let properties = self.parameter_property_names(&constructor.parameters);
        if properties.is_empty() {
            self.emit(constructor.body);
            return;
        }

        let arena = self.arena;
        let statements = arena.statements(constructor.body);
        let split = if has_extends {
            statements
                .iter()
                .position(|&statement| self.is_super_call_statement(statement))
                .map_or(0, |index| index + 1)
        } else {
            0
        };

        self.write("{");
        self.write_line();
        self.increase_indent();
        self.emit_statements(&statements[..split]);
        for name in properties {
            self.write(&format!("this.{name} = {name};"));
            self.write_line();
        }
        self.emit_statements(&statements[split..]);
        self.decrease_indent();
        self.write("}");
    }

    fn parameter_property_names(&self, parameters: &[NodeIndex]) -> Vec<&'a str> {
        let arena = self.arena;
        parameters
            .iter()
            .filter_map(|&parameter| match arena.data(parameter) {
                Some(NodeData::Parameter(data))
                    if data.modifiers.intersects(ModifierFlags::PARAMETER_PROPERTY) =>
                {
                    arena.identifier_text(data.name)
                }
                _ => None,
            })
            .collect()
    }

    fn is_super_call_statement(&self, statement: NodeIndex) -> bool {
        let Some(NodeData::ExpressionStatement { expression }) = self.arena.data(statement) else {
            return false;
        };
        let Some(NodeData::CallExpression { expression: callee, .. }) = self.arena.data(*expression) else {
            return false;
        };
        matches!(
            self.arena.data(*callee),
            Some(NodeData::Keyword {
                kind: SyntaxKind::SuperKeyword
            })
        )
    }
}
