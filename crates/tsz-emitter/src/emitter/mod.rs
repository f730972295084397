//! The type-erasing printer.
//!
//! `Printer` walks the parsed AST and writes ES module JavaScript: type
//! annotations, type-only declarations and ambient declarations disappear,
//! everything else is printed back in a normalized 4-space layout. Enums and
//! instantiated namespaces are lowered to IIFEs in `crate::transforms`.
//!
//! The printer is split across submodules by node family:
//! - `helpers` - output helpers and small name utilities
//! - `statements` - blocks, variables, control flow
//! - `expressions` - operators, calls, member access, type erasure
//! - `literals` - identifiers, literals, templates, object and array literals
//! - `functions` - functions, arrows, parameters, binding patterns
//! - `classes` - class declarations and members, parameter properties
//! - `jsx` - JSX elements lowered to `React.createElement` calls
//! - `module_emission` - imports, exports and import elision

mod classes;
mod expressions;
mod functions;
mod helpers;
mod jsx;
mod literals;
mod module_emission;
mod statements;

pub(crate) use literals::quote_string;

use rustc_hash::{FxHashMap, FxHashSet};
use tsz_common::LineMap;
use tsz_common::source_map::SourceMapGenerator;
use tsz_parser::{NodeArena, NodeData, NodeIndex};

use crate::printer::{PrintOptions, PrintOutput, output_file_name};
use crate::source_writer::{SourcePosition, SourceWriter};

pub(crate) use tsz_common::limits::{STACK_GROWTH, STACK_RED_ZONE};

pub struct Printer<'a> {
    pub(crate) arena: &'a NodeArena,
    pub(crate) source_text: &'a str,
    pub(crate) file_name: String,
    pub(crate) options: PrintOptions,
    pub(crate) writer: SourceWriter,
    line_map: Option<LineMap>,
    pending_source_pos: Option<SourcePosition>,

    /// Identifiers read in value positions anywhere in the file.
    pub(crate) value_references: FxHashSet<String>,
    /// Top-level names that only ever denote types.
    pub(crate) type_only_names: FxHashSet<String>,
    /// Name rewrites (`x` -> `NS.x`), innermost scope last.
    pub(crate) substitutions: Vec<FxHashMap<String, String>>,
    /// Names already declared in each enclosing statement list, so merged
    /// enums and namespaces declare their `var` only once.
    pub(crate) declared_names: Vec<FxHashSet<String>>,
    /// Local names of the namespaces being emitted, innermost last.
    pub(crate) namespace_stack: Vec<String>,

    pub(crate) is_module: bool,
    pub(crate) wrote_module_syntax: bool,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a NodeArena, options: PrintOptions) -> Self {
        Printer {
            arena,
            source_text: "",
            file_name: String::from("input.ts"),
            options,
            writer: SourceWriter::new(),
            line_map: None,
            pending_source_pos: None,
            value_references: FxHashSet::default(),
            type_only_names: FxHashSet::default(),
            substitutions: Vec::new(),
            declared_names: Vec::new(),
            namespace_stack: Vec::new(),
            is_module: false,
            wrote_module_syntax: false,
        }
    }

    /// Source text the AST was parsed from. Literals are printed from it
    /// verbatim, and the source map embeds it.
    pub fn set_source_text(&mut self, text: &'a str) {
        self.source_text = text;
    }

    pub fn set_file_name(&mut self, file_name: &str) {
        self.file_name = file_name.to_string();
    }

    /// Print a `SourceFile` node.
    pub fn print(&mut self, root: NodeIndex) {
        if self.options.inline_source_map {
            let mut generator =
                SourceMapGenerator::new(output_file_name(&self.file_name), base_name(&self.file_name));
            generator.set_source_content(self.source_text);
            self.writer = SourceWriter::with_source_map(generator);
            self.line_map = Some(LineMap::build(self.source_text));
        }

        let arena = self.arena;
        let statements = arena.statements(root);
        self.is_module = self.is_external_module(statements);
        let mut references = FxHashSet::default();
        self.collect_value_references(root, &mut references);
        self.value_references = references;
        self.type_only_names = self.collect_type_only_names(statements);

        self.declared_names.push(FxHashSet::default());
        self.emit_statements(statements);
        self.declared_names.pop();

        if self.is_module && !self.wrote_module_syntax {
            self.writer.ensure_line();
            self.write("export {};");
            self.write_line();
        }
    }

    pub fn finish(self) -> PrintOutput {
        let (mut code, generator) = self.writer.finish();
        let source_map = generator.map(|generator| {
            if self.options.inline_source_map && !code.is_empty() {
                code.push_str(&generator.to_inline_comment());
            }
            generator.to_json()
        });
        PrintOutput { code, source_map }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    pub(crate) fn emit(&mut self, idx: NodeIndex) {
        if idx.is_none() {
            return;
        }
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || self.emit_worker(idx))
    }

    fn emit_worker(&mut self, idx: NodeIndex) {
        let arena = self.arena;
        let Some(node) = arena.get(idx) else {
            return;
        };
        if node.data.is_type_node() {
            return;
        }
        self.record_source_pos(node.span.start);

        match &node.data {
            NodeData::SourceFile { statements } => self.emit_statements(statements),

            // Names
            NodeData::Identifier { text } => self.emit_identifier_reference(text),
            NodeData::PrivateIdentifier { text } => self.write_identifier(text),
            NodeData::ComputedPropertyName { expression } => {
                self.write("[");
                self.emit(*expression);
                self.write("]");
            }
            NodeData::QualifiedName { left, right } => {
                self.emit(*left);
                self.write(".");
                self.write_name(*right);
            }
            NodeData::ObjectBindingPattern { .. }
            | NodeData::ArrayBindingPattern { .. }
            | NodeData::BindingElement { .. } => self.emit_binding_name(idx),
            NodeData::Decorator { expression } => {
                self.write("@");
                self.emit(*expression);
            }
            NodeData::Parameter(parameter) => self.emit_parameter(parameter),

            // Declarations
            NodeData::VariableStatement {
                modifiers,
                declaration_list,
            } => self.emit_variable_statement(*modifiers, *declaration_list),
            NodeData::VariableDeclarationList { kind, declarations } => {
                self.emit_variable_declaration_list(*kind, declarations)
            }
            NodeData::VariableDeclaration(declaration) => self.emit_variable_declaration(declaration),
            NodeData::FunctionDeclaration(function) => self.emit_function_declaration(function),
            NodeData::ClassDeclaration(class) => self.emit_class_declaration(class),
            NodeData::InterfaceDeclaration { .. } | NodeData::TypeAliasDeclaration { .. } => {}
            NodeData::EnumDeclaration {
                modifiers,
                name,
                members,
            } => self.emit_enum_declaration(*modifiers, *name, members),
            NodeData::EnumMember { .. } => {}
            NodeData::ModuleDeclaration(module) => self.emit_module_declaration(module),
            NodeData::ModuleBlock { statements } => self.emit_statements(statements),
            NodeData::ImportDeclaration(import) => self.emit_import_declaration(import),
            NodeData::ImportEqualsDeclaration {
                modifiers,
                is_type_only,
                name,
                module_reference,
            } => self.emit_import_equals(*modifiers, *is_type_only, *name, *module_reference),
            NodeData::ExportDeclaration(export) => self.emit_export_declaration(export),
            NodeData::ExportAssignment {
                is_export_equals,
                expression,
            } => self.emit_export_assignment(*is_export_equals, *expression),
            NodeData::ImportClause { .. }
            | NodeData::NamespaceImport { .. }
            | NodeData::NamedImports { .. }
            | NodeData::ImportSpecifier { .. }
            | NodeData::ExternalModuleReference { .. }
            | NodeData::NamedExports { .. }
            | NodeData::NamespaceExport { .. }
            | NodeData::ExportSpecifier { .. } => {}

            // Statements
            NodeData::Block { statements } => self.emit_block(idx, statements),
            NodeData::EmptyStatement => self.write(";"),
            NodeData::ExpressionStatement { expression } => {
                self.emit(*expression);
                self.write_semicolon();
            }
            NodeData::IfStatement {
                expression,
                then_statement,
                else_statement,
            } => self.emit_if_statement(*expression, *then_statement, *else_statement),
            NodeData::DoStatement {
                statement,
                expression,
            } => self.emit_do_statement(*statement, *expression),
            NodeData::WhileStatement {
                expression,
                statement,
            } => {
                self.write("while (");
                self.emit(*expression);
                self.write(")");
                self.emit_embedded_statement(*statement);
            }
            NodeData::ForStatement {
                initializer,
                condition,
                incrementor,
                statement,
            } => self.emit_for_statement(*initializer, *condition, *incrementor, *statement),
            NodeData::ForInStatement {
                initializer,
                expression,
                statement,
            } => {
                self.write("for (");
                self.emit(*initializer);
                self.write(" in ");
                self.emit(*expression);
                self.write(")");
                self.emit_embedded_statement(*statement);
            }
            NodeData::ForOfStatement {
                await_modifier,
                initializer,
                expression,
                statement,
            } => {
                self.write(if *await_modifier { "for await (" } else { "for (" });
                self.emit(*initializer);
                self.write(" of ");
                self.emit(*expression);
                self.write(")");
                self.emit_embedded_statement(*statement);
            }
            NodeData::ContinueStatement { label } => self.emit_jump("continue", *label),
            NodeData::BreakStatement { label } => self.emit_jump("break", *label),
            NodeData::ReturnStatement { expression } => {
                self.write("return");
                if expression.is_some() {
                    self.write_space();
                    self.emit(*expression);
                }
                self.write_semicolon();
            }
            NodeData::SwitchStatement {
                expression,
                clauses,
            } => self.emit_switch_statement(*expression, clauses),
            NodeData::CaseClause { .. } | NodeData::DefaultClause { .. } => {}
            NodeData::LabeledStatement { label, statement } => {
                self.write_name(*label);
                self.write(": ");
                self.emit(*statement);
            }
            NodeData::ThrowStatement { expression } => {
                self.write("throw ");
                self.emit(*expression);
                self.write_semicolon();
            }
            NodeData::TryStatement {
                try_block,
                catch_clause,
                finally_block,
            } => self.emit_try_statement(*try_block, *catch_clause, *finally_block),
            NodeData::CatchClause { .. } => {}
            NodeData::DebuggerStatement => {
                self.write("debugger");
                self.write_semicolon();
            }

            // Class members appear here only inside object literals
            NodeData::MethodDeclaration(method) => self.emit_method_like("", method),
            NodeData::GetAccessor(accessor) => self.emit_method_like("get ", accessor),
            NodeData::SetAccessor(accessor) => self.emit_method_like("set ", accessor),
            NodeData::PropertyDeclaration(_)
            | NodeData::Constructor(_)
            | NodeData::ClassStaticBlock { .. }
            | NodeData::SemicolonClassElement => {}

            // Expressions
            NodeData::Literal { kind, text } => self.emit_literal(idx, *kind, text),
            NodeData::Keyword { kind } => self.emit_keyword(*kind),
            NodeData::TemplateExpression { head, spans } => self.emit_template_expression(*head, spans),
            NodeData::TemplateSpan { expression, literal } => {
                self.emit(*expression);
                self.emit(*literal);
            }
            NodeData::TaggedTemplateExpression { tag, template, .. } => {
                self.emit(*tag);
                self.emit(*template);
            }
            NodeData::ArrayLiteralExpression {
                elements,
                multi_line,
            } => self.emit_array_literal(elements, *multi_line),
            NodeData::SpreadElement { expression } | NodeData::SpreadAssignment { expression } => {
                self.write("...");
                self.emit(*expression);
            }
            NodeData::OmittedExpression => {}
            NodeData::ObjectLiteralExpression {
                properties,
                multi_line,
            } => self.emit_object_literal(properties, *multi_line),
            NodeData::PropertyAssignment { name, initializer } => {
                self.emit_property_name(*name);
                self.write(": ");
                self.emit(*initializer);
            }
            NodeData::ShorthandPropertyAssignment { name, initializer } => {
                self.emit_shorthand_property(*name, *initializer)
            }
            NodeData::ParenthesizedExpression { expression } => self.emit_parenthesized(*expression),
            NodeData::FunctionExpression(function) => self.emit_function_expression(function),
            NodeData::ArrowFunction(function) => self.emit_arrow_function(idx, function),
            NodeData::ClassExpression(class) => self.emit_class_like(class),
            NodeData::PropertyAccessExpression {
                expression,
                question_dot,
                name,
            } => {
                self.emit(*expression);
                self.write(if *question_dot { "?." } else { "." });
                self.write_name(*name);
            }
            NodeData::ElementAccessExpression {
                expression,
                question_dot,
                argument,
            } => {
                self.emit(*expression);
                if *question_dot {
                    self.write("?.");
                }
                self.write("[");
                self.emit(*argument);
                self.write("]");
            }
            NodeData::CallExpression {
                expression,
                question_dot,
                arguments,
                ..
            } => {
                self.emit(*expression);
                if *question_dot {
                    self.write("?.");
                }
                self.emit_arguments(arguments);
            }
            NodeData::NewExpression {
                expression,
                arguments,
                ..
            } => {
                self.write("new ");
                self.emit(*expression);
                if let Some(arguments) = arguments {
                    self.emit_arguments(arguments);
                }
            }
            NodeData::PrefixUnaryExpression { operator, operand } => {
                self.emit_prefix_unary(*operator, *operand)
            }
            NodeData::PostfixUnaryExpression { operand, operator } => {
                self.emit(*operand);
                self.write_operator(*operator);
            }
            NodeData::YieldExpression {
                asterisk,
                expression,
            } => {
                self.write(if *asterisk { "yield*" } else { "yield" });
                if expression.is_some() {
                    self.write_space();
                    self.emit(*expression);
                }
            }
            NodeData::BinaryExpression {
                left,
                operator,
                right,
            } => self.emit_binary_expression(*left, *operator, *right),
            NodeData::ConditionalExpression {
                condition,
                when_true,
                when_false,
            } => {
                self.emit(*condition);
                self.write(" ? ");
                self.emit(*when_true);
                self.write(" : ");
                self.emit(*when_false);
            }
            NodeData::AsExpression { expression, .. }
            | NodeData::SatisfiesExpression { expression, .. }
            | NodeData::TypeAssertion { expression, .. }
            | NodeData::NonNullExpression { expression }
            | NodeData::ExpressionWithTypeArguments { expression, .. } => self.emit(*expression),
            NodeData::MetaProperty { keyword, name } => {
                self.write_operator(*keyword);
                self.write(".");
                self.write_name(*name);
            }
            NodeData::JsxElement {
                opening, children, ..
            } => self.emit_jsx_element(*opening, children),
            NodeData::JsxSelfClosingElement {
                tag_name,
                attributes,
                ..
            } => self.emit_jsx_call(Some(*tag_name), attributes, &[]),
            NodeData::JsxFragment { children } => self.emit_jsx_call(None, &[], children),

            // Type syntax never reaches the output
            _ => {}
        }
    }

    // =========================================================================
    // Source positions
    // =========================================================================

    fn record_source_pos(&mut self, offset: u32) {
        let Some(line_map) = self.line_map.as_ref() else {
            return;
        };
        let position = line_map.offset_to_position(offset, self.source_text);
        self.pending_source_pos = Some(SourcePosition {
            line: position.line,
            column: position.character,
        });
    }

    pub(crate) fn clear_pending_source_pos(&mut self) {
        self.pending_source_pos = None;
    }
}

/// File name without its directory.
pub(crate) fn base_name(file_name: &str) -> &str {
    file_name.rsplit(['/', '\\']).next().unwrap_or(file_name)
}
