//! Expression typing.
//!
//! `get_type_of_expression` computes the type of an expression and reports
//! the diagnostics found inside it. `check_expression_assignable` does the
//! same against an expected type, elaborating into array and object
//! literals so errors land on the offending element.

use tsz_common::Span;
use tsz_parser::{FunctionData, NodeData, NodeIndex};
use tsz_scanner::SyntaxKind;

use crate::assignability::is_assignable;
use crate::binder::{STACK_GROWTH, STACK_RED_ZONE, SymbolFlags};
use crate::globals::is_global_value;
use crate::state::CheckerState;
use crate::types::{EnumKind, PropertyInfo, Type, normalize_numeric_literal};

impl<'a> CheckerState<'a> {
    pub(crate) fn get_type_of_expression(&mut self, idx: NodeIndex) -> Type {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || {
            self.get_type_of_expression_worker(idx)
        })
    }

    fn get_type_of_expression_worker(&mut self, idx: NodeIndex) -> Type {
        let arena = self.ctx.arena;
        let Some(data) = arena.data(idx) else {
            return Type::Any;
        };
        match data {
            NodeData::Identifier { text } => self.get_type_of_identifier(idx, text),
            NodeData::Literal { kind, text } => literal_expression_type(*kind, text),
            NodeData::Keyword { kind } => match kind {
                SyntaxKind::TrueKeyword => Type::BooleanLiteral(true),
                SyntaxKind::FalseKeyword => Type::BooleanLiteral(false),
                SyntaxKind::NullKeyword => Type::Null,
                _ => Type::Any,
            },
            NodeData::TemplateExpression { spans, .. } => {
                for &span in spans {
                    if let Some(NodeData::TemplateSpan { expression, .. }) = arena.data(span) {
                        self.get_type_of_expression(*expression);
                    }
                }
                Type::String
            }
            NodeData::TaggedTemplateExpression {
                tag,
                type_arguments,
                template,
            } => {
                self.get_type_of_expression(*tag);
                for &argument in type_arguments {
                    self.resolve_type_node(argument);
                }
                self.get_type_of_expression(*template);
                Type::Any
            }
            NodeData::ArrayLiteralExpression { elements, .. } => {
                self.get_type_of_array_literal(elements)
            }
            NodeData::ObjectLiteralExpression { properties, .. } => {
                self.get_type_of_object_literal(properties)
            }
            NodeData::ParenthesizedExpression { expression } => {
                self.get_type_of_expression(*expression)
            }
            NodeData::FunctionExpression(function) | NodeData::ArrowFunction(function) => {
                self.check_function_like(idx, function)
            }
            NodeData::ClassExpression(class) => {
                self.check_class(idx, class);
                Type::Any
            }
            NodeData::PropertyAccessExpression {
                expression,
                question_dot,
                name,
            } => self.get_type_of_property_access(*expression, *name, *question_dot),
            NodeData::ElementAccessExpression {
                expression,
                argument,
                ..
            } => self.get_type_of_element_access(*expression, *argument),
            NodeData::CallExpression {
                expression,
                type_arguments,
                arguments,
                ..
            } => self.get_type_of_call(*expression, type_arguments, arguments),
            NodeData::NewExpression {
                expression,
                type_arguments,
                arguments,
            } => {
                self.get_type_of_expression(*expression);
                for &argument in type_arguments {
                    self.resolve_type_node(argument);
                }
                for &argument in arguments.iter().flatten() {
                    self.get_type_of_expression(argument);
                }
                Type::Any
            }
            NodeData::PrefixUnaryExpression { operator, operand } => {
                self.get_type_of_prefix_unary(*operator, *operand)
            }
            NodeData::PostfixUnaryExpression { operand, .. } => {
                self.check_increment_operand(*operand);
                Type::Number
            }
            NodeData::YieldExpression { expression, .. } => {
                self.get_type_of_expression(*expression);
                Type::Any
            }
            NodeData::BinaryExpression {
                left,
                operator,
                right,
            } => self.get_type_of_binary(*left, *operator, *right),
            NodeData::ConditionalExpression {
                condition,
                when_true,
                when_false,
            } => {
                self.get_type_of_expression(*condition);
                let when_true = self.get_type_of_expression(*when_true);
                let when_false = self.get_type_of_expression(*when_false);
                Type::union(vec![when_true, when_false])
            }
            NodeData::AsExpression {
                expression,
                type_node,
            }
            | NodeData::TypeAssertion {
                type_node,
                expression,
            } => {
                let ty = self.get_type_of_expression(*expression);
                if self.is_const_assertion(*type_node) {
                    ty
                } else {
                    self.resolve_type_node(*type_node)
                }
            }
            NodeData::SatisfiesExpression {
                expression,
                type_node,
            } => {
                self.resolve_type_node(*type_node);
                self.get_type_of_expression(*expression)
            }
            NodeData::NonNullExpression { expression } => {
                self.get_type_of_expression(*expression).non_nullable()
            }
            NodeData::SpreadElement { expression } => self.get_type_of_expression(*expression),
            NodeData::ExpressionWithTypeArguments {
                expression,
                type_arguments,
            } => {
                for &argument in type_arguments {
                    self.resolve_type_node(argument);
                }
                self.get_type_of_expression(*expression);
                Type::Any
            }
            NodeData::JsxElement {
                opening, children, ..
            } => {
                self.check_jsx_opening_element(*opening);
                for &child in children {
                    self.get_type_of_expression(child);
                }
                Type::Any
            }
            NodeData::JsxSelfClosingElement { .. } => {
                self.check_jsx_opening_element(idx);
                Type::Any
            }
            NodeData::JsxFragment { children } => {
                for &child in children {
                    self.get_type_of_expression(child);
                }
                Type::Any
            }
            NodeData::JsxExpression { expression, .. } => {
                self.get_type_of_expression(*expression);
                Type::Any
            }
            _ => Type::Any,
        }
    }

    /// Component tag names resolve as values; intrinsic tags like `div` are
    /// not names at all. Attribute values and spreads are ordinary
    /// expressions.
    fn check_jsx_opening_element(&mut self, idx: NodeIndex) {
        let arena = self.ctx.arena;
        let (tag_name, type_arguments, attributes) = match arena.data(idx) {
            Some(
                NodeData::JsxOpeningElement {
                    tag_name,
                    type_arguments,
                    attributes,
                }
                | NodeData::JsxSelfClosingElement {
                    tag_name,
                    type_arguments,
                    attributes,
                },
            ) => (*tag_name, type_arguments, attributes),
            _ => return,
        };
        if !arena.is_intrinsic_jsx_tag(tag_name) {
            self.get_type_of_expression(tag_name);
        }
        for &argument in type_arguments {
            self.resolve_type_node(argument);
        }
        for &attribute in attributes {
            match arena.data(attribute) {
                Some(NodeData::JsxAttribute { initializer, .. }) => {
                    self.get_type_of_expression(*initializer);
                }
                Some(NodeData::JsxSpreadAttribute { expression }) => {
                    self.get_type_of_expression(*expression);
                }
                _ => {}
            }
        }
    }

    fn is_const_assertion(&self, type_node: NodeIndex) -> bool {
        let arena = self.ctx.arena;
        matches!(
            arena.data(type_node),
            Some(NodeData::TypeReference { type_name, .. })
                if arena.identifier_text(*type_name) == Some("const")
        )
    }

    // =========================================================================
    // Names
    // =========================================================================

    pub(crate) fn get_type_of_identifier(&mut self, idx: NodeIndex, name: &str) -> Type {
        if let Some(symbol) = self.resolve_name(name, SymbolFlags::VALUE) {
            return self.get_type_of_symbol(symbol);
        }
        match name {
            "undefined" => return Type::Undefined,
            "NaN" | "Infinity" => return Type::Number,
            "arguments" => return Type::Any,
            _ => {}
        }
        if self.ctx.enum_member_names.iter().any(|n| n == name) {
            return Type::Any;
        }
        // A type used as a value is a different error.
        if is_global_value(name) || self.resolve_name(name, SymbolFlags::TYPE).is_some() {
            return Type::Any;
        }
        self.error_cannot_find_name(name, idx);
        Type::Any
    }

    // =========================================================================
    // Literals
    // =========================================================================

    fn get_type_of_array_literal(&mut self, elements: &[NodeIndex]) -> Type {
        let arena = self.ctx.arena;
        let mut types = Vec::with_capacity(elements.len());
        for &element in elements {
            match arena.data(element) {
                Some(NodeData::OmittedExpression) => {}
                Some(NodeData::SpreadElement { expression }) => {
                    let spread = self.get_type_of_expression(*expression);
                    types.push(spread.element_type());
                }
                _ => types.push(self.get_type_of_expression(element).widen()),
            }
        }
        self.array_of(types)
    }

    /// `T[]` for the given element types. Without strict null checks `null`
    /// and `undefined` elements widen away.
    fn array_of(&self, mut types: Vec<Type>) -> Type {
        if !self.ctx.strict() {
            types.retain(|t| !matches!(t, Type::Null | Type::Undefined));
        }
        if types.is_empty() {
            return Type::Array(Box::new(Type::Any));
        }
        Type::Array(Box::new(Type::union(types)))
    }

    fn get_type_of_object_literal(&mut self, properties: &[NodeIndex]) -> Type {
        let arena = self.ctx.arena;
        let mut members: Vec<PropertyInfo> = Vec::new();
        let mut modeled = true;
        for &property in properties {
            let (name, ty) = match arena.data(property) {
                Some(NodeData::PropertyAssignment { name, initializer }) => {
                    self.check_computed_name(*name);
                    (*name, self.get_type_of_expression(*initializer).widen())
                }
                Some(NodeData::ShorthandPropertyAssignment { name, initializer }) => {
                    if initializer.is_some() {
                        self.get_type_of_expression(*initializer);
                    }
                    (*name, self.get_type_of_expression(*name).widen())
                }
                Some(NodeData::MethodDeclaration(function)) => {
                    self.check_computed_name(function.name);
                    (function.name, self.check_function_like(property, function))
                }
                Some(NodeData::GetAccessor(function) | NodeData::SetAccessor(function)) => {
                    self.check_computed_name(function.name);
                    self.check_function_like(property, function);
                    modeled = false;
                    continue;
                }
                Some(NodeData::SpreadAssignment { expression }) => {
                    self.get_type_of_expression(*expression);
                    modeled = false;
                    continue;
                }
                _ => {
                    modeled = false;
                    continue;
                }
            };
            match arena.property_name_text(name) {
                Some(text) => {
                    members.retain(|m| m.name != text);
                    members.push(PropertyInfo {
                        name: text.to_string(),
                        ty,
                        optional: false,
                    });
                }
                None => modeled = false,
            }
        }
        if modeled {
            Type::object(members)
        } else {
            Type::Any
        }
    }

    pub(crate) fn check_computed_name(&mut self, name: NodeIndex) {
        if let Some(NodeData::ComputedPropertyName { expression }) = self.ctx.arena.data(name) {
            self.get_type_of_expression(*expression);
        }
    }

    // =========================================================================
    // Contextual assignability
    // =========================================================================

    /// Type `expr` and report TS2322 (or TS2345 for call arguments) when it
    /// is not assignable to `target`. Array literals, object literals and
    /// conditional expressions are checked part by part.
    pub(crate) fn check_expression_assignable(
        &mut self,
        expr: NodeIndex,
        target: &Type,
        error_span: Span,
        is_argument: bool,
    ) -> Type {
        let arena = self.ctx.arena;
        let inner = arena.skip_parentheses(expr);
        match (arena.data(inner), target) {
            (Some(NodeData::ArrayLiteralExpression { elements, .. }), Type::Array(element))
                if !self.has_spread(elements) =>
            {
                let mut types = Vec::with_capacity(elements.len());
                for &e in elements {
                    if matches!(arena.data(e), Some(NodeData::OmittedExpression)) {
                        continue;
                    }
                    let span = arena.span(e);
                    types.push(self.check_expression_assignable(e, element, span, false).widen());
                }
                return self.array_of(types);
            }
            (Some(NodeData::ArrayLiteralExpression { elements, .. }), Type::Tuple(targets))
                if elements.len() == targets.len() && !self.has_spread(elements) =>
            {
                let mut types = Vec::with_capacity(elements.len());
                for (&e, t) in elements.iter().zip(targets) {
                    let span = arena.span(e);
                    types.push(self.check_expression_assignable(e, t, span, false));
                }
                return Type::Tuple(types);
            }
            (Some(NodeData::ObjectLiteralExpression { properties, .. }), Type::Object(shape))
                if self.is_simple_object_literal(properties) =>
            {
                let mut members: Vec<PropertyInfo> = Vec::new();
                for &property in properties {
                    let (name, ty) = match arena.data(property) {
                        Some(NodeData::PropertyAssignment { name, initializer }) => {
                            let text = arena.property_name_text(*name).unwrap_or_default();
                            let ty = match shape.property(text) {
                                Some(expected) => {
                                    let expected_ty = self.optional_property_type(expected);
                                    let span = arena.span(*name);
                                    self.check_expression_assignable(*initializer, &expected_ty, span, false)
                                }
                                None => self.get_type_of_expression(*initializer),
                            };
                            (text, ty)
                        }
                        Some(NodeData::ShorthandPropertyAssignment { name, .. }) => {
                            let text = arena.property_name_text(*name).unwrap_or_default();
                            let ty = self.get_type_of_expression(*name);
                            if let Some(expected) = shape.property(text) {
                                let expected_ty = self.optional_property_type(expected);
                                if !is_assignable(&ty, &expected_ty, self.ctx.strict()) {
                                    self.error_type_not_assignable(&ty, &expected_ty, *name);
                                }
                            }
                            (text, ty)
                        }
                        _ => continue,
                    };
                    members.retain(|m| m.name != name);
                    members.push(PropertyInfo {
                        name: name.to_string(),
                        ty: ty.widen(),
                        optional: false,
                    });
                }
                let source = Type::object(members);
                let missing = shape
                    .properties
                    .iter()
                    .any(|p| !p.optional && !matches!(&source, Type::Object(s) if s.property(&p.name).is_some()));
                if missing {
                    self.report_not_assignable(&source, target, error_span, is_argument);
                }
                return source;
            }
            (
                Some(NodeData::ConditionalExpression {
                    condition,
                    when_true,
                    when_false,
                }),
                _,
            ) => {
                self.get_type_of_expression(*condition);
                let true_span = arena.span(*when_true);
                let false_span = arena.span(*when_false);
                let a = self.check_expression_assignable(*when_true, target, true_span, false);
                let b = self.check_expression_assignable(*when_false, target, false_span, false);
                return Type::union(vec![a, b]);
            }
            _ => {}
        }
        let ty = self.get_type_of_expression(expr);
        if !is_assignable(&ty, target, self.ctx.strict()) {
            self.report_not_assignable(&ty, target, error_span, is_argument);
        }
        ty
    }

    fn report_not_assignable(&mut self, source: &Type, target: &Type, span: Span, is_argument: bool) {
        if is_argument {
            self.error_argument_not_assignable(source, target, span);
        } else {
            self.error_type_not_assignable_at_span(source, target, span);
        }
    }

    fn optional_property_type(&self, property: &PropertyInfo) -> Type {
        if property.optional && self.ctx.strict() {
            Type::union(vec![property.ty.clone(), Type::Undefined])
        } else {
            property.ty.clone()
        }
    }

    fn has_spread(&self, elements: &[NodeIndex]) -> bool {
        elements
            .iter()
            .any(|&e| matches!(self.ctx.arena.data(e), Some(NodeData::SpreadElement { .. })))
    }

    /// Object literal made only of plain and shorthand properties with
    /// static names.
    fn is_simple_object_literal(&self, properties: &[NodeIndex]) -> bool {
        let arena = self.ctx.arena;
        properties.iter().all(|&p| match arena.data(p) {
            Some(NodeData::PropertyAssignment { name, .. }) => arena.property_name_text(*name).is_some(),
            Some(NodeData::ShorthandPropertyAssignment { initializer, .. }) => initializer.is_none(),
            _ => false,
        })
    }

    // =========================================================================
    // Member access
    // =========================================================================

    fn get_type_of_property_access(&mut self, expression: NodeIndex, name: NodeIndex, question_dot: bool) -> Type {
        let arena = self.ctx.arena;
        if let Some(text) = arena.identifier_text(expression)
            && let Some(symbol) = self.resolve_name(text, SymbolFlags::VALUE)
            && self.ctx.binder.symbol(symbol).flags.contains(SymbolFlags::ENUM)
        {
            return self.get_declared_type_of_symbol(symbol);
        }
        let object = self.get_type_of_expression(expression);
        let object = if question_dot {
            object.non_nullable()
        } else {
            object
        };
        let Some(name) = arena.identifier_text(name) else {
            return Type::Any;
        };
        match &object {
            Type::Object(shape) => match shape.property(name) {
                Some(property) => self.optional_property_type(property),
                None => Type::Any,
            },
            Type::String | Type::StringLiteral(_) | Type::Array(_) | Type::Tuple(_)
                if name == "length" =>
            {
                Type::Number
            }
            _ => Type::Any,
        }
    }

    fn get_type_of_element_access(&mut self, expression: NodeIndex, argument: NodeIndex) -> Type {
        let object = self.get_type_of_expression(expression);
        let index = self.get_type_of_expression(argument);
        match (&object, &index) {
            (Type::Array(element), _) => (**element).clone(),
            (Type::Tuple(elements), Type::NumberLiteral(n)) => n
                .parse::<usize>()
                .ok()
                .and_then(|i| elements.get(i).cloned())
                .unwrap_or(Type::Any),
            (Type::Tuple(elements), _) => Type::union(elements.clone()),
            (Type::Object(shape), Type::StringLiteral(name)) => match shape.property(name) {
                Some(property) => self.optional_property_type(property),
                None => Type::Any,
            },
            (Type::String | Type::StringLiteral(_), _) => Type::String,
            _ => Type::Any,
        }
    }

    // =========================================================================
    // Calls
    // =========================================================================

    fn get_type_of_call(&mut self, callee: NodeIndex, type_arguments: &[NodeIndex], arguments: &[NodeIndex]) -> Type {
        let arena = self.ctx.arena;
        for &argument in type_arguments {
            self.resolve_type_node(argument);
        }
        let callee_type = match arena.data(callee) {
            Some(NodeData::Keyword {
                kind: SyntaxKind::ImportKeyword,
            }) => {
                if let Some(&first) = arguments.first() {
                    self.check_module_specifier(first);
                }
                Type::Any
            }
            _ => self.get_type_of_expression(callee),
        };
        let Type::Function(signature) = callee_type.non_nullable() else {
            for &argument in arguments {
                self.get_type_of_expression(argument);
            }
            return Type::Any;
        };

        let has_spread = self.has_spread(arguments);
        let (min, max) = (signature.min_arguments(), signature.max_arguments());
        let got = arguments.len();
        if !has_spread && (got < min || max.is_some_and(|max| got > max)) {
            let span = match max {
                Some(max) if got > max => arena
                    .span(arguments[max])
                    .cover(arena.span(arguments[got - 1])),
                _ => self.call_error_span(callee),
            };
            self.error_argument_count(min, max, got, span);
            for &argument in arguments {
                self.get_type_of_expression(argument);
            }
            return signature.return_type.clone();
        }

        for (i, &argument) in arguments.iter().enumerate() {
            if matches!(arena.data(argument), Some(NodeData::SpreadElement { .. })) {
                self.get_type_of_expression(argument);
                continue;
            }
            let expected = signature.param_type_at(i);
            let span = arena.span(argument);
            self.check_expression_assignable(argument, &expected, span, true);
        }
        signature.return_type.clone()
    }

    /// The callee name of a call: the property name for `a.b()`.
    fn call_error_span(&self, callee: NodeIndex) -> Span {
        let arena = self.ctx.arena;
        match arena.data(callee) {
            Some(NodeData::PropertyAccessExpression { name, .. }) => arena.span(*name),
            _ => arena.span(callee),
        }
    }

    // =========================================================================
    // Operators
    // =========================================================================

    fn get_type_of_prefix_unary(&mut self, operator: SyntaxKind, operand: NodeIndex) -> Type {
        match operator {
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken => {
                self.check_increment_operand(operand);
                Type::Number
            }
            SyntaxKind::MinusToken => match self.get_type_of_expression(operand) {
                Type::NumberLiteral(text) if text == "0" || text.starts_with('-') => Type::Number,
                Type::NumberLiteral(text) => Type::NumberLiteral(format!("-{text}")),
                Type::BigInt => Type::BigInt,
                _ => Type::Number,
            },
            SyntaxKind::TildeToken => {
                if self.get_type_of_expression(operand).is_bigint_like() {
                    Type::BigInt
                } else {
                    Type::Number
                }
            }
            SyntaxKind::PlusToken => {
                self.get_type_of_expression(operand);
                Type::Number
            }
            SyntaxKind::ExclamationToken | SyntaxKind::DeleteKeyword => {
                self.get_type_of_expression(operand);
                Type::Boolean
            }
            SyntaxKind::TypeOfKeyword => {
                self.get_type_of_expression(operand);
                Type::String
            }
            SyntaxKind::VoidKeyword => {
                self.get_type_of_expression(operand);
                Type::Undefined
            }
            _ => {
                self.get_type_of_expression(operand);
                Type::Any
            }
        }
    }

    /// Operand of `++`/`--`.
    fn check_increment_operand(&mut self, operand: NodeIndex) {
        self.check_const_assignment_target(operand);
        self.get_type_of_expression(operand);
    }

    /// TS2588 when `target` names a `const`. Returns whether it did.
    fn check_const_assignment_target(&mut self, target: NodeIndex) -> bool {
        let arena = self.ctx.arena;
        let target = arena.skip_parentheses(target);
        let Some(name) = arena.identifier_text(target) else {
            return false;
        };
        match self.resolve_name(name, SymbolFlags::VALUE) {
            Some(symbol) if self.ctx.binder.symbol(symbol).flags.contains(SymbolFlags::CONST) => {
                self.error_cannot_assign_to_constant(name, target);
                true
            }
            _ => false,
        }
    }

    fn get_type_of_binary(&mut self, left: NodeIndex, operator: SyntaxKind, right: NodeIndex) -> Type {
        use SyntaxKind::*;
        match operator {
            EqualsToken => return self.check_assignment(left, right),
            PlusEqualsToken => {
                self.check_const_assignment_target(left);
                let l = self.get_type_of_expression(left);
                let r = self.get_type_of_expression(right);
                return plus_result(&l, &r);
            }
            MinusEqualsToken
            | AsteriskEqualsToken
            | AsteriskAsteriskEqualsToken
            | SlashEqualsToken
            | PercentEqualsToken
            | LessThanLessThanEqualsToken
            | GreaterThanGreaterThanEqualsToken
            | GreaterThanGreaterThanGreaterThanEqualsToken
            | AmpersandEqualsToken
            | BarEqualsToken
            | CaretEqualsToken => {
                self.check_const_assignment_target(left);
                let l = self.get_type_of_expression(left);
                let r = self.get_type_of_expression(right);
                return self.check_arithmetic(left, &l, right, &r);
            }
            AmpersandAmpersandEqualsToken | BarBarEqualsToken | QuestionQuestionEqualsToken => {
                self.check_const_assignment_target(left);
                let l = self.get_type_of_expression(left);
                self.get_type_of_expression(right);
                return l;
            }
            _ => {}
        }

        let l = self.get_type_of_expression(left);
        let r = self.get_type_of_expression(right);
        match operator {
            PlusToken => plus_result(&l, &r),
            MinusToken
            | AsteriskToken
            | AsteriskAsteriskToken
            | SlashToken
            | PercentToken
            | LessThanLessThanToken
            | GreaterThanGreaterThanToken
            | GreaterThanGreaterThanGreaterThanToken
            | AmpersandToken
            | BarToken
            | CaretToken => self.check_arithmetic(left, &l, right, &r),
            LessThanToken
            | GreaterThanToken
            | LessThanEqualsToken
            | GreaterThanEqualsToken
            | EqualsEqualsToken
            | ExclamationEqualsToken
            | EqualsEqualsEqualsToken
            | ExclamationEqualsEqualsToken
            | InstanceOfKeyword
            | InKeyword => Type::Boolean,
            BarBarToken | QuestionQuestionToken => Type::union(vec![l.non_nullable(), r]),
            CommaToken => r,
            _ => Type::Any,
        }
    }

    /// TS2362/TS2363 on non-numeric operands of an arithmetic operator.
    fn check_arithmetic(&mut self, left: NodeIndex, l: &Type, right: NodeIndex, r: &Type) -> Type {
        if !is_arithmetic_operand(l) {
            self.error_arithmetic_operand(left, true);
        }
        if !is_arithmetic_operand(r) {
            self.error_arithmetic_operand(right, false);
        }
        if l.is_bigint_like() && r.is_bigint_like() {
            Type::BigInt
        } else {
            Type::Number
        }
    }

    fn check_assignment(&mut self, left: NodeIndex, right: NodeIndex) -> Type {
        let arena = self.ctx.arena;
        let target = arena.skip_parentheses(left);
        match arena.data(target) {
            Some(NodeData::Identifier { text }) => {
                if self.check_const_assignment_target(target) {
                    return self.get_type_of_expression(right);
                }
                match self.resolve_name(text, SymbolFlags::VALUE) {
                    Some(symbol)
                        if self
                            .ctx
                            .binder
                            .symbol(symbol)
                            .flags
                            .intersects(SymbolFlags::VARIABLE | SymbolFlags::PARAMETER) =>
                    {
                        let declared = self.get_type_of_symbol(symbol);
                        let span = arena.span(target);
                        self.check_expression_assignable(right, &declared, span, false)
                    }
                    _ => {
                        self.get_type_of_identifier(target, text);
                        self.get_type_of_expression(right)
                    }
                }
            }
            Some(NodeData::PropertyAccessExpression { .. }) => {
                let declared = self.get_type_of_expression(target);
                if declared.is_any() {
                    return self.get_type_of_expression(right);
                }
                let span = arena.span(target);
                self.check_expression_assignable(right, &declared, span, false)
            }
            _ => {
                self.get_type_of_expression(target);
                self.get_type_of_expression(right)
            }
        }
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// Check a function-like node's parameters and body and return its
    /// function type. Concise arrows without an annotation infer their
    /// return type from the body.
    pub(crate) fn check_function_like(&mut self, idx: NodeIndex, function: &FunctionData) -> Type {
        let arena = self.ctx.arena;
        for &decorator in &function.decorators {
            if let Some(NodeData::Decorator { expression }) = arena.data(decorator) {
                self.get_type_of_expression(*expression);
            }
        }
        self.with_node_scope(idx, |checker| {
            checker.check_type_parameters(&function.type_parameters);
            for &parameter in &function.parameters {
                checker.check_parameter(parameter);
            }
            let signature = checker.signature_of_function(function);
            let declared = match &signature {
                Type::Function(sig) if function.return_type.is_some() && !sig.return_type.is_any() => {
                    Some(sig.return_type.clone())
                }
                _ => None,
            };
            checker.ctx.return_types.push(declared.clone());
            let mut inferred = None;
            match arena.data(function.body) {
                Some(NodeData::Block { statements }) => {
                    for &statement in statements {
                        checker.check_statement(statement);
                    }
                }
                Some(_) => {
                    let body_span = arena.span(function.body);
                    let body = match &declared {
                        Some(expected) => {
                            checker.check_expression_assignable(function.body, expected, body_span, false)
                        }
                        None => checker.get_type_of_expression(function.body),
                    };
                    inferred = Some(body);
                }
                None => {}
            }
            checker.ctx.return_types.pop();

            let is_async = function.modifiers.contains(tsz_parser::ModifierFlags::ASYNC);
            match (signature, inferred) {
                (Type::Function(sig), Some(body))
                    if function.return_type.is_none() && !is_async && !function.asterisk =>
                {
                    Type::function(sig.params.clone(), body.widen())
                }
                (signature, _) => signature,
            }
        })
    }

    pub(crate) fn check_type_parameters(&mut self, type_parameters: &[NodeIndex]) {
        let arena = self.ctx.arena;
        for &parameter in type_parameters {
            if let Some(NodeData::TypeParameter {
                constraint, default, ..
            }) = arena.data(parameter)
            {
                self.resolve_type_node(*constraint);
                self.resolve_type_node(*default);
            }
        }
    }

    fn check_parameter(&mut self, parameter: NodeIndex) {
        let arena = self.ctx.arena;
        let Some(NodeData::Parameter(param)) = arena.data(parameter) else {
            return;
        };
        for &decorator in &param.decorators {
            if let Some(NodeData::Decorator { expression }) = arena.data(decorator) {
                self.get_type_of_expression(*expression);
            }
        }
        self.check_binding_name(param.name);
        if param.type_annotation.is_some() {
            let declared = self.resolve_type_node(param.type_annotation);
            if param.initializer.is_some() {
                let span = arena.span(param.name);
                self.check_expression_assignable(param.initializer, &declared, span, false);
            }
        } else if param.initializer.is_some() {
            self.get_type_of_expression(param.initializer);
        }
    }

    /// Defaults and computed keys inside a destructuring pattern.
    pub(crate) fn check_binding_name(&mut self, name: NodeIndex) {
        let arena = self.ctx.arena;
        if let Some(
            NodeData::ObjectBindingPattern { elements } | NodeData::ArrayBindingPattern { elements },
        ) = arena.data(name)
        {
            for &element in elements {
                if let Some(NodeData::BindingElement {
                    property_name,
                    name,
                    initializer,
                    ..
                }) = arena.data(element)
                {
                    self.check_computed_name(*property_name);
                    self.check_binding_name(*name);
                    if initializer.is_some() {
                        self.get_type_of_expression(*initializer);
                    }
                }
            }
        }
    }
}

fn literal_expression_type(kind: SyntaxKind, text: &str) -> Type {
    match kind {
        SyntaxKind::NumericLiteral => normalize_numeric_literal(text)
            .map(Type::NumberLiteral)
            .unwrap_or(Type::Number),
        SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral => {
            Type::StringLiteral(text.to_string())
        }
        SyntaxKind::BigIntLiteral => Type::BigInt,
        _ => Type::Any,
    }
}

fn is_arithmetic_operand(ty: &Type) -> bool {
    match ty {
        Type::Any
        | Type::Unknown
        | Type::Never
        | Type::Null
        | Type::Undefined
        | Type::Number
        | Type::NumberLiteral(_)
        | Type::BigInt => true,
        Type::Enum(info) => info.kind != EnumKind::String,
        Type::Union(members) => members.iter().all(is_arithmetic_operand),
        _ => false,
    }
}

/// Result of the binary `+` operator.
fn plus_result(l: &Type, r: &Type) -> Type {
    if l.is_string_like() || r.is_string_like() {
        Type::String
    } else if l.is_any() || r.is_any() {
        Type::Any
    } else if l.is_number_like() && r.is_number_like() {
        Type::Number
    } else if l.is_bigint_like() && r.is_bigint_like() {
        Type::BigInt
    } else {
        Type::Any
    }
}
