//! Resolution of type annotations to checker types.
//!
//! Every name a type node mentions is resolved, so unknown names report
//! TS2304 even inside constructs whose type is not modeled (conditional,
//! mapped and indexed-access types all resolve to `any`).

use tsz_parser::{NodeData, NodeIndex, SignatureData};
use tsz_scanner::SyntaxKind;

use crate::binder::{STACK_GROWTH, STACK_RED_ZONE, SymbolFlags, SymbolId};
use crate::globals::{is_global_type, is_global_value};
use crate::state::CheckerState;
use crate::types::{EnumInfo, EnumKind, ParamInfo, PropertyInfo, Type, normalize_numeric_literal};

impl<'a> CheckerState<'a> {
    pub(crate) fn resolve_type_node(&mut self, idx: NodeIndex) -> Type {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || self.resolve_type_node_worker(idx))
    }

    fn resolve_type_node_worker(&mut self, idx: NodeIndex) -> Type {
        let arena = self.ctx.arena;
        let Some(data) = arena.data(idx) else {
            return Type::Any;
        };
        match data {
            NodeData::KeywordType { kind } => keyword_type(*kind),
            NodeData::LiteralType { literal } => self.literal_type(*literal),
            NodeData::ArrayType { element_type } => {
                Type::Array(Box::new(self.resolve_type_node(*element_type)))
            }
            NodeData::TupleType { elements } => self.resolve_tuple_type(elements),
            NodeData::UnionType { types } => {
                let members = types.iter().map(|&t| self.resolve_type_node(t)).collect();
                Type::union(members)
            }
            NodeData::IntersectionType { types } | NodeData::TemplateLiteralType { types } => {
                for &t in types {
                    self.resolve_type_node(t);
                }
                if matches!(data, NodeData::TemplateLiteralType { .. }) {
                    Type::String
                } else {
                    Type::Any
                }
            }
            NodeData::ParenthesizedType { type_node } => self.resolve_type_node(*type_node),
            NodeData::FunctionType(signature) => self.resolve_signature(signature),
            NodeData::ConstructorType(signature) => {
                self.resolve_signature(signature);
                Type::Any
            }
            NodeData::TypeLiteral { members } => self.resolve_type_members(members),
            NodeData::TypeOperator {
                operator,
                type_node,
            } => {
                let inner = self.resolve_type_node(*type_node);
                match operator {
                    SyntaxKind::ReadonlyKeyword => inner,
                    SyntaxKind::UniqueKeyword => Type::Symbol,
                    _ => Type::Any,
                }
            }
            NodeData::IndexedAccessType {
                object_type,
                index_type,
            } => {
                self.resolve_type_node(*object_type);
                self.resolve_type_node(*index_type);
                Type::Any
            }
            NodeData::MappedType {
                type_parameter,
                name_type,
                type_node,
            } => {
                let (name, constraint) = match arena.data(*type_parameter) {
                    Some(NodeData::TypeParameter {
                        name, constraint, ..
                    }) => (
                        arena.identifier_text(*name).unwrap_or_default().to_string(),
                        *constraint,
                    ),
                    _ => (String::new(), NodeIndex::NONE),
                };
                self.resolve_type_node(constraint);
                self.with_type_parameter_names(vec![name], |checker| {
                    checker.resolve_type_node(*name_type);
                    checker.resolve_type_node(*type_node);
                });
                Type::Any
            }
            NodeData::ConditionalType {
                check_type,
                extends_type,
                true_type,
                false_type,
            } => {
                self.resolve_type_node(*check_type);
                let mut inferred = Vec::new();
                self.collect_infer_names(*extends_type, &mut inferred);
                self.with_type_parameter_names(inferred, |checker| {
                    checker.resolve_type_node(*extends_type);
                    checker.resolve_type_node(*true_type);
                });
                self.resolve_type_node(*false_type);
                Type::Any
            }
            NodeData::InferType { type_parameter } => {
                if let Some(NodeData::TypeParameter { constraint, .. }) = arena.data(*type_parameter) {
                    self.resolve_type_node(*constraint);
                }
                Type::Any
            }
            NodeData::OptionalType { type_node } | NodeData::RestType { type_node } => {
                self.resolve_type_node(*type_node);
                Type::Any
            }
            NodeData::NamedTupleMember { type_node, .. } => self.resolve_type_node(*type_node),
            NodeData::TypeQuery {
                expr_name,
                type_arguments,
            } => {
                for &argument in type_arguments {
                    self.resolve_type_node(argument);
                }
                self.resolve_type_query(*expr_name)
            }
            NodeData::TypePredicate {
                asserts, type_node, ..
            } => {
                self.resolve_type_node(*type_node);
                if *asserts { Type::Void } else { Type::Boolean }
            }
            NodeData::ImportType {
                argument,
                type_arguments,
                ..
            } => {
                if let Some(NodeData::LiteralType { literal }) = arena.data(*argument) {
                    self.check_module_specifier(*literal);
                }
                for &argument in type_arguments {
                    self.resolve_type_node(argument);
                }
                Type::Any
            }
            NodeData::TypeReference {
                type_name,
                type_arguments,
            } => self.resolve_type_reference(*type_name, type_arguments),
            _ => Type::Any,
        }
    }

    pub(crate) fn literal_type(&self, literal: NodeIndex) -> Type {
        match self.ctx.arena.data(literal) {
            Some(NodeData::Literal { kind, text }) => match kind {
                SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral => {
                    Type::StringLiteral(text.clone())
                }
                SyntaxKind::NumericLiteral => normalize_numeric_literal(text)
                    .map(Type::NumberLiteral)
                    .unwrap_or(Type::Number),
                SyntaxKind::BigIntLiteral => Type::BigInt,
                _ => Type::Any,
            },
            Some(NodeData::Keyword { kind }) => match kind {
                SyntaxKind::TrueKeyword => Type::BooleanLiteral(true),
                SyntaxKind::FalseKeyword => Type::BooleanLiteral(false),
                SyntaxKind::NullKeyword => Type::Null,
                _ => Type::Any,
            },
            Some(NodeData::PrefixUnaryExpression { operand, .. }) => match self.literal_type(*operand) {
                Type::NumberLiteral(text) if text == "0" => Type::NumberLiteral(text),
                Type::NumberLiteral(text) => Type::NumberLiteral(format!("-{text}")),
                other => other,
            },
            _ => Type::Any,
        }
    }

    fn resolve_tuple_type(&mut self, elements: &[NodeIndex]) -> Type {
        let arena = self.ctx.arena;
        let mut types = Vec::with_capacity(elements.len());
        let mut variadic = false;
        for &element in elements {
            match arena.data(element) {
                Some(NodeData::OptionalType { .. } | NodeData::RestType { .. }) => variadic = true,
                Some(NodeData::NamedTupleMember {
                    dot_dot_dot,
                    question,
                    ..
                }) if *dot_dot_dot || *question => variadic = true,
                _ => {}
            }
            types.push(self.resolve_type_node(element));
        }
        if variadic { Type::Any } else { Type::Tuple(types) }
    }

    // =========================================================================
    // Signatures and members
    // =========================================================================

    fn type_parameter_names(&self, type_parameters: &[NodeIndex]) -> Vec<String> {
        let arena = self.ctx.arena;
        type_parameters
            .iter()
            .filter_map(|&p| match arena.data(p) {
                Some(NodeData::TypeParameter { name, .. }) => {
                    arena.identifier_text(*name).map(str::to_string)
                }
                _ => None,
            })
            .collect()
    }

    /// Function type for a signature. Its type parameters are in scope for
    /// the parameters and the return type.
    pub(crate) fn resolve_signature(&mut self, signature: &SignatureData) -> Type {
        let arena = self.ctx.arena;
        let names = self.type_parameter_names(&signature.type_parameters);
        self.with_type_parameter_names(names, |checker| {
            for &parameter in &signature.type_parameters {
                if let Some(NodeData::TypeParameter {
                    constraint, default, ..
                }) = arena.data(parameter)
                {
                    checker.resolve_type_node(*constraint);
                    checker.resolve_type_node(*default);
                }
            }
            let mut params = Vec::new();
            for &parameter in &signature.parameters {
                let Some(NodeData::Parameter(param)) = arena.data(parameter) else {
                    continue;
                };
                let name = arena.identifier_text(param.name).unwrap_or_default();
                let ty = if param.type_annotation.is_some() {
                    checker.resolve_type_node(param.type_annotation)
                } else if param.dot_dot_dot {
                    Type::Array(Box::new(Type::Any))
                } else {
                    Type::Any
                };
                if name == "this" {
                    continue;
                }
                let ty = if param.question && checker.ctx.strict() {
                    Type::union(vec![ty, Type::Undefined])
                } else {
                    ty
                };
                params.push(ParamInfo {
                    name: name.to_string(),
                    ty,
                    optional: param.question,
                    rest: param.dot_dot_dot,
                });
            }
            let return_type = checker.resolve_type_node(signature.return_type);
            Type::function(params, return_type)
        })
    }

    /// Object shape for the members of a type literal or interface. Index,
    /// call and construct signatures and computed names make it `any`.
    pub(crate) fn resolve_type_members(&mut self, members: &[NodeIndex]) -> Type {
        let arena = self.ctx.arena;
        let mut properties: Vec<PropertyInfo> = Vec::new();
        let mut modeled = true;
        for &member in members {
            match arena.data(member) {
                Some(NodeData::PropertySignature {
                    name,
                    question,
                    type_annotation,
                    ..
                }) => {
                    if let Some(NodeData::ComputedPropertyName { expression }) = arena.data(*name) {
                        self.get_type_of_expression(*expression);
                    }
                    let ty = if type_annotation.is_some() {
                        self.resolve_type_node(*type_annotation)
                    } else {
                        Type::Any
                    };
                    match arena.property_name_text(*name) {
                        Some(text) => push_property(&mut properties, text, ty, *question),
                        None => modeled = false,
                    }
                }
                Some(NodeData::MethodSignature {
                    name,
                    question,
                    signature,
                }) => {
                    if let Some(NodeData::ComputedPropertyName { expression }) = arena.data(*name) {
                        self.get_type_of_expression(*expression);
                    }
                    let ty = self.resolve_signature(signature);
                    match arena.property_name_text(*name) {
                        Some(text) => push_property(&mut properties, text, ty, *question),
                        None => modeled = false,
                    }
                }
                Some(NodeData::CallSignature(signature) | NodeData::ConstructSignature(signature)) => {
                    self.resolve_signature(signature);
                    modeled = false;
                }
                Some(NodeData::IndexSignature {
                    parameters,
                    type_annotation,
                    ..
                }) => {
                    for &parameter in parameters {
                        if let Some(NodeData::Parameter(param)) = arena.data(parameter) {
                            self.resolve_type_node(param.type_annotation);
                        }
                    }
                    self.resolve_type_node(*type_annotation);
                    modeled = false;
                }
                _ => modeled = false,
            }
        }
        if modeled {
            Type::object(properties)
        } else {
            Type::Any
        }
    }

    fn collect_infer_names(&self, idx: NodeIndex, out: &mut Vec<String>) {
        let arena = self.ctx.arena;
        if let Some(NodeData::InferType { type_parameter }) = arena.data(idx)
            && let Some(NodeData::TypeParameter { name, .. }) = arena.data(*type_parameter)
            && let Some(text) = arena.identifier_text(*name)
        {
            out.push(text.to_string());
        }
        for child in arena.children(idx) {
            self.collect_infer_names(child, out);
        }
    }

    // =========================================================================
    // References
    // =========================================================================

    fn resolve_type_reference(&mut self, type_name: NodeIndex, type_arguments: &[NodeIndex]) -> Type {
        let arena = self.ctx.arena;
        let arguments: Vec<Type> = type_arguments
            .iter()
            .map(|&argument| self.resolve_type_node(argument))
            .collect();

        if let Some(NodeData::QualifiedName { .. }) = arena.data(type_name) {
            return self.resolve_qualified_type_name(type_name);
        }
        let Some(name) = arena.identifier_text(type_name) else {
            return Type::Any;
        };
        // `as const` parses as a reference to `const`.
        if name == "const" || self.ctx.is_type_parameter_name(name) {
            return Type::Any;
        }
        if let Some(symbol) = self.resolve_name(name, SymbolFlags::TYPE) {
            return self.get_declared_type_of_symbol(symbol);
        }
        if matches!(name, "Array" | "ReadonlyArray") && arguments.len() == 1 {
            return Type::Array(Box::new(arguments[0].clone()));
        }
        // A value used as a type is a different error.
        if !is_global_type(name) && self.resolve_name(name, SymbolFlags::VALUE).is_none() {
            self.error_cannot_find_name(name, type_name);
        }
        Type::Any
    }

    /// `A.B` in a type position: enum members, namespace members and
    /// global namespaces such as `NodeJS.Timeout`.
    fn resolve_qualified_type_name(&mut self, type_name: NodeIndex) -> Type {
        let arena = self.ctx.arena;
        let leftmost = arena.leftmost_identifier(type_name);
        let Some(name) = arena.identifier_text(leftmost) else {
            return Type::Any;
        };
        match self.resolve_name(name, SymbolFlags::VALUE | SymbolFlags::TYPE) {
            Some(symbol) => {
                let is_enum = self.ctx.binder.symbol(symbol).flags.contains(SymbolFlags::ENUM);
                let is_member = matches!(
                    arena.data(type_name),
                    Some(NodeData::QualifiedName { left, .. }) if *left == leftmost
                );
                if is_enum && is_member {
                    self.get_declared_type_of_symbol(symbol)
                } else {
                    Type::Any
                }
            }
            None => {
                if !is_global_type(name) && !is_global_value(name) {
                    self.error_cannot_find_name(name, leftmost);
                }
                Type::Any
            }
        }
    }

    /// `typeof x` and `typeof a.b`.
    fn resolve_type_query(&mut self, expr_name: NodeIndex) -> Type {
        let arena = self.ctx.arena;
        if let Some(NodeData::ImportType { .. }) = arena.data(expr_name) {
            return self.resolve_type_node(expr_name);
        }
        let leftmost = arena.leftmost_identifier(expr_name);
        let Some(name) = arena.identifier_text(leftmost) else {
            return Type::Any;
        };
        match self.resolve_name(name, SymbolFlags::VALUE) {
            Some(symbol) if leftmost == expr_name => self.get_type_of_symbol(symbol),
            Some(_) => Type::Any,
            None => {
                if name != "this" && !is_global_value(name) {
                    self.error_cannot_find_name(name, leftmost);
                }
                Type::Any
            }
        }
    }

    // =========================================================================
    // Declared types
    // =========================================================================

    /// Type a type-meaning symbol denotes.
    pub(crate) fn get_declared_type_of_symbol(&mut self, symbol_id: SymbolId) -> Type {
        if let Some(ty) = self.ctx.declared_types.get(&symbol_id) {
            return ty.clone();
        }
        if !self.ctx.resolving_types.insert(symbol_id) {
            return Type::Any;
        }
        let ty = self.compute_declared_type(symbol_id);
        self.ctx.resolving_types.remove(&symbol_id);
        self.ctx.declared_types.insert(symbol_id, ty.clone());
        ty
    }

    fn compute_declared_type(&mut self, symbol_id: SymbolId) -> Type {
        let (arena, binder) = (self.ctx.arena, self.ctx.binder);
        let symbol = binder.symbol(symbol_id);
        if symbol.flags.contains(SymbolFlags::ENUM) {
            return Type::Enum(std::rc::Rc::new(EnumInfo {
                name: symbol.name.clone(),
                kind: self.enum_kind(symbol_id),
            }));
        }
        let Some(declaration) = symbol.declaration_with(SymbolFlags::TYPE) else {
            return Type::Any;
        };
        let node = declaration.node;
        match arena.data(node) {
            Some(NodeData::TypeAliasDeclaration { type_node, .. }) => {
                let type_node = *type_node;
                self.with_node_scope(node, |checker| checker.resolve_type_node(type_node))
            }
            Some(NodeData::InterfaceDeclaration {
                heritage, members, ..
            }) => {
                let interfaces = symbol
                    .declarations
                    .iter()
                    .filter(|d| d.flags.contains(SymbolFlags::INTERFACE))
                    .count();
                if interfaces != 1 || !heritage.is_empty() {
                    return Type::Any;
                }
                self.with_node_scope(node, |checker| checker.resolve_type_members(members))
            }
            _ => Type::Any,
        }
    }

    /// Numeric when every member is auto-numbered or a number literal, string
    /// when every member is a string literal.
    pub(crate) fn enum_kind(&self, symbol_id: SymbolId) -> EnumKind {
        let arena = self.ctx.arena;
        let symbol = self.ctx.binder.symbol(symbol_id);
        let mut numeric = true;
        let mut string = true;
        let mut declarations = 0;
        for declaration in &symbol.declarations {
            let Some(NodeData::EnumDeclaration { members, .. }) = arena.data(declaration.node) else {
                continue;
            };
            declarations += 1;
            for &member in members {
                let Some(NodeData::EnumMember { initializer, .. }) = arena.data(member) else {
                    continue;
                };
                match arena.data(*initializer) {
                    None => string = false,
                    Some(NodeData::Literal {
                        kind: SyntaxKind::NumericLiteral,
                        ..
                    })
                    | Some(NodeData::PrefixUnaryExpression { .. }) => string = false,
                    Some(NodeData::Literal {
                        kind: SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral,
                        ..
                    }) => numeric = false,
                    _ => {
                        numeric = false;
                        string = false;
                    }
                }
            }
        }
        match (declarations, numeric, string) {
            (1, true, false) | (1, true, true) => EnumKind::Numeric,
            (1, false, true) => EnumKind::String,
            _ => EnumKind::Mixed,
        }
    }
}

fn keyword_type(kind: SyntaxKind) -> Type {
    match kind {
        SyntaxKind::UnknownKeyword => Type::Unknown,
        SyntaxKind::NumberKeyword => Type::Number,
        SyntaxKind::StringKeyword => Type::String,
        SyntaxKind::BooleanKeyword => Type::Boolean,
        SyntaxKind::BigIntKeyword => Type::BigInt,
        SyntaxKind::SymbolKeyword => Type::Symbol,
        SyntaxKind::ObjectKeyword => Type::NonPrimitive,
        SyntaxKind::NeverKeyword => Type::Never,
        SyntaxKind::UndefinedKeyword => Type::Undefined,
        SyntaxKind::VoidKeyword => Type::Void,
        SyntaxKind::NullKeyword => Type::Null,
        _ => Type::Any,
    }
}

/// Add a member; a repeated name (method overloads) types as `any`.
fn push_property(properties: &mut Vec<PropertyInfo>, name: &str, ty: Type, optional: bool) {
    if let Some(existing) = properties.iter_mut().find(|p| p.name == name) {
        existing.ty = Type::Any;
        return;
    }
    properties.push(PropertyInfo {
        name: name.to_string(),
        ty,
        optional,
    });
}
