//! CheckerState: the entry point of semantic checking.
//!
//! The checker walks statements in source order. Declarations are typed
//! lazily: the first reference to a symbol computes its type in the scope
//! the symbol was declared in and caches it, so forward references and
//! hoisted functions behave the way they do at runtime.

use tracing::debug;
use tsz_common::Diagnostic;
use tsz_parser::{FunctionData, NodeArena, NodeData, NodeIndex};

use crate::binder::{BinderState, ScopeId, SymbolFlags, SymbolId};
use crate::context::{CheckerContext, CheckerOptions};
use crate::types::{ParamInfo, Type};

pub struct CheckerState<'a> {
    pub ctx: CheckerContext<'a>,
}

impl<'a> CheckerState<'a> {
    pub fn new(
        arena: &'a NodeArena,
        binder: &'a BinderState,
        file_name: impl Into<String>,
        options: CheckerOptions,
    ) -> CheckerState<'a> {
        CheckerState {
            ctx: CheckerContext::new(arena, binder, file_name, options),
        }
    }

    /// Check every statement of the file. Diagnostics accumulate in
    /// `ctx.diagnostics`.
    pub fn check_source_file(&mut self, root: NodeIndex) {
        let _span = tracing::debug_span!("check", file = %self.ctx.file_name).entered();
        self.ctx.current_scope = self.ctx.binder.root_scope();
        for &statement in self.ctx.arena.statements(root) {
            self.check_statement(statement);
        }
        debug!(
            diagnostics = self.ctx.diagnostics.len(),
            "checked source file"
        );
    }

    /// Diagnostics reported so far, in report order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.ctx.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.ctx.diagnostics
    }

    // =========================================================================
    // Scopes
    // =========================================================================

    pub(crate) fn with_scope<R>(&mut self, scope: ScopeId, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.ctx.current_scope;
        self.ctx.current_scope = scope;
        let result = f(self);
        self.ctx.current_scope = saved;
        result
    }

    /// Run `f` in the scope the binder created for `node`, or in the current
    /// scope when `node` creates none.
    pub(crate) fn with_node_scope<R>(&mut self, node: NodeIndex, f: impl FnOnce(&mut Self) -> R) -> R {
        match self.ctx.binder.scope_of(node) {
            Some(scope) => self.with_scope(scope, f),
            None => f(self),
        }
    }

    pub(crate) fn with_type_parameter_names<R>(
        &mut self,
        names: Vec<String>,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let pushed = names.len();
        self.ctx.type_parameter_names.extend(names);
        let result = f(self);
        let len = self.ctx.type_parameter_names.len();
        self.ctx.type_parameter_names.truncate(len - pushed);
        result
    }

    pub(crate) fn resolve_name(&self, name: &str, meaning: SymbolFlags) -> Option<SymbolId> {
        self.ctx
            .binder
            .resolve_name(self.ctx.current_scope, name, meaning)
    }

    // =========================================================================
    // Symbol types
    // =========================================================================

    /// Value type of a symbol.
    pub(crate) fn get_type_of_symbol(&mut self, symbol_id: SymbolId) -> Type {
        if let Some(ty) = self.ctx.symbol_types.get(&symbol_id) {
            return ty.clone();
        }
        if !self.ctx.resolving.insert(symbol_id) {
            return Type::Any;
        }
        let ty = self.compute_type_of_symbol(symbol_id);
        self.ctx.resolving.remove(&symbol_id);
        self.ctx.symbol_types.insert(symbol_id, ty.clone());
        ty
    }

    fn compute_type_of_symbol(&mut self, symbol_id: SymbolId) -> Type {
        let (arena, binder) = (self.ctx.arena, self.ctx.binder);
        let symbol = binder.symbol(symbol_id);
        if symbol.flags.intersects(
            SymbolFlags::CLASS | SymbolFlags::NAMESPACE | SymbolFlags::ALIAS | SymbolFlags::ENUM,
        ) {
            return Type::Any;
        }
        if symbol.flags.contains(SymbolFlags::FUNCTION) {
            let functions: Vec<_> = symbol
                .declarations
                .iter()
                .filter(|d| d.flags.contains(SymbolFlags::FUNCTION))
                .collect();
            // Overloads are not modeled.
            if functions.len() != 1 {
                return Type::Any;
            }
            let node = functions[0].node;
            return match arena.data(node) {
                Some(
                    NodeData::FunctionDeclaration(function) | NodeData::FunctionExpression(function),
                ) => self.with_node_scope(node, |checker| checker.signature_of_function(function)),
                _ => Type::Any,
            };
        }
        let Some(declaration) = symbol.declarations.first() else {
            return Type::Any;
        };
        let (node, scope) = (declaration.node, declaration.scope);
        let is_const = symbol.flags.contains(SymbolFlags::CONST);
        self.with_scope(scope, |checker| match arena.data(node) {
            Some(NodeData::VariableDeclaration(decl)) => {
                if !matches!(arena.data(decl.name), Some(NodeData::Identifier { .. })) {
                    return Type::Any;
                }
                if decl.type_annotation.is_some() {
                    return checker.resolve_type_node(decl.type_annotation);
                }
                if decl.initializer.is_none() {
                    return Type::Any;
                }
                let ty = checker.get_type_of_expression(decl.initializer);
                if is_const {
                    ty
                } else {
                    Self::widen_for_mutable_location(&ty)
                }
            }
            Some(NodeData::Parameter(param)) => checker.type_of_parameter(param),
            _ => Type::Any,
        })
    }

    /// Type a `let`/`var` declaration or a parameter default infers from
    /// its initializer.
    pub(crate) fn widen_for_mutable_location(ty: &Type) -> Type {
        match ty.widen() {
            // Evolving `let x = null;` declarations are not modeled.
            Type::Null | Type::Undefined => Type::Any,
            widened => widened,
        }
    }

    pub(crate) fn type_of_parameter(&mut self, param: &tsz_parser::ParameterData) -> Type {
        if !matches!(self.ctx.arena.data(param.name), Some(NodeData::Identifier { .. })) {
            return Type::Any;
        }
        let declared = if param.type_annotation.is_some() {
            self.resolve_type_node(param.type_annotation)
        } else if param.dot_dot_dot {
            Type::Array(Box::new(Type::Any))
        } else if param.initializer.is_some() {
            let ty = self.get_type_of_expression(param.initializer);
            Self::widen_for_mutable_location(&ty)
        } else {
            Type::Any
        };
        if param.question && self.ctx.strict() {
            Type::union(vec![declared, Type::Undefined])
        } else {
            declared
        }
    }

    /// Signature of a function-like declaration, resolved in the function's
    /// own scope so its type parameters are visible.
    pub(crate) fn signature_of_function(&mut self, function: &FunctionData) -> Type {
        let arena = self.ctx.arena;
        let mut params = Vec::new();
        for &parameter in &function.parameters {
            let Some(NodeData::Parameter(param)) = arena.data(parameter) else {
                continue;
            };
            let name = arena.identifier_text(param.name).unwrap_or_default();
            if name == "this" {
                continue;
            }
            let ty = self.type_of_parameter(param);
            params.push(ParamInfo {
                name: name.to_string(),
                ty,
                optional: param.question || param.initializer.is_some(),
                rest: param.dot_dot_dot,
            });
        }
        let return_type = self.declared_return_type(function);
        Type::function(params, return_type)
    }

    /// Return type written on a function, `any` when absent or when the
    /// function is async or a generator.
    pub(crate) fn declared_return_type(&mut self, function: &FunctionData) -> Type {
        if function.return_type.is_none()
            || function.asterisk
            || function.modifiers.contains(tsz_parser::ModifierFlags::ASYNC)
        {
            if function.return_type.is_some() {
                self.resolve_type_node(function.return_type);
            }
            return Type::Any;
        }
        self.resolve_type_node(function.return_type)
    }
}
