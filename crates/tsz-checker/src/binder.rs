//! Binder: scopes and symbols for one source file.
//!
//! The binder walks the AST once before checking. It creates a scope for
//! every container (source file, function-like, block, loop, catch clause,
//! namespace, class, interface and type alias), declares every name in the
//! scope it belongs to (`var` hoists to the nearest function or namespace
//! scope), and records ambient module declarations. The checker resolves
//! names against these scopes afterwards, so declaration order never
//! matters for lookup.

use bitflags::bitflags;
use rustc_hash::FxHashMap;
use tracing::debug;
use tsz_common::Diagnostic;
use tsz_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use tsz_parser::{FunctionData, NodeArena, NodeData, NodeIndex, VariableKind};

pub(crate) use tsz_common::limits::{STACK_GROWTH, STACK_RED_ZONE};

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct SymbolFlags: u32 {
        const FUNCTION_SCOPED_VARIABLE = 1 << 0;
        const BLOCK_SCOPED_VARIABLE = 1 << 1;
        const CONST = 1 << 2;
        const PARAMETER = 1 << 3;
        const FUNCTION = 1 << 4;
        const CLASS = 1 << 5;
        const INTERFACE = 1 << 6;
        const TYPE_ALIAS = 1 << 7;
        const ENUM = 1 << 8;
        const NAMESPACE = 1 << 9;
        const ALIAS = 1 << 10;
        const TYPE_PARAMETER = 1 << 11;

        const VARIABLE = Self::FUNCTION_SCOPED_VARIABLE.bits() | Self::BLOCK_SCOPED_VARIABLE.bits();
        const VALUE = Self::VARIABLE.bits()
            | Self::PARAMETER.bits()
            | Self::FUNCTION.bits()
            | Self::CLASS.bits()
            | Self::ENUM.bits()
            | Self::NAMESPACE.bits()
            | Self::ALIAS.bits();
        const TYPE = Self::CLASS.bits()
            | Self::INTERFACE.bits()
            | Self::TYPE_ALIAS.bits()
            | Self::ENUM.bits()
            | Self::NAMESPACE.bits()
            | Self::ALIAS.bits()
            | Self::TYPE_PARAMETER.bits();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

/// One declaration of a symbol.
#[derive(Clone, Debug)]
pub struct Declaration {
    /// The declaring node (`VariableDeclaration`, `Parameter`, ...).
    pub node: NodeIndex,
    /// The identifier naming it.
    pub name: NodeIndex,
    pub flags: SymbolFlags,
    /// Scope the declaration appears in, used to resolve its annotation.
    pub scope: ScopeId,
}

#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: String,
    pub flags: SymbolFlags,
    pub declarations: Vec<Declaration>,
}

impl Symbol {
    /// First declaration carrying any of `flags`.
    pub fn declaration_with(&self, flags: SymbolFlags) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.flags.intersects(flags))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    SourceFile,
    Function,
    Block,
    Module,
    Class,
    TypeParameters,
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub symbols: FxHashMap<String, SymbolId>,
}

pub struct BinderState {
    file_name: String,
    symbols: Vec<Symbol>,
    scopes: Vec<Scope>,
    node_scopes: FxHashMap<NodeIndex, ScopeId>,
    name_symbols: FxHashMap<NodeIndex, SymbolId>,
    declared_modules: Vec<String>,
    diagnostics: Vec<Diagnostic>,
    current_scope: ScopeId,
    /// Target scope for `var` declarations.
    function_scope: ScopeId,
}

impl BinderState {
    pub fn new(file_name: impl Into<String>) -> BinderState {
        BinderState {
            file_name: file_name.into(),
            symbols: Vec::new(),
            scopes: vec![Scope {
                kind: ScopeKind::SourceFile,
                parent: None,
                symbols: FxHashMap::default(),
            }],
            node_scopes: FxHashMap::default(),
            name_symbols: FxHashMap::default(),
            declared_modules: Vec::new(),
            diagnostics: Vec::new(),
            current_scope: ScopeId(0),
            function_scope: ScopeId(0),
        }
    }

    // =========================================================================
    // Results
    // =========================================================================

    pub fn root_scope(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0 as usize]
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// Scope created for a container node, if it creates one.
    pub fn scope_of(&self, node: NodeIndex) -> Option<ScopeId> {
        self.node_scopes.get(&node).copied()
    }

    /// Symbol declared by a name identifier.
    pub fn symbol_of_name(&self, name: NodeIndex) -> Option<SymbolId> {
        self.name_symbols.get(&name).copied()
    }

    /// Module names declared with `declare module "name"`.
    pub fn declared_modules(&self) -> &[String] {
        &self.declared_modules
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Resolve `name` from `scope` outwards, considering only symbols with
    /// one of the `meaning` flags.
    pub fn resolve_name(&self, scope: ScopeId, name: &str, meaning: SymbolFlags) -> Option<SymbolId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id);
            if let Some(&symbol) = scope.symbols.get(name)
                && self.symbol(symbol).flags.intersects(meaning)
            {
                return Some(symbol);
            }
            current = scope.parent;
        }
        None
    }

    // =========================================================================
    // Entry point
    // =========================================================================

    pub fn bind_source_file(&mut self, arena: &NodeArena, root: NodeIndex) {
        let _span = tracing::debug_span!("bind", file = %self.file_name).entered();
        self.node_scopes.insert(root, ScopeId(0));
        for statement in arena.statements(root) {
            self.bind_node(arena, *statement);
        }
        self.report_block_scoped_redeclarations(arena);
        debug!(
            symbols = self.symbols.len(),
            scopes = self.scopes.len(),
            "bound source file"
        );
    }

    // =========================================================================
    // Scopes and declarations
    // =========================================================================

    fn create_scope(&mut self, node: NodeIndex, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            kind,
            parent: Some(self.current_scope),
            symbols: FxHashMap::default(),
        });
        self.node_scopes.insert(node, id);
        id
    }

    /// Run `f` inside `scope`; function and module scopes also become the
    /// target for hoisted `var` declarations.
    fn with_scope(&mut self, scope: ScopeId, f: impl FnOnce(&mut Self)) {
        let saved_scope = self.current_scope;
        let saved_function = self.function_scope;
        self.current_scope = scope;
        if matches!(
            self.scope(scope).kind,
            ScopeKind::Function | ScopeKind::Module | ScopeKind::SourceFile
        ) {
            self.function_scope = scope;
        }
        f(self);
        self.current_scope = saved_scope;
        self.function_scope = saved_function;
    }

    fn declare(&mut self, scope: ScopeId, arena: &NodeArena, name: NodeIndex, node: NodeIndex, flags: SymbolFlags) {
        let Some(text) = arena.identifier_text(name) else {
            return;
        };
        if text.is_empty() {
            return;
        }
        let declaration = Declaration {
            node,
            name,
            flags,
            scope: self.current_scope,
        };
        let existing = self.scopes[scope.0 as usize].symbols.get(text).copied();
        let id = match existing {
            Some(id) => {
                let symbol = &mut self.symbols[id.0 as usize];
                symbol.flags |= flags;
                symbol.declarations.push(declaration);
                id
            }
            None => {
                let id = SymbolId(self.symbols.len() as u32);
                self.symbols.push(Symbol {
                    name: text.to_string(),
                    flags,
                    declarations: vec![declaration],
                });
                self.scopes[scope.0 as usize]
                    .symbols
                    .insert(text.to_string(), id);
                id
            }
        };
        self.name_symbols.insert(name, id);
    }

    /// Declare every identifier in a binding name (plain or destructuring).
    fn declare_binding_name(&mut self, scope: ScopeId, arena: &NodeArena, name: NodeIndex, node: NodeIndex, flags: SymbolFlags) {
        match arena.data(name) {
            Some(NodeData::Identifier { .. }) => self.declare(scope, arena, name, node, flags),
            Some(NodeData::ObjectBindingPattern { elements })
            | Some(NodeData::ArrayBindingPattern { elements }) => {
                for element in elements {
                    if let Some(NodeData::BindingElement { name: inner, .. }) = arena.data(*element) {
                        self.declare_binding_name(scope, arena, *inner, *element, flags);
                    }
                }
            }
            _ => {}
        }
    }

    fn declare_type_parameters(&mut self, arena: &NodeArena, type_parameters: &[NodeIndex]) {
        for parameter in type_parameters {
            if let Some(NodeData::TypeParameter { name, .. }) = arena.data(*parameter) {
                self.declare(self.current_scope, arena, *name, *parameter, SymbolFlags::TYPE_PARAMETER);
            }
        }
    }

    // =========================================================================
    // Node walk
    // =========================================================================

    fn bind_children(&mut self, arena: &NodeArena, node: NodeIndex) {
        for child in arena.children(node) {
            self.bind_node(arena, child);
        }
    }

    fn bind_node(&mut self, arena: &NodeArena, idx: NodeIndex) {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || self.bind_node_worker(arena, idx));
    }

    fn bind_node_worker(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(data) = arena.data(idx) else {
            return;
        };
        if data.is_type_node() {
            return;
        }
        match data {
            NodeData::VariableDeclarationList { kind, declarations } => {
                let (scope, flags) = match kind {
                    VariableKind::Var => (self.function_scope, SymbolFlags::FUNCTION_SCOPED_VARIABLE),
                    VariableKind::Let => (self.current_scope, SymbolFlags::BLOCK_SCOPED_VARIABLE),
                    VariableKind::Const => (
                        self.current_scope,
                        SymbolFlags::BLOCK_SCOPED_VARIABLE | SymbolFlags::CONST,
                    ),
                };
                for declaration in declarations {
                    if let Some(NodeData::VariableDeclaration(decl)) = arena.data(*declaration) {
                        self.declare_binding_name(scope, arena, decl.name, *declaration, flags);
                        self.bind_binding_initializers(arena, decl.name);
                        self.bind_node(arena, decl.initializer);
                    }
                }
            }
            NodeData::FunctionDeclaration(function) => {
                self.declare(self.current_scope, arena, function.name, idx, SymbolFlags::FUNCTION);
                self.bind_function_like(arena, idx, function, false);
            }
            NodeData::FunctionExpression(function) => {
                self.bind_function_like(arena, idx, function, true);
            }
            NodeData::ArrowFunction(function)
            | NodeData::MethodDeclaration(function)
            | NodeData::Constructor(function)
            | NodeData::GetAccessor(function)
            | NodeData::SetAccessor(function) => {
                if let Some(NodeData::ComputedPropertyName { expression }) = arena.data(function.name) {
                    self.bind_node(arena, *expression);
                }
                for decorator in &function.decorators {
                    self.bind_node(arena, *decorator);
                }
                self.bind_function_like(arena, idx, function, false);
            }
            NodeData::ClassDeclaration(class) | NodeData::ClassExpression(class) => {
                let is_declaration = matches!(data, NodeData::ClassDeclaration(_));
                if is_declaration {
                    self.declare(self.current_scope, arena, class.name, idx, SymbolFlags::CLASS);
                }
                for decorator in &class.decorators {
                    self.bind_node(arena, *decorator);
                }
                let scope = self.create_scope(idx, ScopeKind::Class);
                self.with_scope(scope, |binder| {
                    if !is_declaration {
                        binder.declare(scope, arena, class.name, idx, SymbolFlags::CLASS);
                    }
                    binder.declare_type_parameters(arena, &class.type_parameters);
                    binder.bind_node(arena, class.extends);
                    for member in &class.members {
                        binder.bind_node(arena, *member);
                    }
                });
            }
            NodeData::PropertyDeclaration(property) => {
                for decorator in &property.decorators {
                    self.bind_node(arena, *decorator);
                }
                self.bind_node(arena, property.name);
                self.bind_node(arena, property.initializer);
            }
            NodeData::ClassStaticBlock { body } => {
                let scope = self.create_scope(idx, ScopeKind::Function);
                self.with_scope(scope, |binder| binder.bind_block_in_current_scope(arena, *body));
            }
            NodeData::InterfaceDeclaration {
                name,
                type_parameters,
                ..
            } => {
                self.declare(self.current_scope, arena, *name, idx, SymbolFlags::INTERFACE);
                self.bind_type_parameter_scope(arena, idx, type_parameters);
            }
            NodeData::TypeAliasDeclaration {
                name,
                type_parameters,
                ..
            } => {
                self.declare(self.current_scope, arena, *name, idx, SymbolFlags::TYPE_ALIAS);
                self.bind_type_parameter_scope(arena, idx, type_parameters);
            }
            NodeData::EnumDeclaration { name, members, .. } => {
                self.declare(self.current_scope, arena, *name, idx, SymbolFlags::ENUM);
                for member in members {
                    if let Some(NodeData::EnumMember { initializer, .. }) = arena.data(*member) {
                        self.bind_node(arena, *initializer);
                    }
                }
            }
            NodeData::ModuleDeclaration(module) => self.bind_module_declaration(arena, idx, module),
            NodeData::ImportClause {
                name,
                named_bindings,
                ..
            } => {
                self.declare(self.current_scope, arena, *name, idx, SymbolFlags::ALIAS);
                self.bind_node(arena, *named_bindings);
            }
            NodeData::NamespaceImport { name } => {
                self.declare(self.current_scope, arena, *name, idx, SymbolFlags::ALIAS);
            }
            NodeData::ImportSpecifier { name, .. } => {
                self.declare(self.current_scope, arena, *name, idx, SymbolFlags::ALIAS);
            }
            NodeData::ImportEqualsDeclaration { name, .. } => {
                self.declare(self.current_scope, arena, *name, idx, SymbolFlags::ALIAS);
            }
            NodeData::ExportDeclaration(_) => {}
            NodeData::Block { .. } => {
                let scope = self.create_scope(idx, ScopeKind::Block);
                self.with_scope(scope, |binder| binder.bind_children(arena, idx));
            }
            NodeData::ForStatement { .. }
            | NodeData::ForInStatement { .. }
            | NodeData::ForOfStatement { .. } => {
                let scope = self.create_scope(idx, ScopeKind::Block);
                self.with_scope(scope, |binder| binder.bind_children(arena, idx));
            }
            NodeData::SwitchStatement {
                expression,
                clauses,
            } => {
                self.bind_node(arena, *expression);
                let scope = self.create_scope(idx, ScopeKind::Block);
                self.with_scope(scope, |binder| {
                    for clause in clauses {
                        binder.bind_node(arena, *clause);
                    }
                });
            }
            NodeData::CatchClause {
                variable_declaration,
                block,
            } => {
                let scope = self.create_scope(idx, ScopeKind::Block);
                self.with_scope(scope, |binder| {
                    if let Some(NodeData::VariableDeclaration(decl)) = arena.data(*variable_declaration) {
                        binder.declare_binding_name(
                            scope,
                            arena,
                            decl.name,
                            *variable_declaration,
                            SymbolFlags::BLOCK_SCOPED_VARIABLE,
                        );
                    }
                    binder.bind_node(arena, *block);
                });
            }
            _ => self.bind_children(arena, idx),
        }
    }

    /// Bind default values inside a destructuring pattern.
    fn bind_binding_initializers(&mut self, arena: &NodeArena, name: NodeIndex) {
        match arena.data(name) {
            Some(NodeData::ObjectBindingPattern { elements })
            | Some(NodeData::ArrayBindingPattern { elements }) => {
                for element in elements {
                    if let Some(NodeData::BindingElement {
                        property_name,
                        name,
                        initializer,
                        ..
                    }) = arena.data(*element)
                    {
                        if let Some(NodeData::ComputedPropertyName { expression }) = arena.data(*property_name) {
                            self.bind_node(arena, *expression);
                        }
                        self.bind_binding_initializers(arena, *name);
                        self.bind_node(arena, *initializer);
                    }
                }
            }
            _ => {}
        }
    }

    fn bind_function_like(&mut self, arena: &NodeArena, idx: NodeIndex, function: &FunctionData, declare_own_name: bool) {
        let scope = self.create_scope(idx, ScopeKind::Function);
        self.with_scope(scope, |binder| {
            if declare_own_name {
                binder.declare(scope, arena, function.name, idx, SymbolFlags::FUNCTION);
            }
            binder.declare_type_parameters(arena, &function.type_parameters);
            for parameter in &function.parameters {
                if let Some(NodeData::Parameter(param)) = arena.data(*parameter) {
                    for decorator in &param.decorators {
                        binder.bind_node(arena, *decorator);
                    }
                    binder.declare_binding_name(scope, arena, param.name, *parameter, SymbolFlags::PARAMETER);
                    binder.bind_binding_initializers(arena, param.name);
                    binder.bind_node(arena, param.initializer);
                }
            }
            if matches!(arena.data(function.body), Some(NodeData::Block { .. })) {
                binder.bind_block_in_current_scope(arena, function.body);
            } else {
                binder.bind_node(arena, function.body);
            }
        });
    }

    /// Bind a block's statements directly into the current scope (function
    /// bodies share the scope of their parameters).
    fn bind_block_in_current_scope(&mut self, arena: &NodeArena, block: NodeIndex) {
        self.node_scopes.insert(block, self.current_scope);
        for statement in arena.statements(block) {
            self.bind_node(arena, *statement);
        }
    }

    fn bind_type_parameter_scope(&mut self, arena: &NodeArena, idx: NodeIndex, type_parameters: &[NodeIndex]) {
        let scope = self.create_scope(idx, ScopeKind::TypeParameters);
        self.with_scope(scope, |binder| binder.declare_type_parameters(arena, type_parameters));
    }

    fn bind_module_declaration(&mut self, arena: &NodeArena, idx: NodeIndex, module: &tsz_parser::ModuleDeclData) {
        if module.is_global {
            let root = self.root_scope();
            self.node_scopes.insert(idx, root);
            let saved = (self.current_scope, self.function_scope);
            self.current_scope = root;
            self.function_scope = root;
            self.node_scopes.insert(module.body, root);
            for statement in arena.statements(module.body) {
                self.bind_node(arena, *statement);
            }
            (self.current_scope, self.function_scope) = saved;
            return;
        }
        match arena.data(module.name) {
            Some(NodeData::Literal { text, .. }) => {
                if !self.declared_modules.contains(text) {
                    self.declared_modules.push(text.clone());
                }
            }
            _ => self.declare(self.current_scope, arena, module.name, idx, SymbolFlags::NAMESPACE),
        }
        let scope = self.create_scope(idx, ScopeKind::Module);
        self.with_scope(scope, |binder| match arena.data(module.body) {
            Some(NodeData::ModuleBlock { statements }) => {
                binder.node_scopes.insert(module.body, scope);
                for statement in statements {
                    binder.bind_node(arena, *statement);
                }
            }
            Some(NodeData::ModuleDeclaration(_)) => binder.bind_node(arena, module.body),
            _ => {}
        });
    }

    // =========================================================================
    // Redeclarations
    // =========================================================================

    /// TS2451 on every declaration of a name declared more than once in one
    /// scope when at least one declaration is `let` or `const`.
    fn report_block_scoped_redeclarations(&mut self, arena: &NodeArena) {
        let mut reports = Vec::new();
        for scope in &self.scopes {
            for &id in scope.symbols.values() {
                let symbol = &self.symbols[id.0 as usize];
                if symbol.declarations.len() < 2
                    || !symbol.flags.contains(SymbolFlags::BLOCK_SCOPED_VARIABLE)
                    || !symbol
                        .declarations
                        .iter()
                        .all(|d| d.flags.intersects(SymbolFlags::VARIABLE))
                {
                    continue;
                }
                for declaration in &symbol.declarations {
                    reports.push((arena.span(declaration.name), symbol.name.clone()));
                }
            }
        }
        reports.sort_by_key(|(span, _)| span.start);
        for (span, name) in reports {
            self.diagnostics.push(Diagnostic::error(
                self.file_name.clone(),
                span.start,
                span.len(),
                format_message(
                    diagnostic_messages::CANNOT_REDECLARE_BLOCK_SCOPED_VARIABLE,
                    &[&name],
                ),
                diagnostic_codes::CANNOT_REDECLARE_BLOCK_SCOPED_VARIABLE,
            ));
        }
    }
}
