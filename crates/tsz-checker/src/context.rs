//! Checker options and per-file mutable state.

use rustc_hash::{FxHashMap, FxHashSet};
use tsz_common::Diagnostic;
use tsz_parser::{NodeArena, NodeIndex};

use crate::binder::{BinderState, ScopeId, SymbolId};
use crate::types::Type;

/// Options that change what the checker reports.
#[derive(Clone, Debug, Default)]
pub struct CheckerOptions {
    /// `--strict`: `null` and `undefined` are distinct types.
    pub strict_null_checks: bool,
    /// Module specifiers the host resolves outside this file. Entries may use
    /// one `*` wildcard.
    pub known_modules: Vec<String>,
}

/// Shared state threaded through every checker method.
pub struct CheckerContext<'a> {
    pub arena: &'a NodeArena,
    pub binder: &'a BinderState,
    pub file_name: String,
    pub options: CheckerOptions,
    pub diagnostics: Vec<Diagnostic>,
    /// `(start, code)` pairs already reported.
    pub(crate) reported: FxHashSet<(u32, u32)>,
    /// Value types of symbols, filled lazily.
    pub(crate) symbol_types: FxHashMap<SymbolId, Type>,
    /// Declared types of interfaces, aliases and enums.
    pub(crate) declared_types: FxHashMap<SymbolId, Type>,
    /// Symbols whose type is being computed; re-entry yields `any`.
    pub(crate) resolving: FxHashSet<SymbolId>,
    /// Same for declared types, so `const Foo: Foo` still resolves.
    pub(crate) resolving_types: FxHashSet<SymbolId>,
    pub(crate) current_scope: ScopeId,
    /// Declared return type of each enclosing function, innermost last.
    pub(crate) return_types: Vec<Option<Type>>,
    /// Names bound by function-type generics, mapped types and `infer`,
    /// which the binder does not declare.
    pub(crate) type_parameter_names: Vec<String>,
    /// Member names of the enum whose initializers are being checked.
    pub(crate) enum_member_names: Vec<String>,
}

impl<'a> CheckerContext<'a> {
    pub fn new(
        arena: &'a NodeArena,
        binder: &'a BinderState,
        file_name: impl Into<String>,
        options: CheckerOptions,
    ) -> CheckerContext<'a> {
        CheckerContext {
            arena,
            binder,
            file_name: file_name.into(),
            options,
            diagnostics: Vec::new(),
            reported: FxHashSet::default(),
            symbol_types: FxHashMap::default(),
            declared_types: FxHashMap::default(),
            resolving: FxHashSet::default(),
            resolving_types: FxHashSet::default(),
            current_scope: binder.root_scope(),
            return_types: Vec::new(),
            type_parameter_names: Vec::new(),
            enum_member_names: Vec::new(),
        }
    }

    pub fn strict(&self) -> bool {
        self.options.strict_null_checks
    }

    /// Record a diagnostic unless one with the same code already starts at
    /// the same position.
    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        if self.reported.insert((diagnostic.start, diagnostic.code)) {
            self.diagnostics.push(diagnostic);
        }
    }

    pub fn is_type_parameter_name(&self, name: &str) -> bool {
        self.type_parameter_names.iter().any(|n| n == name)
    }

    pub fn node_text(&self, idx: NodeIndex) -> Option<&'a str> {
        self.arena.identifier_text(idx)
    }
}
