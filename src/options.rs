//! Compile options shared by the C ABI, the safe API and the driver binary.

use bitflags::bitflags;
use tsz_checker::CheckerOptions;
use tsz_emitter::PrintOptions;

use crate::boundary::BoundaryFault;

bitflags! {
    /// The `flags` word of `tsz_compile`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CompileFlags: u32 {
        /// Skip type checking. Syntax errors still fail the compilation.
        const TRANSPILE_ONLY = 1 << 0;
        /// Append a base64 `sourceMappingURL` comment with the source inlined.
        const INLINE_SOURCE_MAP = 1 << 1;
        /// Strict null checks.
        const STRICT = 1 << 2;
        /// Treat the input as a declaration file: check it, emit nothing.
        const DECLARATION = 1 << 3;
        /// Parse JSX and lower it to `React.createElement` calls. Implied
        /// by a `.tsx` file name.
        const TSX = 1 << 4;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub flags: CompileFlags,
    /// Module specifiers the host declares resolvable. Imports of anything
    /// else (and not declared with `declare module`) fail with TS2307.
    /// Entries may contain one `*` wildcard.
    pub known_modules: Vec<String>,
}

impl CompileOptions {
    pub fn new(flags: CompileFlags) -> Self {
        CompileOptions {
            flags,
            known_modules: Vec::new(),
        }
    }

    /// Options from a raw flags word. Unknown bits are rejected so that a
    /// host built against a newer header fails loudly instead of silently
    /// losing an option.
    pub fn from_bits(bits: u32) -> Result<Self, BoundaryFault> {
        CompileFlags::from_bits(bits)
            .map(Self::new)
            .ok_or(BoundaryFault::UnknownFlags(bits & !CompileFlags::all().bits()))
    }

    #[must_use]
    pub fn with_known_module(mut self, specifier: impl Into<String>) -> Self {
        self.known_modules.push(specifier.into());
        self
    }

    pub fn transpile_only(&self) -> bool {
        self.flags.contains(CompileFlags::TRANSPILE_ONLY)
    }

    /// Whether `file_name` is compiled as a declaration file.
    pub fn is_declaration(&self, file_name: &str) -> bool {
        self.flags.contains(CompileFlags::DECLARATION)
            || file_name.ends_with(".d.ts")
            || file_name.ends_with(".d.mts")
            || file_name.ends_with(".d.cts")
    }

    /// Whether `file_name` is parsed with JSX syntax.
    pub fn is_tsx(&self, file_name: &str) -> bool {
        self.flags.contains(CompileFlags::TSX) || file_name.ends_with(".tsx")
    }

    pub fn checker_options(&self) -> CheckerOptions {
        CheckerOptions {
            strict_null_checks: self.flags.contains(CompileFlags::STRICT),
            known_modules: self.known_modules.clone(),
        }
    }

    pub fn print_options(&self) -> PrintOptions {
        PrintOptions {
            inline_source_map: self.flags.contains(CompileFlags::INLINE_SOURCE_MAP),
        }
    }
}
