//! Centralized limits and thresholds for the compiler pipeline.
//!
//! Every phase walks the AST recursively, so the parser bounds nesting once
//! and the later phases inherit that bound.

/// Maximum depth for parser recursion.
///
/// The parser tracks its recursion depth and emits a `NESTING_TOO_DEEP`
/// diagnostic when this limit is exceeded, so that adversarial input such as
/// `((((((((...))))))))` fails with a diagnostic instead of recursing without
/// bound.
///
/// ```typescript
/// const x = ((((((((((((((((((((((((((((((1)))))))))))))))))))))))))))))));
/// type T = Promise<Promise<Promise<Promise<Promise</* ... */>>>>>;
/// ```
pub const MAX_PARSER_RECURSION_DEPTH: u32 = 256;

/// Remaining stack below which a recursive walk switches to a fresh segment.
///
/// Host threads can be small (128 KiB is common for C runtimes), so every
/// recursive phase runs through `stacker::maybe_grow` with these values.
pub const STACK_RED_ZONE: usize = 64 * 1024;

/// Size of each stack segment allocated by `stacker::maybe_grow`.
pub const STACK_GROWTH: usize = 2 * 1024 * 1024;

/// Maximum number of diagnostics rendered into a single failure message.
///
/// Anything past this is summarized as a trailing count line.
pub const MAX_REPORTED_DIAGNOSTICS: usize = 100;

/// Maximum number of union members kept when inferring a type; wider unions
/// collapse to `any`.
pub const MAX_UNION_MEMBERS: usize = 32;
