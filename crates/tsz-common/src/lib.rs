//! Common types and utilities for the tsz TypeScript compiler.
//!
//! This crate provides foundational types used across all tsz crates:
//! - Source spans (`Span`)
//! - Position/line-map types for line/column locations
//! - Diagnostics (`Diagnostic`, codes, message templates, rendering)
//! - Source map generation
//! - Compiler limits

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Position/LineMap types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

// Diagnostics - codes, messages and tsc-style rendering
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, format_message};

// Source Map generation
pub mod source_map;

// Centralized limits and thresholds
pub mod limits;
