//! Recursive-descent TypeScript parser producing an arena-allocated AST.

pub mod node;
mod node_access;
pub mod node_arena;
pub mod state;
mod state_expressions;
mod state_statements;
mod state_types;

pub use node::*;
pub use node_arena::NodeArena;
pub use state::{ParseDiagnostic, ParserState};
