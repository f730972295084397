//! TypeScript parser for the tsz compiler.
//!
//! ```
//! use tsz_parser::{NodeData, ParserState};
//!
//! let mut parser = ParserState::new("a.ts".to_string(), "let x: number = 1;");
//! let root = parser.parse_source_file();
//! assert!(parser.get_diagnostics().is_empty());
//! let arena = parser.get_arena();
//! assert!(matches!(arena.data(root), Some(NodeData::SourceFile { .. })));
//! ```

pub mod parser;

pub use parser::{
    ClassData, ExportDeclData, FunctionData, ImportDeclData, ModifierFlags, ModuleDeclData, Node,
    NodeArena, NodeData, NodeIndex, NodeList, ParameterData, ParseDiagnostic, ParserState,
    PropertyDeclarationData, SignatureData, VariableDeclarationData, VariableKind,
};
