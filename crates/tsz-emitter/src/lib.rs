//! JavaScript emitter for the tsz compiler.
//!
//! Prints a parsed TypeScript file as an ES module with all type syntax
//! erased. Runtime-only TypeScript constructs are lowered:
//! - enums and instantiated namespaces become IIFEs (`transforms`)
//! - parameter properties become constructor assignments
//! - imports used only as types are dropped, and `export {};` keeps a file
//!   that lost all its module syntax a module
//!
//! ```
//! use tsz_emitter::{PrintOptions, print_source_file};
//! use tsz_parser::ParserState;
//!
//! let source = "let x: number = 1;";
//! let mut parser = ParserState::new("a.ts".to_string(), source);
//! let root = parser.parse_source_file();
//! let output = print_source_file(parser.get_arena(), root, source, "a.ts", PrintOptions::default());
//! assert_eq!(output.code, "let x = 1;\n");
//! ```

pub mod emitter;
pub mod printer;
pub mod source_writer;
pub mod transforms;

pub use emitter::Printer;
pub use printer::{PrintOptions, PrintOutput, output_file_name, print_source_file};
