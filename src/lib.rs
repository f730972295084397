//! C ABI compilation boundary for the tsz TypeScript compiler.
//!
//! A host hands in TypeScript source and a file name and gets back exactly
//! one owned buffer: the emitted ES module, or a diagnostic. The C surface
//! lives in [`ffi`] (and [`legacy`] behind the `legacy-abi` feature); Rust
//! callers use [`compile`] and the owning [`OutputBuffer`] directly.
//!
//! ```
//! use tsz_capi::{CompileOptions, StatusCode, compile};
//!
//! let output = compile("let x: number = \"oops\";", "a.ts", &CompileOptions::default()).unwrap();
//! assert_eq!(output.status(), StatusCode::CompileError);
//! assert!(output.buffer().as_str().contains("TS2322"));
//! ```
//!
//! The compiler itself is reached only through [`CompilerCore`], so a
//! different core can be plugged in with [`compile_with`].

#[allow(unsafe_code)]
pub mod boundary;
pub mod compiler;
#[allow(unsafe_code)]
pub mod ffi;
#[cfg(feature = "legacy-abi")]
#[allow(unsafe_code)]
pub mod legacy;
pub mod options;
pub mod tracing_config;

pub use boundary::{BoundaryFault, CompileOutput, OutputBuffer, StatusCode, compile, compile_with};
pub use compiler::{CompilerCore, TszCompiler};
pub use options::{CompileFlags, CompileOptions};

#[cfg(test)]
#[path = "tests/boundary_tests.rs"]
mod boundary_tests;
#[cfg(test)]
#[path = "tests/ffi_tests.rs"]
mod ffi_tests;
#[cfg(test)]
#[path = "tests/options_tests.rs"]
mod options_tests;
#[cfg(all(test, feature = "legacy-abi"))]
#[path = "tests/legacy_tests.rs"]
mod legacy_tests;
