//! The safe Rust side of the compilation boundary.
//!
//! A compilation yields exactly one [`OutputBuffer`], wrapped in a
//! [`CompileOutput`] saying whether it holds a module or a diagnostic.
//! Faults of the boundary itself (bad input, a panicking core) are a
//! separate [`BoundaryFault`], so they can never be mistaken for either.

use std::any::Any;
use std::ffi::CStr;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use std::str::Utf8Error;

use thiserror::Error;
use tracing::{debug, info_span, warn};

use crate::compiler::{CompilerCore, TszCompiler};
use crate::options::CompileOptions;

// =============================================================================
// Status
// =============================================================================

/// The discriminator returned by `tsz_compile`.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// The module buffer holds the emitted module.
    Ok = 0,
    /// The diagnostic buffer holds compiler diagnostics.
    CompileError = 1,
    /// The call itself was malformed; the diagnostic buffer says how.
    InvalidInput = 2,
    /// The compiler panicked; the diagnostic buffer holds the panic message.
    InternalError = 3,
}

impl StatusCode {
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(StatusCode::Ok),
            1 => Some(StatusCode::CompileError),
            2 => Some(StatusCode::InvalidInput),
            3 => Some(StatusCode::InternalError),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            StatusCode::Ok => "ok",
            StatusCode::CompileError => "compile_error",
            StatusCode::InvalidInput => "invalid_input",
            StatusCode::InternalError => "internal_error",
        }
    }

    /// NUL-terminated [`name`](Self::name) for `tsz_status_name`.
    pub const fn c_name(self) -> &'static CStr {
        match self {
            StatusCode::Ok => c"ok",
            StatusCode::CompileError => c"compile_error",
            StatusCode::InvalidInput => c"invalid_input",
            StatusCode::InternalError => c"internal_error",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Faults
// =============================================================================

#[derive(Debug, Error)]
pub enum BoundaryFault {
    #[error("{what} pointer is NULL but its length is {len}")]
    NullInput { what: &'static str, len: usize },

    #[error("{what} pointer is NULL")]
    NullString { what: &'static str },

    #[error("{what} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        what: &'static str,
        #[source]
        source: Utf8Error,
    },

    #[error("output buffer pointers must not be NULL")]
    NullOutput,

    #[error("unknown compile flags: {0:#x}")]
    UnknownFlags(u32),

    #[error("internal compiler error: {0}")]
    Panic(String),
}

impl BoundaryFault {
    pub fn status(&self) -> StatusCode {
        match self {
            BoundaryFault::Panic(_) => StatusCode::InternalError,
            _ => StatusCode::InvalidInput,
        }
    }
}

/// Borrow `len` bytes at `ptr` as UTF-8. `NULL` with length 0 is the empty
/// string.
///
/// # Safety
/// When `ptr` is non-NULL it must point to `len` readable bytes that stay
/// alive and unmodified for `'a`.
pub(crate) unsafe fn decode_input<'a>(
    ptr: *const u8,
    len: usize,
    what: &'static str,
) -> Result<&'a str, BoundaryFault> {
    if ptr.is_null() {
        return if len == 0 {
            Ok("")
        } else {
            Err(BoundaryFault::NullInput { what, len })
        };
    }
    // SAFETY: non-NULL, and the caller guarantees `len` readable bytes.
    let bytes = unsafe { std::slice::from_raw_parts(ptr, len) };
    std::str::from_utf8(bytes).map_err(|source| BoundaryFault::InvalidUtf8 { what, source })
}

// =============================================================================
// Output buffers
// =============================================================================

/// Text produced by a compilation, owned by whoever holds the handle.
///
/// Releasing consumes the handle, so a buffer cannot be released twice or
/// read after release:
///
/// ```compile_fail
/// let output = tsz_capi::compile("let x = 1;", "a.ts", &Default::default()).unwrap();
/// let buffer = output.into_buffer();
/// buffer.release();
/// buffer.release();
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct OutputBuffer {
    text: Box<str>,
}

impl OutputBuffer {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_string(self) -> String {
        self.text.into_string()
    }

    /// Give the memory back.
    pub fn release(self) {
        drop(self);
    }

    /// Hand the bytes to C. An empty buffer is `(NULL, 0)`.
    pub(crate) fn into_raw(self) -> (*mut u8, usize) {
        let len = self.text.len();
        if len == 0 {
            return (ptr::null_mut(), 0);
        }
        (Box::into_raw(self.text).cast::<u8>(), len)
    }

    /// Take back bytes handed out by [`into_raw`](Self::into_raw).
    ///
    /// # Safety
    /// `(ptr, len)` must come from `into_raw` and not have been reclaimed.
    pub(crate) unsafe fn from_raw(ptr: *mut u8, len: usize) -> Self {
        if ptr.is_null() {
            return OutputBuffer::from(String::new());
        }
        let slice = ptr::slice_from_raw_parts_mut(ptr, len) as *mut str;
        // SAFETY: the pointer and length describe a `Box<str>` leaked by
        // `into_raw`, reclaimed exactly once.
        let text = unsafe { Box::from_raw(slice) };
        OutputBuffer { text }
    }
}

impl From<String> for OutputBuffer {
    fn from(text: String) -> Self {
        OutputBuffer {
            text: text.into_boxed_str(),
        }
    }
}

impl fmt::Debug for OutputBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputBuffer").field("len", &self.len()).finish()
    }
}

impl fmt::Display for OutputBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// The result of a compilation that reached the compiler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompileOutput {
    Module(OutputBuffer),
    Diagnostic(OutputBuffer),
}

impl CompileOutput {
    pub fn status(&self) -> StatusCode {
        match self {
            CompileOutput::Module(_) => StatusCode::Ok,
            CompileOutput::Diagnostic(_) => StatusCode::CompileError,
        }
    }

    pub fn is_module(&self) -> bool {
        matches!(self, CompileOutput::Module(_))
    }

    pub fn buffer(&self) -> &OutputBuffer {
        match self {
            CompileOutput::Module(buffer) | CompileOutput::Diagnostic(buffer) => buffer,
        }
    }

    pub fn into_buffer(self) -> OutputBuffer {
        match self {
            CompileOutput::Module(buffer) | CompileOutput::Diagnostic(buffer) => buffer,
        }
    }

    /// `Ok(module)` or `Err(diagnostic)`.
    pub fn into_result(self) -> Result<OutputBuffer, OutputBuffer> {
        match self {
            CompileOutput::Module(buffer) => Ok(buffer),
            CompileOutput::Diagnostic(buffer) => Err(buffer),
        }
    }
}

// =============================================================================
// Entry points
// =============================================================================

/// Compile one file with the tsz compiler.
///
/// ```
/// use tsz_capi::{CompileOptions, compile};
///
/// let output = compile("let x: number = 1;", "a.ts", &CompileOptions::default()).unwrap();
/// assert_eq!(output.into_result().unwrap().as_str(), "let x = 1;\n");
/// ```
pub fn compile(
    source: &str,
    file_name: &str,
    options: &CompileOptions,
) -> Result<CompileOutput, BoundaryFault> {
    compile_with(&TszCompiler::new(options.clone()), source, file_name)
}

/// Compile one file with any compiler core. A panic inside the core is
/// caught and reported as [`BoundaryFault::Panic`].
pub fn compile_with(
    core: &dyn CompilerCore,
    source: &str,
    file_name: &str,
) -> Result<CompileOutput, BoundaryFault> {
    let _span = info_span!("compile", file = file_name, bytes = source.len()).entered();
    let result = panic::catch_unwind(AssertUnwindSafe(|| core.compile(source, file_name)));
    let output = match result {
        Ok(Ok(module)) => CompileOutput::Module(module.into()),
        Ok(Err(diagnostic)) => CompileOutput::Diagnostic(diagnostic.into()),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(%message, "compiler panicked");
            return Err(BoundaryFault::Panic(message));
        }
    };
    debug!(status = %output.status(), bytes = output.buffer().len(), "compiled");
    Ok(output)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
