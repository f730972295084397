//! The pre-1.0 string API, kept as a shim over [`compile_with`]:
//!
//! ```c
//! bool ts_compile(const char *input, const char *filename, char **module_or_error);
//! void ts_compile_free(const char *module_or_error);
//! ```
//!
//! Output is NUL-terminated, so a module or diagnostic containing a NUL
//! byte cannot be returned; that case is reported as a failure.

use std::ffi::{CStr, CString, c_char};

use crate::boundary::{BoundaryFault, compile_with};
use crate::compiler::{CompilerCore, TszCompiler};
use crate::options::CompileOptions;

/// Compile `input` as `filename`. Returns `true` with the module in
/// `*module_or_error`, or `false` with a diagnostic there. The string must
/// be released with `ts_compile_free`.
///
/// # Safety
/// `input` and `filename` must be NULL or NUL-terminated strings.
/// `module_or_error` must be NULL or point to a writable `char *`; when it
/// is NULL nothing is compiled and `false` is returned.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ts_compile(
    input: *const c_char,
    filename: *const c_char,
    module_or_error: *mut *mut c_char,
) -> bool {
    let core = TszCompiler::new(CompileOptions::default());
    // SAFETY: forwarded unchanged from the caller.
    unsafe { ts_compile_with(&core, input, filename, module_or_error) }
}

/// `ts_compile` over any compiler core.
///
/// # Safety
/// Same contract as [`ts_compile`].
pub(crate) unsafe fn ts_compile_with(
    core: &dyn CompilerCore,
    input: *const c_char,
    filename: *const c_char,
    module_or_error: *mut *mut c_char,
) -> bool {
    if module_or_error.is_null() {
        return false;
    }
    let (ok, text) = if input.is_null() {
        (false, c"error: source pointer is NULL".to_owned())
    } else if filename.is_null() {
        (false, c"error: filename pointer is NULL".to_owned())
    } else {
        // SAFETY: both non-NULL and NUL-terminated per the contract.
        let (input, filename) = unsafe { (CStr::from_ptr(input), CStr::from_ptr(filename)) };
        compile_c_strings(core, input, filename)
    };
    // SAFETY: checked non-NULL above.
    unsafe { module_or_error.write(text.into_raw()) };
    ok
}

/// Release a string returned through `ts_compile`. NULL is a no-op.
///
/// # Safety
/// `module_or_error` must be NULL or a pointer written by `ts_compile` that
/// has not been freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ts_compile_free(module_or_error: *const c_char) {
    if module_or_error.is_null() {
        return;
    }
    // SAFETY: produced by `CString::into_raw` in `ts_compile`.
    drop(unsafe { CString::from_raw(module_or_error.cast_mut()) });
}

fn compile_c_strings(core: &dyn CompilerCore, input: &CStr, filename: &CStr) -> (bool, CString) {
    let result = decode(input, "source").and_then(|source| {
        let file_name = decode(filename, "filename")?;
        compile_with(core, source, file_name)
    });
    match result {
        Ok(output) => {
            let ok = output.is_module();
            encode_output(ok, output.into_buffer().into_string().into_bytes())
        }
        Err(fault) => encode_output(false, format!("error: {fault}").into_bytes()),
    }
}

fn decode<'a>(text: &'a CStr, what: &'static str) -> Result<&'a str, BoundaryFault> {
    text.to_str()
        .map_err(|source| BoundaryFault::InvalidUtf8 { what, source })
}

/// NUL-terminate the output. Text with an interior NUL becomes a failure.
pub(crate) fn encode_output(ok: bool, bytes: Vec<u8>) -> (bool, CString) {
    match CString::new(bytes) {
        Ok(text) => (ok, text),
        Err(_) => (
            false,
            c"error: output contains a NUL byte and cannot be returned as a C string".to_owned(),
        ),
    }
}
