//! The C ABI. See `include/tsz_capi.h` for the C view of these items.
//!
//! Every call hands out exactly one buffer: the module on `TSZ_STATUS_OK`,
//! otherwise a diagnostic. The other slot is left as `{NULL, 0}`. Buffers
//! go back through `tsz_buffer_free`, which resets the slot so that a second
//! free of the same slot does nothing.

use std::ffi::c_char;
use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use crate::boundary::{BoundaryFault, CompileOutput, OutputBuffer, StatusCode, compile, decode_input};
use crate::options::CompileOptions;

/// Bumped on any incompatible change to the items in this module.
pub const TSZ_ABI_VERSION: u32 = 1;

pub const TSZ_STATUS_OK: u32 = StatusCode::Ok.as_u32();
pub const TSZ_STATUS_COMPILE_ERROR: u32 = StatusCode::CompileError.as_u32();
pub const TSZ_STATUS_INVALID_INPUT: u32 = StatusCode::InvalidInput.as_u32();
pub const TSZ_STATUS_INTERNAL_ERROR: u32 = StatusCode::InternalError.as_u32();

/// A byte buffer owned by the library until passed to `tsz_buffer_free`.
/// Not NUL-terminated; `len` is exact.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub struct TszBuffer {
    pub ptr: *mut u8,
    pub len: usize,
}

impl TszBuffer {
    pub const EMPTY: TszBuffer = TszBuffer {
        ptr: std::ptr::null_mut(),
        len: 0,
    };

    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }
}

impl From<OutputBuffer> for TszBuffer {
    fn from(buffer: OutputBuffer) -> Self {
        let (ptr, len) = buffer.into_raw();
        TszBuffer { ptr, len }
    }
}

/// Compile `source` as the file `filename`.
///
/// Returns one of the `TSZ_STATUS_*` codes. On `TSZ_STATUS_OK` the module
/// is written to `*module_out`, otherwise a diagnostic to
/// `*diagnostic_out`. Both slots are overwritten; pass slots that hold no
/// unreleased buffer.
///
/// # Safety
/// * `source` must point to `source_len` readable bytes, or be NULL with
///   `source_len == 0`. The same holds for `filename`.
/// * `module_out` and `diagnostic_out` must each be NULL or point to a
///   writable `TszBuffer`. When either is NULL nothing is written and
///   `TSZ_STATUS_INVALID_INPUT` is returned.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tsz_compile(
    source: *const u8,
    source_len: usize,
    filename: *const u8,
    filename_len: usize,
    flags: u32,
    module_out: *mut TszBuffer,
    diagnostic_out: *mut TszBuffer,
) -> u32 {
    if module_out.is_null() || diagnostic_out.is_null() {
        warn!("{}", BoundaryFault::NullOutput);
        return TSZ_STATUS_INVALID_INPUT;
    }
    // SAFETY: both slots are non-NULL and writable per the contract.
    unsafe {
        module_out.write(TszBuffer::EMPTY);
        diagnostic_out.write(TszBuffer::EMPTY);
    }

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        // SAFETY: pointer and length pairs are valid per the contract and
        // only borrowed for the duration of this call.
        let source = unsafe { decode_input(source, source_len, "source") }?;
        let file_name = unsafe { decode_input(filename, filename_len, "filename") }?;
        let options = CompileOptions::from_bits(flags)?;
        compile(source, file_name, &options)
    }));
    let result = result.unwrap_or_else(|_| Err(BoundaryFault::Panic("panic at the C boundary".to_string())));

    let (status, buffer, slot) = match result {
        Ok(CompileOutput::Module(module)) => (StatusCode::Ok, module, module_out),
        Ok(CompileOutput::Diagnostic(diagnostic)) => (StatusCode::CompileError, diagnostic, diagnostic_out),
        Err(fault) => {
            warn!(status = %fault.status(), "{fault}");
            (fault.status(), OutputBuffer::from(format!("error: {fault}")), diagnostic_out)
        }
    };
    // SAFETY: checked non-NULL above.
    unsafe { slot.write(TszBuffer::from(buffer)) };
    status.as_u32()
}

/// Release a buffer returned by `tsz_compile` and reset the slot to
/// `{NULL, 0}`. A NULL slot or an already empty slot is a no-op.
///
/// # Safety
/// `buffer` must be NULL or point to a `TszBuffer` that is either
/// `{NULL, 0}` or was filled by `tsz_compile` and not modified since.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tsz_buffer_free(buffer: *mut TszBuffer) {
    if buffer.is_null() {
        return;
    }
    // SAFETY: non-NULL and valid per the contract.
    let taken = unsafe { buffer.replace(TszBuffer::EMPTY) };
    if taken.is_null() {
        return;
    }
    // SAFETY: the slot held a buffer from `tsz_compile`, and the slot has
    // just been emptied so it cannot be reclaimed again.
    unsafe { OutputBuffer::from_raw(taken.ptr, taken.len) }.release();
}

/// Static name of a status code (`"ok"`, `"compile_error"`, ...), or
/// `"unknown"`. Never freed.
#[unsafe(no_mangle)]
pub extern "C" fn tsz_status_name(status: u32) -> *const c_char {
    StatusCode::from_u32(status)
        .map_or(c"unknown", StatusCode::c_name)
        .as_ptr()
}

#[unsafe(no_mangle)]
pub extern "C" fn tsz_abi_version() -> u32 {
    TSZ_ABI_VERSION
}

/// Install the stderr tracing subscriber when `TSZ_LOG` or `RUST_LOG` is
/// set. Returns whether a subscriber was installed by this call.
#[unsafe(no_mangle)]
pub extern "C" fn tsz_init_logging() -> bool {
    crate::tracing_config::init_tracing()
}
