use super::ffi::*;

struct Call {
    status: u32,
    module: TszBuffer,
    diagnostic: TszBuffer,
}

impl Call {
    fn module_text(&self) -> &str {
        text(&self.module)
    }

    fn diagnostic_text(&self) -> &str {
        text(&self.diagnostic)
    }
}

impl Drop for Call {
    fn drop(&mut self) {
        unsafe {
            tsz_buffer_free(&mut self.module);
            tsz_buffer_free(&mut self.diagnostic);
        }
    }
}

fn text(buffer: &TszBuffer) -> &str {
    if buffer.ptr.is_null() {
        return "";
    }
    let bytes = unsafe { std::slice::from_raw_parts(buffer.ptr, buffer.len) };
    std::str::from_utf8(bytes).expect("buffers hold UTF-8")
}

fn call_raw(source: *const u8, source_len: usize, filename: &str, flags: u32) -> Call {
    let mut call = Call {
        status: u32::MAX,
        module: TszBuffer::EMPTY,
        diagnostic: TszBuffer::EMPTY,
    };
    call.status = unsafe {
        tsz_compile(
            source,
            source_len,
            filename.as_ptr(),
            filename.len(),
            flags,
            &mut call.module,
            &mut call.diagnostic,
        )
    };
    call
}

fn call(source: &str, flags: u32) -> Call {
    call_raw(source.as_ptr(), source.len(), "a.ts", flags)
}

#[test]
fn test_ok_populates_only_the_module() {
    let result = call("let x: number = 1;", 0);
    assert_eq!(result.status, TSZ_STATUS_OK);
    assert_eq!(result.module_text(), "let x = 1;\n");
    assert_eq!(result.module.len, "let x = 1;\n".len());
    assert_eq!(result.diagnostic, TszBuffer::EMPTY);
}

#[test]
fn test_compile_error_populates_only_the_diagnostic() {
    let result = call("let x: number = \"oops\";", 0);
    assert_eq!(result.status, TSZ_STATUS_COMPILE_ERROR);
    assert_eq!(result.module, TszBuffer::EMPTY);
    assert!(result.diagnostic_text().contains("TS2322"));
}

#[test]
fn test_source_is_not_read_past_its_length() {
    // Only the first statement is inside the given length
    let source = "let a = 1;let b: number = \"x\";";
    let result = call_raw(source.as_ptr(), 10, "a.ts", 0);
    assert_eq!(result.status, TSZ_STATUS_OK);
    assert_eq!(result.module_text(), "let a = 1;\n");
}

#[test]
fn test_embedded_nul_survives_the_round_trip() {
    let source = "let s = \"a\0b\";";
    let result = call(source, 0);
    assert_eq!(result.status, TSZ_STATUS_OK);
    let expected = "let s = \"a\0b\";\n";
    assert_eq!(result.module.len, expected.len());
    assert_eq!(result.module_text(), expected);
    assert_eq!(result.module_text().bytes().filter(|b| *b == 0).count(), 1);
    assert_eq!(result.diagnostic, TszBuffer::EMPTY);
}

#[test]
fn test_null_source_with_zero_length_is_empty_input() {
    let result = call_raw(std::ptr::null(), 0, "a.ts", 0);
    assert_eq!(result.status, TSZ_STATUS_OK);
    assert_eq!(result.module, TszBuffer::EMPTY);
    assert_eq!(result.diagnostic, TszBuffer::EMPTY);
}

#[test]
fn test_null_source_with_length_is_invalid_input() {
    let result = call_raw(std::ptr::null(), 5, "a.ts", 0);
    assert_eq!(result.status, TSZ_STATUS_INVALID_INPUT);
    assert_eq!(result.module, TszBuffer::EMPTY);
    assert_eq!(
        result.diagnostic_text(),
        "error: source pointer is NULL but its length is 5"
    );
}

#[test]
fn test_invalid_utf8_is_invalid_input() {
    let bytes = [b'l', b'e', b't', 0xc3, 0x28];
    let result = call_raw(bytes.as_ptr(), bytes.len(), "a.ts", 0);
    assert_eq!(result.status, TSZ_STATUS_INVALID_INPUT);
    assert!(result.diagnostic_text().contains("source is not valid UTF-8"));
}

#[test]
fn test_unknown_flags_are_invalid_input() {
    let result = call("let x = 1;", 1 << 20);
    assert_eq!(result.status, TSZ_STATUS_INVALID_INPUT);
    assert_eq!(result.diagnostic_text(), "error: unknown compile flags: 0x100000");
}

#[test]
fn test_null_out_parameters_return_status_only() {
    let source = "let x = 1;";
    let mut module = TszBuffer::EMPTY;
    let status = unsafe {
        tsz_compile(
            source.as_ptr(),
            source.len(),
            std::ptr::null(),
            0,
            0,
            &mut module,
            std::ptr::null_mut(),
        )
    };
    assert_eq!(status, TSZ_STATUS_INVALID_INPUT);
    assert_eq!(module, TszBuffer::EMPTY);
}

#[test]
fn test_flags_reach_the_compiler() {
    let result = call("let x: number = \"oops\";", 1);
    assert_eq!(result.status, TSZ_STATUS_OK, "TRANSPILE_ONLY skips checking");
    assert_eq!(result.module_text(), "let x = \"oops\";\n");

    let result = call("let y = 1;", 2);
    assert!(
        result
            .module_text()
            .contains("//# sourceMappingURL=data:application/json;base64,")
    );
}

#[test]
fn test_free_resets_the_slot_and_is_idempotent() {
    let mut result = call("let x = 1;", 0);
    assert!(!result.module.is_null());
    unsafe { tsz_buffer_free(&mut result.module) };
    assert_eq!(result.module, TszBuffer::EMPTY);
    unsafe { tsz_buffer_free(&mut result.module) };
    assert_eq!(result.module, TszBuffer::EMPTY);
    unsafe { tsz_buffer_free(std::ptr::null_mut()) };
}

#[test]
fn test_status_name_and_version() {
    let name = |status| unsafe { std::ffi::CStr::from_ptr(tsz_status_name(status)) };
    assert_eq!(name(TSZ_STATUS_OK).to_str().unwrap(), "ok");
    assert_eq!(name(TSZ_STATUS_COMPILE_ERROR).to_str().unwrap(), "compile_error");
    assert_eq!(name(TSZ_STATUS_INVALID_INPUT).to_str().unwrap(), "invalid_input");
    assert_eq!(name(TSZ_STATUS_INTERNAL_ERROR).to_str().unwrap(), "internal_error");
    assert_eq!(name(42).to_str().unwrap(), "unknown");
    assert_eq!(tsz_abi_version(), TSZ_ABI_VERSION);
}
