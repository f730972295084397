use std::ffi::{CStr, c_char};

use super::legacy::*;

fn legacy_compile(input: &CStr, filename: &CStr) -> (bool, String) {
    let mut out: *mut c_char = std::ptr::null_mut();
    let ok = unsafe { ts_compile(input.as_ptr(), filename.as_ptr(), &mut out) };
    assert!(!out.is_null(), "ts_compile always writes a string");
    let text = unsafe { CStr::from_ptr(out) }.to_string_lossy().into_owned();
    unsafe { ts_compile_free(out) };
    (ok, text)
}

#[test]
fn test_legacy_success() {
    let (ok, text) = legacy_compile(c"let x: number = 1;", c"a.ts");
    assert!(ok);
    assert_eq!(text, "let x = 1;\n");
}

#[test]
fn test_legacy_failure_returns_diagnostic() {
    let (ok, text) = legacy_compile(c"let x: number = \"oops\";", c"a.ts");
    assert!(!ok);
    assert!(text.contains("Type 'string' is not assignable to type 'number'."));
}

#[test]
fn test_legacy_empty_input() {
    let (ok, text) = legacy_compile(c"", c"a.ts");
    assert!(ok);
    assert_eq!(text, "");
}

#[test]
fn test_legacy_null_pointers() {
    let mut out: *mut c_char = std::ptr::null_mut();
    let ok = unsafe { ts_compile(std::ptr::null(), c"a.ts".as_ptr(), &mut out) };
    assert!(!ok);
    assert_eq!(
        unsafe { CStr::from_ptr(out) }.to_str().unwrap(),
        "error: source pointer is NULL"
    );
    unsafe { ts_compile_free(out) };

    assert!(!unsafe { ts_compile(c"let x = 1;".as_ptr(), c"a.ts".as_ptr(), std::ptr::null_mut()) });
    unsafe { ts_compile_free(std::ptr::null()) };
}

#[test]
fn test_module_with_embedded_nul_fails_through_ts_compile() {
    let core = |_: &str, _: &str| -> Result<String, String> { Ok("let s = \"a\0b\";\n".to_string()) };
    let mut out: *mut c_char = std::ptr::null_mut();
    let ok = unsafe { ts_compile_with(&core, c"let s = 1;".as_ptr(), c"a.ts".as_ptr(), &mut out) };
    assert!(!ok);
    assert!(!out.is_null());
    let text = unsafe { CStr::from_ptr(out) }.to_str().unwrap().to_string();
    unsafe { ts_compile_free(out) };
    assert_eq!(
        text,
        "error: output contains a NUL byte and cannot be returned as a C string"
    );
}

#[test]
fn test_legacy_panicking_core_reports_internal_error() {
    let core = |_: &str, _: &str| -> Result<String, String> { panic!("emitter exploded") };
    let mut out: *mut c_char = std::ptr::null_mut();
    let ok = unsafe { ts_compile_with(&core, c"let s = 1;".as_ptr(), c"a.ts".as_ptr(), &mut out) };
    assert!(!ok);
    let text = unsafe { CStr::from_ptr(out) }.to_str().unwrap().to_string();
    unsafe { ts_compile_free(out) };
    assert_eq!(text, "error: internal compiler error: emitter exploded");
}

#[test]
fn test_legacy_invalid_utf8_is_rejected() {
    let (ok, text) = legacy_compile(c"let s = \"\xff\";", c"a.ts");
    assert!(!ok);
    assert!(text.starts_with("error: source is not valid UTF-8"), "{text}");
}

#[test]
fn test_embedded_nul_in_output_is_a_failure() {
    let (ok, text) = encode_output(true, b"let s = \"a\0b\";".to_vec());
    assert!(!ok);
    assert!(text.to_str().unwrap().contains("NUL byte"));

    let (ok, text) = encode_output(true, b"let s = 1;\n".to_vec());
    assert!(ok);
    assert_eq!(text.to_str().unwrap(), "let s = 1;\n");
}
