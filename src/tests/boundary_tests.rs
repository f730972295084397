use super::*;

fn compile_default(source: &str) -> CompileOutput {
    compile(source, "a.ts", &CompileOptions::default()).expect("no boundary fault")
}

#[test]
fn test_valid_source_compiles_to_module() {
    let output = compile_default("let x: number = 1;");
    assert_eq!(output.status(), StatusCode::Ok);
    assert_eq!(output.buffer().as_str(), "let x = 1;\n");
}

#[test]
fn test_type_error_is_a_diagnostic() {
    let output = compile_default("let x: number = \"oops\";");
    assert_eq!(output.status(), StatusCode::CompileError);
    let diagnostic = output.into_result().expect_err("diagnostic expected");
    assert!(
        diagnostic
            .as_str()
            .contains("Type 'string' is not assignable to type 'number'."),
        "Unexpected diagnostic: {diagnostic}"
    );
    assert!(diagnostic.as_str().starts_with("a.ts(1,5): error TS2322:"));
}

#[test]
fn test_syntax_error_is_a_diagnostic() {
    let output = compile_default("let = ;");
    assert_eq!(output.status(), StatusCode::CompileError);
    assert!(!output.buffer().is_empty());
}

#[test]
fn test_empty_source_is_an_empty_module() {
    let output = compile_default("");
    assert_eq!(output.status(), StatusCode::Ok);
    assert!(output.buffer().is_empty());
}

#[test]
fn test_identical_inputs_give_identical_outputs() {
    for source in ["let x: number = 1;", "let x: number = \"oops\";", ""] {
        assert_eq!(compile_default(source), compile_default(source));
    }
}

#[test]
fn test_custom_core_results_pass_through() {
    let core = |source: &str, file_name: &str| -> Result<String, String> {
        if source.is_empty() {
            Err(format!("{file_name}: empty"))
        } else {
            Ok(source.to_uppercase())
        }
    };
    let module = compile_with(&core, "abc", "x.ts").expect("no fault");
    assert_eq!(module, CompileOutput::Module(OutputBuffer::from("ABC".to_string())));
    let diagnostic = compile_with(&core, "", "x.ts").expect("no fault");
    assert_eq!(diagnostic.into_result().unwrap_err().as_str(), "x.ts: empty");
}

#[test]
fn test_panicking_core_is_an_internal_error() {
    let core = |_: &str, _: &str| -> Result<String, String> { panic!("checker exploded") };
    let fault = compile_with(&core, "let x = 1;", "a.ts").expect_err("panic should be caught");
    assert_eq!(fault.status(), StatusCode::InternalError);
    assert_eq!(fault.to_string(), "internal compiler error: checker exploded");
}

#[test]
fn test_output_buffer_raw_round_trip() {
    let buffer = OutputBuffer::from("export {};\n".to_string());
    let (ptr, len) = buffer.into_raw();
    assert!(!ptr.is_null());
    assert_eq!(len, 11);
    let buffer = unsafe { OutputBuffer::from_raw(ptr, len) };
    assert_eq!(buffer.as_str(), "export {};\n");
    buffer.release();
}

#[test]
fn test_empty_output_buffer_is_null_across_the_abi() {
    let (ptr, len) = OutputBuffer::from(String::new()).into_raw();
    assert!(ptr.is_null());
    assert_eq!(len, 0);
    assert!(unsafe { OutputBuffer::from_raw(ptr, len) }.is_empty());
}

#[test]
fn test_decode_input_rules() {
    assert_eq!(unsafe { boundary::decode_input(std::ptr::null(), 0, "source") }.unwrap(), "");
    let fault = unsafe { boundary::decode_input(std::ptr::null(), 3, "source") }.unwrap_err();
    assert!(matches!(fault, BoundaryFault::NullInput { what: "source", len: 3 }));

    let bytes = [b'a', 0xff, b'b'];
    let fault = unsafe { boundary::decode_input(bytes.as_ptr(), bytes.len(), "filename") }.unwrap_err();
    assert!(matches!(fault, BoundaryFault::InvalidUtf8 { what: "filename", .. }));
    assert_eq!(fault.status(), StatusCode::InvalidInput);
}

#[test]
fn test_status_names() {
    assert_eq!(StatusCode::Ok.name(), "ok");
    assert_eq!(StatusCode::InternalError.c_name().to_str().unwrap(), "internal_error");
    assert_eq!(StatusCode::from_u32(2), Some(StatusCode::InvalidInput));
    assert_eq!(StatusCode::from_u32(4), None);
}
