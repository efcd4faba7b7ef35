//! Edge cases in the pipeline wiring itself: empty/whitespace input,
//! partial-failure module survival, independent compiles sharing nothing,
//! and the target triple actually reaching the emitted module.

use akic_drv::compile;
use akic_gen::CodegenError;
use inkwell::context::Context;

const TRIPLE: &str = "x86_64-unknown-linux-gnu";

#[test]
fn empty_source_compiles_to_an_empty_module() {
    let context = Context::create();
    let out = compile(&context, "", "empty", TRIPLE).expect("compiles");

    assert!(out.errors.is_empty());
    assert!(out.codegen.module().get_functions().next().is_none());
}

#[test]
fn whitespace_only_source_compiles_to_an_empty_module() {
    let context = Context::create();
    let out = compile(&context, "   \n\t  \n  ", "ws", TRIPLE).expect("compiles");

    assert!(out.errors.is_empty());
    assert!(out.codegen.module().get_functions().next().is_none());
}

#[test]
fn a_codegen_error_in_one_function_leaves_a_sibling_function_intact() {
    let context = Context::create();
    let source = "def a() i32 { 1 }\ndef b() i32 { undefined_name }";
    let out = compile(&context, source, "partial", TRIPLE).expect("parses and lexes fine");

    assert!(out.has_errors());
    assert!(
        out.errors.iter().any(|e| matches!(e, CodegenError::UnknownSymbol(_))),
        "expected UnknownSymbol, got {:?}",
        out.errors
    );
    assert!(out.codegen.module().get_function("a").is_some());
}

#[test]
fn multiple_bad_top_level_items_all_report_their_own_error() {
    let context = Context::create();
    let source = "def a() i32 { missing_one }\ndef b() i32 { missing_two }";
    let out = compile(&context, source, "multi", TRIPLE).expect("parses and lexes fine");

    assert_eq!(out.errors.len(), 2);
}

#[test]
fn the_target_triple_reaches_the_emitted_module() {
    let context = Context::create();
    let out = compile(&context, "def f() i32 { 1 }", "triples", TRIPLE).expect("compiles");

    let triple = out.codegen.module().get_triple();
    assert_eq!(triple.as_str().to_str().unwrap(), TRIPLE);
}

#[test]
fn two_independent_compiles_in_the_same_context_do_not_share_modules() {
    let context = Context::create();
    let first = compile(&context, "def f() i32 { 1 }", "first", TRIPLE).expect("compiles");
    let second = compile(&context, "def g() i32 { 2 }", "second", TRIPLE).expect("compiles");

    assert!(first.codegen.module().get_function("g").is_none());
    assert!(second.codegen.module().get_function("f").is_none());
}

#[test]
fn a_lexer_error_surfaces_as_a_syntax_error_before_any_codegen_runs() {
    let context = Context::create();
    let result = compile(&context, "def main() i32 { 0x }", "bad_lex", TRIPLE);

    assert!(result.is_err());
}

#[test]
fn a_parser_error_surfaces_as_a_syntax_error() {
    let context = Context::create();
    let result = compile(&context, "def main(", "bad_parse", TRIPLE);

    assert!(result.is_err());
}

#[test]
fn has_errors_is_false_when_every_top_level_item_lowers_cleanly() {
    let context = Context::create();
    let out = compile(&context, "def f() i32 { 1 }\ndef main() i32 { f() }", "clean", TRIPLE).expect("compiles");

    assert!(!out.has_errors());
}
