//! End-to-end codegen tests: source text through the lexer and parser,
//! then lowered by `CodeGen` and inspected on the resulting module.

use crate::*;
use akic_lex::{Lexer, Token};
use akic_sem::TypeRegistry;
use akic_util::Level;
use inkwell::context::Context;

const TRIPLE: &str = "x86_64-unknown-linux-gnu";

fn ast_from(source: &str) -> akic_par::Ast {
    let tokens: Vec<Token> = Lexer::new(source).tokens().map(|t| t.expect("no syntax error")).collect();
    akic_par::parse(tokens).expect("parses")
}

fn new_codegen(context: &Context) -> CodeGen<'_> {
    CodeGen::new(context, "test", TRIPLE, TypeRegistry::for_triple(TRIPLE))
}

#[test]
fn simple_function_definition_and_call() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def add(a: i32, b: i32) i32 { a + b }\ndef main() i32 { add(1, 2) }");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert!(cg.module().get_function("main").is_some());
}

#[test]
fn extern_declaration_is_registered_without_a_body() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("extern puts(s: ptr byte) i32");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    let func = cg.module().get_function("puts").expect("extern registered");
    assert_eq!(func.count_basic_blocks(), 0);
}

#[test]
fn overload_resolution_picks_the_call_matching_signature() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from(
        "def describe(x: i32) i32 { x }\n\
         def describe(x: f64) i32 { 1 }\n\
         def main() i32 { describe(1) + describe(1.5) }",
    );

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    let names: Vec<String> = cg
        .module()
        .get_functions()
        .map(|f| f.get_name().to_str().unwrap().to_string())
        .collect();
    assert!(names.iter().filter(|n| n.contains("describe")).count() >= 2);
}

#[test]
fn call_missing_a_required_argument_has_no_matching_overload() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def add(a: i32, b: i32) i32 { a + b }\ndef main() i32 { add(1) }");

    let errors = cg.eval(&ast);
    assert!(
        errors.iter().any(|e| matches!(e, CodegenError::NoMatchingOverload { .. })),
        "expected NoMatchingOverload, got {errors:?}"
    );
}

#[test]
fn call_omitting_a_trailing_default_argument_fills_it_in() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from(
        "def greet(times: i32, step: i32 = 2) i32 { times + step }\n\
         def main() i32 { greet(1) }",
    );

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn call_supplying_the_default_argument_explicitly_still_resolves() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from(
        "def greet(times: i32, step: i32 = 2) i32 { times + step }\n\
         def main() i32 { greet(1, 9) }",
    );

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn if_expression_yields_a_value_from_either_branch() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def main(x: i32) i32 { if x then 1 else 2 }");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn when_without_else_is_rejected_in_value_position() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def main() i32 { when 1 then 2 }");

    let errors = cg.eval(&ast);
    assert!(
        errors.iter().any(|e| matches!(e, CodegenError::WhenRequiresElseInValuePosition)),
        "expected WhenRequiresElseInValuePosition, got {errors:?}"
    );
}

#[test]
fn counted_loop_compiles() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def main() i32 { var total = 0; loop (var i = 0, i, i = i + 1) { total = total + i }; total }");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn break_terminates_the_loop_body_without_a_dangling_branch() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def main() i32 { loop (var i = 0, i, i = i + 1) { break }; 0 }");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn break_outside_a_loop_is_rejected() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def main() i32 { break }");

    let errors = cg.eval(&ast);
    assert!(
        errors.iter().any(|e| matches!(e, CodegenError::BreakOutsideLoop)),
        "expected BreakOutsideLoop, got {errors:?}"
    );
}

#[test]
fn with_block_scopes_its_bindings() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def main() i32 { with scratch = 1 { scratch + 1 } }");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn uniform_array_with_exact_initializer() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("uni (table: array i32 [3] = [1, 2, 3])");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert!(cg.module().get_global("table").is_some());
}

#[test]
fn uniform_array_overflow_is_an_error() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("uni (table: array i32 [2] = [1, 2, 3])");

    let errors = cg.eval(&ast);
    assert!(
        errors.iter().any(|e| matches!(e, CodegenError::ArrayOverflow { given: 3, declared: 2 })),
        "expected ArrayOverflow, got {errors:?}"
    );
}

#[test]
fn uniform_array_underflow_warns_and_zero_pads() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("uni (table: array i32 [5] = [1, 2])");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(cg.warnings.len(), 1);
    assert_eq!(cg.warnings[0].level, Level::Warning);
}

#[test]
fn suppressed_warnings_still_zero_pad_silently() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    cg.suppress_warnings = true;
    let ast = ast_from("uni (table: array i32 [5] = [1, 2])");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert!(cg.warnings.is_empty());
}

#[test]
fn inferred_array_length_matches_the_initializer() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("uni (table: array i32 [0] = [1, 2, 3, 4])");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn scalar_uniform_infers_type_from_its_literal() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("uni (counter = 0)");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert!(cg.module().get_global("counter").is_some());
}

#[test]
fn inline_and_noinline_decorators_conflict() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("@inline { @noinline { def f() i32 { 1 } } }");

    let errors = cg.eval(&ast);
    assert!(
        errors.iter().any(|e| matches!(e, CodegenError::DecoratorConflict(_))),
        "expected DecoratorConflict, got {errors:?}"
    );
}

#[test]
fn inline_decorator_compiles_cleanly() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("@inline { def double(x: i32) i32 { x + x } }");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn valid_pragma_is_accepted() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("#pragma no_warn = true\n");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn pragma_without_equals_is_invalid() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    // A hand-built pragma bypasses the lexer's own shape, exercising
    // `eval_pragma`'s own validation directly.
    let ast = vec![akic_par::ast::TopLevel::Pragma(
        "no_warn_at_all".to_string(),
        akic_util::Position::start(std::rc::Rc::from("test")),
    )];

    let errors = cg.eval(&ast);
    assert!(
        errors.iter().any(|e| matches!(e, CodegenError::InvalidPragma(_))),
        "expected InvalidPragma, got {errors:?}"
    );
}

#[test]
fn anonymous_top_level_expression_compiles_as_its_own_function() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("1 + 1");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert!(cg.module().get_function("_ANON_0").is_some());
}

#[test]
fn chain_expression_dispatches_through_a_call_step() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def len(x: i32) i32 { x }\ndef main() i32 { 5.len() }");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn chain_expression_rejects_a_non_call_step() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def main() i32 { 5.foo }");

    let errors = cg.eval(&ast);
    assert!(
        errors.iter().any(|e| matches!(e, CodegenError::TypeMismatch(_))),
        "expected TypeMismatch, got {errors:?}"
    );
}

#[test]
fn redefinition_changing_argument_count_is_rejected() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def f(a: i32) i32 { a }\ndef f(a: i32, b: i32) i32 { a + b }");

    let errors = cg.eval(&ast);
    assert!(
        errors.iter().any(|e| matches!(e, CodegenError::ArgumentCountMismatch { .. })),
        "expected ArgumentCountMismatch, got {errors:?}"
    );
}

#[test]
fn resetting_the_codegen_drops_prior_module_state() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def f() i32 { 1 }");
    assert!(cg.eval(&ast).is_empty());
    assert!(cg.module().get_function("f").is_some());

    cg.reset();
    assert!(cg.module().get_function("f").is_none());
    assert!(cg.warnings.is_empty());
}
