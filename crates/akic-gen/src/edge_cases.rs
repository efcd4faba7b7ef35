//! Cross-feature edge cases the main test module doesn't exercise:
//! numeric promotion at operator boundaries, operator-function overloads,
//! unsigned/signed division, module reuse, and malformed decorator input.

use crate::*;
use akic_lex::{Lexer, Token};
use akic_sem::TypeRegistry;
use inkwell::context::Context;

const TRIPLE: &str = "x86_64-unknown-linux-gnu";

fn ast_from(source: &str) -> akic_par::Ast {
    let tokens: Vec<Token> = Lexer::new(source).tokens().map(|t| t.expect("no syntax error")).collect();
    akic_par::parse(tokens).expect("parses")
}

fn new_codegen(context: &Context) -> CodeGen<'_> {
    CodeGen::new(context, "edge", TRIPLE, TypeRegistry::for_triple(TRIPLE))
}

#[test]
fn mixed_int_and_float_operands_promote_to_float() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def main() f64 { 1 + 2.5 }");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn comparison_between_an_i32_and_a_wider_i64_widens_the_i32() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def main(a: i32, b: i64) bool { a < b }");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn unsigned_integer_division_uses_the_unsigned_instruction() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def main(a: u32, b: u32) u32 { a // b }");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn bitwise_and_or_operate_without_promoting_to_bool() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def main(a: i32, b: i32) i32 { a & b }\ndef g(a: i32, b: i32) i32 { a | b }");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn logical_and_or_always_yield_bool() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def main(a: bool, b: bool) bool { a and b or b }");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn unary_not_on_a_bool_compiles() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def main(a: bool) bool { not a }");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn unary_minus_on_an_unsigned_value_still_lowers_via_int_sub() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def main(a: u32) u32 { -a }");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn operator_function_declaration_is_registered_like_any_other_call() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def +(a: i32, b: i32) i32 { a }\ndef main() i32 { 1 }");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    let names: Vec<String> = cg
        .module()
        .get_functions()
        .map(|f| f.get_name().to_str().unwrap().to_string())
        .collect();
    assert!(names.iter().any(|n| n.contains('+')));
}

#[test]
fn main_is_never_mangled_and_always_marked_noinline() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def main() i32 { 0 }");

    assert!(cg.eval(&ast).is_empty());
    assert!(cg.module().get_function("main").is_some());
}

#[test]
fn forward_declared_function_redefined_with_a_body_replaces_its_blocks() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    // `extern` forward-declares `helper`; a later `def` with a matching
    // signature gives it a body rather than erroring as a redefinition.
    let ast = ast_from("extern helper(x: i32) i32\ndef helper(x: i32) i32 { x + 1 }\ndef main() i32 { helper(1) }");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn empty_module_still_carries_the_target_triple() {
    let context = Context::create();
    let cg = new_codegen(&context);
    let triple = cg.module().get_triple();
    assert_eq!(triple.as_str().to_str().unwrap(), TRIPLE);
}

#[test]
fn unicode_identifiers_round_trip_through_the_symbol_table() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def main() i32 { var \u{5024} = 1; \u{5024} }");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn nested_with_blocks_each_scope_their_own_bindings() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def main() i32 { with a = 1 { with b = 2 { a + b } } }");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn sibling_with_blocks_do_not_see_each_others_bindings() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("def main() i32 { with a = 1 { a }; with a = 2 { a } }");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn zero_length_array_type_resolves_without_an_initializer() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("uni (table: array i32 [4])");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn varfunc_decorator_forces_noinline_like_main_does() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("@varfunc { def entry() i32 { 0 } }");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn repeated_reset_always_leaves_an_empty_module_behind() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    for _ in 0..3 {
        let ast = ast_from("def f() i32 { 1 }");
        assert!(cg.eval(&ast).is_empty());
        cg.reset();
        assert!(cg.module().get_function("f").is_none());
    }
}

#[test]
fn pointer_typed_extern_parameter_maps_to_an_opaque_pointer() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from("extern memcpy(dst: ptr byte, src: ptr byte, n: u64) ptr byte");

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn every_equality_and_ordering_operator_parses_and_lowers() {
    let context = Context::create();
    let mut cg = new_codegen(&context);
    let ast = ast_from(
        "def main(a: i32, b: i32) bool { \
            if a == b then true else \
            if a != b then true else \
            if a < b then true else \
            if a > b then true else \
            if a <= b then true else \
            a >= b \
         }",
    );

    let errors = cg.eval(&ast);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}
