//! Boundary and malformed-input tests that don't fit naturally alongside
//! any one production module.

use akic_lex::{Lexer, Token};

use crate::ast::{Expr, Literal, TopLevel, VarType};
use crate::{parse, Ast};

fn parse_source(source: &str) -> Ast {
    let tokens: Vec<Token> = Lexer::new(source).tokens().map(|t| t.unwrap()).collect();
    parse(tokens).expect("parses")
}

fn parse_source_err(source: &str) -> String {
    let tokens: Vec<Token> = Lexer::new(source).tokens().map(|t| t.unwrap()).collect();
    parse(tokens).expect_err("should not parse").message
}

#[test]
fn whitespace_only_source_has_no_items() {
    assert!(parse_source("   \n\t  \n").is_empty());
}

#[test]
fn comment_only_source_has_no_items() {
    assert!(parse_source("# just a comment\n").is_empty());
}

#[test]
fn nested_decorator_blocks_stack_names() {
    let ast = parse_source("@inline { @track { def f(x) x } }");
    match &ast[0] {
        TopLevel::Function(f) => assert_eq!(f.proto.decorators, vec!["inline".to_string(), "track".to_string()]),
        other => panic!("expected Function, got {other:?}"),
    }
}

#[test]
fn decorators_do_not_leak_past_their_block() {
    let ast = parse_source("@inline { def f(x) x } def g(x) x");
    match &ast[1] {
        TopLevel::Function(g) => assert!(g.proto.decorators.is_empty()),
        other => panic!("expected Function, got {other:?}"),
    }
}

#[test]
fn multiple_toplevel_pragmas_preserve_order() {
    let ast = parse_source("#pragma a = 1\n#pragma b = 2\n");
    assert_eq!(ast.len(), 2);
    match (&ast[0], &ast[1]) {
        (TopLevel::Pragma(a, _), TopLevel::Pragma(b, _)) => {
            assert_eq!(a, "a = 1");
            assert_eq!(b, "b = 2");
        }
        other => panic!("expected two Pragmas, got {other:?}"),
    }
}

#[test]
fn unterminated_call_is_a_parse_error() {
    let err = parse_source_err("def f(x) foo(1, 2");
    assert!(!err.is_empty());
}

#[test]
fn missing_function_body_is_a_parse_error() {
    let err = parse_source_err("def f(x)");
    assert!(!err.is_empty());
}

#[test]
fn deeply_nested_parentheses_still_parse() {
    let ast = parse_source("((((1))))");
    match &ast[0] {
        TopLevel::Expression(Expr::Constant(Literal::Int(1), ..)) => {}
        other => panic!("expected Constant(1), got {other:?}"),
    }
}

#[test]
fn array_of_arrays_parses() {
    let ast = parse_source("[[1, 2], [3, 4]]");
    match &ast[0] {
        TopLevel::Expression(Expr::Array(outer, _)) => {
            assert_eq!(outer.len(), 2);
            assert!(matches!(outer[0], Expr::Array(..)));
        }
        other => panic!("expected nested Array, got {other:?}"),
    }
}

#[test]
fn empty_array_literal_parses() {
    let ast = parse_source("[]");
    match &ast[0] {
        TopLevel::Expression(Expr::Array(elems, _)) => assert!(elems.is_empty()),
        other => panic!("expected empty Array, got {other:?}"),
    }
}

#[test]
fn array_type_used_as_var_annotation() {
    let ast = parse_source("var a: array i32 [3] = [1, 2, 3]");
    match &ast[0] {
        TopLevel::Expression(Expr::VarList(names, _)) => {
            assert_eq!(names[0].declared_type, VarType::Array(Box::new(VarType::named("i32")), 3));
        }
        other => panic!("expected VarList, got {other:?}"),
    }
}

#[test]
fn trailing_comma_in_call_args_is_rejected() {
    let err = parse_source_err("foo(1, 2,)");
    assert!(!err.is_empty());
}

#[test]
fn empty_function_arglist_parses() {
    let ast = parse_source("def f() 1");
    match &ast[0] {
        TopLevel::Function(f) => assert!(f.proto.args.is_empty()),
        other => panic!("expected Function, got {other:?}"),
    }
}

#[test]
fn when_chain_without_any_else_parses() {
    let ast = parse_source("when a then when b then 1");
    assert!(matches!(&ast[0], TopLevel::Expression(Expr::WhenExpr(..))));
}

#[test]
fn string_literal_with_escapes_parses() {
    let ast = parse_source(r#""a\nb""#);
    match &ast[0] {
        TopLevel::Expression(Expr::String(bytes, ..)) => assert_eq!(bytes, b"a\nb"),
        other => panic!("expected String, got {other:?}"),
    }
}

#[test]
fn operator_declaration_with_extern_is_rejected_at_call_site_not_parse_time() {
    // extern accepts an operator name just like def; nothing in the parser
    // itself distinguishes "sensible" operator arity.
    let ast = parse_source("extern +(a: i32, b: i32) i32");
    match &ast[0] {
        TopLevel::External(e) => assert!(e.proto.is_operator),
        other => panic!("expected External, got {other:?}"),
    }
}
