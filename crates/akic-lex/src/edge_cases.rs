//! Boundary-condition tests for the lexer, collected separately from the
//! per-module unit tests above.

use crate::token::{Keyword, TokenKind, TokenValue};
use crate::Lexer;

fn lex_all(source: &str) -> Vec<crate::Token> {
    Lexer::new(source).tokens().map(|t| t.expect("no syntax error")).collect()
}

#[test]
fn adjacent_operators_are_not_merged_past_the_table() {
    // "+-" is two operators, not one.
    let toks = lex_all("+-");
    let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TokenKind::Operator, TokenKind::Operator, TokenKind::Eof]);
}

#[test]
fn compound_assign_operators_are_single_tokens() {
    let toks = lex_all("x += 1");
    assert_eq!(toks[1].text(), Some("+="));
}

#[test]
fn keyword_prefix_is_not_misrecognized_as_a_shorter_keyword() {
    let toks = lex_all("ifdef");
    assert_eq!(toks[0].kind, TokenKind::Name);
}

#[test]
fn vartype_name_used_as_an_expression_position_name() {
    // `i32(x)` — i32 lexes as Vartype regardless of syntactic position;
    // the parser decides whether that's meaningful.
    let toks = lex_all("i32(x)");
    assert_eq!(toks[0].kind, TokenKind::Vartype);
}

#[test]
fn consecutive_string_literals_do_not_bleed_into_each_other() {
    let toks = lex_all("\"a\" \"b\"");
    assert_eq!(toks[0].value, TokenValue::Bytes(b"a".to_vec()));
    assert_eq!(toks[1].value, TokenValue::Bytes(b"b".to_vec()));
}

#[test]
fn empty_string_literal() {
    let toks = lex_all("\"\"");
    assert_eq!(toks[0].value, TokenValue::Bytes(Vec::new()));
}

#[test]
fn mismatched_quote_inside_string_is_literal() {
    let toks = lex_all("\"it's fine\"");
    assert_eq!(toks[0].value, TokenValue::Bytes(b"it's fine".to_vec()));
}

#[test]
fn pragma_line_does_not_consume_following_token() {
    let toks = lex_all("#pragma x = 1\ny");
    assert_eq!(toks[0].kind, TokenKind::Pragma);
    assert_eq!(toks[1].kind, TokenKind::Name);
}

#[test]
fn booleans_lex_as_keywords_not_names() {
    let toks = lex_all("true false");
    assert_eq!(toks[0].kind, TokenKind::Keyword(Keyword::True));
    assert_eq!(toks[1].kind, TokenKind::Keyword(Keyword::False));
}

#[test]
fn unicode_identifier_is_accepted() {
    let toks = lex_all("café");
    assert_eq!(toks[0].kind, TokenKind::Name);
    assert_eq!(toks[0].text(), Some("café"));
}

#[test]
fn hex_literal_immediately_followed_by_name_does_not_absorb_it() {
    let toks = lex_all("0xFFabc");
    // greedy hex-digit scan: 'a' and 'b' and 'c' ARE hex digits, so the
    // whole run is consumed as one literal.
    assert_eq!(toks[0].kind, TokenKind::Hex);
    assert_eq!(toks.len(), 2); // literal + EOF
}

#[test]
fn float_with_only_fractional_digits_requires_leading_digit() {
    // the grammar requires digits before '.', so ".5" lexes the dot as a
    // punctuator rather than a float missing its integer part.
    let toks = lex_all(".5");
    assert_eq!(toks[0].kind, TokenKind::Punctuator);
    assert_eq!(toks[1].kind, TokenKind::Integer);
}
