//! Punctuator and multi-character operator lexing.

use akic_util::SyntaxResult;

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind, TokenValue};

const PUNCTUATORS: &[char] = &['(', ')', '{', '}', '[', ']', ',', ';', ':', '.', '@'];

pub fn is_punctuator(c: char) -> bool {
    PUNCTUATORS.contains(&c)
}

pub fn lex_punctuator(cursor: &mut Cursor) -> Token {
    let position = cursor.position();
    let c = cursor.advance();
    Token::new(TokenKind::Punctuator, TokenValue::Text(c.to_string()), position)
}

/// Operator spellings, longest first, so the greedy match in
/// [`lex_operator`] never splits `==` into two `=` tokens.
const OPERATORS: &[&str] = &["==", "!=", "<=", ">=", "+=", "-=", "//", "<", ">", "=", "+", "-", "*", "/", "&", "|"];

pub fn lex_operator(cursor: &mut Cursor) -> SyntaxResult<Token> {
    let position = cursor.position();
    for &op in OPERATORS {
        if matches(cursor, op) {
            for _ in 0..op.chars().count() {
                cursor.advance();
            }
            return Ok(Token::new(TokenKind::Operator, TokenValue::Text(op.to_string()), position));
        }
    }
    Err(akic_util::SyntaxError::new(
        format!("unrecognized character '{}'", cursor.current()),
        position,
    ))
}

fn matches(cursor: &Cursor, op: &str) -> bool {
    op.chars().enumerate().all(|(i, c)| cursor.peek(i) == c)
}
