//! Identifier and keyword lexing.

use crate::cursor::Cursor;
use crate::token::{is_vartype_name, Keyword, Token, TokenKind, TokenValue};

/// Lexes `[A-Za-z_][A-Za-z0-9_]*`, then classifies it as a keyword, a known
/// type name, or a plain `Name`.
pub fn lex_identifier(cursor: &mut Cursor) -> Token {
    let position = cursor.position();
    let start = cursor.byte_pos();

    while is_ident_continue(cursor.current()) {
        cursor.advance();
    }

    let text = cursor.slice_from(start);

    if let Some(keyword) = Keyword::lookup(text) {
        return Token::new(TokenKind::Keyword(keyword), TokenValue::Text(text.to_string()), position);
    }
    if is_vartype_name(text) {
        return Token::new(TokenKind::Vartype, TokenValue::Text(text.to_string()), position);
    }
    Token::new(TokenKind::Name, TokenValue::Text(text.to_string()), position)
}

pub fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}
