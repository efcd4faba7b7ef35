//! Comment skipping and pragma lexing.
//!
//! `#` starts a line comment, except `#pragma` which registers a
//! module-wide directive the driver needs rather than discardable text.

use akic_util::SyntaxResult;

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind, TokenValue};

/// If the current `#`-led line is a pragma, consumes it and returns its
/// token. Otherwise consumes the whole line as an ordinary comment and
/// returns `None`.
pub fn lex_comment_or_pragma(cursor: &mut Cursor) -> SyntaxResult<Option<Token>> {
    let position = cursor.position();
    cursor.advance(); // '#'

    if matches_pragma_keyword(cursor) {
        for _ in 0.."pragma".len() {
            cursor.advance();
        }
        cursor.skip_whitespace();
        let start = cursor.byte_pos();
        while !cursor.is_at_end() && cursor.current() != '\n' {
            cursor.advance();
        }
        let body = cursor.slice_from(start).trim().to_string();
        return Ok(Some(Token::new(TokenKind::Pragma, TokenValue::Text(body), position)));
    }

    while !cursor.is_at_end() && cursor.current() != '\n' {
        cursor.advance();
    }
    Ok(None)
}

fn matches_pragma_keyword(cursor: &Cursor) -> bool {
    "pragma".chars().enumerate().all(|(i, c)| cursor.peek(i) == c)
}
