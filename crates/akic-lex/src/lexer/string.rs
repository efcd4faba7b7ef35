//! String literal lexing.

use akic_util::{Position, SyntaxError, SyntaxResult};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind, TokenValue};

/// Lexes a string opened and closed by the same quote character (`"` or
/// `'`), decoding escape sequences as it goes. An unclosed string is a
/// syntax error anchored at the opening quote.
pub fn lex_string(cursor: &mut Cursor) -> SyntaxResult<Token> {
    let position = cursor.position();
    let quote = cursor.advance();

    let mut bytes = Vec::new();
    loop {
        if cursor.is_at_end() {
            return Err(SyntaxError::new("unterminated string literal", position));
        }
        let c = cursor.advance();
        if c == quote {
            break;
        }
        if c == '\\' {
            bytes.push(decode_escape(cursor, &position)?);
        } else {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
    }

    Ok(Token::new(TokenKind::String, TokenValue::Bytes(bytes), position))
}

fn decode_escape(cursor: &mut Cursor, string_start: &Position) -> SyntaxResult<u8> {
    if cursor.is_at_end() {
        return Err(SyntaxError::new("unterminated string literal", string_start.copy()));
    }
    let escape_pos = cursor.position();
    let c = cursor.advance();
    Ok(match c {
        'n' => b'\n',
        't' => b'\t',
        'r' => b'\r',
        '\\' => b'\\',
        '\'' => b'\'',
        '"' => b'"',
        '0' => 0u8,
        'x' => {
            let hi = hex_digit(cursor, &escape_pos)?;
            let lo = hex_digit(cursor, &escape_pos)?;
            hi * 16 + lo
        }
        other => {
            return Err(SyntaxError::new(
                format!("unknown escape sequence '\\{other}'"),
                escape_pos,
            ))
        }
    })
}

fn hex_digit(cursor: &mut Cursor, escape_pos: &Position) -> SyntaxResult<u8> {
    let c = cursor.advance();
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| SyntaxError::new("expected two hex digits after '\\x'", escape_pos.copy()))
}
