//! Numeric literal lexing.

use akic_util::{Position, SyntaxError, SyntaxResult};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind, TokenValue, TypeHint};

/// Lexes a decimal integer/float literal or a `0x`/`0h` hex literal.
pub fn lex_number(cursor: &mut Cursor) -> SyntaxResult<Token> {
    let position = cursor.position();
    if cursor.current() == '0' && matches!(cursor.peek(1), 'x' | 'h') {
        return lex_hex(cursor, position);
    }
    lex_decimal(cursor, position)
}

fn lex_decimal(cursor: &mut Cursor, position: Position) -> SyntaxResult<Token> {
    let start = cursor.byte_pos();
    let mut is_float = false;
    loop {
        let c = cursor.current();
        if c.is_ascii_digit() {
            cursor.advance();
        } else if c == '_' {
            // visual separator, discarded below
            cursor.advance();
        } else if c == '.' && !is_float && cursor.peek(1).is_ascii_digit() {
            is_float = true;
            cursor.advance();
        } else {
            break;
        }
    }
    let digits: String = cursor.slice_from(start).chars().filter(|c| *c != '_').collect();

    let suffix_hint = TypeHint::from_suffix(cursor.current());
    if suffix_hint.is_some() {
        cursor.advance();
    }

    let is_float = is_float || matches!(suffix_hint, Some(TypeHint::F32) | Some(TypeHint::F64));
    let hint = suffix_hint.unwrap_or(if is_float { TypeHint::F64 } else { TypeHint::I32 });

    if is_float {
        let value: f64 = digits
            .parse()
            .map_err(|_| SyntaxError::new(format!("invalid float literal '{digits}'"), position.copy()))?;
        return Ok(Token::new(TokenKind::Float, TokenValue::Float(value), position).with_hint(hint));
    }

    match hint {
        TypeHint::U32 | TypeHint::U64 => {
            let value: u64 = digits
                .parse()
                .map_err(|_| SyntaxError::new(format!("invalid integer literal '{digits}'"), position.copy()))?;
            Ok(Token::new(TokenKind::Integer, TokenValue::UInt(value), position).with_hint(hint))
        }
        _ => {
            let value: i64 = digits
                .parse()
                .map_err(|_| SyntaxError::new(format!("invalid integer literal '{digits}'"), position.copy()))?;
            Ok(Token::new(TokenKind::Integer, TokenValue::Int(value), position).with_hint(hint))
        }
    }
}

/// `0xHH…` (unsigned) or `0hHH…` (signed). Width is `ceil(4·ndigits)`
/// rounded up to a multiple of 8, except a value of 0 or 1 which is `bool`.
fn lex_hex(cursor: &mut Cursor, position: Position) -> SyntaxResult<Token> {
    cursor.advance(); // '0'
    let marker = cursor.advance(); // 'x' or 'h'
    let signed = marker == 'h';

    let start = cursor.byte_pos();
    while cursor.current().is_ascii_hexdigit() {
        cursor.advance();
    }
    let digits = cursor.slice_from(start);
    if digits.is_empty() {
        return Err(SyntaxError::new("expected hex digits after '0x'/'0h'", position));
    }

    let value = u64::from_str_radix(digits, 16)
        .map_err(|_| SyntaxError::new(format!("hex literal '{digits}' out of range"), position.copy()))?;

    if value == 0 || value == 1 {
        let tok = Token::new(
            TokenKind::Hex,
            TokenValue::Hex { value, bits: 1, signed },
            position,
        )
        .with_hint(TypeHint::Bool);
        return Ok(tok);
    }

    let ndigits = digits.len() as u32;
    let bits = ((4 * ndigits + 7) / 8) * 8;
    Ok(Token::new(
        TokenKind::Hex,
        TokenValue::Hex { value, bits, signed },
        position,
    ))
}
