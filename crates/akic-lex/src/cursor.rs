//! Character cursor for traversing source code.
//!
//! Thin wrapper over [`akic_util::Position`] plus the source buffer itself.
//! The lexer is one-pass with single-character lookahead, so `Cursor` only
//! needs `current`/`peek`/`advance` — no snapshot/restore.

use std::rc::Rc;

use akic_util::Position;

pub struct Cursor<'a> {
    source: &'a str,
    byte_pos: usize,
    position: Position,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            byte_pos: 0,
            position: Position::start(Rc::from(source)),
        }
    }

    /// The character at the cursor, or `'\0'` at end of input.
    pub fn current(&self) -> char {
        self.peek(0)
    }

    /// The character `offset` characters ahead (0 = current).
    pub fn peek(&self, offset: usize) -> char {
        self.source[self.byte_pos..].chars().nth(offset).unwrap_or('\0')
    }

    pub fn is_at_end(&self) -> bool {
        self.byte_pos >= self.source.len()
    }

    pub fn byte_pos(&self) -> usize {
        self.byte_pos
    }

    /// The source text from byte offset `start` up to the cursor's current
    /// position. Used once a multi-character token (identifier, number,
    /// operator) has been fully consumed.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.byte_pos]
    }

    /// Consume and return the current character, advancing position
    /// bookkeeping (line/col/offset).
    pub fn advance(&mut self) -> char {
        let c = self.current();
        if c != '\0' {
            self.byte_pos += c.len_utf8();
            self.position.advance(c);
        }
        c
    }

    /// Snapshot the position the cursor is currently at (for a token's origin).
    pub fn position(&self) -> Position {
        self.position.copy()
    }

    pub fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.current().is_whitespace() {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_through_ascii() {
        let mut c = Cursor::new("ab");
        assert_eq!(c.current(), 'a');
        c.advance();
        assert_eq!(c.current(), 'b');
        c.advance();
        assert_eq!(c.current(), '\0');
        assert!(c.is_at_end());
    }

    #[test]
    fn advances_through_utf8() {
        let mut c = Cursor::new("αβ");
        assert_eq!(c.advance(), 'α');
        assert_eq!(c.current(), 'β');
    }

    #[test]
    fn peek_does_not_consume() {
        let c = Cursor::new("abc");
        assert_eq!(c.peek(0), 'a');
        assert_eq!(c.peek(1), 'b');
        assert_eq!(c.peek(2), 'c');
        assert_eq!(c.peek(3), '\0');
        assert_eq!(c.current(), 'a');
    }

    #[test]
    fn tracks_line_and_column_across_newline() {
        let mut c = Cursor::new("ab\ncd");
        c.advance();
        c.advance();
        let before_nl = c.position();
        assert_eq!(before_nl.line, 1);
        c.advance(); // consume '\n'
        let after_nl = c.position();
        assert_eq!(after_nl.line, 2);
        assert_eq!(after_nl.col, 0);
    }
}
