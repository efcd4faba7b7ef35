//! Position tracking for a single source buffer.
//!
//! A [`Position`] is an immutable snapshot of where the lexer is in the
//! buffer: line, column, absolute byte offset, and the offset of the start
//! of the current line (so an [`excerpt`](Position::excerpt) can be sliced
//! out without rescanning from the top of the file). Tokens clone a
//! `Position` before the cursor advances past them, so a token always knows
//! where it came from even after the cursor has moved on.

use std::rc::Rc;

/// An immutable record of where the lexer was when a token began.
///
/// Two positions are equal iff their `line` and `col` match; the absolute
/// offsets are not considered, matching the source language's own notion
/// that a diagnostic only needs to pinpoint a human-readable location.
#[derive(Clone, Debug)]
pub struct Position {
    pub line: u32,
    pub col: u32,
    pub abs_offset: usize,
    pub line_start_offset: usize,
    buffer: Rc<str>,
}

impl Position {
    /// Start-of-buffer position: line 1, column 0.
    pub fn start(buffer: Rc<str>) -> Self {
        Self {
            line: 1,
            col: 0,
            abs_offset: 0,
            line_start_offset: 0,
            buffer,
        }
    }

    /// Advance past `consumed`, updating line/col bookkeeping.
    ///
    /// `\n` and `\r` both start a new line (a `\r\n` pair therefore counts
    /// as two line advances, matching the Python lexer this was ported
    /// from, which never special-cased the pair).
    pub fn advance(&mut self, consumed: char) {
        self.abs_offset += consumed.len_utf8();
        if consumed == '\n' || consumed == '\r' {
            self.line += 1;
            self.col = 0;
            self.line_start_offset = self.abs_offset;
        } else {
            self.col += 1;
        }
    }

    /// Snapshot the current position. Cheap: `buffer` is a refcounted `Rc<str>`.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// The source line this position falls on, without a trailing newline.
    pub fn line_text(&self) -> &str {
        let rest = &self.buffer[self.line_start_offset..];
        match rest.find(['\n', '\r']) {
            Some(end) => &rest[..end],
            None => rest,
        }
    }

    /// Render a diagnostic excerpt: the source line plus a caret line
    /// pointing at `self.col`.
    pub fn excerpt(&self) -> String {
        let line = self.line_text();
        let caret_pad = " ".repeat(self.col as usize);
        format!("{line}\n{caret_pad}^")
    }

    /// Format a full three-line diagnostic: `line L:C`, the message, and
    /// the excerpt.
    pub fn format_diagnostic(&self, message: &str) -> String {
        format!("line {}:{}\n{}\n{}", self.line, self.col, message, self.excerpt())
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line && self.col == other.col
    }
}
impl Eq for Position {}
