//! Recursive-descent parser with precedence climbing.
//!
//! `Parser` consumes the lexer's token stream in one pass and builds an
//! immutable [`ast::Ast`]. Grammar productions are split across sibling
//! modules the way the token-family split organizes the lexer:
//! - `items` - top-level productions (`def`, `extern`, `uni`, decorator
//!   blocks, pragmas, bare expressions).
//! - `expr` - expression grammar, precedence climbing.
//! - `stmt` - `var`/`with` binding lists shared by several productions.
//! - `types` - source-level type syntax (`: NAME`, `ptr`, `func(...)`).

pub mod ast;
mod expr;
mod items;
mod stmt;
mod types;

use akic_lex::{Keyword, Token, TokenKind};
use akic_util::{Position, SyntaxError, SyntaxResult};

pub use ast::Ast;

#[cfg(test)]
mod edge_cases;

/// Parses a complete token stream (already collected, `Eof`-terminated)
/// into an [`Ast`].
pub fn parse(tokens: Vec<Token>) -> SyntaxResult<Ast> {
    Parser::new(tokens).parse_program()
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Decorator names active while parsing the declarations nested inside
    /// an `@name { ... }` block; stamped onto each `Prototype` parsed
    /// while non-empty.
    decorator_stack: Vec<String>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            decorator_stack: Vec::new(),
        }
    }

    pub fn parse_program(&mut self) -> SyntaxResult<Ast> {
        let mut items = Vec::new();
        while !self.is_eof() {
            self.parse_toplevel_into(&mut items)?;
        }
        Ok(items)
    }

    fn is_eof(&self) -> bool {
        self.tokens[self.pos].kind == TokenKind::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn position(&self) -> Position {
        self.peek().position.copy()
    }

    fn check_punct(&self, c: char) -> bool {
        self.peek().kind == TokenKind::Punctuator && self.peek().text() == Some(c.to_string().as_str())
    }

    fn eat_punct(&mut self, c: char) -> bool {
        if self.check_punct(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, c: char) -> SyntaxResult<()> {
        if self.eat_punct(c) {
            Ok(())
        } else {
            self.error(format!("expected '{c}'"))
        }
    }

    fn check_keyword(&self, kw: Keyword) -> bool {
        self.peek().kind == TokenKind::Keyword(kw)
    }

    fn eat_keyword(&mut self, kw: Keyword) -> bool {
        if self.check_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, kw: Keyword) -> SyntaxResult<()> {
        if self.eat_keyword(kw) {
            Ok(())
        } else {
            self.error(format!("expected keyword '{}'", kw.text()))
        }
    }

    fn check_operator(&self, text: &str) -> bool {
        self.peek().kind == TokenKind::Operator && self.peek().text() == Some(text)
    }

    fn eat_operator(&mut self, text: &str) -> bool {
        if self.check_operator(text) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_name(&mut self) -> SyntaxResult<String> {
        if self.peek().kind == TokenKind::Name {
            let tok = self.advance();
            Ok(tok.text().expect("Name token always carries text").to_string())
        } else {
            self.error("expected a name")
        }
    }

    /// Consumes a bare-word contextual keyword like `func` in type syntax,
    /// which lexes as an ordinary `Name` rather than a reserved `Keyword`.
    fn eat_name_text(&mut self, text: &str) -> bool {
        if self.peek().kind == TokenKind::Name && self.peek().text() == Some(text) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn error<T>(&self, message: impl Into<String>) -> SyntaxResult<T> {
        Err(SyntaxError::new(message.into(), self.position()))
    }
}
