//! Lexical analysis: source text to a lazy stream of `Token`s.
//!
//! The lexer is one-pass with single-character lookahead. Recognition
//! rules are tried in a fixed order — strings, identifiers/keywords,
//! numbers, punctuators, comments/pragmas, then multi-character operators —
//! so `Lexer::tokens` never backtracks.

pub mod cursor;
pub mod lexer;
pub mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{Keyword, Token, TokenKind, TokenValue, TypeHint};

#[cfg(test)]
mod edge_cases;
