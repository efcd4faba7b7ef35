//! Main `Lexer` struct and token dispatch.

use akic_util::{SyntaxError, SyntaxResult};

use crate::cursor::Cursor;
use crate::lexer::{comment, identifier, number, operator, string};
use crate::token::{Token, TokenKind, TokenValue};

/// Lexer for Akilang source. One-pass, single-character lookahead;
/// produces tokens lazily via its `Iterator` implementation and always
/// ends the stream with `Eof`.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            done: false,
        }
    }

    /// The token stream, ending with `Eof`. A syntax error is terminal: the
    /// iterator yields it once and then stops.
    pub fn tokens(self) -> impl Iterator<Item = SyntaxResult<Token>> + 'a {
        self
    }

    fn next_token(&mut self) -> SyntaxResult<Token> {
        loop {
            self.cursor.skip_whitespace();

            if self.cursor.is_at_end() {
                return Ok(Token::new(TokenKind::Eof, TokenValue::None, self.cursor.position()));
            }

            let c = self.cursor.current();

            if c == '"' || c == '\'' {
                return string::lex_string(&mut self.cursor);
            }
            if identifier::is_ident_start(c) {
                return Ok(identifier::lex_identifier(&mut self.cursor));
            }
            if c.is_ascii_digit() {
                return number::lex_number(&mut self.cursor);
            }
            if operator::is_punctuator(c) {
                return Ok(operator::lex_punctuator(&mut self.cursor));
            }
            if c == '#' {
                if let Some(pragma) = comment::lex_comment_or_pragma(&mut self.cursor)? {
                    return Ok(pragma);
                }
                continue;
            }
            return operator::lex_operator(&mut self.cursor);
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = SyntaxResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_token() {
            Ok(tok) => {
                if tok.is_eof() {
                    self.done = true;
                }
                Some(Ok(tok))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Keyword;

    fn lex_all(source: &str) -> Vec<Token> {
        Lexer::new(source).tokens().map(|t| t.expect("no syntax error")).collect()
    }

    #[test]
    fn empty_input_is_just_eof() {
        let toks = lex_all("");
        assert_eq!(toks.len(), 1);
        assert!(toks[0].is_eof());
    }

    #[test]
    fn skips_whitespace_and_comments_between_tokens() {
        let toks = lex_all("  1   # a comment\n  + 2");
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Integer, TokenKind::Operator, TokenKind::Integer, TokenKind::Eof]
        );
    }

    #[test]
    fn tokenizes_a_def_header() {
        let toks = lex_all("def foo(x) 1 + x");
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword(Keyword::Def),
                TokenKind::Name,
                TokenKind::Punctuator, // (
                TokenKind::Name,
                TokenKind::Punctuator, // )
                TokenKind::Integer,
                TokenKind::Operator, // +
                TokenKind::Name,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn error_is_terminal() {
        let mut tokens = Lexer::new("1 $ 2").tokens();
        assert!(tokens.next().unwrap().is_ok());
        assert!(tokens.next().unwrap().is_err());
        assert!(tokens.next().is_none());
    }

    #[test]
    fn dotted_chain_tokenizes_as_punctuators() {
        let toks = lex_all("a.b.c");
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Name,
                TokenKind::Punctuator,
                TokenKind::Name,
                TokenKind::Punctuator,
                TokenKind::Name,
                TokenKind::Eof,
            ]
        );
    }
}
