//! Source-level type syntax: `: NAME` optionally prefixed with pointer
//! markers and optionally shaped as `func(T, …) R`.

use akic_util::SyntaxResult;

use crate::ast::VarType;
use crate::Parser;

impl Parser {
    /// `ptr* (NAME | func(vartype,*) vartype | array vartype [N])`.
    pub(crate) fn parse_vartype(&mut self) -> SyntaxResult<VarType> {
        if self.eat_keyword(akic_lex::Keyword::Ptr) {
            return Ok(VarType::Ptr(Box::new(self.parse_vartype()?)));
        }
        if self.eat_name_text("array") {
            let element = self.parse_vartype()?;
            self.expect_punct('[')?;
            let length = self.parse_array_length()?;
            self.expect_punct(']')?;
            return Ok(VarType::Array(Box::new(element), length));
        }
        if self.eat_name_text("func") {
            self.expect_punct('(')?;
            let mut params = Vec::new();
            if !self.check_punct(')') {
                loop {
                    params.push(self.parse_vartype()?);
                    if !self.eat_punct(',') {
                        break;
                    }
                }
            }
            self.expect_punct(')')?;
            let ret = self.parse_vartype()?;
            return Ok(VarType::Func(params, Box::new(ret)));
        }
        let name = self.expect_name()?;
        Ok(VarType::named(name))
    }

    /// `[: vartype]`, defaulting to unset when the colon is absent.
    pub(crate) fn parse_opt_vartype(&mut self) -> SyntaxResult<VarType> {
        if self.eat_punct(':') {
            self.parse_vartype()
        } else {
            Ok(VarType::unset())
        }
    }

    fn parse_array_length(&mut self) -> SyntaxResult<u64> {
        if self.peek().kind != akic_lex::TokenKind::Integer {
            return self.error("expected an array length literal");
        }
        let tok = self.advance();
        match tok.value {
            akic_lex::TokenValue::Int(n) if n >= 0 => Ok(n as u64),
            akic_lex::TokenValue::UInt(n) => Ok(n),
            _ => self.error("array length must be a non-negative integer"),
        }
    }
}
