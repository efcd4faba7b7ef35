//! Top-level productions: `def`, `extern`, `uni`, decorator blocks,
//! pragmas, and bare expressions.

use akic_lex::{Keyword, TokenKind};
use akic_util::SyntaxResult;

use crate::ast::{Argument, External, Function, Prototype, TopLevel, VarType};
use crate::Parser;

impl Parser {
    pub(crate) fn parse_toplevel_into(&mut self, items: &mut Vec<TopLevel>) -> SyntaxResult<()> {
        if self.eat_punct('@') {
            return self.parse_decorator_block(items);
        }
        if self.peek().kind == TokenKind::Pragma {
            let tok = self.advance();
            let text = tok.text().unwrap_or_default().to_string();
            items.push(TopLevel::Pragma(text, tok.position));
            return Ok(());
        }
        if self.eat_keyword(Keyword::Def) {
            items.push(TopLevel::Function(self.parse_function()?));
            return Ok(());
        }
        if self.eat_keyword(Keyword::Extern) {
            items.push(TopLevel::External(self.parse_external()?));
            return Ok(());
        }
        if self.eat_keyword(Keyword::Uni) {
            items.push(TopLevel::Uniform(self.parse_uniform()?));
            return Ok(());
        }

        let expr = self.parse_expr()?;
        self.eat_punct(';');
        items.push(TopLevel::Expression(expr));
        Ok(())
    }

    /// `@decorator_name { toplevel* }`. Nested declarations are parsed
    /// in place and pushed straight into `items`; there is no dedicated
    /// AST node for the block itself, since its only effect is which
    /// decorators land on the `Prototype`s parsed inside it.
    fn parse_decorator_block(&mut self, items: &mut Vec<TopLevel>) -> SyntaxResult<()> {
        let name = self.expect_name()?;
        self.decorator_stack.push(name);
        self.expect_punct('{')?;
        while !self.check_punct('}') {
            self.parse_toplevel_into(items)?;
        }
        self.expect_punct('}')?;
        self.decorator_stack.pop();
        Ok(())
    }

    fn parse_function(&mut self) -> SyntaxResult<Function> {
        let position = self.position();
        let (name, is_operator) = self.parse_def_name()?;
        let args = self.parse_arglist()?;
        let return_type = self.parse_opt_vartype()?;
        let body = self.parse_block()?;
        Ok(Function {
            proto: Prototype {
                name,
                args,
                return_type,
                position,
                decorators: self.decorator_stack.clone(),
                is_operator,
            },
            body,
        })
    }

    fn parse_external(&mut self) -> SyntaxResult<External> {
        let position = self.position();
        let (name, is_operator) = self.parse_def_name()?;
        let args = self.parse_arglist()?;
        let return_type = self.parse_vartype()?;
        Ok(External {
            proto: Prototype {
                name,
                args,
                return_type,
                position,
                decorators: Vec::new(),
                is_operator,
            },
        })
    }

    fn parse_uniform(&mut self) -> SyntaxResult<Vec<crate::ast::NameNode>> {
        self.expect_punct('(')?;
        let names = if self.check_punct(')') {
            Vec::new()
        } else {
            self.parse_name_binding_list()?
        };
        self.expect_punct(')')?;
        Ok(names)
    }

    /// A declaration name is either a plain identifier or a built-in
    /// operator symbol (`def +(a, b) ...`), registering an operator
    /// overload.
    fn parse_def_name(&mut self) -> SyntaxResult<(String, bool)> {
        match self.peek().kind {
            TokenKind::Name => {
                let tok = self.advance();
                Ok((tok.text().expect("Name token carries text").to_string(), false))
            }
            TokenKind::Operator => {
                let tok = self.advance();
                Ok((tok.text().expect("Operator token carries text").to_string(), true))
            }
            _ => self.error("expected a function name or operator symbol"),
        }
    }

    fn parse_arglist(&mut self) -> SyntaxResult<Vec<Argument>> {
        self.expect_punct('(')?;
        let mut args = Vec::new();
        if !self.check_punct(')') {
            loop {
                args.push(self.parse_argument()?);
                if !self.eat_punct(',') {
                    break;
                }
            }
        }
        self.expect_punct(')')?;
        Ok(args)
    }

    fn parse_argument(&mut self) -> SyntaxResult<Argument> {
        let position = self.position();
        let name = self.expect_name()?;
        let declared_type = self.parse_opt_vartype()?;
        let default = if self.eat_operator("=") {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        Ok(Argument {
            name,
            declared_type,
            default,
            position,
        })
    }
}
