//! `name [: type] [= init]` binding lists, shared by `var`, `with`, and
//! `uni`.

use akic_util::SyntaxResult;

use crate::ast::NameNode;
use crate::Parser;

impl Parser {
    /// A single `name [: type] [= init]` binding.
    pub(crate) fn parse_name_binding(&mut self) -> SyntaxResult<NameNode> {
        let position = self.position();
        let id = self.expect_name()?;
        let declared_type = self.parse_opt_vartype()?;
        let initializer = if self.eat_operator("=") {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        Ok(NameNode {
            id,
            initializer,
            declared_type,
            position,
        })
    }

    /// Comma-separated `name [: type] [= init]` entries. Used by `var`
    /// (expression position), `with` (expression position), and `uni`
    /// (top-level, via the same production).
    pub(crate) fn parse_name_binding_list(&mut self) -> SyntaxResult<Vec<NameNode>> {
        let mut names = vec![self.parse_name_binding()?];
        while self.eat_punct(',') {
            names.push(self.parse_name_binding()?);
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use akic_lex::Lexer;

    fn parse(source: &str) -> Vec<NameNode> {
        let tokens = Lexer::new(source).tokens().map(|t| t.unwrap()).collect();
        let mut parser = Parser::new(tokens);
        parser.parse_name_binding_list().expect("valid binding list")
    }

    #[test]
    fn single_uninitialized_binding() {
        let names = parse("x");
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].id, "x");
        assert!(names[0].initializer.is_none());
    }

    #[test]
    fn typed_and_initialized_bindings() {
        let names = parse("a: i32 = 1, b = 2");
        assert_eq!(names.len(), 2);
        assert_eq!(names[0].id, "a");
        assert!(names[0].initializer.is_some());
        assert_eq!(names[1].id, "b");
    }
}
