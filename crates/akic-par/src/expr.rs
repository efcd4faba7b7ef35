//! Expression grammar: precedence climbing over a fixed operator table,
//! plus the primary productions (literals, names, calls, blocks, control
//! keywords).
//!
//! Binding order, loosest to tightest: assignment (right-assoc) > logical
//! `or`/bit `|` > logical `and`/bit `&` > equality/relational > `+`/`-` >
//! `*`/`/`/`//`. Unary `-`/`not` binds tighter than any binary operator —
//! the tie-break called out explicitly, overriding the looser placement
//! an ordinary precedence table might suggest.

use akic_lex::{Keyword, TokenKind, TokenValue};
use akic_util::{Position, SyntaxResult};

use crate::ast::{Argument, BinOp, CmpOp, Expr, Literal, LoopHeader, NameNode, UnOp, VarType};
use crate::Parser;

impl Parser {
    pub(crate) fn parse_expr(&mut self) -> SyntaxResult<Expr> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> SyntaxResult<Expr> {
        let lhs = self.parse_logical_or()?;

        if self.eat_operator("=") {
            let rhs = self.parse_assignment()?;
            let position = lhs.position().copy();
            return Ok(Expr::Assignment(Box::new(lhs), Box::new(rhs), position));
        }
        if self.eat_operator("+=") {
            let rhs = self.parse_assignment()?;
            return Ok(self.desugar_compound_assign(lhs, BinOp::Add, rhs));
        }
        if self.eat_operator("-=") {
            let rhs = self.parse_assignment()?;
            return Ok(self.desugar_compound_assign(lhs, BinOp::Sub, rhs));
        }
        Ok(lhs)
    }

    /// `a += b` desugars to `a = a + b` in the parser, so codegen never
    /// sees a compound-assign operator.
    fn desugar_compound_assign(&self, target: Expr, op: BinOp, rhs: Expr) -> Expr {
        let position = target.position().copy();
        let combined = Expr::BinOp(op, Box::new(target.clone()), Box::new(rhs), position.copy());
        Expr::Assignment(Box::new(target), Box::new(combined), position)
    }

    fn parse_logical_or(&mut self) -> SyntaxResult<Expr> {
        let mut lhs = self.parse_logical_and()?;
        loop {
            let op = if self.eat_keyword(Keyword::Or) {
                BinOp::Or
            } else if self.eat_operator("|") {
                BinOp::BitOr
            } else {
                break;
            };
            let rhs = self.parse_logical_and()?;
            let position = lhs.position().copy();
            lhs = Expr::BinOp(op, Box::new(lhs), Box::new(rhs), position);
        }
        Ok(lhs)
    }

    fn parse_logical_and(&mut self) -> SyntaxResult<Expr> {
        let mut lhs = self.parse_equality()?;
        loop {
            let op = if self.eat_keyword(Keyword::And) {
                BinOp::And
            } else if self.eat_operator("&") {
                BinOp::BitAnd
            } else {
                break;
            };
            let rhs = self.parse_equality()?;
            let position = lhs.position().copy();
            lhs = Expr::BinOp(op, Box::new(lhs), Box::new(rhs), position);
        }
        Ok(lhs)
    }

    fn parse_equality(&mut self) -> SyntaxResult<Expr> {
        let mut lhs = self.parse_additive()?;
        loop {
            let op = if self.eat_operator("==") {
                CmpOp::Eq
            } else if self.eat_operator("!=") {
                CmpOp::Ne
            } else if self.eat_operator("<=") {
                CmpOp::Le
            } else if self.eat_operator(">=") {
                CmpOp::Ge
            } else if self.eat_operator("<") {
                CmpOp::Lt
            } else if self.eat_operator(">") {
                CmpOp::Gt
            } else {
                break;
            };
            let rhs = self.parse_additive()?;
            let position = lhs.position().copy();
            lhs = Expr::BinOpComparison(op, Box::new(lhs), Box::new(rhs), position);
        }
        Ok(lhs)
    }

    fn parse_additive(&mut self) -> SyntaxResult<Expr> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = if self.eat_operator("+") {
                BinOp::Add
            } else if self.eat_operator("-") {
                BinOp::Sub
            } else {
                break;
            };
            let rhs = self.parse_multiplicative()?;
            let position = lhs.position().copy();
            lhs = Expr::BinOp(op, Box::new(lhs), Box::new(rhs), position);
        }
        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> SyntaxResult<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = if self.eat_operator("*") {
                BinOp::Mul
            } else if self.eat_operator("//") {
                BinOp::IDiv
            } else if self.eat_operator("/") {
                BinOp::Div
            } else {
                break;
            };
            let rhs = self.parse_unary()?;
            let position = lhs.position().copy();
            lhs = Expr::BinOp(op, Box::new(lhs), Box::new(rhs), position);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> SyntaxResult<Expr> {
        let position = self.position();
        if self.eat_operator("-") {
            let operand = self.parse_unary()?;
            return Ok(Expr::UnOp(UnOp::Neg, Box::new(operand), position));
        }
        if self.eat_keyword(Keyword::Not) {
            let operand = self.parse_unary()?;
            return Ok(Expr::UnOp(UnOp::Not, Box::new(operand), position));
        }
        self.parse_chain()
    }

    /// Dotted member access, left to right: `a.b.c` -> `ChainExpr([a, b, c])`.
    fn parse_chain(&mut self) -> SyntaxResult<Expr> {
        let position = self.position();
        let first = self.parse_primary()?;
        if !self.check_punct('.') {
            return Ok(first);
        }
        let mut links = vec![first];
        while self.eat_punct('.') {
            links.push(self.parse_primary()?);
        }
        Ok(Expr::ChainExpr(links, position))
    }

    fn parse_primary(&mut self) -> SyntaxResult<Expr> {
        let position = self.position();

        match self.peek().kind {
            TokenKind::Integer => return self.parse_integer_literal(position),
            TokenKind::Float => return self.parse_float_literal(position),
            TokenKind::Hex => return self.parse_hex_literal(position),
            TokenKind::String => return self.parse_string_literal(position),
            _ => {}
        }

        if self.eat_keyword(Keyword::True) {
            return Ok(Expr::Constant(Literal::Bool(true), VarType::named("bool"), position));
        }
        if self.eat_keyword(Keyword::False) {
            return Ok(Expr::Constant(Literal::Bool(false), VarType::named("bool"), position));
        }
        if self.eat_punct('(') {
            let inner = self.parse_expr()?;
            self.expect_punct(')')?;
            return Ok(inner);
        }
        if self.check_punct('{') {
            return self.parse_expression_block();
        }
        if self.check_punct('[') {
            return self.parse_array_literal(position);
        }
        if self.eat_keyword(Keyword::Var) {
            let names = self.parse_name_binding_list()?;
            return Ok(Expr::VarList(names, position));
        }
        if self.eat_keyword(Keyword::If) {
            return self.parse_if_expr(position);
        }
        if self.eat_keyword(Keyword::When) {
            return self.parse_when_expr(position);
        }
        if self.eat_keyword(Keyword::Loop) {
            return self.parse_loop_expr(position);
        }
        if self.eat_keyword(Keyword::Break) {
            return Ok(Expr::Break(position));
        }
        if self.eat_keyword(Keyword::With) {
            return self.parse_with_expr(position);
        }
        if self.peek().kind == TokenKind::Name {
            return self.parse_name_or_call(position);
        }

        self.error(format!("unrecognized syntax near {:?}", self.peek().kind))
    }

    fn parse_integer_literal(&mut self, position: Position) -> SyntaxResult<Expr> {
        let tok = self.advance();
        let ty = hint_to_vartype(tok.type_hint);
        match tok.value {
            TokenValue::Int(n) => Ok(Expr::Constant(Literal::Int(n), ty, position)),
            TokenValue::UInt(n) => Ok(Expr::Constant(Literal::UInt(n), ty, position)),
            _ => unreachable!("Integer token always carries Int/UInt value"),
        }
    }

    fn parse_float_literal(&mut self, position: Position) -> SyntaxResult<Expr> {
        let tok = self.advance();
        let ty = hint_to_vartype(tok.type_hint);
        match tok.value {
            TokenValue::Float(v) => Ok(Expr::Constant(Literal::float(v), ty, position)),
            _ => unreachable!("Float token always carries a Float value"),
        }
    }

    fn parse_hex_literal(&mut self, position: Position) -> SyntaxResult<Expr> {
        let tok = self.advance();
        match tok.value {
            TokenValue::Hex { value, bits: 1, signed: _ } => {
                Ok(Expr::Constant(Literal::Bool(value != 0), VarType::named("bool"), position))
            }
            TokenValue::Hex { value, bits, signed } => {
                let type_name = format!("{}{}", if signed { "i" } else { "u" }, bits);
                Ok(Expr::Constant(Literal::UInt(value), VarType::named(type_name), position))
            }
            _ => unreachable!("Hex token always carries a Hex value"),
        }
    }

    fn parse_string_literal(&mut self, position: Position) -> SyntaxResult<Expr> {
        let tok = self.advance();
        match tok.value {
            TokenValue::Bytes(bytes) => Ok(Expr::String(bytes, VarType::named("string"), position)),
            _ => unreachable!("String token always carries a Bytes value"),
        }
    }

    fn parse_array_literal(&mut self, position: Position) -> SyntaxResult<Expr> {
        self.expect_punct('[')?;
        let mut elements = Vec::new();
        if !self.check_punct(']') {
            loop {
                elements.push(self.parse_expr()?);
                if !self.eat_punct(',') {
                    break;
                }
            }
        }
        self.expect_punct(']')?;
        Ok(Expr::Array(elements, position))
    }

    fn parse_expression_block(&mut self) -> SyntaxResult<Expr> {
        let position = self.position();
        self.expect_punct('{')?;
        let mut exprs = Vec::new();
        while !self.check_punct('}') {
            exprs.push(self.parse_expr()?);
            self.eat_punct(';');
        }
        self.expect_punct('}')?;
        Ok(Expr::ExpressionBlock(exprs, position))
    }

    /// A block if one follows, otherwise a single expression — used for
    /// the bodies of `def`, `if`/`when` branches, and `loop`.
    pub(crate) fn parse_block(&mut self) -> SyntaxResult<Expr> {
        if self.check_punct('{') {
            self.parse_expression_block()
        } else {
            self.parse_expr()
        }
    }

    fn parse_if_expr(&mut self, position: Position) -> SyntaxResult<Expr> {
        let cond = self.parse_expr()?;
        self.eat_keyword(Keyword::Then);
        let then_branch = self.parse_block()?;
        if !self.eat_keyword(Keyword::Else) {
            return self.error("'if' requires an 'else' branch");
        }
        let else_branch = self.parse_block()?;
        Ok(Expr::IfExpr(Box::new(cond), Box::new(then_branch), Box::new(else_branch), position))
    }

    fn parse_when_expr(&mut self, position: Position) -> SyntaxResult<Expr> {
        let cond = self.parse_expr()?;
        self.eat_keyword(Keyword::Then);
        let then_branch = self.parse_block()?;
        let else_branch = if self.eat_keyword(Keyword::Else) {
            Some(Box::new(self.parse_block()?))
        } else {
            None
        };
        Ok(Expr::WhenExpr(Box::new(cond), Box::new(then_branch), else_branch, position))
    }

    /// `loop (init, cond, step) body` or `loop body` (infinite).
    fn parse_loop_expr(&mut self, position: Position) -> SyntaxResult<Expr> {
        let header = if self.eat_punct('(') {
            let init = if self.check_punct(',') { None } else { Some(Box::new(self.parse_expr()?)) };
            self.expect_punct(',')?;
            let cond = if self.check_punct(',') { None } else { Some(Box::new(self.parse_expr()?)) };
            self.expect_punct(',')?;
            let step = if self.check_punct(')') { None } else { Some(Box::new(self.parse_expr()?)) };
            self.expect_punct(')')?;
            Some(LoopHeader { init, cond, step })
        } else {
            None
        };
        let body = self.parse_block()?;
        Ok(Expr::LoopExpr(header, Box::new(body), position))
    }

    fn parse_with_expr(&mut self, position: Position) -> SyntaxResult<Expr> {
        let names = self.parse_name_binding_list()?;
        let body = self.parse_block()?;
        Ok(Expr::WithExpr(names, Box::new(body), position))
    }

    fn parse_name_or_call(&mut self, position: Position) -> SyntaxResult<Expr> {
        let name = self.expect_name()?;
        if !self.check_punct('(') {
            return Ok(Expr::Name(NameNode::reference(name, position)));
        }
        let args = self.parse_call_args()?;
        Ok(Expr::Call(name, args, None, position))
    }

    fn parse_call_args(&mut self) -> SyntaxResult<Vec<Argument>> {
        self.expect_punct('(')?;
        let mut args = Vec::new();
        if !self.check_punct(')') {
            loop {
                let position = self.position();
                let value = self.parse_expr()?;
                args.push(Argument {
                    name: String::new(),
                    declared_type: VarType::unset(),
                    default: Some(Box::new(value)),
                    position,
                });
                if !self.eat_punct(',') {
                    break;
                }
            }
        }
        self.expect_punct(')')?;
        Ok(args)
    }
}

fn hint_to_vartype(hint: Option<akic_lex::TypeHint>) -> VarType {
    use akic_lex::TypeHint;
    match hint {
        Some(TypeHint::I32) => VarType::named("i32"),
        Some(TypeHint::I64) => VarType::named("i64"),
        Some(TypeHint::U32) => VarType::named("u32"),
        Some(TypeHint::U64) => VarType::named("u64"),
        Some(TypeHint::F32) => VarType::named("f32"),
        Some(TypeHint::F64) => VarType::named("f64"),
        Some(TypeHint::Byte) => VarType::named("byte"),
        Some(TypeHint::Bool) => VarType::named("bool"),
        None => VarType::unset(),
    }
}
