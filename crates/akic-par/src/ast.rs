//! AST node definitions.
//!
//! Every node carries a [`Position`] so codegen diagnostics can point back
//! at source. The tree is built once by the parser and never mutated.

use akic_util::Position;

pub type Ast = Vec<TopLevel>;

/// A source-level type expression, as written by the programmer. Resolved
/// to a canonical registry type during codegen.
#[derive(Debug, Clone, PartialEq)]
pub enum VarType {
    /// `NAME`, or unset (the parser had nothing to put here — resolved
    /// later, e.g. `var x = 1` with no `: type` annotation).
    Name(Option<String>),
    Ptr(Box<VarType>),
    Func(Vec<VarType>, Box<VarType>),
    /// `array ELEM [N]`. `N == 0` means the length is fixed from the
    /// initializer at the declaration site.
    Array(Box<VarType>, u64),
}

impl VarType {
    pub fn unset() -> Self {
        VarType::Name(None)
    }

    pub fn named(name: impl Into<String>) -> Self {
        VarType::Name(Some(name.into()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    Int(i64),
    UInt(u64),
    Float(u64), // bit pattern of an f64, so Eq/Hash stay derivable
    Bool(bool),
}

impl Literal {
    pub fn float(value: f64) -> Self {
        Literal::Float(value.to_bits())
    }

    pub fn as_float(self) -> Option<f64> {
        match self {
            Literal::Float(bits) => Some(f64::from_bits(bits)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    IDiv,
    BitAnd,
    BitOr,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

/// One `name [: type] [= init]` binding — the element type of `var`/`with`
/// lists, and (with `initializer`/`declared_type` unset) a plain reference
/// to a name in expression position.
#[derive(Debug, Clone)]
pub struct NameNode {
    pub id: String,
    pub initializer: Option<Box<Expr>>,
    pub declared_type: VarType,
    pub position: Position,
}

impl NameNode {
    pub fn reference(id: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            initializer: None,
            declared_type: VarType::unset(),
            position,
        }
    }
}

/// A formal parameter (in a `Prototype`) or an actual argument (in a
/// `Call`) — both share `name`/`declared_type`/optional default.
#[derive(Debug, Clone)]
pub struct Argument {
    pub name: String,
    pub declared_type: VarType,
    pub default: Option<Box<Expr>>,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct LoopHeader {
    pub init: Option<Box<Expr>>,
    pub cond: Option<Box<Expr>>,
    pub step: Option<Box<Expr>>,
}

#[derive(Debug, Clone)]
pub enum Expr {
    Constant(Literal, VarType, Position),
    String(Vec<u8>, VarType, Position),
    /// `[e, e, …]` — an array initializer. Length-checking against the
    /// declared `VarType::Array` length happens in codegen.
    Array(Vec<Expr>, Position),
    Name(NameNode),
    UnOp(UnOp, Box<Expr>, Position),
    BinOp(BinOp, Box<Expr>, Box<Expr>, Position),
    BinOpComparison(CmpOp, Box<Expr>, Box<Expr>, Position),
    Call(String, Vec<Argument>, Option<VarType>, Position),
    /// Dotted member access, left to right: `a.b.c` -> `[a, b, c]`.
    ChainExpr(Vec<Expr>, Position),
    RefExpr(Box<Expr>, Position),
    DerefExpr(Box<Expr>, Position),
    VarList(Vec<NameNode>, Position),
    /// Already desugared: `a += b` becomes `Assignment(a, BinOp(Add, a, b))`
    /// in the parser, so codegen never sees a compound-assign operator.
    Assignment(Box<Expr>, Box<Expr>, Position),
    ExpressionBlock(Vec<Expr>, Position),
    /// `if` always carries an `else` — the parser rejects one without.
    IfExpr(Box<Expr>, Box<Expr>, Box<Expr>, Position),
    WhenExpr(Box<Expr>, Box<Expr>, Option<Box<Expr>>, Position),
    /// `None` header = infinite loop (`loop { ... }`).
    LoopExpr(Option<LoopHeader>, Box<Expr>, Position),
    Break(Position),
    WithExpr(Vec<NameNode>, Box<Expr>, Position),
}

impl Expr {
    pub fn position(&self) -> &Position {
        match self {
            Expr::Constant(_, _, p)
            | Expr::String(_, _, p)
            | Expr::Array(_, p)
            | Expr::UnOp(_, _, p)
            | Expr::BinOp(_, _, _, p)
            | Expr::BinOpComparison(_, _, _, p)
            | Expr::Call(_, _, _, p)
            | Expr::ChainExpr(_, p)
            | Expr::RefExpr(_, p)
            | Expr::DerefExpr(_, p)
            | Expr::VarList(_, p)
            | Expr::Assignment(_, _, p)
            | Expr::ExpressionBlock(_, p)
            | Expr::IfExpr(_, _, _, p)
            | Expr::WhenExpr(_, _, _, p)
            | Expr::LoopExpr(_, _, p)
            | Expr::Break(p)
            | Expr::WithExpr(_, _, p) => p,
            Expr::Name(n) => &n.position,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Prototype {
    pub name: String,
    pub args: Vec<Argument>,
    pub return_type: VarType,
    pub position: Position,
    /// Decorator names active when this declaration was parsed
    /// (`inline`, `noinline`, `varfunc`, `track`).
    pub decorators: Vec<String>,
    /// Whether `name` is a built-in operator symbol (`def +(a, b) ...`).
    pub is_operator: bool,
}

#[derive(Debug, Clone)]
pub struct Function {
    pub proto: Prototype,
    pub body: Expr,
}

#[derive(Debug, Clone)]
pub struct External {
    pub proto: Prototype,
}

#[derive(Debug, Clone)]
pub enum TopLevel {
    Function(Function),
    External(External),
    Uniform(Vec<NameNode>),
    Pragma(String, Position),
    /// A bare top-level expression, lifted into an anonymous function by
    /// a REPL or similar external collaborator; the core just hands it
    /// back as-is.
    Expression(Expr),
}
