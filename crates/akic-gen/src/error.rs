//! Code generation errors and warnings.
//!
//! Split the way `akic-util::error` splits `SyntaxError` out: these two
//! types are crate-local because only `akic-gen` can observe them.

use akic_util::Position;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("{0}")]
    TypeMismatch(String),

    #[error("type mapping error: {0}")]
    TypeMappingError(String),

    #[error("'{0}' is already defined in this scope")]
    Redefinition(String),

    #[error("no symbol named '{0}'")]
    UnknownSymbol(String),

    #[error("no function '{name}' matches the given argument types")]
    NoMatchingOverload { name: String },

    #[error("conflicting decorators: {0}")]
    DecoratorConflict(String),

    #[error("invalid pragma: {0}")]
    InvalidPragma(String),

    #[error("array initializer has {given} elements, which overflows the declared length {declared}")]
    ArrayOverflow { given: u64, declared: u64 },

    #[error("redefinition of '{name}' changes argument count from {old} to {new}")]
    ArgumentCountMismatch { name: String, old: usize, new: usize },

    #[error("'when' without 'else' cannot be used where a value is required")]
    WhenRequiresElseInValuePosition,

    #[error("'break' used outside of a loop")]
    BreakOutsideLoop,

    #[error("LLVM operation failed: {0}")]
    LlvmOperationFailed(String),

    #[error("internal compiler error: {0}")]
    Internal(String),
}

impl CodegenError {
    pub fn render(&self, position: &Position) -> String {
        position.format_diagnostic(&self.to_string())
    }
}

/// Non-fatal: array initializers shorter than the declared length. Printed
/// unless suppressed, never aborts the top-level item being generated.
#[derive(Debug, Error)]
#[error("array initializer has {given} elements, padding with {} zero(es) to reach {declared}", declared - given)]
pub struct CodegenWarning {
    pub given: u64,
    pub declared: u64,
}

pub type Result<T> = std::result::Result<T, CodegenError>;
