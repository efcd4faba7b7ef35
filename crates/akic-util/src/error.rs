//! Shared error taxonomy.
//!
//! `SyntaxError` lives here because both `akic-lex` and `akic-par` raise it.
//! `CodegenError`/`CodegenWarning` are crate-local to `akic-gen` (they carry
//! codegen-specific payloads); `InternalError` is likewise crate-local to
//! whichever crate can observe the violated invariant.

use thiserror::Error;

use crate::position::Position;

/// Lex/parse failure. Terminal for the whole input — there is no error
/// recovery, so the first one found wins.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub position: Position,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    pub fn render(&self) -> String {
        self.position.format_diagnostic(&self.message)
    }
}

pub type SyntaxResult<T> = std::result::Result<T, SyntaxError>;
