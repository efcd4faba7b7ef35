//! Diagnostic severity levels.

use std::fmt;

/// Severity of a [`super::Diagnostic`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Terminal for the whole input (lex/parse) or for the current
    /// top-level item (codegen).
    Error,
    /// Non-fatal; printed unless suppressed.
    Warning,
}

impl Level {
    pub fn is_error(&self) -> bool {
        matches!(self, Level::Error)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}
