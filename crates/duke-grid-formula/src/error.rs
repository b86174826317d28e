//! Formula error types

use std::fmt;
use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing or evaluation
///
/// None of these are fatal: callers turn them into a display code with
/// [`FormulaError::display_code`] and keep going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// Formula text does not match the supported grammar
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// A cell reference does not parse or is out of bounds
    #[error("Range error: {0}")]
    Range(String),

    /// The function needs at least one numeric value and found none
    #[error("Value error: {0}")]
    Value(String),
}

impl FormulaError {
    /// The category of this error
    pub fn kind(&self) -> FormulaErrorKind {
        match self {
            FormulaError::Syntax(_) => FormulaErrorKind::Syntax,
            FormulaError::Range(_) => FormulaErrorKind::Range,
            FormulaError::Value(_) => FormulaErrorKind::Value,
        }
    }

    /// The code shown in a cell, e.g. `#VALUE_ERROR`
    pub fn display_code(&self) -> String {
        self.kind().to_string()
    }
}

/// Error categories, each with a stable code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormulaErrorKind {
    /// `SYNTAX_ERROR`
    Syntax,
    /// `RANGE_ERROR`
    Range,
    /// `VALUE_ERROR`
    Value,
}

impl FormulaErrorKind {
    /// The bare code, without the `#` prefix
    pub fn code(&self) -> &'static str {
        match self {
            FormulaErrorKind::Syntax => "SYNTAX_ERROR",
            FormulaErrorKind::Range => "RANGE_ERROR",
            FormulaErrorKind::Value => "VALUE_ERROR",
        }
    }
}

impl fmt::Display for FormulaErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.code())
    }
}
