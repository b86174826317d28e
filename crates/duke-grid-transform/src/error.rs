//! Transform error types

use thiserror::Error;

/// Result type for transform operations
pub type TransformResult<T> = std::result::Result<T, TransformError>;

/// Errors that can occur when running a transform
///
/// The grid passed in is left untouched on every error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// Grid is empty or not rectangular
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Find and replace was given nothing to find
    #[error("Find text must not be empty")]
    EmptyFind,

    /// Find text too large to compile into a matcher
    #[error("Invalid find pattern: {0}")]
    Pattern(#[from] regex::Error),
}
