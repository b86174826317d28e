//! Error types for duke-grid-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in duke-grid-core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid A1-style cell address
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Invalid A1-style cell range
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// Invalid `"{row}-{col}"` store key
    #[error("Invalid cell key: {0}")]
    InvalidCellKey(String),
}
