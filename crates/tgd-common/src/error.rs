//! Error types for TGD

use thiserror::Error;

/// Result type alias for TGD operations
pub type Result<T> = std::result::Result<T, TgdError>;

/// Main error type for TGD
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TgdError {
    #[error("Invalid length filter '{0}': expected short, medium or long")]
    InvalidLengthFilter(String),

    #[error("Invalid limit {0}: must not be negative")]
    InvalidLimit(i64),

    #[error("Configuration error: {0}")]
    Config(String),
}
