//! Error types for the termin ecosystem.

use thiserror::Error;

/// Errors that can occur in termin operations.
#[derive(Error, Debug)]
pub enum TerminError {
    /// A mutating operation was attempted without a signed-in identity.
    #[error("Not signed in")]
    Auth,

    #[error("Store error: {0}")]
    Store(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for termin operations.
pub type TerminResult<T> = Result<T, TerminError>;
