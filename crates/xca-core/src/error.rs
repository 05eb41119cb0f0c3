//! Centralized error types for XCA.

use thiserror::Error;

/// Main error type for XCA core operations.
#[derive(Error, Debug)]
pub enum XcaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for XCA core operations.
pub type XcaResult<T> = Result<T, XcaError>;

impl XcaError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
