//! CLI error types.

use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// The error log rejected the request.
    #[error(transparent)]
    Log(#[from] faultlog::ErrorLogError),
    /// No error with the requested identifier.
    #[error("error not found: {0}")]
    NotFound(String),
    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
