//! Error types for the error log.

use thiserror::Error;

/// Errors that can occur while storing or retrieving error records.
#[derive(Debug, Error)]
pub enum ErrorLogError {
    /// An argument was outside its accepted range or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A shared memory log was requested with a capacity that differs from
    /// the one it was first created with.
    #[error("shared memory log already has capacity {existing}, requested {requested}")]
    CapacityConflict {
        /// Capacity the shared log was created with.
        existing: usize,
        /// Capacity asked for by the later caller.
        requested: usize,
    },

    /// The registry was configured after its log had already been resolved.
    #[error("error log registry already initialized")]
    AlreadyInitialized,

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ErrorLogError {
    /// Shorthand for an [`ErrorLogError::InvalidArgument`].
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result type alias for error log operations.
pub type Result<T> = std::result::Result<T, ErrorLogError>;
