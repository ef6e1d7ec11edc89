//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store errors
///
/// `Clone` so the outcome of the first connect attempt can be cached and
/// handed to every later caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    // Connection errors
    #[error("Database not available: {0} is not set")]
    NotConfigured(&'static str),

    #[error("Unsupported database URL: {0}")]
    UnsupportedUrl(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    // Request errors
    #[error("Invalid collection name: {0:?}")]
    InvalidCollection(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    // Backend errors
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Corrupt record in collection '{collection}' at line {line}: {reason}")]
    Corrupt {
        collection: String,
        line: usize,
        reason: String,
    },

    #[error("Database error: {0}")]
    Backend(String),

    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Whether the error means no connection could be obtained at all
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StoreError::NotConfigured(_)
                | StoreError::UnsupportedUrl(_)
                | StoreError::ConnectionFailed(_)
        )
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}
