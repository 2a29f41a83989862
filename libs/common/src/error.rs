//! Custom error types for the common library
//!
//! These errors describe failures inside a storage backend. They never reach
//! callers of [`crate::storage::LocalStorage`], which absorbs them.

use thiserror::Error;

/// Error raised by a key-value storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the underlying medium failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded or decoded as JSON
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The key cannot be mapped onto the backend
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Type alias for Result with StorageError
pub type StorageResult<T> = Result<T, StorageError>;
