//! Storage error types.

/// Errors from snapshot store reads.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A storage operation failed.
    #[error("storage error: {0}")]
    Internal(String),

    /// The backing file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the backing file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backing document is not a key/value object.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The key is invalid.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
