//! Snapshot validation errors.

use thiserror::Error;

/// Reasons a stored snapshot was rejected.
///
/// These never reach the widget surface; the slot mapper collapses every
/// variant into the same error text. They exist so the dispatcher can log
/// what was wrong with the payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// The payload is not well-formed JSON.
    #[error("malformed snapshot: {0}")]
    Malformed(String),

    /// A required field is missing or null.
    #[error("missing field: {path}")]
    MissingField {
        /// Dotted path of the missing field.
        path: String,
    },

    /// A field is present but has the wrong shape.
    #[error("field {path} must be {expected}")]
    WrongType {
        /// Dotted path of the offending field.
        path: String,
        /// What the field should have been.
        expected: &'static str,
    },

    /// The store holding the snapshot could not be read.
    #[error("snapshot store unreadable: {0}")]
    Unreadable(String),
}

/// Result type for snapshot validation.
pub type SnapshotResult<T> = Result<T, SnapshotError>;
