//! Media error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Media operation errors.
#[derive(Debug, Error)]
pub enum MediaError {
    /// No record with the given id.
    #[error("media not found: {0}")]
    NotFound(i32),

    /// The requested list page holds no records.
    #[error("no media in the requested range")]
    EmptyPage,

    /// Insert or update violated a uniqueness constraint.
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    /// Uploaded payload has no bytes.
    #[error("uploaded file is empty")]
    EmptyUpload,

    /// Object storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl MediaError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }

    /// Create a conflict error.
    #[must_use]
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
