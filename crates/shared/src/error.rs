//! Application-wide error types.

use thiserror::Error;

/// Client-facing `detail` messages shared by the storage service and the
/// gateway.
pub mod detail {
    /// Empty list page or unknown id on read.
    pub const OBJECT_NOT_FOUND: &str = "Object not found.";
    /// Unknown id on update.
    pub const ENTRY_DOES_NOT_EXIST: &str = "This entry does not exist";
    /// Unknown id on delete.
    pub const ENTRY_NOT_FOUND: &str = "Entry not found.";
    /// Duplicate URL or description.
    pub const UNIQUE_VIOLATION: &str = "Unique constraint violated: data already exists.";
    /// Any other persistence failure.
    pub const DATABASE_ERROR: &str = "Database error occurred.";
    /// Object store unreachable or rejected the upload.
    pub const UPLOAD_FAILED: &str = "Failed to upload file to storage";
    /// Upload without bytes.
    pub const EMPTY_UPLOAD: &str = "Uploaded file is empty";
    /// Downstream service failed or timed out.
    pub const SERVICE_UNAVAILABLE: &str = "Service is unavailable";
    /// Confirmation body of a successful delete.
    pub const DELETED: &str = "Media successfully deleted.";
}

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// The inner string is the user-facing message placed in the `detail` field of
/// error responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed request payload (e.g., empty upload).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Request parameters outside their accepted range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Conflict (e.g., duplicate entry).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Remote dependency unreachable or timed out.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::InvalidInput(_) => 422,
            Self::Conflict(_) => 409,
            Self::UpstreamUnavailable(_) => 504,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for logs and metrics.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the message shown to clients.
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::InvalidInput(msg)
            | Self::Conflict(msg)
            | Self::Database(msg)
            | Self::UpstreamUnavailable(msg)
            | Self::Internal(msg) => msg,
        }
    }
}
