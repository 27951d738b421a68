//! Error responses.
//!
//! Every failure is rendered as `{"detail": "<message>"}` with the status
//! code of the underlying [`AppError`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

use memeshare_core::media::MediaError;
use memeshare_core::storage::StorageError;
use memeshare_shared::{AppError, error::detail};

/// Handler error wrapper.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(code = self.0.error_code(), error = %self.0, "Request failed");
        } else {
            debug!(code = self.0.error_code(), error = %self.0, "Request rejected");
        }

        (status, Json(json!({ "detail": self.0.detail() }))).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Translate an orchestrator error. `not_found` is the message for an
    /// unknown id, which differs per operation.
    pub fn from_media(err: MediaError, not_found: &str) -> Self {
        let app = match err {
            MediaError::NotFound(_) => AppError::NotFound(not_found.to_string()),
            MediaError::EmptyPage => AppError::NotFound(detail::OBJECT_NOT_FOUND.to_string()),
            MediaError::Conflict(_) => AppError::Conflict(detail::UNIQUE_VIOLATION.to_string()),
            MediaError::EmptyUpload => AppError::Validation(detail::EMPTY_UPLOAD.to_string()),
            MediaError::Storage(StorageError::InvalidKey(name)) => {
                AppError::Validation(format!("Uploaded file has no usable name: {name:?}"))
            }
            MediaError::Storage(e) => {
                error!(error = %e, "Object store operation failed");
                AppError::UpstreamUnavailable(detail::UPLOAD_FAILED.to_string())
            }
            MediaError::Repository(e) => {
                error!(error = %e, "Repository operation failed");
                AppError::Database(detail::DATABASE_ERROR.to_string())
            }
        };
        Self(app)
    }
}
