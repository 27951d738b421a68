//! Translation of storage service outcomes into gateway responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tracing::{error, info, warn};

use crate::client::UpstreamReply;
use crate::error::GatewayError;
use memeshare_shared::error::detail;

/// Forwarded operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// GET `/memes`
    List,
    /// GET `/memes/{id}`
    Get,
    /// POST `/memes`
    Create,
    /// PUT `/memes/{id}`
    Update,
    /// DELETE `/memes/{id}`
    Delete,
}

impl Operation {
    /// Name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Turn the storage service outcome into the gateway response.
    pub fn respond(self, outcome: Result<UpstreamReply, GatewayError>) -> Response {
        match outcome {
            Ok(reply) => self.relay(&reply),
            Err(err) => self.failure(&err),
        }
    }

    fn relay(self, reply: &UpstreamReply) -> Response {
        let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);

        if status.is_success() {
            return match reply.json() {
                Ok(body) => {
                    info!(op = self.name(), status = status.as_u16(), "Forwarded");
                    (status, Json(body)).into_response()
                }
                Err(err) => self.failure(&err),
            };
        }

        if status.is_client_error() {
            let detail = self.client_error_detail(status, reply);
            warn!(op = self.name(), status = status.as_u16(), %detail, "Storage service rejected request");
            return detail_response(status, detail);
        }

        error!(op = self.name(), status = status.as_u16(), "Storage service failed");
        detail_response(status, detail::SERVICE_UNAVAILABLE)
    }

    /// Reads and deletes answer an unknown id with a fixed message.
    fn fixed_not_found(self) -> Option<&'static str> {
        match self {
            Self::List | Self::Get => Some(detail::OBJECT_NOT_FOUND),
            Self::Delete => Some(detail::ENTRY_NOT_FOUND),
            Self::Create | Self::Update => None,
        }
    }

    fn client_error_detail(self, status: StatusCode, reply: &UpstreamReply) -> Value {
        if status == StatusCode::NOT_FOUND
            && let Some(message) = self.fixed_not_found()
        {
            return Value::from(message);
        }
        reply
            .detail()
            .unwrap_or_else(|| Value::from(self.default_detail(status)))
    }

    fn default_detail(self, status: StatusCode) -> &'static str {
        match status {
            StatusCode::NOT_FOUND if self == Self::Update => detail::ENTRY_DOES_NOT_EXIST,
            StatusCode::CONFLICT => "Conflict",
            _ => status.canonical_reason().unwrap_or("Bad Request"),
        }
    }

    fn failure(self, err: &GatewayError) -> Response {
        error!(op = self.name(), error = %err, "Storage service call failed");
        match err {
            GatewayError::Timeout(_) => {
                detail_response(StatusCode::GATEWAY_TIMEOUT, detail::SERVICE_UNAVAILABLE)
            }
            GatewayError::Transport(_) if self == Self::Create => {
                detail_response(StatusCode::GATEWAY_TIMEOUT, detail::UPLOAD_FAILED)
            }
            _ => detail_response(StatusCode::INTERNAL_SERVER_ERROR, detail::SERVICE_UNAVAILABLE),
        }
    }
}

/// `{"detail": ...}` response.
pub fn detail_response(status: StatusCode, detail: impl Into<Value>) -> Response {
    (status, Json(json!({ "detail": detail.into() }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http_body_util::BodyExt;
    use rstest::rstest;

    fn reply(status: u16, body: &'static str) -> Result<UpstreamReply, GatewayError> {
        Ok(UpstreamReply {
            status,
            body: Bytes::from_static(body.as_bytes()),
        })
    }

    async fn render(response: Response) -> (u16, Value) {
        let status = response.status().as_u16();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_success_is_passed_through() {
        let body = r#"{"id": 1, "meme_url": "http://minio:9000/media-storage/a.png", "meme_description": "a"}"#;
        let (status, json) = render(Operation::Get.respond(reply(200, body))).await;
        assert_eq!(status, 200);
        assert_eq!(json["meme_description"], "a");
    }

    #[rstest]
    #[case(Operation::Get, 404, r#"{"detail": "anything"}"#, "Object not found.")]
    #[case(Operation::List, 404, r#"{"detail": "anything"}"#, "Object not found.")]
    #[case(Operation::Delete, 404, r#"{"detail": "anything"}"#, "Entry not found.")]
    #[case(Operation::Update, 404, "", "This entry does not exist")]
    #[case(Operation::Update, 404, r#"{"detail": "This entry does not exist"}"#, "This entry does not exist")]
    #[case(Operation::Create, 409, r#"{"detail": "Unique constraint violated: data already exists."}"#, "Unique constraint violated: data already exists.")]
    #[case(Operation::Create, 409, "not json", "Conflict")]
    #[case(Operation::Create, 400, r#"{"detail": "Uploaded file is empty"}"#, "Uploaded file is empty")]
    #[case(Operation::Update, 422, "", "Unprocessable Entity")]
    #[tokio::test]
    async fn test_client_errors(
        #[case] op: Operation,
        #[case] upstream_status: u16,
        #[case] body: &'static str,
        #[case] expected: &str,
    ) {
        let (status, json) = render(op.respond(reply(upstream_status, body))).await;
        assert_eq!(status, upstream_status);
        assert_eq!(json["detail"], expected);
    }

    #[rstest]
    #[case(500)]
    #[case(503)]
    #[tokio::test]
    async fn test_server_errors_keep_status(#[case] upstream_status: u16) {
        let (status, json) = render(Operation::List.respond(reply(upstream_status, "boom"))).await;
        assert_eq!(status, upstream_status);
        assert_eq!(json, json!({"detail": "Service is unavailable"}));
    }

    #[rstest]
    #[case(Operation::List, GatewayError::Transport("refused".into()), 500, "Service is unavailable")]
    #[case(Operation::Delete, GatewayError::Transport("refused".into()), 500, "Service is unavailable")]
    #[case(Operation::Create, GatewayError::Transport("refused".into()), 504, "Failed to upload file to storage")]
    #[case(Operation::Get, GatewayError::Timeout("slow".into()), 504, "Service is unavailable")]
    #[case(Operation::Create, GatewayError::Timeout("slow".into()), 504, "Service is unavailable")]
    #[case(Operation::Get, GatewayError::Decode("junk".into()), 500, "Service is unavailable")]
    #[tokio::test]
    async fn test_transport_failures(
        #[case] op: Operation,
        #[case] err: GatewayError,
        #[case] expected_status: u16,
        #[case] expected: &str,
    ) {
        let (status, json) = render(op.respond(Err(err))).await;
        assert_eq!(status, expected_status);
        assert_eq!(json["detail"], expected);
    }
}
