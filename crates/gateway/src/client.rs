//! HTTP client for the storage service.

use std::time::Duration;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::GatewayError;
use memeshare_shared::config::UpstreamConfig;

/// Raw answer from the storage service.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Bytes,
}

impl UpstreamReply {
    /// Parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns `Decode` if the body is not valid JSON.
    pub fn json(&self) -> Result<Value, GatewayError> {
        serde_json::from_slice(&self.body).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    /// The `detail` field of an error body, if any.
    #[must_use]
    pub fn detail(&self) -> Option<Value> {
        let mut body = self.json().ok()?;
        body.get_mut("detail").map(Value::take)
    }
}

/// A file forwarded to the storage service.
#[derive(Debug, Clone)]
pub struct ForwardedFile {
    /// Client file name.
    pub file_name: String,
    /// Declared content type.
    pub content_type: Option<String>,
    /// File bytes.
    pub data: Bytes,
}

/// Storage service client.
#[derive(Debug, Clone)]
pub struct StorageClient {
    http: reqwest::Client,
    base_url: String,
}

impl StorageClient {
    /// Multipart part carrying the file on the storage service.
    pub const FILE_FIELD: &'static str = "media_data";
    /// Multipart part carrying the description on the storage service.
    pub const DESCRIPTION_FIELD: &'static str = "media_description";

    /// Create a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the storage service base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<UpstreamReply, GatewayError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        debug!(status, size = body.len(), "Storage service replied");
        Ok(UpstreamReply { status, body })
    }

    /// GET `/media?skip=&limit=`
    pub async fn list(&self, skip: i64, limit: i64) -> Result<UpstreamReply, GatewayError> {
        let request = self
            .http
            .get(self.url("/media"))
            .query(&[("skip", skip), ("limit", limit)]);
        self.send(request).await
    }

    /// GET `/media/{id}`
    pub async fn get(&self, id: i32) -> Result<UpstreamReply, GatewayError> {
        self.send(self.http.get(self.url(&format!("/media/{id}"))))
            .await
    }

    /// POST `/media` as multipart.
    pub async fn create(
        &self,
        file: &ForwardedFile,
        description: String,
    ) -> Result<UpstreamReply, GatewayError> {
        let form = Form::new()
            .part(Self::FILE_FIELD, file_part(file))
            .text(Self::DESCRIPTION_FIELD, description);

        self.send(self.http.post(self.url("/media")).multipart(form))
            .await
    }

    /// PUT `/media/{id}` with a JSON body.
    pub async fn update(&self, id: i32, body: &Value) -> Result<UpstreamReply, GatewayError> {
        self.send(self.http.put(self.url(&format!("/media/{id}"))).json(body))
            .await
    }

    /// DELETE `/media/{id}`
    pub async fn delete(&self, id: i32) -> Result<UpstreamReply, GatewayError> {
        self.send(self.http.delete(self.url(&format!("/media/{id}"))))
            .await
    }
}

fn file_part(file: &ForwardedFile) -> Part {
    let part = || Part::stream(file.data.clone()).file_name(file.file_name.clone());
    match &file.content_type {
        Some(content_type) => part().mime_str(content_type).unwrap_or_else(|_| {
            warn!(%content_type, "Dropping unparsable content type");
            part()
        }),
        None => part(),
    }
}
