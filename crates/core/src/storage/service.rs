//! Storage service implementation using Apache OpenDAL.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use opendal::{ErrorKind, Operator, services};
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use super::error::StorageError;
use memeshare_shared::config::{StorageConfig, StorageProvider};

/// Presigned URL for a direct upload.
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned URL.
    pub url: String,
    /// HTTP method to use (PUT).
    pub method: String,
    /// How long the URL stays valid.
    pub expires_in: Duration,
    /// Headers to send with the request.
    pub headers: HashMap<String, String>,
}

/// Storage service for uploaded media.
pub struct StorageService {
    operator: Operator,
    http: reqwest::Client,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider, &config.bucket)?;
        Ok(Self {
            operator,
            http: reqwest::Client::new(),
            config,
        })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider, bucket: &str) -> Result<Operator, StorageError> {
        let operator = match provider {
            StorageProvider::S3 {
                endpoint,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);
                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::LocalFs { root } => {
                let root = root
                    .to_str()
                    .ok_or_else(|| StorageError::configuration("invalid path"))?;
                Operator::new(services::Fs::default().root(root))
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::Memory => Operator::new(services::Memory::default())
                .map_err(|e| StorageError::configuration(e.to_string()))?
                .finish(),
        };
        Ok(operator)
    }

    /// Derive the storage key for an uploaded file.
    ///
    /// The base name (stem + extension) is reused verbatim; directory
    /// components sent by the client are dropped. Uploads sharing a file
    /// name map to the same key.
    ///
    /// # Errors
    ///
    /// Returns an error if the file name has no usable base name.
    pub fn object_key(file_name: &str) -> Result<String, StorageError> {
        let base = file_name.rsplit(['/', '\\']).next().unwrap_or_default();
        if base.trim().is_empty() || base == "." || base == ".." {
            return Err(StorageError::invalid_key(file_name));
        }
        Ok(base.to_string())
    }

    /// Fully-qualified public URL of an object: `{public_url}/{bucket}/{key}`.
    #[must_use]
    pub fn object_url(&self, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.public_url.trim_end_matches('/'),
            self.config.bucket,
            key
        )
    }

    /// Whether the backend can hand out presigned upload URLs.
    #[must_use]
    pub fn supports_presign(&self) -> bool {
        self.operator.info().full_capability().presign_write
    }

    /// Generate a time-limited presigned PUT URL for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if presigning is not supported or fails.
    pub async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
    ) -> Result<PresignedUrl, StorageError> {
        let ttl = Duration::from_secs(self.config.presign_upload_ttl_secs);
        let presigned = self.operator.presign_write(key, ttl).await?;

        let mut headers: HashMap<String, String> = presigned
            .header()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        headers.insert(CONTENT_TYPE.as_str().to_string(), content_type.to_string());

        Ok(PresignedUrl {
            url: presigned.uri().to_string(),
            method: presigned.method().to_string(),
            expires_in: ttl,
            headers,
        })
    }

    /// Upload raw bytes under `key`.
    ///
    /// S3-compatible backends receive the bytes through a presigned PUT URL;
    /// backends without presigning are written through the operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the object store is unreachable or rejects the
    /// upload.
    pub async fn upload(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let size = data.len();

        if self.supports_presign() {
            let presigned = self.presign_upload(key, content_type).await?;
            let mut request = self.http.put(&presigned.url);
            for (name, value) in &presigned.headers {
                request = request.header(name.as_str(), value.as_str());
            }
            request.body(data).send().await?.error_for_status()?;
        } else {
            self.operator
                .write_with(key, data)
                .content_type(content_type)
                .await?;
        }

        debug!(key, size, content_type, "Object uploaded");
        Ok(())
    }

    /// Delete a file from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.operator.delete(key).await.map_err(StorageError::from)
    }

    /// Check if a file exists in storage.
    pub async fn exists(&self, key: &str) -> bool {
        match self.operator.stat(key).await {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                debug!(key, error = %e, "Stat failed");
                false
            }
        }
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}
