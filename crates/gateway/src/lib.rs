//! Public meme gateway.
//!
//! Exposes `/memes` to clients and forwards every call to the storage
//! service's `/media` API, translating its failures into stable client-facing
//! messages.

pub mod client;
pub mod error;
pub mod forward;
pub mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use client::StorageClient;
pub use error::GatewayError;

use memeshare_shared::config::UpstreamConfig;

/// Largest accepted request body (multipart uploads included).
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Gateway state shared across handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Storage service client.
    pub storage: Arc<StorageClient>,
}

impl GatewayState {
    /// Builds the state from upstream settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, GatewayError> {
        Ok(Self {
            storage: Arc::new(StorageClient::from_config(config)?),
        })
    }
}

/// Creates the gateway router.
pub fn create_router(state: GatewayState) -> Router {
    Router::new()
        .merge(routes::gateway_routes())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
