//! Storage service HTTP layer with Axum routes.
//!
//! This crate provides:
//! - The `/media` REST routes
//! - Liveness and health endpoints
//! - Error-to-response translation

pub mod error;
pub mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use memeshare_core::media::MediaService;
use memeshare_core::storage::StorageService;
use memeshare_db::{DatabaseConnection, MediaRepository};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Largest accepted request body (multipart uploads included).
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Object storage for uploaded media.
    pub storage: Arc<StorageService>,
    /// Storage orchestrator.
    pub media: Arc<MediaService<MediaRepository>>,
}

impl AppState {
    /// Wires the orchestrator over a database pool and an object store.
    #[must_use]
    pub fn new(db: DatabaseConnection, storage: StorageService) -> Self {
        let storage = Arc::new(storage);
        let repo = Arc::new(MediaRepository::new(db));
        Self {
            media: Arc::new(MediaService::new(storage.clone(), repo)),
            storage,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
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
