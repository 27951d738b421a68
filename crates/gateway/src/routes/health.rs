//! Liveness and health check endpoints.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::GatewayState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

async fn root() -> Json<&'static str> {
    Json("service is working")
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates health check routes.
pub fn routes() -> Router<GatewayState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}
