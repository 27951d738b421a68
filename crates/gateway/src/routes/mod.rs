//! Gateway route definitions.

use axum::Router;

use crate::GatewayState;

pub mod health;
pub mod memes;

/// Creates the gateway router with all routes.
pub fn gateway_routes() -> Router<GatewayState> {
    Router::new().merge(health::routes()).merge(memes::routes())
}
