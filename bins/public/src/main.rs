//! Memeshare public gateway.
//!
//! Serves `/memes` and forwards every call to the storage service.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memeshare_gateway::{GatewayState, create_router};
use memeshare_shared::GatewayConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memeshare=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::load()?;

    let state = GatewayState::from_config(&config.upstream)?;
    info!(
        upstream = state.storage.base_url(),
        timeout_secs = config.upstream.timeout_secs,
        "Storage service client configured"
    );

    let app = create_router(state);

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Gateway listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
