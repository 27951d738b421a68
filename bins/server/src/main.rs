//! Memeshare storage service.
//!
//! Owns the metadata database and the object store and serves the private
//! `/media` API.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memeshare_api::{AppState, create_router};
use memeshare_core::storage::StorageService;
use memeshare_db::connect;
use memeshare_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memeshare=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    let db = connect(&config.database).await?;
    info!(max_connections = config.database.max_connections, "Connected to database");

    let storage = StorageService::from_config(config.storage.clone())?;
    info!(
        provider = storage.provider_name(),
        bucket = storage.bucket(),
        public_url = %config.storage.public_url,
        "Object storage configured"
    );

    let app = create_router(AppState::new(db, storage));

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Storage service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
