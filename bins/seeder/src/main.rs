//! Sample data loader for Memeshare development.
//!
//! Drops and recreates the schema, then records three sample memes under the
//! configured public URL and bucket. Only metadata is written; the objects are
//! expected to be in the bucket already.
//!
//! Usage: cargo run --bin seeder

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memeshare_core::media::{MediaRepository as _, NewMedia};
use memeshare_core::storage::StorageService;
use memeshare_db::MediaRepository;
use memeshare_db::migration::{Migrator, MigratorTrait};
use memeshare_shared::AppConfig;

/// Object key and description of each sample meme.
const SAMPLES: [(&str, &str); 3] = [
    ("images.jpg", "Котомем_1"),
    ("images2.jpg", "Котомем_2"),
    (
        "cat-guys-have-bad-news-theronswag-woke-up-again.png",
        "Котомем_3",
    ),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memeshare=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    let db = memeshare_db::connect(&config.database).await?;
    info!("Connected to database");

    Migrator::fresh(&db).await?;
    info!("Schema recreated");

    let storage = StorageService::from_config(config.storage)?;
    let repo = MediaRepository::new(db);
    for (key, description) in SAMPLES {
        let media = repo
            .create(NewMedia {
                url: storage.object_url(key),
                description: description.to_string(),
            })
            .await?;
        info!(id = media.id, url = %media.url, "Seeded meme");
    }

    info!(count = SAMPLES.len(), "Database was populated");
    Ok(())
}
