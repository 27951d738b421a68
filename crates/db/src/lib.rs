//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - A generic CRUD repository plus the media repository built on it
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{CrudError, CrudRepository, MediaRepository};
pub use sea_orm::DatabaseConnection;

use std::time::Duration;

use memeshare_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DbErr};

/// Establishes a pooled connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    Database::connect(options).await
}
