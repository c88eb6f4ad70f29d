//! SQLite-backed persistence for pet and application records.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors raised while opening or migrating the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to open the adoption store at {url}")]
    Open {
        url: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("failed to apply store migrations")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Open the configured store, creating the database file on first run, and
/// bring the schema up to date.
pub async fn open(config: &DatabaseConfig) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|source| StoreError::Open {
            url: config.url.clone(),
            source,
        })?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(|source| StoreError::Open {
            url: config.url.clone(),
            source,
        })?;

    crate::migrator().run(&pool).await?;

    info!(url = %config.url, "adoption store ready");
    Ok(pool)
}

/// Open a migrated in-memory store. Capped at a single connection because
/// each SQLite `:memory:` connection is its own database.
pub async fn open_ephemeral() -> Result<SqlitePool, StoreError> {
    const URL: &str = "sqlite::memory:";

    let options = SqliteConnectOptions::from_str(URL)
        .map_err(|source| StoreError::Open {
            url: URL.to_string(),
            source,
        })?
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(|source| StoreError::Open {
            url: URL.to_string(),
            source,
        })?;

    crate::migrator().run(&pool).await?;
    Ok(pool)
}
