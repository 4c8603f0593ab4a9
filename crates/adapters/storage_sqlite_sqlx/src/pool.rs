//! Opening the rule database.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StorageError;

/// Where the rule database lives.
pub struct Config {
    /// `sqlx` `SQLite` URL, e.g. `sqlite:rulekeeper.db?mode=rwc` or `sqlite::memory:`.
    pub database_url: String,
}

impl Config {
    /// Open the database and bring its schema up to date.
    ///
    /// A missing database file is created.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the URL is invalid, the connection fails or
    /// a migration cannot be applied.
    pub async fn build(self) -> Result<Database, StorageError> {
        let pool = open_pool(&self.database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::debug!(url = %self.database_url, "rule schema up to date");
        Ok(Database { pool })
    }
}

/// An in-memory database is dropped with its last connection, so it is held
/// by a single connection that never expires.
async fn open_pool(url: &str) -> Result<SqlitePool, StorageError> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(|source| StorageError::InvalidUrl {
            url: url.to_string(),
            source,
        })?
        .create_if_missing(true);

    let pool = if url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new().connect_with(options).await?
    };
    Ok(pool)
}

/// Migrated connection pool, shared by the stores built on it.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
