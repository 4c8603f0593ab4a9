//! Failures of the `SQLite` rule store.

use rulekeeper_domain::error::RuleKeeperError;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The connection URL is not understood by the `SQLite` driver.
    #[error("invalid database url `{url}`")]
    InvalidUrl {
        url: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("rule store query failed")]
    Query(#[from] sqlx::Error),
    /// Conditions or actions could not be written as JSON.
    #[error("unable to encode rule {part}")]
    Encode {
        part: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("schema migration failed")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Callers only see an opaque storage failure; the cause stays attached as
/// the error source.
impl From<StorageError> for RuleKeeperError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
