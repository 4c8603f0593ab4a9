//! Daemon configuration.
//!
//! Settings come from a TOML file, `rulekeeper.toml` in the working directory
//! unless `RULEKEEPER_CONFIG` points elsewhere, and are then overridden by
//! `RULEKEEPER_*` environment variables. The default file may be absent; a file
//! named explicitly must exist.
//!
//! ```toml
//! [http]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [storage]
//! database_url = "sqlite:rules.db?mode=rwc"
//!
//! [log]
//! filter = "rulekeeperd=debug"
//! ```

use std::path::PathBuf;

use serde::Deserialize;

const DEFAULT_FILE: &str = "rulekeeper.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub http: HttpConfig,
    pub storage: StorageConfig,
    pub log: LogConfig,
}

/// Where the JSON API listens.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

/// Where rules are persisted.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// `sqlx` connection URL, `sqlite::memory:` for a throwaway store.
    pub database_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:rulekeeper.db?mode=rwc".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `EnvFilter` directives.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "rulekeeperd=info,rulekeeper_app=info,tower_http=debug".into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unable to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("environment variable {name} has invalid value `{value}`")]
    InvalidVariable { name: &'static str, value: String },
    #[error("http port must not be zero")]
    ZeroPort,
}

impl Config {
    /// Resolve the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, when an override
    /// variable cannot be decoded, or when the result cannot be served.
    pub fn load() -> Result<Self, ConfigError> {
        Self::resolve(|name| std::env::var(name).ok())
    }

    fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup("RULEKEEPER_CONFIG") {
            Some(path) => Self::read(PathBuf::from(path))?,
            None => Self::read(PathBuf::from(DEFAULT_FILE)).or_else(|err| match err {
                ConfigError::Read { source, .. }
                    if source.kind() == std::io::ErrorKind::NotFound =>
                {
                    Ok(Self::default())
                }
                other => Err(other),
            })?,
        };
        config.override_with(&lookup)?;
        if config.http.port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        Ok(config)
    }

    fn read(path: PathBuf) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// `RUST_LOG` takes precedence over `RULEKEEPER_LOG`.
    fn override_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(host) = lookup("RULEKEEPER_HOST") {
            self.http.host = host;
        }
        if let Some(value) = lookup("RULEKEEPER_PORT") {
            self.http.port = value.parse().map_err(|_| ConfigError::InvalidVariable {
                name: "RULEKEEPER_PORT",
                value,
            })?;
        }
        if let Some(url) = lookup("RULEKEEPER_DATABASE_URL") {
            self.storage.database_url = url;
        }
        if let Some(filter) = lookup("RUST_LOG").or_else(|| lookup("RULEKEEPER_LOG")) {
            self.log.filter = filter;
        }
        Ok(())
    }

    /// `host:port` the listener binds to.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http.host, self.http.port)
    }
}
