use sea_orm::ConnectOptions;
use std::time::Duration;
use tracing::log::LevelFilter;

#[cfg(feature = "config")]
use core_config::{env_or_default, env_parse_or_default, ConfigError, FromEnv};

/// File-backed database next to the working directory, created on first use
pub const DEFAULT_DATABASE_URL: &str = "sqlite://todo.db?mode=rwc";

/// Private in-memory database; every connection opens its own, so pools hold one connection
pub const IN_MEMORY_DATABASE_URL: &str = "sqlite::memory:";

/// SQLite database configuration
///
/// Holds the connection pool settings. It can be constructed manually or
/// loaded from environment variables (with the `config` feature).
///
/// # Example
///
/// ```ignore
/// use database::sqlite::SqliteConfig;
///
/// let config = SqliteConfig::new("sqlite://todo.db?mode=rwc");
/// let options = config.into_connect_options();
/// ```
#[derive(Clone, Debug)]
pub struct SqliteConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Enable SQL query logging
    pub sqlx_logging: bool,

    /// SQL logging level
    pub sqlx_logging_level: LevelFilter,
}

impl SqliteConfig {
    /// Create a new SqliteConfig with default pool settings
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Single-connection in-memory database, used by tests
    pub fn in_memory() -> Self {
        Self {
            url: IN_MEMORY_DATABASE_URL.to_string(),
            max_connections: 1,
            min_connections: 1,
            sqlx_logging: false,
            ..Self::default()
        }
    }

    /// Convert this config into SeaORM ConnectOptions
    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(&self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(self.sqlx_logging_level);
        opt
    }

    /// Get a reference to the database URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 8,
            sqlx_logging: true,
            sqlx_logging_level: LevelFilter::Debug,
        }
    }
}

/// Load SqliteConfig from environment variables
///
/// Environment variables:
/// - `DATABASE_URL` (optional, default: `sqlite://todo.db?mode=rwc`)
/// - `DB_MAX_CONNECTIONS` (optional, default: 5)
/// - `DB_MIN_CONNECTIONS` (optional, default: 1)
/// - `DB_CONNECT_TIMEOUT_SECS` (optional, default: 8)
/// - `DB_SQLX_LOGGING` (optional, default: true)
#[cfg(feature = "config")]
impl FromEnv for SqliteConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_or_default("DATABASE_URL", DEFAULT_DATABASE_URL);
        let max_connections = env_parse_or_default("DB_MAX_CONNECTIONS", "5")?;
        let min_connections = env_parse_or_default("DB_MIN_CONNECTIONS", "1")?;
        let connect_timeout_secs = env_parse_or_default("DB_CONNECT_TIMEOUT_SECS", "8")?;
        let sqlx_logging = env_parse_or_default("DB_SQLX_LOGGING", "true")?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            connect_timeout_secs,
            sqlx_logging,
            sqlx_logging_level: LevelFilter::Debug,
        })
    }
}
