//! Configuration for the todo CLI

use core_config::latency::LatencyConfig;
use core_config::{ConfigError, Environment, FromEnv};
use database::sqlite::SqliteConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub database: SqliteConfig,
    pub latency: LatencyConfig,
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            environment: Environment::from_env(),
            database: SqliteConfig::from_env()?,
            latency: LatencyConfig::from_env()?,
        })
    }
}
