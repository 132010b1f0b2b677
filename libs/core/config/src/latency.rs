use crate::{env_parse_or_default, ConfigError, FromEnv};
use std::time::Duration;

/// Default artificial latency applied to every store round trip
pub const DEFAULT_SERVICE_LATENCY_MS: u64 = 1000;

/// Simulated service latency for the task repository
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LatencyConfig {
    pub service_latency_ms: u64,
}

impl LatencyConfig {
    pub fn new(service_latency_ms: u64) -> Self {
        Self { service_latency_ms }
    }

    pub fn service_latency(&self) -> Duration {
        Duration::from_millis(self.service_latency_ms)
    }
}

impl FromEnv for LatencyConfig {
    /// Reads TASKS_SERVICE_LATENCY_MS, defaulting to one second
    fn from_env() -> Result<Self, ConfigError> {
        let service_latency_ms = env_parse_or_default(
            "TASKS_SERVICE_LATENCY_MS",
            &DEFAULT_SERVICE_LATENCY_MS.to_string(),
        )?;

        Ok(Self { service_latency_ms })
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            service_latency_ms: DEFAULT_SERVICE_LATENCY_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_config_from_env_with_defaults() {
        temp_env::with_var_unset("TASKS_SERVICE_LATENCY_MS", || {
            let config = LatencyConfig::from_env().unwrap();
            assert_eq!(config.service_latency_ms, 1000);
            assert_eq!(config.service_latency(), Duration::from_secs(1));
        });
    }

    #[test]
    fn test_latency_config_from_env_with_custom_value() {
        temp_env::with_var("TASKS_SERVICE_LATENCY_MS", Some("0"), || {
            let config = LatencyConfig::from_env().unwrap();
            assert_eq!(config.service_latency(), Duration::ZERO);
        });
    }

    #[test]
    fn test_latency_config_from_env_invalid() {
        temp_env::with_var("TASKS_SERVICE_LATENCY_MS", Some("soon"), || {
            let err = LatencyConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("TASKS_SERVICE_LATENCY_MS"));
        });
    }
}
