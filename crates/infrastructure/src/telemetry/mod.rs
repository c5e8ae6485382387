//! Logging initialisation
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and either a
//! human-readable or a JSON fmt layer. `RUST_LOG` takes precedence over the
//! configured filter unless the filter was chosen explicitly on the command
//! line.

use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (e.g., "info", "weatherdash=debug,application=debug")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit one JSON object per event instead of plain text
    #[serde(default)]
    pub json: bool,

    /// Use `log_filter` even when `RUST_LOG` is set
    #[serde(skip)]
    pub override_env: bool,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            json: false,
            override_env: false,
        }
    }
}

impl TelemetryConfig {
    /// Pin the filter so `RUST_LOG` no longer replaces it
    pub fn force_filter(&mut self, filter: impl Into<String>) {
        self.log_filter = filter.into();
        self.override_env = true;
    }

    /// Build the filter, preferring `RUST_LOG` when set and valid
    fn env_filter(&self) -> Result<EnvFilter, TelemetryError> {
        let from_env = if self.override_env {
            None
        } else {
            EnvFilter::try_from_default_env().ok()
        };
        match from_env {
            Some(filter) => Ok(filter),
            None => EnvFilter::try_new(&self.log_filter)
                .map_err(|e| TelemetryError::Filter(format!("{}: {e}", self.log_filter))),
        }
    }
}

/// Initialize logging with the given configuration
///
/// Logs go to stderr so stdout stays free for rendered output.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a global subscriber is
/// already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = config.env_filter()?;

    if config.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    }

    info!(json = config.json, filter = %config.log_filter, "Logging initialized");
    Ok(())
}

/// Error type for telemetry initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),

    /// The log filter could not be parsed
    #[error("Invalid log filter {0}")]
    Filter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = TelemetryConfig::default();
        assert_eq!(config.log_filter, "warn");
        assert!(!config.json);
    }

    #[test]
    fn test_config_serialization() {
        let config = TelemetryConfig {
            log_filter: "debug".to_string(),
            json: true,
            override_env: false,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TelemetryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let parsed: TelemetryConfig = serde_json::from_str(r#"{"json": true}"#).unwrap();
        assert!(parsed.json);
        assert_eq!(parsed.log_filter, "warn");
    }

    #[test]
    fn test_valid_filter_builds() {
        let config = TelemetryConfig {
            log_filter: "info,application=debug".to_string(),
            json: false,
            override_env: false,
        };
        assert!(EnvFilter::try_new(&config.log_filter).is_ok());
    }

    #[test]
    fn test_forced_filter_ignores_environment() {
        let mut config = TelemetryConfig::default();
        config.force_filter("debug");

        assert!(config.override_env);
        let filter = config.env_filter().unwrap();
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_forced_invalid_filter_is_an_error() {
        let mut config = TelemetryConfig::default();
        config.force_filter("application=loud");

        assert!(matches!(config.env_filter(), Err(TelemetryError::Filter(_))));
    }

    #[test]
    fn test_override_is_not_read_from_config() {
        let parsed: TelemetryConfig =
            serde_json::from_str(r#"{"log_filter": "info", "override_env": true}"#).unwrap();
        assert!(!parsed.override_env);
    }
}
