//! Application configuration
//!
//! Sections:
//! - `weather`: provider URL, API key, timeout, forecast entry count
//! - `dashboard`: default city and units, forecast days, day boundary
//! - `telemetry`: log filter and format
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `config.toml`, then `WEATHERDASH_*` environment variables with `__`
//! separating nested keys (e.g. `WEATHERDASH_WEATHER__API_KEY`).

use std::collections::HashMap;
use std::path::Path;

use application::{ApplicationError, DashboardConfig};
use domain::{City, DomainError};
use integration_weather::WeatherConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::telemetry::TelemetryConfig;

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "WEATHERDASH";

/// Default configuration file name, resolved without extension
const DEFAULT_CONFIG_FILE: &str = "config";

/// Largest forecast entry count the provider accepts (5 days x 8)
const MAX_FORECAST_COUNT: u8 = 40;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Upstream weather provider
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Dashboard behaviour
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong
    /// type.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(None, None)
    }

    /// Load configuration from an explicit file and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(Some(path), None)
    }

    /// Assemble all sources
    ///
    /// `env` replaces the process environment when given.
    fn build(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("weather.base_url", defaults.weather.base_url)?
            .set_default("weather.timeout_secs", defaults.weather.timeout_secs)?
            .set_default(
                "weather.forecast_count",
                u64::from(defaults.weather.forecast_count),
            )?
            .set_default("dashboard.default_city", defaults.dashboard.default_city)?
            .set_default(
                "dashboard.default_units",
                defaults.dashboard.default_units.to_string(),
            )?
            .set_default(
                "dashboard.day_boundary",
                defaults.dashboard.day_boundary.to_string(),
            )?
            .set_default("telemetry.log_filter", defaults.telemetry.log_filter)?
            .add_source(file)
            // Override with environment variables (e.g., WEATHERDASH_DASHBOARD__DEFAULT_CITY)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Check values that deserialize fine but cannot work
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` with a validation message for the
    /// first offending value.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        City::parse(&self.dashboard.default_city)?;

        let checks = [
            (
                self.weather.api_key.trim().is_empty(),
                "weather.api_key is not set (WEATHERDASH_WEATHER__API_KEY)",
            ),
            (
                self.weather.timeout_secs == 0,
                "weather.timeout_secs must be positive",
            ),
            (
                !(1..=MAX_FORECAST_COUNT).contains(&self.weather.forecast_count),
                "weather.forecast_count must be between 1 and 40",
            ),
            (
                self.dashboard.forecast_days == 0,
                "dashboard.forecast_days must be positive",
            ),
        ];

        match checks.iter().find(|(failed, _)| *failed) {
            Some((_, message)) => Err(DomainError::ValidationError((*message).to_string()).into()),
            None => Ok(()),
        }
    }
}
