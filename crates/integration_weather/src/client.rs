//! OpenWeatherMap client
//!
//! HTTP client for the OpenWeatherMap 2.5 API, looking cities up by name.

use async_trait::async_trait;
use domain::Units;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{CurrentResponse, ForecastResponse};

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The provider does not know the city
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// The API key was rejected
    #[error("Unauthorized: check the API key")]
    Unauthorized,

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Weather service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// OpenWeatherMap API key
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Number of 3-hour forecast entries requested (default: 40, five days)
    #[serde(default = "default_forecast_count")]
    pub forecast_count: u8,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    10
}

const fn default_forecast_count() -> u8 {
    40
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout(),
            forecast_count: default_forecast_count(),
        }
    }
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_key",
                &if self.api_key.is_empty() {
                    "<unset>"
                } else {
                    "<redacted>"
                },
            )
            .field("timeout_secs", &self.timeout_secs)
            .field("forecast_count", &self.forecast_count)
            .finish()
    }
}

/// Weather client trait for fetching weather data by city name
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get the current conditions for a city
    async fn get_current(&self, city: &str, units: Units) -> Result<CurrentResponse, WeatherError>;

    /// Get the 3-hour forecast series for a city
    async fn get_forecast(
        &self,
        city: &str,
        units: Units,
    ) -> Result<ForecastResponse, WeatherError>;
}

/// OpenWeatherMap HTTP client implementation
#[derive(Debug)]
pub struct OpenWeatherMapClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenWeatherMapClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, WeatherError> {
        Self::new(WeatherConfig::default())
    }

    /// Build the URL for an endpoint such as `weather` or `forecast`
    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'))
    }

    /// Map a non-success status to an error
    fn status_error(status: StatusCode, city: &str) -> WeatherError {
        match status {
            StatusCode::NOT_FOUND => WeatherError::CityNotFound(city.to_string()),
            StatusCode::UNAUTHORIZED => WeatherError::Unauthorized,
            StatusCode::TOO_MANY_REQUESTS => WeatherError::RateLimitExceeded,
            s if s.is_server_error() => WeatherError::ServiceUnavailable(format!("HTTP {s}")),
            s => WeatherError::RequestFailed(format!("HTTP {s}")),
        }
    }

    /// Issue a GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
        units: Units,
        extra: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let url = self.endpoint_url(endpoint);
        debug!(url = %url, "Fetching weather data");

        let mut query: Vec<(&str, String)> = vec![
            ("q", city.to_string()),
            ("appid", self.config.api_key.clone()),
            ("units", units.api_param().to_string()),
        ];
        query.extend_from_slice(extra);

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| WeatherError::ConnectionFailed(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, city));
        }

        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::ConnectionFailed(e.without_url().to_string()))?;

        serde_json::from_str(&body).map_err(|e| WeatherError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherMapClient {
    #[instrument(skip(self), fields(units = %units))]
    async fn get_current(&self, city: &str, units: Units) -> Result<CurrentResponse, WeatherError> {
        let current: CurrentResponse = self.get_json("weather", city, units, &[]).await?;
        debug!(
            name = %current.name,
            temperature = current.main.temp,
            "Retrieved current conditions"
        );
        Ok(current)
    }

    #[instrument(skip(self), fields(units = %units, cnt = self.config.forecast_count))]
    async fn get_forecast(
        &self,
        city: &str,
        units: Units,
    ) -> Result<ForecastResponse, WeatherError> {
        let extra = [("cnt", self.config.forecast_count.to_string())];
        let forecast: ForecastResponse = self.get_json("forecast", city, units, &extra).await?;
        debug!(entries = forecast.list.len(), "Retrieved forecast series");
        Ok(forecast)
    }
}
