//! Weather adapter - Implements WeatherPort using integration_weather

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::WeatherPort;
use async_trait::async_trait;
use domain::{City, CurrentConditions, ForecastSeries, Sample, Units};
use integration_weather::{
    CurrentResponse, ForecastItem, ForecastResponse, OpenWeatherMapClient, WeatherClient,
    WeatherConfig, WeatherError,
};
use tracing::{debug, instrument};

/// Adapter for weather services using the OpenWeatherMap API
pub struct WeatherAdapter {
    client: Arc<dyn WeatherClient>,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"<WeatherClient>")
            .finish()
    }
}

impl WeatherAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherMapClient::new(config)
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Wrap an existing client
    #[must_use]
    pub fn with_client(client: Arc<dyn WeatherClient>) -> Self {
        Self { client }
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::CityNotFound(city) => ApplicationError::NotFound(city),
            WeatherError::ParseError(e) => ApplicationError::MalformedResponse(e),
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
            WeatherError::Unauthorized => {
                ApplicationError::ExternalService("API key rejected".into())
            },
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
        }
    }

    /// Convert one forecast entry to a sample
    fn map_item(item: &ForecastItem) -> Sample {
        let primary = item.primary();
        Sample::new(item.dt, item.main.temp, primary.main, primary.description)
    }

    /// Convert a current-conditions response
    fn map_current(current: &CurrentResponse) -> CurrentConditions {
        let primary = current.primary();
        CurrentConditions::new(
            current.name.clone(),
            Sample::new(
                current.dt,
                current.main.temp,
                primary.main,
                primary.description,
            ),
        )
    }

    /// Convert a forecast response, keeping the reported UTC offset
    fn map_forecast(forecast: &ForecastResponse) -> ForecastSeries {
        let series = ForecastSeries::new(forecast.list.iter().map(Self::map_item).collect());
        match forecast.utc_offset_seconds() {
            Some(offset) => series.with_utc_offset(offset),
            None => series,
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(city = %city, units = %units))]
    async fn fetch_current_conditions(
        &self,
        city: &City,
        units: Units,
    ) -> Result<CurrentConditions, ApplicationError> {
        let result = self
            .client
            .get_current(city.as_str(), units)
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(current) => {
                debug!(
                    temperature = current.main.temp,
                    location = %current.name,
                    "Retrieved current conditions"
                );
            },
            Err(e) => {
                debug!(error = %e, "Failed to get current conditions");
            },
        }

        result.map(|c| Self::map_current(&c))
    }

    #[instrument(skip(self), fields(city = %city, units = %units))]
    async fn fetch_forecast_series(
        &self,
        city: &City,
        units: Units,
    ) -> Result<ForecastSeries, ApplicationError> {
        let result = self
            .client
            .get_forecast(city.as_str(), units)
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(forecast) => {
                debug!(entries = forecast.list.len(), "Retrieved forecast series");
            },
            Err(e) => {
                debug!(error = %e, "Failed to get forecast series");
            },
        }

        result.map(|f| Self::map_forecast(&f))
    }
}
