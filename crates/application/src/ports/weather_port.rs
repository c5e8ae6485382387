//! Weather service port
//!
//! Defines the interface for weather data retrieval. Both operations take the
//! city as free text and the unit system the provider should convert into.

use async_trait::async_trait;
use domain::{City, CurrentConditions, ForecastSeries, Units};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for weather service operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Fetch the current conditions snapshot for a city
    async fn fetch_current_conditions(
        &self,
        city: &City,
        units: Units,
    ) -> Result<CurrentConditions, ApplicationError>;

    /// Fetch the multi-day forecast series (3-hour resolution) for a city
    ///
    /// A response without any samples is an empty series, not an error.
    async fn fetch_forecast_series(
        &self,
        city: &City,
        units: Units,
    ) -> Result<ForecastSeries, ApplicationError>;
}
