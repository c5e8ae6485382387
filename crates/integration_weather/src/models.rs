//! Weather data models
//!
//! Wire types for the OpenWeatherMap 2.5 `/weather` and `/forecast`
//! endpoints. Only the fields the dashboard reads are modelled; everything
//! else in the payload is ignored.

use serde::{Deserialize, Deserializer, Serialize};

/// Condition entry; the provider sends a list and the first one is primary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherEntry {
    /// Short label such as `Rain` or `Clouds`
    #[serde(default)]
    pub main: String,
    /// Free text such as `light rain`
    #[serde(default)]
    pub description: String,
}

/// Main measurement block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    /// Temperature in the requested unit system
    pub temp: f64,
}

/// Response of `GET /weather`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentResponse {
    /// Resolved location name
    #[serde(default)]
    pub name: String,
    /// Observation time, epoch seconds
    pub dt: i64,
    /// Measurements
    pub main: MainReadings,
    /// Condition entries
    #[serde(default)]
    pub weather: Vec<WeatherEntry>,
    /// Shift from UTC in seconds
    #[serde(default)]
    pub timezone: Option<i32>,
}

impl CurrentResponse {
    /// Primary condition, empty when the provider sent none
    #[must_use]
    pub fn primary(&self) -> WeatherEntry {
        primary_entry(&self.weather)
    }
}

/// One 3-hour forecast entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastItem {
    /// Forecast time, epoch seconds
    pub dt: i64,
    /// Measurements
    pub main: MainReadings,
    /// Condition entries
    #[serde(default)]
    pub weather: Vec<WeatherEntry>,
}

impl ForecastItem {
    /// Primary condition, empty when the provider sent none
    #[must_use]
    pub fn primary(&self) -> WeatherEntry {
        primary_entry(&self.weather)
    }
}

/// City block of the forecast response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityInfo {
    /// Resolved location name
    #[serde(default)]
    pub name: String,
    /// Shift from UTC in seconds
    #[serde(default)]
    pub timezone: Option<i32>,
}

/// Response of `GET /forecast`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    /// 3-hour entries; a missing or `null` list decodes as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub list: Vec<ForecastItem>,
    /// Location metadata
    #[serde(default)]
    pub city: Option<CityInfo>,
}

impl ForecastResponse {
    /// UTC offset of the forecast location, if reported
    #[must_use]
    pub fn utc_offset_seconds(&self) -> Option<i32> {
        self.city.as_ref().and_then(|c| c.timezone)
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn primary_entry(entries: &[WeatherEntry]) -> WeatherEntry {
    entries.first().cloned().unwrap_or_default()
}
