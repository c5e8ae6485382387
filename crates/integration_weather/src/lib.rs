//! OpenWeatherMap weather integration
//!
//! Client for the OpenWeatherMap 2.5 API (<https://openweathermap.org/api>).
//! Fetches current conditions and the 5-day / 3-hour forecast by city name.
//! Requires an API key.

pub mod client;
mod models;

pub use client::{OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::{
    CityInfo, CurrentResponse, ForecastItem, ForecastResponse, MainReadings, WeatherEntry,
};
