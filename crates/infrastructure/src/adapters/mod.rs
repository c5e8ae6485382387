//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod system_clock;
mod weather_adapter;

pub use system_clock::SystemClock;
pub use weather_adapter::WeatherAdapter;
