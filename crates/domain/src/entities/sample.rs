//! Forecast samples
//!
//! A sample is one timestamped reading, either the current conditions or one
//! 3-hour step of the forecast series. Samples are immutable once fetched.

use serde::{Deserialize, Serialize};

use crate::value_objects::{ConditionAsset, classify};

/// One weather data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Epoch seconds (UTC)
    pub timestamp: i64,
    /// Temperature in the unit system that was requested upstream
    pub temperature: f64,
    /// Primary condition label, e.g. "Rain"
    pub condition: String,
    /// Primary condition description, e.g. "light rain"
    pub description: String,
}

impl Sample {
    /// Create a new sample
    #[must_use]
    pub fn new(
        timestamp: i64,
        temperature: f64,
        condition: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            temperature,
            condition: condition.into(),
            description: description.into(),
        }
    }

    /// Display asset for this sample's condition
    #[must_use]
    pub fn asset(&self) -> ConditionAsset {
        classify(&self.condition, &self.description)
    }
}

/// Snapshot of current conditions for a searched city
///
/// Fetched independently of the forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Place name as resolved by the provider
    pub location_name: String,
    /// The observation itself
    pub sample: Sample,
}

impl CurrentConditions {
    /// Create a new current-conditions snapshot
    #[must_use]
    pub fn new(location_name: impl Into<String>, sample: Sample) -> Self {
        Self {
            location_name: location_name.into(),
            sample,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_is_classified_from_condition() {
        let sample = Sample::new(0, 10.0, "Clouds", "partly cloudy");
        assert_eq!(sample.asset(), ConditionAsset::PartlyCloudy);
    }

    #[test]
    fn current_conditions_keep_location() {
        let current = CurrentConditions::new("Austin", Sample::new(0, 30.0, "Clear", "clear sky"));
        assert_eq!(current.location_name, "Austin");
        assert_eq!(current.sample.asset(), ConditionAsset::Sunny);
    }
}
