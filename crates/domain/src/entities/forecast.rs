//! Forecast series, day buckets and daily summaries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::Sample;
use crate::value_objects::{ConditionAsset, classify};

/// Flat forecast time series as returned by the provider
///
/// `utc_offset_seconds` is the searched city's offset when the provider
/// reports one; it feeds the location day boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    /// Samples in arrival order, usually ascending by timestamp
    pub samples: Vec<Sample>,
    /// UTC offset of the forecast location in seconds
    pub utc_offset_seconds: Option<i32>,
}

impl ForecastSeries {
    /// Create a series from samples without location offset
    #[must_use]
    pub const fn new(samples: Vec<Sample>) -> Self {
        Self {
            samples,
            utc_offset_seconds: None,
        }
    }

    /// Attach the location's UTC offset
    #[must_use]
    pub const fn with_utc_offset(mut self, seconds: i32) -> Self {
        self.utc_offset_seconds = Some(seconds);
        self
    }

    /// Whether the series holds no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// All samples sharing one calendar date, in arrival order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBucket {
    /// Calendar date key
    pub date: NaiveDate,
    /// Samples for this date
    pub samples: Vec<Sample>,
}

impl DayBucket {
    /// Create an empty bucket for a date
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            samples: Vec::new(),
        }
    }

    /// Number of samples in the bucket
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the bucket holds no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Representative, rounded summary of one forecast day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Calendar date key
    pub date: NaiveDate,
    /// Representative temperature, rounded half away from zero
    pub temperature: i64,
    /// Representative condition label
    pub condition: String,
    /// Representative condition description
    pub description: String,
}

impl DailySummary {
    /// Display asset for this day's condition
    #[must_use]
    pub fn asset(&self) -> ConditionAsset {
        classify(&self.condition, &self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_offset_builder() {
        let series = ForecastSeries::new(vec![]).with_utc_offset(-18_000);
        assert!(series.is_empty());
        assert_eq!(series.utc_offset_seconds, Some(-18_000));
    }

    #[test]
    fn bucket_len() {
        let mut bucket = DayBucket::new(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert!(bucket.is_empty());
        bucket.samples.push(Sample::new(0, 1.0, "Snow", "light snow"));
        assert_eq!(bucket.len(), 1);
    }

    #[test]
    fn summary_asset() {
        let summary = DailySummary {
            date: NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
            temperature: 4,
            condition: "Thunderstorm".to_string(),
            description: "thunderstorm with rain".to_string(),
        };
        assert_eq!(summary.asset(), ConditionAsset::Stormy);
    }
}
