//! Forecast aggregation
//!
//! Turns the provider's flat 3-hour series into per-day buckets, picks one
//! representative sample per day (the one closest to local noon) and emits
//! rounded daily summaries for the days after today.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use domain::{
    Calendar, DailySummary, DayBucket, ForecastSeries, Sample, round_half_away_from_zero,
};
use tracing::{debug, warn};

/// Default number of upcoming days summarised
pub const DEFAULT_FORECAST_DAYS: usize = 3;

const NOON_HOUR: u32 = 12;

/// Result of aggregating one forecast series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedForecast {
    /// Summaries for upcoming days, soonest first, never including today
    pub days: Vec<DailySummary>,
    /// Today's samples in arrival order, possibly empty
    pub today: Vec<Sample>,
}

/// Groups and summarises forecast series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastAggregator {
    max_days: usize,
}

impl Default for ForecastAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_FORECAST_DAYS)
    }
}

impl ForecastAggregator {
    /// Create an aggregator emitting at most `max_days` summaries
    #[must_use]
    pub const fn new(max_days: usize) -> Self {
        Self { max_days }
    }

    /// Maximum number of summaries emitted
    #[must_use]
    pub const fn max_days(&self) -> usize {
        self.max_days
    }

    /// Aggregate a series against an explicit "today"
    ///
    /// Deterministic for identical input, calendar and `today`. An empty
    /// series yields an empty result.
    #[must_use]
    pub fn aggregate(
        &self,
        series: &ForecastSeries,
        calendar: &Calendar,
        today: NaiveDate,
    ) -> AggregatedForecast {
        let buckets = group_by_day(&series.samples, calendar);
        let days = self.daily_summaries(&buckets, calendar, today);
        let today = buckets
            .into_iter()
            .find(|b| b.date == today)
            .map(|b| b.samples)
            .unwrap_or_default();

        debug!(
            samples = series.samples.len(),
            days = days.len(),
            today_samples = today.len(),
            calendar = %calendar,
            "Aggregated forecast series"
        );

        AggregatedForecast { days, today }
    }

    /// Summaries for every bucket except `today`, truncated to `max_days`
    ///
    /// Buckets are expected in ascending date order, as produced by
    /// [`group_by_day`].
    #[must_use]
    pub fn daily_summaries(
        &self,
        buckets: &[DayBucket],
        calendar: &Calendar,
        today: NaiveDate,
    ) -> Vec<DailySummary> {
        buckets
            .iter()
            .filter_map(|bucket| summarize_day(bucket, calendar))
            .filter(|summary| summary.date != today)
            .take(self.max_days)
            .collect()
    }
}

/// Group samples by local calendar date
///
/// Buckets come back sorted by date; samples inside a bucket keep arrival
/// order. Samples whose timestamp cannot be represented are dropped.
#[must_use]
pub fn group_by_day(samples: &[Sample], calendar: &Calendar) -> Vec<DayBucket> {
    let mut grouped: BTreeMap<NaiveDate, Vec<Sample>> = BTreeMap::new();

    for sample in samples {
        match calendar.date_key(sample.timestamp) {
            Some(date) => grouped.entry(date).or_default().push(sample.clone()),
            None => warn!(timestamp = sample.timestamp, "Dropping sample with invalid timestamp"),
        }
    }

    grouped
        .into_iter()
        .map(|(date, samples)| DayBucket { date, samples })
        .collect()
}

/// The sample whose local hour is closest to noon
///
/// Ties keep the earlier sample in arrival order. Returns `None` for an
/// empty bucket.
#[must_use]
pub fn representative<'a>(bucket: &'a DayBucket, calendar: &Calendar) -> Option<&'a Sample> {
    let distance = |sample: &Sample| {
        calendar
            .hour(sample.timestamp)
            .map_or(u32::MAX, |hour| hour.abs_diff(NOON_HOUR))
    };

    let (first, rest) = bucket.samples.split_first()?;
    Some(rest.iter().fold(first, |best, candidate| {
        if distance(candidate) < distance(best) {
            candidate
        } else {
            best
        }
    }))
}

/// Summarise one bucket through its representative sample
#[must_use]
pub fn summarize_day(bucket: &DayBucket, calendar: &Calendar) -> Option<DailySummary> {
    representative(bucket, calendar).map(|rep| DailySummary {
        date: bucket.date,
        temperature: round_half_away_from_zero(rep.temperature),
        condition: rep.condition.clone(),
        description: rep.description.clone(),
    })
}
