//! Domain entities - Weather readings and the structures derived from them

mod forecast;
mod sample;

pub use forecast::{DailySummary, DayBucket, ForecastSeries};
pub use sample::{CurrentConditions, Sample};
