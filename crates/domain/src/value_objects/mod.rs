//! Value Objects - Immutable, identity-less domain primitives

mod calendar;
mod city;
mod condition_asset;
mod temperature;
mod units;

pub use calendar::{Calendar, DayBoundary};
pub use city::City;
pub use condition_asset::{ConditionAsset, classify};
pub use temperature::{
    MISSING_TEMPERATURE, format_rounded, format_temperature, round_half_away_from_zero,
};
pub use units::Units;
