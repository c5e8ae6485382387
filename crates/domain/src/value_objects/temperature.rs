//! Temperature rounding and display

use crate::value_objects::Units;

/// Placeholder shown when no temperature is available
pub const MISSING_TEMPERATURE: &str = "—";

/// Round to the nearest integer, halves away from zero
///
/// `21.5` becomes `22` and `-0.5` becomes `-1`. Non-finite input maps to `0`.
///
/// # Examples
///
/// ```
/// use domain::value_objects::round_half_away_from_zero;
///
/// assert_eq!(round_half_away_from_zero(21.5), 22);
/// assert_eq!(round_half_away_from_zero(-0.5), -1);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)] // weather temperatures are far inside i64 range
pub fn round_half_away_from_zero(value: f64) -> i64 {
    if value.is_finite() {
        value.round() as i64
    } else {
        0
    }
}

/// Format an optional temperature with the unit suffix, e.g. `22°C`
#[must_use]
pub fn format_temperature(value: Option<f64>, units: Units) -> String {
    value.map_or_else(
        || MISSING_TEMPERATURE.to_string(),
        |v| format_rounded(round_half_away_from_zero(v), units),
    )
}

/// Format an already rounded temperature
#[must_use]
pub fn format_rounded(value: i64, units: Units) -> String {
    format!("{value}{}", units.suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_halves_away_from_zero() {
        assert_eq!(round_half_away_from_zero(21.5), 22);
        assert_eq!(round_half_away_from_zero(-0.5), -1);
        assert_eq!(round_half_away_from_zero(-2.5), -3);
        assert_eq!(round_half_away_from_zero(0.49), 0);
        assert_eq!(round_half_away_from_zero(-0.49), 0);
    }

    #[test]
    fn non_finite_maps_to_zero() {
        assert_eq!(round_half_away_from_zero(f64::NAN), 0);
        assert_eq!(round_half_away_from_zero(f64::INFINITY), 0);
    }

    #[test]
    fn formats_with_suffix() {
        assert_eq!(format_temperature(Some(21.5), Units::Metric), "22°C");
        assert_eq!(format_temperature(Some(-0.5), Units::Imperial), "-1°F");
    }

    #[test]
    fn missing_value_uses_placeholder() {
        assert_eq!(format_temperature(None, Units::Metric), "—");
    }
}
