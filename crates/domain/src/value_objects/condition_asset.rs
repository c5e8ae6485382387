//! Condition classifier
//!
//! Maps a provider condition label (e.g. `"Rain"`) and free-text description
//! (e.g. `"light rain"`) to the illustration shown for it.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::{ConditionAsset, classify};
//!
//! assert_eq!(classify("Clouds", "partly cloudy"), ConditionAsset::PartlyCloudy);
//! assert_eq!(classify("Clouds", "overcast clouds"), ConditionAsset::Cloudy);
//! assert_eq!(classify("Tornado", ""), ConditionAsset::Sunny);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display asset for a weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionAsset {
    /// Clear sky, also the fallback for anything unrecognised
    #[default]
    Sunny,
    /// Clouds described as "partly"
    PartlyCloudy,
    /// Any other clouds
    Cloudy,
    /// Drizzle
    Drizzle,
    /// Rain
    Rainy,
    /// Snow
    Snowy,
    /// Thunder and storms
    Stormy,
    /// Mist, fog, haze, smoke, dust
    Foggy,
    /// Wind and squalls
    Windy,
}

/// Ordered label rules; the cloud rule is special-cased on the description
const LABEL_RULES: &[(&[&str], ConditionAsset)] = &[
    (&["clear"], ConditionAsset::Sunny),
    (&["cloud"], ConditionAsset::Cloudy),
    (&["drizzle"], ConditionAsset::Drizzle),
    (&["rain"], ConditionAsset::Rainy),
    (&["snow"], ConditionAsset::Snowy),
    (&["thunder", "storm"], ConditionAsset::Stormy),
    (&["mist", "fog", "haze", "smoke", "dust"], ConditionAsset::Foggy),
    (&["wind", "squall"], ConditionAsset::Windy),
];

/// Classify a condition label and description
///
/// Case-insensitive substring matching; the first matching rule wins and
/// unmatched labels fall back to [`ConditionAsset::Sunny`].
#[must_use]
pub fn classify(label: &str, description: &str) -> ConditionAsset {
    let label = label.to_lowercase();

    let Some(asset) = LABEL_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| label.contains(n)))
        .map(|(_, asset)| *asset)
    else {
        return ConditionAsset::default();
    };

    if asset == ConditionAsset::Cloudy && description.to_lowercase().contains("partly") {
        ConditionAsset::PartlyCloudy
    } else {
        asset
    }
}

impl ConditionAsset {
    /// Stable identifier, e.g. `partly-cloudy`
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::PartlyCloudy => "partly-cloudy",
            Self::Cloudy => "cloudy",
            Self::Drizzle => "drizzle",
            Self::Rainy => "rainy",
            Self::Snowy => "snowy",
            Self::Stormy => "stormy",
            Self::Foggy => "foggy",
            Self::Windy => "windy",
        }
    }

    /// Illustration file under the icon asset directory
    #[must_use]
    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::Sunny => "bunny_sunny.png",
            Self::PartlyCloudy => "partlycloudy_bunny.png",
            Self::Cloudy => "cloudy_bunny.png",
            Self::Drizzle => "drizzle_bunny.png",
            Self::Rainy => "rainy_bunny.png",
            Self::Snowy => "snowy_bunny.png",
            Self::Stormy => "stormy_bunny.png",
            Self::Foggy => "foggy_bunny.png",
            Self::Windy => "windy_bunny.png",
        }
    }

    /// Emoji for terminal output
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Sunny => "☀️",
            Self::PartlyCloudy => "⛅",
            Self::Cloudy => "☁️",
            Self::Drizzle => "🌦️",
            Self::Rainy => "🌧️",
            Self::Snowy => "❄️",
            Self::Stormy => "⛈️",
            Self::Foggy => "🌫️",
            Self::Windy => "💨",
        }
    }
}

impl fmt::Display for ConditionAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_is_sunny() {
        assert_eq!(classify("Clear", "clear sky"), ConditionAsset::Sunny);
    }

    #[test]
    fn clouds_without_partly_are_cloudy() {
        assert_eq!(classify("Clouds", "scattered clouds"), ConditionAsset::Cloudy);
        assert_eq!(classify("Clouds", ""), ConditionAsset::Cloudy);
    }

    #[test]
    fn clouds_with_partly_are_partly_cloudy() {
        assert_eq!(
            classify("Clouds", "Partly Cloudy"),
            ConditionAsset::PartlyCloudy
        );
    }

    #[test]
    fn partly_only_matters_for_clouds() {
        assert_eq!(classify("Rain", "partly rainy"), ConditionAsset::Rainy);
    }

    #[test]
    fn precipitation_labels() {
        assert_eq!(classify("Drizzle", ""), ConditionAsset::Drizzle);
        assert_eq!(classify("Rain", "light rain"), ConditionAsset::Rainy);
        assert_eq!(classify("Snow", ""), ConditionAsset::Snowy);
    }

    #[test]
    fn storms() {
        assert_eq!(classify("Thunderstorm", ""), ConditionAsset::Stormy);
        assert_eq!(classify("Storm", ""), ConditionAsset::Stormy);
    }

    #[test]
    fn atmosphere_labels_are_foggy() {
        for label in ["Mist", "Fog", "Haze", "Smoke", "Dust"] {
            assert_eq!(classify(label, ""), ConditionAsset::Foggy, "{label}");
        }
    }

    #[test]
    fn wind_labels() {
        assert_eq!(classify("Wind", ""), ConditionAsset::Windy);
        assert_eq!(classify("Squall", ""), ConditionAsset::Windy);
    }

    #[test]
    fn unknown_label_defaults_to_sunny() {
        assert_eq!(classify("Tornado", "funnel cloud"), ConditionAsset::Sunny);
        assert_eq!(classify("", ""), ConditionAsset::Sunny);
    }

    #[test]
    fn earlier_rules_win() {
        // matches both "rain" and "storm"
        assert_eq!(classify("Rainstorm", ""), ConditionAsset::Rainy);
        // "drizzle" is checked before "rain"
        assert_eq!(classify("Drizzle Rain", ""), ConditionAsset::Drizzle);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("SNOW", ""), ConditionAsset::Snowy);
    }

    #[test]
    fn ids_and_files() {
        assert_eq!(ConditionAsset::PartlyCloudy.id(), "partly-cloudy");
        assert_eq!(ConditionAsset::Sunny.file_name(), "bunny_sunny.png");
        assert_eq!(ConditionAsset::Windy.file_name(), "windy_bunny.png");
        assert_eq!(ConditionAsset::Foggy.to_string(), "foggy");
    }

    #[test]
    fn serializes_as_id() {
        let json = serde_json::to_string(&ConditionAsset::PartlyCloudy).unwrap();
        assert_eq!(json, "\"partly-cloudy\"");
    }
}
