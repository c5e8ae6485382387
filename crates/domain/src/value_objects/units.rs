//! Unit system value object
//!
//! The upstream provider converts temperatures server-side, so the unit
//! system is both a request parameter and a display concern.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::Units;
//!
//! let units = Units::default();
//! assert_eq!(units.suffix(), "°C");
//! assert_eq!(units.toggled(), Units::Imperial);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Measurement system requested from the weather provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Celsius
    #[default]
    Metric,
    /// Fahrenheit
    Imperial,
}

impl Units {
    /// Value of the `units` query parameter sent upstream
    #[must_use]
    pub const fn api_param(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    /// Temperature suffix used for display
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }

    /// The other unit system
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Metric => Self::Imperial,
            Self::Imperial => Self::Metric,
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_param())
    }
}

impl FromStr for Units {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "m" | "celsius" | "c" => Ok(Self::Metric),
            "imperial" | "i" | "fahrenheit" | "f" => Ok(Self::Imperial),
            other => Err(DomainError::InvalidUnits(other.to_string())),
        }
    }
}
