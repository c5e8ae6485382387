//! Calendar value object
//!
//! Converts epoch timestamps into local dates and hours for one explicit zone.
//! Day keys and noon distances always come from the same calendar, so a sample
//! near midnight can never be keyed in one zone and measured in another.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::Calendar;
//!
//! // 2024-01-15T23:30:00Z is already the 16th in UTC+2
//! let calendar = Calendar::from_offset_seconds(7200).expect("valid offset");
//! let key = calendar.date_key(1_705_361_400).expect("valid timestamp");
//! assert_eq!(key.to_string(), "2024-01-16");
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Zone used to turn timestamps into calendar dates and hours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Calendar {
    /// Fixed UTC offset, e.g. the one the provider reports for a city
    Offset(FixedOffset),
    /// IANA timezone with daylight saving rules
    Zone(Tz),
}

impl Calendar {
    /// UTC calendar
    #[must_use]
    pub fn utc() -> Self {
        Self::Offset(Utc.fix())
    }

    /// Calendar for a fixed offset in seconds east of UTC
    ///
    /// Returns `None` if the offset is outside +/- 24 hours.
    #[must_use]
    pub fn from_offset_seconds(seconds: i32) -> Option<Self> {
        FixedOffset::east_opt(seconds).map(Self::Offset)
    }

    /// Calendar for an IANA timezone name such as `Europe/Berlin`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` for unknown names.
    pub fn zone(name: &str) -> Result<Self, DomainError> {
        name.parse::<Tz>()
            .map(Self::Zone)
            .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
    }

    /// Local wall-clock time of an instant
    #[must_use]
    pub fn local_time(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::Offset(offset) => instant.with_timezone(offset).naive_local(),
            Self::Zone(tz) => instant.with_timezone(tz).naive_local(),
        }
    }

    /// Local wall-clock time of an epoch timestamp (seconds)
    ///
    /// Returns `None` for timestamps chrono cannot represent.
    #[must_use]
    pub fn local_timestamp(&self, timestamp: i64) -> Option<NaiveDateTime> {
        DateTime::from_timestamp(timestamp, 0).map(|instant| self.local_time(instant))
    }

    /// Calendar date a timestamp falls on
    #[must_use]
    pub fn date_key(&self, timestamp: i64) -> Option<NaiveDate> {
        self.local_timestamp(timestamp).map(|t| t.date())
    }

    /// Local hour (0-23) of a timestamp
    #[must_use]
    pub fn hour(&self, timestamp: i64) -> Option<u32> {
        self.local_timestamp(timestamp).map(|t| t.hour())
    }

    /// The date of "today" as seen from this calendar
    #[must_use]
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.local_time(now).date()
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offset(offset) => write!(f, "UTC{offset}"),
            Self::Zone(tz) => f.write_str(tz.name()),
        }
    }
}

/// Which calendar decides where one day ends and the next begins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DayBoundary {
    /// Local time of the searched city, as reported by the provider
    #[default]
    Location,
    /// Coordinated universal time
    Utc,
    /// A fixed IANA timezone
    Zone(Tz),
}

impl DayBoundary {
    /// Pick the calendar for a provider-reported UTC offset
    ///
    /// `Location` falls back to UTC when the provider did not report an
    /// offset or reported one out of range.
    #[must_use]
    pub fn resolve(&self, provider_offset_seconds: Option<i32>) -> Calendar {
        match self {
            Self::Location => provider_offset_seconds
                .and_then(Calendar::from_offset_seconds)
                .unwrap_or_default(),
            Self::Utc => Calendar::utc(),
            Self::Zone(tz) => Calendar::Zone(*tz),
        }
    }
}

impl FromStr for DayBoundary {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "location" => Ok(Self::Location),
            "utc" | "UTC" => Ok(Self::Utc),
            name => name
                .parse::<Tz>()
                .map(Self::Zone)
                .map_err(|_| DomainError::InvalidTimezone(name.to_string())),
        }
    }
}

impl TryFrom<String> for DayBoundary {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayBoundary> for String {
    fn from(boundary: DayBoundary) -> Self {
        boundary.to_string()
    }
}

impl fmt::Display for DayBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Location => f.write_str("location"),
            Self::Utc => f.write_str("utc"),
            Self::Zone(tz) => f.write_str(tz.name()),
        }
    }
}
