//! Clock port
//!
//! "Today" and the day/night theme depend on the current instant, which is
//! injected so tests can pin it.

use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;

/// Source of the current instant
#[cfg_attr(test, automock)]
pub trait ClockPort: Send + Sync {
    /// The current instant in UTC
    fn now(&self) -> DateTime<Utc>;
}
