//! System clock - Implements ClockPort with the wall clock

use application::ports::ClockPort;
use chrono::{DateTime, Utc};

/// Wall-clock time source
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
