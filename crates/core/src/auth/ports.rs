//! Port interfaces for time
//!
//! The auth token depends on the wall-clock hour of a fixed reference
//! timezone, so the clock is injected rather than read globally.

use chrono::{DateTime, Timelike, Utc};

/// Source of the current time and the reference-timezone hour
pub trait Clock: Send + Sync {
    /// Current instant
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current hour in the reference timezone, zero-padded (`"00"`..`"23"`)
    fn reference_hour(&self) -> String;
}

/// Zero-padded two-digit hour, wrapped into `0..24`.
pub fn format_hour(hour: u32) -> String {
    format!("{:02}", hour % 24)
}

/// Clock frozen at one instant
///
/// The reference hour defaults to the UTC hour of that instant and can be
/// overridden to simulate any timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<Utc>,
    hour: u32,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now, hour: now.hour() }
    }

    pub fn with_hour(mut self, hour: u32) -> Self {
        self.hour = hour % 24;
        self
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.now
    }

    fn reference_hour(&self) -> String {
        format_hour(self.hour)
    }
}
