//! Real clocks
//!
//! The registry checks the auth token against its own wall-clock hour, so the
//! hour must come from the registry's timezone rather than the local one.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Timelike, Utc};
use chrono_tz::Tz;
use regwapi_core::auth::format_hour;
use regwapi_core::Clock;
use regwapi_domain::constants::{DEFAULT_TIMEZONE, FALLBACK_UTC_OFFSET_HOURS};
use tracing::warn;

/// System clock reading the hour in an IANA timezone (DST-aware)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonedClock {
    zone: Tz,
}

impl ZonedClock {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    /// Resolves an IANA name such as `Europe/Prague`.
    pub fn named(name: &str) -> Option<Self> {
        name.trim().parse::<Tz>().ok().map(Self::new)
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Two-digit hour of `instant` in this zone.
    pub fn hour_at(&self, instant: DateTime<Utc>) -> String {
        format_hour(instant.with_timezone(&self.zone).hour())
    }
}

impl Default for ZonedClock {
    fn default() -> Self {
        Self::new(chrono_tz::Europe::Prague)
    }
}

impl Clock for ZonedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn reference_hour(&self) -> String {
        self.hour_at(Utc::now())
    }
}

/// System clock reading the hour at a fixed UTC offset, ignoring DST
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetClock {
    offset_hours: i32,
}

impl OffsetClock {
    pub fn new(offset_hours: i32) -> Self {
        Self { offset_hours }
    }

    /// UTC+1, the registry's standard time.
    pub fn prague_fallback() -> Self {
        Self::new(FALLBACK_UTC_OFFSET_HOURS)
    }

    pub fn hour_at(&self, instant: DateTime<Utc>) -> String {
        let hour = (instant.hour() as i32 + self.offset_hours).rem_euclid(24);
        format_hour(hour as u32)
    }

    /// The offset as a chrono value, when it is a valid one (|hours| < 24).
    pub fn offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.offset_hours * 3600)
    }
}

impl Clock for OffsetClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn reference_hour(&self) -> String {
        self.hour_at(Utc::now())
    }
}

/// Clock for a configured zone name.
///
/// Unknown names fall back to [`OffsetClock::prague_fallback`] with a warning.
pub fn clock_for_timezone(name: &str) -> Arc<dyn Clock> {
    match ZonedClock::named(name) {
        Some(clock) => Arc::new(clock),
        None => {
            warn!(
                timezone = %name,
                default = DEFAULT_TIMEZONE,
                offset_hours = FALLBACK_UTC_OFFSET_HOURS,
                "timezone_unavailable_using_fixed_offset"
            );
            Arc::new(OffsetClock::prague_fallback())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn zoned_clock_follows_daylight_saving() {
        let clock = ZonedClock::default();
        let winter = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let summer = Utc.with_ymd_and_hms(2024, 7, 15, 10, 30, 0).unwrap();
        assert_eq!(clock.hour_at(winter), "11");
        assert_eq!(clock.hour_at(summer), "12");
    }

    #[test]
    fn zoned_clock_wraps_past_midnight() {
        let clock = ZonedClock::default();
        let late = Utc.with_ymd_and_hms(2024, 1, 15, 23, 30, 0).unwrap();
        assert_eq!(clock.hour_at(late), "00");
    }

    #[test]
    fn named_zone_resolution() {
        assert_eq!(ZonedClock::named("Europe/Prague"), Some(ZonedClock::default()));
        assert_eq!(ZonedClock::named(" UTC ").map(|c| c.zone()), Some(chrono_tz::UTC));
        assert!(ZonedClock::named("Mars/Olympus").is_none());
    }

    #[test]
    fn offset_clock_is_modulo_24() {
        let late = Utc.with_ymd_and_hms(2024, 7, 15, 23, 30, 0).unwrap();
        assert_eq!(OffsetClock::prague_fallback().hour_at(late), "00");

        let early = Utc.with_ymd_and_hms(2024, 7, 15, 1, 0, 0).unwrap();
        assert_eq!(OffsetClock::new(-3).hour_at(early), "22");
        assert_eq!(OffsetClock::new(5).offset(), FixedOffset::east_opt(5 * 3600));
    }

    #[test]
    fn unknown_timezone_falls_back_to_offset() {
        let fallback = OffsetClock::prague_fallback();
        let clock = clock_for_timezone("Nowhere/Atlantis");

        let before = Utc::now();
        let hour = clock.reference_hour();
        let after = Utc::now();

        assert!(hour == fallback.hour_at(before) || hour == fallback.hour_at(after), "{hour}");
    }
}
