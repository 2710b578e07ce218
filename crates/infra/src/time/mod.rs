//! Reference-timezone clocks used by the auth token

mod clock;

pub use clock::{clock_for_timezone, OffsetClock, ZonedClock};
