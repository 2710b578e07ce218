//! Request authentication

pub mod calculator;
pub mod ports;

pub use calculator::{compute_auth, compute_auth_for_hour, sha1_hex};
pub use ports::{format_hour, Clock, FixedClock};
