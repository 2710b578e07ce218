//! Polling for asynchronously applied changes

pub mod engine;
pub mod ports;

pub use engine::{CompletionPredicate, PollOutcome, PollReport, PollSpec, PollingEngine};
pub use ports::{Sleeper, ThreadSleeper};
