//! # regwapi Core
//!
//! Protocol logic of the registry client - no HTTP, no XML library.
//!
//! This crate contains:
//! - The rotating auth-token calculation
//! - Port interfaces (traits) for the clock, wire codecs, transport and
//!   exchange logging
//! - The polling engine for asynchronously applied changes
//! - The `RegistryClient` facade and its derived operations
//!
//! ## Architecture Principles
//! - Only depends on `regwapi-domain` and `regwapi-common`
//! - All I/O goes through traits implemented in `regwapi-infra`
//! - Pure, testable logic

pub mod auth;
pub mod client;
pub mod codec;
pub mod polling;

// Infrastructure ports
pub mod logging_ports;
pub mod transport_ports;

// Re-export specific items to avoid ambiguity
pub use auth::ports::{Clock, FixedClock};
pub use auth::{compute_auth, compute_auth_for_hour, sha1_hex};
pub use client::{NameserverTarget, RegistryClient};
pub use codec::ports::{RequestEnvelope, WireCodec};
pub use logging_ports::{ExchangeLogger, NoopExchangeLogger};
pub use polling::ports::{Sleeper, ThreadSleeper};
pub use polling::{PollOutcome, PollReport, PollSpec, PollingEngine};
pub use transport_ports::Transport;
