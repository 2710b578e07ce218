//! # regwapi Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - XML and JSON wire codecs
//! - The blocking HTTP transport
//! - Reference-timezone clocks
//! - Configuration loading, tracing setup and exchange logging
//! - A builder that wires everything into a `RegistryClient`
//!
//! ## Architecture
//! - Implements traits defined in `regwapi-core`
//! - Contains all "impure" code (I/O, clocks, global subscribers)

pub mod client;
pub mod codec;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod time;

// Re-export commonly used items
pub use client::{connect, RegistryClientBuilder};
pub use codec::{codec_for, JsonCodec, XmlCodec};
pub use errors::InfraError;
pub use http::{HttpTransport, HttpTransportBuilder};
pub use observability::{init_json_tracing, init_tracing, TracingExchangeLogger};
pub use time::{clock_for_timezone, OffsetClock, ZonedClock};
