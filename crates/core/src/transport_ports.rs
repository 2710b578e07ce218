//! Transport port
//!
//! One blocking HTTP round trip per call. Implementations must not retry:
//! connection failures, timeouts and bad statuses are surfaced immediately as
//! `Connection`, `Timeout` and `Request` errors respectively.

use regwapi_domain::{Result, WireFormat};

/// Trait for sending an encoded envelope to the service
pub trait Transport: Send + Sync {
    /// Posts `request` to the endpoint for `format` and returns the raw body.
    fn send(&self, format: WireFormat, request: &str) -> Result<String>;
}
