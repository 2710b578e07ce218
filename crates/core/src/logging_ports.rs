//! Exchange logging port
//!
//! Receives every request, response and transport failure the client sees.
//! Implementations are responsible for redacting secrets before emitting
//! anything.

use regwapi_domain::{Command, Response, WapiError};

/// Trait for observing client exchanges
pub trait ExchangeLogger: Send + Sync {
    /// Called before a command is encoded
    fn request(&self, command: &Command, cl_trid: &str);

    /// Called after a reply has been decoded
    fn response(&self, command: &str, response: &Response);

    /// Called when a command fails before a reply could be decoded
    fn failure(&self, command: &str, error: &WapiError);
}

/// Logger that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopExchangeLogger;

impl ExchangeLogger for NoopExchangeLogger {
    fn request(&self, _command: &Command, _cl_trid: &str) {}

    fn response(&self, _command: &str, _response: &Response) {}

    fn failure(&self, _command: &str, _error: &WapiError) {}
}
