//! Logging setup and the tracing-backed exchange logger
//!
//! Diagnostics go through `tracing`. Binaries install a subscriber once with
//! [`init_tracing`] (human-readable) or [`init_json_tracing`] (one JSON object
//! per line); `RUST_LOG` overrides the default directive in both cases.

mod exchange_logger;

use regwapi_domain::{Result, WapiError};
use tracing_subscriber::EnvFilter;

pub use exchange_logger::TracingExchangeLogger;

fn env_filter(default: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default))
        .map_err(|e| WapiError::Config(format!("invalid log filter '{default}': {e}")))
}

/// Install the global fmt subscriber.
///
/// # Errors
/// `WapiError::Config` if the directive is invalid or a global subscriber is
/// already installed.
pub fn init_tracing(default: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default)?)
        .with_target(false)
        .try_init()
        .map_err(|e| WapiError::Config(format!("failed to install tracing subscriber: {e}")))
}

/// Same as [`init_tracing`] with JSON-formatted output.
pub fn init_json_tracing(default: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter(default)?)
        .try_init()
        .map_err(|e| WapiError::Config(format!("failed to install tracing subscriber: {e}")))
}
