//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for registry client operations
///
/// Registry-level rejections (2xxx codes) are not errors: they arrive as a
/// regular [`crate::Response`]. These variants cover the failures that happen
/// before a response can be observed.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum WapiError {
    /// The service could not be reached (DNS, refused connection, network).
    #[error("Connection error: {0}")]
    Connection(String),

    /// The HTTP request exceeded its timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Any other request failure: bad HTTP status, unreadable body, encoding.
    #[error("Request error: {0}")]
    Request(String),

    /// Input rejected before it reached the client.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Polling was aborted through its cancellation token.
    #[error("Operation cancelled")]
    Cancelled,
}

impl WapiError {
    /// Process exit code a command-line front end should use for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Connection(_) => 3,
            Self::Timeout(_) => 4,
            Self::Request(_) => 5,
            Self::Config(_) => 6,
            Self::Cancelled => 130,
        }
    }

    /// Stable label suitable for structured log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Connection(_) => "connection",
            Self::Timeout(_) => "timeout",
            Self::Request(_) => "request",
            Self::Validation(_) => "validation",
            Self::Config(_) => "config",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Result type alias for registry client operations
pub type Result<T> = std::result::Result<T, WapiError>;
