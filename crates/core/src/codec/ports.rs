//! Port interfaces for wire codecs
//!
//! A codec turns a [`RequestEnvelope`] into the string posted to the service
//! and turns the reply body back into a [`Response`]. Implementations live in
//! the infra layer (XML and JSON).

use std::fmt;

use regwapi_domain::constants::REDACTION_MARKER;
use regwapi_domain::{Command, Credentials, Response, Result, Value, WireFormat};

use crate::auth::{compute_auth, Clock};

/// Envelope fields common to both wire formats
#[derive(Clone, PartialEq, Eq)]
pub struct RequestEnvelope {
    pub user: String,
    pub auth: String,
    pub command: String,
    pub cl_trid: String,
    pub data: Option<Value>,
}

impl RequestEnvelope {
    /// Builds the envelope, computing the auth token from the clock's current
    /// reference hour.
    pub fn new(
        command: &Command,
        credentials: &Credentials,
        clock: &dyn Clock,
        cl_trid: impl Into<String>,
    ) -> Self {
        Self {
            user: credentials.username().to_string(),
            auth: compute_auth(credentials.username(), credentials.password(), clock),
            command: command.name.clone(),
            cl_trid: cl_trid.into(),
            data: command.data.clone(),
        }
    }
}

impl fmt::Debug for RequestEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestEnvelope")
            .field("user", &self.user)
            .field("auth", &REDACTION_MARKER)
            .field("command", &self.command)
            .field("cl_trid", &self.cl_trid)
            .field("has_data", &self.data.is_some())
            .finish()
    }
}

/// Trait for encoding requests and decoding responses
pub trait WireCodec: Send + Sync {
    /// Format this codec speaks; selects the endpoint path
    fn format(&self) -> WireFormat;

    /// Serialize an envelope to its wire text. Payload values are written
    /// unchanged; redaction is a logging concern.
    fn encode(&self, envelope: &RequestEnvelope) -> Result<String>;

    /// Parse a reply body. Never fails: unparsable input yields
    /// [`Response::parse_failure`].
    fn decode(&self, body: &str) -> Response;
}
