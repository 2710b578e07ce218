//! Exchange logger emitting `tracing` events
//!
//! Payloads are redacted before they reach any subscriber: values under keys
//! that look like credentials are replaced by the redaction marker.

use regwapi_common::privacy::redact_payload;
use regwapi_core::ExchangeLogger;
use regwapi_domain::{Command, Response, Value, WapiError};
use tracing::{debug, error, info, warn};

/// [`ExchangeLogger`] writing structured events under the `regwapi::exchange`
/// target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingExchangeLogger {
    include_payloads: bool,
}

impl TracingExchangeLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also log (redacted) request and response payloads.
    pub fn with_payloads(mut self) -> Self {
        self.include_payloads = true;
        self
    }

    fn render(&self, payload: Option<&Value>) -> Option<String> {
        if !self.include_payloads {
            return None;
        }
        payload.map(|value| rendered(&redact_payload(value)))
    }
}

fn rendered(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}

impl ExchangeLogger for TracingExchangeLogger {
    fn request(&self, command: &Command, cl_trid: &str) {
        match self.render(command.data.as_ref()) {
            Some(payload) => debug!(
                target: "regwapi::exchange",
                command = %command.name, cl_trid, payload = %payload, "wapi_request"
            ),
            None => debug!(target: "regwapi::exchange", command = %command.name, cl_trid, "wapi_request"),
        }
    }

    fn response(&self, command: &str, response: &Response) {
        let payload = self.render((!response.data.is_null()).then_some(&response.data));
        let sv_trid = response.sv_trid.as_deref().unwrap_or_default();
        if response.is_ok() {
            info!(
                target: "regwapi::exchange",
                command, code = %response.code, result = %response.result, sv_trid,
                payload = payload.as_deref().unwrap_or_default(), "wapi_response"
            );
        } else {
            warn!(
                target: "regwapi::exchange",
                command, code = %response.code, result = %response.result, sv_trid,
                payload = payload.as_deref().unwrap_or_default(), "wapi_response"
            );
        }
    }

    fn failure(&self, command: &str, err: &WapiError) {
        error!(target: "regwapi::exchange", command, kind = err.label(), error = %err, "wapi_failure");
    }
}
