//! JSON envelope codec
//!
//! The request is a single object, `{"request": {user, auth, command, clTRID,
//! data?}}`. The reply carries a `response` object with the same fields as
//! the XML reply; `code` may arrive as a number or a string.

use regwapi_core::{RequestEnvelope, WireCodec};
use regwapi_domain::{Response, Result, Value, WapiError, WireFormat};
use serde::Serialize;
use serde_json::Map;
use tracing::warn;

#[derive(Serialize)]
struct JsonEnvelope<'a> {
    request: JsonRequest<'a>,
}

#[derive(Serialize)]
struct JsonRequest<'a> {
    user: &'a str,
    auth: &'a str,
    command: &'a str,
    #[serde(rename = "clTRID")]
    cl_trid: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
}

/// Codec for the `/json` endpoint
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub fn new() -> Self {
        Self
    }
}

impl WireCodec for JsonCodec {
    fn format(&self) -> WireFormat {
        WireFormat::Json
    }

    fn encode(&self, envelope: &RequestEnvelope) -> Result<String> {
        let body = JsonEnvelope {
            request: JsonRequest {
                user: &envelope.user,
                auth: &envelope.auth,
                command: &envelope.command,
                cl_trid: &envelope.cl_trid,
                data: envelope.data.as_ref(),
            },
        };
        serde_json::to_string(&body)
            .map_err(|e| WapiError::Request(format!("failed to encode JSON request: {e}")))
    }

    fn decode(&self, body: &str) -> Response {
        let root: serde_json::Value = match serde_json::from_str(body) {
            Ok(root) => root,
            Err(err) => {
                warn!(error = %err, "json_response_unparsable");
                return Response::parse_failure(err);
            }
        };

        let inner = match root {
            serde_json::Value::Object(mut map) => match map.remove("response") {
                Some(inner) => inner,
                None => serde_json::Value::Object(map),
            },
            other => other,
        };
        let serde_json::Value::Object(mut fields) = inner else {
            return Response::parse_failure("expected a JSON object");
        };

        let Some(code) = take_text(&mut fields, "code").filter(|c| !c.is_empty()) else {
            warn!("json_response_without_code");
            return Response::parse_failure("response has no \"code\" field");
        };

        Response {
            code,
            result: take_text(&mut fields, "result").unwrap_or_default(),
            data: fields.remove("data").map(Value::from).unwrap_or_default(),
            command: take_text(&mut fields, "command"),
            cl_trid: take_text(&mut fields, "clTRID"),
            sv_trid: take_text(&mut fields, "svTRID"),
            timestamp: take_text(&mut fields, "timestamp"),
        }
    }
}

fn take_text(fields: &mut Map<String, serde_json::Value>, key: &str) -> Option<String> {
    match fields.remove(key)? {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}
