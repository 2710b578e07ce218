//! Payload redaction for log output
//!
//! Keys whose name contains one of [`SENSITIVE_KEY_FRAGMENTS`]
//! (case-insensitive) have their value replaced with the redaction marker.
//! Redaction covers the top-level mapping and mappings nested one level below
//! it; deeper branches are copied unchanged. Lists are transparent: a list of
//! mappings is redacted at the level of the key that holds it.

use regwapi_domain::constants::REDACTION_MARKER;
use regwapi_domain::Value;

/// Key fragments that mark a value as secret
pub const SENSITIVE_KEY_FRAGMENTS: &[&str] = &["password", "auth", "token", "key", "secret"];

/// Mapping levels (top level included) that are inspected
const REDACTION_DEPTH: usize = 2;

pub fn is_sensitive_key(key: &str) -> bool {
    let lowered = key.to_lowercase();
    SENSITIVE_KEY_FRAGMENTS.iter().any(|fragment| lowered.contains(fragment))
}

/// Returns a copy of `payload` safe to log.
pub fn redact_payload(payload: &Value) -> Value {
    redact_level(payload, REDACTION_DEPTH)
}

fn redact_level(value: &Value, depth: usize) -> Value {
    if depth == 0 {
        return value.clone();
    }
    match value {
        Value::Map(map) => map
            .iter()
            .map(|(key, child)| {
                let redacted = if is_sensitive_key(key) {
                    Value::from(REDACTION_MARKER)
                } else {
                    redact_level(child, depth - 1)
                };
                (key.clone(), redacted)
            })
            .collect(),
        Value::List(items) => items.iter().map(|item| redact_level(item, depth)).collect(),
        other => other.clone(),
    }
}
