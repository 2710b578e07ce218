//! Privacy Module
//!
//! Redaction of credentials and secrets from payloads before they are logged.

pub mod redaction;

pub use redaction::{is_sensitive_key, redact_payload};
