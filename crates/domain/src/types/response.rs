//! Decoded registry response

use std::time::Duration;

use serde::Serialize;

use super::value::Value;
use crate::constants::{CODE_ACCEPTED, CODE_PARSE_ERROR, CODE_POLL_TIMEOUT, CODE_SUCCESS};
use crate::impl_wire_name_conversions;

/// Classification of a response code by the protocol's leading-digit rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeClass {
    /// `1000`: command applied.
    Success,
    /// `1001`: queued for asynchronous processing.
    Accepted,
    /// `2xxx`: definite rejection.
    Rejected,
    /// `9999`: the local codec could not parse the reply.
    ParseFailure,
    /// `9998`: local polling budget exhausted.
    PollingTimeout,
    Unexpected,
}

impl_wire_name_conversions!(CodeClass {
    Success => "success",
    Accepted => "accepted",
    Rejected => "rejected",
    ParseFailure => "parse_failure",
    PollingTimeout => "polling_timeout",
    Unexpected => "unexpected",
});

impl CodeClass {
    pub fn of(code: &str) -> Self {
        match code {
            CODE_SUCCESS => Self::Success,
            CODE_ACCEPTED => Self::Accepted,
            CODE_PARSE_ERROR => Self::ParseFailure,
            CODE_POLL_TIMEOUT => Self::PollingTimeout,
            c if c.starts_with('2') => Self::Rejected,
            _ => Self::Unexpected,
        }
    }
}

/// A registry reply
///
/// `code` is always present; replies that cannot be parsed are represented by
/// [`Response::parse_failure`] instead of an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub code: String,
    pub result: String,
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cl_trid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sv_trid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Response {
    pub fn new(code: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            result: result.into(),
            data: Value::Null,
            command: None,
            cl_trid: None,
            sv_trid: None,
            timestamp: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    /// Sentinel for a reply body the codec could not understand.
    pub fn parse_failure(detail: impl std::fmt::Display) -> Self {
        Self::new(CODE_PARSE_ERROR, format!("Failed to parse response: {detail}"))
    }

    /// Sentinel for a polling loop that ran out of attempts.
    pub fn polling_timeout(attempts: u32, elapsed: Duration) -> Self {
        Self::new(
            CODE_POLL_TIMEOUT,
            format!(
                "Operation did not complete after {attempts} attempts ({:.1}s elapsed)",
                elapsed.as_secs_f64()
            ),
        )
    }

    pub fn class(&self) -> CodeClass {
        CodeClass::of(&self.code)
    }

    /// True for any `1xxx` code, i.e. applied or queued.
    pub fn is_ok(&self) -> bool {
        self.code.starts_with('1')
    }

    pub fn is_success(&self) -> bool {
        self.code == CODE_SUCCESS
    }

    pub fn is_rejected(&self) -> bool {
        self.code.starts_with('2')
    }
}
