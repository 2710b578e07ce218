//! In-memory port implementations for client tests
//!
//! The mock codec records every envelope it encodes and answers decodes from
//! a scripted queue, so tests can assert on payloads without a wire format.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use regwapi_common::sync::CancellationToken;
use regwapi_core::{
    Clock, ExchangeLogger, FixedClock, RegistryClient, RequestEnvelope, Sleeper, Transport,
    WireCodec,
};
use regwapi_domain::{Command, Credentials, Response, Result, Value, WapiError, WireFormat};

pub const EPOCH: i64 = 1_700_000_000;

/// Codec that records envelopes and replays scripted responses.
#[derive(Default)]
pub struct MockCodec {
    pub sent: Mutex<Vec<RequestEnvelope>>,
    replies: Mutex<VecDeque<Response>>,
}

impl MockCodec {
    pub fn new(replies: Vec<Response>) -> Self {
        Self { sent: Mutex::new(Vec::new()), replies: Mutex::new(replies.into()) }
    }

    pub fn sent_commands(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|e| e.command.clone()).collect()
    }

    pub fn sent_data(&self, index: usize) -> Value {
        self.sent.lock().unwrap()[index].data.clone().unwrap_or_default()
    }
}

impl WireCodec for MockCodec {
    fn format(&self) -> WireFormat {
        WireFormat::Json
    }

    fn encode(&self, envelope: &RequestEnvelope) -> Result<String> {
        self.sent.lock().unwrap().push(envelope.clone());
        Ok(envelope.command.clone())
    }

    fn decode(&self, _body: &str) -> Response {
        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            replies.pop_front().unwrap()
        } else {
            replies.front().cloned().unwrap_or_else(|| Response::parse_failure("no reply scripted"))
        }
    }
}

/// Transport that echoes the request or fails with a fixed error.
#[derive(Default)]
pub struct MockTransport {
    pub requests: Mutex<Vec<(WireFormat, String)>>,
    failure: Option<WapiError>,
}

impl MockTransport {
    pub fn failing(error: WapiError) -> Self {
        Self { requests: Mutex::new(Vec::new()), failure: Some(error) }
    }
}

impl Transport for MockTransport {
    fn send(&self, format: WireFormat, request: &str) -> Result<String> {
        self.requests.lock().unwrap().push((format, request.to_string()));
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(request.to_string()),
        }
    }
}

/// Logger that keeps every event as a short text line.
#[derive(Default)]
pub struct RecordingLogger {
    pub events: Mutex<Vec<String>>,
}

impl ExchangeLogger for RecordingLogger {
    fn request(&self, command: &Command, cl_trid: &str) {
        self.events.lock().unwrap().push(format!("request {} {}", command.name, cl_trid));
    }

    fn response(&self, command: &str, response: &Response) {
        self.events.lock().unwrap().push(format!("response {} {}", command, response.code));
    }

    fn failure(&self, command: &str, error: &WapiError) {
        self.events.lock().unwrap().push(format!("failure {} {}", command, error.label()));
    }
}

/// Sleeper that only records requested durations.
#[derive(Default)]
pub struct RecordingSleeper {
    pub sleeps: Mutex<Vec<Duration>>,
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration, cancel: Option<&CancellationToken>) -> bool {
        self.sleeps.lock().unwrap().push(duration);
        cancel.is_some_and(CancellationToken::is_cancelled)
    }
}

pub fn fixed_clock() -> FixedClock {
    FixedClock::new(Utc.timestamp_opt(EPOCH, 0).unwrap()).with_hour(23)
}

pub struct Harness {
    pub client: RegistryClient,
    pub codec: Arc<MockCodec>,
    pub transport: Arc<MockTransport>,
    pub logger: Arc<RecordingLogger>,
    pub sleeper: Arc<RecordingSleeper>,
}

pub fn harness(replies: Vec<Response>) -> Harness {
    harness_with_transport(replies, MockTransport::default())
}

pub fn harness_with_transport(replies: Vec<Response>, transport: MockTransport) -> Harness {
    let codec = Arc::new(MockCodec::new(replies));
    let transport = Arc::new(transport);
    let logger = Arc::new(RecordingLogger::default());
    let sleeper = Arc::new(RecordingSleeper::default());
    let clock: Arc<dyn Clock> = Arc::new(fixed_clock());

    let client = RegistryClient::new(
        Credentials::new("wapi@example.cz", "secret"),
        codec.clone(),
        transport.clone(),
        clock,
    )
    .with_logger(logger.clone())
    .with_sleeper(sleeper.clone());

    Harness { client, codec, transport, logger, sleeper }
}

pub fn domain_info_reply(tech_c: &str, nsset: &str) -> Response {
    Response::new("1000", "OK").with_data(
        Value::map().with(
            "domain",
            Value::map()
                .with("name", "example.cz")
                .with("owner_c", "OWNER-1")
                .with("tech_c", tech_c)
                .with("nsset", nsset),
        ),
    )
}
