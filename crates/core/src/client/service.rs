//! Registry client - composes auth, codec and transport into `call`

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use regwapi_common::sync::CancellationToken;
use regwapi_domain::{
    CodeClass, Command, Credentials, DnsRow, PollSettings, Response, Result, Value, WireFormat,
};
use tracing::{debug, error, info, instrument, warn};

use crate::auth::Clock;
use crate::codec::{RequestEnvelope, WireCodec};
use crate::logging_ports::{ExchangeLogger, NoopExchangeLogger};
use crate::polling::{PollReport, PollSpec, PollingEngine, Sleeper};
use crate::transport_ports::Transport;

/// Registry API client
///
/// Credentials and codec are fixed at construction. Every call computes a
/// fresh auth token, encodes, performs one HTTP round trip and decodes.
pub struct RegistryClient {
    credentials: Credentials,
    codec: Arc<dyn WireCodec>,
    transport: Arc<dyn Transport>,
    pub(crate) clock: Arc<dyn Clock>,
    logger: Arc<dyn ExchangeLogger>,
    poller: PollingEngine,
    poll_settings: PollSettings,
    sequence: AtomicU64,
}

impl RegistryClient {
    /// Create a new registry client
    pub fn new(
        credentials: Credentials,
        codec: Arc<dyn WireCodec>,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            credentials,
            codec,
            transport,
            clock,
            logger: Arc::new(NoopExchangeLogger),
            poller: PollingEngine::default(),
            poll_settings: PollSettings::default(),
            sequence: AtomicU64::new(0),
        }
    }

    /// Attach an exchange logger
    pub fn with_logger(mut self, logger: Arc<dyn ExchangeLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Replace the sleeper used between poll attempts
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.poller = PollingEngine::new(sleeper);
        self
    }

    /// Default budget for the polling helpers
    pub fn with_poll_settings(mut self, settings: PollSettings) -> Self {
        self.poll_settings = settings;
        self
    }

    pub fn format(&self) -> WireFormat {
        self.codec.format()
    }

    pub fn username(&self) -> &str {
        self.credentials.username()
    }

    pub fn poll_settings(&self) -> PollSettings {
        self.poll_settings
    }

    /// `<epoch seconds>-<sequence>`, unique per client instance.
    fn next_cl_trid(&self) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.clock.now_utc().timestamp(), seq)
    }

    /// Issue a named command with an optional payload.
    pub fn call(&self, name: &str, data: impl Into<Option<Value>>) -> Result<Response> {
        let command = Command { name: name.to_string(), data: data.into() };
        self.execute(&command)
    }

    /// Encode, send and decode one command.
    ///
    /// Registry rejections come back as `Ok` responses; only transport and
    /// encoding failures are errors.
    #[instrument(skip(self, command), fields(command = %command.name, format = %self.codec.format()))]
    pub fn execute(&self, command: &Command) -> Result<Response> {
        let cl_trid = self.next_cl_trid();
        self.logger.request(command, &cl_trid);

        let envelope =
            RequestEnvelope::new(command, &self.credentials, self.clock.as_ref(), cl_trid.as_str());
        let wire = self.codec.encode(&envelope).inspect_err(|e| {
            error!(error = %e, "request_encode_failed");
            self.logger.failure(&command.name, e);
        })?;

        debug!(cl_trid = %cl_trid, bytes = wire.len(), "request_sent");
        let body = self.transport.send(self.codec.format(), &wire).inspect_err(|e| {
            error!(error = %e, kind = e.label(), "request_failed");
            self.logger.failure(&command.name, e);
        })?;

        let response = self.codec.decode(&body);
        self.logger.response(&command.name, &response);

        match response.class() {
            CodeClass::Success | CodeClass::Accepted => {
                info!(code = %response.code, "command_completed")
            }
            CodeClass::Rejected => {
                warn!(code = %response.code, result = %response.result, "command_rejected")
            }
            CodeClass::ParseFailure => {
                warn!(result = %response.result, "response_unparsable")
            }
            CodeClass::PollingTimeout | CodeClass::Unexpected => {
                warn!(code = %response.code, result = %response.result, "unexpected_code")
            }
        }

        Ok(response)
    }

    // ------------------------------------------------------------------
    // Derived operations
    // ------------------------------------------------------------------

    pub fn ping(&self) -> Result<Response> {
        self.call("ping", None)
    }

    pub fn domain_info(&self, name: &str) -> Result<Response> {
        self.call("domain-info", Value::map().with("name", name))
    }

    pub fn domain_check(&self, name: &str) -> Result<Response> {
        self.call("domain-check", Value::map().with("name", name))
    }

    pub fn nsset_info(&self, name: &str) -> Result<Response> {
        self.call("nsset-info", Value::map().with("name", name))
    }

    pub fn dns_rows_list(&self, domain: &str) -> Result<Response> {
        self.call("dns-rows-list", Value::map().with("domain", domain))
    }

    pub fn dns_row_add(&self, domain: &str, row: &DnsRow) -> Result<Response> {
        let mut payload = Value::map().with("domain", domain);
        if let Value::Map(fields) = row.to_value() {
            for (key, value) in fields {
                payload = payload.with(key, value);
            }
        }
        self.call("dns-row-add", payload)
    }

    pub fn dns_row_update(
        &self,
        domain: &str,
        row_id: i64,
        ttl: u32,
        rdata: &str,
    ) -> Result<Response> {
        let payload = Value::map()
            .with("domain", domain)
            .with("row_id", row_id)
            .with("ttl", ttl)
            .with("rdata", rdata);
        self.call("dns-row-update", payload)
    }

    pub fn dns_row_delete(&self, domain: &str, row_id: i64) -> Result<Response> {
        self.call("dns-row-delete", Value::map().with("domain", domain).with("row_id", row_id))
    }

    /// Publishes pending DNS changes of a zone.
    pub fn dns_domain_commit(&self, domain: &str) -> Result<Response> {
        self.call("dns-domain-commit", Value::map().with("name", domain))
    }

    // ------------------------------------------------------------------
    // Polling
    // ------------------------------------------------------------------

    /// [`PollSpec`] for `command` using this client's poll settings.
    pub fn poll_spec(&self, command: Command) -> PollSpec {
        PollSpec::from_settings(command, &self.poll_settings)
    }

    /// Poll until complete and return the terminal response
    /// (`9998` on timeout).
    pub fn poll_until_complete(
        &self,
        spec: PollSpec,
        cancel: Option<&CancellationToken>,
    ) -> Result<Response> {
        self.poll_with_report(spec, cancel).map(|report| report.response)
    }

    pub fn poll_with_report(
        &self,
        spec: PollSpec,
        cancel: Option<&CancellationToken>,
    ) -> Result<PollReport> {
        self.poller.run(spec, cancel, |command| self.execute(command))
    }
}
