use std::time::Duration;

use regwapi_core::Transport;
use regwapi_domain::constants::{
    DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, REQUEST_FORM_FIELD,
};
use regwapi_domain::{Result, WapiError, WireFormat};
use reqwest::blocking::Client as ReqwestClient;
use tracing::{debug, instrument};

use crate::errors::{status_error, InfraError};

/// Blocking HTTP transport posting form-encoded envelopes.
///
/// Each call is exactly one POST to `{base_url}/{xml|json}`; failures are
/// reported, never retried.
#[derive(Clone)]
pub struct HttpTransport {
    client: ReqwestClient,
    base_url: String,
}

impl HttpTransport {
    /// Start building a new HTTP transport.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn endpoint(&self, format: WireFormat) -> String {
        format!("{}/{}", self.base_url, format)
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(format = %format))]
    fn send(&self, format: WireFormat, request: &str) -> Result<String> {
        let url = self.endpoint(format);
        debug!(%url, bytes = request.len(), "sending HTTP request");

        let response = self
            .client
            .post(&url)
            .form(&[(REQUEST_FORM_FIELD, request)])
            .send()
            .map_err(|err| WapiError::from(InfraError::from(err)))?;

        let status = response.status();
        debug!(%url, %status, "received HTTP response");
        if !status.is_success() {
            return Err(status_error(status, &url));
        }

        response.text().map_err(|err| {
            WapiError::Request(format!("failed to read response body from {url}: {err}"))
        })
    }
}

/// Builder for [`HttpTransport`].
#[derive(Debug)]
pub struct HttpTransportBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: None,
        }
    }
}

impl HttpTransportBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpTransport> {
        let agent = self
            .user_agent
            .unwrap_or_else(|| format!("regwapi/{}", env!("CARGO_PKG_VERSION")));
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(agent)
            .no_proxy()
            .build()
            .map_err(|err| WapiError::Config(format!("failed to build HTTP client: {err}")))?;

        Ok(HttpTransport { client, base_url: self.base_url.trim_end_matches('/').to_string() })
    }
}
