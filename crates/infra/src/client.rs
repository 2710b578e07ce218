//! Wiring of a ready-to-use [`RegistryClient`] from configuration

use std::sync::Arc;

use regwapi_core::{Clock, ExchangeLogger, RegistryClient, Sleeper, Transport};
use regwapi_domain::{ClientConfig, Result};
use tracing::info;

use crate::codec::codec_for;
use crate::http::HttpTransport;
use crate::observability::TracingExchangeLogger;
use crate::time::clock_for_timezone;

/// Builds a [`RegistryClient`] from a [`ClientConfig`].
///
/// Unless overridden, the client talks HTTP to the configured base URL, reads
/// the auth hour from the configured timezone, logs exchanges through
/// `tracing` and sleeps on the calling thread while polling.
pub struct RegistryClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    clock: Option<Arc<dyn Clock>>,
    logger: Option<Arc<dyn ExchangeLogger>>,
    sleeper: Option<Arc<dyn Sleeper>>,
}

impl RegistryClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self { config, transport: None, clock: None, logger: None, sleeper: None }
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn logger(mut self, logger: Arc<dyn ExchangeLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = Some(sleeper);
        self
    }

    /// Validate the configuration and assemble the client.
    ///
    /// # Errors
    /// `WapiError::Config` for an invalid configuration or HTTP client setup.
    pub fn build(self) -> Result<RegistryClient> {
        let Self { config, transport, clock, logger, sleeper } = self;
        config.validate()?;

        let transport: Arc<dyn Transport> = match transport {
            Some(transport) => transport,
            None => Arc::new(
                HttpTransport::builder()
                    .base_url(config.base_url.as_str())
                    .timeout(config.request_timeout())
                    .build()?,
            ),
        };
        let clock = clock.unwrap_or_else(|| clock_for_timezone(&config.timezone));
        let logger = logger.unwrap_or_else(|| Arc::new(TracingExchangeLogger::new()));

        let mut client =
            RegistryClient::new(config.credentials(), codec_for(config.format), transport, clock)
                .with_logger(logger)
                .with_poll_settings(config.poll);
        if let Some(sleeper) = sleeper {
            client = client.with_sleeper(sleeper);
        }

        info!(
            endpoint = %config.endpoint_url(),
            user = %config.username,
            timeout_secs = config.timeout_secs,
            "registry_client_ready"
        );
        Ok(client)
    }
}

/// Client for `config` with all defaults.
pub fn connect(config: ClientConfig) -> Result<RegistryClient> {
    RegistryClientBuilder::new(config).build()
}
