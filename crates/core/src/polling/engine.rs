//! Polling engine
//!
//! Re-issues a status command until the change it watches is observed.
//!
//! After each call the response is classified:
//! 1. a custom completion predicate returning `true` means **success**;
//!    without a predicate, code `1000` means success
//! 2. a `2xxx` code means **error**: a definite rejection, returned at once
//! 3. anything else (notably `1001`) is **pending**: sleep, then retry
//!
//! When the attempt budget runs out while pending, a synthesized `9998`
//! response is returned. Transport failures are never retried here.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use regwapi_common::sync::CancellationToken;
use regwapi_domain::constants::{
    CODE_SUCCESS, DEFAULT_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL_SECS,
};
use regwapi_domain::{
    impl_wire_name_conversions, Command, PollSettings, Response, Result, WapiError,
};
use tracing::{debug, info, instrument, warn};

use super::ports::{Sleeper, ThreadSleeper};

/// Custom completion check evaluated against each response
pub type CompletionPredicate = Box<dyn Fn(&Response) -> bool + Send + Sync>;

/// What to poll and for how long
pub struct PollSpec {
    command: Command,
    is_complete: Option<CompletionPredicate>,
    max_attempts: u32,
    interval: Duration,
}

impl PollSpec {
    /// Polls `command` with the default budget (60 attempts, 10 s apart).
    pub fn new(command: Command) -> Self {
        Self {
            command,
            is_complete: None,
            max_attempts: DEFAULT_POLL_ATTEMPTS,
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }

    pub fn from_settings(command: Command, settings: &PollSettings) -> Self {
        Self::new(command).max_attempts(settings.max_attempts).interval(settings.interval())
    }

    /// Replaces the default `1000` check.
    pub fn until<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Response) -> bool + Send + Sync + 'static,
    {
        self.is_complete = Some(Box::new(predicate));
        self
    }

    /// At least one attempt is always made.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn attempts(&self) -> u32 {
        self.max_attempts
    }

    fn classify(&self, response: &Response) -> Option<PollOutcome> {
        let complete = match &self.is_complete {
            Some(predicate) => predicate(response),
            None => response.code == CODE_SUCCESS,
        };
        if complete {
            Some(PollOutcome::Success)
        } else if response.is_rejected() {
            Some(PollOutcome::Error)
        } else {
            None
        }
    }
}

impl fmt::Debug for PollSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollSpec")
            .field("command", &self.command.name)
            .field("custom_predicate", &self.is_complete.is_some())
            .field("max_attempts", &self.max_attempts)
            .field("interval", &self.interval)
            .finish()
    }
}

/// Terminal state of a polling run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PollOutcome {
    Success,
    Error,
    Timeout,
}

impl_wire_name_conversions!(PollOutcome {
    Success => "success",
    Error => "error",
    Timeout => "timeout",
});

/// Result of a polling run with its bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollReport {
    pub outcome: PollOutcome,
    /// Last response seen, or the synthesized `9998` response on timeout.
    pub response: Response,
    pub attempts: u32,
    pub elapsed: Duration,
}

/// Runs poll loops, sleeping through an injected [`Sleeper`]
#[derive(Clone)]
pub struct PollingEngine {
    sleeper: Arc<dyn Sleeper>,
}

impl Default for PollingEngine {
    fn default() -> Self {
        Self::new(Arc::new(ThreadSleeper))
    }
}

impl PollingEngine {
    pub fn new(sleeper: Arc<dyn Sleeper>) -> Self {
        Self { sleeper }
    }

    /// Calls `call` with the [`PollSpec`] command until a terminal outcome.
    ///
    /// Cancellation is checked before every attempt and honoured during every
    /// sleep; either way the run ends with [`WapiError::Cancelled`].
    #[instrument(
        skip_all,
        fields(command = %spec.command.name, max_attempts = spec.max_attempts)
    )]
    pub fn run<F>(
        &self,
        spec: PollSpec,
        cancel: Option<&CancellationToken>,
        mut call: F,
    ) -> Result<PollReport>
    where
        F: FnMut(&Command) -> Result<Response>,
    {
        let started = Instant::now();

        for attempt in 1..=spec.max_attempts {
            if cancel.is_some_and(CancellationToken::is_cancelled) {
                warn!(attempt, "poll_cancelled");
                return Err(WapiError::Cancelled);
            }

            debug!("Polling attempt {}/{}", attempt, spec.max_attempts);
            let response = call(&spec.command)?;

            if let Some(outcome) = spec.classify(&response) {
                let elapsed = started.elapsed();
                match outcome {
                    PollOutcome::Error => {
                        warn!(attempt, code = %response.code, result = %response.result, "poll_rejected")
                    }
                    _ => info!(attempt, elapsed_ms = elapsed.as_millis() as u64, "poll_completed"),
                }
                return Ok(PollReport { outcome, response, attempts: attempt, elapsed });
            }

            debug!(attempt, code = %response.code, "poll_pending");
            if attempt < spec.max_attempts && self.sleeper.sleep(spec.interval, cancel) {
                warn!(attempt, "poll_cancelled");
                return Err(WapiError::Cancelled);
            }
        }

        let elapsed = started.elapsed();
        warn!(attempts = spec.max_attempts, elapsed_ms = elapsed.as_millis() as u64, "poll_timeout");
        Ok(PollReport {
            outcome: PollOutcome::Timeout,
            response: Response::polling_timeout(spec.max_attempts, elapsed),
            attempts: spec.max_attempts,
            elapsed,
        })
    }
}
