//! Port interfaces for waiting between poll attempts

use std::time::Duration;

use regwapi_common::sync::CancellationToken;

/// Trait for pausing between attempts
pub trait Sleeper: Send + Sync {
    /// Waits for `duration`. Returns `true` if the wait ended because `cancel`
    /// was triggered.
    fn sleep(&self, duration: Duration, cancel: Option<&CancellationToken>) -> bool;
}

/// Blocks the current thread; wakes early when cancelled
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration, cancel: Option<&CancellationToken>) -> bool {
        match cancel {
            Some(token) => token.wait_timeout(duration),
            None => {
                std::thread::sleep(duration);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn cancelled_token_returns_immediately() {
        let token = CancellationToken::new();
        token.cancel();
        let started = Instant::now();
        assert!(ThreadSleeper.sleep(Duration::from_secs(30), Some(&token)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn plain_sleep_reports_not_cancelled() {
        assert!(!ThreadSleeper.sleep(Duration::from_millis(1), None));
    }
}
