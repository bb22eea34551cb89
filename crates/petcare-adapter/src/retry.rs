//! Bounded retry with a fixed delay between attempts
//!
//! Only transient failures are retried. A permanent failure (missing
//! document, rejected request) is returned as soon as it is seen. After the
//! last attempt the final error is returned as-is, never wrapped.
//!
//! Waiting is a `tokio::time::sleep`, so the caller's runtime keeps running
//! other tasks meanwhile. There is no cancellation: once started, a retry
//! sequence runs until it succeeds or gives up.

use std::future::Future;
use std::time::Duration;

use petcare_domain::{Classify, FailureClass};
use shared::RetryConfig;
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first; zero is treated as one
    pub max_attempts: u32,
    /// Pause after each failed attempt except the last
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Single attempt, no waiting
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, Duration::from_millis(config.delay_ms))
    }
}

/// Runs fallible async operations under a `RetryPolicy`
#[derive(Clone, Debug, Default)]
pub struct RetryExecutor {
    policy: RetryPolicy,
}

impl RetryExecutor {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `operation` until it succeeds, fails permanently, or the attempt
    /// budget is spent
    ///
    /// `label` only appears in log output.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Classify + core::fmt::Display,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(operation = label, attempt, "succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(err) if err.failure_class() == FailureClass::Permanent => {
                    debug!(operation = label, attempt, error = %err, "permanent failure, not retrying");
                    return Err(err);
                }
                Err(err) => {
                    warn!(
                        operation = label,
                        attempt,
                        max_attempts,
                        error = %err,
                        "attempt failed"
                    );
                    if attempt >= max_attempts {
                        return Err(err);
                    }
                    tokio::time::sleep(self.policy.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
