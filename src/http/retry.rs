//! Retry policy
//!
//! Transient failures are retried with exponential backoff up to a fixed
//! number of tries. Quota exhaustion is a separate branch: the policy sleeps
//! until the property quota resets and tries again without spending a try.

use crate::error::{Error, Result};
use chrono::{DateTime, Timelike, Utc};
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// Seconds past the hour to wait before trusting that the quota reset
pub const QUOTA_RESET_GRACE_SECS: u32 = 10;

/// Bounded retry with backoff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts for transient errors, including the first one
    pub max_tries: u32,
    /// Delay after the first failed try; doubles on every further failure
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_tries: 5,
            initial_backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Policy that never sleeps between transient failures
    pub fn no_backoff(max_tries: u32) -> Self {
        Self {
            max_tries,
            initial_backoff: Duration::ZERO,
        }
    }

    /// Delay before try `attempt + 1`, where `attempt` counts failures from 0
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.initial_backoff.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Run `op` until it succeeds, fails permanently or runs out of tries
    pub async fn run<T, F, Fut>(&self, operation: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut failures = 0u32;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_quota_exhausted() => {
                    let wait = seconds_until_quota_reset(Utc::now());
                    info!(
                        "Reached hourly quota limit during {}. Sleeping {} seconds.",
                        operation, wait
                    );
                    tokio::time::sleep(Duration::from_secs(wait)).await;
                }
                Err(e) if e.is_retryable() => {
                    failures += 1;
                    if failures >= self.max_tries {
                        return Err(Error::MaxRetriesExceeded {
                            operation: operation.to_string(),
                            max_tries: self.max_tries,
                            last_error: Box::new(e),
                        });
                    }
                    let delay = self.backoff(failures - 1);
                    warn!(
                        "{} failed (try {}/{}): {}. Retrying in {:?}",
                        operation, failures, self.max_tries, e, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Seconds from `now` until shortly after the next top of the hour, when the
/// hourly property quota has been replenished.
pub fn seconds_until_quota_reset(now: DateTime<Utc>) -> u64 {
    let into_hour = now.minute() * 60 + now.second();
    u64::from(3600 - into_hour + QUOTA_RESET_GRACE_SECS)
}
