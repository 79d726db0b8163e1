//! Retry mechanism driven by a fixed backoff schedule

use super::types::BackoffSchedule;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Retries a fallible async operation according to a [`BackoffSchedule`]
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    schedule: BackoffSchedule,
    cancel: Option<CancellationToken>,
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(schedule: BackoffSchedule) -> Self {
        Self {
            schedule,
            cancel: None,
        }
    }

    /// Abort the backoff wait as soon as `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Get the schedule driving this policy
    pub fn schedule(&self) -> &BackoffSchedule {
        &self.schedule
    }

    /// Execute a function with retry logic
    ///
    /// The last error is returned once the retry ceiling is reached or the
    /// cancellation token fires during a backoff wait.
    pub async fn call<F, Fut, R, E>(&self, mut f: F) -> std::result::Result<R, E>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<R, E>>,
        E: std::fmt::Display,
    {
        let max_attempts = self.schedule.max_attempts();
        let mut attempt = 1u32;

        loop {
            match f().await {
                Ok(result) => {
                    if attempt > 1 {
                        debug!("Succeeded on attempt {}", attempt);
                    }
                    return Ok(result);
                }
                Err(error) => {
                    if attempt >= max_attempts {
                        warn!("Giving up after {} attempts: {}", attempt, error);
                        return Err(error);
                    }

                    let delay = self.schedule.delay_for(attempt - 1);
                    debug!(
                        "Attempt {}/{} failed: {}, retrying in {:?}",
                        attempt, max_attempts, error, delay
                    );

                    match &self.cancel {
                        Some(token) => {
                            tokio::select! {
                                _ = token.cancelled() => {
                                    debug!("Retry aborted by shutdown");
                                    return Err(error);
                                }
                                _ = tokio::time::sleep(delay) => {}
                            }
                        }
                        None => tokio::time::sleep(delay).await,
                    }

                    attempt += 1;
                }
            }
        }
    }
}
