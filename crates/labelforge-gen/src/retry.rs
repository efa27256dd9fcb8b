//! Explicit retry policy for external service calls.
//!
//! The policy object is handed to whatever component talks to the outside
//! world; generation and orchestration logic stay retry-agnostic and rely on
//! fallback synthesis instead.
use std::future::Future;
use std::time::Duration;

use crate::capability::CapabilityError;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    retryable: fn(&CapabilityError) -> bool,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            retryable: default_retryable,
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub fn with_predicate(mut self, retryable: fn(&CapabilityError) -> bool) -> Self {
        self.retryable = retryable;
        self
    }

    pub fn is_retryable(&self, err: &CapabilityError) -> bool {
        (self.retryable)(err)
    }

    /// Exponential backoff: `base_delay * 2^(attempt - 1)`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(250))
    }
}

fn default_retryable(err: &CapabilityError) -> bool {
    match err {
        CapabilityError::Transport(_) | CapabilityError::Timeout(_) => true,
        CapabilityError::Status(status) => *status >= 500,
        CapabilityError::Empty => false,
    }
}

/// Run `op` under `policy`, sleeping between attempts.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, CapabilityError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CapabilityError>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < policy.max_attempts && policy.is_retryable(&err) => {
                let delay = policy.delay_for(attempt);
                tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, error = %err,
                    "retrying capability call");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
