// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded retry with linear back-off for control-plane requests.

use crate::error::ApiError;
use hy_core::Clock;
use std::future::Future;
use std::time::Duration;

/// Default number of attempts per request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Retry policy: up to `max_attempts` tries, sleeping `i * step` before attempt `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: DEFAULT_MAX_ATTEMPTS, step: Duration::from_secs(1) }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts, ..Self::default() }
    }

    /// Single attempt, no sleeping.
    pub fn none() -> Self {
        Self { max_attempts: 1, step: Duration::ZERO }
    }

    /// Sleep before the zero-based attempt `attempt`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.step.saturating_mul(attempt)
    }
}

/// Run `attempt` under `policy`, retrying transient [`ApiError`]s.
///
/// Definitive errors are returned immediately. On exhaustion the last error
/// is returned.
pub async fn with_retry<C, T, F, Fut>(
    policy: &RetryPolicy,
    clock: &C,
    operation: &str,
    mut attempt: F,
) -> Result<T, ApiError>
where
    C: Clock,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut n = 0;
    loop {
        let delay = policy.backoff(n);
        if !delay.is_zero() {
            clock.sleep(delay).await;
        }
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && n + 1 < max_attempts => {
                n += 1;
                tracing::warn!(operation, attempt = n, error = %e, "transient failure, retrying");
            }
            Err(e) => {
                if e.is_transient() {
                    tracing::warn!(operation, attempts = n + 1, error = %e, "giving up after retries");
                }
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
