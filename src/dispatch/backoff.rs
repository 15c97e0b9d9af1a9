use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(200);
const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(5);
const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Bounded retry schedule: doubling delays, capped, with a hard attempt limit
/// and an optional overall deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub max_attempts: u32,
    pub deadline: Option<Duration>,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial_delay: DEFAULT_INITIAL_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            deadline: None,
        }
    }
}

impl BackoffPolicy {
    /// Delay to wait after failed attempt number `attempt` (1-based).
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.initial_delay
            .saturating_mul(1u32 << exponent)
            .min(self.max_delay)
    }
}

/// Returned when every attempt failed or the deadline would be exceeded.
#[derive(Debug)]
pub struct PollExhausted<E> {
    pub attempts: u32,
    pub last_error: E,
}

/// Runs `operation` until it succeeds, the attempt budget is spent, or the
/// next wait would cross the deadline. `operation` receives the 1-based
/// attempt number.
///
/// # Errors
///
/// Returns [`PollExhausted`] carrying the final error when no attempt
/// succeeded.
pub async fn poll_with_backoff<T, E, F, Fut>(
    policy: &BackoffPolicy,
    mut operation: F,
) -> Result<T, PollExhausted<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let started = Instant::now();
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1u32;
    loop {
        let last_error = match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if attempt >= max_attempts {
            return Err(PollExhausted {
                attempts: attempt,
                last_error,
            });
        }
        let delay = policy.delay_after(attempt);
        if let Some(deadline) = policy.deadline
            && started.elapsed().saturating_add(delay) > deadline
        {
            return Err(PollExhausted {
                attempts: attempt,
                last_error,
            });
        }
        debug!(
            "Attempt {} failed ({}); retrying in {}ms",
            attempt,
            last_error,
            delay.as_millis()
        );
        tokio::time::sleep(delay).await;
        attempt = attempt.saturating_add(1);
    }
}
