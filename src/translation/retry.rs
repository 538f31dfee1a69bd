/*!
 * Retry with exponential backoff.
 *
 * Wraps a single fallible async operation (one HTTP attempt) in a retry loop:
 * delays grow geometrically from an initial interval, are capped per attempt,
 * and the whole loop stops once a total elapsed-time ceiling is reached, at
 * which point the last error is returned. Each retry invokes a notification
 * hook with the error and the upcoming delay; the hook carries no control
 * flow. Backoff state is local to one call.
 */

use std::future::Future;
use std::time::{Duration, Instant};

use rand::Rng;

/// Exponential backoff parameters
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    /// Delay before the first retry
    pub initial_interval: Duration,

    /// Growth factor applied to the interval after each retry
    pub multiplier: f64,

    /// Cap on any single delay
    pub max_interval: Duration,

    /// Ceiling on total time spent across attempts and delays
    pub max_elapsed: Duration,

    /// Jitter range as a fraction of the interval; 0 disables jitter
    pub randomization_factor: f64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(500),
            multiplier: 2.0,
            max_interval: Duration::from_secs(5),
            max_elapsed: Duration::from_secs(30),
            randomization_factor: 0.5,
        }
    }
}

impl BackoffPolicy {
    /// Create a policy with the default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a policy with explicit timings and no jitter, for tests and
    /// deterministic callers
    pub fn fixed(
        initial_interval: Duration,
        multiplier: f64,
        max_interval: Duration,
        max_elapsed: Duration,
    ) -> Self {
        Self {
            initial_interval,
            multiplier,
            max_interval,
            max_elapsed,
            randomization_factor: 0.0,
        }
    }

    /// Randomize an interval within `interval * [1 - rf, 1 + rf]`
    fn jittered(&self, interval: Duration) -> Duration {
        if self.randomization_factor <= 0.0 {
            return interval;
        }
        let delta = interval.as_secs_f64() * self.randomization_factor;
        let low = (interval.as_secs_f64() - delta).max(0.0);
        let high = interval.as_secs_f64() + delta;
        Duration::from_secs_f64(rand::rng().random_range(low..=high))
    }
}

/// Run `operation` until it succeeds or the policy's elapsed budget is spent.
///
/// `notify` is called once per retry with the error that triggered it and the
/// delay before the next attempt. The final error, once the budget is
/// exhausted, is returned without a notification.
pub async fn retry_with_backoff<T, E, F, Fut, N>(
    policy: &BackoffPolicy,
    mut operation: F,
    mut notify: N,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    N: FnMut(&E, Duration),
{
    let started = Instant::now();
    let mut interval = policy.initial_interval;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                let delay = policy.jittered(interval);
                if started.elapsed() + delay >= policy.max_elapsed {
                    return Err(err);
                }

                notify(&err, delay);
                tokio::time::sleep(delay).await;

                interval = std::cmp::min(interval.mul_f64(policy.multiplier), policy.max_interval);
            }
        }
    }
}
