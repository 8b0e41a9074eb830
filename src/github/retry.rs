//! Rate-limit handling for GitHub user lookups.
//!
//! Not exponential: a rate-limited request is retried after a constant
//! delay, a bounded number of times.

use std::env;
use std::time::Duration;

use backoff::backoff::{Backoff, Constant};
use tracing::warn;

/// Rate-limited responses tolerated per lookup.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;
const DEFAULT_RETRY_DELAY_SECS: u64 = 3;
const DEFAULT_REQUEST_DELAY_SECS: u64 = 1;

/// Environment variables overriding the delays (value in seconds).
const RETRY_DELAY_ENV_VAR: &str = "BUNDLELOG_RETRY_DELAY_SECS";
const REQUEST_DELAY_ENV_VAR: &str = "BUNDLELOG_REQUEST_DELAY_SECS";

/// How user lookups are paced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Give up after this many rate-limited responses.
    pub max_attempts: u32,
    /// Sleep after a rate-limited response.
    pub retry_delay: Duration,
    /// Sleep after every request.
    pub request_delay: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
            request_delay: Duration::from_secs(DEFAULT_REQUEST_DELAY_SECS),
        }
    }
}

impl RateLimitPolicy {
    /// Default policy with delays taken from the environment when set.
    pub fn from_env() -> Self {
        Self {
            retry_delay: secs_from_env(RETRY_DELAY_ENV_VAR, DEFAULT_RETRY_DELAY_SECS),
            request_delay: secs_from_env(REQUEST_DELAY_ENV_VAR, DEFAULT_REQUEST_DELAY_SECS),
            ..Self::default()
        }
    }

    /// No sleeping at all.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            retry_delay: Duration::ZERO,
            request_delay: Duration::ZERO,
        }
    }
}

fn secs_from_env(var: &str, default: u64) -> Duration {
    match env::var(var) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!("Invalid {} value '{}', using default {}s", var, v, default);
                Duration::from_secs(default)
            }
        },
        _ => Duration::from_secs(default),
    }
}

/// Retry state for one lookup: attempts so far, fixed delay, attempt cap.
#[derive(Debug)]
pub struct RateLimitBackoff {
    attempts: u32,
    max_attempts: u32,
    delay: Constant,
}

impl RateLimitBackoff {
    pub fn new(policy: &RateLimitPolicy) -> Self {
        Self {
            attempts: 0,
            max_attempts: policy.max_attempts,
            delay: Constant::new(policy.retry_delay),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// No further request should be made.
    pub fn exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }

    /// Count a rate-limited response and return how long to wait.
    pub fn on_rate_limited(&mut self) -> Duration {
        self.attempts += 1;
        self.delay.next_backoff().unwrap_or_default()
    }
}
