//! Fixed-delay retry budget for latency probes

use std::time::Duration;
use tunnelbench_common::BenchConfig;

/// Retry configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub attempts: u32,
    /// Pause between consecutive attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&BenchConfig::default())
    }
}

impl From<&BenchConfig> for RetryPolicy {
    fn from(config: &BenchConfig) -> Self {
        Self {
            attempts: config.latency_attempts,
            delay: config.retry_delay,
        }
    }
}

/// Attempt counter over a [`RetryPolicy`]
#[derive(Debug, Clone)]
pub struct Retry {
    policy: RetryPolicy,
    attempt: u32,
}

impl Retry {
    #[must_use]
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy, attempt: 0 }
    }

    /// Claim the next attempt.
    ///
    /// Returns the 1-based attempt number and the pause to take before
    /// running it (zero for the first attempt), or `None` once the budget
    /// is spent.
    pub fn next_attempt(&mut self) -> Option<(u32, Duration)> {
        if self.is_exhausted() {
            return None;
        }
        let pause = if self.attempt == 0 {
            Duration::ZERO
        } else {
            self.policy.delay
        };
        self.attempt = self.attempt.saturating_add(1);
        Some((self.attempt, pause))
    }

    /// Attempts claimed so far
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempt
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.attempt >= self.policy.attempts
    }
}
