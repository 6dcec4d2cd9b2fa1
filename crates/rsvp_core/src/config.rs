//! Configuration for the mutation controller and the service.

use crate::backoff::{BackoffPolicy, LinearBackoff, NoBackoff};
use crate::record::{AttendancePolicy, Limits};
use std::sync::Arc;
use std::time::Duration;

/// Key of the shared document when none is configured.
pub const DEFAULT_KEY: &str = "rsvps";

/// Configuration for retrying conflicting writes.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of read-transform-write attempts.
    pub max_attempts: u32,
    /// Delay policy between attempts.
    pub backoff: Arc<dyn BackoffPolicy>,
}

impl RetryConfig {
    /// Creates a configuration with linear backoff.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: Arc::new(LinearBackoff::default()),
        }
    }

    /// Creates a configuration that retries without waiting.
    pub fn without_backoff(max_attempts: u32) -> Self {
        Self::new(max_attempts).with_backoff(NoBackoff)
    }

    /// Sets the backoff policy.
    pub fn with_backoff(mut self, policy: impl BackoffPolicy + 'static) -> Self {
        self.backoff = Arc::new(policy);
        self
    }

    /// Sets a linear backoff with the given base delay.
    pub fn with_linear_backoff(self, base: Duration) -> Self {
        self.with_backoff(LinearBackoff::new(base))
    }

    /// Delay after the given 1-based attempt lost the compare-and-swap.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff.delay(attempt)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new(5)
    }
}

/// Configuration for [`crate::RsvpService`].
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Key of the shared document.
    pub key: String,
    /// Retry configuration for mutations.
    pub retry: RetryConfig,
    /// Handling of declined drafts that carry attendees.
    pub policy: AttendancePolicy,
    /// Draft limits.
    pub limits: Limits,
}

impl ServiceConfig {
    /// Creates a configuration for the given document key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            retry: RetryConfig::default(),
            policy: AttendancePolicy::default(),
            limits: Limits::default(),
        }
    }

    /// Sets the retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the attendance policy.
    pub fn with_policy(mut self, policy: AttendancePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the draft limits.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_KEY)
    }
}
