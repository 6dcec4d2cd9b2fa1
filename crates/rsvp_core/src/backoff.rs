//! Delay policies between conflicting attempts.

use std::fmt::Debug;
use std::time::Duration;

/// Decides how long to wait after a conflicting attempt.
///
/// `attempt` is the 1-based number of the attempt that just lost the
/// compare-and-swap. A zero delay means retry immediately.
pub trait BackoffPolicy: Debug + Send + Sync {
    /// Returns the delay before the next attempt.
    fn delay(&self, attempt: u32) -> Duration;
}

/// Waits `base * attempt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearBackoff {
    /// Delay after the first conflict.
    pub base: Duration,
}

impl LinearBackoff {
    /// Creates a linear policy with the given base delay.
    pub const fn new(base: Duration) -> Self {
        Self { base }
    }
}

impl Default for LinearBackoff {
    fn default() -> Self {
        Self::new(Duration::from_millis(25))
    }
}

impl BackoffPolicy for LinearBackoff {
    fn delay(&self, attempt: u32) -> Duration {
        self.base.saturating_mul(attempt)
    }
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoBackoff;

impl BackoffPolicy for NoBackoff {
    fn delay(&self, _attempt: u32) -> Duration {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_grows_with_attempt() {
        let policy = LinearBackoff::new(Duration::from_millis(20));
        assert_eq!(policy.delay(1), Duration::from_millis(20));
        assert_eq!(policy.delay(2), Duration::from_millis(40));
        assert_eq!(policy.delay(5), Duration::from_millis(100));
    }

    #[test]
    fn linear_default_base() {
        assert_eq!(LinearBackoff::default().delay(1), Duration::from_millis(25));
    }

    #[test]
    fn linear_saturates() {
        let policy = LinearBackoff::new(Duration::MAX);
        assert_eq!(policy.delay(3), Duration::MAX);
    }

    #[test]
    fn no_backoff_is_zero() {
        assert_eq!(NoBackoff.delay(1), Duration::ZERO);
        assert_eq!(NoBackoff.delay(100), Duration::ZERO);
    }
}
