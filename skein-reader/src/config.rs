//! Reader configuration.

use std::time::Duration;

/// Tunables for a bounded read.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Consecutive transient poll failures tolerated before the read
    /// fails with a retry-limit error.
    pub max_retry_attempts: u32,

    /// How long a single poll round-trip may block.
    pub poll_timeout: Duration,

    /// Delay between a transient failure and the retrying poll.
    ///
    /// Default: none; retries go out immediately.
    pub retry_backoff: Duration,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_retry_attempts: 5,
            poll_timeout: Duration::from_secs(1),
            retry_backoff: Duration::ZERO,
        }
    }
}

impl ReaderConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the retry ceiling.
    #[must_use]
    pub const fn with_max_retry_attempts(mut self, max: u32) -> Self {
        self.max_retry_attempts = max;
        self
    }

    /// Sets the per-poll timeout.
    #[must_use]
    pub const fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Sets the delay before each retrying poll.
    #[must_use]
    pub const fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReaderConfig::default();
        assert_eq!(config.max_retry_attempts, 5);
        assert_eq!(config.poll_timeout, Duration::from_secs(1));
        assert_eq!(config.retry_backoff, Duration::ZERO);
    }

    #[test]
    fn test_builders() {
        let config = ReaderConfig::new()
            .with_max_retry_attempts(2)
            .with_poll_timeout(Duration::from_millis(250))
            .with_retry_backoff(Duration::from_millis(10));

        assert_eq!(config.max_retry_attempts, 2);
        assert_eq!(config.poll_timeout, Duration::from_millis(250));
        assert_eq!(config.retry_backoff, Duration::from_millis(10));
    }
}
