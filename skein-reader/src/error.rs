//! Reader error types.

use skein_client::ClientError;
use thiserror::Error;

/// Result type for bounded read operations.
pub type ReadResult<T> = Result<T, ReadError>;

/// Errors raised while constructing or driving a bounded read.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReadError {
    /// A constructor argument failed validation.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// The argument name.
        name: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Consecutive transient poll failures exceeded the retry ceiling.
    ///
    /// Fatal: the iteration is dead and the reader yields nothing further.
    #[error("retry limit exceeded after {attempts} transient failures")]
    RetryLimitExceeded {
        /// How many consecutive transient failures were observed.
        attempts: u32,
        /// The last underlying failure.
        #[source]
        source: ClientError,
    },

    /// A fatal (non-retryable) client error surfaced mid-iteration.
    #[error(transparent)]
    Client(#[from] ClientError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = ReadError::InvalidArgument {
            name: "ranges",
            reason: "at least one partition is required",
        };
        let msg = format!("{err}");
        assert!(msg.contains("ranges"));
        assert!(msg.contains("at least one partition"));
    }

    #[test]
    fn test_retry_limit_carries_source() {
        use std::error::Error as _;

        let err = ReadError::RetryLimitExceeded {
            attempts: 6,
            source: ClientError::Timeout {
                message: "fetch".to_string(),
            },
        };
        assert!(format!("{err}").contains("6 transient failures"));
        assert!(err.source().is_some());
    }
}
