//! Client error types and retryability classification.

use skein_core::TopicPartition;
use thiserror::Error;

/// Result type for broker client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised by a broker client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The broker could not be reached.
    #[error("broker unavailable: {message}")]
    Unavailable {
        /// What failed.
        message: String,
    },

    /// A request to the broker timed out in flight.
    ///
    /// Distinct from an empty poll: an empty poll completed and simply had
    /// no data, while this request never completed.
    #[error("request timed out: {message}")]
    Timeout {
        /// What timed out.
        message: String,
    },

    /// The connection dropped mid-request.
    #[error("transport error: {message}")]
    Transport {
        /// What failed.
        message: String,
    },

    /// An operation referenced a partition the client is not assigned to.
    #[error("partition not assigned: {partition}")]
    NotAssigned {
        /// The unassigned partition.
        partition: TopicPartition,
    },

    /// The broker does not know the topic or partition.
    #[error("unknown topic or partition: {partition}")]
    UnknownPartition {
        /// The unknown partition.
        partition: TopicPartition,
    },

    /// Any other broker-side error.
    #[error("broker error: {message}")]
    Broker {
        /// Error description from the broker.
        message: String,
    },
}

/// Whether an error is worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Expected to succeed on retry without changing the outcome.
    Transient,
    /// Retrying will not help; propagate immediately.
    Fatal,
}

impl ClientError {
    /// Classifies this error as transient or fatal.
    ///
    /// Network and broker-availability failures are transient; everything
    /// else is fatal.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Unavailable { .. } | Self::Timeout { .. } | Self::Transport { .. } => {
                ErrorClass::Transient
            }
            Self::NotAssigned { .. } | Self::UnknownPartition { .. } | Self::Broker { .. } => {
                ErrorClass::Fatal
            }
        }
    }

    /// Returns true if this error is classified transient.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self.class(), ErrorClass::Transient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        let err = ClientError::Timeout {
            message: "fetch".to_string(),
        };
        assert_eq!(err.class(), ErrorClass::Transient);
        assert!(err.is_transient());

        let err = ClientError::Unavailable {
            message: "no brokers".to_string(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn test_fatal_classification() {
        let err = ClientError::UnknownPartition {
            partition: TopicPartition::new("events", 0),
        };
        assert_eq!(err.class(), ErrorClass::Fatal);
        assert!(!err.is_transient());

        let err = ClientError::Broker {
            message: "offset out of range".to_string(),
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn test_error_display() {
        let err = ClientError::NotAssigned {
            partition: TopicPartition::new("events", 2),
        };
        assert_eq!(format!("{err}"), "partition not assigned: events-2");
    }
}
