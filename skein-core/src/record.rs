//! The record envelope yielded to callers.

use bytes::Bytes;

use crate::types::{Offset, TopicPartition};

/// One record fetched from a partition log.
///
/// Key and value are opaque byte payloads, exactly as the broker returned
/// them. Either may be absent: logs permit keyless records as well as
/// tombstones with no value. Deserialization is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedRecord {
    /// Partition this record was read from.
    pub partition: TopicPartition,
    /// Position of the record within the partition.
    pub offset: Offset,
    /// Record key, if one was written.
    pub key: Option<Bytes>,
    /// Record value; `None` for tombstones.
    pub value: Option<Bytes>,
}

impl FetchedRecord {
    /// Creates an envelope with no key and no value.
    #[must_use]
    pub const fn new(partition: TopicPartition, offset: Offset) -> Self {
        Self {
            partition,
            offset,
            key: None,
            value: None,
        }
    }

    /// Sets the record key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<Bytes>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the record value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<Bytes>) -> Self {
        self.value = Some(value.into());
        self
    }
}
