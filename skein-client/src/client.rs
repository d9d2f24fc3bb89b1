//! Capability traits for driving a broker.

use std::collections::HashMap;
use std::time::Duration;

use skein_core::{FetchedRecord, Offset, TopicPartition};

use crate::error::ClientResult;

/// A consumer handle over a partitioned log.
///
/// The bounded reader borrows an implementation mutably for the duration of
/// one iteration: it assigns partitions, seeks each to a start offset, and
/// then polls until the iteration completes. The reader never closes the
/// client; ownership stays with the caller.
///
/// # Preconditions
///
/// A client must not be driven concurrently from anywhere else while a
/// reader is iterating over it. The fetch position is shared state inside
/// the handle, and interleaved seeks or polls would corrupt the reader's
/// bookkeeping. This is documented rather than enforced.
pub trait BrokerClient {
    /// Replaces the client's partition assignment.
    ///
    /// # Errors
    /// Returns an error if the assignment is rejected by the broker.
    fn assign(&mut self, partitions: &[TopicPartition]) -> ClientResult<()>;

    /// Moves the fetch position of an assigned partition.
    ///
    /// # Errors
    /// Returns an error if the partition is not currently assigned.
    fn seek(&mut self, partition: &TopicPartition, offset: Offset) -> ClientResult<()>;

    /// Fetches the next batch of records across all assigned partitions.
    ///
    /// Blocks for at most `timeout`. An empty batch is a normal outcome
    /// meaning no data was available yet.
    ///
    /// # Errors
    /// Returns a transient error for broker/network hiccups and a fatal
    /// error for everything else; see [`crate::ErrorClass`].
    fn poll(&mut self, timeout: Duration) -> ClientResult<Vec<FetchedRecord>>;
}

/// Offset discovery for building read bounds.
///
/// Callers use these to capture `[earliest, log-end)` ranges before
/// constructing a reader. The reader itself never calls them.
pub trait OffsetLookup {
    /// Returns the earliest available offset for each partition.
    ///
    /// # Errors
    /// Returns an error if the lookup fails.
    fn earliest_offsets(
        &self,
        partitions: &[TopicPartition],
    ) -> ClientResult<HashMap<TopicPartition, Offset>>;

    /// Returns the current log-end offset for each partition.
    ///
    /// The log-end offset is the offset the next produced record would be
    /// assigned, i.e. one past the last existing record.
    ///
    /// # Errors
    /// Returns an error if the lookup fails.
    fn log_end_offsets(
        &self,
        partitions: &[TopicPartition],
    ) -> ClientResult<HashMap<TopicPartition, Offset>>;
}
