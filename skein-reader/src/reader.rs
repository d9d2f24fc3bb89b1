//! The bounded pull iterator.

use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::thread;

use skein_client::BrokerClient;
use skein_core::{FetchedRecord, TopicPartition};
use tracing::{debug, trace, warn};

use crate::config::ReaderConfig;
use crate::cursor::{CursorSet, Disposition};
use crate::error::{ReadError, ReadResult};
use crate::range::OffsetRangeTable;
use crate::retry::{RetryDecision, RetryState};

/// Where the reader is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReaderState {
    /// Constructed; the client has not been touched yet.
    Unassigned,
    /// Assigned and seeked; polling until every cursor completes.
    Fetching,
    /// Terminal. Nothing further is yielded.
    Finished,
}

/// Pull iterator over exactly the records in each partition's
/// `[start, stop)` range.
///
/// Construction performs no I/O. On the first advancement the reader
/// assigns the client to every partition in the table and seeks each to
/// its start offset; after that, each advancement either yields a
/// buffered record or runs poll cycles (through the retry policy) until
/// one yields something or every partition completes.
///
/// The client is borrowed for the reader's lifetime and must not be
/// driven from anywhere else while iteration is in progress.
pub struct RangeReader<'c, C: BrokerClient> {
    client: &'c mut C,
    config: ReaderConfig,
    table: OffsetRangeTable,
    cursors: CursorSet,
    retry: RetryState,
    /// Accepted records from the current poll cycle, in broker order.
    buffer: VecDeque<FetchedRecord>,
    state: ReaderState,
}

impl<'c, C: BrokerClient> RangeReader<'c, C> {
    /// Creates a reader over the given bounds.
    ///
    /// The table carries its own validation; a constructed table is
    /// always non-empty and well-formed, so reader construction cannot
    /// fail.
    #[must_use]
    pub fn new(client: &'c mut C, table: OffsetRangeTable, config: ReaderConfig) -> Self {
        let cursors = CursorSet::new(&table);
        let retry = RetryState::new(config.max_retry_attempts);
        Self {
            client,
            config,
            table,
            cursors,
            retry,
            buffer: VecDeque::new(),
            state: ReaderState::Unassigned,
        }
    }

    /// Assigns every partition in the table and seeks each to its range
    /// start.
    fn start(&mut self) -> ReadResult<()> {
        let partitions: Vec<TopicPartition> = self.table.partitions().cloned().collect();
        debug!(
            partitions = partitions.len(),
            span = self.table.total_span(),
            "starting bounded read"
        );
        self.client.assign(&partitions)?;
        for (tp, range) in self.table.iter() {
            trace!(partition = %tp, start = %range.start(), stop = %range.stop(), "seek");
            self.client.seek(tp, range.start())?;
        }
        Ok(())
    }

    /// Runs one poll through the retry policy.
    ///
    /// Loops on transient failures until a poll succeeds (an empty batch
    /// counts) or the retry ceiling is exceeded. Fatal errors propagate
    /// without retry.
    fn poll_once(&mut self) -> ReadResult<Vec<FetchedRecord>> {
        loop {
            match self.client.poll(self.config.poll_timeout) {
                Ok(batch) => {
                    self.retry.record_success();
                    return Ok(batch);
                }
                Err(err) if err.is_transient() => match self.retry.record_transient() {
                    RetryDecision::Retry => {
                        warn!(
                            error = %err,
                            attempt = self.retry.attempt(),
                            max = self.retry.max_attempts(),
                            "transient poll failure, retrying"
                        );
                        if !self.config.retry_backoff.is_zero() {
                            thread::sleep(self.config.retry_backoff);
                        }
                    }
                    RetryDecision::Exhausted => {
                        return Err(ReadError::RetryLimitExceeded {
                            attempts: self.retry.attempt(),
                            source: err,
                        });
                    }
                },
                Err(err) => return Err(ReadError::Client(err)),
            }
        }
    }

    /// Classifies a poll batch, buffering accepted records in arrival
    /// order.
    fn absorb(&mut self, batch: Vec<FetchedRecord>) {
        for record in batch {
            match self.cursors.observe(&record.partition, record.offset) {
                Some(Disposition::Accepted) => {
                    trace!(partition = %record.partition, offset = %record.offset, "accept");
                    self.buffer.push_back(record);
                }
                Some(Disposition::Stale) => {
                    trace!(partition = %record.partition, offset = %record.offset, "skip stale");
                }
                Some(Disposition::BeyondStop) => {
                    trace!(partition = %record.partition, offset = %record.offset, "skip past stop");
                }
                None => {
                    debug!(partition = %record.partition, "dropping record from uncovered partition");
                }
            }
        }
    }

    fn advance(&mut self) -> Option<ReadResult<FetchedRecord>> {
        loop {
            if let Some(record) = self.buffer.pop_front() {
                return Some(Ok(record));
            }
            match self.state {
                ReaderState::Finished => return None,
                ReaderState::Unassigned => {
                    if let Err(err) = self.start() {
                        self.state = ReaderState::Finished;
                        return Some(Err(err));
                    }
                    self.state = ReaderState::Fetching;
                }
                ReaderState::Fetching => {
                    // Completion is checked before every poll, so empty
                    // ranges finish with zero round-trips past assignment.
                    if self.cursors.all_done() {
                        debug!("all partitions complete");
                        self.state = ReaderState::Finished;
                        return None;
                    }
                    match self.poll_once() {
                        Ok(batch) => {
                            if !batch.is_empty() {
                                trace!(
                                    records = batch.len(),
                                    remaining = self.cursors.remaining(),
                                    "poll cycle"
                                );
                            }
                            self.absorb(batch);
                        }
                        Err(err) => {
                            self.state = ReaderState::Finished;
                            return Some(Err(err));
                        }
                    }
                }
            }
        }
    }
}

impl<C: BrokerClient> Iterator for RangeReader<'_, C> {
    type Item = ReadResult<FetchedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}

impl<C: BrokerClient> FusedIterator for RangeReader<'_, C> {}
