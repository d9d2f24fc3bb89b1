//! Deterministic in-memory broker for tests.
//!
//! [`ScriptedBroker`] plays the role of a real broker behind the
//! [`BrokerClient`] trait. It keeps one dense in-memory log per partition
//! and serves polls from the assigned partitions' fetch positions, so
//! end-to-end reader tests can produce data and iterate over it without a
//! running cluster.
//!
//! For failure-path tests, a FIFO script of [`PollOutcome`]s overrides the
//! default behavior one poll at a time: an exact sequence like
//! `[Empty, Transient, Transient, Deliver]` reproduces a flaky broker
//! deterministically.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::time::Duration;

use bytes::Bytes;
use skein_core::{FetchedRecord, Offset, TopicPartition};
use tracing::{debug, trace};

use crate::client::{BrokerClient, OffsetLookup};
use crate::error::{ClientError, ClientResult};

/// Configuration for [`ScriptedBroker`].
#[derive(Debug, Clone)]
pub struct ScriptedBrokerConfig {
    /// Maximum records returned by a single poll.
    pub max_poll_records: u32,
}

impl Default for ScriptedBrokerConfig {
    fn default() -> Self {
        Self {
            max_poll_records: 500,
        }
    }
}

impl ScriptedBrokerConfig {
    /// Sets the per-poll record cap.
    #[must_use]
    pub const fn with_max_poll_records(mut self, max: u32) -> Self {
        self.max_poll_records = max;
        self
    }
}

/// One scripted response to a `poll` call.
#[derive(Debug, Clone)]
pub enum PollOutcome {
    /// Serve records from the in-memory logs as usual.
    Deliver,
    /// Return an empty batch ("no new data yet").
    Empty,
    /// Fail with a transient error.
    Transient {
        /// Error message.
        message: String,
    },
    /// Fail with a fatal error.
    Fatal {
        /// Error message.
        message: String,
    },
    /// Return this exact batch, bypassing logs and fetch positions.
    ///
    /// Lets tests inject stale redeliveries or records outside any
    /// produced log.
    Records(Vec<FetchedRecord>),
}

/// Deterministic in-memory broker.
///
/// Logs are dense: the first record produced to a partition has offset 0
/// and the earliest offset never moves. Fetch positions default to the
/// start of the log until seeked.
#[derive(Debug, Default)]
pub struct ScriptedBroker {
    config: ScriptedBrokerConfig,
    /// Per-partition logs, ordered for deterministic interleaving.
    logs: BTreeMap<TopicPartition, Vec<FetchedRecord>>,
    assignments: Vec<TopicPartition>,
    positions: HashMap<TopicPartition, Offset>,
    script: VecDeque<PollOutcome>,
    poll_calls: u64,
}

impl ScriptedBroker {
    /// Creates a broker with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a broker with custom configuration.
    #[must_use]
    pub fn with_config(config: ScriptedBrokerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Appends a record to a partition's log and returns its offset.
    pub fn produce(
        &mut self,
        partition: &TopicPartition,
        key: impl Into<Bytes>,
        value: impl Into<Bytes>,
    ) -> Offset {
        let log = self.logs.entry(partition.clone()).or_default();
        let offset = Offset::new(log.len() as u64);
        log.push(
            FetchedRecord::new(partition.clone(), offset)
                .with_key(key)
                .with_value(value),
        );
        offset
    }

    /// Queues the response for a future poll.
    ///
    /// Outcomes are consumed in FIFO order, one per `poll` call; once the
    /// script is exhausted, polls go back to serving from the logs.
    pub fn script_poll(&mut self, outcome: PollOutcome) {
        self.script.push_back(outcome);
    }

    /// Returns how many times `poll` has been called.
    #[must_use]
    pub const fn poll_calls(&self) -> u64 {
        self.poll_calls
    }

    /// Returns the log-end offset of a partition (0 if nothing produced).
    #[must_use]
    pub fn log_end(&self, partition: &TopicPartition) -> Offset {
        Offset::new(self.logs.get(partition).map_or(0, Vec::len) as u64)
    }

    /// Returns the currently assigned partitions.
    #[must_use]
    pub fn assignments(&self) -> &[TopicPartition] {
        &self.assignments
    }

    /// Serves the next batch from assigned logs, one record per partition
    /// per round, so partitions interleave the way a broker's fetch
    /// responses do.
    fn drain_assigned(&mut self) -> Vec<FetchedRecord> {
        let cap = self.config.max_poll_records as usize;
        let mut assigned = self.assignments.clone();
        assigned.sort();

        let mut batch = Vec::new();
        loop {
            let mut progressed = false;
            for tp in &assigned {
                if batch.len() >= cap {
                    return batch;
                }
                let Some(log) = self.logs.get(tp) else {
                    continue;
                };
                let position = self.positions.entry(tp.clone()).or_default();
                #[allow(clippy::cast_possible_truncation)]
                let index = position.get() as usize;
                if index < log.len() {
                    batch.push(log[index].clone());
                    *position = position.next();
                    progressed = true;
                }
            }
            if !progressed {
                return batch;
            }
        }
    }
}

impl BrokerClient for ScriptedBroker {
    fn assign(&mut self, partitions: &[TopicPartition]) -> ClientResult<()> {
        debug!(count = partitions.len(), "assigning partitions");
        self.assignments = partitions.to_vec();
        // Fresh assignment resets fetch positions, like a real handle.
        self.positions.clear();
        Ok(())
    }

    fn seek(&mut self, partition: &TopicPartition, offset: Offset) -> ClientResult<()> {
        if !self.assignments.contains(partition) {
            return Err(ClientError::NotAssigned {
                partition: partition.clone(),
            });
        }
        self.positions.insert(partition.clone(), offset);
        Ok(())
    }

    fn poll(&mut self, _timeout: Duration) -> ClientResult<Vec<FetchedRecord>> {
        self.poll_calls += 1;
        match self.script.pop_front() {
            Some(PollOutcome::Empty) => {
                trace!("scripted poll: empty");
                Ok(Vec::new())
            }
            Some(PollOutcome::Transient { message }) => {
                trace!(%message, "scripted poll: transient failure");
                Err(ClientError::Timeout { message })
            }
            Some(PollOutcome::Fatal { message }) => {
                trace!(%message, "scripted poll: fatal failure");
                Err(ClientError::Broker { message })
            }
            Some(PollOutcome::Records(batch)) => {
                trace!(count = batch.len(), "scripted poll: canned batch");
                Ok(batch)
            }
            Some(PollOutcome::Deliver) | None => Ok(self.drain_assigned()),
        }
    }
}

impl OffsetLookup for ScriptedBroker {
    fn earliest_offsets(
        &self,
        partitions: &[TopicPartition],
    ) -> ClientResult<HashMap<TopicPartition, Offset>> {
        Ok(partitions
            .iter()
            .map(|tp| (tp.clone(), Offset::new(0)))
            .collect())
    }

    fn log_end_offsets(
        &self,
        partitions: &[TopicPartition],
    ) -> ClientResult<HashMap<TopicPartition, Offset>> {
        Ok(partitions
            .iter()
            .map(|tp| (tp.clone(), self.log_end(tp)))
            .collect())
    }
}
