//! Real-broker adapter over librdkafka.
//!
//! [`KafkaBrokerClient`] drives an `rdkafka` base consumer through the
//! [`BrokerClient`] seam. Auto-commit is disabled: the bounded reader owns
//! its own progress bookkeeping and never commits.
//!
//! librdkafka surfaces one message per poll, so this adapter drains the
//! consumer into a batch until the caller's timeout or the per-poll record
//! cap is reached.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use bytes::Bytes;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{BaseConsumer, Consumer};
use rdkafka::error::KafkaError;
use rdkafka::message::{BorrowedMessage, Message};
use rdkafka::topic_partition_list::{Offset as KafkaOffset, TopicPartitionList};
use rdkafka::types::RDKafkaErrorCode;
use skein_core::{FetchedRecord, Offset, TopicPartition};
use tracing::debug;

use crate::client::{BrokerClient, OffsetLookup};
use crate::error::{ClientError, ClientResult};

/// Configuration for [`KafkaBrokerClient`].
#[derive(Debug, Clone)]
pub struct KafkaClientConfig {
    /// Comma-separated broker addresses.
    pub bootstrap_servers: String,
    /// Consumer group id, if any. Not required for assigned-only reading.
    pub group_id: Option<String>,
    /// Maximum records returned by a single poll.
    pub max_poll_records: u32,
    /// Timeout for seek operations.
    pub seek_timeout: Duration,
    /// Timeout for metadata lookups (watermarks).
    pub metadata_timeout: Duration,
}

impl KafkaClientConfig {
    /// Creates a configuration pointing at the given brokers.
    #[must_use]
    pub fn new(bootstrap_servers: impl Into<String>) -> Self {
        Self {
            bootstrap_servers: bootstrap_servers.into(),
            group_id: None,
            max_poll_records: 500,
            seek_timeout: Duration::from_secs(5),
            metadata_timeout: Duration::from_secs(5),
        }
    }

    /// Sets the consumer group id.
    #[must_use]
    pub fn with_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Sets the per-poll record cap.
    #[must_use]
    pub const fn with_max_poll_records(mut self, max: u32) -> Self {
        self.max_poll_records = max;
        self
    }
}

/// [`BrokerClient`] implementation backed by a librdkafka base consumer.
pub struct KafkaBrokerClient {
    consumer: BaseConsumer,
    config: KafkaClientConfig,
}

impl KafkaBrokerClient {
    /// Connects a new consumer.
    ///
    /// # Errors
    /// Returns an error if the underlying consumer cannot be created.
    pub fn new(config: KafkaClientConfig) -> ClientResult<Self> {
        let mut builder = ClientConfig::new();
        builder
            .set("bootstrap.servers", &config.bootstrap_servers)
            .set("enable.auto.commit", "false")
            .set("enable.partition.eof", "false");
        if let Some(group_id) = &config.group_id {
            builder.set("group.id", group_id);
        }

        let consumer: BaseConsumer = builder.create().map_err(|err| map_error(&err))?;
        debug!(servers = %config.bootstrap_servers, "kafka consumer created");
        Ok(Self { consumer, config })
    }

    fn watermarks(
        &self,
        partitions: &[TopicPartition],
        pick: impl Fn(i64, i64) -> i64,
    ) -> ClientResult<HashMap<TopicPartition, Offset>> {
        let mut offsets = HashMap::with_capacity(partitions.len());
        for tp in partitions {
            #[allow(clippy::cast_possible_wrap)]
            let (low, high) = self
                .consumer
                .fetch_watermarks(tp.topic(), tp.partition() as i32, self.config.metadata_timeout)
                .map_err(|err| map_error(&err))?;
            #[allow(clippy::cast_sign_loss)]
            offsets.insert(tp.clone(), Offset::new(pick(low, high) as u64));
        }
        Ok(offsets)
    }
}

impl BrokerClient for KafkaBrokerClient {
    fn assign(&mut self, partitions: &[TopicPartition]) -> ClientResult<()> {
        let mut list = TopicPartitionList::with_capacity(partitions.len());
        for tp in partitions {
            #[allow(clippy::cast_possible_wrap)]
            list.add_partition(tp.topic(), tp.partition() as i32);
        }
        self.consumer.assign(&list).map_err(|err| map_error(&err))
    }

    #[allow(clippy::cast_possible_wrap)]
    fn seek(&mut self, partition: &TopicPartition, offset: Offset) -> ClientResult<()> {
        self.consumer
            .seek(
                partition.topic(),
                partition.partition() as i32,
                KafkaOffset::Offset(offset.get() as i64),
                self.config.seek_timeout,
            )
            .map_err(|err| map_seek_error(&err, partition))
    }

    fn poll(&mut self, timeout: Duration) -> ClientResult<Vec<FetchedRecord>> {
        let deadline = Instant::now() + timeout;
        let cap = self.config.max_poll_records as usize;
        let mut batch = Vec::new();

        while batch.len() < cap {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.consumer.poll(remaining) {
                Some(Ok(message)) => batch.push(convert(&message)),
                Some(Err(err)) => {
                    if batch.is_empty() {
                        return Err(map_error(&err));
                    }
                    // Deliver what we have; the error resurfaces on the
                    // next poll if it persists.
                    break;
                }
                None => break,
            }
        }
        Ok(batch)
    }
}

impl OffsetLookup for KafkaBrokerClient {
    fn earliest_offsets(
        &self,
        partitions: &[TopicPartition],
    ) -> ClientResult<HashMap<TopicPartition, Offset>> {
        self.watermarks(partitions, |low, _high| low)
    }

    fn log_end_offsets(
        &self,
        partitions: &[TopicPartition],
    ) -> ClientResult<HashMap<TopicPartition, Offset>> {
        self.watermarks(partitions, |_low, high| high)
    }
}

fn convert(message: &BorrowedMessage<'_>) -> FetchedRecord {
    #[allow(clippy::cast_sign_loss)]
    let partition = TopicPartition::new(message.topic(), message.partition() as u32);
    #[allow(clippy::cast_sign_loss)]
    let offset = Offset::new(message.offset() as u64);

    let mut record = FetchedRecord::new(partition, offset);
    if let Some(key) = message.key() {
        record = record.with_key(Bytes::copy_from_slice(key));
    }
    if let Some(payload) = message.payload() {
        record = record.with_value(Bytes::copy_from_slice(payload));
    }
    record
}

/// Maps a librdkafka error into the client taxonomy, preserving the
/// retriable/fatal split.
fn map_error(err: &KafkaError) -> ClientError {
    match err.rdkafka_error_code() {
        Some(
            RDKafkaErrorCode::BrokerTransportFailure
            | RDKafkaErrorCode::AllBrokersDown
            | RDKafkaErrorCode::LeaderNotAvailable
            | RDKafkaErrorCode::NotLeaderForPartition,
        ) => ClientError::Unavailable {
            message: err.to_string(),
        },
        Some(RDKafkaErrorCode::OperationTimedOut | RDKafkaErrorCode::RequestTimedOut) => {
            ClientError::Timeout {
                message: err.to_string(),
            }
        }
        Some(RDKafkaErrorCode::NetworkException) => ClientError::Transport {
            message: err.to_string(),
        },
        _ => ClientError::Broker {
            message: err.to_string(),
        },
    }
}

fn map_seek_error(err: &KafkaError, partition: &TopicPartition) -> ClientError {
    match err.rdkafka_error_code() {
        Some(
            RDKafkaErrorCode::UnknownPartition
            | RDKafkaErrorCode::UnknownTopic
            | RDKafkaErrorCode::UnknownTopicOrPartition,
        ) => ClientError::UnknownPartition {
            partition: partition.clone(),
        },
        _ => map_error(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_codes_map_transient() {
        let err = KafkaError::MessageConsumption(RDKafkaErrorCode::RequestTimedOut);
        assert!(map_error(&err).is_transient());

        let err = KafkaError::MessageConsumption(RDKafkaErrorCode::BrokerTransportFailure);
        assert!(map_error(&err).is_transient());

        let err = KafkaError::MessageConsumption(RDKafkaErrorCode::AllBrokersDown);
        assert!(map_error(&err).is_transient());
    }

    #[test]
    fn test_other_codes_map_fatal() {
        let err = KafkaError::MessageConsumption(RDKafkaErrorCode::OffsetOutOfRange);
        assert!(!map_error(&err).is_transient());

        let err = KafkaError::MessageConsumption(RDKafkaErrorCode::InvalidMessage);
        assert!(!map_error(&err).is_transient());
    }

    #[test]
    fn test_seek_unknown_partition_mapping() {
        let tp = TopicPartition::new("events", 1);
        let err = KafkaError::Seek("unknown".to_string());
        // Seek errors without a known code fall through to the generic map.
        assert!(matches!(
            map_seek_error(&err, &tp),
            ClientError::Broker { .. }
        ));

        let err = KafkaError::MessageConsumption(RDKafkaErrorCode::UnknownTopicOrPartition);
        assert!(matches!(
            map_seek_error(&err, &tp),
            ClientError::UnknownPartition { .. }
        ));
    }
}
