//! Skein Client - the broker-client seam.
//!
//! This crate defines the capability traits the bounded reader drives
//! ([`BrokerClient`] for assign/seek/poll, [`OffsetLookup`] for offset
//! discovery) together with two implementations:
//!
//! - [`ScriptedBroker`]: a deterministic in-memory broker for tests. It
//!   keeps per-partition logs and can replay an exact sequence of poll
//!   outcomes (empty responses, transient failures, canned batches).
//! - `KafkaBrokerClient` (feature `rdkafka`): an adapter over a real
//!   librdkafka consumer.
//!
//! # Error classification
//!
//! Every [`ClientError`] carries a [`ErrorClass`]: transient errors are
//! candidates for bounded retry, fatal errors are not. The classification
//! lives here, next to the errors, so every client implementation agrees
//! on what is retryable.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod client;
mod error;
#[cfg(feature = "rdkafka")]
mod kafka;
mod scripted;

pub use client::{BrokerClient, OffsetLookup};
pub use error::{ClientError, ClientResult, ErrorClass};
#[cfg(feature = "rdkafka")]
pub use kafka::{KafkaBrokerClient, KafkaClientConfig};
pub use scripted::{PollOutcome, ScriptedBroker, ScriptedBrokerConfig};
