//! Skein Core - shared types for bounded log reading.
//!
//! This crate provides the vocabulary shared by the broker-client seam and
//! the bounded reader: partition identity, offsets, and the record envelope
//! handed to callers. It does no I/O and holds no policy.
//!
//! # Design Principles
//!
//! - **Value identity**: a partition is identified by (topic, index) and
//!   compared by value, so it can key maps across crate boundaries.
//! - **Opaque payloads**: keys and values stay as raw bytes; decoding is
//!   the caller's concern.
//! - **No unsafe code**.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod record;
mod types;

pub use record::FetchedRecord;
pub use types::{Offset, TopicPartition};
