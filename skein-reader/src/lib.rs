//! Skein Reader - bounded multi-partition pull iteration.
//!
//! Given a borrowed broker client and, for each partition, an inclusive
//! start offset and exclusive stop offset, [`RangeReader`] yields exactly
//! the records in `[start, stop)` for every partition, merged into one
//! sequential iteration, tolerating transient broker failures through
//! bounded retry.
//!
//! # Guarantees
//!
//! - Within a partition, records come out in strictly increasing offset
//!   order, with no duplicates and nothing at or past the stop bound.
//! - Across partitions there is no ordering: records interleave in the
//!   order the broker returned them.
//! - The reader never commits offsets and never reassigns partitions after
//!   the initial assignment.
//!
//! # Single pass
//!
//! A reader is consumed by exactly one forward traversal and is fused:
//! once it finishes (or yields a fatal error) it returns `None` forever.
//! Re-reading the same ranges requires a new reader, and is only safe if
//! nothing else has moved the client's fetch positions in between.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! use skein_client::ScriptedBroker;
//! use skein_core::{Offset, TopicPartition};
//! use skein_reader::{OffsetRange, OffsetRangeTable, RangeReader, ReaderConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut broker = ScriptedBroker::new();
//! let tp = TopicPartition::new("events", 0);
//! for i in 0..10 {
//!     broker.produce(&tp, format!("k{i}"), "payload");
//! }
//!
//! let mut ranges = HashMap::new();
//! ranges.insert(tp, OffsetRange::new(Offset::new(2), Offset::new(7))?);
//! let table = OffsetRangeTable::new(ranges)?;
//!
//! let reader = RangeReader::new(&mut broker, table, ReaderConfig::default());
//! let records = reader.collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(records.len(), 5);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod config;
mod cursor;
mod error;
mod range;
mod reader;
mod retry;

pub use config::ReaderConfig;
pub use cursor::{CursorSet, Disposition};
pub use error::{ReadError, ReadResult};
pub use range::{OffsetRange, OffsetRangeTable};
pub use reader::RangeReader;
pub use retry::{RetryDecision, RetryState};
