//! Per-partition progress tracking.
//!
//! A [`CursorSet`] turns a broker's poll responses, which carry whatever
//! each assigned partition has next, into exact `[start, stop)` semantics:
//! every incoming record is classified as accepted, stale, or beyond the
//! stop bound, and completion is tracked per partition.

use std::collections::HashMap;

use skein_core::{Offset, TopicPartition};

use crate::range::OffsetRangeTable;

/// How an incoming record relates to its partition's cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The record is the next expected chunk of the range; yield it.
    Accepted,
    /// Duplicate or stale redelivery of an already-consumed offset; skip.
    Stale,
    /// The record lies at or past the stop bound; skip, and the partition
    /// is finished even though this record is discarded.
    BeyondStop,
}

/// Read progress for one partition.
#[derive(Debug, Clone)]
struct Cursor {
    /// Next offset the reader expects to accept.
    next_offset: Offset,
    /// Exclusive stop bound.
    stop: Offset,
    /// Whether the partition has reached its bound. Never reverts.
    done: bool,
}

/// One cursor per partition in the range table.
///
/// Exclusively owned by a single reader instance; [`CursorSet::observe`]
/// is the only mutation path.
#[derive(Debug)]
pub struct CursorSet {
    cursors: HashMap<TopicPartition, Cursor>,
}

impl CursorSet {
    /// Initializes one cursor per table entry.
    ///
    /// A partition whose range is empty starts out done.
    #[must_use]
    pub fn new(table: &OffsetRangeTable) -> Self {
        let cursors = table
            .iter()
            .map(|(tp, range)| {
                (
                    tp.clone(),
                    Cursor {
                        next_offset: range.start(),
                        stop: range.stop(),
                        done: range.is_empty(),
                    },
                )
            })
            .collect();
        Self { cursors }
    }

    /// Returns true once every partition has reached its bound.
    #[must_use]
    pub fn all_done(&self) -> bool {
        self.cursors.values().all(|cursor| cursor.done)
    }

    /// Returns how many partitions have not yet reached their bound.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cursors.values().filter(|cursor| !cursor.done).count()
    }

    /// Classifies an incoming record and updates the partition's cursor.
    ///
    /// Returns `None` for a partition the table does not cover; such
    /// records are discarded by the caller.
    pub fn observe(&mut self, partition: &TopicPartition, offset: Offset) -> Option<Disposition> {
        let cursor = self.cursors.get_mut(partition)?;

        if cursor.done {
            // Completed partitions accept nothing further.
            return Some(if offset >= cursor.stop {
                Disposition::BeyondStop
            } else {
                Disposition::Stale
            });
        }
        if offset < cursor.next_offset {
            return Some(Disposition::Stale);
        }
        if offset >= cursor.stop {
            cursor.done = true;
            return Some(Disposition::BeyondStop);
        }

        cursor.next_offset = offset.next();
        if cursor.next_offset >= cursor.stop {
            cursor.done = true;
        }
        Some(Disposition::Accepted)
    }
}
