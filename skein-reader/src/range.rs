//! Per-partition read bounds.

use std::collections::HashMap;

use skein_core::{Offset, TopicPartition};

use crate::error::{ReadError, ReadResult};

/// A half-open offset interval `[start, stop)`.
///
/// `start == stop` is a valid empty range. Ranges are validated at
/// construction; downstream code trusts `start <= stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetRange {
    start: Offset,
    stop: Offset,
}

impl OffsetRange {
    /// Creates a range from an inclusive start and exclusive stop.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `stop` precedes `start`.
    pub fn new(start: Offset, stop: Offset) -> ReadResult<Self> {
        if stop < start {
            return Err(ReadError::InvalidArgument {
                name: "range",
                reason: "stop offset precedes start offset",
            });
        }
        Ok(Self { start, stop })
    }

    /// Returns the inclusive start offset.
    #[must_use]
    pub const fn start(self) -> Offset {
        self.start
    }

    /// Returns the exclusive stop offset.
    #[must_use]
    pub const fn stop(self) -> Offset {
        self.stop
    }

    /// Returns the number of offsets the range spans.
    #[must_use]
    pub const fn len(self) -> u64 {
        self.stop.get() - self.start.get()
    }

    /// Returns true if the range spans no offsets.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start.get() >= self.stop.get()
    }

    /// Returns true if `offset` lies within the range.
    #[must_use]
    pub fn contains(self, offset: Offset) -> bool {
        offset >= self.start && offset < self.stop
    }
}

/// Immutable table of per-partition read bounds.
///
/// Owned by the caller and read-only to the reader. A table is never
/// empty: construction rejects an empty mapping.
#[derive(Debug, Clone)]
pub struct OffsetRangeTable {
    ranges: HashMap<TopicPartition, OffsetRange>,
}

impl OffsetRangeTable {
    /// Creates a table from explicit per-partition ranges.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the mapping is empty.
    pub fn new(ranges: HashMap<TopicPartition, OffsetRange>) -> ReadResult<Self> {
        if ranges.is_empty() {
            return Err(ReadError::InvalidArgument {
                name: "ranges",
                reason: "at least one partition is required",
            });
        }
        Ok(Self { ranges })
    }

    /// Builds a table by joining a start-offset map with a stop-offset map,
    /// the shape produced by offset discovery (earliest / log-end lookups).
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the maps cover different partitions,
    /// are empty, or any pair is malformed.
    pub fn from_watermarks(
        start_offsets: HashMap<TopicPartition, Offset>,
        stop_offsets: &HashMap<TopicPartition, Offset>,
    ) -> ReadResult<Self> {
        if start_offsets.len() != stop_offsets.len() {
            return Err(ReadError::InvalidArgument {
                name: "stop_offsets",
                reason: "start and stop maps cover different partitions",
            });
        }

        let mut ranges = HashMap::with_capacity(start_offsets.len());
        for (tp, start) in start_offsets {
            let Some(&stop) = stop_offsets.get(&tp) else {
                return Err(ReadError::InvalidArgument {
                    name: "stop_offsets",
                    reason: "partition missing a stop offset",
                });
            };
            ranges.insert(tp, OffsetRange::new(start, stop)?);
        }
        Self::new(ranges)
    }

    /// Returns the range for a partition, if the table covers it.
    #[must_use]
    pub fn get(&self, partition: &TopicPartition) -> Option<OffsetRange> {
        self.ranges.get(partition).copied()
    }

    /// Iterates over the covered partitions.
    pub fn partitions(&self) -> impl Iterator<Item = &TopicPartition> {
        self.ranges.keys()
    }

    /// Iterates over `(partition, range)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&TopicPartition, OffsetRange)> {
        self.ranges.iter().map(|(tp, range)| (tp, *range))
    }

    /// Returns the number of partitions covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Always false: an empty table cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Returns the total number of offsets spanned across all partitions.
    #[must_use]
    pub fn total_span(&self) -> u64 {
        self.ranges.values().map(|range| range.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tp(index: u32) -> TopicPartition {
        TopicPartition::new("events", index)
    }

    #[test]
    fn test_range_validation() {
        let range = OffsetRange::new(Offset::new(5), Offset::new(10)).unwrap();
        assert_eq!(range.len(), 5);
        assert!(!range.is_empty());

        let err = OffsetRange::new(Offset::new(10), Offset::new(5)).unwrap_err();
        assert!(matches!(err, ReadError::InvalidArgument { .. }));
    }

    #[test]
    fn test_equal_bounds_are_a_valid_empty_range() {
        let range = OffsetRange::new(Offset::new(7), Offset::new(7)).unwrap();
        assert!(range.is_empty());
        assert_eq!(range.len(), 0);
        assert!(!range.contains(Offset::new(7)));
    }

    #[test]
    fn test_range_contains() {
        let range = OffsetRange::new(Offset::new(5), Offset::new(10)).unwrap();
        assert!(!range.contains(Offset::new(4)));
        assert!(range.contains(Offset::new(5)));
        assert!(range.contains(Offset::new(9)));
        assert!(!range.contains(Offset::new(10)));
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = OffsetRangeTable::new(HashMap::new()).unwrap_err();
        assert!(matches!(
            err,
            ReadError::InvalidArgument { name: "ranges", .. }
        ));
    }

    #[test]
    fn test_table_lookup_and_span() {
        let mut ranges = HashMap::new();
        ranges.insert(tp(0), OffsetRange::new(Offset::new(0), Offset::new(100)).unwrap());
        ranges.insert(tp(1), OffsetRange::new(Offset::new(50), Offset::new(60)).unwrap());
        let table = OffsetRangeTable::new(ranges).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.total_span(), 110);
        assert_eq!(
            table.get(&tp(1)).unwrap(),
            OffsetRange::new(Offset::new(50), Offset::new(60)).unwrap()
        );
        assert_eq!(table.get(&tp(9)), None);
    }

    #[test]
    fn test_from_watermarks() {
        let mut start = HashMap::new();
        let mut stop = HashMap::new();
        for i in 0..4 {
            start.insert(tp(i), Offset::new(0));
            stop.insert(tp(i), Offset::new(100));
        }

        let table = OffsetRangeTable::from_watermarks(start, &stop).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.total_span(), 400);
    }

    #[test]
    fn test_from_watermarks_mismatched_partitions() {
        let mut start = HashMap::new();
        let mut stop = HashMap::new();
        start.insert(tp(0), Offset::new(0));
        stop.insert(tp(1), Offset::new(100));

        let err = OffsetRangeTable::from_watermarks(start, &stop).unwrap_err();
        assert!(matches!(err, ReadError::InvalidArgument { .. }));

        let mut start = HashMap::new();
        let mut stop = HashMap::new();
        start.insert(tp(0), Offset::new(0));
        stop.insert(tp(0), Offset::new(100));
        stop.insert(tp(1), Offset::new(100));

        let err = OffsetRangeTable::from_watermarks(start, &stop).unwrap_err();
        assert!(matches!(err, ReadError::InvalidArgument { .. }));
    }

    #[test]
    fn test_from_watermarks_empty_maps_rejected() {
        let err = OffsetRangeTable::from_watermarks(HashMap::new(), &HashMap::new()).unwrap_err();
        assert!(matches!(err, ReadError::InvalidArgument { .. }));
    }
}
