//! Partition identity and log positions.

use std::fmt;

/// Identifies one shard of a named log stream.
///
/// Equality is by value, so a `TopicPartition` can key a `HashMap` shared
/// between the client seam and the reader's bookkeeping.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TopicPartition {
    topic: String,
    partition: u32,
}

impl TopicPartition {
    /// Creates a partition identity from a topic name and partition index.
    #[must_use]
    pub fn new(topic: impl Into<String>, partition: u32) -> Self {
        Self {
            topic: topic.into(),
            partition,
        }
    }

    /// Returns the topic name.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Returns the partition index within the topic.
    #[must_use]
    pub const fn partition(&self) -> u32 {
        self.partition
    }
}

impl fmt::Debug for TopicPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TopicPartition({}-{})", self.topic, self.partition)
    }
}

impl fmt::Display for TopicPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.topic, self.partition)
    }
}

/// Position of a record within a partition log.
///
/// Offsets are assigned by the broker and increase monotonically within a
/// partition. Unsigned by construction, so "negative offset" is not a
/// representable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Offset(u64);

impl Offset {
    /// Creates an offset from a raw value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw offset value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the next offset.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Offset {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<Offset> for u64 {
    fn from(offset: Offset) -> Self {
        offset.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_partition_identity() {
        let a = TopicPartition::new("events", 3);
        let b = TopicPartition::new("events", 3);
        let c = TopicPartition::new("events", 4);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.topic(), "events");
        assert_eq!(a.partition(), 3);
    }

    #[test]
    fn test_topic_partition_display() {
        let tp = TopicPartition::new("events", 7);
        assert_eq!(format!("{tp}"), "events-7");
        assert_eq!(format!("{tp:?}"), "TopicPartition(events-7)");
    }

    #[test]
    fn test_topic_partition_as_map_key() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(TopicPartition::new("events", 0), 1u64);
        map.insert(TopicPartition::new("events", 1), 2u64);

        assert_eq!(map.get(&TopicPartition::new("events", 0)), Some(&1));
        assert_eq!(map.get(&TopicPartition::new("events", 1)), Some(&2));
        assert_eq!(map.get(&TopicPartition::new("other", 0)), None);
    }

    #[test]
    fn test_offset_next() {
        let offset = Offset::new(41);
        assert_eq!(offset.next(), Offset::new(42));
        assert_eq!(format!("{offset}"), "41");
    }

    #[test]
    fn test_offset_next_saturates() {
        let offset = Offset::new(u64::MAX);
        assert_eq!(offset.next(), Offset::new(u64::MAX));
    }

    #[test]
    fn test_offset_ordering() {
        assert!(Offset::new(1) < Offset::new(2));
        assert_eq!(Offset::from(5u64), Offset::new(5));
        assert_eq!(u64::from(Offset::new(5)), 5);
    }
}
