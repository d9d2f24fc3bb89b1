//! Cursor classification benchmarks.
//!
//! Measures the per-record cost of the accept/stale/beyond classification
//! that every polled record passes through.

#![allow(missing_docs)]

use std::collections::HashMap;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use skein_core::{Offset, TopicPartition};
use skein_reader::{CursorSet, OffsetRange, OffsetRangeTable};

const SPAN: u64 = 10_000;

fn build_table(partitions: u32) -> OffsetRangeTable {
    let ranges: HashMap<_, _> = (0..partitions)
        .map(|index| {
            (
                TopicPartition::new("bench", index),
                OffsetRange::new(Offset::new(0), Offset::new(SPAN)).expect("valid range"),
            )
        })
        .collect();
    OffsetRangeTable::new(ranges).expect("non-empty table")
}

fn bench_observe_sequential(c: &mut Criterion) {
    let table = build_table(4);
    let partitions: Vec<_> = (0..4).map(|index| TopicPartition::new("bench", index)).collect();

    let mut group = c.benchmark_group("cursor_classify");
    group.throughput(Throughput::Elements(4 * SPAN));
    group.bench_function("sequential_accept", |b| {
        b.iter_batched(
            || CursorSet::new(&table),
            |mut cursors| {
                for offset in 0..SPAN {
                    for tp in &partitions {
                        cursors.observe(tp, Offset::new(offset));
                    }
                }
                cursors
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_observe_sequential);
criterion_main!(benches);
