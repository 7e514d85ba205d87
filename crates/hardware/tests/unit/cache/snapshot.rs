//! Snapshot Tests.
//!
//! Snapshots are owned copies: rendering them never feeds back into the model, and a
//! snapshot taken earlier does not change when the cache does.

use cachesim_core::cache::LineSnapshot;
use pretty_assertions::assert_eq;

use crate::common::TestCache;

#[test]
fn empty_cache_lists_every_line_invalid() {
    let cache = TestCache::new(64, 16, 2, 1024);
    let snapshot = cache.snapshot();

    assert_eq!(snapshot.lines().len(), 4);
    assert_eq!(snapshot.set_count(), 2);
    assert_eq!(snapshot.valid_count(), 0);
    assert!(snapshot.lines().iter().all(|line| !line.valid));
}

#[test]
fn lines_are_set_major_with_positions() {
    let mut cache = TestCache::new(64, 16, 2, 1024);
    cache.warm(&[16, 0]);
    let snapshot = cache.snapshot();

    assert_eq!(
        snapshot.lines(),
        &[
            LineSnapshot {
                set_index: 0,
                slot: 0,
                valid: true,
                tag: 0,
                stored_address: 0
            },
            LineSnapshot {
                set_index: 0,
                slot: 1,
                valid: false,
                tag: 0,
                stored_address: 0
            },
            LineSnapshot {
                set_index: 1,
                slot: 0,
                valid: true,
                tag: 0,
                stored_address: 16
            },
            LineSnapshot {
                set_index: 1,
                slot: 1,
                valid: false,
                tag: 0,
                stored_address: 0
            },
        ]
    );
}

#[test]
fn display_matches_listing_format() {
    let mut cache = TestCache::direct(64, 16, 1024);
    cache.warm(&[20, 84]);

    let text = cache.snapshot().to_string();
    assert_eq!(
        text,
        "Set 0, Block 0: [Empty]\n\
         Set 1, Block 0: Tag 1, Content 84\n\
         Set 2, Block 0: [Empty]\n\
         Set 3, Block 0: [Empty]\n"
    );
}

#[test]
fn earlier_snapshot_is_unaffected_by_later_accesses() {
    let mut cache = TestCache::new(64, 16, 2, 1024);
    let first = cache.access(0).snapshot.unwrap();
    cache.warm(&[32, 64, 16]);

    assert_eq!(first.valid_count(), 1);
    assert_eq!(first.resident_tags(0), vec![0]);
    assert_eq!(cache.snapshot().resident_tags(0), vec![2, 1]);
}

#[test]
fn access_snapshot_equals_model_snapshot() {
    let mut cache = TestCache::new(128, 16, 4, 1024);
    let result = cache.access(200);
    assert_eq!(result.snapshot.unwrap(), cache.snapshot());
}

#[test]
fn out_of_range_queries_are_empty() {
    let cache = TestCache::new(64, 16, 2, 1024);
    let snapshot = cache.snapshot();
    assert!(snapshot.set(5).is_empty());
    assert!(snapshot.line(0, 7).is_none());
    assert!(snapshot.recency(9).is_empty());
}

#[test]
fn huge_set_index_does_not_overflow() {
    let cache = TestCache::new(64, 16, 2, 1024);
    let snapshot = cache.snapshot();
    assert!(snapshot.set(usize::MAX).is_empty());
    assert!(snapshot.set(usize::MAX / 2 + 1).is_empty());
    assert!(snapshot.line(usize::MAX, 0).is_none());
    assert!(snapshot.resident_tags(usize::MAX).is_empty());
    assert!(cache.cache.set_lines(usize::MAX).is_empty());
    assert!(cache.cache.set_lines(usize::MAX / 2 + 1).is_empty());
}

#[test]
fn serializes_to_json() {
    let mut cache = TestCache::new(64, 16, 2, 1024);
    let result = cache.access(84);
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["outcome"], "Miss");
    assert_eq!(value["set_index"], 1);
    assert_eq!(value["decomposition"]["tag"], 2);
    assert_eq!(value["snapshot"]["lines"][2]["stored_address"], 84);
    assert_eq!(value["snapshot"]["recency"][1], serde_json::json!([0, 1]));
}
