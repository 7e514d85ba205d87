//! Memory Access Violation Tests.
//!
//! Addresses outside `[0, main_memory_bytes)` model a segmentation fault: the access is
//! reported, nothing in the cache changes, and the session carries on.

use cachesim_core::cache::AccessOutcome;
use rstest::rstest;

use crate::common::TestCache;

#[rstest]
#[case(1024)]
#[case(1025)]
#[case(-1)]
#[case(i64::MAX)]
#[case(i64::MIN)]
fn out_of_range_address_is_violation(#[case] address: i64) {
    let mut cache = TestCache::new(64, 16, 2, 1024);
    let result = cache.access(address);

    assert_eq!(result.outcome, AccessOutcome::Violation { address });
    assert!(result.snapshot.is_none());
    assert!(result.decomposition.is_none());
}

#[test]
fn violation_leaves_lines_and_recency_untouched() {
    let mut cache = TestCache::new(64, 16, 2, 1024);
    cache.warm(&[0, 32, 16]);
    let before = cache.snapshot();

    assert!(cache.outcome(2048).is_violation());
    assert!(cache.outcome(-64).is_violation());

    assert_eq!(cache.snapshot(), before);
}

/// The last valid byte of main memory is an ordinary access.
#[test]
fn last_byte_of_memory_is_valid() {
    let mut cache = TestCache::direct(64, 16, 1024);
    assert!(cache.outcome(1023).is_miss());
}

/// A violation does not end the session.
#[test]
fn model_stays_usable_after_violation() {
    let mut cache = TestCache::direct(64, 16, 1024);
    cache.warm(&[20]);
    assert!(cache.outcome(5000).is_violation());
    assert!(cache.outcome(20).is_hit());

    let stats = cache.cache.stats();
    assert_eq!(stats.accesses, 3);
    assert_eq!(stats.violations, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

/// An address can be inside main memory and still force an eviction.
#[test]
fn in_range_address_may_still_evict() {
    let mut cache = TestCache::direct(64, 16, 1024);
    cache.warm(&[0]);
    assert_eq!(cache.outcome(64).evicted_tag(), Some(0));
}

#[test]
fn zero_sized_main_memory_rejects_everything() {
    let mut cache = TestCache::direct(64, 16, 0);
    assert!(cache.outcome(0).is_violation());
    assert_eq!(cache.snapshot().valid_count(), 0);
}
