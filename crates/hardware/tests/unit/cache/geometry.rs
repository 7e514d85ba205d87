//! Cache Geometry Tests.
//!
//! Construction rules, derived counts and mapping classification.

use cachesim_core::cache::{CacheGeometry, MAX_LINES};
use cachesim_core::common::GeometryError;
use cachesim_core::config::MappingKind;
use rstest::rstest;

#[rstest]
#[case(64, 0, 1, GeometryError::ZeroBlockSize)]
#[case(0, 0, 1, GeometryError::ZeroBlockSize)]
#[case(0, 16, 1, GeometryError::ZeroCacheSize)]
#[case(60, 16, 1, GeometryError::UnalignedCacheSize { size_bytes: 60, block_bytes: 16 })]
#[case(64, 16, 0, GeometryError::ZeroAssociativity)]
#[case(64, 16, 3, GeometryError::UnevenSets { line_count: 4, ways: 3 })]
#[case(64, 16, 8, GeometryError::UnevenSets { line_count: 4, ways: 8 })]
#[case(1 << 60, 1, 1, GeometryError::TooLarge { line_count: 1 << 60, max_lines: MAX_LINES })]
#[case(u64::MAX, 1, 3, GeometryError::TooLarge { line_count: u64::MAX, max_lines: MAX_LINES })]
fn rejects_inconsistent_geometry(
    #[case] size: u64,
    #[case] block: u64,
    #[case] ways: u64,
    #[case] expected: GeometryError,
) {
    assert_eq!(CacheGeometry::new(size, block, ways, 1024), Err(expected));
}

#[rstest]
#[case(64, 16, 1, 4, 4, MappingKind::Direct)]
#[case(64, 16, 2, 4, 2, MappingKind::SetAssociative)]
#[case(64, 16, 4, 4, 1, MappingKind::FullyAssociative)]
#[case(4096, 64, 8, 64, 8, MappingKind::SetAssociative)]
#[case(16, 16, 1, 1, 1, MappingKind::Direct)]
#[case(48, 16, 3, 3, 1, MappingKind::FullyAssociative)]
fn derives_counts_and_mapping(
    #[case] size: u64,
    #[case] block: u64,
    #[case] ways: u64,
    #[case] lines: u64,
    #[case] sets: u64,
    #[case] mapping: MappingKind,
) {
    let geometry = CacheGeometry::new(size, block, ways, 1024).unwrap();
    assert_eq!(geometry.line_count(), lines);
    assert_eq!(geometry.set_count(), sets);
    assert_eq!(geometry.ways(), ways);
    assert_eq!(geometry.mapping(), mapping);
}

#[test]
fn line_count_at_limit_is_accepted() {
    let geometry = CacheGeometry::new(MAX_LINES * 16, 16, 4, 1024).unwrap();
    assert_eq!(geometry.line_count(), MAX_LINES);
    assert_eq!(
        CacheGeometry::new((MAX_LINES + 1) * 16, 16, 1, 1024),
        Err(GeometryError::TooLarge {
            line_count: MAX_LINES + 1,
            max_lines: MAX_LINES,
        })
    );
}

#[test]
fn check_address_bounds() {
    let geometry = CacheGeometry::new(64, 16, 1, 1024).unwrap();
    assert_eq!(geometry.check_address(0), Some(0));
    assert_eq!(geometry.check_address(1023), Some(1023));
    assert_eq!(geometry.check_address(1024), None);
    assert_eq!(geometry.check_address(-1), None);
    assert_eq!(geometry.check_address(i64::MIN), None);
}

#[test]
fn zero_main_memory_is_accepted() {
    let geometry = CacheGeometry::new(64, 16, 1, 0).unwrap();
    assert_eq!(geometry.check_address(0), None);
}

#[test]
fn block_size_need_not_be_power_of_two() {
    let geometry = CacheGeometry::new(60, 12, 5, 1024).unwrap();
    assert_eq!(geometry.set_count(), 1);
    let d = geometry.decompose(30);
    assert_eq!((d.block_number, d.set_index, d.tag, d.offset), (2, 0, 2, 6));
}
