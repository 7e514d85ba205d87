//! # Address Decomposition Tests
//!
//! `block = addr / block_bytes`, `set = block % sets`, `tag = block / sets`.

use cachesim_core::cache::CacheGeometry;
use cachesim_core::common::Decomposition;
use rstest::rstest;

#[rstest]
// Direct-mapped: 4 sets of 16-byte blocks.
#[case(1, 20, 1, 1, 0, 4)]
#[case(1, 84, 5, 1, 1, 4)]
#[case(1, 0, 0, 0, 0, 0)]
#[case(1, 1023, 63, 3, 15, 15)]
// 2-way: 2 sets.
#[case(2, 0, 0, 0, 0, 0)]
#[case(2, 32, 2, 0, 1, 0)]
#[case(2, 64, 4, 0, 2, 0)]
#[case(2, 84, 5, 1, 2, 4)]
// Fully-associative: 1 set, tag is the block number.
#[case(4, 100, 6, 0, 6, 4)]
fn splits_address(
    #[case] ways: u64,
    #[case] address: u64,
    #[case] block_number: u64,
    #[case] set_index: usize,
    #[case] tag: u64,
    #[case] offset: u64,
) {
    let geometry = CacheGeometry::new(64, 16, ways, 1024).unwrap();
    let d = geometry.decompose(address);
    assert_eq!(
        d,
        Decomposition {
            address,
            block_number,
            set_index,
            tag,
            offset
        }
    );
}

#[test]
fn block_base_inverts_set_and_tag() {
    let geometry = CacheGeometry::new(256, 32, 2, 1 << 20).unwrap();
    let sets = geometry.set_count();
    for set_index in 0..sets as usize {
        for tag in 0..16 {
            let base = Decomposition::block_base(set_index, tag, geometry.block_bytes(), sets);
            let d = geometry.decompose(base);
            assert_eq!((d.set_index, d.tag, d.offset), (set_index, tag, 0));
        }
    }
}

/// Every byte of a block decomposes to the same set and tag.
#[test]
fn offsets_share_set_and_tag() {
    let geometry = CacheGeometry::new(64, 16, 2, 1024).unwrap();
    let first = geometry.decompose(48);
    for address in 48..64 {
        let d = geometry.decompose(address);
        assert_eq!((d.block_number, d.set_index, d.tag), (first.block_number, first.set_index, first.tag));
        assert_eq!(d.offset, address - 48);
    }
}
