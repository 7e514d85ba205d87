//! Address decomposition types.
//!
//! A main-memory address is split into three parts before it reaches a cache set:
//! 1. **Block number:** `address / block_bytes`, the unit of caching granularity.
//! 2. **Set index:** `block_number % set_count`, which set the block may live in.
//! 3. **Tag:** `block_number / set_count`, which block occupies a line within that set.
//!
//! The same formula covers every mapping once `set_count` is fixed by the geometry.

use serde::Serialize;

/// The result of splitting an address against a cache geometry.
///
/// Produced by [`CacheGeometry::decompose`](crate::cache::CacheGeometry::decompose).
/// Decomposition is a pure function of the geometry and the address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Decomposition {
    /// The address that was decomposed.
    pub address: u64,
    /// Block number (`address / block_bytes`).
    pub block_number: u64,
    /// Index of the set the block maps to.
    pub set_index: usize,
    /// Tag identifying the block within its set.
    pub tag: u64,
    /// Byte offset within the block.
    pub offset: u64,
}

impl Decomposition {
    /// Splits `address` for a cache with `block_bytes` blocks and `set_count` sets.
    ///
    /// Both divisors must be non-zero; [`CacheGeometry`](crate::cache::CacheGeometry)
    /// guarantees this for every geometry it accepts.
    #[inline]
    pub(crate) const fn new(address: u64, block_bytes: u64, set_count: u64) -> Self {
        let block_number = address / block_bytes;
        Self {
            address,
            block_number,
            set_index: (block_number % set_count) as usize,
            tag: block_number / set_count,
            offset: address % block_bytes,
        }
    }

    /// Rebuilds the address of the first byte of the block from a set index and tag.
    ///
    /// # Arguments
    ///
    /// * `set_index` - Set the block lives in.
    /// * `tag` - Tag of the block.
    /// * `block_bytes` - Block size in bytes.
    /// * `set_count` - Number of sets in the cache.
    pub const fn block_base(set_index: usize, tag: u64, block_bytes: u64, set_count: u64) -> u64 {
        (tag * set_count + set_index as u64) * block_bytes
    }
}
