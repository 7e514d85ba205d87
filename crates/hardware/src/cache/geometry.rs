//! Cache geometry.
//!
//! Fixed at construction: total size, block size, associativity and the main memory
//! bound. Line and set counts are derived once and never change.

use serde::Serialize;

use crate::common::addr::Decomposition;
use crate::common::error::GeometryError;
use crate::config::MappingKind;

/// Largest line count a cache may have (2^20 lines).
///
/// Every line is allocated up front and copied into each snapshot.
pub const MAX_LINES: u64 = 1 << 20;

/// Validated, immutable cache dimensions.
///
/// Invariants: `block_bytes > 0`, `size_bytes > 0`, `size_bytes % block_bytes == 0`,
/// `ways > 0`, `line_count <= MAX_LINES` and `line_count % ways == 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CacheGeometry {
    size_bytes: u64,
    block_bytes: u64,
    ways: u64,
    main_memory_bytes: u64,
    line_count: u64,
    set_count: u64,
}

impl CacheGeometry {
    /// Validates cache parameters and derives line and set counts.
    ///
    /// # Arguments
    ///
    /// * `size_bytes` - Total cache capacity in bytes.
    /// * `block_bytes` - Block (line) size in bytes.
    /// * `ways` - Associativity: 1 is direct-mapped, `line_count` is fully-associative.
    /// * `main_memory_bytes` - Exclusive upper bound for valid addresses.
    ///
    /// # Errors
    ///
    /// Returns the [`GeometryError`] variant for the first rule the parameters break.
    pub const fn new(
        size_bytes: u64,
        block_bytes: u64,
        ways: u64,
        main_memory_bytes: u64,
    ) -> Result<Self, GeometryError> {
        if block_bytes == 0 {
            return Err(GeometryError::ZeroBlockSize);
        }
        if size_bytes == 0 {
            return Err(GeometryError::ZeroCacheSize);
        }
        if size_bytes % block_bytes != 0 {
            return Err(GeometryError::UnalignedCacheSize {
                size_bytes,
                block_bytes,
            });
        }
        if ways == 0 {
            return Err(GeometryError::ZeroAssociativity);
        }
        let line_count = size_bytes / block_bytes;
        if line_count > MAX_LINES {
            return Err(GeometryError::TooLarge {
                line_count,
                max_lines: MAX_LINES,
            });
        }
        if line_count % ways != 0 {
            return Err(GeometryError::UnevenSets { line_count, ways });
        }

        Ok(Self {
            size_bytes,
            block_bytes,
            ways,
            main_memory_bytes,
            line_count,
            set_count: line_count / ways,
        })
    }

    /// Total cache capacity in bytes.
    #[inline]
    pub const fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Block size in bytes.
    #[inline]
    pub const fn block_bytes(&self) -> u64 {
        self.block_bytes
    }

    /// Lines per set.
    #[inline]
    pub const fn ways(&self) -> u64 {
        self.ways
    }

    /// Exclusive upper bound of valid main memory addresses.
    #[inline]
    pub const fn main_memory_bytes(&self) -> u64 {
        self.main_memory_bytes
    }

    /// Number of lines (`size_bytes / block_bytes`).
    #[inline]
    pub const fn line_count(&self) -> u64 {
        self.line_count
    }

    /// Number of sets (`line_count / ways`).
    #[inline]
    pub const fn set_count(&self) -> u64 {
        self.set_count
    }

    /// Mapping organization implied by the associativity.
    ///
    /// A single-line cache is reported as direct-mapped.
    pub const fn mapping(&self) -> MappingKind {
        if self.ways == 1 {
            MappingKind::Direct
        } else if self.set_count == 1 {
            MappingKind::FullyAssociative
        } else {
            MappingKind::SetAssociative
        }
    }

    /// Splits an address into block number, set index, tag and offset.
    #[inline]
    pub const fn decompose(&self, address: u64) -> Decomposition {
        Decomposition::new(address, self.block_bytes, self.set_count)
    }

    /// Returns the address as `u64` if it lies in `[0, main_memory_bytes)`.
    ///
    /// Negative addresses and addresses at or past the bound yield `None`.
    pub fn check_address(&self, address: i64) -> Option<u64> {
        u64::try_from(address)
            .ok()
            .filter(|&addr| addr < self.main_memory_bytes)
    }
}
