//! Error definitions.
//!
//! This module defines the errors the simulator can report. It provides:
//! 1. **Geometry Errors:** Inconsistent cache parameters rejected at construction.
//! 2. **Configuration Errors:** Failures reading or parsing a JSON configuration.
//!
//! Out-of-range addresses are not errors; they are reported as
//! [`AccessOutcome::Violation`](crate::cache::AccessOutcome::Violation).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Inconsistent cache geometry.
///
/// Raised by [`CacheGeometry::new`](crate::cache::CacheGeometry::new). Construction is
/// all-or-nothing: no partially built cache is ever returned alongside this error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Block size of zero bytes.
    #[error("invalid geometry: block size must be greater than zero")]
    ZeroBlockSize,

    /// Cache size of zero bytes (the cache would have no lines).
    #[error("invalid geometry: cache size must be greater than zero")]
    ZeroCacheSize,

    /// Cache size is not a whole number of blocks.
    #[error("invalid geometry: cache size {size_bytes} is not a multiple of block size {block_bytes}")]
    UnalignedCacheSize {
        /// Total cache size in bytes.
        size_bytes: u64,
        /// Block size in bytes.
        block_bytes: u64,
    },

    /// Associativity of zero ways.
    #[error("invalid geometry: associativity must be greater than zero")]
    ZeroAssociativity,

    /// The line count does not divide evenly into sets of `ways` lines.
    #[error("invalid geometry: {line_count} lines cannot be grouped into sets of {ways}")]
    UnevenSets {
        /// Number of lines in the cache.
        line_count: u64,
        /// Requested associativity.
        ways: u64,
    },

    /// More lines than a simulated cache may hold.
    #[error("invalid geometry: {line_count} lines exceeds the limit of {max_lines}")]
    TooLarge {
        /// Number of lines requested.
        line_count: u64,
        /// Largest accepted line count.
        max_lines: u64,
    },
}

/// Failure to load a simulator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration text is not valid JSON for [`Config`](crate::config::Config).
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but describes an impossible cache.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
