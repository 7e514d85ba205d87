//! CPU cache mapping simulator library.
//!
//! This crate models how a cache maps main-memory addresses onto a fixed set of lines:
//! 1. **Cache:** One engine for direct-mapped, set-associative and fully-associative
//!    organizations, with LRU replacement when associativity > 1.
//! 2. **Common:** Address decomposition and error types.
//! 3. **Configuration:** Geometry, mapping and main-memory settings loadable from JSON.
//! 4. **Statistics:** Hit, miss, eviction and violation counters.
//!
//! ```
//! use cachesim_core::{CacheGeometry, CacheModel};
//!
//! let geometry = CacheGeometry::new(64, 16, 1, 1024).unwrap();
//! let mut cache = CacheModel::new(geometry);
//!
//! assert!(cache.access(20).outcome.is_miss());
//! assert!(cache.access(28).outcome.is_hit());
//! assert!(cache.access(2048).outcome.is_violation());
//! ```

/// Cache model, geometry, LRU tracking and snapshots.
pub mod cache;
/// Common types (address decomposition, errors).
pub mod common;
/// Simulator configuration (defaults, mapping kind, JSON loading).
pub mod config;
/// Access statistics collection and reporting.
pub mod stats;

/// Result of one access: outcome plus post-access snapshot.
pub use crate::cache::{AccessOutcome, AccessResult};
/// Validated cache dimensions.
pub use crate::cache::CacheGeometry;
/// The cache engine; construct with `CacheModel::new` or `CacheModel::from_config`.
pub use crate::cache::CacheModel;
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
