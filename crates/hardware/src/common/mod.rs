//! Common types shared across the simulator.
//!
//! This module provides the building blocks used by the cache model and its callers:
//! 1. **Address Decomposition:** Block number, set index, tag and offset of an address.
//! 2. **Error Handling:** Geometry and configuration error types.

/// Address decomposition (block number, set index, tag, offset).
pub mod addr;

/// Error types for geometry validation and configuration loading.
pub mod error;

pub use addr::Decomposition;
pub use error::{ConfigError, GeometryError};
