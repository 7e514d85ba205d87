//! # Cache Engine Tests



/// Geometry validation and derived counts.
pub mod geometry;




/// Snapshot contents and rendering.
pub mod snapshot;

/// Out-of-range accesses.
pub mod violation;
