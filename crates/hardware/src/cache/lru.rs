//! Least Recently Used (LRU) recency tracking.
//!
//! Each set keeps a usage stack of its slot indices. When a slot is filled or hit, it is
//! moved to the top (Most Recently Used position). The bottom of the stack is the
//! Least Recently Used slot and is the eviction victim once the set is full.
//!
//! Only allocated for associativity > 1; a direct-mapped set has nothing to order.
//!
//! # Performance
//!
//! - `touch()`: O(W) where W is the number of ways
//! - `victim()`: O(1)
//! - Space: O(S × W) where S is the number of sets

/// LRU usage stacks, one per set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LruPolicy {
    /// Index 0 is MRU, last index is LRU.
    usage: Vec<Vec<usize>>,
    ways: usize,
}

impl LruPolicy {
    /// Creates a new LRU policy instance.
    ///
    /// Every stack starts in slot order `[0, 1, .., ways - 1]`, so the initial order is
    /// deterministic and identical across sets.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            usage: (0..sets).map(|_| (0..ways).collect()).collect(),
            ways,
        }
    }

    /// Moves `way` to the MRU position of `set`, shifting the ways above it down by one.
    pub fn touch(&mut self, set: usize, way: usize) {
        let stack = &mut self.usage[set];
        if let Some(pos) = stack.iter().position(|&x| x == way) {
            stack[..=pos].rotate_right(1);
        }
    }

    /// Returns the LRU way of `set`.
    pub fn victim(&self, set: usize) -> usize {
        self.usage[set].last().copied().unwrap_or_default()
    }

    /// Recency order of `set`, most recently used first.
    pub fn order(&self, set: usize) -> &[usize] {
        &self.usage[set]
    }

    /// Restores every stack to its initial slot order.
    pub fn reset(&mut self) {
        for stack in &mut self.usage {
            stack.clear();
            stack.extend(0..self.ways);
        }
    }
}
