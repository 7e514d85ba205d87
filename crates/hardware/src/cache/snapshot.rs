//! Read-only views of cache state for rendering.
//!
//! A [`CacheSnapshot`] is an owned copy taken after an access. Callers render it however
//! they like; nothing in a snapshot refers back into the model.

use std::fmt;

use serde::Serialize;

/// State of one line, tagged with its position.
///
/// `tag` and `stored_address` are zero and meaningless while `valid` is false.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LineSnapshot {
    /// Set the line belongs to.
    pub set_index: usize,
    /// Slot (way) within the set.
    pub slot: usize,
    /// Whether the line holds a block.
    pub valid: bool,
    /// Tag of the resident block.
    pub tag: u64,
    /// Most recent address that touched the resident block.
    pub stored_address: u64,
}

/// Immutable copy of every line in the cache.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CacheSnapshot {
    ways: usize,
    lines: Vec<LineSnapshot>,
    /// Per-set recency order, MRU first. Empty for direct-mapped caches.
    recency: Vec<Vec<usize>>,
}

impl CacheSnapshot {
    pub(crate) const fn new(ways: usize, lines: Vec<LineSnapshot>, recency: Vec<Vec<usize>>) -> Self {
        Self {
            ways,
            lines,
            recency,
        }
    }

    /// All lines in set-major order.
    pub fn lines(&self) -> &[LineSnapshot] {
        &self.lines
    }

    /// Number of sets captured.
    pub fn set_count(&self) -> usize {
        self.lines.len() / self.ways.max(1)
    }

    /// Lines of a single set, or an empty slice if `set_index` is out of range.
    pub fn set(&self, set_index: usize) -> &[LineSnapshot] {
        set_index
            .checked_mul(self.ways)
            .and_then(|start| self.lines.get(start..start.checked_add(self.ways)?))
            .unwrap_or(&[])
    }

    /// A single line, if the position exists.
    pub fn line(&self, set_index: usize, slot: usize) -> Option<&LineSnapshot> {
        self.set(set_index).get(slot)
    }

    /// Recency order of a set, most recently used first.
    ///
    /// Empty for direct-mapped caches, which track no recency.
    pub fn recency(&self, set_index: usize) -> &[usize] {
        self.recency
            .get(set_index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Tags of the valid lines in a set, in slot order.
    pub fn resident_tags(&self, set_index: usize) -> Vec<u64> {
        self.set(set_index)
            .iter()
            .filter(|line| line.valid)
            .map(|line| line.tag)
            .collect()
    }

    /// Number of valid lines across the cache.
    pub fn valid_count(&self) -> usize {
        self.lines.iter().filter(|line| line.valid).count()
    }
}

impl fmt::Display for LineSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            write!(
                f,
                "Set {}, Block {}: Tag {}, Content {}",
                self.set_index, self.slot, self.tag, self.stored_address
            )
        } else {
            write!(f, "Set {}, Block {}: [Empty]", self.set_index, self.slot)
        }
    }
}

impl fmt::Display for CacheSnapshot {
    /// One line per cache line, in set-major order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
