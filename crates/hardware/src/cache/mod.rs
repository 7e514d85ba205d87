//! Cache Mapping Model.
//!
//! This module implements one cache engine that covers direct-mapped, set-associative and
//! fully-associative organizations. The organization is fixed by the associativity:
//! 1. **Direct-mapped:** One way per set; a miss overwrites the only slot.
//! 2. **Set-associative:** `ways` lines per set; empty slots fill first, then LRU eviction.
//! 3. **Fully-associative:** A single set holding every line; same LRU rules.
//!
//! Addresses outside main memory are reported as violations and never touch a line.

/// Validated cache dimensions and address decomposition.
pub mod geometry;

/// Per-set LRU recency stacks.
pub mod lru;

/// Immutable state snapshots for rendering.
pub mod snapshot;

use serde::Serialize;
use tracing::{debug, info, warn};

pub use self::geometry::{CacheGeometry, MAX_LINES};
pub use self::lru::LruPolicy;
pub use self::snapshot::{CacheSnapshot, LineSnapshot};

use crate::common::addr::Decomposition;
use crate::common::error::GeometryError;
use crate::config::Config;
use crate::stats::CacheStats;

/// Cache line entry containing validity, tag and the last address stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheLine {
    /// Whether the line holds a block.
    pub valid: bool,
    /// Tag of the resident block; meaningless while invalid.
    pub tag: u64,
    /// Most recent address that touched the resident block; meaningless while invalid.
    pub stored_address: u64,
}

/// What an access did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome")]
pub enum AccessOutcome {
    /// The block was resident.
    Hit {
        /// Set that was searched.
        set_index: usize,
        /// Slot holding the block.
        slot: usize,
    },
    /// The block was loaded into `slot`, replacing `evicted_tag` if the slot was valid.
    Miss {
        /// Set that was searched.
        set_index: usize,
        /// Slot the block was loaded into.
        slot: usize,
        /// Tag of the block that was displaced, if any.
        evicted_tag: Option<u64>,
    },
    /// The address lies outside `[0, main_memory_bytes)`; nothing was modified.
    Violation {
        /// The offending address.
        address: i64,
    },
}

impl AccessOutcome {
    /// True for [`AccessOutcome::Hit`].
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    /// True for [`AccessOutcome::Miss`].
    pub const fn is_miss(&self) -> bool {
        matches!(self, Self::Miss { .. })
    }

    /// True for [`AccessOutcome::Violation`].
    pub const fn is_violation(&self) -> bool {
        matches!(self, Self::Violation { .. })
    }

    /// Set touched by a hit or miss.
    pub const fn set_index(&self) -> Option<usize> {
        match *self {
            Self::Hit { set_index, .. } | Self::Miss { set_index, .. } => Some(set_index),
            Self::Violation { .. } => None,
        }
    }

    /// Slot touched by a hit or miss.
    pub const fn slot(&self) -> Option<usize> {
        match *self {
            Self::Hit { slot, .. } | Self::Miss { slot, .. } => Some(slot),
            Self::Violation { .. } => None,
        }
    }

    /// Tag displaced by a miss, if one was.
    pub const fn evicted_tag(&self) -> Option<u64> {
        match *self {
            Self::Miss { evicted_tag, .. } => evicted_tag,
            Self::Hit { .. } | Self::Violation { .. } => None,
        }
    }
}

/// Result of a single [`CacheModel::access`].
///
/// `decomposition` and `snapshot` are present for every hit and miss and absent for
/// violations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccessResult {
    /// What the access did.
    #[serde(flatten)]
    pub outcome: AccessOutcome,
    /// How the address was split.
    pub decomposition: Option<Decomposition>,
    /// Cache state after the access.
    pub snapshot: Option<CacheSnapshot>,
}

/// Cache model with per-set tag storage and LRU recency tracking.
///
/// Lines are stored set-major: slot `w` of set `s` lives at `s * ways + w`.
/// Sets are independent; an access only reads and writes the set it maps to.
#[derive(Clone, Debug)]
pub struct CacheModel {
    geometry: CacheGeometry,
    lines: Vec<CacheLine>,
    /// `None` for direct-mapped caches.
    recency: Option<LruPolicy>,
    stats: CacheStats,
    trace_accesses: bool,
}

impl CacheModel {
    /// Creates an empty cache with the given geometry.
    ///
    /// All lines start invalid. Recency stacks start in slot order.
    pub fn new(geometry: CacheGeometry) -> Self {
        let sets = geometry.set_count() as usize;
        let ways = geometry.ways() as usize;
        info!(
            mapping = geometry.mapping().label(),
            size_bytes = geometry.size_bytes(),
            block_bytes = geometry.block_bytes(),
            ways,
            sets,
            main_memory_bytes = geometry.main_memory_bytes(),
            "cache model created"
        );

        Self {
            geometry,
            lines: vec![CacheLine::default(); sets * ways],
            recency: (ways > 1).then(|| LruPolicy::new(sets, ways)),
            stats: CacheStats::default(),
            trace_accesses: false,
        }
    }

    /// Creates an empty cache from a configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if the configured geometry is inconsistent.
    pub fn from_config(config: &Config) -> Result<Self, GeometryError> {
        let mut model = Self::new(config.geometry()?);
        model.trace_accesses = config.general.trace_accesses;
        Ok(model)
    }

    /// The geometry this cache was built with.
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// Outcome counters since construction or the last [`reset`](Self::reset).
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Accesses a main memory address.
    ///
    /// On a hit the line's stored address is refreshed and its slot becomes MRU. On a miss
    /// the first empty slot of the set is filled, or, if the set is full, the LRU slot
    /// (the only slot, for direct-mapped caches) is overwritten. Hit or miss is decided at
    /// block granularity, so any offset within a resident block hits.
    ///
    /// Addresses outside `[0, main_memory_bytes)` return
    /// [`AccessOutcome::Violation`] and leave every line untouched.
    pub fn access(&mut self, address: i64) -> AccessResult {
        self.stats.accesses += 1;

        let Some(addr) = self.geometry.check_address(address) else {
            self.stats.violations += 1;
            warn!(
                address,
                main_memory_bytes = self.geometry.main_memory_bytes(),
                "memory access violation"
            );
            return AccessResult {
                outcome: AccessOutcome::Violation { address },
                decomposition: None,
                snapshot: None,
            };
        };

        let decomposition = self.geometry.decompose(addr);
        let outcome = self.lookup_or_fill(&decomposition);
        self.trace(&decomposition, &outcome);

        AccessResult {
            outcome,
            decomposition: Some(decomposition),
            snapshot: Some(self.snapshot()),
        }
    }

    /// Searches the addressed set and either refreshes the hit line or installs the block.
    fn lookup_or_fill(&mut self, d: &Decomposition) -> AccessOutcome {
        let ways = self.geometry.ways() as usize;
        let base = d.set_index * ways;
        let set = &mut self.lines[base..base + ways];

        if let Some(slot) = set.iter().position(|line| line.valid && line.tag == d.tag) {
            set[slot].stored_address = d.address;
            if let Some(lru) = self.recency.as_mut() {
                lru.touch(d.set_index, slot);
            }
            self.stats.hits += 1;
            return AccessOutcome::Hit {
                set_index: d.set_index,
                slot,
            };
        }

        let (slot, evicted_tag) = match set.iter().position(|line| !line.valid) {
            Some(slot) => (slot, None),
            None => {
                let slot = self
                    .recency
                    .as_ref()
                    .map_or(0, |lru| lru.victim(d.set_index));
                (slot, Some(set[slot].tag))
            }
        };

        set[slot] = CacheLine {
            valid: true,
            tag: d.tag,
            stored_address: d.address,
        };
        if let Some(lru) = self.recency.as_mut() {
            lru.touch(d.set_index, slot);
        }

        self.stats.misses += 1;
        if evicted_tag.is_some() {
            self.stats.evictions += 1;
        }
        AccessOutcome::Miss {
            set_index: d.set_index,
            slot,
            evicted_tag,
        }
    }

    fn trace(&self, d: &Decomposition, outcome: &AccessOutcome) {
        if self.trace_accesses {
            info!(
                address = d.address,
                block = d.block_number,
                set = d.set_index,
                tag = d.tag,
                ?outcome,
                "access"
            );
        } else {
            debug!(
                address = d.address,
                block = d.block_number,
                set = d.set_index,
                tag = d.tag,
                ?outcome,
                "access"
            );
        }
    }

    /// Returns `true` if the block containing `address` is resident.
    ///
    /// Read-only lookup: does not update recency or statistics. Addresses outside main memory
    /// are never resident.
    pub fn contains(&self, address: u64) -> bool {
        if address >= self.geometry.main_memory_bytes() {
            return false;
        }
        let d = self.geometry.decompose(address);
        self.set_lines(d.set_index)
            .iter()
            .any(|line| line.valid && line.tag == d.tag)
    }

    /// Lines of one set, in slot order.
    pub fn set_lines(&self, set_index: usize) -> &[CacheLine] {
        let ways = self.geometry.ways() as usize;
        set_index
            .checked_mul(ways)
            .and_then(|base| self.lines.get(base..base.checked_add(ways)?))
            .unwrap_or(&[])
    }

    /// Captures the current state of every line and recency stack.
    pub fn snapshot(&self) -> CacheSnapshot {
        let ways = self.geometry.ways() as usize;
        let lines = self
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| LineSnapshot {
                set_index: i / ways,
                slot: i % ways,
                valid: line.valid,
                tag: line.tag,
                stored_address: line.stored_address,
            })
            .collect();
        let recency = self.recency.as_ref().map_or_else(Vec::new, |lru| {
            (0..self.geometry.set_count() as usize)
                .map(|set| lru.order(set).to_vec())
                .collect()
        });
        CacheSnapshot::new(ways, lines, recency)
    }

    /// Invalidates every line, restores initial recency order and clears statistics.
    pub fn reset(&mut self) {
        self.lines.fill(CacheLine::default());
        if let Some(lru) = self.recency.as_mut() {
            lru.reset();
        }
        self.stats = CacheStats::default();
        debug!("cache reset");
    }
}
