//! Access statistics collection and reporting.
//!
//! Tracks the outcome counts of a simulation session:
//! 1. **Accesses:** Every call to `access`, violations included.
//! 2. **Hits and misses:** Resident versus loaded blocks.
//! 3. **Evictions:** Misses that displaced a valid line.
//! 4. **Violations:** Addresses outside main memory.

use std::fmt;

use serde::Serialize;

/// Outcome counters for a cache session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Total accesses, including violations.
    pub accesses: u64,
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Accesses that loaded their block.
    pub misses: u64,
    /// Misses that replaced a valid line.
    pub evictions: u64,
    /// Accesses outside main memory.
    pub violations: u64,
}

impl CacheStats {
    /// Hit rate in percent over hits and misses; violations are excluded.
    ///
    /// Returns `0.0` before the first in-range access.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }

    /// Miss rate in percent over hits and misses; violations are excluded.
    pub fn miss_rate(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            100.0 - self.hit_rate()
        }
    }

    /// Prints the statistics report to stdout.
    pub fn print(&self) {
        print!("{self}");
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "CACHE SIMULATION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "accesses                 {}", self.accesses)?;
        writeln!(f, "hits                     {}", self.hits)?;
        writeln!(f, "misses                   {}", self.misses)?;
        writeln!(f, "evictions                {}", self.evictions)?;
        writeln!(f, "violations               {}", self.violations)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "hit_rate                 {:.2}%", self.hit_rate())?;
        writeln!(f, "miss_rate                {:.2}%", self.miss_rate())?;
        writeln!(f, "==========================================================")
    }
}
