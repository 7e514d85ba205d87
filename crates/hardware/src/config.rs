//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize a session. It provides:
//! 1. **Defaults:** Baseline cache and main-memory sizes.
//! 2. **Structures:** General, cache and main-memory settings grouped under [`Config`].
//! 3. **Enums:** The cache mapping organization.
//!
//! Configuration is supplied as JSON (`Config::from_json_str` / `Config::from_file`) or built
//! from `Config::default()` and overridden field by field, as the CLI does with its flags.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::cache::CacheGeometry;
use crate::common::error::{ConfigError, GeometryError};

/// Default configuration constants for the simulator.
///
/// These values describe the small teaching cache used when nothing is overridden.
mod defaults {
    /// Default cache size in bytes (four 16-byte blocks).
    pub const CACHE_SIZE: u64 = 64;

    /// Default block size in bytes.
    pub const BLOCK_SIZE: u64 = 16;

    /// Default set size for set-associative mapping (2 ways).
    ///
    /// Ignored by direct-mapped and fully-associative caches.
    pub const CACHE_WAYS: u64 = 2;

    /// Default main memory size in bytes (1 KiB).
    ///
    /// Accesses at or beyond this bound are reported as violations.
    pub const MAIN_MEMORY_SIZE: u64 = 1024;
}

/// Cache mapping organizations.
///
/// All three share one engine; the mapping only decides the associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum MappingKind {
    /// Every block maps to exactly one line (1 way per set).
    #[default]
    #[serde(alias = "direct", alias = "DirectMapped")]
    Direct,
    /// Blocks map to one set of `ways` lines, replaced in LRU order.
    #[serde(alias = "set", alias = "set_associative")]
    SetAssociative,
    /// A single set holding every line, replaced in LRU order.
    #[serde(alias = "full", alias = "fully_associative")]
    FullyAssociative,
}

impl MappingKind {
    /// Human-readable name, as shown to the user.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Direct => "Direct Mapped",
            Self::SetAssociative => "Set Associative",
            Self::FullyAssociative => "Fully Associative",
        }
    }
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use cachesim_core::config::{Config, MappingKind};
///
/// let config = Config::default();
/// assert_eq!(config.cache.mapping, MappingKind::Direct);
/// assert_eq!(config.cache.size_bytes, 64);
/// assert_eq!(config.memory.main_memory_bytes, 1024);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use cachesim_core::config::{Config, MappingKind};
///
/// let json = r#"{
///     "general": { "trace_accesses": true },
///     "cache": {
///         "mapping": "SetAssociative",
///         "size_bytes": 256,
///         "block_bytes": 32,
///         "ways": 4
///     },
///     "memory": { "main_memory_bytes": 4096 }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert!(config.general.trace_accesses);
/// assert_eq!(config.cache.mapping, MappingKind::SetAssociative);
/// assert_eq!(config.cache.associativity(), 4);
/// assert_eq!(config.geometry().unwrap().set_count(), 2);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Cache geometry and mapping
    #[serde(default)]
    pub cache: CacheConfig,
    /// Main memory bound
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// Missing sections and fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are not a valid configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Validates the cache and memory settings and derives the cache geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if the cache parameters are inconsistent.
    pub fn geometry(&self) -> Result<CacheGeometry, GeometryError> {
        CacheGeometry::new(
            self.cache.size_bytes,
            self.cache.block_bytes,
            self.cache.associativity(),
            self.memory.main_memory_bytes,
        )
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Emit an info-level tracing event for every access
    #[serde(default)]
    pub trace_accesses: bool,
}

/// Cache geometry configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Mapping organization
    #[serde(default)]
    pub mapping: MappingKind,

    /// Total cache size in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: u64,

    /// Block (line) size in bytes
    #[serde(default = "CacheConfig::default_block")]
    pub block_bytes: u64,

    /// Lines per set; only read for set-associative mapping
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: u64,
}

impl CacheConfig {
    /// Returns the default cache size in bytes.
    fn default_size() -> u64 {
        defaults::CACHE_SIZE
    }

    /// Returns the default block size in bytes.
    fn default_block() -> u64 {
        defaults::BLOCK_SIZE
    }

    /// Returns the default set-associative way count.
    fn default_ways() -> u64 {
        defaults::CACHE_WAYS
    }

    /// Effective associativity for the configured mapping.
    ///
    /// Direct-mapped caches have one way, fully-associative caches have one way per
    /// line (`size_bytes / block_bytes`), and set-associative caches use `ways`.
    /// A zero block size yields zero here and is rejected later by geometry validation.
    pub fn associativity(&self) -> u64 {
        match self.mapping {
            MappingKind::Direct => 1,
            MappingKind::SetAssociative => self.ways,
            MappingKind::FullyAssociative => {
                self.size_bytes.checked_div(self.block_bytes).unwrap_or(0)
            }
        }
    }
}

impl Default for CacheConfig {
    /// Creates a default cache configuration.
    ///
    /// A 64-byte direct-mapped cache of 16-byte blocks.
    fn default() -> Self {
        Self {
            mapping: MappingKind::default(),
            size_bytes: defaults::CACHE_SIZE,
            block_bytes: defaults::BLOCK_SIZE,
            ways: defaults::CACHE_WAYS,
        }
    }
}

/// Main memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Main memory size in bytes; valid addresses are `0..main_memory_bytes`
    #[serde(default = "MemoryConfig::default_main_memory")]
    pub main_memory_bytes: u64,
}

impl MemoryConfig {
    /// Returns the default main memory size in bytes.
    fn default_main_memory() -> u64 {
        defaults::MAIN_MEMORY_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            main_memory_bytes: defaults::MAIN_MEMORY_SIZE,
        }
    }
}
