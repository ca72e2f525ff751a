//! Engine configuration
//!
//! ## Example
//!
//! ```
//! use lattice_offset::EngineConfig;
//!
//! let config = EngineConfig::builder()
//!     .batch_size(1024)
//!     .max_cuboid_volume(1_000_000)
//!     .build();
//! assert_eq!(config.batch_size, 1024);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::search::constants::DEFAULT_BATCH_SIZE;

/// Configuration for the offset search engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Work units (candidates, pairs, or points) processed per poll
    pub batch_size: usize,
    /// Pause between batches in milliseconds, 0 for none
    pub batch_pause_ms: u64,
    /// Upper bound on the brute-force candidate cuboid, `None` for no limit
    pub max_cuboid_volume: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            batch_pause_ms: 0,
            max_cuboid_volume: None,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration builder
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Batch size, never zero
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }

    pub fn batch_pause(&self) -> Option<Duration> {
        (self.batch_pause_ms > 0).then(|| Duration::from_millis(self.batch_pause_ms))
    }
}

/// Builder for EngineConfig
#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    batch_size: Option<usize>,
    batch_pause_ms: Option<u64>,
    max_cuboid_volume: Option<u64>,
}

impl EngineConfigBuilder {
    /// Set the number of work units per batch
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size);
        self
    }

    /// Pause between batches
    pub fn batch_pause(mut self, pause: Duration) -> Self {
        self.batch_pause_ms = Some(pause.as_millis().min(u64::MAX as u128) as u64);
        self
    }

    /// Reject brute-force runs whose candidate cuboid exceeds `volume`
    pub fn max_cuboid_volume(mut self, volume: u64) -> Self {
        self.max_cuboid_volume = Some(volume);
        self
    }

    /// Build the configuration
    pub fn build(self) -> EngineConfig {
        let default = EngineConfig::default();
        EngineConfig {
            batch_size: self.batch_size.unwrap_or(default.batch_size),
            batch_pause_ms: self.batch_pause_ms.unwrap_or(default.batch_pause_ms),
            max_cuboid_volume: self.max_cuboid_volume.or(default.max_cuboid_volume),
        }
    }
}
