//! Engine configuration file loading

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lattice_offset::EngineConfig;
use tracing::info;

/// Load engine settings from a TOML file, or defaults when no path is given
///
/// Missing keys fall back to their defaults:
///
/// ```toml
/// batch_size = 8192
/// batch_pause_ms = 0
/// max_cuboid_volume = 1000000000
/// ```
pub fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: EngineConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    info!("Loaded engine config from {:?}", path);
    Ok(config)
}
