//! Point set loading
//!
//! Input files are JSON arrays. Each element is one of:
//! - an integer triple `[x, y, z]`
//! - a float triple `[x, y, z]`, rounded to the nearest lattice point
//! - a transform record `{"translation": [x, y, z], ...}`, other fields ignored

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use lattice_offset::{LatticePoint, ModelSet, SpaceSet};
use serde::Deserialize;
use tracing::{debug, info};

/// Model and space file arguments shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// JSON file with the model point set (order matters for anchors)
    #[arg(short, long)]
    pub model: PathBuf,

    /// JSON file with the space point set (duplicates collapse)
    #[arg(short, long)]
    pub space: PathBuf,
}

impl InputArgs {
    pub fn load(&self) -> Result<(ModelSet, SpaceSet)> {
        Ok((load_model(&self.model)?, load_space(&self.space)?))
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPoint {
    Integer([i64; 3]),
    Float([f64; 3]),
    Transform { translation: [f64; 3] },
}

impl RawPoint {
    fn to_lattice(&self) -> Option<LatticePoint> {
        match *self {
            Self::Integer([x, y, z]) => LatticePoint::checked_new(x, y, z),
            Self::Float(translation) | Self::Transform { translation } => {
                LatticePoint::from_translation(translation)
            }
        }
    }
}

/// Parse a JSON point array into lattice points, preserving order
pub fn parse_points(content: &str) -> Result<Vec<LatticePoint>> {
    let raw: Vec<RawPoint> =
        serde_json::from_str(content).context("Expected a JSON array of points")?;

    raw.iter()
        .enumerate()
        .map(|(index, point)| match point.to_lattice() {
            Some(lattice) => Ok(lattice),
            None => bail!("Point {} is not representable on the lattice: {:?}", index, point),
        })
        .collect()
}

fn read_points(path: &Path) -> Result<Vec<LatticePoint>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    parse_points(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_model(path: &Path) -> Result<ModelSet> {
    let model = ModelSet::new(read_points(path)?);
    info!("Loaded {} model points from {:?}", model.len(), path);
    Ok(model)
}

pub fn load_space(path: &Path) -> Result<SpaceSet> {
    let points = read_points(path)?;
    let total = points.len();
    let space: SpaceSet = points.into_iter().collect();
    if space.len() < total {
        debug!("Collapsed {} duplicate space points", total - space.len());
    }
    info!("Loaded {} space points from {:?}", space.len(), path);
    Ok(space)
}
