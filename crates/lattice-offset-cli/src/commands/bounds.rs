//! Bounds command implementation.

use anyhow::{Context, Result};
use lattice_offset::{Bounds, SearchStrategy};

use crate::input::InputArgs;

/// Run the bounds command
pub fn run(args: &InputArgs) -> Result<()> {
    let (model, space) = args.load()?;

    let model_bounds = Bounds::of(&model).context("Model is empty")?;
    let space_bounds = Bounds::of(&space).context("Space is empty")?;
    let cuboid = Bounds::candidate_offsets(&model_bounds, &space_bounds);
    let [dx, dy, dz] = cuboid.extent();
    let pairs = (model.len() as u128) * (space.len() as u128);

    println!("Model:   {} points, {} .. {}", model.len(), model_bounds.min, model_bounds.max);
    println!("Space:   {} points, {} .. {}", space.len(), space_bounds.min, space_bounds.max);
    println!();
    println!("Candidate offsets: {} .. {}", cuboid.min, cuboid.max);
    println!("Cuboid extent:     {} x {} x {}", dx, dy, dz);
    println!("Cuboid volume:     {}", cuboid.volume());
    println!("Pairwise checks:   {}", pairs);
    println!();

    match SearchStrategy::ModelBased.validate(&model) {
        Ok(()) => println!("Anchor pair:       usable"),
        Err(e) => println!("Anchor pair:       unusable ({})", e),
    }
    println!("Recommended:       {}", SearchStrategy::recommend(&model, &space));

    Ok(())
}
