//! Search-related constants
//!
//! # Work units
//!
//! Each strategy counts its work in its own unit, and one poll of the engine
//! processes at most `batch_size` of them:
//!
//! ```text
//!   BruteForce   one candidate offset from the cuboid
//!   HashBased    one (model point, space point) pair
//!   ModelBased   one space point (phase 1) or one candidate (phase 2)
//! ```

/// Default number of work units per batch
pub const DEFAULT_BATCH_SIZE: usize = 4096;

/// Model points needed by the anchor-pair strategy
pub const ANCHOR_COUNT: usize = 2;

/// Share of overall progress assigned to anchor candidate generation;
/// verification covers the rest
pub const CANDIDATE_GENERATION_SHARE: f64 = 0.5;
