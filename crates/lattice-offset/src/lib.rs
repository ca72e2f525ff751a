//! # lattice-offset
//!
//! Translation-only point-pattern matching on the integer 3D lattice.
//!
//! Given a small model point set and a larger space point set, the search
//! finds every integer offset that maps all model points onto points of the
//! space.
//!
//! This crate provides:
//! - Lattice point and point-set types (`LatticePoint`, `ModelSet`, `SpaceSet`)
//! - Bounding range estimation for the exhaustive search cuboid
//! - Three interchangeable search strategies (brute force, difference
//!   histogram, anchor pair)
//! - A cooperative, cancellable search engine that runs in bounded batches
//!   and reports progress between them

pub mod bounds;
pub mod cancel;
pub mod config;
pub mod error;
pub mod point;
pub mod prelude;
pub mod progress;
pub mod result;
pub mod search;

pub use bounds::Bounds;
pub use cancel::CancelToken;
pub use config::{EngineConfig, EngineConfigBuilder};
pub use error::{Error, Result};
pub use point::{LatticePoint, ModelSet, Offset, SpaceSet};
pub use progress::{LogProgress, NoProgress, ProgressSink, ProgressUpdate, SearchPhase};
pub use result::{Completeness, RunState, SearchReport, SearchResult};
pub use search::{OffsetSearchEngine, SearchStrategy, StartOutcome, find_offsets};
