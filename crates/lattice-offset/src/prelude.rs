//! Prelude module for convenient imports
//!
//! # Usage
//!
//! ```
//! use lattice_offset::prelude::*;
//! ```
//!
//! This brings the following into scope:
//!
//! - Points: `LatticePoint`, `Offset`, `ModelSet`, `SpaceSet`, `Bounds`
//! - Engine: `OffsetSearchEngine`, `EngineConfig`, `SearchStrategy`, `CancelToken`
//! - Progress: `ProgressSink`, `ProgressUpdate`, `NoProgress`, `LogProgress`
//! - Results: `SearchReport`, `SearchResult`, `RunState`, `Completeness`
//! - Error handling: `Error`, `Result`

// Points
pub use crate::bounds::Bounds;
pub use crate::point::{LatticePoint, ModelSet, Offset, SpaceSet};

// Engine
pub use crate::cancel::CancelToken;
pub use crate::config::EngineConfig;
pub use crate::search::{OffsetSearchEngine, SearchStrategy, find_offsets};

// Progress
pub use crate::progress::{LogProgress, NoProgress, ProgressSink, ProgressUpdate};

// Results
pub use crate::result::{Completeness, RunState, SearchReport, SearchResult};

// Error handling
pub use crate::error::{Error, Result};
