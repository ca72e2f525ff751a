//! Progress reporting for search runs
//!
//! Progress is observational only: sinks receive updates between work
//! batches and have no way to influence the run. Cancellation goes through
//! [`CancelToken`](crate::CancelToken) instead.

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};
use tracing::info;

use crate::search::SearchStrategy;

/// Stage of a search run
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SearchPhase {
    /// Brute force: walking the candidate cuboid
    CuboidScan,
    /// Hash-based: counting model/space differences
    Histogram,
    /// Model-based phase 1: pairing space points along the anchor displacement
    CandidateGeneration,
    /// Model-based phase 2: checking the remaining model points
    Verification,
}

impl SearchPhase {
    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::CuboidScan => "scanning candidate cuboid",
            Self::Histogram => "counting pairwise differences",
            Self::CandidateGeneration => "generating anchor candidates",
            Self::Verification => "verifying candidates",
        }
    }
}

/// A single progress report
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressUpdate {
    pub strategy: SearchStrategy,
    pub phase: SearchPhase,
    /// Overall completion in `[0, 1]`, non-decreasing within a run
    pub fraction: f64,
    /// Work units finished in the current phase
    pub processed: u64,
    /// Work units in the current phase
    pub total: u64,
}

impl ProgressUpdate {
    pub fn percent(&self) -> u8 {
        (self.fraction.clamp(0.0, 1.0) * 100.0).floor() as u8
    }
}

/// Receiver of progress updates
pub trait ProgressSink {
    fn report(&mut self, update: &ProgressUpdate);
}

impl<F> ProgressSink for F
where
    F: FnMut(&ProgressUpdate),
{
    fn report(&mut self, update: &ProgressUpdate) {
        self(update)
    }
}

/// Sink that discards all updates
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _update: &ProgressUpdate) {}
}

/// Sink that logs through `tracing` whenever progress advances by `step`
#[derive(Debug, Clone)]
pub struct LogProgress {
    step: f64,
    next: f64,
}

impl LogProgress {
    pub fn new(step: f64) -> Self {
        Self {
            step: step.clamp(0.001, 1.0),
            next: 0.0,
        }
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl ProgressSink for LogProgress {
    fn report(&mut self, update: &ProgressUpdate) {
        if update.fraction < self.next {
            return;
        }
        info!(
            "{} search: {} ({}%, {}/{})",
            update.strategy,
            update.phase.description(),
            update.percent(),
            update.processed,
            update.total
        );
        while self.next <= update.fraction {
            self.next += self.step;
        }
    }
}
