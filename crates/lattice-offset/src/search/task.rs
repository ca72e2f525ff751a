//! Resumable strategy tasks driven by the engine

use crate::progress::SearchPhase;
use crate::result::{Completeness, SearchResult};

/// Result of running one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Pending,
    Done,
}

/// Position of a task within its current phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TaskProgress {
    pub phase: SearchPhase,
    pub fraction: f64,
    pub processed: u64,
    pub total: u64,
}

/// A search broken into bounded batches.
///
/// The engine calls `step` until it returns `Step::Done`, checking for
/// cancellation between calls, then consumes the task with `complete` or
/// `cancel`.
pub(crate) trait StrategyTask {
    /// Process at most `budget` work units
    fn step(&mut self, budget: usize) -> Step;

    fn progress(&self) -> TaskProgress;

    /// Work units processed so far, across all phases
    fn work_done(&self) -> u64;

    /// Offsets of a run that reached `Step::Done`
    fn complete(self: Box<Self>) -> SearchResult;

    /// Whatever can still be certified after stopping early
    fn cancel(self: Box<Self>) -> (SearchResult, Completeness);
}

/// `processed / total` as a fraction, 1.0 for empty work
pub(crate) fn ratio(processed: u64, total: u64) -> f64 {
    if total == 0 {
        1.0
    } else {
        processed as f64 / total as f64
    }
}
