//! Offset search engine
//!
//! The engine runs one search at a time as a sequence of bounded batches.
//! A driver calls [`OffsetSearchEngine::poll`] repeatedly; between batches
//! the engine reports progress and checks the cancellation token.
//! [`OffsetSearchEngine::run`] is the built-in driver loop.
//!
//! ## Example
//!
//! ```
//! use lattice_offset::{
//!     CancelToken, LatticePoint, ModelSet, NoProgress, OffsetSearchEngine, RunState,
//!     SearchStrategy, SpaceSet,
//! };
//!
//! let model = ModelSet::new(vec![LatticePoint::new(0, 0, 0), LatticePoint::new(1, 0, 0)]);
//! let space: SpaceSet = [(5, 5, 5), (6, 5, 5), (10, 10, 10)]
//!     .into_iter()
//!     .map(|(x, y, z)| LatticePoint::new(x, y, z))
//!     .collect();
//!
//! let mut engine = OffsetSearchEngine::default();
//! let cancel = CancelToken::new();
//! let report = engine
//!     .run(&model, &space, SearchStrategy::ModelBased, &cancel, &mut NoProgress)
//!     .unwrap();
//!
//! assert_eq!(report.state, RunState::Completed);
//! assert_eq!(report.offsets.sorted(), vec![LatticePoint::new(5, 5, 5)]);
//! ```

mod anchor;
mod brute_force;
pub mod constants;
mod histogram;
mod strategy;
mod task;

use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::point::{ModelSet, SpaceSet, first_out_of_range};
use crate::progress::{NoProgress, ProgressSink, ProgressUpdate};
use crate::result::{Completeness, RunState, SearchReport, SearchResult};

use anchor::AnchorScan;
use brute_force::BruteForceScan;
use histogram::HistogramScan;
pub use strategy::SearchStrategy;
use task::{Step, StrategyTask};

/// What `start` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// A run was already in progress; the request was ignored
    AlreadyRunning,
}

struct ActiveRun<'a> {
    strategy: SearchStrategy,
    task: Box<dyn StrategyTask + 'a>,
    started_at: DateTime<Utc>,
    timer: Instant,
    last_fraction: f64,
}

/// Single-run offset search engine.
///
/// Inputs are borrowed for the lifetime `'a`, so they cannot change while a
/// run is in progress.
pub struct OffsetSearchEngine<'a> {
    config: EngineConfig,
    state: RunState,
    active: Option<ActiveRun<'a>>,
    report: Option<SearchReport>,
}

impl Default for OffsetSearchEngine<'_> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<'a> OffsetSearchEngine<'a> {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: RunState::Idle,
            active: None,
            report: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Report of the last finished run, until taken
    pub fn report(&self) -> Option<&SearchReport> {
        self.report.as_ref()
    }

    /// Hand the finished run's report to the caller and return to `Idle`
    pub fn take_report(&mut self) -> Option<SearchReport> {
        if self.state.is_terminal() {
            self.state = RunState::Idle;
        }
        self.report.take()
    }

    /// Validate inputs and begin a run.
    ///
    /// Input errors are returned before any work is done. An empty space
    /// completes immediately with no offsets. Starting while a run is in
    /// progress is ignored.
    pub fn start(
        &mut self,
        model: &'a ModelSet,
        space: &'a SpaceSet,
        strategy: SearchStrategy,
    ) -> Result<StartOutcome> {
        if self.state == RunState::Running {
            warn!("Ignoring {} start: a search is already running", strategy);
            return Ok(StartOutcome::AlreadyRunning);
        }

        // Previous report is discarded whether or not this start succeeds
        self.report = None;
        self.state = RunState::Idle;

        strategy.validate(model)?;
        if let Some(point) = first_out_of_range(model.iter().chain(space)) {
            return Err(Error::CoordinateOutOfRange(point));
        }

        let started_at = Utc::now();
        let timer = Instant::now();

        if space.is_empty() {
            debug!("Space set is empty, {} search has nothing to scan", strategy);
            self.report = Some(SearchReport {
                strategy,
                state: RunState::Completed,
                completeness: Completeness::Complete,
                count: 0,
                offsets: SearchResult::new(),
                work_units: 0,
                elapsed_ms: 0,
                started_at,
            });
            self.state = RunState::Completed;
            return Ok(StartOutcome::Started);
        }

        let task: Box<dyn StrategyTask + 'a> = match strategy {
            SearchStrategy::BruteForce => Box::new(BruteForceScan::new(
                model,
                space,
                self.config.max_cuboid_volume,
            )?),
            SearchStrategy::HashBased => Box::new(HistogramScan::new(model, space)),
            SearchStrategy::ModelBased => Box::new(AnchorScan::new(model, space)?),
        };

        debug!(
            "Starting {} search: {} model points, {} space points, batch size {}",
            strategy,
            model.len(),
            space.len(),
            self.config.effective_batch_size()
        );

        self.active = Some(ActiveRun {
            strategy,
            task,
            started_at,
            timer,
            last_fraction: 0.0,
        });
        self.state = RunState::Running;
        Ok(StartOutcome::Started)
    }

    /// Run one batch of the active search.
    ///
    /// Returns the state after the batch: `Running` while work remains,
    /// then `Completed` or `Cancelled` with the report available through
    /// [`report`](Self::report) / [`take_report`](Self::take_report).
    pub fn poll(&mut self, cancel: &CancelToken, sink: &mut dyn ProgressSink) -> RunState {
        if let Some(report) = self.advance(cancel, sink) {
            self.report = Some(report);
        }
        self.state
    }

    /// Start a run and drive it to completion or cancellation
    pub fn run(
        &mut self,
        model: &'a ModelSet,
        space: &'a SpaceSet,
        strategy: SearchStrategy,
        cancel: &CancelToken,
        sink: &mut dyn ProgressSink,
    ) -> Result<SearchReport> {
        if self.state == RunState::Running {
            return Err(Error::EngineBusy);
        }
        self.start(model, space, strategy)?;

        let pause = self.config.batch_pause();
        loop {
            if let Some(report) = self.report.take().or_else(|| self.advance(cancel, sink)) {
                self.state = RunState::Idle;
                return Ok(report);
            }
            if let Some(pause) = pause {
                cancel.pause(pause);
            }
        }
    }

    fn advance(
        &mut self,
        cancel: &CancelToken,
        sink: &mut dyn ProgressSink,
    ) -> Option<SearchReport> {
        let run = self.active.as_mut()?;

        let outcome = if cancel.is_cancelled() {
            RunState::Cancelled
        } else {
            let step = run.task.step(self.config.effective_batch_size());
            let progress = run.task.progress();
            let fraction = match step {
                Step::Done => 1.0,
                Step::Pending => progress.fraction.clamp(0.0, 1.0),
            }
            .max(run.last_fraction);
            run.last_fraction = fraction;

            sink.report(&ProgressUpdate {
                strategy: run.strategy,
                phase: progress.phase,
                fraction,
                processed: progress.processed,
                total: progress.total,
            });

            match step {
                Step::Done => RunState::Completed,
                Step::Pending => return None,
            }
        };

        let run = self.active.take()?;
        Some(self.conclude(run, outcome))
    }

    fn conclude(&mut self, run: ActiveRun<'a>, outcome: RunState) -> SearchReport {
        let work_units = run.task.work_done();
        let (offsets, completeness) = match outcome {
            RunState::Completed => (run.task.complete(), Completeness::Complete),
            _ => run.task.cancel(),
        };
        let elapsed_ms = run.timer.elapsed().as_millis().min(u64::MAX as u128) as u64;

        match outcome {
            RunState::Completed => info!(
                "{} search completed: {} offsets ({} work units, {}ms)",
                run.strategy,
                offsets.len(),
                work_units,
                elapsed_ms
            ),
            _ => warn!(
                "{} search cancelled after {} work units: {} offsets kept ({})",
                run.strategy,
                work_units,
                offsets.len(),
                completeness
            ),
        }

        self.state = outcome;
        SearchReport {
            strategy: run.strategy,
            state: outcome,
            completeness,
            count: offsets.len(),
            offsets,
            work_units,
            elapsed_ms,
            started_at: run.started_at,
        }
    }
}

/// Run a search to completion with the default configuration
pub fn find_offsets(
    model: &ModelSet,
    space: &SpaceSet,
    strategy: SearchStrategy,
) -> Result<SearchResult> {
    let mut engine = OffsetSearchEngine::default();
    let report = engine.run(model, space, strategy, &CancelToken::new(), &mut NoProgress)?;
    Ok(report.offsets)
}
