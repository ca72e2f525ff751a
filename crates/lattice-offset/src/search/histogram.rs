//! Pairwise-difference histogram
//!
//! Every (model point, space point) pair votes for the offset `s - m`. Since
//! the space is a set, a model point can vote for a given offset at most
//! once, so an offset that collects exactly `|model|` votes maps every model
//! point (duplicates included) into the space.

use std::collections::HashMap;

use tracing::debug;

use crate::point::{LatticePoint, ModelSet, Offset, SpaceSet};
use crate::progress::SearchPhase;
use crate::result::{Completeness, SearchResult};

use super::task::{Step, StrategyTask, TaskProgress, ratio};

pub(crate) struct HistogramScan<'a> {
    model: &'a [LatticePoint],
    space: Vec<LatticePoint>,
    model_index: usize,
    space_index: usize,
    processed: u64,
    total: u64,
    counts: HashMap<Offset, usize>,
}

impl<'a> HistogramScan<'a> {
    pub(crate) fn new(model: &'a ModelSet, space: &'a SpaceSet) -> Self {
        let space: Vec<LatticePoint> = space.iter().copied().collect();
        let total = (model.len() as u64).saturating_mul(space.len() as u64);
        debug!(
            "Histogram over {} model x {} space points ({} pairs)",
            model.len(),
            space.len(),
            total
        );

        Self {
            model: model.points(),
            space,
            model_index: 0,
            space_index: 0,
            processed: 0,
            total,
            counts: HashMap::new(),
        }
    }

    fn is_exhausted(&self) -> bool {
        self.model_index >= self.model.len() || self.space.is_empty()
    }
}

impl StrategyTask for HistogramScan<'_> {
    fn step(&mut self, budget: usize) -> Step {
        let mut remaining = budget;
        while remaining > 0 && !self.is_exhausted() {
            let m = self.model[self.model_index];
            let take = remaining.min(self.space.len() - self.space_index);

            for &s in &self.space[self.space_index..self.space_index + take] {
                *self.counts.entry(s - m).or_insert(0) += 1;
            }

            self.space_index += take;
            self.processed += take as u64;
            remaining -= take;

            if self.space_index == self.space.len() {
                self.space_index = 0;
                self.model_index += 1;
            }
        }

        if self.is_exhausted() {
            Step::Done
        } else {
            Step::Pending
        }
    }

    fn progress(&self) -> TaskProgress {
        TaskProgress {
            phase: SearchPhase::Histogram,
            fraction: ratio(self.processed, self.total),
            processed: self.processed,
            total: self.total,
        }
    }

    fn work_done(&self) -> u64 {
        self.processed
    }

    fn complete(self: Box<Self>) -> SearchResult {
        let required = self.model.len();
        debug!("Histogram holds {} distinct offsets", self.counts.len());
        self.counts
            .into_iter()
            .filter(|&(_, count)| count == required)
            .map(|(offset, _)| offset)
            .collect()
    }

    // Counts are undercounts until every pair is seen
    fn cancel(self: Box<Self>) -> (SearchResult, Completeness) {
        (SearchResult::new(), Completeness::Discarded)
    }
}
