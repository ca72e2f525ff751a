//! Anchor-pair pruning
//!
//! With anchors `m0 = model[0]`, `m1 = model[1]` and displacement
//! `d = m1 - m0`, a valid offset `o` must put `m0 + o` and `m0 + o + d` in
//! the space. So every space point `s` with `s + d` also in the space yields
//! the candidate `s - m0`, and only those candidates need checking against
//! the remaining model points.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{Error, Result};
use crate::point::{LatticePoint, ModelSet, Offset, SpaceSet};
use crate::progress::SearchPhase;
use crate::result::{Completeness, SearchResult};

use super::constants::{ANCHOR_COUNT, CANDIDATE_GENERATION_SHARE};
use super::task::{Step, StrategyTask, TaskProgress, ratio};

enum Phase {
    Generating {
        cursor: usize,
        candidates: HashSet<Offset>,
    },
    Verifying {
        cursor: usize,
        candidates: Vec<Offset>,
    },
}

pub(crate) struct AnchorScan<'a> {
    /// Model points past the anchors
    rest: &'a [LatticePoint],
    space: &'a SpaceSet,
    space_points: Vec<LatticePoint>,
    anchor: LatticePoint,
    displacement: LatticePoint,
    phase: Phase,
    found: SearchResult,
}

impl<'a> AnchorScan<'a> {
    pub(crate) fn new(model: &'a ModelSet, space: &'a SpaceSet) -> Result<Self> {
        let (anchor, second) = model.anchors().ok_or(Error::InsufficientModelPoints {
            required: ANCHOR_COUNT,
            actual: model.len(),
        })?;
        let displacement = second - anchor;
        if displacement.is_origin() {
            return Err(Error::DegenerateAnchors(anchor));
        }
        debug!(
            "Anchor pair {} -> {} (displacement {})",
            anchor, second, displacement
        );

        Ok(Self {
            rest: &model.points()[ANCHOR_COUNT..],
            space,
            space_points: space.iter().copied().collect(),
            anchor,
            displacement,
            phase: Phase::Generating {
                cursor: 0,
                candidates: HashSet::new(),
            },
            found: SearchResult::new(),
        })
    }

    fn generate(&mut self, budget: usize) -> Step {
        let Phase::Generating { cursor, candidates } = &mut self.phase else {
            return Step::Pending;
        };

        let end = cursor.saturating_add(budget).min(self.space_points.len());
        for &s in &self.space_points[*cursor..end] {
            if self.space.contains(&(s + self.displacement)) {
                candidates.insert(s - self.anchor);
            }
        }
        *cursor = end;

        if *cursor < self.space_points.len() {
            return Step::Pending;
        }

        let candidates: Vec<Offset> = std::mem::take(candidates).into_iter().collect();
        debug!(
            "Anchor phase 1 done: {} candidates from {} space points",
            candidates.len(),
            self.space_points.len()
        );
        let done = candidates.is_empty();
        self.phase = Phase::Verifying {
            cursor: 0,
            candidates,
        };

        if done { Step::Done } else { Step::Pending }
    }

    fn verify(&mut self, budget: usize) -> Step {
        let Phase::Verifying { cursor, candidates } = &mut self.phase else {
            return Step::Pending;
        };

        let end = cursor.saturating_add(budget).min(candidates.len());
        for &offset in &candidates[*cursor..end] {
            // Anchors hold by construction
            if self.space.contains_translated(self.rest, offset) {
                self.found.insert(offset);
            }
        }
        *cursor = end;

        if *cursor < candidates.len() {
            Step::Pending
        } else {
            Step::Done
        }
    }
}

impl StrategyTask for AnchorScan<'_> {
    fn step(&mut self, budget: usize) -> Step {
        match self.phase {
            Phase::Generating { .. } => self.generate(budget),
            Phase::Verifying { .. } => self.verify(budget),
        }
    }

    fn progress(&self) -> TaskProgress {
        match &self.phase {
            Phase::Generating { cursor, .. } => {
                let total = self.space_points.len() as u64;
                let processed = *cursor as u64;
                TaskProgress {
                    phase: SearchPhase::CandidateGeneration,
                    fraction: ratio(processed, total) * CANDIDATE_GENERATION_SHARE,
                    processed,
                    total,
                }
            }
            Phase::Verifying { cursor, candidates } => {
                let total = candidates.len() as u64;
                let processed = *cursor as u64;
                TaskProgress {
                    phase: SearchPhase::Verification,
                    fraction: CANDIDATE_GENERATION_SHARE
                        + ratio(processed, total) * (1.0 - CANDIDATE_GENERATION_SHARE),
                    processed,
                    total,
                }
            }
        }
    }

    fn work_done(&self) -> u64 {
        match &self.phase {
            Phase::Generating { cursor, .. } => *cursor as u64,
            Phase::Verifying { cursor, .. } => (self.space_points.len() + *cursor) as u64,
        }
    }

    fn complete(self: Box<Self>) -> SearchResult {
        self.found
    }

    fn cancel(self: Box<Self>) -> (SearchResult, Completeness) {
        match self.phase {
            // Candidate list incomplete, nothing verified yet
            Phase::Generating { .. } => (SearchResult::new(), Completeness::Discarded),
            Phase::Verifying { .. } => (self.found, Completeness::Partial),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i64, y: i64, z: i64) -> LatticePoint {
        LatticePoint::new(x, y, z)
    }

    fn line(n: i64) -> SpaceSet {
        (0..n).map(|x| p(x, 0, 0)).collect()
    }

    #[test]
    fn test_rejects_bad_anchors() {
        let space = line(3);
        let single = ModelSet::new(vec![p(0, 0, 0)]);
        assert!(matches!(
            AnchorScan::new(&single, &space),
            Err(Error::InsufficientModelPoints { .. })
        ));

        let coincident = ModelSet::new(vec![p(1, 1, 1), p(1, 1, 1)]);
        assert!(matches!(
            AnchorScan::new(&coincident, &space),
            Err(Error::DegenerateAnchors(_))
        ));
    }

    #[test]
    fn test_two_phases() {
        let model = ModelSet::new(vec![p(0, 0, 0), p(1, 0, 0), p(2, 0, 0)]);
        let space = line(4);
        let mut scan = AnchorScan::new(&model, &space).unwrap();

        // Phase 1: points 0, 1, 2 have a right neighbour
        assert_eq!(scan.step(4), Step::Pending);
        let progress = scan.progress();
        assert_eq!(progress.phase, SearchPhase::Verification);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.fraction, 0.5);
        assert_eq!(scan.work_done(), 4);

        // Phase 2: candidate 2 would need (4, 0, 0)
        assert_eq!(scan.step(10), Step::Done);
        assert_eq!(scan.work_done(), 7);
        let found = Box::new(scan).complete();
        assert_eq!(found.sorted(), vec![p(0, 0, 0), p(1, 0, 0)]);
    }

    #[test]
    fn test_no_candidates_finishes_after_phase_one() {
        let model = ModelSet::new(vec![p(0, 0, 0), p(0, 0, 5)]);
        let space = line(3);
        let mut scan = AnchorScan::new(&model, &space).unwrap();
        assert_eq!(scan.step(3), Step::Done);
        assert!(Box::new(scan).complete().is_empty());
    }

    #[test]
    fn test_cancel_in_generation_discards() {
        let model = ModelSet::new(vec![p(0, 0, 0), p(1, 0, 0)]);
        let space = line(5);
        let mut scan = AnchorScan::new(&model, &space).unwrap();
        assert_eq!(scan.step(2), Step::Pending);
        assert_eq!(scan.progress().phase, SearchPhase::CandidateGeneration);

        let (found, completeness) = Box::new(scan).cancel();
        assert!(found.is_empty());
        assert_eq!(completeness, Completeness::Discarded);
    }

    #[test]
    fn test_cancel_in_verification_keeps_verified() {
        let model = ModelSet::new(vec![p(0, 0, 0), p(1, 0, 0), p(2, 0, 0)]);
        let space = line(4);
        let mut scan = AnchorScan::new(&model, &space).unwrap();
        assert_eq!(scan.step(4), Step::Pending);
        assert_eq!(scan.step(2), Step::Pending);

        let (found, completeness) = Box::new(scan).cancel();
        assert_eq!(completeness, Completeness::Partial);
        assert!(found.is_sound(model.points(), &space));
    }
}
