//! Exhaustive scan over the candidate cuboid

use tracing::debug;

use crate::bounds::Bounds;
use crate::error::{Error, Result};
use crate::point::{LatticePoint, ModelSet, Offset, SpaceSet};
use crate::progress::SearchPhase;
use crate::result::{Completeness, SearchResult};

use super::task::{Step, StrategyTask, TaskProgress, ratio};

/// Walks every offset in `[space.min - model.max, space.max - model.min]`,
/// x fastest, then y, then z.
///
/// Each candidate is fully tested before the batch can end, so anything in
/// `found` is valid at every batch boundary.
pub(crate) struct BruteForceScan<'a> {
    model: &'a [LatticePoint],
    space: &'a SpaceSet,
    cuboid: Bounds,
    extent: [u64; 3],
    total: u64,
    next: u64,
    found: SearchResult,
}

impl<'a> BruteForceScan<'a> {
    pub(crate) fn new(
        model: &'a ModelSet,
        space: &'a SpaceSet,
        max_volume: Option<u64>,
    ) -> Result<Self> {
        let cuboid = Bounds::candidate_offsets(&Bounds::of(model)?, &Bounds::of(space)?);
        let volume = cuboid.volume();
        let limit = max_volume.unwrap_or(u64::MAX) as u128;
        if volume > limit {
            return Err(Error::SearchVolumeTooLarge { volume, limit });
        }

        // Every axis extent divides a volume that fits in u64
        let [ex, ey, ez] = cuboid.extent().map(|e| e as u64);
        debug!(
            "Brute force cuboid {} .. {} ({} candidates)",
            cuboid.min, cuboid.max, volume
        );

        Ok(Self {
            model: model.points(),
            space,
            cuboid,
            extent: [ex, ey, ez],
            total: volume as u64,
            next: 0,
            found: SearchResult::new(),
        })
    }

    fn candidate_at(&self, index: u64) -> Offset {
        let [ex, ey, _] = self.extent;
        let x = index % ex;
        let rest = index / ex;
        let y = rest % ey;
        let z = rest / ey;

        let shift = |lo: i64, d: u64| (lo as i128 + d as i128) as i64;
        let candidate = LatticePoint::new(
            shift(self.cuboid.min.x, x),
            shift(self.cuboid.min.y, y),
            shift(self.cuboid.min.z, z),
        );
        debug_assert!(self.cuboid.contains(&candidate), "index {index} left the cuboid");
        candidate
    }
}

impl StrategyTask for BruteForceScan<'_> {
    fn step(&mut self, budget: usize) -> Step {
        let end = self.next.saturating_add(budget as u64).min(self.total);
        while self.next < end {
            let candidate = self.candidate_at(self.next);
            if self.space.contains_translated(self.model, candidate) {
                self.found.insert(candidate);
            }
            self.next += 1;
        }

        if self.next >= self.total {
            Step::Done
        } else {
            Step::Pending
        }
    }

    fn progress(&self) -> TaskProgress {
        TaskProgress {
            phase: SearchPhase::CuboidScan,
            fraction: ratio(self.next, self.total),
            processed: self.next,
            total: self.total,
        }
    }

    fn work_done(&self) -> u64 {
        self.next
    }

    fn complete(self: Box<Self>) -> SearchResult {
        self.found
    }

    fn cancel(self: Box<Self>) -> (SearchResult, Completeness) {
        (self.found, Completeness::Partial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i64, y: i64, z: i64) -> LatticePoint {
        LatticePoint::new(x, y, z)
    }

    #[test]
    fn test_candidate_enumeration_covers_cuboid() {
        let model = ModelSet::new(vec![p(0, 0, 0), p(1, 1, 0)]);
        let space: SpaceSet = [p(0, 0, 0), p(2, 1, 1)].into_iter().collect();
        let scan = BruteForceScan::new(&model, &space, None).unwrap();

        // [0-1, 2-0] x [0-1, 1-0] x [0-0, 1-0]
        assert_eq!(scan.extent, [4, 3, 2]);
        assert_eq!(scan.total, 24);
        assert_eq!(scan.candidate_at(0), p(-1, -1, 0));
        assert_eq!(scan.candidate_at(1), p(0, -1, 0));
        assert_eq!(scan.candidate_at(4), p(-1, 0, 0));
        assert_eq!(scan.candidate_at(23), p(2, 1, 1));

        let mut all: Vec<_> = (0..scan.total).map(|i| scan.candidate_at(i)).collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 24);
        assert!(all.iter().all(|c| scan.cuboid.contains(c)));
    }

    #[test]
    fn test_step_respects_budget() {
        let model = ModelSet::new(vec![p(0, 0, 0)]);
        let space: SpaceSet = [p(0, 0, 0), p(4, 0, 0)].into_iter().collect();
        let mut scan = BruteForceScan::new(&model, &space, None).unwrap();
        assert_eq!(scan.total, 5);

        assert_eq!(scan.step(2), Step::Pending);
        assert_eq!(scan.work_done(), 2);
        assert_eq!(scan.step(2), Step::Pending);
        assert_eq!(scan.step(2), Step::Done);
        assert_eq!(scan.work_done(), 5);
        assert_eq!(scan.progress().fraction, 1.0);

        let found = Box::new(scan).complete();
        assert_eq!(found.sorted(), vec![p(0, 0, 0), p(4, 0, 0)]);
    }

    #[test]
    fn test_volume_limit() {
        let model = ModelSet::new(vec![p(0, 0, 0)]);
        let space: SpaceSet = [p(0, 0, 0), p(9, 9, 9)].into_iter().collect();

        assert!(BruteForceScan::new(&model, &space, Some(1000)).is_ok());
        assert!(matches!(
            BruteForceScan::new(&model, &space, Some(999)),
            Err(Error::SearchVolumeTooLarge {
                volume: 1000,
                limit: 999
            })
        ));
    }
}
