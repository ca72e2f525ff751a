//! Axis-aligned bounds of point sets
//!
//! The exhaustive strategy scans every offset inside the candidate cuboid
//! `[space.min - model.max, space.max - model.min]`: any offset outside it
//! moves at least one model point past the space's bounds.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::point::LatticePoint;

/// Inclusive per-axis `(min, max)` range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: LatticePoint,
    pub max: LatticePoint,
}

impl Bounds {
    /// Compute the bounds of a non-empty point set
    pub fn of<'a, I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a LatticePoint>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next().ok_or(Error::EmptyPointSet)?;

        Ok(iter.fold(
            Self {
                min: first,
                max: first,
            },
            |b, p| Self {
                min: LatticePoint::new(b.min.x.min(p.x), b.min.y.min(p.y), b.min.z.min(p.z)),
                max: LatticePoint::new(b.max.x.max(p.x), b.max.y.max(p.y), b.max.z.max(p.z)),
            },
        ))
    }

    /// Range of offsets that can possibly map `model` into `space`
    pub fn candidate_offsets(model: &Bounds, space: &Bounds) -> Bounds {
        Bounds {
            min: space.min - model.max,
            max: space.max - model.min,
        }
    }

    /// Number of lattice points along each axis
    pub fn extent(&self) -> [u128; 3] {
        let span = |lo: i64, hi: i64| (hi as i128 - lo as i128 + 1) as u128;
        [
            span(self.min.x, self.max.x),
            span(self.min.y, self.max.y),
            span(self.min.z, self.max.z),
        ]
    }

    /// Number of lattice points inside the bounds (saturating)
    pub fn volume(&self) -> u128 {
        let [ex, ey, ez] = self.extent();
        ex.saturating_mul(ey).saturating_mul(ez)
    }

    pub fn contains(&self, point: &LatticePoint) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.z..=self.max.z).contains(&point.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i64, y: i64, z: i64) -> LatticePoint {
        LatticePoint::new(x, y, z)
    }

    #[test]
    fn test_bounds_of_points() {
        let points = [p(1, -4, 7), p(-2, 3, 7), p(5, 0, -1)];
        let bounds = Bounds::of(&points).unwrap();
        assert_eq!(bounds.min, p(-2, -4, -1));
        assert_eq!(bounds.max, p(5, 3, 7));
    }

    #[test]
    fn test_bounds_of_empty_set_fails() {
        let points: [LatticePoint; 0] = [];
        assert!(matches!(Bounds::of(&points), Err(Error::EmptyPointSet)));
    }

    #[test]
    fn test_single_point_volume() {
        let bounds = Bounds::of(&[p(3, 3, 3)]).unwrap();
        assert_eq!(bounds.extent(), [1, 1, 1]);
        assert_eq!(bounds.volume(), 1);
    }

    #[test]
    fn test_candidate_offsets() {
        let model = Bounds::of(&[p(0, 0, 0), p(1, 0, 0)]).unwrap();
        let space = Bounds::of(&[p(5, 5, 5), p(6, 5, 5), p(10, 10, 10)]).unwrap();
        let cuboid = Bounds::candidate_offsets(&model, &space);

        assert_eq!(cuboid.min, p(4, 5, 5));
        assert_eq!(cuboid.max, p(10, 10, 10));
        assert_eq!(cuboid.extent(), [7, 6, 6]);
        assert_eq!(cuboid.volume(), 252);
        assert!(cuboid.contains(&p(5, 5, 5)));
        assert!(!cuboid.contains(&p(11, 5, 5)));
    }

    #[test]
    fn test_volume_saturates() {
        let bounds = Bounds {
            min: p(i64::MIN / 2, i64::MIN / 2, i64::MIN / 2),
            max: p(i64::MAX / 2, i64::MAX / 2, i64::MAX / 2),
        };
        assert_eq!(bounds.volume(), u128::MAX);
    }
}
