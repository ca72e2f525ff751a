//! Lattice points and the point sets the search runs over.

use std::collections::HashSet;
use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Integer point on the 3D lattice.
///
/// Serialized as a `[x, y, z]` array.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "[i64; 3]", into = "[i64; 3]")]
pub struct LatticePoint {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

/// A lattice point interpreted as a translation vector.
pub type Offset = LatticePoint;

impl LatticePoint {
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Largest coordinate magnitude the search accepts.
    ///
    /// Strategies evaluate expressions such as `s + (m1 - m0)` and
    /// `(s - m) + m'`, combining three input points; at this bound any such
    /// combination stays inside `i64`.
    pub const MAX_COORDINATE: i64 = 3_000_000_000_000_000_000;

    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Round a geometric translation to the nearest lattice point.
    ///
    /// Halves round away from zero. Returns `None` for non-finite or
    /// out-of-range components.
    pub fn from_translation(translation: [f64; 3]) -> Option<Self> {
        let round = |v: f64| {
            let r = v.round();
            (r.is_finite() && r.abs() <= Self::MAX_COORDINATE as f64).then_some(r as i64)
        };
        Some(Self::new(
            round(translation[0])?,
            round(translation[1])?,
            round(translation[2])?,
        ))
    }

    /// Integer coordinates within [`MAX_COORDINATE`](Self::MAX_COORDINATE)
    pub fn checked_new(x: i64, y: i64, z: i64) -> Option<Self> {
        let point = Self::new(x, y, z);
        point.is_within_limit().then_some(point)
    }

    pub fn is_within_limit(&self) -> bool {
        let ok = |v: i64| v.unsigned_abs() <= Self::MAX_COORDINATE as u64;
        ok(self.x) && ok(self.y) && ok(self.z)
    }

    pub fn is_origin(&self) -> bool {
        *self == Self::ORIGIN
    }

    pub fn to_array(self) -> [i64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[i64; 3]> for LatticePoint {
    fn from([x, y, z]: [i64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<LatticePoint> for [i64; 3] {
    fn from(point: LatticePoint) -> Self {
        point.to_array()
    }
}

impl Add for LatticePoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for LatticePoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl fmt::Display for LatticePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// First point with a component beyond [`LatticePoint::MAX_COORDINATE`]
pub(crate) fn first_out_of_range<'a, I>(points: I) -> Option<LatticePoint>
where
    I: IntoIterator<Item = &'a LatticePoint>,
{
    points.into_iter().find(|p| !p.is_within_limit()).copied()
}

/// The pattern being searched for.
///
/// Order matters: the first two points are the anchor pair used by the
/// model-based strategy. Duplicate points are kept as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelSet {
    points: Vec<LatticePoint>,
}

impl ModelSet {
    pub fn new(points: Vec<LatticePoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[LatticePoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LatticePoint> {
        self.points.iter()
    }

    /// First two points, if present
    pub fn anchors(&self) -> Option<(LatticePoint, LatticePoint)> {
        match self.points.as_slice() {
            [first, second, ..] => Some((*first, *second)),
            _ => None,
        }
    }
}

impl From<Vec<LatticePoint>> for ModelSet {
    fn from(points: Vec<LatticePoint>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<LatticePoint> for ModelSet {
    fn from_iter<I: IntoIterator<Item = LatticePoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ModelSet {
    type Item = &'a LatticePoint;
    type IntoIter = std::slice::Iter<'a, LatticePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// The point universe searched within.
///
/// Membership only: duplicate input positions collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceSet {
    points: HashSet<LatticePoint>,
}

impl SpaceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, point: &LatticePoint) -> bool {
        self.points.contains(point)
    }

    /// Insert a point, returning `false` if it was already present
    pub fn insert(&mut self, point: LatticePoint) -> bool {
        self.points.insert(point)
    }

    pub fn iter(&self) -> std::collections::hash_set::Iter<'_, LatticePoint> {
        self.points.iter()
    }

    /// Check that every point, translated by `offset`, is in the space.
    ///
    /// Stops at the first miss.
    pub fn contains_translated(&self, points: &[LatticePoint], offset: Offset) -> bool {
        points.iter().all(|&p| self.points.contains(&(p + offset)))
    }
}

impl FromIterator<LatticePoint> for SpaceSet {
    fn from_iter<I: IntoIterator<Item = LatticePoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SpaceSet {
    type Item = &'a LatticePoint;
    type IntoIter = std::collections::hash_set::Iter<'a, LatticePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
