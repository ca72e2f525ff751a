//! Search results and run reports

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, IntoStaticStr};

use crate::point::{LatticePoint, Offset, SpaceSet};
use crate::search::SearchStrategy;

/// Engine run state
///
/// ```text
/// Idle ──start──► Running ──► Completed ──take_report──► Idle
///                    │
///                    └──────► Cancelled ──take_report──► Idle
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// How much of the true answer a result is known to contain
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Completeness {
    /// Every valid offset, and nothing else
    Complete,
    /// A subset of the valid offsets; every offset present is valid
    Partial,
    /// Nothing could be certified before the run stopped
    Discarded,
}

/// Set of valid offsets produced by one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    offsets: HashSet<Offset>,
}

impl SearchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn contains(&self, offset: &Offset) -> bool {
        self.offsets.contains(offset)
    }

    /// Insert an offset, returning `false` if it was already present
    pub fn insert(&mut self, offset: Offset) -> bool {
        self.offsets.insert(offset)
    }

    pub fn iter(&self) -> std::collections::hash_set::Iter<'_, Offset> {
        self.offsets.iter()
    }

    /// Offsets in lexicographic (x, y, z) order
    pub fn sorted(&self) -> Vec<Offset> {
        let mut offsets: Vec<Offset> = self.offsets.iter().copied().collect();
        offsets.sort_unstable();
        offsets
    }

    /// Check that every offset maps all `model` points into `space`
    pub fn is_sound(&self, model: &[LatticePoint], space: &SpaceSet) -> bool {
        self.offsets
            .iter()
            .all(|&o| space.contains_translated(model, o))
    }

    pub fn into_inner(self) -> HashSet<Offset> {
        self.offsets
    }
}

impl FromIterator<Offset> for SearchResult {
    fn from_iter<I: IntoIterator<Item = Offset>>(iter: I) -> Self {
        Self {
            offsets: iter.into_iter().collect(),
        }
    }
}

impl From<HashSet<Offset>> for SearchResult {
    fn from(offsets: HashSet<Offset>) -> Self {
        Self { offsets }
    }
}

impl<'a> IntoIterator for &'a SearchResult {
    type Item = &'a Offset;
    type IntoIter = std::collections::hash_set::Iter<'a, Offset>;

    fn into_iter(self) -> Self::IntoIter {
        self.offsets.iter()
    }
}

// Serialized as a sorted list so output files are stable across runs
impl Serialize for SearchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.sorted())
    }
}

impl<'de> Deserialize<'de> for SearchResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<Offset>::deserialize(deserializer).map(|v| v.into_iter().collect())
    }
}

/// Outcome of one run, handed to the caller exactly once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    pub strategy: SearchStrategy,
    /// `Completed` or `Cancelled`
    pub state: RunState,
    pub completeness: Completeness,
    pub count: usize,
    pub offsets: SearchResult,
    /// Work units processed before the run stopped
    pub work_units: u64,
    pub elapsed_ms: u64,
    pub started_at: DateTime<Utc>,
}

impl SearchReport {
    pub fn is_complete(&self) -> bool {
        self.completeness == Completeness::Complete
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == RunState::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i64, y: i64, z: i64) -> LatticePoint {
        LatticePoint::new(x, y, z)
    }

    #[test]
    fn test_result_is_a_set() {
        let mut result = SearchResult::new();
        assert!(result.insert(p(1, 1, 1)));
        assert!(!result.insert(p(1, 1, 1)));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_sorted_and_serialized_order() {
        let result: SearchResult = [p(2, 0, 0), p(-1, 5, 5), p(2, -1, 0)].into_iter().collect();
        assert_eq!(result.sorted(), vec![p(-1, 5, 5), p(2, -1, 0), p(2, 0, 0)]);

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, "[[-1,5,5],[2,-1,0],[2,0,0]]");
        let parsed: SearchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_is_sound() {
        let space: SpaceSet = [p(5, 5, 5), p(6, 5, 5)].into_iter().collect();
        let model = [p(0, 0, 0), p(1, 0, 0)];

        let good: SearchResult = [p(5, 5, 5)].into_iter().collect();
        let bad: SearchResult = [p(5, 5, 5), p(6, 5, 5)].into_iter().collect();
        assert!(good.is_sound(&model, &space));
        assert!(!bad.is_sound(&model, &space));
    }

    #[test]
    fn test_run_state_terminal() {
        assert!(!RunState::Idle.is_terminal());
        assert!(!RunState::Running.is_terminal());
        assert!(RunState::Completed.is_terminal());
        assert!(RunState::Cancelled.is_terminal());
        assert_eq!(RunState::Cancelled.to_string(), "cancelled");
    }
}
