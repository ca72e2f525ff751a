//! Strategy selection

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::bounds::Bounds;
use crate::error::{Error, Result};
use crate::point::{ModelSet, SpaceSet, first_out_of_range};

use super::constants::ANCHOR_COUNT;

/// Available offset search strategies
///
/// All three return the same offsets when run to completion; they differ in
/// cost and in what a cancelled run can still vouch for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SearchStrategy {
    /// Test every offset in the candidate cuboid. O(R·|M|)
    BruteForce,
    /// Histogram of space − model differences. O(|M|·|S|)
    HashBased,
    /// Anchor-pair candidates, then verification. O(|S| + C·|M|)
    ModelBased,
}

impl SearchStrategy {
    /// Check strategy-specific preconditions on the model set
    pub fn validate(&self, model: &ModelSet) -> Result<()> {
        if model.is_empty() {
            return Err(Error::EmptyModel);
        }

        if *self == Self::ModelBased {
            let (first, second) = model.anchors().ok_or(Error::InsufficientModelPoints {
                required: ANCHOR_COUNT,
                actual: model.len(),
            })?;
            if first == second {
                return Err(Error::DegenerateAnchors(first));
            }
        }

        Ok(())
    }

    /// Pick the cheapest strategy for the given inputs
    ///
    /// The anchor strategy wins whenever it is usable: its first phase is
    /// linear in the space and the second only touches paired candidates.
    /// Otherwise the cuboid volume is weighed against the pair count: brute
    /// force short-circuits on the first miss, so most candidates cost a
    /// single lookup.
    pub fn recommend(model: &ModelSet, space: &SpaceSet) -> Self {
        if Self::ModelBased.validate(model).is_ok() {
            return Self::ModelBased;
        }

        // The engine rejects out-of-range input; skip the bounds arithmetic
        let in_range = first_out_of_range(model.iter().chain(space)).is_none();
        let volume = match (Bounds::of(model), Bounds::of(space)) {
            (Ok(m), Ok(s)) if in_range => Bounds::candidate_offsets(&m, &s).volume(),
            _ => return Self::HashBased,
        };

        let pairs = (model.len() as u128).saturating_mul(space.len() as u128);
        if volume <= pairs {
            Self::BruteForce
        } else {
            Self::HashBased
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::LatticePoint;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn p(x: i64, y: i64, z: i64) -> LatticePoint {
        LatticePoint::new(x, y, z)
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(SearchStrategy::BruteForce.to_string(), "brute-force");
        assert_eq!(
            SearchStrategy::from_str("hash-based").unwrap(),
            SearchStrategy::HashBased
        );
        assert!(SearchStrategy::from_str("fuzzy").is_err());
        assert_eq!(SearchStrategy::iter().count(), 3);

        let json = serde_json::to_string(&SearchStrategy::ModelBased).unwrap();
        assert_eq!(json, "\"model-based\"");
    }

    #[test]
    fn test_validate_empty_model() {
        for strategy in SearchStrategy::iter() {
            assert!(matches!(
                strategy.validate(&ModelSet::default()),
                Err(Error::EmptyModel)
            ));
        }
    }

    #[test]
    fn test_validate_model_based_anchors() {
        let single = ModelSet::new(vec![p(0, 0, 0)]);
        assert!(matches!(
            SearchStrategy::ModelBased.validate(&single),
            Err(Error::InsufficientModelPoints {
                required: 2,
                actual: 1
            })
        ));
        assert!(SearchStrategy::BruteForce.validate(&single).is_ok());
        assert!(SearchStrategy::HashBased.validate(&single).is_ok());

        let coincident = ModelSet::new(vec![p(4, 4, 4), p(4, 4, 4), p(5, 4, 4)]);
        assert!(matches!(
            SearchStrategy::ModelBased.validate(&coincident),
            Err(Error::DegenerateAnchors(a)) if a == p(4, 4, 4)
        ));
    }

    #[test]
    fn test_recommend() {
        let pair = ModelSet::new(vec![p(0, 0, 0), p(1, 0, 0)]);
        let single = ModelSet::new(vec![p(0, 0, 0)]);

        // Full 3x3x1 slab
        let dense: SpaceSet = (0..3)
            .flat_map(|x| (0..3).map(move |y| p(x, y, 0)))
            .collect();
        // Sparse space: two points far apart
        let sparse: SpaceSet = [p(0, 0, 0), p(1_000, 1_000, 1_000)].into_iter().collect();

        assert_eq!(SearchStrategy::recommend(&pair, &sparse), SearchStrategy::ModelBased);
        assert_eq!(SearchStrategy::recommend(&single, &sparse), SearchStrategy::HashBased);
        assert_eq!(
            SearchStrategy::recommend(&single, &SpaceSet::new()),
            SearchStrategy::HashBased
        );
        // Cuboid of 9 offsets against 9 pairs
        assert_eq!(SearchStrategy::recommend(&single, &dense), SearchStrategy::BruteForce);

        // Out-of-range input never reaches the cuboid arithmetic
        let far_model = ModelSet::new(vec![p(i64::MAX, 0, 0)]);
        let far_space: SpaceSet = [p(i64::MIN, 0, 0)].into_iter().collect();
        assert_eq!(
            SearchStrategy::recommend(&far_model, &far_space),
            SearchStrategy::HashBased
        );
    }
}
