//! Compare command implementation.

use anyhow::{Result, bail};
use lattice_offset::{
    CancelToken, LogProgress, ModelSet, OffsetSearchEngine, SearchReport, SearchStrategy,
    SpaceSet,
};
use owo_colors::OwoColorize;
use strum::IntoEnumIterator;
use tracing::warn;

use crate::input::InputArgs;

/// Run the compare command
pub fn run(args: &InputArgs, cancel: &CancelToken) -> Result<()> {
    let (model, space) = args.load()?;
    let reports = run_strategies(&model, &space, cancel)?;

    println!("=== Strategy comparison ===");
    for report in &reports {
        println!(
            "  {:<12} {:>6} offsets  {:>10} work units  {:>6} ms",
            report.strategy.to_string(),
            report.count,
            report.work_units,
            report.elapsed_ms
        );
    }

    check_agreement(&reports, &model, &space)?;
    println!("{}", "All strategies agree".green());
    Ok(())
}

/// Run every strategy that accepts the model, to completion
fn run_strategies(
    model: &ModelSet,
    space: &SpaceSet,
    cancel: &CancelToken,
) -> Result<Vec<SearchReport>> {
    let mut reports = Vec::new();

    for strategy in SearchStrategy::iter() {
        if let Err(e) = strategy.validate(model) {
            warn!("Skipping {}: {}", strategy, e);
            println!("  {:<12} {}", strategy.to_string(), format!("skipped ({e})").yellow());
            continue;
        }

        let mut engine = OffsetSearchEngine::default();
        let report = engine.run(model, space, strategy, cancel, &mut LogProgress::default())?;
        if report.is_cancelled() {
            bail!("Comparison cancelled during {}", strategy);
        }
        reports.push(report);
    }

    Ok(reports)
}

/// Every report must hold the same offsets, and each offset must be valid
fn check_agreement(reports: &[SearchReport], model: &ModelSet, space: &SpaceSet) -> Result<()> {
    let Some(reference) = reports.first() else {
        bail!("No strategy accepted the model");
    };

    for report in reports {
        if !report.offsets.is_sound(model.points(), space) {
            bail!("{} returned an offset that does not map the model", report.strategy);
        }
        if report.offsets != reference.offsets {
            bail!(
                "{} found {} offsets but {} found {}",
                report.strategy,
                report.count,
                reference.strategy,
                reference.count
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_offset::LatticePoint;

    fn p(x: i64, y: i64, z: i64) -> LatticePoint {
        LatticePoint::new(x, y, z)
    }

    fn square_space() -> SpaceSet {
        [p(0, 0, 0), p(1, 0, 0), p(0, 1, 0), p(1, 1, 0), p(5, 5, 5)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_all_strategies_agree() {
        let model = ModelSet::new(vec![p(0, 0, 0), p(1, 0, 0)]);
        let space = square_space();
        let reports = run_strategies(&model, &space, &CancelToken::new()).unwrap();

        assert_eq!(reports.len(), 3);
        check_agreement(&reports, &model, &space).unwrap();
        assert_eq!(reports[0].offsets.sorted(), vec![p(0, 0, 0), p(0, 1, 0)]);
    }

    #[test]
    fn test_single_point_model_skips_anchor_strategy() {
        let model = ModelSet::new(vec![p(0, 0, 0)]);
        let space = square_space();
        let reports = run_strategies(&model, &space, &CancelToken::new()).unwrap();

        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.strategy != SearchStrategy::ModelBased));
        check_agreement(&reports, &model, &space).unwrap();
        assert_eq!(reports[0].count, 5);
    }

    #[test]
    fn test_mismatch_is_reported() {
        let model = ModelSet::new(vec![p(0, 0, 0), p(1, 0, 0)]);
        let space = square_space();
        let mut reports = run_strategies(&model, &space, &CancelToken::new()).unwrap();
        reports[1].offsets = Default::default();

        assert!(check_agreement(&reports, &model, &space).is_err());
    }

    #[test]
    fn test_cancelled_comparison_fails() {
        let model = ModelSet::new(vec![p(0, 0, 0), p(1, 0, 0)]);
        let cancel = CancelToken::new();
        cancel.cancel();
        assert!(run_strategies(&model, &square_space(), &cancel).is_err());
    }
}
