//! Search command implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Args;
use lattice_offset::{
    CancelToken, Completeness, EngineConfig, ModelSet, OffsetSearchEngine, SearchReport,
    SearchStrategy, SpaceSet,
};
use owo_colors::OwoColorize;
use tracing::info;

use crate::config::load_engine_config;
use crate::input::InputArgs;
use crate::progress::ConsoleProgress;

/// Strategy selection: a fixed strategy or the input-based recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyChoice {
    Auto,
    Fixed(SearchStrategy),
}

impl StrategyChoice {
    pub fn resolve(self, model: &ModelSet, space: &SpaceSet) -> SearchStrategy {
        match self {
            Self::Auto => {
                let strategy = SearchStrategy::recommend(model, space);
                info!("Auto-selected strategy: {}", strategy);
                strategy
            }
            Self::Fixed(strategy) => strategy,
        }
    }
}

impl FromStr for StrategyChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        SearchStrategy::from_str(&s.to_ascii_lowercase())
            .map(Self::Fixed)
            .map_err(|_| {
                format!("unknown strategy '{s}' (expected auto, brute-force, hash-based or model-based)")
            })
    }
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Strategy: auto, brute-force, hash-based or model-based
    #[arg(long, default_value = "auto")]
    pub strategy: StrategyChoice,

    /// Write the search report as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML file with engine settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Work units per batch (overrides config)
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Maximum brute-force cuboid volume (overrides config)
    #[arg(long)]
    pub max_volume: Option<u64>,
}

impl SearchArgs {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = load_engine_config(self.config.as_deref())?;
        if let Some(size) = self.batch_size {
            config.batch_size = size;
        }
        if let Some(volume) = self.max_volume {
            config.max_cuboid_volume = Some(volume);
        }
        Ok(config)
    }
}

/// Run the search command
pub fn run(args: &SearchArgs, cancel: &CancelToken) -> Result<()> {
    let (model, space) = args.input.load()?;
    let config = args.engine_config()?;
    let strategy = args.strategy.resolve(&model, &space);

    let mut engine = OffsetSearchEngine::new(config);
    let mut progress = ConsoleProgress::new();
    let report = engine.run(&model, &space, strategy, cancel, &mut progress);
    progress.finish();
    let report = report.with_context(|| format!("{} search failed", strategy))?;

    print_summary(&report);

    if let Some(path) = &args.output {
        save_report(&report, path)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

fn print_summary(report: &SearchReport) {
    println!();
    println!("=== {} search ===", report.strategy);

    let status = match report.completeness {
        Completeness::Complete => "complete".green().to_string(),
        Completeness::Partial => "cancelled (partial results)".yellow().to_string(),
        Completeness::Discarded => "cancelled (results discarded)".red().to_string(),
    };
    println!("Status:     {}", status);
    println!("Offsets:    {}", report.count.bold());
    println!("Work units: {}", report.work_units);
    println!("Elapsed:    {} ms", report.elapsed_ms);

    if !report.offsets.is_empty() {
        println!();
        for offset in report.offsets.sorted() {
            println!("  {}", offset.cyan());
        }
    }
}

/// Write a report as pretty-printed JSON
fn save_report(report: &SearchReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Saved report to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_offset::{LatticePoint, NoProgress};
    use tempfile::TempDir;

    fn p(x: i64, y: i64, z: i64) -> LatticePoint {
        LatticePoint::new(x, y, z)
    }

    #[test]
    fn test_strategy_choice_parsing() {
        assert_eq!("auto".parse::<StrategyChoice>(), Ok(StrategyChoice::Auto));
        assert_eq!(
            "Hash-Based".parse::<StrategyChoice>(),
            Ok(StrategyChoice::Fixed(SearchStrategy::HashBased))
        );
        assert_eq!(
            "model-based".parse::<StrategyChoice>(),
            Ok(StrategyChoice::Fixed(SearchStrategy::ModelBased))
        );
        assert!("fastest".parse::<StrategyChoice>().is_err());
    }

    #[test]
    fn test_report_round_trip() {
        let model = ModelSet::new(vec![p(0, 0, 0), p(1, 0, 0)]);
        let space: SpaceSet = [p(0, 0, 0), p(1, 0, 0), p(2, 0, 0)].into_iter().collect();
        let mut engine = OffsetSearchEngine::default();
        let report = engine
            .run(
                &model,
                &space,
                SearchStrategy::ModelBased,
                &CancelToken::new(),
                &mut NoProgress,
            )
            .unwrap();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        save_report(&report, &path).unwrap();

        let json = fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"strategy\": \"model-based\""));
        let loaded: SearchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, report);
    }

    #[test]
    fn test_flags_override_config() {
        let args = SearchArgs {
            input: InputArgs {
                model: PathBuf::from("model.json"),
                space: PathBuf::from("space.json"),
            },
            strategy: StrategyChoice::Auto,
            output: None,
            config: None,
            batch_size: Some(7),
            max_volume: Some(99),
        };
        let config = args.engine_config().unwrap();
        assert_eq!(config.batch_size, 7);
        assert_eq!(config.max_cuboid_volume, Some(99));
    }
}
