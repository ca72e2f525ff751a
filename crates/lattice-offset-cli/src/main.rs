//! latoff - translation-only point pattern search on the integer lattice
//!
//! Subcommands:
//! - `search`: find every offset mapping a model point set into a space
//! - `compare`: run every strategy and check that they agree
//! - `bounds`: show the candidate cuboid and the recommended strategy

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lattice_offset::CancelToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod input;
mod progress;

#[derive(Parser, Debug)]
#[command(name = "latoff")]
#[command(about = "Find lattice offsets that map a model point set into a space", long_about = None)]
struct Cli {
    /// Enable debug logging for the search engine
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for every valid offset
    Search(commands::search::SearchArgs),
    /// Run all strategies and verify they return the same offsets
    Compare(input::InputArgs),
    /// Show bounds, candidate cuboid and recommended strategy
    Bounds(input::InputArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("lattice_offset={level}").parse()?)
                .add_directive(format!("latoff={level}").parse()?),
        )
        .init();

    let cancel = Arc::new(CancelToken::new());
    let cancel_ctrlc = Arc::clone(&cancel);
    ctrlc::set_handler(move || {
        info!("Received interrupt, cancelling search...");
        cancel_ctrlc.cancel();
    })?;

    match cli.command {
        Commands::Search(args) => commands::search::run(&args, &cancel),
        Commands::Compare(args) => commands::compare::run(&args, &cancel),
        Commands::Bounds(args) => commands::bounds::run(&args),
    }
}
