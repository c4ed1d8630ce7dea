//! AOC CLI - Command-line interface for running Advent of Code solvers

mod cache;
mod cli;
mod config;
mod error;
mod input;
mod output;
mod runner;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aoc_http_client::AocClient;
use aoc_solver::SolverRegistryBuilder;
use cache::InputCache;
use clap::Parser;
use cli::Args;
use config::Config;
use input::InputProvider;
use output::OutputFormatter;
use runner::{Runner, Selection};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

fn main() {
    init_tracing();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (warnings and errors by default)
fn init_tracing() {
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

fn run(args: Args) -> Result<(), error::CliError> {
    let config = Config::from_args(args)?;

    let registry = build_registry(&config.tags)?;
    let provider = InputProvider::new(
        InputCache::new(config.cache_dir.clone()),
        config.session.clone(),
        AocClient::new()?,
    );
    let runner = Runner::new(registry, provider, Selection::from(&config));

    let work_items = runner.collect_work_items();
    if work_items.is_empty() {
        eprintln!("No solvers found matching the specified filters.");
        return Ok(());
    }

    let formatter = OutputFormatter::new(config.timings);
    let results = runner.run(&work_items, &formatter)?;
    formatter.print_summary(&results);

    Ok(())
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, error::CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
