//! Bookshelf CLI
//!
//! Replays a command log into a catalog, writes the snapshot, and answers
//! name searches against it.

use std::path::PathBuf;

use bookshelf::{Catalog, Config, Engine};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// Bookshelf
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(about = "Book catalog replay, snapshot and search")]
#[command(version)]
struct Args {
    /// Directory holding the default file names
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Command log to replay
    #[arg(long)]
    commands: Option<PathBuf>,

    /// Snapshot written after replay and read back for search
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Search queries
    #[arg(long)]
    queries: Option<PathBuf>,

    /// Search results
    #[arg(long)]
    results: Option<PathBuf>,

    /// Separator between tag and payload
    #[arg(long, default_value_t = Config::DEFAULT_DELIMITER)]
    delimiter: char,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    /// Replay, write the snapshot, then search (default)
    Run,

    /// Replay the command log and write the snapshot
    Replay,

    /// Search the existing snapshot and write the results
    Search,
}

fn build_config(args: &Args) -> Config {
    let mut builder = Config::builder();

    if let Some(dir) = &args.dir {
        builder = builder.dir(dir);
    }
    if let Some(path) = &args.commands {
        builder = builder.commands_path(path);
    }
    if let Some(path) = &args.snapshot {
        builder = builder.snapshot_path(path);
    }
    if let Some(path) = &args.queries {
        builder = builder.queries_path(path);
    }
    if let Some(path) = &args.results {
        builder = builder.results_path(path);
    }

    builder.delimiter(args.delimiter).build()
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bookshelf=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("Bookshelf v{}", bookshelf::VERSION);

    let engine = match Engine::new(build_config(&args)) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    match args.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let report = engine.run();
            tracing::info!(
                diagnostics = report.diagnostic_count(),
                stage_errors = report.stage_errors.len(),
                "Done"
            );
        }
        Commands::Replay => {
            let mut catalog = Catalog::new();
            if let Err(e) = engine.replay_into(&mut catalog) {
                tracing::error!("Replay did not complete: {}", e);
            }
            if let Err(e) = engine.write_snapshot(&catalog) {
                tracing::error!("Snapshot not written: {}", e);
            }
        }
        Commands::Search => {
            if let Err(e) = engine.resolve_searches() {
                tracing::error!("Search did not complete: {}", e);
            }
        }
    }
}
