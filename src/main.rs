//! # Mission Control CLI (`mc`)
//!
//! Command-line interface for the dashboard backend: rebuild the JSON
//! snapshots, search the workspace, inspect stats, and start the HTTP API.
//!
//! ## Usage
//!
//! ```bash
//! mc --config ./config/mission-control.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `mc sync` | Rebuild the activity/job/index/stats snapshots |
//! | `mc search "<query>"` | Search the workspace (or the built index) |
//! | `mc stats` | Print a snapshot overview |
//! | `mc serve` | Start the dashboard HTTP API |

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use mission_control::{config, search, server, snapshot, stats, sync};

/// Mission Control — flat-file dashboard backend for an automation agent
/// workspace.
#[derive(Parser)]
#[command(
    name = "mc",
    about = "Mission Control — flat-file dashboard backend for an automation agent workspace",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/mission-control.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild all derived snapshots from the workspace.
    ///
    /// Classifies the newest dated notes into activities, rolls overdue
    /// jobs forward, rebuilds the content index, and recomputes stats.
    /// Each snapshot file is replaced wholesale and atomically.
    Sync {
        /// Show counts without writing any snapshot.
        #[arg(long)]
        dry_run: bool,

        /// Override the sync timestamp (RFC 3339). Defaults to the current
        /// time; overriding keeps reruns reproducible.
        #[arg(long)]
        now: Option<String>,
    },

    /// Search the workspace and print ranked results.
    ///
    /// Scans the raw files by default. With `--index`, scans the built
    /// index's title+preview text instead — faster, but matches outside
    /// the stored preview are missed.
    Search {
        /// The search query (matched literally, case-insensitive).
        query: String,

        /// Search the built snapshot index instead of the raw files.
        #[arg(long)]
        index: bool,

        /// Maximum number of results to return.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print an overview of the current snapshots.
    Stats,

    /// Start the dashboard HTTP API.
    ///
    /// Binds to the address configured in `[server].bind`.
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mission_control=info,mc=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Sync { dry_run, now } => {
            let now: DateTime<Utc> = match now {
                Some(s) => s.parse()?,
                None => Utc::now(),
            };
            sync::run_sync(&cfg, now, dry_run)?;
        }
        Commands::Search {
            query,
            index,
            limit,
        } => {
            let limit = limit.unwrap_or(cfg.retrieval.final_limit);
            let results = if index {
                let entries: Vec<mission_control::models::DocumentRecord> =
                    snapshot::load(&cfg.data_path(snapshot::INDEX_FILE))?;
                search::search_index(&entries, &query, limit)?
            } else {
                let mut results = search::search_files(&cfg, &query)?;
                results.truncate(limit);
                results
            };
            print_results(&results);
        }
        Commands::Stats => {
            stats::run_stats(&cfg)?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}

fn print_results(results: &[mission_control::models::SearchResult]) {
    if results.is_empty() {
        println!("No results.");
        return;
    }

    for (i, result) in results.iter().enumerate() {
        println!(
            "{}. [{:.2}] {}",
            i + 1,
            result.relevance,
            result.title
        );
        println!("    path: {}", result.path);
        println!("    date: {}", result.date);
        println!("    excerpt: \"{}\"", result.content);
        println!();
    }
}
