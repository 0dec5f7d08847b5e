//! Swingman CLI — Command-line interface for replay, scoring, and checks.
//!
//! Usage:
//!   swingman replay <PATH>     Replay a recorded detection stream
//!   swingman score <PATH>      Score a detection stream as a single swing
//!   swingman check             Show configuration and environment

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "swingman",
    about = "Bat swing tracking, impact detection, and scoring",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded detection stream through the full session engine
    Replay {
        /// Path to a detections.jsonl file
        path: PathBuf,

        /// Session name (artifact directory prefix)
        #[arg(short, long, default_value = "replay")]
        name: String,

        /// Output directory for session artifacts
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Score a detection stream as one swing, without export
    Score {
        /// Path to a detections.jsonl file
        path: PathBuf,
    },

    /// Show configuration and environment
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    swingman_common::logging::init_logging(&swingman_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Replay { path, name, output } => commands::replay::run(path, name, output).await,
        Commands::Score { path } => commands::score::run(path),
        Commands::Check => commands::check::run(),
    }
}
