//! twelve-factor CLI tool.
//!
//! Usage:
//! ```bash
//! twelve-factor [--verbose] <PATH>
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Heuristic twelve-factor compliance checker for project directories
#[derive(Parser)]
#[command(name = "twelve-factor")]
#[command(about, long_about = None)]
struct Cli {
    /// Log per-factor progress to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Path to the project to validate
    path: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if !cli.path.exists() {
        eprintln!("Error: Path '{}' does not exist", cli.path.display());
        std::process::exit(1);
    }

    commands::validate::run(&cli.path)
}
