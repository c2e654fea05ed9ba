//! Concept Cluster CLI
//!
//! Groups the words of a vocabulary file into overlapping clusters keyed by
//! concepts of a lexical hierarchy, then writes a ranked report plus the
//! excluded-word diagnostics.
//!
//! # Commands
//!
//! - `cluster`: run the full pipeline over a vocabulary and lexicon file
//!
//! # Exit codes
//!
//! - 0: success
//! - 1: recoverable error (unreadable input, lexicon failure)
//! - 2: configuration error (invalid bounds, rejected before any work)

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod error;

/// Concept Cluster CLI - hypernym-closure word clustering
#[derive(Parser)]
#[command(name = "concept-cluster")]
#[command(version = "0.1.0")]
#[command(about = "Groups words into clusters keyed by shared hypernym concepts")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster a vocabulary file against a lexicon file
    Cluster(commands::cluster::ClusterArgs),
}

fn main() {
    let cli = Cli::parse();

    // Logging goes to stderr so stdout stays a clean report surface.
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match cli.command {
        Commands::Cluster(args) => commands::cluster::run(args),
    };
    std::process::exit(exit_code.into());
}
