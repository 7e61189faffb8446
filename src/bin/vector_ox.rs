//! vector-ox CLI - Noughts and crosses on NxN boards
//!
//! Subcommands:
//! - play against or between strategies
//! - generate self-play training data
//! - run a round-robin tournament
//! - query the vector index for a position

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "vector-ox")]
#[command(version, about = "Noughts and crosses with random, minimax and vector strategies", long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game (human or strategies)
    Play(Box<vector_ox::cli::commands::play::PlayArgs>),

    /// Generate training data by self-play
    Generate(vector_ox::cli::commands::generate::GenerateArgs),

    /// Run a round-robin tournament between strategies
    Tournament(Box<vector_ox::cli::commands::tournament::TournamentArgs>),

    /// Show what the vector index recalls for a position
    Query(vector_ox::cli::commands::query::QueryArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Play(args) => vector_ox::cli::commands::play::execute(*args),
        Commands::Generate(args) => vector_ox::cli::commands::generate::execute(args),
        Commands::Tournament(args) => vector_ox::cli::commands::tournament::execute(*args),
        Commands::Query(args) => vector_ox::cli::commands::query::execute(args),
    }
}
