//! Generate command - Write training data for the vector index

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::save_examples,
    cli::{
        args::BoardArgs,
        output::{format_number, print_kv, print_section},
    },
    pipeline::{DataGenerator, JsonlObserver, ProgressObserver},
};

#[derive(Parser, Debug)]
#[command(about = "Generate training data by self-play")]
pub struct GenerateArgs {
    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 1000)]
    pub games: usize,

    /// Output file for training data
    #[arg(long, default_value = "training_data.txt")]
    pub output: PathBuf,

    /// Also log every game as JSON Lines to this file
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    #[command(flatten)]
    pub board: BoardArgs,
}

pub fn execute(args: GenerateArgs) -> Result<()> {
    let config = args.board.to_config()?;

    print_section("Generating training data");
    print_kv("Board", &format!("{0}x{0}", config.size));
    print_kv("Games", &format_number(args.games));
    if let Some(depth) = config.depth_limit {
        print_kv("Minimax depth", &depth.to_string());
    }

    let mut generator = DataGenerator::new(config)?;
    if !args.no_progress {
        generator = generator.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        generator = generator.with_observer(Box::new(JsonlObserver::new(path)?));
    }
    let examples = generator.generate(args.games)?;

    save_examples(&args.output, &examples)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!();
    print_kv("Board states", &format_number(examples.len()));
    print_kv("Saved to", &args.output.display().to_string());
    if let Some(path) = &args.observations {
        print_kv("Game log", &path.display().to_string());
    }
    Ok(())
}
