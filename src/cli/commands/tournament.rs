//! Tournament command - Round-robin between strategies

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        args::{BoardArgs, IndexArgs},
        output::{print_kv, print_section, print_tournament_report},
    },
    pipeline::{ProgressObserver, Tournament},
    strategy::StrategyKind,
};

#[derive(Parser, Debug)]
#[command(about = "Run a round-robin tournament")]
pub struct TournamentArgs {
    /// Strategies to enter (default: random minimax vector)
    pub strategies: Vec<String>,

    /// Games per ordered matchup
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Save the full report as JSON
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    #[command(flatten)]
    pub board: BoardArgs,

    #[command(flatten)]
    pub index: IndexArgs,
}

pub fn execute(args: TournamentArgs) -> Result<()> {
    let config = args.board.to_config()?;
    let app = args.index.build_app()?;

    let kinds: Vec<StrategyKind> = if args.strategies.is_empty() {
        StrategyKind::ALL.to_vec()
    } else {
        args.strategies
            .iter()
            .map(|s| s.parse())
            .collect::<crate::Result<_>>()?
    };

    let entrants = app.create_entrants(&kinds, &config)?;

    print_section("Vector-OX Tournament");
    print_kv("Board", &format!("{0}x{0}", config.size));
    print_kv("Games per matchup", &args.games.to_string());

    let mut tournament = Tournament::new(entrants, config)?;
    print_kv("Matchups", &tournament.matchup_count().to_string());
    if !args.no_progress {
        tournament = tournament.with_observer(Box::new(ProgressObserver::new()));
    }

    let report = tournament.run(args.games)?;
    print_tournament_report(&report);

    if let Some(path) = &args.output {
        report
            .save_json(path)
            .with_context(|| format!("failed to save report to {}", path.display()))?;
        println!("\nResults saved to {}", path.display());
    }

    Ok(())
}
