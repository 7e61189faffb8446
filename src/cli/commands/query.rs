//! Query command - Inspect what the vector index recalls for a position

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;

use crate::{
    app::App,
    cli::{
        args::BoardArgs,
        output::{print_kv, print_section, print_subsection, render_board},
    },
    strategy::StrategyKind,
    tictactoe::Board,
};

#[derive(Parser, Debug)]
#[command(about = "Show nearest neighbours and the vector move for a position")]
pub struct QueryArgs {
    /// Board state as row-major cells (`X`, `O`, `.`), e.g. `X...O....`
    pub state: String,

    /// Training data file produced by `generate`
    #[arg(long, short = 't')]
    pub training_data: PathBuf,

    #[command(flatten)]
    pub board: BoardArgs,
}

pub fn execute(args: QueryArgs) -> Result<()> {
    let config = args.board.to_config()?;
    let board = Board::from_state_string(&args.state, Some(config.win_length()))?;
    if board.size() != config.size {
        return Err(anyhow!(
            "state describes a {0}x{0} board but --size is {1}",
            board.size(),
            config.size
        ));
    }
    let player = board.player_to_move()?;

    let app = App::from_training_file(&args.training_data)?;
    let index = app.index();

    print_section("Vector Query");
    print_kv("Indexed states", &index.len().to_string());
    print_kv("To move", &player.to_string());
    println!("\n{}", render_board(&board));

    print_subsection(&format!("Nearest {} neighbours", config.neighbours));
    let neighbours = index.query_nearest(&board.to_vector(), config.neighbours)?;
    if neighbours.is_empty() {
        println!("  (none)");
    }
    for (rank, record) in neighbours.iter().enumerate() {
        let legal = if board.is_legal(record.mv) { "" } else { " (illegal here)" };
        let outcome = record
            .outcome
            .map(|o| o.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!("  {}. move {}{legal}, outcome {outcome}", rank + 1, record.mv);
    }

    if board.is_terminal() {
        print_kv("Decision", "position is already decided");
        return Ok(());
    }
    let mut strategy = app.create_strategy(StrategyKind::Vector, &config)?;
    let result = strategy.select_move(&board, player)?;
    print_subsection("Decision");
    println!("  {}", result.summary());
    Ok(())
}
