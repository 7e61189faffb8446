//! Shared argument groups for CLI commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Args;
use log::info;

use crate::{
    app::{App, GameConfig},
    strategy::DEFAULT_NEIGHBOURS,
    tictactoe::Player,
};

/// Board geometry and strategy tuning flags
#[derive(Args, Debug, Clone)]
pub struct BoardArgs {
    /// Board size (N for an NxN board)
    #[arg(long, short = 's', default_value_t = 3)]
    pub size: usize,

    /// Marks in a row needed to win (defaults to the board size)
    #[arg(long)]
    pub win_length: Option<usize>,

    /// Minimax search depth in plies (required for minimax on boards larger than 3x3)
    #[arg(long, short = 'd')]
    pub depth: Option<u32>,

    /// Neighbours consulted by the vector strategy
    #[arg(long, short = 'k', default_value_t = DEFAULT_NEIGHBOURS)]
    pub neighbours: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Search minimax root moves on all cores
    #[arg(long)]
    pub parallel: bool,
}

impl BoardArgs {
    /// Build and validate the game configuration
    pub fn to_config(&self) -> Result<GameConfig> {
        let mut config = GameConfig::new(self.size)
            .with_neighbours(self.neighbours)
            .with_parallel(self.parallel);
        if let Some(win_length) = self.win_length {
            config = config.with_win_length(win_length);
        }
        if let Some(depth) = self.depth {
            config = config.with_depth_limit(depth);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config.validate().context("invalid board settings")?;
        Ok(config)
    }
}

/// Training data used to build the vector index
#[derive(Args, Debug, Clone)]
pub struct IndexArgs {
    /// Training data file produced by `generate`
    #[arg(long, short = 't')]
    pub training_data: Option<PathBuf>,
}

impl IndexArgs {
    /// Build the application container, loading the index if a file is given
    pub fn build_app(&self) -> Result<App> {
        match &self.training_data {
            Some(path) => load_app(path),
            None => {
                info!("no training data given; vector strategy will play randomly");
                Ok(App::new())
            }
        }
    }
}

fn load_app(path: &Path) -> Result<App> {
    App::from_training_file(path)
        .with_context(|| format!("failed to build vector index from {}", path.display()))
}

/// Parse a player token such as `x` or `o`
pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" | "player1" | "p1" => Ok(Player::X),
        "o" | "second" | "player2" | "p2" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}
