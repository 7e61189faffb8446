//! Configuration types for strategy and board creation.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    strategy::{DEFAULT_NEIGHBOURS, StrategyKind},
    tictactoe::{Board, MIN_SIZE},
};

/// Board sizes up to this can be searched exhaustively without a depth limit
pub const MAX_UNBOUNDED_SIZE: usize = 3;

/// Configuration for a game and the strategies playing it.
///
/// This type provides a type-safe, builder-style API for configuring games
/// before strategies are created through the dependency injection container.
/// Nothing is checked until [`validate`](GameConfig::validate).
///
/// # Examples
///
/// ```
/// use vector_ox::app::GameConfig;
///
/// let config = GameConfig::new(4)
///     .with_win_length(3)
///     .with_depth_limit(4)
///     .with_seed(42);
/// config.validate()?;
/// # Ok::<(), vector_ox::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board side length
    pub size: usize,
    /// Marks in a row needed to win (defaults to `size`)
    pub win_length: Option<usize>,
    /// Minimax ply limit (None = search to terminal positions)
    pub depth_limit: Option<u32>,
    /// Neighbours consulted by the vector strategy
    pub neighbours: usize,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Search root moves in parallel
    pub parallel: bool,
}

impl GameConfig {
    /// Create a configuration for a `size`×`size` board.
    ///
    /// Uses default values for other parameters:
    /// - Win length: the board size
    /// - Depth limit: none
    /// - Neighbours: [`DEFAULT_NEIGHBOURS`]
    /// - Seed: None (non-deterministic)
    pub fn new(size: usize) -> Self {
        Self {
            size,
            win_length: None,
            depth_limit: None,
            neighbours: DEFAULT_NEIGHBOURS,
            seed: None,
            parallel: false,
        }
    }

    pub fn with_win_length(mut self, win_length: usize) -> Self {
        self.win_length = Some(win_length);
        self
    }

    pub fn with_depth_limit(mut self, depth: u32) -> Self {
        self.depth_limit = Some(depth);
        self
    }

    pub fn with_neighbours(mut self, neighbours: usize) -> Self {
        self.neighbours = neighbours;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Effective win length
    pub fn win_length(&self) -> usize {
        self.win_length.unwrap_or(self.size)
    }

    /// Check every setting once, before any game starts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the board is smaller than 3×3, the
    /// win length is outside `3..=size`, the depth limit is zero or no
    /// neighbours are requested.
    pub fn validate(&self) -> Result<()> {
        if self.size < MIN_SIZE {
            return Err(Error::configuration(format!(
                "board size must be at least {MIN_SIZE}, got {}",
                self.size
            )));
        }
        let win_length = self.win_length();
        if !(MIN_SIZE..=self.size).contains(&win_length) {
            return Err(Error::configuration(format!(
                "win length must be between {MIN_SIZE} and {}, got {win_length}",
                self.size
            )));
        }
        if self.depth_limit == Some(0) {
            return Err(Error::configuration("depth limit must be at least 1"));
        }
        if self.neighbours == 0 {
            return Err(Error::configuration("neighbour count must be at least 1"));
        }
        Ok(())
    }

    /// [`validate`](Self::validate), plus what the given strategy needs.
    ///
    /// Minimax on a board larger than 3×3 requires a depth limit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] on any failure of `validate`, or for
    /// minimax without a depth limit on a large board.
    pub fn validate_for(&self, kind: StrategyKind) -> Result<()> {
        self.validate()?;
        if kind == StrategyKind::Minimax
            && self.depth_limit.is_none()
            && self.size > MAX_UNBOUNDED_SIZE
        {
            return Err(Error::configuration(format!(
                "minimax needs a depth limit on boards larger than \
                 {MAX_UNBOUNDED_SIZE}x{MAX_UNBOUNDED_SIZE}"
            )));
        }
        Ok(())
    }

    /// Create an empty board with this geometry
    pub fn new_board(&self) -> Result<Board> {
        Board::with_win_length(self.size, self.win_length())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(MIN_SIZE)
    }
}
