//! Uniform random baseline

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use super::{Diagnostics, StrategyKind, StrategyResult};
use crate::{
    Error, Result,
    ports::Strategy,
    tictactoe::{Board, Move, Player},
};

/// Random policy (baseline)
///
/// The random source is owned by the strategy and can be seeded, so runs are
/// reproducible without any global state.
pub struct RandomStrategy {
    name: String,
    rng: StdRng,
}

impl RandomStrategy {
    /// Create a random strategy seeded from OS entropy
    pub fn new() -> Self {
        Self::with_seed(random())
    }

    /// Create a random strategy with a deterministic seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            name: StrategyKind::Random.default_name().to_string(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Set the display name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Pick one of `board.legal_moves()` uniformly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalMove`] on a full board.
    pub fn choose(&mut self, board: &Board) -> Result<Move> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Err(Error::NoLegalMove);
        }
        let index = self.rng.random_range(0..moves.len());
        Ok(moves[index])
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn select_move(&mut self, board: &Board, _player: Player) -> Result<StrategyResult> {
        let mv = self.choose(board)?;
        Ok(StrategyResult::new(mv, Diagnostics::Random))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Random
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
