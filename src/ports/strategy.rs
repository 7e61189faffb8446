//! Strategy port - abstraction for move selection
//!
//! Every move-selection approach implements this port so the game driver,
//! data generator and tournament can stay strategy-agnostic:
//! - Baseline (random)
//! - Adversarial search (minimax with alpha-beta pruning)
//! - Retrieval (vector-similarity lookup with random fallback)

use crate::{
    Result,
    strategy::{StrategyKind, StrategyResult},
    tictactoe::{Board, Player},
};

/// Strategy trait - Unified interface for all move-selection approaches
///
/// # Examples
///
/// ```
/// use vector_ox::{
///     ports::Strategy,
///     strategy::RandomStrategy,
///     tictactoe::{Board, Player},
/// };
///
/// let board = Board::new(3)?;
/// let mut strategy = RandomStrategy::with_seed(7);
/// let result = strategy.select_move(&board, Player::X)?;
/// assert!(board.legal_moves().contains(&result.mv));
/// # Ok::<(), vector_ox::Error>(())
/// ```
pub trait Strategy: Send {
    /// Select a move for `player` on the given board.
    ///
    /// The board is left unchanged. The returned move is always one of
    /// `board.legal_moves()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalMove`](crate::Error::NoLegalMove) if the board
    /// has no empty cell. Callers are expected to check for game over first.
    fn select_move(&mut self, board: &Board, player: Player) -> Result<StrategyResult>;

    /// Get the strategy's display name.
    ///
    /// Used for identification in tournaments and logging.
    fn name(&self) -> &str;

    /// The tag this strategy is dispatched by
    fn kind(&self) -> StrategyKind;

    /// Reseed the strategy's internal random number generator.
    ///
    /// Deterministic strategies ignore it.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn set_rng_seed(&mut self, _seed: u64) {}
}
