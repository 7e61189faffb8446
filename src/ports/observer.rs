//! Observer port - abstraction for game observation
//!
//! This port defines the interface for observing games played by the game
//! driver, allowing progress reporting and data collection without coupling
//! the driver to specific output formats.

use crate::{
    Result,
    strategy::StrategyResult,
    tictactoe::{Board, GameOutcome, Player},
};

/// Observer trait for monitoring a run of games
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_run_start(total_games)` - Once at the beginning
/// 2. For each game:
///    - `on_game_start(game_num)`
///    - `on_move(...)` - For each move in the game
///    - `on_game_end(game_num, outcome)`
/// 3. `on_run_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use vector_ox::{
///     ports::GameObserver,
///     tictactoe::GameOutcome,
/// };
///
/// struct DrawCounter {
///     draws: usize,
/// }
///
/// impl GameObserver for DrawCounter {
///     fn on_game_end(
///         &mut self,
///         _game_num: usize,
///         outcome: GameOutcome,
///     ) -> vector_ox::Result<()> {
///         if outcome == GameOutcome::Draw {
///             self.draws += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait GameObserver: Send {
    /// Called once before the first game.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to initialize observation state.
    fn on_run_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a game starts.
    ///
    /// # Parameters
    ///
    /// * `game_num` - Index of the game (0-based)
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called after a move is selected, before it is applied.
    ///
    /// # Parameters
    ///
    /// * `game_num` - Index of the current game
    /// * `ply` - Move number within the game (0-based)
    /// * `board` - Board before the move
    /// * `player` - Player making the move
    /// * `result` - The strategy's choice and diagnostics
    fn on_move(
        &mut self,
        _game_num: usize,
        _ply: usize,
        _board: &Board,
        _player: Player,
        _result: &StrategyResult,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a game reaches a terminal state.
    fn on_game_end(&mut self, _game_num: usize, _outcome: GameOutcome) -> Result<()> {
        Ok(())
    }

    /// Called once after the last game.
    ///
    /// Use this to finalize outputs or display summaries.
    fn on_run_end(&mut self) -> Result<()> {
        Ok(())
    }
}
