//! Game driver
//!
//! Plays one game between two strategies on a fresh board, notifying
//! observers of every move. Strategies only see the board and the player to
//! move; the driver owns turn order and legality.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{GameObserver, Strategy},
    strategy::StrategyResult,
    tictactoe::{Board, Game, GameOutcome, Player},
};

/// One move as it happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedMove {
    pub player: Player,
    /// Board state string before the move
    pub state: String,
    pub result: StrategyResult,
}

/// Complete history of a finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub first_player: Player,
    pub moves: Vec<RecordedMove>,
    pub outcome: GameOutcome,
    /// Board state string after the last move
    pub final_state: String,
}

impl GameRecord {
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Moves that fell back from retrieval to random play
    pub fn fallback_count(&self) -> usize {
        self.moves.iter().filter(|m| m.result.is_fallback()).count()
    }
}

/// Play a single game as a complete observed run.
///
/// `x` plays X and `o` plays O; `first_player` decides who opens.
///
/// # Errors
///
/// Returns [`Error::InvalidMove`](crate::Error::InvalidMove) if a strategy
/// picks an unplayable cell, and propagates strategy and observer errors.
pub fn play_game(
    board: Board,
    x: &mut dyn Strategy,
    o: &mut dyn Strategy,
    first_player: Player,
    observers: &mut [Box<dyn GameObserver>],
) -> Result<GameRecord> {
    for observer in observers.iter_mut() {
        observer.on_run_start(1)?;
    }
    let record = play_numbered_game(0, board, x, o, first_player, observers)?;
    for observer in observers.iter_mut() {
        observer.on_run_end()?;
    }
    Ok(record)
}

/// Play game number `game_num` of a longer run.
///
/// Only per-game observer events are emitted; the caller owns
/// `on_run_start` and `on_run_end`.
pub fn play_numbered_game(
    game_num: usize,
    board: Board,
    x: &mut dyn Strategy,
    o: &mut dyn Strategy,
    first_player: Player,
    observers: &mut [Box<dyn GameObserver>],
) -> Result<GameRecord> {
    for observer in observers.iter_mut() {
        observer.on_game_start(game_num)?;
    }

    let mut game = Game::new(board, first_player);
    let mut moves = Vec::new();
    let mut outcome = game.outcome();

    while !outcome.is_terminal() {
        let player = game.to_move();
        let strategy: &mut dyn Strategy = match player {
            Player::X => &mut *x,
            Player::O => &mut *o,
        };

        let result = strategy.select_move(game.board(), player)?;
        for observer in observers.iter_mut() {
            observer.on_move(game_num, moves.len(), game.board(), player, &result)?;
        }

        let state = game.board().state_string();
        outcome = game.play(result.mv)?;
        moves.push(RecordedMove {
            player,
            state,
            result,
        });
    }

    for observer in observers.iter_mut() {
        observer.on_game_end(game_num, outcome)?;
    }

    Ok(GameRecord {
        first_player,
        moves,
        outcome,
        final_state: game.board().state_string(),
    })
}
