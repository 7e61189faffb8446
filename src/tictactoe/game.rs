//! High-level game management

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{Board, Move, Player};
use crate::{Error, Result};

/// Outcome of a game, derived from the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    InProgress,
    Win(Player),
    Draw,
}

impl GameOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(player),
            _ => None,
        }
    }

    /// Training-data label: `X`, `O` or `tie`
    pub fn label(self) -> &'static str {
        match self {
            GameOutcome::Win(Player::X) => "X",
            GameOutcome::Win(Player::O) => "O",
            GameOutcome::Draw => "tie",
            GameOutcome::InProgress => "in-progress",
        }
    }

    /// Parse a finished-game label written by [`GameOutcome::label`]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "X" | "x" => Some(GameOutcome::Win(Player::X)),
            "O" | "o" => Some(GameOutcome::Win(Player::O)),
            "tie" | "draw" => Some(GameOutcome::Draw),
            _ => None,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::InProgress => write!(f, "in progress"),
            GameOutcome::Win(player) => write!(f, "{player} wins"),
            GameOutcome::Draw => write!(f, "draw"),
        }
    }
}

/// A move together with the player who made it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMove {
    pub player: Player,
    pub mv: Move,
}

/// A game in progress with enforced turn alternation.
///
/// [`Board`] leaves alternation to its caller; `Game` is that caller for the
/// game driver and the interactive CLI.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    first_player: Player,
    to_move: Player,
    moves: Vec<PlayerMove>,
}

impl Game {
    /// Start a game on an empty board
    pub fn new(board: Board, first_player: Player) -> Self {
        Self {
            board,
            first_player,
            to_move: first_player,
            moves: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn first_player(&self) -> Player {
        self.first_player
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn moves(&self) -> &[PlayerMove] {
        &self.moves
    }

    pub fn outcome(&self) -> GameOutcome {
        self.board.outcome()
    }

    /// Play a move for the player whose turn it is
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalMove`] if the game is already over and
    /// [`Error::InvalidMove`] if the target cell is not playable.
    pub fn play(&mut self, mv: Move) -> Result<GameOutcome> {
        if self.outcome().is_terminal() {
            return Err(Error::NoLegalMove);
        }

        self.board.apply_move(mv, self.to_move)?;
        self.moves.push(PlayerMove {
            player: self.to_move,
            mv,
        });
        self.to_move = self.to_move.opponent();
        Ok(self.outcome())
    }

    /// Take back the last move, returning it
    pub fn take_back(&mut self) -> Result<Option<PlayerMove>> {
        let Some(last) = self.moves.last().copied() else {
            return Ok(None);
        };
        self.board.undo_move(last.mv)?;
        self.moves.pop();
        self.to_move = last.player;
        Ok(Some(last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_alternates_players() {
        let mut game = Game::new(Board::new(3).unwrap(), Player::X);
        assert_eq!(game.to_move(), Player::X);

        game.play(Move::new(0, 0)).unwrap();
        assert_eq!(game.to_move(), Player::O);
        game.play(Move::new(1, 1)).unwrap();
        assert_eq!(game.to_move(), Player::X);

        assert_eq!(
            game.moves(),
            &[
                PlayerMove {
                    player: Player::X,
                    mv: Move::new(0, 0)
                },
                PlayerMove {
                    player: Player::O,
                    mv: Move::new(1, 1)
                },
            ]
        );
    }

    #[test]
    fn test_game_rejects_moves_after_win() {
        let mut game = Game::new(Board::new(3).unwrap(), Player::O);
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            game.play(Move::new(row, col)).unwrap();
        }
        let outcome = game.play(Move::new(0, 2)).unwrap();
        assert_eq!(outcome, GameOutcome::Win(Player::O));

        let err = game.play(Move::new(2, 2)).unwrap_err();
        assert!(matches!(err, Error::NoLegalMove));
    }

    #[test]
    fn test_take_back_restores_turn() {
        let mut game = Game::new(Board::new(3).unwrap(), Player::X);
        game.play(Move::new(2, 2)).unwrap();

        let undone = game.take_back().unwrap().unwrap();
        assert_eq!(undone.mv, Move::new(2, 2));
        assert_eq!(game.to_move(), Player::X);
        assert_eq!(game.board().occupied_count(), 0);
        assert!(game.take_back().unwrap().is_none());
    }

    #[test]
    fn test_outcome_labels() {
        for outcome in [
            GameOutcome::Win(Player::X),
            GameOutcome::Win(Player::O),
            GameOutcome::Draw,
        ] {
            assert_eq!(GameOutcome::from_label(outcome.label()), Some(outcome));
        }
        assert_eq!(GameOutcome::from_label("maybe"), None);
    }
}
