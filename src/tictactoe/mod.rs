//! Generalized noughts-and-crosses on N×N boards

pub mod board;
pub mod game;
pub mod lines;

pub use board::{Board, Cell, MIN_SIZE, Move, Player};
pub use game::{Game, GameOutcome, PlayerMove};
pub use lines::WinningLines;
