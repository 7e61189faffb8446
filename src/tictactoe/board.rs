//! Board state representation and basic operations

use std::{fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};

use super::{GameOutcome, lines::WinningLines};
use crate::{Error, Result};

/// Smallest supported board and win length
pub const MIN_SIZE: usize = 3;

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// Numeric encoding shared with the vector index: Empty=0, X=+1, O=-1
    pub fn to_value(self) -> f32 {
        match self {
            Cell::Empty => 0.0,
            Cell::X => 1.0,
            Cell::O => -1.0,
        }
    }

    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

impl FromStr for Player {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "X" | "x" => Ok(Player::X),
            "O" | "o" => Ok(Player::O),
            other => Err(Error::configuration(format!(
                "unknown player '{other}' (expected 'x' or 'o')"
            ))),
        }
    }
}

/// A move on the board, addressed by row and column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Build a move from a row-major cell index
    pub fn from_index(index: usize, size: usize) -> Self {
        Self {
            row: index / size,
            col: index % size,
        }
    }

    /// Row-major cell index of this move, if it lies on a board of `size`
    pub fn index(self, size: usize) -> Option<usize> {
        (self.row < size && self.col < size).then_some(self.row * size + self.col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Move {
    type Err = Error;

    /// Parse `row,col` (whitespace around either number is ignored)
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidMoveText {
            input: s.to_string(),
        };
        let (row, col) = s.split_once(',').ok_or_else(invalid)?;
        let row = row.trim().parse().map_err(|_| invalid())?;
        let col = col.trim().parse().map_err(|_| invalid())?;
        Ok(Move { row, col })
    }
}

/// An N×N noughts-and-crosses board with a configurable win length.
///
/// The board does not track whose turn it is; the caller alternates players.
/// It only guarantees that every [`apply_move`](Board::apply_move) targets an
/// empty in-range cell and that every [`undo_move`](Board::undo_move) reverses
/// the most recent apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    lines: Arc<WinningLines>,
    history: Vec<Move>,
}

impl Board {
    /// Create an empty board where a full row, column or diagonal wins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `size < 3`.
    pub fn new(size: usize) -> Result<Self> {
        Self::with_win_length(size, size)
    }

    /// Create an empty board with an explicit win length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] unless `size >= 3` and
    /// `3 <= win_length <= size`.
    pub fn with_win_length(size: usize, win_length: usize) -> Result<Self> {
        validate_geometry(size, win_length)?;
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
            lines: Arc::new(WinningLines::new(size, win_length)),
            history: Vec::new(),
        })
    }

    /// Parse a row-major state string of `.`, `X` and `O` characters.
    ///
    /// Whitespace is ignored, so both `"X..O....."` and the multi-line
    /// `Display` form are accepted. The board size is the square root of the
    /// cell count; `win_length` defaults to the size. The parsed board has no
    /// undo history.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStateString`] if the cell count is not a square
    /// or a character is not a cell, and [`Error::Configuration`] if the
    /// resulting geometry is invalid.
    pub fn from_state_string(s: &str, win_length: Option<usize>) -> Result<Self> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        let size = chars.len().isqrt();
        if size * size != chars.len() {
            return Err(Error::InvalidStateString {
                input: s.to_string(),
                reason: format!("{} cells do not form a square board", chars.len()),
            });
        }

        let mut board = Self::with_win_length(size, win_length.unwrap_or(size))?;
        for (i, &c) in chars.iter().enumerate() {
            board.cells[i] = Cell::from_char(c).ok_or_else(|| Error::InvalidStateString {
                input: s.to_string(),
                reason: format!("invalid character '{c}' at position {i}"),
            })?;
        }
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn win_length(&self) -> usize {
        self.lines.win_length()
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get the cell at (row, col), or `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        Move::new(row, col)
            .index(self.size)
            .map(|idx| self.cells[idx])
    }

    /// Moves applied through [`apply_move`](Board::apply_move), oldest first
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Check whether `mv` targets an empty in-range cell
    pub fn is_legal(&self, mv: Move) -> bool {
        mv.index(self.size)
            .is_some_and(|idx| self.cells[idx] == Cell::Empty)
    }

    /// All empty cells in row-major order
    pub fn legal_moves(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Move::from_index(i, self.size))
            .collect()
    }

    /// Place `player`'s mark on the target cell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMove`] if the cell is out of bounds or occupied.
    /// The board is unchanged on error.
    pub fn apply_move(&mut self, mv: Move, player: Player) -> Result<()> {
        let idx = mv.index(self.size).ok_or(Error::InvalidMove {
            mv,
            reason: "out of bounds",
        })?;
        if self.cells[idx] != Cell::Empty {
            return Err(Error::InvalidMove {
                mv,
                reason: "cell is already occupied",
            });
        }

        self.cells[idx] = player.to_cell();
        self.history.push(mv);
        Ok(())
    }

    /// Reverse the most recent [`apply_move`](Board::apply_move).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalUndo`] if the cell is empty or `mv` is not the
    /// last applied move. The board is unchanged on error.
    pub fn undo_move(&mut self, mv: Move) -> Result<()> {
        let idx = mv.index(self.size).ok_or(Error::IllegalUndo {
            mv,
            reason: "out of bounds",
        })?;
        if self.cells[idx] == Cell::Empty {
            return Err(Error::IllegalUndo {
                mv,
                reason: "cell is already empty",
            });
        }
        if self.history.last() != Some(&mv) {
            return Err(Error::IllegalUndo {
                mv,
                reason: "not the most recently applied move",
            });
        }

        self.history.pop();
        self.cells[idx] = Cell::Empty;
        Ok(())
    }

    /// Get the winner if there is one.
    ///
    /// Windows are scanned rows first, then columns, then both diagonal
    /// directions; the owner of the first complete window is returned.
    pub fn winner(&self) -> Option<Player> {
        self.lines.owner(&self.cells)
    }

    /// Check if a player owns a complete window
    pub fn has_won(&self, player: Player) -> bool {
        self.lines.has_won(&self.cells, player)
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Derive the game outcome from the current cells
    pub fn outcome(&self) -> GameOutcome {
        match self.winner() {
            Some(player) => GameOutcome::Win(player),
            None if self.is_full() => GameOutcome::Draw,
            None => GameOutcome::InProgress,
        }
    }

    /// Infer whose turn it is from piece counts, assuming X moved first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStateString`] if the counts cannot arise from
    /// alternating play.
    pub fn player_to_move(&self) -> Result<Player> {
        let x = self.cells.iter().filter(|&&c| c == Cell::X).count();
        let o = self.cells.iter().filter(|&&c| c == Cell::O).count();
        if x == o {
            Ok(Player::X)
        } else if x == o + 1 {
            Ok(Player::O)
        } else {
            Err(Error::InvalidStateString {
                input: self.state_string(),
                reason: format!("piece counts X={x}, O={o} cannot arise with X moving first"),
            })
        }
    }

    /// Flatten the grid row-major with Empty=0, X=+1, O=-1.
    ///
    /// This encoding is the query format of the vector index and must match
    /// the encoding used when the index was populated.
    pub fn to_vector(&self) -> Vec<f32> {
        self.cells.iter().map(|c| c.to_value()).collect()
    }

    /// Row-major string of `.`, `X` and `O`
    pub fn state_string(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }

    /// Clear every cell and the undo history
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
        self.history.clear();
    }
}

fn validate_geometry(size: usize, win_length: usize) -> Result<()> {
    if size < MIN_SIZE {
        return Err(Error::configuration(format!(
            "board size must be at least {MIN_SIZE}, got {size}"
        )));
    }
    if !(MIN_SIZE..=size).contains(&win_length) {
        return Err(Error::configuration(format!(
            "win length must be between {MIN_SIZE} and the board size {size}, got {win_length}"
        )));
    }
    Ok(())
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.chunks(self.size).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(|c| c.to_char().to_string()).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(board: &mut Board, moves: &[(usize, usize)]) {
        let mut player = Player::X;
        for &(row, col) in moves {
            board.apply_move(Move::new(row, col), player).unwrap();
            player = player.opponent();
        }
    }

    #[test]
    fn test_new_board() {
        let board = Board::new(3).unwrap();
        assert_eq!(board.size(), 3);
        assert_eq!(board.win_length(), 3);
        assert_eq!(board.legal_moves().len(), 9);
        assert!(board.cells().iter().all(|&c| c == Cell::Empty));
        assert_eq!(board.outcome(), GameOutcome::InProgress);
    }

    #[test]
    fn test_rejects_invalid_geometry() {
        assert!(matches!(Board::new(2), Err(Error::Configuration { .. })));
        assert!(matches!(
            Board::with_win_length(3, 4),
            Err(Error::Configuration { .. })
        ));
        assert!(matches!(
            Board::with_win_length(5, 2),
            Err(Error::Configuration { .. })
        ));
        assert!(Board::with_win_length(5, 4).is_ok());
    }

    #[test]
    fn test_legal_moves_row_major() {
        let mut board = Board::new(3).unwrap();
        board.apply_move(Move::new(1, 1), Player::X).unwrap();

        let moves = board.legal_moves();
        assert_eq!(moves.len(), 8);
        assert_eq!(moves[0], Move::new(0, 0));
        assert_eq!(moves[3], Move::new(1, 0));
        assert_eq!(moves[4], Move::new(1, 2));
        assert!(!moves.contains(&Move::new(1, 1)));
    }

    #[test]
    fn test_apply_rejects_occupied_and_out_of_bounds() {
        let mut board = Board::new(3).unwrap();
        board.apply_move(Move::new(0, 0), Player::X).unwrap();

        let err = board.apply_move(Move::new(0, 0), Player::O).unwrap_err();
        assert!(err.to_string().contains("occupied"));

        let err = board.apply_move(Move::new(3, 0), Player::O).unwrap_err();
        assert!(matches!(err, Error::InvalidMove { .. }));
        assert_eq!(board.occupied_count(), 1);
        assert_eq!(board.history(), &[Move::new(0, 0)]);
    }

    #[test]
    fn test_undo_reverses_apply() {
        let mut board = Board::new(3).unwrap();
        let before = board.clone();

        board.apply_move(Move::new(2, 1), Player::O).unwrap();
        board.undo_move(Move::new(2, 1)).unwrap();

        assert_eq!(board, before);
    }

    #[test]
    fn test_undo_empty_cell_fails() {
        let mut board = Board::new(3).unwrap();
        let err = board.undo_move(Move::new(0, 0)).unwrap_err();
        assert!(matches!(err, Error::IllegalUndo { .. }));
    }

    #[test]
    fn test_undo_out_of_order_fails() {
        let mut board = Board::new(3).unwrap();
        play(&mut board, &[(0, 0), (1, 1)]);

        let err = board.undo_move(Move::new(0, 0)).unwrap_err();
        assert!(err.to_string().contains("most recently applied"));
        assert_eq!(board.get(0, 0), Some(Cell::X));

        board.undo_move(Move::new(1, 1)).unwrap();
        board.undo_move(Move::new(0, 0)).unwrap();
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_win_detection_horizontal() {
        let mut board = Board::new(3).unwrap();
        play(&mut board, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert_eq!(board.winner(), Some(Player::X));
        assert!(board.is_terminal());
    }

    #[test]
    fn test_win_detection_vertical() {
        let mut board = Board::new(3).unwrap();
        play(&mut board, &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 0)]);
        assert_eq!(board.winner(), Some(Player::X));
    }

    #[test]
    fn test_win_detection_diagonal() {
        let mut board = Board::new(3).unwrap();
        play(&mut board, &[(0, 0), (0, 1), (1, 1), (1, 0), (2, 2)]);
        assert_eq!(board.winner(), Some(Player::X));
    }

    #[test]
    fn test_win_length_shorter_than_board() {
        let mut board = Board::with_win_length(5, 3).unwrap();
        // O completes (2,4) (3,3) (4,2)
        board.apply_move(Move::new(2, 4), Player::O).unwrap();
        board.apply_move(Move::new(3, 3), Player::O).unwrap();
        assert_eq!(board.winner(), None);
        board.apply_move(Move::new(4, 2), Player::O).unwrap();
        assert_eq!(board.winner(), Some(Player::O));
        assert_eq!(board.outcome(), GameOutcome::Win(Player::O));
    }

    #[test]
    fn test_draw_detection() {
        let board = Board::from_state_string("XOXXOOOXX", None).unwrap();
        assert!(board.is_full());
        assert_eq!(board.winner(), None);
        assert_eq!(board.outcome(), GameOutcome::Draw);
    }

    #[test]
    fn test_to_vector_encoding() {
        let mut board = Board::new(3).unwrap();
        assert_eq!(board.to_vector(), vec![0.0; 9]);

        board.apply_move(Move::new(0, 0), Player::X).unwrap();
        board.apply_move(Move::new(1, 1), Player::O).unwrap();
        assert_eq!(
            board.to_vector(),
            vec![1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_state_string_roundtrip() {
        let mut board = Board::new(3).unwrap();
        play(&mut board, &[(0, 0), (1, 1)]);
        assert_eq!(board.state_string(), "X...O....");

        let parsed = Board::from_state_string(&board.state_string(), None).unwrap();
        assert_eq!(parsed.cells(), board.cells());
        assert!(parsed.history().is_empty());
    }

    #[test]
    fn test_from_state_string_rejects_bad_input() {
        assert!(matches!(
            Board::from_state_string("XO.", None),
            Err(Error::InvalidStateString { .. })
        ));
        assert!(matches!(
            Board::from_state_string("XOZ......", None),
            Err(Error::InvalidStateString { .. })
        ));
        assert!(matches!(
            Board::from_state_string("....", None),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_from_state_string_sizes_by_cell_count() {
        for cells in [8, 10, 15, 17, 24, 26] {
            assert!(matches!(
                Board::from_state_string(&".".repeat(cells), None),
                Err(Error::InvalidStateString { .. })
            ));
        }
        for size in [3, 4, 5, 7] {
            let board = Board::from_state_string(&".".repeat(size * size), None).unwrap();
            assert_eq!(board.size(), size);
        }
    }

    #[test]
    fn test_player_to_move() {
        let board = Board::from_state_string("X........", None).unwrap();
        assert_eq!(board.player_to_move().unwrap(), Player::O);

        let board = Board::from_state_string("XO.......", None).unwrap();
        assert_eq!(board.player_to_move().unwrap(), Player::X);

        let board = Board::from_state_string("XX.......", None).unwrap();
        assert!(board.player_to_move().is_err());
    }

    #[test]
    fn test_move_text_roundtrip() {
        let mv: Move = " 2, 1".parse().unwrap();
        assert_eq!(mv, Move::new(2, 1));
        assert_eq!(mv.to_string(), "2,1");
        assert!("2;1".parse::<Move>().is_err());
        assert!("a,1".parse::<Move>().is_err());
    }

    #[test]
    fn test_display() {
        let board = Board::from_state_string("XOX.O.X..", None).unwrap();
        assert_eq!(format!("{board}"), "X O X\n. O .\nX . .");
    }

    #[test]
    fn test_reset() {
        let mut board = Board::new(4).unwrap();
        play(&mut board, &[(0, 0), (3, 3)]);
        board.reset();
        assert_eq!(board, Board::new(4).unwrap());
    }
}
