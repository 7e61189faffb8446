//! Winning window enumeration for N×N boards

use super::{Cell, Player};

/// Scan directions as (row step, column step): rows, columns, down-right
/// diagonals, down-left diagonals.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Every window of `win_length` consecutive cells on an N×N board.
///
/// Windows are stored as row-major cell indices, grouped by direction in the
/// order rows, columns, down-right diagonals, down-left diagonals, and within
/// a direction by the row-major position of their first cell. This is the
/// scan order used by [`WinningLines::owner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinningLines {
    size: usize,
    win_length: usize,
    windows: Vec<Vec<usize>>,
}

impl WinningLines {
    /// Enumerate all windows for the given board geometry.
    ///
    /// Callers validate `win_length <= size`; a longer window simply yields no
    /// windows.
    pub fn new(size: usize, win_length: usize) -> Self {
        let mut windows = Vec::new();
        if win_length == 0 {
            return Self {
                size,
                win_length,
                windows,
            };
        }

        let span = (win_length - 1) as isize;
        let bound = size as isize;
        for (dr, dc) in DIRECTIONS {
            for row in 0..bound {
                for col in 0..bound {
                    let end_row = row + dr * span;
                    let end_col = col + dc * span;
                    if !(0..bound).contains(&end_row) || !(0..bound).contains(&end_col) {
                        continue;
                    }
                    let window = (0..=span)
                        .map(|step| ((row + dr * step) * bound + col + dc * step) as usize)
                        .collect();
                    windows.push(window);
                }
            }
        }

        Self {
            size,
            win_length,
            windows,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Number of windows
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Iterate over windows in scan order
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.windows.iter().map(Vec::as_slice)
    }

    /// Check if a player fully owns at least one window
    pub fn has_won(&self, cells: &[Cell], player: Player) -> bool {
        let target = player.to_cell();
        self.iter()
            .any(|window| window.iter().all(|&idx| cells[idx] == target))
    }

    /// The owner of the first fully-marked window in scan order, if any.
    ///
    /// On an impossible position where both players own a window, the player
    /// owning the earlier window is reported.
    pub fn owner(&self, cells: &[Cell]) -> Option<Player> {
        self.iter().find_map(|window| {
            let first = cells[window[0]].to_player()?;
            window[1..]
                .iter()
                .all(|&idx| cells[idx] == cells[window[0]])
                .then_some(first)
        })
    }
}
