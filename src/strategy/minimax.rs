//! Minimax search with alpha-beta pruning
//!
//! Scores are from the perspective of the player the search runs for. A win
//! found `ply` plies below the root move scores `WIN_SCORE - ply`, a loss
//! `ply - WIN_SCORE`, and draws or depth cut-offs score 0. The position right
//! after the root move is ply 0, so an immediate win scores `WIN_SCORE`.
//!
//! A depth limit makes play sub-optimal: positions at the cut-off are scored
//! as draws, whatever their prospects.

use log::debug;
use rayon::prelude::*;

use super::{Diagnostics, StrategyKind, StrategyResult};
use crate::{
    Error, Result,
    ports::Strategy,
    tictactoe::{Board, Move, Player},
};

/// Score of an immediate win on boards of up to 9 cells
pub const WIN_SCORE: i32 = 10;

/// Base win score for a board.
///
/// `WIN_SCORE` on 3×3; larger boards use one more than the cell count so a
/// late win never scores at or below a draw.
fn win_score(board: &Board) -> i32 {
    let cells = (board.size() * board.size()) as i32;
    WIN_SCORE.max(cells + 1)
}

/// Best root move together with search statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub mv: Move,
    pub score: i32,
    pub nodes: u64,
}

/// Minimax strategy (optimal on small boards when unbounded)
///
/// Equally scored moves resolve to the first in `legal_moves()` order, which
/// makes the choice deterministic for a given board and depth limit.
#[derive(Debug, Clone)]
pub struct MinimaxStrategy {
    name: String,
    depth_limit: Option<u32>,
    pruning: bool,
    parallel: bool,
}

impl MinimaxStrategy {
    /// Create a minimax strategy.
    ///
    /// `depth_limit` is the number of plies searched from the root, counting
    /// the root move; `None` searches to the end of the game.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for a depth limit of zero.
    pub fn new(depth_limit: Option<u32>) -> Result<Self> {
        if depth_limit == Some(0) {
            return Err(Error::configuration(
                "minimax depth limit must be at least 1",
            ));
        }
        Ok(Self {
            name: StrategyKind::Minimax.default_name().to_string(),
            depth_limit,
            pruning: true,
            parallel: false,
        })
    }

    /// Exhaustive search with alpha-beta pruning
    pub fn unbounded() -> Self {
        Self {
            name: StrategyKind::Minimax.default_name().to_string(),
            depth_limit: None,
            pruning: true,
            parallel: false,
        }
    }

    /// Set the display name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Enable or disable alpha-beta pruning.
    ///
    /// Pruning never changes the chosen move, only the number of positions
    /// visited.
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    /// Search top-level moves on parallel workers, one board clone each.
    ///
    /// The reported move is the same as in sequential search.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn depth_limit(&self) -> Option<u32> {
        self.depth_limit
    }

    /// Find the best move for `player`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalMove`] on a full board.
    pub fn search(&self, board: &Board, player: Player) -> Result<SearchOutcome> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Err(Error::NoLegalMove);
        }

        let outcome = if self.parallel {
            let scored = self.score_moves(board, player, &moves)?;
            let nodes = scored.iter().map(|&(_, _, nodes)| nodes).sum();
            let (mv, score) = first_best(scored.iter().map(|&(mv, score, _)| (mv, score)))
                .ok_or(Error::NoLegalMove)?;
            SearchOutcome { mv, score, nodes }
        } else {
            self.search_sequential(board, player, &moves)?
        };

        debug!(
            "minimax for {player}: {} scores {} after {} nodes",
            outcome.mv, outcome.score, outcome.nodes
        );
        Ok(outcome)
    }

    /// Exact score of every legal move for `player`, in `legal_moves()` order.
    ///
    /// Each move is searched with a full window, so scores are exact even with
    /// pruning enabled.
    pub fn evaluate_moves(&self, board: &Board, player: Player) -> Result<Vec<(Move, i32)>> {
        let moves = board.legal_moves();
        Ok(self
            .score_moves(board, player, &moves)?
            .into_iter()
            .map(|(mv, score, _)| (mv, score))
            .collect())
    }

    fn search_sequential(
        &self,
        board: &Board,
        player: Player,
        moves: &[Move],
    ) -> Result<SearchOutcome> {
        let mut scratch = board.clone();
        let mut searcher = Searcher::new(player, self.depth_limit, self.pruning, board);
        let mut best: Option<(Move, i32)> = None;
        let mut alpha = i32::MIN;

        for &mv in moves {
            scratch.apply_move(mv, player)?;
            let score = searcher.evaluate(&mut scratch, player.opponent(), 0, alpha, i32::MAX);
            scratch.undo_move(mv)?;
            let score = score?;

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
            if self.pruning {
                alpha = alpha.max(score);
            }
        }

        let (mv, score) = best.ok_or(Error::NoLegalMove)?;
        Ok(SearchOutcome {
            mv,
            score,
            nodes: searcher.nodes,
        })
    }

    /// Score each root move with a full window, returning (move, score, nodes)
    fn score_moves(
        &self,
        board: &Board,
        player: Player,
        moves: &[Move],
    ) -> Result<Vec<(Move, i32, u64)>> {
        let score_one = |&mv: &Move| -> Result<(Move, i32, u64)> {
            let mut local = board.clone();
            let mut searcher = Searcher::new(player, self.depth_limit, self.pruning, board);
            local.apply_move(mv, player)?;
            let score =
                searcher.evaluate(&mut local, player.opponent(), 0, i32::MIN, i32::MAX)?;
            Ok((mv, score, searcher.nodes))
        };

        if self.parallel {
            moves.par_iter().map(score_one).collect()
        } else {
            moves.iter().map(score_one).collect()
        }
    }
}

impl Default for MinimaxStrategy {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl Strategy for MinimaxStrategy {
    fn select_move(&mut self, board: &Board, player: Player) -> Result<StrategyResult> {
        let outcome = self.search(board, player)?;
        Ok(StrategyResult::new(
            outcome.mv,
            Diagnostics::Search {
                score: outcome.score,
                nodes: outcome.nodes,
                depth_limit: self.depth_limit,
            },
        ))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Minimax
    }
}

/// First (move, score) pair with the maximum score
fn first_best(scored: impl Iterator<Item = (Move, i32)>) -> Option<(Move, i32)> {
    scored.fold(None, |best, (mv, score)| match best {
        Some((_, best_score)) if best_score >= score => best,
        _ => Some((mv, score)),
    })
}

/// Recursive search state for one search path
struct Searcher {
    player: Player,
    depth_limit: Option<u32>,
    pruning: bool,
    win_score: i32,
    nodes: u64,
}

impl Searcher {
    fn new(player: Player, depth_limit: Option<u32>, pruning: bool, board: &Board) -> Self {
        Self {
            player,
            depth_limit,
            pruning,
            win_score: win_score(board),
            nodes: 0,
        }
    }

    fn terminal_score(&self, board: &Board, ply: u32) -> Option<i32> {
        let ply = ply as i32;
        match board.winner() {
            Some(winner) if winner == self.player => Some(self.win_score - ply),
            Some(_) => Some(ply - self.win_score),
            None if board.is_full() => Some(0),
            None => None,
        }
    }

    /// Value of `board` with `to_move` to play, `ply` plies below the root move
    fn evaluate(
        &mut self,
        board: &mut Board,
        to_move: Player,
        ply: u32,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<i32> {
        self.nodes += 1;

        if let Some(score) = self.terminal_score(board, ply) {
            return Ok(score);
        }
        // The root move is the first searched ply
        if self.depth_limit.is_some_and(|limit| ply + 1 >= limit) {
            return Ok(0);
        }

        let maximizing = to_move == self.player;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for mv in board.legal_moves() {
            board.apply_move(mv, to_move)?;
            let score = self.evaluate(board, to_move.opponent(), ply + 1, alpha, beta);
            board.undo_move(mv)?;
            let score = score?;

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if self.pruning && alpha >= beta {
                break;
            }
        }

        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        Board::from_state_string(s, None).unwrap()
    }

    #[test]
    fn test_takes_immediate_win() {
        // XX.
        // OO.
        // ...
        let b = board("XX.OO....");
        let outcome = MinimaxStrategy::unbounded().search(&b, Player::X).unwrap();
        assert_eq!(outcome.mv, Move::new(0, 2));
        assert_eq!(outcome.score, WIN_SCORE);
    }

    #[test]
    fn test_blocks_immediate_loss() {
        // X..
        // OO.
        // X..  X to move must block (1,2)
        let b = board("X..OO.X..");
        let outcome = MinimaxStrategy::unbounded().search(&b, Player::X).unwrap();
        assert_eq!(outcome.mv, Move::new(1, 2));
    }

    #[test]
    fn test_prefers_faster_win() {
        // X wins at (0,2) now; (2,2) would also lead to a win later
        let b = board("XX..O...O");
        let outcome = MinimaxStrategy::unbounded().search(&b, Player::X).unwrap();
        assert_eq!(outcome.mv, Move::new(0, 2));
        assert_eq!(outcome.score, WIN_SCORE);
    }

    #[test]
    fn test_empty_board_scores_draw() {
        let b = Board::new(3).unwrap();
        let outcome = MinimaxStrategy::unbounded().search(&b, Player::X).unwrap();
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.mv, Move::new(0, 0));
    }

    #[test]
    fn test_full_board_errors() {
        let b = board("XOXXOOOXX");
        let err = MinimaxStrategy::unbounded().search(&b, Player::X).unwrap_err();
        assert!(matches!(err, Error::NoLegalMove));
    }

    #[test]
    fn test_zero_depth_rejected() {
        assert!(matches!(
            MinimaxStrategy::new(Some(0)),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_depth_one_sees_only_immediate_results() {
        // O threatens (1,2), but with depth 1 X only looks at its own move
        let b = board("X..OO.X..");
        let outcome = MinimaxStrategy::new(Some(1))
            .unwrap()
            .search(&b, Player::X)
            .unwrap();
        // No immediate win for X, every move scores 0, first legal move wins the tie
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.mv, Move::new(0, 1));

        let two = MinimaxStrategy::new(Some(2))
            .unwrap()
            .search(&b, Player::X)
            .unwrap();
        assert_eq!(two.mv, Move::new(1, 2));
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let b = board("X...O....");
        let before = b.clone();
        MinimaxStrategy::unbounded().search(&b, Player::X).unwrap();
        assert_eq!(b, before);
    }

    #[test]
    fn test_pruning_visits_fewer_nodes() {
        let b = board("X........");
        let pruned = MinimaxStrategy::unbounded().search(&b, Player::O).unwrap();
        let full = MinimaxStrategy::unbounded()
            .with_pruning(false)
            .search(&b, Player::O)
            .unwrap();
        assert_eq!(pruned.mv, full.mv);
        assert_eq!(pruned.score, full.score);
        assert!(pruned.nodes < full.nodes);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        for state in ["X........", "X...O....", "XO..X....", "........."] {
            let b = board(state);
            let player = b.player_to_move().unwrap();
            let seq = MinimaxStrategy::unbounded().search(&b, player).unwrap();
            let par = MinimaxStrategy::unbounded()
                .with_parallel(true)
                .search(&b, player)
                .unwrap();
            assert_eq!(seq.mv, par.mv, "state {state}");
            assert_eq!(seq.score, par.score, "state {state}");
        }
    }

    #[test]
    fn test_evaluate_moves_reports_every_move() {
        let b = board("XX.OO....");
        let scores = MinimaxStrategy::unbounded()
            .evaluate_moves(&b, Player::X)
            .unwrap();
        assert_eq!(scores.len(), 5);
        assert_eq!(scores[0], (Move::new(0, 2), WIN_SCORE));
        // Blocking O's row holds the draw
        assert_eq!(scores[1], (Move::new(1, 2), 0));
        // Anything else lets O complete its row
        assert!(scores[2..].iter().all(|&(_, score)| score < 0));
    }

    #[test]
    fn test_larger_board_win_score_stays_positive() {
        let b = Board::with_win_length(4, 3).unwrap();
        assert_eq!(win_score(&b), 17);
        assert_eq!(win_score(&Board::new(3).unwrap()), WIN_SCORE);
    }

    #[test]
    fn test_first_best_keeps_earliest_tie() {
        let scored = vec![
            (Move::new(0, 0), 0),
            (Move::new(0, 1), 3),
            (Move::new(0, 2), 3),
        ];
        assert_eq!(first_best(scored.into_iter()), Some((Move::new(0, 1), 3)));
        assert_eq!(first_best(std::iter::empty()), None);
    }
}
