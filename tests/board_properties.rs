//! Property-based tests for board invariants.
//!
//! Positions are generated by random legal play so every case is reachable.

use proptest::prelude::*;
use vector_ox::{
    ports::Strategy as _,
    strategy::RandomStrategy,
    tictactoe::{Board, Cell, GameOutcome, Move, Player},
};

/// Board geometry: (size, win_length)
fn arb_geometry() -> impl Strategy<Value = (usize, usize)> {
    (3usize..=6).prop_flat_map(|size| (Just(size), 3usize..=size))
}

/// Random playout recorded as (moves, board); stops at game end
fn arb_playout() -> impl Strategy<Value = (Vec<(Move, Player)>, Board)> {
    (arb_geometry(), proptest::collection::vec(0usize..64, 0..36)).prop_map(
        |((size, win_length), picks)| {
            let mut board = Board::with_win_length(size, win_length).unwrap();
            let mut played = Vec::new();
            let mut player = Player::X;
            for pick in picks {
                if board.is_terminal() {
                    break;
                }
                let moves = board.legal_moves();
                let mv = moves[pick % moves.len()];
                board.apply_move(mv, player).unwrap();
                played.push((mv, player));
                player = player.opponent();
            }
            (played, board)
        },
    )
}

proptest! {
    #[test]
    fn prop_marks_match_history((played, board) in arb_playout()) {
        prop_assert_eq!(board.occupied_count(), played.len());
        prop_assert_eq!(board.history().len(), played.len());
        for (mv, player) in &played {
            prop_assert_eq!(board.get(mv.row, mv.col), Some(player.to_cell()));
        }
        prop_assert_eq!(
            board.legal_moves().len(),
            board.size() * board.size() - played.len()
        );
    }

    #[test]
    fn prop_undo_restores_empty_board((played, mut board) in arb_playout()) {
        for (mv, _) in played.iter().rev() {
            board.undo_move(*mv).unwrap();
        }
        prop_assert!(board.cells().iter().all(|&c| c == Cell::Empty));
        prop_assert!(board.history().is_empty());
    }

    #[test]
    fn prop_apply_then_undo_is_identity((_, board) in arb_playout(), pick in 0usize..64) {
        prop_assume!(!board.is_terminal());
        let moves = board.legal_moves();
        let mv = moves[pick % moves.len()];
        let player = board.player_to_move().unwrap();

        let mut scratch = board.clone();
        scratch.apply_move(mv, player).unwrap();
        scratch.undo_move(mv).unwrap();
        prop_assert_eq!(scratch, board);
    }

    #[test]
    fn prop_vector_mirrors_cells((_, board) in arb_playout()) {
        let vector = board.to_vector();
        prop_assert_eq!(vector.len(), board.size() * board.size());
        for (value, cell) in vector.iter().zip(board.cells()) {
            let expected = match cell {
                Cell::Empty => 0.0f32,
                Cell::X => 1.0,
                Cell::O => -1.0,
            };
            prop_assert_eq!(*value, expected);
        }
    }

    #[test]
    fn prop_state_string_roundtrip((_, board) in arb_playout()) {
        let parsed = Board::from_state_string(&board.state_string(), Some(board.win_length())).unwrap();
        prop_assert_eq!(parsed.cells(), board.cells());
        prop_assert_eq!(parsed.outcome(), board.outcome());
    }

    #[test]
    fn prop_outcome_is_consistent((played, board) in arb_playout()) {
        match board.outcome() {
            GameOutcome::Win(player) => {
                prop_assert!(board.has_won(player));
                // Play stops at the first win, so the last mover is the winner
                prop_assert_eq!(played.last().map(|&(_, p)| p), Some(player));
            }
            GameOutcome::Draw => prop_assert!(board.is_full()),
            GameOutcome::InProgress => prop_assert!(!board.is_terminal()),
        }
    }

    #[test]
    fn prop_random_strategy_is_legal((_, board) in arb_playout(), seed in any::<u64>()) {
        prop_assume!(!board.is_terminal());
        let mut strategy = RandomStrategy::with_seed(seed);
        let player = board.player_to_move().unwrap();
        let result = strategy.select_move(&board, player).unwrap();
        prop_assert!(board.is_legal(result.mv));
    }
}
