//! Vector-similarity strategy
//!
//! Encodes the board with [`Board::to_vector`], asks a [`VectorIndex`] for the
//! nearest stored positions and plays the move most of them agree on. Any
//! retrieval miss (index error, no neighbours, no neighbour move still legal)
//! falls back to a uniformly random move, tagged in the diagnostics.

use std::sync::Arc;

use log::warn;

use super::{Diagnostics, FallbackReason, RandomStrategy, StrategyKind, StrategyResult};
use crate::{
    Error, Result,
    ports::{Strategy, VectorIndex, VectorRecord},
    tictactoe::{Board, Move, Player},
};

/// Number of neighbours queried when not configured otherwise
pub const DEFAULT_NEIGHBOURS: usize = 5;

/// Result of the retrieval step before any fallback
#[derive(Debug, Clone, PartialEq)]
enum Retrieval {
    Hit {
        mv: Move,
        confidence: f64,
        neighbours: usize,
    },
    Miss(FallbackReason),
}

/// Retrieval-based strategy with random fallback
pub struct VectorStrategy {
    name: String,
    index: Arc<dyn VectorIndex>,
    neighbours: usize,
    fallback: RandomStrategy,
}

impl VectorStrategy {
    /// Create a vector strategy over `index` with [`DEFAULT_NEIGHBOURS`]
    pub fn new(index: Arc<dyn VectorIndex>) -> Self {
        Self {
            name: StrategyKind::Vector.default_name().to_string(),
            index,
            neighbours: DEFAULT_NEIGHBOURS,
            fallback: RandomStrategy::new(),
        }
    }

    /// Set the number of neighbours to query.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for zero neighbours.
    pub fn with_neighbours(mut self, neighbours: usize) -> Result<Self> {
        if neighbours == 0 {
            return Err(Error::configuration(
                "vector strategy needs at least one neighbour",
            ));
        }
        self.neighbours = neighbours;
        Ok(self)
    }

    /// Seed the fallback random strategy
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.fallback.set_rng_seed(seed);
        self
    }

    /// Set the display name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn neighbours(&self) -> usize {
        self.neighbours
    }

    fn retrieve(&self, board: &Board) -> Retrieval {
        let query = board.to_vector();
        let records = match self.index.query_nearest(&query, self.neighbours) {
            Ok(records) => records,
            Err(err) => {
                return Retrieval::Miss(FallbackReason::RetrievalFailed {
                    message: err.to_string(),
                });
            }
        };

        let considered = &records[..records.len().min(self.neighbours)];
        if considered.is_empty() {
            return Retrieval::Miss(FallbackReason::NoNeighbours);
        }

        match majority_legal_move(board, considered) {
            Some((mv, count)) => Retrieval::Hit {
                mv,
                confidence: count as f64 / considered.len() as f64,
                neighbours: considered.len(),
            },
            None => Retrieval::Miss(FallbackReason::NoLegalNeighbourMove),
        }
    }
}

/// The most frequent neighbour move that is legal on `board`, with its count.
///
/// Equal counts resolve to the move seen first, i.e. the one backed by the
/// nearest neighbour.
fn majority_legal_move(board: &Board, records: &[VectorRecord]) -> Option<(Move, usize)> {
    let mut tally: Vec<(Move, usize)> = Vec::new();
    for record in records.iter().filter(|r| board.is_legal(r.mv)) {
        match tally.iter_mut().find(|(mv, _)| *mv == record.mv) {
            Some((_, count)) => *count += 1,
            None => tally.push((record.mv, 1)),
        }
    }

    tally.into_iter().fold(None, |best, (mv, count)| match best {
        Some((_, best_count)) if best_count >= count => best,
        _ => Some((mv, count)),
    })
}

impl Strategy for VectorStrategy {
    fn select_move(&mut self, board: &Board, _player: Player) -> Result<StrategyResult> {
        if board.is_full() {
            return Err(Error::NoLegalMove);
        }

        match self.retrieve(board) {
            Retrieval::Hit {
                mv,
                confidence,
                neighbours,
            } => Ok(StrategyResult::new(
                mv,
                Diagnostics::Retrieval {
                    confidence,
                    neighbours,
                },
            )),
            Retrieval::Miss(reason) => {
                warn!("{}: {reason}, falling back to a random move", self.name);
                let mv = self.fallback.choose(board)?;
                Ok(StrategyResult::new(mv, Diagnostics::Fallback { reason }))
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Vector
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.fallback.set_rng_seed(seed);
    }
}
