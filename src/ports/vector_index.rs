//! Vector index port for similarity retrieval.
//!
//! This module defines the trait boundary between the retrieval strategy and
//! whatever stores board-state vectors. The core only ever reads from it;
//! populating an index is the job of the data generator and index builders.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    tictactoe::{GameOutcome, Move},
};

/// One stored example: a position vector, the move played from it and the
/// final outcome of the game it came from (when known).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub vector: Vec<f32>,
    pub mv: Move,
    pub outcome: Option<GameOutcome>,
}

/// Port for k-nearest-neighbour queries over stored board vectors.
///
/// Vectors use the [`Board::to_vector`](crate::tictactoe::Board::to_vector)
/// encoding. Implementations return neighbours nearest first.
///
/// # Examples
///
/// ```
/// use vector_ox::adapters::InMemoryIndex;
/// use vector_ox::ports::{VectorIndex, VectorRecord};
/// use vector_ox::tictactoe::Move;
///
/// let index = InMemoryIndex::new();
/// index.insert(VectorRecord {
///     vector: vec![0.0; 9],
///     mv: Move::new(1, 1),
///     outcome: None,
/// })?;
///
/// let neighbours = index.query_nearest(&[0.0; 9], 5)?;
/// assert_eq!(neighbours.len(), 1);
/// # Ok::<(), vector_ox::Error>(())
/// ```
pub trait VectorIndex: Send + Sync {
    /// Return up to `k` stored records nearest to `vector`, nearest first.
    ///
    /// An empty result is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Retrieval`](crate::Error::Retrieval) if the index is
    /// unavailable or the query cannot be answered (for example, a vector of
    /// the wrong dimension).
    fn query_nearest(&self, vector: &[f32], k: usize) -> Result<Vec<VectorRecord>>;

    /// Number of stored records
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
