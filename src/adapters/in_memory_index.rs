//! In-memory vector index.
//!
//! This adapter answers k-nearest-neighbour queries by brute force over every
//! stored record. Board vectors are tiny (N² floats) and training sets are in
//! the tens of thousands, so a linear scan is fast enough for play.

use std::sync::{Arc, RwLock};

use crate::{
    Result,
    adapters::training_file::TrainingExample,
    error::Error,
    ports::{VectorIndex, VectorRecord},
};

/// Brute-force nearest-neighbour index held in memory.
///
/// Distance is squared Euclidean. Records at equal distance keep their
/// insertion order, so queries are deterministic.
///
/// # Examples
///
/// ```
/// use vector_ox::adapters::InMemoryIndex;
/// use vector_ox::ports::{VectorIndex, VectorRecord};
/// use vector_ox::tictactoe::Move;
///
/// let index = InMemoryIndex::new();
/// index.insert(VectorRecord { vector: vec![1.0, 0.0], mv: Move::new(0, 1), outcome: None })?;
/// index.insert(VectorRecord { vector: vec![0.0, 0.0], mv: Move::new(1, 1), outcome: None })?;
///
/// let nearest = index.query_nearest(&[0.0, 0.0], 1)?;
/// assert_eq!(nearest[0].mv, Move::new(1, 1));
/// # Ok::<(), vector_ox::Error>(())
/// ```
///
/// # Thread Safety
///
/// The index can be cloned and shared across threads. All clones share the
/// same underlying storage.
#[derive(Clone, Default)]
pub struct InMemoryIndex {
    records: Arc<RwLock<Vec<VectorRecord>>>,
}

impl InMemoryIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index holding `records`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Retrieval`] if the records disagree on dimension.
    pub fn from_records(records: impl IntoIterator<Item = VectorRecord>) -> Result<Self> {
        let index = Self::new();
        index.extend(records)?;
        Ok(index)
    }

    /// Build an index from training examples, encoding each stored state
    /// through the board vector encoder.
    ///
    /// # Errors
    ///
    /// Returns an error if a state string does not describe a square board, or
    /// if the examples mix board sizes.
    pub fn from_examples(examples: &[TrainingExample]) -> Result<Self> {
        let records = examples
            .iter()
            .map(TrainingExample::to_record)
            .collect::<Result<Vec<_>>>()?;
        Self::from_records(records)
    }

    /// Add one record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Retrieval`] if the record's dimension differs from the
    /// records already stored.
    pub fn insert(&self, record: VectorRecord) -> Result<()> {
        self.extend(std::iter::once(record))
    }

    /// Add many records, all or nothing.
    pub fn extend(&self, records: impl IntoIterator<Item = VectorRecord>) -> Result<()> {
        let incoming: Vec<VectorRecord> = records.into_iter().collect();
        let mut storage = self.records.write().map_err(|_| poisoned())?;

        let expected = storage
            .first()
            .or_else(|| incoming.first())
            .map(|r| r.vector.len());
        if let Some(dimension) = expected {
            if let Some(bad) = incoming.iter().find(|r| r.vector.len() != dimension) {
                return Err(Error::retrieval(format!(
                    "record of dimension {} does not match index dimension {dimension}",
                    bad.vector.len()
                )));
            }
        }

        storage.extend(incoming);
        Ok(())
    }

    /// Vector length shared by every stored record, if any are stored.
    pub fn dimension(&self) -> Option<usize> {
        self.records
            .read()
            .ok()
            .and_then(|records| records.first().map(|r| r.vector.len()))
    }

    /// Remove every record.
    pub fn clear(&self) -> Result<()> {
        self.records.write().map_err(|_| poisoned())?.clear();
        Ok(())
    }
}

fn poisoned() -> Error {
    Error::retrieval("index storage lock poisoned")
}

fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

impl VectorIndex for InMemoryIndex {
    fn query_nearest(&self, vector: &[f32], k: usize) -> Result<Vec<VectorRecord>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        if let Some(dimension) = records.first().map(|r| r.vector.len()) {
            if dimension != vector.len() {
                return Err(Error::retrieval(format!(
                    "query of dimension {} does not match index dimension {dimension}",
                    vector.len()
                )));
            }
        }

        let mut ranked: Vec<(f32, &VectorRecord)> = records
            .iter()
            .map(|record| (squared_distance(&record.vector, vector), record))
            .collect();
        // Stable sort keeps insertion order among equal distances
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(ranked
            .into_iter()
            .take(k)
            .map(|(_, record)| record.clone())
            .collect())
    }

    fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }
}
