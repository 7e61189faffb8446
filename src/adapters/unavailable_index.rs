//! Placeholder index for runs without training data.

use crate::{
    Result,
    error::Error,
    ports::{VectorIndex, VectorRecord},
};

/// An index that is never reachable.
///
/// Every query fails with [`Error::Retrieval`], which the vector strategy turns
/// into a random fallback.
#[derive(Debug, Clone)]
pub struct UnavailableIndex {
    reason: String,
}

impl UnavailableIndex {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl Default for UnavailableIndex {
    fn default() -> Self {
        Self::new("no training data loaded")
    }
}

impl VectorIndex for UnavailableIndex {
    fn query_nearest(&self, _vector: &[f32], _k: usize) -> Result<Vec<VectorRecord>> {
        Err(Error::retrieval(self.reason.clone()))
    }

    fn len(&self) -> usize {
        0
    }
}
