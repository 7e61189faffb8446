//! Ports (trait boundaries) for external collaborators.
//!
//! These traits are owned by the domain and implemented by strategies and by
//! adapters in the infrastructure layer.

pub mod observer;
pub mod strategy;
pub mod vector_index;

pub use observer::GameObserver;
pub use strategy::Strategy;
pub use vector_index::{VectorIndex, VectorRecord};
