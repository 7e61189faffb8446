//! Adapters implementing domain ports.
//!
//! This module contains infrastructure implementations of the traits defined
//! in the ports module. Following hexagonal architecture, adapters depend on
//! domain ports, not the other way around.

pub mod in_memory_index;
pub mod training_file;
pub mod unavailable_index;

pub use in_memory_index::InMemoryIndex;
pub use training_file::{
    TrainingExample, load_examples, read_examples, save_examples, write_examples,
};
pub use unavailable_index::UnavailableIndex;
