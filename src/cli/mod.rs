//! CLI infrastructure for vector-ox
//!
//! Commands for playing games, generating training data, running
//! tournaments and inspecting the vector index.

pub mod args;
pub mod commands;
pub mod output;
