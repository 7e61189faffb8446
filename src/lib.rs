//! Noughts and crosses on an NxN board with pluggable move strategies
//!
//! This crate provides:
//! - Board, move and game-state handling with configurable win length
//! - Random, minimax (alpha-beta) and vector-similarity strategies
//! - A vector index port with in-memory and unavailable adapters
//! - Self-play training data generation and round-robin tournaments
//! - The `vector-ox` command-line interface

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod strategy;
pub mod tictactoe;

pub use error::{Error, Result};
