//! Game-playing pipelines
//!
//! This module provides composable pipelines for:
//! - Playing single games between strategies
//! - Generating training data by self-play
//! - Running round-robin tournaments
//! - Observing games as they are played

pub mod game;
pub mod generator;
pub mod observers;
pub mod tournament;

pub use game::{GameRecord, RecordedMove, play_game, play_numbered_game};
pub use generator::DataGenerator;
pub use observers::{
    JsonlObserver, MetricsObserver, MetricsSummary, MoveObservation, Observation,
    ProgressObserver,
};
pub use tournament::{MatchupResult, StrategyStats, Tournament, TournamentReport};

pub use crate::ports::GameObserver;
