//! Subcommand implementations

pub mod generate;
pub mod play;
pub mod query;
pub mod tournament;
