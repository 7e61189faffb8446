//! Error types for the vector-ox crate

use thiserror::Error;

use crate::tictactoe::Move;

/// Main error type for the vector-ox crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move {mv}: {reason}")]
    InvalidMove { mv: Move, reason: &'static str },

    #[error("illegal undo of {mv}: {reason}")]
    IllegalUndo { mv: Move, reason: &'static str },

    #[error("no legal moves available")]
    NoLegalMove,

    #[error("invalid configuration: {message}")]
    Configuration { message: String },

    #[error("vector index retrieval failed: {message}")]
    Retrieval { message: String },

    #[error("invalid board state string '{input}': {reason}")]
    InvalidStateString { input: String, reason: String },

    #[error("invalid move text '{input}' (expected 'row,col')")]
    InvalidMoveText { input: String },

    #[error("malformed training line {line}: {message}")]
    TrainingData { line: usize, message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid progress bar template: {message}")]
    ProgressBarTemplate { message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a configuration error with a formatted message
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Shorthand for a retrieval error with a formatted message
    pub fn retrieval(message: impl Into<String>) -> Self {
        Error::Retrieval {
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
