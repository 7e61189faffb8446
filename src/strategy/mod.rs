//! Move-selection strategies
//!
//! Three strategies implement the [`Strategy`](crate::ports::Strategy) port:
//! - [`RandomStrategy`]: uniform choice among legal moves
//! - [`MinimaxStrategy`]: alpha-beta search, optionally depth-limited
//! - [`VectorStrategy`]: nearest-neighbour lookup with random fallback

pub mod minimax;
pub mod random;
pub mod vector;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub use minimax::{MinimaxStrategy, SearchOutcome, WIN_SCORE};
pub use random::RandomStrategy;
pub use vector::{DEFAULT_NEIGHBOURS, VectorStrategy};

use crate::{Error, Result, tictactoe::Move};

/// Tag used to select a strategy at configuration time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Random,
    Minimax,
    Vector,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Random,
        StrategyKind::Minimax,
        StrategyKind::Vector,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Random => "random",
            StrategyKind::Minimax => "minimax",
            StrategyKind::Vector => "vector",
        }
    }

    /// Display name of a strategy of this kind
    pub fn default_name(self) -> &'static str {
        match self {
            StrategyKind::Random => "Random",
            StrategyKind::Minimax => "Minimax",
            StrategyKind::Vector => "Vector",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(StrategyKind::Random),
            "minimax" | "algorithm" => Ok(StrategyKind::Minimax),
            "vector" => Ok(StrategyKind::Vector),
            other => Err(Error::configuration(format!(
                "unknown strategy '{other}'. Supported: random, minimax, vector"
            ))),
        }
    }
}

/// Why the vector strategy delegated to random play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackReason {
    /// The index failed or is unavailable
    RetrievalFailed { message: String },
    /// The index returned no neighbours
    NoNeighbours,
    /// None of the neighbours' moves is legal on the current board
    NoLegalNeighbourMove,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::RetrievalFailed { message } => write!(f, "retrieval failed: {message}"),
            FallbackReason::NoNeighbours => write!(f, "no neighbours found"),
            FallbackReason::NoLegalNeighbourMove => {
                write!(f, "no neighbour move is legal on this board")
            }
        }
    }
}

/// Informational metadata about how a move was chosen.
///
/// Never feeds back into game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Diagnostics {
    /// Uniform random choice
    Random,
    /// Minimax search result from the mover's perspective
    Search {
        score: i32,
        nodes: u64,
        depth_limit: Option<u32>,
    },
    /// Majority move among retrieved neighbours
    Retrieval { confidence: f64, neighbours: usize },
    /// Vector strategy fell back to a random move
    Fallback { reason: FallbackReason },
}

/// A chosen move plus diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    pub mv: Move,
    pub diagnostics: Diagnostics,
}

impl StrategyResult {
    pub fn new(mv: Move, diagnostics: Diagnostics) -> Self {
        Self { mv, diagnostics }
    }

    /// Search score, for minimax results
    pub fn score(&self) -> Option<i32> {
        match self.diagnostics {
            Diagnostics::Search { score, .. } => Some(score),
            _ => None,
        }
    }

    /// Neighbour agreement, for retrieval hits
    pub fn confidence(&self) -> Option<f64> {
        match self.diagnostics {
            Diagnostics::Retrieval { confidence, .. } => Some(confidence),
            _ => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.diagnostics, Diagnostics::Fallback { .. })
    }

    /// One-line human readable explanation of the choice
    pub fn summary(&self) -> String {
        match &self.diagnostics {
            Diagnostics::Random => format!("picked {} at random", self.mv),
            Diagnostics::Search {
                score,
                nodes,
                depth_limit,
            } => {
                let depth = depth_limit.map_or("unbounded".to_string(), |d| d.to_string());
                format!(
                    "searched {nodes} positions (depth {depth}), {} scores {score}",
                    self.mv
                )
            }
            Diagnostics::Retrieval {
                confidence,
                neighbours,
            } => format!(
                "{} agreed by {:.0}% of {neighbours} similar positions",
                self.mv,
                confidence * 100.0
            ),
            Diagnostics::Fallback { reason } => {
                format!("{reason}; picked {} at random", self.mv)
            }
        }
    }
}
