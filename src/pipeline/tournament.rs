//! Round-robin tournament between strategies
//!
//! Every ordered pair of distinct entrants plays a fixed number of games with
//! the first entrant as X, moving first. Playing both orders means each pair
//! meets once as opener and once as responder.

use std::{fs::File, io::BufWriter, path::Path};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::game::play_numbered_game;
use crate::{
    Error, Result,
    app::GameConfig,
    ports::{GameObserver, Strategy},
    tictactoe::{GameOutcome, Player},
};

/// Results of one ordered matchup, from X's point of view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchupResult {
    /// Entrant playing X (moves first)
    pub x: String,
    /// Entrant playing O
    pub o: String,
    pub x_wins: usize,
    pub o_wins: usize,
    pub ties: usize,
    pub total_games: usize,
}

impl MatchupResult {
    fn new(x: &str, o: &str) -> Self {
        Self {
            x: x.to_string(),
            o: o.to_string(),
            x_wins: 0,
            o_wins: 0,
            ties: 0,
            total_games: 0,
        }
    }

    fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw | GameOutcome::InProgress => self.ties += 1,
        }
        self.total_games += 1;
    }
}

/// Aggregate results for one entrant across all its matchups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyStats {
    pub name: String,
    pub total_games: usize,
    pub wins: usize,
    pub losses: usize,
    pub ties: usize,
    pub win_rate: f64,
    pub loss_rate: f64,
    pub tie_rate: f64,
}

impl StrategyStats {
    fn from_matchups(name: &str, matchups: &[MatchupResult]) -> Self {
        let (mut wins, mut losses, mut ties, mut total) = (0, 0, 0, 0);
        for m in matchups {
            if m.x == name {
                wins += m.x_wins;
                losses += m.o_wins;
            } else if m.o == name {
                wins += m.o_wins;
                losses += m.x_wins;
            } else {
                continue;
            }
            ties += m.ties;
            total += m.total_games;
        }

        let rate = |count: usize| {
            if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            }
        };
        Self {
            name: name.to_string(),
            total_games: total,
            wins,
            losses,
            ties,
            win_rate: rate(wins),
            loss_rate: rate(losses),
            tie_rate: rate(ties),
        }
    }
}

/// Full tournament outcome, serializable to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentReport {
    pub config: GameConfig,
    pub games_per_matchup: usize,
    pub matchups: Vec<MatchupResult>,
    /// Per-entrant totals in entry order
    pub stats: Vec<StrategyStats>,
}

impl TournamentReport {
    /// Entrant with the highest win rate (earliest entrant on ties)
    pub fn best(&self) -> Option<&StrategyStats> {
        self.stats.iter().fold(None, |best, s| match best {
            Some(b) if b.win_rate >= s.win_rate => Some(b),
            _ => Some(s),
        })
    }

    /// Entrant with the lowest win rate (earliest entrant on ties)
    pub fn worst(&self) -> Option<&StrategyStats> {
        self.stats.iter().fold(None, |worst, s| match worst {
            Some(w) if w.win_rate <= s.win_rate => Some(w),
            _ => Some(s),
        })
    }

    /// Mean win rate over all entrants
    pub fn average_win_rate(&self) -> f64 {
        if self.stats.is_empty() {
            return 0.0;
        }
        self.stats.iter().map(|s| s.win_rate).sum::<f64>() / self.stats.len() as f64
    }

    /// Stats for a named entrant
    pub fn stats_for(&self, name: &str) -> Option<&StrategyStats> {
        self.stats.iter().find(|s| s.name == name)
    }

    /// Write the report as pretty-printed JSON
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create report {path:?}"),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

/// Round-robin runner
pub struct Tournament {
    entrants: Vec<Box<dyn Strategy>>,
    config: GameConfig,
    observers: Vec<Box<dyn GameObserver>>,
}

impl Tournament {
    /// Create a tournament.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if fewer than two entrants are given,
    /// two entrants share a name or the configuration is invalid.
    pub fn new(entrants: Vec<Box<dyn Strategy>>, config: GameConfig) -> Result<Self> {
        config.validate()?;
        if entrants.len() < 2 {
            return Err(Error::configuration(
                "a tournament needs at least two strategies",
            ));
        }
        for (i, a) in entrants.iter().enumerate() {
            if entrants[..i].iter().any(|b| b.name() == a.name()) {
                return Err(Error::configuration(format!(
                    "duplicate strategy name '{}'",
                    a.name()
                )));
            }
        }
        Ok(Self {
            entrants,
            config,
            observers: Vec::new(),
        })
    }

    pub fn with_observer(mut self, observer: Box<dyn GameObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Number of ordered matchups
    pub fn matchup_count(&self) -> usize {
        let n = self.entrants.len();
        n * (n - 1)
    }

    /// Play every ordered matchup `games_per_matchup` times.
    pub fn run(&mut self, games_per_matchup: usize) -> Result<TournamentReport> {
        let total_games = self.matchup_count() * games_per_matchup;
        for observer in &mut self.observers {
            observer.on_run_start(total_games)?;
        }

        let n = self.entrants.len();
        let mut matchups = Vec::with_capacity(self.matchup_count());
        let mut game_num = 0;

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let (x, o) = pair_mut(&mut self.entrants, i, j);
                let mut result = MatchupResult::new(x.name(), o.name());
                debug!("matchup {} (X) vs {} (O)", result.x, result.o);

                for _ in 0..games_per_matchup {
                    let record = play_numbered_game(
                        game_num,
                        self.config.new_board()?,
                        &mut **x,
                        &mut **o,
                        Player::X,
                        &mut self.observers,
                    )?;
                    result.record(record.outcome);
                    game_num += 1;
                }
                matchups.push(result);
            }
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }

        let stats = self
            .entrants
            .iter()
            .map(|e| StrategyStats::from_matchups(e.name(), &matchups))
            .collect();
        info!("tournament finished after {game_num} games");

        Ok(TournamentReport {
            config: self.config.clone(),
            games_per_matchup,
            matchups,
            stats,
        })
    }
}

/// Two distinct mutable elements of a slice
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = items.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
