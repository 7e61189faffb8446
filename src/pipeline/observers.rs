//! Observer implementations for game runs
//!
//! Observers allow composable data collection while games are played without
//! coupling the driver to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::GameObserver,
    strategy::{Diagnostics, StrategyResult},
    tictactoe::{Board, GameOutcome, Player},
};

/// Observation of a single move
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveObservation {
    /// Move number within game
    pub ply: usize,
    pub player: Player,
    /// Board state before the move
    pub state: String,
    pub row: usize,
    pub col: usize,
    pub diagnostics: Diagnostics,
}

/// Complete observation of a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub game_num: usize,
    /// Final outcome label (`X`, `O` or `tie`)
    pub outcome: String,
    pub moves: Vec<MoveObservation>,
}

/// Progress bar observer - Shows run progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    draws: usize,
    o_wins: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            draws: 0,
            o_wins: 0,
        }
    }

    fn tally(&self) -> String {
        format!("X:{} D:{} O:{}", self.x_wins, self.draws, self.o_wins)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl GameObserver for ProgressObserver {
    fn on_run_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw | GameOutcome::InProgress => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.tally());
        }
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.tally());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks outcome and move statistics
#[derive(Debug, Default)]
pub struct MetricsObserver {
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    total_games: usize,
    move_counts: Vec<usize>,
    fallbacks: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    fn rate(&self, count: usize) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            count as f64 / self.total_games as f64
        }
    }

    pub fn x_win_rate(&self) -> f64 {
        self.rate(self.x_wins)
    }

    pub fn o_win_rate(&self) -> f64 {
        self.rate(self.o_wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    /// Get average game length in moves
    pub fn avg_game_length(&self) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            self.move_counts.iter().sum::<usize>() as f64 / self.move_counts.len() as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.total_games,
            x_wins: self.x_wins,
            o_wins: self.o_wins,
            draws: self.draws,
            x_win_rate: self.x_win_rate(),
            o_win_rate: self.o_win_rate(),
            draw_rate: self.draw_rate(),
            avg_game_length: self.avg_game_length(),
            fallback_moves: self.fallbacks,
        }
    }
}

/// Summary of run metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub x_win_rate: f64,
    pub o_win_rate: f64,
    pub draw_rate: f64,
    pub avg_game_length: f64,
    /// Vector-strategy moves that fell back to random play
    pub fallback_moves: usize,
}

impl GameObserver for MetricsObserver {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        self.move_counts.push(0);
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        _ply: usize,
        _board: &Board,
        _player: Player,
        result: &StrategyResult,
    ) -> Result<()> {
        if let Some(last) = self.move_counts.last_mut() {
            *last += 1;
        }
        if result.is_fallback() {
            self.fallbacks += 1;
        }
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, outcome: GameOutcome) -> Result<()> {
        self.total_games += 1;
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw | GameOutcome::InProgress => self.draws += 1,
        }
        Ok(())
    }
}

/// JSONL observer - Exports one observation per game in JSON Lines format
pub struct JsonlObserver<W: Write = BufWriter<File>> {
    writer: W,
    current_moves: Vec<MoveObservation>,
}

impl JsonlObserver {
    /// Create a new JSONL observer writing to `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| crate::Error::Io {
            operation: format!("create observation log {path:?}"),
            source,
        })?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }
}

impl<W: Write> JsonlObserver<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer,
            current_moves: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> GameObserver for JsonlObserver<W> {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        self.current_moves.clear();
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        ply: usize,
        board: &Board,
        player: Player,
        result: &StrategyResult,
    ) -> Result<()> {
        self.current_moves.push(MoveObservation {
            ply,
            player,
            state: board.state_string(),
            row: result.mv.row,
            col: result.mv.col,
            diagnostics: result.diagnostics.clone(),
        });
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        let observation = Observation {
            game_num,
            outcome: outcome.label().to_string(),
            moves: std::mem::take(&mut self.current_moves),
        };

        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        self.writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pipeline::game::play_game,
        ports::Strategy,
        strategy::{MinimaxStrategy, RandomStrategy},
    };

    #[test]
    fn test_metrics_observer() {
        let mut observer = MetricsObserver::new();
        assert_eq!(observer.x_win_rate(), 0.0);

        observer.on_game_end(0, GameOutcome::Win(Player::X)).unwrap();
        observer.on_game_end(1, GameOutcome::Draw).unwrap();
        observer.on_game_end(2, GameOutcome::Win(Player::X)).unwrap();

        let summary = observer.summary();
        assert_eq!(summary.total_games, 3);
        assert_eq!(summary.x_wins, 2);
        assert_eq!(summary.draws, 1);
        assert_eq!(summary.o_wins, 0);
        assert!((observer.x_win_rate() - 0.666).abs() < 0.01);
    }

    #[test]
    fn test_jsonl_observer_writes_one_line_per_game() {
        let mut strategy = MinimaxStrategy::unbounded();
        let mut observer = JsonlObserver::from_writer(Vec::new());

        observer.on_game_start(0).unwrap();
        let board = Board::new(3).unwrap();
        let result = strategy.select_move(&board, Player::X).unwrap();
        observer.on_move(0, 0, &board, Player::X, &result).unwrap();
        observer.on_game_end(0, GameOutcome::Draw).unwrap();

        let text = String::from_utf8(observer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1);

        let parsed: Observation = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed.outcome, "tie");
        assert_eq!(parsed.moves.len(), 1);
        assert_eq!(parsed.moves[0].state, ".........");
    }

    #[test]
    fn test_metrics_observer_counts_moves() {
        let mut x = RandomStrategy::with_seed(5);
        let mut o = RandomStrategy::with_seed(6);
        let mut observers: Vec<Box<dyn GameObserver>> = vec![Box::new(MetricsObserver::new())];

        let record =
            play_game(Board::new(3).unwrap(), &mut x, &mut o, Player::X, &mut observers).unwrap();
        assert!(record.len() >= 5);
    }
}
