//! Line-oriented training data files.
//!
//! Each line records one decision from a finished game:
//!
//! ```text
//! <state>|<row>,<col>|<outcome>
//! ```
//!
//! `<state>` is the row-major [`Board::state_string`] before the move and
//! `<outcome>` is `X`, `O` or `tie`. Blank lines are ignored. Malformed lines
//! are skipped with a warning so that one bad record does not discard a large
//! file.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    ports::VectorRecord,
    tictactoe::{Board, GameOutcome, Move},
};

/// One (state, move, final outcome) observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub state: String,
    pub mv: Move,
    pub outcome: GameOutcome,
}

impl TrainingExample {
    /// Format as a single training-data line (without the newline)
    pub fn to_line(&self) -> String {
        format!("{}|{}|{}", self.state, self.mv, self.outcome.label())
    }

    /// Parse one training-data line.
    ///
    /// `line_number` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrainingData`] if the line does not have three fields,
    /// the move is not `row,col`, the outcome is not a finished-game label or
    /// the state is not a square board.
    pub fn parse_line(line: &str, line_number: usize) -> Result<Self> {
        let malformed = |message: String| Error::TrainingData {
            line: line_number,
            message,
        };

        let fields: Vec<&str> = line.trim().split('|').collect();
        let [state, mv, outcome] = fields.as_slice() else {
            return Err(malformed(format!(
                "expected 3 '|'-separated fields, found {}",
                fields.len()
            )));
        };

        let board = Board::from_state_string(state, None).map_err(|e| malformed(e.to_string()))?;
        let mv: Move = mv.parse().map_err(|e: Error| malformed(e.to_string()))?;
        if mv.index(board.size()).is_none() {
            return Err(malformed(format!(
                "move {mv} is off a {0}x{0} board",
                board.size()
            )));
        }
        let outcome = GameOutcome::from_label(outcome)
            .ok_or_else(|| malformed(format!("unknown outcome '{outcome}'")))?;

        Ok(Self {
            state: board.state_string(),
            mv,
            outcome,
        })
    }

    /// Encode the stored state as an index record
    pub fn to_record(&self) -> Result<VectorRecord> {
        let board = Board::from_state_string(&self.state, None)?;
        Ok(VectorRecord {
            vector: board.to_vector(),
            mv: self.mv,
            outcome: Some(self.outcome),
        })
    }
}

/// Read every well-formed example from `reader`.
///
/// # Errors
///
/// Only I/O failures are errors; malformed lines are logged and skipped.
pub fn read_examples<R: BufRead>(reader: R) -> Result<Vec<TrainingExample>> {
    let mut examples = Vec::new();
    let mut skipped = 0usize;

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| Error::Io {
            operation: "read training data".to_string(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        match TrainingExample::parse_line(&line, i + 1) {
            Ok(example) => examples.push(example),
            Err(err) => {
                warn!("skipping {err}");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!("skipped {skipped} malformed training lines");
    }
    Ok(examples)
}

/// Load examples from a training data file
pub fn load_examples(path: &Path) -> Result<Vec<TrainingExample>> {
    let file = File::open(path).map_err(|source| Error::Io {
        operation: format!("open training data {path:?}"),
        source,
    })?;
    let examples = read_examples(BufReader::new(file))?;
    info!("loaded {} training examples from {path:?}", examples.len());
    Ok(examples)
}

/// Write examples one per line
pub fn write_examples<W: Write>(mut writer: W, examples: &[TrainingExample]) -> Result<()> {
    for example in examples {
        writeln!(writer, "{}", example.to_line()).map_err(|source| Error::Io {
            operation: "write training data".to_string(),
            source,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Save examples to a training data file, replacing any existing file
pub fn save_examples(path: &Path, examples: &[TrainingExample]) -> Result<()> {
    let file = File::create(path).map_err(|source| Error::Io {
        operation: format!("create training data {path:?}"),
        source,
    })?;
    write_examples(BufWriter::new(file), examples)
}
