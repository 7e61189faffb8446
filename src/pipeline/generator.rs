//! Training data generation
//!
//! Plays games between randomly assigned random and minimax players and turns
//! every decision into a [`TrainingExample`] labelled with the final outcome.

use log::info;
use rand::{Rng, SeedableRng, random, rngs::StdRng};

use super::game::play_numbered_game;
use crate::{
    Result,
    adapters::TrainingExample,
    app::GameConfig,
    ports::{GameObserver, Strategy},
    strategy::{MinimaxStrategy, RandomStrategy, StrategyKind},
    tictactoe::Player,
};

/// Generates (state, move, outcome) examples by self-play
pub struct DataGenerator {
    config: GameConfig,
    rng: StdRng,
    random: RandomStrategy,
    minimax: MinimaxStrategy,
    observers: Vec<Box<dyn GameObserver>>,
}

impl DataGenerator {
    /// Create a generator for the given game configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`](crate::Error::Configuration) if the
    /// configuration is invalid.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate_for(StrategyKind::Minimax)?;
        let seed = config.seed.unwrap_or_else(random);
        let minimax = MinimaxStrategy::new(config.depth_limit)?.with_parallel(config.parallel);

        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            // Separate stream from side assignment
            random: RandomStrategy::with_seed(seed.wrapping_add(1)),
            minimax,
            config,
            observers: Vec::new(),
        })
    }

    /// Add an observer (e.g. a progress bar)
    pub fn with_observer(mut self, observer: Box<dyn GameObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    fn pick_kind(&mut self) -> StrategyKind {
        if self.rng.random_bool(0.5) {
            StrategyKind::Random
        } else {
            StrategyKind::Minimax
        }
    }

    /// Play `num_games` games and collect every decision.
    pub fn generate(&mut self, num_games: usize) -> Result<Vec<TrainingExample>> {
        for observer in &mut self.observers {
            observer.on_run_start(num_games)?;
        }

        let mut examples = Vec::new();
        for game_num in 0..num_games {
            let x_kind = self.pick_kind();
            let o_kind = self.pick_kind();
            let board = self.config.new_board()?;

            let record = match (x_kind, o_kind) {
                (StrategyKind::Minimax, StrategyKind::Minimax) => {
                    let mut o = self.minimax.clone();
                    play_numbered_game(
                        game_num,
                        board,
                        &mut self.minimax,
                        &mut o,
                        Player::X,
                        &mut self.observers,
                    )?
                }
                (StrategyKind::Random, StrategyKind::Random) => {
                    let mut o = RandomStrategy::with_seed(self.rng.random());
                    play_numbered_game(
                        game_num,
                        board,
                        &mut self.random,
                        &mut o,
                        Player::X,
                        &mut self.observers,
                    )?
                }
                _ => {
                    let (x, o): (&mut dyn Strategy, &mut dyn Strategy) =
                        if x_kind == StrategyKind::Random {
                            (&mut self.random, &mut self.minimax)
                        } else {
                            (&mut self.minimax, &mut self.random)
                        };
                    play_numbered_game(game_num, board, x, o, Player::X, &mut self.observers)?
                }
            };

            examples.extend(record.moves.iter().map(|m| TrainingExample {
                state: m.state.clone(),
                mv: m.result.mv,
                outcome: record.outcome,
            }));
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }
        info!(
            "generated {} examples from {num_games} games",
            examples.len()
        );
        Ok(examples)
    }
}
