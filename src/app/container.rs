//! Dependency injection container for the vector-ox application.
//!
//! This module provides centralized dependency management following hexagonal
//! architecture principles. The container owns infrastructure dependencies and
//! provides factory methods for creating strategies.

use std::{path::Path, sync::Arc};

use log::info;

use super::config::GameConfig;
use crate::{
    Result,
    adapters::{InMemoryIndex, UnavailableIndex, load_examples},
    ports::{Strategy, VectorIndex},
    strategy::{MinimaxStrategy, RandomStrategy, StrategyKind, VectorStrategy},
};

/// Application with dependency injection.
///
/// Centralizes creation and wiring of dependencies following hexagonal
/// architecture. The vector index is owned by the app and shared with every
/// vector strategy it creates.
///
/// # Examples
///
/// ## Production usage
///
/// ```no_run
/// use std::path::Path;
/// use vector_ox::app::{App, GameConfig};
/// use vector_ox::strategy::StrategyKind;
///
/// let app = App::from_training_file(Path::new("training_data.txt"))?;
/// let config = GameConfig::new(3).with_seed(42);
/// let strategy = app.create_strategy(StrategyKind::Vector, &config)?;
/// # Ok::<(), vector_ox::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use vector_ox::app::App;
/// use vector_ox::adapters::InMemoryIndex;
///
/// let app = App::for_testing()
///     .with_index(InMemoryIndex::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    /// Index queried by vector strategies
    index: Arc<dyn VectorIndex>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with no training data.
    ///
    /// Vector strategies created by this app always fall back to random play.
    pub fn new() -> Self {
        Self {
            index: Arc::new(UnavailableIndex::default()),
            default_seed: None,
        }
    }

    /// Create an app whose index is built from a training data file.
    pub fn from_training_file(path: &Path) -> Result<Self> {
        let examples = load_examples(path)?;
        let index = InMemoryIndex::from_examples(&examples)?;
        info!("vector index ready with {} records", index.len());
        Ok(Self::for_testing().with_index(index).build())
    }

    /// Create a builder for constructing app with custom dependencies.
    ///
    /// Primarily used for testing with in-memory indexes.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// Get the vector index.
    ///
    /// Returns an Arc-wrapped index that can be shared across threads.
    pub fn index(&self) -> Arc<dyn VectorIndex> {
        Arc::clone(&self.index)
    }

    /// Create a strategy of the given kind.
    ///
    /// The configuration is validated first. Its seed, or the container's
    /// default seed, makes random and fallback choices reproducible.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`](crate::Error::Configuration) if the
    /// configuration is invalid.
    pub fn create_strategy(
        &self,
        kind: StrategyKind,
        config: &GameConfig,
    ) -> Result<Box<dyn Strategy>> {
        self.create_named_strategy(kind, config, kind.default_name())
    }

    /// Like [`create_strategy`](Self::create_strategy), with a display name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`](crate::Error::Configuration) if the
    /// configuration is invalid for `kind`.
    pub fn create_named_strategy(
        &self,
        kind: StrategyKind,
        config: &GameConfig,
        name: &str,
    ) -> Result<Box<dyn Strategy>> {
        config.validate_for(kind)?;
        let seed = config.seed.or(self.default_seed);

        let strategy: Box<dyn Strategy> = match kind {
            StrategyKind::Random => Box::new(
                match seed {
                    Some(seed) => RandomStrategy::with_seed(seed),
                    None => RandomStrategy::new(),
                }
                .named(name),
            ),
            StrategyKind::Minimax => Box::new(
                MinimaxStrategy::new(config.depth_limit)?
                    .with_parallel(config.parallel)
                    .named(name),
            ),
            StrategyKind::Vector => {
                let strategy = VectorStrategy::new(self.index())
                    .with_neighbours(config.neighbours)?
                    .named(name);
                Box::new(match seed {
                    Some(seed) => strategy.with_seed(seed),
                    None => strategy,
                })
            }
        };
        Ok(strategy)
    }

    /// Create tournament entrants, one per kind in order.
    ///
    /// A kind entered more than once gets numbered names (`Random #1`,
    /// `Random #2`, ...). With a seed, entrant `i` is seeded `seed + i`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`](crate::Error::Configuration) if the
    /// configuration is invalid for any of the kinds.
    pub fn create_entrants(
        &self,
        kinds: &[StrategyKind],
        config: &GameConfig,
    ) -> Result<Vec<Box<dyn Strategy>>> {
        let mut entrants = Vec::with_capacity(kinds.len());
        for (i, &kind) in kinds.iter().enumerate() {
            let entrant_config = match config.seed {
                Some(seed) => config.clone().with_seed(seed.wrapping_add(i as u64)),
                None => config.clone(),
            };
            let name = if kinds.iter().filter(|&&k| k == kind).count() > 1 {
                let copy = kinds[..=i].iter().filter(|&&k| k == kind).count();
                format!("{} #{copy}", kind.default_name())
            } else {
                kind.default_name().to_string()
            };
            entrants.push(self.create_named_strategy(kind, &entrant_config, &name)?);
        }
        Ok(entrants)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing app with custom dependencies.
///
/// # Examples
///
/// ```
/// use vector_ox::app::AppBuilder;
/// use vector_ox::adapters::InMemoryIndex;
///
/// let app = AppBuilder::new()
///     .with_index(InMemoryIndex::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct AppBuilder {
    index: Option<Arc<dyn VectorIndex>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    /// Create a new app builder.
    pub fn new() -> Self {
        Self {
            index: None,
            default_seed: None,
        }
    }

    /// Set a custom vector index.
    pub fn with_index<I: VectorIndex + 'static>(mut self, index: I) -> Self {
        self.index = Some(Arc::new(index));
        self
    }

    /// Set a default random seed for all strategies created by this container.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app with the configured dependencies.
    ///
    /// If no index was specified, uses an [`UnavailableIndex`].
    pub fn build(self) -> App {
        App {
            index: self
                .index
                .unwrap_or_else(|| Arc::new(UnavailableIndex::default())),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
