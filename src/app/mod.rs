//! Application layer with dependency injection container.
//!
//! The container owns infrastructure dependencies (the vector index) and
//! builds strategies from a [`StrategyKind`](crate::strategy::StrategyKind)
//! tag and a validated [`GameConfig`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           Application Layer (app)           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │          App (DI Container)          │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ owns                      │
//! │                 ▼                           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Infrastructure (adapters)           │   │
//! │  │  - InMemoryIndex                     │   │
//! │  │  - UnavailableIndex                  │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ implements                │
//! │                 ▼                           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Domain Ports (ports)                │   │
//! │  │  - VectorIndex trait                 │   │
//! │  │  - Strategy trait                    │   │
//! │  └──────────────┬───────────────────────┘   │
//! │                 │ used by                   │
//! │                 ▼                           │
//! │  ┌──────────────────────────────────────┐   │
//! │  │  Domain Logic                        │   │
//! │  │  - Board                             │   │
//! │  │  - Random / Minimax / Vector         │   │
//! │  └──────────────────────────────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod container;

pub use config::{GameConfig, MAX_UNBOUNDED_SIZE};
pub use container::{App, AppBuilder};
