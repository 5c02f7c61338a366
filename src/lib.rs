// Domain layer - grids, rules, pattern library, seeding
pub mod domain;

// Application layer - single game sessions and the multi-game pool
pub mod application;

pub mod config;
pub mod error;

// Re-exports for convenience
pub use application::{GameState, Pool, PoolSnapshot, PoolView, Strategy};
pub use config::SimConfig;
pub use domain::{Cell, Grid, PatternKind, RandomSeeder, RuleEngine, Seed, Seeder};
pub use error::{LifeError, Result};
