mod cell;
mod grid;
mod patterns;
pub mod rules;
pub mod seeding;

pub use cell::Cell;
pub use grid::Grid;
pub use patterns::{PatternKind, stamp};
pub use rules::{RuleEngine, count_live_neighbors};
pub use seeding::{RandomSeeder, Seed, Seeder, seed_random};
