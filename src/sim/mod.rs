//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in as arguments, never read from a clock
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod difficulty;
pub mod state;
pub mod tick;

pub use difficulty::{Difficulty, difficulty};
pub use state::{ColorState, Obstacle, Player, World};
pub use tick::{StepOutcome, spawn_obstacle, spawn_obstacles, step};
