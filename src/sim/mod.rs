//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, first_hit};
pub use input::{Direction, Directions, InputLatch};
pub use rng::{RandomSource, SeededRandom};
pub use spawn::Spawner;
pub use state::{GamePhase, Obstacle, OverReason, Player, Star, Starfield, World};
pub use tick::{StepResult, step};
