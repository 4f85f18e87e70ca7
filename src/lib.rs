//! Galactic Voyager - a dodge-the-falling-obstacles arcade core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, input latch, collisions, tick)
//! - `session`: Game lifecycle (running/over/reset/exit) and host events
//! - `driver`: Fixed timestep frame driver
//! - `renderer`: Read-only frame view and vertex generation for a render backend
//! - `settings`: Configuration and startup validation

pub mod driver;
pub mod error;
pub mod highscores;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use driver::{FrameDriver, LoopControl};
pub use error::ConfigError;
pub use highscores::HighScores;
pub use session::{GameSession, HostEvent};
pub use settings::{ObstacleModel, PlayerMotion, Settings, SpawnInterval};

/// Game configuration constants (normalized device coordinates, [-1, 1] on both axes)
pub mod consts {
    /// Fixed simulation timestep (~60 Hz, matches the 16ms redraw timer)
    pub const SIM_DT: f32 = 0.016;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Player ground line
    pub const PLAYER_GROUND_Y: f32 = -0.8;
    /// Player collision half-extent (drawn as a 0.05 square)
    pub const PLAYER_HALF_SIZE: f32 = 0.025;
    /// Horizontal limit for the player and its glide target
    pub const PLAYER_X_LIMIT: f32 = 0.9;
    /// Horizontal displacement per tick while a direction is held
    pub const GLIDE_SPEED: f32 = 0.05;

    /// Obstacle collision half-extents (drawn as 0.1 x 0.05)
    pub const OBSTACLE_HALF_WIDTH: f32 = 0.05;
    pub const OBSTACLE_HALF_HEIGHT: f32 = 0.025;
    /// Obstacles below this are recycled or despawned
    pub const OBSTACLE_LOWER_BOUND: f32 = -1.0;
    /// Height at which obstacles re-enter the screen
    pub const OBSTACLE_SPAWN_Y: f32 = 1.0;

    /// Fixed pool lanes: (x, starting y, speed per tick)
    pub const FIXED_LANES: [(f32, f32, f32); 3] =
        [(-0.6, 1.0, 0.01), (0.0, 1.5, 0.015), (0.6, 2.0, 0.02)];

    /// Dynamic spawn defaults
    pub const SPAWN_INTERVAL_MIN: f32 = 2.0;
    pub const SPAWN_INTERVAL_MAX: f32 = 5.0;
    pub const SPAWN_SPEED_MIN: f32 = 0.008;
    pub const SPAWN_SPEED_MAX: f32 = 0.02;

    /// Starfield defaults: one speed per parallax layer
    pub const STAR_LAYER_SPEEDS: [f32; 3] = [0.001, 0.0025, 0.005];
    pub const STARS_PER_LAYER: usize = 24;
}

/// Clamp a horizontal coordinate to the player's allowed range
#[inline]
pub fn clamp_player_x(x: f32) -> f32 {
    x.clamp(-consts::PLAYER_X_LIMIT, consts::PLAYER_X_LIMIT)
}

/// Move `current` toward `target` by at most `max_step`, never overshooting
#[inline]
pub fn approach(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_step {
        target
    } else {
        current + max_step.copysign(delta)
    }
}
