//! Game settings
//!
//! One configurable core covers all three game variants: a fixed pool of
//! recycled obstacles or a dynamic spawn list, direct or smoothed player
//! motion, and an optional parallax starfield.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// How obstacles enter and leave the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleModel {
    /// Three lanes, obstacles recycled to the top when they fall off
    #[default]
    FixedPool,
    /// Obstacles appended on a timer and removed when they fall off
    DynamicSpawn,
}

/// How held directions move the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlayerMotion {
    /// Position moves directly by the glide speed per held direction
    Direct,
    /// A target moves with the keys; the position glides toward it
    #[default]
    Smoothed,
}

/// Delay between dynamic spawns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpawnInterval {
    /// Same delay every time
    Fixed { secs: f32 },
    /// Fresh delay drawn uniformly from `[min, max]` after every spawn
    Random { min: f32, max: f32 },
}

impl Default for SpawnInterval {
    fn default() -> Self {
        SpawnInterval::Random {
            min: SPAWN_INTERVAL_MIN,
            max: SPAWN_INTERVAL_MAX,
        }
    }
}

impl SpawnInterval {
    /// Inclusive bounds of the delay
    pub fn bounds(&self) -> (f32, f32) {
        match *self {
            SpawnInterval::Fixed { secs } => (secs, secs),
            SpawnInterval::Random { min, max } => (min, max),
        }
    }
}

/// Named presets matching the three shipped game variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Lanes and smooth glide, black background
    #[default]
    Classic,
    /// Lanes over a parallax starfield
    Starfield,
    /// Timed spawns over a parallax starfield
    Swarm,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::Starfield => "Starfield",
            Variant::Swarm => "Swarm",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "lanes" => Some(Variant::Classic),
            "starfield" | "stars" => Some(Variant::Starfield),
            "swarm" | "dynamic" => Some(Variant::Swarm),
            _ => None,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Variant options ===
    pub obstacle_model: ObstacleModel,
    pub player_motion: PlayerMotion,
    /// Render and animate the background starfield
    pub starfield: bool,

    // === Timing ===
    /// Fixed tick length in seconds; also the score gained per tick
    pub tick_dt: f32,

    // === Movement (normalized units per tick) ===
    pub glide_speed: f32,

    // === Dynamic spawning ===
    pub spawn_interval: SpawnInterval,
    pub spawn_speed_min: f32,
    pub spawn_speed_max: f32,

    // === Starfield ===
    /// Downward speed per layer, far to near
    pub star_layer_speeds: Vec<f32>,
    pub stars_per_layer: usize,

    /// RNG seed; a time-derived seed is used when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            obstacle_model: ObstacleModel::FixedPool,
            player_motion: PlayerMotion::Smoothed,
            starfield: false,

            tick_dt: SIM_DT,

            glide_speed: GLIDE_SPEED,

            spawn_interval: SpawnInterval::default(),
            spawn_speed_min: SPAWN_SPEED_MIN,
            spawn_speed_max: SPAWN_SPEED_MAX,

            star_layer_speeds: STAR_LAYER_SPEEDS.to_vec(),
            stars_per_layer: STARS_PER_LAYER,

            seed: None,
        }
    }
}

impl Settings {
    /// Create settings for one of the preset variants
    pub fn from_variant(variant: Variant) -> Self {
        let mut settings = Self::default();
        settings.apply_variant(variant);
        settings
    }

    /// Switch the variant options, leaving tuning values alone
    pub fn apply_variant(&mut self, variant: Variant) {
        let (model, starfield) = match variant {
            Variant::Classic => (ObstacleModel::FixedPool, false),
            Variant::Starfield => (ObstacleModel::FixedPool, true),
            Variant::Swarm => (ObstacleModel::DynamicSpawn, true),
        };
        self.obstacle_model = model;
        self.starfield = starfield;
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tick_dt.is_finite() || self.tick_dt <= 0.0 {
            return Err(ConfigError::InvalidTick(self.tick_dt));
        }
        if !self.glide_speed.is_finite() || self.glide_speed <= 0.0 {
            return Err(ConfigError::InvalidGlideSpeed(self.glide_speed));
        }

        if self.obstacle_model == ObstacleModel::DynamicSpawn {
            let (min, max) = self.spawn_interval.bounds();
            if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
                return Err(ConfigError::InvalidSpawnInterval { min, max });
            }
            let (min, max) = (self.spawn_speed_min, self.spawn_speed_max);
            if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
                return Err(ConfigError::InvalidSpawnSpeed { min, max });
            }
        }

        if self.starfield
            && let Some((layer, &speed)) = self
                .star_layer_speeds
                .iter()
                .enumerate()
                .find(|(_, s)| !s.is_finite() || **s <= 0.0)
        {
            return Err(ConfigError::InvalidStarSpeed { layer, speed });
        }

        Ok(())
    }

    /// Parse and validate settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
