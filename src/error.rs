//! Startup configuration errors
//!
//! The simulation itself cannot fail; everything that could make it
//! degenerate is rejected here before a session is built.

/// Validation error for [`Settings`](crate::Settings)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Tick interval is zero, negative or not a number
    #[error("tick interval must be finite and positive, got {0}")]
    InvalidTick(f32),

    /// Glide speed is zero, negative or not a number
    #[error("glide speed must be finite and positive, got {0}")]
    InvalidGlideSpeed(f32),

    /// Spawn interval would never fire or is inverted
    #[error("spawn interval must be positive with min <= max, got {min}..{max}")]
    InvalidSpawnInterval { min: f32, max: f32 },

    /// Spawn speed range is empty or inverted
    #[error("spawn speed must be positive with min <= max, got {min}..{max}")]
    InvalidSpawnSpeed { min: f32, max: f32 },

    /// A starfield layer does not move
    #[error("star layer {layer} speed must be finite and positive, got {speed}")]
    InvalidStarSpeed { layer: usize, speed: f32 },

    /// Settings file could not be read
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid JSON for [`Settings`](crate::Settings)
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
