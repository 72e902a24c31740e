//! Error types
//!
//! Only configuration is fallible. Everything that can go wrong while
//! generating (rejected rooms, isolated regions, pruning running dry) is a
//! normal outcome and shows up in the generation report instead.

use thiserror::Error;

/// Invalid generator or grid configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Width must be an odd number, got {0}")]
    EvenWidth(i32),

    #[error("Height must be an odd number, got {0}")]
    EvenHeight(i32),

    #[error("Map dimensions must be positive, got {width}x{height}")]
    NonPositiveDimension { width: i32, height: i32 },

    #[error("Map of {width}x{height} tiles is too large")]
    MapTooLarge { width: i32, height: i32 },

    #[error("Invalid room {axis} range: min {min}, max {max}")]
    InvalidRoomSize {
        axis: &'static str,
        min: i32,
        max: i32,
    },

    #[error("Percentage '{name}' must be within 0..=100, got {value}")]
    PercentageOutOfRange { name: &'static str, value: u32 },

    #[error("Predefined room {index} has a non-positive size {width}x{height}")]
    InvalidPredefinedRoom {
        index: usize,
        width: i32,
        height: i32,
    },
}

/// Top-level error for callers that also load configuration or write output
#[derive(Debug, Error)]
pub enum DungeonError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
