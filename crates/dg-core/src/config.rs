//! Generator configuration
//!
//! Plain scalar tuning knobs. Every field has a default so partial JSON
//! configurations are accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, DungeonError};
use crate::room::PredefinedRoom;

/// Map size and tuning parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Map width, must be odd
    pub width: i32,
    /// Map height, must be odd
    pub height: i32,

    /// Room sides are drawn from `min..max` and then made odd
    pub min_room_width: i32,
    pub max_room_width: i32,
    pub min_room_height: i32,
    pub max_room_height: i32,

    /// Number of random room placements to attempt. Rejected attempts are
    /// not retried, so this sets room density rather than room count.
    pub room_placement_retries: u32,

    /// Chance to keep carving straight when the previous direction is open.
    /// High values give long straight corridors, low values twisty ones.
    pub keep_same_direction_percentage: u32,

    /// Chance for each connection attempt after the first to go ahead
    pub add_another_connection_percentage: u32,

    /// Connection attempts beyond the guaranteed first one per region
    pub additional_connection_attempts: u32,

    /// Share of floor tiles dead-end pruning must leave in place
    pub tiles_to_keep_percentage: u32,

    /// Seed for the random source; drawn from entropy when absent
    pub seed: Option<u64>,

    /// Fixed rooms offered one placement attempt each before random rooms
    pub predefined_rooms: Vec<PredefinedRoom>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 51,
            height: 31,
            min_room_width: 3,
            max_room_width: 9,
            min_room_height: 3,
            max_room_height: 9,
            room_placement_retries: 50,
            keep_same_direction_percentage: 50,
            add_another_connection_percentage: 50,
            additional_connection_attempts: 2,
            tiles_to_keep_percentage: 50,
            seed: None,
            predefined_rooms: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// Create a default configuration for the given map size
    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check dimensions, room size ranges and percentages
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::NonPositiveDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.width % 2 == 0 {
            return Err(ConfigError::EvenWidth(self.width));
        }
        if self.height % 2 == 0 {
            return Err(ConfigError::EvenHeight(self.height));
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(ConfigError::MapTooLarge {
                width: self.width,
                height: self.height,
            });
        }

        check_room_range("width", self.min_room_width, self.max_room_width)?;
        check_room_range("height", self.min_room_height, self.max_room_height)?;

        check_percentage(
            "keep_same_direction_percentage",
            self.keep_same_direction_percentage,
        )?;
        check_percentage(
            "add_another_connection_percentage",
            self.add_another_connection_percentage,
        )?;
        check_percentage("tiles_to_keep_percentage", self.tiles_to_keep_percentage)?;

        for (index, room) in self.predefined_rooms.iter().enumerate() {
            if room.width <= 0 || room.height <= 0 {
                return Err(ConfigError::InvalidPredefinedRoom {
                    index,
                    width: room.width,
                    height: room.height,
                });
            }
        }

        Ok(())
    }

    /// Parse a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, DungeonError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DungeonError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

fn check_room_range(axis: &'static str, min: i32, max: i32) -> Result<(), ConfigError> {
    if min <= 0 || min > max {
        return Err(ConfigError::InvalidRoomSize { axis, min, max });
    }
    Ok(())
}

fn check_percentage(name: &'static str, value: u32) -> Result<(), ConfigError> {
    if value > 100 {
        return Err(ConfigError::PercentageOutOfRange { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_even_dimensions_rejected() {
        assert_eq!(
            GeneratorConfig::with_size(10, 11).validate(),
            Err(ConfigError::EvenWidth(10))
        );
        assert_eq!(
            GeneratorConfig::with_size(11, 10).validate(),
            Err(ConfigError::EvenHeight(10))
        );
    }

    #[test]
    fn test_oversized_map_rejected() {
        assert!(matches!(
            GeneratorConfig::with_size(46341, 46341).validate(),
            Err(ConfigError::MapTooLarge { .. })
        ));
    }

    #[test]
    fn test_room_range_rejected() {
        let config = GeneratorConfig {
            min_room_width: 9,
            max_room_width: 3,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRoomSize { axis: "width", .. })
        ));
    }

    #[test]
    fn test_percentage_rejected() {
        let config = GeneratorConfig {
            tiles_to_keep_percentage: 101,
            ..GeneratorConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::PercentageOutOfRange {
                name: "tiles_to_keep_percentage",
                value: 101
            })
        );
    }

    #[test]
    fn test_predefined_room_rejected() {
        let config = GeneratorConfig {
            predefined_rooms: vec![PredefinedRoom {
                width: 0,
                height: 3,
                doorways: Vec::new(),
            }],
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPredefinedRoom { index: 0, .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            GeneratorConfig::from_json_str(r#"{"width": 21, "height": 15, "seed": 9}"#).unwrap();
        assert_eq!(config.width, 21);
        assert_eq!(config.height, 15);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.tiles_to_keep_percentage, 50);
        assert_eq!(config.additional_connection_attempts, 2);
    }

    #[test]
    fn test_json_validation_error() {
        let err = GeneratorConfig::from_json_str(r#"{"width": 20}"#).unwrap_err();
        assert!(matches!(
            err,
            DungeonError::Config(ConfigError::EvenWidth(20))
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = GeneratorConfig::from_json_str("{width:").unwrap_err();
        assert!(matches!(err, DungeonError::Json(_)));
    }
}
