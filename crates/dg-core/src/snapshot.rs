//! Serializable map snapshots for host layers

use serde::{Deserialize, Serialize};

use crate::error::DungeonError;
use crate::generator::Generator;
use crate::rect::Rect;
use crate::region::{Region, RegionId};
use crate::tile::{Tile, TileKind};

/// Summary of one surviving region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSummary {
    pub id: RegionId,
    pub tile_count: usize,
    /// Footprint of the room this region started as, if any
    pub room: Option<Rect>,
}

impl From<&Region> for RegionSummary {
    fn from(region: &Region) -> Self {
        Self {
            id: region.id(),
            tile_count: region.len(),
            room: region.room().map(|room| room.bounding_rect()),
        }
    }
}

/// Flat copy of a generated map
///
/// `tiles` and `tile_regions` are row-major, index `x + width * y`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub width: i32,
    pub height: i32,
    pub seed: u64,
    pub tiles: Vec<TileKind>,
    pub tile_regions: Vec<Option<RegionId>>,
    pub regions: Vec<RegionSummary>,
}

impl MapSnapshot {
    pub fn capture(generator: &Generator) -> Self {
        let grid = generator.grid();
        Self {
            width: grid.width(),
            height: grid.height(),
            seed: generator.seed(),
            tiles: grid.tiles().iter().map(Tile::kind).collect(),
            tile_regions: grid.tiles().iter().map(Tile::region).collect(),
            regions: generator
                .get_regions()
                .iter()
                .map(RegionSummary::from)
                .collect(),
        }
    }

    /// Tile kind at `(x, y)`, or `None` off the map
    pub fn kind_at(&self, x: i32, y: i32) -> Option<TileKind> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        self.tiles.get((x + self.width * y) as usize).copied()
    }

    pub fn to_json(&self) -> Result<String, DungeonError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, DungeonError> {
        Ok(serde_json::from_str(json)?)
    }
}
