//! Map tile types

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::region::RegionId;

/// Tile terrain type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum TileKind {
    #[default]
    Wall = 0,
    /// Maze corridor
    Floor = 1,
    /// Inside a room
    RoomFloor = 2,
    /// Opening carved between two regions
    Door = 3,
}

impl TileKind {
    /// Get the display character for this tile type
    pub const fn symbol(&self) -> char {
        match self {
            TileKind::Wall => '#',
            TileKind::Floor => '.',
            TileKind::RoomFloor => ',',
            TileKind::Door => '+',
        }
    }
}

/// A single map tile
///
/// The owning region is only ever changed through [`crate::region::Region`],
/// so `region` is `None` exactly when `kind` is [`TileKind::Wall`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    /// Row-major position in the grid
    pub(crate) index: usize,
    pub(crate) kind: TileKind,
    pub(crate) region: Option<RegionId>,
}

impl Tile {
    /// Create a new wall tile with no region
    pub(crate) const fn wall(x: i32, y: i32, index: usize) -> Self {
        Self {
            x,
            y,
            index,
            kind: TileKind::Wall,
            region: None,
        }
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    /// Owning region, if any
    pub fn region(&self) -> Option<RegionId> {
        self.region
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn is_wall(&self) -> bool {
        self.kind == TileKind::Wall
    }

    /// Corridor or room floor. Doors are not floor.
    pub fn is_floor(&self) -> bool {
        matches!(self.kind, TileKind::Floor | TileKind::RoomFloor)
    }

    pub fn is_room_floor(&self) -> bool {
        self.kind == TileKind::RoomFloor
    }

    pub fn is_door(&self) -> bool {
        self.kind == TileKind::Door
    }

    pub(crate) fn set_kind(&mut self, kind: TileKind) {
        self.kind = kind;
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
