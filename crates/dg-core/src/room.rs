//! Room shapes and placement
//!
//! A room is a region with a footprint. The footprint is described by a
//! [`RoomShape`] and anchored at an origin (the bottom-left tile).

use serde::{Deserialize, Serialize};

use crate::rect::Rect;
use crate::rng::GenRng;

/// Fixed-size room with doorway markers
///
/// Doorways are offsets relative to the room origin. They are informational
/// for host layers; connection carving does not consult them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredefinedRoom {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub doorways: Vec<(i32, i32)>,
}

/// Room footprint variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum RoomShape {
    Rectangular { width: i32, height: i32 },
    Predefined(PredefinedRoom),
}

impl RoomShape {
    /// Random rectangle with each side drawn from `min..max`, then bumped to odd
    ///
    /// Odd sides keep both ends of the room on the cell lattice.
    pub fn random_rectangular(
        min_width: i32,
        max_width: i32,
        min_height: i32,
        max_height: i32,
        rng: &mut GenRng,
    ) -> Self {
        let mut height = rng.range(min_height, max_height);
        let mut width = rng.range(min_width, max_width);
        if height % 2 == 0 {
            height += 1;
        }
        if width % 2 == 0 {
            width += 1;
        }
        RoomShape::Rectangular { width, height }
    }

    /// `(width, height)` of the footprint
    pub fn size(&self) -> (i32, i32) {
        match self {
            RoomShape::Rectangular { width, height } => (*width, *height),
            RoomShape::Predefined(room) => (room.width, room.height),
        }
    }

    /// Check if an origin-relative offset is a doorway
    pub fn is_doorway(&self, dx: i32, dy: i32) -> bool {
        match self {
            RoomShape::Rectangular { .. } => false,
            RoomShape::Predefined(room) => room.doorways.contains(&(dx, dy)),
        }
    }
}

/// A room shape anchored on the map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub shape: RoomShape,
}

impl Room {
    pub fn new(x: i32, y: i32, shape: RoomShape) -> Self {
        Self { x, y, shape }
    }

    pub fn bounding_rect(&self) -> Rect {
        let (width, height) = self.shape.size();
        Rect::new(self.x, self.y, width, height)
    }

    /// Check if two rooms share interior area
    pub fn overlaps(&self, other: &Room) -> bool {
        self.bounding_rect().overlaps(&other.bounding_rect())
    }

    /// Check if a map position lies inside the room
    pub fn overlaps_tile(&self, x: i32, y: i32) -> bool {
        self.bounding_rect().contains(x, y)
    }

    /// Check if a map position is one of the room's doorways
    pub fn is_doorway(&self, x: i32, y: i32) -> bool {
        self.shape.is_doorway(x - self.x, y - self.y)
    }
}
