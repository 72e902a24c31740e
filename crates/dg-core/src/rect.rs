//! Axis-aligned rectangles for room footprints
//!
//! A rectangle covers the half-open span `x..x + width` by `y..y + height`,
//! so two rectangles that only share an edge do not overlap.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left x coordinate
    pub x: i32,
    /// Bottom y coordinate
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the rightmost column
    pub fn x_max(&self) -> i32 {
        self.x + self.width
    }

    /// One past the topmost row
    pub fn y_max(&self) -> i32 {
        self.y + self.height
    }

    /// Check if the rectangles share interior area
    pub fn overlaps(&self, other: &Rect) -> bool {
        other.x_max() > self.x
            && other.x < self.x_max()
            && other.y_max() > self.y
            && other.y < self.y_max()
    }

    /// Check if a point lies inside the rectangle
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x_max() && y >= self.y && y < self.y_max()
    }

    /// Number of tiles covered
    pub fn area(&self) -> i32 {
        self.width.max(0) * self.height.max(0)
    }

    /// All covered points, column by column
    pub fn points(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (self.x..self.x_max()).flat_map(move |x| (self.y..self.y_max()).map(move |y| (x, y)))
    }
}
