//! Tile grid
//!
//! Owns every tile of the map in a flat row-major array. Width and height
//! are odd so that odd coordinates form the cell lattice the maze and rooms
//! are aligned to, with even coordinates left for the walls between cells.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::ConfigError;
use crate::rng::GenRng;
use crate::tile::{Tile, TileKind};

/// Fixed-size map of tiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Create a grid of wall tiles
    ///
    /// Both dimensions must be odd and positive.
    pub fn new(width: i32, height: i32) -> Result<Self, ConfigError> {
        if width <= 0 || height <= 0 {
            return Err(ConfigError::NonPositiveDimension { width, height });
        }
        if width % 2 == 0 {
            return Err(ConfigError::EvenWidth(width));
        }
        if height % 2 == 0 {
            return Err(ConfigError::EvenHeight(height));
        }
        let Some(area) = width.checked_mul(height) else {
            return Err(ConfigError::MapTooLarge { width, height });
        };

        let mut tiles = Vec::with_capacity(area as usize);
        for y in 0..height {
            for x in 0..width {
                tiles.push(Tile::wall(x, y, (x + width * y) as usize));
            }
        }

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Check if a coordinate lies on the map
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Row-major index. Only meaningful for in-bounds coordinates.
    pub fn index(&self, x: i32, y: i32) -> usize {
        (x + self.width * y) as usize
    }

    /// Tile at `(x, y)`, or `None` off the map
    pub fn get(&self, x: i32, y: i32) -> Option<&Tile> {
        if !self.contains(x, y) {
            return None;
        }
        self.tiles.get(self.index(x, y))
    }

    pub(crate) fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        if !self.contains(x, y) {
            return None;
        }
        let index = self.index(x, y);
        self.tiles.get_mut(index)
    }

    /// Tile by row-major index
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub(crate) fn tile_mut(&mut self, index: usize) -> Option<&mut Tile> {
        self.tiles.get_mut(index)
    }

    /// All tiles in row-major order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile `distance` steps from `tile` in `direction`
    pub fn neighbor(&self, tile: &Tile, direction: Direction, distance: i32) -> Option<&Tile> {
        let (dx, dy) = direction.offset();
        self.get(tile.x + dx * distance, tile.y + dy * distance)
    }

    /// Index of the tile `distance` steps from `index` in `direction`
    pub fn neighbor_index(&self, index: usize, direction: Direction, distance: i32) -> Option<usize> {
        let tile = self.tile(index)?;
        self.neighbor(tile, direction, distance).map(Tile::index)
    }

    /// Cardinal neighbours that exist (N, S, E, W order)
    pub fn neighbors(&self, tile: &Tile) -> Vec<&Tile> {
        Direction::CARDINALS
            .iter()
            .filter_map(|&dir| self.neighbor(tile, dir, 1))
            .collect()
    }

    /// True when a cardinal neighbour is a wall or off the map
    fn is_closed(&self, tile: &Tile, direction: Direction) -> bool {
        self.neighbor(tile, direction, 1).is_none_or(Tile::is_wall)
    }

    /// A dead end has exactly one open cardinal neighbour
    pub fn is_dead_end(&self, tile: &Tile) -> bool {
        Direction::CARDINALS
            .iter()
            .filter(|&&dir| self.is_closed(tile, dir))
            .count()
            == 3
    }

    /// Closed both vertically and horizontally on at least one side
    pub fn is_corner(&self, tile: &Tile) -> bool {
        (self.is_closed(tile, Direction::North) || self.is_closed(tile, Direction::South))
            && (self.is_closed(tile, Direction::East) || self.is_closed(tile, Direction::West))
    }

    /// Check whether a tile touches the map edge, another region or open floor
    ///
    /// Every direction except `skip` is inspected: a missing neighbour or one
    /// already owned by a region disqualifies the tile, and so does a floor
    /// neighbour in a cardinal direction. Carving uses this to stay inside
    /// untouched territory; joining regions is left to the connection phase.
    pub fn is_border_tile(&self, tile: &Tile, skip: Option<Direction>) -> bool {
        for dir in Direction::CARDINALS.iter().chain(Direction::DIAGONALS.iter()) {
            if Some(*dir) == skip {
                continue;
            }
            match self.neighbor(tile, *dir, 1) {
                None => return true,
                Some(n) if n.region().is_some() => return true,
                Some(n) if !dir.is_diagonal() && n.is_floor() => return true,
                Some(_) => {}
            }
        }
        false
    }

    /// Count of corridor and room floor tiles
    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_floor()).count()
    }

    /// Uniformly random floor tile, or `None` when the map has no floor
    pub fn random_floor_tile(&self, rng: &mut GenRng) -> Option<&Tile> {
        let floors: Vec<&Tile> = self.tiles.iter().filter(|t| t.is_floor()).collect();
        let idx = rng.choose_index(floors.len())?;
        Some(floors[idx])
    }

    /// Reset every tile to a regionless wall
    pub(crate) fn clear(&mut self) {
        for tile in &mut self.tiles {
            tile.kind = TileKind::Wall;
            tile.region = None;
        }
    }
}

impl fmt::Display for Grid {
    /// Rows are printed from the highest `y` down so north is up.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let symbol = self.get(x, y).map_or(' ', |t| t.kind().symbol());
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
