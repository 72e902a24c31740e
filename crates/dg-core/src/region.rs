//! Regions: named sets of tiles owned together
//!
//! A region owns tiles by grid index; each owned tile points back at the
//! region through its `region` field. The two sides are only ever changed
//! together, by [`Region::add`], [`Region::remove`] and [`Region::merge`]
//! or the [`RegionList`] wrappers around them.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::room::Room;
use crate::tile::Tile;

/// Region identifier, unique for the lifetime of a [`RegionList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub u32);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A set of tiles, optionally laid out as a room
///
/// Equality and hashing go through the identifier only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    id: RegionId,
    tiles: BTreeSet<usize>,
    room: Option<Room>,
}

impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Region {}

impl std::hash::Hash for Region {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Region {
    pub fn new(id: RegionId, room: Option<Room>) -> Self {
        Self {
            id,
            tiles: BTreeSet::new(),
            room,
        }
    }

    pub fn id(&self) -> RegionId {
        self.id
    }

    /// Room footprint this region was created with, if it is a room
    pub fn room(&self) -> Option<&Room> {
        self.room.as_ref()
    }

    pub fn is_room(&self) -> bool {
        self.room.is_some()
    }

    /// Owned tile indices in ascending grid order
    pub fn tiles(&self) -> impl Iterator<Item = usize> + '_ {
        self.tiles.iter().copied()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.tiles.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Take ownership of a tile
    ///
    /// Returns the tile's previous owner when it was a different region; that
    /// region still lists the tile and must [`forget`](Self::forget) it.
    pub fn add(&mut self, tile: Option<&mut Tile>) -> Option<RegionId> {
        let tile = tile?;
        let previous = tile.region.filter(|&r| r != self.id);
        self.tiles.insert(tile.index);
        tile.region = Some(self.id);
        previous
    }

    /// Release a tile owned by this region
    pub fn remove(&mut self, tile: Option<&mut Tile>) {
        let Some(tile) = tile else {
            return;
        };
        self.tiles.remove(&tile.index);
        if tile.region == Some(self.id) {
            tile.region = None;
        }
    }

    /// Absorb every tile of `other`, which is consumed
    pub fn merge(&mut self, other: Region, grid: &mut Grid) {
        for index in other.tiles {
            self.add(grid.tile_mut(index));
        }
    }

    /// Drop an index from the set without touching the tile
    pub(crate) fn forget(&mut self, index: usize) {
        self.tiles.remove(&index);
    }
}

/// Ordered list of regions plus the identifier counter
///
/// Identifiers are issued in increasing order and regions are only ever
/// appended or removed, so the list stays sorted by id and lookups are a
/// binary search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionList {
    regions: Vec<Region>,
    next_id: u32,
}

impl RegionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new empty region and return its identifier
    pub fn create(&mut self, room: Option<Room>) -> RegionId {
        let id = RegionId(self.next_id);
        self.next_id += 1;
        self.regions.push(Region::new(id, room));
        id
    }

    fn position(&self, id: RegionId) -> Option<usize> {
        self.regions.binary_search_by_key(&id, Region::id).ok()
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.position(id).and_then(|pos| self.regions.get(pos))
    }

    fn get_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        let pos = self.position(id)?;
        self.regions.get_mut(pos)
    }

    /// Regions in insertion order
    pub fn as_slice(&self) -> &[Region] {
        &self.regions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn ids(&self) -> Vec<RegionId> {
        self.regions.iter().map(Region::id).collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Give the tile at `index` to region `id`, detaching it from any previous owner
    pub fn add_tile(&mut self, id: RegionId, grid: &mut Grid, index: usize) {
        let Some(region) = self.get_mut(id) else {
            return;
        };
        if let Some(previous) = region.add(grid.tile_mut(index))
            && let Some(old) = self.get_mut(previous)
        {
            old.forget(index);
        }
    }

    /// Release the tile at `index` from whichever region owns it
    pub fn remove_tile(&mut self, grid: &mut Grid, index: usize) {
        let Some(owner) = grid.tile(index).and_then(Tile::region) else {
            return;
        };
        if let Some(region) = self.get_mut(owner) {
            region.remove(grid.tile_mut(index));
        }
    }

    /// Merge region `from` into region `into` and drop `from` from the list
    ///
    /// Returns false when either region is missing or they are the same.
    pub fn merge(&mut self, into: RegionId, from: RegionId, grid: &mut Grid) -> bool {
        if into == from || self.get(into).is_none() {
            return false;
        }
        let Some(pos) = self.position(from) else {
            return false;
        };
        let absorbed = self.regions.remove(pos);
        match self.get_mut(into) {
            Some(region) => {
                region.merge(absorbed, grid);
                true
            }
            None => false,
        }
    }

    /// Drop all regions; identifiers keep counting up
    pub(crate) fn clear(&mut self) {
        self.regions.clear();
    }
}
