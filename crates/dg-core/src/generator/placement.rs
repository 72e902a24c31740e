//! Room placement phase
//!
//! Rooms are dropped at random lattice positions. A candidate that leaves
//! the map or overlaps an earlier room is skipped; skipped attempts are not
//! retried.

use tracing::{debug, trace};

use super::{GenerationReport, Generator};
use crate::region::RegionId;
use crate::room::{Room, RoomShape};
use crate::tile::TileKind;

impl Generator {
    /// Phase 2: predefined rooms first, then the random retries
    pub(super) fn place_rooms(&mut self, report: &mut GenerationReport) {
        let predefined = self.config.predefined_rooms.clone();
        for room in predefined {
            self.record_placement(RoomShape::Predefined(room), report);
        }

        for _ in 0..self.config.room_placement_retries {
            let shape = RoomShape::random_rectangular(
                self.config.min_room_width,
                self.config.max_room_width,
                self.config.min_room_height,
                self.config.max_room_height,
                &mut self.rng,
            );
            self.record_placement(shape, report);
        }

        debug!(
            placed = report.rooms_placed,
            rejected = report.rooms_rejected,
            "rooms placed"
        );
    }

    fn record_placement(&mut self, shape: RoomShape, report: &mut GenerationReport) {
        if self.place_room_randomly(shape).is_some() {
            report.rooms_placed += 1;
        } else {
            report.rooms_rejected += 1;
        }
    }

    /// Try to place a room at a random lattice origin
    ///
    /// Returns the new room region, or `None` when the attempt was rejected.
    pub(crate) fn place_room_randomly(&mut self, shape: RoomShape) -> Option<RegionId> {
        let (width, height) = shape.size();
        let x = self.lattice_origin(self.grid.width(), width);
        let y = self.lattice_origin(self.grid.height(), height);

        // The tile just past the top-right corner must exist, which leaves
        // at least one wall column and row between the room and the edge.
        if self.grid.get(x + width, y + height).is_none() {
            trace!(x, y, width, height, "room leaves the map");
            return None;
        }

        let room = Room::new(x, y, shape);
        if self.rooms.iter().any(|placed| placed.overlaps(&room)) {
            trace!(x, y, width, height, "room overlaps another room");
            return None;
        }

        Some(self.fill_room(room))
    }

    /// Random odd coordinate leaving room for `room_dim` tiles
    fn lattice_origin(&mut self, map_dim: i32, room_dim: i32) -> i32 {
        self.rng.range(0, (map_dim - room_dim) / 2) * 2 + 1
    }

    /// Register the room and turn its footprint into room floor
    pub(super) fn fill_room(&mut self, room: Room) -> RegionId {
        let rect = room.bounding_rect();
        let id = self.regions.create(Some(room.clone()));
        for (x, y) in rect.points() {
            debug_assert!(room.overlaps_tile(x, y));
            let Some(tile) = self.grid.get_mut(x, y) else {
                continue;
            };
            tile.set_kind(TileKind::RoomFloor);
            let index = tile.index();
            self.regions.add_tile(id, &mut self.grid, index);
        }
        self.rooms.push(room);
        id
    }
}
