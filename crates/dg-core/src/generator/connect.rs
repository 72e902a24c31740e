//! Region connection phase
//!
//! Repeatedly takes the first open region, finds every place where one of
//! its tiles sits two steps from another region, and carves a door through
//! the wall in between. The first door merges the region on the other side;
//! further doors are opened by chance and only add loops.

use tracing::{debug, warn};

use super::{GenerationReport, Generator};
use crate::direction::Direction;
use crate::region::RegionId;
use crate::tile::{Tile, TileKind};

/// A tile of the current region and the direction that reaches another region
pub(crate) type Connection = (Direction, usize);

impl Generator {
    /// Phase 4: join regions until one is left or nothing can be joined
    pub(super) fn connect_regions(&mut self, report: &mut GenerationReport) {
        let mut open: Vec<RegionId> = self.regions.ids();

        while let Some(&current) = open.first() {
            if open.len() <= 1 {
                break;
            }

            let mut candidates = self.possible_connections(current);
            if candidates.is_empty() {
                warn!(region = %current, "region has no connection points");
                report.isolated_regions += 1;
                open.remove(0);
                continue;
            }

            for attempt in 0..=self.config.additional_connection_attempts {
                if candidates.is_empty() {
                    break;
                }
                if attempt > 0 && !self.rng.percent(self.config.add_another_connection_percentage) {
                    continue;
                }

                let Some(pick) = self.rng.choose_index(candidates.len()) else {
                    break;
                };
                let (direction, from) = candidates.remove(pick);
                let Some(dest) = self.carve(from, direction, TileKind::Door) else {
                    continue;
                };

                if attempt > 0 {
                    report.bonus_connections += 1;
                    continue;
                }

                report.merging_connections += 1;
                if let Some(other) = self.grid.tile(dest).and_then(Tile::region)
                    && self.regions.merge(current, other, &mut self.grid)
                {
                    open.retain(|&id| id != other);
                }
            }
        }

        debug!(
            merged = report.merging_connections,
            bonus = report.bonus_connections,
            isolated = report.isolated_regions,
            "regions connected"
        );
    }

    /// Every (direction, tile) pair where a tile of `region` is two steps from another region
    pub(crate) fn possible_connections(&self, region: RegionId) -> Vec<Connection> {
        let Some(owned) = self.regions.get(region) else {
            return Vec::new();
        };

        let mut connections = Vec::new();
        for index in owned.tiles() {
            let Some(tile) = self.grid.tile(index) else {
                continue;
            };
            for dir in Direction::CARDINALS {
                if let Some(target) = self.grid.neighbor(tile, dir, 2)
                    && let Some(other) = target.region()
                    && other != region
                {
                    connections.push((dir, index));
                }
            }
        }
        connections
    }
}
