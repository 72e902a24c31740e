//! Dead-end pruning phase
//!
//! Floor tiles with a single open side are turned back into wall, one at a
//! time, until the configured share of floor is left or no dead ends remain.
//! Removing a tile can leave its neighbour as a new dead end, so corridors
//! shrink back from their tips.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use super::{GenerationReport, Generator};
use crate::direction::Direction;
use crate::tile::TileKind;

impl Generator {
    /// Phase 5: prune dead ends down to `tiles_to_keep_percentage`
    pub(super) fn remove_dead_ends(&mut self, report: &mut GenerationReport) {
        let mut candidates: BTreeSet<usize> = self
            .grid
            .tiles()
            .iter()
            .filter(|t| t.is_floor())
            .map(|t| t.index())
            .collect();

        let total = candidates.len();
        let keep = total * self.config.tiles_to_keep_percentage as usize / 100;
        let target = total - keep;
        report.floor_before_pruning = total;

        // Lowest index first, matching a row-major scan for the next dead end
        let mut frontier: BTreeSet<usize> = candidates
            .iter()
            .copied()
            .filter(|&index| self.is_dead_end_at(index))
            .collect();

        let mut removed = 0;
        while removed < target {
            let Some(index) = frontier.pop_first() else {
                break;
            };
            candidates.remove(&index);
            self.set_kind(index, TileKind::Wall);
            self.regions.remove_tile(&mut self.grid, index);
            removed += 1;

            for dir in Direction::CARDINALS {
                let Some(next) = self.grid.neighbor_index(index, dir, 1) else {
                    continue;
                };
                if !candidates.contains(&next) {
                    continue;
                }
                if self.is_dead_end_at(next) {
                    frontier.insert(next);
                } else {
                    frontier.remove(&next);
                }
            }
        }

        if removed < target {
            warn!(removed, target, "ran out of dead ends before reaching the target");
        }

        report.dead_ends_removed = removed;
        report.floor_after_pruning = total - removed;
        debug!(removed, remaining = report.floor_after_pruning, "dead ends pruned");
    }

    fn is_dead_end_at(&self, index: usize) -> bool {
        self.grid
            .tile(index)
            .is_some_and(|tile| self.grid.is_dead_end(tile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;

    fn pipeline_until_pruning(seed: u64, keep: u32) -> (Generator, GenerationReport) {
        let config = GeneratorConfig {
            tiles_to_keep_percentage: keep,
            seed: Some(seed),
            ..GeneratorConfig::with_size(31, 21)
        };
        let mut generator = Generator::new(config).unwrap();
        let mut report = GenerationReport::default();
        generator.create_default_tiles();
        generator.place_rooms(&mut report);
        generator.carve_mazes(&mut report);
        generator.connect_regions(&mut report);
        (generator, report)
    }

    #[test]
    fn test_keep_everything_removes_nothing() {
        let (mut generator, mut report) = pipeline_until_pruning(6, 100);
        let before = generator.grid().floor_count();
        generator.remove_dead_ends(&mut report);
        assert_eq!(report.dead_ends_removed, 0);
        assert_eq!(report.floor_before_pruning, before);
        assert_eq!(generator.grid().floor_count(), before);
    }

    #[test]
    fn test_pruning_respects_keep_share() {
        let (mut generator, mut report) = pipeline_until_pruning(21, 60);
        generator.remove_dead_ends(&mut report);

        let total = report.floor_before_pruning;
        let kept = generator.grid().floor_count();
        assert_eq!(kept, report.floor_after_pruning);
        assert!(kept >= total * 60 / 100);
        assert_eq!(total - kept, report.dead_ends_removed);
    }

    #[test]
    fn test_keep_nothing_leaves_no_dead_ends() {
        let (mut generator, mut report) = pipeline_until_pruning(4, 0);
        generator.remove_dead_ends(&mut report);

        let grid = generator.grid();
        for tile in grid.tiles() {
            if tile.is_floor() {
                assert!(!grid.is_dead_end(tile), "dead end left at {tile}");
            }
        }
    }

    #[test]
    fn test_pruned_tiles_leave_their_region() {
        let (mut generator, mut report) = pipeline_until_pruning(13, 30);
        generator.remove_dead_ends(&mut report);

        for tile in generator.get_tiles() {
            assert_eq!(tile.is_wall(), tile.region().is_none(), "{tile}");
        }
        let owned: usize = generator.get_regions().iter().map(|r| r.len()).sum();
        let open = generator.get_tiles().iter().filter(|t| !t.is_wall()).count();
        assert_eq!(owned, open);
    }

    #[test]
    fn test_corridor_shrinks_from_its_tip() {
        // A lone corridor along y=1 with no room: every tile is eventually a tip
        let config = GeneratorConfig {
            room_placement_retries: 0,
            tiles_to_keep_percentage: 0,
            seed: Some(2),
            ..GeneratorConfig::with_size(9, 3)
        };
        let mut generator = Generator::new(config).unwrap();
        let mut report = GenerationReport::default();
        generator.carve_mazes(&mut report);
        assert_eq!(generator.grid().floor_count(), 7);

        generator.remove_dead_ends(&mut report);
        // The last tile has four closed sides and is never a dead end
        assert_eq!(report.dead_ends_removed, 6);
        assert_eq!(generator.grid().floor_count(), 1);
    }
}
