//! Maze carving phase (growing tree)
//!
//! Every untouched odd cell seeds a new region. From there a stack of cells
//! is grown by carving two tiles at a time into untouched territory, and
//! unwound when the top cell has nowhere left to go. Carving never breaks
//! into an existing region; joining regions is the connection phase's job.

use tracing::debug;

use super::{GenerationReport, Generator};
use crate::direction::Direction;
use crate::region::RegionId;
use crate::tile::TileKind;

impl Generator {
    /// Phase 3: grow a maze from each free odd cell
    pub(super) fn carve_mazes(&mut self, report: &mut GenerationReport) {
        for y in (1..self.grid.height()).step_by(2) {
            for x in (1..self.grid.width()).step_by(2) {
                let Some(start) = self.grid.get(x, y) else {
                    continue;
                };
                if start.is_floor() || self.grid.is_border_tile(start, None) {
                    continue;
                }
                let start = start.index();
                self.grow_maze(start);
                report.maze_regions += 1;
            }
        }

        debug!(regions = report.maze_regions, "mazes carved");
    }

    /// Carve one maze region outward from `start`
    pub(crate) fn grow_maze(&mut self, start: usize) -> RegionId {
        let region = self.regions.create(None);
        let mut stack = vec![start];

        while let Some(&current) = stack.last() {
            self.set_kind(current, TileKind::Floor);
            self.regions.add_tile(region, &mut self.grid, current);

            let next = self
                .choose_carve_direction(current)
                .and_then(|dir| self.carve(current, dir, TileKind::Floor));

            match next {
                Some(next) => stack.push(next),
                None => {
                    stack.pop();
                    self.last_direction = None;
                }
            }
        }

        region
    }

    /// Pick a carveable direction, favouring the previous one
    fn choose_carve_direction(&mut self, index: usize) -> Option<Direction> {
        let open: Vec<Direction> = Direction::CARDINALS
            .into_iter()
            .filter(|&dir| self.can_carve(index, dir))
            .collect();

        if let Some(last) = self.last_direction
            && open.contains(&last)
            && self.rng.percent(self.config.keep_same_direction_percentage)
        {
            return Some(last);
        }

        let pick = self.rng.choose_index(open.len())?;
        Some(open[pick])
    }

    /// Whether the cell two steps away is untouched
    ///
    /// The border check skips the side facing back towards `index`, since
    /// that is the wall about to be opened.
    fn can_carve(&self, index: usize, direction: Direction) -> bool {
        let Some(tile) = self.grid.tile(index) else {
            return false;
        };
        match self.grid.neighbor(tile, direction, 2) {
            Some(target) => {
                !target.is_floor()
                    && !self.grid.is_border_tile(target, Some(direction.opposite()))
            }
            None => false,
        }
    }
}
