//! Map generation pipeline
//!
//! [`Generator::generate_map`] runs five phases in order, each building on
//! the grid and region list left by the previous one:
//!
//! 1. reset every tile to a regionless wall
//! 2. place randomly sized rooms on the odd lattice
//! 3. fill the remaining space with growing-tree mazes
//! 4. carve doors until the regions are joined into one
//! 5. prune dead-end corridor tiles down to the configured share

mod connect;
mod deadends;
mod maze;
mod placement;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::config::GeneratorConfig;
use crate::direction::Direction;
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::region::{Region, RegionId, RegionList};
use crate::rng::GenRng;
use crate::room::Room;
use crate::snapshot::MapSnapshot;
use crate::tile::{Tile, TileKind};

/// Counters collected while generating a map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub rooms_placed: usize,
    /// Placement attempts skipped for leaving the map or overlapping a room
    pub rooms_rejected: usize,
    pub maze_regions: usize,
    /// Connections that merged two regions
    pub merging_connections: usize,
    /// Extra doors opened after a region's first connection
    pub bonus_connections: usize,
    /// Regions left unmerged because they had nothing to connect to
    pub isolated_regions: usize,
    pub floor_before_pruning: usize,
    pub dead_ends_removed: usize,
    pub floor_after_pruning: usize,
    pub final_regions: usize,
}

impl GenerationReport {
    /// Whether every region ended up merged into one
    pub fn is_fully_connected(&self) -> bool {
        self.final_regions <= 1
    }
}

/// Room-and-maze map generator
///
/// Owns its grid, region list and random source. Each call to
/// [`generate_map`](Self::generate_map) starts again from a blank grid.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    grid: Grid,
    regions: RegionList,
    /// Every room accepted by placement, in order
    rooms: Vec<Room>,
    rng: GenRng,
    /// Direction of the previous carve, for the straightness bias
    last_direction: Option<Direction>,
}

impl Generator {
    /// Create a generator, seeding from `config.seed` or from entropy
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => GenRng::new(seed),
            None => GenRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Create a generator drawing from an existing random source
    pub fn with_rng(config: GeneratorConfig, rng: GenRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height)?;
        Ok(Self {
            config,
            grid,
            regions: RegionList::new(),
            rooms: Vec::new(),
            rng,
            last_direction: None,
        })
    }

    /// Run the full pipeline and return what happened
    pub fn generate_map(&mut self) -> GenerationReport {
        let _span = info_span!(
            "generate_map",
            width = self.grid.width(),
            height = self.grid.height(),
            seed = self.rng.seed()
        )
        .entered();
        info!("generating map");

        let mut report = GenerationReport::default();
        self.create_default_tiles();
        self.place_rooms(&mut report);
        self.carve_mazes(&mut report);
        self.connect_regions(&mut report);
        self.remove_dead_ends(&mut report);
        report.final_regions = self.regions.len();

        info!(
            rooms = report.rooms_placed,
            regions = report.final_regions,
            floor = report.floor_after_pruning,
            "map generated"
        );
        report
    }

    /// Phase 1: blank the grid and forget all regions and rooms
    fn create_default_tiles(&mut self) {
        self.grid.clear();
        self.regions.clear();
        self.rooms.clear();
        self.last_direction = None;
        debug!(tiles = self.grid.tiles().len(), "tiles reset");
    }

    /// Carve two steps from `from` towards `direction`
    ///
    /// The destination becomes corridor floor and the tile in between becomes
    /// `wall_kind`. An unowned tile in between joins the region of `from`;
    /// one already owned by another region keeps its owner. Returns the
    /// destination index.
    fn carve(&mut self, from: usize, direction: Direction, wall_kind: TileKind) -> Option<usize> {
        self.last_direction = Some(direction);

        let wall = self.grid.neighbor_index(from, direction, 1)?;
        let next = self.grid.neighbor_index(from, direction, 2)?;

        self.set_kind(next, TileKind::Floor);

        let unowned = self.grid.tile(wall).is_some_and(|t| t.region().is_none());
        self.set_kind(wall, wall_kind);
        if unowned && let Some(owner) = self.grid.tile(from).and_then(Tile::region) {
            self.regions.add_tile(owner, &mut self.grid, wall);
        }

        Some(next)
    }

    fn set_kind(&mut self, index: usize, kind: TileKind) {
        if let Some(tile) = self.grid.tile_mut(index) {
            tile.set_kind(kind);
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Seed of the random source, for reproducing a map
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Tile at `(x, y)`, or `None` off the map
    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.grid.get(x, y)
    }

    /// All tiles in row-major order
    pub fn get_tiles(&self) -> &[Tile] {
        self.grid.tiles()
    }

    /// Surviving regions in insertion order
    pub fn get_regions(&self) -> &[Region] {
        self.regions.as_slice()
    }

    pub fn get_region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id)
    }

    /// Every room footprint placed during the last run
    pub fn get_rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Uniformly random corridor or room floor tile
    pub fn random_floor_tile(&mut self) -> Option<&Tile> {
        self.grid.random_floor_tile(&mut self.rng)
    }

    /// Serializable copy of the current map
    pub fn snapshot(&self) -> MapSnapshot {
        MapSnapshot::capture(self)
    }
}
