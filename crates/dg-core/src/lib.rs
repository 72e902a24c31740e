//! dg-core: room-and-maze dungeon generation
//!
//! Builds a grid of wall, floor, room floor and door tiles: rooms are
//! scattered on an odd lattice, the gaps are filled with mazes, every region
//! is joined through doors, and dead-end corridors are pruned back.
//!
//! This crate has no I/O beyond loading JSON configuration. Rendering and
//! gameplay live in host layers that read the map through [`Generator`]'s
//! queries or a [`MapSnapshot`].

pub mod config;
pub mod direction;
pub mod error;
pub mod generator;
pub mod grid;
pub mod rect;
pub mod region;
pub mod room;
pub mod snapshot;
pub mod tile;

mod rng;

pub use config::GeneratorConfig;
pub use direction::Direction;
pub use error::{ConfigError, DungeonError};
pub use generator::{GenerationReport, Generator};
pub use grid::Grid;
pub use rect::Rect;
pub use region::{Region, RegionId, RegionList};
pub use rng::GenRng;
pub use room::{PredefinedRoom, Room, RoomShape};
pub use snapshot::{MapSnapshot, RegionSummary};
pub use tile::{Tile, TileKind};
