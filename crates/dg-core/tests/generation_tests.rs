//! End-to-end generation scenarios through the public API

use std::collections::{BTreeSet, VecDeque};

use dg_core::{
    ConfigError, Direction, GenerationReport, Generator, GeneratorConfig, Grid, PredefinedRoom,
    Room, RoomShape, TileKind,
};

fn generate(config: GeneratorConfig) -> (Generator, GenerationReport) {
    let mut generator = Generator::new(config).unwrap();
    let report = generator.generate_map();
    (generator, report)
}

fn seeded(width: i32, height: i32, seed: u64) -> GeneratorConfig {
    GeneratorConfig {
        seed: Some(seed),
        ..GeneratorConfig::with_size(width, height)
    }
}

/// Every open tile reachable from `start` over cardinal steps
fn flood(grid: &Grid, start: usize) -> BTreeSet<usize> {
    let mut seen = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(index) = queue.pop_front() {
        for dir in Direction::CARDINALS {
            if let Some(next) = grid.neighbor_index(index, dir, 1)
                && grid.tile(next).is_some_and(|t| !t.is_wall())
                && seen.insert(next)
            {
                queue.push_back(next);
            }
        }
    }
    seen
}

#[test]
fn test_minimal_five_by_five_map() {
    let config = GeneratorConfig {
        room_placement_retries: 0,
        keep_same_direction_percentage: 0,
        tiles_to_keep_percentage: 100,
        additional_connection_attempts: 0,
        seed: Some(7),
        ..GeneratorConfig::with_size(5, 5)
    };
    let (generator, report) = generate(config);

    for (x, y) in [(1, 1), (1, 3), (3, 1), (3, 3)] {
        assert_eq!(generator.get_tile(x, y).unwrap().kind(), TileKind::Floor);
    }
    for tile in generator.get_tiles() {
        if tile.x % 2 == 0 && tile.y % 2 == 0 {
            assert!(tile.is_wall(), "{tile}");
        }
        if tile.x == 0 || tile.y == 0 || tile.x == 4 || tile.y == 4 {
            assert!(tile.is_wall(), "edge {tile}");
        }
    }
    // Four cells joined by a spanning tree of three corridors
    assert_eq!(generator.grid().floor_count(), 7);
    assert_eq!(generator.get_regions().len(), 1);
    assert_eq!(report.maze_regions, 1);
    assert_eq!(report.dead_ends_removed, 0);
    assert!(report.is_fully_connected());
}

#[test]
fn test_out_of_bounds_queries() {
    for width in [3, 5, 21, 51] {
        let generator = Generator::new(seeded(width, 11, 1)).unwrap();
        assert!(generator.get_tile(-1, 0).is_none());
        assert!(generator.get_tile(width, 0).is_none());
        assert!(generator.get_tile(0, 11).is_none());
        assert!(generator.get_tile(width - 1, 10).is_some());
    }
}

#[test]
fn test_room_overlap_scenarios() {
    let square = RoomShape::Rectangular {
        width: 5,
        height: 5,
    };
    let a = Room::new(3, 3, square.clone());
    let same = Room::new(3, 3, square.clone());
    assert!(a.overlaps(&same));

    // One empty column between the rooms
    let apart = Room::new(9, 3, square.clone());
    assert!(!a.overlaps(&apart));
    assert!(!apart.overlaps(&a));

    // Sharing an edge is not overlapping
    let touching = Room::new(8, 3, square);
    assert!(!a.overlaps(&touching));
}

#[test]
fn test_even_dimensions_are_rejected() {
    assert_eq!(
        Generator::new(GeneratorConfig::with_size(50, 31)).unwrap_err(),
        ConfigError::EvenWidth(50)
    );
    assert_eq!(
        Generator::new(GeneratorConfig::with_size(51, 30)).unwrap_err(),
        ConfigError::EvenHeight(30)
    );
}

#[test]
fn test_default_map_is_one_region() {
    let (generator, report) = generate(seeded(51, 31, 2025));
    assert_eq!(report.final_regions, 1);
    assert_eq!(report.isolated_regions, 0);
    assert!(report.rooms_placed > 0);
    assert_eq!(
        report.merging_connections,
        report.rooms_placed + report.maze_regions - 1
    );

    let first = generator
        .get_tiles()
        .iter()
        .find(|t| !t.is_wall())
        .unwrap()
        .index();
    let open = generator.get_tiles().iter().filter(|t| !t.is_wall()).count();
    assert_eq!(flood(generator.grid(), first).len(), open);
}

#[test]
fn test_wall_iff_no_region() {
    let (generator, _) = generate(seeded(41, 27, 99));
    for tile in generator.get_tiles() {
        assert_eq!(tile.is_wall(), tile.region().is_none(), "{tile}");
    }
}

#[test]
fn test_queries_are_idempotent() {
    let (generator, _) = generate(seeded(31, 21, 5));
    for y in 0..21 {
        for x in 0..31 {
            let a = generator.get_tile(x, y).unwrap();
            let b = generator.get_tile(x, y).unwrap();
            assert_eq!(a.kind(), b.kind());
            assert_eq!(a.region(), b.region());
        }
    }
}

#[test]
fn test_random_floor_tile_is_floor() {
    let (mut generator, _) = generate(seeded(31, 21, 12));
    for _ in 0..50 {
        let tile = generator.random_floor_tile().unwrap();
        assert!(matches!(tile.kind(), TileKind::Floor | TileKind::RoomFloor));
    }
}

#[test]
fn test_random_floor_tile_on_blank_map() {
    let mut generator = Generator::new(seeded(9, 9, 1)).unwrap();
    assert!(generator.random_floor_tile().is_none());
}

#[test]
fn test_predefined_room_is_placed_first() {
    let config = GeneratorConfig {
        predefined_rooms: vec![PredefinedRoom {
            width: 7,
            height: 5,
            doorways: vec![(3, 0)],
        }],
        ..seeded(31, 21, 77)
    };
    let (generator, report) = generate(config);

    let first = &generator.get_rooms()[0];
    assert_eq!(first.bounding_rect().width, 7);
    assert_eq!(first.bounding_rect().height, 5);
    assert!(report.rooms_placed >= 1);
}

#[test]
fn test_display_draws_every_row() {
    let (generator, _) = generate(seeded(15, 9, 3));
    let drawn = generator.grid().to_string();
    let rows: Vec<&str> = drawn.lines().collect();
    assert_eq!(rows.len(), 9);
    assert!(rows.iter().all(|row| row.chars().count() == 15));
    assert!(rows[0].chars().all(|c| c == '#'));
    assert!(drawn.contains('.') || drawn.contains(','));
}

#[test]
fn test_same_seed_same_snapshot() {
    let (a, _) = generate(seeded(35, 25, 4242));
    let (b, _) = generate(seeded(35, 25, 4242));
    assert_eq!(a.snapshot(), b.snapshot());

    let (c, _) = generate(seeded(35, 25, 4243));
    assert_ne!(a.snapshot().tiles, c.snapshot().tiles);
}

#[test]
fn test_config_file_round_trip() {
    let path = std::env::temp_dir().join(format!("dg-core-config-{}.json", std::process::id()));
    let config = GeneratorConfig {
        tiles_to_keep_percentage: 80,
        ..seeded(21, 15, 8)
    };
    std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

    let loaded = GeneratorConfig::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, config);
}
