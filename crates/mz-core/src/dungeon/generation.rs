//! Dungeon generation pipeline
//!
//! One call builds one dungeon from scratch:
//! blank grid -> rooms -> maze floods -> connectors -> dead-end pruning ->
//! world layout. Nothing is shared between calls; regenerating means
//! calling again and dropping the previous `Dungeon`.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};

use super::connect::{ConnectStats, connect_regions};
use super::grid::Grid;
use super::layout::{Layout, LayoutParams, WorldPos, emit_layout};
use super::maze::grow_mazes;
use super::prune::remove_dead_ends;
use super::room::{Room, RoomParams, place_rooms};
use crate::consts::ROOM_SPAWN_ELEVATION;
use crate::rng::GameRng;
use crate::world::{GenerationError, GeneratorOptions};

/// Counters gathered while generating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub rooms: usize,
    pub maze_floods: usize,
    pub regions: usize,
    pub connect: ConnectStats,
    pub dead_ends_removed: usize,
    pub floor_cells: usize,
}

/// A generated dungeon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dungeon {
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub layout: Layout,
    pub stats: GenerationStats,
    pub options: GeneratorOptions,
}

impl Dungeon {
    /// At least two rooms, so player and goal can start in different rooms
    pub fn has_distinct_rooms(&self) -> bool {
        self.rooms.len() >= 2
    }

    /// World position of a cell center at the given elevation
    pub fn cell_to_world(&self, x: usize, y: usize, elevation: f32) -> WorldPos {
        let params = &self.layout.params;
        WorldPos::new(params.cell_to_world(x), elevation, params.cell_to_world(y))
    }

    /// Grid cell under a world position, if it is on the grid
    pub fn world_to_cell(&self, pos: &WorldPos) -> Option<(usize, usize)> {
        let params = &self.layout.params;
        let x = params.world_to_cell(pos.x)?;
        let y = params.world_to_cell(pos.z)?;
        if x < self.grid.width() && y < self.grid.height() {
            Some((x, y))
        } else {
            None
        }
    }

    /// A random floor position; the origin when the grid has no floor
    pub fn random_spawn_position(&self, rng: &mut GameRng) -> WorldPos {
        rng.choose(&self.layout.spawn_positions)
            .copied()
            .unwrap_or(WorldPos::ORIGIN)
    }

    /// A random cell of a random room, falling back to any floor position
    pub fn random_room_position(&self, rng: &mut GameRng) -> WorldPos {
        match rng.choose(&self.rooms) {
            Some(room) => self.random_position_in(room, rng),
            None => self.random_spawn_position(rng),
        }
    }

    /// A random cell of a given room
    pub fn random_position_in(&self, room: &Room, rng: &mut GameRng) -> WorldPos {
        let x = room.x + rng.index(room.width);
        let y = room.y + rng.index(room.height);
        self.cell_to_world(x, y, ROOM_SPAWN_ELEVATION)
    }
}

/// Generation session: owns the grid and rooms for a single call
struct Generator<'a> {
    options: &'a GeneratorOptions,
    rng: &'a mut GameRng,
    grid: Grid,
    rooms: Vec<Room>,
    stats: GenerationStats,
}

impl<'a> Generator<'a> {
    fn new(options: &'a GeneratorOptions, rng: &'a mut GameRng) -> Result<Self, GenerationError> {
        options.validate()?;
        let grid = Grid::from_options(options)?;
        Ok(Self {
            options,
            rng,
            grid,
            rooms: Vec::new(),
            stats: GenerationStats::default(),
        })
    }

    fn add_rooms(&mut self) {
        let params = RoomParams {
            tries: self.options.num_room_tries,
            max_rooms: self.options.max_rooms,
            min_size: self.options.min_room_size,
            max_size: self.options.max_room_size,
            padding: self.options.room_padding,
        };
        self.rooms = place_rooms(&mut self.grid, &params, self.rng);
        self.stats.rooms = self.rooms.len();
    }

    fn grow_mazes(&mut self) {
        self.stats.maze_floods = grow_mazes(&mut self.grid, self.options.winding_percent, self.rng);
        self.stats.regions = self.grid.region_count();
    }

    fn connect_regions(&mut self) {
        self.stats.connect =
            connect_regions(&mut self.grid, self.options.extra_connector_chance, self.rng);
    }

    fn remove_dead_ends(&mut self) {
        self.stats.dead_ends_removed = remove_dead_ends(&mut self.grid, &self.rooms);
        self.stats.floor_cells = self.grid.floor_count();
    }

    fn build(self) -> Dungeon {
        let params = LayoutParams {
            cell_size: self.options.cell_size,
            grid_size: self.options.grid_size,
            wall_height: self.options.tunnel_height,
        };
        let layout = emit_layout(&self.grid, &params);
        Dungeon {
            grid: self.grid,
            rooms: self.rooms,
            layout,
            stats: self.stats,
            options: self.options.clone(),
        }
    }
}

/// Generate a dungeon
///
/// Configuration errors are returned before anything is allocated. All
/// randomness comes from `rng`, so the same options and seed always give
/// the same dungeon.
pub fn generate_dungeon(
    options: &GeneratorOptions,
    rng: &mut GameRng,
) -> Result<Dungeon, GenerationError> {
    let mut generator = Generator::new(options, rng)?;

    generator.add_rooms();
    generator.grow_mazes();
    generator.connect_regions();
    generator.remove_dead_ends();

    if !generator.grid.is_fully_connected() {
        log::warn!(
            "generated grid has {} floor components",
            generator.grid.floor_components()
        );
    }
    let dungeon = generator.build();

    if !dungeon.has_distinct_rooms() {
        log::warn!(
            "only {} room(s) placed in {} tries; spawns will fall back to open floor",
            dungeon.rooms.len(),
            options.num_room_tries
        );
    }
    log::info!(
        "generated {}x{} dungeon with {} rooms, {} regions, {} floor cells",
        dungeon.grid.width(),
        dungeon.grid.height(),
        dungeon.stats.rooms,
        dungeon.stats.regions,
        dungeon.stats.floor_cells
    );
    Ok(dungeon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::layout::PlacementKind;
    use crate::dungeon::prune::dead_ends;

    #[test]
    fn test_default_scenario() {
        let options = GeneratorOptions::default();
        for seed in 0..20 {
            let mut rng = GameRng::new(seed);
            let dungeon = generate_dungeon(&options, &mut rng).unwrap();

            assert_eq!((dungeon.grid.width(), dungeon.grid.height()), (16, 16));
            assert!((1..=5).contains(&dungeon.rooms.len()), "seed {seed}");
            assert!(dungeon.grid.is_enclosed());
            assert!(dungeon.grid.is_fully_connected());
            assert_eq!(dead_ends(&dungeon.grid, &dungeon.rooms), 0);
        }
    }

    #[test]
    fn test_configuration_error_is_fatal() {
        let options = GeneratorOptions::default().with_world(4.0, 5.0);
        let mut rng = GameRng::new(1);
        let err = generate_dungeon(&options, &mut rng).unwrap_err();
        assert!(matches!(err, GenerationError::Configuration(_)));
    }

    #[test]
    fn test_same_seed_same_dungeon() {
        let options = GeneratorOptions::default().with_world(180.0, 6.0);
        let a = generate_dungeon(&options, &mut GameRng::new(2024)).unwrap();
        let b = generate_dungeon(&options, &mut GameRng::new(2024)).unwrap();
        assert_eq!(a, b);

        let c = generate_dungeon(&options, &mut GameRng::new(2025)).unwrap();
        assert_ne!(a.grid, c.grid);
    }

    #[test]
    fn test_stats_match_grid() {
        let options = GeneratorOptions::default();
        let dungeon = generate_dungeon(&options, &mut GameRng::new(8)).unwrap();
        let stats = dungeon.stats;
        assert_eq!(stats.rooms, dungeon.rooms.len());
        assert_eq!(stats.regions, stats.rooms + stats.maze_floods);
        assert_eq!(stats.floor_cells, dungeon.grid.floor_count());
        assert_eq!(
            dungeon.layout.count(PlacementKind::Floor),
            dungeon.layout.spawn_positions.len()
        );
        assert_eq!(stats.floor_cells, dungeon.layout.spawn_positions.len());
    }

    #[test]
    fn test_cell_world_roundtrip() {
        let options = GeneratorOptions::default();
        let dungeon = generate_dungeon(&options, &mut GameRng::new(3)).unwrap();
        for (x, y) in dungeon.grid.floor_cells() {
            let pos = dungeon.cell_to_world(x, y, 1.0);
            assert_eq!(dungeon.world_to_cell(&pos), Some((x, y)));
        }
        assert_eq!(dungeon.world_to_cell(&WorldPos::new(500.0, 1.0, 0.0)), None);
    }

    #[test]
    fn test_room_positions_land_in_rooms() {
        let options = GeneratorOptions::default();
        let dungeon = generate_dungeon(&options, &mut GameRng::new(12)).unwrap();
        let mut rng = GameRng::new(0);
        for _ in 0..100 {
            let pos = dungeon.random_room_position(&mut rng);
            assert_eq!(pos.y, ROOM_SPAWN_ELEVATION);
            let (x, y) = dungeon.world_to_cell(&pos).unwrap();
            assert!(dungeon.rooms.iter().any(|r| r.contains(x, y)));
        }
    }
}
