//! Dungeon generation
//!
//! Contains the grid model, room placement, maze growth, region
//! connection, dead-end pruning and world layout emission.

mod cell;
mod connect;
mod generation;
mod grid;
mod layout;
mod maze;
mod prune;
mod room;

pub use cell::{CellType, DIRECTIONS, RegionId};
pub use connect::{ConnectStats, Connector, RegionSets, connect_regions, find_connectors};
pub use generation::{Dungeon, GenerationStats, generate_dungeon};
pub use grid::Grid;
pub use layout::{Layout, LayoutParams, Placement, PlacementKind, WorldPos, emit_layout};
pub use maze::{grow_maze_from, grow_mazes};
pub use prune::{dead_ends, remove_dead_ends};
pub use room::{Room, RoomBounds, RoomParams, in_any_room, place_rooms};
