//! World-space layout emission
//!
//! Converts a finished grid into placement records for the renderer and
//! physics collaborators, plus the floor positions usable as spawn points.
//! The grid is centred on the world origin in the XZ plane.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::cell::{CellType, DIRECTIONS};
use super::grid::Grid;
use crate::consts::{
    BORDER_THICKNESS, FLOOR_THICKNESS, GROUND_THICKNESS, SPAWN_ELEVATION, WALL_THICKNESS,
};

/// What a placement record stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum PlacementKind {
    /// Ground plane under the whole grid
    Ground,
    /// Floor tile of an open cell
    Floor,
    /// Wall panel on the edge between an open cell and a closed one
    Wall,
    /// Static collider filling a closed cell
    Block,
    /// Outer wall framing the world
    Border,
}

/// One box to place in the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub kind: PlacementKind,
    /// Center in world space
    pub world_x: f32,
    pub world_z: f32,
    /// Footprint
    pub size_x: f32,
    pub size_z: f32,
    pub height: f32,
}

/// A point in world space (y is up)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPos {
    pub const ORIGIN: WorldPos = WorldPos {
        x: 0.0,
        y: SPAWN_ELEVATION,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Squared straight-line distance
    pub fn distance_squared(&self, other: &WorldPos) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }
}

/// World parameters used to place a grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    pub cell_size: f32,
    pub grid_size: f32,
    pub wall_height: f32,
}

impl LayoutParams {
    /// World coordinate of a cell center along one axis
    pub fn cell_to_world(&self, index: usize) -> f32 {
        index as f32 * self.cell_size - self.grid_size / 2.0 + self.cell_size / 2.0
    }

    /// Cell index containing a world coordinate, if it lies on the grid side
    /// of the origin-centred square
    pub fn world_to_cell(&self, coord: f32) -> Option<usize> {
        let offset = (coord + self.grid_size / 2.0) / self.cell_size;
        if !offset.is_finite() || offset < 0.0 {
            return None;
        }
        // Non-negative, so truncation is floor
        Some(offset as usize)
    }
}

/// Everything emitted for one grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub params: LayoutParams,
    pub placements: Vec<Placement>,
    /// Floor cell centers at spawn elevation, x outer, y inner
    pub spawn_positions: Vec<WorldPos>,
}

impl Layout {
    /// Records of one kind, in emission order
    pub fn of_kind(&self, kind: PlacementKind) -> impl Iterator<Item = &Placement> + '_ {
        self.placements.iter().filter(move |p| p.kind == kind)
    }

    pub fn count(&self, kind: PlacementKind) -> usize {
        self.of_kind(kind).count()
    }
}

/// Emit placements and spawn positions for a grid
///
/// Each open cell emits its own edge walls, so a wall between two open
/// cells that face the same closed cell is emitted by each of them; the
/// colliders tolerate the overlap and nothing here deduplicates.
pub fn emit_layout(grid: &Grid, params: &LayoutParams) -> Layout {
    let cell = params.cell_size;
    let half_cell = cell / 2.0;
    let mut placements = Vec::new();
    let mut spawn_positions = Vec::new();

    placements.push(Placement {
        kind: PlacementKind::Ground,
        world_x: 0.0,
        world_z: 0.0,
        size_x: params.grid_size,
        size_z: params.grid_size,
        height: GROUND_THICKNESS,
    });

    for x in 0..grid.width() {
        for y in 0..grid.height() {
            if grid.get(x, y) != CellType::Floor {
                continue;
            }
            let world_x = params.cell_to_world(x);
            let world_z = params.cell_to_world(y);

            placements.push(Placement {
                kind: PlacementKind::Floor,
                world_x,
                world_z,
                size_x: cell,
                size_z: cell,
                height: FLOOR_THICKNESS,
            });
            spawn_positions.push(WorldPos::new(world_x, SPAWN_ELEVATION, world_z));

            for &(dx, dy) in &DIRECTIONS {
                let open = grid
                    .offset(x, y, (dx, dy), 1)
                    .is_some_and(|(nx, ny)| grid.is_floor(nx, ny));
                if open {
                    continue;
                }
                // Panels along x-facing edges run the length of the cell in z
                let (size_x, size_z) = if dx != 0 {
                    (WALL_THICKNESS, cell)
                } else {
                    (cell, WALL_THICKNESS)
                };
                placements.push(Placement {
                    kind: PlacementKind::Wall,
                    world_x: world_x + dx as f32 * half_cell,
                    world_z: world_z + dy as f32 * half_cell,
                    size_x,
                    size_z,
                    height: params.wall_height,
                });
            }
        }
    }

    for x in 0..grid.width() {
        for y in 0..grid.height() {
            if grid.get(x, y) == CellType::Wall {
                placements.push(Placement {
                    kind: PlacementKind::Block,
                    world_x: params.cell_to_world(x),
                    world_z: params.cell_to_world(y),
                    size_x: cell,
                    size_z: cell,
                    height: params.wall_height,
                });
            }
        }
    }

    placements.extend(border_walls(params));

    Layout {
        params: *params,
        placements,
        spawn_positions,
    }
}

/// Four walls framing the world square, overlapping at the corners
fn border_walls(params: &LayoutParams) -> [Placement; 4] {
    let half = params.grid_size / 2.0;
    let w = BORDER_THICKNESS;
    let span = params.grid_size + w * 2.0;
    let wall = |world_x: f32, world_z: f32, size_x: f32, size_z: f32| Placement {
        kind: PlacementKind::Border,
        world_x,
        world_z,
        size_x,
        size_z,
        height: params.wall_height,
    };

    [
        wall(0.0, -half - w / 2.0, span, w),
        wall(0.0, half + w / 2.0, span, w),
        wall(half + w / 2.0, 0.0, w, span),
        wall(-half - w / 2.0, 0.0, w, span),
    ]
}
