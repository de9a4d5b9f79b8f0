//! Rooms and room placement
//!
//! Rooms are rejection-sampled onto the odd lattice with odd sizes, so a
//! room's edge cells line up with the maze corridors grown around it and a
//! single wall cell separates the two.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};

use super::cell::RegionId;
use super::grid::Grid;
use crate::rng::GameRng;

/// Inclusive cell bounds of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomBounds {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

/// An axis-aligned rectangular room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Left x coordinate
    pub x: usize,
    /// Top y coordinate
    pub y: usize,
    pub width: usize,
    pub height: usize,
    /// Region carved for this room
    pub region: RegionId,
}

impl Room {
    /// Create a new room
    pub fn new(x: usize, y: usize, width: usize, height: usize, region: RegionId) -> Self {
        Self {
            x,
            y,
            width,
            height,
            region,
        }
    }

    pub fn bounds(&self) -> RoomBounds {
        RoomBounds {
            left: self.x,
            top: self.y,
            right: self.x + self.width - 1,
            bottom: self.y + self.height - 1,
        }
    }

    /// Get the center cell of the room
    pub fn center(&self) -> (usize, usize) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if a cell is inside the room
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Check if this room comes within `padding` cells of another
    ///
    /// Inclusive bounds test with the other room grown by `padding` on
    /// every side.
    pub fn overlaps(&self, other: &Room, padding: usize) -> bool {
        let a = self.bounds();
        let b = other.bounds();
        a.left <= b.right + padding
            && a.right + padding >= b.left
            && a.top <= b.bottom + padding
            && a.bottom + padding >= b.top
    }

    /// Number of cells in the room
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// Room placement parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomParams {
    pub tries: u32,
    pub max_rooms: u32,
    pub min_size: u32,
    pub max_size: u32,
    pub padding: u32,
}

/// Try to place rooms into a blank grid
///
/// Each accepted room gets its own region and is carved immediately.
/// Rejected candidates are simply dropped; the loop moves on to the next
/// try rather than retrying the same slot.
pub fn place_rooms(grid: &mut Grid, params: &RoomParams, rng: &mut GameRng) -> Vec<Room> {
    let grid_width = grid.width();
    let grid_height = grid.height();
    let mut rooms: Vec<Room> = Vec::new();

    for _ in 0..params.tries {
        if rooms.len() >= params.max_rooms as usize {
            break;
        }

        let mut size = rng.rn2(params.max_size.saturating_sub(params.min_size) + 1) + params.min_size;
        if size % 2 == 0 {
            size += 1;
        }

        // Even bonus stretches one axis; parity is restored below
        let rectangularity = rng.rn2(1 + size / 2) * 2;
        let mut width = size as usize;
        let mut height = size as usize;
        if rng.rn2(2) == 0 {
            width += rectangularity as usize;
        } else {
            height += rectangularity as usize;
        }
        if width % 2 == 0 {
            width += 1;
        }
        if height % 2 == 0 {
            height += 1;
        }

        let x = rng.rn2((grid_width.saturating_sub(width) / 2) as u32) as usize * 2 + 1;
        let y = rng.rn2((grid_height.saturating_sub(height) / 2) as u32) as usize * 2 + 1;

        // Keep at least one wall between the room and the border
        if x + width + 1 >= grid_width || y + height + 1 >= grid_height {
            continue;
        }

        let candidate = Room::new(x, y, width, height, 0);
        if rooms
            .iter()
            .any(|other| candidate.overlaps(other, params.padding as usize))
        {
            continue;
        }

        let region = grid.start_region();
        for cx in x..x + width {
            for cy in y..y + height {
                grid.carve(cx, cy, region);
            }
        }
        rooms.push(Room { region, ..candidate });
    }

    log::debug!(
        "placed {} of {} rooms in {} tries",
        rooms.len(),
        params.max_rooms,
        params.tries
    );
    rooms
}

/// Check if a cell lies in any room
pub fn in_any_room(rooms: &[Room], x: usize, y: usize) -> bool {
    rooms.iter().any(|room| room.contains(x, y))
}
