//! Grid cell types

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Identifier of a region carved in one step (a room or one maze flood)
pub type RegionId = usize;

/// Cell/terrain type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum CellType {
    #[default]
    Wall = 0,
    Floor = 1,
}

impl CellType {
    /// Check if this is passable (can walk through)
    pub const fn is_passable(&self) -> bool {
        matches!(self, CellType::Floor)
    }

    /// Check if this is a wall
    pub const fn is_wall(&self) -> bool {
        matches!(self, CellType::Wall)
    }

    /// Get the display character for this cell type
    pub const fn symbol(&self) -> char {
        match self {
            CellType::Wall => '#',
            CellType::Floor => '.',
        }
    }
}

/// Orthogonal step directions, in the order every scan uses:
/// left, right, up, down.
pub const DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
