//! Cell grid with a parallel region map
//!
//! Cells are stored column-major (`cells[x][y]`). The outer ring of the
//! grid is never carved by the generator, so every finished grid is
//! enclosed by Wall.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use super::cell::{CellType, DIRECTIONS, RegionId};
use crate::world::{GenerationError, GeneratorOptions};

/// Wall/floor grid owned by one generation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<CellType>>,
    /// Region stamped when a cell was carved; `None` for walls and for
    /// cells opened as connectors
    regions: Vec<Vec<Option<RegionId>>>,
    /// Last region handed out by `start_region`
    current_region: Option<RegionId>,
}

impl Grid {
    /// Create a grid of all Wall with no regions
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![CellType::Wall; height]; width],
            regions: vec![vec![None; height]; width],
            current_region: None,
        }
    }

    /// Create a blank grid sized from world options
    ///
    /// Fails before allocating if the world is smaller than one cell.
    pub fn from_options(options: &GeneratorOptions) -> Result<Self, GenerationError> {
        let (width, height) = options.grid_dimensions()?;
        Ok(Self::new(width, height))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if signed coordinates fall inside the grid
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Check if a cell is inside the grid and off the border ring
    pub fn is_interior(&self, x: usize, y: usize) -> bool {
        x >= 1 && y >= 1 && x + 1 < self.width && y + 1 < self.height
    }

    /// Cell type; anything outside the grid reads as Wall
    pub fn get(&self, x: usize, y: usize) -> CellType {
        if x < self.width && y < self.height {
            self.cells[x][y]
        } else {
            CellType::Wall
        }
    }

    pub fn is_floor(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == CellType::Floor
    }

    /// Region stamped on a cell at carve time
    pub fn region_at(&self, x: usize, y: usize) -> Option<RegionId> {
        if x < self.width && y < self.height {
            self.regions[x][y]
        } else {
            None
        }
    }

    /// Start a new region and return its id (0 for the first region)
    pub fn start_region(&mut self) -> RegionId {
        let next = self.current_region.map_or(0, |r| r + 1);
        self.current_region = Some(next);
        next
    }

    /// Number of regions started so far
    pub fn region_count(&self) -> usize {
        self.current_region.map_or(0, |r| r + 1)
    }

    /// Open a cell and stamp it with a region
    ///
    /// Out-of-bounds coordinates are ignored; callers validate first.
    pub fn carve(&mut self, x: usize, y: usize, region: RegionId) {
        if x < self.width && y < self.height {
            self.cells[x][y] = CellType::Floor;
            self.regions[x][y] = Some(region);
        }
    }

    /// Open a cell without touching its region (connector doorways)
    pub fn fill(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.height {
            self.cells[x][y] = CellType::Floor;
        }
    }

    /// Close a cell again
    pub fn set_wall(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.height {
            self.cells[x][y] = CellType::Wall;
        }
    }

    /// Coordinates `steps` cells away in a direction, if still on the grid
    pub fn offset(&self, x: usize, y: usize, dir: (i32, i32), steps: i32) -> Option<(usize, usize)> {
        let nx = x as i32 + dir.0 * steps;
        let ny = y as i32 + dir.1 * steps;
        if self.in_bounds(nx, ny) {
            Some((nx as usize, ny as usize))
        } else {
            None
        }
    }

    /// Count orthogonal Floor neighbours; off-grid counts as Wall
    pub fn floor_neighbors(&self, x: usize, y: usize) -> usize {
        DIRECTIONS
            .iter()
            .filter_map(|&dir| self.offset(x, y, dir, 1))
            .filter(|&(nx, ny)| self.is_floor(nx, ny))
            .count()
    }

    /// All Floor cells, x outer, y inner
    pub fn floor_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.width)
            .flat_map(move |x| (0..self.height).map(move |y| (x, y)))
            .filter(move |&(x, y)| self.cells[x][y] == CellType::Floor)
    }

    pub fn floor_count(&self) -> usize {
        self.floor_cells().count()
    }

    /// Check that every border cell is Wall
    pub fn is_enclosed(&self) -> bool {
        if self.width == 0 || self.height == 0 {
            return true;
        }
        let (max_x, max_y) = (self.width - 1, self.height - 1);
        let columns = (0..self.width).all(|x| !self.is_floor(x, 0) && !self.is_floor(x, max_y));
        let rows = (0..self.height).all(|y| !self.is_floor(0, y) && !self.is_floor(max_x, y));
        columns && rows
    }

    /// Number of 4-connected Floor components (flood fill)
    pub fn floor_components(&self) -> usize {
        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        let mut components = 0;

        for start in self.floor_cells() {
            if !seen.insert(start) {
                continue;
            }
            components += 1;

            let mut stack = vec![start];
            while let Some((x, y)) = stack.pop() {
                for &dir in &DIRECTIONS {
                    if let Some(next) = self.offset(x, y, dir, 1)
                        && self.is_floor(next.0, next.1)
                        && seen.insert(next)
                    {
                        stack.push(next);
                    }
                }
            }
        }
        components
    }

    /// Every Floor cell reachable from every other
    pub fn is_fully_connected(&self) -> bool {
        self.floor_components() <= 1
    }

    /// Text dump, one line per row
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.cells[x][y].symbol());
            }
            out.push('\n');
        }
        out
    }
}
