//! Maze corridor growth
//!
//! Fills the space left between rooms with one-cell-wide corridors using a
//! randomized depth-first backtracker on the odd lattice. Every flood gets
//! its own region so the connector pass can join floods and rooms later.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use super::cell::{CellType, DIRECTIONS};
use super::grid::Grid;
use crate::rng::GameRng;

/// Seed a maze at every odd interior lattice point that is still Wall
///
/// Returns the number of floods started.
pub fn grow_mazes(grid: &mut Grid, winding_percent: u32, rng: &mut GameRng) -> usize {
    let mut floods = 0;
    for y in (1..grid.height().saturating_sub(1)).step_by(2) {
        for x in (1..grid.width().saturating_sub(1)).step_by(2) {
            if grid.get(x, y) == CellType::Wall {
                grow_maze_from(grid, x, y, winding_percent, rng);
                floods += 1;
            }
        }
    }
    log::debug!("grew {} maze floods", floods);
    floods
}

/// Check if a corridor can be extended two cells in a direction
///
/// The destination must be an interior cell that is still Wall; the two
/// cell stride keeps a wall between parallel corridors.
fn can_carve(grid: &Grid, x: usize, y: usize, dir: usize) -> bool {
    match grid.offset(x, y, DIRECTIONS[dir], 2) {
        Some((nx, ny)) => grid.is_interior(nx, ny) && grid.get(nx, ny) == CellType::Wall,
        None => false,
    }
}

/// Grow one maze flood from a lattice point
///
/// With probability `100 - winding_percent` the corridor keeps its previous
/// heading when that is still open, so low values give long straight runs.
pub fn grow_maze_from(
    grid: &mut Grid,
    start_x: usize,
    start_y: usize,
    winding_percent: u32,
    rng: &mut GameRng,
) {
    let region = grid.start_region();
    grid.carve(start_x, start_y, region);

    let mut stack = vec![(start_x, start_y)];
    let mut last_dir: Option<usize> = None;

    while let Some(&(x, y)) = stack.last() {
        let mut open_dirs = [0usize; 4];
        let mut count = 0;
        for dir in 0..DIRECTIONS.len() {
            if can_carve(grid, x, y, dir) {
                open_dirs[count] = dir;
                count += 1;
            }
        }
        let open_dirs = &open_dirs[..count];

        if open_dirs.is_empty() {
            stack.pop();
            last_dir = None;
            continue;
        }

        let dir = match last_dir {
            Some(last) if open_dirs.contains(&last) && rng.rn2(100) >= winding_percent => last,
            _ => open_dirs[rng.index(open_dirs.len())],
        };

        let (dx, dy) = DIRECTIONS[dir];
        let mid = ((x as i32 + dx) as usize, (y as i32 + dy) as usize);
        let next = ((x as i32 + 2 * dx) as usize, (y as i32 + 2 * dy) as usize);
        grid.carve(mid.0, mid.1, region);
        grid.carve(next.0, next.1, region);

        stack.push(next);
        last_dir = Some(dir);
    }
}
