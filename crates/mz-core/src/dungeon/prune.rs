//! Dead-end removal
//!
//! Maze growth is space filling, so the connected grid is full of stubs.
//! Pruning walls up corridor cells with a single exit until none are left,
//! leaving rooms and the corridors that actually lead somewhere.

use super::grid::Grid;
use super::room::{Room, in_any_room};

/// Remove dead ends until a full pass changes nothing
///
/// Room cells are never removed, even with a single exit. Returns the
/// number of cells walled up.
pub fn remove_dead_ends(grid: &mut Grid, rooms: &[Room]) -> usize {
    let mut removed = 0;
    let mut passes = 0;
    let mut changed = true;

    while changed {
        changed = false;
        passes += 1;

        for x in 1..grid.width().saturating_sub(1) {
            for y in 1..grid.height().saturating_sub(1) {
                if !grid.is_floor(x, y) || in_any_room(rooms, x, y) {
                    continue;
                }
                if grid.floor_neighbors(x, y) == 1 {
                    grid.set_wall(x, y);
                    removed += 1;
                    changed = true;
                }
            }
        }
    }

    log::debug!("pruned {} dead-end cells in {} passes", removed, passes);
    removed
}

/// Non-room floor cells with exactly one exit
pub fn dead_ends(grid: &Grid, rooms: &[Room]) -> usize {
    grid.floor_cells()
        .filter(|&(x, y)| !in_any_room(rooms, x, y) && grid.floor_neighbors(x, y) == 1)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameRng;
    use crate::dungeon::maze::grow_mazes;

    #[test]
    fn test_stub_corridor_is_removed() {
        // Room at x=1..3 with a corridor stub running right
        let mut grid = Grid::new(9, 5);
        let room = Room::new(1, 1, 3, 3, grid.start_region());
        for x in 1..4 {
            for y in 1..4 {
                grid.carve(x, y, room.region);
            }
        }
        let corridor = grid.start_region();
        for x in 4..8 {
            grid.carve(x, 2, corridor);
        }

        let removed = remove_dead_ends(&mut grid, &[room]);
        assert_eq!(removed, 4);
        assert_eq!(grid.floor_count(), 9);
        assert_eq!(dead_ends(&grid, &[room]), 0);
    }

    #[test]
    fn test_room_cells_are_exempt() {
        // A one-cell room hanging off a corridor loop keeps its cell
        let mut grid = Grid::new(7, 7);
        let corridor = grid.start_region();
        for i in 1..6 {
            grid.carve(i, 1, corridor);
            grid.carve(i, 5, corridor);
            grid.carve(1, i, corridor);
            grid.carve(5, i, corridor);
        }
        let room = Room::new(3, 3, 1, 1, grid.start_region());
        grid.carve(3, 3, room.region);
        grid.fill(3, 2);

        remove_dead_ends(&mut grid, &[room]);
        assert!(grid.is_floor(3, 3));
        // The doorway leads to the room so it has two exits and stays
        assert!(grid.is_floor(3, 2));
        assert_eq!(grid.floor_count(), 16 + 2);
    }

    #[test]
    fn test_pure_maze_collapses_to_single_cell() {
        let mut rng = GameRng::new(17);
        let mut grid = Grid::new(13, 13);
        grow_mazes(&mut grid, 50, &mut rng);
        remove_dead_ends(&mut grid, &[]);
        assert_eq!(grid.floor_count(), 1);
    }

    #[test]
    fn test_loops_survive() {
        let mut grid = Grid::new(5, 5);
        for i in 1..4 {
            grid.carve(i, 1, 0);
            grid.carve(i, 3, 0);
            grid.carve(1, i, 0);
            grid.carve(3, i, 0);
        }
        assert_eq!(remove_dead_ends(&mut grid, &[]), 0);
        assert_eq!(grid.floor_count(), 8);
    }
}
