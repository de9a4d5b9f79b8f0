//! Region connection (doorways between rooms and maze floods)
//!
//! After rooms and mazes are carved the grid is a set of disjoint regions
//! separated by single wall cells. The connector pass:
//! 1. Finds every wall cell that touches two or more regions
//! 2. Shuffles them and opens one per union-find merge until all regions
//!    share a root (a spanning tree over regions)
//! 3. Opens each remaining connector with a small extra chance, adding loops

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};

use super::cell::{CellType, DIRECTIONS, RegionId};
use super::grid::Grid;
use crate::rng::GameRng;

/// Disjoint sets over region ids
///
/// Array-backed parent map with path compression. Union is a direct parent
/// assignment; region counts are small enough that ranks don't matter.
#[derive(Debug, Clone)]
pub struct RegionSets {
    parent: Vec<RegionId>,
}

impl RegionSets {
    /// Create a set per region
    pub fn new(num_regions: usize) -> Self {
        Self {
            parent: (0..num_regions).collect(),
        }
    }

    /// Root of a region's set, compressing the path on the way
    pub fn find(&mut self, region: RegionId) -> RegionId {
        let mut root = region;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = region;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge two sets; returns false if they were already one
    pub fn union(&mut self, a: RegionId, b: RegionId) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        self.parent[root_b] = root_a;
        true
    }

    /// Check if two regions are connected
    pub fn are_connected(&mut self, a: RegionId, b: RegionId) -> bool {
        self.find(a) == self.find(b)
    }

    /// Number of distinct sets
    pub fn set_count(&mut self) -> usize {
        (0..self.parent.len()).filter(|&r| self.find(r) == r).count()
    }
}

/// A wall cell bordering two or more regions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    pub x: usize,
    pub y: usize,
    /// Distinct neighbouring regions in left, right, up, down order
    pub regions: Vec<RegionId>,
}

/// What the connector pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectStats {
    /// Connectors discovered
    pub connectors: usize,
    /// Connectors opened to merge two regions
    pub primary: usize,
    /// Connectors opened by the extra chance
    pub extra: usize,
}

/// Collect every interior wall cell touching at least two regions
pub fn find_connectors(grid: &Grid) -> Vec<Connector> {
    let mut connectors = Vec::new();

    for x in 1..grid.width().saturating_sub(1) {
        for y in 1..grid.height().saturating_sub(1) {
            if grid.get(x, y) != CellType::Wall {
                continue;
            }

            let mut regions: Vec<RegionId> = Vec::with_capacity(4);
            for &dir in &DIRECTIONS {
                if let Some((nx, ny)) = grid.offset(x, y, dir, 1)
                    && let Some(region) = grid.region_at(nx, ny)
                    && !regions.contains(&region)
                {
                    regions.push(region);
                }
            }

            if regions.len() >= 2 {
                connectors.push(Connector { x, y, regions });
            }
        }
    }
    connectors
}

/// Join all regions into one connected structure
///
/// A connector touching three or more regions only merges its first two;
/// the others are joined through other connectors.
pub fn connect_regions(
    grid: &mut Grid,
    extra_connector_chance: u32,
    rng: &mut GameRng,
) -> ConnectStats {
    let mut connectors = find_connectors(grid);
    if connectors.is_empty() {
        if grid.region_count() > 1 {
            log::warn!("no connectors between {} regions", grid.region_count());
        } else {
            log::debug!("no connectors found, grid already connected");
        }
        return ConnectStats::default();
    }

    let mut stats = ConnectStats {
        connectors: connectors.len(),
        ..Default::default()
    };

    let mut sets = RegionSets::new(grid.region_count());
    rng.shuffle(&mut connectors);

    let mut opened = vec![false; connectors.len()];
    for (i, connector) in connectors.iter().enumerate() {
        if sets.union(connector.regions[0], connector.regions[1]) {
            grid.fill(connector.x, connector.y);
            opened[i] = true;
            stats.primary += 1;
        }
    }

    for (i, connector) in connectors.iter().enumerate() {
        if opened[i] {
            continue;
        }
        if rng.percent(extra_connector_chance) {
            grid.fill(connector.x, connector.y);
            stats.extra += 1;
        }
    }

    log::debug!(
        "opened {} primary and {} extra of {} connectors ({} regions)",
        stats.primary,
        stats.extra,
        stats.connectors,
        grid.region_count()
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::maze::grow_mazes;
    use crate::dungeon::room::{RoomParams, place_rooms};

    fn rooms_and_mazes(seed: u64, size: usize) -> (Grid, GameRng) {
        let mut rng = GameRng::new(seed);
        let mut grid = Grid::new(size, size);
        place_rooms(
            &mut grid,
            &RoomParams {
                tries: 100,
                max_rooms: 5,
                min_size: 3,
                max_size: 7,
                padding: 2,
            },
            &mut rng,
        );
        grow_mazes(&mut grid, 40, &mut rng);
        (grid, rng)
    }

    #[test]
    fn test_union_find_basics() {
        let mut sets = RegionSets::new(5);
        assert_eq!(sets.set_count(), 5);
        assert!(sets.union(0, 1));
        assert!(sets.union(3, 4));
        assert!(!sets.union(1, 0));
        assert!(sets.are_connected(0, 1));
        assert!(!sets.are_connected(1, 3));
        assert!(sets.union(1, 4));
        assert!(sets.are_connected(0, 3));
        assert_eq!(sets.set_count(), 2);
    }

    #[test]
    fn test_find_compresses_path() {
        let mut sets = RegionSets::new(4);
        sets.union(2, 3);
        sets.union(1, 2);
        sets.union(0, 1);
        let root = sets.find(3);
        assert_eq!(root, 0);
        assert_eq!(sets.parent[3], 0);
    }

    #[test]
    fn test_connector_between_two_regions() {
        let mut grid = Grid::new(5, 3);
        let a = grid.start_region();
        let b = grid.start_region();
        grid.carve(1, 1, a);
        grid.carve(3, 1, b);

        let connectors = find_connectors(&grid);
        assert_eq!(
            connectors,
            vec![Connector {
                x: 2,
                y: 1,
                regions: vec![a, b]
            }]
        );
    }

    #[test]
    fn test_connector_region_order_is_left_right_up_down() {
        let mut grid = Grid::new(5, 5);
        let r0 = grid.start_region();
        let r1 = grid.start_region();
        let r2 = grid.start_region();
        grid.carve(2, 1, r0); // up
        grid.carve(3, 2, r1); // right
        grid.carve(1, 2, r2); // left

        let connectors = find_connectors(&grid);
        let center = connectors
            .iter()
            .find(|c| (c.x, c.y) == (2, 2))
            .expect("center connector");
        assert_eq!(center.regions, vec![r2, r1, r0]);
    }

    #[test]
    fn test_same_region_is_not_a_connector() {
        let mut grid = Grid::new(5, 3);
        let a = grid.start_region();
        grid.carve(1, 1, a);
        grid.carve(3, 1, a);
        assert!(find_connectors(&grid).is_empty());
    }

    #[test]
    fn test_no_connectors_is_not_an_error() {
        let mut rng = GameRng::new(0);
        let mut grid = Grid::new(7, 7);
        grow_mazes(&mut grid, 0, &mut rng);
        let before = grid.clone();
        let stats = connect_regions(&mut grid, 100, &mut rng);
        assert_eq!(stats, ConnectStats::default());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_connects_everything() {
        for seed in 0..30 {
            let (mut grid, mut rng) = rooms_and_mazes(seed, 31);
            connect_regions(&mut grid, 10, &mut rng);
            assert!(grid.is_fully_connected(), "seed {seed} left islands");
            assert!(grid.is_enclosed());
        }
    }

    #[test]
    fn test_zero_extra_chance_is_spanning_tree() {
        for seed in 0..30 {
            let (mut grid, mut rng) = rooms_and_mazes(seed, 31);
            let regions = grid.region_count();
            let stats = connect_regions(&mut grid, 0, &mut rng);
            assert_eq!(stats.primary, regions - 1, "seed {seed}");
            assert_eq!(stats.extra, 0);
        }
    }

    #[test]
    fn test_full_extra_chance_opens_every_connector() {
        let (mut grid, mut rng) = rooms_and_mazes(7, 31);
        let connectors = find_connectors(&grid);
        let stats = connect_regions(&mut grid, 100, &mut rng);

        assert_eq!(stats.connectors, connectors.len());
        assert_eq!(stats.primary + stats.extra, connectors.len());
        for connector in &connectors {
            assert!(grid.is_floor(connector.x, connector.y));
        }
    }
}
