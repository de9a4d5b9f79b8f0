//! Episode bookkeeping for the exploration loop
//!
//! An episode is one generated dungeon plus the player's run through it.
//! The tracker counts visited floor cells, answers "did the player reach
//! the goal", and carries the cooldown flag that keeps a goal touch from
//! triggering more than one regeneration.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::consts::{COMPLETION_THRESHOLD, GOAL_RADIUS};
use crate::dungeon::{Dungeon, WorldPos};

/// Per-episode results, suitable for logging or export
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeSummary {
    pub episode: u32,
    pub steps: u64,
    pub visited_cells: usize,
    pub total_cells: usize,
    pub exploration_rate: f32,
}

/// Tracks progress through the current episode
#[derive(Debug, Clone, Default)]
pub struct EpisodeTracker {
    episode: u32,
    steps: u64,
    visited: HashSet<(usize, usize)>,
    total_cells: usize,
    cooldown: bool,
}

impl EpisodeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new episode on a freshly generated dungeon
    pub fn start_episode(&mut self, dungeon: &Dungeon) {
        self.episode += 1;
        self.steps = 0;
        self.visited.clear();
        self.total_cells = dungeon.layout.spawn_positions.len();
        self.cooldown = false;
        log::debug!(
            "episode {} started with {} floor cells",
            self.episode,
            self.total_cells
        );
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn record_step(&mut self) {
        self.steps += 1;
    }

    /// Mark the cell under a position as visited
    ///
    /// Returns true only the first time an open cell is entered.
    pub fn mark_visited(&mut self, dungeon: &Dungeon, pos: &WorldPos) -> bool {
        match dungeon.world_to_cell(pos) {
            Some((x, y)) if dungeon.grid.is_floor(x, y) => self.visited.insert((x, y)),
            _ => false,
        }
    }

    pub fn visited_cells(&self) -> usize {
        self.visited.len()
    }

    pub fn visited_fraction(&self) -> f32 {
        if self.total_cells == 0 {
            return 0.0;
        }
        self.visited.len() as f32 / self.total_cells as f32
    }

    /// Enough of the floor has been explored to end the episode
    pub fn is_complete(&self) -> bool {
        self.visited_fraction() >= COMPLETION_THRESHOLD
    }

    /// Check for a goal touch
    ///
    /// The first touch arms the cooldown and returns true; further touches
    /// are ignored until the next `start_episode`.
    pub fn check_goal(&mut self, player: &WorldPos, goal: &WorldPos) -> bool {
        if self.cooldown {
            return false;
        }
        if player.distance_squared(goal) < GOAL_RADIUS * GOAL_RADIUS {
            self.cooldown = true;
            log::info!("episode {}: goal reached", self.episode);
            return true;
        }
        false
    }

    pub fn is_cooling_down(&self) -> bool {
        self.cooldown
    }

    pub fn summary(&self) -> EpisodeSummary {
        EpisodeSummary {
            episode: self.episode,
            steps: self.steps,
            visited_cells: self.visited.len(),
            total_cells: self.total_cells,
            exploration_rate: self.visited_fraction(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameRng, GeneratorOptions, generate_dungeon};

    fn dungeon() -> Dungeon {
        generate_dungeon(&GeneratorOptions::default(), &mut GameRng::new(21)).unwrap()
    }

    #[test]
    fn test_start_resets_counters() {
        let dungeon = dungeon();
        let mut tracker = EpisodeTracker::new();
        tracker.start_episode(&dungeon);
        tracker.record_step();
        let first = dungeon.layout.spawn_positions[0];
        assert!(tracker.mark_visited(&dungeon, &first));

        tracker.start_episode(&dungeon);
        assert_eq!(tracker.episode(), 2);
        assert_eq!(tracker.visited_cells(), 0);
        assert_eq!(tracker.summary().steps, 0);
    }

    #[test]
    fn test_first_visit_only() {
        let dungeon = dungeon();
        let mut tracker = EpisodeTracker::new();
        tracker.start_episode(&dungeon);

        let pos = dungeon.layout.spawn_positions[0];
        assert!(tracker.mark_visited(&dungeon, &pos));
        assert!(!tracker.mark_visited(&dungeon, &pos));
        assert_eq!(tracker.visited_cells(), 1);
    }

    #[test]
    fn test_walls_and_off_grid_are_not_visits() {
        let dungeon = dungeon();
        let mut tracker = EpisodeTracker::new();
        tracker.start_episode(&dungeon);

        // The corner cell is always border wall
        let corner = dungeon.cell_to_world(0, 0, 1.0);
        assert!(!tracker.mark_visited(&dungeon, &corner));
        assert!(!tracker.mark_visited(&dungeon, &WorldPos::new(-1000.0, 1.0, 0.0)));
        assert_eq!(tracker.visited_cells(), 0);
    }

    #[test]
    fn test_completion() {
        let dungeon = dungeon();
        let mut tracker = EpisodeTracker::new();
        tracker.start_episode(&dungeon);
        assert!(!tracker.is_complete());

        for pos in &dungeon.layout.spawn_positions {
            tracker.mark_visited(&dungeon, pos);
        }
        assert!(tracker.is_complete());
        let summary = tracker.summary();
        assert_eq!(summary.visited_cells, summary.total_cells);
        assert_eq!(summary.exploration_rate, 1.0);
    }

    #[test]
    fn test_empty_tracker_fraction() {
        let tracker = EpisodeTracker::new();
        assert_eq!(tracker.visited_fraction(), 0.0);
        assert!(!tracker.is_complete());
    }

    #[test]
    fn test_goal_cooldown() {
        let dungeon = dungeon();
        let mut tracker = EpisodeTracker::new();
        tracker.start_episode(&dungeon);

        let goal = WorldPos::new(10.0, 1.5, 10.0);
        assert!(!tracker.check_goal(&WorldPos::new(10.0, 1.5, 12.5), &goal));
        assert!(tracker.check_goal(&WorldPos::new(10.0, 1.5, 11.0), &goal));
        assert!(tracker.is_cooling_down());
        assert!(!tracker.check_goal(&goal, &goal));

        tracker.start_episode(&dungeon);
        assert!(!tracker.is_cooling_down());
        assert!(tracker.check_goal(&goal, &goal));
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = EpisodeTracker::new().summary();
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"visitedCells\":0"));
        assert!(json.contains("\"explorationRate\":0.0"));
    }
}
