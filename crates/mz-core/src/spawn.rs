//! Player and goal placement
//!
//! With two or more rooms the player starts in the middle of one room and
//! the goal sits somewhere in a different room. Thin layouts fall back to
//! random room or floor positions with a minimum separation, retried a
//! bounded number of times.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_GOAL_ATTEMPTS, ROOM_SPAWN_ELEVATION};
use crate::dungeon::{Dungeon, WorldPos};
use crate::rng::GameRng;

/// Where an episode starts and ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPlan {
    pub player: WorldPos,
    pub goal: WorldPos,
    /// Room indices when the distinct-room placement was used
    pub player_room: Option<usize>,
    pub goal_room: Option<usize>,
    /// False when the fallback never reached the minimum separation
    pub separation_satisfied: bool,
}

/// Minimum player-goal distance for fallback placement
pub fn min_separation(dungeon: &Dungeon) -> f32 {
    dungeon.options.grid_size / 4.0
}

/// Pick player and goal positions for a dungeon
pub fn plan_spawns(dungeon: &Dungeon, rng: &mut GameRng) -> SpawnPlan {
    if dungeon.has_distinct_rooms() {
        plan_in_rooms(dungeon, rng)
    } else {
        plan_fallback(dungeon, rng)
    }
}

fn plan_in_rooms(dungeon: &Dungeon, rng: &mut GameRng) -> SpawnPlan {
    let mut indices: Vec<usize> = (0..dungeon.rooms.len()).collect();
    let player_room = indices.remove(rng.index(indices.len()));
    let goal_room = indices[rng.index(indices.len())];

    let (cx, cy) = dungeon.rooms[player_room].center();
    let player = dungeon.cell_to_world(cx, cy, ROOM_SPAWN_ELEVATION);
    let goal = dungeon.random_position_in(&dungeon.rooms[goal_room], rng);

    SpawnPlan {
        player,
        goal,
        player_room: Some(player_room),
        goal_room: Some(goal_room),
        separation_satisfied: true,
    }
}

fn plan_fallback(dungeon: &Dungeon, rng: &mut GameRng) -> SpawnPlan {
    let player = dungeon.random_room_position(rng);
    let min_distance = min_separation(dungeon);
    let min_squared = min_distance * min_distance;

    let mut best = dungeon.random_room_position(rng);
    let mut best_squared = best.distance_squared(&player);
    let mut attempts = 1;
    while best_squared < min_squared && attempts < MAX_GOAL_ATTEMPTS {
        let candidate = dungeon.random_room_position(rng);
        let squared = candidate.distance_squared(&player);
        if squared > best_squared {
            best = candidate;
            best_squared = squared;
        }
        attempts += 1;
    }

    let separation_satisfied = best_squared >= min_squared;
    if !separation_satisfied {
        log::warn!(
            "no goal at least {} from the player after {} attempts; keeping the farthest",
            min_distance,
            attempts
        );
    }

    SpawnPlan {
        player,
        goal: best,
        player_room: None,
        goal_room: None,
        separation_satisfied,
    }
}
