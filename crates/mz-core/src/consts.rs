//! Generation and world constants
//!
//! Defaults match the values the game ships with; world sizes are in the
//! renderer's units.

/// Default side length of the square world
pub const DEFAULT_GRID_SIZE: f32 = 80.0;
/// Default side length of one grid cell in world units
pub const DEFAULT_CELL_SIZE: f32 = 5.0;

/// Room placement defaults
pub const DEFAULT_ROOM_TRIES: u32 = 100;
pub const DEFAULT_MAX_ROOMS: u32 = 5;
pub const DEFAULT_MIN_ROOM_SIZE: u32 = 5;
pub const DEFAULT_MAX_ROOM_SIZE: u32 = 7;
pub const DEFAULT_ROOM_EXTRA_SIZE: u32 = 1;

/// Cells of clearance kept between rooms
pub const ROOM_PADDING: u32 = 2;

/// Percent chance to open a connector that isn't needed for connectivity
pub const DEFAULT_EXTRA_CONNECTOR_CHANCE: u32 = 10;
/// Percent chance a corridor turns when it could keep going straight
pub const DEFAULT_WINDING_PERCENT: u32 = 0;

/// Height of emitted walls
pub const DEFAULT_TUNNEL_HEIGHT: f32 = 10.0;

/// Emitted geometry thicknesses
pub const WALL_THICKNESS: f32 = 1.0;
pub const BORDER_THICKNESS: f32 = 2.0;
pub const FLOOR_THICKNESS: f32 = 0.1;
pub const GROUND_THICKNESS: f32 = 0.1;

/// Elevation of spawn candidates on corridor/floor cells
pub const SPAWN_ELEVATION: f32 = 1.0;
/// Elevation used when spawning inside a room
pub const ROOM_SPAWN_ELEVATION: f32 = 1.5;

/// Goal placement retries before keeping the best attempt
pub const MAX_GOAL_ATTEMPTS: u32 = 50;

/// Distance at which the player touches the goal
pub const GOAL_RADIUS: f32 = 2.0;
/// Fraction of floor cells visited that completes an episode
pub const COMPLETION_THRESHOLD: f32 = 0.95;
