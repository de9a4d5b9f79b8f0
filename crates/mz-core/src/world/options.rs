//! Generator options and configuration loading
//!
//! Options are plain serde data with camelCase keys so the same JSON the
//! game front end uses can be fed to the generator unchanged. Every field
//! has a default; a config file only needs the keys it overrides.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};
#[cfg(feature = "std")]
use std::path::Path;

use super::errors::{GenerationError, OptionsError};
use crate::consts::*;

/// Everything one generation call needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorOptions {
    // World dimensions
    pub grid_size: f32,
    pub cell_size: f32,

    // Rooms
    pub num_room_tries: u32,
    pub max_rooms: u32,
    pub min_room_size: u32,
    pub max_room_size: u32,
    /// Reserved for room variety; the placer does not read it
    pub room_extra_size: u32,
    pub room_padding: u32,

    // Corridors
    pub extra_connector_chance: u32,
    pub winding_percent: u32,

    // Emitted geometry
    pub tunnel_height: f32,

    /// Fixed seed; callers fall back to their own seed when unset
    pub seed: Option<u64>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            cell_size: DEFAULT_CELL_SIZE,

            num_room_tries: DEFAULT_ROOM_TRIES,
            max_rooms: DEFAULT_MAX_ROOMS,
            min_room_size: DEFAULT_MIN_ROOM_SIZE,
            max_room_size: DEFAULT_MAX_ROOM_SIZE,
            room_extra_size: DEFAULT_ROOM_EXTRA_SIZE,
            room_padding: ROOM_PADDING,

            extra_connector_chance: DEFAULT_EXTRA_CONNECTOR_CHANCE,
            winding_percent: DEFAULT_WINDING_PERCENT,

            tunnel_height: DEFAULT_TUNNEL_HEIGHT,

            seed: None,
        }
    }
}

impl GeneratorOptions {
    /// Same options with a different world size
    pub fn with_world(mut self, grid_size: f32, cell_size: f32) -> Self {
        self.grid_size = grid_size;
        self.cell_size = cell_size;
        self
    }

    /// Same options pinned to a seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Grid width and height in cells: floor(grid_size / cell_size) per axis
    pub fn grid_dimensions(&self) -> Result<(usize, usize), GenerationError> {
        if !self.grid_size.is_finite() || self.grid_size <= 0.0 {
            return Err(GenerationError::config(format!(
                "grid size must be positive, got {}",
                self.grid_size
            )));
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(GenerationError::config(format!(
                "cell size must be positive, got {}",
                self.cell_size
            )));
        }

        // Both operands are positive so truncation is floor
        let cells = (self.grid_size / self.cell_size) as usize;
        if cells < 1 {
            return Err(GenerationError::config(format!(
                "grid size {} is smaller than cell size {}",
                self.grid_size, self.cell_size
            )));
        }
        Ok((cells, cells))
    }

    /// Check every option; the first problem found is returned
    pub fn validate(&self) -> Result<(), GenerationError> {
        self.grid_dimensions()?;

        if self.min_room_size == 0 {
            return Err(invalid("minRoomSize", "must be at least 1".to_string()));
        }
        if self.min_room_size > self.max_room_size {
            return Err(invalid(
                "minRoomSize",
                format!(
                    "{} is larger than maxRoomSize {}",
                    self.min_room_size, self.max_room_size
                ),
            ));
        }
        if self.extra_connector_chance > 100 {
            return Err(invalid(
                "extraConnectorChance",
                format!("{} is not a percentage", self.extra_connector_chance),
            ));
        }
        if self.winding_percent > 100 {
            return Err(invalid(
                "windingPercent",
                format!("{} is not a percentage", self.winding_percent),
            ));
        }
        if !self.tunnel_height.is_finite() || self.tunnel_height <= 0.0 {
            return Err(invalid(
                "tunnelHeight",
                format!("must be positive, got {}", self.tunnel_height),
            ));
        }
        Ok(())
    }

    #[cfg(feature = "std")]
    /// Parse options from a JSON string
    pub fn from_json(contents: &str) -> Result<Self, OptionsError> {
        serde_json::from_str(contents).map_err(|e| OptionsError::Parse(e.to_string()))
    }

    #[cfg(feature = "std")]
    /// Serialize options to pretty JSON
    pub fn to_json(&self) -> Result<String, OptionsError> {
        serde_json::to_string_pretty(self).map_err(|e| OptionsError::Parse(e.to_string()))
    }

    #[cfg(feature = "std")]
    /// Load options from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| OptionsError::Io(e.to_string()))?;

        Self::from_json(&contents)
    }

    #[cfg(feature = "std")]
    /// Save options to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), OptionsError> {
        let contents = self.to_json()?;
        std::fs::write(path, contents).map_err(|e| OptionsError::Io(e.to_string()))
    }
}

fn invalid(field: &'static str, reason: String) -> GenerationError {
    OptionsError::InvalidValue { field, reason }.into()
}
