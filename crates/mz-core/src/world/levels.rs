//! Level presets and progression
//!
//! A level preset pins the world size and, optionally, the seed. Loading a
//! level generates a fresh dungeon from the preset on top of the caller's
//! base options.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};

use super::errors::GenerationError;
use super::options::GeneratorOptions;
use crate::dungeon::{Dungeon, generate_dungeon};
use crate::rng::GameRng;

/// One entry of the level list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelPreset {
    pub name: String,
    /// Fixed seed; `None` uses the caller's fallback seed
    pub seed: Option<u64>,
    pub grid_size: f32,
    pub cell_size: f32,
}

impl LevelPreset {
    pub fn new(name: &str, seed: Option<u64>, grid_size: f32, cell_size: f32) -> Self {
        Self {
            name: name.to_string(),
            seed,
            grid_size,
            cell_size,
        }
    }

    /// Base options resized for this level
    pub fn options(&self, base: &GeneratorOptions) -> GeneratorOptions {
        let mut options = base.clone().with_world(self.grid_size, self.cell_size);
        if self.seed.is_some() {
            options.seed = self.seed;
        }
        options
    }
}

/// Ordered levels with a cursor on the current one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSequence {
    levels: Vec<LevelPreset>,
    current: usize,
}

impl Default for LevelSequence {
    fn default() -> Self {
        Self::new(vec![
            LevelPreset::new("Training Level", Some(12345), 60.0, 3.0),
            LevelPreset::new("Level 2", None, 80.0, 4.0),
        ])
    }
}

impl LevelSequence {
    pub fn new(levels: Vec<LevelPreset>) -> Self {
        Self { levels, current: 0 }
    }

    pub fn levels(&self) -> &[LevelPreset] {
        &self.levels
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&LevelPreset> {
        self.levels.get(self.current)
    }

    /// Generate a level and make it current
    ///
    /// Returns `Ok(None)` past the last level. The preset's seed wins over
    /// `base.seed`, which wins over `fallback_seed`.
    pub fn load(
        &mut self,
        index: usize,
        base: &GeneratorOptions,
        fallback_seed: u64,
    ) -> Result<Option<Dungeon>, GenerationError> {
        let Some(preset) = self.levels.get(index) else {
            log::info!("all {} levels completed", self.levels.len());
            return Ok(None);
        };

        let options = preset.options(base);
        let seed = options.seed.unwrap_or(fallback_seed);
        log::info!("loading {} (seed {})", preset.name, seed);

        let dungeon = generate_dungeon(&options, &mut GameRng::new(seed))?;
        self.current = index;
        Ok(Some(dungeon))
    }

    /// Load the level after the current one
    pub fn next_level(
        &mut self,
        base: &GeneratorOptions,
        fallback_seed: u64,
    ) -> Result<Option<Dungeon>, GenerationError> {
        self.load(self.current + 1, base, fallback_seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_presets() {
        let levels = LevelSequence::default();
        assert_eq!(levels.levels().len(), 2);
        assert_eq!(levels.levels()[0].name, "Training Level");
        assert_eq!(levels.levels()[0].seed, Some(12345));
        assert_eq!(levels.levels()[1].seed, None);
        assert_eq!(levels.current_index(), 0);
    }

    #[test]
    fn test_load_uses_preset_size() {
        let mut levels = LevelSequence::default();
        let dungeon = levels
            .load(0, &GeneratorOptions::default(), 1)
            .unwrap()
            .unwrap();
        assert_eq!(dungeon.grid.width(), 20);
        assert_eq!(dungeon.options.seed, Some(12345));

        let dungeon = levels.next_level(&GeneratorOptions::default(), 1).unwrap().unwrap();
        assert_eq!(dungeon.grid.width(), 20);
        assert_eq!(levels.current_index(), 1);
    }

    #[test]
    fn test_fixed_seed_repeats() {
        let mut levels = LevelSequence::default();
        let base = GeneratorOptions::default();
        let a = levels.load(0, &base, 1).unwrap().unwrap();
        let b = levels.load(0, &base, 999).unwrap().unwrap();
        assert_eq!(a.grid, b.grid);
    }

    #[test]
    fn test_past_the_end() {
        let mut levels = LevelSequence::default();
        let base = GeneratorOptions::default();
        levels.load(1, &base, 7).unwrap();
        assert!(levels.next_level(&base, 7).unwrap().is_none());
        assert_eq!(levels.current_index(), 1);
    }

    #[test]
    fn test_bad_preset_propagates() {
        let mut levels = LevelSequence::new(vec![LevelPreset::new("Broken", None, 2.0, 5.0)]);
        let err = levels.load(0, &GeneratorOptions::default(), 0).unwrap_err();
        assert!(matches!(err, GenerationError::Configuration(_)));
    }
}
