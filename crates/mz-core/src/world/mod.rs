//! Configuration, level presets, and errors

mod errors;
mod levels;
mod options;

pub use errors::{GenerationError, OptionsError};
pub use levels::{LevelPreset, LevelSequence};
pub use options::GeneratorOptions;
