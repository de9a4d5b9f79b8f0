//! mz-core: procedural room-and-maze dungeon generation
//!
//! This crate contains the generation pipeline (rooms, maze corridors,
//! region connection, dead-end pruning, world-space layout) plus the small
//! pieces of game logic that consume it (spawn planning, level presets,
//! episode bookkeeping). It performs no rendering and no physics; callers
//! push the emitted layout to those collaborators themselves.
//!
//! Supports `no_std` environments by disabling the default `std` feature.
//! Config file loading is gated behind `cfg(feature = "std")`.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

/// Re-exports of alloc types needed when building without std.
/// In std mode, these are provided by the std prelude.
#[cfg(not(feature = "std"))]
pub(crate) mod compat {
    pub use alloc::format;
    pub use alloc::string::{String, ToString};
    pub use alloc::vec;
    pub use alloc::vec::Vec;
}

pub mod dungeon;
pub mod episode;
pub mod spawn;
pub mod world;

mod consts;
mod rng;

pub use consts::*;
pub use dungeon::{Dungeon, generate_dungeon};
pub use rng::GameRng;
pub use world::{GenerationError, GeneratorOptions, OptionsError};
