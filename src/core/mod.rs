//! Core engine types: players, RNG, configuration, errors.
//!
//! Everything here is independent of board geometry and rules.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{clamp_size, Difficulty, EngineConfig, MAX_SIZE, MIN_SIZE};
pub use error::{EngineError, EngineResult};
pub use player::PlayerId;
pub use rng::{GameRng, GameRngState};
