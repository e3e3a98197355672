//! Engine configuration.
//!
//! Hosts configure the engine once at startup:
//! - Board dimension the first game starts with
//! - RNG seed for the opponent
//! - Opponent "thinking" delay used by the async session
//! - Whether saved games carry the board or only size and turn
//! - Opponent difficulty

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Smallest supported board dimension.
pub const MIN_SIZE: usize = 3;

/// Largest supported board dimension.
pub const MAX_SIZE: usize = 25;

/// Clamp a requested board dimension into `[MIN_SIZE, MAX_SIZE]`.
///
/// ```
/// use xox_engine::core::clamp_size;
///
/// assert_eq!(clamp_size(0), 3);
/// assert_eq!(clamp_size(7), 7);
/// assert_eq!(clamp_size(100), 25);
/// ```
#[must_use]
pub fn clamp_size(size: usize) -> usize {
    size.clamp(MIN_SIZE, MAX_SIZE)
}

/// How hard the system opponent plays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Uniformly random empty cell.
    #[default]
    Easy,
    /// Wins when it can, blocks when it must, otherwise random.
    Medium,
    /// Exhaustive search on nearly-full boards, tactical elsewhere.
    Hard,
}

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Board dimension for a fresh engine (clamped to `[3, 25]`).
    pub initial_size: usize,

    /// Seed for the opponent RNG.
    /// Same seed and same human moves reproduce the same game.
    pub seed: u64,

    /// Delay before the scheduled opponent move fires, in milliseconds.
    pub opponent_delay_ms: u64,

    /// Persist the move list in saved games.
    /// When false the board is session-only and only size and turn survive.
    pub persist_board: bool,

    /// Opponent strategy selection.
    pub difficulty: Difficulty,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_size: MIN_SIZE,
            seed: 42,
            opponent_delay_ms: 500,
            persist_board: false,
            difficulty: Difficulty::default(),
        }
    }
}

impl EngineConfig {
    /// Create a new config with a custom starting size (clamped).
    pub fn with_initial_size(mut self, size: usize) -> Self {
        self.initial_size = clamp_size(size);
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with a custom opponent delay.
    pub fn with_opponent_delay(mut self, delay: Duration) -> Self {
        self.opponent_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Create a new config that persists (or drops) the board in saves.
    pub fn with_persist_board(mut self, persist: bool) -> Self {
        self.persist_board = persist;
        self
    }

    /// Create a new config with custom difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Opponent delay as a `Duration`.
    #[must_use]
    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }

    /// Starting size after clamping.
    ///
    /// Deserialized configs bypass the builder, so the engine reads the
    /// size through here.
    #[must_use]
    pub fn effective_initial_size(&self) -> usize {
        clamp_size(self.initial_size)
    }
}
