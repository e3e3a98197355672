//! Save and restore across process suspension.
//!
//! A host durably stores two integers (size and turn) and, when the engine
//! is configured with `persist_board`, the move list and the opponent RNG
//! position. Everything else is rebuilt on restore by replaying the moves
//! through the normal rules, so a restored seeded game continues exactly as
//! the original would have.

use serde::{Deserialize, Serialize};

use super::state::MoveRecord;
use crate::core::{EngineResult, GameRngState};

/// Opaque saved game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    /// Board dimension.
    pub size: usize,
    /// Next player as its seat index (0 = Human, 1 = System).
    pub turn: u8,
    /// Moves in play order. Empty when the board is session-only.
    pub moves: Vec<MoveRecord>,
    /// Opponent RNG position. `None` when the board is session-only.
    #[serde(default)]
    pub rng: Option<GameRngState>,
}

impl SavedGame {
    /// Encode for durable storage.
    pub fn to_bytes(&self) -> EngineResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode bytes produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> EngineResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
