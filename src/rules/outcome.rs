//! Terminal game results.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A player completed a line.
    Win(PlayerId),
    /// Board full, no completed line.
    Draw,
}

impl Outcome {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, Outcome::Win(p) if *p == player)
    }

    /// The winning player, `None` for a draw.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            Outcome::Win(p) => Some(*p),
            Outcome::Draw => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win(p) => write!(f, "{} wins", p),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
