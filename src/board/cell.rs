//! A single board cell.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// One square of the grid.
///
/// A cell is filled exactly when it has an owner, so the two can never
/// disagree. The default cell is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    owner: Option<PlayerId>,
}

impl Cell {
    /// An empty cell.
    pub const EMPTY: Cell = Cell { owner: None };

    /// A cell claimed by `owner`.
    #[must_use]
    pub const fn owned_by(owner: PlayerId) -> Self {
        Self { owner: Some(owner) }
    }

    /// Whether a player has claimed this cell.
    #[must_use]
    pub const fn is_filled(&self) -> bool {
        self.owner.is_some()
    }

    /// The owning player, if any.
    #[must_use]
    pub const fn owner(&self) -> Option<PlayerId> {
        self.owner
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.owner {
            Some(player) => write!(f, "{}", player.mark()),
            None => write!(f, "."),
        }
    }
}
