//! Player identification.
//!
//! An XOX game always has exactly two seats: the human at the controls and
//! the system opponent. `PlayerId` is a closed enum so "no owner" is never
//! confused with the first seat; empty cells use `Option<PlayerId>::None`.

use serde::{Deserialize, Serialize};

/// One of the two seats at the board.
///
/// The discriminants match the integers a host persists for the turn
/// (`Human = 0`, `System = 1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerId {
    /// The player submitting moves through the host.
    Human = 0,
    /// The computer opponent, driven by an `OpponentStrategy`.
    System = 1,
}

impl PlayerId {
    /// Both seats in turn order.
    pub const ALL: [PlayerId; 2] = [PlayerId::Human, PlayerId::System];

    /// The other seat.
    ///
    /// ```
    /// use xox_engine::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::Human.opponent(), PlayerId::System);
    /// assert_eq!(PlayerId::System.opponent(), PlayerId::Human);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            PlayerId::Human => PlayerId::System,
            PlayerId::System => PlayerId::Human,
        }
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Recover a seat from a persisted index.
    ///
    /// Returns `None` for anything other than 0 or 1.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(PlayerId::Human),
            1 => Some(PlayerId::System),
            _ => None,
        }
    }

    /// Board glyph used by `Display` implementations.
    #[must_use]
    pub const fn mark(self) -> char {
        match self {
            PlayerId::Human => 'X',
            PlayerId::System => 'O',
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerId::Human => write!(f, "Human"),
            PlayerId::System => write!(f, "System"),
        }
    }
}
