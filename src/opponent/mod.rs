//! Opponent strategies for the system player.
//!
//! Strategies are trait objects so the engine can swap them at runtime
//! (difficulty changes) without touching rules or turn control:
//! - `RandomOpponent`: uniform over empty cells
//! - `TacticalOpponent`: win if possible, block if necessary, else random
//! - `MinimaxOpponent`: exhaustive search once few cells remain
//!
//! All randomness comes from the engine's `GameRng`, never from a thread
//! RNG, so games replay exactly under a fixed seed.

mod minimax;
mod random;
mod tactical;

pub use minimax::MinimaxOpponent;
pub use random::RandomOpponent;
pub use tactical::TacticalOpponent;

use crate::board::Board;
use crate::core::{Difficulty, GameRng};

/// Move selection policy for the non-human player.
pub trait OpponentStrategy: Send + Sync {
    /// Pick an empty cell to play, or `None` if the board is full.
    ///
    /// Implementations must never return a filled index. The engine ignores
    /// such a move and the session retries after another delay.
    fn select_move(&self, board: &Board, rng: &mut GameRng) -> Option<usize>;

    /// Short name for logging.
    fn name(&self) -> &'static str;
}

impl Difficulty {
    /// The strategy this difficulty plays with.
    #[must_use]
    pub fn strategy(self) -> Box<dyn OpponentStrategy> {
        match self {
            Difficulty::Easy => Box::new(RandomOpponent),
            Difficulty::Medium => Box::new(TacticalOpponent::default()),
            Difficulty::Hard => Box::new(MinimaxOpponent::default()),
        }
    }
}
