//! One-ply tactical opponent.
//!
//! Move priority:
//! 1. A cell that completes a line for us
//! 2. A cell that would complete a line for the opponent
//! 3. Random empty cell

use tracing::trace;

use super::{OpponentStrategy, RandomOpponent};
use crate::board::Board;
use crate::core::{GameRng, PlayerId};
use crate::rules::{check_outcome, Outcome};

/// Wins when it can, blocks when it must.
#[derive(Clone, Copy, Debug)]
pub struct TacticalOpponent {
    player: PlayerId,
}

impl Default for TacticalOpponent {
    fn default() -> Self {
        Self::new(PlayerId::System)
    }
}

impl TacticalOpponent {
    /// Tactical play on behalf of `player`.
    #[must_use]
    pub fn new(player: PlayerId) -> Self {
        Self { player }
    }

    /// The seat this strategy plays for.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }
}

/// First empty cell (ascending) where `mark` would complete a line.
pub(crate) fn find_winning_move(board: &Board, empty: &[usize], mark: PlayerId) -> Option<usize> {
    empty.iter().copied().find(|&index| {
        board
            .with_move(index, mark)
            .and_then(|next| check_outcome(&next, next.size(), index))
            .map(|outcome| outcome == Some(Outcome::Win(mark)))
            .unwrap_or(false)
    })
}

impl OpponentStrategy for TacticalOpponent {
    fn select_move(&self, board: &Board, rng: &mut GameRng) -> Option<usize> {
        let empty = board.empty_indices();
        if empty.is_empty() {
            return None;
        }

        if let Some(index) = find_winning_move(board, &empty, self.player) {
            trace!(index, "taking winning move");
            return Some(index);
        }

        if let Some(index) = find_winning_move(board, &empty, self.player.opponent()) {
            trace!(index, "blocking opponent");
            return Some(index);
        }

        RandomOpponent.select_move(board, rng)
    }

    fn name(&self) -> &'static str {
        "tactical"
    }
}
