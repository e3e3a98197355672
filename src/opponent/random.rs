//! Uniform random opponent.

use super::OpponentStrategy;
use crate::board::Board;
use crate::core::GameRng;

/// Plays a uniformly random empty cell.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomOpponent;

impl OpponentStrategy for RandomOpponent {
    fn select_move(&self, board: &Board, rng: &mut GameRng) -> Option<usize> {
        let empty = board.empty_indices();
        if empty.is_empty() {
            return None;
        }
        Some(empty[rng.gen_index(empty.len())])
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
