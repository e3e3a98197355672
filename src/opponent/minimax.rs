//! Exhaustive alpha-beta search for small positions.
//!
//! Full search is only affordable when few cells are empty, which in
//! practice means 3×3 boards. Larger positions are handed to
//! `TacticalOpponent`.

use tracing::trace;

use super::{OpponentStrategy, TacticalOpponent};
use crate::board::Board;
use crate::core::{GameRng, PlayerId};
use crate::rules::{check_outcome, Outcome};

const WIN_SCORE: i32 = 1000;
const BOUND: i32 = i32::MAX / 2;

/// Perfect play on nearly-full boards, tactical play elsewhere.
#[derive(Clone, Copy, Debug)]
pub struct MinimaxOpponent {
    player: PlayerId,
    exhaustive_limit: usize,
}

impl Default for MinimaxOpponent {
    fn default() -> Self {
        Self::new(PlayerId::System)
    }
}

impl MinimaxOpponent {
    /// Search on behalf of `player`, exhaustive up to 9 empty cells.
    #[must_use]
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            exhaustive_limit: 9,
        }
    }

    /// Change how many empty cells a position may have and still be
    /// searched exhaustively.
    #[must_use]
    pub fn with_exhaustive_limit(mut self, limit: usize) -> Self {
        self.exhaustive_limit = limit;
        self
    }

    /// Score every empty cell from `self.player`'s point of view.
    fn score_moves(&self, board: &Board, empty: &[usize]) -> Vec<(usize, i32)> {
        empty
            .iter()
            .filter_map(|&index| {
                score_move(board, index, self.player, -BOUND, BOUND).map(|score| (index, score))
            })
            .collect()
    }
}

/// Score of `to_move` playing `index`, from `to_move`'s point of view.
///
/// Faster wins and slower losses score higher in magnitude so the search
/// prefers the shortest win.
fn score_move(board: &Board, index: usize, to_move: PlayerId, alpha: i32, beta: i32) -> Option<i32> {
    let next = board.with_move(index, to_move).ok()?;
    let remaining = (next.cell_count() - next.count_filled()) as i32;

    let score = match check_outcome(&next, next.size(), index).ok()? {
        Some(Outcome::Win(winner)) if winner == to_move => WIN_SCORE + remaining,
        Some(Outcome::Win(_)) => -(WIN_SCORE + remaining),
        Some(Outcome::Draw) => 0,
        None => -negamax(&next, to_move.opponent(), -beta, -alpha),
    };
    Some(score)
}

fn negamax(board: &Board, to_move: PlayerId, mut alpha: i32, beta: i32) -> i32 {
    let mut best = -BOUND;

    for index in board.empty_indices() {
        let Some(score) = score_move(board, index, to_move, alpha, beta) else {
            continue;
        };

        best = best.max(score);
        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }

    if best == -BOUND {
        0
    } else {
        best
    }
}

impl OpponentStrategy for MinimaxOpponent {
    fn select_move(&self, board: &Board, rng: &mut GameRng) -> Option<usize> {
        let empty = board.empty_indices();
        if empty.is_empty() {
            return None;
        }

        if empty.len() > self.exhaustive_limit {
            return TacticalOpponent::new(self.player).select_move(board, rng);
        }

        let scored = self.score_moves(board, &empty);
        let best_score = scored.iter().map(|&(_, score)| score).max()?;
        let best: Vec<usize> = scored
            .iter()
            .filter(|&&(_, score)| score == best_score)
            .map(|&(index, _)| index)
            .collect();

        trace!(best_score, candidates = best.len(), "search complete");
        rng.choose(&best).copied()
    }

    fn name(&self) -> &'static str {
        "minimax"
    }
}
