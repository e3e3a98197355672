//! Incremental outcome detection anchored on the last move.

use tracing::trace;

use super::lines::{lines_through, Line};
use super::outcome::Outcome;
use crate::board::Board;
use crate::core::{EngineError, EngineResult, PlayerId};

/// Determine the game outcome after the move at `last_move`.
///
/// Lines are checked in order (row, column, main diagonal, anti-diagonal)
/// and the first completed one wins. A line counts only when every cell is
/// filled and exactly one owner appears. With no winning line a full board
/// is a draw; otherwise the game continues (`Ok(None)`).
///
/// Fails with `InvalidSize` if `size` does not match the board and with
/// `OutOfRange` if `last_move` is not a cell.
///
/// ```
/// use xox_engine::board::Board;
/// use xox_engine::core::PlayerId;
/// use xox_engine::rules::{check_outcome, Outcome};
///
/// let mut board = Board::new(3).unwrap();
/// for index in [0, 1, 2] {
///     board.set(index, PlayerId::Human).unwrap();
/// }
/// assert_eq!(check_outcome(&board, 3, 2).unwrap(), Some(Outcome::Win(PlayerId::Human)));
/// ```
pub fn check_outcome(board: &Board, size: usize, last_move: usize) -> EngineResult<Option<Outcome>> {
    if size != board.size() {
        return Err(EngineError::InvalidSize { size });
    }
    if last_move >= board.cell_count() {
        return Err(EngineError::OutOfRange {
            index: last_move,
            cell_count: board.cell_count(),
        });
    }

    for line in lines_through(size, last_move) {
        if let Some(owner) = line_owner(board, &line) {
            trace!(kind = ?line.kind, %owner, "line completed");
            return Ok(Some(Outcome::Win(owner)));
        }
    }

    if board.is_full() {
        return Ok(Some(Outcome::Draw));
    }

    Ok(None)
}

/// The single owner of a completely filled line, if there is one.
fn line_owner(board: &Board, line: &Line) -> Option<PlayerId> {
    let cells = board.cells();
    let mut owners = line
        .indexes
        .iter()
        .map(|&index| cells.get(index).and_then(|cell| cell.owner()));

    let first = owners.next()??;
    for owner in owners {
        if owner? != first {
            return None;
        }
    }
    Some(first)
}
