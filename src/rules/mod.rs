//! Win and draw detection for N×N boards.
//!
//! - `lines`: the row, column, and diagonal index sequences through a move
//! - `check`: `check_outcome`, anchored on the most recent move
//! - `outcome`: the `Outcome` of a finished game
//!
//! Rules never mutate the board; the engine applies moves and then asks
//! for the outcome.

pub mod check;
pub mod lines;
pub mod outcome;

pub use check::check_outcome;
pub use lines::{lines_through, Line, LineIndexes, LineKind};
pub use outcome::Outcome;
