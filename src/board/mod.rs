//! Board representation.
//!
//! - `Cell`: empty or owned by one player
//! - `Board`: fixed-size N×N grid of cells in row-major order

mod cell;
mod grid;

pub use cell::Cell;
pub use grid::Board;
