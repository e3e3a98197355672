//! Row-major N×N grid.
//!
//! ## Layout
//!
//! Cell `index = row * size + col`. The dimension is fixed at construction;
//! changing it means building a new `Board`.
//!
//! ## Write discipline
//!
//! Cells only ever go from empty to filled. `set` refuses to overwrite, so
//! a duplicate move can never change ownership.

use super::cell::Cell;
use crate::core::{EngineError, EngineResult, PlayerId};

/// N×N grid of cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    filled: usize,
}

impl Board {
    /// Create an empty board of dimension `size`.
    ///
    /// ```
    /// use xox_engine::board::Board;
    ///
    /// let board = Board::new(3).unwrap();
    /// assert_eq!(board.cell_count(), 9);
    /// assert_eq!(board.count_filled(), 0);
    /// assert!(Board::new(0).is_err());
    /// ```
    pub fn new(size: usize) -> EngineResult<Self> {
        if size < 1 {
            return Err(EngineError::InvalidSize { size });
        }
        let cell_count = size
            .checked_mul(size)
            .ok_or(EngineError::InvalidSize { size })?;

        Ok(Self {
            size,
            cells: vec![Cell::EMPTY; cell_count],
            filled: 0,
        })
    }

    /// Board dimension N.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (N²).
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Read-only view of every cell in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get the cell at `index`.
    pub fn get(&self, index: usize) -> EngineResult<Cell> {
        self.cells
            .get(index)
            .copied()
            .ok_or(EngineError::OutOfRange {
                index,
                cell_count: self.cells.len(),
            })
    }

    /// Claim the cell at `index` for `owner`.
    ///
    /// Fails with `OutOfRange` for a bad index and `AlreadyFilled` if the
    /// cell is taken. The board is unchanged on failure.
    pub fn set(&mut self, index: usize, owner: PlayerId) -> EngineResult<()> {
        let cell_count = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(EngineError::OutOfRange { index, cell_count })?;

        if cell.is_filled() {
            return Err(EngineError::AlreadyFilled { index });
        }

        *cell = Cell::owned_by(owner);
        self.filled += 1;
        Ok(())
    }

    /// Copy of this board with one more move applied.
    ///
    /// Used by search strategies that explore hypothetical positions.
    pub fn with_move(&self, index: usize, owner: PlayerId) -> EngineResult<Self> {
        let mut next = self.clone();
        next.set(index, owner)?;
        Ok(next)
    }

    /// True iff every cell is filled.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.filled == self.cells.len()
    }

    /// Number of filled cells.
    #[must_use]
    pub fn count_filled(&self) -> usize {
        self.filled
    }

    /// Indexes of all empty cells, ascending.
    #[must_use]
    pub fn empty_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_filled())
            .map(|(index, _)| index)
            .collect()
    }

    /// `(row, col)` of `index`, or `None` if out of range.
    #[must_use]
    pub fn row_col(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.cells.len()).then(|| (index / self.size, index % self.size))
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.size) {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
