//! Line generation.
//!
//! For a move at `index` on an N×N board four lines are checked: its row,
//! its column, the main diagonal, and the anti-diagonal. The two diagonals
//! are produced whether or not `index` lies on them.
//!
//! ## Anti-diagonal
//!
//! The anti-diagonal is `(i + 1) * (size - 1)` for `i in 0..size`, keeping
//! only values below `size * size`. For size 3 this is `{2, 4, 6}`.

use smallvec::SmallVec;

use crate::core::MAX_SIZE;

/// Index buffer for one line. Inline up to the largest supported size.
pub type LineIndexes = SmallVec<[usize; MAX_SIZE]>;

/// Which of the four checked lines this is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineKind {
    Row,
    Column,
    MainDiagonal,
    AntiDiagonal,
}

/// An ordered sequence of cell indexes checked together for a win.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub indexes: LineIndexes,
}

impl Line {
    /// Cells of the row containing `index`. Empty when `size` is 0.
    #[must_use]
    pub fn row(size: usize, index: usize) -> Self {
        let row_start = index.checked_rem(size).map_or(0, |col| index - col);
        Self {
            kind: LineKind::Row,
            indexes: (0..size).map(|i| row_start + i).collect(),
        }
    }

    /// Cells of the column containing `index`. Empty when `size` is 0.
    #[must_use]
    pub fn column(size: usize, index: usize) -> Self {
        let col = index.checked_rem(size).unwrap_or(0);
        Self {
            kind: LineKind::Column,
            indexes: (0..size).map(|i| i * size + col).collect(),
        }
    }

    /// Cells where row == col.
    #[must_use]
    pub fn main_diagonal(size: usize) -> Self {
        Self {
            kind: LineKind::MainDiagonal,
            indexes: (0..size).map(|i| i * (size + 1)).collect(),
        }
    }

    /// Cells `(i + 1) * (size - 1)`, bounded by the cell count.
    #[must_use]
    pub fn anti_diagonal(size: usize) -> Self {
        let cell_count = size * size;
        Self {
            kind: LineKind::AntiDiagonal,
            indexes: (0..size)
                .map(|i| (i + 1) * size.saturating_sub(1))
                .filter(|&index| index < cell_count)
                .collect(),
        }
    }

    /// Whether `index` is one of this line's cells.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.indexes.contains(&index)
    }
}

/// The four lines checked for a move at `index`, in evaluation order.
///
/// A `size` of 0 yields four empty lines. `index` is not range checked;
/// `check_outcome` validates it before calling this.
///
/// ```
/// use xox_engine::rules::lines_through;
///
/// let [row, col, main, anti] = lines_through(3, 4);
/// assert_eq!(row.indexes.as_slice(), &[3, 4, 5]);
/// assert_eq!(col.indexes.as_slice(), &[1, 4, 7]);
/// assert_eq!(main.indexes.as_slice(), &[0, 4, 8]);
/// assert_eq!(anti.indexes.as_slice(), &[2, 4, 6]);
/// ```
#[must_use]
pub fn lines_through(size: usize, index: usize) -> [Line; 4] {
    [
        Line::row(size, index),
        Line::column(size, index),
        Line::main_diagonal(size),
        Line::anti_diagonal(size),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_lines() {
        assert_eq!(Line::row(3, 0).indexes.as_slice(), &[0, 1, 2]);
        assert_eq!(Line::row(3, 5).indexes.as_slice(), &[3, 4, 5]);
        assert_eq!(Line::row(4, 14).indexes.as_slice(), &[12, 13, 14, 15]);
    }

    #[test]
    fn test_column_lines() {
        assert_eq!(Line::column(3, 7).indexes.as_slice(), &[1, 4, 7]);
        assert_eq!(Line::column(4, 3).indexes.as_slice(), &[3, 7, 11, 15]);
    }

    #[test]
    fn test_main_diagonal() {
        assert_eq!(Line::main_diagonal(3).indexes.as_slice(), &[0, 4, 8]);
        assert_eq!(Line::main_diagonal(4).indexes.as_slice(), &[0, 5, 10, 15]);
    }

    #[test]
    fn test_anti_diagonal_size_three() {
        assert_eq!(Line::anti_diagonal(3).indexes.as_slice(), &[2, 4, 6]);
    }

    #[test]
    fn test_anti_diagonal_larger_sizes() {
        assert_eq!(Line::anti_diagonal(4).indexes.as_slice(), &[3, 6, 9, 12]);
        assert_eq!(Line::anti_diagonal(5).indexes.as_slice(), &[4, 8, 12, 16, 20]);
    }

    #[test]
    fn test_anti_diagonal_degenerate_sizes() {
        assert_eq!(Line::anti_diagonal(1).indexes.as_slice(), &[0]);
        assert_eq!(Line::anti_diagonal(2).indexes.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_every_line_has_size_cells() {
        for size in 3..=MAX_SIZE {
            for index in [0, size * size / 2, size * size - 1] {
                for line in lines_through(size, index) {
                    assert_eq!(line.indexes.len(), size, "{:?} at size {}", line.kind, size);
                    assert!(!line.indexes.spilled());
                }
            }
        }
    }

    #[test]
    fn test_row_and_column_contain_move() {
        let [row, col, _, _] = lines_through(6, 20);
        assert!(row.contains(20));
        assert!(col.contains(20));
    }

    #[test]
    fn test_zero_size_yields_empty_lines() {
        for index in [0, 7] {
            for line in lines_through(0, index) {
                assert!(line.indexes.is_empty(), "{:?}", line.kind);
            }
        }
    }

    #[test]
    fn test_single_cell_board() {
        for line in lines_through(1, 0) {
            assert_eq!(line.indexes.as_slice(), &[0], "{:?}", line.kind);
        }
    }
}
