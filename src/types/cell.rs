use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::cell_ref::{col_to_letter, parse_cell_ref};
use crate::error::GridSelectError;
use crate::types::{Cells, SelectionRange};

/// Grid cell position (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellAddress {
    pub row: u32,
    pub col: u32,
}

impl CellAddress {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl From<(u32, u32)> for CellAddress {
    fn from((row, col): (u32, u32)) -> Self {
        Self::new(row, col)
    }
}

/// A1 notation, e.g. `(2, 27)` displays as `AB3`.
impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", col_to_letter(self.col), u64::from(self.row) + 1)
    }
}

impl FromStr for CellAddress {
    type Err = GridSelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cell_ref(s).ok_or_else(|| GridSelectError::CellRef(s.to_string()))
    }
}

/// Row and column counts of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: u32,
    pub cols: u32,
}

impl GridSize {
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// True when the grid has no rows or no columns.
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub const fn contains(&self, cell: CellAddress) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Every cell of the grid in row-major order. Empty for an empty grid.
    pub fn cells(&self) -> Cells {
        if self.is_empty() {
            Cells::empty()
        } else {
            SelectionRange::new(
                CellAddress::new(0, 0),
                CellAddress::new(self.rows - 1, self.cols - 1),
            )
            .cells()
        }
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}
