use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

use super::CellAddress;

/// Rectangular selection between the cell a drag started on (`anchor`) and
/// the cell currently under the pointer (`focus`).
///
/// Immutable: extending a selection builds a new range with [`with_focus`].
/// Either endpoint may be the top-left corner, so all geometry goes through
/// the normalized [`bounds`].
///
/// [`with_focus`]: SelectionRange::with_focus
/// [`bounds`]: SelectionRange::bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionRange {
    pub anchor: CellAddress,
    pub focus: CellAddress,
}

impl SelectionRange {
    pub const fn new(anchor: CellAddress, focus: CellAddress) -> Self {
        Self { anchor, focus }
    }

    /// One-cell range anchored and focused on `cell`.
    pub const fn single(cell: CellAddress) -> Self {
        Self::new(cell, cell)
    }

    /// Same anchor, new focus.
    #[must_use]
    pub const fn with_focus(&self, focus: CellAddress) -> Self {
        Self::new(self.anchor, focus)
    }

    /// Get normalized bounds `(row_min, col_min, row_max, col_max)`
    pub fn bounds(&self) -> (u32, u32, u32, u32) {
        (
            self.anchor.row.min(self.focus.row),
            self.anchor.col.min(self.focus.col),
            self.anchor.row.max(self.focus.row),
            self.anchor.col.max(self.focus.col),
        )
    }

    pub fn top_left(&self) -> CellAddress {
        let (row_min, col_min, _, _) = self.bounds();
        CellAddress::new(row_min, col_min)
    }

    pub fn bottom_right(&self) -> CellAddress {
        let (_, _, row_max, col_max) = self.bounds();
        CellAddress::new(row_max, col_max)
    }

    pub fn row_count(&self) -> u64 {
        let (row_min, _, row_max, _) = self.bounds();
        u64::from(row_max - row_min) + 1
    }

    pub fn col_count(&self) -> u64 {
        let (_, col_min, _, col_max) = self.bounds();
        u64::from(col_max - col_min) + 1
    }

    /// Number of selected cells (saturates for ranges spanning the full `u32` grid).
    pub fn len(&self) -> u64 {
        self.row_count().saturating_mul(self.col_count())
    }

    /// Always false; a range holds at least its anchor.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_single_cell(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn contains(&self, cell: CellAddress) -> bool {
        let (row_min, col_min, row_max, col_max) = self.bounds();
        (row_min..=row_max).contains(&cell.row) && (col_min..=col_max).contains(&cell.col)
    }

    /// Every cell in the range, row by row, top-left to bottom-right.
    ///
    /// Each call starts a fresh iterator, so the sequence can be walked any
    /// number of times and does not depend on drag direction.
    pub fn cells(&self) -> Cells {
        let (row_min, col_min, row_max, col_max) = self.bounds();
        Cells {
            col_min,
            row_max,
            col_max,
            next: Some(CellAddress::new(row_min, col_min)),
        }
    }
}

/// Row-major iterator over the cells of a [`SelectionRange`].
#[derive(Debug, Clone)]
pub struct Cells {
    col_min: u32,
    row_max: u32,
    col_max: u32,
    next: Option<CellAddress>,
}

impl Cells {
    /// An iterator that yields nothing.
    pub(crate) fn empty() -> Self {
        Self {
            col_min: 0,
            row_max: 0,
            col_max: 0,
            next: None,
        }
    }

    fn remaining(&self) -> u64 {
        let Some(cell) = self.next else {
            return 0;
        };
        let width = u64::from(self.col_max - self.col_min) + 1;
        let full_rows_left = u64::from(self.row_max - cell.row);
        full_rows_left
            .saturating_mul(width)
            .saturating_add(u64::from(self.col_max - cell.col) + 1)
    }
}

impl Iterator for Cells {
    type Item = CellAddress;

    fn next(&mut self) -> Option<CellAddress> {
        let cell = self.next?;
        self.next = if cell.col < self.col_max {
            Some(CellAddress::new(cell.row, cell.col + 1))
        } else if cell.row < self.row_max {
            Some(CellAddress::new(cell.row + 1, self.col_min))
        } else {
            None
        };
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Saturates on targets where the count does not fit in usize.
        let n = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Cells {}

impl FusedIterator for Cells {}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn cell(row: u32, col: u32) -> CellAddress {
        CellAddress::new(row, col)
    }

    #[test]
    fn bounds_normalize_reversed_drag() {
        let range = SelectionRange::new(cell(5, 1), cell(2, 4));
        assert_eq!(range.bounds(), (2, 1, 5, 4));
        assert_eq!(range.top_left(), cell(2, 1));
        assert_eq!(range.bottom_right(), cell(5, 4));
        assert_eq!(range.row_count(), 4);
        assert_eq!(range.col_count(), 4);
        assert_eq!(range.len(), 16);
    }

    #[test]
    fn single_cell_yields_itself() {
        let range = SelectionRange::single(cell(2, 2));
        assert!(range.is_single_cell());
        assert_eq!(range.cells().collect::<Vec<_>>(), vec![cell(2, 2)]);
    }

    #[test]
    fn cells_are_row_major_regardless_of_direction() {
        let forward: Vec<_> = SelectionRange::new(cell(1, 1), cell(2, 3)).cells().collect();
        let backward: Vec<_> = SelectionRange::new(cell(2, 3), cell(1, 1)).cells().collect();
        let mixed: Vec<_> = SelectionRange::new(cell(1, 3), cell(2, 1)).cells().collect();
        let expected = vec![
            cell(1, 1),
            cell(1, 2),
            cell(1, 3),
            cell(2, 1),
            cell(2, 2),
            cell(2, 3),
        ];
        assert_eq!(forward, expected);
        assert_eq!(backward, expected);
        assert_eq!(mixed, expected);
    }

    #[test]
    fn cells_restart_on_every_call() {
        let range = SelectionRange::new(cell(0, 0), cell(1, 1));
        let mut first = range.cells();
        first.next();
        first.next();
        assert_eq!(range.cells().count(), 4);
        assert_eq!(range.cells().count(), 4);
        assert_eq!(first.count(), 2);
    }

    #[test]
    fn cells_count_matches_bounding_box() {
        for (a, b) in [
            (cell(0, 0), cell(9, 9)),
            (cell(7, 2), cell(3, 8)),
            (cell(4, 4), cell(4, 0)),
            (cell(0, 6), cell(9, 6)),
        ] {
            let range = SelectionRange::new(a, b);
            let cells: Vec<_> = range.cells().collect();
            let expected = (a.row.abs_diff(b.row) + 1) * (a.col.abs_diff(b.col) + 1);
            assert_eq!(cells.len(), usize::try_from(expected).unwrap());

            let distinct: HashSet<_> = cells.iter().copied().collect();
            assert_eq!(distinct.len(), cells.len());
            assert!(cells.iter().all(|&c| range.contains(c)));

            let swapped: HashSet<_> = SelectionRange::new(b, a).cells().collect();
            assert_eq!(distinct, swapped);
        }
    }

    #[test]
    fn size_hint_tracks_progress() {
        let mut cells = SelectionRange::new(cell(0, 0), cell(2, 2)).cells();
        assert_eq!(cells.len(), 9);
        cells.next();
        cells.next();
        cells.next();
        assert_eq!(cells.len(), 6);
        cells.by_ref().for_each(drop);
        assert_eq!(cells.len(), 0);
        assert_eq!(cells.next(), None);
    }

    #[test]
    fn iteration_stops_at_u32_max_edges() {
        let range = SelectionRange::new(cell(u32::MAX, u32::MAX - 1), cell(u32::MAX - 1, u32::MAX));
        let cells: Vec<_> = range.cells().collect();
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[3], cell(u32::MAX, u32::MAX));
    }

    #[test]
    fn contains_checks_both_axes() {
        let range = SelectionRange::new(cell(3, 3), cell(1, 1));
        assert!(range.contains(cell(2, 2)));
        assert!(range.contains(cell(1, 3)));
        assert!(!range.contains(cell(0, 2)));
        assert!(!range.contains(cell(2, 4)));
    }
}
