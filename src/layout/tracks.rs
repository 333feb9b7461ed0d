//! Pre-computed row/column tracks for grids with non-uniform cell sizes.
//!
//! Track positions are accumulated once per size change, so hit testing is
//! an O(log n) search over the boundaries and cell rects are two lookups.

use super::{check_cell, check_point, check_rect, check_viewport, CoordinateResolver};
use crate::error::ResolveError;
use crate::types::{CellAddress, GridSize, Point, Rect};

/// Default column width in pixels for tracks added by a grid resize
pub const DEFAULT_COL_WIDTH: f64 = 64.0;

/// Default row height in pixels for tracks added by a grid resize
pub const DEFAULT_ROW_HEIGHT: f64 = 20.0;

/// One axis of the layout: sizes plus cumulative start positions.
#[derive(Debug, Clone, Default, PartialEq)]
struct Track {
    /// `sizes[i]` is 0 for hidden tracks
    sizes: Vec<f64>,
    /// `positions[i]` = start of track i; one extra trailing entry for the far edge
    positions: Vec<f64>,
}

impl Track {
    fn new(sizes: Vec<f64>) -> Self {
        let mut track = Self {
            sizes: sizes
                .into_iter()
                .map(|s| if s.is_finite() && s > 0.0 { s } else { 0.0 })
                .collect(),
            positions: Vec::new(),
        };
        track.recompute();
        track
    }

    fn recompute(&mut self) {
        self.positions.clear();
        self.positions.reserve(self.sizes.len() + 1);
        let mut pos = 0.0;
        for &size in &self.sizes {
            self.positions.push(pos);
            pos += size;
        }
        self.positions.push(pos); // Final edge
    }

    fn resize(&mut self, len: u32, default_size: f64) {
        self.sizes
            .resize(usize::try_from(len).unwrap_or(usize::MAX), default_size);
        self.recompute();
    }

    fn set_size(&mut self, idx: u32, size: f64) -> bool {
        let Some(slot) = usize::try_from(idx)
            .ok()
            .and_then(|i| self.sizes.get_mut(i))
        else {
            return false;
        };
        *slot = if size.is_finite() && size > 0.0 { size } else { 0.0 };
        self.recompute();
        true
    }

    fn len(&self) -> u32 {
        u32::try_from(self.sizes.len()).unwrap_or(u32::MAX)
    }

    fn total(&self) -> f64 {
        self.positions.last().copied().unwrap_or(0.0)
    }

    fn start(&self, idx: u32) -> f64 {
        usize::try_from(idx)
            .ok()
            .and_then(|i| self.positions.get(i))
            .copied()
            .unwrap_or(0.0)
    }

    fn size(&self, idx: u32) -> f64 {
        usize::try_from(idx)
            .ok()
            .and_then(|i| self.sizes.get(i))
            .copied()
            .unwrap_or(0.0)
    }

    /// Visible track at `pos`, clamped into the track range. Positions on a
    /// boundary belong to the track that starts there; hidden tracks are
    /// never returned.
    fn index_at(&self, pos: f64) -> Option<u32> {
        // Number of track starts at or before pos (binary search)
        let starts = self.positions.len().saturating_sub(1);
        let at_or_before = self
            .positions
            .get(..starts)
            .map_or(0, |p| p.partition_point(|&start| start <= pos));
        let idx = at_or_before.saturating_sub(1);

        // Step off hidden tracks: back toward the hit first, then forward
        // for positions before the first visible track.
        let visible = |i: &usize| self.sizes.get(*i).is_some_and(|&s| s > 0.0);
        let found = (0..=idx.min(starts.saturating_sub(1)))
            .rev()
            .find(visible)
            .or_else(|| (idx..starts).find(visible))?;
        u32::try_from(found).ok()
    }
}

/// Grid layout with explicit column widths and row heights.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackLayout {
    cols: Track,
    rows: Track,
    /// Viewport width in pixels
    width: f64,
    /// Viewport height in pixels
    height: f64,
}

impl TrackLayout {
    /// Create a layout from per-column widths and per-row heights.
    ///
    /// Zero, negative or non-finite sizes mark the track as hidden. The
    /// viewport starts out as the total extent of the tracks.
    pub fn new(col_widths: Vec<f64>, row_heights: Vec<f64>) -> Self {
        let cols = Track::new(col_widths);
        let rows = Track::new(row_heights);
        let (width, height) = (cols.total(), rows.total());
        Self {
            cols,
            rows,
            width,
            height,
        }
    }

    /// Every column `col_width` wide and every row `row_height` tall.
    pub fn uniform(size: GridSize, col_width: f64, row_height: f64) -> Self {
        let cols = usize::try_from(size.cols).unwrap_or(0);
        let rows = usize::try_from(size.rows).unwrap_or(0);
        Self::new(vec![col_width; cols], vec![row_height; rows])
    }

    /// Set one column's width. Returns false if `col` is out of range.
    pub fn set_col_width(&mut self, col: u32, width: f64) -> bool {
        self.cols.set_size(col, width)
    }

    /// Set one row's height. Returns false if `row` is out of range.
    pub fn set_row_height(&mut self, row: u32, height: f64) -> bool {
        self.rows.set_size(row, height)
    }

    pub fn col_width(&self, col: u32) -> f64 {
        self.cols.size(col)
    }

    pub fn row_height(&self, row: u32) -> f64 {
        self.rows.size(row)
    }

    /// Get total width of all columns
    pub fn total_width(&self) -> f64 {
        self.cols.total()
    }

    /// Get total height of all rows
    pub fn total_height(&self) -> f64 {
        self.rows.total()
    }
}

impl CoordinateResolver for TrackLayout {
    fn grid_size(&self) -> GridSize {
        GridSize::new(self.rows.len(), self.cols.len())
    }

    fn viewport_bounds(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn cell_at(&self, point: Point) -> Result<CellAddress, ResolveError> {
        check_viewport(self.grid_size(), self.width, self.height)?;
        check_point(point)?;
        let row = self.rows.index_at(point.y);
        let col = self.cols.index_at(point.x);
        match (row, col) {
            (Some(row), Some(col)) => Ok(CellAddress::new(row, col)),
            // Every track on an axis is hidden
            _ => Err(ResolveError::DegenerateViewport),
        }
    }

    fn cell_rect(&self, cell: CellAddress) -> Result<Rect, ResolveError> {
        check_viewport(self.grid_size(), self.width, self.height)?;
        check_cell(self.grid_size(), cell)?;
        let rect = Rect::new(
            self.cols.start(cell.col),
            self.rows.start(cell.row),
            self.cols.size(cell.col),
            self.rows.size(cell.row),
        );
        check_rect(cell, rect)
    }

    /// New tracks get the default sizes; surviving tracks keep theirs.
    fn set_grid_size(&mut self, size: GridSize) {
        self.cols.resize(size.cols, DEFAULT_COL_WIDTH);
        self.rows.resize(size.rows, DEFAULT_ROW_HEIGHT);
    }

    fn set_viewport(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn cell(row: u32, col: u32) -> CellAddress {
        CellAddress::new(row, col)
    }

    fn layout() -> TrackLayout {
        // Columns: [0,30) [30,30) hidden [30,80) [80,90)
        // Rows:    [0,20) [20,60) [60,70)
        TrackLayout::new(vec![30.0, 0.0, 50.0, 10.0], vec![20.0, 40.0, 10.0])
    }

    #[test]
    fn basic_layout() {
        let layout =
            TrackLayout::uniform(GridSize::new(11, 6), DEFAULT_COL_WIDTH, DEFAULT_ROW_HEIGHT);
        assert_eq!(layout.grid_size(), GridSize::new(11, 6));
        assert_eq!(layout.total_width(), DEFAULT_COL_WIDTH * 6.0);
        assert_eq!(layout.total_height(), DEFAULT_ROW_HEIGHT * 11.0);
        assert_eq!(layout.viewport_bounds(), (DEFAULT_COL_WIDTH * 6.0, DEFAULT_ROW_HEIGHT * 11.0));
    }

    #[test_case(0.0, 0.0, 0, 0 ; "origin")]
    #[test_case(29.9, 19.9, 0, 0 ; "inside first cell")]
    #[test_case(30.0, 20.0, 1, 2 ; "boundary skips hidden column")]
    #[test_case(85.0, 65.0, 2, 3 ; "last cell")]
    #[test_case(500.0, 500.0, 2, 3 ; "beyond layout clamps")]
    #[test_case(-10.0, -10.0, 0, 0 ; "negative clamps")]
    fn resolves_points(x: f64, y: f64, row: u32, col: u32) {
        assert_eq!(layout().cell_at(Point::new(x, y)), Ok(cell(row, col)));
    }

    #[test]
    fn cell_rects_follow_track_sizes() {
        let layout = layout();
        assert_eq!(
            layout.cell_rect(cell(1, 2)),
            Ok(Rect::new(30.0, 20.0, 50.0, 40.0))
        );
        assert_eq!(
            layout.cell_rect(cell(2, 3)),
            Ok(Rect::new(80.0, 60.0, 10.0, 10.0))
        );
    }

    #[test]
    fn hidden_tracks_are_collapsed() {
        assert_eq!(
            layout().cell_rect(cell(0, 1)),
            Err(ResolveError::CollapsedCell(cell(0, 1)))
        );
    }

    #[test]
    fn leading_and_trailing_hidden_tracks_are_skipped() {
        let layout = TrackLayout::new(vec![0.0, 10.0, 10.0, 0.0], vec![10.0]);
        assert_eq!(layout.cell_at(Point::new(-5.0, 5.0)), Ok(cell(0, 1)));
        assert_eq!(layout.cell_at(Point::new(0.0, 5.0)), Ok(cell(0, 1)));
        assert_eq!(layout.cell_at(Point::new(19.0, 5.0)), Ok(cell(0, 2)));
        assert_eq!(layout.cell_at(Point::new(25.0, 5.0)), Ok(cell(0, 2)));
    }

    #[test]
    fn all_hidden_axis_is_unresolved() {
        let layout = TrackLayout::new(vec![0.0, 0.0], vec![10.0]);
        assert_eq!(layout.viewport_bounds(), (0.0, 10.0));
        assert_eq!(
            layout.cell_at(Point::new(1.0, 1.0)),
            Err(ResolveError::DegenerateViewport)
        );
    }

    #[test]
    fn empty_layout_is_unresolved() {
        let mut layout = TrackLayout::new(Vec::new(), Vec::new());
        assert!(layout.grid_size().is_empty());
        layout.set_viewport(100.0, 100.0);
        assert_eq!(
            layout.cell_at(Point::new(1.0, 1.0)),
            Err(ResolveError::DegenerateViewport)
        );
    }

    #[test]
    fn out_of_bounds_rect() {
        assert_eq!(
            layout().cell_rect(cell(3, 0)),
            Err(ResolveError::OutOfBounds {
                cell: cell(3, 0),
                size: GridSize::new(3, 4)
            })
        );
    }

    #[test]
    fn grid_resize_keeps_existing_tracks() {
        let mut layout = layout();
        layout.set_grid_size(GridSize::new(5, 2));
        assert_eq!(layout.grid_size(), GridSize::new(5, 2));
        assert_eq!(layout.row_height(1), 40.0);
        assert_eq!(layout.row_height(4), DEFAULT_ROW_HEIGHT);
        assert_eq!(layout.total_width(), 30.0);
        assert_eq!(layout.cell_at(Point::new(50.0, 5.0)), Ok(cell(0, 0)));
    }

    #[test]
    fn track_sizes_are_editable() {
        let mut layout = layout();
        assert!(layout.set_col_width(1, 15.0));
        assert!(!layout.set_col_width(9, 15.0));
        assert_eq!(layout.cell_at(Point::new(40.0, 5.0)), Ok(cell(0, 1)));
        assert!(layout.set_row_height(0, f64::NAN));
        assert_eq!(layout.row_height(0), 0.0);
        assert_eq!(layout.cell_at(Point::new(1.0, 1.0)), Ok(cell(1, 0)));
    }
}
