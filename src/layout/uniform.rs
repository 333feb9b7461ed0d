//! Arithmetic resolution for grids whose cells all share one size.

use super::{check_cell, check_point, check_rect, check_viewport, CoordinateResolver};
use crate::error::ResolveError;
use crate::types::{CellAddress, GridSize, Point, Rect};

/// Uniform grid stretched over the viewport: every cell is
/// `width / cols` by `height / rows` pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformGrid {
    size: GridSize,
    /// Viewport width in pixels
    width: f64,
    /// Viewport height in pixels
    height: f64,
}

impl UniformGrid {
    pub fn new(size: GridSize, width: f64, height: f64) -> Self {
        Self {
            size,
            width,
            height,
        }
    }

    /// `(cell_width, cell_height)`, or unresolved for a degenerate viewport.
    pub fn cell_size(&self) -> Result<(f64, f64), ResolveError> {
        check_viewport(self.size, self.width, self.height)?;
        Ok((
            self.width / f64::from(self.size.cols),
            self.height / f64::from(self.size.rows),
        ))
    }
}

/// `clamp(floor(pos / extent), 0, count - 1)`; `extent` is positive and
/// `count` non-zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_index(pos: f64, extent: f64, count: u32) -> u32 {
    let last = count.saturating_sub(1);
    let idx = (pos / extent).floor();
    if idx <= 0.0 {
        0
    } else if idx >= f64::from(last) {
        last
    } else {
        // 0 < idx < last, so the cast is exact
        idx as u32
    }
}

impl CoordinateResolver for UniformGrid {
    fn grid_size(&self) -> GridSize {
        self.size
    }

    fn viewport_bounds(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn cell_at(&self, point: Point) -> Result<CellAddress, ResolveError> {
        let (cell_w, cell_h) = self.cell_size()?;
        check_point(point)?;
        Ok(CellAddress::new(
            clamp_index(point.y, cell_h, self.size.rows),
            clamp_index(point.x, cell_w, self.size.cols),
        ))
    }

    fn cell_rect(&self, cell: CellAddress) -> Result<Rect, ResolveError> {
        let (cell_w, cell_h) = self.cell_size()?;
        check_cell(self.size, cell)?;
        let rect = Rect::new(
            f64::from(cell.col) * cell_w,
            f64::from(cell.row) * cell_h,
            cell_w,
            cell_h,
        );
        check_rect(cell, rect)
    }

    fn set_grid_size(&mut self, size: GridSize) {
        self.size = size;
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
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn grid_10x10() -> UniformGrid {
        UniformGrid::new(GridSize::new(10, 10), 100.0, 100.0)
    }

    #[test_case(55.0, 55.0, 5, 5 ; "interior")]
    #[test_case(0.0, 0.0, 0, 0 ; "origin")]
    #[test_case(9.999, 10.0, 1, 0 ; "cell boundary belongs to next cell")]
    #[test_case(150.0, 150.0, 9, 9 ; "beyond viewport clamps")]
    #[test_case(-20.0, 42.0, 4, 0 ; "negative clamps to zero")]
    #[test_case(100.0, 99.9, 9, 9 ; "right edge clamps to last column")]
    #[test_case(f64::MAX, -f64::MAX, 0, 9 ; "extreme finite values")]
    fn resolves_points(x: f64, y: f64, row: u32, col: u32) {
        assert_eq!(
            grid_10x10().cell_at(Point::new(x, y)),
            Ok(CellAddress::new(row, col))
        );
    }

    #[test_case(0.0, 100.0, 10, 10 ; "zero width")]
    #[test_case(100.0, 0.0, 10, 10 ; "zero height")]
    #[test_case(100.0, 100.0, 0, 10 ; "no rows")]
    #[test_case(100.0, 100.0, 10, 0 ; "no cols")]
    #[test_case(f64::NAN, 100.0, 10, 10 ; "nan width")]
    #[test_case(f64::INFINITY, 100.0, 10, 10 ; "infinite width")]
    #[test_case(-5.0, 100.0, 10, 10 ; "negative width")]
    fn degenerate_viewport_is_unresolved(w: f64, h: f64, rows: u32, cols: u32) {
        let grid = UniformGrid::new(GridSize::new(rows, cols), w, h);
        assert_eq!(
            grid.cell_at(Point::new(5.0, 5.0)),
            Err(ResolveError::DegenerateViewport)
        );
        assert_eq!(
            grid.cell_rect(CellAddress::new(0, 0)),
            Err(ResolveError::DegenerateViewport)
        );
    }

    #[test]
    fn non_finite_points_are_unresolved() {
        let grid = grid_10x10();
        for point in [
            Point::new(f64::NAN, 1.0),
            Point::new(1.0, f64::INFINITY),
            Point::new(f64::NEG_INFINITY, 1.0),
        ] {
            assert_eq!(grid.cell_at(point), Err(ResolveError::NonFinitePoint));
        }
    }

    #[test]
    fn cell_rect_uses_uniform_size() {
        let grid = UniformGrid::new(GridSize::new(4, 5), 200.0, 80.0);
        let rect = grid.cell_rect(CellAddress::new(2, 3)).unwrap();
        assert_eq!(rect, Rect::new(120.0, 40.0, 40.0, 20.0));
    }

    #[test]
    fn cell_rect_out_of_bounds() {
        let grid = grid_10x10();
        let cell = CellAddress::new(10, 0);
        assert_eq!(
            grid.cell_rect(cell),
            Err(ResolveError::OutOfBounds {
                cell,
                size: GridSize::new(10, 10)
            })
        );
    }

    #[test]
    fn resize_recomputes_metrics() {
        let mut grid = grid_10x10();
        grid.set_grid_size(GridSize::new(5, 2));
        assert_eq!(grid.cell_at(Point::new(55.0, 55.0)), Ok(CellAddress::new(2, 1)));
        grid.set_viewport(50.0, 50.0);
        assert_eq!(grid.cell_size(), Ok((25.0, 10.0)));
        assert_eq!(grid.viewport_bounds(), (50.0, 50.0));
    }

    #[test]
    fn resolved_cell_rect_contains_the_point() {
        let grid = UniformGrid::new(GridSize::new(7, 3), 90.0, 70.0);
        for (x, y) in [(0.5, 0.5), (44.0, 33.3), (89.9, 69.9), (30.0, 10.0)] {
            let point = Point::new(x, y);
            let cell = grid.cell_at(point).unwrap();
            assert!(grid.cell_rect(cell).unwrap().contains(point), "{cell} at {x},{y}");
        }
    }
}
