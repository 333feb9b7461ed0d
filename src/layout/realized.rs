//! Hit testing against cell elements the host has actually laid out.
//!
//! Hosts that realize one element per cell (possibly only the visible ones,
//! possibly with non-uniform sizes) register each element's rectangle here
//! in paint order. A point resolves to the topmost element under it; a cell
//! without an element is `NotRealized` until the host's next layout pass.
//!
//! A registry filled by [`RealizedCells::uniform`] is owned by the library:
//! nobody else will lay its elements out again, so grid and viewport resizes
//! regenerate them. Once the host registers or removes an element itself,
//! resizes only drop elements that fell outside the grid.

use std::collections::HashMap;

use super::{check_cell, check_point, check_rect, check_viewport, CoordinateResolver, UniformGrid};
use crate::error::ResolveError;
use crate::types::{CellAddress, GridSize, Point, Rect};

#[derive(Debug, Clone, Default)]
pub struct RealizedCells {
    size: GridSize,
    width: f64,
    height: f64,
    /// Element rects by cell
    rects: HashMap<CellAddress, Rect>,
    /// Paint order, bottom to top
    order: Vec<CellAddress>,
    /// Elements were generated by `realize_uniform`, not by a host
    generated: bool,
}

impl RealizedCells {
    /// Registry with nothing realized yet.
    pub fn new(size: GridSize, width: f64, height: f64) -> Self {
        Self {
            size,
            width,
            height,
            rects: HashMap::new(),
            order: Vec::new(),
            generated: false,
        }
    }

    /// Realize every cell of a uniform grid filling the viewport, in
    /// row-major order.
    pub fn uniform(size: GridSize, width: f64, height: f64) -> Self {
        let mut realized = Self::new(size, width, height);
        realized.realize_uniform();
        realized
    }

    /// Replace all elements with a full uniform layout of the current grid.
    /// Leaves nothing realized when the viewport is degenerate.
    pub fn realize_uniform(&mut self) {
        self.clear();
        let grid = UniformGrid::new(self.size, self.width, self.height);
        for cell in self.size.cells() {
            if let Ok(rect) = grid.cell_rect(cell) {
                self.rects.insert(cell, rect);
                self.order.push(cell);
            }
        }
        self.generated = true;
    }

    /// Register (or move) the element for `cell`. The element becomes the
    /// topmost one.
    pub fn realize(&mut self, cell: CellAddress, rect: Rect) -> Result<(), ResolveError> {
        check_cell(self.size, cell)?;
        self.generated = false;
        if self.rects.insert(cell, rect).is_some() {
            self.order.retain(|&c| c != cell);
        }
        self.order.push(cell);
        Ok(())
    }

    /// Forget the element for `cell`, e.g. when it scrolls out of a
    /// virtualized panel. Returns whether it was realized.
    pub fn unrealize(&mut self, cell: CellAddress) -> bool {
        if self.rects.remove(&cell).is_some() {
            self.generated = false;
            self.order.retain(|&c| c != cell);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.rects.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_realized(&self, cell: CellAddress) -> bool {
        self.rects.contains_key(&cell)
    }

    /// Whether resizes regenerate the elements (see the module docs).
    pub fn is_generated(&self) -> bool {
        self.generated
    }
}

impl CoordinateResolver for RealizedCells {
    fn grid_size(&self) -> GridSize {
        self.size
    }

    fn viewport_bounds(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn cell_at(&self, point: Point) -> Result<CellAddress, ResolveError> {
        check_viewport(self.size, self.width, self.height)?;
        check_point(point)?;
        self.order
            .iter()
            .rev()
            .find(|&&cell| self.rects.get(&cell).is_some_and(|r| r.contains(point)))
            .copied()
            .ok_or(ResolveError::Miss {
                x: point.x,
                y: point.y,
            })
    }

    fn cell_rect(&self, cell: CellAddress) -> Result<Rect, ResolveError> {
        check_viewport(self.size, self.width, self.height)?;
        check_cell(self.size, cell)?;
        let rect = self
            .rects
            .get(&cell)
            .copied()
            .ok_or(ResolveError::NotRealized(cell))?;
        check_rect(cell, rect)
    }

    /// Generated registries are laid out again for the new size. Host
    /// registries drop elements outside the new bounds; the rest stay until
    /// the host lays them out again.
    fn set_grid_size(&mut self, size: GridSize) {
        self.size = size;
        if self.generated {
            self.realize_uniform();
        } else {
            self.rects.retain(|&cell, _| size.contains(cell));
            self.order.retain(|&cell| size.contains(cell));
        }
    }

    fn set_viewport(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        if self.generated {
            self.realize_uniform();
        }
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

    fn cell(row: u32, col: u32) -> CellAddress {
        CellAddress::new(row, col)
    }

    #[test]
    fn uniform_realization_matches_arithmetic() {
        let size = GridSize::new(10, 10);
        let realized = RealizedCells::uniform(size, 100.0, 100.0);
        let arithmetic = UniformGrid::new(size, 100.0, 100.0);
        assert_eq!(realized.len(), 100);
        for (x, y) in [(55.0, 55.0), (0.0, 99.0), (99.9, 0.1), (10.0, 20.0)] {
            let point = Point::new(x, y);
            assert_eq!(realized.cell_at(point), arithmetic.cell_at(point));
        }
        assert_eq!(
            realized.cell_rect(cell(3, 7)),
            arithmetic.cell_rect(cell(3, 7))
        );
    }

    #[test]
    fn points_outside_every_element_miss() {
        let realized = RealizedCells::uniform(GridSize::new(10, 10), 100.0, 100.0);
        assert_eq!(
            realized.cell_at(Point::new(150.0, 150.0)),
            Err(ResolveError::Miss { x: 150.0, y: 150.0 })
        );
        assert_eq!(
            realized.cell_at(Point::new(-1.0, 5.0)),
            Err(ResolveError::Miss { x: -1.0, y: 5.0 })
        );
    }

    #[test]
    fn topmost_element_wins() {
        let mut realized = RealizedCells::new(GridSize::new(3, 3), 300.0, 300.0);
        realized.realize(cell(0, 0), Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        realized.realize(cell(1, 1), Rect::new(50.0, 50.0, 100.0, 100.0)).unwrap();
        assert_eq!(realized.cell_at(Point::new(75.0, 75.0)), Ok(cell(1, 1)));

        // Re-realizing moves the element to the top
        realized.realize(cell(0, 0), Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        assert_eq!(realized.cell_at(Point::new(75.0, 75.0)), Ok(cell(0, 0)));
        assert_eq!(realized.len(), 2);
    }

    #[test]
    fn unrealized_cells_have_no_rect() {
        let mut realized = RealizedCells::uniform(GridSize::new(4, 4), 40.0, 40.0);
        assert!(realized.unrealize(cell(2, 2)));
        assert!(!realized.unrealize(cell(2, 2)));
        assert_eq!(
            realized.cell_rect(cell(2, 2)),
            Err(ResolveError::NotRealized(cell(2, 2)))
        );
        assert_eq!(
            realized.cell_at(Point::new(25.0, 25.0)),
            Err(ResolveError::Miss { x: 25.0, y: 25.0 })
        );
    }

    #[test]
    fn realize_rejects_out_of_bounds() {
        let mut realized = RealizedCells::new(GridSize::new(2, 2), 20.0, 20.0);
        assert_eq!(
            realized.realize(cell(2, 0), Rect::new(0.0, 0.0, 10.0, 10.0)),
            Err(ResolveError::OutOfBounds {
                cell: cell(2, 0),
                size: GridSize::new(2, 2)
            })
        );
        assert!(realized.is_empty());
    }

    #[test]
    fn zero_sized_elements_are_collapsed() {
        let mut realized = RealizedCells::new(GridSize::new(2, 2), 20.0, 20.0);
        realized.realize(cell(1, 1), Rect::new(10.0, 10.0, 0.0, 10.0)).unwrap();
        assert_eq!(
            realized.cell_rect(cell(1, 1)),
            Err(ResolveError::CollapsedCell(cell(1, 1)))
        );
    }

    #[test]
    fn generated_layout_follows_grid_resizes() {
        let mut realized = RealizedCells::uniform(GridSize::new(10, 10), 100.0, 100.0);
        assert!(realized.is_generated());

        realized.set_grid_size(GridSize::new(5, 5));
        assert_eq!(realized.len(), 25);
        assert_eq!(realized.cell_at(Point::new(75.0, 75.0)), Ok(cell(3, 3)));
        assert_eq!(
            realized.cell_rect(cell(4, 4)),
            Ok(Rect::new(80.0, 80.0, 20.0, 20.0))
        );

        realized.set_grid_size(GridSize::new(20, 20));
        assert_eq!(realized.len(), 400);
        assert_eq!(realized.cell_at(Point::new(95.0, 95.0)), Ok(cell(19, 19)));
    }

    #[test]
    fn generated_layout_follows_viewport_resizes() {
        let mut realized = RealizedCells::uniform(GridSize::new(4, 4), 40.0, 40.0);
        realized.set_viewport(80.0, 80.0);
        assert_eq!(realized.cell_at(Point::new(70.0, 70.0)), Ok(cell(3, 3)));
        assert_eq!(
            realized.cell_rect(cell(1, 1)),
            Ok(Rect::new(20.0, 20.0, 20.0, 20.0))
        );

        // Degenerate viewports leave nothing realized until the next resize
        realized.set_viewport(0.0, 80.0);
        assert!(realized.is_empty());
        realized.set_viewport(40.0, 40.0);
        assert_eq!(realized.len(), 16);
    }

    #[test]
    fn host_registration_stops_regeneration() {
        let mut realized = RealizedCells::uniform(GridSize::new(4, 4), 40.0, 40.0);
        realized.realize(cell(0, 0), Rect::new(0.0, 0.0, 15.0, 15.0)).unwrap();
        assert!(!realized.is_generated());

        realized.set_viewport(80.0, 80.0);
        assert_eq!(
            realized.cell_rect(cell(0, 0)),
            Ok(Rect::new(0.0, 0.0, 15.0, 15.0))
        );
        assert_eq!(realized.len(), 16);
    }

    #[test]
    fn shrinking_grid_drops_stale_elements() {
        let mut realized = RealizedCells::new(GridSize::new(4, 4), 40.0, 40.0);
        for c in GridSize::new(4, 4).cells() {
            let (x, y) = (f64::from(c.col) * 10.0, f64::from(c.row) * 10.0);
            realized.realize(c, Rect::new(x, y, 10.0, 10.0)).unwrap();
        }
        realized.set_grid_size(GridSize::new(2, 3));
        assert_eq!(realized.len(), 6);
        assert!(!realized.is_realized(cell(3, 3)));
        assert!(realized.is_realized(cell(1, 2)));
        assert_eq!(
            realized.cell_at(Point::new(35.0, 35.0)),
            Err(ResolveError::Miss { x: 35.0, y: 35.0 })
        );
    }

    #[test]
    fn degenerate_viewport_is_unresolved() {
        let mut realized = RealizedCells::new(GridSize::new(4, 4), 40.0, 40.0);
        realized.realize(cell(0, 0), Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        realized.set_viewport(0.0, 40.0);
        assert_eq!(
            realized.cell_at(Point::new(5.0, 5.0)),
            Err(ResolveError::DegenerateViewport)
        );
        assert_eq!(
            realized.cell_rect(cell(0, 0)),
            Err(ResolveError::DegenerateViewport)
        );

        let empty = RealizedCells::uniform(GridSize::new(0, 4), 40.0, 40.0);
        assert!(empty.is_empty());
        assert_eq!(
            empty.cell_at(Point::new(5.0, 5.0)),
            Err(ResolveError::DegenerateViewport)
        );
    }
}
