//! Selection overlay helpers.
//!
//! These helpers keep selection math testable without depending on Canvas APIs.

use tracing::trace;

use super::{OverlayStyle, OverlaySurface};
use crate::error::{ResolveError, Result};
use crate::layout::CoordinateResolver;
use crate::types::{Rect, SelectionRange};

/// Bounding rectangle of a selection: the union of its top-left and
/// bottom-right cell rects. Identical for every drag direction.
pub fn selection_bounds<R: CoordinateResolver + ?Sized>(
    range: &SelectionRange,
    resolver: &R,
) -> std::result::Result<Rect, ResolveError> {
    let first = resolver.cell_rect(range.top_left())?;
    let last = resolver.cell_rect(range.bottom_right())?;
    Ok(first.union(&last))
}

/// [`selection_bounds`] inset by half the stroke so the border does not
/// straddle the grid lines around the selection.
pub fn overlay_rect<R: CoordinateResolver + ?Sized>(
    range: &SelectionRange,
    resolver: &R,
    style: &OverlayStyle,
) -> std::result::Result<Rect, ResolveError> {
    Ok(selection_bounds(range, resolver)?.inset(style.inset()))
}

/// Outcome of [`OverlayRenderer::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayUpdate {
    /// No selection; the highlight is removed.
    Cleared,
    /// Highlight moved to this rect.
    Drawn(Rect),
    /// A corner cell could not be resolved; the previous highlight stays
    /// until a later layout pass succeeds.
    Unchanged(ResolveError),
}

/// Tracks the highlight rectangle that should be on screen.
#[derive(Debug, Clone, Default)]
pub struct OverlayRenderer {
    style: OverlayStyle,
    current: Option<Rect>,
    needs_paint: bool,
}

impl OverlayRenderer {
    pub fn new(style: OverlayStyle) -> Self {
        Self {
            style,
            current: None,
            needs_paint: false,
        }
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Takes effect on the next update.
    pub fn set_style(&mut self, style: OverlayStyle) {
        self.style = style;
    }

    /// Rect of the highlight as last computed (already inset).
    pub fn current(&self) -> Option<Rect> {
        self.current
    }

    /// True after an update that has not been painted yet.
    pub fn needs_paint(&self) -> bool {
        self.needs_paint
    }

    /// Recompute the highlight for `selection`.
    pub fn update<R: CoordinateResolver + ?Sized>(
        &mut self,
        selection: Option<&SelectionRange>,
        resolver: &R,
    ) -> OverlayUpdate {
        let Some(range) = selection else {
            self.current = None;
            self.needs_paint = true;
            return OverlayUpdate::Cleared;
        };
        match overlay_rect(range, resolver, &self.style) {
            Ok(rect) => {
                self.current = Some(rect);
                self.needs_paint = true;
                OverlayUpdate::Drawn(rect)
            }
            Err(err) => {
                trace!(%err, "overlay left unchanged");
                OverlayUpdate::Unchanged(err)
            }
        }
    }

    /// Clear `surface` and draw the current highlight, if any.
    pub fn paint<S: OverlaySurface + ?Sized>(&mut self, surface: &mut S) -> Result<()> {
        surface.clear()?;
        if let Some(rect) = self.current {
            surface.draw_selection(rect, &self.style)?;
        }
        self.needs_paint = false;
        Ok(())
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
    use crate::layout::{RealizedCells, TrackLayout, UniformGrid};
    use crate::render::{RecordingSurface, SurfaceOp};
    use crate::types::{CellAddress, GridSize};

    fn cell(row: u32, col: u32) -> CellAddress {
        CellAddress::new(row, col)
    }

    fn grid() -> UniformGrid {
        UniformGrid::new(GridSize::new(10, 10), 100.0, 100.0)
    }

    #[test]
    fn bounds_cover_both_corners() {
        let range = SelectionRange::new(cell(1, 1), cell(3, 3));
        let bounds = selection_bounds(&range, &grid()).unwrap();
        assert_eq!(bounds, Rect::new(10.0, 10.0, 30.0, 30.0));
    }

    #[test]
    fn bounds_ignore_drag_direction() {
        let resolver = grid();
        let expected = selection_bounds(&SelectionRange::new(cell(2, 1), cell(5, 4)), &resolver);
        for (a, b) in [
            (cell(5, 4), cell(2, 1)),
            (cell(2, 4), cell(5, 1)),
            (cell(5, 1), cell(2, 4)),
        ] {
            assert_eq!(selection_bounds(&SelectionRange::new(a, b), &resolver), expected);
        }
    }

    #[test]
    fn bounds_with_non_uniform_tracks() {
        let layout = TrackLayout::new(vec![10.0, 40.0, 20.0], vec![5.0, 15.0]);
        let range = SelectionRange::new(cell(1, 2), cell(0, 1));
        assert_eq!(
            selection_bounds(&range, &layout),
            Ok(Rect::new(10.0, 0.0, 60.0, 20.0))
        );
    }

    #[test]
    fn inset_is_half_the_stroke() {
        let range = SelectionRange::single(cell(0, 0));
        let style = OverlayStyle {
            stroke_width: 4.0,
            ..OverlayStyle::default()
        };
        assert_eq!(
            overlay_rect(&range, &grid(), &style),
            Ok(Rect::new(2.0, 2.0, 6.0, 6.0))
        );
    }

    #[test]
    fn bogus_stroke_width_means_no_inset() {
        let range = SelectionRange::single(cell(0, 0));
        for stroke_width in [f64::NAN, -3.0, 0.0] {
            let style = OverlayStyle {
                stroke_width,
                ..OverlayStyle::default()
            };
            assert_eq!(
                overlay_rect(&range, &grid(), &style),
                Ok(Rect::new(0.0, 0.0, 10.0, 10.0))
            );
        }
    }

    #[test]
    fn absent_selection_clears() {
        let mut renderer = OverlayRenderer::default();
        let range = SelectionRange::single(cell(0, 0));
        renderer.update(Some(&range), &grid());
        assert!(renderer.current().is_some());
        assert_eq!(renderer.update(None, &grid()), OverlayUpdate::Cleared);
        assert!(renderer.current().is_none());
        assert!(renderer.needs_paint());
    }

    #[test]
    fn unresolved_corner_keeps_previous_rect() {
        let mut realized = RealizedCells::uniform(GridSize::new(4, 4), 40.0, 40.0);
        let mut renderer = OverlayRenderer::default();
        let first = SelectionRange::new(cell(0, 0), cell(1, 1));
        let OverlayUpdate::Drawn(drawn) = renderer.update(Some(&first), &realized) else {
            panic!("expected a drawn overlay");
        };

        let mut surface = RecordingSurface::new();
        renderer.paint(&mut surface).unwrap();
        assert!(!renderer.needs_paint());

        realized.unrealize(cell(3, 3));
        let second = SelectionRange::new(cell(0, 0), cell(3, 3));
        assert_eq!(
            renderer.update(Some(&second), &realized),
            OverlayUpdate::Unchanged(ResolveError::NotRealized(cell(3, 3)))
        );
        assert_eq!(renderer.current(), Some(drawn));
        assert!(!renderer.needs_paint());

        // Realized again on the next layout pass
        realized.realize(cell(3, 3), Rect::new(30.0, 30.0, 10.0, 10.0)).unwrap();
        assert!(matches!(
            renderer.update(Some(&second), &realized),
            OverlayUpdate::Drawn(_)
        ));
    }

    #[test]
    fn paint_always_clears_first() {
        let mut renderer = OverlayRenderer::default();
        let mut surface = RecordingSurface::new();
        let range = SelectionRange::new(cell(1, 1), cell(3, 3));
        renderer.update(Some(&range), &grid());
        renderer.paint(&mut surface).unwrap();
        renderer.update(None, &grid());
        renderer.paint(&mut surface).unwrap();
        assert_eq!(
            surface.ops(),
            &[
                SurfaceOp::Clear,
                SurfaceOp::Draw(Rect::new(11.0, 11.0, 28.0, 28.0)),
                SurfaceOp::Clear,
            ]
        );
    }
}
