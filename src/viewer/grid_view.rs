//! Pointer and layout event handling for one grid widget.
//!
//! `GridView` wires the pieces together in event order:
//! pointer-down resolves the cell and starts a selection, pointer-move
//! extends it while the drag lasts, pointer-up only ends the drag. Grid
//! dimension changes clear the selection before the resolver re-derives its
//! metrics, so no range ever refers to cells outside the grid.

use tracing::{debug, trace, warn};

use super::capture::{CaptureGuard, NoCapture, PointerCapture, PRIMARY_POINTER};
use crate::error::Result;
use crate::layout::CoordinateResolver;
use crate::render::{OverlayRenderer, OverlayStyle, OverlaySurface, OverlayUpdate};
use crate::selection::SelectionManager;
use crate::types::{GridSize, Point, Rect, SelectionRange};

/// An in-progress drag and the capture it holds.
#[derive(Debug)]
struct Drag<T: PointerCapture> {
    pointer_id: i32,
    _capture: Option<CaptureGuard<T>>,
}

/// Selection state, overlay and drag tracking for one grid.
#[derive(Debug)]
pub struct GridView<R: CoordinateResolver, T: PointerCapture + Clone = NoCapture> {
    resolver: R,
    selection: SelectionManager,
    overlay: OverlayRenderer,
    capture_target: T,
    drag: Option<Drag<T>>,
}

impl<R: CoordinateResolver> GridView<R, NoCapture> {
    /// View without pointer capture.
    pub fn new(resolver: R, style: OverlayStyle) -> Self {
        Self::with_capture(resolver, style, NoCapture)
    }
}

impl<R: CoordinateResolver, T: PointerCapture + Clone> GridView<R, T> {
    /// View that captures the pointer on `capture_target` while dragging.
    pub fn with_capture(resolver: R, style: OverlayStyle, capture_target: T) -> Self {
        Self {
            resolver,
            selection: SelectionManager::new(),
            overlay: OverlayRenderer::new(style),
            capture_target,
            drag: None,
        }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Mutable access for layout updates (e.g. realizing cells). Follow up
    /// with [`on_layout_updated`](Self::on_layout_updated); changing the grid
    /// size here bypasses the selection reset, use
    /// [`on_grid_resized`](Self::on_grid_resized) for that.
    pub fn resolver_mut(&mut self) -> &mut R {
        &mut self.resolver
    }

    pub fn current_selection(&self) -> Option<&SelectionRange> {
        self.selection.current()
    }

    /// Highlight rect in viewport pixels, already inset for the stroke.
    pub fn current_overlay_rect(&self) -> Option<Rect> {
        self.overlay.current()
    }

    pub fn overlay_style(&self) -> &OverlayStyle {
        self.overlay.style()
    }

    pub fn set_overlay_style(&mut self, style: OverlayStyle) {
        self.overlay.set_style(style);
        self.refresh();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn needs_paint(&self) -> bool {
        self.overlay.needs_paint()
    }

    /// Primary (mouse) pointer pressed at `point`.
    pub fn on_pointer_down(&mut self, point: Point) -> bool {
        self.on_pointer_down_for(PRIMARY_POINTER, point)
    }

    /// Pointer `pointer_id` pressed at `point`. Returns whether a selection
    /// started. A press that resolves to no cell leaves everything as is.
    pub fn on_pointer_down_for(&mut self, pointer_id: i32, point: Point) -> bool {
        // A new press ends whatever drag the last pointer-up failed to end
        self.end_drag();

        let cell = match self.resolver.cell_at(point) {
            Ok(cell) => cell,
            Err(err) => {
                trace!(%err, x = point.x, y = point.y, "pointer down unresolved");
                return false;
            }
        };

        let capture = match CaptureGuard::acquire(self.capture_target.clone(), pointer_id) {
            Ok(guard) => Some(guard),
            Err(err) => {
                warn!(%err, pointer_id, "drag continues without pointer capture");
                None
            }
        };
        self.drag = Some(Drag {
            pointer_id,
            _capture: capture,
        });
        self.selection.start(cell);
        self.refresh();
        true
    }

    /// Primary pointer moved. See [`on_pointer_move_for`](Self::on_pointer_move_for).
    pub fn on_pointer_move(&mut self, point: Point, button_pressed: bool) -> bool {
        self.on_pointer_move_for(PRIMARY_POINTER, point, button_pressed)
    }

    /// Extend the selection to the cell under `point` if this pointer is
    /// dragging with its button held. Returns whether the selection changed.
    pub fn on_pointer_move_for(
        &mut self,
        pointer_id: i32,
        point: Point,
        button_pressed: bool,
    ) -> bool {
        if !button_pressed {
            return false;
        }
        if !self.drag.as_ref().is_some_and(|d| d.pointer_id == pointer_id) {
            return false;
        }
        match self.resolver.cell_at(point) {
            Ok(cell) => {
                if !self.selection.update(cell) {
                    return false;
                }
                self.refresh();
                true
            }
            Err(err) => {
                trace!(%err, x = point.x, y = point.y, "pointer move unresolved");
                false
            }
        }
    }

    /// Primary pointer released.
    pub fn on_pointer_up(&mut self) -> bool {
        self.on_pointer_up_for(PRIMARY_POINTER)
    }

    /// End the drag of `pointer_id` and release its capture. The selection
    /// itself is kept. Returns whether a drag ended.
    pub fn on_pointer_up_for(&mut self, pointer_id: i32) -> bool {
        if !self.drag.as_ref().is_some_and(|d| d.pointer_id == pointer_id) {
            return false;
        }
        self.end_drag()
    }

    /// The host lost pointer capture (focus change, element removed, ...).
    pub fn on_capture_lost(&mut self) -> bool {
        self.end_drag()
    }

    /// Row/column counts changed: the selection is dropped first, then the
    /// resolver re-derives its metrics.
    pub fn on_grid_resized(&mut self, rows: u32, cols: u32) -> OverlayUpdate {
        self.end_drag();
        self.selection.clear();
        let size = GridSize::new(rows, cols);
        debug!(%size, "grid resized");
        self.resolver.set_grid_size(size);
        self.refresh()
    }

    /// Viewport pixel size changed; the selection is kept and redrawn.
    pub fn on_viewport_resized(&mut self, width: f64, height: f64) -> OverlayUpdate {
        self.resolver.set_viewport(width, height);
        self.refresh()
    }

    /// Cell layout changed (cells realized, tracks resized). Retries an
    /// overlay that could not be resolved before.
    pub fn on_layout_updated(&mut self) -> OverlayUpdate {
        self.refresh()
    }

    /// Drop the selection and any drag in progress.
    pub fn clear_selection(&mut self) -> OverlayUpdate {
        self.end_drag();
        self.selection.clear();
        self.refresh()
    }

    /// Clear `surface` and draw the current highlight.
    pub fn paint<S: OverlaySurface + ?Sized>(&mut self, surface: &mut S) -> Result<()> {
        self.overlay.paint(surface)
    }

    fn refresh(&mut self) -> OverlayUpdate {
        self.overlay.update(self.selection.current(), &self.resolver)
    }

    fn end_drag(&mut self) -> bool {
        // Dropping the drag releases its capture
        self.drag.take().is_some()
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
    use crate::error::ResolveError;
    use crate::layout::{RealizedCells, UniformGrid};
    use crate::render::{RecordingSurface, SurfaceOp};
    use crate::types::CellAddress;
    use crate::viewer::capture::tests::CaptureLog;

    fn cell(row: u32, col: u32) -> CellAddress {
        CellAddress::new(row, col)
    }

    /// 10x10 grid of 10px cells, 2px stroke.
    fn view() -> GridView<UniformGrid> {
        GridView::new(
            UniformGrid::new(GridSize::new(10, 10), 100.0, 100.0),
            OverlayStyle::default(),
        )
    }

    fn captured_view(log: &CaptureLog) -> GridView<UniformGrid, CaptureLog> {
        GridView::with_capture(
            UniformGrid::new(GridSize::new(10, 10), 100.0, 100.0),
            OverlayStyle::default(),
            log.clone(),
        )
    }

    #[test]
    fn drag_selects_block() {
        let mut view = view();
        assert!(view.on_pointer_down(Point::new(15.0, 15.0)));
        assert!(view.on_pointer_move(Point::new(35.0, 35.0), true));
        assert!(view.on_pointer_up());

        let range = view.current_selection().unwrap();
        assert_eq!((range.anchor, range.focus), (cell(1, 1), cell(3, 3)));
        assert_eq!(
            view.current_overlay_rect(),
            Some(Rect::new(11.0, 11.0, 28.0, 28.0))
        );
    }

    #[test]
    fn only_latest_focus_matters() {
        let mut direct = view();
        direct.on_pointer_down(Point::new(15.0, 15.0));
        direct.on_pointer_move(Point::new(35.0, 35.0), true);

        let mut wandering = view();
        wandering.on_pointer_down(Point::new(15.0, 15.0));
        wandering.on_pointer_move(Point::new(5.0, 5.0), true);
        wandering.on_pointer_move(Point::new(95.0, 5.0), true);
        wandering.on_pointer_move(Point::new(35.0, 35.0), true);

        assert_eq!(direct.current_selection(), wandering.current_selection());
        assert_eq!(direct.current_overlay_rect(), wandering.current_overlay_rect());
    }

    #[test]
    fn reversed_drag_draws_same_rect() {
        let mut forward = view();
        forward.on_pointer_down(Point::new(15.0, 25.0));
        forward.on_pointer_move(Point::new(45.0, 65.0), true);

        let mut backward = view();
        backward.on_pointer_down(Point::new(45.0, 65.0));
        backward.on_pointer_move(Point::new(15.0, 25.0), true);

        assert_eq!(forward.current_overlay_rect(), backward.current_overlay_rect());
    }

    #[test]
    fn moves_without_button_or_drag_are_ignored() {
        let mut view = view();
        assert!(!view.on_pointer_move(Point::new(35.0, 35.0), true));
        assert!(view.current_selection().is_none());

        view.on_pointer_down(Point::new(15.0, 15.0));
        assert!(!view.on_pointer_move(Point::new(35.0, 35.0), false));
        view.on_pointer_up();
        assert!(!view.on_pointer_move(Point::new(55.0, 55.0), true));
        assert_eq!(
            view.current_selection(),
            Some(&SelectionRange::single(cell(1, 1)))
        );
    }

    #[test]
    fn pointer_up_keeps_selection() {
        let mut view = view();
        view.on_pointer_down(Point::new(15.0, 15.0));
        view.on_pointer_move(Point::new(25.0, 25.0), true);
        let before = view.current_overlay_rect();
        view.on_pointer_up();
        assert!(!view.is_dragging());
        assert!(view.current_selection().is_some());
        assert_eq!(view.current_overlay_rect(), before);
    }

    #[test]
    fn moves_outside_viewport_clamp() {
        let mut view = view();
        view.on_pointer_down(Point::new(55.0, 55.0));
        view.on_pointer_move(Point::new(-40.0, 400.0), true);
        let range = view.current_selection().unwrap();
        assert_eq!(range.focus, cell(9, 0));
    }

    #[test]
    fn grid_resize_clears_active_selection() {
        let mut view = view();
        view.on_pointer_down(Point::new(85.0, 85.0));
        view.on_pointer_move(Point::new(95.0, 95.0), true);
        assert_eq!(view.on_grid_resized(5, 5), OverlayUpdate::Cleared);
        assert!(view.current_selection().is_none());
        assert!(view.current_overlay_rect().is_none());
        assert!(!view.is_dragging());

        // Still pressed, but no drag survives the resize
        assert!(!view.on_pointer_move(Point::new(10.0, 10.0), true));
        assert!(view.current_selection().is_none());
        assert_eq!(view.resolver().grid_size(), GridSize::new(5, 5));
    }

    #[test]
    fn viewport_resize_redraws_same_range() {
        let mut view = view();
        view.on_pointer_down(Point::new(15.0, 15.0));
        view.on_pointer_move(Point::new(25.0, 25.0), true);
        view.on_pointer_up();
        let update = view.on_viewport_resized(200.0, 200.0);
        assert_eq!(update, OverlayUpdate::Drawn(Rect::new(21.0, 21.0, 38.0, 38.0)));
        assert_eq!(view.current_selection().unwrap().focus, cell(2, 2));
    }

    #[test]
    fn degenerate_viewport_ignores_pointer() {
        let mut view = GridView::new(
            UniformGrid::new(GridSize::new(10, 10), 0.0, 100.0),
            OverlayStyle::default(),
        );
        assert!(!view.on_pointer_down(Point::new(5.0, 5.0)));
        assert!(!view.is_dragging());
        assert!(view.current_selection().is_none());
    }

    #[test]
    fn unrealized_corner_keeps_overlay_until_layout_pass() {
        let mut view = GridView::new(
            RealizedCells::uniform(GridSize::new(4, 4), 40.0, 40.0),
            OverlayStyle::default(),
        );
        view.on_pointer_down(Point::new(5.0, 5.0));
        view.on_pointer_move(Point::new(15.0, 15.0), true);
        let drawn = view.current_overlay_rect();

        view.resolver_mut().unrealize(cell(2, 2));
        // The point misses, so the selection does not move
        assert!(!view.on_pointer_move(Point::new(25.0, 25.0), true));
        assert_eq!(view.current_selection().unwrap().focus, cell(1, 1));

        view.resolver_mut().unrealize(cell(1, 1));
        assert_eq!(
            view.on_layout_updated(),
            OverlayUpdate::Unchanged(ResolveError::NotRealized(cell(1, 1)))
        );
        assert_eq!(view.current_overlay_rect(), drawn);

        view.resolver_mut().realize_uniform();
        assert_eq!(view.on_layout_updated(), OverlayUpdate::Drawn(drawn.unwrap()));
    }

    #[test]
    fn paint_reflects_latest_state() {
        let mut view = view();
        let mut surface = RecordingSurface::new();
        view.on_pointer_down(Point::new(15.0, 15.0));
        assert!(view.needs_paint());
        view.paint(&mut surface).unwrap();
        assert!(!view.needs_paint());
        assert_eq!(surface.visible(), Some(Rect::new(11.0, 11.0, 8.0, 8.0)));

        view.clear_selection();
        view.paint(&mut surface).unwrap();
        assert_eq!(surface.visible(), None);
    }

    #[test]
    fn style_change_reinsets_highlight() {
        let mut view = view();
        let mut surface = RecordingSurface::new();
        view.on_pointer_down(Point::new(15.0, 15.0));
        view.on_pointer_move(Point::new(35.0, 35.0), true);
        view.paint(&mut surface).unwrap();
        surface.reset();

        view.set_overlay_style(OverlayStyle {
            stroke_width: 6.0,
            ..OverlayStyle::default()
        });
        assert_eq!(view.overlay_style().stroke_width, 6.0);
        assert!(view.needs_paint());
        view.paint(&mut surface).unwrap();
        assert_eq!(
            surface.ops(),
            &[
                SurfaceOp::Clear,
                SurfaceOp::Draw(Rect::new(13.0, 13.0, 24.0, 24.0))
            ]
        );
    }

    #[test]
    fn capture_held_only_while_dragging() {
        let log = CaptureLog::default();
        let mut view = captured_view(&log);
        view.on_pointer_down_for(3, Point::new(15.0, 15.0));
        assert_eq!(log.held(), 1);
        view.on_pointer_up_for(3);
        assert_eq!(log.held(), 0);
        assert_eq!(log.calls(), vec![("set", 3), ("release", 3)]);
    }

    #[test]
    fn capture_released_on_every_exit_path() {
        let log = CaptureLog::default();
        let mut view = captured_view(&log);

        view.on_pointer_down(Point::new(15.0, 15.0));
        view.on_capture_lost();
        assert_eq!(log.held(), 0);

        view.on_pointer_down(Point::new(15.0, 15.0));
        view.on_grid_resized(3, 3);
        assert_eq!(log.held(), 0);

        view.on_pointer_down(Point::new(15.0, 15.0));
        view.on_pointer_down(Point::new(25.0, 25.0));
        assert_eq!(log.held(), 1);

        drop(view);
        assert_eq!(log.held(), 0);
    }

    #[test]
    fn other_pointers_do_not_steer_the_drag() {
        let log = CaptureLog::default();
        let mut view = captured_view(&log);
        view.on_pointer_down_for(5, Point::new(15.0, 15.0));
        assert!(!view.on_pointer_move_for(6, Point::new(55.0, 55.0), true));
        assert!(!view.on_pointer_up_for(6));
        assert!(view.is_dragging());
        assert!(view.on_pointer_move_for(5, Point::new(55.0, 55.0), true));
        assert_eq!(view.current_selection().unwrap().focus, cell(5, 5));
    }

    #[test]
    fn refused_capture_still_drags() {
        let log = CaptureLog {
            refuse: true,
            ..CaptureLog::default()
        };
        let mut view = captured_view(&log);
        assert!(view.on_pointer_down(Point::new(15.0, 15.0)));
        assert!(view.on_pointer_move(Point::new(35.0, 15.0), true));
        assert!(view.on_pointer_up());
        assert!(log.calls().is_empty());
    }

    #[test]
    fn missed_press_keeps_previous_selection() {
        let mut view = GridView::new(
            RealizedCells::uniform(GridSize::new(4, 4), 40.0, 40.0),
            OverlayStyle::default(),
        );
        view.on_pointer_down(Point::new(5.0, 5.0));
        view.on_pointer_up();
        assert!(!view.on_pointer_down(Point::new(100.0, 100.0)));
        assert!(!view.on_pointer_move(Point::new(25.0, 25.0), true));
        assert_eq!(
            view.current_selection(),
            Some(&SelectionRange::single(cell(0, 0)))
        );
    }
}
