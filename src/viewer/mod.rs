//! Selection widget controller and its browser host.
//!
//! This module provides:
//! - [`GridView`], which turns pointer and layout events into selection
//!   state and overlay geometry on any target
//! - Pointer capture scoped to a drag ([`CaptureGuard`])
//! - The WASM-exported `GridSelectView` (wasm32 only), which wires a host
//!   element's pointer events and an overlay canvas to a `GridView`
//!
//! Pointer listeners are registered when the widget is created and removed
//! by `destroy()`; no manual JavaScript wiring is required.

mod capture;
mod events;
mod grid_view;

pub use capture::{CaptureGuard, NoCapture, PointerCapture, PRIMARY_POINTER};
pub use grid_view::GridView;

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use tracing::{debug, warn};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::{Element, HtmlCanvasElement, HtmlElement, PointerEvent};

#[cfg(target_arch = "wasm32")]
use crate::config::GridConfig;
#[cfg(target_arch = "wasm32")]
use crate::error::GridSelectError;
#[cfg(target_arch = "wasm32")]
use crate::layout::AnyResolver;
#[cfg(target_arch = "wasm32")]
use crate::render::{CanvasSurface, OverlaySurface};
#[cfg(target_arch = "wasm32")]
use crate::types::{CellAddress, Rect};

/// Pointer events the host element listens to.
#[cfg(target_arch = "wasm32")]
const POINTER_EVENTS: [&str; 5] = [
    "pointerdown",
    "pointermove",
    "pointerup",
    "pointercancel",
    "lostpointercapture",
];

/// Shared state that can be accessed by event handlers (wasm32 only)
#[cfg(target_arch = "wasm32")]
pub(crate) struct SharedState {
    pub(crate) view: GridView<AnyResolver, Element>,
    pub(crate) surface: CanvasSurface,
    pub(crate) render_callback: Option<Function>,
}

#[cfg(target_arch = "wasm32")]
impl SharedState {
    /// Paint the overlay if the view changed it. Returns the render callback
    /// to invoke once the state borrow is released.
    pub(crate) fn flush(&mut self) -> Option<Function> {
        if !self.view.needs_paint() {
            return None;
        }
        self.repaint()
    }

    /// Paint unconditionally, e.g. after the canvas bitmap was reset.
    pub(crate) fn repaint(&mut self) -> Option<Function> {
        if let Err(err) = self.view.paint(&mut self.surface) {
            warn!(%err, "overlay paint failed");
        }
        self.render_callback.clone()
    }
}

/// Cell selection widget exported to JavaScript
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct GridSelectView {
    state: Rc<RefCell<SharedState>>,
    host: HtmlElement,
    closures: Vec<(&'static str, Closure<dyn FnMut(PointerEvent)>)>,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl GridSelectView {
    /// Attach a selection widget to `host`, drawing onto `overlay`.
    ///
    /// `config` is a `GridConfig`-shaped object (camelCase); `undefined` or
    /// `null` uses the defaults.
    ///
    /// # Errors
    /// Returns an error if `config` is malformed or the overlay canvas has
    /// no 2D context.
    #[wasm_bindgen(constructor)]
    pub fn new(
        host: HtmlElement,
        overlay: HtmlCanvasElement,
        config: JsValue,
        dpr: f64,
    ) -> Result<GridSelectView, JsValue> {
        console_error_panic_hook::set_once();

        let config: GridConfig = if config.is_undefined() || config.is_null() {
            GridConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| GridSelectError::Other(format!("Invalid config: {e}")))?
        };

        let mut surface = CanvasSurface::new(overlay)?;
        surface.resize(config.width, config.height, dpr);
        surface.clear()?;

        let target: Element = host.clone().into();
        let view = GridView::with_capture(config.build_resolver(), config.overlay.clone(), target);
        debug!(size = %config.grid_size(), "grid select view created");

        let state = Rc::new(RefCell::new(SharedState {
            view,
            surface,
            render_callback: None,
        }));

        let mut closures: Vec<(&'static str, Closure<dyn FnMut(PointerEvent)>)> = Vec::new();
        for name in POINTER_EVENTS {
            let state = state.clone();
            let host_ref = host.clone();
            let closure = Closure::wrap(Box::new(move |event: PointerEvent| {
                Self::dispatch(&state, &host_ref, name, &event);
            }) as Box<dyn FnMut(PointerEvent)>);
            host.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .map_err(|e| {
                    GridSelectError::Other(format!("Failed to add {name} listener: {e:?}"))
                })?;
            closures.push((name, closure));
        }

        Ok(GridSelectView {
            state,
            host,
            closures,
        })
    }

    /// Called after every overlay repaint.
    #[wasm_bindgen]
    pub fn set_render_callback(&mut self, callback: Option<Function>) {
        self.state.borrow_mut().render_callback = callback;
    }

    /// Change the row/column counts. Any selection is cleared first.
    #[wasm_bindgen]
    pub fn set_grid_size(&mut self, rows: u32, cols: u32) {
        let callback = {
            let mut s = self.state.borrow_mut();
            s.view.on_grid_resized(rows, cols);
            s.flush()
        };
        Self::invoke_render_callback(callback);
    }

    /// Resize the viewport to `width` x `height` logical pixels. The
    /// selection is kept and redrawn.
    #[wasm_bindgen]
    pub fn resize(&mut self, width: f64, height: f64, dpr: f64) {
        let callback = {
            let mut s = self.state.borrow_mut();
            s.surface.resize(width, height, dpr);
            s.view.on_viewport_resized(width, height);
            // Resizing the canvas wiped its bitmap
            s.repaint()
        };
        Self::invoke_render_callback(callback);
    }

    /// Register the element rect of a realized cell (realized layout only).
    /// Call `layout_updated` once the layout pass is complete. After the
    /// first call, resizes no longer regenerate the uniform elements; the
    /// host lays cells out itself.
    ///
    /// # Errors
    /// Returns an error if the layout is not realized or the cell is outside
    /// the grid.
    #[wasm_bindgen]
    pub fn realize_cell(
        &mut self,
        row: u32,
        col: u32,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), JsValue> {
        let mut s = self.state.borrow_mut();
        let realized = s
            .view
            .resolver_mut()
            .as_realized_mut()
            .ok_or("Layout is not realized")?;
        realized
            .realize(CellAddress::new(row, col), Rect::new(x, y, width, height))
            .map_err(GridSelectError::from)?;
        Ok(())
    }

    /// Forget a realized cell element. Returns whether it was registered.
    #[wasm_bindgen]
    pub fn unrealize_cell(&mut self, row: u32, col: u32) -> bool {
        self.state
            .borrow_mut()
            .view
            .resolver_mut()
            .as_realized_mut()
            .is_some_and(|realized| realized.unrealize(CellAddress::new(row, col)))
    }

    /// Recompute the overlay after cells were realized or resized.
    #[wasm_bindgen]
    pub fn layout_updated(&mut self) {
        let callback = {
            let mut s = self.state.borrow_mut();
            s.view.on_layout_updated();
            s.flush()
        };
        Self::invoke_render_callback(callback);
    }

    /// Current selection as `{ anchor: {row, col}, focus: {row, col} }`, or
    /// `undefined` when nothing is selected.
    #[wasm_bindgen]
    pub fn selection(&self) -> JsValue {
        let s = self.state.borrow();
        serde_wasm_bindgen::to_value(&s.view.current_selection()).unwrap_or(JsValue::UNDEFINED)
    }

    /// Highlight rect `{ x, y, width, height }` in logical pixels, or
    /// `undefined` when nothing is drawn.
    #[wasm_bindgen]
    pub fn overlay_rect(&self) -> JsValue {
        let s = self.state.borrow();
        serde_wasm_bindgen::to_value(&s.view.current_overlay_rect())
            .unwrap_or(JsValue::UNDEFINED)
    }

    #[wasm_bindgen]
    pub fn clear_selection(&mut self) {
        let callback = {
            let mut s = self.state.borrow_mut();
            s.view.clear_selection();
            s.flush()
        };
        Self::invoke_render_callback(callback);
    }

    /// Paint the overlay if it changed since the last paint.
    ///
    /// # Errors
    /// Returns an error if the canvas context rejects a draw call.
    #[wasm_bindgen]
    pub fn render(&mut self) -> Result<(), JsValue> {
        let mut s = self.state.borrow_mut();
        if s.view.needs_paint() {
            let SharedState { view, surface, .. } = &mut *s;
            view.paint(surface)?;
        }
        Ok(())
    }

    /// Remove the pointer listeners and the highlight. The widget ignores
    /// pointer input afterwards.
    #[wasm_bindgen]
    pub fn destroy(&mut self) {
        for (name, closure) in self.closures.drain(..) {
            let _ = self
                .host
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
        let mut s = self.state.borrow_mut();
        s.view.clear_selection();
        s.render_callback = None;
        let _ = s.flush();
        debug!("grid select view destroyed");
    }
}
