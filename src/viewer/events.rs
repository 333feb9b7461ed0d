//! Pointer event handlers for `GridSelectView`.
//!
//! All methods here are `pub(crate)` helpers called from the listeners
//! registered in `mod.rs`. Handlers use `try_borrow_mut` because
//! `lostpointercapture` can be dispatched while a JS call into the widget
//! still holds the state.

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use tracing::trace;
#[cfg(target_arch = "wasm32")]
use web_sys::{HtmlElement, PointerEvent};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use super::{GridSelectView, SharedState};
#[cfg(target_arch = "wasm32")]
use crate::types::Point;

/// `MouseEvent.button` value of the main button
#[cfg(target_arch = "wasm32")]
const MAIN_BUTTON: i16 = 0;
/// `MouseEvent.buttons` bit of the main button
#[cfg(target_arch = "wasm32")]
const MAIN_BUTTON_MASK: u16 = 1;

#[cfg(target_arch = "wasm32")]
impl GridSelectView {
    pub(crate) fn dispatch(
        state: &Rc<RefCell<SharedState>>,
        host: &HtmlElement,
        name: &str,
        event: &PointerEvent,
    ) {
        match name {
            "pointerdown" => {
                if event.button() != MAIN_BUTTON || !event.is_primary() {
                    return;
                }
                let point = Self::event_point(host, event);
                if Self::internal_pointer_down(state, event.pointer_id(), point) {
                    // Keep the browser from starting a text selection
                    event.prevent_default();
                }
            }
            "pointermove" => {
                let pressed = event.buttons() & MAIN_BUTTON_MASK != 0;
                let point = Self::event_point(host, event);
                Self::internal_pointer_move(state, event.pointer_id(), point, pressed);
            }
            "pointerup" | "pointercancel" => {
                Self::internal_pointer_up(state, event.pointer_id());
            }
            "lostpointercapture" => {
                // Fires late for a capture we released and re-acquired
                if host.has_pointer_capture(event.pointer_id()) {
                    return;
                }
                Self::internal_capture_lost(state);
            }
            _ => {}
        }
    }

    /// Event position relative to the host element's top-left corner.
    fn event_point(host: &HtmlElement, event: &PointerEvent) -> Point {
        let rect = host.get_bounding_client_rect();
        Point::new(
            f64::from(event.client_x()) - rect.left(),
            f64::from(event.client_y()) - rect.top(),
        )
    }

    pub(crate) fn internal_pointer_down(
        state: &Rc<RefCell<SharedState>>,
        pointer_id: i32,
        point: Point,
    ) -> bool {
        let (started, callback) = {
            let Ok(mut s) = state.try_borrow_mut() else {
                trace!("pointer down while state is borrowed");
                return false;
            };
            let started = s.view.on_pointer_down_for(pointer_id, point);
            (started, s.flush())
        };
        Self::invoke_render_callback(callback);
        started
    }

    pub(crate) fn internal_pointer_move(
        state: &Rc<RefCell<SharedState>>,
        pointer_id: i32,
        point: Point,
        pressed: bool,
    ) {
        let callback = (|| {
            let mut s = state.try_borrow_mut().ok()?;
            if !s.view.on_pointer_move_for(pointer_id, point, pressed) {
                return None;
            }
            s.flush()
        })();
        Self::invoke_render_callback(callback);
    }

    pub(crate) fn internal_pointer_up(state: &Rc<RefCell<SharedState>>, pointer_id: i32) {
        if let Ok(mut s) = state.try_borrow_mut() {
            s.view.on_pointer_up_for(pointer_id);
        }
    }

    pub(crate) fn internal_capture_lost(state: &Rc<RefCell<SharedState>>) {
        if let Ok(mut s) = state.try_borrow_mut() {
            s.view.on_capture_lost();
        }
    }

    pub(crate) fn invoke_render_callback(callback: Option<Function>) {
        if let Some(callback) = callback {
            let _ = callback.call0(&JsValue::NULL);
        }
    }
}
