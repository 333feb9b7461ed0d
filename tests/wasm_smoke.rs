//! Browser smoke tests for the wasm32 build.
//!
//! Run with: wasm-pack test --headless --chrome
#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use gridselect::render::CanvasSurface;
use gridselect::{GridSelectError, GridSelectView};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn host_and_overlay() -> (HtmlElement, HtmlCanvasElement) {
    let document = web_sys::window().unwrap().document().unwrap();
    let host: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
    let overlay: HtmlCanvasElement = document
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap();
    host.append_child(&overlay).unwrap();
    document.body().unwrap().append_child(&host).unwrap();
    (host, overlay)
}

#[wasm_bindgen_test]
fn version_is_set() {
    assert!(!gridselect::version().is_empty());
}

#[wasm_bindgen_test]
fn create_and_destroy() {
    let (host, overlay) = host_and_overlay();
    let mut view = GridSelectView::new(host, overlay.clone(), JsValue::UNDEFINED, 1.0).unwrap();
    assert!(view.selection().is_undefined());
    assert_eq!(overlay.width(), 640);
    assert_eq!(overlay.height(), 200);

    view.set_grid_size(4, 4);
    view.resize(100.0, 100.0, 2.0);
    assert_eq!(overlay.width(), 200);
    view.layout_updated();
    view.clear_selection();
    assert!(view.overlay_rect().is_undefined());
    view.destroy();
}

#[wasm_bindgen_test]
fn realize_requires_realized_layout() {
    let (host, overlay) = host_and_overlay();
    let mut view = GridSelectView::new(host, overlay, JsValue::NULL, 1.0).unwrap();
    assert!(view.realize_cell(0, 0, 0.0, 0.0, 10.0, 10.0).is_err());
    assert!(!view.unrealize_cell(0, 0));
    view.destroy();
}

#[wasm_bindgen_test]
fn canvas_without_2d_context_is_a_render_error() {
    let (_, overlay) = host_and_overlay();
    // A canvas holds at most one context kind
    assert!(overlay.get_context("bitmaprenderer").unwrap().is_some());
    assert!(matches!(
        CanvasSurface::new(overlay),
        Err(GridSelectError::Render(_))
    ));
}

