//! gridselect - rectangular cell selection for grid widgets
//!
//! Turns pointer drags over a 2D grid into a rectangular cell selection and
//! draws its highlight:
//! - Anchor/focus selection state machine with drag semantics
//! - Pointer-to-cell resolution for uniform, track-based and realized layouts
//! - Overlay geometry inset by half the stroke, with a Canvas 2D surface
//! - Pointer capture scoped to a drag
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridSelectView } from 'gridselect';
//! await init();
//! const view = new GridSelectView(host, overlay, { rows: 10, cols: 10 }, dpr);
//! view.set_render_callback(() => console.log(view.selection()));
//! ```
//!
//! # Usage (Rust)
//!
//! ```
//! use gridselect::{GridView, OverlayStyle, Point, UniformGrid, GridSize};
//!
//! let grid = UniformGrid::new(GridSize::new(10, 10), 100.0, 100.0);
//! let mut view = GridView::new(grid, OverlayStyle::default());
//! view.on_pointer_down(Point::new(15.0, 15.0));
//! view.on_pointer_move(Point::new(35.0, 35.0), true);
//! view.on_pointer_up();
//! assert_eq!(view.current_selection().map(|r| r.len()), Some(9));
//! ```

pub mod cell_ref;
pub mod config;
pub mod error;
pub mod layout;
pub mod render;
pub mod script;
pub mod selection;
pub mod types;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use config::{GridConfig, LayoutConfig};
pub use error::{GridSelectError, ResolveError, Result};
pub use layout::{AnyResolver, CoordinateResolver, RealizedCells, TrackLayout, UniformGrid};
pub use render::{OverlayRenderer, OverlayStyle, OverlaySurface, OverlayUpdate, RecordingSurface};
pub use selection::SelectionManager;
pub use types::*;
#[cfg(target_arch = "wasm32")]
pub use viewer::GridSelectView;
pub use viewer::{CaptureGuard, GridView, NoCapture, PointerCapture};

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
