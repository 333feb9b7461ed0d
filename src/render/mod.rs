//! Selection highlight rendering.
//!
//! This module provides:
//! - Selection-to-rectangle geometry ([`selection_bounds`], [`overlay_rect`])
//! - [`OverlayRenderer`], which tracks the highlight currently on screen
//! - The [`OverlaySurface`] drawing trait with a Canvas 2D backend (wasm32)
//!   and an in-memory [`RecordingSurface`]

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;
pub mod selection;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{RecordingSurface, SurfaceOp};
pub use selection::{overlay_rect, selection_bounds, OverlayRenderer, OverlayUpdate};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::Rect;

/// Colors and stroke used for the selection highlight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayStyle {
    /// Border color (CSS)
    pub stroke_color: String,
    /// Interior color (CSS)
    pub fill_color: String,
    /// Border thickness in pixels
    pub stroke_width: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            stroke_color: "#1E90FF".to_string(),
            fill_color: "rgba(30, 144, 255, 0.157)".to_string(),
            stroke_width: 2.0,
        }
    }
}

impl OverlayStyle {
    /// Inset that keeps the whole stroke inside the selected cells:
    /// half the stroke width, or 0 for a non-positive/non-finite width.
    pub fn inset(&self) -> f64 {
        if self.stroke_width.is_finite() && self.stroke_width > 0.0 {
            self.stroke_width / 2.0
        } else {
            0.0
        }
    }
}

/// Something the overlay can be drawn onto.
///
/// Each paint is a full `clear` followed by at most one `draw_selection`;
/// implementations never need to patch a previous frame.
pub trait OverlaySurface {
    /// Erase everything previously drawn.
    fn clear(&mut self) -> Result<()>;

    /// Draw the highlight for `rect` (already inset).
    fn draw_selection(&mut self, rect: Rect, style: &OverlayStyle) -> Result<()>;
}
