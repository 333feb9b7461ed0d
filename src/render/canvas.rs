//! Canvas 2D overlay surface.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{OverlayStyle, OverlaySurface};
use crate::error::{GridSelectError, Result};
use crate::types::Rect;

fn render_error(msg: &str) -> GridSelectError {
    GridSelectError::Render(msg.to_string())
}

/// Draws the highlight onto a dedicated overlay canvas.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    dpr: f64,
}

impl CanvasSurface {
    /// Create a surface from an HtmlCanvasElement
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| render_error("Failed to get 2d context"))?
            .ok_or_else(|| render_error("No 2d context available"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| render_error("Failed to cast to CanvasRenderingContext2d"))?;

        Ok(Self {
            canvas,
            ctx,
            dpr: 1.0,
        })
    }

    /// Size the backing store for `width` x `height` logical pixels at `dpr`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn resize(&mut self, width: f64, height: f64, dpr: f64) {
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        let w_px = (width.max(0.0) * self.dpr).round().max(1.0) as u32;
        let h_px = (height.max(0.0) * self.dpr).round().max(1.0) as u32;
        self.canvas.set_width(w_px);
        self.canvas.set_height(h_px);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", &format!("{height}px"));
    }
}

impl OverlaySurface for CanvasSurface {
    fn clear(&mut self) -> Result<()> {
        self.ctx
            .reset_transform()
            .map_err(|_| render_error("Failed to reset transform"))?;
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
        Ok(())
    }

    fn draw_selection(&mut self, rect: Rect, style: &OverlayStyle) -> Result<()> {
        self.ctx.save();
        if self.ctx.scale(self.dpr, self.dpr).is_err() {
            self.ctx.restore();
            return Err(render_error("Failed to scale overlay context"));
        }

        self.ctx.set_fill_style_str(&style.fill_color);
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);

        self.ctx.set_stroke_style_str(&style.stroke_color);
        self.ctx.set_line_width(style.stroke_width.max(0.0));
        self.ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);

        self.ctx.restore();
        Ok(())
    }
}
