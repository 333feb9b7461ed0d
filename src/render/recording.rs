//! In-memory surface that records drawing operations.

use super::{OverlayStyle, OverlaySurface};
use crate::error::Result;
use crate::types::Rect;

/// One call made on a [`RecordingSurface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceOp {
    Clear,
    Draw(Rect),
}

/// Surface for headless hosts and tests: remembers what would have been drawn.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Rect visible after the last operation, if any.
    pub fn visible(&self) -> Option<Rect> {
        match self.ops.last() {
            Some(SurfaceOp::Draw(rect)) => Some(*rect),
            Some(SurfaceOp::Clear) | None => None,
        }
    }

    pub fn reset(&mut self) {
        self.ops.clear();
    }
}

impl OverlaySurface for RecordingSurface {
    fn clear(&mut self) -> Result<()> {
        self.ops.push(SurfaceOp::Clear);
        Ok(())
    }

    fn draw_selection(&mut self, rect: Rect, _style: &OverlayStyle) -> Result<()> {
        self.ops.push(SurfaceOp::Draw(rect));
        Ok(())
    }
}
