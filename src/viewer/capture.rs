//! Exclusive pointer capture for the duration of a drag.
//!
//! A [`CaptureGuard`] is created when a drag starts and released when it is
//! dropped, so every way a drag can end (pointer-up, capture loss, a new
//! press, a grid resize, the view going away) releases the capture.

use tracing::debug;

use crate::error::Result;

/// Pointer id browsers use for the mouse.
pub const PRIMARY_POINTER: i32 = 1;

/// Element that can route all events of one pointer to itself.
pub trait PointerCapture {
    fn set_capture(&self, pointer_id: i32) -> Result<()>;

    /// Must tolerate being called for a pointer that is no longer captured.
    fn release_capture(&self, pointer_id: i32);
}

/// Capture target for hosts without pointer capture (CLI, tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn set_capture(&self, _pointer_id: i32) -> Result<()> {
        Ok(())
    }

    fn release_capture(&self, _pointer_id: i32) {}
}

#[cfg(target_arch = "wasm32")]
impl PointerCapture for web_sys::Element {
    fn set_capture(&self, pointer_id: i32) -> Result<()> {
        self.set_pointer_capture(pointer_id).map_err(|e| {
            crate::error::GridSelectError::Other(format!("setPointerCapture failed: {e:?}"))
        })
    }

    fn release_capture(&self, pointer_id: i32) {
        // NotFoundError once the browser has already released it implicitly
        let _ = self.release_pointer_capture(pointer_id);
    }
}

/// Holds a pointer capture; releases it on drop.
#[derive(Debug)]
pub struct CaptureGuard<T: PointerCapture> {
    target: T,
    pointer_id: i32,
}

impl<T: PointerCapture> CaptureGuard<T> {
    pub fn acquire(target: T, pointer_id: i32) -> Result<Self> {
        target.set_capture(pointer_id)?;
        debug!(pointer_id, "pointer captured");
        Ok(Self { target, pointer_id })
    }

    pub fn pointer_id(&self) -> i32 {
        self.pointer_id
    }
}

impl<T: PointerCapture> Drop for CaptureGuard<T> {
    fn drop(&mut self) {
        self.target.release_capture(self.pointer_id);
        debug!(pointer_id = self.pointer_id, "pointer released");
    }
}
