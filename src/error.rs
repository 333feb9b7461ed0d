//! Structured error types for gridselect.
//!
//! Coordinate mapping failures are [`ResolveError`]s. They are the
//! "unresolved" outcome of a lookup and are never fatal: callers skip the
//! dependent update or draw and try again on the next event. Everything else
//! (configuration, scripts, canvas calls) goes through [`GridSelectError`].

use crate::types::{CellAddress, GridSize};

/// Why a pixel point or a cell address could not be mapped.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// Zero (or negative/NaN) viewport extent, or a grid without rows or columns.
    #[error("degenerate viewport")]
    DegenerateViewport,

    /// Pointer coordinate was NaN or infinite.
    #[error("non-finite pointer coordinate")]
    NonFinitePoint,

    /// Point does not hit any realized cell element.
    #[error("point ({x}, {y}) misses every realized cell")]
    Miss { x: f64, y: f64 },

    /// Address lies outside the current grid bounds.
    #[error("cell {cell} is outside the {size} grid")]
    OutOfBounds { cell: CellAddress, size: GridSize },

    /// Address is in bounds but has no realized element yet.
    #[error("cell {0} has not been realized")]
    NotRealized(CellAddress),

    /// Address sits on a hidden (zero-sized) row or column.
    #[error("cell {0} is collapsed to zero size")]
    CollapsedCell(CellAddress),
}

/// All errors that can occur outside coordinate resolution.
#[derive(Debug, thiserror::Error)]
pub enum GridSelectError {
    /// Coordinate resolution failure surfaced to a caller that needs a value.
    #[error("Unresolved: {0}")]
    Resolve(#[from] ResolveError),

    /// Invalid A1-style cell reference.
    #[error("Invalid cell reference: {0}")]
    CellRef(String),

    /// Malformed configuration or event script.
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Overlay drawing failure.
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for host-side string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridSelectError>;

impl From<String> for GridSelectError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridSelectError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridSelectError> for wasm_bindgen::JsValue {
    fn from(e: GridSelectError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
