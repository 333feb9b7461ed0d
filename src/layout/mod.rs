//! Pointer-to-cell and cell-to-rectangle mapping.
//!
//! This module handles:
//! - The [`CoordinateResolver`] contract every layout strategy satisfies
//! - Arithmetic resolution over a uniform grid ([`UniformGrid`])
//! - Hit testing against realized cell elements ([`RealizedCells`])
//! - Binary search over non-uniform row/column tracks ([`TrackLayout`])
//!
//! Every lookup is total: it returns a cell inside the current grid, or a
//! [`ResolveError`]. Nothing here divides by a zero extent.

mod realized;
mod tracks;
mod uniform;

pub use realized::RealizedCells;
pub use tracks::{TrackLayout, DEFAULT_COL_WIDTH, DEFAULT_ROW_HEIGHT};
pub use uniform::UniformGrid;

use crate::error::ResolveError;
use crate::types::{CellAddress, GridSize, Point, Rect};

/// Maps between viewport pixels and grid cells.
pub trait CoordinateResolver {
    /// Current row and column counts.
    fn grid_size(&self) -> GridSize;

    /// Viewport `(width, height)` in pixels.
    fn viewport_bounds(&self) -> (f64, f64);

    /// Cell under `point`.
    fn cell_at(&self, point: Point) -> Result<CellAddress, ResolveError>;

    /// Pixel rectangle of `cell`.
    fn cell_rect(&self, cell: CellAddress) -> Result<Rect, ResolveError>;

    /// Recompute metrics for a new row/column count.
    fn set_grid_size(&mut self, size: GridSize);

    /// Recompute metrics for a new viewport size.
    fn set_viewport(&mut self, width: f64, height: f64);
}

/// Resolver chosen at runtime from configuration.
#[derive(Debug, Clone)]
pub enum AnyResolver {
    Uniform(UniformGrid),
    Tracks(TrackLayout),
    Realized(RealizedCells),
}

impl AnyResolver {
    /// The realized-element registry, when that strategy is active.
    pub fn as_realized_mut(&mut self) -> Option<&mut RealizedCells> {
        match self {
            Self::Realized(r) => Some(r),
            Self::Uniform(_) | Self::Tracks(_) => None,
        }
    }
}

impl CoordinateResolver for AnyResolver {
    fn grid_size(&self) -> GridSize {
        match self {
            Self::Uniform(r) => r.grid_size(),
            Self::Tracks(r) => r.grid_size(),
            Self::Realized(r) => r.grid_size(),
        }
    }

    fn viewport_bounds(&self) -> (f64, f64) {
        match self {
            Self::Uniform(r) => r.viewport_bounds(),
            Self::Tracks(r) => r.viewport_bounds(),
            Self::Realized(r) => r.viewport_bounds(),
        }
    }

    fn cell_at(&self, point: Point) -> Result<CellAddress, ResolveError> {
        match self {
            Self::Uniform(r) => r.cell_at(point),
            Self::Tracks(r) => r.cell_at(point),
            Self::Realized(r) => r.cell_at(point),
        }
    }

    fn cell_rect(&self, cell: CellAddress) -> Result<Rect, ResolveError> {
        match self {
            Self::Uniform(r) => r.cell_rect(cell),
            Self::Tracks(r) => r.cell_rect(cell),
            Self::Realized(r) => r.cell_rect(cell),
        }
    }

    fn set_grid_size(&mut self, size: GridSize) {
        match self {
            Self::Uniform(r) => r.set_grid_size(size),
            Self::Tracks(r) => r.set_grid_size(size),
            Self::Realized(r) => r.set_grid_size(size),
        }
    }

    fn set_viewport(&mut self, width: f64, height: f64) {
        match self {
            Self::Uniform(r) => r.set_viewport(width, height),
            Self::Tracks(r) => r.set_viewport(width, height),
            Self::Realized(r) => r.set_viewport(width, height),
        }
    }
}

/// True for a finite, strictly positive pixel extent.
pub(crate) fn is_positive_extent(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Shared guard: a grid with no rows/cols or a viewport without positive
/// area cannot resolve anything. NaN and infinite extents count as degenerate.
pub(crate) fn check_viewport(size: GridSize, width: f64, height: f64) -> Result<(), ResolveError> {
    if size.is_empty() || !is_positive_extent(width) || !is_positive_extent(height) {
        return Err(ResolveError::DegenerateViewport);
    }
    Ok(())
}

pub(crate) fn check_point(point: Point) -> Result<(), ResolveError> {
    if point.is_finite() {
        Ok(())
    } else {
        Err(ResolveError::NonFinitePoint)
    }
}

pub(crate) fn check_cell(size: GridSize, cell: CellAddress) -> Result<(), ResolveError> {
    if size.contains(cell) {
        Ok(())
    } else {
        Err(ResolveError::OutOfBounds { cell, size })
    }
}

/// Reject zero-area rectangles so they never reach the overlay.
pub(crate) fn check_rect(cell: CellAddress, rect: Rect) -> Result<Rect, ResolveError> {
    if rect.is_empty() {
        Err(ResolveError::CollapsedCell(cell))
    } else {
        Ok(rect)
    }
}
