//! Widget configuration.
//!
//! Read from JSON (the CLI script, tests) or from a JS object passed to the
//! browser host. Every field has a default, so `{}` is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::{AnyResolver, CoordinateResolver, RealizedCells, TrackLayout, UniformGrid};
use crate::render::OverlayStyle;
use crate::types::GridSize;

pub const DEFAULT_ROWS: u32 = 10;
pub const DEFAULT_COLS: u32 = 10;
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 640.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 200.0;

/// How pointer positions are mapped to cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LayoutConfig {
    /// Cells evenly divide the viewport.
    #[default]
    Uniform,
    /// Per-column widths and per-row heights in pixels. Missing tracks get
    /// the default size; extra tracks are ignored.
    #[serde(rename_all = "camelCase")]
    Tracks {
        #[serde(default)]
        col_widths: Vec<f64>,
        #[serde(default)]
        row_heights: Vec<f64>,
    },
    /// Hit testing against realized cell elements, initially a full
    /// uniform grid.
    Realized,
}

/// Configuration for one grid widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    pub rows: u32,
    pub cols: u32,
    /// Viewport width in pixels
    pub width: f64,
    /// Viewport height in pixels
    pub height: f64,
    pub layout: LayoutConfig,
    pub overlay: OverlayStyle,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
            layout: LayoutConfig::default(),
            overlay: OverlayStyle::default(),
        }
    }
}

impl GridConfig {
    /// Parse a config from JSON.
    ///
    /// # Errors
    /// Returns `GridSelectError::Config` if the JSON is malformed or a field has the
    /// wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn grid_size(&self) -> GridSize {
        GridSize::new(self.rows, self.cols)
    }

    /// Build the resolver this config describes.
    pub fn build_resolver(&self) -> AnyResolver {
        let size = self.grid_size();
        match &self.layout {
            LayoutConfig::Uniform => {
                AnyResolver::Uniform(UniformGrid::new(size, self.width, self.height))
            }
            LayoutConfig::Tracks {
                col_widths,
                row_heights,
            } => {
                let mut tracks = TrackLayout::new(col_widths.clone(), row_heights.clone());
                tracks.set_grid_size(size);
                tracks.set_viewport(self.width, self.height);
                AnyResolver::Tracks(tracks)
            }
            LayoutConfig::Realized => {
                AnyResolver::Realized(RealizedCells::uniform(size, self.width, self.height))
            }
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::error::GridSelectError;
    use crate::types::{CellAddress, Point};

    #[test]
    fn empty_object_uses_defaults() {
        let config = GridConfig::from_json("{}").unwrap();
        assert_eq!(config, GridConfig::default());
        assert_eq!(config.grid_size(), GridSize::new(10, 10));
        assert_eq!(config.overlay.stroke_color, "#1E90FF");
    }

    #[test]
    fn camel_case_fields() {
        let config = GridConfig::from_json(
            r##"{
                "rows": 3,
                "width": 300,
                "overlay": { "strokeWidth": 4, "fillColor": "transparent" },
                "layout": { "kind": "tracks", "colWidths": [10, 20], "rowHeights": [5] }
            }"##,
        )
        .unwrap();
        assert_eq!(config.rows, 3);
        assert_eq!(config.cols, 10);
        assert_eq!(config.width, 300.0);
        assert_eq!(config.overlay.stroke_width, 4.0);
        assert_eq!(config.overlay.fill_color, "transparent");
        assert_eq!(config.overlay.stroke_color, "#1E90FF");
        assert_eq!(
            config.layout,
            LayoutConfig::Tracks {
                col_widths: vec![10.0, 20.0],
                row_heights: vec![5.0],
            }
        );
    }

    #[test]
    fn malformed_json_is_config_error() {
        assert!(matches!(
            GridConfig::from_json(r#"{"rows": "many"}"#),
            Err(GridSelectError::Config(_))
        ));
        assert!(matches!(
            GridConfig::from_json(r#"{"layout": {"kind": "hexagonal"}}"#),
            Err(GridSelectError::Config(_))
        ));
    }

    #[test]
    fn builds_each_resolver() {
        let uniform = GridConfig {
            width: 100.0,
            height: 100.0,
            ..GridConfig::default()
        };
        let resolver = uniform.build_resolver();
        assert!(matches!(resolver, AnyResolver::Uniform(_)));
        assert_eq!(resolver.cell_at(Point::new(55.0, 55.0)), Ok(CellAddress::new(5, 5)));

        let realized = GridConfig {
            layout: LayoutConfig::Realized,
            ..uniform.clone()
        };
        let mut resolver = realized.build_resolver();
        assert_eq!(resolver.cell_at(Point::new(55.0, 55.0)), Ok(CellAddress::new(5, 5)));
        assert_eq!(resolver.as_realized_mut().map(|r| r.len()), Some(100));
    }

    #[test]
    fn tracks_padded_to_grid_size() {
        let config = GridConfig {
            rows: 2,
            cols: 3,
            layout: LayoutConfig::Tracks {
                col_widths: vec![100.0],
                row_heights: vec![50.0, 50.0, 50.0],
            },
            ..GridConfig::default()
        };
        let resolver = config.build_resolver();
        assert_eq!(resolver.grid_size(), GridSize::new(2, 3));
        assert_eq!(resolver.viewport_bounds(), (640.0, 200.0));
        // Column 1 starts after the configured 100px column, default width
        assert_eq!(
            resolver.cell_at(Point::new(120.0, 60.0)),
            Ok(CellAddress::new(1, 1))
        );
    }
}
