//! Test fixtures for building event scripts in memory.
//!
//! # Example
//!
//! ```rust,ignore
//! use fixtures::ScriptBuilder;
//!
//! let json = ScriptBuilder::new()
//!     .grid(10, 10)
//!     .viewport(100.0, 100.0)
//!     .drag((15.0, 15.0), (35.0, 35.0))
//!     .build();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use serde_json::{json, Value};

/// Builder for `gridselect` event scripts.
#[derive(Debug, Clone)]
pub struct ScriptBuilder {
    config: Value,
    events: Vec<Value>,
}

impl Default for ScriptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self {
            config: json!({}),
            events: Vec::new(),
        }
    }

    pub fn grid(mut self, rows: u32, cols: u32) -> Self {
        self.config["rows"] = json!(rows);
        self.config["cols"] = json!(cols);
        self
    }

    pub fn viewport(mut self, width: f64, height: f64) -> Self {
        self.config["width"] = json!(width);
        self.config["height"] = json!(height);
        self
    }

    pub fn tracks(mut self, col_widths: &[f64], row_heights: &[f64]) -> Self {
        self.config["layout"] = json!({
            "kind": "tracks",
            "colWidths": col_widths,
            "rowHeights": row_heights,
        });
        self
    }

    pub fn realized(mut self) -> Self {
        self.config["layout"] = json!({ "kind": "realized" });
        self
    }

    pub fn stroke_width(mut self, width: f64) -> Self {
        self.config["overlay"] = json!({ "strokeWidth": width });
        self
    }

    pub fn down(mut self, x: f64, y: f64) -> Self {
        self.events.push(json!({ "type": "down", "x": x, "y": y }));
        self
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.events.push(json!({ "type": "move", "x": x, "y": y }));
        self
    }

    /// Move with the button released (hover)
    pub fn hover(mut self, x: f64, y: f64) -> Self {
        self.events
            .push(json!({ "type": "move", "x": x, "y": y, "pressed": false }));
        self
    }

    pub fn up(mut self) -> Self {
        self.events.push(json!({ "type": "up" }));
        self
    }

    pub fn capture_lost(mut self) -> Self {
        self.events.push(json!({ "type": "captureLost" }));
        self
    }

    pub fn grid_resized(mut self, rows: u32, cols: u32) -> Self {
        self.events
            .push(json!({ "type": "gridResized", "rows": rows, "cols": cols }));
        self
    }

    pub fn viewport_resized(mut self, width: f64, height: f64) -> Self {
        self.events.push(
            json!({ "type": "viewportResized", "width": width, "height": height }),
        );
        self
    }

    pub fn clear(mut self) -> Self {
        self.events.push(json!({ "type": "clear" }));
        self
    }

    /// Press at `from`, move to `to`, release.
    pub fn drag(self, from: (f64, f64), to: (f64, f64)) -> Self {
        self.down(from.0, from.1).move_to(to.0, to.1).up()
    }

    pub fn build(self) -> String {
        json!({ "config": self.config, "events": self.events }).to_string()
    }
}
