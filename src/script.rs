//! Replay of recorded pointer and layout events.
//!
//! A script is a config plus an event list. Replaying it drives a
//! [`GridView`] exactly as a host would and reports the selection and the
//! painted highlight after every event. Used by `gridselect_cli` and the
//! integration tests.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cell_ref::format_range;
use crate::config::GridConfig;
use crate::error::Result;
use crate::layout::AnyResolver;
use crate::render::RecordingSurface;
use crate::types::{Point, Rect, SelectionRange};
use crate::viewer::GridView;

fn pressed_default() -> bool {
    true
}

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScriptEvent {
    /// Primary button pressed at `(x, y)`
    Down { x: f64, y: f64 },
    /// Pointer moved; `pressed` defaults to true
    Move {
        x: f64,
        y: f64,
        #[serde(default = "pressed_default")]
        pressed: bool,
    },
    /// Primary button released
    Up,
    /// Capture taken away by the host
    CaptureLost,
    GridResized { rows: u32, cols: u32 },
    ViewportResized { width: f64, height: f64 },
    /// Programmatic clear
    Clear,
}

/// Config and events to replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub config: GridConfig,
    pub events: Vec<ScriptEvent>,
}

impl Script {
    /// Parse a script from JSON.
    ///
    /// # Errors
    /// Returns `GridSelectError::Config` for malformed JSON or unknown event types.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a script file.
    ///
    /// # Errors
    /// Returns `GridSelectError::Io` if the file cannot be read, otherwise as
    /// [`Script::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }
}

/// Selection endpoints in A1 notation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionReport {
    pub anchor: String,
    pub focus: String,
    /// Normalized range, e.g. `B2:D4`
    pub range: String,
    pub cells: u64,
}

impl From<&SelectionRange> for SelectionReport {
    fn from(range: &SelectionRange) -> Self {
        Self {
            anchor: range.anchor.to_string(),
            focus: range.focus.to_string(),
            range: format_range(&SelectionRange::new(range.top_left(), range.bottom_right())),
            cells: range.len(),
        }
    }
}

/// State after one replayed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    pub event: ScriptEvent,
    pub selection: Option<SelectionReport>,
    /// Highlight visible on the surface after painting
    pub overlay: Option<Rect>,
    pub dragging: bool,
}

/// Replay `script` and report the state after every event.
///
/// # Errors
/// Propagates surface paint errors.
pub fn run_script(script: &Script) -> Result<Vec<StepReport>> {
    let mut view: GridView<AnyResolver> =
        GridView::new(script.config.build_resolver(), script.config.overlay.clone());
    let mut surface = RecordingSurface::new();
    let mut reports = Vec::with_capacity(script.events.len());

    for event in &script.events {
        apply(&mut view, event);
        if view.needs_paint() {
            view.paint(&mut surface)?;
        }
        reports.push(StepReport {
            event: event.clone(),
            selection: view.current_selection().map(SelectionReport::from),
            overlay: surface.visible(),
            dragging: view.is_dragging(),
        });
    }
    debug!(events = reports.len(), "script replayed");
    Ok(reports)
}

fn apply(view: &mut GridView<AnyResolver>, event: &ScriptEvent) {
    match *event {
        ScriptEvent::Down { x, y } => {
            view.on_pointer_down(Point::new(x, y));
        }
        ScriptEvent::Move { x, y, pressed } => {
            view.on_pointer_move(Point::new(x, y), pressed);
        }
        ScriptEvent::Up => {
            view.on_pointer_up();
        }
        ScriptEvent::CaptureLost => {
            view.on_capture_lost();
        }
        ScriptEvent::GridResized { rows, cols } => {
            view.on_grid_resized(rows, cols);
        }
        ScriptEvent::ViewportResized { width, height } => {
            view.on_viewport_resized(width, height);
        }
        ScriptEvent::Clear => {
            view.clear_selection();
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;

    #[test]
    fn parses_event_tags() {
        let script = Script::from_json(
            r#"{"events": [
                {"type": "down", "x": 1, "y": 2},
                {"type": "move", "x": 3, "y": 4},
                {"type": "move", "x": 3, "y": 4, "pressed": false},
                {"type": "up"},
                {"type": "gridResized", "rows": 2, "cols": 3},
                {"type": "viewportResized", "width": 50, "height": 60}
            ]}"#,
        )
        .unwrap();
        assert_eq!(script.config, GridConfig::default());
        assert_eq!(
            script.events,
            vec![
                ScriptEvent::Down { x: 1.0, y: 2.0 },
                ScriptEvent::Move {
                    x: 3.0,
                    y: 4.0,
                    pressed: true
                },
                ScriptEvent::Move {
                    x: 3.0,
                    y: 4.0,
                    pressed: false
                },
                ScriptEvent::Up,
                ScriptEvent::GridResized { rows: 2, cols: 3 },
                ScriptEvent::ViewportResized {
                    width: 50.0,
                    height: 60.0
                },
            ]
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("gridselect-no-such-script.json");
        assert!(matches!(
            Script::from_path(&path),
            Err(crate::error::GridSelectError::Io(_))
        ));
    }

    #[test]
    fn loads_script_from_file() {
        let path = std::env::temp_dir().join(format!("gridselect-{}.json", std::process::id()));
        fs::write(&path, r#"{"events": [{"type": "clear"}]}"#).unwrap();
        let script = Script::from_path(&path);
        fs::remove_file(&path).unwrap();
        assert_eq!(script.unwrap().events, vec![ScriptEvent::Clear]);
    }

    #[test]
    fn unknown_event_is_rejected() {
        assert!(Script::from_json(r#"{"events": [{"type": "wheel"}]}"#).is_err());
    }

    #[test]
    fn report_normalizes_range() {
        let range = SelectionRange::new(
            crate::types::CellAddress::new(3, 3),
            crate::types::CellAddress::new(1, 1),
        );
        let report = SelectionReport::from(&range);
        assert_eq!(report.anchor, "D4");
        assert_eq!(report.focus, "B2");
        assert_eq!(report.range, "B2:D4");
        assert_eq!(report.cells, 9);
    }

    #[test]
    fn replay_reports_each_step() {
        let script = Script::from_json(
            r#"{
                "config": {"width": 100, "height": 100},
                "events": [
                    {"type": "down", "x": 15, "y": 15},
                    {"type": "move", "x": 35, "y": 35},
                    {"type": "up"},
                    {"type": "gridResized", "rows": 5, "cols": 5}
                ]
            }"#,
        )
        .unwrap();
        let reports = run_script(&script).unwrap();
        assert_eq!(reports.len(), 4);

        assert_eq!(reports[0].selection.as_ref().unwrap().range, "B2");
        assert!(reports[0].dragging);
        assert_eq!(reports[1].overlay, Some(Rect::new(11.0, 11.0, 28.0, 28.0)));
        assert!(!reports[2].dragging);
        assert_eq!(reports[2].selection.as_ref().unwrap().range, "B2:D4");
        assert_eq!(reports[3].selection, None);
        assert_eq!(reports[3].overlay, None);
    }
}
