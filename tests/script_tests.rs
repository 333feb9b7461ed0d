//! End-to-end replay tests for gridselect
//!
//! Scripts drive a GridView the way a host would and check the selection
//! and the painted highlight after every event.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;
mod fixtures;

use common::{assert_endpoints, assert_no_selection, assert_overlay, assert_range, replay};
use fixtures::ScriptBuilder;
use gridselect::script::Script;
use gridselect::Rect;

/// 10x10 grid of 10px cells
fn grid() -> ScriptBuilder {
    ScriptBuilder::new().grid(10, 10).viewport(100.0, 100.0)
}

#[test]
fn drag_and_release() {
    let reports = replay(&grid().drag((15.0, 15.0), (35.0, 35.0)).build());
    assert_eq!(reports.len(), 3);
    assert_range(&reports, 0, "B2");
    assert_overlay(&reports, 0, Some(Rect::new(11.0, 11.0, 8.0, 8.0)));
    assert_range(&reports, 1, "B2:D4");
    assert_overlay(&reports, 1, Some(Rect::new(11.0, 11.0, 28.0, 28.0)));
    assert_range(&reports, 2, "B2:D4");
    assert!(!reports[2].dragging);
}

#[test]
fn reversed_drag_same_overlay() {
    let forward = replay(&grid().drag((15.0, 15.0), (35.0, 35.0)).build());
    let backward = replay(&grid().drag((35.0, 35.0), (15.0, 15.0)).build());
    assert_endpoints(&backward, 2, "D4", "B2");
    assert_eq!(forward[2].overlay, backward[2].overlay);
    assert_eq!(
        forward[2].selection.as_ref().unwrap().range,
        backward[2].selection.as_ref().unwrap().range
    );
}

#[test]
fn hover_after_release_is_ignored() {
    let reports = replay(
        &grid()
            .drag((15.0, 15.0), (25.0, 25.0))
            .hover(85.0, 85.0)
            .move_to(85.0, 85.0)
            .build(),
    );
    assert_range(&reports, 3, "B2:C3");
    assert_range(&reports, 4, "B2:C3");
}

#[test]
fn new_press_replaces_selection() {
    let reports = replay(
        &grid()
            .drag((15.0, 15.0), (45.0, 45.0))
            .down(75.0, 5.0)
            .build(),
    );
    assert_range(&reports, 3, "H1");
    assert_endpoints(&reports, 3, "H1", "H1");
}

#[test]
fn capture_loss_ends_drag_but_keeps_selection() {
    let reports = replay(
        &grid()
            .down(15.0, 15.0)
            .move_to(25.0, 25.0)
            .capture_lost()
            .move_to(55.0, 55.0)
            .build(),
    );
    assert!(!reports[2].dragging);
    assert_range(&reports, 2, "B2:C3");
    assert_range(&reports, 3, "B2:C3");
}

#[test]
fn grid_resize_mid_drag_clears() {
    let reports = replay(
        &grid()
            .down(95.0, 95.0)
            .move_to(75.0, 75.0)
            .grid_resized(5, 5)
            .move_to(5.0, 5.0)
            .up()
            .build(),
    );
    assert_range(&reports, 1, "H8:J10");
    assert_no_selection(&reports, 2);
    assert_overlay(&reports, 2, None);
    assert_no_selection(&reports, 3);
    assert_no_selection(&reports, 4);
}

#[test]
fn viewport_resize_rescales_overlay() {
    let reports = replay(
        &grid()
            .drag((15.0, 15.0), (25.0, 25.0))
            .viewport_resized(200.0, 50.0)
            .build(),
    );
    // Cells are now 20x5; B2:C3 spans x 20..60, y 5..15
    assert_range(&reports, 3, "B2:C3");
    assert_overlay(&reports, 3, Some(Rect::new(21.0, 6.0, 38.0, 8.0)));
}

#[test]
fn realized_layout_follows_grid_resizes() {
    let reports = replay(
        &grid()
            .realized()
            .grid_resized(5, 5)
            .down(75.0, 75.0)
            .up()
            .grid_resized(20, 20)
            .down(95.0, 95.0)
            .build(),
    );
    assert_no_selection(&reports, 0);
    // 20px cells
    assert_range(&reports, 1, "D4");
    assert_overlay(&reports, 1, Some(Rect::new(61.0, 61.0, 18.0, 18.0)));
    assert_no_selection(&reports, 3);
    // 5px cells
    assert_range(&reports, 4, "T20");
    assert_overlay(&reports, 4, Some(Rect::new(96.0, 96.0, 3.0, 3.0)));
}

#[test]
fn realized_layout_follows_viewport_resizes() {
    let reports = replay(
        &grid()
            .realized()
            .drag((15.0, 15.0), (25.0, 25.0))
            .viewport_resized(200.0, 50.0)
            .build(),
    );
    assert_range(&reports, 3, "B2:C3");
    assert_overlay(&reports, 3, Some(Rect::new(21.0, 6.0, 38.0, 8.0)));
}

#[test]
fn degenerate_viewport_draws_nothing() {
    let reports = replay(
        &ScriptBuilder::new()
            .grid(10, 10)
            .viewport(0.0, 100.0)
            .drag((15.0, 15.0), (35.0, 35.0))
            .build(),
    );
    for step in 0..reports.len() {
        assert_no_selection(&reports, step);
        assert_overlay(&reports, step, None);
    }
}

#[test]
fn empty_grid_then_grow() {
    let reports = replay(
        &ScriptBuilder::new()
            .grid(0, 0)
            .viewport(100.0, 100.0)
            .down(15.0, 15.0)
            .up()
            .grid_resized(10, 10)
            .drag((15.0, 15.0), (15.0, 15.0))
            .build(),
    );
    assert_no_selection(&reports, 0);
    assert_range(&reports, 3, "B2");
}

#[test]
fn tracks_layout_overlay() {
    let reports = replay(
        &ScriptBuilder::new()
            .grid(3, 3)
            .viewport(100.0, 100.0)
            .tracks(&[10.0, 40.0, 20.0], &[5.0, 15.0, 30.0])
            .stroke_width(4.0)
            .drag((5.0, 2.0), (60.0, 10.0))
            .build(),
    );
    // A1:C2 spans x 0..70, y 0..20; inset 2
    assert_range(&reports, 2, "A1:C2");
    assert_overlay(&reports, 2, Some(Rect::new(2.0, 2.0, 66.0, 16.0)));
}

#[test]
fn clear_event_removes_highlight() {
    let reports = replay(&grid().drag((15.0, 15.0), (35.0, 35.0)).clear().build());
    assert_no_selection(&reports, 3);
    assert_overlay(&reports, 3, None);
}

#[test]
fn reports_serialize_to_json() {
    let reports = replay(&grid().drag((15.0, 15.0), (35.0, 35.0)).build());
    let json = serde_json::to_value(&reports).unwrap();
    assert_eq!(json[1]["event"]["type"], "move");
    assert_eq!(json[1]["selection"]["anchor"], "B2");
    assert_eq!(json[1]["selection"]["focus"], "D4");
    assert_eq!(json[1]["selection"]["cells"], 9);
    assert_eq!(json[1]["overlay"]["width"], 28.0);
}

#[test]
fn script_without_config_uses_defaults() {
    let script = Script::from_json(r#"{"events": [{"type": "down", "x": 70, "y": 30}]}"#).unwrap();
    let reports = gridselect::script::run_script(&script).unwrap();
    // Default 10x10 over 640x200: cells are 64x20
    assert_range(&reports, 0, "B2");
}
