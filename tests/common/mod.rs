//! Common test utilities for gridselect integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridselect::script::{run_script, Script, StepReport};
use gridselect::Rect;

/// Replay a JSON script, panicking on malformed input.
pub fn replay(json: &str) -> Vec<StepReport> {
    let script = Script::from_json(json).expect("Failed to parse script");
    run_script(&script).expect("Failed to replay script")
}

/// Assert the normalized selection after `step`, e.g. "B2:D4".
pub fn assert_range(reports: &[StepReport], step: usize, expected: &str) {
    let selection = reports[step]
        .selection
        .as_ref()
        .unwrap_or_else(|| panic!("step {step}: expected selection {expected}, found none"));
    assert_eq!(selection.range, expected, "step {step}");
}

/// Assert anchor and focus after `step` in A1 notation.
pub fn assert_endpoints(reports: &[StepReport], step: usize, anchor: &str, focus: &str) {
    let selection = reports[step]
        .selection
        .as_ref()
        .unwrap_or_else(|| panic!("step {step}: expected a selection, found none"));
    assert_eq!(
        (selection.anchor.as_str(), selection.focus.as_str()),
        (anchor, focus),
        "step {step}"
    );
}

pub fn assert_no_selection(reports: &[StepReport], step: usize) {
    assert_eq!(reports[step].selection, None, "step {step}");
}

/// Assert the painted highlight after `step`.
pub fn assert_overlay(reports: &[StepReport], step: usize, expected: Option<Rect>) {
    assert_eq!(reports[step].overlay, expected, "step {step}");
}
