//! Drag selection state machine.
//!
//! `Idle` has no range, `Active` holds exactly one [`SelectionRange`]:
//!
//! - [`start`](SelectionManager::start): any state -> `Active` with a
//!   one-cell range. An in-progress range is replaced, never merged.
//! - [`update`](SelectionManager::update): `Active` -> `Active` with the
//!   focus moved and the anchor kept. No-op when `Idle`.
//! - [`clear`](SelectionManager::clear): any state -> `Idle`.
//!
//! The manager never ends a drag by itself. Pointer-up just stops the
//! updates; the finished range stays until the next `start` or `clear`.

use tracing::debug;

use crate::types::{CellAddress, SelectionRange};

#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    current: Option<SelectionRange>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current range, if any.
    pub fn current(&self) -> Option<&SelectionRange> {
        self.current.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Begin a new selection at `cell`, discarding any existing one.
    pub fn start(&mut self, cell: CellAddress) {
        if let Some(previous) = self.current {
            debug!(%cell, anchor = %previous.anchor, "selection restarted");
        } else {
            debug!(%cell, "selection started");
        }
        self.current = Some(SelectionRange::single(cell));
    }

    /// Move the focus of the active selection to `cell`.
    ///
    /// Returns whether the range changed. Safe to call while idle.
    pub fn update(&mut self, cell: CellAddress) -> bool {
        let Some(range) = self.current else {
            return false;
        };
        if range.focus == cell {
            return false;
        }
        let next = range.with_focus(cell);
        debug!(anchor = %next.anchor, focus = %next.focus, "selection extended");
        self.current = Some(next);
        true
    }

    /// Drop the current selection.
    pub fn clear(&mut self) {
        if self.current.take().is_some() {
            debug!("selection cleared");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn cell(row: u32, col: u32) -> CellAddress {
        CellAddress::new(row, col)
    }

    #[test]
    fn starts_idle() {
        let manager = SelectionManager::new();
        assert!(!manager.is_active());
        assert!(manager.current().is_none());
    }

    #[test]
    fn start_creates_single_cell_range() {
        let mut manager = SelectionManager::new();
        manager.start(cell(2, 2));
        assert_eq!(manager.current(), Some(&SelectionRange::single(cell(2, 2))));
    }

    #[test]
    fn update_same_cell_keeps_single_cell() {
        let mut manager = SelectionManager::new();
        manager.start(cell(2, 2));
        assert!(!manager.update(cell(2, 2)));
        let range = manager.current().unwrap();
        assert_eq!(range.cells().collect::<Vec<_>>(), vec![cell(2, 2)]);
    }

    #[test]
    fn update_moves_focus_only() {
        let mut manager = SelectionManager::new();
        manager.start(cell(1, 1));
        assert!(manager.update(cell(0, 0)));
        assert!(manager.update(cell(3, 3)));
        let range = manager.current().unwrap();
        assert_eq!(range.anchor, cell(1, 1));
        assert_eq!(range.focus, cell(3, 3));
    }

    #[test]
    fn update_while_idle_is_noop() {
        let mut manager = SelectionManager::new();
        assert!(!manager.update(cell(4, 4)));
        assert!(manager.current().is_none());
    }

    #[test]
    fn clear_then_update_stays_idle() {
        let mut manager = SelectionManager::new();
        manager.start(cell(1, 2));
        manager.clear();
        assert!(!manager.update(cell(5, 5)));
        assert!(!manager.is_active());
    }

    #[test]
    fn start_while_active_replaces_range() {
        let mut manager = SelectionManager::new();
        manager.start(cell(0, 0));
        manager.update(cell(4, 4));
        manager.start(cell(7, 1));
        assert_eq!(manager.current(), Some(&SelectionRange::single(cell(7, 1))));
        manager.update(cell(8, 2));
        assert_eq!(manager.current().unwrap().anchor, cell(7, 1));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut manager = SelectionManager::new();
        manager.clear();
        manager.clear();
        assert!(!manager.is_active());
    }
}
