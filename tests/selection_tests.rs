//! Selection state machine and range geometry tests for gridselect
//!
//! Exercises the public API only: SelectionManager transitions, Cells()
//! enumeration, and the drag behavior of GridView over every resolver.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::collections::HashSet;

use gridselect::{
    AnyResolver, CellAddress, CoordinateResolver, GridConfig, GridSize, GridView, LayoutConfig,
    OverlayStyle, Point, Rect, SelectionManager, SelectionRange,
};
use test_case::test_case;

fn cell(row: u32, col: u32) -> CellAddress {
    CellAddress::new(row, col)
}

#[test_case(cell(0, 0), cell(0, 0) ; "single cell")]
#[test_case(cell(1, 1), cell(3, 4) ; "down right")]
#[test_case(cell(3, 4), cell(1, 1) ; "up left")]
#[test_case(cell(5, 0), cell(2, 7) ; "rows reversed")]
#[test_case(cell(0, 9), cell(9, 0) ; "cols reversed")]
#[test_case(cell(4, 2), cell(4, 8) ; "one row")]
fn cells_cover_bounding_box(a: CellAddress, b: CellAddress) {
    let range = SelectionRange::new(a, b);
    let cells: Vec<CellAddress> = range.cells().collect();

    let rows = u64::from(a.row.abs_diff(b.row)) + 1;
    let cols = u64::from(a.col.abs_diff(b.col)) + 1;
    assert_eq!(cells.len() as u64, rows * cols);
    assert_eq!(range.len(), rows * cols);

    let distinct: HashSet<_> = cells.iter().copied().collect();
    assert_eq!(distinct.len(), cells.len());

    let (row_min, col_min, row_max, col_max) = range.bounds();
    for c in &cells {
        assert!((row_min..=row_max).contains(&c.row));
        assert!((col_min..=col_max).contains(&c.col));
    }

    // Row-major: strictly increasing (row, col) pairs
    assert!(cells.windows(2).all(|w| w[0] < w[1]));

    // Reversing the endpoints yields the identical sequence
    let reversed: Vec<CellAddress> = SelectionRange::new(b, a).cells().collect();
    assert_eq!(cells, reversed);
}

#[test]
fn cells_is_restartable() {
    let range = SelectionRange::new(cell(2, 3), cell(0, 1));
    let mut partial = range.cells();
    partial.next();
    partial.next();
    let first: Vec<_> = range.cells().collect();
    let second: Vec<_> = range.cells().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 9);
    assert_eq!(first[0], cell(0, 1));
    assert_eq!(first[8], cell(2, 3));
}

#[test]
fn start_clear_update_stays_idle() {
    let mut manager = SelectionManager::new();
    manager.start(cell(1, 1));
    manager.clear();
    assert!(!manager.update(cell(4, 4)));
    assert!(manager.current().is_none());
    assert!(!manager.is_active());
}

#[test]
fn update_to_anchor_is_single_cell() {
    let mut manager = SelectionManager::new();
    manager.start(cell(2, 2));
    manager.update(cell(2, 2));
    let range = manager.current().unwrap();
    assert!(range.is_single_cell());
    assert_eq!(range.cells().collect::<Vec<_>>(), vec![cell(2, 2)]);
}

#[test]
fn start_while_active_replaces() {
    let mut manager = SelectionManager::new();
    manager.start(cell(0, 0));
    manager.update(cell(5, 5));
    manager.start(cell(7, 7));
    assert_eq!(manager.current(), Some(&SelectionRange::single(cell(7, 7))));
}

#[test]
fn update_never_moves_anchor() {
    let mut manager = SelectionManager::new();
    manager.start(cell(3, 3));
    for c in [cell(0, 0), cell(9, 9), cell(3, 0), cell(0, 3)] {
        manager.update(c);
        let range = manager.current().unwrap();
        assert_eq!(range.anchor, cell(3, 3));
        assert_eq!(range.focus, c);
    }
}

fn config(layout: LayoutConfig) -> GridConfig {
    GridConfig {
        rows: 10,
        cols: 10,
        width: 100.0,
        height: 100.0,
        layout,
        ..GridConfig::default()
    }
}

fn tracks() -> LayoutConfig {
    LayoutConfig::Tracks {
        col_widths: vec![10.0; 10],
        row_heights: vec![10.0; 10],
    }
}

#[test_case(LayoutConfig::Uniform ; "uniform")]
#[test_case(tracks() ; "tracks")]
#[test_case(LayoutConfig::Realized ; "realized")]
fn drag_overlay_is_union_of_corner_rects(layout: LayoutConfig) {
    let config = config(layout);
    let resolver = config.build_resolver();
    let expected = resolver
        .cell_rect(cell(1, 1))
        .unwrap()
        .union(&resolver.cell_rect(cell(3, 3)).unwrap())
        .inset(config.overlay.stroke_width / 2.0);

    let mut view: GridView<AnyResolver> = GridView::new(resolver, config.overlay.clone());
    view.on_pointer_down(Point::new(15.0, 15.0));
    view.on_pointer_move(Point::new(5.0, 5.0), true);
    view.on_pointer_move(Point::new(35.0, 35.0), true);
    view.on_pointer_up();

    assert_eq!(view.current_overlay_rect(), Some(expected));
    assert_eq!(expected, Rect::new(11.0, 11.0, 28.0, 28.0));
}

#[test_case(LayoutConfig::Uniform ; "uniform")]
#[test_case(tracks() ; "tracks")]
#[test_case(LayoutConfig::Realized ; "realized")]
fn grid_resize_resets_selection(layout: LayoutConfig) {
    let config = config(layout);
    let mut view: GridView<AnyResolver> =
        GridView::new(config.build_resolver(), OverlayStyle::default());
    view.on_pointer_down(Point::new(95.0, 95.0));
    view.on_pointer_move(Point::new(85.0, 85.0), true);
    assert!(view.current_selection().is_some());

    view.on_grid_resized(4, 4);
    assert!(view.current_selection().is_none());
    assert!(view.current_overlay_rect().is_none());
    assert_eq!(view.resolver().grid_size(), GridSize::new(4, 4));

    // A move before the next press does nothing
    view.on_pointer_move(Point::new(5.0, 5.0), true);
    assert!(view.current_selection().is_none());

    // A new drag resolves against the smaller grid
    view.on_pointer_down(Point::new(5.0, 5.0));
    view.on_pointer_move(Point::new(95.0, 95.0), true);
    let range = view.current_selection().copied().unwrap();
    assert_eq!(range.anchor, cell(0, 0));
    assert_eq!(range.focus, cell(3, 3));
}

#[test]
fn pointer_up_does_not_clear() {
    let mut view = GridView::new(
        gridselect::UniformGrid::new(GridSize::new(10, 10), 100.0, 100.0),
        OverlayStyle::default(),
    );
    view.on_pointer_down(Point::new(15.0, 15.0));
    view.on_pointer_move(Point::new(45.0, 25.0), true);
    view.on_pointer_up();
    assert_eq!(
        view.current_selection(),
        Some(&SelectionRange::new(cell(1, 1), cell(2, 4)))
    );
}
