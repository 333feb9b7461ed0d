//! Coordinate resolver tests for gridselect
//!
//! Every strategy must be total: a point maps to a cell inside the grid or
//! to an error, and a cell maps to a non-empty rect or to an error.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridselect::{
    AnyResolver, CellAddress, CoordinateResolver, GridSize, Point, RealizedCells, Rect,
    ResolveError, TrackLayout, UniformGrid,
};
use test_case::test_case;

fn cell(row: u32, col: u32) -> CellAddress {
    CellAddress::new(row, col)
}

fn resolvers(size: GridSize, width: f64, height: f64) -> Vec<(&'static str, AnyResolver)> {
    let mut tracks = TrackLayout::new(vec![7.0, 0.0, 13.0, 40.0], vec![9.0, 21.0, 0.0]);
    tracks.set_grid_size(size);
    tracks.set_viewport(width, height);
    vec![
        ("uniform", AnyResolver::Uniform(UniformGrid::new(size, width, height))),
        ("tracks", AnyResolver::Tracks(tracks)),
        (
            "realized",
            AnyResolver::Realized(RealizedCells::uniform(size, width, height)),
        ),
    ]
}

fn sample_points() -> Vec<Point> {
    let coords = [
        -1e9, -100.0, -0.5, 0.0, 0.5, 9.999, 10.0, 49.5, 99.0, 100.0, 150.0, 1e12,
    ];
    let mut points = Vec::new();
    for &x in &coords {
        for &y in &coords {
            points.push(Point::new(x, y));
        }
    }
    points.push(Point::new(f64::NAN, 5.0));
    points.push(Point::new(5.0, f64::INFINITY));
    points.push(Point::new(f64::NEG_INFINITY, f64::NAN));
    points
}

#[test_case(10, 10, 100.0, 100.0 ; "square")]
#[test_case(1, 1, 100.0, 100.0 ; "one cell")]
#[test_case(3, 17, 640.0, 200.0 ; "wide")]
#[test_case(0, 10, 100.0, 100.0 ; "no rows")]
#[test_case(10, 0, 100.0, 100.0 ; "no cols")]
#[test_case(10, 10, 0.0, 100.0 ; "zero width")]
#[test_case(10, 10, 100.0, 0.0 ; "zero height")]
#[test_case(10, 10, -50.0, 100.0 ; "negative width")]
#[test_case(10, 10, f64::NAN, 100.0 ; "nan width")]
fn cell_at_is_total(rows: u32, cols: u32, width: f64, height: f64) {
    let size = GridSize::new(rows, cols);
    for (name, resolver) in resolvers(size, width, height) {
        for point in sample_points() {
            if let Ok(c) = resolver.cell_at(point) {
                assert!(
                    size.contains(c),
                    "{name}: {point:?} resolved to {c} outside {size}"
                );
            }
        }
    }
}

#[test_case(0, 10, 100.0, 100.0 ; "no rows")]
#[test_case(10, 10, 0.0, 100.0 ; "zero width")]
#[test_case(10, 10, 100.0, f64::INFINITY ; "infinite height")]
fn degenerate_viewport_is_unresolved(rows: u32, cols: u32, width: f64, height: f64) {
    for (name, resolver) in resolvers(GridSize::new(rows, cols), width, height) {
        assert_eq!(
            resolver.cell_at(Point::new(5.0, 5.0)),
            Err(ResolveError::DegenerateViewport),
            "{name}"
        );
        assert_eq!(
            resolver.cell_rect(cell(0, 0)),
            Err(ResolveError::DegenerateViewport),
            "{name}"
        );
    }
}

#[test]
fn cell_rect_is_total() {
    let size = GridSize::new(6, 6);
    for (name, resolver) in resolvers(size, 120.0, 60.0) {
        for row in 0..8 {
            for col in 0..8 {
                let c = cell(row, col);
                match resolver.cell_rect(c) {
                    Ok(rect) => {
                        assert!(size.contains(c), "{name}: rect for {c}");
                        assert!(!rect.is_empty(), "{name}: empty rect for {c}");
                    }
                    Err(ResolveError::OutOfBounds { cell, size: s }) => {
                        assert_eq!((cell, s), (c, size), "{name}");
                        assert!(!size.contains(c));
                    }
                    Err(ResolveError::CollapsedCell(hidden)) => {
                        assert_eq!(name, "tracks");
                        assert_eq!(hidden, c);
                    }
                    Err(err) => panic!("{name}: unexpected {err} for {c}"),
                }
            }
        }
    }
}

#[test_case(55.0, 55.0, cell(5, 5) ; "interior")]
#[test_case(150.0, 150.0, cell(9, 9) ; "beyond viewport clamps")]
#[test_case(-20.0, 35.0, cell(3, 0) ; "left of viewport clamps")]
#[test_case(0.0, 0.0, cell(0, 0) ; "origin")]
#[test_case(10.0, 90.0, cell(9, 1) ; "on boundary")]
fn uniform_arithmetic(x: f64, y: f64, expected: CellAddress) {
    let grid = UniformGrid::new(GridSize::new(10, 10), 100.0, 100.0);
    assert_eq!(grid.cell_at(Point::new(x, y)), Ok(expected));
}

#[test]
fn strategies_agree_on_uniform_layout() {
    let size = GridSize::new(8, 5);
    let uniform = UniformGrid::new(size, 100.0, 80.0);
    let tracks = TrackLayout::uniform(size, 20.0, 10.0);
    let realized = RealizedCells::uniform(size, 100.0, 80.0);

    for c in size.cells() {
        let rect = uniform.cell_rect(c).unwrap();
        assert_eq!(tracks.cell_rect(c), Ok(rect));
        assert_eq!(realized.cell_rect(c), Ok(rect));

        let center = Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
        assert_eq!(uniform.cell_at(center), Ok(c));
        assert_eq!(tracks.cell_at(center), Ok(c));
        assert_eq!(realized.cell_at(center), Ok(c));
    }
}

#[test]
fn tracks_skip_hidden_columns() {
    let layout = TrackLayout::new(vec![10.0, 0.0, 10.0], vec![10.0]);
    // x = 10 is where both the hidden col 1 and col 2 start
    assert_eq!(layout.cell_at(Point::new(10.0, 5.0)), Ok(cell(0, 2)));
    assert_eq!(
        layout.cell_rect(cell(0, 1)),
        Err(ResolveError::CollapsedCell(cell(0, 1)))
    );
    assert_eq!(
        layout.cell_rect(cell(0, 2)),
        Ok(Rect::new(10.0, 0.0, 10.0, 10.0))
    );
}

#[test]
fn realized_lookup_misses_gaps() {
    let mut realized = RealizedCells::new(GridSize::new(2, 2), 100.0, 100.0);
    realized
        .realize(cell(0, 0), Rect::new(0.0, 0.0, 40.0, 40.0))
        .unwrap();
    realized
        .realize(cell(1, 1), Rect::new(60.0, 60.0, 40.0, 40.0))
        .unwrap();

    assert_eq!(realized.cell_at(Point::new(20.0, 20.0)), Ok(cell(0, 0)));
    assert_eq!(realized.cell_at(Point::new(80.0, 80.0)), Ok(cell(1, 1)));
    assert_eq!(
        realized.cell_at(Point::new(50.0, 50.0)),
        Err(ResolveError::Miss { x: 50.0, y: 50.0 })
    );
    assert_eq!(
        realized.cell_rect(cell(0, 1)),
        Err(ResolveError::NotRealized(cell(0, 1)))
    );
}

#[test]
fn growing_tracks_use_defaults() {
    let mut layout = TrackLayout::new(vec![30.0], vec![15.0]);
    layout.set_grid_size(GridSize::new(2, 2));
    assert_eq!(layout.grid_size(), GridSize::new(2, 2));
    assert_eq!(
        layout.cell_rect(cell(1, 1)),
        Ok(Rect::new(
            30.0,
            15.0,
            gridselect::layout::DEFAULT_COL_WIDTH,
            gridselect::layout::DEFAULT_ROW_HEIGHT
        ))
    );
}
