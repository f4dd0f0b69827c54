//! Tests for closed-space detection.

use gridplan_core::grid::{Axis, AxisGrid, GridLocator, Span};
use gridplan_core::model::{DiagnosticKind, LineSegment, SpaceSettings};
use gridplan_core::spaces::detect_spaces;
use gridplan_core::utils::Direction;

fn wall(start: (f64, f64), end: (f64, f64)) -> LineSegment {
    LineSegment {
        start,
        end,
        layer: "WALL".to_string(),
        color: 7,
        linetype: "CONTINUOUS".to_string(),
        lineweight: 25,
    }
}

fn square(x: f64, y: f64, side: f64) -> Vec<LineSegment> {
    vec![
        wall((x, y), (x + side, y)),
        wall((x + side, y), (x + side, y + side)),
        wall((x + side, y + side), (x, y + side)),
        wall((x, y + side), (x, y)),
    ]
}

fn no_grid() -> AxisGrid {
    AxisGrid::default()
}

#[test]
fn square_closes_into_one_space() {
    let lines = square(0.0, 0.0, 1.0);
    let grid = no_grid();
    let report =
        detect_spaces(&lines, &GridLocator::new(&grid), &SpaceSettings::default()).unwrap();

    assert_eq!(report.closed_spaces.len(), 1);
    assert!(report.unclosed.is_empty());
    let space = &report.closed_spaces[0];
    assert_eq!(space.segments.len(), 4);
    assert!((space.bbox.min_x).abs() < 1e-9 && (space.bbox.max_x - 1.0).abs() < 1e-9);
    assert!((space.centroid.0 - 0.5).abs() < 1e-9);
    assert!((space.centroid.1 - 0.5).abs() < 1e-9);
}

#[test]
fn endpoints_snap_within_tolerance() {
    let mut lines = square(0.0, 0.0, 1.0);
    // Perturb one corner by less than the snap tolerance.
    lines[0].start = (1e-4, -1e-4);
    let grid = no_grid();
    let report =
        detect_spaces(&lines, &GridLocator::new(&grid), &SpaceSettings::default()).unwrap();
    assert_eq!(report.closed_spaces.len(), 1);
}

#[test]
fn open_chain_stays_unclosed() {
    // A "C" shape: five connected segments, never closing.
    let lines = vec![
        wall((2.0, 0.0), (1.0, 0.0)),
        wall((1.0, 0.0), (0.0, 0.0)),
        wall((0.0, 0.0), (0.0, 2.0)),
        wall((0.0, 2.0), (1.0, 2.0)),
        wall((1.0, 2.0), (2.0, 2.0)),
    ];
    let grid = no_grid();
    let report =
        detect_spaces(&lines, &GridLocator::new(&grid), &SpaceSettings::default()).unwrap();
    assert!(report.closed_spaces.is_empty());
    assert_eq!(report.unclosed.len(), 5);
}

#[test]
fn dangling_stub_does_not_break_the_loop() {
    let mut lines = square(0.0, 0.0, 1.0);
    lines.push(wall((1.0, 1.0), (2.0, 1.0)));
    let grid = no_grid();
    let report =
        detect_spaces(&lines, &GridLocator::new(&grid), &SpaceSettings::default()).unwrap();

    assert_eq!(report.closed_spaces.len(), 1);
    assert_eq!(report.unclosed.len(), 1);
    assert_eq!(report.unclosed[0].segment, 4);
}

#[test]
fn self_crossing_cycle_is_rejected_with_a_diagnostic() {
    let ring = [
        (0.0, 0.0),
        (4.0, 0.0),
        (4.0, 3.0),
        (2.0, -1.0),
        (0.0, 3.0),
    ];
    let lines: Vec<LineSegment> = (0..ring.len())
        .map(|i| wall(ring[i], ring[(i + 1) % ring.len()]))
        .collect();
    let grid = no_grid();
    let report =
        detect_spaces(&lines, &GridLocator::new(&grid), &SpaceSettings::default()).unwrap();

    assert!(report.closed_spaces.is_empty());
    assert_eq!(report.unclosed.len(), 5);
    assert!(
        report
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::OpenGeometry)
    );
}

#[test]
fn shared_wall_yields_two_spaces() {
    let mut lines = vec![
        wall((0.0, 0.0), (1.0, 0.0)),
        wall((1.0, 0.0), (1.0, 1.0)),
        wall((1.0, 1.0), (0.0, 1.0)),
        wall((0.0, 1.0), (0.0, 0.0)),
    ];
    lines.extend(vec![
        wall((1.0, 0.0), (2.0, 0.0)),
        wall((2.0, 0.0), (2.0, 1.0)),
        wall((2.0, 1.0), (1.0, 1.0)),
    ]);
    let grid = no_grid();
    let report =
        detect_spaces(&lines, &GridLocator::new(&grid), &SpaceSettings::default()).unwrap();

    assert_eq!(report.closed_spaces.len(), 2);
    assert!(report.unclosed.is_empty());
    // The party wall belongs to both spaces.
    let shared = report
        .closed_spaces
        .iter()
        .filter(|s| s.segments.contains(&1))
        .count();
    assert_eq!(shared, 2);
}

#[test]
fn min_lines_excludes_triangles_by_default() {
    let lines = vec![
        wall((0.0, 0.0), (4.0, 0.0)),
        wall((4.0, 0.0), (2.0, 3.0)),
        wall((2.0, 3.0), (0.0, 0.0)),
    ];
    let grid = no_grid();

    let report =
        detect_spaces(&lines, &GridLocator::new(&grid), &SpaceSettings::default()).unwrap();
    assert!(report.closed_spaces.is_empty());
    assert_eq!(report.unclosed.len(), 3);

    let relaxed = SpaceSettings {
        min_lines: 3,
        ..Default::default()
    };
    let report = detect_spaces(&lines, &GridLocator::new(&grid), &relaxed).unwrap();
    assert_eq!(report.closed_spaces.len(), 1);
}

#[test]
fn min_lines_below_a_polygon_is_an_error() {
    let grid = no_grid();
    let settings = SpaceSettings {
        min_lines: 2,
        ..Default::default()
    };
    assert!(detect_spaces(&[], &GridLocator::new(&grid), &settings).is_err());
}

#[test]
fn segment_below_snap_tolerance_collapses() {
    let mut lines = square(0.0, 0.0, 1.0);
    lines.push(wall((0.5, 0.5), (0.5 + 1e-4, 0.5)));
    let grid = no_grid();
    let report =
        detect_spaces(&lines, &GridLocator::new(&grid), &SpaceSettings::default()).unwrap();

    assert_eq!(report.closed_spaces.len(), 1);
    assert_eq!(report.unclosed.len(), 1);
    assert_eq!(report.unclosed[0].segment, 4);
    assert!(
        report
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::DegenerateEntity)
    );
}

#[test]
fn spaces_are_annotated_against_the_grid() {
    fn axis(direction: Direction, position: f64) -> Axis {
        Axis {
            direction,
            position,
            label: None,
            merge_tolerance: 0.5,
        }
    }
    let grid = AxisGrid::from_axes(vec![
        axis(Direction::X, 0.0),
        axis(Direction::X, 10.0),
        axis(Direction::Y, 0.0),
        axis(Direction::Y, 10.0),
    ]);
    let lines = square(2.0, 2.0, 4.0);
    let report =
        detect_spaces(&lines, &GridLocator::new(&grid), &SpaceSettings::default()).unwrap();

    let space = &report.closed_spaces[0];
    let x = space.location.x.unwrap();
    assert_eq!(x.span, Span { lower: 0, upper: 1 });
    assert!(!x.extrapolated);
    assert_eq!(space.x_spans, vec![Span { lower: 0, upper: 1 }]);
    assert_eq!(space.y_spans, vec![Span { lower: 0, upper: 1 }]);
}
