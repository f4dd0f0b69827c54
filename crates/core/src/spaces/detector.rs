//! Closed-space detection over a candidate set of line segments.
//!
//! Faces that survive filtering become [`ClosedSpace`] records; every
//! segment left over is demoted to an [`UnclosedSegment`] with its own grid
//! annotation. Dead ends, crossing cycles and collapsed segments never
//! abort the pass — partial results are always returned.

use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::grid::{GridLocation, GridLocator, Span};
use crate::model::{Diagnostic, DiagnosticKind, LineSegment, SpaceSettings};
use crate::spaces::facewalk::{HalfEdge, build_half_edges, extract_faces};
use crate::spaces::snap::{SnappedGraph, snap_endpoints};
use crate::utils::{BBox, Direction, Point, polygon_signed_area, segments_intersect};

/// A simple closed polygon formed by a cycle of connected segments.
#[derive(Clone, Debug, Serialize)]
pub struct ClosedSpace {
    /// Indices into the input segment slice, in cycle order.
    pub segments: Vec<usize>,
    pub bbox: BBox,
    pub centroid: Point,
    /// Grid location of the centroid.
    pub location: GridLocation,
    /// X-direction spans the bounding box overlaps.
    pub x_spans: Vec<Span>,
    /// Y-direction spans the bounding box overlaps.
    pub y_spans: Vec<Span>,
}

/// A segment assigned to no accepted face.
#[derive(Clone, Debug, Serialize)]
pub struct UnclosedSegment {
    /// Index into the input segment slice.
    pub segment: usize,
    pub start: GridLocation,
    pub end: GridLocation,
}

/// Everything one detection pass produced.
#[derive(Clone, Debug, Default)]
pub struct SpaceReport {
    pub closed_spaces: Vec<ClosedSpace>,
    pub unclosed: Vec<UnclosedSegment>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Detect closed spaces among `lines`, annotating results through the
/// locator's grid.
pub fn detect_spaces(
    lines: &[LineSegment],
    locator: &GridLocator<'_>,
    settings: &SpaceSettings,
) -> Result<SpaceReport> {
    settings.validate()?;

    let mut report = SpaceReport::default();
    if lines.is_empty() {
        return Ok(report);
    }

    let graph: SnappedGraph = snap_endpoints(lines, settings.snap_tolerance);
    report.diagnostics.extend(graph.diagnostics.iter().cloned());

    let half_edges = build_half_edges(&graph.nodes, &graph.segments);
    let faces = extract_faces(&half_edges);
    debug!(
        nodes = graph.nodes.len(),
        segments = graph.segments.len(),
        faces = faces.len(),
        "face walk complete"
    );

    let mut assigned: FxHashSet<usize> = FxHashSet::default();
    for face in &faces {
        match accept_face(face, &half_edges, &graph, settings.min_lines) {
            FaceOutcome::Accepted(space) => {
                let space = annotate(space, locator);
                assigned.extend(space.segments.iter().copied());
                report.closed_spaces.push(space);
            }
            FaceOutcome::SelfIntersecting(edge_count) => {
                report.diagnostics.push(Diagnostic::new(
                    DiagnosticKind::OpenGeometry,
                    format!("{edge_count}-edge cycle rejected: crossing edges"),
                ));
            }
            FaceOutcome::Rejected => {}
        }
    }

    for input in 0..lines.len() {
        if assigned.contains(&input) {
            continue;
        }
        report.unclosed.push(UnclosedSegment {
            segment: input,
            start: locator.locate(lines[input].start),
            end: locator.locate(lines[input].end),
        });
    }

    info!(
        closed = report.closed_spaces.len(),
        unclosed = report.unclosed.len(),
        "closed-space detection finished"
    );
    Ok(report)
}

enum FaceOutcome {
    Accepted(ClosedSpace),
    SelfIntersecting(usize),
    Rejected,
}

/// Check one face against the closed-space invariants: enough edges, a
/// single simple loop, bounded (counter-clockwise) orientation, and no
/// crossing edges.
fn accept_face(
    face: &[usize],
    half_edges: &[HalfEdge],
    graph: &SnappedGraph,
    min_lines: usize,
) -> FaceOutcome {
    if face.len() < min_lines {
        return FaceOutcome::Rejected;
    }

    let mut nodes_seen = FxHashSet::default();
    let mut segments_seen = FxHashSet::default();
    for &he in face {
        if !nodes_seen.insert(half_edges[he].from)
            || !segments_seen.insert(half_edges[he].segment)
        {
            // A repeated node or edge means the walk doubled back through
            // a dead end; these segments stay unclosed.
            return FaceOutcome::Rejected;
        }
    }

    let points: Vec<Point> = face
        .iter()
        .map(|&he| graph.nodes[half_edges[he].from])
        .collect();
    if polygon_signed_area(&points) <= 0.0 {
        // The clockwise face of each component is the unbounded outside.
        return FaceOutcome::Rejected;
    }

    // Non-adjacent edges of a simple loop share no endpoints, so any
    // contact between them is a crossing.
    let n = points.len();
    for i in 0..n {
        for j in i + 1..n {
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            if adjacent {
                continue;
            }
            if segments_intersect(
                points[i],
                points[(i + 1) % n],
                points[j],
                points[(j + 1) % n],
            ) {
                return FaceOutcome::SelfIntersecting(face.len());
            }
        }
    }

    let bbox = BBox::from_points(points.iter().copied());
    let centroid = (
        points.iter().map(|p| p.0).sum::<f64>() / n as f64,
        points.iter().map(|p| p.1).sum::<f64>() / n as f64,
    );
    FaceOutcome::Accepted(ClosedSpace {
        segments: face
            .iter()
            .map(|&he| graph.segments[half_edges[he].segment].input)
            .collect(),
        bbox,
        centroid,
        location: GridLocation::default(),
        x_spans: Vec::new(),
        y_spans: Vec::new(),
    })
}

fn annotate(mut space: ClosedSpace, locator: &GridLocator<'_>) -> ClosedSpace {
    space.location = locator.locate(space.centroid);
    space.x_spans = locator.spans_overlapping(Direction::X, space.bbox.min_x, space.bbox.max_x);
    space.y_spans = locator.spans_overlapping(Direction::Y, space.bbox.min_y, space.bbox.max_y);
    space
}
