//! Tests for the pairwise relationship analyzers.

use gridplan_core::analysis::{
    alignment, analyze, analyze_batch, color_groups, containment, intersection, layer_groups,
    proximity,
};
use gridplan_core::model::{
    AnalysisSettings, DiagnosticKind, Drawing, LineSegment, RectElement, RelationshipKind,
    TextElement,
};
use gridplan_core::utils::Direction;

fn text(content: &str, x: f64, y: f64) -> TextElement {
    TextElement {
        content: content.to_string(),
        position: (x, y),
        rotation: 0.0,
        height: 2.5,
        layer: "ANNO".to_string(),
        color: 7,
        style: "Standard".to_string(),
    }
}

fn line(start: (f64, f64), end: (f64, f64)) -> LineSegment {
    LineSegment {
        start,
        end,
        layer: "WALL".to_string(),
        color: 7,
        linetype: "CONTINUOUS".to_string(),
        lineweight: 25,
    }
}

fn rect(x: f64, y: f64, width: f64, height: f64) -> RectElement {
    RectElement {
        origin: (x, y),
        width,
        height,
        layer: "ROOM".to_string(),
        color: 3,
    }
}

#[test]
fn containment_inside_and_outside() {
    let mut drawing = Drawing::new();
    drawing.add_text(text("inside", 5.0, 5.0));
    drawing.add_text(text("outside", 25.0, 5.0));
    drawing.add_rect(rect(0.0, 0.0, 10.0, 10.0));

    let rels = containment(&drawing);
    assert_eq!(rels.len(), 1);
    assert_eq!(rels[0].kind, RelationshipKind::Contains);
    assert_eq!(rels[0].source.index, 0);
}

#[test]
fn containment_is_boundary_inclusive() {
    let mut drawing = Drawing::new();
    drawing.add_text(text("on edge", 10.0, 5.0));
    drawing.add_rect(rect(0.0, 0.0, 10.0, 10.0));

    assert_eq!(containment(&drawing).len(), 1);
}

#[test]
fn proximity_respects_threshold_and_reports_distance() {
    let mut drawing = Drawing::new();
    drawing.add_text(text("near", 5.0, 3.0));
    drawing.add_text(text("far", 5.0, 300.0));
    drawing.add_line(line((0.0, 0.0), (10.0, 0.0)));

    let rels = proximity(&drawing, 100.0);
    assert_eq!(rels.len(), 1);
    assert!((rels[0].metric.unwrap() - 3.0).abs() < 1e-9);
}

#[test]
fn proximity_beyond_endpoint_clamps_to_endpoint_distance() {
    let mut drawing = Drawing::new();
    // Projection falls past (10, 0); distance is to that endpoint: 5.
    drawing.add_text(text("corner", 13.0, 4.0));
    drawing.add_line(line((0.0, 0.0), (10.0, 0.0)));

    let rels = proximity(&drawing, 100.0);
    assert_eq!(rels.len(), 1);
    assert!((rels[0].metric.unwrap() - 5.0).abs() < 1e-9);
}

#[test]
fn intersection_crossing_and_interior_endpoint() {
    let mut drawing = Drawing::new();
    drawing.add_line(line((-5.0, 5.0), (15.0, 5.0))); // crosses
    drawing.add_line(line((5.0, 5.0), (30.0, 5.0))); // starts inside
    drawing.add_line(line((20.0, 0.0), (30.0, 0.0))); // misses
    drawing.add_rect(rect(0.0, 0.0, 10.0, 10.0));

    let rels = intersection(&drawing);
    let sources: Vec<usize> = rels.iter().map(|r| r.source.index).collect();
    assert_eq!(sources, vec![0, 1]);
}

#[test]
fn intersection_counts_edge_tangent_touch() {
    let mut drawing = Drawing::new();
    // Collinear with the rectangle's bottom edge.
    drawing.add_line(line((-5.0, 0.0), (5.0, 0.0)));
    drawing.add_rect(rect(0.0, 0.0, 10.0, 10.0));

    assert_eq!(intersection(&drawing).len(), 1);
}

#[test]
fn color_match_without_layer_match() {
    let mut drawing = Drawing::new();
    let mut a = text("a", 0.0, 0.0);
    a.layer = "A".to_string();
    a.color = 7;
    let mut b = text("b", 50.0, 50.0);
    b.layer = "B".to_string();
    b.color = 7;
    drawing.add_text(a);
    drawing.add_text(b);

    assert_eq!(color_groups(&drawing).len(), 1);
    assert!(layer_groups(&drawing).is_empty());
}

#[test]
fn layer_match_without_color_match() {
    let mut drawing = Drawing::new();
    let mut a = text("a", 0.0, 0.0);
    a.layer = "A".to_string();
    a.color = 1;
    let mut b = text("b", 50.0, 50.0);
    b.layer = "A".to_string();
    b.color = 2;
    drawing.add_text(a);
    drawing.add_text(b);

    assert!(color_groups(&drawing).is_empty());
    assert_eq!(layer_groups(&drawing).len(), 1);
}

#[test]
fn alignment_buckets_split_on_the_tolerance_grid() {
    let mut drawing = Drawing::new();
    // Y coordinates far apart so only X alignment can fire.
    drawing.add_text(text("a", 10.0, 0.0));
    drawing.add_text(text("b", 10.2, 100.0));
    drawing.add_text(text("c", 14.9, 200.0));

    let rels = alignment(&drawing, 5.0);
    assert_eq!(rels.len(), 1);
    assert_eq!(rels[0].kind, RelationshipKind::Aligned(Direction::X));
    assert_eq!((rels[0].source.index, rels[0].target.index), (0, 1));
}

#[test]
fn analyze_is_idempotent() {
    let mut drawing = Drawing::new();
    drawing.add_text(text("T1", 5.0, 5.0));
    drawing.add_text(text("T2", 5.1, 80.0));
    drawing.add_line(line((0.0, 0.0), (10.0, 0.0)));
    drawing.add_rect(rect(0.0, 0.0, 10.0, 10.0));
    let settings = AnalysisSettings::default();

    let key = |rels: &[gridplan_core::Relationship]| {
        let mut keys: Vec<String> = rels
            .iter()
            .map(|r| format!("{:?} {:?} {:?}", r.kind, r.source, r.target))
            .collect();
        keys.sort();
        keys
    };
    let first = analyze(&drawing, &settings).unwrap();
    let second = analyze(&drawing, &settings).unwrap();
    assert_eq!(key(&first), key(&second));
}

#[test]
fn degenerate_entities_are_skipped_with_diagnostics() {
    let mut drawing = Drawing::new();
    assert!(drawing.add_line(line((1.0, 1.0), (1.0, 1.0))).is_none());
    assert!(
        drawing
            .add_rect(RectElement {
                origin: (0.0, 0.0),
                width: 0.0,
                height: 5.0,
                layer: "ROOM".to_string(),
                color: 3,
            })
            .is_none()
    );
    assert!(drawing.is_empty());
    assert_eq!(drawing.diagnostics().len(), 2);
    assert!(
        drawing
            .diagnostics()
            .iter()
            .all(|d| d.kind == DiagnosticKind::DegenerateEntity)
    );
}

#[test]
fn non_finite_entities_are_skipped_as_malformed() {
    let mut drawing = Drawing::new();
    assert!(drawing.add_text(text("lost", f64::NAN, 0.0)).is_none());
    assert!(
        drawing
            .add_line(line((0.0, 0.0), (f64::INFINITY, 0.0)))
            .is_none()
    );
    assert!(drawing.is_empty());
    assert_eq!(drawing.diagnostics().len(), 2);
    assert!(
        drawing
            .diagnostics()
            .iter()
            .all(|d| d.kind == DiagnosticKind::MalformedEntity)
    );
}

#[test]
fn invalid_settings_fail_before_analysis() {
    let drawing = Drawing::new();
    let settings = AnalysisSettings {
        max_distance: 0.0,
        ..Default::default()
    };
    assert!(analyze(&drawing, &settings).is_err());
}

#[test]
fn batch_matches_per_drawing_analysis() {
    let mut a = Drawing::new();
    a.add_text(text("T", 5.0, 5.0));
    a.add_rect(rect(0.0, 0.0, 10.0, 10.0));
    let mut b = Drawing::new();
    b.add_line(line((0.0, 0.0), (10.0, 0.0)));
    b.add_text(text("L", 5.0, 1.0));

    let settings = AnalysisSettings::default();
    let batch = analyze_batch(&[a.clone(), b.clone()], &settings).unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].len(), analyze(&a, &settings).unwrap().len());
    assert_eq!(batch[1].len(), analyze(&b, &settings).unwrap().len());
}

#[test]
fn relationships_serialize_for_the_report_writer() {
    let mut drawing = Drawing::new();
    drawing.add_text(text("T", 5.0, 5.0));
    drawing.add_rect(rect(0.0, 0.0, 10.0, 10.0));

    let rels = containment(&drawing);
    let json = serde_json::to_string(&rels).unwrap();
    assert!(json.contains("Contains"));
}
