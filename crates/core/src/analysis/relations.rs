//! Relationship analysis between drawing entities.
//!
//! Every analyzer here is a pure function over an immutable [`Drawing`],
//! returning a fresh relationship collection. Running one twice on the same
//! input yields the same set, which is what makes batch runs trivially
//! parallel.

use indexmap::IndexMap;
use itertools::Itertools;
use rayon::prelude::*;
use tracing::debug;

use crate::analysis::clustering::bucket_key;
use crate::error::Result;
use crate::model::{AnalysisSettings, Drawing, EntityRef, Relationship, RelationshipKind};
use crate::utils::{Direction, point_to_segment_distance, segments_intersect};

/// Texts whose anchor lies within a rectangle, boundary inclusive.
pub fn containment(drawing: &Drawing) -> Vec<Relationship> {
    let mut out = Vec::new();
    for (ti, text) in drawing.texts.iter().enumerate() {
        for (ri, rect) in drawing.rects.iter().enumerate() {
            if rect.bbox().contains(text.position) {
                out.push(
                    Relationship::new(
                        RelationshipKind::Contains,
                        EntityRef::text(ti),
                        EntityRef::rect(ri),
                    )
                    .describe(format!("text {:?} inside rectangle", text.content)),
                );
            }
        }
    }
    out
}

/// Texts within `max_distance` of a line, measured from the text anchor to
/// the closest point on the segment.
pub fn proximity(drawing: &Drawing, max_distance: f64) -> Vec<Relationship> {
    let mut out = Vec::new();
    for (ti, text) in drawing.texts.iter().enumerate() {
        for (li, line) in drawing.lines.iter().enumerate() {
            let d = point_to_segment_distance(text.position, line.start, line.end);
            if d <= max_distance {
                out.push(
                    Relationship::new(
                        RelationshipKind::Proximity,
                        EntityRef::text(ti),
                        EntityRef::line(li),
                    )
                    .with_metric(d)
                    .describe(format!("text {:?} near line", text.content)),
                );
            }
        }
    }
    out
}

/// Lines that cross a rectangle edge or end strictly inside one.
/// Edge-tangent collinear touches count as intersections.
pub fn intersection(drawing: &Drawing) -> Vec<Relationship> {
    let mut out = Vec::new();
    for (li, line) in drawing.lines.iter().enumerate() {
        for (ri, rect) in drawing.rects.iter().enumerate() {
            let bbox = rect.bbox();
            let hit = bbox.contains_strict(line.start)
                || bbox.contains_strict(line.end)
                || bbox
                    .edges()
                    .iter()
                    .any(|&(a, b)| segments_intersect(line.start, line.end, a, b));
            if hit {
                out.push(
                    Relationship::new(
                        RelationshipKind::Intersects,
                        EntityRef::line(li),
                        EntityRef::rect(ri),
                    )
                    .describe("line intersects rectangle"),
                );
            }
        }
    }
    out
}

fn emit_group_pairs(
    groups: IndexMap<impl std::hash::Hash + Eq, Vec<EntityRef>>,
    make: impl Fn(EntityRef, EntityRef) -> Relationship,
) -> Vec<Relationship> {
    let mut out = Vec::new();
    for (_, members) in groups {
        if members.len() < 2 {
            continue;
        }
        for (a, b) in members.iter().tuple_combinations() {
            out.push(make(*a, *b));
        }
    }
    out
}

/// Pairs of entities sharing a color code.
pub fn color_groups(drawing: &Drawing) -> Vec<Relationship> {
    let mut groups: IndexMap<i32, Vec<EntityRef>> = IndexMap::new();
    for entity in drawing.entity_refs() {
        groups.entry(drawing.color(entity)).or_default().push(entity);
    }
    emit_group_pairs(groups, |a, b| {
        let color = drawing.color(a);
        Relationship::new(RelationshipKind::ColorMatch, a, b)
            .with_metric(color as f64)
            .describe(format!("same color {color}"))
    })
}

/// Pairs of entities sharing a layer name.
pub fn layer_groups(drawing: &Drawing) -> Vec<Relationship> {
    let mut groups: IndexMap<&str, Vec<EntityRef>> = IndexMap::new();
    for entity in drawing.entity_refs() {
        groups.entry(drawing.layer(entity)).or_default().push(entity);
    }
    emit_group_pairs(groups, |a, b| {
        Relationship::new(RelationshipKind::LayerMatch, a, b)
            .describe(format!("same layer {:?}", drawing.layer(a)))
    })
}

/// Pairs of entities sharing an X or Y coordinate within tolerance.
///
/// Clustering quantizes each anchor coordinate onto the tolerance grid in a
/// single pass; it deliberately does not chase transitive closure across
/// neighboring cells.
pub fn alignment(drawing: &Drawing, tolerance: f64) -> Vec<Relationship> {
    let mut out = Vec::new();
    for direction in [Direction::X, Direction::Y] {
        let mut groups: IndexMap<i64, Vec<EntityRef>> = IndexMap::new();
        for entity in drawing.entity_refs() {
            let anchor = drawing.anchor(entity);
            let coord = match direction {
                Direction::X => anchor.0,
                Direction::Y => anchor.1,
            };
            groups
                .entry(bucket_key(coord, tolerance))
                .or_default()
                .push(entity);
        }
        out.extend(emit_group_pairs(groups, |a, b| {
            let anchor = drawing.anchor(a);
            let (coord, word) = match direction {
                Direction::X => (anchor.0, "vertically"),
                Direction::Y => (anchor.1, "horizontally"),
            };
            Relationship::new(RelationshipKind::Aligned(direction), a, b)
                .with_metric(coord)
                .describe(format!("{word} aligned"))
        }));
    }
    out
}

/// Run every relationship analyzer over one drawing.
pub fn analyze(drawing: &Drawing, settings: &AnalysisSettings) -> Result<Vec<Relationship>> {
    settings.validate()?;
    let mut out = containment(drawing);
    out.extend(proximity(drawing, settings.max_distance));
    out.extend(intersection(drawing));
    out.extend(color_groups(drawing));
    out.extend(layer_groups(drawing));
    out.extend(alignment(drawing, settings.alignment_tolerance));
    debug!(
        entities = drawing.entity_count(),
        relationships = out.len(),
        "relationship analysis finished"
    );
    Ok(out)
}

/// Analyze several drawings in parallel. Each drawing's entity set is
/// independent, so this is parallel at the drawing granularity only.
pub fn analyze_batch(
    drawings: &[Drawing],
    settings: &AnalysisSettings,
) -> Result<Vec<Vec<Relationship>>> {
    settings.validate()?;
    drawings
        .par_iter()
        .map(|drawing| analyze(drawing, settings))
        .collect()
}
