//! Axis-grid construction from designated gridline segments.
//!
//! Candidate lines split into vertical (constant X) and horizontal
//! (constant Y) families, their constant coordinates merge within tolerance
//! into one axis each, and nearby short texts become axis labels.

use ordered_float::OrderedFloat;
use rstar::RTree;
use rstar::primitives::GeomWithData;
use serde::Serialize;
use tracing::debug;

use crate::analysis::clustering::{cluster_objects, cluster_span};
use crate::error::Result;
use crate::model::{Diagnostic, DiagnosticKind, GridSettings, LineSegment, TextElement};
use crate::utils::{Direction, Point, distance};

/// How far apart a candidate's endpoint coordinates may be in the constant
/// direction and still count as a straight gridline, in drawing units.
const AXIS_STRAIGHTNESS: f64 = 1.0;

/// One merged gridline in a single direction.
#[derive(Clone, Debug, Serialize)]
pub struct Axis {
    pub direction: Direction,
    pub position: f64,
    pub label: Option<String>,
    /// The merge tolerance in force when this axis was built.
    pub merge_tolerance: f64,
}

/// An axis candidate before merging: the constant coordinate plus the
/// extent covered along the axis direction.
struct Candidate {
    coord: f64,
    lo: f64,
    hi: f64,
}

type LabelPoint = GeomWithData<[f64; 2], usize>;

/// Two independent ordered axis sequences. X-direction axes are ordered by
/// X position, Y-direction axes by Y position; positions within a direction
/// are strictly increasing beyond tolerance.
#[derive(Clone, Debug, Default)]
pub struct AxisGrid {
    x_axes: Vec<Axis>,
    y_axes: Vec<Axis>,
    diagnostics: Vec<Diagnostic>,
}

impl AxisGrid {
    /// Build the grid from candidate gridline segments and label texts.
    pub fn build(
        lines: &[LineSegment],
        texts: &[TextElement],
        settings: &GridSettings,
    ) -> Result<Self> {
        settings.validate()?;

        let keywords: Vec<String> = settings
            .axis_layer_keywords
            .iter()
            .map(|k| k.trim().to_uppercase())
            .filter(|k| !k.is_empty())
            .collect();

        let mut vertical: Vec<Candidate> = Vec::new();
        let mut horizontal: Vec<Candidate> = Vec::new();
        for line in lines {
            if !keywords.is_empty() {
                let layer = line.layer.to_uppercase();
                if !keywords.iter().any(|k| layer.contains(k)) {
                    continue;
                }
            }
            let dx = (line.start.0 - line.end.0).abs();
            let dy = (line.start.1 - line.end.1).abs();
            if dx < AXIS_STRAIGHTNESS {
                vertical.push(Candidate {
                    coord: (line.start.0 + line.end.0) / 2.0,
                    lo: line.start.1.min(line.end.1),
                    hi: line.start.1.max(line.end.1),
                });
            } else if dy < AXIS_STRAIGHTNESS {
                horizontal.push(Candidate {
                    coord: (line.start.1 + line.end.1) / 2.0,
                    lo: line.start.0.min(line.end.0),
                    hi: line.start.0.max(line.end.0),
                });
            }
        }

        let labels = label_index(texts, settings.max_label_len);

        let mut grid = AxisGrid::default();
        grid.x_axes = merge_candidates(
            vertical,
            Direction::X,
            settings,
            &labels,
            texts,
            &mut grid.diagnostics,
        );
        grid.y_axes = merge_candidates(
            horizontal,
            Direction::Y,
            settings,
            &labels,
            texts,
            &mut grid.diagnostics,
        );

        debug!(
            x_axes = grid.x_axes.len(),
            y_axes = grid.y_axes.len(),
            "axis grid built"
        );
        Ok(grid)
    }

    /// Assemble a grid from pre-built axes (e.g. loaded from an earlier
    /// run), re-sorting and merging positions within each axis' tolerance.
    /// The first non-empty label in position order wins a merge.
    pub fn from_axes(axes: Vec<Axis>) -> Self {
        let mut grid = AxisGrid::default();
        let (x, y): (Vec<Axis>, Vec<Axis>) = axes
            .into_iter()
            .partition(|a| a.direction == Direction::X);
        grid.x_axes = merge_prebuilt(x, Direction::X, &mut grid.diagnostics);
        grid.y_axes = merge_prebuilt(y, Direction::Y, &mut grid.diagnostics);
        grid
    }

    pub fn x_axes(&self) -> &[Axis] {
        &self.x_axes
    }

    pub fn y_axes(&self) -> &[Axis] {
        &self.y_axes
    }

    pub fn axes(&self, direction: Direction) -> &[Axis] {
        match direction {
            Direction::X => &self.x_axes,
            Direction::Y => &self.y_axes,
        }
    }

    /// Diagnostics recorded during construction (tolerance drift and the
    /// like).
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.x_axes.is_empty() && self.y_axes.is_empty()
    }
}

fn label_index(texts: &[TextElement], max_label_len: usize) -> RTree<LabelPoint> {
    let points: Vec<LabelPoint> = texts
        .iter()
        .enumerate()
        .filter(|(_, t)| {
            let content = t.content.trim();
            !content.is_empty() && content.chars().count() <= max_label_len
        })
        .map(|(i, t)| GeomWithData::new([t.position.0, t.position.1], i))
        .collect();
    RTree::bulk_load(points)
}

fn nearest_label(
    labels: &RTree<LabelPoint>,
    texts: &[TextElement],
    endpoints: [Point; 2],
    radius: f64,
) -> Option<String> {
    let mut best: Option<(f64, usize)> = None;
    for p in endpoints {
        if let Some(hit) = labels.nearest_neighbor(&[p.0, p.1]) {
            let d = distance((hit.geom()[0], hit.geom()[1]), p);
            if d <= radius && best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, hit.data));
            }
        }
    }
    best.map(|(_, i)| texts[i].content.trim().to_string())
}

fn merge_candidates(
    candidates: Vec<Candidate>,
    direction: Direction,
    settings: &GridSettings,
    labels: &RTree<LabelPoint>,
    texts: &[TextElement],
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Axis> {
    let clusters = cluster_objects(candidates, |c| c.coord, settings.merge_tolerance);
    let mut axes = Vec::new();
    for cluster in clusters {
        let coords: Vec<f64> = cluster.iter().map(|c| c.coord).collect();
        let span = cluster_span(&coords);
        let position = coords.iter().sum::<f64>() / coords.len() as f64;

        let lo = cluster.iter().map(|c| c.lo).fold(f64::INFINITY, f64::min);
        let hi = cluster
            .iter()
            .map(|c| c.hi)
            .fold(f64::NEG_INFINITY, f64::max);
        if hi - lo < settings.min_axis_length {
            debug!(position, extent = hi - lo, "axis candidate too short");
            continue;
        }

        // Only surviving axes report drift; a discarded cluster names no axis.
        if span > settings.merge_tolerance {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::ToleranceDrift,
                format!(
                    "axis cluster at {position:.4} spans {span:.4}, beyond merge tolerance"
                ),
            ));
        }

        let endpoints = match direction {
            Direction::X => [(position, lo), (position, hi)],
            Direction::Y => [(lo, position), (hi, position)],
        };
        axes.push(Axis {
            direction,
            position,
            label: nearest_label(labels, texts, endpoints, settings.label_search_radius),
            merge_tolerance: settings.merge_tolerance,
        });
    }
    axes
}

fn merge_prebuilt(
    mut axes: Vec<Axis>,
    direction: Direction,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Axis> {
    axes.sort_by_key(|a| OrderedFloat(a.position));
    let mut merged: Vec<Axis> = Vec::new();
    let mut group: Vec<Axis> = Vec::new();
    let flush = |group: &mut Vec<Axis>, merged: &mut Vec<Axis>, diagnostics: &mut Vec<Diagnostic>| {
        if group.is_empty() {
            return;
        }
        let positions: Vec<f64> = group.iter().map(|a| a.position).collect();
        let tolerance = group[0].merge_tolerance;
        let span = cluster_span(&positions);
        if span > tolerance {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::ToleranceDrift,
                format!("merged axes span {span:.4}, beyond tolerance {tolerance:.4}"),
            ));
        }
        merged.push(Axis {
            direction,
            position: positions.iter().sum::<f64>() / positions.len() as f64,
            label: group.iter().find_map(|a| a.label.clone()),
            merge_tolerance: tolerance,
        });
        group.clear();
    };
    for axis in axes {
        match group.last() {
            Some(prev) if axis.position - prev.position < axis.merge_tolerance => {
                group.push(axis);
            }
            _ => {
                flush(&mut group, &mut merged, diagnostics);
                group.push(axis);
            }
        }
    }
    flush(&mut group, &mut merged, diagnostics);
    merged
}
