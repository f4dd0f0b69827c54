//! Point-to-grid lookup over a built [`AxisGrid`].
//!
//! The locator holds a read-only reference to the grid; lookups are
//! deterministic binary searches with no shared mutable state, so one
//! locator can serve concurrent callers.

use serde::Serialize;

use crate::grid::axes::{Axis, AxisGrid};
use crate::model::TextElement;
use crate::utils::{Direction, Point};

/// The interval between two adjacent axes in one direction, identified by
/// the bounding axis indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Span {
    pub lower: usize,
    pub upper: usize,
}

/// Where a coordinate falls along one direction's axis sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AxisFix {
    /// Index of the nearest axis.
    pub nearest: usize,
    /// The enclosing span, or the nearest boundary span when the
    /// coordinate lies outside the grid.
    pub span: Span,
    /// Set when the coordinate lies beyond the first or last axis and the
    /// span is extrapolated rather than enclosing.
    pub extrapolated: bool,
}

/// Grid location of a point; a direction with no axes yields `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Default)]
pub struct GridLocation {
    pub x: Option<AxisFix>,
    pub y: Option<AxisFix>,
}

/// Grid location of one text entity, by index into the text collection.
#[derive(Clone, Debug, Serialize)]
pub struct TextGridPosition {
    pub text: usize,
    pub location: GridLocation,
}

/// Read-only nearest-axis and span lookup.
#[derive(Clone, Copy, Debug)]
pub struct GridLocator<'g> {
    grid: &'g AxisGrid,
}

impl<'g> GridLocator<'g> {
    pub fn new(grid: &'g AxisGrid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &'g AxisGrid {
        self.grid
    }

    /// Locate a point against both directions.
    pub fn locate(&self, point: Point) -> GridLocation {
        GridLocation {
            x: locate_axis(self.grid.x_axes(), point.0),
            y: locate_axis(self.grid.y_axes(), point.1),
        }
    }

    /// Per text entity, its nearest axis and enclosing span per direction.
    pub fn locate_texts(&self, texts: &[TextElement]) -> Vec<TextGridPosition> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| TextGridPosition {
                text: i,
                location: self.locate(t.position),
            })
            .collect()
    }

    /// All spans in one direction overlapped by the open interval
    /// (`min`, `max`).
    pub fn spans_overlapping(&self, direction: Direction, min: f64, max: f64) -> Vec<Span> {
        let axes = self.grid.axes(direction);
        let mut out = Vec::new();
        for i in 0..axes.len().saturating_sub(1) {
            if axes[i].position < max && axes[i + 1].position > min {
                out.push(Span {
                    lower: i,
                    upper: i + 1,
                });
            }
        }
        out
    }

    /// Label of an axis, if it has one.
    pub fn label(&self, direction: Direction, index: usize) -> Option<&str> {
        self.grid.axes(direction).get(index)?.label.as_deref()
    }
}

fn locate_axis(axes: &[Axis], coord: f64) -> Option<AxisFix> {
    if axes.is_empty() {
        return None;
    }
    if axes.len() == 1 {
        return Some(AxisFix {
            nearest: 0,
            span: Span { lower: 0, upper: 0 },
            extrapolated: true,
        });
    }

    // Number of axes at or below the coordinate.
    let i = axes.partition_point(|a| a.position <= coord);
    let (span, extrapolated) = if i == 0 {
        (Span { lower: 0, upper: 1 }, true)
    } else if i == axes.len() {
        let last = axes.len() - 1;
        (
            Span {
                lower: last - 1,
                upper: last,
            },
            coord > axes[last].position,
        )
    } else {
        (
            Span {
                lower: i - 1,
                upper: i,
            },
            false,
        )
    };

    let lo = i.saturating_sub(1);
    let hi = (i).min(axes.len() - 1);
    let nearest = if (coord - axes[lo].position).abs() <= (coord - axes[hi].position).abs() {
        lo
    } else {
        hi
    };

    Some(AxisFix {
        nearest,
        span,
        extrapolated,
    })
}
