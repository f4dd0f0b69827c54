//! Entity records and the drawing-level collection that owns them.
//!
//! Entities are created once from normalized extraction output and are
//! read-only for the remainder of processing. Derived records (relationships,
//! grid locations, spaces) refer back to them through [`EntityRef`] indices
//! rather than owning or duplicating entity data.

use serde::Serialize;

use crate::model::diagnostics::{Diagnostic, DiagnosticKind};
use crate::utils::{BBox, EPSILON, Point, distance};

/// A text label anchored at a point.
#[derive(Clone, Debug, Serialize)]
pub struct TextElement {
    pub content: String,
    pub position: Point,
    pub rotation: f64,
    pub height: f64,
    pub layer: String,
    pub color: i32,
    pub style: String,
}

/// A straight line segment. Zero-length segments are rejected at insert.
#[derive(Clone, Debug, Serialize)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
    pub layer: String,
    pub color: i32,
    pub linetype: String,
    pub lineweight: i32,
}

impl LineSegment {
    pub fn midpoint(&self) -> Point {
        (
            (self.start.0 + self.end.0) / 2.0,
            (self.start.1 + self.end.1) / 2.0,
        )
    }

    pub fn length(&self) -> f64 {
        distance(self.start, self.end)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CircleElement {
    pub center: Point,
    pub radius: f64,
    pub layer: String,
    pub color: i32,
}

/// An axis-aligned rectangle derived upstream from a closed 4-sided
/// polyline. Width and height are always positive once inserted.
#[derive(Clone, Debug, Serialize)]
pub struct RectElement {
    /// Lower-left corner.
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    pub layer: String,
    pub color: i32,
}

impl RectElement {
    pub fn bbox(&self) -> BBox {
        BBox {
            min_x: self.origin.0,
            min_y: self.origin.1,
            max_x: self.origin.0 + self.width,
            max_y: self.origin.1 + self.height,
        }
    }

    pub fn center(&self) -> Point {
        (
            self.origin.0 + self.width / 2.0,
            self.origin.1 + self.height / 2.0,
        )
    }
}

/// Entity kind discriminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum EntityKind {
    Text,
    Line,
    Circle,
    Rect,
}

/// Index-based back-reference into a [`Drawing`]'s per-kind collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub index: usize,
}

impl EntityRef {
    pub fn text(index: usize) -> Self {
        Self {
            kind: EntityKind::Text,
            index,
        }
    }

    pub fn line(index: usize) -> Self {
        Self {
            kind: EntityKind::Line,
            index,
        }
    }

    pub fn circle(index: usize) -> Self {
        Self {
            kind: EntityKind::Circle,
            index,
        }
    }

    pub fn rect(index: usize) -> Self {
        Self {
            kind: EntityKind::Rect,
            index,
        }
    }
}

fn finite_point(p: Point) -> bool {
    p.0.is_finite() && p.1.is_finite()
}

/// The entity collections for one drawing.
///
/// Inserts validate their input: degenerate or non-finite primitives are
/// skipped with a recorded diagnostic and never fail the batch.
#[derive(Clone, Debug, Default)]
pub struct Drawing {
    pub texts: Vec<TextElement>,
    pub lines: Vec<LineSegment>,
    pub circles: Vec<CircleElement>,
    pub rects: Vec<RectElement>,
    diagnostics: Vec<Diagnostic>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_text(&mut self, text: TextElement) -> Option<EntityRef> {
        if !finite_point(text.position) {
            self.skip(
                DiagnosticKind::MalformedEntity,
                format!("text {:?} has non-finite position", text.content),
            );
            return None;
        }
        self.texts.push(text);
        Some(EntityRef::text(self.texts.len() - 1))
    }

    pub fn add_line(&mut self, line: LineSegment) -> Option<EntityRef> {
        if !finite_point(line.start) || !finite_point(line.end) {
            self.skip(
                DiagnosticKind::MalformedEntity,
                "line has non-finite endpoint".to_string(),
            );
            return None;
        }
        if line.length() < EPSILON {
            self.skip(
                DiagnosticKind::DegenerateEntity,
                format!("zero-length line at {:?}", line.start),
            );
            return None;
        }
        self.lines.push(line);
        Some(EntityRef::line(self.lines.len() - 1))
    }

    pub fn add_circle(&mut self, circle: CircleElement) -> Option<EntityRef> {
        if !finite_point(circle.center) || !circle.radius.is_finite() {
            self.skip(
                DiagnosticKind::MalformedEntity,
                "circle has non-finite geometry".to_string(),
            );
            return None;
        }
        if circle.radius <= 0.0 {
            self.skip(
                DiagnosticKind::DegenerateEntity,
                format!("circle at {:?} has non-positive radius", circle.center),
            );
            return None;
        }
        self.circles.push(circle);
        Some(EntityRef::circle(self.circles.len() - 1))
    }

    pub fn add_rect(&mut self, rect: RectElement) -> Option<EntityRef> {
        if !finite_point(rect.origin) || !rect.width.is_finite() || !rect.height.is_finite() {
            self.skip(
                DiagnosticKind::MalformedEntity,
                "rect has non-finite geometry".to_string(),
            );
            return None;
        }
        if rect.width <= 0.0 || rect.height <= 0.0 {
            self.skip(
                DiagnosticKind::DegenerateEntity,
                format!("rect at {:?} has non-positive extent", rect.origin),
            );
            return None;
        }
        self.rects.push(rect);
        Some(EntityRef::rect(self.rects.len() - 1))
    }

    fn skip(&mut self, kind: DiagnosticKind, message: String) {
        self.diagnostics.push(Diagnostic {
            kind,
            message,
            entity: None,
        });
    }

    /// Diagnostics recorded while building the collection (skipped input).
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn entity_count(&self) -> usize {
        self.texts.len() + self.lines.len() + self.circles.len() + self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0
    }

    /// All entity references in a stable order: texts, lines, circles, rects.
    pub fn entity_refs(&self) -> impl Iterator<Item = EntityRef> + '_ {
        let texts = (0..self.texts.len()).map(EntityRef::text);
        let lines = (0..self.lines.len()).map(EntityRef::line);
        let circles = (0..self.circles.len()).map(EntityRef::circle);
        let rects = (0..self.rects.len()).map(EntityRef::rect);
        texts.chain(lines).chain(circles).chain(rects)
    }

    /// Representative position used for grouping and alignment: text anchor,
    /// line midpoint, circle center, rect center.
    ///
    /// Panics if `entity` was not issued by this drawing's inserts or
    /// [`Drawing::entity_refs`].
    pub fn anchor(&self, entity: EntityRef) -> Point {
        match entity.kind {
            EntityKind::Text => self.texts[entity.index].position,
            EntityKind::Line => self.lines[entity.index].midpoint(),
            EntityKind::Circle => self.circles[entity.index].center,
            EntityKind::Rect => self.rects[entity.index].center(),
        }
    }

    /// Layer name of the referenced entity. Panics on a reference not issued
    /// by this drawing.
    pub fn layer(&self, entity: EntityRef) -> &str {
        match entity.kind {
            EntityKind::Text => &self.texts[entity.index].layer,
            EntityKind::Line => &self.lines[entity.index].layer,
            EntityKind::Circle => &self.circles[entity.index].layer,
            EntityKind::Rect => &self.rects[entity.index].layer,
        }
    }

    /// Color code of the referenced entity. Panics on a reference not issued
    /// by this drawing.
    pub fn color(&self, entity: EntityRef) -> i32 {
        match entity.kind {
            EntityKind::Text => self.texts[entity.index].color,
            EntityKind::Line => self.lines[entity.index].color,
            EntityKind::Circle => self.circles[entity.index].color,
            EntityKind::Rect => self.rects[entity.index].color,
        }
    }
}
