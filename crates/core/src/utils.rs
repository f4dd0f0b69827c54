//! Planar geometry primitives shared across the analyzers.
//!
//! All computation is 2-D; upstream extraction has already dropped the Z
//! coordinate. Comparisons against coordinates use explicit tolerances,
//! never exact equality.

/// A 2D point (x, y).
pub type Point = (f64, f64);

/// Small epsilon for floating-point comparisons.
pub const EPSILON: f64 = 1e-9;

/// Compares two floats for approximate equality.
#[inline]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    (dx * dx + dy * dy).sqrt()
}

/// The two grid directions. An X-direction axis is a vertical gridline
/// fixing an X coordinate; a Y-direction axis fixes a Y coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub enum Direction {
    X,
    Y,
}

/// An axis-aligned bounding box with min/max corners.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    /// Empty box, ready to absorb points.
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Self {
        let mut bbox = Self::empty();
        for p in points {
            bbox.expand(p);
        }
        bbox
    }

    pub fn expand(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.0);
        self.min_y = self.min_y.min(p.1);
        self.max_x = self.max_x.max(p.0);
        self.max_y = self.max_y.max(p.1);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Boundary-inclusive point test.
    pub fn contains(&self, p: Point) -> bool {
        self.min_x <= p.0 && p.0 <= self.max_x && self.min_y <= p.1 && p.1 <= self.max_y
    }

    /// Boundary-exclusive point test.
    pub fn contains_strict(&self, p: Point) -> bool {
        self.min_x < p.0 && p.0 < self.max_x && self.min_y < p.1 && p.1 < self.max_y
    }

    /// The four corner-to-corner edges, counter-clockwise from the
    /// lower-left corner.
    pub fn edges(&self) -> [(Point, Point); 4] {
        let ll = (self.min_x, self.min_y);
        let lr = (self.max_x, self.min_y);
        let ur = (self.max_x, self.max_y);
        let ul = (self.min_x, self.max_y);
        [(ll, lr), (lr, ur), (ur, ul), (ul, ll)]
    }
}

/// Minimal distance from a point to a segment, clamping the projection to
/// the segment. A projection falling beyond an endpoint yields the distance
/// to that endpoint; a zero-length segment degenerates to point distance.
pub fn point_to_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let len_sq = dx * dx + dy * dy;
    if len_sq < EPSILON * EPSILON {
        return distance(p, a);
    }
    let t = (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0);
    distance(p, (a.0 + t * dx, a.1 + t * dy))
}

/// Twice the signed area of the triangle (a, b, c). Positive when c lies to
/// the left of a->b.
#[inline]
pub fn cross(a: Point, b: Point, c: Point) -> f64 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

/// Whether c lies on the segment a-b, assuming the three are collinear.
fn on_segment(a: Point, b: Point, c: Point) -> bool {
    c.0 >= a.0.min(b.0) - EPSILON
        && c.0 <= a.0.max(b.0) + EPSILON
        && c.1 >= a.1.min(b.1) - EPSILON
        && c.1 <= a.1.max(b.1) + EPSILON
}

/// Boundary-inclusive segment intersection test. Endpoint touches and
/// collinear overlap both count as intersections.
pub fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let d1 = cross(b1, b2, a1);
    let d2 = cross(b1, b2, a2);
    let d3 = cross(a1, a2, b1);
    let d4 = cross(a1, a2, b2);

    if ((d1 > EPSILON && d2 < -EPSILON) || (d1 < -EPSILON && d2 > EPSILON))
        && ((d3 > EPSILON && d4 < -EPSILON) || (d3 < -EPSILON && d4 > EPSILON))
    {
        return true;
    }

    (d1.abs() <= EPSILON && on_segment(b1, b2, a1))
        || (d2.abs() <= EPSILON && on_segment(b1, b2, a2))
        || (d3.abs() <= EPSILON && on_segment(a1, a2, b1))
        || (d4.abs() <= EPSILON && on_segment(a1, a2, b2))
}

/// Shoelace signed area of a polygon given in vertex order. Positive for
/// counter-clockwise winding.
pub fn polygon_signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..points.len() {
        let (x0, y0) = points[i];
        let (x1, y1) = points[(i + 1) % points.len()];
        sum += x0 * y1 - x1 * y0;
    }
    sum / 2.0
}
