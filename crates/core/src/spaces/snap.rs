//! Endpoint snapping: quantizes segment endpoints into canonical graph
//! nodes by clustering points within tolerance.
//!
//! Two endpoints merge into the same node iff their distance is below
//! tolerance, applied transitively through a union-find structure, so the
//! outcome is well-defined for clusters of near-coincident points no matter
//! the input ordering.

use ordered_float::OrderedFloat;

use crate::model::{Diagnostic, DiagnosticKind, EntityRef, LineSegment};
use crate::utils::{BBox, Point, distance};

pub(crate) struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            // Path halving.
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    pub fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

/// One input segment after snapping, with canonical node ids.
pub(crate) struct SnappedSegment {
    /// Index into the input slice.
    pub input: usize,
    pub a: usize,
    pub b: usize,
}

/// The snapped multigraph plus everything that fell out along the way.
pub(crate) struct SnappedGraph {
    /// Canonical node positions (cluster means).
    pub nodes: Vec<Point>,
    pub segments: Vec<SnappedSegment>,
    /// Input indices whose endpoints collapsed into a single node.
    pub degenerate: Vec<usize>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Cluster all segment endpoints within `tolerance` into canonical nodes.
///
/// Endpoints are swept in X order; only pairs within the tolerance window
/// are distance-tested, so snapping stays near-linear for spread-out
/// drawings.
pub(crate) fn snap_endpoints(lines: &[LineSegment], tolerance: f64) -> SnappedGraph {
    let mut points: Vec<Point> = Vec::with_capacity(lines.len() * 2);
    for line in lines {
        points.push(line.start);
        points.push(line.end);
    }

    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by_key(|&i| OrderedFloat(points[i].0));

    let mut uf = UnionFind::new(points.len());
    for (i, &pi) in order.iter().enumerate() {
        for &pj in order[i + 1..].iter() {
            if points[pj].0 - points[pi].0 > tolerance {
                break;
            }
            if distance(points[pi], points[pj]) <= tolerance {
                uf.union(pi, pj);
            }
        }
    }

    // Canonical node per cluster root, positioned at the cluster mean.
    let mut node_of_root: rustc_hash::FxHashMap<usize, usize> = rustc_hash::FxHashMap::default();
    let mut sums: Vec<(f64, f64, usize)> = Vec::new();
    let mut extents: Vec<BBox> = Vec::new();
    let mut node_of_point: Vec<usize> = vec![0; points.len()];
    for (i, &p) in points.iter().enumerate() {
        let root = uf.find(i);
        let node = *node_of_root.entry(root).or_insert_with(|| {
            sums.push((0.0, 0.0, 0));
            extents.push(BBox::empty());
            sums.len() - 1
        });
        sums[node].0 += p.0;
        sums[node].1 += p.1;
        sums[node].2 += 1;
        extents[node].expand(p);
        node_of_point[i] = node;
    }

    let nodes: Vec<Point> = sums
        .iter()
        .map(|&(sx, sy, n)| (sx / n as f64, sy / n as f64))
        .collect();

    let mut diagnostics = Vec::new();
    for (node, extent) in extents.iter().enumerate() {
        let span = extent.width().hypot(extent.height());
        if span > tolerance {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::ToleranceDrift,
                format!(
                    "snapped node at {:?} covers points {span:.6} apart, beyond snap tolerance",
                    nodes[node]
                ),
            ));
        }
    }

    let mut segments = Vec::with_capacity(lines.len());
    let mut degenerate = Vec::new();
    for input in 0..lines.len() {
        let a = node_of_point[input * 2];
        let b = node_of_point[input * 2 + 1];
        if a == b {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::DegenerateEntity,
                    "segment collapsed to a point at snap tolerance",
                )
                .for_entity(EntityRef::line(input)),
            );
            degenerate.push(input);
            continue;
        }
        segments.push(SnappedSegment { input, a, b });
    }

    SnappedGraph {
        nodes,
        segments,
        degenerate,
        diagnostics,
    }
}
