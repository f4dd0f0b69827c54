//! Planar face extraction over the snapped segment graph.
//!
//! Every undirected edge becomes a twin pair of half-edges. Outgoing
//! half-edges at each node are ordered by angle; arriving at a node, the
//! walk leaves via the edge with the smallest clockwise turn relative to
//! the entry edge. Each half-edge then belongs to exactly one face, every
//! bounded face comes out counter-clockwise, and the unbounded outer face
//! of each component comes out clockwise.

use smallvec::SmallVec;

use crate::spaces::snap::SnappedSegment;
use crate::utils::Point;

pub(crate) struct HalfEdge {
    pub from: usize,
    pub to: usize,
    /// Index into the snapped segment list.
    pub segment: usize,
    pub twin: usize,
    pub next: usize,
}

/// Build the linked half-edge structure for the snapped multigraph.
pub(crate) fn build_half_edges(nodes: &[Point], segments: &[SnappedSegment]) -> Vec<HalfEdge> {
    let mut half_edges: Vec<HalfEdge> = Vec::with_capacity(segments.len() * 2);
    let mut outgoing: Vec<SmallVec<[usize; 4]>> = vec![SmallVec::new(); nodes.len()];

    for (si, seg) in segments.iter().enumerate() {
        let fwd = half_edges.len();
        half_edges.push(HalfEdge {
            from: seg.a,
            to: seg.b,
            segment: si,
            twin: fwd + 1,
            next: usize::MAX,
        });
        half_edges.push(HalfEdge {
            from: seg.b,
            to: seg.a,
            segment: si,
            twin: fwd,
            next: usize::MAX,
        });
        outgoing[seg.a].push(fwd);
        outgoing[seg.b].push(fwd + 1);
    }

    for edges in outgoing.iter_mut() {
        // Counter-clockwise angular order around the node.
        edges.sort_by(|&a, &b| {
            let angle = |h: usize| {
                let he = &half_edges[h];
                let (fx, fy) = nodes[he.from];
                let (tx, ty) = nodes[he.to];
                (ty - fy).atan2(tx - fx)
            };
            angle(a)
                .partial_cmp(&angle(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let n = edges.len();
        for (j, &out) in edges.iter().enumerate() {
            // The walk arrives at this node via twin(out); it continues along
            // the angular predecessor of `out`, the smallest clockwise
            // turn away from the entry direction.
            let entry = half_edges[out].twin;
            let next = edges[(j + n - 1) % n];
            half_edges[entry].next = next;
        }
    }

    half_edges
}

/// Walk every half-edge into its face. Returns each face as the list of
/// half-edge ids in traversal order.
pub(crate) fn extract_faces(half_edges: &[HalfEdge]) -> Vec<Vec<usize>> {
    let mut visited = vec![false; half_edges.len()];
    let mut faces = Vec::new();

    for start in 0..half_edges.len() {
        if visited[start] {
            continue;
        }
        let mut face = Vec::new();
        let mut current = start;
        // A face can touch each half-edge at most once; anything longer
        // means an unresolved node, and the partial walk is abandoned.
        for _ in 0..=half_edges.len() {
            visited[current] = true;
            face.push(current);
            current = half_edges[current].next;
            if current == start {
                faces.push(std::mem::take(&mut face));
                break;
            }
            if current == usize::MAX || visited[current] {
                break;
            }
        }
    }

    faces
}
