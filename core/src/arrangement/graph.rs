//! Planar straight-line graph of the active lines and the bounding rectangle.
//!
//! Vertices live in an arena addressed by index and are looked up by their
//! rounded coordinates. Every undirected edge is stored as two consecutive
//! half-edges, so the twin of half-edge `h` is `h ^ 1`.

use super::clip::{ActiveLine, Segment};
use crate::diagram::Bounds;
use crate::geometry::{
    point_in_segment_interior, polar_angle, project_point_on_segment, round_point,
    segment_intersection, Point2, PointKey,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Side of the bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    Bottom,
    Top,
}

/// What an edge of the graph was cut from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeSource {
    /// Key of a boundary line.
    Line(String),
    /// The `index`-th piece of one side of the rectangle. Carries no name.
    Boundary { side: Side, index: usize },
}

impl EdgeSource {
    pub fn line_key(&self) -> Option<&str> {
        match self {
            EdgeSource::Line(key) => Some(key.as_str()),
            EdgeSource::Boundary { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Vertex {
    pos: Point2,
    /// Outgoing half-edges, sorted by polar angle once the graph is built
    outgoing: Vec<usize>,
}

#[derive(Debug, Clone)]
struct HalfEdge {
    origin: usize,
    dest: usize,
    source: usize,
}

#[derive(Debug, Clone, Default)]
pub struct PlanarGraph {
    vertices: Vec<Vertex>,
    half_edges: Vec<HalfEdge>,
    sources: Vec<EdgeSource>,
    index: HashMap<PointKey, usize>,
}

impl PlanarGraph {
    /// Build the arrangement of `active` lines inside `bounds`.
    pub fn build(active: &[ActiveLine], bounds: &Bounds) -> Self {
        let mut segments: Vec<(EdgeSource, Segment)> = active
            .iter()
            .map(|a| (EdgeSource::Line(a.key.clone()), Segment::new(a.start, a.end)))
            .collect();
        segments.extend(boundary_segments(active, bounds));

        let mut graph = Self::default();
        let mut seen: HashSet<(PointKey, PointKey)> = HashSet::new();

        for (source, cut) in split_segments(&segments) {
            let (a, b) = (PointKey::of(cut.start), PointKey::of(cut.end));
            if a == b || !seen.insert((a.min(b), a.max(b))) {
                continue;
            }
            graph.add_edge(source, cut.start, cut.end);
        }

        graph.sort_outgoing();
        debug!(
            vertices = graph.vertices.len(),
            edges = graph.edge_count(),
            "Built planar graph"
        );
        graph
    }

    fn vertex_at(&mut self, pos: Point2) -> usize {
        let key = PointKey::of(pos);
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.vertices.len();
        self.vertices.push(Vertex {
            pos,
            outgoing: Vec::new(),
        });
        self.index.insert(key, idx);
        idx
    }

    fn add_edge(&mut self, source: EdgeSource, from: Point2, to: Point2) {
        let v1 = self.vertex_at(from);
        let v2 = self.vertex_at(to);
        let source_idx = self.sources.len();
        self.sources.push(source);

        let forward = self.half_edges.len();
        self.half_edges.push(HalfEdge {
            origin: v1,
            dest: v2,
            source: source_idx,
        });
        self.half_edges.push(HalfEdge {
            origin: v2,
            dest: v1,
            source: source_idx,
        });
        self.vertices[v1].outgoing.push(forward);
        self.vertices[v2].outgoing.push(forward + 1);
    }

    /// Ties in angle keep insertion order.
    fn sort_outgoing(&mut self) {
        let half_edges = &self.half_edges;
        let positions: Vec<Point2> = self.vertices.iter().map(|v| v.pos).collect();
        for vertex in &mut self.vertices {
            let origin = vertex.pos;
            vertex.outgoing.sort_by(|&a, &b| {
                let angle_a = polar_angle(origin, positions[half_edges[a].dest]);
                let angle_b = polar_angle(origin, positions[half_edges[b].dest]);
                angle_a.total_cmp(&angle_b)
            });
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.half_edges.len() / 2
    }

    pub fn position(&self, vertex: usize) -> Point2 {
        self.vertices[vertex].pos
    }

    pub fn vertex_of(&self, p: Point2) -> Option<usize> {
        self.index.get(&PointKey::of(p)).copied()
    }

    /// Outgoing half-edges of a vertex in ascending polar angle.
    pub fn outgoing(&self, vertex: usize) -> &[usize] {
        &self.vertices[vertex].outgoing
    }

    pub fn origin(&self, half_edge: usize) -> usize {
        self.half_edges[half_edge].origin
    }

    pub fn dest(&self, half_edge: usize) -> usize {
        self.half_edges[half_edge].dest
    }

    pub fn twin(&self, half_edge: usize) -> usize {
        half_edge ^ 1
    }

    pub fn source(&self, half_edge: usize) -> &EdgeSource {
        &self.sources[self.half_edges[half_edge].source]
    }

    /// Graph of the given segments alone, without rectangle or splitting.
    #[cfg(test)]
    pub(crate) fn from_segments(segments: &[(Point2, Point2)]) -> Self {
        let mut graph = Self::default();
        for (i, &(from, to)) in segments.iter().enumerate() {
            graph.add_edge(EdgeSource::Line(format!("E{}", i)), from, to);
        }
        graph.sort_outgoing();
        graph
    }

    /// Overwrite the angular order at one vertex.
    #[cfg(test)]
    pub(crate) fn set_outgoing(&mut self, vertex: usize, outgoing: Vec<usize>) {
        self.vertices[vertex].outgoing = outgoing;
    }
}

/// Rectangle sides cut at every active endpoint lying on them.
fn boundary_segments(active: &[ActiveLine], bounds: &Bounds) -> Vec<(EdgeSource, Segment)> {
    let [x_min, y_min] = round_point([bounds.x_min, bounds.y_min]);
    let [x_max, y_max] = round_point([bounds.x_max, bounds.y_max]);

    let mut on_box: Vec<Point2> = round_corners(bounds).to_vec();
    for line in active {
        for p in [line.start, line.end] {
            if p[0] == x_min || p[0] == x_max || p[1] == y_min || p[1] == y_max {
                on_box.push(p);
            }
        }
    }

    let mut segments = Vec::new();
    // (side, coordinate fixed on that side, its value, axis to sort along)
    let sides = [
        (Side::Left, 0, x_min, 1),
        (Side::Right, 0, x_max, 1),
        (Side::Bottom, 1, y_min, 0),
        (Side::Top, 1, y_max, 0),
    ];
    for (side, fixed, value, axis) in sides {
        let mut points: Vec<Point2> = on_box.iter().copied().filter(|p| p[fixed] == value).collect();
        points.sort_by(|a, b| a[axis].total_cmp(&b[axis]));
        points.dedup();
        for (index, pair) in points.windows(2).enumerate() {
            segments.push((
                EdgeSource::Boundary { side, index },
                Segment::new(pair[0], pair[1]),
            ));
        }
    }
    segments
}

fn round_corners(bounds: &Bounds) -> [Point2; 4] {
    bounds.corners().map(round_point)
}

/// Cut every segment at the endpoints of other segments lying in its interior
/// and at every crossing with another segment.
fn split_segments(segments: &[(EdgeSource, Segment)]) -> Vec<(EdgeSource, Segment)> {
    let mut endpoints: Vec<Point2> = segments
        .iter()
        .flat_map(|(_, s)| [s.start, s.end])
        .collect();
    endpoints.sort_by_key(|p| PointKey::of(*p));
    endpoints.dedup_by_key(|p| PointKey::of(*p));

    let mut pieces = Vec::new();
    for (i, (source, segment)) in segments.iter().enumerate() {
        let (a, b) = (segment.start, segment.end);
        let mut cuts = vec![a, b];
        cuts.extend(
            endpoints
                .iter()
                .copied()
                .filter(|&p| point_in_segment_interior(a, b, p)),
        );
        for (j, (_, other)) in segments.iter().enumerate() {
            if i == j {
                continue;
            }
            if let Some(p) = segment_intersection(a, b, other.start, other.end) {
                cuts.push(round_point(p));
            }
        }

        cuts.sort_by(|p, q| {
            project_point_on_segment(a, b, *p).total_cmp(&project_point_on_segment(a, b, *q))
        });
        cuts.dedup_by_key(|p| PointKey::of(*p));

        for pair in cuts.windows(2) {
            pieces.push((source.clone(), Segment::new(pair[0], pair[1])));
        }
    }
    pieces
}
