//! Face enumeration by walking half-edges and always turning left.

use super::graph::{EdgeSource, PlanarGraph};
use super::ArrangementError;
use crate::geometry::{polygon_signed_area, Point2};

/// One traced face: its vertices in walk order (not closed) and the source of
/// each traversed half-edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub points: Vec<Point2>,
    pub sources: Vec<EdgeSource>,
}

impl Face {
    /// Positive for bounded faces, non-positive for the outer face.
    pub fn signed_area(&self) -> f64 {
        polygon_signed_area(&self.points)
    }
}

/// Enumerate every face of `graph`, each half-edge consumed exactly once.
///
/// From half-edge `u -> v` the walk continues with the outgoing half-edge of
/// `v` that precedes `v -> u` in angular order. Bounded faces come out
/// counter-clockwise, the outer face clockwise.
pub fn trace_faces(graph: &PlanarGraph) -> Result<Vec<Face>, ArrangementError> {
    let mut used = vec![false; graph.half_edge_count()];
    let mut faces = Vec::new();

    for start in 0..graph.half_edge_count() {
        if used[start] {
            continue;
        }

        let mut face = Face {
            points: Vec::new(),
            sources: Vec::new(),
        };
        let mut current = start;
        loop {
            used[current] = true;
            face.points.push(graph.position(graph.origin(current)));
            face.sources.push(graph.source(current).clone());

            let towards = graph.dest(current);
            let outs = graph.outgoing(towards);
            let reverse = graph.twin(current);
            let idx = outs.iter().position(|&h| h == reverse).ok_or_else(|| {
                ArrangementError::Topology {
                    at: graph.position(towards),
                    reason: "missing reverse half-edge",
                }
            })?;

            current = outs[(idx + outs.len() - 1) % outs.len()];
            if current == start {
                break;
            }
            if used[current] {
                return Err(ArrangementError::Topology {
                    at: graph.position(graph.origin(current)),
                    reason: "walk re-entered a consumed half-edge",
                });
            }
        }
        faces.push(face);
    }

    Ok(faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrangement::clip::ActiveLine;
    use crate::diagram::Bounds;
    use crate::geometry::ApproxEq;

    fn square() -> Bounds {
        Bounds::new(0.0, 10.0, 0.0, 10.0)
    }

    fn diagonal() -> Vec<ActiveLine> {
        vec![ActiveLine {
            key: "A/B".into(),
            start: [0.0, 0.0],
            end: [10.0, 10.0],
        }]
    }

    #[test]
    fn test_bare_rectangle_has_inner_and_outer_face() {
        let graph = PlanarGraph::build(&[], &square());
        let faces = trace_faces(&graph).unwrap();
        assert_eq!(faces.len(), 2);
        let mut areas: Vec<f64> = faces.iter().map(|f| f.signed_area()).collect();
        areas.sort_by(|a, b| a.total_cmp(b));
        assert!(areas[0].approx_eq(&-100.0));
        assert!(areas[1].approx_eq(&100.0));
    }

    #[test]
    fn test_diagonal_splits_rectangle_into_two_triangles() {
        let graph = PlanarGraph::build(&diagonal(), &square());
        let faces = trace_faces(&graph).unwrap();
        assert_eq!(faces.len(), 3);

        let inner: Vec<f64> = faces
            .iter()
            .map(|f| f.signed_area())
            .filter(|&a| a > 0.0)
            .collect();
        assert_eq!(inner.len(), 2);
        assert!(inner.iter().all(|a| a.approx_eq(&50.0)));
        assert!((inner[0] + inner[1]).approx_eq(&square().area()));

        let outer = faces.iter().filter(|f| f.signed_area() <= 0.0).count();
        assert_eq!(outer, 1);
    }

    #[test]
    fn test_every_half_edge_used_once() {
        let graph = PlanarGraph::build(&diagonal(), &square());
        let faces = trace_faces(&graph).unwrap();
        let total: usize = faces.iter().map(|f| f.points.len()).sum();
        assert_eq!(total, graph.half_edge_count());
    }

    #[test]
    fn test_inner_faces_reference_the_line() {
        let graph = PlanarGraph::build(&diagonal(), &square());
        let faces = trace_faces(&graph).unwrap();
        for face in faces.iter().filter(|f| f.signed_area() > 0.0) {
            let lines: Vec<_> = face.sources.iter().filter_map(|s| s.line_key()).collect();
            assert_eq!(lines, vec!["A/B"]);
        }
    }

    #[test]
    fn test_dangling_segment_is_walked_both_ways() {
        let lines = [ActiveLine {
            key: "A/B".into(),
            start: [0.0, 5.0],
            end: [5.0, 5.0],
        }];
        let graph = PlanarGraph::build(&lines, &square());
        let faces = trace_faces(&graph).unwrap();
        assert_eq!(faces.len(), 2);
        let inner = faces.iter().find(|f| f.signed_area() > 0.0).unwrap();
        assert!(inner.signed_area().approx_eq(&100.0));
        let spur = inner
            .sources
            .iter()
            .filter(|s| s.line_key() == Some("A/B"))
            .count();
        assert_eq!(spur, 2);
    }

    #[test]
    fn test_empty_graph_has_no_faces() {
        let graph = PlanarGraph::build(&[], &Bounds::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(graph.half_edge_count(), 0);
        assert!(trace_faces(&graph).unwrap().is_empty());
    }

    // A(0,0) = 0, B(1,0) = 1, C(0,1) = 2. Half-edges: 0 A->B, 1 B->A,
    // 2 B->C, 3 C->B, 4 C->A, 5 A->C.
    fn triangle() -> PlanarGraph {
        PlanarGraph::from_segments(&[
            ([0.0, 0.0], [1.0, 0.0]),
            ([1.0, 0.0], [0.0, 1.0]),
            ([0.0, 1.0], [0.0, 0.0]),
        ])
    }

    #[test]
    fn test_triangle_graph_traces_two_faces() {
        let faces = trace_faces(&triangle()).unwrap();
        assert_eq!(faces.len(), 2);
        assert!(faces.iter().any(|f| f.signed_area().approx_eq(&0.5)));
    }

    #[test]
    fn test_missing_reverse_half_edge_is_reported() {
        let mut graph = triangle();
        // B no longer lists B->A
        graph.set_outgoing(1, vec![2]);
        let err = trace_faces(&graph).unwrap_err();
        assert_eq!(
            err,
            ArrangementError::Topology {
                at: [1.0, 0.0],
                reason: "missing reverse half-edge",
            }
        );
    }

    #[test]
    fn test_walk_into_consumed_half_edge_is_reported() {
        let mut graph = triangle();
        // After C->A the walk is sent to B->C instead of back to A->B
        graph.set_outgoing(0, vec![5, 2]);
        let err = trace_faces(&graph).unwrap_err();
        assert_eq!(
            err,
            ArrangementError::Topology {
                at: [1.0, 0.0],
                reason: "walk re-entered a consumed half-edge",
            }
        );
    }
}
