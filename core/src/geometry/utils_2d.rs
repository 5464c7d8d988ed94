//! 2D geometry utilities for the line arrangement.
//!
//! Pure functions over `[f64; 2]` points: coordinate rounding and point keys,
//! polar ordering, polygon measurements and segment splitting helpers.

use super::{Point2, EPSILON, ROUND_DIGITS};
use serde::{Deserialize, Serialize};

// =============================================================================
// Rounding and Point Identity
// =============================================================================

/// Round a coordinate to `ROUND_DIGITS` decimals. Negative zero becomes zero.
#[inline]
pub fn round_coord(v: f64) -> f64 {
    let scale = 10f64.powi(ROUND_DIGITS);
    (v * scale).round() / scale + 0.0
}

/// Round both coordinates of a point.
#[inline]
pub fn round_point(p: Point2) -> Point2 {
    [round_coord(p[0]), round_coord(p[1])]
}

/// Hashable identity of a point after rounding.
///
/// Two points that round to the same decimal grid cell share a key, so the
/// same physical point reached through different line pairs maps to a single
/// graph vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PointKey(i64, i64);

impl PointKey {
    pub fn of(p: Point2) -> Self {
        let scale = 10f64.powi(ROUND_DIGITS);
        Self((p[0] * scale).round() as i64, (p[1] * scale).round() as i64)
    }
}

/// Check if two 2D points are approximately equal within EPSILON.
#[inline]
pub fn points_equal(p1: Point2, p2: Point2) -> bool {
    (p1[0] - p2[0]).abs() < EPSILON && (p1[1] - p2[1]).abs() < EPSILON
}

// =============================================================================
// Angles
// =============================================================================

/// Angle of `point - origin` in [-pi, pi]. Only meaningful as a sort key.
#[inline]
pub fn polar_angle(origin: Point2, point: Point2) -> f64 {
    (point[1] - origin[1]).atan2(point[0] - origin[0])
}

// =============================================================================
// Polygon Operations
// =============================================================================

/// Compute signed area of a polygon using the Shoelace formula.
/// Positive = CCW winding, Negative = CW winding.
///
/// Accepts both explicitly closed loops (first point repeated) and
/// implicitly closed ones.
pub fn polygon_signed_area(vertices: &[Point2]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += vertices[i][0] * vertices[j][1] - vertices[j][0] * vertices[i][1];
    }
    area / 2.0
}

/// Area-weighted centroid of a polygon.
///
/// Returns `None` for a polygon with zero signed area, where the centroid is
/// undefined.
pub fn polygon_centroid(vertices: &[Point2]) -> Option<Point2> {
    let n = vertices.len();
    let area = polygon_signed_area(vertices);
    if area == 0.0 {
        return None;
    }

    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        let cross = vertices[i][0] * vertices[j][1] - vertices[j][0] * vertices[i][1];
        cx += (vertices[i][0] + vertices[j][0]) * cross;
        cy += (vertices[i][1] + vertices[j][1]) * cross;
    }

    Some([cx / (6.0 * area), cy / (6.0 * area)])
}

/// Repeat the first vertex at the end, unless the loop is already closed.
pub fn close_loop(points: &[Point2]) -> Vec<Point2> {
    let mut closed = points.to_vec();
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        if points.len() == 1 || first != last {
            closed.push(*first);
        }
    }
    closed
}

// =============================================================================
// Segment Operations
// =============================================================================

/// Calculate intersection point of two 2D line segments.
/// Returns Some(point) if segments intersect, None otherwise (including the
/// parallel and collinear cases).
pub fn segment_intersection(a0: Point2, a1: Point2, b0: Point2, b1: Point2) -> Option<Point2> {
    let d1x = a1[0] - a0[0];
    let d1y = a1[1] - a0[1];
    let d2x = b1[0] - b0[0];
    let d2y = b1[1] - b0[1];

    let cross = d1x * d2y - d1y * d2x;
    if cross.abs() < 1e-10 {
        return None;
    }

    let dx = b0[0] - a0[0];
    let dy = b0[1] - a0[1];

    let t = (dx * d2y - dy * d2x) / cross;
    let s = (dx * d1y - dy * d1x) / cross;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&s) {
        Some([a0[0] + t * d1x, a0[1] + t * d1y])
    } else {
        None
    }
}

/// Parameter t such that `point ≈ start + t * (end - start)`.
pub fn project_point_on_segment(start: Point2, end: Point2, point: Point2) -> f64 {
    let dx = end[0] - start[0];
    let dy = end[1] - start[1];
    let len_sq = dx * dx + dy * dy;

    if len_sq < EPSILON * EPSILON {
        return 0.0;
    }

    ((point[0] - start[0]) * dx + (point[1] - start[1]) * dy) / len_sq
}

/// True when `point` lies on the open segment `start..end` (endpoints excluded).
pub fn point_in_segment_interior(start: Point2, end: Point2, point: Point2) -> bool {
    let t = project_point_on_segment(start, end, point);
    if t <= 0.0 || t >= 1.0 {
        return false;
    }
    let foot = [
        start[0] + t * (end[0] - start[0]),
        start[1] + t * (end[1] - start[1]),
    ];
    points_equal(foot, point)
}

// =============================================================================
// Tests
// =============================================================================
