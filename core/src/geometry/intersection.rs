//! Intersection of two straight lines given in normal form `a + b*x + c*y = 0`.

use super::{Point2, ON_LINE_TOLERANCE, PARALLEL_TOLERANCE};
use nalgebra as na;
use serde::{Deserialize, Serialize};

/// Normal-form coefficients of a line: `a + b*x + c*y = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineCoeffs {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl LineCoeffs {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Residual of the line equation at `p`.
    #[inline]
    pub fn residual(&self, p: Point2) -> f64 {
        self.a + self.b * p[0] + self.c * p[1]
    }

    /// True when `p` satisfies the line equation within `ON_LINE_TOLERANCE`.
    #[inline]
    pub fn contains(&self, p: Point2) -> bool {
        self.residual(p).abs() < ON_LINE_TOLERANCE
    }
}

/// Solve the 2x2 system formed by two lines.
/// Returns None if the lines are parallel (|det| below `PARALLEL_TOLERANCE`).
pub fn intersect_lines(l1: LineCoeffs, l2: LineCoeffs) -> Option<Point2> {
    let m = na::Matrix2::new(l1.b, l1.c, l2.b, l2.c);
    let det = m.determinant();
    if det.abs() < PARALLEL_TOLERANCE {
        return None;
    }

    // Cramer's rule on [b c; b' c'] [x y]^T = [-a -a']^T
    let x = (l1.c * l2.a - l2.c * l1.a) / det;
    let y = -(l1.b * l2.a - l2.b * l1.a) / det;

    Some([x, y])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ApproxEq;

    #[test]
    fn test_intersect_lines_basic() {
        // y = x and y = 10 - x
        let l1 = LineCoeffs::new(0.0, 1.0, -1.0);
        let l2 = LineCoeffs::new(-10.0, 1.0, 1.0);
        let p = intersect_lines(l1, l2).expect("lines cross");
        assert!(p.approx_eq(&[5.0, 5.0]));
        assert!(l1.contains(p));
        assert!(l2.contains(p));
    }

    #[test]
    fn test_intersect_parallel_lines() {
        let l1 = LineCoeffs::new(0.0, 1.0, -1.0);
        let l2 = LineCoeffs::new(3.0, 2.0, -2.0);
        assert!(intersect_lines(l1, l2).is_none());
    }

    #[test]
    fn test_intersect_near_parallel_below_tolerance() {
        let l1 = LineCoeffs::new(0.0, 1.0, 1.0);
        let l2 = LineCoeffs::new(1.0, 1.0, 1.0 + 1e-10);
        assert!(intersect_lines(l1, l2).is_none());
    }

    #[test]
    fn test_intersect_vertical_and_horizontal() {
        // x = 3 and y = -7
        let vertical = LineCoeffs::new(-3.0, 1.0, 0.0);
        let horizontal = LineCoeffs::new(7.0, 0.0, 1.0);
        let p = intersect_lines(vertical, horizontal).expect("axis lines cross");
        assert_eq!(p, [3.0, -7.0]);
    }

    #[test]
    fn test_intersect_is_symmetric() {
        let l1 = LineCoeffs::new(12.5, -1.5, 0.5);
        let l2 = LineCoeffs::new(-40.0, 3.0, 0.25);
        let p = intersect_lines(l1, l2).expect("lines cross");
        let q = intersect_lines(l2, l1).expect("lines cross");
        assert_eq!(p, q);
    }
}
