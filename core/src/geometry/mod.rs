//! Planar geometry shared by the line clipper and the arrangement builder.
//!
//! All tolerances used on one arrangement live here so that the clipper, the
//! graph builder and the face tracer agree on when two points are the same.

pub type Point2 = [f64; 2];

/// Determinant magnitude below which two lines are treated as parallel.
pub const PARALLEL_TOLERANCE: f64 = 1e-9;

/// Residual below which a point is considered to satisfy a line equation.
pub const ON_LINE_TOLERANCE: f64 = 1e-9;

/// Number of decimal digits kept when a coordinate becomes a graph key.
pub const ROUND_DIGITS: i32 = 6;

/// Tolerance for floating-point comparisons
pub const EPSILON: f64 = 1e-6;

pub trait ApproxEq {
    fn approx_eq(&self, other: &Self) -> bool;
}

impl ApproxEq for f64 {
    fn approx_eq(&self, other: &Self) -> bool {
        (self - other).abs() < EPSILON
    }
}

impl ApproxEq for Point2 {
    fn approx_eq(&self, other: &Self) -> bool {
        self[0].approx_eq(&other[0]) && self[1].approx_eq(&other[1])
    }
}

pub mod utils_2d;
pub use utils_2d::*;

pub mod intersection;
pub use intersection::*;
