pub mod clip_2d;
pub mod convex_hull;
pub mod intersect_2d;
pub mod polygon_2d;
pub mod quantize;
mod tolerance;

pub use tolerance::Tolerance;

/// 2D point type (plan view, or a face's local frame).
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type (world space, Y up).
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Shared length epsilon in meters for every geometric comparison.
pub const TOLERANCE: f64 = 1e-3;

/// Default precision for quantized vertex and edge keys (0.1 mm).
pub const QUANTIZATION: f64 = 1e-4;

/// Default minimum dot product for two unit normals to count as parallel.
pub const NORMAL_SIMILARITY: f64 = 0.99;

/// 2D cross product of `a` and `b`.
#[inline]
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Cross product of `(a - o)` and `(b - o)`; positive for a left turn.
#[inline]
#[must_use]
pub fn orient_2d(o: &Point2, a: &Point2, b: &Point2) -> f64 {
    cross_2d(&(a - o), &(b - o))
}
