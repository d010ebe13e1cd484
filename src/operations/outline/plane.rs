use crate::math::{Point2, Point3, Vector3};

/// Orthonormal 2D frame on a plane in world space.
///
/// `u × v = normal`, so loops that wind counter-clockwise seen from the
/// normal side project counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneBasis {
    /// Point of the plane closest to the world origin.
    pub origin: Point3,
    /// First in-plane axis.
    pub u: Vector3,
    /// Second in-plane axis.
    pub v: Vector3,
    /// Unit plane normal.
    pub normal: Vector3,
}

impl PlaneBasis {
    /// Builds a basis for the plane `normal · p = offset`.
    ///
    /// The `u` axis is `up × normal` with `up` the world Y axis, or the
    /// world X axis when the normal is nearly vertical.
    #[must_use]
    pub fn new(normal: &Vector3, offset: f64) -> Self {
        let normal = normal.normalize();
        let up = if normal.y.abs() > 0.9 {
            Vector3::x()
        } else {
            Vector3::y()
        };
        let u = up.cross(&normal).normalize();
        let v = normal.cross(&u);
        Self {
            origin: Point3::from(normal * offset),
            u,
            v,
            normal,
        }
    }

    /// Projects a world point into plane coordinates.
    #[must_use]
    pub fn project(&self, p: &Point3) -> Point2 {
        let d = p - self.origin;
        Point2::new(d.dot(&self.u), d.dot(&self.v))
    }

    /// Lifts plane coordinates back into world space.
    #[must_use]
    pub fn lift(&self, p: &Point2) -> Point3 {
        self.origin + self.u * p.x + self.v * p.y
    }
}
