use super::Wall;
use crate::math::polygon_2d::{signed_area, Aabb2};
use crate::math::Point2;

/// Plan-view rectangle of a wall, counter-clockwise.
///
/// Corner order: `start - n*half`, `end - n*half`, `end + n*half`,
/// `start + n*half`, where `n` is the wall's left normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    corners: [Point2; 4],
}

impl Footprint {
    /// Builds the footprint of `wall`, or `None` if the wall is shorter than
    /// `eps`. Derived on demand; never cached across edits.
    ///
    /// The sign of the thickness is ignored.
    #[must_use]
    pub fn of(wall: &Wall, eps: f64) -> Option<Self> {
        let n = wall.normal(eps)?;
        let offset = n * (wall.thickness.abs() * 0.5);
        Some(Self {
            corners: [
                wall.start - offset,
                wall.end - offset,
                wall.end + offset,
                wall.start + offset,
            ],
        })
    }

    /// The four corners.
    #[must_use]
    pub fn corners(&self) -> &[Point2; 4] {
        &self.corners
    }

    /// Corners as a polygon slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Point2] {
        &self.corners
    }

    /// Plan-view area.
    #[must_use]
    pub fn area(&self) -> f64 {
        signed_area(&self.corners).abs()
    }

    /// Axis-aligned bounding box.
    #[must_use]
    pub fn aabb(&self) -> Aabb2 {
        let mut min = self.corners[0];
        let mut max = self.corners[0];
        for p in &self.corners[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Aabb2 { min, max }
    }
}
