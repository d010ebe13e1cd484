use crate::geometry::Footprint;
use crate::math::clip_2d::clip_polygon;
use crate::math::polygon_2d::area;
use crate::math::Point2;

/// Clips `other` against `current` and returns the overlap region in plan
/// coordinates.
///
/// `None` when the clip collapses below 3 points or encloses no area.
#[must_use]
pub fn footprint_overlap(current: &Footprint, other: &Footprint, eps: f64) -> Option<Vec<Point2>> {
    // Footprints always have four corners, so the clipper cannot reject them.
    let clipped = clip_polygon(other.as_slice(), current.as_slice(), eps).ok()?;
    if clipped.len() < 3 || area(&clipped) < eps * eps {
        return None;
    }
    Some(clipped)
}
