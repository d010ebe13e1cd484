use crate::geometry::{Footprint, Wall};
use crate::math::convex_hull::convex_hull;
use crate::math::Point2;

/// Merges several wall footprints into one convex outline.
///
/// Used when boolean subtraction is skipped. Degenerate walls contribute
/// nothing; the result is counter-clockwise and empty for no input.
#[must_use]
pub fn merge_footprints(walls: &[Wall], eps: f64) -> Vec<Point2> {
    let corners: Vec<Point2> = walls
        .iter()
        .filter_map(|w| Footprint::of(w, eps))
        .flat_map(|fp| *fp.corners())
        .collect();
    convex_hull(&corners)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::polygon_2d::signed_area;

    #[test]
    fn crossing_walls_merge_into_their_hull() {
        let walls = [
            Wall::new(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), 0.2, 3.0),
            Wall::new(Point2::new(2.0, -1.0), Point2::new(2.0, 1.0), 0.2, 3.0),
        ];
        let hull = merge_footprints(&walls, 1e-3);
        assert_eq!(hull.len(), 8);
        assert!(signed_area(&hull) > 0.0);
        // Octagon: the bounding box minus four corner triangles.
        let corner = 0.5 * 1.9 * 0.9;
        assert_abs_diff_eq!(signed_area(&hull), 8.0 - 4.0 * corner, epsilon = 1e-9);
    }

    #[test]
    fn no_walls_no_outline() {
        assert!(merge_footprints(&[], 1e-3).is_empty());
    }
}
