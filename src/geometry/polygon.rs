use crate::math::polygon_2d::{area, point_in_polygon};
use crate::math::Point2;

/// A simple outer boundary with zero or more hole loops.
///
/// Holes are kept as independent loops: touching or overlapping holes are
/// never merged, so a consumer that cannot render overlapping holes must
/// union them itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonWithHoles {
    /// Outer boundary, at least 3 points.
    pub outer: Vec<Point2>,
    /// Hole loops.
    pub holes: Vec<Vec<Point2>>,
}

impl PolygonWithHoles {
    /// A polygon without holes.
    #[must_use]
    pub fn new(outer: Vec<Point2>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Axis-aligned rectangle `[x0, x1] × [y0, y1]`, counter-clockwise.
    #[must_use]
    pub fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ])
    }

    /// Outer area minus hole areas. Overlapping holes are subtracted twice.
    #[must_use]
    pub fn net_area(&self) -> f64 {
        area(&self.outer) - self.holes.iter().map(|h| area(h)).sum::<f64>()
    }

    /// Returns `true` if `p` lies in the outer loop and in no hole.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        point_in_polygon(p, &self.outer) && !self.holes.iter().any(|h| point_in_polygon(p, h))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn net_area_subtracts_holes() {
        let mut poly = PolygonWithHoles::rectangle(0.0, 0.0, 4.0, 1.0);
        poly.holes
            .push(PolygonWithHoles::rectangle(1.0, 0.25, 1.5, 0.75).outer);
        assert_abs_diff_eq!(poly.net_area(), 3.75);
        assert!(poly.contains(&Point2::new(0.5, 0.5)));
        assert!(!poly.contains(&Point2::new(1.25, 0.5)));
    }
}
