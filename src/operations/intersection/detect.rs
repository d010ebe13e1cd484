use tracing::debug;

use super::overlap::footprint_overlap;
use crate::geometry::{Footprint, Wall};
use crate::math::intersect_2d::segments_properly_cross;
use crate::math::polygon_2d::point_strictly_inside;
use crate::math::{Point2, Tolerance};

/// Two walls whose footprints overlap. `wall_a < wall_b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WallPair {
    /// Lower wall index.
    pub wall_a: usize,
    /// Higher wall index.
    pub wall_b: usize,
}

impl WallPair {
    /// The partner of `wall` in this pair, if it is a member.
    #[must_use]
    pub fn other(&self, wall: usize) -> Option<usize> {
        if self.wall_a == wall {
            Some(self.wall_b)
        } else if self.wall_b == wall {
            Some(self.wall_a)
        } else {
            None
        }
    }
}

/// Finds every pair of walls with overlapping footprints.
///
/// O(n²) over all walls. Degenerate walls never participate.
#[derive(Debug)]
pub struct DetectIntersections<'a> {
    walls: &'a [Wall],
    tolerance: Tolerance,
}

impl<'a> DetectIntersections<'a> {
    /// Creates a new `DetectIntersections` query.
    #[must_use]
    pub fn new(walls: &'a [Wall]) -> Self {
        Self {
            walls,
            tolerance: Tolerance::default(),
        }
    }

    /// Overrides the tolerance settings.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the query.
    #[must_use]
    pub fn execute(&self) -> Vec<WallPair> {
        let eps = self.tolerance.length;
        let footprints: Vec<Option<Footprint>> =
            self.walls.iter().map(|w| Footprint::of(w, eps)).collect();

        let mut pairs = Vec::new();
        for (i, fa) in footprints.iter().enumerate() {
            let Some(fa) = fa else { continue };
            for (j, fb) in footprints.iter().enumerate().skip(i + 1) {
                let Some(fb) = fb else { continue };
                if footprints_overlap(fa, fb, eps) {
                    pairs.push(WallPair {
                        wall_a: i,
                        wall_b: j,
                    });
                }
            }
        }
        debug!(
            walls = self.walls.len(),
            pairs = pairs.len(),
            "detected wall intersections"
        );
        pairs
    }
}

/// Overlap test between two footprints.
///
/// Broad phase: the bounding boxes must overlap. Narrow phase: a vertex of
/// either footprint lies strictly inside the other, or an edge of one
/// properly crosses an edge of the other. The crossing test catches the
/// "+" configuration where no corner is contained.
///
/// Collinear walls sharing a stretch have every corner on the other's
/// boundary and no proper crossing; those fall through to the clipped
/// overlap area.
#[must_use]
pub fn footprints_overlap(a: &Footprint, b: &Footprint, eps: f64) -> bool {
    if !a.aabb().overlaps(&b.aabb(), eps) {
        return false;
    }
    let (pa, pb) = (a.as_slice(), b.as_slice());
    if pa.iter().any(|p| point_strictly_inside(p, pb, eps))
        || pb.iter().any(|p| point_strictly_inside(p, pa, eps))
        || edges_cross(pa, pb, eps)
    {
        return true;
    }
    footprint_overlap(a, b, eps).is_some()
}

fn edges_cross(pa: &[Point2], pb: &[Point2], eps: f64) -> bool {
    let (na, nb) = (pa.len(), pb.len());
    (0..na).any(|i| {
        (0..nb).any(|j| {
            segments_properly_cross(&pa[i], &pa[(i + 1) % na], &pb[j], &pb[(j + 1) % nb], eps)
        })
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn wall(x0: f64, y0: f64, x1: f64, y1: f64) -> Wall {
        Wall::new(Point2::new(x0, y0), Point2::new(x1, y1), 0.2, 3.0)
    }

    #[test]
    fn plus_crossing_is_detected() {
        let walls = vec![wall(0.0, 0.0, 4.0, 0.0), wall(2.0, -1.0, 2.0, 1.0)];
        let pairs = DetectIntersections::new(&walls).execute();
        assert_eq!(pairs, vec![WallPair { wall_a: 0, wall_b: 1 }]);
    }

    #[test]
    fn contained_corner_is_detected() {
        // L-corner: B's start corners sit inside A's end.
        let walls = vec![wall(0.0, 0.0, 4.0, 0.0), wall(3.95, 0.0, 3.95, 3.0)];
        assert_eq!(DetectIntersections::new(&walls).execute().len(), 1);
    }

    #[test]
    fn disjoint_bounding_boxes_never_intersect() {
        let walls = vec![
            wall(0.0, 0.0, 4.0, 0.0),
            wall(0.0, 2.0, 4.0, 2.0),
            wall(6.0, -1.0, 6.0, 1.0),
        ];
        assert!(DetectIntersections::new(&walls).execute().is_empty());
    }

    #[test]
    fn boxes_overlap_but_footprints_do_not() {
        // Diagonal wall passing just beyond the horizontal wall's end.
        let walls = vec![wall(0.0, 0.0, 4.0, 0.0), wall(3.0, 1.5, 4.6, -0.2)];
        assert!(DetectIntersections::new(&walls).execute().is_empty());
    }

    #[test]
    fn collinear_overlap_is_detected() {
        let walls = vec![wall(0.0, 0.0, 4.0, 0.0), wall(1.0, 0.0, 3.0, 0.0)];
        let pairs = DetectIntersections::new(&walls).execute();
        assert_eq!(pairs, vec![WallPair { wall_a: 0, wall_b: 1 }]);
    }

    #[test]
    fn parallel_walls_sharing_an_edge_do_not_intersect() {
        let walls = vec![wall(0.0, 0.0, 4.0, 0.0), wall(0.0, 0.2, 4.0, 0.2)];
        assert!(DetectIntersections::new(&walls).execute().is_empty());
    }

    #[test]
    fn degenerate_walls_are_skipped() {
        let walls = vec![wall(0.0, 0.0, 4.0, 0.0), wall(2.0, 0.0, 2.0, 0.0)];
        assert!(DetectIntersections::new(&walls).execute().is_empty());
    }

    #[test]
    fn pair_partner_lookup() {
        let pair = WallPair { wall_a: 1, wall_b: 3 };
        assert_eq!(pair.other(1), Some(3));
        assert_eq!(pair.other(2), None);
    }
}
