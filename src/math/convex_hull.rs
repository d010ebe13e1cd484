use std::cmp::Ordering;

use super::{orient_2d, Point2};

/// Convex hull of a 2D point set (Graham scan).
///
/// The pivot is the lowest point, ties broken by smallest x. The remaining
/// points are sorted by polar angle around it, nearer first on ties, and the
/// sweep pops while the last three points fail a strict left turn. The
/// result is counter-clockwise and contains only extreme points. Inputs with
/// fewer than 3 points are returned as-is.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn convex_hull(points: &[Point2]) -> Vec<Point2> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut pivot_idx = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        let best = &points[pivot_idx];
        if p.y < best.y || (p.y == best.y && p.x < best.x) {
            pivot_idx = i;
        }
    }
    let pivot = points[pivot_idx];

    let mut rest: Vec<Point2> = points
        .iter()
        .enumerate()
        .filter(|&(i, p)| i != pivot_idx && *p != pivot)
        .map(|(_, p)| *p)
        .collect();
    rest.sort_by(|a, b| polar_order(&pivot, a, b));

    let mut hull: Vec<Point2> = Vec::with_capacity(rest.len() + 1);
    hull.push(pivot);
    for p in rest {
        while hull.len() >= 2 && orient_2d(&hull[hull.len() - 2], &hull[hull.len() - 1], &p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    hull
}

/// Orders `a` and `b` by polar angle around `pivot`, nearer first on ties.
fn polar_order(pivot: &Point2, a: &Point2, b: &Point2) -> Ordering {
    let angle_a = (a.y - pivot.y).atan2(a.x - pivot.x);
    let angle_b = (b.y - pivot.y).atan2(b.x - pivot.x);
    angle_a.total_cmp(&angle_b).then_with(|| {
        let da = (a - pivot).norm_squared();
        let db = (b - pivot).norm_squared();
        da.total_cmp(&db)
    })
}
