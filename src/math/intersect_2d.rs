use super::{cross_2d, orient_2d, polygon_2d::point_in_polygon, Point2};

/// Intersection of the infinite lines through `p1`-`p2` and `p3`-`p4`.
///
/// Solved with the 2x2 determinant. The denominator is normalized by both
/// segment lengths, and `|denominator| < eps` means parallel or coincident
/// lines: `None`.
#[must_use]
pub fn line_intersection(
    p1: &Point2,
    p2: &Point2,
    p3: &Point2,
    p4: &Point2,
    eps: f64,
) -> Option<Point2> {
    let denom = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    let scale = (p2 - p1).norm() * (p4 - p3).norm();
    if scale < f64::EPSILON || denom.abs() < eps * scale {
        return None;
    }
    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / denom;
    Some(Point2::new(p1.x + t * (p2.x - p1.x), p1.y + t * (p2.y - p1.y)))
}

/// Bounded segment-segment intersection.
///
/// Returns `(point, t, u)` with `t` and `u` the clamped parameters on each
/// segment, or `None` for parallel or disjoint segments.
#[must_use]
pub fn segment_intersection(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    eps: f64,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let cross = cross_2d(&da, &db);
    // Sine of the angle between the segments.
    if cross.abs() < eps * da.norm() * db.norm() {
        return None;
    }
    let d = b0 - a0;
    let t = cross_2d(&d, &db) / cross;
    let u = cross_2d(&d, &da) / cross;

    // Parametric slack scaled to the segment lengths.
    let ta = eps / da.norm().max(eps);
    let tb = eps / db.norm().max(eps);
    if t >= -ta && t <= 1.0 + ta && u >= -tb && u <= 1.0 + tb {
        let t = t.clamp(0.0, 1.0);
        Some((a0 + da * t, t, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Returns `true` if the segments cross at a single point interior to both,
/// with each segment's endpoints more than `eps` off the other's line.
#[must_use]
pub fn segments_properly_cross(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    eps: f64,
) -> bool {
    let side = |o: &Point2, e: &Point2, p: &Point2| {
        let len = (e - o).norm();
        if len < eps {
            return 0.0;
        }
        orient_2d(o, e, p) / len
    };
    let d1 = side(b0, b1, a0);
    let d2 = side(b0, b1, a1);
    let d3 = side(a0, a1, b0);
    let d4 = side(a0, a1, b1);
    ((d1 > eps && d2 < -eps) || (d1 < -eps && d2 > eps))
        && ((d3 > eps && d4 < -eps) || (d3 < -eps && d4 > eps))
}

/// Clips the segment `start`-`end` against a polygon.
///
/// Returns the inside sub-segments as `(t_start, t_end)` parameter pairs on
/// `[0, 1]`, merged where contiguous. For a convex polygon there is at most
/// one pair.
#[must_use]
pub fn clip_segment_to_polygon(
    start: &Point2,
    end: &Point2,
    polygon: &[Point2],
    eps: f64,
) -> Vec<(f64, f64)> {
    if polygon.len() < 3 {
        return Vec::new();
    }
    let seg_len = (end - start).norm();
    if seg_len < eps {
        return Vec::new();
    }
    let t_eps = eps / seg_len;

    let n = polygon.len();
    let mut sample_ts = vec![0.0, 1.0];
    for i in 0..n {
        let e0 = &polygon[i];
        let e1 = &polygon[(i + 1) % n];
        if let Some((_, t, _)) = segment_intersection(start, end, e0, e1, eps) {
            sample_ts.push(t);
        }
        // Polygon vertices lying on the segment bound collinear overlaps.
        let along = (e0 - start).dot(&(end - start)) / (seg_len * seg_len);
        let foot = start + (end - start) * along;
        if (e0 - foot).norm() < eps && (-t_eps..=1.0 + t_eps).contains(&along) {
            sample_ts.push(along.clamp(0.0, 1.0));
        }
    }
    sample_ts.sort_by(f64::total_cmp);
    sample_ts.dedup_by(|a, b| (*a - *b).abs() < t_eps);

    let mut result: Vec<(f64, f64)> = Vec::new();
    for win in sample_ts.windows(2) {
        let (t0, t1) = (win[0], win[1]);
        if t1 - t0 < t_eps {
            continue;
        }
        let mid = start + (end - start) * ((t0 + t1) * 0.5);
        if !point_in_polygon(&mid, polygon) {
            continue;
        }
        if let Some(last) = result.last_mut() {
            if (t0 - last.1).abs() < t_eps {
                last.1 = t1;
                continue;
            }
        }
        result.push((t0, t1));
    }
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    const EPS: f64 = 1e-3;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn line_intersection_of_axes() {
        let x = line_intersection(&p(-1.0, 0.0), &p(1.0, 0.0), &p(0.0, -1.0), &p(0.0, 1.0), EPS)
            .unwrap();
        assert_abs_diff_eq!(x.x, 0.0);
        assert_abs_diff_eq!(x.y, 0.0);
    }

    #[test]
    fn parallel_lines_do_not_intersect() {
        let x = line_intersection(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0), &p(1.0, 1.0), EPS);
        assert!(x.is_none());
    }

    #[test]
    fn segment_intersection_bounded() {
        let hit = segment_intersection(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0), EPS);
        let (pt, t, u) = hit.unwrap();
        assert_abs_diff_eq!(pt.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(u, 0.5, epsilon = 1e-12);

        let miss = segment_intersection(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, -1.0), &p(2.0, 1.0), EPS);
        assert!(miss.is_none());
    }

    #[test]
    fn proper_crossing_excludes_touching() {
        assert!(segments_properly_cross(
            &p(0.0, 0.0),
            &p(2.0, 0.0),
            &p(1.0, -1.0),
            &p(1.0, 1.0),
            EPS
        ));
        // T-junction: endpoint on the other segment.
        assert!(!segments_properly_cross(
            &p(0.0, 0.0),
            &p(2.0, 0.0),
            &p(1.0, 0.0),
            &p(1.0, 1.0),
            EPS
        ));
    }

    #[test]
    fn clip_segment_through_square() {
        let sq = vec![p(1.0, -1.0), p(2.0, -1.0), p(2.0, 1.0), p(1.0, 1.0)];
        let parts = clip_segment_to_polygon(&p(0.0, 0.0), &p(4.0, 0.0), &sq, EPS);
        assert_eq!(parts.len(), 1);
        assert_abs_diff_eq!(parts[0].0, 0.25, epsilon = 1e-9);
        assert_abs_diff_eq!(parts[0].1, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn clip_segment_missing_polygon() {
        let sq = vec![p(1.0, 1.0), p(2.0, 1.0), p(2.0, 2.0), p(1.0, 2.0)];
        assert!(clip_segment_to_polygon(&p(0.0, 0.0), &p(4.0, 0.0), &sq, EPS).is_empty());
    }

    #[test]
    fn clip_segment_starting_inside() {
        let sq = vec![p(-1.0, -1.0), p(1.0, -1.0), p(1.0, 1.0), p(-1.0, 1.0)];
        let parts = clip_segment_to_polygon(&p(0.0, 0.0), &p(4.0, 0.0), &sq, EPS);
        assert_eq!(parts.len(), 1);
        assert_abs_diff_eq!(parts[0].0, 0.0);
        assert_abs_diff_eq!(parts[0].1, 0.25, epsilon = 1e-9);
    }
}
