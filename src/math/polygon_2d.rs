use super::{orient_2d, Point2};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Absolute polygon area.
#[must_use]
pub fn area(points: &[Point2]) -> f64 {
    signed_area(points).abs()
}

/// Returns the polygon in counter-clockwise order.
#[must_use]
pub fn to_ccw(points: &[Point2]) -> Vec<Point2> {
    if signed_area(points) < 0.0 {
        points.iter().rev().copied().collect()
    } else {
        points.to_vec()
    }
}

/// Area centroid of a simple polygon. Falls back to the vertex average for
/// zero-area input.
#[must_use]
pub fn centroid(points: &[Point2]) -> Option<Point2> {
    if points.is_empty() {
        return None;
    }
    let a = signed_area(points);
    if a.abs() < f64::EPSILON {
        #[allow(clippy::cast_precision_loss)]
        let inv = 1.0 / points.len() as f64;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        return Some(Point2::new(sx * inv, sy * inv));
    }
    let n = points.len();
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let p = &points[i];
        let q = &points[(i + 1) % n];
        let f = p.x * q.y - q.x * p.y;
        cx += (p.x + q.x) * f;
        cy += (p.y + q.y) * f;
    }
    let k = 1.0 / (6.0 * a);
    Some(Point2::new(cx * k, cy * k))
}

/// Ray-casting parity test. Points exactly on the boundary may land on
/// either side; callers needing strictness check the boundary separately.
#[must_use]
pub fn point_in_polygon(point: &Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = &polygon[i];
        let pj = &polygon[j];
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Distance from `p` to the segment `a`-`b`.
#[must_use]
pub fn point_segment_distance(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq < f64::EPSILON {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Returns `true` if `point` is inside `polygon` and farther than `eps` from
/// every edge.
#[must_use]
pub fn point_strictly_inside(point: &Point2, polygon: &[Point2], eps: f64) -> bool {
    if !point_in_polygon(point, polygon) {
        return false;
    }
    let n = polygon.len();
    (0..n).all(|i| point_segment_distance(point, &polygon[i], &polygon[(i + 1) % n]) > eps)
}

/// Collapses consecutive vertices closer than `eps`, including the wrap from
/// last to first.
#[must_use]
pub fn dedup_closed(points: &[Point2], eps: f64) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().is_none_or(|last| (p - last).norm() >= eps) {
            out.push(*p);
        }
    }
    while out.len() > 1 {
        let (first, last) = (out[0], out[out.len() - 1]);
        if (first - last).norm() < eps {
            out.pop();
        } else {
            break;
        }
    }
    out
}

/// Drops vertices whose neighbours are collinear with them.
#[must_use]
pub fn remove_collinear(points: &[Point2], eps: f64) -> Vec<Point2> {
    let mut pts = points.to_vec();
    let mut changed = true;
    while changed && pts.len() > 3 {
        changed = false;
        let n = pts.len();
        for i in 0..n {
            let prev = pts[(i + n - 1) % n];
            let next = pts[(i + 1) % n];
            let base = (next - prev).norm();
            if base < eps {
                continue;
            }
            // Height of pts[i] above the prev-next chord.
            let h = orient_2d(&prev, &next, &pts[i]).abs() / base;
            let along = (pts[i] - prev).dot(&(next - prev));
            if h < eps && along > 0.0 && along < base * base {
                pts.remove(i);
                changed = true;
                break;
            }
        }
    }
    pts
}

/// Axis-aligned bounding box in 2D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2 {
    /// Minimum corner.
    pub min: Point2,
    /// Maximum corner.
    pub max: Point2,
}

impl Aabb2 {
    /// Bounding box of a point set, or `None` when empty.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self { min, max })
    }

    /// Returns `true` if the boxes share an area wider than `eps` on both
    /// axes. Boxes that merely touch do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self, eps: f64) -> bool {
        self.min.x < other.max.x - eps
            && other.min.x < self.max.x - eps
            && self.min.y < other.max.y - eps
            && other.min.y < self.max.y - eps
    }
}
