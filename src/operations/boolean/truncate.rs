use crate::error::{OperationError, Result};
use crate::geometry::{Footprint, Wall};
use crate::math::polygon_2d::centroid;
use crate::math::{Point2, Vector2};
use crate::operations::intersection::footprint_overlap;
use crate::tessellation::{ExtrudeProfile, TriangleMesh};

/// Share of the wall length removed around each junction when no exact
/// boolean is available.
pub const TRUNCATION_FRACTION: f64 = 0.4;

/// Closed box mesh of a wall: its footprint extruded to its height.
///
/// # Errors
///
/// Returns [`OperationError::InvalidInput`] for a degenerate wall or a
/// non-positive height.
pub fn wall_box(wall: &Wall, eps: f64) -> Result<TriangleMesh> {
    let footprint = Footprint::of(wall, eps)
        .ok_or_else(|| OperationError::InvalidInput("wall has zero length".into()))?;
    ExtrudeProfile::new(footprint.as_slice().to_vec(), wall.height)
        .with_eps(eps)
        .execute()
}

/// A cut range along the wall axis, `0 <= start < end <= length`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct CutRange {
    pub start: f64,
    pub end: f64,
}

/// Computes the merged cut ranges of `wall` against each partner.
///
/// Each range is [`TRUNCATION_FRACTION`] of the wall length, centred on the
/// axis parameter of the footprint overlap's centroid and shifted to stay
/// within the wall.
pub(super) fn cut_ranges(wall: &Wall, partners: &[&Wall], eps: f64) -> Vec<CutRange> {
    let (Some(own), Some(d)) = (Footprint::of(wall, eps), wall.direction(eps)) else {
        return Vec::new();
    };
    let length = wall.length();
    let cut = length * TRUNCATION_FRACTION;

    let mut ranges: Vec<CutRange> = partners
        .iter()
        .filter_map(|other| {
            let fp = Footprint::of(other, eps)?;
            let overlap = footprint_overlap(&own, &fp, eps)?;
            let c = centroid(&overlap)?;
            let s = (c - wall.start).dot(&d).clamp(0.0, length);
            let start = (s - cut * 0.5).clamp(0.0, length - cut);
            Some(CutRange {
                start,
                end: start + cut,
            })
        })
        .collect();

    ranges.sort_by(|a, b| a.start.total_cmp(&b.start));
    let mut merged: Vec<CutRange> = Vec::with_capacity(ranges.len());
    for r in ranges {
        match merged.last_mut() {
            Some(last) if r.start <= last.end + eps => last.end = last.end.max(r.end),
            _ => merged.push(r),
        }
    }
    merged
}

/// Plan profile of `wall` with the front half of the thickness removed over
/// each cut range. Counter-clockwise.
///
/// Walks the back edge start to end, then the front edge back toward the
/// start, stepping down to the centerline across every cut.
pub(super) fn truncated_profile(wall: &Wall, ranges: &[CutRange], eps: f64) -> Vec<Point2> {
    let Some(d) = wall.direction(eps) else {
        return Vec::new();
    };
    let n = Vector2::new(-d.y, d.x);
    let length = wall.length();
    let half = wall.thickness.abs() * 0.5;
    let at = |s: f64, t: f64| wall.start + d * s + n * t;

    let mut profile = vec![at(0.0, -half), at(length, -half)];
    if ranges.last().is_none_or(|r| r.end < length - eps) {
        profile.push(at(length, half));
    }
    let mut cursor = length;
    for r in ranges.iter().rev() {
        if r.end < cursor - eps {
            profile.push(at(r.end, half));
        }
        profile.push(at(r.end, 0.0));
        profile.push(at(r.start, 0.0));
        if r.start > eps {
            profile.push(at(r.start, half));
        }
        cursor = r.start;
    }
    if cursor > eps {
        profile.push(at(0.0, half));
    }
    profile
}

/// Extrudes the truncated profile of `wall` to its height.
///
/// # Errors
///
/// Returns [`OperationError::InvalidInput`] if the wall is degenerate.
pub(super) fn truncated_solid(
    wall: &Wall,
    ranges: &[CutRange],
    eps: f64,
) -> Result<TriangleMesh> {
    ExtrudeProfile::new(truncated_profile(wall, ranges, eps), wall.height)
        .with_eps(eps)
        .execute()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::polygon_2d::signed_area;

    const EPS: f64 = 1e-3;

    fn wall(x0: f64, y0: f64, x1: f64, y1: f64) -> Wall {
        Wall::new(Point2::new(x0, y0), Point2::new(x1, y1), 0.2, 3.0)
    }

    #[test]
    fn box_volume_matches_dimensions() {
        let mesh = wall_box(&wall(0.0, 0.0, 4.0, 0.0), EPS).unwrap();
        assert!(mesh.is_closed_manifold());
        assert_abs_diff_eq!(mesh.signed_volume(), 2.4, epsilon = 1e-9);
        assert!(wall_box(&wall(1.0, 1.0, 1.0, 1.0), EPS).is_err());
    }

    #[test]
    fn middle_crossing_cuts_a_centred_range() {
        let a = wall(0.0, 0.0, 4.0, 0.0);
        let b = wall(2.0, -1.0, 2.0, 1.0);
        let ranges = cut_ranges(&a, &[&b], EPS);
        assert_eq!(ranges.len(), 1);
        assert_abs_diff_eq!(ranges[0].start, 1.2, epsilon = 1e-9);
        assert_abs_diff_eq!(ranges[0].end, 2.8, epsilon = 1e-9);

        let profile = truncated_profile(&a, &ranges, EPS);
        assert_eq!(profile.len(), 8);
        assert_abs_diff_eq!(signed_area(&profile), 0.8 - 1.6 * 0.1, epsilon = 1e-9);
    }

    #[test]
    fn end_junction_range_is_shifted_inside() {
        let a = wall(0.0, 0.0, 4.0, 0.0);
        let b = wall(3.9, -1.0, 3.9, 1.0);
        let ranges = cut_ranges(&a, &[&b], EPS);
        assert_abs_diff_eq!(ranges[0].start, 2.4, epsilon = 1e-9);
        assert_abs_diff_eq!(ranges[0].end, 4.0, epsilon = 1e-9);
        let profile = truncated_profile(&a, &ranges, EPS);
        assert_eq!(profile.len(), 6);
    }

    #[test]
    fn overlapping_ranges_merge() {
        let a = wall(0.0, 0.0, 4.0, 0.0);
        let b = wall(1.8, -1.0, 1.8, 1.0);
        let c = wall(2.2, -1.0, 2.2, 1.0);
        let ranges = cut_ranges(&a, &[&b, &c], EPS);
        assert_eq!(ranges.len(), 1);
        assert_abs_diff_eq!(ranges[0].start, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(ranges[0].end, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn truncated_solid_is_closed() {
        let a = wall(0.0, 0.0, 4.0, 0.0);
        let ranges = [CutRange {
            start: 2.4,
            end: 4.0,
        }];
        let mesh = truncated_solid(&a, &ranges, EPS).unwrap();
        assert!(mesh.is_closed_manifold());
        assert_abs_diff_eq!(mesh.signed_volume(), (0.8 - 0.16) * 3.0, epsilon = 1e-9);
    }
}
