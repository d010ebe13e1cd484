use tracing::trace;

use crate::geometry::{FaceFrame, FaceType, Footprint, Wall};
use crate::math::intersect_2d::clip_segment_to_polygon;
use crate::math::{Point2, Vector2};

/// The stretch of a vertical face covered by another wall's footprint,
/// measured along the face's width axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideInterval {
    /// Index of the occluding wall.
    pub other: usize,
    /// Start along the width axis, in `[0, width]`.
    pub start: f64,
    /// End along the width axis, in `[start, width]`.
    pub end: f64,
    /// Height of the occluding wall.
    pub other_height: f64,
}

/// Plan-view line of a vertical face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideLine {
    /// Local origin; `x = 0` of the face frame.
    pub start: Point2,
    /// `x = width` of the face frame.
    pub end: Point2,
    /// Unit direction the face looks toward.
    pub outward: Vector2,
}

impl SideLine {
    /// Computes the face line of `side` on `wall`.
    ///
    /// `None` for a degenerate wall or a horizontal side.
    #[must_use]
    pub fn of(wall: &Wall, side: FaceType, eps: f64) -> Option<Self> {
        let d = wall.direction(eps)?;
        let n = Vector2::new(-d.y, d.x);
        let off = n * (wall.thickness.abs() * 0.5);
        let (start, end, outward) = match side {
            FaceType::Front => (wall.start + off, wall.end + off, n),
            FaceType::Back => (wall.start - off, wall.end - off, -n),
            FaceType::Left => (wall.start - off, wall.start + off, -d),
            FaceType::Right => (wall.end - off, wall.end + off, d),
            FaceType::Top | FaceType::Bottom => return None,
        };
        Some(Self {
            start,
            end,
            outward,
        })
    }

    /// Length of the face line.
    #[must_use]
    pub fn width(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Local frame whose `x` axis runs along this line.
    #[must_use]
    pub fn frame(&self) -> FaceFrame {
        let width = self.width();
        let axis = if width > 0.0 {
            (self.end - self.start) / width
        } else {
            Vector2::zeros()
        };
        FaceFrame::Vertical {
            origin: self.start,
            axis,
            outward: self.outward,
        }
    }
}

/// Collects every interval of `line` covered by another non-degenerate wall.
///
/// The line is pushed `eps` outward before clipping: a wall butting against
/// the face covers it, while a wall ending flush from the inside does not.
#[must_use]
pub fn side_intervals(
    walls: &[Wall],
    wall_index: usize,
    line: &SideLine,
    eps: f64,
) -> Vec<SideInterval> {
    let width = line.width();
    if width < eps {
        return Vec::new();
    }
    let shift = line.outward * eps;
    let (p0, p1) = (line.start + shift, line.end + shift);

    let mut intervals = Vec::new();
    for (other, wall) in walls.iter().enumerate() {
        if other == wall_index {
            continue;
        }
        let Some(footprint) = Footprint::of(wall, eps) else {
            continue;
        };
        for (t0, t1) in clip_segment_to_polygon(&p0, &p1, footprint.as_slice(), eps) {
            let start = (t0 * width).clamp(0.0, width);
            let end = (t1 * width).clamp(0.0, width);
            if end - start >= eps {
                intervals.push(SideInterval {
                    other,
                    start,
                    end,
                    other_height: wall.height,
                });
            }
        }
    }
    trace!(wall = wall_index, intervals = intervals.len(), "side intervals");
    intervals
}

/// A run along the width axis, used for both breaks and notches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Span {
    pub start: f64,
    pub end: f64,
    pub height: f64,
}

/// Sorts and merges spans that overlap or touch within `eps`. Heights are
/// ignored; use [`notch_envelope`] where they matter.
pub(super) fn merge_spans(mut spans: Vec<Span>, eps: f64) -> Vec<Span> {
    spans.sort_by(|a, b| a.start.total_cmp(&b.start));
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end + eps => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

/// Upper envelope of overlapping notches: sorted, non-overlapping steps,
/// each at the tallest notch covering it.
///
/// Neighbouring steps of equal height are joined. Steps that share an end
/// are left adjacent so the strip boundary can climb between them.
pub(super) fn notch_envelope(spans: &[Span], eps: f64) -> Vec<Span> {
    let mut cuts: Vec<f64> = spans.iter().flat_map(|s| [s.start, s.end]).collect();
    cuts.sort_by(f64::total_cmp);
    cuts.dedup_by(|next, kept| *next - *kept <= eps);

    let mut steps: Vec<Span> = Vec::new();
    for pair in cuts.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let mid = 0.5 * (start + end);
        let Some(height) = spans
            .iter()
            .filter(|s| s.start - eps <= mid && mid <= s.end + eps)
            .map(|s| s.height)
            .max_by(f64::total_cmp)
        else {
            continue;
        };
        match steps.last_mut() {
            Some(last)
                if (last.end - start).abs() <= eps && (last.height - height).abs() <= eps =>
            {
                last.end = end;
            }
            _ => steps.push(Span { start, end, height }),
        }
    }
    steps
}

/// The parts of `[0, width]` not covered by `breaks` (already merged).
pub(super) fn uncovered(width: f64, breaks: &[Span], eps: f64) -> Vec<(f64, f64)> {
    let mut segments = Vec::new();
    let mut cursor = 0.0;
    for b in breaks {
        if b.start - cursor > eps {
            segments.push((cursor, b.start));
        }
        cursor = f64::max(cursor, b.end);
    }
    if width - cursor > eps {
        segments.push((cursor, width));
    }
    segments
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    const EPS: f64 = 1e-3;

    fn wall(x0: f64, y0: f64, x1: f64, y1: f64, h: f64) -> Wall {
        Wall::new(Point2::new(x0, y0), Point2::new(x1, y1), 0.2, h)
    }

    fn span(start: f64, end: f64, height: f64) -> Span {
        Span { start, end, height }
    }

    #[test]
    fn side_lines_follow_the_footprint() {
        let w = wall(0.0, 0.0, 4.0, 0.0, 3.0);
        let front = SideLine::of(&w, FaceType::Front, EPS).unwrap();
        assert_abs_diff_eq!(front.start.y, 0.1);
        assert_abs_diff_eq!(front.width(), 4.0);
        let left = SideLine::of(&w, FaceType::Left, EPS).unwrap();
        assert_abs_diff_eq!(left.width(), 0.2);
        assert_abs_diff_eq!(left.outward.x, -1.0);
        assert!(SideLine::of(&w, FaceType::Top, EPS).is_none());
    }

    #[test]
    fn crossing_wall_covers_its_thickness() {
        let walls = vec![wall(0.0, 0.0, 4.0, 0.0, 3.0), wall(2.0, -1.0, 2.0, 1.0, 2.0)];
        let line = SideLine::of(&walls[0], FaceType::Front, EPS).unwrap();
        let intervals = side_intervals(&walls, 0, &line, EPS);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].other, 1);
        assert_abs_diff_eq!(intervals[0].start, 1.9, epsilon = 1e-9);
        assert_abs_diff_eq!(intervals[0].end, 2.1, epsilon = 1e-9);
        assert_abs_diff_eq!(intervals[0].other_height, 2.0);
    }

    #[test]
    fn wall_ending_flush_from_inside_does_not_cover() {
        // B stops exactly on A's front face.
        let walls = vec![wall(0.0, 0.0, 4.0, 0.0, 3.0), wall(2.0, -1.0, 2.0, 0.1, 3.0)];
        let line = SideLine::of(&walls[0], FaceType::Front, EPS).unwrap();
        assert!(side_intervals(&walls, 0, &line, EPS).is_empty());
    }

    #[test]
    fn wall_butting_from_outside_covers() {
        let walls = vec![wall(0.0, 0.0, 4.0, 0.0, 3.0), wall(2.0, 1.0, 2.0, 0.1, 3.0)];
        let line = SideLine::of(&walls[0], FaceType::Front, EPS).unwrap();
        assert_eq!(side_intervals(&walls, 0, &line, EPS).len(), 1);
    }

    #[test]
    fn merge_joins_touching_spans() {
        let merged = merge_spans(
            vec![span(2.0, 3.0, 1.0), span(0.5, 1.0, 1.0), span(1.0005, 2.0, 2.0)],
            EPS,
        );
        assert_eq!(merged.len(), 1);
        assert_abs_diff_eq!(merged[0].start, 0.5);
        assert_abs_diff_eq!(merged[0].end, 3.0);
    }

    #[test]
    fn envelope_steps_down_past_a_taller_notch() {
        let steps = notch_envelope(&[span(1.5, 3.0, 1.0), span(1.0, 2.0, 2.0)], EPS);
        assert_eq!(steps, vec![span(1.0, 2.0, 2.0), span(2.0, 3.0, 1.0)]);
    }

    #[test]
    fn envelope_joins_equal_heights_and_keeps_gaps() {
        let steps = notch_envelope(
            &[span(0.0, 1.0, 1.0), span(0.5, 1.5, 1.0), span(2.0, 2.5, 0.5)],
            EPS,
        );
        assert_eq!(steps, vec![span(0.0, 1.5, 1.0), span(2.0, 2.5, 0.5)]);
    }

    #[test]
    fn uncovered_segments_between_breaks() {
        let breaks = [span(0.0, 0.5, 3.0), span(1.9, 2.1, 3.0)];
        let segs = uncovered(4.0, &breaks, EPS);
        assert_eq!(segs, vec![(0.5, 1.9), (2.1, 4.0)]);
    }
}
