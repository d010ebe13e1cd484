use super::interval::Span;
use crate::math::Point2;

/// Builds the boundary of the uncovered strip `[a, b] x [0, height]` with
/// `notches` (sorted, non-overlapping, already clipped to `[a, b]`) carved
/// from the bottom.
///
/// Walks bottom-left, through each notch, bottom-right, top-right, top-left.
/// The result is counter-clockwise. A notch flush with either end of the
/// strip replaces that bottom corner instead of duplicating it, and
/// adjacent notches step directly from one height to the next.
pub(super) fn stitch_strip(
    a: f64,
    b: f64,
    height: f64,
    notches: &[Span],
    eps: f64,
) -> Vec<Point2> {
    let mut outline = Vec::with_capacity(4 + notches.len() * 4);
    let mut cursor = a;

    if notches.first().is_none_or(|n| n.start > a + eps) {
        outline.push(Point2::new(a, 0.0));
    }
    for (k, notch) in notches.iter().enumerate() {
        if notch.start > cursor + eps {
            outline.push(Point2::new(notch.start, 0.0));
        }
        outline.push(Point2::new(notch.start, notch.height));
        outline.push(Point2::new(notch.end, notch.height));
        let steps_on = notches
            .get(k + 1)
            .is_some_and(|next| next.start <= notch.end + eps);
        if notch.end < b - eps && !steps_on {
            outline.push(Point2::new(notch.end, 0.0));
        }
        cursor = notch.end;
    }
    if cursor < b - eps {
        outline.push(Point2::new(b, 0.0));
    }
    outline.push(Point2::new(b, height));
    outline.push(Point2::new(a, height));
    outline
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::polygon_2d::signed_area;

    const EPS: f64 = 1e-3;

    fn notch(start: f64, end: f64, height: f64) -> Span {
        Span { start, end, height }
    }

    #[test]
    fn no_notches_is_a_rectangle() {
        let outline = stitch_strip(0.0, 4.0, 3.0, &[], EPS);
        assert_eq!(outline.len(), 4);
        assert_abs_diff_eq!(signed_area(&outline), 12.0);
    }

    #[test]
    fn middle_notch_adds_four_corners() {
        let outline = stitch_strip(0.0, 4.0, 3.0, &[notch(1.9, 2.1, 2.0)], EPS);
        assert_eq!(outline.len(), 8);
        assert_abs_diff_eq!(signed_area(&outline), 12.0 - 0.4, epsilon = 1e-9);
    }

    #[test]
    fn flush_notches_do_not_duplicate_corners() {
        let outline = stitch_strip(
            0.0,
            4.0,
            3.0,
            &[notch(0.0, 0.5, 1.0), notch(3.5, 4.0, 2.0)],
            EPS,
        );
        assert_eq!(outline.len(), 8);
        for i in 0..outline.len() {
            let j = (i + 1) % outline.len();
            assert!((outline[i] - outline[j]).norm() > EPS);
        }
        assert_abs_diff_eq!(signed_area(&outline), 12.0 - 0.5 - 1.0, epsilon = 1e-9);
    }

    #[test]
    fn adjacent_notches_form_a_step() {
        let outline = stitch_strip(
            0.0,
            4.0,
            3.0,
            &[notch(1.0, 2.0, 2.0), notch(2.0, 3.0, 1.0)],
            EPS,
        );
        assert_eq!(outline.len(), 10);
        assert!(!outline
            .iter()
            .any(|p| (p.x - 2.0).abs() < 1e-9 && p.y.abs() < 1e-9));
        assert_abs_diff_eq!(signed_area(&outline), 12.0 - 2.0 - 1.0, epsilon = 1e-9);
    }

    #[test]
    fn notch_spanning_the_strip_lifts_the_floor() {
        let outline = stitch_strip(1.0, 2.0, 3.0, &[notch(1.0, 2.0, 1.0)], EPS);
        assert_eq!(outline.len(), 4);
        assert_abs_diff_eq!(signed_area(&outline), 2.0);
    }
}
