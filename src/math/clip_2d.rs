use tracing::trace;

use super::intersect_2d::line_intersection;
use super::polygon_2d::{dedup_closed, signed_area};
use super::{orient_2d, Point2};
use crate::error::{GeometryError, Result};

/// Clips `subject` against the convex polygon `clip` (Sutherland–Hodgman).
///
/// The clip polygon may wind either way. Subject vertices within `eps` of a
/// clip edge count as inside, so clipping a polygon against itself returns
/// it unchanged. The result may have fewer than 3 points when the polygons
/// do not overlap; callers drop such results.
///
/// # Errors
///
/// Returns [`GeometryError::TooFewPoints`] if either polygon has fewer than
/// 3 points.
pub fn clip_polygon(subject: &[Point2], clip: &[Point2], eps: f64) -> Result<Vec<Point2>> {
    if subject.len() < 3 {
        return Err(GeometryError::TooFewPoints(subject.len()).into());
    }
    if clip.len() < 3 {
        return Err(GeometryError::TooFewPoints(clip.len()).into());
    }

    // Inside is left of each edge for CCW clip polygons, right for CW.
    let orientation = if signed_area(clip) < 0.0 { -1.0 } else { 1.0 };
    let inside = |p: &Point2, e0: &Point2, e1: &Point2| {
        let len = (e1 - e0).norm().max(f64::EPSILON);
        orientation * orient_2d(e0, e1, p) / len >= -eps
    };

    let mut output = subject.to_vec();
    let n = clip.len();
    for i in 0..n {
        if output.is_empty() {
            break;
        }
        let e0 = &clip[i];
        let e1 = &clip[(i + 1) % n];
        let input = std::mem::take(&mut output);

        let mut prev = input[input.len() - 1];
        for current in input {
            let cur_in = inside(&current, e0, e1);
            let prev_in = inside(&prev, e0, e1);
            if cur_in {
                if !prev_in {
                    if let Some(x) = line_intersection(&prev, &current, e0, e1, eps) {
                        output.push(x);
                    }
                }
                output.push(current);
            } else if prev_in {
                if let Some(x) = line_intersection(&prev, &current, e0, e1, eps) {
                    output.push(x);
                }
            }
            prev = current;
        }
    }

    let output = dedup_closed(&output, eps);
    trace!(
        subject = subject.len(),
        clip = clip.len(),
        result = output.len(),
        "clip_polygon"
    );
    Ok(output)
}
