mod horizontal;
mod interval;
mod stitch;

pub use horizontal::PenetrationHoles;
pub use interval::{side_intervals, SideInterval, SideLine};

use tracing::debug;

use self::interval::{merge_spans, notch_envelope, uncovered, Span};
use self::stitch::stitch_strip;
use crate::error::{OperationError, Result};
use crate::geometry::{FaceType, PolygonWithHoles, Wall};
use crate::math::polygon_2d::dedup_closed;
use crate::math::Tolerance;

/// Splits one vertical side of a wall into the regions left visible by the
/// walls crossing it.
///
/// Regions are expressed in the side's [`SideLine::frame`]: `x` along the
/// face line, `y` up from the floor.
///
/// - Other walls at least as tall as this one break the side into
///   independent rectangles.
/// - Shorter walls carve notches from the bottom of the strip they cross.
#[derive(Debug)]
pub struct SegmentSide<'a> {
    walls: &'a [Wall],
    wall_index: usize,
    side: FaceType,
    tolerance: Tolerance,
}

impl<'a> SegmentSide<'a> {
    /// Creates a new `SegmentSide` operation for `walls[wall_index]`.
    #[must_use]
    pub fn new(walls: &'a [Wall], wall_index: usize, side: FaceType) -> Self {
        Self {
            walls,
            wall_index,
            side,
            tolerance: Tolerance::default(),
        }
    }

    /// Overrides the tolerance settings.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the segmentation.
    ///
    /// A degenerate wall yields no regions.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if `wall_index` is out of
    /// range or the side is `Top` or `Bottom`.
    pub fn execute(&self) -> Result<Vec<PolygonWithHoles>> {
        let eps = self.tolerance.length;
        let wall = self.walls.get(self.wall_index).ok_or_else(|| {
            OperationError::InvalidInput(format!(
                "wall index {} out of range for {} walls",
                self.wall_index,
                self.walls.len()
            ))
        })?;
        if self.side.is_horizontal() {
            return Err(OperationError::InvalidInput(format!(
                "{} is not a vertical side",
                self.side
            ))
            .into());
        }
        let Some(line) = SideLine::of(wall, self.side, eps) else {
            return Ok(Vec::new());
        };
        let height = wall.height;
        let width = line.width();
        if height <= eps || width <= eps {
            return Ok(Vec::new());
        }

        let intervals = side_intervals(self.walls, self.wall_index, &line, eps);
        let mut breaks = Vec::new();
        let mut notches = Vec::new();
        for iv in &intervals {
            let span = Span {
                start: iv.start,
                end: iv.end,
                height: iv.other_height,
            };
            if iv.other_height >= height - eps {
                breaks.push(span);
            } else if iv.other_height > eps {
                notches.push(span);
            }
        }
        let breaks = merge_spans(breaks, eps);
        let notches = notch_envelope(&notches, eps);

        let mut regions = Vec::new();
        for (a, b) in uncovered(width, &breaks, eps) {
            let clipped: Vec<Span> = notches
                .iter()
                .filter_map(|n| {
                    let start = n.start.max(a);
                    let end = n.end.min(b);
                    (end - start >= eps).then_some(Span {
                        start,
                        end,
                        height: n.height,
                    })
                })
                .collect();
            let outer = dedup_closed(&stitch_strip(a, b, height, &clipped, eps), eps);
            if outer.len() >= 3 {
                regions.push(PolygonWithHoles::new(outer));
            }
        }

        debug!(
            wall = self.wall_index,
            side = %self.side,
            intervals = intervals.len(),
            breaks = breaks.len(),
            notches = notches.len(),
            regions = regions.len(),
            "segmented side"
        );
        Ok(regions)
    }
}
