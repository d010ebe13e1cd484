use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::{Footprint, PolygonWithHoles, Wall};
use crate::math::Tolerance;
use crate::operations::intersection::{footprint_overlap, footprints_overlap};

/// Builds the Top/Bottom region of a wall: its footprint, punched by one
/// hole per overlapping wall.
///
/// Each hole is the other footprint clipped to this one, in plan
/// coordinates. Holes are never unioned.
#[derive(Debug)]
pub struct PenetrationHoles<'a> {
    walls: &'a [Wall],
    wall_index: usize,
    tolerance: Tolerance,
}

impl<'a> PenetrationHoles<'a> {
    /// Creates a new `PenetrationHoles` operation for `walls[wall_index]`.
    #[must_use]
    pub fn new(walls: &'a [Wall], wall_index: usize) -> Self {
        Self {
            walls,
            wall_index,
            tolerance: Tolerance::default(),
        }
    }

    /// Overrides the tolerance settings.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the operation. A degenerate wall yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if `wall_index` is out of
    /// range.
    pub fn execute(&self) -> Result<Option<PolygonWithHoles>> {
        let eps = self.tolerance.length;
        let wall = self.walls.get(self.wall_index).ok_or_else(|| {
            OperationError::InvalidInput(format!(
                "wall index {} out of range for {} walls",
                self.wall_index,
                self.walls.len()
            ))
        })?;
        let Some(current) = Footprint::of(wall, eps) else {
            return Ok(None);
        };

        let mut region = PolygonWithHoles::new(current.as_slice().to_vec());
        for (other, wall) in self.walls.iter().enumerate() {
            if other == self.wall_index {
                continue;
            }
            let Some(fp) = Footprint::of(wall, eps) else {
                continue;
            };
            if !footprints_overlap(&current, &fp, eps) {
                continue;
            }
            if let Some(hole) = footprint_overlap(&current, &fp, eps) {
                region.holes.push(hole);
            }
        }
        debug!(
            wall = self.wall_index,
            holes = region.holes.len(),
            "penetration holes"
        );
        Ok(Some(region))
    }
}
