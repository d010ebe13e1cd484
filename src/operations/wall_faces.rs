use tracing::debug;

use super::face_segment::{PenetrationHoles, SegmentSide, SideLine};
use crate::error::Result;
use crate::geometry::{Face, FaceFrame, FaceType, Wall};
use crate::math::Tolerance;

/// Generates the occlusion-aware faces of every wall in a plan.
///
/// Each non-degenerate wall yields six [`Face`] records in
/// [`FaceType::ALL`] order. Degenerate walls are skipped.
#[derive(Debug)]
pub struct GenerateWallFaces<'a> {
    walls: &'a [Wall],
    tolerance: Tolerance,
}

impl<'a> GenerateWallFaces<'a> {
    /// Creates a new `GenerateWallFaces` operation.
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

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Propagates failures from the per-side operations; with in-range
    /// indices and vertical sides these do not occur.
    pub fn execute(&self) -> Result<Vec<Face>> {
        let eps = self.tolerance.length;
        let mut faces = Vec::with_capacity(self.walls.len() * FaceType::ALL.len());

        for (wall_index, wall) in self.walls.iter().enumerate() {
            let Some(horizontal) = PenetrationHoles::new(self.walls, wall_index)
                .with_tolerance(self.tolerance)
                .execute()?
            else {
                debug!(wall = wall_index, "skipping degenerate wall");
                continue;
            };

            for (face_type, elevation, faces_up) in [
                (FaceType::Top, wall.height, true),
                (FaceType::Bottom, 0.0, false),
            ] {
                faces.push(Face {
                    wall_index,
                    face_type,
                    frame: FaceFrame::Horizontal {
                        elevation,
                        faces_up,
                    },
                    regions: vec![horizontal.clone()],
                });
            }

            for side in FaceType::SIDES {
                let Some(line) = SideLine::of(wall, side, eps) else {
                    continue;
                };
                let regions = SegmentSide::new(self.walls, wall_index, side)
                    .with_tolerance(self.tolerance)
                    .execute()?;
                faces.push(Face {
                    wall_index,
                    face_type: side,
                    frame: line.frame(),
                    regions,
                });
            }
        }

        debug!(walls = self.walls.len(), faces = faces.len(), "generated wall faces");
        Ok(faces)
    }
}
