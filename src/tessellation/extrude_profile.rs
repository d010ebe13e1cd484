use tracing::trace;

use super::{triangulate_polygon, TriangleMesh};
use crate::error::{OperationError, Result};
use crate::geometry::plan_to_world;
use crate::math::polygon_2d::{dedup_closed, signed_area, to_ccw};
use crate::math::{Point2, TOLERANCE};

/// Extrudes a simple plan-view profile from the floor up to `height`,
/// producing a closed, outward-wound triangle mesh in world space.
#[derive(Debug)]
pub struct ExtrudeProfile {
    profile: Vec<Point2>,
    height: f64,
    eps: f64,
}

impl ExtrudeProfile {
    /// Creates a new `ExtrudeProfile` operation.
    #[must_use]
    pub fn new(profile: Vec<Point2>, height: f64) -> Self {
        Self {
            profile,
            height,
            eps: TOLERANCE,
        }
    }

    /// Overrides the length epsilon used to clean up the profile.
    #[must_use]
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Executes the extrusion.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the height is not
    /// positive or the profile has fewer than 3 distinct points or no area.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Result<TriangleMesh> {
        if self.height <= self.eps {
            return Err(OperationError::InvalidInput(format!(
                "extrusion height must be positive, got {}",
                self.height
            ))
            .into());
        }
        let base = dedup_closed(&self.profile, self.eps);
        if base.len() < 3 || signed_area(&base).abs() < self.eps * self.eps {
            return Err(OperationError::InvalidInput(
                "profile needs at least 3 distinct points enclosing an area".into(),
            )
            .into());
        }
        let base = to_ccw(&base);
        let n = base.len();
        let cap = triangulate_polygon(&base, &[])?;

        let mut mesh = TriangleMesh::default();
        mesh.vertices
            .extend(base.iter().map(|p| plan_to_world(p, 0.0)));
        mesh.vertices
            .extend(base.iter().map(|p| plan_to_world(p, self.height)));

        let top = n as u32;
        for [a, b, c] in &cap {
            let (a, b, c) = (*a as u32, *b as u32, *c as u32);
            // Plan CCW looks up; the floor cap must look down.
            mesh.indices.push([a, c, b]);
            mesh.indices.push([top + a, top + b, top + c]);
        }

        for i in 0..n {
            let j = (i + 1) % n;
            let (bi, bj) = (i as u32, j as u32);
            let (ti, tj) = (top + bi, top + bj);
            mesh.indices.push([bi, bj, tj]);
            mesh.indices.push([bi, tj, ti]);
        }

        trace!(
            profile = n,
            triangles = mesh.indices.len(),
            "extruded profile"
        );
        Ok(mesh)
    }
}
