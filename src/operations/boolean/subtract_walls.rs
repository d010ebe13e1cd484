use std::fmt;

use tracing::{debug, warn};

use super::evaluator::BooleanEvaluator;
use super::truncate::{cut_ranges, truncated_solid, wall_box};
use crate::error::Result;
use crate::geometry::Wall;
use crate::math::Tolerance;
use crate::operations::intersection::DetectIntersections;
use crate::tessellation::TriangleMesh;

/// Final solid of one wall.
#[derive(Debug, Clone, PartialEq)]
pub struct WallSolid {
    /// Index of the wall in the input list.
    pub wall_index: usize,
    /// Closed, outward-wound mesh in world space.
    pub mesh: TriangleMesh,
    /// `true` when the mesh comes from truncation rather than an exact
    /// boolean.
    pub approximated: bool,
}

/// Removes from every wall the volume of the walls that cross it.
///
/// With a [`BooleanEvaluator`], each wall box has every intersecting
/// partner's box subtracted exactly. Without one, or when the evaluator
/// fails on a wall, that wall is truncated instead.
pub struct SubtractWalls<'a> {
    walls: &'a [Wall],
    evaluator: Option<&'a dyn BooleanEvaluator>,
    tolerance: Tolerance,
}

impl<'a> SubtractWalls<'a> {
    /// Creates a new `SubtractWalls` operation without an exact evaluator.
    #[must_use]
    pub fn new(walls: &'a [Wall]) -> Self {
        Self {
            walls,
            evaluator: None,
            tolerance: Tolerance::default(),
        }
    }

    /// Uses `evaluator` for exact differences.
    #[must_use]
    pub fn with_evaluator(mut self, evaluator: &'a dyn BooleanEvaluator) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Overrides the tolerance settings.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the operation.
    ///
    /// Walls that cannot form a box (zero length, height or thickness)
    /// produce no solid and never act as cutters.
    ///
    /// # Errors
    ///
    /// Currently infallible. Evaluator errors are absorbed by truncation.
    pub fn execute(&self) -> Result<Vec<WallSolid>> {
        let eps = self.tolerance.length;
        let boxes: Vec<Option<TriangleMesh>> = self
            .walls
            .iter()
            .enumerate()
            .map(|(i, wall)| match wall_box(wall, eps) {
                Ok(mesh) => Some(mesh),
                Err(e) => {
                    debug!(wall = i, error = %e, "skipping wall without a solid");
                    None
                }
            })
            .collect();
        let pairs = DetectIntersections::new(self.walls)
            .with_tolerance(self.tolerance)
            .execute();

        let mut solids = Vec::with_capacity(self.walls.len());
        for (wall_index, wall) in self.walls.iter().enumerate() {
            let Some(base) = &boxes[wall_index] else {
                continue;
            };
            let partners: Vec<usize> = pairs
                .iter()
                .filter_map(|p| p.other(wall_index))
                .filter(|&j| boxes[j].is_some())
                .collect();
            if partners.is_empty() {
                solids.push(WallSolid {
                    wall_index,
                    mesh: base.clone(),
                    approximated: false,
                });
                continue;
            }

            if let Some(evaluator) = self.evaluator {
                match subtract_exact(evaluator, base, &boxes, &partners) {
                    Ok(mesh) => {
                        solids.push(WallSolid {
                            wall_index,
                            mesh,
                            approximated: false,
                        });
                        continue;
                    }
                    Err(e) => {
                        warn!(
                            wall = wall_index,
                            error = %e,
                            "boolean evaluator failed, truncating"
                        );
                    }
                }
            }

            let others: Vec<&Wall> = partners.iter().map(|&j| &self.walls[j]).collect();
            solids.push(truncate(wall_index, wall, base, &others, eps));
        }

        debug!(
            walls = self.walls.len(),
            solids = solids.len(),
            approximated = solids.iter().filter(|s| s.approximated).count(),
            "subtracted walls"
        );
        Ok(solids)
    }
}

impl fmt::Debug for SubtractWalls<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubtractWalls")
            .field("walls", &self.walls.len())
            .field("evaluator", &self.evaluator.is_some())
            .field("tolerance", &self.tolerance)
            .finish()
    }
}

/// Truncates `wall` around its partners. Keeps the plain box, flagged exact,
/// when no partner leaves a cut range.
fn truncate(
    wall_index: usize,
    wall: &Wall,
    base: &TriangleMesh,
    partners: &[&Wall],
    eps: f64,
) -> WallSolid {
    let ranges = cut_ranges(wall, partners, eps);
    let truncated = if ranges.is_empty() {
        None
    } else {
        match truncated_solid(wall, &ranges, eps) {
            Ok(mesh) => Some(mesh),
            Err(e) => {
                warn!(wall = wall_index, error = %e, "truncation failed, keeping box");
                None
            }
        }
    };
    WallSolid {
        wall_index,
        approximated: truncated.is_some(),
        mesh: truncated.unwrap_or_else(|| base.clone()),
    }
}

fn subtract_exact(
    evaluator: &dyn BooleanEvaluator,
    base: &TriangleMesh,
    boxes: &[Option<TriangleMesh>],
    partners: &[usize],
) -> Result<TriangleMesh> {
    let mut mesh = base.clone();
    for cutter in partners.iter().filter_map(|&j| boxes[j].as_ref()) {
        mesh = evaluator.difference(&mesh, cutter)?;
    }
    Ok(mesh)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::OperationError;
    use crate::math::Point2;

    fn wall(x0: f64, y0: f64, x1: f64, y1: f64) -> Wall {
        Wall::new(Point2::new(x0, y0), Point2::new(x1, y1), 0.2, 3.0)
    }

    fn crossing() -> Vec<Wall> {
        vec![
            wall(0.0, 0.0, 4.0, 0.0),
            wall(2.0, -1.0, 2.0, 1.0),
            wall(10.0, 0.0, 12.0, 0.0),
        ]
    }

    /// Returns the minuend unchanged and counts calls.
    struct Passthrough {
        calls: Cell<usize>,
    }

    impl BooleanEvaluator for Passthrough {
        fn difference(&self, a: &TriangleMesh, _b: &TriangleMesh) -> Result<TriangleMesh> {
            self.calls.set(self.calls.get() + 1);
            Ok(a.clone())
        }
    }

    struct Failing;

    impl BooleanEvaluator for Failing {
        fn difference(&self, _a: &TriangleMesh, _b: &TriangleMesh) -> Result<TriangleMesh> {
            Err(OperationError::Failed("unsupported".into()).into())
        }
    }

    #[test]
    fn without_evaluator_crossing_walls_are_truncated() {
        let walls = crossing();
        let solids = SubtractWalls::new(&walls).execute().unwrap();
        assert_eq!(solids.len(), 3);
        assert!(solids[0].approximated);
        assert!(solids[1].approximated);
        assert!(!solids[2].approximated);
        for s in &solids {
            assert!(s.mesh.is_closed_manifold());
        }
        assert_abs_diff_eq!(solids[0].mesh.signed_volume(), 0.64 * 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(solids[2].mesh.signed_volume(), 0.4 * 3.0, epsilon = 1e-9);
    }

    #[test]
    fn evaluator_results_are_exact() {
        let walls = crossing();
        let evaluator = Passthrough {
            calls: Cell::new(0),
        };
        let solids = SubtractWalls::new(&walls)
            .with_evaluator(&evaluator)
            .execute()
            .unwrap();
        assert!(solids.iter().all(|s| !s.approximated));
        assert_eq!(evaluator.calls.get(), 2);
    }

    #[test]
    fn evaluator_failure_falls_back() {
        let walls = crossing();
        let solids = SubtractWalls::new(&walls)
            .with_evaluator(&Failing)
            .execute()
            .unwrap();
        assert!(solids[0].approximated);
        assert!(solids[1].approximated);
        assert!(!solids[2].approximated);
    }

    #[test]
    fn flat_walls_are_skipped_without_failing() {
        let mut low = wall(10.0, 0.0, 12.0, 0.0);
        low.height = 0.0;
        let mut thin = wall(2.0, -1.0, 2.0, 1.0);
        thin.thickness = 0.0;
        let walls = vec![wall(0.0, 0.0, 4.0, 0.0), low, thin];

        let solids = SubtractWalls::new(&walls).execute().unwrap();
        assert_eq!(solids.len(), 1);
        assert_eq!(solids[0].wall_index, 0);
        assert!(!solids[0].approximated);
        assert_abs_diff_eq!(solids[0].mesh.signed_volume(), 0.8 * 3.0, epsilon = 1e-9);

        let evaluator = Passthrough {
            calls: Cell::new(0),
        };
        let exact = SubtractWalls::new(&walls)
            .with_evaluator(&evaluator)
            .execute()
            .unwrap();
        assert_eq!(exact.len(), 1);
        assert_eq!(evaluator.calls.get(), 0);
    }

    #[test]
    fn partner_without_overlap_leaves_an_exact_box() {
        let a = wall(0.0, 0.0, 4.0, 0.0);
        let far = wall(10.0, -1.0, 10.0, 1.0);
        let base = wall_box(&a, 1e-3).unwrap();
        let solid = truncate(0, &a, &base, &[&far], 1e-3);
        assert!(!solid.approximated);
        assert_eq!(solid.mesh, base);

        let near = wall(2.0, -1.0, 2.0, 1.0);
        assert!(truncate(0, &a, &base, &[&near], 1e-3).approximated);
    }

    #[test]
    fn debug_reports_evaluator_presence() {
        let walls = crossing();
        let op = SubtractWalls::new(&walls).with_evaluator(&Failing);
        let text = format!("{op:?}");
        assert!(text.contains("walls: 3"));
        assert!(text.contains("evaluator: true"));
    }

    #[test]
    fn degenerate_walls_produce_no_solid() {
        let walls = vec![wall(0.0, 0.0, 4.0, 0.0), wall(1.0, 1.0, 1.0, 1.0)];
        let solids = SubtractWalls::new(&walls).execute().unwrap();
        assert_eq!(solids.len(), 1);
        assert_eq!(solids[0].wall_index, 0);
    }
}
