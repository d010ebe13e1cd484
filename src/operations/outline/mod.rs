mod grouping;
mod loops;
mod plane;

pub use loops::BoundaryEdge;
pub use plane::PlaneBasis;

use tracing::{debug, trace};

use self::grouping::{group_coplanar, split_islands};
use self::loops::{boundary_edges, chain_loops};
use crate::math::convex_hull::convex_hull;
use crate::math::polygon_2d::{
    dedup_closed, point_in_polygon, point_segment_distance, remove_collinear, signed_area,
};
use crate::math::{Point2, Point3, Tolerance};
use crate::tessellation::TriangleMesh;

/// Boundary of one planar patch, in the coordinates of its [`PlaneBasis`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    /// Every boundary chain closed. `outer` is counter-clockwise seen from
    /// the plane normal; holes are clockwise and lie inside `outer`.
    Closed {
        outer: Vec<Point2>,
        holes: Vec<Vec<Point2>>,
    },
    /// Reconstruction failed; the convex hull of the patch's vertices.
    Hull { points: Vec<Point2> },
}

impl Outline {
    /// Returns `true` for a reconstructed (non-hull) outline.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Outline::Closed { .. })
    }

    /// The outer boundary: `outer` or the hull points.
    #[must_use]
    pub fn boundary(&self) -> &[Point2] {
        match self {
            Outline::Closed { outer, .. } => outer,
            Outline::Hull { points } => points,
        }
    }
}

/// One planar patch of the input and its recovered outline.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineGroup {
    /// Projection frame; [`PlaneBasis::lift`] maps outline points back.
    pub plane: PlaneBasis,
    /// Edges used by exactly one triangle of the patch.
    pub boundary_edges: Vec<BoundaryEdge>,
    /// The recovered boundary.
    pub outline: Outline,
}

/// Recovers clean 2D boundaries from a triangulated surface.
///
/// Triangles are bucketed by plane, each plane is split into connected
/// patches, and every patch's boundary edges are chained into loops. A
/// patch whose loops cannot be closed falls back to a convex hull.
#[derive(Debug)]
pub struct ExtractOutline {
    triangles: Vec<[Point3; 3]>,
    tolerance: Tolerance,
}

impl ExtractOutline {
    /// Creates a new `ExtractOutline` query over explicit triangles.
    #[must_use]
    pub fn new(triangles: Vec<[Point3; 3]>) -> Self {
        Self {
            triangles,
            tolerance: Tolerance::default(),
        }
    }

    /// Creates a new `ExtractOutline` query over a mesh.
    #[must_use]
    pub fn from_mesh(mesh: &TriangleMesh) -> Self {
        Self::new(mesh.triangles())
    }

    /// Overrides the tolerance settings.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the query. Groups are ordered by plane key, so the result
    /// is independent of triangle order.
    #[must_use]
    pub fn execute(&self) -> Vec<OutlineGroup> {
        let tol = &self.tolerance;
        let mut result = Vec::new();
        for group in group_coplanar(&self.triangles, tol) {
            let plane = PlaneBasis::new(&group.normal, group.offset);
            for island in split_islands(&group, tol.quantization) {
                let edges = boundary_edges(&island, tol.quantization);
                let outline = reconstruct(&plane, &edges, tol)
                    .unwrap_or_else(|| hull_fallback(&plane, &island, tol));
                trace!(
                    triangles = island.len(),
                    boundary = edges.len(),
                    closed = outline.is_closed(),
                    "outline patch"
                );
                result.push(OutlineGroup {
                    plane,
                    boundary_edges: edges,
                    outline,
                });
            }
        }
        debug!(
            triangles = self.triangles.len(),
            outlines = result.len(),
            hulls = result.iter().filter(|g| !g.outline.is_closed()).count(),
            "extracted outlines"
        );
        result
    }
}

/// Chains edges into loops and sorts them into one outer loop plus holes.
fn reconstruct(plane: &PlaneBasis, edges: &[BoundaryEdge], tol: &Tolerance) -> Option<Outline> {
    let eps = tol.length;
    let loops = chain_loops(edges, tol.quantization)?;

    let mut projected = Vec::with_capacity(loops.len());
    for lp in &loops {
        let pts: Vec<Point2> = lp.iter().map(|p| plane.project(p)).collect();
        let pts = remove_collinear(&dedup_closed(&pts, eps), eps);
        if pts.len() < 3 || signed_area(&pts).abs() < eps * eps {
            return None;
        }
        projected.push(pts);
    }

    let areas: Vec<f64> = projected.iter().map(|lp| signed_area(lp).abs()).collect();
    let outer_idx = (0..projected.len()).max_by(|&a, &b| areas[a].total_cmp(&areas[b]))?;
    let mut outer = projected.swap_remove(outer_idx);
    if signed_area(&outer) < 0.0 {
        outer.reverse();
    }

    let mut holes = projected;
    for hole in &mut holes {
        if !hole.iter().all(|p| point_in_polygon(p, &outer) || on_boundary(p, &outer, eps)) {
            return None;
        }
        if signed_area(hole) > 0.0 {
            hole.reverse();
        }
    }
    Some(Outline::Closed { outer, holes })
}

fn on_boundary(p: &Point2, polygon: &[Point2], eps: f64) -> bool {
    let n = polygon.len();
    (0..n).any(|i| point_segment_distance(p, &polygon[i], &polygon[(i + 1) % n]) < eps)
}

fn hull_fallback(plane: &PlaneBasis, island: &[[Point3; 3]], tol: &Tolerance) -> Outline {
    let mut points: Vec<Point2> = island
        .iter()
        .flat_map(|tri| tri.iter().map(|p| plane.project(p)))
        .collect();
    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    points.dedup_by(|a, b| (*a - *b).norm() < tol.length);
    Outline::Hull {
        points: convex_hull(&points),
    }
}
