mod extrude_profile;
mod triangulate_polygon;

use std::collections::HashMap;

pub use extrude_profile::ExtrudeProfile;
pub use triangulate_polygon::triangulate_polygon;

use crate::math::Point3;

/// An indexed triangle mesh in world space.
///
/// Closed solids exchanged with a boolean evaluator use outward-facing,
/// counter-clockwise triangles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Resolves the index buffer into explicit triangles.
    #[must_use]
    pub fn triangles(&self) -> Vec<[Point3; 3]> {
        self.indices
            .iter()
            .map(|tri| tri.map(|i| self.vertices[i as usize]))
            .collect()
    }

    /// Signed enclosed volume (divergence theorem). Positive when the
    /// triangles of a closed mesh face outward.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        self.triangles()
            .iter()
            .map(|[a, b, c]| a.coords.dot(&b.coords.cross(&c.coords)) / 6.0)
            .sum()
    }

    /// Returns `true` if every directed edge is matched by exactly one
    /// opposite edge: watertight with consistent winding.
    #[must_use]
    pub fn is_closed_manifold(&self) -> bool {
        if self.indices.is_empty() {
            return false;
        }
        let mut directed: HashMap<(u32, u32), u32> = HashMap::new();
        for tri in &self.indices {
            for k in 0..3 {
                *directed.entry((tri[k], tri[(k + 1) % 3])).or_insert(0) += 1;
            }
        }
        directed
            .iter()
            .all(|(&(a, b), &count)| count == 1 && directed.get(&(b, a)) == Some(&1))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    /// Unit tetrahedron with outward winding.
    fn tetra() -> TriangleMesh {
        TriangleMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            indices: vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
        }
    }

    #[test]
    fn tetra_is_closed_with_positive_volume() {
        let t = tetra();
        assert!(t.is_closed_manifold());
        assert_abs_diff_eq!(t.signed_volume(), 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn open_mesh_is_not_manifold() {
        let mut t = tetra();
        t.indices.pop();
        assert!(!t.is_closed_manifold());
    }
}
