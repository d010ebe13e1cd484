use crate::error::Result;
use crate::tessellation::TriangleMesh;

/// An exact mesh boolean engine supplied by the caller.
///
/// Both operands are closed, outward-wound meshes in world space.
pub trait BooleanEvaluator {
    /// Computes `a - b`.
    ///
    /// # Errors
    ///
    /// Implementations return an error when the difference cannot be
    /// evaluated; the caller then falls back to truncation.
    fn difference(&self, a: &TriangleMesh, b: &TriangleMesh) -> Result<TriangleMesh>;
}
