//! Fixed-point quantization of coordinates into hashable integer keys.
//!
//! Rounding rule: `value / step` is rounded to the nearest integer with
//! ties away from zero (`f64::round`). Two coordinates share a key exactly
//! when they fall into the same grid cell centred on a multiple of `step`.

use super::{Point3, Vector3};

/// Quantized 3D vertex key.
pub type VertexKey = [i64; 3];

/// Undirected edge key: the two vertex keys in sorted order.
pub type EdgeKey = (VertexKey, VertexKey);

/// Quantizes a scalar onto a grid of size `step`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn quantize(value: f64, step: f64) -> i64 {
    (value / step).round() as i64
}

/// Quantizes a 3D point.
#[must_use]
pub fn vertex_key(p: &Point3, step: f64) -> VertexKey {
    [quantize(p.x, step), quantize(p.y, step), quantize(p.z, step)]
}

/// Quantizes a 3D direction.
#[must_use]
pub fn direction_key(v: &Vector3, step: f64) -> VertexKey {
    [quantize(v.x, step), quantize(v.y, step), quantize(v.z, step)]
}

/// Order-independent key for the edge between `a` and `b`.
#[must_use]
pub fn edge_key(a: &Point3, b: &Point3, step: f64) -> EdgeKey {
    let ka = vertex_key(a, step);
    let kb = vertex_key(b, step);
    if ka <= kb {
        (ka, kb)
    } else {
        (kb, ka)
    }
}
