use std::collections::{BTreeMap, HashMap};

use tracing::trace;

use crate::math::quantize::{edge_key, vertex_key, EdgeKey, VertexKey};
use crate::math::Point3;

/// A triangle edge and how many triangles of its island use it.
///
/// `v1 → v2` follows the winding of the first triangle that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryEdge {
    /// First endpoint.
    pub v1: Point3,
    /// Second endpoint.
    pub v2: Point3,
    /// Number of triangles sharing this edge.
    pub usage_count: u32,
}

/// Counts edge usage across `triangles` and keeps the edges used once.
///
/// Edges come back ordered by their quantized key.
pub(super) fn boundary_edges(triangles: &[[Point3; 3]], step: f64) -> Vec<BoundaryEdge> {
    let mut edges: BTreeMap<EdgeKey, BoundaryEdge> = BTreeMap::new();
    for tri in triangles {
        for k in 0..3 {
            let (a, b) = (tri[k], tri[(k + 1) % 3]);
            edges
                .entry(edge_key(&a, &b, step))
                .and_modify(|e| e.usage_count += 1)
                .or_insert(BoundaryEdge {
                    v1: a,
                    v2: b,
                    usage_count: 1,
                });
        }
    }
    edges.into_values().filter(|e| e.usage_count == 1).collect()
}

/// Chains boundary edges into closed loops.
///
/// Each loop starts from the first unused edge and repeatedly appends the
/// unused edge touching the open end, reversing it if needed, until the
/// chain returns to its start. Returns `None` if any chain dead-ends.
pub(super) fn chain_loops(edges: &[BoundaryEdge], step: f64) -> Option<Vec<Vec<Point3>>> {
    let keys: Vec<(VertexKey, VertexKey)> = edges
        .iter()
        .map(|e| (vertex_key(&e.v1, step), vertex_key(&e.v2, step)))
        .collect();
    let mut incident: HashMap<VertexKey, Vec<usize>> = HashMap::new();
    for (i, (k1, k2)) in keys.iter().enumerate() {
        incident.entry(*k1).or_default().push(i);
        incident.entry(*k2).or_default().push(i);
    }

    let mut used = vec![false; edges.len()];
    let mut loops = Vec::new();
    for seed in 0..edges.len() {
        if used[seed] {
            continue;
        }
        used[seed] = true;
        let start = keys[seed].0;
        let mut end = keys[seed].1;
        let mut points = vec![edges[seed].v1];

        while end != start {
            let next = incident
                .get(&end)
                .and_then(|list| list.iter().copied().find(|&i| !used[i]));
            let Some(i) = next else {
                trace!(edges = edges.len(), loops = loops.len(), "open boundary chain");
                return None;
            };
            used[i] = true;
            let (k1, k2) = keys[i];
            if k1 == end {
                points.push(edges[i].v1);
                end = k2;
            } else {
                points.push(edges[i].v2);
                end = k1;
            }
        }
        loops.push(points);
    }
    Some(loops)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const STEP: f64 = 1e-4;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    fn flat_quad() -> Vec<[Point3; 3]> {
        vec![
            [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)],
            [p(0.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)],
        ]
    }

    #[test]
    fn shared_diagonal_is_not_boundary() {
        let edges = boundary_edges(&flat_quad(), STEP);
        assert_eq!(edges.len(), 4);
        assert!(edges.iter().all(|e| e.usage_count == 1));
    }

    #[test]
    fn quad_chains_into_one_loop() {
        let edges = boundary_edges(&flat_quad(), STEP);
        let loops = chain_loops(&edges, STEP).unwrap();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 4);
    }

    #[test]
    fn open_chain_is_rejected() {
        let edges = vec![
            BoundaryEdge {
                v1: p(0.0, 0.0),
                v2: p(1.0, 0.0),
                usage_count: 1,
            },
            BoundaryEdge {
                v1: p(1.0, 0.0),
                v2: p(1.0, 1.0),
                usage_count: 1,
            },
        ];
        assert!(chain_loops(&edges, STEP).is_none());
    }
}
