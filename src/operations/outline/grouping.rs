use std::collections::{BTreeMap, HashMap};

use crate::math::quantize::{direction_key, quantize, vertex_key, VertexKey};
use crate::math::{Point3, Tolerance, Vector3};

/// Hash key of a plane: quantized unit normal plus quantized offset.
pub(super) type PlaneKey = (VertexKey, i64);

/// Triangles sharing one plane.
#[derive(Debug, Clone)]
pub(super) struct CoplanarGroup {
    pub normal: Vector3,
    pub offset: f64,
    pub triangles: Vec<[Point3; 3]>,
}

/// Buckets non-degenerate triangles by plane.
///
/// Groups come back sorted by key, so the result does not depend on the
/// input triangle order. The group normal and offset are those of the
/// group's largest triangle.
pub(super) fn group_coplanar(triangles: &[[Point3; 3]], tol: &Tolerance) -> Vec<CoplanarGroup> {
    let min_area = tol.length * tol.length;
    let mut groups: BTreeMap<PlaneKey, (f64, CoplanarGroup)> = BTreeMap::new();

    for tri in triangles {
        let [a, b, c] = tri;
        let cross = (b - a).cross(&(c - a));
        let double_area = cross.norm();
        if double_area * 0.5 < min_area {
            continue;
        }
        let normal = cross / double_area;
        let offset = normal.dot(&a.coords);
        let key = (
            direction_key(&normal, tol.normal_step()),
            quantize(offset, tol.length),
        );
        let entry = groups.entry(key).or_insert_with(|| {
            (
                0.0,
                CoplanarGroup {
                    normal,
                    offset,
                    triangles: Vec::new(),
                },
            )
        });
        if double_area > entry.0 {
            entry.0 = double_area;
            entry.1.normal = normal;
            entry.1.offset = offset;
        }
        entry.1.triangles.push(*tri);
    }

    groups.into_values().map(|(_, g)| g).collect()
}

/// Splits a group into islands of triangles connected through shared
/// (quantized) vertices.
///
/// Islands are ordered by their smallest vertex key; triangles inside an
/// island keep their input order.
pub(super) fn split_islands(group: &CoplanarGroup, step: f64) -> Vec<Vec<[Point3; 3]>> {
    let n = group.triangles.len();
    let mut parent: Vec<usize> = (0..n).collect();
    let mut owner: HashMap<VertexKey, usize> = HashMap::new();

    for (i, tri) in group.triangles.iter().enumerate() {
        for p in tri {
            let key = vertex_key(p, step);
            match owner.get(&key) {
                Some(&j) => union(&mut parent, i, j),
                None => {
                    owner.insert(key, i);
                }
            }
        }
    }

    let mut islands: BTreeMap<usize, (VertexKey, Vec<[Point3; 3]>)> = BTreeMap::new();
    for (i, tri) in group.triangles.iter().enumerate() {
        let root = find(&mut parent, i);
        let min_key = tri
            .iter()
            .map(|p| vertex_key(p, step))
            .min()
            .unwrap_or_default();
        let entry = islands
            .entry(root)
            .or_insert_with(|| (min_key, Vec::new()));
        entry.0 = entry.0.min(min_key);
        entry.1.push(*tri);
    }

    let mut islands: Vec<(VertexKey, Vec<[Point3; 3]>)> = islands.into_values().collect();
    islands.sort_by(|a, b| a.0.cmp(&b.0));
    islands.into_iter().map(|(_, tris)| tris).collect()
}

fn find(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

fn union(parent: &mut [usize], a: usize, b: usize) {
    let (ra, rb) = (find(parent, a), find(parent, b));
    if ra != rb {
        parent[ra.max(rb)] = ra.min(rb);
    }
}
