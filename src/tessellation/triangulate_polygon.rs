use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, FixedVertexHandle, InnerTag};
use spade::{ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation};

use crate::error::{GeometryError, Result, TessellationError};
use crate::math::Point2;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Triangulates a simple polygon with optional holes.
///
/// Returns counter-clockwise triangles as indices into the concatenation of
/// `outer` followed by every hole loop, in order. Loop winding does not
/// matter.
///
/// # Errors
///
/// Returns [`GeometryError::TooFewPoints`] for a loop with fewer than 3
/// points, or [`TessellationError::Failed`] if the CDT rejects a vertex.
pub fn triangulate_polygon(outer: &[Point2], holes: &[Vec<Point2>]) -> Result<Vec<[usize; 3]>> {
    let mut cdt = Cdt::new();
    let mut handle_to_index: HashMap<FixedVertexHandle, usize> = HashMap::new();

    let mut base = 0;
    for ring in std::iter::once(outer).chain(holes.iter().map(Vec::as_slice)) {
        insert_constraint_loop(&mut cdt, ring, base, &mut handle_to_index)?;
        base += ring.len();
    }

    let interior = classify_interior_faces(&cdt);
    let mut triangles = Vec::with_capacity(interior.len());
    for face in cdt.inner_faces() {
        if !interior.contains(&face.fix().index()) {
            continue;
        }
        let mut tri = [0usize; 3];
        for (slot, vh) in tri.iter_mut().zip(face.vertices()) {
            // Constraint edges of a simple polygon never cross, so every
            // CDT vertex is one of ours.
            let Some(&idx) = handle_to_index.get(&vh.fix()) else {
                return Err(TessellationError::Failed(
                    "triangulation introduced an unexpected vertex".into(),
                )
                .into());
            };
            *slot = idx;
        }
        triangles.push(tri);
    }
    Ok(triangles)
}

/// Inserts a closed loop as constraint edges, recording which input index
/// each CDT vertex came from.
fn insert_constraint_loop(
    cdt: &mut Cdt,
    points: &[Point2],
    base: usize,
    handle_to_index: &mut HashMap<FixedVertexHandle, usize>,
) -> Result<()> {
    if points.len() < 3 {
        return Err(GeometryError::TooFewPoints(points.len()).into());
    }

    let mut handles = Vec::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        let h = cdt
            .insert(SpadePoint2::new(p.x, p.y))
            .map_err(|e: InsertionError| TessellationError::Failed(format!("CDT insert: {e}")))?;
        handle_to_index.entry(h).or_insert(base + i);
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from != to {
            cdt.add_constraint(from, to);
        }
    }
    Ok(())
}

/// Flood-fills from the outer face; crossing a constraint edge toggles
/// depth parity. Odd depth = interior.
fn classify_interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<InnerTag>, u32)> = VecDeque::new();

    let outer_fix = cdt.outer_face().fix();
    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer_fix {
            continue;
        }
        if let Some(inner) = edge.rev().face().as_inner() {
            let idx = inner.fix().index();
            if depth_map.contains_key(&idx) {
                continue;
            }
            let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(idx, depth);
            if depth % 2 == 1 {
                interior.insert(idx);
            }
            queue.push_back((inner.fix(), depth));
        }
    }

    while let Some((face_fix, depth)) = queue.pop_front() {
        let face = cdt.face(face_fix);
        for edge in face.adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let n_idx = neighbor.fix().index();
            if depth_map.contains_key(&n_idx) {
                continue;
            }
            let new_depth = depth + u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(n_idx, new_depth);
            if new_depth % 2 == 1 {
                interior.insert(n_idx);
            }
            queue.push_back((neighbor.fix(), new_depth));
        }
    }

    interior
}
