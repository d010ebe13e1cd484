use std::fmt;

use super::{PolygonWithHoles, Wall};
use crate::math::{Point2, Point3, Vector2, Vector3};

/// One of the six sides of a wall box.
///
/// Front faces the wall's left normal, Back the opposite; Left caps the
/// start, Right caps the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceType {
    Top,
    Bottom,
    Front,
    Back,
    Left,
    Right,
}

impl FaceType {
    /// All six sides, horizontal faces first.
    pub const ALL: [FaceType; 6] = [
        FaceType::Top,
        FaceType::Bottom,
        FaceType::Front,
        FaceType::Back,
        FaceType::Left,
        FaceType::Right,
    ];

    /// The four vertical sides.
    pub const SIDES: [FaceType; 4] = [
        FaceType::Front,
        FaceType::Back,
        FaceType::Left,
        FaceType::Right,
    ];

    /// Returns `true` for Top and Bottom.
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, FaceType::Top | FaceType::Bottom)
    }

    /// Identifies which side of `wall` a picked world-space face normal
    /// belongs to. Returns `None` for a degenerate wall or a zero normal.
    #[must_use]
    pub fn from_normal(wall: &Wall, normal: &Vector3, eps: f64) -> Option<Self> {
        let d = wall.direction(eps)?;
        let len = normal.norm();
        if len < eps {
            return None;
        }
        let nrm = normal / len;
        let horizontal_xz = nrm.x.hypot(nrm.z);
        if nrm.y.abs() > horizontal_xz {
            return Some(if nrm.y > 0.0 {
                FaceType::Top
            } else {
                FaceType::Bottom
            });
        }

        let plan = world_to_plan_direction(&nrm);
        let n = Vector2::new(-d.y, d.x);
        let candidates = [
            (FaceType::Front, plan.dot(&n)),
            (FaceType::Back, -plan.dot(&n)),
            (FaceType::Right, plan.dot(&d)),
            (FaceType::Left, -plan.dot(&d)),
        ];
        candidates
            .into_iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(face, _)| face)
    }
}

impl fmt::Display for FaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FaceType::Top => "top",
            FaceType::Bottom => "bottom",
            FaceType::Front => "front",
            FaceType::Back => "back",
            FaceType::Left => "left",
            FaceType::Right => "right",
        };
        f.write_str(name)
    }
}

/// Local 2D coordinate frame of a wall face.
///
/// Vertical faces measure `x` along the face line from `origin` and `y` up
/// from the floor. Horizontal faces use plan coordinates directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FaceFrame {
    Vertical {
        /// Plan position of the local origin.
        origin: Point2,
        /// Unit plan direction of the local x axis.
        axis: Vector2,
        /// Unit plan direction the face looks toward.
        outward: Vector2,
    },
    Horizontal {
        /// World height of the face plane.
        elevation: f64,
        /// `true` for a face looking up (Top).
        faces_up: bool,
    },
}

impl FaceFrame {
    /// Maps a local point into world space. See [`to_world`].
    #[must_use]
    pub fn to_world(&self, point: &Point2) -> Point3 {
        to_world(point, self)
    }

    /// Outward unit normal in world space.
    #[must_use]
    pub fn normal(&self) -> Vector3 {
        match self {
            FaceFrame::Vertical { outward, .. } => plan_to_world_direction(outward),
            FaceFrame::Horizontal { faces_up, .. } => {
                Vector3::new(0.0, if *faces_up { 1.0 } else { -1.0 }, 0.0)
            }
        }
    }
}

/// Maps a point in a face's local frame to world space.
///
/// World space is Y-up; plan `(x, y)` at height `h` lands at `(x, h, -y)`.
/// This is the only place the plan-to-world axis convention is encoded.
#[must_use]
pub fn to_world(point: &Point2, frame: &FaceFrame) -> Point3 {
    match frame {
        FaceFrame::Vertical { origin, axis, .. } => {
            let plan = origin + axis * point.x;
            plan_to_world(&plan, point.y)
        }
        FaceFrame::Horizontal { elevation, .. } => plan_to_world(point, *elevation),
    }
}

/// Lifts a plan point at `height` into world space.
#[must_use]
pub fn plan_to_world(plan: &Point2, height: f64) -> Point3 {
    Point3::new(plan.x, height, -plan.y)
}

/// Lifts a plan direction into a horizontal world direction.
#[must_use]
pub fn plan_to_world_direction(v: &Vector2) -> Vector3 {
    Vector3::new(v.x, 0.0, -v.y)
}

/// Drops the height of a world direction, returning its plan direction.
#[must_use]
pub fn world_to_plan_direction(v: &Vector3) -> Vector2 {
    Vector2::new(v.x, -v.z)
}

/// Occlusion-aware geometry of one side of one wall.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Index of the wall in the input list.
    pub wall_index: usize,
    /// Which side.
    pub face_type: FaceType,
    /// Local frame the regions are expressed in.
    pub frame: FaceFrame,
    /// Independent visible regions; a fully severed side yields several.
    pub regions: Vec<PolygonWithHoles>,
}
