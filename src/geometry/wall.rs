use crate::math::{Point2, Vector2};

/// Default radius in meters for snapping a sketch point to a wall endpoint.
pub const SNAP_RADIUS: f64 = 0.1;

/// A straight wall: a plan-view centerline extruded to `height` with the
/// given `thickness`. All values are in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    /// Centerline start.
    pub start: Point2,
    /// Centerline end.
    pub end: Point2,
    /// Full thickness across the centerline.
    pub thickness: f64,
    /// Height above the floor.
    pub height: f64,
}

impl Wall {
    /// Creates a wall from its centerline and dimensions.
    #[must_use]
    pub fn new(start: Point2, end: Point2, thickness: f64, height: f64) -> Self {
        Self {
            start,
            end,
            thickness,
            height,
        }
    }

    /// Centerline length.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Returns `true` if the centerline is shorter than `eps`.
    #[must_use]
    pub fn is_degenerate(&self, eps: f64) -> bool {
        self.length() < eps
    }

    /// Unit direction from start to end, or `None` for a degenerate wall.
    #[must_use]
    pub fn direction(&self, eps: f64) -> Option<Vector2> {
        let d = self.end - self.start;
        let len = d.norm();
        (len >= eps).then(|| d / len)
    }

    /// Left-hand unit normal `(-d.y, d.x)`, or `None` for a degenerate wall.
    #[must_use]
    pub fn normal(&self, eps: f64) -> Option<Vector2> {
        self.direction(eps).map(|d| Vector2::new(-d.y, d.x))
    }
}

/// Which end of a wall a snapped point matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallEnd {
    Start,
    End,
}

/// A wall endpoint located by [`find_wall_endpoint`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointHit {
    /// Index of the wall in the input slice.
    pub wall_index: usize,
    /// Which end matched.
    pub end: WallEnd,
    /// The endpoint position.
    pub point: Point2,
}

/// Finds the first wall endpoint within `radius` of `point`.
///
/// Walls are scanned in order and the start is checked before the end, so
/// sketching a new wall from an existing corner connects to the earliest
/// wall there.
#[must_use]
pub fn find_wall_endpoint(point: &Point2, walls: &[Wall], radius: f64) -> Option<EndpointHit> {
    walls.iter().enumerate().find_map(|(wall_index, wall)| {
        [(WallEnd::Start, wall.start), (WallEnd::End, wall.end)]
            .into_iter()
            .find(|(_, p)| (p - point).norm() <= radius)
            .map(|(end, p)| EndpointHit {
                wall_index,
                end,
                point: p,
            })
    })
}
