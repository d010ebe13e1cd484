mod face;
mod footprint;
mod polygon;
mod wall;

pub use face::{
    plan_to_world, plan_to_world_direction, to_world, world_to_plan_direction, Face, FaceFrame,
    FaceType,
};
pub use footprint::Footprint;
pub use polygon::PolygonWithHoles;
pub use wall::{find_wall_endpoint, EndpointHit, Wall, WallEnd, SNAP_RADIUS};
