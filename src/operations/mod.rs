pub mod boolean;
pub mod face_segment;
pub mod intersection;
pub mod outline;
mod wall_faces;

pub use wall_faces::GenerateWallFaces;
