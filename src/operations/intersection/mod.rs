mod detect;
mod overlap;

pub use detect::{footprints_overlap, DetectIntersections, WallPair};
pub use overlap::footprint_overlap;
