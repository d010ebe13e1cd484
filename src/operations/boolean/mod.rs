mod evaluator;
mod merge_footprints;
mod subtract_walls;
mod truncate;

pub use evaluator::BooleanEvaluator;
pub use merge_footprints::merge_footprints;
pub use subtract_walls::{SubtractWalls, WallSolid};
pub use truncate::{wall_box, TRUNCATION_FRACTION};
