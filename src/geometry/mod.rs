pub mod hit_testing;
pub mod transform;

pub use hit_testing::{Pick, pick};
pub use transform::PoseTransform;
