//! Skeleton Topology and Poses
//!
//! - [`Transform`]: position + rotation pair with composition and inversion
//! - [`Skeleton`]: immutable joint arena with parent indices and bind transforms
//! - [`Pose`]: mutable local transforms bound to a shared skeleton

pub mod joint;
pub mod pose;
pub mod transform;

pub use joint::{Joint, JointDesc, JointIndex, Skeleton};
pub use pose::Pose;
pub use transform::Transform;
