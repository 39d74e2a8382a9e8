use glam::Quat;

use crate::skeleton::{JointIndex, Pose, Skeleton};

/// Post-process hook run after every chain has been solved.
///
/// Layers receive the target pose in progress and the current playback time,
/// and may perturb any joint. They run in registration order.
pub trait AdditiveLayer: Send {
    fn apply(&mut self, time: f32, pose: &mut Pose);
}

impl<F> AdditiveLayer for F
where
    F: FnMut(f32, &mut Pose) + Send,
{
    fn apply(&mut self, time: f32, pose: &mut Pose) {
        self(time, pose);
    }
}

/// Applies a fixed local rotation offset to one joint, scaled by `weight`.
#[derive(Debug, Clone)]
pub struct RotationOffsetLayer {
    joint: JointIndex,
    offset: Quat,
    pub weight: f32,
}

impl RotationOffsetLayer {
    #[must_use]
    pub fn new(joint: JointIndex, offset: Quat) -> Self {
        Self {
            joint,
            offset: offset.normalize(),
            weight: 1.0,
        }
    }

    /// Looks the joint up by name; `None` if the skeleton has no such joint.
    #[must_use]
    pub fn for_joint(skeleton: &Skeleton, name: &str, offset: Quat) -> Option<Self> {
        let joint = skeleton.find(name);
        if joint.is_none() {
            log::warn!("Offset layer: joint '{name}' not found in skeleton '{}'", skeleton.name);
        }
        joint.map(|j| Self::new(j, offset))
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }
}

impl AdditiveLayer for RotationOffsetLayer {
    fn apply(&mut self, _time: f32, pose: &mut Pose) {
        if self.weight <= 0.0 {
            return;
        }
        let delta = Quat::IDENTITY.slerp(self.offset, self.weight.min(1.0));
        let rotation = (pose.local_rotation(self.joint) * delta).normalize();
        pose.set_local_rotation(self.joint, rotation);
    }
}
