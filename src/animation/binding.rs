use crate::skeleton::JointIndex;

/// Defines the target property for animation data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPath {
    Translation, // Maps to transform.position
    Rotation,    // Maps to transform.rotation
}

/// Binding relationship: maps track `track_index` of a clip to the target
/// property of joint `joint` in a skeleton.
#[derive(Debug, Clone, Copy)]
pub struct JointBinding {
    pub track_index: usize,
    pub joint: JointIndex,
    pub target: TargetPath,
}
