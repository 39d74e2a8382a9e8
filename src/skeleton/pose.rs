use std::sync::Arc;

use glam::{Quat, Vec3};
use smallvec::SmallVec;

use crate::skeleton::joint::{JointIndex, Skeleton};
use crate::skeleton::transform::Transform;

/// Ancestor chains deeper than this spill to the heap during world resolution.
const INLINE_DEPTH: usize = 32;

/// A set of joint-local transforms bound to a fixed skeleton topology.
///
/// World transforms are never cached: every [`Pose::world_of`] call composes
/// the current local values from the root down, so the result always reflects
/// the latest writes.
#[derive(Debug, Clone)]
pub struct Pose {
    skeleton: Arc<Skeleton>,
    locals: Vec<Transform>,
}

impl Pose {
    /// Creates the bind pose of `skeleton`.
    #[must_use]
    pub fn bind(skeleton: Arc<Skeleton>) -> Self {
        let locals = skeleton.joints().iter().map(|j| j.local_bind).collect();
        Self { skeleton, locals }
    }

    #[inline]
    #[must_use]
    pub fn skeleton(&self) -> &Arc<Skeleton> {
        &self.skeleton
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.locals.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locals.is_empty()
    }

    // ========================================================================
    // Local access
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn local(&self, joint: JointIndex) -> &Transform {
        &self.locals[joint]
    }

    #[inline]
    #[must_use]
    pub fn local_rotation(&self, joint: JointIndex) -> Quat {
        self.locals[joint].rotation
    }

    #[inline]
    #[must_use]
    pub fn local_position(&self, joint: JointIndex) -> Vec3 {
        self.locals[joint].position
    }

    #[inline]
    pub fn set_local(&mut self, joint: JointIndex, transform: Transform) {
        self.locals[joint] = transform;
    }

    #[inline]
    pub fn set_local_rotation(&mut self, joint: JointIndex, rotation: Quat) {
        self.locals[joint].rotation = rotation;
    }

    #[inline]
    pub fn set_local_position(&mut self, joint: JointIndex, position: Vec3) {
        self.locals[joint].position = position;
    }

    /// Copies every local transform from `other`.
    ///
    /// # Panics
    /// Panics if `other` has a different joint count.
    pub fn reset_to(&mut self, other: &Pose) {
        assert_eq!(
            self.locals.len(),
            other.locals.len(),
            "pose topology mismatch"
        );
        self.locals.copy_from_slice(&other.locals);
    }

    // ========================================================================
    // World resolution
    // ========================================================================

    /// Resolves the world transform of `joint` by composing local transforms
    /// from the root down to the joint.
    ///
    /// # Panics
    /// Panics if `joint` is out of range.
    #[must_use]
    pub fn world_of(&self, joint: JointIndex) -> Transform {
        assert!(
            joint < self.locals.len(),
            "joint index {joint} out of range ({} joints)",
            self.locals.len()
        );

        let mut chain: SmallVec<[JointIndex; INLINE_DEPTH]> = SmallVec::new();
        let mut current = Some(joint);
        while let Some(index) = current {
            chain.push(index);
            current = self.skeleton.parent_of(index);
        }

        chain
            .iter()
            .rev()
            .fold(Transform::IDENTITY, |acc, &index| acc.then(&self.locals[index]))
    }

    /// World transform of `joint`'s parent, or identity for roots.
    #[must_use]
    pub fn parent_world_of(&self, joint: JointIndex) -> Transform {
        self.skeleton
            .parent_of(joint)
            .map_or(Transform::IDENTITY, |parent| self.world_of(parent))
    }

    /// Resolves all world transforms in a single pass.
    #[must_use]
    pub fn world_transforms(&self) -> Vec<Transform> {
        let mut worlds: Vec<Transform> = Vec::with_capacity(self.locals.len());
        for (index, local) in self.locals.iter().enumerate() {
            let world = match self.skeleton.parent_of(index) {
                Some(parent) => worlds[parent].then(local),
                None => *local,
            };
            worlds.push(world);
        }
        worlds
    }
}
