use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Rigid transform component.
///
/// A position + rotation pair describing a joint relative to its parent (local)
/// or relative to the skeleton origin (world). Scale is not part of the
/// retargeting model; bone length differences are absorbed by the swing/twist
/// direction matching and the pelvis translation ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    #[must_use]
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    #[must_use]
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation,
        }
    }

    // ========================================================================
    // Composition
    // ========================================================================

    /// Composes `self` (parent) with `child`, returning the child's transform
    /// expressed in the parent's space.
    ///
    /// `parent.then(&child)` applies `child` first and `parent` second, matching
    /// the order in which a joint hierarchy is walked from root to leaf.
    #[inline]
    #[must_use]
    pub fn then(&self, child: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * child.position,
            rotation: self.rotation * child.rotation,
        }
    }

    /// Returns the inverse transform, such that `t.inverse().then(&t)` is identity.
    #[inline]
    #[must_use]
    pub fn inverse(&self) -> Transform {
        let rotation = self.rotation.inverse();
        Transform {
            position: rotation * -self.position,
            rotation,
        }
    }

    /// Transforms a point (rotation, then translation).
    #[inline]
    #[must_use]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * point
    }

    /// Transforms a direction (rotation only).
    #[inline]
    #[must_use]
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * vector
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for Transform {
    type Output = Transform;

    #[inline]
    fn mul(self, rhs: Transform) -> Transform {
        self.then(&rhs)
    }
}
