//! Swing/twist direction matching.
//!
//! A joint orientation is recovered from two world-space directions: the
//! swing (where the bone points) and the twist (how it is rolled around that
//! direction). Swing is matched first with a shortest-arc rotation; twist is
//! then matched by a rotation about the already-matched swing axis, which
//! leaves the swing direction untouched.

use glam::{Quat, Vec3};

use crate::rig::RigItem;
use crate::skeleton::{JointIndex, Pose};

/// Below this squared length a projected twist vector carries no usable roll.
const DEGENERATE_EPSILON: f32 = 1e-10;

/// World-space swing and twist directions of a joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Directions {
    pub swing: Vec3,
    pub twist: Vec3,
}

impl Directions {
    /// Directions of `item` under `world_rotation`.
    #[inline]
    #[must_use]
    pub fn from_rotation(world_rotation: Quat, item: &RigItem) -> Self {
        Self {
            swing: world_rotation * item.swing,
            twist: world_rotation * item.twist,
        }
    }

    /// Directions of `item` in the current state of `pose`.
    #[must_use]
    pub fn sample(pose: &Pose, item: &RigItem) -> Self {
        Self::from_rotation(pose.world_of(item.joint).rotation, item)
    }

    /// Normalized linear interpolation of both directions.
    ///
    /// `t <= 0` and `t >= 1` return the endpoints bit-exactly.
    #[must_use]
    pub fn interpolate(start: Self, end: Self, t: f32) -> Self {
        if t <= 0.0 {
            return start;
        }
        if t >= 1.0 {
            return end;
        }
        Self {
            swing: nlerp(start.swing, end.swing, t),
            twist: nlerp(start.twist, end.twist, t),
        }
    }
}

/// Falls back to `start` when the endpoints are opposite and the midpoint vanishes.
#[inline]
fn nlerp(start: Vec3, end: Vec3, t: f32) -> Vec3 {
    start.lerp(end, t).normalize_or(start)
}

/// Rotates `rotation` so that `local_swing` points along `target_swing`.
#[must_use]
pub fn align_swing(rotation: Quat, local_swing: Vec3, target_swing: Vec3) -> Quat {
    let current = (rotation * local_swing).normalize();
    let arc = Quat::from_rotation_arc(current, target_swing.normalize());
    (arc * rotation).normalize()
}

/// Rotates `rotation` about `swing_axis` so that `local_twist`, projected onto
/// the plane orthogonal to the axis, lines up with `target_twist`.
#[must_use]
pub fn align_twist(rotation: Quat, local_twist: Vec3, swing_axis: Vec3, target_twist: Vec3) -> Quat {
    let axis = swing_axis.normalize();
    let current = rotation * local_twist;

    let from = current - axis * current.dot(axis);
    let to = target_twist - axis * target_twist.dot(axis);
    if from.length_squared() < DEGENERATE_EPSILON || to.length_squared() < DEGENERATE_EPSILON {
        return rotation;
    }

    let angle = axis.dot(from.cross(to)).atan2(from.dot(to));
    (Quat::from_axis_angle(axis, angle) * rotation).normalize()
}

/// Swing then twist: the world rotation that carries `item`'s bind-frame
/// directions onto `target`, starting from `neutral`.
#[must_use]
pub fn match_directions(neutral: Quat, item: &RigItem, target: Directions) -> Quat {
    let swung = align_swing(neutral, item.swing, target.swing);
    align_twist(swung, item.twist, target.swing, target.twist)
}

/// Solves one target joint against world directions and writes the result as
/// a parent-relative rotation.
///
/// The neutral orientation is the joint's bind-local rotation placed under its
/// parent's *current* world rotation, so already-solved ancestors are honored.
pub fn solve_joint(pose: &mut Pose, item: &RigItem, target: Directions) {
    let parent_rotation = parent_world_rotation(pose, item.parent);
    let bind_local = pose.skeleton().joint(item.joint).local_bind.rotation;
    let neutral = parent_rotation * bind_local;

    let world = match_directions(neutral, item, target);
    let local = (parent_rotation.inverse() * world).normalize();
    pose.set_local_rotation(item.joint, local);
}

#[inline]
fn parent_world_rotation(pose: &Pose, parent: Option<JointIndex>) -> Quat {
    parent.map_or(Quat::IDENTITY, |p| pose.world_of(p).rotation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPSILON: f32 = 1e-4;

    fn same_direction(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    fn rotation_error(a: Quat, b: Quat) -> f32 {
        let delta = a.inverse() * b;
        2.0 * delta.xyz().length().atan2(delta.w.abs())
    }

    fn item(swing: Vec3, twist: Vec3) -> RigItem {
        RigItem {
            joint: 0,
            parent: None,
            swing,
            twist,
        }
    }

    #[test]
    fn swing_is_matched_before_twist() {
        let rig_item = item(Vec3::Z, Vec3::Y);
        let source = Quat::from_euler(glam::EulerRot::XYZ, 0.7, -1.1, 2.3);
        let target = Directions::from_rotation(source, &rig_item);
        let neutral = Quat::from_rotation_x(0.4);

        let swung = align_swing(neutral, rig_item.swing, target.swing);
        assert!(same_direction(swung * rig_item.swing, target.swing));

        let twisted = align_twist(swung, rig_item.twist, target.swing, target.twist);
        assert!(same_direction(twisted * rig_item.swing, target.swing));
        assert!(same_direction(twisted * rig_item.twist, target.twist));
    }

    #[test]
    fn opposite_twist_resolves_about_swing_axis() {
        let rig_item = item(Vec3::X, Vec3::Y);
        let target = Directions {
            swing: Vec3::X,
            twist: Vec3::NEG_Y,
        };

        let solved = match_directions(Quat::IDENTITY, &rig_item, target);
        assert!(same_direction(solved * Vec3::X, Vec3::X));
        assert!(same_direction(solved * Vec3::Y, Vec3::NEG_Y));
        assert!(rotation_error(solved, Quat::from_rotation_x(PI)) < 1e-3);
    }

    #[test]
    fn full_match_recovers_source_rotation() {
        let rig_item = item(Vec3::Z, Vec3::Y);
        for &(x, y, z) in &[(0.0, 0.0, 0.0), (FRAC_PI_2, 0.0, 0.0), (0.3, 1.9, -0.8), (-2.5, 0.4, 1.0)] {
            let source = Quat::from_euler(glam::EulerRot::XYZ, x, y, z);
            let solved = match_directions(Quat::IDENTITY, &rig_item, Directions::from_rotation(source, &rig_item));
            assert!(rotation_error(solved, source) < 1e-3, "({x}, {y}, {z})");
        }
    }

    #[test]
    fn interpolate_returns_exact_endpoints() {
        let a = Directions {
            swing: Vec3::new(0.6, 0.8, 0.0),
            twist: Vec3::Z,
        };
        let b = Directions {
            swing: Vec3::X,
            twist: Vec3::NEG_Y,
        };
        assert_eq!(Directions::interpolate(a, b, 0.0), a);
        assert_eq!(Directions::interpolate(a, b, 1.0), b);

        let mid = Directions::interpolate(a, b, 0.5);
        assert!((mid.swing.length() - 1.0).abs() < EPSILON);
        assert!((mid.twist.length() - 1.0).abs() < EPSILON);
    }
}
