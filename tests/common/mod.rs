//! Shared fixtures: a small Mixamo-style humanoid and a walk-like clip.

#![allow(dead_code)]

use std::sync::Arc;

use glam::{EulerRot, Quat, Vec3};
use myth_retarget::animation::{AnimationClip, InterpolationMode, KeyframeTrack, Track};
use myth_retarget::skeleton::{JointDesc, Skeleton, Transform};

pub const EPSILON: f32 = 1e-4;

/// Routes `log` output through the test harness; `RUST_LOG=debug` shows it.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

/// Angle of the rotation carrying `a` onto `b`, robust near zero.
pub fn rotation_error(a: Quat, b: Quat) -> f32 {
    let delta = a.inverse() * b;
    2.0 * delta.xyz().length().atan2(delta.w.abs())
}

/// Humanoid layout parameters.
pub struct HumanoidLayout<'a> {
    pub prefix: &'a str,
    /// Uniform scale; the hips sit at `(0, scale, 0)`.
    pub scale: f32,
    /// Number of spine joints (`Spine`, `Spine1`, ...).
    pub spine_len: usize,
    /// Local bind rotation per unprefixed joint name.
    pub bind_rotation: fn(&str) -> Quat,
}

impl Default for HumanoidLayout<'_> {
    fn default() -> Self {
        Self {
            prefix: "",
            scale: 1.0,
            spine_len: 3,
            bind_rotation: |_| Quat::IDENTITY,
        }
    }
}

/// Mixamo-named humanoid with identity bind rotations.
pub fn humanoid(prefix: &str, scale: f32) -> Arc<Skeleton> {
    build_humanoid(&HumanoidLayout {
        prefix,
        scale,
        ..Default::default()
    })
}

pub fn build_humanoid(layout: &HumanoidLayout<'_>) -> Arc<Skeleton> {
    let s = layout.scale;
    let mut bones: Vec<(String, Option<String>, Vec3)> = Vec::new();
    let mut push = |name: &str, parent: Option<&str>, offset: Vec3| {
        bones.push((name.to_owned(), parent.map(str::to_owned), offset * s));
    };

    push("Root", None, Vec3::ZERO);
    push("Hips", Some("Root"), Vec3::Y);

    let spine_names: Vec<String> = (0..layout.spine_len)
        .map(|i| if i == 0 { "Spine".to_owned() } else { format!("Spine{i}") })
        .collect();
    let mut parent = "Hips".to_owned();
    for name in &spine_names {
        push(name.as_str(), Some(parent.as_str()), Vec3::new(0.0, 0.3 / layout.spine_len as f32, 0.0));
        parent.clone_from(name);
    }
    let chest = parent;

    push("Neck", Some(chest.as_str()), Vec3::new(0.0, 0.15, 0.0));
    push("Head", Some("Neck"), Vec3::new(0.0, 0.1, 0.0));

    for (side, sign) in [("Left", 1.0), ("Right", -1.0)] {
        let bone = |name: &str| format!("{side}{name}");

        push(&bone("Shoulder"), Some(chest.as_str()), Vec3::new(0.05 * sign, 0.1, 0.0));
        push(&bone("Arm"), Some(bone("Shoulder").as_str()), Vec3::new(0.1 * sign, 0.0, 0.0));
        push(&bone("ForeArm"), Some(bone("Arm").as_str()), Vec3::new(0.25 * sign, 0.0, 0.0));
        push(&bone("Hand"), Some(bone("ForeArm").as_str()), Vec3::new(0.25 * sign, 0.0, 0.0));
        push(&bone("HandIndex1"), Some(bone("Hand").as_str()), Vec3::new(0.08 * sign, 0.0, 0.0));
        push(&bone("HandIndex2"), Some(bone("HandIndex1").as_str()), Vec3::new(0.03 * sign, 0.0, 0.0));
        push(&bone("HandIndex3"), Some(bone("HandIndex2").as_str()), Vec3::new(0.02 * sign, 0.0, 0.0));

        push(&bone("UpLeg"), Some("Hips"), Vec3::new(0.1 * sign, -0.05, 0.0));
        push(&bone("Leg"), Some(bone("UpLeg").as_str()), Vec3::new(0.0, -0.45, 0.0));
        push(&bone("Foot"), Some(bone("Leg").as_str()), Vec3::new(0.0, -0.45, 0.0));
        push(&bone("ToeBase"), Some(bone("Foot").as_str()), Vec3::new(0.0, -0.05, 0.1));
    }

    let index_of = |name: &str| bones.iter().position(|(n, _, _)| n == name);
    let descs = bones
        .iter()
        .map(|(name, parent, offset)| {
            let parent = parent.as_deref().and_then(index_of);
            let local = Transform::new(*offset, (layout.bind_rotation)(name));
            JointDesc::new(format!("{}{name}", layout.prefix), parent, local)
        })
        .collect();

    Arc::new(Skeleton::new(format!("{}humanoid", layout.prefix), descs).unwrap())
}

fn euler(x: f32, y: f32, z: f32) -> Quat {
    Quat::from_euler(EulerRot::XYZ, x, y, z)
}

fn rotation_track(joint: String, keys: &[Quat]) -> Track {
    let times = (0..keys.len())
        .map(|i| i as f32 / (keys.len() - 1) as f32)
        .collect();
    Track::rotation(
        joint,
        KeyframeTrack::new(times, keys.to_vec(), InterpolationMode::Linear).unwrap(),
    )
}

/// One-second walk-like clip for a [`humanoid`] with the given prefix and scale.
///
/// Only the first spine joint is animated so that the spine's end joints agree.
pub fn walk_clip(prefix: &str, scale: f32) -> AnimationClip {
    let name = |bone: &str| format!("{prefix}{bone}");
    let hips = Vec3::new(0.0, scale, 0.0);

    let tracks = vec![
        Track::translation(
            name("Hips"),
            KeyframeTrack::new(
                vec![0.0, 0.5, 1.0],
                vec![
                    hips,
                    hips + Vec3::new(0.05, -0.04, 0.4) * scale,
                    hips + Vec3::new(0.0, 0.0, 0.8) * scale,
                ],
                InterpolationMode::Linear,
            )
            .unwrap(),
        ),
        rotation_track(
            name("Hips"),
            &[Quat::IDENTITY, euler(0.05, 0.2, 0.0), euler(0.0, -0.1, 0.02)],
        ),
        rotation_track(name("Spine"), &[euler(0.1, 0.0, 0.0), euler(0.15, 0.1, -0.05), euler(0.1, 0.0, 0.0)]),
        rotation_track(name("Neck"), &[Quat::IDENTITY, euler(-0.1, 0.3, 0.0), Quat::IDENTITY]),
        rotation_track(name("Head"), &[euler(0.0, 0.0, 0.1), euler(0.2, -0.2, 0.0), euler(0.0, 0.0, 0.1)]),
        rotation_track(name("LeftArm"), &[euler(0.0, 0.0, -1.2), euler(0.4, 0.2, -1.1), euler(0.0, 0.0, -1.2)]),
        rotation_track(name("LeftForeArm"), &[euler(0.0, -0.3, 0.0), euler(0.5, -0.8, 0.0), euler(0.0, -0.3, 0.0)]),
        rotation_track(name("RightArm"), &[euler(0.0, 0.0, 1.2), euler(-0.4, -0.2, 1.1), euler(0.0, 0.0, 1.2)]),
        rotation_track(name("RightHand"), &[Quat::IDENTITY, euler(0.3, 0.0, 0.4), Quat::IDENTITY]),
        rotation_track(name("LeftUpLeg"), &[euler(-0.4, 0.0, 0.0), euler(0.4, 0.1, 0.0), euler(-0.4, 0.0, 0.0)]),
        rotation_track(name("LeftLeg"), &[euler(0.6, 0.0, 0.0), euler(0.1, 0.0, 0.0), euler(0.6, 0.0, 0.0)]),
        rotation_track(name("RightUpLeg"), &[euler(0.4, 0.0, 0.0), euler(-0.4, -0.1, 0.0), euler(0.4, 0.0, 0.0)]),
        rotation_track(name("RightFoot"), &[Quat::IDENTITY, euler(-0.3, 0.0, 0.1), Quat::IDENTITY]),
        rotation_track(name("LeftHandIndex1"), &[Quat::IDENTITY, euler(0.0, 0.0, -0.6), Quat::IDENTITY]),
        rotation_track(name("LeftHandIndex2"), &[Quat::IDENTITY, euler(0.0, 0.0, -0.8), Quat::IDENTITY]),
    ];

    AnimationClip::new("walk", tracks)
}
