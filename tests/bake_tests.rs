//! Keyframe baking tests
//!
//! Tests for:
//! - Frame-index based sample times
//! - Track coverage (rotation for solved joints, position for root motion)
//! - Determinism and playback-state restoration
//! - Degenerate inputs

mod common;

use std::sync::Arc;

use myth_retarget::prelude::*;
use myth_retarget::retarget::sample_times;

use common::{humanoid, init_logging, rotation_error, vec3_approx, walk_clip};

// ============================================================================
// Helper
// ============================================================================

fn walk_retargeter(target_scale: f32) -> Retargeter {
    let session = RetargetSession::new(
        humanoid("", 1.0),
        humanoid("", target_scale),
        &ChainMapping::Template(ChainConfig::mixamo_with_prefix("")),
    );
    session.retargeter(Arc::new(walk_clip("", 1.0)))
}

// ============================================================================
// Sample times
// ============================================================================

#[test]
fn one_second_at_30_fps_has_31_frames() {
    let times = sample_times(1.0, 30.0).unwrap();
    assert_eq!(times.len(), 31);
    assert_eq!(times[0], 0.0);
    assert_eq!(*times.last().unwrap(), 1.0);
    assert!(times.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn partial_last_frame_is_clamped_to_duration() {
    let times = sample_times(1.01, 30.0).unwrap();
    assert_eq!(times.len(), 32);
    assert_eq!(*times.last().unwrap(), 1.01);
    assert!(times[30] < 1.01);
}

#[test]
fn zero_duration_has_single_frame() {
    assert_eq!(sample_times(0.0, 24.0).unwrap(), vec![0.0]);
}

#[test]
fn invalid_frame_rate_is_rejected() {
    for fps in [0.0, -30.0, f32::NAN, f32::INFINITY] {
        assert!(matches!(sample_times(1.0, fps), Err(RetargetError::InvalidFrameRate(_))));
    }

    let mut retargeter = walk_retargeter(1.0);
    assert!(retargeter.bake(0.0).is_err());
}

// ============================================================================
// Track coverage
// ============================================================================

#[test]
fn bake_emits_tracks_for_solved_joints() {
    let mut retargeter = walk_retargeter(1.0);
    let clip = retargeter.bake(30.0).unwrap();

    assert_eq!(clip.name, "walk");
    assert_eq!(clip.duration, 1.0);

    let hips_rotation = clip.find_track("Hips", TargetPath::Rotation).unwrap();
    assert_eq!(hips_rotation.data.times().len(), 31);
    assert!(clip.find_track("Hips", TargetPath::Translation).is_some());

    assert!(clip.find_track("Spine", TargetPath::Rotation).is_some());
    assert!(clip.find_track("Spine", TargetPath::Translation).is_none());
    assert!(clip.find_track("LeftHandIndex3", TargetPath::Rotation).is_some());

    // No chain reaches the root
    assert!(clip.find_track("Root", TargetPath::Rotation).is_none());

    let rotation_tracks = clip
        .tracks
        .iter()
        .filter(|t| t.meta.target == TargetPath::Rotation)
        .count();
    let covered: usize = ChainRole::ALL
        .iter()
        .map(|&role| retargeter.target().chain(role).len())
        .sum();
    assert_eq!(rotation_tracks, covered);
}

#[test]
fn baked_clip_replays_the_retargeted_pose() {
    let mut retargeter = walk_retargeter(1.5);
    let baked = Arc::new(retargeter.bake(30.0).unwrap());
    let times = sample_times(1.0, 30.0).unwrap();

    let skeleton = retargeter.target().skeleton().clone();
    let mut player = ClipPlayer::new(baked, &skeleton);
    let mut replay = Pose::bind(skeleton.clone());

    for &frame in &[0usize, 7, 15, 30] {
        retargeter.set_time(times[frame]);
        player.seek(times[frame]);
        replay.reset_to(retargeter.target().bind_pose());
        player.apply(&mut replay);

        for joint in 0..skeleton.len() {
            let error = rotation_error(replay.local_rotation(joint), retargeter.pose().local_rotation(joint));
            assert!(error < 1e-4, "{} frame {frame}", skeleton.name_of(joint));
            assert!(vec3_approx(replay.local_position(joint), retargeter.pose().local_position(joint)));
        }
    }
}

#[test]
fn root_motion_patterns_are_configurable() {
    let mut retargeter = walk_retargeter(1.0);
    let settings = BakeSettings {
        root_motion_patterns: vec!["SPINE".to_owned()],
        clip_name: Some("walk_retargeted".to_owned()),
        ..BakeSettings::with_fps(10.0)
    };
    let clip = retargeter.bake_with(&settings).unwrap();

    assert_eq!(clip.name, "walk_retargeted");
    assert!(clip.find_track("Hips", TargetPath::Translation).is_none());
    assert!(clip.find_track("Spine", TargetPath::Translation).is_some());
    assert!(clip.find_track("Spine2", TargetPath::Translation).is_some());
    assert_eq!(clip.find_track("Spine", TargetPath::Rotation).unwrap().data.times().len(), 11);
}

#[test]
fn layer_touched_joints_are_baked() {
    let mut retargeter = walk_retargeter(1.0);
    let root = retargeter.target().skeleton().find("Root").unwrap();
    retargeter.add_layer(RotationOffsetLayer::new(root, glam::Quat::from_rotation_y(0.3)));

    let clip = retargeter.bake(30.0).unwrap();
    assert!(clip.find_track("Root", TargetPath::Rotation).is_some());
    assert!(clip.find_track("Root", TargetPath::Translation).is_none());
}

// ============================================================================
// Determinism & state
// ============================================================================

#[test]
fn bake_is_deterministic() {
    let first = walk_retargeter(1.2).bake(24.0).unwrap();
    let second = walk_retargeter(1.2).bake(24.0).unwrap();

    assert_eq!(first.tracks.len(), second.tracks.len());
    for (a, b) in first.tracks.iter().zip(&second.tracks) {
        assert_eq!(a.meta, b.meta);
        assert_eq!(a.data.times(), b.data.times());
        assert_eq!(a.flat_values(), b.flat_values());
    }
}

#[test]
fn bake_restores_playback_time() {
    let mut retargeter = walk_retargeter(1.0);
    retargeter.set_time(0.4);
    let before = retargeter.pose().clone();

    retargeter.bake(30.0).unwrap();

    assert!((retargeter.time() - 0.4).abs() < 1e-6);
    for joint in 0..before.len() {
        assert_eq!(retargeter.pose().local(joint), before.local(joint));
    }
}

// ============================================================================
// Degenerate inputs
// ============================================================================

#[test]
fn bake_without_chains_is_empty() {
    init_logging();
    let session = RetargetSession::new(
        humanoid("", 1.0),
        humanoid("rig_", 1.0),
        &ChainMapping::Template(ChainConfig::mixamo_with_prefix("")),
    );
    let clip = session.bake(Arc::new(walk_clip("", 1.0))).unwrap();
    assert!(clip.tracks.is_empty());
    assert_eq!(clip.duration, 1.0);
}

#[test]
fn partial_mapping_bakes_only_mapped_chains() {
    init_logging();
    let target = humanoid("rig_", 1.0);
    let bones: BoneMap = [
        ("rig_Hips", "Hips"),
        ("rig_LeftShoulder", "LeftShoulder"),
        ("rig_LeftArm", "LeftArm"),
        ("rig_LeftForeArm", "LeftForeArm"),
        ("rig_LeftHand", "LeftHand"),
    ]
    .into_iter()
    .collect();
    let session = RetargetSession::new(
        humanoid("", 1.0),
        target.clone(),
        &ChainMapping::Custom {
            reference: ChainConfig::mixamo_with_prefix(""),
            bones,
        },
    );

    let baked = Arc::new(session.bake(Arc::new(walk_clip("", 1.0))).unwrap());
    let mut keys: Vec<_> = baked
        .tracks
        .iter()
        .map(|t| (t.meta.joint_name.as_str(), t.meta.target == TargetPath::Rotation))
        .collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        [
            ("rig_Hips", false),
            ("rig_Hips", true),
            ("rig_LeftArm", true),
            ("rig_LeftForeArm", true),
            ("rig_LeftHand", true),
            ("rig_LeftShoulder", true),
        ]
    );

    let bind = Pose::bind(target.clone());
    let mut player = ClipPlayer::new(baked, &target);
    let mut replay = Pose::bind(target.clone());
    for time in sample_times(1.0, 30.0).unwrap() {
        player.seek(time);
        replay.reset_to(&bind);
        player.apply(&mut replay);

        for name in ["rig_Spine", "rig_Head", "rig_RightArm", "rig_LeftUpLeg", "rig_Root"] {
            let joint = target.find(name).unwrap();
            assert_eq!(replay.local(joint), bind.local(joint), "{name} at {time}");
        }
    }
}

#[test]
fn session_bake_uses_session_settings() -> anyhow::Result<()> {
    init_logging();
    let mut settings = RetargetSettings::default();
    settings.bake.fps = 5.0;
    let session = RetargetSession::new(
        humanoid("", 1.0),
        humanoid("", 1.0),
        &ChainMapping::Template(ChainConfig::mixamo_with_prefix("")),
    )
    .with_settings(settings);

    let clip = session.bake(Arc::new(walk_clip("", 1.0)))?;
    let hips = clip
        .find_track("Hips", TargetPath::Rotation)
        .ok_or_else(|| anyhow::anyhow!("missing hips rotation track"))?;
    assert_eq!(hips.data.times().len(), 6);
    Ok(())
}
