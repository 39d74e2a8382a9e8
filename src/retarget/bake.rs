//! Keyframe baking.
//!
//! Baking re-drives the retargeter over a fixed logical timeline and records
//! the resulting target pose into keyframe tracks. Sample times are computed
//! from the frame index, never accumulated, so the same inputs always produce
//! bit-identical clips.

use glam::{Quat, Vec3};

use crate::animation::{AnimationClip, InterpolationMode, KeyframeTrack, Track};
use crate::errors::{Result, RetargetError};
use crate::retarget::retargeter::Retargeter;
use crate::settings::BakeSettings;
use crate::skeleton::JointIndex;

/// Sample times of a bake: `ceil(duration * fps) + 1` frames spaced `1 / fps`
/// apart, the last one clamped to exactly `duration`.
pub fn sample_times(duration: f32, fps: f32) -> Result<Vec<f32>> {
    if !(fps.is_finite() && fps > 0.0) {
        return Err(RetargetError::InvalidFrameRate(fps));
    }
    let duration = duration.max(0.0);
    let frame_time = 1.0 / fps;
    let frame_count = (duration * fps).ceil() as usize + 1;

    Ok((0..frame_count)
        .map(|frame| {
            if frame + 1 == frame_count {
                duration
            } else {
                (frame as f32 * frame_time).min(duration)
            }
        })
        .collect())
}

impl Retargeter {
    /// Bakes the retargeted animation at `fps` with default settings.
    pub fn bake(&mut self, fps: f32) -> Result<AnimationClip> {
        self.bake_with(&BakeSettings::with_fps(fps))
    }

    /// Bakes the retargeted animation into a new clip.
    ///
    /// Every target joint written during baking gets a rotation track; those
    /// whose name matches a root-motion pattern also get a position track.
    /// Playback time is restored afterwards.
    pub fn bake_with(&mut self, settings: &BakeSettings) -> Result<AnimationClip> {
        let duration = self.player.clip().duration.max(0.0);
        let times = sample_times(duration, settings.fps)?;
        let clip_name = settings
            .clip_name
            .clone()
            .unwrap_or_else(|| self.player.clip().name.clone());

        let skeleton = std::sync::Arc::clone(self.target.skeleton());
        let joint_count = skeleton.len();
        let root_motion: Vec<JointIndex> = (0..joint_count)
            .filter(|&joint| settings.is_root_motion(skeleton.name_of(joint)))
            .collect();

        let saved_time = self.player.time;
        self.touched.fill(false);

        let mut rotations: Vec<Vec<Quat>> = vec![Vec::with_capacity(times.len()); joint_count];
        let mut positions: Vec<Vec<Vec3>> = vec![Vec::with_capacity(times.len()); root_motion.len()];

        for &time in &times {
            self.set_time(time);
            for (joint, keys) in rotations.iter_mut().enumerate() {
                keys.push(self.pose.local_rotation(joint));
            }
            for (slot, &joint) in root_motion.iter().enumerate() {
                positions[slot].push(self.pose.local_position(joint));
            }
        }

        let mut tracks = Vec::new();
        let mut position_slots = root_motion.iter().copied().zip(positions).peekable();
        for (joint, keys) in rotations.into_iter().enumerate() {
            let covered = self.touched[joint];
            let name = skeleton.name_of(joint);
            if covered {
                tracks.push(Track::rotation(
                    name,
                    KeyframeTrack::new(times.clone(), keys, InterpolationMode::Linear)?,
                ));
            }
            if let Some((_, values)) = position_slots.next_if(|(j, _)| *j == joint) {
                if covered {
                    tracks.push(Track::translation(
                        name,
                        KeyframeTrack::new(times.clone(), values, InterpolationMode::Linear)?,
                    ));
                }
            }
        }

        if tracks.is_empty() {
            log::warn!(
                "Bake of '{clip_name}' produced no tracks; no chain covers skeleton '{}'",
                skeleton.name
            );
        } else {
            log::debug!(
                "Baked '{clip_name}': {} tracks x {} frames at {} fps",
                tracks.len(),
                times.len(),
                settings.fps
            );
        }

        self.set_time(saved_time);
        Ok(AnimationClip::with_duration(clip_name, duration, tracks))
    }
}
