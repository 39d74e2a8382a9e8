use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::animation::binder::Binder;
use crate::animation::binding::{JointBinding, TargetPath};
use crate::animation::clip::{AnimationClip, TrackData};
use crate::animation::tracks::KeyframeCursor;
use crate::skeleton::{Pose, Skeleton};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopMode {
    Once,
    Loop,
    PingPong,
}

/// Plays one clip against one skeleton.
///
/// The player owns the playback clock and the per-track cursors; it writes
/// sampled local transforms into a [`Pose`] on request.
#[derive(Debug, Clone)]
pub struct ClipPlayer {
    clip: Arc<AnimationClip>,

    pub time: f32,
    pub time_scale: f32,
    pub loop_mode: LoopMode,
    pub paused: bool,

    bindings: Vec<JointBinding>,
    cursors: Vec<KeyframeCursor>,
}

impl ClipPlayer {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>, skeleton: &Skeleton) -> Self {
        let bindings = Binder::bind(skeleton, &clip);
        let cursors = vec![KeyframeCursor::default(); clip.tracks.len()];
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            loop_mode: LoopMode::Loop,
            paused: false,
            bindings,
            cursors,
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[must_use]
    pub fn bindings(&self) -> &[JointBinding] {
        &self.bindings
    }

    /// Advances the clock by `dt` seconds, honoring `time_scale` and `loop_mode`.
    pub fn advance(&mut self, dt: f32) {
        if self.paused {
            return;
        }

        let duration = self.clip.duration;
        if duration <= 0.0 {
            return;
        }

        self.time += dt * self.time_scale;

        match self.loop_mode {
            LoopMode::Once => {
                if self.time >= duration {
                    self.time = duration;
                    self.paused = true;
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    self.paused = true;
                }
            }
            LoopMode::Loop => {
                self.time = self.time.rem_euclid(duration);
            }
            LoopMode::PingPong => {
                let cycle = self.time.rem_euclid(duration * 2.0);
                self.time = if cycle > duration { duration * 2.0 - cycle } else { cycle };
            }
        }
    }

    /// Moves the clock to an absolute time in `[0, duration]` without wrapping.
    pub fn seek(&mut self, time: f32) {
        self.time = time.clamp(0.0, self.clip.duration.max(0.0));
    }

    /// Writes the clip's values at the current time into `pose`.
    ///
    /// Joints without tracks keep whatever values `pose` already holds.
    pub fn apply(&mut self, pose: &mut Pose) {
        let time = self.time;
        for binding in &self.bindings {
            let track = &self.clip.tracks[binding.track_index];
            let cursor = &mut self.cursors[binding.track_index];

            match (&track.data, binding.target) {
                (TrackData::Quaternion(t), TargetPath::Rotation) => {
                    pose.set_local_rotation(binding.joint, t.sample_with_cursor(time, cursor).normalize());
                }
                (TrackData::Vector3(t), TargetPath::Translation) => {
                    pose.set_local_position(binding.joint, t.sample_with_cursor(time, cursor));
                }
                _ => {
                    log::trace!(
                        "Track {} of '{}' has mismatched data for {:?}",
                        binding.track_index,
                        self.clip.name,
                        binding.target
                    );
                }
            }
        }
    }
}
