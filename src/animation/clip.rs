use glam::{Quat, Vec3};

use crate::animation::binding::TargetPath;
use crate::animation::tracks::KeyframeTrack;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMeta {
    pub joint_name: String,
    pub target: TargetPath,
}

#[derive(Debug, Clone)]
pub enum TrackData {
    Vector3(KeyframeTrack<Vec3>),
    Quaternion(KeyframeTrack<Quat>),
}

impl TrackData {
    #[must_use]
    pub fn times(&self) -> &[f32] {
        match self {
            TrackData::Vector3(t) => t.times(),
            TrackData::Quaternion(t) => t.times(),
        }
    }

    #[must_use]
    pub fn end_time(&self) -> f32 {
        match self {
            TrackData::Vector3(t) => t.end_time(),
            TrackData::Quaternion(t) => t.end_time(),
        }
    }
}

/// A keyframe track addressed by joint name.
#[derive(Debug, Clone)]
pub struct Track {
    pub meta: TrackMeta,
    pub data: TrackData,
}

impl Track {
    #[must_use]
    pub fn rotation(joint_name: impl Into<String>, track: KeyframeTrack<Quat>) -> Self {
        Self {
            meta: TrackMeta {
                joint_name: joint_name.into(),
                target: TargetPath::Rotation,
            },
            data: TrackData::Quaternion(track),
        }
    }

    #[must_use]
    pub fn translation(joint_name: impl Into<String>, track: KeyframeTrack<Vec3>) -> Self {
        Self {
            meta: TrackMeta {
                joint_name: joint_name.into(),
                target: TargetPath::Translation,
            },
            data: TrackData::Vector3(track),
        }
    }

    /// Scalar components per key: 4 for rotations, 3 for positions.
    #[must_use]
    pub fn components(&self) -> usize {
        match &self.data {
            TrackData::Vector3(_) => 3,
            TrackData::Quaternion(_) => 4,
        }
    }

    /// Key values flattened for export.
    #[must_use]
    pub fn flat_values(&self) -> Vec<f32> {
        match &self.data {
            TrackData::Vector3(t) => t.flat_values(),
            TrackData::Quaternion(t) => t.flat_values(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    /// Creates a clip whose duration is the latest key time of any track.
    #[must_use]
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        let duration = tracks
            .iter()
            .map(|t| t.data.end_time())
            .fold(0.0_f32, f32::max);
        Self::with_duration(name, duration, tracks)
    }

    #[must_use]
    pub fn with_duration(name: impl Into<String>, duration: f32, tracks: Vec<Track>) -> Self {
        Self {
            name: name.into(),
            duration,
            tracks,
        }
    }

    /// Finds the track animating `target` on `joint_name`.
    #[must_use]
    pub fn find_track(&self, joint_name: &str, target: TargetPath) -> Option<&Track> {
        self.tracks
            .iter()
            .find(|t| t.meta.joint_name == joint_name && t.meta.target == target)
    }
}
