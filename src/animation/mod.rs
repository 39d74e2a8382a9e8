//! Keyframe Animation
//!
//! Source clips are consumed and baked clips are produced through the same
//! types:
//!
//! - [`KeyframeTrack`]: times + values with step, linear or cubic-spline interpolation
//! - [`AnimationClip`]: named tracks addressed by joint name
//! - [`ClipPlayer`]: playback clock that samples a clip into a [`Pose`](crate::skeleton::Pose)

pub mod binder;
pub mod binding;
pub mod clip;
pub mod player;
pub mod tracks;
pub mod values;

pub use binder::Binder;
pub use binding::{JointBinding, TargetPath};
pub use clip::{AnimationClip, Track, TrackData, TrackMeta};
pub use player::{ClipPlayer, LoopMode};
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use values::Interpolatable;
