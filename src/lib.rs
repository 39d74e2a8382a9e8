#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod errors;
pub mod retarget;
pub mod rig;
pub mod settings;
pub mod skeleton;

pub use animation::{AnimationClip, ClipPlayer, KeyframeTrack, LoopMode, Track};
pub use errors::{Result, RetargetError};
pub use retarget::{ChainMapping, RetargetSession, Retargeter};
pub use rig::{BoneMap, ChainConfig, ChainRole, Rig};
pub use settings::{BakeSettings, RetargetSettings};
pub use skeleton::{JointDesc, Pose, Skeleton, Transform};

pub mod prelude {
    pub use crate::animation::{
        AnimationClip, ClipPlayer, InterpolationMode, KeyframeTrack, LoopMode, TargetPath, Track, TrackData,
    };
    pub use crate::errors::{Result, RetargetError};
    pub use crate::retarget::{
        AdditiveLayer, ChainMapping, RetargetSession, RetargetStep, Retargeter, RotationOffsetLayer,
    };
    pub use crate::rig::{BoneMap, ChainConfig, ChainDefinition, ChainRole, Rig, RigItem};
    pub use crate::settings::{BakeSettings, RetargetSettings};
    pub use crate::skeleton::{JointDesc, JointIndex, Pose, Skeleton, Transform};
}
