//! Retargeting & Baking Settings
//!
//! Plain configuration structs with sensible defaults. Both serialize with
//! serde so tools can persist them next to chain configurations.
//!
//! ```rust,ignore
//! use myth_retarget::settings::{BakeSettings, RetargetSettings};
//!
//! let settings = RetargetSettings {
//!     bake: BakeSettings { fps: 60.0, ..Default::default() },
//!     ..Default::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

use crate::animation::LoopMode;

/// Joint-name substring that marks root-motion joints by default.
pub const DEFAULT_ROOT_MOTION_PATTERN: &str = "hips";

/// Keyframe baking parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeSettings {
    /// Samples per second.
    pub fps: f32,
    /// Case-insensitive substrings; joints whose name contains one of them get
    /// a position track in addition to their rotation track.
    pub root_motion_patterns: Vec<String>,
    /// Name of the baked clip. Defaults to the source clip's name.
    pub clip_name: Option<String>,
}

impl Default for BakeSettings {
    fn default() -> Self {
        Self {
            fps: 30.0,
            root_motion_patterns: vec![DEFAULT_ROOT_MOTION_PATTERN.to_owned()],
            clip_name: None,
        }
    }
}

impl BakeSettings {
    #[must_use]
    pub fn with_fps(fps: f32) -> Self {
        Self {
            fps,
            ..Default::default()
        }
    }

    /// Whether `joint_name` carries root motion.
    #[must_use]
    pub fn is_root_motion(&self, joint_name: &str) -> bool {
        let name = joint_name.to_lowercase();
        self.root_motion_patterns
            .iter()
            .any(|pattern| !pattern.is_empty() && name.contains(&pattern.to_lowercase()))
    }
}

/// Session-wide playback and baking parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetargetSettings {
    /// Loop mode of the source clip during live `update` playback.
    pub loop_mode: LoopMode,
    /// Playback speed multiplier for live `update` playback.
    pub time_scale: f32,
    pub bake: BakeSettings,
}

impl Default for RetargetSettings {
    fn default() -> Self {
        Self {
            loop_mode: LoopMode::Loop,
            time_scale: 1.0,
            bake: BakeSettings::default(),
        }
    }
}
