//! Chain Configuration
//!
//! A [`ChainConfig`] lists, for every [`ChainRole`], the ordered joint names of
//! one skeleton together with the reference swing/twist axes of that role.
//!
//! Two kinds of configuration exist:
//!
//! - **Templates** describe a well-known rig naming scheme. [`ChainConfig::mixamo`]
//!   is the built-in reference template.
//! - **Custom** pairs are derived from a template and a [`BoneMap`] with
//!   [`ChainConfig::derive_custom`]: the template is used as the source side with
//!   every unmapped slot blanked, and the target side substitutes each retained
//!   source name with the target joint that maps to it.
//!
//! An empty joint name marks a slot with no joint; rig construction skips it.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::rig::bone_map::BoneMap;

/// Anatomical role of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChainRole {
    Pelvis,
    Spine,
    Head,
    ArmL,
    ArmR,
    LegL,
    LegR,
    ThumbL,
    IndexL,
    MiddleL,
    RingL,
    PinkyL,
    ThumbR,
    IndexR,
    MiddleR,
    RingR,
    PinkyR,
}

impl ChainRole {
    /// Every role, in pipeline order.
    pub const ALL: [ChainRole; 17] = [
        ChainRole::Pelvis,
        ChainRole::Spine,
        ChainRole::Head,
        ChainRole::ArmL,
        ChainRole::ArmR,
        ChainRole::LegL,
        ChainRole::LegR,
        ChainRole::ThumbL,
        ChainRole::IndexL,
        ChainRole::MiddleL,
        ChainRole::RingL,
        ChainRole::PinkyL,
        ChainRole::ThumbR,
        ChainRole::IndexR,
        ChainRole::MiddleR,
        ChainRole::RingR,
        ChainRole::PinkyR,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ChainRole::Pelvis => "pelvis",
            ChainRole::Spine => "spine",
            ChainRole::Head => "head",
            ChainRole::ArmL => "armL",
            ChainRole::ArmR => "armR",
            ChainRole::LegL => "legL",
            ChainRole::LegR => "legR",
            ChainRole::ThumbL => "thumbL",
            ChainRole::IndexL => "indexL",
            ChainRole::MiddleL => "middleL",
            ChainRole::RingL => "ringL",
            ChainRole::PinkyL => "pinkyL",
            ChainRole::ThumbR => "thumbR",
            ChainRole::IndexR => "indexR",
            ChainRole::MiddleR => "middleR",
            ChainRole::RingR => "ringR",
            ChainRole::PinkyR => "pinkyR",
        }
    }

    #[must_use]
    pub fn is_finger(self) -> bool {
        matches!(
            self,
            ChainRole::ThumbL
                | ChainRole::IndexL
                | ChainRole::MiddleL
                | ChainRole::RingL
                | ChainRole::PinkyL
                | ChainRole::ThumbR
                | ChainRole::IndexR
                | ChainRole::MiddleR
                | ChainRole::RingR
                | ChainRole::PinkyR
        )
    }

    /// Reference `(swing, twist)` axes of the role.
    ///
    /// These values are part of the configuration format: existing chain
    /// configurations are authored against them.
    #[must_use]
    pub fn default_axes(self) -> (Vec3, Vec3) {
        const THUMB_L_SWING: Vec3 = Vec3::new(0.5, 0.0, 0.866);
        const THUMB_R_SWING: Vec3 = Vec3::new(-0.5, 0.0, 0.866);

        match self {
            ChainRole::Pelvis | ChainRole::Head => (Vec3::Z, Vec3::Y),
            ChainRole::Spine => (Vec3::Y, Vec3::Z),
            ChainRole::ArmL => (Vec3::X, Vec3::NEG_Z),
            ChainRole::ArmR => (Vec3::NEG_X, Vec3::NEG_Z),
            ChainRole::LegL | ChainRole::LegR => (Vec3::Z, Vec3::NEG_Y),
            ChainRole::ThumbL => (THUMB_L_SWING, Vec3::NEG_Y),
            ChainRole::IndexL | ChainRole::MiddleL | ChainRole::RingL | ChainRole::PinkyL => {
                (Vec3::X, Vec3::NEG_Z)
            }
            ChainRole::ThumbR => (THUMB_R_SWING, Vec3::NEG_Y),
            ChainRole::IndexR | ChainRole::MiddleR | ChainRole::RingR | ChainRole::PinkyR => {
                (Vec3::NEG_X, Vec3::NEG_Z)
            }
        }
    }
}

impl fmt::Display for ChainRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Joint names and reference axes of one chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainDefinition {
    pub role: ChainRole,
    /// Proximal to distal. An empty string leaves the slot unmapped.
    pub joints: Vec<String>,
    pub swing: Vec3,
    pub twist: Vec3,
}

impl ChainDefinition {
    /// Creates a definition using the role's default axes.
    #[must_use]
    pub fn new<S: Into<String>>(role: ChainRole, joints: impl IntoIterator<Item = S>) -> Self {
        let (swing, twist) = role.default_axes();
        Self {
            role,
            joints: joints.into_iter().map(Into::into).collect(),
            swing,
            twist,
        }
    }

    /// Number of slots that name a joint.
    #[must_use]
    pub fn mapped_len(&self) -> usize {
        self.joints.iter().filter(|j| !j.is_empty()).count()
    }
}

/// Per-role chain table for one skeleton.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainConfig {
    pub name: String,
    pub chains: Vec<ChainDefinition>,
}

impl ChainConfig {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chains: Vec::new(),
        }
    }

    /// Adds or replaces the chain for `definition.role`.
    #[must_use]
    pub fn with_chain(mut self, definition: ChainDefinition) -> Self {
        self.set_chain(definition);
        self
    }

    pub fn set_chain(&mut self, definition: ChainDefinition) {
        match self.chains.iter_mut().find(|c| c.role == definition.role) {
            Some(existing) => *existing = definition,
            None => self.chains.push(definition),
        }
    }

    #[must_use]
    pub fn chain(&self, role: ChainRole) -> Option<&ChainDefinition> {
        self.chains.iter().find(|c| c.role == role)
    }

    /// Roles with at least one mapped joint.
    pub fn mapped_roles(&self) -> impl Iterator<Item = ChainRole> + '_ {
        self.chains
            .iter()
            .filter(|c| c.mapped_len() > 0)
            .map(|c| c.role)
    }

    /// Mixamo naming with the default `mixamorig:` prefix.
    #[must_use]
    pub fn mixamo() -> Self {
        Self::mixamo_with_prefix("mixamorig:")
    }

    /// Mixamo naming with a custom joint-name prefix (exports vary between
    /// `mixamorig:`, `mixamorig1:` and no prefix at all).
    #[must_use]
    pub fn mixamo_with_prefix(prefix: &str) -> Self {
        let names = |bones: &[&str]| -> Vec<String> {
            bones.iter().map(|b| format!("{prefix}{b}")).collect()
        };
        let finger = |side: &str, finger: &str| -> Vec<String> {
            (1..=3).map(|i| format!("{prefix}{side}Hand{finger}{i}")).collect()
        };

        let mut config = ChainConfig::new("mixamo");
        config.chains = vec![
            ChainDefinition::new(ChainRole::Pelvis, names(&["Hips"])),
            ChainDefinition::new(ChainRole::Spine, names(&["Spine", "Spine1", "Spine2"])),
            ChainDefinition::new(ChainRole::Head, names(&["Neck", "Head"])),
            ChainDefinition::new(
                ChainRole::ArmL,
                names(&["LeftShoulder", "LeftArm", "LeftForeArm", "LeftHand"]),
            ),
            ChainDefinition::new(
                ChainRole::ArmR,
                names(&["RightShoulder", "RightArm", "RightForeArm", "RightHand"]),
            ),
            ChainDefinition::new(
                ChainRole::LegL,
                names(&["LeftUpLeg", "LeftLeg", "LeftFoot", "LeftToeBase"]),
            ),
            ChainDefinition::new(
                ChainRole::LegR,
                names(&["RightUpLeg", "RightLeg", "RightFoot", "RightToeBase"]),
            ),
            ChainDefinition::new(ChainRole::ThumbL, finger("Left", "Thumb")),
            ChainDefinition::new(ChainRole::IndexL, finger("Left", "Index")),
            ChainDefinition::new(ChainRole::MiddleL, finger("Left", "Middle")),
            ChainDefinition::new(ChainRole::RingL, finger("Left", "Ring")),
            ChainDefinition::new(ChainRole::PinkyL, finger("Left", "Pinky")),
            ChainDefinition::new(ChainRole::ThumbR, finger("Right", "Thumb")),
            ChainDefinition::new(ChainRole::IndexR, finger("Right", "Index")),
            ChainDefinition::new(ChainRole::MiddleR, finger("Right", "Middle")),
            ChainDefinition::new(ChainRole::RingR, finger("Right", "Ring")),
            ChainDefinition::new(ChainRole::PinkyR, finger("Right", "Pinky")),
        ];
        config
    }

    // ========================================================================
    // Custom configurations from a correspondence table
    // ========================================================================

    /// Derives the `(source, target)` configuration pair for `bones`, with
    /// `self` describing the source skeleton's naming.
    #[must_use]
    pub fn derive_custom(&self, bones: &BoneMap) -> (ChainConfig, ChainConfig) {
        let source = self.custom_source(bones);
        let target = source.custom_target(bones);
        (source, target)
    }

    /// Clones `self`, blanking every slot whose joint is not a source in `bones`.
    #[must_use]
    pub fn custom_source(&self, bones: &BoneMap) -> ChainConfig {
        if bones.is_empty() {
            log::warn!(
                "Bone correspondence table is empty; custom chains derived from '{}' map no joints",
                self.name
            );
        }

        let mut config = self.clone();
        config.name = format!("{}-custom-source", self.name);
        for chain in &mut config.chains {
            for joint in &mut chain.joints {
                if !joint.is_empty() && !bones.contains_source(joint) {
                    joint.clear();
                }
            }
        }
        config
    }

    /// Clones `self` (a custom source configuration) and replaces every retained
    /// source joint with the target joint mapped to it.
    #[must_use]
    pub fn custom_target(&self, bones: &BoneMap) -> ChainConfig {
        let mut config = self.clone();
        config.name = format!("{}-custom-target", self.name);
        for chain in &mut config.chains {
            for joint in &mut chain.joints {
                if joint.is_empty() {
                    continue;
                }
                if let Some(target) = bones.target_of(joint) {
                    *joint = target.to_owned();
                } else {
                    log::warn!(
                        "Chain '{}': no target joint maps to source joint '{joint}'; slot left unmapped",
                        chain.role
                    );
                    joint.clear();
                }
            }
        }
        config
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
