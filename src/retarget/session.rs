use std::sync::Arc;

use crate::animation::AnimationClip;
use crate::errors::Result;
use crate::retarget::retargeter::Retargeter;
use crate::rig::{BoneMap, ChainConfig, Rig};
use crate::settings::RetargetSettings;
use crate::skeleton::Skeleton;

/// How the chain configurations of a session are obtained.
#[derive(Debug, Clone)]
pub enum ChainMapping {
    /// Both skeletons follow the same known naming scheme.
    Template(ChainConfig),
    /// The source follows `reference`; the target is reached through `bones`.
    Custom { reference: ChainConfig, bones: BoneMap },
}

impl ChainMapping {
    /// Resolves the `(source, target)` configuration pair.
    #[must_use]
    pub fn resolve(&self) -> (ChainConfig, ChainConfig) {
        match self {
            ChainMapping::Template(config) => (config.clone(), config.clone()),
            ChainMapping::Custom { reference, bones } => reference.derive_custom(bones),
        }
    }
}

/// Caller-owned context for retargeting between one skeleton pair.
///
/// The mapping is resolved once at construction. A session can build any
/// number of retargeters, e.g. to batch-convert many clips; sessions share no
/// state with each other.
#[derive(Debug, Clone)]
pub struct RetargetSession {
    source: Arc<Skeleton>,
    target: Arc<Skeleton>,
    source_config: ChainConfig,
    target_config: ChainConfig,
    pub settings: RetargetSettings,
}

impl RetargetSession {
    #[must_use]
    pub fn new(source: Arc<Skeleton>, target: Arc<Skeleton>, mapping: &ChainMapping) -> Self {
        let (source_config, target_config) = mapping.resolve();
        Self {
            source,
            target,
            source_config,
            target_config,
            settings: RetargetSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: RetargetSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn source_skeleton(&self) -> &Arc<Skeleton> {
        &self.source
    }

    #[must_use]
    pub fn target_skeleton(&self) -> &Arc<Skeleton> {
        &self.target
    }

    #[must_use]
    pub fn source_config(&self) -> &ChainConfig {
        &self.source_config
    }

    #[must_use]
    pub fn target_config(&self) -> &ChainConfig {
        &self.target_config
    }

    /// Builds the `(source, target)` rigs.
    #[must_use]
    pub fn build_rigs(&self) -> (Rig, Rig) {
        (
            Rig::from_config(Arc::clone(&self.source), &self.source_config),
            Rig::from_config(Arc::clone(&self.target), &self.target_config),
        )
    }

    /// Creates a retargeter playing `clip` with the session's playback settings.
    #[must_use]
    pub fn retargeter(&self, clip: Arc<AnimationClip>) -> Retargeter {
        let (source, target) = self.build_rigs();
        Retargeter::new(source, target, clip).with_settings(&self.settings)
    }

    /// Retargets and bakes `clip` with the session's bake settings.
    pub fn bake(&self, clip: Arc<AnimationClip>) -> Result<AnimationClip> {
        self.retargeter(clip).bake_with(&self.settings.bake)
    }
}
