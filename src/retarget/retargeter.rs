use std::sync::Arc;

use crate::animation::{AnimationClip, ClipPlayer};
use crate::retarget::layer::AdditiveLayer;
use crate::retarget::solver::{self, Directions};
use crate::rig::{ChainRole, Rig};
use crate::settings::RetargetSettings;
use crate::skeleton::Pose;

/// Source scalars closer to zero than this cannot form a translation ratio.
const MIN_SCALAR: f32 = 1e-6;

/// One pass of the per-tick pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetargetStep {
    /// Scaled root-motion translation of the chain's first joint.
    ScaledTranslation(ChainRole),
    /// One-to-one swing/twist matching along the chain.
    Chain(ChainRole),
    /// Swing/twist interpolated between the source chain's end joints.
    EndInterp(ChainRole),
}

impl RetargetStep {
    #[must_use]
    pub fn role(self) -> ChainRole {
        match self {
            RetargetStep::ScaledTranslation(role) | RetargetStep::Chain(role) | RetargetStep::EndInterp(role) => role,
        }
    }

    /// Translation first, then pelvis, spine (end-interpolated), head, limbs
    /// and fingers.
    #[must_use]
    pub fn default_pipeline() -> Vec<RetargetStep> {
        let mut steps = vec![
            RetargetStep::ScaledTranslation(ChainRole::Pelvis),
            RetargetStep::Chain(ChainRole::Pelvis),
            RetargetStep::EndInterp(ChainRole::Spine),
            RetargetStep::Chain(ChainRole::Head),
        ];
        steps.extend(
            ChainRole::ALL
                .into_iter()
                .skip(3)
                .map(RetargetStep::Chain),
        );
        steps
    }
}

/// Drives a target skeleton from a source clip, one tick at a time.
///
/// Every tick samples the source clip into the source pose, resets the target
/// working pose to its bind pose, runs the pipeline steps in order, and finally
/// runs the additive layers. The working pose is then the authoritative output
/// until the next tick.
pub struct Retargeter {
    pub(super) source: Rig,
    pub(super) target: Rig,
    pub(super) player: ClipPlayer,
    pub(super) source_pose: Pose,
    pub(super) pose: Pose,
    pipeline: Vec<RetargetStep>,
    layers: Vec<Box<dyn AdditiveLayer>>,
    translation_ratio: f32,
    /// Target joints written by a solver step or a layer since the last reset.
    pub(super) touched: Vec<bool>,
}

impl Retargeter {
    #[must_use]
    pub fn new(source: Rig, target: Rig, clip: Arc<AnimationClip>) -> Self {
        let player = ClipPlayer::new(clip, source.skeleton());
        let source_pose = source.bind_pose().clone();
        let pose = target.bind_pose().clone();
        let touched = vec![false; pose.len()];

        let translation_ratio = if source.scalar().abs() > MIN_SCALAR {
            target.scalar() / source.scalar()
        } else {
            log::warn!(
                "Source rig '{}' has a near-zero translation scalar; root motion is copied unscaled",
                source.skeleton().name
            );
            1.0
        };

        let retargeter = Self {
            source,
            target,
            player,
            source_pose,
            pose,
            pipeline: RetargetStep::default_pipeline(),
            layers: Vec::new(),
            translation_ratio,
            touched,
        };
        retargeter.report_coverage();
        retargeter
    }

    /// Applies playback settings to the source clip player.
    #[must_use]
    pub fn with_settings(mut self, settings: &RetargetSettings) -> Self {
        self.player.loop_mode = settings.loop_mode;
        self.player.time_scale = settings.time_scale;
        self
    }

    /// Replaces the pipeline. Steps run in the given order.
    #[must_use]
    pub fn with_pipeline(mut self, pipeline: Vec<RetargetStep>) -> Self {
        self.pipeline = pipeline;
        self.report_coverage();
        self
    }

    pub fn add_layer(&mut self, layer: impl AdditiveLayer + 'static) {
        self.layers.push(Box::new(layer));
    }

    /// Logs each configured step that cannot run because a side lacks its chain.
    /// Per-tick skips stay silent so a partial rig does not flood the log.
    fn report_coverage(&self) {
        let mut runnable = 0usize;
        for step in &self.pipeline {
            let role = step.role();
            match (self.source.has_chain(role), self.target.has_chain(role)) {
                (true, true) => runnable += 1,
                (false, false) => log::debug!("Chain '{role}' is not configured on either rig"),
                (has_source, _) => log::warn!(
                    "Chain '{role}' is missing on the {} rig; step {step:?} will be skipped",
                    if has_source { "target" } else { "source" }
                ),
            }
        }
        if runnable == 0 {
            log::warn!(
                "No chain is configured on both '{}' and '{}'; the target stays in bind pose",
                self.source.skeleton().name,
                self.target.skeleton().name
            );
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn source(&self) -> &Rig {
        &self.source
    }

    #[must_use]
    pub fn target(&self) -> &Rig {
        &self.target
    }

    /// The retargeted target pose of the last tick.
    #[must_use]
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// The sampled source pose of the last tick.
    #[must_use]
    pub fn source_pose(&self) -> &Pose {
        &self.source_pose
    }

    #[must_use]
    pub fn player(&self) -> &ClipPlayer {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut ClipPlayer {
        &mut self.player
    }

    #[must_use]
    pub fn pipeline(&self) -> &[RetargetStep] {
        &self.pipeline
    }

    /// `target.scalar / source.scalar`, or 1 when the source scalar is degenerate.
    #[must_use]
    pub fn translation_ratio(&self) -> f32 {
        self.translation_ratio
    }

    #[must_use]
    pub fn time(&self) -> f32 {
        self.player.time
    }

    // ========================================================================
    // Ticking
    // ========================================================================

    /// Advances source playback by `delta_time` seconds and retargets.
    pub fn update(&mut self, delta_time: f32) {
        self.player.advance(delta_time);
        self.solve();
    }

    /// Moves source playback to `time` (clamped to the clip) and retargets.
    pub fn set_time(&mut self, time: f32) {
        self.player.seek(time);
        self.solve();
    }

    /// Retargets the current playback time.
    pub fn solve(&mut self) {
        self.sample_source();
        self.pose.reset_to(self.target.bind_pose());

        for index in 0..self.pipeline.len() {
            match self.pipeline[index] {
                RetargetStep::ScaledTranslation(role) => self.apply_scaled_translation(role),
                RetargetStep::Chain(role) => self.apply_chain(role),
                RetargetStep::EndInterp(role) => self.apply_end_interp(role),
            }
        }

        if !self.layers.is_empty() {
            let time = self.player.time;
            for layer in &mut self.layers {
                layer.apply(time, &mut self.pose);
            }
            self.mark_layer_changes();
        }
    }

    /// Samples the source clip at the current time into the source pose.
    pub fn sample_source(&mut self) {
        self.source_pose.reset_to(self.source.bind_pose());
        self.player.apply(&mut self.source_pose);
    }

    fn mark_layer_changes(&mut self) {
        let bind = self.target.bind_pose();
        for (joint, touched) in self.touched.iter_mut().enumerate() {
            if !*touched && self.pose.local(joint) != bind.local(joint) {
                *touched = true;
            }
        }
    }

    // ========================================================================
    // Chain algorithms
    // ========================================================================

    /// One-to-one swing/twist retargeting. Joints are paired by position in the
    /// chain; surplus joints on the longer side are left alone.
    pub fn apply_chain(&mut self, role: ChainRole) {
        let source = self.source.chain(role);
        let target = self.target.chain(role);
        if source.is_empty() || target.is_empty() {
            log::trace!("apply_chain: '{role}' missing, skipped");
            return;
        }

        for (source_item, target_item) in source.iter().zip(target) {
            let directions = Directions::sample(&self.source_pose, source_item);
            solver::solve_joint(&mut self.pose, target_item, directions);
            self.touched[target_item.joint] = true;
        }
    }

    /// Retargets a chain from its source end joints only.
    ///
    /// Target joint `i` of `n` receives directions interpolated at
    /// `i / (n - 1)` between the first and last source joints.
    pub fn apply_end_interp(&mut self, role: ChainRole) {
        let source = self.source.chain(role);
        let target = self.target.chain(role);
        let (Some(first), Some(last)) = (source.first(), source.last()) else {
            log::trace!("apply_end_interp: '{role}' missing on source, skipped");
            return;
        };
        if target.is_empty() {
            log::trace!("apply_end_interp: '{role}' missing on target, skipped");
            return;
        }

        let start = Directions::sample(&self.source_pose, first);
        let end = Directions::sample(&self.source_pose, last);
        let span = target.len().saturating_sub(1);

        for (index, target_item) in target.iter().enumerate() {
            let t = if span == 0 { 0.0 } else { index as f32 / span as f32 };
            solver::solve_joint(&mut self.pose, target_item, Directions::interpolate(start, end, t));
            self.touched[target_item.joint] = true;
        }
    }

    /// Transfers the chain root's displacement from its bind position, scaled by
    /// the rigs' translation ratio, onto the target chain root.
    pub fn apply_scaled_translation(&mut self, role: ChainRole) {
        let (Some(source_root), Some(target_root)) = (
            self.source.chain(role).first().copied(),
            self.target.chain(role).first().copied(),
        ) else {
            log::trace!("apply_scaled_translation: '{role}' missing, skipped");
            return;
        };

        let source_bind = self.source.skeleton().joint(source_root.joint).world_bind.position;
        let source_now = self.source_pose.world_of(source_root.joint).position;
        let offset = (source_now - source_bind) * self.translation_ratio;

        let target_bind = self.target.skeleton().joint(target_root.joint).world_bind.position;
        let parent_world = self.pose.parent_world_of(target_root.joint);
        let local = parent_world.inverse().transform_point(target_bind + offset);

        self.pose.set_local_position(target_root.joint, local);
        self.touched[target_root.joint] = true;
    }
}
