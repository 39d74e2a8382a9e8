//! Retargeting Rigs
//!
//! A [`Rig`] pairs a skeleton with its bind pose and organizes joints into
//! role-keyed chains. Every chain joint carries a swing and a twist direction
//! expressed in the joint's own bind frame: multiplying them by the joint's
//! animated world rotation yields the world-space directions the joint points
//! in at that instant, independent of how the rig was authored.

pub mod bone_map;
pub mod chain_config;

use std::sync::Arc;

use glam::Vec3;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::skeleton::{JointIndex, Pose, Skeleton};

pub use bone_map::{BoneMap, BonePair};
pub use chain_config::{ChainConfig, ChainDefinition, ChainRole};

/// Chains longer than this spill to the heap.
const INLINE_CHAIN_LEN: usize = 8;

/// Scalar used when a rig has no pelvis chain.
const DEFAULT_SCALAR: f32 = 1.0;

/// One joint of a chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigItem {
    pub joint: JointIndex,
    pub parent: Option<JointIndex>,
    /// Unit swing direction in the joint's bind frame.
    pub swing: Vec3,
    /// Unit twist direction in the joint's bind frame.
    pub twist: Vec3,
}

pub type RigChain = SmallVec<[RigItem; INLINE_CHAIN_LEN]>;

#[derive(Debug, Clone)]
pub struct Rig {
    skeleton: Arc<Skeleton>,
    bind_pose: Pose,
    chains: FxHashMap<ChainRole, RigChain>,
    /// Bind-pose world height of the pelvis chain root.
    scalar: f32,
    has_pelvis: bool,
}

impl Rig {
    /// Creates a rig without chains.
    #[must_use]
    pub fn new(skeleton: Arc<Skeleton>) -> Self {
        let bind_pose = Pose::bind(Arc::clone(&skeleton));
        Self {
            skeleton,
            bind_pose,
            chains: FxHashMap::default(),
            scalar: DEFAULT_SCALAR,
            has_pelvis: false,
        }
    }

    /// Creates a rig and builds every chain of `config`.
    #[must_use]
    pub fn from_config(skeleton: Arc<Skeleton>, config: &ChainConfig) -> Self {
        let mut rig = Self::new(skeleton);
        for chain in &config.chains {
            rig.build_chain(chain.role, &chain.joints, chain.swing, chain.twist);
        }
        if !rig.has_pelvis {
            log::warn!(
                "Rig '{}' has no pelvis chain; translation scalar defaults to {DEFAULT_SCALAR}",
                rig.skeleton.name
            );
        }
        rig
    }

    /// Builds (or rebuilds) the chain for `role`.
    ///
    /// Names that do not exist in the skeleton are dropped with a warning and
    /// empty names are skipped silently, so a partial chain is still valid.
    /// Returns the number of joints kept.
    pub fn build_chain<S: AsRef<str>>(
        &mut self,
        role: ChainRole,
        joint_names: &[S],
        swing_ref: Vec3,
        twist_ref: Vec3,
    ) -> usize {
        let swing_ref = swing_ref.normalize_or_zero();
        let twist_ref = twist_ref.normalize_or_zero();

        let mut chain = RigChain::new();
        for name in joint_names {
            let name = name.as_ref();
            if name.is_empty() {
                continue;
            }
            let Some(joint) = self.skeleton.find(name) else {
                log::warn!(
                    "Chain '{role}': joint '{name}' not found in skeleton '{}', skipping",
                    self.skeleton.name
                );
                continue;
            };

            let bind = self.skeleton.joint(joint);
            let inverse = bind.world_bind.rotation.inverse();
            chain.push(RigItem {
                joint,
                parent: bind.parent,
                swing: inverse * swing_ref,
                twist: inverse * twist_ref,
            });
        }

        if role == ChainRole::Pelvis {
            match chain.first() {
                Some(root) => {
                    self.scalar = self.skeleton.joint(root.joint).world_bind.position.y;
                    self.has_pelvis = true;
                }
                None => {
                    self.scalar = DEFAULT_SCALAR;
                    self.has_pelvis = false;
                }
            }
        }

        let kept = chain.len();
        self.chains.insert(role, chain);
        kept
    }

    #[inline]
    #[must_use]
    pub fn skeleton(&self) -> &Arc<Skeleton> {
        &self.skeleton
    }

    #[inline]
    #[must_use]
    pub fn bind_pose(&self) -> &Pose {
        &self.bind_pose
    }

    /// Chain items for `role`; empty if the role is not configured.
    #[must_use]
    pub fn chain(&self, role: ChainRole) -> &[RigItem] {
        match self.chains.get(&role) {
            Some(chain) => chain.as_slice(),
            None => &[],
        }
    }

    #[must_use]
    pub fn has_chain(&self, role: ChainRole) -> bool {
        !self.chain(role).is_empty()
    }

    /// Roles with at least one joint, in pipeline order.
    pub fn roles(&self) -> impl Iterator<Item = ChainRole> + '_ {
        ChainRole::ALL.into_iter().filter(|&r| self.has_chain(r))
    }

    #[inline]
    #[must_use]
    pub fn scalar(&self) -> f32 {
        self.scalar
    }

    /// Overrides the translation scalar (e.g. for rigs whose pelvis sits at the origin).
    pub fn set_scalar(&mut self, scalar: f32) {
        self.scalar = scalar;
    }
}
