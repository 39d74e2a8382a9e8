use rustc_hash::FxHashMap;

use crate::errors::{Result, RetargetError};
use crate::skeleton::transform::Transform;

/// Dense joint index into a [`Skeleton`].
pub type JointIndex = usize;

/// Joint description supplied by the importer.
///
/// This is the only input the crate needs from a model loader: a name, the
/// parent index (`None` for roots) and the authoring-time local transform.
#[derive(Debug, Clone)]
pub struct JointDesc {
    pub name: String,
    pub parent: Option<JointIndex>,
    pub local_bind: Transform,
}

impl JointDesc {
    #[must_use]
    pub fn new(name: impl Into<String>, parent: Option<JointIndex>, local_bind: Transform) -> Self {
        Self {
            name: name.into(),
            parent,
            local_bind,
        }
    }
}

/// A node in a skeleton topology.
#[derive(Debug, Clone)]
pub struct Joint {
    pub index: JointIndex,
    pub parent: Option<JointIndex>,
    pub name: String,
    /// Bind pose transform relative to the parent joint.
    pub local_bind: Transform,
    /// Bind pose transform relative to the skeleton origin.
    /// Resolved once at build time; never updated afterwards.
    pub world_bind: Transform,
}

/// Immutable skeleton topology.
///
/// Joints are stored in an arena addressed by [`JointIndex`]. Parents always
/// precede their children, so a single forward pass over the arena visits the
/// hierarchy in root-to-leaf order. Name lookups go through a dictionary built
/// once at construction.
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub name: String,
    joints: Vec<Joint>,
    name_to_index: FxHashMap<String, JointIndex>,
}

impl Skeleton {
    /// Builds a skeleton from an ordered joint list.
    ///
    /// Fails if a joint references a parent at or after its own position, or if
    /// two joints share a name.
    pub fn new(name: impl Into<String>, descs: Vec<JointDesc>) -> Result<Self> {
        let mut joints: Vec<Joint> = Vec::with_capacity(descs.len());
        let mut name_to_index = FxHashMap::default();
        name_to_index.reserve(descs.len());

        for (index, desc) in descs.into_iter().enumerate() {
            let world_bind = match desc.parent {
                Some(parent) if parent >= index => {
                    return Err(RetargetError::InvalidParent {
                        joint: desc.name,
                        index,
                        parent,
                    });
                }
                Some(parent) => joints[parent].world_bind.then(&desc.local_bind),
                None => desc.local_bind,
            };

            if name_to_index.insert(desc.name.clone(), index).is_some() {
                return Err(RetargetError::DuplicateJointName(desc.name));
            }

            joints.push(Joint {
                index,
                parent: desc.parent,
                name: desc.name,
                local_bind: desc.local_bind,
                world_bind,
            });
        }

        Ok(Self {
            name: name.into(),
            joints,
            name_to_index,
        })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Returns the joint at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    #[inline]
    #[must_use]
    pub fn joint(&self, index: JointIndex) -> &Joint {
        &self.joints[index]
    }

    #[inline]
    #[must_use]
    pub fn parent_of(&self, index: JointIndex) -> Option<JointIndex> {
        self.joints[index].parent
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<JointIndex> {
        self.name_to_index.get(name).copied()
    }

    #[must_use]
    pub fn name_of(&self, index: JointIndex) -> &str {
        &self.joints[index].name
    }

    /// Number of joints between `index` and its root, inclusive.
    #[must_use]
    pub fn depth_of(&self, index: JointIndex) -> usize {
        let mut depth = 1;
        let mut current = self.joints[index].parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.joints[parent].parent;
        }
        depth
    }
}
