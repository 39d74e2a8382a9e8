use crate::animation::binding::JointBinding;
use crate::animation::clip::AnimationClip;
use crate::skeleton::Skeleton;

pub struct Binder;

impl Binder {
    /// Resolves clip tracks against the skeleton's joint names.
    ///
    /// Tracks naming joints that the skeleton does not have are dropped with a
    /// warning; the clip may have been authored for a superset rig.
    #[must_use]
    pub fn bind(skeleton: &Skeleton, clip: &AnimationClip) -> Vec<JointBinding> {
        let mut bindings = Vec::with_capacity(clip.tracks.len());
        let mut unbound = 0usize;

        for (track_index, track) in clip.tracks.iter().enumerate() {
            match skeleton.find(&track.meta.joint_name) {
                Some(joint) => bindings.push(JointBinding {
                    track_index,
                    joint,
                    target: track.meta.target,
                }),
                None => {
                    unbound += 1;
                    log::debug!(
                        "Clip '{}': track for '{}' has no joint in skeleton '{}'",
                        clip.name,
                        track.meta.joint_name,
                        skeleton.name
                    );
                }
            }
        }

        if unbound > 0 {
            log::warn!(
                "Clip '{}': {unbound} of {} tracks could not be bound to skeleton '{}'",
                clip.name,
                clip.tracks.len(),
                skeleton.name
            );
        }

        bindings
    }
}
