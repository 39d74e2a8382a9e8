//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! Retargeting follows a two-tier failure policy:
//!
//! - **Construction-time errors** (malformed skeleton topology, empty keyframe
//!   tracks, invalid bake frame rate, JSON configuration problems) are reported
//!   through [`RetargetError`].
//! - **Configuration gaps** discovered while building rigs or solving poses
//!   (missing joints, missing chains, incomplete bone maps) are absorbed where
//!   they are detected and reported through the `log` facade. They reduce chain
//!   coverage but never abort a tick or a bake.
//!
//! Out-of-range joint indices and pose/topology mismatches are programming
//! errors and panic.
//!
//! # Usage
//!
//! ```rust,ignore
//! use myth_retarget::errors::{RetargetError, Result};
//!
//! fn build() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the retargeting crate.
#[derive(Error, Debug)]
pub enum RetargetError {
    // ========================================================================
    // Skeleton Topology Errors
    // ========================================================================
    /// A joint references a parent that does not precede it in the joint list.
    #[error("Joint '{joint}' (index {index}) has invalid parent index {parent}")]
    InvalidParent {
        /// Name of the offending joint
        joint: String,
        /// Index of the offending joint
        index: usize,
        /// The parent index it referenced
        parent: usize,
    },

    /// Two joints in one skeleton share a name.
    #[error("Duplicate joint name: {0}")]
    DuplicateJointName(String),

    // ========================================================================
    // Animation Data Errors
    // ========================================================================
    /// A keyframe track was constructed without keys.
    #[error("Keyframe track has no keys")]
    EmptyTrack,

    /// The number of values does not match the number of keys.
    #[error("Keyframe track expects {expected} values but got {actual}")]
    TrackValueCount {
        /// Value count implied by key times and interpolation mode
        expected: usize,
        /// Value count actually supplied
        actual: usize,
    },

    /// Key times are not finite or decrease at some key.
    #[error("Keyframe track time {time} at key {index} is not finite or decreases")]
    UnsortedKeyTimes {
        /// Index of the first offending key
        index: usize,
        /// Its time
        time: f32,
    },

    // ========================================================================
    // Baking Errors
    // ========================================================================
    /// Baking was requested with a non-positive or non-finite frame rate.
    #[error("Invalid bake frame rate: {0}")]
    InvalidFrameRate(f32),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// JSON (de)serialization of a chain configuration or bone map failed.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Alias for `Result<T, RetargetError>`.
pub type Result<T> = std::result::Result<T, RetargetError>;
