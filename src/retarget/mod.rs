//! Retargeting Engine
//!
//! - [`Retargeter`]: per-tick pipeline over rig chains plus keyframe baking
//! - [`solver`]: swing-then-twist direction matching
//! - [`AdditiveLayer`]: hook for post-solve pose adjustments
//! - [`RetargetSession`]: caller-owned context for one source/target skeleton pair
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use myth_retarget::prelude::*;
//!
//! let session = RetargetSession::new(source, target, &ChainMapping::Custom {
//!     reference: ChainConfig::mixamo(),
//!     bones,
//! });
//! let baked = session.retargeter(Arc::new(clip)).bake(30.0)?;
//! ```

pub mod bake;
pub mod layer;
pub mod retargeter;
pub mod session;
pub mod solver;

pub use bake::sample_times;
pub use layer::{AdditiveLayer, RotationOffsetLayer};
pub use retargeter::{RetargetStep, Retargeter};
pub use session::{ChainMapping, RetargetSession};
pub use solver::Directions;
