//! Pose module - per-frame landmark data
//!
//! Re-exports only. All logic in submodules.

mod keypoints;
mod landmarks;

pub use keypoints::{Keypoint, DEFAULT_VIDEO_SIZE, MOVENET_KEYPOINTS, VALUES_PER_KEYPOINT};
pub use landmarks::{Joint, Landmark, PoseFrame, Side, JOINT_COUNT};
