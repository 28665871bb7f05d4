//! Analysis module - joint angle, form quality and repetition counting
//!
//! Re-exports only. All logic in submodules.

mod analyzer;
mod angles;
mod config;
mod form;
mod repetition;

pub use analyzer::{ExerciseAnalyzer, PoseMetrics};
pub use angles::{arm_angle, calculate_joint_angle};
pub use config::{
    DropoutPolicy, ExerciseConfig, EXCELLENT_TOLERANCE, GOOD_TOLERANCE, REP_DROP, TARGET_ANGLE,
    TARGET_REPS, TOP_WINDOW,
};
pub use form::{classify_form, Feedback, FormQuality};
pub use repetition::{RepetitionSignal, RepetitionState};
