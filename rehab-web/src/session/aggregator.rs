//! Session summary statistics
//!
//! Reduces a session's angle history to max, mean and an overall form
//! grade. The grade is a coarse majority vote over re-classified samples.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::record::ExerciseSession;
use crate::analysis::{classify_form, ExerciseConfig, FormQuality};

/// Angle statistics for a finished session
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleSummary {
    pub max_angle: f32,
    pub average_angle: f32,
    pub overall_form: FormQuality,
}

/// Overall grade from per-sample classes.
///
/// More excellent than good samples → excellent; otherwise good if good
/// samples are over a third of the total; otherwise poor. Both comparisons
/// are strict.
pub fn overall_form(angles: &[f32], config: &ExerciseConfig) -> FormQuality {
    let mut excellent = 0usize;
    let mut good = 0usize;
    for &angle in angles {
        match classify_form(Some(angle), config) {
            FormQuality::Excellent => excellent += 1,
            FormQuality::Good => good += 1,
            FormQuality::Poor => {}
        }
    }

    if excellent > good {
        FormQuality::Excellent
    } else if good as f32 > angles.len() as f32 / 3.0 {
        FormQuality::Good
    } else {
        FormQuality::Poor
    }
}

/// Max, mean (both 0 for an empty history) and overall form
pub fn summarize_angles(angles: &[f32], config: &ExerciseConfig) -> AngleSummary {
    let (max_angle, average_angle) = if angles.is_empty() {
        (0.0, 0.0)
    } else {
        let max = angles.iter().copied().fold(f32::MIN, f32::max);
        let mean = angles.iter().sum::<f32>() / angles.len() as f32;
        (max, mean)
    };

    AngleSummary {
        max_angle,
        average_angle,
        overall_form: overall_form(angles, config),
    }
}

/// Build the immutable record for a finished session
pub fn summarize(
    angles: &[f32],
    reps_completed: u32,
    duration_seconds: u64,
    timestamp: DateTime<Utc>,
    config: &ExerciseConfig,
) -> ExerciseSession {
    let summary = summarize_angles(angles, config);
    ExerciseSession {
        id: Uuid::new_v4(),
        timestamp,
        reps_completed,
        max_angle: summary.max_angle,
        average_angle: summary.average_angle,
        duration_seconds,
        overall_form: summary.overall_form,
    }
}
