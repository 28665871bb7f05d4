//! Form quality classification and coaching feedback

use serde::{Deserialize, Serialize};

use super::config::ExerciseConfig;

/// How close the current angle is to the clinical target
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormQuality {
    Excellent,
    Good,
    Poor,
}

impl FormQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormQuality::Excellent => "excellent",
            FormQuality::Good => "good",
            FormQuality::Poor => "poor",
        }
    }

    /// Dashboard score for a session of this quality
    pub fn score(&self) -> u32 {
        match self {
            FormQuality::Excellent => 100,
            FormQuality::Good => 75,
            FormQuality::Poor => 25,
        }
    }
}

/// Classify an angle (or no angle) against the configured target.
///
/// Tolerance edges are inclusive: exactly 10° off target is still excellent.
pub fn classify_form(angle: Option<f32>, config: &ExerciseConfig) -> FormQuality {
    let Some(angle) = angle else {
        return FormQuality::Poor;
    };

    let deviation = (angle - config.target_angle).abs();

    if deviation <= config.excellent_tolerance {
        FormQuality::Excellent
    } else if deviation <= config.good_tolerance {
        FormQuality::Good
    } else {
        FormQuality::Poor
    }
}

/// Coaching message shown for a frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feedback {
    BodyNotVisible,
    Encourage,
    ReachHigher,
    AdjustArm,
}

impl Feedback {
    /// Total over (angle present?, quality)
    pub fn for_frame(angle: Option<f32>, quality: FormQuality) -> Self {
        if angle.is_none() {
            return Feedback::BodyNotVisible;
        }
        match quality {
            FormQuality::Excellent => Feedback::Encourage,
            FormQuality::Good => Feedback::ReachHigher,
            FormQuality::Poor => Feedback::AdjustArm,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Feedback::BodyNotVisible => "Ensure your full body is visible",
            Feedback::Encourage => "Excellent form! Keep going!",
            Feedback::ReachHigher => "Good! Try to reach a bit higher",
            Feedback::AdjustArm => "Adjust your arm position",
        }
    }
}
