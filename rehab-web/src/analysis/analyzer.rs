//! Per-frame exercise analysis
//!
//! Angle → form → repetition flags for one frame. The analyzer itself is
//! immutable; the repetition state is threaded through by the caller so
//! each session owns its own detector memory.

use serde::Serialize;

use super::angles::arm_angle;
use super::config::ExerciseConfig;
use super::form::{classify_form, Feedback, FormQuality};
use super::repetition::RepetitionState;
use crate::error::ConfigError;
use crate::pose::PoseFrame;

/// Metrics derived from one frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseMetrics {
    /// Elbow angle in degrees, [0, 180]
    pub shoulder_angle: Option<f32>,
    pub form_quality: FormQuality,
    pub is_rep_detected: bool,
    pub is_at_top: bool,
}

impl PoseMetrics {
    /// Metrics for a frame with nothing to measure
    pub fn empty() -> Self {
        Self {
            shoulder_angle: None,
            form_quality: FormQuality::Poor,
            is_rep_detected: false,
            is_at_top: false,
        }
    }

    pub fn feedback(&self) -> Feedback {
        Feedback::for_frame(self.shoulder_angle, self.form_quality)
    }
}

/// Stateless orchestrator over angle, form and repetition logic
#[derive(Clone, Debug, Default)]
pub struct ExerciseAnalyzer {
    config: ExerciseConfig,
}

impl ExerciseAnalyzer {
    pub fn new(config: ExerciseConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ExerciseConfig {
        &self.config
    }

    /// Analyze one frame.
    ///
    /// `frame` is `None` when the detector produced no pose at all; the
    /// state is then returned untouched. Joints below
    /// `config.min_visibility` count as missing, and a frame without a
    /// measurable arm follows the configured dropout policy.
    pub fn analyze_frame(
        &self,
        frame: Option<&PoseFrame>,
        state: RepetitionState,
    ) -> (PoseMetrics, RepetitionState) {
        let Some(frame) = frame else {
            return (PoseMetrics::empty(), state);
        };

        let frame = frame.visible(self.config.min_visibility);
        let angle = arm_angle(&frame, self.config.tracked_side);
        let form_quality = classify_form(angle, &self.config);
        let (signal, next) = state.step(angle, &self.config);

        let metrics = PoseMetrics {
            shoulder_angle: angle,
            form_quality,
            is_rep_detected: signal.is_rep_detected,
            is_at_top: signal.is_at_top,
        };
        (metrics, next)
    }

    /// Form classifier with this analyzer's thresholds, for post-hoc use
    pub fn classify(&self, angle: Option<f32>) -> FormQuality {
        classify_form(angle, &self.config)
    }
}
