//! Exercise tuning values
//!
//! Clinical thresholds change independently of the algorithms, so every
//! constant the analyzer uses lives here with a named default.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_positive, ConfigError};
use crate::pose::Side;

/// Target joint angle for the shoulder raise (degrees)
pub const TARGET_ANGLE: f32 = 90.0;
/// Deviation still counted as excellent form (± degrees)
pub const EXCELLENT_TOLERANCE: f32 = 10.0;
/// Deviation still counted as good form (± degrees)
pub const GOOD_TOLERANCE: f32 = 15.0;
/// The arm is "at the top" within this many degrees below target
pub const TOP_WINDOW: f32 = 20.0;
/// A rep completes once the angle falls this far below target
pub const REP_DROP: f32 = 30.0;
/// Reps per session before it auto-completes
pub const TARGET_REPS: u32 = 10;

/// What the repetition detector does on a frame with no angle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DropoutPolicy {
    /// Keep the last angle and top flag; a transient occlusion is ignored
    #[default]
    HoldLastAngle,
    /// Forget the previous angle and top flag
    ResetOnMissing,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExerciseConfig {
    pub target_angle: f32,
    pub excellent_tolerance: f32,
    pub good_tolerance: f32,
    pub top_window: f32,
    pub rep_drop: f32,
    pub target_reps: u32,
    pub tracked_side: Side,
    pub dropout: DropoutPolicy,
    /// Joints reported below this confidence are treated as missing
    pub min_visibility: f32,
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            target_angle: TARGET_ANGLE,
            excellent_tolerance: EXCELLENT_TOLERANCE,
            good_tolerance: GOOD_TOLERANCE,
            top_window: TOP_WINDOW,
            rep_drop: REP_DROP,
            target_reps: TARGET_REPS,
            tracked_side: Side::Left,
            dropout: DropoutPolicy::HoldLastAngle,
            min_visibility: 0.0,
        }
    }
}

impl ExerciseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("targetAngle", self.target_angle)?;
        ensure_positive("excellentTolerance", self.excellent_tolerance)?;
        ensure_positive("goodTolerance", self.good_tolerance)?;
        if self.excellent_tolerance > self.good_tolerance {
            return Err(ConfigError::ToleranceOrder {
                excellent: self.excellent_tolerance,
                good: self.good_tolerance,
            });
        }
        ensure_non_negative("topWindow", self.top_window)?;
        ensure_non_negative("repDrop", self.rep_drop)?;
        ensure_non_negative("minVisibility", self.min_visibility)?;
        if self.target_reps == 0 {
            return Err(ConfigError::ZeroTargetReps);
        }
        Ok(())
    }

    /// Angle at or above which a rising arm counts as at the top
    pub fn top_threshold(&self) -> f32 {
        self.target_angle - self.top_window
    }

    /// Angle below which a falling arm completes the rep
    pub fn rep_threshold(&self) -> f32 {
        self.target_angle - self.rep_drop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ExerciseConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.top_threshold(), 70.0);
        assert_eq!(config.rep_threshold(), 60.0);
    }

    #[test]
    fn test_partial_object_keeps_defaults() {
        let config: ExerciseConfig =
            serde_json::from_str(r#"{ "targetReps": 5, "trackedSide": "right" }"#).unwrap();
        assert_eq!(config.target_reps, 5);
        assert_eq!(config.tracked_side, Side::Right);
        assert_eq!(config.target_angle, TARGET_ANGLE);
        assert_eq!(config.dropout, DropoutPolicy::HoldLastAngle);
        assert_eq!(config.min_visibility, 0.0);
    }

    #[test]
    fn test_rejects_inverted_tolerances() {
        let config = ExerciseConfig {
            excellent_tolerance: 20.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ToleranceOrder {
                excellent: 20.0,
                good: 15.0
            })
        );
    }

    #[test]
    fn test_rejects_negative_and_zero_reps() {
        let negative = ExerciseConfig {
            rep_drop: -5.0,
            ..Default::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(ConfigError::Negative { field: "repDrop", .. })
        ));

        let zero = ExerciseConfig {
            target_reps: 0,
            ..Default::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroTargetReps));
    }
}
