//! Bio-controller tuning
//!
//! Each gesture detector has its own section and can be switched off.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ConfigError};

/// Step detector: leg-lift proxy must rise past `threshold` (fraction of frame height)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StepConfig {
    pub enabled: bool,
    pub threshold: f32,
    /// Distance moved per detected step (scene units)
    pub movement_speed: f32,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 0.15, // 15% of frame height
            movement_speed: 0.5,
        }
    }
}

/// Torso rotation: shoulder-line angle change turns the camera
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RotationConfig {
    pub enabled: bool,
    /// Camera radians per radian of torso rotation
    pub sensitivity: f32,
    /// Frame-to-frame change (radians) that must be exceeded
    pub gate: f32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sensitivity: 0.02,
            gate: 0.05,
        }
    }
}

/// Arm raise: elbow angle under `threshold` degrees
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArmRaiseConfig {
    pub enabled: bool,
    pub threshold: f32,
    /// Points of interest this close to the camera unlock while the arm is raised
    pub unlock_distance: f32,
}

impl Default for ArmRaiseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 90.0,
            unlock_distance: 2.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BioControllerConfig {
    pub high_knee_step: StepConfig,
    pub torso_rotation: RotationConfig,
    pub arm_raise: ArmRaiseConfig,
    /// Joints reported below this confidence are treated as missing
    pub min_visibility: f32,
}

impl BioControllerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("highKneeStep.threshold", self.high_knee_step.threshold)?;
        ensure_non_negative("highKneeStep.movementSpeed", self.high_knee_step.movement_speed)?;
        ensure_non_negative("torsoRotation.sensitivity", self.torso_rotation.sensitivity)?;
        ensure_non_negative("torsoRotation.gate", self.torso_rotation.gate)?;
        ensure_non_negative("armRaise.threshold", self.arm_raise.threshold)?;
        ensure_non_negative("armRaise.unlockDistance", self.arm_raise.unlock_distance)?;
        ensure_non_negative("minVisibility", self.min_visibility)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BioControllerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.high_knee_step.threshold, 0.15);
        assert_eq!(config.high_knee_step.movement_speed, 0.5);
        assert_eq!(config.torso_rotation.sensitivity, 0.02);
        assert_eq!(config.torso_rotation.gate, 0.05);
        assert_eq!(config.arm_raise.threshold, 90.0);
        assert_eq!(config.min_visibility, 0.0);
    }

    #[test]
    fn test_partial_section() {
        let config: BioControllerConfig =
            serde_json::from_str(r#"{ "torsoRotation": { "enabled": false } }"#).unwrap();
        assert!(!config.torso_rotation.enabled);
        assert_eq!(config.torso_rotation.sensitivity, 0.02);
        assert!(config.high_knee_step.enabled);
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let mut config = BioControllerConfig::default();
        config.high_knee_step.threshold = -0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "highKneeStep.threshold",
                ..
            })
        ));
    }
}
