//! Bio-controller - body motion to navigation commands
//!
//! Three independent detectors share one landmark stream:
//! - step: leg-lift proxy crossing a threshold → move forward (edge-triggered)
//! - torso rotation: shoulder-line angle change → rotate (every qualifying frame)
//! - arm raise: elbow angle below a threshold → flag (level-triggered)
//!
//! The pose model only sees the upper body, so the step detector uses how
//! far the right wrist sits above the right shoulder as a stand-in for a
//! lifted knee.

use serde::Serialize;

use super::commands::CommandSink;
use super::config::BioControllerConfig;
use crate::analysis::calculate_joint_angle;
use crate::error::ConfigError;
use crate::pose::{Joint, PoseFrame};

/// Memory carried between frames
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BioControllerState {
    /// Last leg-lift proxy value (fraction of frame height)
    pub last_knee_y: Option<f32>,
    /// Last shoulder-line angle (radians)
    pub last_torso_angle: Option<f32>,
    /// Last arm angle (degrees)
    pub last_arm_angle: Option<f32>,
    /// A step fired and the lift has not dropped back yet
    pub is_moving: bool,
}

/// What happened this frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionResult {
    pub moved: bool,
    pub rotated: bool,
    pub arm_raised: bool,
}

/// Bio-controller for one navigation session
pub struct BioController {
    config: BioControllerConfig,
    state: BioControllerState,
}

impl BioController {
    pub fn new(config: BioControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: BioControllerState::default(),
        })
    }

    pub fn config(&self) -> &BioControllerConfig {
        &self.config
    }

    pub fn state(&self) -> &BioControllerState {
        &self.state
    }

    /// Replace the configuration; the detector state is kept
    pub fn update_config(&mut self, config: BioControllerConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Process one frame and send any resulting commands to `sink`.
    ///
    /// All detectors work on the normalized landmarks; the frame size is
    /// accepted from the host but not used. Joints below
    /// `config.min_visibility` count as missing.
    pub fn process_frame(
        &mut self,
        frame: &PoseFrame,
        _frame_width: f32,
        _frame_height: f32,
        sink: &mut dyn CommandSink,
    ) -> MotionResult {
        let frame = &frame.visible(self.config.min_visibility);
        let mut result = MotionResult::default();

        if self.config.high_knee_step.enabled {
            result.moved = self.detect_step(frame, sink);
        }
        if self.config.torso_rotation.enabled {
            result.rotated = self.detect_rotation(frame, sink);
        }
        if self.config.arm_raise.enabled {
            result.arm_raised = self.detect_arm_raise(frame);
        }

        result
    }

    /// Reset detector state
    pub fn reset(&mut self) {
        self.state = BioControllerState::default();
    }

    fn detect_step(&mut self, frame: &PoseFrame, sink: &mut dyn CommandSink) -> bool {
        let (Some(shoulder), Some(wrist)) =
            (frame.get(Joint::RightShoulder), frame.get(Joint::RightWrist))
        else {
            return false;
        };

        let step = &self.config.high_knee_step;
        // Positive when the wrist is above the shoulder (y grows downward)
        let lift = shoulder.y - wrist.y;
        let mut moved = false;

        if let Some(last) = self.state.last_knee_y {
            if lift > step.threshold && last < step.threshold && !self.state.is_moving {
                sink.move_forward(step.movement_speed);
                self.state.is_moving = true;
                moved = true;
                log::debug!("step detected: lift={:.3}", lift);
            } else if lift < step.threshold * 0.5 {
                self.state.is_moving = false;
            }
        }

        self.state.last_knee_y = Some(lift);
        moved
    }

    fn detect_rotation(&mut self, frame: &PoseFrame, sink: &mut dyn CommandSink) -> bool {
        let (Some(left), Some(right)) =
            (frame.get(Joint::LeftShoulder), frame.get(Joint::RightShoulder))
        else {
            return false;
        };

        let torso_angle = (right.y - left.y).atan2(right.x - left.x);
        let mut rotated = false;

        if let Some(last) = self.state.last_torso_angle {
            let delta = torso_angle - last;
            if delta.abs() > self.config.torso_rotation.gate {
                sink.rotate(delta * self.config.torso_rotation.sensitivity);
                rotated = true;
            }
        }

        self.state.last_torso_angle = Some(torso_angle);
        rotated
    }

    fn detect_arm_raise(&mut self, frame: &PoseFrame) -> bool {
        let (Some(shoulder), Some(elbow), Some(wrist)) = (
            frame.get(Joint::LeftShoulder),
            frame.get(Joint::LeftElbow),
            frame.get(Joint::LeftWrist),
        ) else {
            return false;
        };

        let Some(angle) =
            calculate_joint_angle(shoulder.as_tuple(), elbow.as_tuple(), wrist.as_tuple())
        else {
            return false;
        };

        self.state.last_arm_angle = Some(angle);
        angle < self.config.arm_raise.threshold
    }
}

impl Default for BioController {
    fn default() -> Self {
        Self {
            config: BioControllerConfig::default(),
            state: BioControllerState::default(),
        }
    }
}
