//! Repetition detection with hysteresis
//!
//! A rep is a raise to the top window followed by a fall past the rep
//! threshold. The "at top" flag latches once set and is consumed by the
//! rep it produces, so one descent can never count twice.

use super::config::{DropoutPolicy, ExerciseConfig};

/// Detector memory carried between frames by the session loop
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RepetitionState {
    /// Last angle the detector saw
    pub previous_angle: Option<f32>,
    /// Set once the arm reached the top, cleared by the rep
    pub was_at_top: bool,
}

/// Per-frame detector output
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepetitionSignal {
    /// Rising and within the top window this frame
    pub is_at_top: bool,
    /// Completed a rep this frame
    pub is_rep_detected: bool,
}

impl RepetitionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the detector by one frame.
    ///
    /// `angle` is `None` when the arm could not be measured; what happens to
    /// the state then is governed by `config.dropout`.
    pub fn step(self, angle: Option<f32>, config: &ExerciseConfig) -> (RepetitionSignal, RepetitionState) {
        let Some(angle) = angle else {
            let next = match config.dropout {
                DropoutPolicy::HoldLastAngle => self,
                DropoutPolicy::ResetOnMissing => RepetitionState::default(),
            };
            return (RepetitionSignal::default(), next);
        };

        let signal = match self.previous_angle {
            Some(previous) => RepetitionSignal {
                is_at_top: angle >= config.top_threshold() && previous < angle,
                is_rep_detected: self.was_at_top
                    && angle < previous
                    && angle < config.rep_threshold(),
            },
            None => RepetitionSignal::default(),
        };

        let was_at_top = if signal.is_rep_detected {
            false
        } else {
            self.was_at_top || signal.is_at_top
        };

        (
            signal,
            RepetitionState {
                previous_angle: Some(angle),
                was_at_top,
            },
        )
    }
}
