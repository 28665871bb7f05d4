//! Landmark storage for one frame
//!
//! A `PoseFrame` maps named joints to normalized landmarks. A joint the
//! detector did not find is simply absent; consumers treat absence as
//! "no signal this frame".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// JOINT IDENTITIES
// ============================================================================

/// Number of tracked joints
pub const JOINT_COUNT: usize = 11;

/// Body joints the coach reads
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Joint {
    Nose,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
}

impl Joint {
    pub const ALL: [Joint; JOINT_COUNT] = [
        Joint::Nose,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftWrist,
        Joint::RightWrist,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

/// Body side, used to pick which arm is tracked
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    /// (shoulder, elbow, wrist) for this side
    pub fn arm(&self) -> (Joint, Joint, Joint) {
        match self {
            Side::Left => (Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist),
            Side::Right => (Joint::RightShoulder, Joint::RightElbow, Joint::RightWrist),
        }
    }
}

// ============================================================================
// LANDMARK DATA STRUCTURE
// ============================================================================

/// A single landmark point (normalized coordinates, origin top-left)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32, // 0-1 normalized
    pub y: f32, // 0-1 normalized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
    /// Detector confidence in [0,1]; absent means fully visible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: None,
            visibility: None,
        }
    }

    pub fn with_visibility(mut self, visibility: f32) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn confidence(&self) -> f32 {
        self.visibility.unwrap_or(1.0)
    }

    pub fn as_tuple(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

// ============================================================================
// FRAME
// ============================================================================

/// Landmarks for one video frame. Joints may be missing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<Joint, Landmark>", into = "HashMap<Joint, Landmark>")]
pub struct PoseFrame {
    joints: [Option<Landmark>; JOINT_COUNT],
}

impl PoseFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, joint: Joint, landmark: Landmark) -> Self {
        self.insert(joint, landmark);
        self
    }

    pub fn insert(&mut self, joint: Joint, landmark: Landmark) {
        self.joints[joint.slot()] = Some(landmark);
    }

    pub fn remove(&mut self, joint: Joint) -> Option<Landmark> {
        self.joints[joint.slot()].take()
    }

    pub fn get(&self, joint: Joint) -> Option<Landmark> {
        self.joints[joint.slot()]
    }

    pub fn contains(&self, joint: Joint) -> bool {
        self.joints[joint.slot()].is_some()
    }

    pub fn len(&self) -> usize {
        self.joints.iter().filter(|j| j.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Joint, Landmark)> + '_ {
        Joint::ALL
            .iter()
            .filter_map(move |&joint| self.get(joint).map(|lm| (joint, lm)))
    }

    /// Copy of this frame with low-confidence joints dropped
    pub fn visible(&self, min_visibility: f32) -> PoseFrame {
        let mut frame = PoseFrame::new();
        for (joint, landmark) in self.iter() {
            if landmark.confidence() >= min_visibility {
                frame.insert(joint, landmark);
            }
        }
        frame
    }
}

impl From<HashMap<Joint, Landmark>> for PoseFrame {
    fn from(map: HashMap<Joint, Landmark>) -> Self {
        let mut frame = PoseFrame::new();
        for (joint, landmark) in map {
            frame.insert(joint, landmark);
        }
        frame
    }
}

impl From<PoseFrame> for HashMap<Joint, Landmark> {
    fn from(frame: PoseFrame) -> Self {
        frame.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_joint_is_absent() {
        let frame = PoseFrame::new().with(Joint::LeftShoulder, Landmark::new(0.4, 0.3));
        assert!(frame.contains(Joint::LeftShoulder));
        assert!(frame.get(Joint::LeftElbow).is_none());
        assert_eq!(frame.len(), 1);
    }

    #[test]
    fn test_visible_drops_low_confidence() {
        let frame = PoseFrame::new()
            .with(Joint::LeftWrist, Landmark::new(0.5, 0.5).with_visibility(0.2))
            .with(Joint::LeftElbow, Landmark::new(0.5, 0.4).with_visibility(0.9))
            .with(Joint::LeftShoulder, Landmark::new(0.5, 0.3));

        let visible = frame.visible(0.5);
        assert!(!visible.contains(Joint::LeftWrist));
        assert!(visible.contains(Joint::LeftElbow));
        // No visibility reported counts as fully visible
        assert!(visible.contains(Joint::LeftShoulder));
    }

    #[test]
    fn test_frame_from_js_style_object() {
        let json = r#"{
            "leftShoulder": { "x": 0.4, "y": 0.3, "visibility": 0.95 },
            "leftElbow": { "x": 0.45, "y": 0.45 }
        }"#;
        let frame: PoseFrame = serde_json::from_str(json).unwrap();
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.get(Joint::LeftShoulder).unwrap().confidence(), 0.95);
        assert_eq!(frame.get(Joint::LeftElbow).unwrap().visibility, None);
    }

    #[test]
    fn test_side_arm_joints() {
        assert_eq!(
            Side::Right.arm(),
            (Joint::RightShoulder, Joint::RightElbow, Joint::RightWrist)
        );
    }
}
