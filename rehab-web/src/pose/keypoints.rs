//! Keypoint ingestion
//!
//! Converts raw MoveNet output (17 keypoints in pixel coordinates with a
//! per-keypoint score) into a normalized `PoseFrame`.

use serde::{Deserialize, Serialize};

use super::landmarks::{Joint, Landmark, PoseFrame};

// ============================================================================
// KEYPOINT INDICES (MoveNet SinglePose - 17 total)
// ============================================================================

pub const MOVENET_KEYPOINTS: usize = 17;

/// Values per keypoint in a packed array: x, y, score
pub const VALUES_PER_KEYPOINT: usize = 3;

/// Fallback video size when the element reports no dimensions
pub const DEFAULT_VIDEO_SIZE: (f32, f32) = (640.0, 480.0);

const MOVENET_JOINTS: [(usize, Joint); 11] = [
    (0, Joint::Nose),
    (5, Joint::LeftShoulder),
    (6, Joint::RightShoulder),
    (7, Joint::LeftElbow),
    (8, Joint::RightElbow),
    (9, Joint::LeftWrist),
    (10, Joint::RightWrist),
    (11, Joint::LeftHip),
    (12, Joint::RightHip),
    (13, Joint::LeftKnee),
    (14, Joint::RightKnee),
];

/// Raw detector keypoint (pixel coordinates)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub score: Option<f32>,
}

fn video_dimension(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

impl PoseFrame {
    /// Build a frame from MoveNet keypoints.
    ///
    /// Keypoints scoring below `min_score` are left out of the frame.
    pub fn from_keypoints(
        keypoints: &[Keypoint],
        video_width: f32,
        video_height: f32,
        min_score: f32,
    ) -> PoseFrame {
        let width = video_dimension(video_width, DEFAULT_VIDEO_SIZE.0);
        let height = video_dimension(video_height, DEFAULT_VIDEO_SIZE.1);

        let mut frame = PoseFrame::new();
        for (index, joint) in MOVENET_JOINTS {
            let Some(kp) = keypoints.get(index) else {
                continue;
            };
            let score = kp.score.unwrap_or(0.0);
            if score < min_score {
                continue;
            }
            frame.insert(
                joint,
                Landmark {
                    x: kp.x / width,
                    y: kp.y / height,
                    z: Some(0.0),
                    visibility: Some(score),
                },
            );
        }
        frame
    }

    /// Build a frame from a packed Float32Array of 51 values
    /// (17 keypoints × x, y, score).
    pub fn from_flat(
        data: &[f32],
        video_width: f32,
        video_height: f32,
        min_score: f32,
    ) -> Option<PoseFrame> {
        if data.len() != MOVENET_KEYPOINTS * VALUES_PER_KEYPOINT {
            log::warn!(
                "Invalid keypoint data length: {} (expected {})",
                data.len(),
                MOVENET_KEYPOINTS * VALUES_PER_KEYPOINT
            );
            return None;
        }

        let keypoints: Vec<Keypoint> = data
            .chunks_exact(VALUES_PER_KEYPOINT)
            .map(|c| Keypoint {
                x: c[0],
                y: c[1],
                score: Some(c[2]),
            })
            .collect();

        Some(Self::from_keypoints(&keypoints, video_width, video_height, min_score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keypoints_with(index: usize, kp: Keypoint) -> Vec<Keypoint> {
        let mut kps = vec![
            Keypoint {
                x: 0.0,
                y: 0.0,
                score: Some(0.0),
            };
            MOVENET_KEYPOINTS
        ];
        kps[index] = kp;
        kps
    }

    #[test]
    fn test_maps_and_normalizes_shoulder() {
        let kps = keypoints_with(
            5,
            Keypoint {
                x: 320.0,
                y: 120.0,
                score: Some(0.9),
            },
        );
        let frame = PoseFrame::from_keypoints(&kps, 640.0, 480.0, 0.3);
        let shoulder = frame.get(Joint::LeftShoulder).unwrap();
        assert!((shoulder.x - 0.5).abs() < 1e-6);
        assert!((shoulder.y - 0.25).abs() < 1e-6);
        assert_eq!(shoulder.visibility, Some(0.9));
        // Everything else scored zero
        assert_eq!(frame.len(), 1);
    }

    #[test]
    fn test_zero_video_size_uses_fallback() {
        let kps = keypoints_with(
            10,
            Keypoint {
                x: 64.0,
                y: 48.0,
                score: Some(1.0),
            },
        );
        let frame = PoseFrame::from_keypoints(&kps, 0.0, 0.0, 0.0);
        let wrist = frame.get(Joint::RightWrist).unwrap();
        assert!((wrist.x - 0.1).abs() < 1e-6);
        assert!((wrist.y - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_flat_rejects_wrong_length() {
        assert!(PoseFrame::from_flat(&[0.0; 50], 640.0, 480.0, 0.0).is_none());
    }

    #[test]
    fn test_flat_layout() {
        let mut data = [0.0f32; 51];
        // left elbow is keypoint 7
        data[7 * 3] = 100.0;
        data[7 * 3 + 1] = 200.0;
        data[7 * 3 + 2] = 0.8;
        let frame = PoseFrame::from_flat(&data, 400.0, 400.0, 0.5).unwrap();
        let elbow = frame.get(Joint::LeftElbow).unwrap();
        assert_eq!(elbow.as_tuple(), (0.25, 0.5));
        assert_eq!(frame.len(), 1);
    }
}
