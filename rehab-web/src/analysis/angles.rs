//! Joint angle calculation using dot product
//!
//! Calculates the included angle at the elbow joint from the upper arm
//! (shoulder→elbow) and forearm (elbow→wrist).

use nalgebra::Vector2;

use crate::pose::{PoseFrame, Side};

/// Calculate the included elbow angle in degrees
///
/// Uses dot product formula: cos(θ) = (v1 · v2) / (|v1| × |v2|)
/// with both vectors anchored at the elbow.
///
/// Returns angle in degrees:
/// - 0° = fully folded (wrist back on the shoulder)
/// - 90° = right angle
/// - 180° = fully straight (arm extended)
///
/// Returns `None` when two points coincide and the angle is undefined.
pub fn calculate_joint_angle(
    shoulder: (f32, f32),
    elbow: (f32, f32),
    wrist: (f32, f32),
) -> Option<f32> {
    let elbow = Vector2::new(elbow.0, elbow.1);

    // Upper arm, pointing back toward the shoulder
    let v1 = Vector2::new(shoulder.0, shoulder.1) - elbow;

    // Forearm
    let v2 = Vector2::new(wrist.0, wrist.1) - elbow;

    let mag1 = v1.norm();
    let mag2 = v2.norm();

    // Zero-length segment (or NaN input): no angle
    if !(mag1 > 0.0 && mag2 > 0.0) {
        return None;
    }

    // Rounding can push the ratio just past ±1
    let cos_angle = (v1.dot(&v2) / (mag1 * mag2)).clamp(-1.0, 1.0);

    Some(cos_angle.acos().to_degrees())
}

/// Elbow angle of one arm in a frame, `None` if any joint is missing
pub fn arm_angle(frame: &PoseFrame, side: Side) -> Option<f32> {
    let (shoulder, elbow, wrist) = side.arm();
    calculate_joint_angle(
        frame.get(shoulder)?.as_tuple(),
        frame.get(elbow)?.as_tuple(),
        frame.get(wrist)?.as_tuple(),
    )
}
