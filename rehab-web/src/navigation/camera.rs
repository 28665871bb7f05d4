//! Reference first-person camera
//!
//! Applies navigation commands the way the panorama viewer does: rotation
//! turns about the vertical axis, forward motion follows the view direction.
//! Hosts with their own camera can ignore this and implement `CommandSink`.

use nalgebra::Vector3;
use serde::Serialize;

use super::commands::CommandSink;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FirstPersonCamera {
    pub position: Vector3<f32>,
    /// Heading in radians; 0 looks down -Z
    pub yaw: f32,
}

impl FirstPersonCamera {
    pub fn new() -> Self {
        Self::at(Vector3::zeros())
    }

    pub fn at(position: Vector3<f32>) -> Self {
        Self { position, yaw: 0.0 }
    }

    /// Unit view direction on the ground plane
    pub fn direction(&self) -> Vector3<f32> {
        Vector3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandSink for FirstPersonCamera {
    fn move_forward(&mut self, distance: f32) {
        self.position += self.direction() * distance;
    }

    fn rotate(&mut self, delta_radians: f32) {
        self.yaw += delta_radians;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_forward_is_negative_z() {
        let mut camera = FirstPersonCamera::new();
        camera.move_forward(0.5);
        assert!((camera.position - Vector3::new(0.0, 0.0, -0.5)).norm() < 1e-6);
    }

    #[test]
    fn test_turn_then_walk() {
        let mut camera = FirstPersonCamera::new();
        camera.rotate(FRAC_PI_2);
        camera.move_forward(1.0);
        // Quarter turn to the left faces -X
        assert!((camera.position - Vector3::new(-1.0, 0.0, 0.0)).norm() < 1e-5);
        assert_eq!(camera.yaw, FRAC_PI_2);
    }
}
