//! Memory world description and points of interest
//!
//! A world is built from a saved memory's panorama. Raising the arm near a
//! point of interest unlocks it.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::storage::Memory;

/// Scene-space position
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenePoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl ScenePoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_vector(self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    pub id: String,
    pub name: String,
    pub position: ScenePoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub unlocked: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorldKind {
    Panorama,
    #[serde(rename = "3d-scene")]
    Scene3d,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldConfig {
    pub memory_id: String,
    #[serde(rename = "type")]
    pub kind: WorldKind,
    pub url: String,
    #[serde(default)]
    pub initial_position: ScenePoint,
    #[serde(default)]
    pub points_of_interest: Vec<PointOfInterest>,
}

impl WorldConfig {
    /// Panorama world for a memory, `None` until the memory has a world URL
    pub fn from_memory(memory: &Memory) -> Option<WorldConfig> {
        let url = memory.world_url.clone()?;
        Some(WorldConfig {
            memory_id: memory.id.clone(),
            kind: WorldKind::Panorama,
            url,
            initial_position: ScenePoint::default(),
            points_of_interest: Vec::new(),
        })
    }

    /// Unlock every locked point within `radius` of `position`.
    /// Returns the ids unlocked by this call.
    pub fn unlock_near(&mut self, position: Vector3<f32>, radius: f32) -> Vec<String> {
        let mut unlocked = Vec::new();
        for poi in self.points_of_interest.iter_mut().filter(|p| !p.unlocked) {
            if (poi.position.to_vector() - position).norm() <= radius {
                poi.unlocked = true;
                log::info!("unlocked point of interest {}", poi.name);
                unlocked.push(poi.id.clone());
            }
        }
        unlocked
    }
}
