//! Navigation module - bio-controller for the memory world
//!
//! Re-exports only. All logic in submodules.

mod camera;
mod commands;
mod config;
mod controller;
mod world;

pub use camera::FirstPersonCamera;
pub use commands::{CommandQueue, CommandSink, NavigationCommand};
pub use config::{ArmRaiseConfig, BioControllerConfig, RotationConfig, StepConfig};
pub use controller::{BioController, BioControllerState, MotionResult};
pub use world::{PointOfInterest, ScenePoint, WorldConfig, WorldKind};
