//! Navigation commands sent to the 3D view
//!
//! The bio-controller never touches a renderer directly. It writes commands
//! to a sink supplied by the caller: a JS callback pair, the reference
//! camera, or a queue drained later.

use std::collections::VecDeque;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NavigationCommand {
    MoveForward { distance: f32 },
    #[serde(rename_all = "camelCase")]
    Rotate { delta_radians: f32 },
}

/// Receiver of navigation commands
pub trait CommandSink {
    fn move_forward(&mut self, distance: f32);
    fn rotate(&mut self, delta_radians: f32);

    fn apply(&mut self, command: NavigationCommand) {
        match command {
            NavigationCommand::MoveForward { distance } => self.move_forward(distance),
            NavigationCommand::Rotate { delta_radians } => self.rotate(delta_radians),
        }
    }
}

/// FIFO of commands for a renderer that polls
#[derive(Clone, Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<NavigationCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every pending command, oldest first
    pub fn drain(&mut self) -> Vec<NavigationCommand> {
        self.pending.drain(..).collect()
    }
}

impl CommandSink for CommandQueue {
    fn move_forward(&mut self, distance: f32) {
        self.pending.push_back(NavigationCommand::MoveForward { distance });
    }

    fn rotate(&mut self, delta_radians: f32) {
        self.pending.push_back(NavigationCommand::Rotate { delta_radians });
    }
}
