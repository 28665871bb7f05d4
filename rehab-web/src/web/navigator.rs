//! Bio-navigator exported to JS
//!
//! Drives the memory-world viewer from body motion. Commands go to the JS
//! callbacks registered with `onMoveForward` / `onRotate` and to an internal
//! reference camera used for point-of-interest unlocking.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::convert::{from_js, js_error, to_js};
use super::local_storage::LocalStorage;
use crate::navigation::{
    BioController, BioControllerConfig, CommandQueue, CommandSink, FirstPersonCamera,
    NavigationCommand, WorldConfig,
};
use crate::pose::PoseFrame;
use crate::storage::MemoryLibrary;

/// Forwards commands to registered JS functions
#[derive(Clone, Default)]
struct JsCallbacks {
    on_move_forward: Option<js_sys::Function>,
    on_rotate: Option<js_sys::Function>,
}

impl JsCallbacks {
    fn call(callback: &Option<js_sys::Function>, arg: f32) {
        if let Some(callback) = callback {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_f64(arg as f64)) {
                log::warn!("navigation callback threw: {:?}", e);
            }
        }
    }
}

impl CommandSink for JsCallbacks {
    fn move_forward(&mut self, distance: f32) {
        Self::call(&self.on_move_forward, distance);
    }

    fn rotate(&mut self, delta_radians: f32) {
        Self::call(&self.on_rotate, delta_radians);
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NavigationReport {
    moved: bool,
    rotated: bool,
    arm_raised: bool,
    /// Points of interest unlocked by this frame
    unlocked: Vec<String>,
    camera: FirstPersonCamera,
}

#[derive(Default)]
struct NavigatorState {
    controller: BioController,
    callbacks: JsCallbacks,
    camera: FirstPersonCamera,
    world: Option<WorldConfig>,
}

impl NavigatorState {
    /// Run the detectors and move the camera. Returns the issued commands
    /// for the JS callbacks, which run after the state borrow is released.
    fn step(
        &mut self,
        frame: &PoseFrame,
        frame_width: f32,
        frame_height: f32,
    ) -> (NavigationReport, Vec<NavigationCommand>) {
        let mut queue = CommandQueue::new();
        let motion = self
            .controller
            .process_frame(frame, frame_width, frame_height, &mut queue);

        let commands = queue.drain();
        for &command in &commands {
            self.camera.apply(command);
        }

        let mut unlocked = Vec::new();
        if motion.arm_raised {
            let radius = self.controller.config().arm_raise.unlock_distance;
            if let Some(world) = self.world.as_mut() {
                unlocked = world.unlock_near(self.camera.position, radius);
            }
        }

        let report = NavigationReport {
            moved: motion.moved,
            rotated: motion.rotated,
            arm_raised: motion.arm_raised,
            unlocked,
            camera: self.camera,
        };
        (report, commands)
    }

    fn idle_report(&self) -> NavigationReport {
        NavigationReport {
            moved: false,
            rotated: false,
            arm_raised: false,
            unlocked: Vec::new(),
            camera: self.camera,
        }
    }
}

#[wasm_bindgen]
pub struct BioNavigator {
    state: Rc<RefCell<NavigatorState>>,
}

impl BioNavigator {
    fn dispatch(
        &self,
        frame: Option<PoseFrame>,
        frame_width: f32,
        frame_height: f32,
    ) -> Result<JsValue, JsValue> {
        let (report, commands, mut callbacks) = {
            let mut state = self.state.borrow_mut();
            match frame {
                Some(frame) => {
                    let (report, commands) = state.step(&frame, frame_width, frame_height);
                    (report, commands, state.callbacks.clone())
                }
                None => (state.idle_report(), Vec::new(), JsCallbacks::default()),
            }
        };

        for command in commands {
            callbacks.apply(command);
        }
        to_js(&report)
    }
}

#[wasm_bindgen]
impl BioNavigator {
    /// @param {object} [config] - Partial BioControllerConfig
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<BioNavigator, JsValue> {
        let config: BioControllerConfig = from_js(config)?.unwrap_or_default();
        let controller = BioController::new(config).map_err(js_error)?;

        Ok(BioNavigator {
            state: Rc::new(RefCell::new(NavigatorState {
                controller,
                ..Default::default()
            })),
        })
    }

    // ========================================================================
    // Callbacks
    // ========================================================================

    /// @param {Function} callback - Called with the step distance
    #[wasm_bindgen(js_name = onMoveForward)]
    pub fn on_move_forward(&self, callback: js_sys::Function) {
        self.state.borrow_mut().callbacks.on_move_forward = Some(callback);
    }

    /// @param {Function} callback - Called with the yaw delta in radians
    #[wasm_bindgen(js_name = onRotate)]
    pub fn on_rotate(&self, callback: js_sys::Function) {
        self.state.borrow_mut().callbacks.on_rotate = Some(callback);
    }

    // ========================================================================
    // Frame input
    // ========================================================================

    /// @param {object|null} frame - Map of joint name to {x, y, z?, visibility?}
    /// @param {number} frame_width - Video width in pixels
    /// @param {number} frame_height - Video height in pixels
    #[wasm_bindgen(js_name = processFrame)]
    pub fn process_frame(
        &self,
        frame: JsValue,
        frame_width: f32,
        frame_height: f32,
    ) -> Result<JsValue, JsValue> {
        let frame: Option<PoseFrame> = from_js(frame)?;
        self.dispatch(frame, frame_width, frame_height)
    }

    #[wasm_bindgen(js_name = processKeypoints)]
    pub fn process_keypoints(
        &self,
        data: &[f32],
        video_width: f32,
        video_height: f32,
        min_score: f32,
    ) -> Result<JsValue, JsValue> {
        let frame = PoseFrame::from_flat(data, video_width, video_height, min_score);
        self.dispatch(frame, video_width, video_height)
    }

    // ========================================================================
    // World
    // ========================================================================

    /// Load the world for a saved memory and mark the memory as used.
    ///
    /// @returns {object|null} WorldConfig, or null if the memory has no world yet
    #[wasm_bindgen(js_name = enterMemory)]
    pub fn enter_memory(&self, memory_id: &str) -> Result<JsValue, JsValue> {
        let library = MemoryLibrary::new(LocalStorage::open().map_err(js_error)?);
        let memory = library
            .get(memory_id)
            .map_err(js_error)?
            .ok_or_else(|| js_error(format!("unknown memory {memory_id}")))?;
        library.touch(memory_id, Utc::now()).map_err(js_error)?;

        let world = WorldConfig::from_memory(&memory);
        let mut state = self.state.borrow_mut();
        state.camera = FirstPersonCamera::default();
        state.world = world.clone();
        to_js(&world)
    }

    /// Use an explicit world, e.g. one with points of interest
    #[wasm_bindgen(js_name = setWorld)]
    pub fn set_world(&self, world: JsValue) -> Result<(), JsValue> {
        let world: Option<WorldConfig> = from_js(world)?;
        let mut state = self.state.borrow_mut();
        state.camera = match &world {
            Some(w) => FirstPersonCamera::at(w.initial_position.to_vector()),
            None => FirstPersonCamera::default(),
        };
        state.world = world;
        Ok(())
    }

    #[wasm_bindgen(js_name = getWorld)]
    pub fn get_world(&self) -> Result<JsValue, JsValue> {
        to_js(&self.state.borrow().world)
    }

    #[wasm_bindgen(js_name = getCamera)]
    pub fn get_camera(&self) -> Result<JsValue, JsValue> {
        to_js(&self.state.borrow().camera)
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Replace the configuration; detector state is kept
    #[wasm_bindgen(js_name = updateConfig)]
    pub fn update_config(&self, config: JsValue) -> Result<(), JsValue> {
        let config: BioControllerConfig = from_js(config)?.unwrap_or_default();
        self.state
            .borrow_mut()
            .controller
            .update_config(config)
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = getConfig)]
    pub fn get_config(&self) -> Result<JsValue, JsValue> {
        to_js(self.state.borrow().controller.config())
    }

    /// Clear detector memory and return the camera to the world start
    pub fn reset(&self) {
        let mut state = self.state.borrow_mut();
        state.controller.reset();
        state.camera = match &state.world {
            Some(w) => FirstPersonCamera::at(w.initial_position.to_vector()),
            None => FirstPersonCamera::default(),
        };
    }
}
