//! Exercise coach exported to JS
//!
//! One instance per exercise screen. JS feeds it a pose per video frame and
//! calls `finish` when the target is reached or the user stops.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::convert::{from_js, js_error, to_js};
use super::local_storage::LocalStorage;
use crate::analysis::{ExerciseAnalyzer, ExerciseConfig, FormQuality, PoseMetrics};
use crate::pose::PoseFrame;
use crate::session::{ExerciseSession, SessionRecorder};
use crate::storage::SessionStore;

/// Per-frame result handed back to JS
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameReport {
    shoulder_angle: Option<f32>,
    form_quality: FormQuality,
    is_rep_detected: bool,
    is_at_top: bool,
    feedback: &'static str,
    reps_completed: u32,
    target_reps: u32,
    is_complete: bool,
}

struct CoachState {
    analyzer: ExerciseAnalyzer,
    recorder: SessionRecorder,
}

impl CoachState {
    fn report(&self, metrics: PoseMetrics) -> FrameReport {
        FrameReport {
            shoulder_angle: metrics.shoulder_angle,
            form_quality: metrics.form_quality,
            is_rep_detected: metrics.is_rep_detected,
            is_at_top: metrics.is_at_top,
            feedback: metrics.feedback().message(),
            reps_completed: self.recorder.reps_completed(),
            target_reps: self.recorder.target_reps(),
            is_complete: self.recorder.is_complete(),
        }
    }

    /// Swap in a fresh recorder and return the old one
    fn restart(&mut self) -> SessionRecorder {
        let fresh = SessionRecorder::start(self.analyzer.clone(), Utc::now());
        std::mem::replace(&mut self.recorder, fresh)
    }
}

/// Saving never fails the caller; the record is still returned to JS
fn persist(session: &ExerciseSession) {
    let result = LocalStorage::open().and_then(|storage| SessionStore::new(storage).save(session));
    if let Err(e) = result {
        log::error!("Error saving session {}: {}", session.id, e);
    }
}

#[wasm_bindgen]
pub struct ExerciseCoach {
    state: Rc<RefCell<CoachState>>,
}

#[wasm_bindgen]
impl ExerciseCoach {
    /// Start a session.
    ///
    /// @param {object} [config] - Partial ExerciseConfig; omitted fields use defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ExerciseCoach, JsValue> {
        let config: ExerciseConfig = from_js(config)?.unwrap_or_default();
        let analyzer = ExerciseAnalyzer::new(config).map_err(js_error)?;
        let recorder = SessionRecorder::start(analyzer.clone(), Utc::now());

        Ok(ExerciseCoach {
            state: Rc::new(RefCell::new(CoachState { analyzer, recorder })),
        })
    }

    // ========================================================================
    // Frame input
    // ========================================================================

    /// Analyze one pose.
    ///
    /// @param {object|null} frame - Map of joint name to {x, y, z?, visibility?}
    #[wasm_bindgen(js_name = processFrame)]
    pub fn process_frame(&self, frame: JsValue) -> Result<JsValue, JsValue> {
        let frame: Option<PoseFrame> = from_js(frame)?;
        let mut state = self.state.borrow_mut();
        let metrics = state.recorder.record(frame.as_ref());
        to_js(&state.report(metrics))
    }

    /// Analyze a packed MoveNet pose (17 × [x, y, score], pixel coordinates).
    /// A malformed array counts as a frame with no person.
    #[wasm_bindgen(js_name = processKeypoints)]
    pub fn process_keypoints(
        &self,
        data: &[f32],
        video_width: f32,
        video_height: f32,
        min_score: f32,
    ) -> Result<JsValue, JsValue> {
        let frame = PoseFrame::from_flat(data, video_width, video_height, min_score);
        let mut state = self.state.borrow_mut();
        let metrics = state.recorder.record(frame.as_ref());
        to_js(&state.report(metrics))
    }

    // ========================================================================
    // Session control
    // ========================================================================

    /// End the session, store it, and start a new one.
    ///
    /// @returns {object} The ExerciseSession record
    pub fn finish(&self) -> Result<JsValue, JsValue> {
        let finished = self.state.borrow_mut().restart();
        let session = finished.finish(Utc::now());
        persist(&session);
        to_js(&session)
    }

    /// Discard the current session without saving
    pub fn reset(&self) {
        self.state.borrow_mut().restart();
        log::debug!("exercise session discarded");
    }

    #[wasm_bindgen(js_name = setPaused)]
    pub fn set_paused(&self, paused: bool) {
        self.state.borrow_mut().recorder.set_paused(paused);
    }

    #[wasm_bindgen(js_name = isPaused)]
    pub fn is_paused(&self) -> bool {
        self.state.borrow().recorder.is_paused()
    }

    pub fn reps(&self) -> u32 {
        self.state.borrow().recorder.reps_completed()
    }

    #[wasm_bindgen(js_name = targetReps)]
    pub fn target_reps(&self) -> u32 {
        self.state.borrow().recorder.target_reps()
    }

    #[wasm_bindgen(js_name = isComplete)]
    pub fn is_complete(&self) -> bool {
        self.state.borrow().recorder.is_complete()
    }

    #[wasm_bindgen(js_name = elapsedSeconds)]
    pub fn elapsed_seconds(&self) -> f64 {
        self.state.borrow().recorder.elapsed_seconds(Utc::now()) as f64
    }

    /// Active configuration as a plain object
    pub fn config(&self) -> Result<JsValue, JsValue> {
        to_js(self.state.borrow().analyzer.config())
    }
}
