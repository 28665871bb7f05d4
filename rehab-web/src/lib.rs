//! Rehab Web - pose-driven rehabilitation exercise coach
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules
//!
//! ```javascript
//! import init, { ExerciseCoach, initLogging } from './rehab_web.js';
//!
//! await init();
//! initLogging('info');
//!
//! const coach = new ExerciseCoach({ targetReps: 10 });
//! const report = coach.processFrame({
//!     leftShoulder: { x: 0.3, y: 0.5 },
//!     leftElbow: { x: 0.5, y: 0.5 },
//!     leftWrist: { x: 0.5, y: 0.3 },
//! });
//! if (report.isComplete) coach.finish();
//! ```

pub mod analysis;
pub mod error;
pub mod navigation;
pub mod pose;
pub mod session;
pub mod storage;
pub mod web;

use wasm_bindgen::prelude::*;

pub use analysis::{ExerciseAnalyzer, ExerciseConfig, FormQuality, PoseMetrics, RepetitionState};
pub use error::{CheckInError, ConfigError, StoreError};
pub use navigation::{BioController, BioControllerConfig, CommandSink, MotionResult};
pub use pose::{Joint, Landmark, PoseFrame};
pub use session::{ExerciseSession, SessionRecorder};
pub use web::{BioNavigator, ExerciseCoach};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Install the console logger.
///
/// @param {string} level - "trace", "debug", "info", "warn" or "error"
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "warn" => log::Level::Warn,
        "error" => log::Level::Error,
        _ => log::Level::Info,
    };

    // A second call keeps the first logger
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("rehab-web {} logging at {}", env!("CARGO_PKG_VERSION"), level);
}

#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
