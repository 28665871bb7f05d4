//! Stored history exported to JS: sessions, progress, check-ins, memories
//!
//! Reads that fail are logged and come back empty so the dashboard still
//! renders. Writes report failures to the caller.

use chrono::Utc;
use uuid::Uuid;
use wasm_bindgen::prelude::*;

use super::convert::{from_js, js_error, to_js};
use super::local_storage::LocalStorage;
use crate::error::StoreError;
use crate::session::{progress_points, ExerciseSession, SessionStats};
use crate::storage::{CheckInScores, CheckInStore, DailyCheckIn, Memory, MemoryLibrary, SessionStore};

fn storage() -> Result<LocalStorage, JsValue> {
    LocalStorage::open().map_err(js_error)
}

fn or_empty<T>(what: &str, result: Result<Vec<T>, StoreError>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        log::error!("Error loading {}: {}", what, e);
        Vec::new()
    })
}

fn load_sessions() -> Vec<ExerciseSession> {
    let result = LocalStorage::open().and_then(|s| SessionStore::new(s).list());
    or_empty("sessions", result)
}

// ============================================================================
// SESSIONS
// ============================================================================

#[wasm_bindgen(js_name = getSessions)]
pub fn get_sessions() -> Result<JsValue, JsValue> {
    to_js(&load_sessions())
}

/// @returns {object} {totalSessions, totalReps, averageFormScore, totalMinutes}
#[wasm_bindgen(js_name = getSessionStats)]
pub fn get_session_stats() -> Result<JsValue, JsValue> {
    to_js(&SessionStats::from_sessions(&load_sessions()))
}

/// Chart series, oldest session first
#[wasm_bindgen(js_name = getProgress)]
pub fn get_progress() -> Result<JsValue, JsValue> {
    to_js(&progress_points(&load_sessions()))
}

#[wasm_bindgen(js_name = deleteSession)]
pub fn delete_session(id: &str) -> Result<bool, JsValue> {
    let id = Uuid::parse_str(id).map_err(js_error)?;
    SessionStore::new(storage()?).delete(id).map_err(js_error)
}

#[wasm_bindgen(js_name = clearSessions)]
pub fn clear_sessions() -> Result<(), JsValue> {
    SessionStore::new(storage()?).clear().map_err(js_error)
}

// ============================================================================
// FIRST LAUNCH
// ============================================================================

/// Unreadable storage counts as a first launch
#[wasm_bindgen(js_name = isFirstLaunch)]
pub fn is_first_launch() -> bool {
    LocalStorage::open()
        .and_then(|s| SessionStore::new(s).is_first_launch())
        .unwrap_or(true)
}

#[wasm_bindgen(js_name = markLaunched)]
pub fn mark_launched() -> Result<(), JsValue> {
    SessionStore::new(storage()?).mark_launched().map_err(js_error)
}

// ============================================================================
// CHECK-INS
// ============================================================================

/// Validate and store today's check-in.
///
/// @param {object} scores - {mood, painLevel, energyLevel, sleepQuality}
/// @param {string} [notes]
/// @returns {object} The stored DailyCheckIn
#[wasm_bindgen(js_name = saveCheckIn)]
pub fn save_check_in(scores: JsValue, notes: Option<String>) -> Result<JsValue, JsValue> {
    let scores: CheckInScores =
        from_js(scores)?.ok_or_else(|| js_error("check-in scores are required"))?;
    let check_in = DailyCheckIn::new(scores, notes.as_deref(), Utc::now()).map_err(js_error)?;
    CheckInStore::new(storage()?).save(&check_in).map_err(js_error)?;
    to_js(&check_in)
}

#[wasm_bindgen(js_name = getCheckIns)]
pub fn get_check_ins() -> Result<JsValue, JsValue> {
    let result = LocalStorage::open().and_then(|s| CheckInStore::new(s).list());
    to_js(&or_empty("check-ins", result))
}

/// Uses the UTC calendar day, matching the stored `date` field
#[wasm_bindgen(js_name = hasCheckedInToday)]
pub fn has_checked_in_today() -> bool {
    let today = Utc::now().date_naive();
    LocalStorage::open()
        .and_then(|s| CheckInStore::new(s).has_checked_in_on(today))
        .unwrap_or_else(|e| {
            log::error!("Error loading check-ins: {}", e);
            false
        })
}

#[wasm_bindgen(js_name = getLatestCheckIn)]
pub fn get_latest_check_in() -> Result<JsValue, JsValue> {
    let latest = CheckInStore::new(storage()?).latest().map_err(js_error)?;
    to_js(&latest)
}

// ============================================================================
// MEMORIES
// ============================================================================

/// Create a memory from a name and photo URLs
///
/// @returns {object} The stored Memory
#[wasm_bindgen(js_name = createMemory)]
pub fn create_memory(name: &str, photos: Vec<String>) -> Result<JsValue, JsValue> {
    let memory = Memory::new(name, photos, Utc::now());
    MemoryLibrary::new(storage()?).save(&memory).map_err(js_error)?;
    to_js(&memory)
}

/// Insert or replace by id
#[wasm_bindgen(js_name = saveMemory)]
pub fn save_memory(memory: JsValue) -> Result<(), JsValue> {
    let memory: Memory = from_js(memory)?.ok_or_else(|| js_error("memory is required"))?;
    MemoryLibrary::new(storage()?).save(&memory).map_err(js_error)
}

#[wasm_bindgen(js_name = getMemories)]
pub fn get_memories() -> Result<JsValue, JsValue> {
    let result = LocalStorage::open().and_then(|s| MemoryLibrary::new(s).list());
    to_js(&or_empty("memories", result))
}

#[wasm_bindgen(js_name = getMemory)]
pub fn get_memory(id: &str) -> Result<JsValue, JsValue> {
    let memory = MemoryLibrary::new(storage()?).get(id).map_err(js_error)?;
    to_js(&memory)
}

#[wasm_bindgen(js_name = deleteMemory)]
pub fn delete_memory(id: &str) -> Result<(), JsValue> {
    MemoryLibrary::new(storage()?).delete(id).map_err(js_error)
}
