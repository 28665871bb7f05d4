//! Web module - JS ↔ Rust bridge
//!
//! All #[wasm_bindgen] classes and history functions live here.
//! Re-exports only in mod.rs, logic in submodules.

mod coach;
mod convert;
mod history;
mod local_storage;
mod navigator;

pub use coach::ExerciseCoach;
pub use history::{
    clear_sessions, create_memory, delete_memory, delete_session, get_check_ins,
    get_latest_check_in, get_memories, get_memory, get_progress, get_session_stats,
    get_sessions, has_checked_in_today, is_first_launch, mark_launched, save_check_in,
    save_memory,
};
pub use local_storage::LocalStorage;
pub use navigator::BioNavigator;
