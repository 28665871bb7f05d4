//! Storage module - sessions, check-ins and memories over a key-value store
//!
//! Re-exports only. All logic in submodules.

mod checkins;
mod memories;
mod sessions;
mod store;

pub use checkins::{CheckInScores, CheckInStore, DailyCheckIn};
pub use memories::{Memory, MemoryLibrary};
pub use sessions::SessionStore;
pub use store::{
    InMemoryStore, KeyValueStore, CHECKINS_KEY, FIRST_LAUNCH_KEY, MEMORIES_KEY, SESSIONS_KEY,
};
