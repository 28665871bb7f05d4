//! Session module - per-session loop, summary records and progress stats
//!
//! Re-exports only. All logic in submodules.

mod aggregator;
mod record;
mod recorder;
mod stats;

pub use aggregator::{overall_form, summarize, summarize_angles, AngleSummary};
pub use record::ExerciseSession;
pub use recorder::SessionRecorder;
pub use stats::{progress_points, ProgressPoint, SessionStats};
