//! Dashboard totals and progress series over stored sessions

use serde::Serialize;

use super::record::ExerciseSession;

/// Totals shown on the dashboard
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub total_sessions: usize,
    pub total_reps: u64,
    /// Mean of per-session form scores, 0 with no sessions
    pub average_form_score: f32,
    pub total_minutes: f32,
}

impl SessionStats {
    pub fn from_sessions(sessions: &[ExerciseSession]) -> Self {
        if sessions.is_empty() {
            return Self::default();
        }

        let total_reps = sessions.iter().map(|s| u64::from(s.reps_completed)).sum();
        let score_sum: u32 = sessions.iter().map(|s| s.overall_form.score()).sum();
        let total_seconds: u64 = sessions.iter().map(|s| s.duration_seconds).sum();

        Self {
            total_sessions: sessions.len(),
            total_reps,
            average_form_score: score_sum as f32 / sessions.len() as f32,
            total_minutes: total_seconds as f32 / 60.0,
        }
    }
}

/// One point of the progress chart
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPoint {
    pub label: String,
    pub reps: u32,
    pub max_angle: f32,
}

/// Chronological series, labelled "Session 1", "Session 2", ...
pub fn progress_points(sessions: &[ExerciseSession]) -> Vec<ProgressPoint> {
    let mut ordered: Vec<&ExerciseSession> = sessions.iter().collect();
    ordered.sort_by_key(|s| s.timestamp);
    ordered
        .into_iter()
        .enumerate()
        .map(|(i, s)| ProgressPoint {
            label: format!("Session {}", i + 1),
            reps: s.reps_completed,
            max_angle: s.max_angle,
        })
        .collect()
}
