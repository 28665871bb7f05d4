//! Per-session exercise loop
//!
//! Owns everything one exercise attempt accumulates: the repetition
//! detector state, the angle history and the rep counter. One recorder per
//! session; dropping it ends the session.

use chrono::{DateTime, Utc};

use super::aggregator::summarize;
use super::record::ExerciseSession;
use crate::analysis::{ExerciseAnalyzer, PoseMetrics, RepetitionState};
use crate::pose::PoseFrame;

pub struct SessionRecorder {
    analyzer: ExerciseAnalyzer,
    state: RepetitionState,
    angle_history: Vec<f32>,
    reps: u32,
    started_at: DateTime<Utc>,
    paused: bool,
}

impl SessionRecorder {
    pub fn start(analyzer: ExerciseAnalyzer, started_at: DateTime<Utc>) -> Self {
        log::info!("exercise session started");
        Self {
            analyzer,
            state: RepetitionState::new(),
            angle_history: Vec::new(),
            reps: 0,
            started_at,
            paused: false,
        }
    }

    /// Analyze a frame and fold it into the session.
    ///
    /// While paused the frame is still analyzed for display, but nothing
    /// is recorded and the detector state does not advance.
    pub fn record(&mut self, frame: Option<&PoseFrame>) -> PoseMetrics {
        let (metrics, next) = self.analyzer.analyze_frame(frame, self.state);
        if self.paused {
            return PoseMetrics {
                is_rep_detected: false,
                is_at_top: false,
                ..metrics
            };
        }

        self.state = next;
        if let Some(angle) = metrics.shoulder_angle {
            self.angle_history.push(angle);
        }
        if metrics.is_rep_detected {
            self.reps += 1;
            log::debug!("rep {} completed", self.reps);
        }
        metrics
    }

    pub fn reps_completed(&self) -> u32 {
        self.reps
    }

    pub fn target_reps(&self) -> u32 {
        self.analyzer.config().target_reps
    }

    /// Target reached; the caller should finish the session
    pub fn is_complete(&self) -> bool {
        self.reps >= self.target_reps()
    }

    pub fn angle_history(&self) -> &[f32] {
        &self.angle_history
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Whole seconds since start, never negative
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> u64 {
        (now - self.started_at).num_seconds().max(0) as u64
    }

    /// Close the session and build its record
    pub fn finish(self, now: DateTime<Utc>) -> ExerciseSession {
        let duration = self.elapsed_seconds(now);
        let session = summarize(
            &self.angle_history,
            self.reps,
            duration,
            now,
            self.analyzer.config(),
        );
        log::info!(
            "exercise session finished: {} reps in {}s ({})",
            session.reps_completed,
            session.duration_seconds,
            session.overall_form.as_str()
        );
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{ExerciseConfig, FormQuality};
    use crate::pose::{Joint, Landmark};
    use chrono::Duration;

    fn frame_at(angle_deg: f32) -> PoseFrame {
        let theta = angle_deg.to_radians();
        PoseFrame::new()
            .with(Joint::LeftShoulder, Landmark::new(0.3, 0.5))
            .with(Joint::LeftElbow, Landmark::new(0.5, 0.5))
            .with(
                Joint::LeftWrist,
                Landmark::new(0.5 - 0.2 * theta.cos(), 0.5 - 0.2 * theta.sin()),
            )
    }

    const ONE_REP: [f32; 6] = [40.0, 75.0, 95.0, 80.0, 55.0, 40.0];

    fn recorder(target_reps: u32) -> SessionRecorder {
        let analyzer = ExerciseAnalyzer::new(ExerciseConfig {
            target_reps,
            ..Default::default()
        })
        .unwrap();
        SessionRecorder::start(analyzer, Utc::now())
    }

    #[test]
    fn test_counts_reps_and_completes() {
        let mut rec = recorder(2);
        for angle in ONE_REP {
            rec.record(Some(&frame_at(angle)));
        }
        assert_eq!(rec.reps_completed(), 1);
        assert!(!rec.is_complete());

        for angle in ONE_REP {
            rec.record(Some(&frame_at(angle)));
        }
        assert_eq!(rec.reps_completed(), 2);
        assert!(rec.is_complete());
        assert_eq!(rec.angle_history().len(), 12);
    }

    #[test]
    fn test_missing_frames_not_in_history() {
        let mut rec = recorder(10);
        rec.record(None);
        rec.record(Some(&PoseFrame::new()));
        rec.record(Some(&frame_at(90.0)));
        assert_eq!(rec.angle_history().len(), 1);
    }

    #[test]
    fn test_paused_frames_are_ignored() {
        let mut rec = recorder(10);
        rec.set_paused(true);
        for angle in ONE_REP {
            let metrics = rec.record(Some(&frame_at(angle)));
            assert!(!metrics.is_rep_detected);
            assert!(metrics.shoulder_angle.is_some());
        }
        assert_eq!(rec.reps_completed(), 0);
        assert!(rec.angle_history().is_empty());

        rec.set_paused(false);
        for angle in ONE_REP {
            rec.record(Some(&frame_at(angle)));
        }
        assert_eq!(rec.reps_completed(), 1);
    }

    #[test]
    fn test_finish_builds_record() {
        let start = Utc::now();
        let analyzer = ExerciseAnalyzer::default();
        let mut rec = SessionRecorder::start(analyzer, start);
        for angle in [85.0, 90.0, 95.0] {
            rec.record(Some(&frame_at(angle)));
        }
        let session = rec.finish(start + Duration::milliseconds(61_900));
        assert_eq!(session.duration_seconds, 61);
        assert_eq!(session.reps_completed, 0);
        assert_eq!(session.overall_form, FormQuality::Excellent);
        assert!((session.max_angle - 95.0).abs() < 0.01);
        assert!((session.average_angle - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_clock_going_backwards_is_zero_duration() {
        let start = Utc::now();
        let rec = SessionRecorder::start(ExerciseAnalyzer::default(), start);
        assert_eq!(rec.elapsed_seconds(start - Duration::seconds(5)), 0);
    }
}
