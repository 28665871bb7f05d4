//! Completed exercise session record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::FormQuality;

/// Summary of one exercise attempt. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSession {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub reps_completed: u32,
    pub max_angle: f32,
    pub average_angle: f32,
    pub duration_seconds: u64,
    pub overall_form: FormQuality,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_stored_format() {
        let session = ExerciseSession {
            id: Uuid::nil(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
            reps_completed: 10,
            max_angle: 98.5,
            average_angle: 85.0,
            duration_seconds: 120,
            overall_form: FormQuality::Good,
        };

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["repsCompleted"], 10);
        assert_eq!(json["overallForm"], "good");
        assert_eq!(json["timestamp"], "2024-03-01T09:30:00Z");

        let back: ExerciseSession = serde_json::from_value(json).unwrap();
        assert_eq!(back, session);
    }

    #[test]
    fn test_reads_browser_timestamp() {
        // Date.toJSON() output carries milliseconds
        let json = r#"{
            "id": "0b6f3c1e-8f0a-4a52-9d7e-2f0c5f6b7a11",
            "timestamp": "2024-03-01T09:30:00.123Z",
            "repsCompleted": 4,
            "maxAngle": 101.2,
            "averageAngle": 77.7,
            "durationSeconds": 45,
            "overallForm": "excellent"
        }"#;
        let session: ExerciseSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.timestamp.timestamp_subsec_millis(), 123);
        assert_eq!(session.overall_form, FormQuality::Excellent);
    }
}
