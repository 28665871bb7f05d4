//! Daily wellbeing check-ins

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::store::{read_list, write_list, KeyValueStore, CHECKINS_KEY};
use crate::error::{CheckInError, StoreError};

/// Self-reported scores for one day.
///
/// Scores: mood 1-5, pain 0-10, energy 1-5, sleep 1-5.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCheckIn {
    pub id: Uuid,
    /// Calendar day, serialized as YYYY-MM-DD
    pub date: NaiveDate,
    pub mood: u8,
    pub pain_level: u8,
    pub energy_level: u8,
    pub sleep_quality: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Scores as entered, before validation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInScores {
    pub mood: u8,
    pub pain_level: u8,
    pub energy_level: u8,
    pub sleep_quality: u8,
}

fn ensure_range(field: &'static str, value: u8, min: u8, max: u8) -> Result<(), CheckInError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(CheckInError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

impl CheckInScores {
    pub fn validate(&self) -> Result<(), CheckInError> {
        ensure_range("mood", self.mood, 1, 5)?;
        ensure_range("painLevel", self.pain_level, 0, 10)?;
        ensure_range("energyLevel", self.energy_level, 1, 5)?;
        ensure_range("sleepQuality", self.sleep_quality, 1, 5)?;
        Ok(())
    }
}

impl DailyCheckIn {
    /// Validated check-in dated by `timestamp`'s UTC day.
    /// Blank notes are dropped.
    pub fn new(
        scores: CheckInScores,
        notes: Option<&str>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, CheckInError> {
        scores.validate()?;
        let notes = notes
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(Self {
            id: Uuid::new_v4(),
            date: timestamp.date_naive(),
            mood: scores.mood,
            pain_level: scores.pain_level,
            energy_level: scores.energy_level,
            sleep_quality: scores.sleep_quality,
            notes,
            timestamp,
        })
    }
}

pub struct CheckInStore<S> {
    store: S,
}

impl<S: KeyValueStore> CheckInStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn save(&self, check_in: &DailyCheckIn) -> Result<(), StoreError> {
        let mut check_ins = self.list()?;
        check_ins.push(check_in.clone());
        write_list(&self.store, CHECKINS_KEY, &check_ins)
    }

    pub fn list(&self) -> Result<Vec<DailyCheckIn>, StoreError> {
        read_list(&self.store, CHECKINS_KEY)
    }

    pub fn has_checked_in_on(&self, date: NaiveDate) -> Result<bool, StoreError> {
        Ok(self.list()?.iter().any(|c| c.date == date))
    }

    /// Most recent by timestamp
    pub fn latest(&self) -> Result<Option<DailyCheckIn>, StoreError> {
        Ok(self.list()?.into_iter().max_by_key(|c| c.timestamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use chrono::{Duration, TimeZone};

    fn scores() -> CheckInScores {
        CheckInScores {
            mood: 3,
            pain_level: 3,
            energy_level: 3,
            sleep_quality: 3,
        }
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_score_ranges() {
        let edges = CheckInScores {
            mood: 5,
            pain_level: 0,
            energy_level: 1,
            sleep_quality: 5,
        };
        assert!(edges.validate().is_ok());

        let bad_mood = CheckInScores { mood: 0, ..scores() };
        assert_eq!(
            bad_mood.validate(),
            Err(CheckInError::OutOfRange {
                field: "mood",
                value: 0,
                min: 1,
                max: 5
            })
        );

        let bad_pain = CheckInScores {
            pain_level: 11,
            ..scores()
        };
        assert!(DailyCheckIn::new(bad_pain, None, at(1, 9)).is_err());

        let bad_sleep = CheckInScores {
            sleep_quality: 6,
            ..scores()
        };
        assert!(bad_sleep.validate().is_err());
    }

    #[test]
    fn test_blank_notes_dropped() {
        let blank = DailyCheckIn::new(scores(), Some("   "), at(1, 9)).unwrap();
        assert_eq!(blank.notes, None);

        let kept = DailyCheckIn::new(scores(), Some("  slept badly "), at(1, 9)).unwrap();
        assert_eq!(kept.notes.as_deref(), Some("slept badly"));
    }

    #[test]
    fn test_date_format() {
        let check_in = DailyCheckIn::new(scores(), None, at(7, 23)).unwrap();
        let json = serde_json::to_value(&check_in).unwrap();
        assert_eq!(json["date"], "2024-06-07");
        assert_eq!(json["painLevel"], 3);
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn test_checked_in_today_and_latest() {
        let check_ins = CheckInStore::new(InMemoryStore::new());
        let day = at(2, 8).date_naive();
        assert!(!check_ins.has_checked_in_on(day).unwrap());
        assert_eq!(check_ins.latest().unwrap(), None);

        let morning = DailyCheckIn::new(scores(), None, at(2, 8)).unwrap();
        let evening = DailyCheckIn::new(scores(), Some("tired"), at(2, 8) + Duration::hours(11)).unwrap();
        check_ins.save(&evening).unwrap();
        check_ins.save(&morning).unwrap();

        assert!(check_ins.has_checked_in_on(day).unwrap());
        assert!(!check_ins.has_checked_in_on(at(3, 8).date_naive()).unwrap());
        assert_eq!(check_ins.latest().unwrap(), Some(evening));
        assert_eq!(check_ins.list().unwrap().len(), 2);
    }
}
