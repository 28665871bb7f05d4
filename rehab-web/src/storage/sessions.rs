//! Exercise session history and the first-launch flag

use uuid::Uuid;

use super::store::{read_list, write_list, KeyValueStore, FIRST_LAUNCH_KEY, SESSIONS_KEY};
use crate::error::StoreError;
use crate::session::ExerciseSession;

pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Append a finished session
    pub fn save(&self, session: &ExerciseSession) -> Result<(), StoreError> {
        let mut sessions = self.list()?;
        sessions.push(session.clone());
        write_list(&self.store, SESSIONS_KEY, &sessions)?;
        log::debug!("saved session {} ({} stored)", session.id, sessions.len());
        Ok(())
    }

    /// All sessions in insertion order
    pub fn list(&self) -> Result<Vec<ExerciseSession>, StoreError> {
        read_list(&self.store, SESSIONS_KEY)
    }

    pub fn get(&self, id: Uuid) -> Result<Option<ExerciseSession>, StoreError> {
        Ok(self.list()?.into_iter().find(|s| s.id == id))
    }

    /// Returns whether a session was removed
    pub fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut sessions = self.list()?;
        let before = sessions.len();
        sessions.retain(|s| s.id != id);
        if sessions.len() == before {
            return Ok(false);
        }
        write_list(&self.store, SESSIONS_KEY, &sessions)?;
        Ok(true)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        log::info!("clearing session history");
        self.store.remove(SESSIONS_KEY)
    }

    /// True until `mark_launched` stores "false"
    pub fn is_first_launch(&self) -> Result<bool, StoreError> {
        Ok(self.store.get(FIRST_LAUNCH_KEY)?.as_deref() != Some("false"))
    }

    pub fn mark_launched(&self) -> Result<(), StoreError> {
        self.store.set(FIRST_LAUNCH_KEY, "false")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FormQuality;
    use crate::storage::InMemoryStore;
    use chrono::{TimeZone, Utc};

    fn session(reps: u32) -> ExerciseSession {
        ExerciseSession {
            id: Uuid::new_v4(),
            timestamp: Utc.with_ymd_and_hms(2024, 2, 10, 8, 15, 30).unwrap(),
            reps_completed: reps,
            max_angle: 97.0,
            average_angle: 81.5,
            duration_seconds: 75,
            overall_form: FormQuality::Good,
        }
    }

    #[test]
    fn test_save_appends_and_preserves_fields() {
        let sessions = SessionStore::new(InMemoryStore::new());
        let first = session(4);
        let second = session(9);
        sessions.save(&first).unwrap();
        sessions.save(&second).unwrap();

        let stored = sessions.list().unwrap();
        assert_eq!(stored, vec![first.clone(), second]);
        assert_eq!(sessions.get(first.id).unwrap(), Some(first));
    }

    #[test]
    fn test_delete_and_clear() {
        let sessions = SessionStore::new(InMemoryStore::new());
        let a = session(1);
        let b = session(2);
        sessions.save(&a).unwrap();
        sessions.save(&b).unwrap();

        assert!(sessions.delete(a.id).unwrap());
        assert!(!sessions.delete(a.id).unwrap());
        assert_eq!(sessions.list().unwrap(), vec![b]);

        sessions.clear().unwrap();
        assert!(sessions.list().unwrap().is_empty());
    }

    #[test]
    fn test_first_launch_flag() {
        let backend = InMemoryStore::new();
        let sessions = SessionStore::new(&backend);
        assert!(sessions.is_first_launch().unwrap());

        sessions.mark_launched().unwrap();
        assert!(!sessions.is_first_launch().unwrap());
        assert_eq!(
            backend.get(FIRST_LAUNCH_KEY).unwrap().as_deref(),
            Some("false")
        );

        // Anything other than "false" still counts as a first launch
        backend.set(FIRST_LAUNCH_KEY, "true").unwrap();
        assert!(sessions.is_first_launch().unwrap());
    }

    #[test]
    fn test_reads_records_written_by_the_browser_app() {
        let backend = InMemoryStore::new();
        backend
            .set(
                SESSIONS_KEY,
                r#"[{"id":"7d4b2a5e-1c3f-4e8a-9b6d-0f1e2d3c4b5a","timestamp":"2024-02-10T08:15:30.000Z","repsCompleted":10,"maxAngle":104.2,"averageAngle":88.1,"durationSeconds":132,"overallForm":"excellent"}]"#,
            )
            .unwrap();
        let stored = SessionStore::new(&backend).list().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].reps_completed, 10);
        assert_eq!(stored[0].overall_form, FormQuality::Excellent);
    }
}
