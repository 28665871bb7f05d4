//! Memory library: the places a navigation session can revisit

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::store::{read_list, write_list, KeyValueStore, MEMORIES_KEY};
use crate::error::StoreError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Photo URLs or data URIs
    #[serde(default)]
    pub photos: Vec<String>,
    /// Panorama or scene built from the photos, once generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
}

impl Memory {
    pub fn new(name: impl Into<String>, photos: Vec<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            photos,
            world_url: None,
            created_at,
            last_used: None,
        }
    }
}

pub struct MemoryLibrary<S> {
    store: S,
}

impl<S: KeyValueStore> MemoryLibrary<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Insert, or replace the memory with the same id in place
    pub fn save(&self, memory: &Memory) -> Result<(), StoreError> {
        let mut memories = self.list()?;
        match memories.iter_mut().find(|m| m.id == memory.id) {
            Some(existing) => *existing = memory.clone(),
            None => memories.push(memory.clone()),
        }
        write_list(&self.store, MEMORIES_KEY, &memories)
    }

    pub fn list(&self) -> Result<Vec<Memory>, StoreError> {
        read_list(&self.store, MEMORIES_KEY)
    }

    pub fn get(&self, id: &str) -> Result<Option<Memory>, StoreError> {
        Ok(self.list()?.into_iter().find(|m| m.id == id))
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut memories = self.list()?;
        memories.retain(|m| m.id != id);
        write_list(&self.store, MEMORIES_KEY, &memories)
    }

    /// Stamp `last_used`; returns false for an unknown id
    pub fn touch(&self, id: &str, now: DateTime<Utc>) -> Result<bool, StoreError> {
        let Some(mut memory) = self.get(id)? else {
            log::warn!("touch on unknown memory {id}");
            return Ok(false);
        };
        memory.last_used = Some(now);
        self.save(&memory)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use chrono::TimeZone;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 20, 17, 0, 0).unwrap()
    }

    #[test]
    fn test_save_is_upsert() {
        let library = MemoryLibrary::new(InMemoryStore::new());
        let mut garden = Memory::new("Garden", vec!["data:image/png;base64,AAAA".into()], created());
        let lake = Memory::new("Lake", Vec::new(), created());
        library.save(&garden).unwrap();
        library.save(&lake).unwrap();

        garden.world_url = Some("https://example.org/garden.jpg".into());
        library.save(&garden).unwrap();

        let stored = library.list().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0], garden);
        assert_eq!(stored[1], lake);
    }

    #[test]
    fn test_get_and_delete() {
        let library = MemoryLibrary::new(InMemoryStore::new());
        let memory = Memory::new("Porch", Vec::new(), created());
        library.save(&memory).unwrap();

        assert_eq!(library.get(&memory.id).unwrap(), Some(memory.clone()));
        library.delete(&memory.id).unwrap();
        assert_eq!(library.get(&memory.id).unwrap(), None);
    }

    #[test]
    fn test_touch_sets_last_used() {
        let library = MemoryLibrary::new(InMemoryStore::new());
        let memory = Memory::new("Kitchen", Vec::new(), created());
        library.save(&memory).unwrap();

        let later = created() + chrono::Duration::days(3);
        assert!(library.touch(&memory.id, later).unwrap());
        assert_eq!(library.get(&memory.id).unwrap().unwrap().last_used, Some(later));
        assert!(!library.touch("missing", later).unwrap());
    }

    #[test]
    fn test_optional_fields_omitted() {
        let json = serde_json::to_value(Memory::new("Attic", Vec::new(), created())).unwrap();
        assert!(json.get("worldUrl").is_none());
        assert!(json.get("lastUsed").is_none());
        assert_eq!(json["createdAt"], "2024-01-20T17:00:00Z");
    }
}
