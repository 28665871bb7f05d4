//! Key-value backend abstraction
//!
//! Records are stored as JSON arrays under fixed keys, the same layout the
//! browser app keeps in `localStorage`.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

pub const SESSIONS_KEY: &str = "synapse_ai_sessions";
pub const CHECKINS_KEY: &str = "synapse_ai_checkins";
pub const MEMORIES_KEY: &str = "synapse_ai_memories";
pub const FIRST_LAUNCH_KEY: &str = "synapse_ai_first_launch";

/// String key-value storage.
///
/// Takes `&self`: browser storage is a shared handle, and the in-memory
/// store uses interior mutability to match.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Process-local store for native hosts and tests
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Read a JSON list; a missing key is an empty list
pub(crate) fn read_list<S, T>(store: &S, key: &str) -> Result<Vec<T>, StoreError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Decode {
            key: key.to_string(),
            source,
        }),
        None => Ok(Vec::new()),
    }
}

pub(crate) fn write_list<S, T>(store: &S, key: &str, items: &[T]) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let raw = serde_json::to_string(items).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_roundtrip() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_missing_list_is_empty() {
        let store = InMemoryStore::new();
        let items: Vec<u32> = read_list(&store, "nothing").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_corrupt_list_is_decode_error() {
        let store = InMemoryStore::new();
        store.set("bad", "{not json").unwrap();
        let err = read_list::<_, u32>(&store, "bad").unwrap_err();
        assert!(matches!(err, StoreError::Decode { ref key, .. } if key == "bad"));
    }
}
