//! Typed JSON access over a [`KeyValueStore`], plus an in-memory backend.
use crate::KeyValueStore;
use crate::error::PharmacyError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

/// Process-local store; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    /// Sorted list of keys currently present.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Raw string value; backend failures become [`PharmacyError::Storage`].
///
/// # Errors
///
/// Returns an error if the backend fails.
pub fn read_raw<S: KeyValueStore>(store: &S, key: &str) -> Result<Option<String>, PharmacyError> {
    store.get(key).map_err(PharmacyError::storage)
}

/// # Errors
///
/// Returns an error if the backend fails.
pub fn write_raw<S: KeyValueStore>(store: &S, key: &str, value: &str) -> Result<(), PharmacyError> {
    store.set(key, value).map_err(PharmacyError::storage)
}

/// # Errors
///
/// Returns an error if the backend fails.
pub fn remove<S: KeyValueStore>(store: &S, key: &str) -> Result<(), PharmacyError> {
    store.remove(key).map_err(PharmacyError::storage)
}

/// Decode a JSON value. Values that fail to parse read as absent.
///
/// # Errors
///
/// Returns an error if the backend fails.
pub fn read_json<S, T>(store: &S, key: &str) -> Result<Option<T>, PharmacyError>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let Some(raw) = read_raw(store, key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            log::warn!("ignoring unreadable value under {key}: {err}");
            Ok(None)
        }
    }
}

/// A stored list, or an empty one when the key is missing or unreadable.
///
/// # Errors
///
/// Returns an error if the backend fails.
pub fn read_list<S, T>(store: &S, key: &str) -> Result<Vec<T>, PharmacyError>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    Ok(read_json(store, key)?.unwrap_or_default())
}

/// # Errors
///
/// Returns an error if encoding or the backend fails.
pub fn write_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), PharmacyError>
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    write_raw(store, key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::RequestStatus;

    #[test]
    fn memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let view = store.clone();
        write_json(&store, "k", &vec![1, 2, 3]).unwrap();
        let back: Vec<u8> = read_list(&view, "k").unwrap();
        assert_eq!(back, [1, 2, 3]);
        remove(&view, "k").unwrap();
        assert!(!store.contains("k"));
    }

    #[test]
    fn unreadable_values_read_as_absent() {
        let store = MemoryStore::new();
        write_raw(&store, "statuses", "{not json").unwrap();
        let list: Vec<RequestStatus> = read_list(&store, "statuses").unwrap();
        assert!(list.is_empty());
        let single: Option<RequestStatus> = read_json(&store, "missing").unwrap();
        assert!(single.is_none());
    }
}
