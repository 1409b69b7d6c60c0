//! Key-value persistence port.
//!
//! The dashboard keeps three JSON collections under fixed keys. Reads treat
//! absent and unparseable values alike as "nothing stored"; writes are
//! best-effort and only logged on failure.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::warn;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

pub const SCHEDULES_KEY: &str = "inspection-schedules";
pub const COMPLETED_KEY: &str = "completed-inspections";
pub const MEMOS_KEY: &str = "inspection-memos";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored value is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Flat string-keyed store. Implementations are synchronous and owned by a
/// single writer; no transactional isolation is offered.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// Reads a collection, falling back to its default when the key is absent
/// or the stored value cannot be read.
pub fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    match read_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            warn!(key, error = %e, "Discarding unreadable stored value");
            T::default()
        }
    }
}

/// Writes a collection. Failures are logged and swallowed; the caller's
/// in-memory state is not rolled back.
pub fn persist<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) {
    if let Err(e) = write_json(store, key, value) {
        warn!(key, error = %e, "Failed to persist value; in-memory state kept");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_key_reads_as_none() {
        let store = MemoryStore::new();
        let value: Option<Vec<u32>> = read_json(&store, COMPLETED_KEY).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_corrupt_value_is_an_error_for_read_json() {
        let store = MemoryStore::new();
        store.set(COMPLETED_KEY, "[1, 2,").unwrap();
        let result: Result<Option<Vec<u32>>, _> = read_json(&store, COMPLETED_KEY);
        assert!(matches!(result, Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_load_or_default_swallows_corruption() {
        let store = MemoryStore::new();
        store.set(COMPLETED_KEY, "not json").unwrap();
        let ids: Vec<u32> = load_or_default(&store, COMPLETED_KEY);
        assert!(ids.is_empty());
    }

    #[test]
    fn test_persist_then_load() {
        let store = MemoryStore::new();
        persist(&store, COMPLETED_KEY, &[3_u32, 7]);
        let ids: Vec<u32> = load_or_default(&store, COMPLETED_KEY);
        assert_eq!(ids, vec![3, 7]);
    }
}
