//! In-memory key-value store for tests and demos
//!
//! Shareable via `Arc` so two `TransactionStore`s can sit on the same backing
//! map, which is how the tests simulate a second session/tab. The
//! `fail_writes` switch simulates an unavailable backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::domain::result::{Error, Result};
use crate::ports::KeyValueStore;

/// Hash-map backed `KeyValueStore`
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `put` fail with a persistence error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw stored payload, for asserting on the persisted bytes
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("memory store lock poisoned")
            .get(key)
            .cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::persistence("memory store writes disabled"));
        }
        self.entries
            .lock()
            .expect("memory store lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.put("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_fail_writes_switch() {
        let store = MemoryStore::new();
        store.put("k", "v1").unwrap();

        store.set_fail_writes(true);
        assert!(store.put("k", "v2").is_err());
        // Existing payload untouched by the failed write
        assert_eq!(store.raw("k"), Some("v1".to_string()));

        store.set_fail_writes(false);
        store.put("k", "v2").unwrap();
        assert_eq!(store.raw("k"), Some("v2".to_string()));
    }
}
