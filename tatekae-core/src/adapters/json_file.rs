//! File-backed key-value store
//!
//! One JSON file per logical key inside a data directory. This is the
//! production persistence backend; the payload under the ledger key is the
//! serialized full transaction collection.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::result::{Error, Result};
use crate::ports::KeyValueStore;

/// Key-value store persisting each key as `<dir>/<key>.json`
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::persistence(format!("read {key}: {e}"))),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| Error::persistence(format!("create data dir: {e}")))?;
        std::fs::write(self.path_for(key), value)
            .map_err(|e| Error::persistence(format!("write {key}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absent_key_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        assert_eq!(store.get("family_transactions").unwrap(), None);
    }

    #[test]
    fn test_put_then_get_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        store.put("family_transactions", "[]").unwrap();

        assert_eq!(
            store.get("family_transactions").unwrap(),
            Some("[]".to_string())
        );
        assert!(dir.path().join("family_transactions.json").exists());
    }

    #[test]
    fn test_put_creates_missing_data_dir() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("data"));

        store.put("k", "v").unwrap();

        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
    }
}
