//! Durable key/value slots for drafts.

use crate::error::PersistenceResult;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Durable text slot keyed by editor instance
pub trait DraftStore: Send + Sync {
    /// Slot contents, `None` when the slot is empty
    fn read(&self, key: &str) -> PersistenceResult<Option<String>>;

    /// Overwrite the slot
    fn write(&self, key: &str, value: &str) -> PersistenceResult<()>;

    /// Empty the slot. Removing an empty slot is not an error.
    fn remove(&self, key: &str) -> PersistenceResult<()>;
}

/// One JSON file per slot inside a directory
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    dir: PathBuf,
}

impl FileDraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. Characters outside `[A-Za-z0-9_-]` become `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl DraftStore for FileDraftStore {
    fn read(&self, key: &str) -> PersistenceResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> PersistenceResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Write then rename so a crash never leaves half a draft behind
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> PersistenceResult<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DraftStore for MemoryDraftStore {
    fn read(&self, key: &str) -> PersistenceResult<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> PersistenceResult<()> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PersistenceResult<()> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileDraftStore::new(dir.path().join("drafts"));

        assert_eq!(store.read("draft:new").unwrap(), None);

        store.write("draft:new", "{\"a\":1}").unwrap();
        assert_eq!(store.read("draft:new").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(dir.path().join("drafts/draft_new.json").exists());

        store.remove("draft:new").unwrap();
        assert_eq!(store.read("draft:new").unwrap(), None);
        store.remove("draft:new").unwrap();
    }

    #[test]
    fn test_file_store_keys_map_to_separate_files() {
        let store = FileDraftStore::new("/tmp/drafts");
        assert_ne!(
            store.path_for("draft:new"),
            store.path_for("draft:template:7")
        );
        assert_eq!(
            store.path_for("draft:template:7"),
            PathBuf::from("/tmp/drafts/draft_template_7.json")
        );
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryDraftStore::new();
        store.write("k", "v").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert!(store.is_empty());
    }
}
