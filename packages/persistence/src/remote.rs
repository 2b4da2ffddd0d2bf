//! Remote template store (the REST collaborator behind "save to library").

use crate::error::{PersistenceError, PersistenceResult};
use async_trait::async_trait;
use broadsheet_compiler_html::render;
use broadsheet_schema::{Document, DocumentRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Identifier assigned by the remote store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredId(pub String);

impl fmt::Display for StoredId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoredId {
    fn from(id: &str) -> Self {
        StoredId(id.to_string())
    }
}

#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn create(&self, record: &DocumentRecord) -> PersistenceResult<StoredId>;

    async fn update(&self, id: &StoredId, record: &DocumentRecord) -> PersistenceResult<()>;

    async fn fetch(&self, id: &StoredId) -> PersistenceResult<DocumentRecord>;

    async fn list(&self) -> PersistenceResult<Vec<(StoredId, DocumentRecord)>>;

    async fn delete(&self, id: &StoredId) -> PersistenceResult<()>;
}

/// Record pushed on sync: the design plus its rendered export
pub fn record_for_sync(document: &Document) -> DocumentRecord {
    DocumentRecord::from_document(document).with_html(render(document))
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryTemplateStore {
    records: Mutex<BTreeMap<StoredId, DocumentRecord>>,
    next_id: AtomicU64,
    offline: AtomicBool,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail as if the network were down
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<StoredId, DocumentRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_online(&self) -> PersistenceResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(PersistenceError::Remote("store unreachable".to_string()));
        }
        Ok(())
    }

    fn not_found(id: &StoredId) -> PersistenceError {
        PersistenceError::Remote(format!("no template with id {}", id))
    }
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn create(&self, record: &DocumentRecord) -> PersistenceResult<StoredId> {
        self.check_online()?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let id = StoredId(n.to_string());
        self.lock().insert(id.clone(), record.clone());
        Ok(id)
    }

    async fn update(&self, id: &StoredId, record: &DocumentRecord) -> PersistenceResult<()> {
        self.check_online()?;
        match self.lock().get_mut(id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(Self::not_found(id)),
        }
    }

    async fn fetch(&self, id: &StoredId) -> PersistenceResult<DocumentRecord> {
        self.check_online()?;
        self.lock().get(id).cloned().ok_or_else(|| Self::not_found(id))
    }

    async fn list(&self) -> PersistenceResult<Vec<(StoredId, DocumentRecord)>> {
        self.check_online()?;
        Ok(self
            .lock()
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect())
    }

    async fn delete(&self, id: &StoredId) -> PersistenceResult<()> {
        self.check_online()?;
        self.lock()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use broadsheet_schema::{Block, BlockId, BlockType};

    fn record() -> DocumentRecord {
        let doc = Document::with_blocks(vec![Block::with_defaults(
            BlockId::from("b1"),
            BlockType::Button,
        )]);
        record_for_sync(&doc)
    }

    #[tokio::test]
    async fn test_crud_cycle() {
        let store = MemoryTemplateStore::new();

        let id = store.create(&record()).await.unwrap();
        assert_eq!(id, StoredId::from("1"));

        let mut changed = record();
        changed.name = "Renamed".to_string();
        store.update(&id, &changed).await.unwrap();
        assert_eq!(store.fetch(&id).await.unwrap().name, "Renamed");

        assert_eq!(store.list().await.unwrap().len(), 1);
        store.delete(&id).await.unwrap();
        assert!(store.fetch(&id).await.is_err());
        assert!(store.update(&id, &changed).await.is_err());
    }

    #[tokio::test]
    async fn test_offline_store_fails() {
        let store = MemoryTemplateStore::new();
        store.set_offline(true);

        let err = store.create(&record()).await.unwrap_err();
        assert!(matches!(err, PersistenceError::Remote(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_sync_record_carries_export() {
        let record = record();
        let html = record.html_content.unwrap();
        assert!(html.contains("Learn More"));
    }
}
