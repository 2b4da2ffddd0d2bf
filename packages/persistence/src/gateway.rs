//! # Persistence Gateway
//!
//! All draft rules live here:
//!
//! - Only a new-document editor restores a draft on mount
//! - A draft at least `staleness` old is discarded, never restored
//! - An unreadable draft is discarded and editing starts empty
//! - Explicit save or "start over" deletes the slot
//! - Closing the editor leaves the slot alone

use crate::clock::Clock;
use crate::config::PersistenceConfig;
use crate::error::PersistenceResult;
use crate::store::DraftStore;
use broadsheet_editor::EditorSession;
use broadsheet_schema::Document;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Which editor a draft belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditorInstance {
    /// Composing a new design
    NewDocument,

    /// Editing a stored record
    Existing(String),
}

impl EditorInstance {
    /// Durable slot key for this instance
    pub fn slot_key(&self) -> String {
        match self {
            EditorInstance::NewDocument => "draft:new".to_string(),
            EditorInstance::Existing(id) => format!("draft:template:{}", id),
        }
    }

    /// Drafts are only offered back to new-document editors
    pub fn restores_drafts(&self) -> bool {
        matches!(self, EditorInstance::NewDocument)
    }
}

impl fmt::Display for EditorInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.slot_key())
    }
}

/// Slot contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedDraft {
    pub document: Document,

    /// Epoch millis when the draft was written
    pub timestamp: i64,
}

impl PersistedDraft {
    /// Age at `now`. Drafts stamped in the future count as brand new.
    pub fn age(&self, now_millis: i64) -> Duration {
        let millis = now_millis.saturating_sub(self.timestamp).max(0);
        Duration::from_millis(millis as u64)
    }
}

/// Result of looking for a draft on mount
#[derive(Debug, Clone, PartialEq)]
pub enum RestoreOutcome {
    /// Fresh draft found
    Restored(Document),

    /// Empty slot
    Missing,

    /// Draft too old; slot deleted
    Stale { age: Duration },

    /// Draft unreadable; slot deleted
    Corrupted(String),

    /// Editor instance never restores drafts
    NotApplicable,
}

impl RestoreOutcome {
    pub fn document(&self) -> Option<&Document> {
        match self {
            RestoreOutcome::Restored(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn is_restored(&self) -> bool {
        matches!(self, RestoreOutcome::Restored(_))
    }
}

#[derive(Clone)]
pub struct PersistenceGateway {
    store: Arc<dyn DraftStore>,
    clock: Arc<dyn Clock>,
    instance: EditorInstance,
    staleness: Duration,
}

impl PersistenceGateway {
    pub fn new(
        store: Arc<dyn DraftStore>,
        clock: Arc<dyn Clock>,
        instance: EditorInstance,
        config: &PersistenceConfig,
    ) -> Self {
        Self {
            store,
            clock,
            instance,
            staleness: config.staleness,
        }
    }

    pub fn instance(&self) -> &EditorInstance {
        &self.instance
    }

    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Look for a draft to restore on mount. Stale and corrupted drafts are
    /// deleted on the way.
    pub fn load(&self) -> PersistenceResult<RestoreOutcome> {
        if !self.instance.restores_drafts() {
            return Ok(RestoreOutcome::NotApplicable);
        }

        let key = self.instance.slot_key();
        let text = match self.store.read(&key) {
            Ok(Some(text)) => text,
            Ok(None) => return Ok(RestoreOutcome::Missing),
            Err(e) => return Ok(self.discard_corrupted(&key, e.to_string())),
        };

        let draft: PersistedDraft = match serde_json::from_str(&text) {
            Ok(draft) => draft,
            Err(e) => return Ok(self.discard_corrupted(&key, e.to_string())),
        };

        let age = draft.age(self.clock.now_millis());
        if age >= self.staleness {
            tracing::warn!("Discarding stale draft {} ({}s old)", key, age.as_secs());
            if let Err(e) = self.store.remove(&key) {
                tracing::warn!("Could not remove draft {}: {}", key, e);
            }
            return Ok(RestoreOutcome::Stale { age });
        }

        tracing::info!(
            "Restored draft {} with {} blocks",
            key,
            draft.document.blocks.len()
        );
        Ok(RestoreOutcome::Restored(draft.document))
    }

    /// Unreadable slots never block editing: drop them and start empty
    fn discard_corrupted(&self, key: &str, reason: String) -> RestoreOutcome {
        tracing::warn!("Discarding unreadable draft {}: {}", key, reason);
        if let Err(e) = self.store.remove(key) {
            tracing::warn!("Could not remove draft {}: {}", key, e);
        }
        RestoreOutcome::Corrupted(reason)
    }

    /// Read the slot without applying any rule
    pub fn peek(&self) -> PersistenceResult<Option<PersistedDraft>> {
        match self.store.read(&self.instance.slot_key())? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Write `document` stamped with the current time
    pub fn save(&self, document: &Document) -> PersistenceResult<PersistedDraft> {
        let draft = PersistedDraft {
            document: document.clone(),
            timestamp: self.clock.now_millis(),
        };
        let text = serde_json::to_string(&draft)?;
        self.store.write(&self.instance.slot_key(), &text)?;
        tracing::debug!(
            "Saved draft {} at {}",
            self.instance.slot_key(),
            draft.timestamp
        );
        Ok(draft)
    }

    /// Delete the slot (explicit save, start over)
    pub fn clear(&self) -> PersistenceResult<()> {
        tracing::debug!("Clearing draft {}", self.instance.slot_key());
        self.store.remove(&self.instance.slot_key())
    }

    /// Open an editor session for this instance, seeded with the restored
    /// draft when there is one
    pub fn open_session(&self) -> PersistenceResult<(EditorSession, RestoreOutcome)> {
        let outcome = self.load()?;
        let scope = self.instance.slot_key();
        let session = match outcome.document() {
            Some(doc) => EditorSession::with_document(scope, doc.clone()),
            None => EditorSession::new(scope),
        };
        Ok((session, outcome))
    }
}

impl fmt::Debug for PersistenceGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistenceGateway")
            .field("instance", &self.instance)
            .field("staleness", &self.staleness)
            .finish()
    }
}
