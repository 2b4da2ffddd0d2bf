//! # Broadsheet Persistence
//!
//! Best-effort durability for in-progress designs.
//!
//! ```text
//! EditorSession ──observer──▶ AutosaveHandle ──▶ Autosaver task
//!                                                  │  (debounce)
//!                                    ┌─────────────┴─────────────┐
//!                                    ▼                           ▼
//!                      PersistenceGateway.save()       TemplateStore (remote)
//!                                    │                           │
//!                                    ▼                           ▼
//!                               DraftStore                  SyncStatus
//! ```
//!
//! On mount, [`PersistenceGateway::open_session`] restores a recent draft for
//! new-document editors and silently drops stale or unreadable ones.

mod autosave;
mod clock;
mod config;
mod error;
mod gateway;
mod remote;
mod store;

pub use autosave::{AutosaveHandle, Autosaver, RemoteSync, SyncStatus};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{PersistenceConfig, DEFAULT_DEBOUNCE, DEFAULT_STALENESS};
pub use error::{PersistenceError, PersistenceResult};
pub use gateway::{EditorInstance, PersistedDraft, PersistenceGateway, RestoreOutcome};
pub use remote::{record_for_sync, MemoryTemplateStore, StoredId, TemplateStore};
pub use store::{DraftStore, FileDraftStore, MemoryDraftStore};
