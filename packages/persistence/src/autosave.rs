//! # Autosave
//!
//! Debounced background saving for one editor.
//!
//! ## Design
//!
//! - Every scheduled document restarts the quiet-period timer
//! - When the timer fires the latest document is written to the draft slot,
//!   then pushed to the remote store if one is configured
//! - Remote progress is published as a [`SyncStatus`] on a watch channel
//! - A remote failure never touches the local slot or the document
//! - An in-flight save is never cancelled; edits arriving meanwhile queue up
//!   for the next tick
//! - An explicit [`AutosaveHandle::save_now`] drops the queued autosave and
//!   deletes the draft slot only once the remote store accepted the document
//!
//! ## Example
//!
//! ```rust,ignore
//! let handle = Autosaver::spawn(gateway, Some(remote), &config);
//! session.add_observer(handle.clone());
//!
//! // ... edits ...
//!
//! handle.shutdown().await;
//! ```

use crate::config::PersistenceConfig;
use crate::error::{PersistenceError, PersistenceResult};
use crate::gateway::{EditorInstance, PersistenceGateway};
use crate::remote::{record_for_sync, StoredId, TemplateStore};
use broadsheet_editor::DocumentObserver;
use broadsheet_schema::Document;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{sleep, Instant};

/// Remote save state shown next to the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    Idle,
    Saving,
    Saved,
    Error(String),
}

/// Remote target for synced drafts. Creates the record on first push and
/// updates it afterwards.
pub struct RemoteSync {
    store: Arc<dyn TemplateStore>,
    id: Option<StoredId>,
}

impl RemoteSync {
    pub fn new(store: Arc<dyn TemplateStore>, id: Option<StoredId>) -> Self {
        Self { store, id }
    }

    /// Existing records update in place, new documents get created
    pub fn for_instance(store: Arc<dyn TemplateStore>, instance: &EditorInstance) -> Self {
        let id = match instance {
            EditorInstance::NewDocument => None,
            EditorInstance::Existing(id) => Some(StoredId(id.clone())),
        };
        Self::new(store, id)
    }

    pub fn stored_id(&self) -> Option<&StoredId> {
        self.id.as_ref()
    }

    async fn push(&mut self, document: &Document) -> PersistenceResult<StoredId> {
        let record = record_for_sync(document);
        match &self.id {
            Some(id) => {
                self.store.update(id, &record).await?;
                Ok(id.clone())
            }
            None => {
                let id = self.store.create(&record).await?;
                self.id = Some(id.clone());
                Ok(id)
            }
        }
    }
}

enum Command {
    Schedule(Document),
    SaveNow(Document, oneshot::Sender<PersistenceResult<StoredId>>),
    Clear(oneshot::Sender<PersistenceResult<()>>),
    Flush(oneshot::Sender<()>),
    Shutdown(oneshot::Sender<()>),
}

pub struct Autosaver {
    gateway: PersistenceGateway,
    remote: Option<RemoteSync>,
    debounce: Duration,
    status: watch::Sender<SyncStatus>,
    commands: mpsc::UnboundedReceiver<Command>,
}

impl Autosaver {
    /// Start the autosave task on the current tokio runtime
    pub fn spawn(
        gateway: PersistenceGateway,
        remote: Option<RemoteSync>,
        config: &PersistenceConfig,
    ) -> AutosaveHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(SyncStatus::Idle);

        let saver = Autosaver {
            gateway,
            remote,
            debounce: config.debounce,
            status: status_tx,
            commands: rx,
        };
        tokio::spawn(saver.run());

        AutosaveHandle {
            commands: tx,
            status: status_rx,
        }
    }

    async fn run(mut self) {
        let mut pending: Option<Document> = None;
        let timer = sleep(self.debounce);
        tokio::pin!(timer);

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Schedule(document)) => {
                        pending = Some(document);
                        timer.as_mut().reset(Instant::now() + self.debounce);
                    }
                    Some(Command::SaveNow(document, reply)) => {
                        pending = None;
                        let _ = reply.send(self.save_now(document).await);
                    }
                    Some(Command::Clear(reply)) => {
                        pending = None;
                        let _ = reply.send(self.gateway.clear());
                    }
                    Some(Command::Flush(reply)) => {
                        if let Some(document) = pending.take() {
                            self.persist(document).await;
                        }
                        let _ = reply.send(());
                    }
                    Some(Command::Shutdown(reply)) => {
                        if let Some(document) = pending.take() {
                            self.persist(document).await;
                        }
                        let _ = reply.send(());
                        break;
                    }
                    None => {
                        if let Some(document) = pending.take() {
                            self.persist(document).await;
                        }
                        break;
                    }
                },
                () = &mut timer, if pending.is_some() => {
                    if let Some(document) = pending.take() {
                        self.persist(document).await;
                    }
                }
            }
        }

        tracing::debug!("Autosave for {} stopped", self.gateway.instance());
    }

    /// User-initiated save. The slot is cleared only when the remote push
    /// succeeds; otherwise it keeps `document`.
    async fn save_now(&mut self, document: Document) -> PersistenceResult<StoredId> {
        let Some(remote) = self.remote.as_mut() else {
            self.gateway.save(&document)?;
            return Err(PersistenceError::Remote(
                "no remote template store configured".to_string(),
            ));
        };

        self.status.send_replace(SyncStatus::Saving);
        match remote.push(&document).await {
            Ok(id) => {
                tracing::info!("Saved {} as remote template {}", self.gateway.instance(), id);
                self.status.send_replace(SyncStatus::Saved);
                self.gateway.clear()?;
                Ok(id)
            }
            Err(e) => {
                tracing::warn!("Save of {} failed: {}", self.gateway.instance(), e);
                self.status.send_replace(SyncStatus::Error(e.to_string()));
                if let Err(local) = self.gateway.save(&document) {
                    tracing::warn!("Autosave to {} failed: {}", self.gateway.instance(), local);
                }
                Err(e)
            }
        }
    }

    async fn persist(&mut self, document: Document) {
        if let Err(e) = self.gateway.save(&document) {
            tracing::warn!("Autosave to {} failed: {}", self.gateway.instance(), e);
        }

        let Some(remote) = self.remote.as_mut() else {
            return;
        };

        self.status.send_replace(SyncStatus::Saving);
        match remote.push(&document).await {
            Ok(id) => {
                tracing::info!("Synced {} to remote template {}", self.gateway.instance(), id);
                self.status.send_replace(SyncStatus::Saved);
            }
            Err(e) => {
                tracing::warn!("Remote sync for {} failed: {}", self.gateway.instance(), e);
                self.status.send_replace(SyncStatus::Error(e.to_string()));
            }
        }
    }
}

/// Control side of a running [`Autosaver`]. Cheap to clone; register a clone
/// as a [`DocumentObserver`] so every committed edit gets scheduled.
#[derive(Clone)]
pub struct AutosaveHandle {
    commands: mpsc::UnboundedSender<Command>,
    status: watch::Receiver<SyncStatus>,
}

impl AutosaveHandle {
    /// Queue `document` and restart the quiet period
    pub fn schedule(&self, document: Document) {
        if self.commands.send(Command::Schedule(document)).is_err() {
            tracing::debug!("Autosave already stopped, dropping edit");
        }
    }

    /// Save `document` to the remote store right away. Any queued autosave
    /// is dropped; the draft slot is deleted only on success.
    pub async fn save_now(&self, document: Document) -> PersistenceResult<StoredId> {
        let stopped = || PersistenceError::Remote("autosave already stopped".to_string());
        let (reply, done) = oneshot::channel();
        self.commands
            .send(Command::SaveNow(document, reply))
            .map_err(|_| stopped())?;
        done.await.map_err(|_| stopped())?
    }

    pub fn status(&self) -> SyncStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncStatus> {
        self.status.clone()
    }

    /// Drop any pending save and delete the draft slot
    pub async fn clear(&self) -> PersistenceResult<()> {
        let (reply, done) = oneshot::channel();
        if self.commands.send(Command::Clear(reply)).is_err() {
            return Ok(());
        }
        done.await.unwrap_or(Ok(()))
    }

    /// Write the pending document now, if any
    pub async fn flush(&self) {
        let (reply, done) = oneshot::channel();
        if self.commands.send(Command::Flush(reply)).is_ok() {
            let _ = done.await;
        }
    }

    /// Flush and stop the task. The draft slot is left in place.
    pub async fn shutdown(&self) {
        let (reply, done) = oneshot::channel();
        if self.commands.send(Command::Shutdown(reply)).is_ok() {
            let _ = done.await;
        }
    }
}

impl DocumentObserver for AutosaveHandle {
    fn document_changed(&mut self, document: &Document) {
        self.schedule(document.clone());
    }
}
