//! Autosave timing and sync behavior, on tokio's paused clock

use broadsheet_editor::EditorSession;
use broadsheet_persistence::{
    Autosaver, EditorInstance, FileDraftStore, ManualClock, MemoryDraftStore,
    MemoryTemplateStore, PersistenceConfig, PersistenceGateway, RemoteSync, RestoreOutcome,
    StoredId, SyncStatus, TemplateStore,
};
use broadsheet_schema::{BlockType, Document};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

const NOW: i64 = 1_750_000_000_000;

fn named(name: &str) -> Document {
    let mut doc = Document::new();
    doc.metadata.name = name.to_string();
    doc
}

fn memory_gateway(instance: EditorInstance) -> (Arc<MemoryDraftStore>, PersistenceGateway) {
    let store = Arc::new(MemoryDraftStore::new());
    let gateway = PersistenceGateway::new(
        store.clone(),
        Arc::new(ManualClock::new(NOW)),
        instance,
        &PersistenceConfig::default(),
    );
    (store, gateway)
}

#[tokio::test(start_paused = true)]
async fn test_edits_within_quiet_period_coalesce() -> anyhow::Result<()> {
    let (store, gateway) = memory_gateway(EditorInstance::NewDocument);
    let handle = Autosaver::spawn(gateway.clone(), None, &PersistenceConfig::default());

    handle.schedule(named("a"));
    sleep(Duration::from_millis(500)).await;
    handle.schedule(named("b"));

    // The first edit's timer would have fired at 1000ms
    sleep(Duration::from_millis(600)).await;
    assert!(store.is_empty());

    sleep(Duration::from_millis(500)).await;
    let draft = gateway.peek()?.expect("draft written after quiet period");
    assert_eq!(draft.document.metadata.name, "b");
    assert_eq!(draft.timestamp, NOW);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_session_edits_reach_the_draft_slot() -> anyhow::Result<()> {
    let (_, gateway) = memory_gateway(EditorInstance::NewDocument);
    let handle = Autosaver::spawn(gateway.clone(), None, &PersistenceConfig::default());

    let mut session = EditorSession::new("draft:new");
    session.add_observer(handle.clone());
    session.insert_block(BlockType::Header, true);
    session.insert_block(BlockType::Footer, true);

    sleep(Duration::from_secs(2)).await;

    let draft = gateway.peek()?.expect("draft");
    assert_eq!(&draft.document, session.document());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_clear_drops_pending_save() -> anyhow::Result<()> {
    let (store, gateway) = memory_gateway(EditorInstance::NewDocument);
    gateway.save(&named("old"))?;
    let handle = Autosaver::spawn(gateway, None, &PersistenceConfig::default());

    handle.schedule(named("pending"));
    handle.clear().await?;
    sleep(Duration::from_secs(5)).await;

    assert!(store.is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_writes_pending_edit() -> anyhow::Result<()> {
    let (_, gateway) = memory_gateway(EditorInstance::NewDocument);
    let handle = Autosaver::spawn(gateway.clone(), None, &PersistenceConfig::default());

    handle.schedule(named("last"));
    handle.shutdown().await;

    assert_eq!(gateway.peek()?.expect("draft").document.metadata.name, "last");

    // Edits after shutdown go nowhere
    handle.schedule(named("ignored"));
    handle.flush().await;
    assert_eq!(gateway.peek()?.expect("draft").document.metadata.name, "last");

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_remote_sync_creates_then_updates() -> anyhow::Result<()> {
    let (_, gateway) = memory_gateway(EditorInstance::NewDocument);
    let remote = Arc::new(MemoryTemplateStore::new());
    let handle = Autosaver::spawn(
        gateway,
        Some(RemoteSync::new(remote.clone(), None)),
        &PersistenceConfig::default(),
    );
    assert_eq!(handle.status(), SyncStatus::Idle);

    handle.schedule(named("first"));
    handle.flush().await;
    assert_eq!(handle.status(), SyncStatus::Saved);

    handle.schedule(named("second"));
    handle.flush().await;

    let records = remote.list().await?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].1.name, "second");
    assert!(records[0].1.html_content.is_some());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_existing_record_syncs_in_place() -> anyhow::Result<()> {
    let remote = Arc::new(MemoryTemplateStore::new());
    let id = remote
        .create(&broadsheet_persistence::record_for_sync(&named("v1")))
        .await?;

    let instance = EditorInstance::Existing(id.to_string());
    let (_, gateway) = memory_gateway(instance.clone());
    let handle = Autosaver::spawn(
        gateway,
        Some(RemoteSync::for_instance(remote.clone(), &instance)),
        &PersistenceConfig::default(),
    );

    handle.schedule(named("v2"));
    handle.flush().await;

    assert_eq!(remote.len(), 1);
    assert_eq!(remote.fetch(&StoredId::from("1")).await?.name, "v2");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_remote_failure_keeps_local_draft() -> anyhow::Result<()> {
    let (_, gateway) = memory_gateway(EditorInstance::NewDocument);
    let remote = Arc::new(MemoryTemplateStore::new());
    remote.set_offline(true);

    let handle = Autosaver::spawn(
        gateway.clone(),
        Some(RemoteSync::new(remote.clone(), None)),
        &PersistenceConfig::default(),
    );

    handle.schedule(named("offline edit"));
    handle.flush().await;

    assert!(matches!(handle.status(), SyncStatus::Error(_)));
    assert_eq!(
        gateway.peek()?.expect("local draft").document.metadata.name,
        "offline edit"
    );

    // Back online: the next edit syncs again
    remote.set_offline(false);
    handle.schedule(named("online edit"));
    handle.flush().await;
    assert_eq!(handle.status(), SyncStatus::Saved);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_draft_survives_restart_until_stale() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = Arc::new(FileDraftStore::new(dir.path()));
    let clock = Arc::new(ManualClock::new(NOW));
    let config = PersistenceConfig::default();

    let gateway = PersistenceGateway::new(
        store.clone(),
        clock.clone(),
        EditorInstance::NewDocument,
        &config,
    );
    let handle = Autosaver::spawn(gateway.clone(), None, &config);

    let (mut session, outcome) = gateway.open_session()?;
    assert_eq!(outcome, RestoreOutcome::Missing);
    session.add_observer(handle.clone());
    session.insert_block(BlockType::Announcement, true);
    handle.shutdown().await;

    // Reopen a minute later
    clock.advance(Duration::from_secs(60));
    let (restored, outcome) = gateway.open_session()?;
    assert!(outcome.is_restored());
    assert_eq!(restored.document(), session.document());

    // And again after a day
    clock.advance(Duration::from_secs(24 * 60 * 60));
    let (fresh, outcome) = gateway.open_session()?;
    assert!(matches!(outcome, RestoreOutcome::Stale { .. }));
    assert!(fresh.document().is_empty());
    assert!(gateway.peek()?.is_none());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_explicit_save_clears_slot_and_cancels_queued_autosave() -> anyhow::Result<()> {
    let (store, gateway) = memory_gateway(EditorInstance::NewDocument);
    let remote = Arc::new(MemoryTemplateStore::new());
    let handle = Autosaver::spawn(
        gateway.clone(),
        Some(RemoteSync::new(remote.clone(), None)),
        &PersistenceConfig::default(),
    );

    handle.schedule(named("typing"));
    handle.flush().await;
    assert!(gateway.peek()?.is_some());

    handle.schedule(named("queued"));
    let id = handle.save_now(named("saved")).await?;
    assert_eq!(handle.status(), SyncStatus::Saved);
    assert!(gateway.peek()?.is_none());

    // The queued autosave must not bring the slot back
    sleep(Duration::from_secs(2)).await;
    assert!(store.is_empty());
    assert_eq!(remote.fetch(&id).await?.name, "saved");

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_failed_explicit_save_keeps_slot() -> anyhow::Result<()> {
    let (_, gateway) = memory_gateway(EditorInstance::NewDocument);
    let remote = Arc::new(MemoryTemplateStore::new());
    remote.set_offline(true);
    let handle = Autosaver::spawn(
        gateway.clone(),
        Some(RemoteSync::new(remote.clone(), None)),
        &PersistenceConfig::default(),
    );

    assert!(handle.save_now(named("unsent")).await.is_err());
    assert!(matches!(handle.status(), SyncStatus::Error(_)));
    assert_eq!(gateway.peek()?.expect("draft kept").document.metadata.name, "unsent");
    assert!(remote.is_empty());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_explicit_save_without_remote_keeps_slot() -> anyhow::Result<()> {
    let (_, gateway) = memory_gateway(EditorInstance::NewDocument);
    let handle = Autosaver::spawn(gateway.clone(), None, &PersistenceConfig::default());

    assert!(handle.save_now(named("local only")).await.is_err());
    assert_eq!(handle.status(), SyncStatus::Idle);
    assert!(gateway.peek()?.is_some());

    Ok(())
}
