//! # Broadsheet Editor
//!
//! Core document editing engine for Broadsheet.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ ingest: foreign template → canonical blocks │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Insert/patch/move/delete blocks          │
//! │  - Bounded undo/redo snapshots              │
//! │  - Notify observers on committed changes    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ observers: preview render, autosave         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Document is source of truth**: rendered markup is a derived view
//! 2. **No-ops are not errors**: stale ids and boundary moves change nothing
//! 3. **Snapshots, not inverses**: history stores whole documents
//!
//! ## Usage
//!
//! ```rust,ignore
//! use broadsheet_editor::{EditorSession, MoveDirection};
//! use broadsheet_schema::BlockType;
//!
//! let mut session = EditorSession::new("draft:new");
//! session.add_observer(|doc: &Document| println!("{} blocks", doc.len()));
//!
//! let header = session.insert_block(BlockType::Header, true)?;
//! session.insert_block(BlockType::Text, true);
//! session.move_block(&header, MoveDirection::Down);
//!
//! session.undo();
//! ```

mod document;
mod errors;
mod history;
mod mutations;
mod observer;
mod session;

pub use document::DocumentModel;
pub use errors::EditorError;
pub use history::{EditHistory, MAX_HISTORY_DEPTH};
pub use mutations::{MoveDirection, Mutation, MutationOutcome};
pub use observer::DocumentObserver;
pub use session::EditorSession;
