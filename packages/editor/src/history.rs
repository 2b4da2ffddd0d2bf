//! # Edit History
//!
//! Bounded undo/redo over whole-document snapshots.
//!
//! ## Design
//!
//! - `past` ends with the current document after every committed change
//! - Undo moves the top of `past` to the front of `future`
//! - Redo moves the front of `future` back onto `past`
//! - A new change clears `future`
//! - Both sides hold at most `max_depth` snapshots, oldest evicted first
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = EditHistory::new(document.clone());
//! history.record(edited.clone());
//!
//! if let Some(previous) = history.undo() {
//!     model.restore(previous.clone());
//! }
//! ```

use broadsheet_schema::Document;
use std::collections::VecDeque;

/// Default number of snapshots kept on each side
pub const MAX_HISTORY_DEPTH: usize = 5;

#[derive(Debug, Clone)]
pub struct EditHistory {
    /// Oldest first, current document last
    past: VecDeque<Document>,

    /// Next redo target first
    future: VecDeque<Document>,

    max_depth: usize,
}

impl EditHistory {
    pub fn new(initial: Document) -> Self {
        Self::with_depth(initial, MAX_HISTORY_DEPTH)
    }

    /// History with a custom depth (clamped to at least 1)
    pub fn with_depth(initial: Document, max_depth: usize) -> Self {
        let mut past = VecDeque::with_capacity(max_depth + 1);
        past.push_back(initial);
        Self {
            past,
            future: VecDeque::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Record a committed change. Returns false when the snapshot equals the
    /// current top and was discarded.
    pub fn record(&mut self, snapshot: Document) -> bool {
        if self.past.back() == Some(&snapshot) {
            tracing::debug!("Skipping duplicate history snapshot");
            return false;
        }

        self.past.push_back(snapshot);
        while self.past.len() > self.max_depth {
            self.past.pop_front();
        }
        self.future.clear();
        true
    }

    /// Step back. Returns the document to restore, or `None` when there is
    /// nothing older than the current state.
    pub fn undo(&mut self) -> Option<&Document> {
        if self.past.len() < 2 {
            return None;
        }

        let current = self.past.pop_back()?;
        self.future.push_front(current);
        while self.future.len() > self.max_depth {
            self.future.pop_back();
        }
        self.past.back()
    }

    pub fn redo(&mut self) -> Option<&Document> {
        let next = self.future.pop_front()?;
        self.past.push_back(next);
        while self.past.len() > self.max_depth {
            self.past.pop_front();
        }
        self.past.back()
    }

    pub fn can_undo(&self) -> bool {
        self.past.len() >= 2
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of undo steps available
    pub fn undo_levels(&self) -> usize {
        self.past.len().saturating_sub(1)
    }

    pub fn redo_levels(&self) -> usize {
        self.future.len()
    }

    /// Start over from a new baseline (mount, restore, fetch). Not undoable.
    pub fn reset(&mut self, baseline: Document) {
        self.past.clear();
        self.future.clear();
        self.past.push_back(baseline);
    }

    pub fn current(&self) -> Option<&Document> {
        self.past.back()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}
