//! # Editor Session
//!
//! One open editor: the document model, its undo history and whoever is
//! watching for changes (preview renderer, autosaver).

use crate::document::DocumentModel;
use crate::errors::EditorError;
use crate::history::EditHistory;
use crate::mutations::{MoveDirection, Mutation, MutationOutcome};
use crate::observer::DocumentObserver;
use broadsheet_schema::{
    Block, BlockId, BlockType, Content, Document, GlobalStylePatch, Metadata, MetadataPatch,
};

pub struct EditorSession {
    /// Editor scope (e.g. "draft:new"), also seeds block ids
    pub id: String,

    model: DocumentModel,
    history: EditHistory,
    observers: Vec<Box<dyn DocumentObserver + Send>>,
}

impl EditorSession {
    /// Session over an empty document
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let model = DocumentModel::new(&id);
        let history = EditHistory::new(model.document().clone());
        Self {
            id,
            model,
            history,
            observers: Vec::new(),
        }
    }

    /// Session over an existing document. The document is the baseline, so
    /// there is nothing to undo yet.
    pub fn with_document(id: impl Into<String>, document: Document) -> Self {
        let id = id.into();
        let model = DocumentModel::from_document(&id, document);
        let history = EditHistory::new(model.document().clone());
        Self {
            id,
            model,
            history,
            observers: Vec::new(),
        }
    }

    pub fn from_json(id: impl Into<String>, json: &str) -> Result<Self, EditorError> {
        let document: Document = serde_json::from_str(json)?;
        Ok(Self::with_document(id, document))
    }

    /// Use a history of a different depth. Resets the history.
    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history = EditHistory::with_depth(self.model.document().clone(), depth);
        self
    }

    pub fn add_observer(&mut self, observer: impl DocumentObserver + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn document(&self) -> &Document {
        self.model.document()
    }

    pub fn model(&self) -> &DocumentModel {
        &self.model
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn selected(&self) -> Option<&BlockId> {
        self.model.selected()
    }

    /// Apply a mutation, recording an undo step and notifying observers when
    /// the document actually changed
    pub fn apply(&mut self, mutation: &Mutation) -> MutationOutcome {
        let outcome = mutation.apply(&mut self.model);

        if outcome.is_applied() && mutation.records_history() {
            self.commit();
        }

        outcome
    }

    pub fn insert_block(&mut self, block_type: BlockType, at_end: bool) -> Option<BlockId> {
        let id = self.model.insert_block(block_type, at_end)?;
        self.commit();
        Some(id)
    }

    pub fn patch_block_content(&mut self, id: &BlockId, patch: Content) -> MutationOutcome {
        self.apply(&Mutation::PatchBlockContent {
            id: id.clone(),
            patch,
        })
    }

    pub fn move_block(&mut self, id: &BlockId, direction: MoveDirection) -> MutationOutcome {
        self.apply(&Mutation::MoveBlock {
            id: id.clone(),
            direction,
        })
    }

    pub fn delete_block(&mut self, id: &BlockId) -> MutationOutcome {
        self.apply(&Mutation::DeleteBlock { id: id.clone() })
    }

    pub fn replace_all(&mut self, blocks: Vec<Block>, metadata: Metadata) -> MutationOutcome {
        self.apply(&Mutation::ReplaceAll { blocks, metadata })
    }

    pub fn select_block(&mut self, id: Option<BlockId>) -> MutationOutcome {
        self.apply(&Mutation::SelectBlock { id })
    }

    pub fn set_global_style(&mut self, patch: GlobalStylePatch) -> MutationOutcome {
        self.apply(&Mutation::SetGlobalStyle { patch })
    }

    pub fn set_metadata(&mut self, patch: MetadataPatch) -> MutationOutcome {
        self.apply(&Mutation::SetMetadata { patch })
    }

    /// Undo the most recent change. Returns false when there is nothing to
    /// undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.undo() else {
            return false;
        };
        self.model.restore(previous.clone());
        self.notify();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.history.redo() else {
            return false;
        };
        self.model.restore(next.clone());
        self.notify();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Replace the document with a new baseline (restored draft, fetched
    /// record). Clears the history.
    pub fn load(&mut self, document: Document) {
        self.model.load(document);
        self.history.reset(self.model.document().clone());
        self.notify();
    }

    fn commit(&mut self) {
        self.history.record(self.model.document().clone());
        self.notify();
    }

    fn notify(&mut self) {
        let document = self.model.document();
        for observer in &mut self.observers {
            observer.document_changed(document);
        }
    }
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("id", &self.id)
            .field("blocks", &self.model.document().len())
            .field("undo_levels", &self.history.undo_levels())
            .field("observers", &self.observers.len())
            .finish()
    }
}
