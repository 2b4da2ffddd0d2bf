//! # Document Model
//!
//! Mutable in-memory state of one open editor: the [`Document`], the current
//! selection and the id generator for new blocks.
//!
//! ## Operation Semantics
//!
//! ### Insert
//! - New block gets registry defaults and a fresh id
//! - Custom types whose tag ingestion would rewrite are refused
//! - Appends, or lands right after the selected block
//!
//! ### Patch / Move / Delete
//! - Unknown ids are a no-op, never an error
//! - Moving past either end of the document is a no-op
//!
//! ### ReplaceAll
//! - The only operation that may change the block count by more than one

use crate::errors::EditorError;
use crate::mutations::{MoveDirection, MutationOutcome};
use broadsheet_schema::{
    is_canonical_type, Block, BlockId, BlockType, Content, Document, GlobalStylePatch,
    IdGenerator, Metadata, MetadataPatch,
};
use std::collections::HashSet;

/// Editable document with selection state
#[derive(Debug, Clone)]
pub struct DocumentModel {
    document: Document,

    /// Currently selected block (UI focus)
    selected: Option<BlockId>,

    /// Id allocation for this document's lifetime
    ids: IdGenerator,

    /// Current version number (increments on each committed change)
    version: u64,
}

impl DocumentModel {
    /// Empty document for the given editor scope (e.g. "draft:new")
    pub fn new(scope: &str) -> Self {
        Self {
            document: Document::new(),
            selected: None,
            ids: IdGenerator::new(scope),
            version: 0,
        }
    }

    /// Model over an existing document (restored draft, fetched record)
    pub fn from_document(scope: &str, document: Document) -> Self {
        let mut model = Self::new(scope);
        model.load(document);
        model
    }

    pub fn from_json(scope: &str, json: &str) -> Result<Self, EditorError> {
        let document: Document = serde_json::from_str(json)?;
        Ok(Self::from_document(scope, document))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selected(&self) -> Option<&BlockId> {
        self.selected.as_ref()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Insert a block of `block_type` with default content.
    ///
    /// `at_end` appends. Otherwise the block goes directly after the selected
    /// block, or to the top when nothing is selected. The new block becomes
    /// the selection. Returns `None` for custom tags that collide with a
    /// known tag, a synonym or a hero banner.
    pub fn insert_block(&mut self, block_type: BlockType, at_end: bool) -> Option<BlockId> {
        if !is_canonical_type(&block_type) {
            tracing::debug!("Refusing to insert reserved custom type {}", block_type);
            return None;
        }

        let id = self.ids.next_id();
        let block = Block::with_defaults(id.clone(), block_type);

        let index = if at_end {
            self.document.blocks.len()
        } else {
            self.selected
                .as_ref()
                .and_then(|selected| self.document.position(selected))
                .map(|pos| pos + 1)
                .unwrap_or(0)
        };

        tracing::debug!("Inserting {} block {} at {}", block.block_type, id, index);
        self.document.blocks.insert(index, block);
        self.selected = Some(id.clone());
        self.bump();
        Some(id)
    }

    /// Shallow-merge `patch` into the block's content
    pub fn patch_block_content(&mut self, id: &BlockId, patch: &Content) -> MutationOutcome {
        let Some(block) = self.document.block_mut(id) else {
            tracing::debug!("Patch on missing block {} ignored", id);
            return MutationOutcome::NoOp;
        };

        let mut changed = false;
        for (field, value) in patch {
            if block.content.get(field) != Some(value) {
                block.content.insert(field.clone(), value.clone());
                changed = true;
            }
        }

        self.finish(changed)
    }

    /// Swap the block with its neighbor in `direction`
    pub fn move_block(&mut self, id: &BlockId, direction: MoveDirection) -> MutationOutcome {
        let Some(pos) = self.document.position(id) else {
            return MutationOutcome::NoOp;
        };

        let target = match direction {
            MoveDirection::Up if pos > 0 => pos - 1,
            MoveDirection::Down if pos + 1 < self.document.blocks.len() => pos + 1,
            _ => return MutationOutcome::NoOp,
        };

        self.document.blocks.swap(pos, target);
        self.finish(true)
    }

    pub fn delete_block(&mut self, id: &BlockId) -> MutationOutcome {
        let Some(pos) = self.document.position(id) else {
            return MutationOutcome::NoOp;
        };

        self.document.blocks.remove(pos);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        self.finish(true)
    }

    /// Bulk replace of blocks and metadata (template load, fetched document).
    /// Missing or duplicate ids are re-keyed.
    pub fn replace_all(&mut self, blocks: Vec<Block>, metadata: Metadata) -> MutationOutcome {
        let blocks = self.claim_ids(blocks);
        let changed = blocks != self.document.blocks || metadata != self.document.metadata;

        self.document.blocks = blocks;
        self.document.metadata = metadata;
        self.selected = None;
        self.finish(changed)
    }

    /// Pure selection change. Selecting an id that is not in the document is
    /// a no-op.
    pub fn select_block(&mut self, id: Option<BlockId>) -> MutationOutcome {
        if let Some(id) = &id {
            if self.document.position(id).is_none() {
                return MutationOutcome::NoOp;
            }
        }
        if self.selected == id {
            return MutationOutcome::NoOp;
        }
        self.selected = id;
        MutationOutcome::Applied
    }

    pub fn set_global_style(&mut self, patch: &GlobalStylePatch) -> MutationOutcome {
        let changed = patch.apply(&mut self.document.global_style);
        self.finish(changed)
    }

    pub fn set_metadata(&mut self, patch: &MetadataPatch) -> MutationOutcome {
        let changed = patch.apply(&mut self.document.metadata);
        self.finish(changed)
    }

    /// Replace the whole document as a new baseline (mount, restore, fetch)
    pub fn load(&mut self, mut document: Document) {
        let blocks = std::mem::take(&mut document.blocks);
        document.blocks = self.claim_ids(blocks);
        self.document = document;
        self.selected = None;
        self.bump();
    }

    /// Swap in a history snapshot. Snapshot ids were all allocated by this
    /// model, so the generator needs no adjustment.
    pub(crate) fn restore(&mut self, document: Document) {
        if let Some(selected) = &self.selected {
            if document.position(selected).is_none() {
                self.selected = None;
            }
        }
        self.document = document;
        self.bump();
    }

    fn claim_ids(&mut self, blocks: Vec<Block>) -> Vec<Block> {
        for block in &blocks {
            self.ids.observe(&block.id);
        }

        let mut seen = HashSet::new();
        blocks
            .into_iter()
            .map(|mut block| {
                if block.id.is_empty() || !seen.insert(block.id.clone()) {
                    let fresh = self.ids.next_id();
                    tracing::debug!("Re-keying block {:?} as {}", block.id.as_str(), fresh);
                    seen.insert(fresh.clone());
                    block.id = fresh;
                }
                block
            })
            .collect()
    }

    fn finish(&mut self, changed: bool) -> MutationOutcome {
        if changed {
            self.bump();
            MutationOutcome::Applied
        } else {
            MutationOutcome::NoOp
        }
    }

    fn bump(&mut self) {
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model_with(types: &[BlockType]) -> (DocumentModel, Vec<BlockId>) {
        let mut model = DocumentModel::new("test");
        let ids = types
            .iter()
            .filter_map(|t| model.insert_block(t.clone(), true))
            .collect();
        (model, ids)
    }

    #[test]
    fn test_insert_appends_with_defaults() {
        let (model, ids) = model_with(&[BlockType::Header, BlockType::Button]);

        assert_eq!(model.document().block_ids(), ids);
        let button = model.document().block(&ids[1]).unwrap();
        assert_eq!(button.content["text"], json!("Learn More"));
        assert_eq!(model.selected(), Some(&ids[1]));
    }

    #[test]
    fn test_insert_after_selection() {
        let (mut model, ids) = model_with(&[BlockType::Header, BlockType::Text]);
        model.select_block(Some(ids[0].clone()));

        let inserted = model.insert_block(BlockType::Divider, false).unwrap();

        assert_eq!(
            model.document().block_ids(),
            vec![ids[0].clone(), inserted, ids[1].clone()]
        );
    }

    #[test]
    fn test_insert_at_top_without_selection() {
        let (mut model, ids) = model_with(&[BlockType::Header]);
        model.select_block(None);

        let inserted = model.insert_block(BlockType::Spacer, false).unwrap();
        assert_eq!(model.document().block_ids(), vec![inserted, ids[0].clone()]);
    }

    #[test]
    fn test_reserved_custom_type_is_refused() {
        let (mut model, ids) = model_with(&[BlockType::Header]);
        let version = model.version();

        for tag in ["hero", "banner", "heading"] {
            assert_eq!(model.insert_block(BlockType::Custom(tag.to_string()), true), None);
        }
        assert_eq!(model.document().block_ids(), ids);
        assert_eq!(model.version(), version);

        let poll = model.insert_block(BlockType::Custom("poll".to_string()), true);
        assert!(poll.is_some());
    }

    #[test]
    fn test_patch_is_shallow_merge() {
        let (mut model, ids) = model_with(&[BlockType::Button]);
        let mut patch = Content::new();
        patch.insert("text".to_string(), json!("Donate"));

        assert_eq!(model.patch_block_content(&ids[0], &patch), MutationOutcome::Applied);
        let block = model.document().block(&ids[0]).unwrap();
        assert_eq!(block.content["text"], json!("Donate"));
        assert_eq!(block.content["url"], json!("#"));

        // Same patch again changes nothing
        assert_eq!(model.patch_block_content(&ids[0], &patch), MutationOutcome::NoOp);
    }

    #[test]
    fn test_patch_missing_block_is_noop() {
        let (mut model, _) = model_with(&[BlockType::Text]);
        let before = model.document().clone();

        let outcome = model.patch_block_content(&BlockId::from("nope"), &Content::new());

        assert_eq!(outcome, MutationOutcome::NoOp);
        assert_eq!(model.document(), &before);
    }

    #[test]
    fn test_move_boundaries() {
        let (mut model, ids) = model_with(&[BlockType::Header, BlockType::Text, BlockType::Image]);

        assert_eq!(model.move_block(&ids[0], MoveDirection::Up), MutationOutcome::NoOp);
        assert_eq!(model.move_block(&ids[2], MoveDirection::Down), MutationOutcome::NoOp);
        assert_eq!(model.document().block_ids(), ids);

        assert_eq!(model.move_block(&ids[0], MoveDirection::Down), MutationOutcome::Applied);
        assert_eq!(
            model.document().block_ids(),
            vec![ids[1].clone(), ids[0].clone(), ids[2].clone()]
        );
    }

    #[test]
    fn test_delete_clears_selection() {
        let (mut model, ids) = model_with(&[BlockType::Header, BlockType::Text]);
        assert_eq!(model.selected(), Some(&ids[1]));

        model.delete_block(&ids[1]);
        assert_eq!(model.selected(), None);
        assert_eq!(model.document().len(), 1);

        assert_eq!(model.delete_block(&ids[1]), MutationOutcome::NoOp);
    }

    #[test]
    fn test_ids_never_reused_after_delete() {
        let (mut model, ids) = model_with(&[BlockType::Text]);
        model.delete_block(&ids[0]);
        let next = model.insert_block(BlockType::Text, true).unwrap();
        assert_ne!(next, ids[0]);
    }

    #[test]
    fn test_replace_all_rekeys_duplicates_and_observes_ids() {
        let mut model = DocumentModel::new("test");
        let seed = IdGenerator::new("test").seed().to_string();
        let loaded = format!("{}-40", seed);

        let blocks = vec![
            Block::with_defaults(BlockId::new(loaded.clone()), BlockType::Text),
            Block::with_defaults(BlockId::new(loaded.clone()), BlockType::Text),
            Block::with_defaults(BlockId::new(""), BlockType::Spacer),
        ];
        model.replace_all(blocks, Metadata::default());

        let ids: Vec<String> = model
            .document()
            .blocks
            .iter()
            .map(|b| b.id.to_string())
            .collect();
        assert_eq!(ids[0], loaded);
        assert_eq!(ids[1], format!("{}-41", seed));
        assert_eq!(ids[2], format!("{}-42", seed));

        let next = model.insert_block(BlockType::Header, true).unwrap();
        assert_eq!(next.to_string(), format!("{}-43", seed));
    }

    #[test]
    fn test_select_unknown_block_is_noop() {
        let (mut model, _) = model_with(&[BlockType::Text]);
        assert_eq!(
            model.select_block(Some(BlockId::from("ghost"))),
            MutationOutcome::NoOp
        );
    }

    #[test]
    fn test_from_json() {
        let model = DocumentModel::from_json(
            "test",
            r#"{ "blocks": [{ "id": "a", "type": "spacer", "content": {} }] }"#,
        )
        .unwrap();
        assert_eq!(model.document().len(), 1);

        assert!(DocumentModel::from_json("test", "[]").is_err());
    }
}
