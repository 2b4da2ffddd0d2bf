//! # Document Mutations
//!
//! Serializable form of every editing operation, so that a UI (or a test
//! script) can drive a [`DocumentModel`] with plain data.
//!
//! ## Mutation Semantics
//!
//! - Operations on ids that do not exist are no-ops
//! - `SelectBlock` never reaches the edit history
//! - `ReplaceAll` re-keys empty and duplicate ids

use crate::document::DocumentModel;
use broadsheet_schema::{Block, BlockId, BlockType, Content, GlobalStylePatch, Metadata, MetadataPatch};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Result of applying a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Document or selection changed
    Applied,

    /// Nothing changed (move at a boundary, patch on a missing id, ...)
    NoOp,
}

impl MutationOutcome {
    pub fn is_applied(self) -> bool {
        self == MutationOutcome::Applied
    }
}

/// Editing operations on a document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Mutation {
    /// Add a block of the given type with default content
    #[serde(rename_all = "camelCase")]
    InsertBlock {
        block_type: BlockType,
        #[serde(default = "default_at_end")]
        at_end: bool,
    },

    /// Shallow-merge fields into a block's content
    PatchBlockContent { id: BlockId, patch: Content },

    /// Swap a block with its neighbor
    MoveBlock { id: BlockId, direction: MoveDirection },

    DeleteBlock { id: BlockId },

    /// Replace all blocks and metadata at once
    ReplaceAll { blocks: Vec<Block>, metadata: Metadata },

    SetGlobalStyle { patch: GlobalStylePatch },

    SetMetadata { patch: MetadataPatch },

    /// Change the UI selection
    SelectBlock { id: Option<BlockId> },
}

fn default_at_end() -> bool {
    true
}

impl Mutation {
    /// Apply this mutation to the model
    pub fn apply(&self, model: &mut DocumentModel) -> MutationOutcome {
        match self {
            Mutation::InsertBlock { block_type, at_end } => {
                match model.insert_block(block_type.clone(), *at_end) {
                    Some(_) => MutationOutcome::Applied,
                    None => MutationOutcome::NoOp,
                }
            }
            Mutation::PatchBlockContent { id, patch } => model.patch_block_content(id, patch),
            Mutation::MoveBlock { id, direction } => model.move_block(id, *direction),
            Mutation::DeleteBlock { id } => model.delete_block(id),
            Mutation::ReplaceAll { blocks, metadata } => {
                model.replace_all(blocks.clone(), metadata.clone())
            }
            Mutation::SetGlobalStyle { patch } => model.set_global_style(patch),
            Mutation::SetMetadata { patch } => model.set_metadata(patch),
            Mutation::SelectBlock { id } => model.select_block(id.clone()),
        }
    }

    /// Whether an applied mutation produces an undo step
    pub fn records_history(&self) -> bool {
        !matches!(self, Mutation::SelectBlock { .. })
    }
}

impl DocumentModel {
    pub fn apply(&mut self, mutation: &Mutation) -> MutationOutcome {
        mutation.apply(self)
    }
}
