//! Document data model: ordered blocks plus global style and metadata.
//!
//! Block order is the only thing that decides render order. There is no
//! z-order or coordinate system; a document is a single vertical flow.

use crate::block::{Block, BlockId};
use serde::{Deserialize, Serialize};

/// Styles applied to the whole document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalStyle {
    pub background_color: String,
    pub font_family: String,
    pub primary_color: String,
    pub secondary_color: String,
}

impl Default for GlobalStyle {
    fn default() -> Self {
        Self {
            background_color: "#f3f4f6".to_string(),
            font_family: "Arial, Helvetica, sans-serif".to_string(),
            primary_color: "#2563eb".to_string(),
            secondary_color: "#64748b".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    pub name: String,
    pub category: String,
    pub subject_line: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            name: "Untitled Design".to_string(),
            category: "general".to_string(),
            subject_line: String::new(),
        }
    }
}

/// Partial update of [`GlobalStyle`]; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStylePatch {
    pub background_color: Option<String>,
    pub font_family: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
}

impl GlobalStylePatch {
    /// Apply the patch, returning whether anything changed
    pub fn apply(&self, style: &mut GlobalStyle) -> bool {
        let mut changed = false;
        changed |= assign(&mut style.background_color, &self.background_color);
        changed |= assign(&mut style.font_family, &self.font_family);
        changed |= assign(&mut style.primary_color, &self.primary_color);
        changed |= assign(&mut style.secondary_color, &self.secondary_color);
        changed
    }
}

/// Partial update of [`Metadata`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub subject_line: Option<String>,
}

impl MetadataPatch {
    pub fn apply(&self, metadata: &mut Metadata) -> bool {
        let mut changed = false;
        changed |= assign(&mut metadata.name, &self.name);
        changed |= assign(&mut metadata.category, &self.category);
        changed |= assign(&mut metadata.subject_line, &self.subject_line);
        changed
    }
}

fn assign(target: &mut String, value: &Option<String>) -> bool {
    match value {
        Some(v) if v != target => {
            *target = v.clone();
            true
        }
        _ => false,
    }
}

/// A complete design
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub blocks: Vec<Block>,

    #[serde(default)]
    pub global_style: GlobalStyle,

    #[serde(default)]
    pub metadata: Metadata,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            ..Self::default()
        }
    }

    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn block_mut(&mut self, id: &BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| &b.id == id)
    }

    pub fn block_ids(&self) -> Vec<BlockId> {
        self.blocks.iter().map(|b| b.id.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }
}
