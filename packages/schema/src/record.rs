//! Wire shape of a stored design, as exchanged with the template API:
//!
//! ```json
//! { "name": "...", "category": "...", "subject": "...",
//!   "design_json": { "blocks": [{ "id", "type", "content" }], "styles": { ... } } }
//! ```

use crate::block::Block;
use crate::document::{Document, GlobalStyle, Metadata};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub subject: String,

    pub design_json: DesignJson,

    /// Rendered export pushed alongside the design on remote sync
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignJson {
    #[serde(default)]
    pub blocks: Vec<Block>,

    #[serde(default)]
    pub styles: GlobalStyle,
}

impl DocumentRecord {
    pub fn from_document(document: &Document) -> Self {
        Self {
            name: document.metadata.name.clone(),
            category: document.metadata.category.clone(),
            subject: document.metadata.subject_line.clone(),
            design_json: DesignJson {
                blocks: document.blocks.clone(),
                styles: document.global_style.clone(),
            },
            html_content: None,
        }
    }

    pub fn with_html(mut self, html: String) -> Self {
        self.html_content = Some(html);
        self
    }

    pub fn into_document(self) -> Document {
        Document {
            blocks: self.design_json.blocks,
            global_style: self.design_json.styles,
            metadata: Metadata {
                name: self.name,
                category: self.category,
                subject_line: self.subject,
            },
        }
    }
}

impl From<&Document> for DocumentRecord {
    fn from(document: &Document) -> Self {
        Self::from_document(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlockId, BlockType};
    use serde_json::json;

    #[test]
    fn test_record_json_shape() {
        let mut doc = Document::with_blocks(vec![Block::with_defaults(
            BlockId::from("b1"),
            BlockType::Spacer,
        )]);
        doc.metadata.name = "Spring Newsletter".to_string();
        doc.metadata.subject_line = "Hello spring".to_string();

        let json = serde_json::to_value(DocumentRecord::from(&doc)).unwrap();
        assert_eq!(json["name"], json!("Spring Newsletter"));
        assert_eq!(json["subject"], json!("Hello spring"));
        assert_eq!(json["design_json"]["blocks"][0]["type"], json!("spacer"));
        assert_eq!(json["design_json"]["styles"]["backgroundColor"], json!("#f3f4f6"));
        assert!(json.get("html_content").is_none());
    }

    #[test]
    fn test_record_converts_back_to_document() {
        let doc = Document::with_blocks(vec![Block::with_defaults(
            BlockId::from("b1"),
            BlockType::Divider,
        )]);
        let round_tripped = DocumentRecord::from(&doc).into_document();
        assert_eq!(round_tripped, doc);
    }
}
