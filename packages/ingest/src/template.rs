//! Export of a document back into the foreign template shape.
//!
//! This is what "copy template to clipboard" produces: the document itself,
//! not its rendered markup. Blocks keep their canonical type, id and content,
//! so ingesting the export again yields the same blocks.

use broadsheet_schema::{Block, Document, GlobalStyle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateExport {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub subject: String,
    pub styles: GlobalStyle,
    pub blocks: Vec<Block>,
}

impl TemplateExport {
    pub fn to_value(&self) -> serde_json::Value {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

pub fn export_template(document: &Document, id: &str, description: &str) -> TemplateExport {
    TemplateExport {
        id: id.to_string(),
        name: document.metadata.name.clone(),
        category: document.metadata.category.clone(),
        description: description.to_string(),
        subject: document.metadata.subject_line.clone(),
        styles: document.global_style.clone(),
        blocks: document.blocks.clone(),
    }
}
