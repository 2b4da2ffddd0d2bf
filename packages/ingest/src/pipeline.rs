//! # Template Ingestion Pipeline
//!
//! Converts an untrusted, foreign-shaped template into canonical blocks.
//!
//! ## Contract
//!
//! - Payload level: the template must be an object with a `blocks` array,
//!   otherwise nothing is ingested and [`IngestError::InvalidTemplateShape`]
//!   is returned.
//! - Entry level: an entry without a `type` tag or a `content` object is
//!   skipped with a [`DiagnosticKind::SkippedMalformedBlock`] diagnostic and
//!   the remaining entries are still converted.
//! - Output order follows input order; expansions keep their internal order.
//! - Ingesting the pipeline's own output yields the same blocks.
//!
//! [`DiagnosticKind::SkippedMalformedBlock`]: crate::DiagnosticKind::SkippedMalformedBlock

use crate::diagnostic::Diagnostic;
use crate::error::{IngestError, IngestResult};
use crate::normalize::{lift_flat_entity, normalize_fields, DateNote};
use broadsheet_schema::{
    resolve_alias, schema_for, Block, BlockId, BlockType, Content, Document, GlobalStyle,
    IdGenerator, Metadata, HERO_TAGS,
};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Result of ingesting one template
#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport {
    pub metadata: Metadata,
    pub styles: GlobalStyle,
    pub blocks: Vec<Block>,
    pub diagnostics: Vec<Diagnostic>,
}

impl IngestReport {
    /// Diagnostics for entries that were dropped
    pub fn skipped(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_skip())
    }

    pub fn into_document(self) -> Document {
        Document {
            blocks: self.blocks,
            global_style: self.styles,
            metadata: self.metadata,
        }
    }
}

/// One foreign entry that passed the shape check
struct ForeignEntry<'a> {
    tag: &'a str,
    content: &'a Map<String, Value>,
    id: Option<&'a str>,
}

impl<'a> ForeignEntry<'a> {
    fn parse(entry: &'a Value) -> Result<Self, &'static str> {
        let entry = entry.as_object().ok_or("entry is not an object")?;

        let tag = entry
            .get("type")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or("missing `type` tag")?;

        let content = entry
            .get("content")
            .and_then(Value::as_object)
            .ok_or("missing `content` object")?;

        Ok(Self {
            tag,
            content,
            id: foreign_id(entry),
        })
    }
}

fn foreign_id(entry: &Map<String, Value>) -> Option<&str> {
    entry
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
}

/// Converter for a single template. Borrows the id generator of the document
/// the blocks are destined for.
pub struct Ingestor<'a> {
    ids: &'a mut IdGenerator,
    used_ids: HashSet<BlockId>,
    blocks: Vec<Block>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Ingestor<'a> {
    pub fn new(ids: &'a mut IdGenerator) -> Self {
        Self {
            ids,
            used_ids: HashSet::new(),
            blocks: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn ingest(mut self, payload: &Value) -> IngestResult<IngestReport> {
        let template = payload.as_object().ok_or_else(|| {
            IngestError::InvalidTemplateShape("template is not an object".to_string())
        })?;

        let entries = match template.get("blocks") {
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                return Err(IngestError::InvalidTemplateShape(
                    "`blocks` is not an array".to_string(),
                ))
            }
            None => {
                return Err(IngestError::InvalidTemplateShape(
                    "missing `blocks` array".to_string(),
                ))
            }
        };

        // Reserve every foreign id up front so generated ids never collide
        // with one that appears later in the array.
        for entry in entries.iter().filter_map(Value::as_object) {
            if let Some(id) = foreign_id(entry) {
                self.ids.observe(&BlockId::from(id));
            }
        }

        for (i, entry) in entries.iter().enumerate() {
            let index = i + 1;
            match ForeignEntry::parse(entry) {
                Ok(entry) => self.convert(&entry, index),
                Err(reason) => {
                    tracing::warn!("Skipping template block #{}: {}", index, reason);
                    self.diagnostics.push(Diagnostic::skipped(index, reason));
                }
            }
        }

        tracing::debug!(
            "Ingested {} blocks from {} entries ({} diagnostics)",
            self.blocks.len(),
            entries.len(),
            self.diagnostics.len()
        );

        Ok(IngestReport {
            metadata: read_metadata(template),
            styles: read_styles(template),
            blocks: self.blocks,
            diagnostics: self.diagnostics,
        })
    }

    fn convert(&mut self, entry: &ForeignEntry<'_>, index: usize) {
        if HERO_TAGS.contains(&entry.tag) {
            self.expand_hero(entry, index);
            return;
        }

        match resolve_alias(entry.tag) {
            Some(block_type) => {
                let content = self.normalize_known(&block_type, entry.content, index);
                self.push(entry.id, block_type, content);
            }
            None => {
                let content = generic_content(entry.content);
                self.push(entry.id, BlockType::Custom(entry.tag.to_string()), content);
            }
        }
    }

    /// Hero banner → header (title) followed by text (subtitle), both carrying
    /// the banner's background and text color.
    fn expand_hero(&mut self, entry: &ForeignEntry<'_>, index: usize) {
        let content = entry.content;
        let title = first_present(content, &["title", "heading"]);
        let subtitle = first_present(content, &["subtitle", "subheading", "tagline"]);
        let background = first_present(content, &["backgroundColor", "background", "bgColor"]);
        let color = first_present(content, &["textColor", "color"]);
        let align = first_present(content, &["align", "textAlign"]);

        let shared = |text: Option<&Value>| {
            let mut raw = Map::new();
            if let Some(text) = text {
                raw.insert("text".to_string(), text.clone());
            }
            if let Some(background) = background {
                raw.insert("backgroundColor".to_string(), background.clone());
            }
            if let Some(color) = color {
                raw.insert("color".to_string(), color.clone());
            }
            raw.insert(
                "align".to_string(),
                align.cloned().unwrap_or_else(|| Value::String("center".to_string())),
            );
            raw
        };

        let mut id = entry.id;

        if title.is_some() || subtitle.is_none() {
            let header = self.normalize_known(&BlockType::Header, &shared(title), index);
            self.push(id.take(), BlockType::Header, header);
        }

        if subtitle.is_some() {
            let text = self.normalize_known(&BlockType::Text, &shared(subtitle), index);
            self.push(id.take(), BlockType::Text, text);
        }
    }

    fn normalize_known(
        &mut self,
        block_type: &BlockType,
        raw: &Map<String, Value>,
        index: usize,
    ) -> Content {
        let schema = match schema_for(block_type) {
            Some(schema) => schema,
            None => return generic_content(raw),
        };

        let raw = lift_flat_entity(schema.fields, raw);
        let mut notes: Vec<DateNote> = Vec::new();
        let content = normalize_fields(schema.fields, &raw, "", &mut notes);

        for note in notes {
            tracing::debug!(
                "Replacing unparsable date in block #{} field {}: {:?}",
                index,
                note.field,
                note.original
            );
            self.diagnostics
                .push(Diagnostic::date_replaced(index, note.field, &note.original));
        }

        content
    }

    fn push(&mut self, requested: Option<&str>, block_type: BlockType, content: Content) {
        let id = self.claim_id(requested);
        self.blocks.push(Block::new(id, block_type, content));
    }

    /// Keep the foreign id when it is unique within this template, otherwise
    /// generate a fresh one.
    fn claim_id(&mut self, requested: Option<&str>) -> BlockId {
        if let Some(requested) = requested {
            let id = BlockId::from(requested);
            if self.used_ids.insert(id.clone()) {
                return id;
            }
        }

        loop {
            let id = self.ids.next_id();
            if self.used_ids.insert(id.clone()) {
                return id;
            }
        }
    }
}

/// Ingest a template into blocks with ids scoped to the template itself
pub fn ingest(payload: &Value) -> IngestResult<IngestReport> {
    let scope = payload
        .get("id")
        .map(|id| match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .or_else(|| payload.get("name").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| "anonymous".to_string());

    let mut ids = IdGenerator::new(&format!("template:{}", scope));
    Ingestor::new(&mut ids).ingest(payload)
}

/// Ingest template text; text that is not JSON is an invalid shape
pub fn ingest_str(text: &str) -> IngestResult<IngestReport> {
    let payload: Value = serde_json::from_str(text)
        .map_err(|e| IngestError::InvalidTemplateShape(format!("not valid JSON: {}", e)))?;
    ingest(&payload)
}

/// Fallback for unrecognized types: keep primitive and array fields only
fn generic_content(raw: &Map<String, Value>) -> Content {
    raw.iter()
        .filter(|(_, value)| {
            matches!(
                value,
                Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Array(_)
            )
        })
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

fn first_present<'a>(content: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| content.get(*name))
        .find(|value| !value.is_null())
}

fn read_metadata(template: &Map<String, Value>) -> Metadata {
    let mut metadata = Metadata::default();
    if let Some(name) = template.get("name").and_then(Value::as_str) {
        metadata.name = name.to_string();
    }
    if let Some(category) = template.get("category").and_then(Value::as_str) {
        metadata.category = category.to_string();
    }
    if let Some(subject) = first_present(template, &["subject", "subjectLine"]).and_then(Value::as_str) {
        metadata.subject_line = subject.to_string();
    }
    metadata
}

fn read_styles(template: &Map<String, Value>) -> GlobalStyle {
    let mut styles = GlobalStyle::default();
    let Some(raw) = template.get("styles").and_then(Value::as_object) else {
        return styles;
    };

    let text = |name: &str| raw.get(name).and_then(Value::as_str).map(str::to_string);
    if let Some(v) = text("backgroundColor") {
        styles.background_color = v;
    }
    if let Some(v) = text("fontFamily") {
        styles.font_family = v;
    }
    if let Some(v) = text("primaryColor") {
        styles.primary_color = v;
    }
    if let Some(v) = text("secondaryColor") {
        styles.secondary_color = v;
    }
    styles
}
