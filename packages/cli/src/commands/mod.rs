pub mod blocks;
pub mod draft;
pub mod export_template;
pub mod ingest;
pub mod render;

pub use blocks::{blocks, BlocksArgs};
pub use draft::{draft, DraftArgs};
pub use export_template::{export_template, ExportTemplateArgs};
pub use ingest::{ingest, IngestArgs};
pub use render::{render, RenderArgs};

use anyhow::{anyhow, Context, Result};
use broadsheet_schema::{Document, DocumentRecord};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a design file, either a stored record (`design_json`) or a bare
/// document (`blocks`)
pub(crate) fn load_document(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    if value.get("design_json").is_some() {
        tracing::debug!("Loading {} as a stored record", path.display());
        let record: DocumentRecord = serde_json::from_value(value)?;
        Ok(record.into_document())
    } else if value.get("blocks").is_some() {
        tracing::debug!("Loading {} as a bare document", path.display());
        Ok(serde_json::from_value(value)?)
    } else {
        Err(anyhow!(
            "{} has neither `design_json` nor `blocks`",
            path.display()
        ))
    }
}

/// `<cwd>/<input stem><suffix>`
pub(crate) fn default_output(input: &Path, cwd: &str, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    PathBuf::from(cwd).join(format!("{}{}", stem, suffix))
}

/// Write `output` to a file (creating parent directories) and return its
/// display path
pub(crate) fn write_output(path: &Path, output: &str) -> Result<String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, output)?;
    Ok(path.display().to_string())
}
