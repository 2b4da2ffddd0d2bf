//! # Broadsheet Ingest
//!
//! Turns foreign template payloads (template library entries, generated
//! content fragments) into canonical blocks.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use broadsheet_ingest::ingest_str;
//!
//! let report = ingest_str(&template_text)?;
//! for diagnostic in &report.diagnostics {
//!     eprintln!("{}", diagnostic);
//! }
//! let document = report.into_document();
//! ```

mod dates;
mod diagnostic;
mod error;
mod normalize;
mod pipeline;
mod template;

pub use dates::is_valid_date_text;
pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticLevel};
pub use error::{IngestError, IngestResult};
pub use pipeline::{ingest, ingest_str, IngestReport, Ingestor};
pub use template::{export_template, TemplateExport};
