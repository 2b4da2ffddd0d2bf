use thiserror::Error;

/// Errors that abort ingestion of a whole template
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IngestError {
    /// The payload cannot be used at all (not an object, no `blocks` array,
    /// not JSON). Nothing is ingested.
    #[error("Invalid template shape: {0}")]
    InvalidTemplateShape(String),
}

pub type IngestResult<T> = Result<T, IngestError>;
