//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid document JSON: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}
