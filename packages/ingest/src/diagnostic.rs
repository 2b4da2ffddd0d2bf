use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Warning,
    Info,
}

/// What happened to a foreign entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// The entry had no usable `type` tag or `content` object and was dropped
    SkippedMalformedBlock,

    /// A date field could not be parsed and was replaced by the sentinel
    DateReplaced { field: String },
}

/// Non-blocking note collected while ingesting a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,

    pub kind: DiagnosticKind,

    /// 1-based position of the entry in the foreign `blocks` array
    pub index: usize,

    /// Human-readable message
    pub message: String,
}

impl Diagnostic {
    pub fn skipped(index: usize, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            kind: DiagnosticKind::SkippedMalformedBlock,
            index,
            message: message.into(),
        }
    }

    pub fn date_replaced(index: usize, field: impl Into<String>, original: &str) -> Self {
        let field = field.into();
        Self {
            level: DiagnosticLevel::Info,
            message: format!("unparsable date {:?} in `{}` replaced", original, field),
            kind: DiagnosticKind::DateReplaced { field },
            index,
        }
    }

    pub fn is_skip(&self) -> bool {
        self.kind == DiagnosticKind::SkippedMalformedBlock
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block #{}: {}", self.index, self.message)
    }
}
