use crate::block_type::BlockType;
use crate::registry;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Field name → value map of a block. Keys are kept sorted so equal content
/// always serializes identically.
pub type Content = Map<String, Value>;

/// Opaque block identifier, unique within a document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One discrete content unit of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,

    #[serde(rename = "type")]
    pub block_type: BlockType,

    #[serde(default)]
    pub content: Content,
}

impl Block {
    pub fn new(id: BlockId, block_type: BlockType, content: Content) -> Self {
        Self {
            id,
            block_type,
            content,
        }
    }

    /// Block populated with the registry defaults for its type
    pub fn with_defaults(id: BlockId, block_type: BlockType) -> Self {
        let content = registry::defaults_for(&block_type);
        Self::new(id, block_type, content)
    }

    /// Field value, falling back to the registry default when the field is
    /// missing or null. Returns `Value::Null` when neither exists.
    pub fn value(&self, field: &str) -> Value {
        match self.content.get(field) {
            Some(value) if !value.is_null() => value.clone(),
            _ => registry::default_value(&self.block_type, field).unwrap_or(Value::Null),
        }
    }

    /// Field rendered as display text (strings verbatim, numbers and booleans
    /// formatted, anything else empty)
    pub fn text(&self, field: &str) -> String {
        value_to_text(&self.value(field))
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        match self.value(field) {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Display text of a scalar JSON value
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}
