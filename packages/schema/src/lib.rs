//! # Broadsheet Schema
//!
//! Canonical content model shared by every other crate.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ registry: BlockType → category + fields     │
//! │  - field kinds and default values           │
//! │  - foreign synonyms (aliases)               │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ Document = ordered Blocks + style + meta    │
//! │ DocumentRecord = wire shape for the API     │
//! └─────────────────────────────────────────────┘
//! ```

pub mod block;
pub mod block_type;
pub mod document;
pub mod id_generator;
pub mod record;
pub mod registry;

pub use block::{value_to_text, Block, BlockId, Content};
pub use block_type::BlockType;
pub use document::{Document, GlobalStyle, GlobalStylePatch, Metadata, MetadataPatch};
pub use id_generator::{scope_seed, IdGenerator};
pub use record::{DesignJson, DocumentRecord};
pub use registry::{
    all_schemas, default_value, defaults_for, is_canonical_type, is_known_type, is_reserved_tag,
    resolve_alias, schema_for, BlockSchema, DisplayCategory, FieldKind, FieldSpec,
    DATE_SENTINEL, HERO_TAGS,
};
