//! # Block Schema Registry
//!
//! Single source of truth for every known block type: which palette category
//! it belongs to, which content fields it carries, the semantic kind of each
//! field and the value used when a field is missing.
//!
//! The registry is a static lookup table. Nothing in it is mutable and no
//! lookup can fail in a way that needs reporting: unknown types simply have no
//! schema and an empty default content map.

use crate::block::Content;
use crate::block_type::BlockType;
use serde_json::{json, Value};

/// Palette grouping shown in the block sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayCategory {
    Layout,
    Content,
    Media,
    Engagement,
}

impl DisplayCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayCategory::Layout => "layout",
            DisplayCategory::Content => "content",
            DisplayCategory::Media => "media",
            DisplayCategory::Engagement => "engagement",
        }
    }
}

/// Semantic type of a content field
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    String,
    Number,
    Color,
    Url,
    /// Free-form date text; must parse or be replaced by [`DATE_SENTINEL`]
    Date,
    StringList,
    /// List of objects, each following the given item schema
    StructList(&'static [FieldSpec]),
}

impl FieldKind {
    /// Kinds stored as a JSON string
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            FieldKind::String | FieldKind::Color | FieldKind::Url | FieldKind::Date
        )
    }
}

/// One field of a content schema
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    default: fn() -> Value,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind, default: fn() -> Value) -> Self {
        Self {
            name,
            kind,
            default,
        }
    }

    pub fn default_value(&self) -> Value {
        (self.default)()
    }
}

/// Schema of a known block type
#[derive(Debug)]
pub struct BlockSchema {
    pub tag: &'static str,
    pub label: &'static str,
    pub category: DisplayCategory,
    pub fields: &'static [FieldSpec],
}

impl BlockSchema {
    pub fn block_type(&self) -> BlockType {
        BlockType::from_tag(self.tag)
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fully populated content map built from the field defaults
    pub fn default_content(&self) -> Content {
        self.fields
            .iter()
            .map(|f| (f.name.to_string(), f.default_value()))
            .collect()
    }
}

/// Replacement for date text that could not be parsed
pub const DATE_SENTINEL: &str = "TBD";

const HEADER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("text", FieldKind::String, || json!("Your Heading Here")),
    FieldSpec::new("level", FieldKind::Number, || json!(1)),
    FieldSpec::new("align", FieldKind::String, || json!("center")),
    FieldSpec::new("color", FieldKind::Color, || json!("#111827")),
    FieldSpec::new("fontSize", FieldKind::Number, || json!(32)),
    FieldSpec::new("backgroundColor", FieldKind::Color, || json!("transparent")),
];

const TEXT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("text", FieldKind::String, || {
        json!("Add your message here. Share news, updates and stories with your community.")
    }),
    FieldSpec::new("align", FieldKind::String, || json!("left")),
    FieldSpec::new("color", FieldKind::Color, || json!("#374151")),
    FieldSpec::new("fontSize", FieldKind::Number, || json!(16)),
    FieldSpec::new("backgroundColor", FieldKind::Color, || json!("transparent")),
];

const IMAGE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("src", FieldKind::Url, || json!("https://placehold.co/600x300")),
    FieldSpec::new("alt", FieldKind::String, || json!("Image")),
    FieldSpec::new("width", FieldKind::Number, || json!(100)),
    FieldSpec::new("link", FieldKind::Url, || json!("")),
    FieldSpec::new("align", FieldKind::String, || json!("center")),
];

const BUTTON_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("text", FieldKind::String, || json!("Learn More")),
    FieldSpec::new("url", FieldKind::Url, || json!("#")),
    FieldSpec::new("backgroundColor", FieldKind::Color, || json!("#2563eb")),
    FieldSpec::new("textColor", FieldKind::Color, || json!("#ffffff")),
    FieldSpec::new("align", FieldKind::String, || json!("center")),
    FieldSpec::new("borderRadius", FieldKind::Number, || json!(6)),
];

const DIVIDER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("color", FieldKind::Color, || json!("#e5e7eb")),
    FieldSpec::new("thickness", FieldKind::Number, || json!(1)),
    FieldSpec::new("style", FieldKind::String, || json!("solid")),
    FieldSpec::new("margin", FieldKind::Number, || json!(16)),
];

const SPACER_FIELDS: &[FieldSpec] = &[FieldSpec::new("height", FieldKind::Number, || json!(32))];

const DONATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", FieldKind::String, || json!("Support Our Mission")),
    FieldSpec::new("description", FieldKind::String, || {
        json!("Every gift moves us closer to our goal.")
    }),
    FieldSpec::new("goal", FieldKind::Number, || json!(10000)),
    FieldSpec::new("raised", FieldKind::Number, || json!(2500)),
    FieldSpec::new("currency", FieldKind::String, || json!("$")),
    FieldSpec::new("barColor", FieldKind::Color, || json!("#16a34a")),
    FieldSpec::new("buttonText", FieldKind::String, || json!("Donate Now")),
    FieldSpec::new("buttonUrl", FieldKind::Url, || json!("#")),
];

const EVENT_ITEM_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", FieldKind::String, || json!("Community Gathering")),
    FieldSpec::new("date", FieldKind::Date, || json!(DATE_SENTINEL)),
    FieldSpec::new("time", FieldKind::String, || json!("")),
    FieldSpec::new("location", FieldKind::String, || json!("")),
    FieldSpec::new("description", FieldKind::String, || json!("")),
];

const EVENT_CARD_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", FieldKind::String, || json!("Upcoming Events")),
    FieldSpec::new("events", FieldKind::StructList(EVENT_ITEM_FIELDS), || {
        json!([{
            "title": "Community Gathering",
            "date": DATE_SENTINEL,
            "time": "6:00 PM",
            "location": "Community Center",
            "description": ""
        }])
    }),
    FieldSpec::new("accentColor", FieldKind::Color, || json!("#2563eb")),
];

const COUNTDOWN_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", FieldKind::String, || json!("Event Starts In")),
    FieldSpec::new("targetDate", FieldKind::Date, || json!(DATE_SENTINEL)),
    FieldSpec::new("message", FieldKind::String, || json!("Don't miss it!")),
    FieldSpec::new("accentColor", FieldKind::Color, || json!("#2563eb")),
];

const STAT_ITEM_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("label", FieldKind::String, || json!("Metric")),
    FieldSpec::new("value", FieldKind::String, || json!("0")),
];

const STATISTICS_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", FieldKind::String, || json!("Our Impact")),
    FieldSpec::new("stats", FieldKind::StructList(STAT_ITEM_FIELDS), || {
        json!([
            { "label": "Volunteers", "value": "250+" },
            { "label": "Meals Served", "value": "10,000" },
            { "label": "Events Hosted", "value": "48" }
        ])
    }),
    FieldSpec::new("accentColor", FieldKind::Color, || json!("#2563eb")),
];

const VOLUNTEER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", FieldKind::String, || json!("Volunteer With Us")),
    FieldSpec::new("description", FieldKind::String, || {
        json!("Lend a hand and make a difference in your neighborhood.")
    }),
    FieldSpec::new("roles", FieldKind::StringList, || {
        json!(["Event Setup", "Community Outreach", "Fundraising"])
    }),
    FieldSpec::new("buttonText", FieldKind::String, || json!("Sign Up")),
    FieldSpec::new("buttonUrl", FieldKind::Url, || json!("#")),
];

const ANNOUNCEMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", FieldKind::String, || json!("Announcement")),
    FieldSpec::new("body", FieldKind::String, || {
        json!("Share an important update with your members.")
    }),
    FieldSpec::new("date", FieldKind::Date, || json!(DATE_SENTINEL)),
    FieldSpec::new("highlightColor", FieldKind::Color, || json!("#fef3c7")),
];

const SOCIAL_LINK_ITEM_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("platform", FieldKind::String, || json!("website")),
    FieldSpec::new("url", FieldKind::Url, || json!("#")),
];

const SOCIAL_LINKS_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("links", FieldKind::StructList(SOCIAL_LINK_ITEM_FIELDS), || {
        json!([
            { "platform": "facebook", "url": "#" },
            { "platform": "instagram", "url": "#" }
        ])
    }),
    FieldSpec::new("align", FieldKind::String, || json!("center")),
];

const FOOTER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("text", FieldKind::String, || {
        json!("You are receiving this because you are a member of our organization.")
    }),
    FieldSpec::new("unsubscribeUrl", FieldKind::Url, || json!("#")),
    FieldSpec::new("color", FieldKind::Color, || json!("#6b7280")),
];

static SCHEMAS: &[BlockSchema] = &[
    BlockSchema {
        tag: "header",
        label: "Header",
        category: DisplayCategory::Content,
        fields: HEADER_FIELDS,
    },
    BlockSchema {
        tag: "text",
        label: "Text",
        category: DisplayCategory::Content,
        fields: TEXT_FIELDS,
    },
    BlockSchema {
        tag: "image",
        label: "Image",
        category: DisplayCategory::Media,
        fields: IMAGE_FIELDS,
    },
    BlockSchema {
        tag: "button",
        label: "Button",
        category: DisplayCategory::Content,
        fields: BUTTON_FIELDS,
    },
    BlockSchema {
        tag: "divider",
        label: "Divider",
        category: DisplayCategory::Layout,
        fields: DIVIDER_FIELDS,
    },
    BlockSchema {
        tag: "spacer",
        label: "Spacer",
        category: DisplayCategory::Layout,
        fields: SPACER_FIELDS,
    },
    BlockSchema {
        tag: "donation-progress",
        label: "Donation Progress",
        category: DisplayCategory::Engagement,
        fields: DONATION_FIELDS,
    },
    BlockSchema {
        tag: "event-card",
        label: "Event Card",
        category: DisplayCategory::Engagement,
        fields: EVENT_CARD_FIELDS,
    },
    BlockSchema {
        tag: "countdown",
        label: "Countdown",
        category: DisplayCategory::Engagement,
        fields: COUNTDOWN_FIELDS,
    },
    BlockSchema {
        tag: "statistics-panel",
        label: "Statistics Panel",
        category: DisplayCategory::Engagement,
        fields: STATISTICS_FIELDS,
    },
    BlockSchema {
        tag: "volunteer",
        label: "Volunteer Sign-up",
        category: DisplayCategory::Engagement,
        fields: VOLUNTEER_FIELDS,
    },
    BlockSchema {
        tag: "announcement",
        label: "Announcement",
        category: DisplayCategory::Content,
        fields: ANNOUNCEMENT_FIELDS,
    },
    BlockSchema {
        tag: "social-links",
        label: "Social Links",
        category: DisplayCategory::Media,
        fields: SOCIAL_LINKS_FIELDS,
    },
    BlockSchema {
        tag: "footer",
        label: "Footer",
        category: DisplayCategory::Layout,
        fields: FOOTER_FIELDS,
    },
];

/// All known schemas, in palette order
pub fn all_schemas() -> &'static [BlockSchema] {
    SCHEMAS
}

pub fn schema_for(block_type: &BlockType) -> Option<&'static BlockSchema> {
    if block_type.is_custom() {
        return None;
    }
    SCHEMAS.iter().find(|s| s.tag == block_type.as_str())
}

/// Default content for a block type. Custom types have no fields.
pub fn defaults_for(block_type: &BlockType) -> Content {
    schema_for(block_type)
        .map(BlockSchema::default_content)
        .unwrap_or_default()
}

pub fn is_known_type(tag: &str) -> bool {
    SCHEMAS.iter().any(|s| s.tag == tag)
}

/// Default value of a single field, if the type declares it
pub fn default_value(block_type: &BlockType, field: &str) -> Option<Value> {
    schema_for(block_type)
        .and_then(|s| s.field(field))
        .map(FieldSpec::default_value)
}

/// Foreign tags that ingestion expands into a header followed by a text block
pub const HERO_TAGS: &[&str] = &["hero", "hero-banner", "banner"];

/// Tags ingestion rewrites: canonical tags, synonyms and hero banners. A
/// custom block carrying one of these would not survive re-ingestion.
pub fn is_reserved_tag(tag: &str) -> bool {
    HERO_TAGS.contains(&tag) || resolve_alias(tag).is_some()
}

/// Whether a block of this type ingests back to the same type
pub fn is_canonical_type(block_type: &BlockType) -> bool {
    match block_type {
        BlockType::Custom(tag) => !is_reserved_tag(tag),
        _ => true,
    }
}

/// Map a foreign synonym onto its canonical tag.
///
/// Returns `None` for tags that are neither canonical nor a known synonym.
pub fn resolve_alias(tag: &str) -> Option<BlockType> {
    let canonical = match tag {
        "heading" | "title" => "header",
        "paragraph" | "body" => "text",
        "cta" => "button",
        "separator" | "hr" => "divider",
        "donation" | "donation_progress" | "fundraiser" => "donation-progress",
        "event" | "events" | "event_card" | "calendar-event" | "calendar_event" => "event-card",
        "stats" | "statistics" => "statistics-panel",
        "social" => "social-links",
        other if is_known_type(other) => other,
        _ => return None,
    };
    Some(BlockType::from_tag(canonical))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_type_has_schema() {
        for block_type in BlockType::KNOWN.iter() {
            let schema = schema_for(block_type).expect("schema");
            assert_eq!(schema.block_type(), *block_type);
            assert!(!schema.fields.is_empty());
        }
        assert_eq!(all_schemas().len(), BlockType::KNOWN.len());
    }

    #[test]
    fn test_defaults_are_fully_populated() {
        let content = defaults_for(&BlockType::Button);
        for name in ["text", "url", "backgroundColor", "textColor", "align", "borderRadius"] {
            assert!(content.contains_key(name), "missing {}", name);
        }
        assert_eq!(content["text"], json!("Learn More"));
    }

    #[test]
    fn test_custom_type_has_no_defaults() {
        let content = defaults_for(&BlockType::Custom("poll".to_string()));
        assert!(content.is_empty());
        assert!(!is_known_type("poll"));
        assert!(is_known_type("event-card"));
    }

    #[test]
    fn test_struct_list_defaults_follow_item_schema() {
        let schema = schema_for(&BlockType::EventCard).unwrap();
        let events = schema.field("events").unwrap();
        let item_fields = match events.kind {
            FieldKind::StructList(fields) => fields,
            _ => panic!("events should be a struct list"),
        };

        let default_events = events.default_value();
        for item in default_events.as_array().unwrap() {
            for field in item_fields {
                assert!(item.get(field.name).is_some());
            }
        }
    }

    #[test]
    fn test_resolve_alias() {
        assert_eq!(resolve_alias("heading"), Some(BlockType::Header));
        assert_eq!(resolve_alias("donation"), Some(BlockType::DonationProgress));
        assert_eq!(resolve_alias("spacer"), Some(BlockType::Spacer));
        assert_eq!(resolve_alias("hero"), None);
    }

    #[test]
    fn test_custom_tags_colliding_with_ingestion_are_not_canonical() {
        for tag in ["hero", "banner", "heading", "cta", "spacer"] {
            assert!(is_reserved_tag(tag), "{}", tag);
            assert!(!is_canonical_type(&BlockType::Custom(tag.to_string())));
        }
        assert!(is_canonical_type(&BlockType::Custom("poll".to_string())));
        assert!(is_canonical_type(&BlockType::Header));
    }
}
