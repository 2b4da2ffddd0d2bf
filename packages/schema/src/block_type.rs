use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag identifying a block's schema and rendering behavior.
///
/// Known tags map to a fixed content schema in the registry. Anything else is
/// kept verbatim as `Custom` so foreign payloads survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    Header,
    Text,
    Image,
    Button,
    Divider,
    Spacer,
    DonationProgress,
    EventCard,
    Countdown,
    StatisticsPanel,
    Volunteer,
    Announcement,
    SocialLinks,
    Footer,
    Custom(String),
}

impl BlockType {
    /// Every known block type, in palette order
    pub const KNOWN: [BlockType; 14] = [
        BlockType::Header,
        BlockType::Text,
        BlockType::Image,
        BlockType::Button,
        BlockType::Divider,
        BlockType::Spacer,
        BlockType::DonationProgress,
        BlockType::EventCard,
        BlockType::Countdown,
        BlockType::StatisticsPanel,
        BlockType::Volunteer,
        BlockType::Announcement,
        BlockType::SocialLinks,
        BlockType::Footer,
    ];

    /// Parse a canonical wire tag. Unrecognized tags become `Custom`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "header" => BlockType::Header,
            "text" => BlockType::Text,
            "image" => BlockType::Image,
            "button" => BlockType::Button,
            "divider" => BlockType::Divider,
            "spacer" => BlockType::Spacer,
            "donation-progress" => BlockType::DonationProgress,
            "event-card" => BlockType::EventCard,
            "countdown" => BlockType::Countdown,
            "statistics-panel" => BlockType::StatisticsPanel,
            "volunteer" => BlockType::Volunteer,
            "announcement" => BlockType::Announcement,
            "social-links" => BlockType::SocialLinks,
            "footer" => BlockType::Footer,
            other => BlockType::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Header => "header",
            BlockType::Text => "text",
            BlockType::Image => "image",
            BlockType::Button => "button",
            BlockType::Divider => "divider",
            BlockType::Spacer => "spacer",
            BlockType::DonationProgress => "donation-progress",
            BlockType::EventCard => "event-card",
            BlockType::Countdown => "countdown",
            BlockType::StatisticsPanel => "statistics-panel",
            BlockType::Volunteer => "volunteer",
            BlockType::Announcement => "announcement",
            BlockType::SocialLinks => "social-links",
            BlockType::Footer => "footer",
            BlockType::Custom(tag) => tag,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, BlockType::Custom(_))
    }
}

impl From<String> for BlockType {
    fn from(tag: String) -> Self {
        BlockType::from_tag(&tag)
    }
}

impl From<&str> for BlockType {
    fn from(tag: &str) -> Self {
        BlockType::from_tag(tag)
    }
}

impl From<BlockType> for String {
    fn from(block_type: BlockType) -> Self {
        block_type.as_str().to_string()
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags_round_trip() {
        for block_type in BlockType::KNOWN.iter() {
            assert_eq!(&BlockType::from_tag(block_type.as_str()), block_type);
        }
    }

    #[test]
    fn test_unknown_tag_is_custom() {
        let block_type = BlockType::from_tag("poll");
        assert_eq!(block_type, BlockType::Custom("poll".to_string()));
        assert_eq!(block_type.as_str(), "poll");
        assert!(block_type.is_custom());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&BlockType::EventCard).unwrap();
        assert_eq!(json, "\"event-card\"");

        let parsed: BlockType = serde_json::from_str("\"countdown\"").unwrap();
        assert_eq!(parsed, BlockType::Countdown);
    }
}
