use bevy::color::Color;
use constants::tier::{UNKNOWN_TIER_COLOUR, get_tier_info};
use serde::{Deserialize, Serialize};

/// Rarity tier of a collectible. `Unknown` ranks below every named tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "&'static str")]
pub enum Tier {
    Ultimate,
    Legendary,
    Rare,
    Fandom,
    Common,
    #[default]
    Unknown,
}

impl Tier {
    /// Parse a tier code. Accepts both `LEGENDARY` and `MOMENT_TIER_LEGENDARY`.
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_uppercase();
        match code.strip_prefix("MOMENT_TIER_").unwrap_or(&code) {
            "ULTIMATE" => Self::Ultimate,
            "LEGENDARY" => Self::Legendary,
            "RARE" => Self::Rare,
            "FANDOM" => Self::Fandom,
            "COMMON" => Self::Common,
            _ => Self::Unknown,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Ultimate => "ULTIMATE",
            Self::Legendary => "LEGENDARY",
            Self::Rare => "RARE",
            Self::Fandom => "FANDOM",
            Self::Common => "COMMON",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Merge precedence; higher wins when duplicates collapse.
    pub fn rank(&self) -> u8 {
        get_tier_info(self.code()).map_or(0, |info| info.rank)
    }

    /// Bezel and badge colour.
    pub fn colour(&self) -> Color {
        get_tier_info(self.code()).map_or(UNKNOWN_TIER_COLOUR, |info| info.colour)
    }
}

impl From<Option<String>> for Tier {
    fn from(code: Option<String>) -> Self {
        code.map_or(Self::Unknown, |code| Self::from_code(&code))
    }
}

impl From<Tier> for &'static str {
    fn from(tier: Tier) -> Self {
        tier.code()
    }
}

/// Box score attached to a moment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStats {
    pub points: Option<u32>,
    pub rebounds: Option<u32>,
    pub assists: Option<u32>,
}

impl GameStats {
    pub fn is_empty(&self) -> bool {
        self.points.is_none() && self.rebounds.is_none() && self.assists.is_none()
    }
}

/// One edition record exactly as served by the item endpoint.
/// Several records may share a `playId` (parallel editions of one play).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEdition {
    pub id: Option<String>,
    pub play_id: Option<String>,
    pub tier: Tier,
    pub set_name: Option<String>,
    pub nba_season: Option<String>,
    pub date_of_moment: Option<String>,
    pub user_owned_count: Option<u32>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub play_category: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub team_at_moment: Option<String>,
    pub game_stats: Option<GameStats>,
    pub circulation_count: Option<u32>,
    pub retired: bool,
}

impl RawEdition {
    /// Deduplication key: the play id, falling back to the edition id.
    pub fn key(&self) -> Option<&str> {
        self.play_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| self.id.as_deref().filter(|id| !id.is_empty()))
    }

    pub fn owned(&self) -> u32 {
        self.user_owned_count.unwrap_or(0)
    }
}

/// Response body of the item endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemFeed {
    pub editions: Vec<RawEdition>,
    pub section_label: Option<String>,
    pub error: Option<String>,
}

/// Tier and ownership of one duplicate, shown as a badge on the plaque.
#[derive(Debug, Clone, PartialEq)]
pub struct Parallel {
    pub tier: Tier,
    pub set_name: Option<String>,
    pub owned: bool,
}

/// Descriptive fields carried from the representative record to the plaque.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDetails {
    pub set_name: Option<String>,
    pub play_category: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub date_of_moment: Option<String>,
    pub team_at_moment: Option<String>,
    pub game_stats: GameStats,
    pub circulation_count: Option<u32>,
    pub retired: bool,
}

/// A displayable collectible after deduplication.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub key: String,
    pub tier: Tier,
    pub section_key: String,
    pub owned_count: u32,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub date_sort_value: String,
    pub parallels: Option<Vec<Parallel>>,
    pub details: ItemDetails,
}

impl Item {
    pub fn is_owned(&self) -> bool {
        self.owned_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_codes_parse_with_and_without_prefix() {
        assert_eq!(Tier::from_code("LEGENDARY"), Tier::Legendary);
        assert_eq!(Tier::from_code("MOMENT_TIER_ULTIMATE"), Tier::Ultimate);
        assert_eq!(Tier::from_code("rare"), Tier::Rare);
        assert_eq!(Tier::from_code("MOMENT_TIER_ANTHOLOGY"), Tier::Unknown);
    }

    #[test]
    fn tier_rank_orders_named_tiers_above_unknown() {
        assert!(Tier::Ultimate.rank() > Tier::Legendary.rank());
        assert!(Tier::Legendary.rank() > Tier::Rare.rank());
        assert!(Tier::Rare.rank() > Tier::Fandom.rank());
        assert!(Tier::Fandom.rank() > Tier::Common.rank());
        assert_eq!(Tier::Unknown.rank(), 0);
    }

    #[test]
    fn feed_parses_camel_case_records() {
        let json = r#"{
            "editions": [
                {"id": "e1", "playId": "p1", "tier": "MOMENT_TIER_RARE", "nbaSeason": "2023-24",
                 "userOwnedCount": 2, "gameStats": {"points": 31}},
                {"id": "e2", "tier": null, "userOwnedCount": null}
            ],
            "sectionLabel": "Showcase"
        }"#;
        let feed: ItemFeed = serde_json::from_str(json).unwrap();
        assert_eq!(feed.editions.len(), 2);
        assert_eq!(feed.section_label.as_deref(), Some("Showcase"));

        let first = &feed.editions[0];
        assert_eq!(first.key(), Some("p1"));
        assert_eq!(first.tier, Tier::Rare);
        assert_eq!(first.owned(), 2);
        assert_eq!(first.game_stats.as_ref().and_then(|s| s.points), Some(31));

        let second = &feed.editions[1];
        assert_eq!(second.key(), Some("e2"));
        assert_eq!(second.tier, Tier::Unknown);
        assert_eq!(second.owned(), 0);
    }

    #[test]
    fn empty_play_id_falls_back_to_edition_id() {
        let edition = RawEdition {
            id: Some("edition".into()),
            play_id: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(edition.key(), Some("edition"));
    }
}
