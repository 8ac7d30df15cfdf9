use bevy::color::Color;

/// Rarity tier codes as they appear in the item feed.
pub struct TierInfo {
    pub code: &'static str,
    pub rank: u8,
    pub colour: Color,
}

/// Tier lookup table, highest rank first.
pub const TIER_MAP: &[TierInfo] = &[
    TierInfo {
        code: "ULTIMATE",
        rank: 5,
        colour: Color::srgb(0.902, 0.0, 1.0),
    },
    TierInfo {
        code: "LEGENDARY",
        rank: 4,
        colour: Color::srgb(1.0, 0.843, 0.0),
    },
    TierInfo {
        code: "RARE",
        rank: 3,
        colour: Color::srgb(0.0, 0.749, 1.0),
    },
    TierInfo {
        code: "FANDOM",
        rank: 2,
        colour: Color::srgb(0.251, 0.878, 0.816),
    },
    TierInfo {
        code: "COMMON",
        rank: 1,
        colour: Color::srgb(0.678, 0.710, 0.741),
    },
];

/// Colour used for tiers missing from the table.
pub const UNKNOWN_TIER_COLOUR: Color = Color::srgb(0.678, 0.710, 0.741);

pub fn get_tier_info(code: &str) -> Option<&'static TierInfo> {
    TIER_MAP.iter().find(|t| t.code == code)
}
