//! Catalog data types and runtime settings.
//!
//! Mirrors the JSON returned by the item endpoint and the optional settings
//! file shipped next to the binary.

/// Item feed records, rarity tiers and the deduplicated `Item` model.
pub mod item;

/// Tunable proximity and navigation settings loaded from JSON.
pub mod settings;
