//! Network and asset loading for the museum.
//!
//! Fetches the item feed, turns it into an ordered catalog, decodes media
//! for the proximity loader and tracks startup progress for the host page.

/// Deduplication, chronological sort and section grouping of feed records.
pub mod catalog;

/// reqwest helpers and the IO pool bridge used by every network request.
pub mod http;

/// Catalog request lifecycle: initial fetch, wallet refetch and polling.
pub mod item_loader;

/// Exhibit image download and decode.
pub mod media_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;

/// Optional `museum_settings.json` overrides.
pub mod settings_loader;
