/// Settings file, relative to the asset root.
pub const SETTINGS_ASSET_PATH: &str = "museum_settings.json";

/// Default catalog endpoint.
pub const MUSEUM_ENDPOINT: &str = "/api/museum";

/// Showcase endpoint, followed by the section id path segment.
pub const SHOWCASE_ENDPOINT: &str = "/api/showcase";

pub const SECTION_ID_PARAM: &str = "sectionId";
pub const WALLET_PARAM: &str = "wallet";

/// API base used by native builds when the environment does not set one.
pub const DEFAULT_NATIVE_API_BASE: &str = "http://localhost:5000";

pub const API_BASE_ENV: &str = "MUSEUM_API_BASE";
pub const SECTION_ID_ENV: &str = "MUSEUM_SECTION_ID";
