use bevy::prelude::*;
use url::Url;

use crate::constants::path::{
    API_BASE_ENV, DEFAULT_NATIVE_API_BASE, MUSEUM_ENDPOINT, SECTION_ID_ENV, SECTION_ID_PARAM,
    SHOWCASE_ENDPOINT, WALLET_PARAM,
};

/// Where the item feed lives and which data set to show.
///
/// In the browser this comes from the hosting page's URL (`?sectionId=` deep
/// link); natively from the environment.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LaunchConfig {
    pub api_base: String,
    pub section_id: Option<String>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_NATIVE_API_BASE.to_owned(),
            section_id: None,
        }
    }
}

impl LaunchConfig {
    /// Build from a page origin and its query string (with or without `?`).
    pub fn from_location(origin: &str, query: &str) -> Self {
        let section_id = url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .find(|(name, _)| name == SECTION_ID_PARAM)
            .map(|(_, value)| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        Self {
            api_base: origin.trim_end_matches('/').to_owned(),
            section_id,
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_environment() -> Self {
        let Some(location) = web_sys::window().map(|w| w.location()) else {
            warn!("No window location available, using default launch config");
            return Self::default();
        };
        let origin = location.origin().unwrap_or_default();
        let query = location.search().unwrap_or_default();
        Self::from_location(&origin, &query)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_environment() -> Self {
        let api_base = std::env::var(API_BASE_ENV)
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_NATIVE_API_BASE.to_owned());
        let section_id = std::env::var(SECTION_ID_ENV)
            .ok()
            .filter(|value| !value.is_empty());

        Self {
            api_base: api_base.trim_end_matches('/').to_owned(),
            section_id,
        }
    }

    /// Item endpoint for this launch: the default museum, or the showcase
    /// selected by `section_id`, optionally scoped to a wallet for ownership.
    pub fn items_url(&self, wallet: Option<&str>) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!("{}{}", self.api_base, MUSEUM_ENDPOINT))?;

        if let Some(section_id) = &self.section_id {
            url = Url::parse(&format!("{}{}", self.api_base, SHOWCASE_ENDPOINT))?;
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.push(section_id);
            }
        }

        if let Some(wallet) = wallet.filter(|w| !w.is_empty()) {
            url.query_pairs_mut().append_pair(WALLET_PARAM, wallet);
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_museum_endpoint_without_section() {
        let config = LaunchConfig::from_location("https://example.org/", "");
        assert_eq!(config.section_id, None);
        assert_eq!(
            config.items_url(None).unwrap().as_str(),
            "https://example.org/api/museum"
        );
    }

    #[test]
    fn section_id_selects_showcase_endpoint() {
        let config = LaunchConfig::from_location("https://example.org", "?tab=3&sectionId=binder-42");
        assert_eq!(config.section_id.as_deref(), Some("binder-42"));
        assert_eq!(
            config.items_url(None).unwrap().as_str(),
            "https://example.org/api/showcase/binder-42"
        );
    }

    #[test]
    fn wallet_is_appended_as_query_parameter() {
        let config = LaunchConfig::from_location("https://example.org", "sectionId=b%201");
        let url = config.items_url(Some("0xabc123")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.org/api/showcase/b%201?wallet=0xabc123"
        );
    }

    #[test]
    fn blank_section_and_wallet_are_ignored() {
        let config = LaunchConfig::from_location("http://localhost:5000", "?sectionId=");
        assert_eq!(config.section_id, None);
        assert_eq!(
            config.items_url(Some("")).unwrap().as_str(),
            "http://localhost:5000/api/museum"
        );
    }

    #[test]
    fn relative_base_is_rejected() {
        let config = LaunchConfig {
            api_base: String::new(),
            section_id: None,
        };
        assert!(config.items_url(None).is_err());
    }
}
