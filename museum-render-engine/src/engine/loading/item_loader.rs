use bevy::prelude::*;
use bevy::tasks::futures_lite::future;
use bevy::tasks::{Task, block_on};

use crate::engine::assets::item::ItemFeed;
use crate::engine::core::launch_config::LaunchConfig;
use crate::engine::core::session::WalletSession;
use crate::engine::layout::{MuseumLayout, layout};
use crate::engine::loading::catalog::Catalog;
use crate::engine::loading::http::{FetchError, fetch_feed, spawn_request};
use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum CatalogStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// In-flight feed request and the wallet it was issued for.
#[derive(Resource, Default)]
pub struct CatalogRequest {
    task: Option<Task<Result<ItemFeed, FetchError>>>,
    wallet: Option<String>,
}

/// What the viewer currently shows and how it got there.
#[derive(Resource, Default, Debug)]
pub struct CatalogState {
    pub status: CatalogStatus,
    /// Wallet the displayed catalog was fetched with.
    pub wallet: Option<String>,
}

impl CatalogState {
    pub fn ownership_loaded(&self) -> bool {
        self.wallet.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            CatalogStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Ask for the feed to be fetched again with the current session.
#[derive(Event, Debug, Default)]
pub struct ReloadCatalog;

/// A feed that parsed but carries an `error` field is still a failure.
pub fn feed_outcome(result: Result<ItemFeed, FetchError>) -> Result<Catalog, String> {
    let feed = result.map_err(|e| e.to_string())?;
    if let Some(error) = feed.error.clone().filter(|e| !e.is_empty()) {
        return Err(error);
    }
    Ok(Catalog::from_feed(feed))
}

/// Whether a session change asks for different data than was last requested.
pub fn needs_refetch(requested: Option<&str>, session: Option<&str>) -> bool {
    requested != session
}

fn begin_request(
    config: &LaunchConfig,
    wallet: Option<&str>,
    request: &mut CatalogRequest,
    state: &mut CatalogState,
) {
    request.wallet = wallet.map(str::to_owned);
    match config.items_url(wallet) {
        Ok(url) => {
            info!("Fetching catalog from {url}");
            // Replacing an in-flight task drops it.
            request.task = Some(spawn_request(fetch_feed(url)));
            state.status = CatalogStatus::Loading;
        }
        Err(err) => {
            error!("Invalid catalog endpoint: {err}");
            request.task = None;
            state.status = CatalogStatus::Failed(format!("invalid endpoint: {err}"));
        }
    }
}

pub fn start_catalog_fetch(
    config: Res<LaunchConfig>,
    session: Res<WalletSession>,
    mut request: ResMut<CatalogRequest>,
    mut state: ResMut<CatalogState>,
) {
    begin_request(&config, session.wallet(), &mut request, &mut state);
}

/// Refetch when the wallet changes (including logout) or on demand.
pub fn request_catalog_refetch(
    config: Res<LaunchConfig>,
    session: Res<WalletSession>,
    mut reloads: EventReader<ReloadCatalog>,
    mut request: ResMut<CatalogRequest>,
    mut state: ResMut<CatalogState>,
) {
    let reload = reloads.read().count() > 0;
    let wallet_changed =
        session.is_changed() && needs_refetch(request.wallet.as_deref(), session.wallet());

    if reload || wallet_changed {
        if wallet_changed {
            info!("Wallet session changed, refetching catalog");
        }
        begin_request(&config, session.wallet(), &mut request, &mut state);
    }
}

/// Poll the in-flight request. Success replaces catalog and layout; failure
/// keeps whatever was shown before.
pub fn poll_catalog_request(
    mut request: ResMut<CatalogRequest>,
    mut state: ResMut<CatalogState>,
    mut catalog: ResMut<Catalog>,
    mut museum_layout: ResMut<MuseumLayout>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(task) = request.task.as_mut() else {
        return;
    };
    let Some(result) = block_on(future::poll_once(task)) else {
        return;
    };
    request.task = None;
    loading_progress.catalog_resolved = true;

    match feed_outcome(result) {
        Ok(fetched) => {
            *museum_layout = layout(&fetched.sections);
            println!(
                "✓ Catalog loaded: {} items in {} sections",
                fetched.item_count(),
                fetched.sections.len()
            );
            rpc_interface.send_notification(
                "museum_loaded",
                serde_json::json!({
                    "items": fetched.item_count(),
                    "sections": fetched.sections.len(),
                    "owned": fetched.owned_count(),
                    "corridor_length": museum_layout.corridor_length,
                }),
            );
            *catalog = fetched;
            state.wallet = request.wallet.clone();
            state.status = CatalogStatus::Ready;
        }
        Err(message) => {
            error!("Catalog fetch failed: {message}");
            rpc_interface.send_notification(
                "museum_error",
                serde_json::json!({ "message": message }),
            );
            state.status = CatalogStatus::Failed(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::item::RawEdition;

    fn edition(id: &str, season: &str) -> RawEdition {
        RawEdition {
            id: Some(id.into()),
            nba_season: Some(season.into()),
            ..Default::default()
        }
    }

    #[test]
    fn successful_feed_becomes_catalog() {
        let feed = ItemFeed {
            editions: vec![edition("a", "2022-23"), edition("b", "2023-24")],
            section_label: None,
            error: None,
        };
        let catalog = feed_outcome(Ok(feed)).unwrap();
        assert_eq!(catalog.item_count(), 2);
        assert_eq!(catalog.sections.len(), 2);
    }

    #[test]
    fn error_field_is_a_failure() {
        let feed = ItemFeed {
            editions: vec![edition("a", "2022-23")],
            section_label: None,
            error: Some("Section not found".into()),
        };
        assert_eq!(feed_outcome(Ok(feed)), Err("Section not found".to_owned()));
    }

    #[test]
    fn transport_error_is_reported() {
        let err = FetchError::Status {
            status: 502,
            message: "Bad Gateway".into(),
        };
        let outcome = feed_outcome(Err(err));
        assert_eq!(outcome, Err("server returned 502: Bad Gateway".to_owned()));
    }

    #[test]
    fn refetch_only_when_wallet_differs() {
        assert!(!needs_refetch(None, None));
        assert!(needs_refetch(None, Some("0x1")));
        assert!(!needs_refetch(Some("0x1"), Some("0x1")));
        assert!(needs_refetch(Some("0x1"), Some("0x2")));
        assert!(needs_refetch(Some("0x1"), None));
    }

    #[test]
    fn ownership_follows_fetched_wallet() {
        let mut state = CatalogState::default();
        assert!(!state.ownership_loaded());
        state.wallet = Some("0x1".into());
        assert!(state.ownership_loaded());
        state.status = CatalogStatus::Failed("offline".into());
        assert_eq!(state.error(), Some("offline"));
    }
}
