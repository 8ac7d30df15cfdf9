use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::constants::path::SETTINGS_ASSET_PATH;
use crate::engine::assets::settings::MuseumSettings;
use crate::engine::loading::progress::LoadingProgress;

#[derive(Resource, Default)]
pub struct SettingsLoader {
    handle: Option<Handle<MuseumSettings>>,
}

pub fn start_settings_load(mut loader: ResMut<SettingsLoader>, asset_server: Res<AssetServer>) {
    loader.handle = Some(asset_server.load(SETTINGS_ASSET_PATH));
}

/// Resolve the settings file once at startup. A missing or malformed file
/// leaves the compiled defaults in place.
pub fn resolve_settings(
    mut loading_progress: ResMut<LoadingProgress>,
    loader: Res<SettingsLoader>,
    asset_server: Res<AssetServer>,
    settings_assets: Res<Assets<MuseumSettings>>,
    mut settings: ResMut<MuseumSettings>,
) {
    if loading_progress.settings_resolved {
        return;
    }
    let Some(handle) = &loader.handle else {
        return;
    };

    if let Some(loaded) = settings_assets.get(handle) {
        *settings = loaded.clone().sanitised();
        loading_progress.settings_resolved = true;
        println!("✓ Settings loaded from {SETTINGS_ASSET_PATH}");
        return;
    }

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        warn!("Settings unavailable ({err}), using defaults");
        loading_progress.settings_resolved = true;
    }
}

/// Pick up edits to the settings file while running.
pub fn reload_settings_on_change(
    mut events: EventReader<AssetEvent<MuseumSettings>>,
    loader: Res<SettingsLoader>,
    settings_assets: Res<Assets<MuseumSettings>>,
    mut settings: ResMut<MuseumSettings>,
) {
    let Some(handle) = &loader.handle else {
        return;
    };
    for event in events.read() {
        if !event.is_modified(handle) {
            continue;
        }
        if let Some(loaded) = settings_assets.get(handle) {
            let loaded = loaded.clone().sanitised();
            if *settings != loaded {
                info!("Settings file changed, applying");
                *settings = loaded;
            }
        }
    }
}
