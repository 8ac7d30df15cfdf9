use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::render_settings::BACKGROUND_COLOUR;

// Crate engine modules
use crate::engine::assets::settings::MuseumSettings;
use crate::engine::camera::controller::{
    configure_navigation, handle_pointer_capture, navigate_camera, release_pointer, reset_camera,
    spawn_museum_camera,
};
use crate::engine::camera::navigation::{CameraState, NavigationController};
use crate::engine::camera::orientation::LookSource;
use crate::engine::camera::touch::{TouchControls, spawn_joystick_overlay, update_joystick_overlay};
use crate::engine::core::launch_config::LaunchConfig;
use crate::engine::core::session::WalletSession;
use crate::engine::core::window_config::create_window_config;
use crate::engine::layout::MuseumLayout;
use crate::engine::loading::catalog::Catalog;
use crate::engine::loading::item_loader::{
    CatalogRequest, CatalogState, ReloadCatalog, poll_catalog_request,
    request_catalog_refetch, start_catalog_fetch,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::settings_loader::{
    SettingsLoader, reload_settings_on_change, resolve_settings, start_settings_load,
};
use crate::engine::proximity::ProximityPlugin;
use crate::engine::proximity::loader::ProximityLoader;
use crate::engine::proximity::systems::{
    evaluate_proximity, poll_image_loads, release_all_media, upload_video_frames,
};
use crate::engine::scene::corridor::{CorridorState, build_corridor, paint_corridor_textures};
use crate::engine::scene::exhibits::{
    MountedExhibits, apply_mount_events, despawn_mounted_exhibits, setup_exhibit_assets,
    update_plaques, update_screen_textures,
};
use crate::engine::scene::lights::{follow_camera_lights, setup_lighting};
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::systems::hud::{
    EntranceScreen, WalkingHud, despawn_all, enter_on_input, spawn_entrance_screen,
    spawn_walking_hud, update_entrance_status, update_plaque_panel, update_pointer_hud,
    update_section_label,
};
use crate::rpc::web_rpc::WebRpcPlugin;

// Transitions
use crate::engine::core::app_state::{
    AppState, MuseumCommand, apply_museum_commands, transition_to_entrance,
    update_loading_frontend,
};

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::{fps_text_update_system, spawn_fps_overlay};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers MuseumSettings as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<MuseumSettings>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(ProximityPlugin)
        .insert_resource(ClearColor(BACKGROUND_COLOUR));

    // Initialise resources early
    app.insert_resource(LaunchConfig::from_environment())
        .init_resource::<LoadingProgress>()
        .init_resource::<SettingsLoader>()
        .init_resource::<MuseumSettings>()
        .init_resource::<WalletSession>()
        .init_resource::<Catalog>()
        .init_resource::<CatalogState>()
        .init_resource::<CatalogRequest>()
        .init_resource::<MuseumLayout>()
        .init_resource::<CameraState>()
        .init_resource::<NavigationController>()
        .init_resource::<LookSource>()
        .init_resource::<TouchControls>()
        .init_resource::<CorridorState>()
        .init_resource::<MountedExhibits>()
        .add_event::<ReloadCatalog>()
        .add_event::<MuseumCommand>();

    app.add_systems(
        Startup,
        (
            start_settings_load,
            start_catalog_fetch,
            paint_corridor_textures,
            setup_exhibit_assets,
            spawn_museum_camera,
            setup_lighting,
            spawn_joystick_overlay,
        )
            .chain(),
    );

    // Catalog, settings and corridor follow their sources in every state.
    app.add_systems(
        Update,
        (
            resolve_settings,
            reload_settings_on_change,
            request_catalog_refetch,
            poll_catalog_request,
            configure_navigation,
            build_corridor,
            apply_museum_commands,
            update_loading_frontend,
            fps_notification_system,
        )
            .chain(),
    );

    // State-based system scheduling
    app.add_systems(
        Update,
        transition_to_entrance.run_if(in_state(AppState::Loading)),
    )
    .add_systems(
        OnEnter(AppState::Entrance),
        (reset_camera, release_pointer, spawn_entrance_screen),
    )
    .add_systems(OnExit(AppState::Entrance), despawn_all::<EntranceScreen>)
    .add_systems(
        Update,
        (update_entrance_status, enter_on_input)
            .chain()
            .run_if(in_state(AppState::Entrance)),
    )
    .add_systems(
        OnEnter(AppState::Walking),
        (spawn_walking_hud, request_immediate_evaluation),
    )
    .add_systems(
        OnExit(AppState::Walking),
        (
            despawn_all::<WalkingHud>,
            release_pointer,
            (release_all_media, despawn_mounted_exhibits).chain(),
        ),
    );

    let walking_systems = (
        // Input and camera
        handle_pointer_capture,
        navigate_camera,
        follow_camera_lights,
        // Proximity and exhibits
        evaluate_proximity,
        apply_mount_events,
        poll_image_loads,
        upload_video_frames,
        update_screen_textures,
        update_plaques,
        // Overlays
        update_pointer_hud,
        update_section_label,
        update_plaque_panel,
        update_joystick_overlay,
    );

    app.add_systems(
        Update,
        walking_systems.chain().run_if(in_state(AppState::Walking)),
    );

    // FPS overlay only for native builds, the host page shows its own.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Startup, spawn_fps_overlay)
            .add_systems(Update, fps_text_update_system);
    }

    app
}

/// Evaluate on the first walking frame instead of waiting for the cadence.
fn request_immediate_evaluation(mut loader: ResMut<ProximityLoader>) {
    loader.request_evaluation();
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
