use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use constants::render_settings::{BACKGROUND_COLOUR, FOG_END, FOG_START};

use super::MuseumCamera;
use super::navigation::{CameraState, CorridorBounds, MoveIntent, NavigationController, NavigationMode};
use super::orientation::{LookInput, LookSource};
use super::touch::{TouchControls, read_touches, screen_width};
use crate::constants::render_settings::{CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR};
use crate::engine::assets::settings::MuseumSettings;
use crate::engine::core::app_state::AppState;
use crate::engine::layout::MuseumLayout;

pub fn spawn_museum_camera(mut commands: Commands, state: Res<CameraState>) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        DistanceFog {
            color: BACKGROUND_COLOUR,
            falloff: FogFalloff::Linear {
                start: FOG_START,
                end: FOG_END,
            },
            ..default()
        },
        state.to_transform(),
        MuseumCamera,
    ));
}

/// Back to the entrance: stand at the door, facing in.
pub fn reset_camera(mut state: ResMut<CameraState>, mut controller: ResMut<NavigationController>) {
    *state = CameraState::default();
    controller.mode = NavigationMode::Idle;
}

/// Keep walk speed and corridor bounds in step with settings and layout.
pub fn configure_navigation(
    mut controller: ResMut<NavigationController>,
    settings: Res<MuseumSettings>,
    layout: Res<MuseumLayout>,
) {
    if settings.is_changed() {
        controller.speed = settings.walk_speed;
    }
    if layout.is_changed() {
        controller.bounds = CorridorBounds::for_length(layout.corridor_length);
    }
}

#[cfg(target_arch = "wasm32")]
fn pointer_is_locked(_window: &Window) -> bool {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.pointer_lock_element())
        .is_some()
}

#[cfg(not(target_arch = "wasm32"))]
fn pointer_is_locked(window: &Window) -> bool {
    window.cursor_options.grab_mode == CursorGrabMode::Locked
}

fn set_pointer_lock(window: &mut Window, locked: bool) {
    if locked {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    } else {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

/// Desktop pointer capture. A click locks the pointer, Escape releases it
/// and Backspace while released leaves the museum. The browser releases the
/// lock on Escape by itself, so the window state is resynchronised here.
pub fn handle_pointer_capture(
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    look: Res<LookSource>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if look.is_touch() {
        return;
    }
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    let locked = pointer_is_locked(&window);
    if !locked && window.cursor_options.grab_mode != CursorGrabMode::None {
        set_pointer_lock(&mut window, false);
    }

    if locked && keys.just_pressed(KeyCode::Escape) {
        set_pointer_lock(&mut window, false);
    } else if !locked && mouse.just_pressed(MouseButton::Left) {
        set_pointer_lock(&mut window, true);
    } else if !locked && keys.just_pressed(KeyCode::Backspace) {
        info!("Leaving the museum");
        next_state.set(AppState::Entrance);
    }
}

/// Release the pointer whenever the walkthrough is left.
pub fn release_pointer(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = windows.single_mut() {
        set_pointer_lock(&mut window, false);
    }
}

/// Gather this frame's input, integrate it and move the camera.
pub fn navigate_camera(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut look: ResMut<LookSource>,
    mut touch_controls: ResMut<TouchControls>,
    mut controller: ResMut<NavigationController>,
    mut state: ResMut<CameraState>,
    mut camera: Query<&mut Transform, With<MuseumCamera>>,
) {
    let pointer_locked = windows
        .single()
        .map(pointer_is_locked)
        .unwrap_or(false);

    let mut intent = MoveIntent::from_keys(&keys);
    let mut touch_drag = Vec2::ZERO;
    if look.is_touch() {
        let width = screen_width(&windows);
        touch_drag = read_touches(&touches, &mut touch_controls, width);
        intent = intent.combine(touch_controls.move_intent());
    }

    look.0.feed(&LookInput {
        mouse_delta: mouse_motion.delta,
        pointer_locked,
        touch_drag,
    });
    controller.mode = if look.0.is_engaged() {
        NavigationMode::Active
    } else {
        NavigationMode::Idle
    };

    let look_delta = look.0.take_look_delta();
    controller.step(&mut state, intent, look_delta, time.delta_secs());

    if let Ok(mut transform) = camera.single_mut() {
        *transform = state.to_transform();
    }
}
