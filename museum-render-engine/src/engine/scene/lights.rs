use bevy::prelude::*;
use constants::layout::{CORRIDOR_HEIGHT, ENTRANCE_WALL_Z};
use constants::render_settings::{AMBIENT_BRIGHTNESS, AMBIENT_COLOUR};

use crate::constants::render_settings::{CAMERA_LIGHT_DROP, CAMERA_LIGHTS};
use crate::engine::camera::navigation::CameraState;

/// Point light that keeps a fixed offset along the corridor from the camera.
#[derive(Component, Debug)]
pub struct CameraLight {
    pub z_offset: f32,
}

const CAMERA_LIGHT_COLOURS: [Color; 2] = [
    Color::srgb(0.933, 0.8, 0.533),
    Color::srgb(0.867, 0.733, 0.667),
];

pub fn setup_lighting(mut commands: Commands, camera: Res<CameraState>) {
    commands.insert_resource(AmbientLight {
        color: AMBIENT_COLOUR,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            color: Color::srgb(0.8, 0.733, 0.667),
            illuminance: 1_500.0,
            ..default()
        },
        Transform::from_xyz(2.0, CORRIDOR_HEIGHT, ENTRANCE_WALL_Z).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    for ((z_offset, intensity, range), color) in CAMERA_LIGHTS.into_iter().zip(CAMERA_LIGHT_COLOURS)
    {
        commands.spawn((
            CameraLight { z_offset },
            PointLight {
                color,
                intensity,
                range,
                ..default()
            },
            Transform::from_translation(camera_light_position(camera.position, z_offset)),
        ));
    }

    println!("✓ Lighting ready");
}

/// Lights hang just under the ceiling, level with the camera across the corridor.
pub fn camera_light_position(camera: Vec3, z_offset: f32) -> Vec3 {
    Vec3::new(camera.x, CORRIDOR_HEIGHT - CAMERA_LIGHT_DROP, camera.z + z_offset)
}

pub fn follow_camera_lights(
    camera: Res<CameraState>,
    mut lights: Query<(&CameraLight, &mut Transform)>,
) {
    if !camera.is_changed() {
        return;
    }
    for (light, mut transform) in &mut lights {
        transform.translation = camera_light_position(camera.position, light.z_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lights_bracket_the_camera_under_the_ceiling() {
        let camera = Vec3::new(1.5, 1.7, -30.0);
        let front = camera_light_position(camera, CAMERA_LIGHTS[0].0);
        let back = camera_light_position(camera, CAMERA_LIGHTS[1].0);
        assert_eq!(front, Vec3::new(1.5, CORRIDOR_HEIGHT - CAMERA_LIGHT_DROP, -34.0));
        assert_eq!(back.z, -26.0);
        assert_eq!(front.y, back.y);
    }
}
