//! Static corridor geometry sized to the current layout.
use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;
use constants::layout::{
    CARPET_LENGTH, CARPET_SPACING, CARPET_WIDTH, CORRIDOR_HEIGHT, CORRIDOR_WIDTH,
    ENTRANCE_WALL_Z, FLOOR_TILE_WORLD_SIZE, HALF_WIDTH, LIGHT_SPACING, LIGHT_START_OFFSET,
    WALL_TILE_WORLD_SIZE,
};
use constants::render_settings::{
    ACCENT_GOLD, BASEBOARD_COLOUR, CARPET_COLOUR, CEILING_TEXTURE_SIZE, END_CAP_COLOUR,
    FLOOR_TEXTURE_SIZE, LIGHT_FIXTURE_COLOUR, MOLDING_COLOUR, ORNAMENT_FRAME_COLOUR,
    ORNAMENT_INNER_COLOUR, SCONCE_COLOUR, WALL_TEXTURE_SIZE,
};

use super::ornaments::{Ornament, OrnamentKind, ornaments};
use super::textures::{ceiling_grid, floor_planks, tile_repeat, wall_panels};
use crate::engine::layout::MuseumLayout;
use crate::engine::loading::progress::LoadingProgress;

#[derive(Component)]
pub struct CorridorPart;

/// Length the current corridor geometry was built for.
#[derive(Resource, Default)]
pub struct CorridorState {
    pub built_length: Option<f32>,
}

/// Procedural surface tiles, painted once.
#[derive(Resource)]
pub struct CorridorTextures {
    pub floor: Handle<Image>,
    pub wall: Handle<Image>,
    pub ceiling: Handle<Image>,
}

/// Positions of the repeated corridor furniture for one length.
#[derive(Debug, Clone, PartialEq)]
pub struct CorridorPlan {
    pub length: f32,
    pub light_zs: Vec<f32>,
    pub carpet_zs: Vec<f32>,
    pub ornaments: Vec<Ornament>,
}

pub fn corridor_plan(length: f32) -> CorridorPlan {
    let light_count = (length / LIGHT_SPACING).ceil().max(0.0) as usize;
    let light_zs = (0..light_count)
        .map(|i| -(i as f32 * LIGHT_SPACING) - LIGHT_START_OFFSET)
        .collect();

    let carpet_zs = (0..)
        .map(|i| -(i as f32 + 0.5) * CARPET_SPACING)
        .take_while(|z| z - CARPET_LENGTH * 0.5 > -length)
        .collect();

    CorridorPlan {
        length,
        light_zs,
        carpet_zs,
        ornaments: ornaments(length),
    }
}

pub fn paint_corridor_textures(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    mut loading_progress: ResMut<LoadingProgress>,
) {
    commands.insert_resource(CorridorTextures {
        floor: images.add(floor_planks(FLOOR_TEXTURE_SIZE).into_image()),
        wall: images.add(wall_panels(WALL_TEXTURE_SIZE).into_image()),
        ceiling: images.add(ceiling_grid(CEILING_TEXTURE_SIZE).into_image()),
    });
    loading_progress.corridor_textures_ready = true;
    println!("✓ Corridor textures painted");
}

/// Rebuild the corridor when the layout asks for a different length.
pub fn build_corridor(
    mut commands: Commands,
    layout: Res<MuseumLayout>,
    textures: Res<CorridorTextures>,
    mut state: ResMut<CorridorState>,
    parts: Query<Entity, With<CorridorPart>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let length = layout.corridor_length;
    if state.built_length == Some(length) {
        return;
    }

    for entity in &parts {
        commands.entity(entity).despawn();
    }

    let plan = corridor_plan(length);
    spawn_shell(&mut commands, &plan, &textures, &mut meshes, &mut materials);
    spawn_fixtures(&mut commands, &plan, &mut meshes, &mut materials);
    spawn_ornaments(&mut commands, &plan.ornaments, &mut meshes, &mut materials);

    state.built_length = Some(length);
    println!("✓ Corridor built: {:.0}m", length);
}

fn flat(materials: &mut ResMut<Assets<StandardMaterial>>, colour: Color) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: colour,
        unlit: true,
        ..default()
    })
}

fn spawn_part(
    commands: &mut Commands,
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
    transform: Transform,
) {
    commands.spawn((Mesh3d(mesh), MeshMaterial3d(material), transform, CorridorPart));
}

/// Floor, ceiling, walls, trims and end caps.
fn spawn_shell(
    commands: &mut Commands,
    plan: &CorridorPlan,
    textures: &CorridorTextures,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    // Surfaces run from the entrance wall to the back wall.
    let span = plan.length + ENTRANCE_WALL_Z;
    let mid_z = (ENTRANCE_WALL_Z - plan.length) * 0.5;

    let floor = materials.add(StandardMaterial {
        base_color_texture: Some(textures.floor.clone()),
        perceptual_roughness: 0.4,
        metallic: 0.3,
        uv_transform: tile_repeat(
            Vec2::new(CORRIDOR_WIDTH, span),
            Vec2::splat(FLOOR_TILE_WORLD_SIZE),
        ),
        ..default()
    });
    spawn_part(
        commands,
        meshes.add(Rectangle::new(CORRIDOR_WIDTH, span)),
        floor,
        Transform::from_xyz(0.0, 0.0, mid_z).with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
    );

    let ceiling = materials.add(StandardMaterial {
        base_color_texture: Some(textures.ceiling.clone()),
        unlit: true,
        uv_transform: tile_repeat(
            Vec2::new(CORRIDOR_WIDTH, span),
            Vec2::splat(FLOOR_TILE_WORLD_SIZE),
        ),
        ..default()
    });
    spawn_part(
        commands,
        meshes.add(Rectangle::new(CORRIDOR_WIDTH, span)),
        ceiling,
        Transform::from_xyz(0.0, CORRIDOR_HEIGHT, mid_z)
            .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
    );

    let wall = materials.add(StandardMaterial {
        base_color_texture: Some(textures.wall.clone()),
        perceptual_roughness: 0.7,
        metallic: 0.1,
        uv_transform: tile_repeat(
            Vec2::new(span, CORRIDOR_HEIGHT),
            Vec2::new(WALL_TILE_WORLD_SIZE, CORRIDOR_HEIGHT),
        ),
        ..default()
    });
    let wall_mesh = meshes.add(Rectangle::new(span, CORRIDOR_HEIGHT));
    let baseboard_mesh = meshes.add(Rectangle::new(span, 0.24));
    let molding_mesh = meshes.add(Rectangle::new(span, 0.12));
    let baseboard = flat(materials, BASEBOARD_COLOUR);
    let molding = flat(materials, MOLDING_COLOUR);

    for sign in [-1.0_f32, 1.0] {
        // Face the corridor centre.
        let facing = Quat::from_rotation_y(-sign * FRAC_PI_2);
        spawn_part(
            commands,
            wall_mesh.clone(),
            wall.clone(),
            Transform::from_xyz(sign * HALF_WIDTH, CORRIDOR_HEIGHT * 0.5, mid_z)
                .with_rotation(facing),
        );
        spawn_part(
            commands,
            baseboard_mesh.clone(),
            baseboard.clone(),
            Transform::from_xyz(sign * (HALF_WIDTH - 0.06), 0.12, mid_z).with_rotation(facing),
        );
        spawn_part(
            commands,
            molding_mesh.clone(),
            molding.clone(),
            Transform::from_xyz(sign * (HALF_WIDTH - 0.06), CORRIDOR_HEIGHT - 0.06, mid_z)
                .with_rotation(facing),
        );
    }

    let end_cap_mesh = meshes.add(Rectangle::new(CORRIDOR_WIDTH, CORRIDOR_HEIGHT));
    let end_cap = flat(materials, END_CAP_COLOUR);
    spawn_part(
        commands,
        end_cap_mesh.clone(),
        end_cap.clone(),
        Transform::from_xyz(0.0, CORRIDOR_HEIGHT * 0.5, -plan.length),
    );
    spawn_part(
        commands,
        end_cap_mesh,
        end_cap,
        Transform::from_xyz(0.0, CORRIDOR_HEIGHT * 0.5, ENTRANCE_WALL_Z)
            .with_rotation(Quat::from_rotation_y(PI)),
    );
}

/// Ceiling light fixtures and carpet runners.
fn spawn_fixtures(
    commands: &mut Commands,
    plan: &CorridorPlan,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let fixture_mesh = meshes.add(Cuboid::new(1.2, 0.06, 0.4));
    let fixture = flat(materials, LIGHT_FIXTURE_COLOUR);
    let glow_mesh = meshes.add(Rectangle::new(0.6, 0.02));
    let glow = materials.add(StandardMaterial {
        base_color: ACCENT_GOLD.with_alpha(0.3),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    for &z in &plan.light_zs {
        spawn_part(
            commands,
            fixture_mesh.clone(),
            fixture.clone(),
            Transform::from_xyz(0.0, CORRIDOR_HEIGHT - 0.05, z),
        );
        spawn_part(
            commands,
            glow_mesh.clone(),
            glow.clone(),
            Transform::from_xyz(0.0, CORRIDOR_HEIGHT - 0.15, z),
        );
    }

    let carpet_mesh = meshes.add(Rectangle::new(CARPET_WIDTH, CARPET_LENGTH));
    let carpet = materials.add(StandardMaterial {
        base_color: CARPET_COLOUR,
        perceptual_roughness: 0.95,
        ..default()
    });
    for &z in &plan.carpet_zs {
        spawn_part(
            commands,
            carpet_mesh.clone(),
            carpet.clone(),
            Transform::from_xyz(0.0, 0.01, z).with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
        );
    }
}

fn spawn_ornaments(
    commands: &mut Commands,
    ornaments: &[Ornament],
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let frame = flat(materials, ORNAMENT_FRAME_COLOUR);
    let inner = flat(materials, ORNAMENT_INNER_COLOUR);
    let bracket = flat(materials, SCONCE_COLOUR);
    let bulb = materials.add(StandardMaterial {
        base_color: ACCENT_GOLD.with_alpha(0.6),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    let bracket_mesh = meshes.add(Cuboid::new(0.12, 0.25, 0.08));
    let bulb_mesh = meshes.add(Sphere::new(0.06));

    for ornament in ornaments {
        let anchor = Transform::from_xyz(
            ornament.side.sign() * (HALF_WIDTH - 0.02),
            ornament.y,
            ornament.z,
        )
        .with_rotation(ornament.side.facing());

        let mut entity = commands.spawn((anchor, Visibility::default(), CorridorPart));
        match ornament.kind {
            OrnamentKind::Frame { width, height } => {
                let border = meshes.add(Cuboid::new(width + 0.08, height + 0.08, 0.03));
                let canvas = meshes.add(Rectangle::new(width, height));
                entity.with_children(|parent| {
                    parent.spawn((
                        Mesh3d(border),
                        MeshMaterial3d(frame.clone()),
                        Transform::from_xyz(0.0, 0.0, 0.02),
                    ));
                    parent.spawn((
                        Mesh3d(canvas),
                        MeshMaterial3d(inner.clone()),
                        Transform::from_xyz(0.0, 0.0, 0.04),
                    ));
                });
            }
            OrnamentKind::Sconce => {
                entity.with_children(|parent| {
                    parent.spawn((
                        Mesh3d(bracket_mesh.clone()),
                        MeshMaterial3d(bracket.clone()),
                        Transform::from_xyz(0.0, 0.0, 0.04),
                    ));
                    parent.spawn((
                        Mesh3d(bulb_mesh.clone()),
                        MeshMaterial3d(bulb.clone()),
                        Transform::from_xyz(0.0, 0.18, 0.08),
                    ));
                });
            }
        }
    }
}
