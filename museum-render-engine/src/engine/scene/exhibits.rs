//! Mounted exhibits and section arches.
//!
//! Entities exist only for layout entries the proximity loader has mounted.
//! Screens show whatever texture the entry's media slot currently holds.

use std::collections::HashMap;

use bevy::prelude::*;
use constants::layout::{CORRIDOR_HEIGHT, CORRIDOR_WIDTH, SCREEN_SIZE};
use constants::render_settings::{
    ACCENT_GOLD, ARCH_BEAM_COLOUR, OWNED_BADGE_COLOUR, PLAQUE_COLOUR, SCREEN_FRAME_COLOUR,
    SCREEN_PLACEHOLDER_COLOUR, SCREEN_PLACEHOLDER_EMISSIVE,
};

use crate::constants::render_settings::{
    BANNER_LIGHT_INTENSITY, BANNER_LIGHT_RANGE, SCREEN_GLOW_INTENSITY, SCREEN_GLOW_RANGE,
};
use crate::engine::assets::item::Tier;
use crate::engine::layout::{MuseumLayout, Placement, SectionBanner};
use crate::engine::proximity::loader::ProximityLoader;
use crate::engine::proximity::systems::MountEvent;

/// Root of a mounted exhibit.
#[derive(Component, Debug)]
pub struct Exhibit {
    pub key: String,
}

#[derive(Component, Debug)]
pub struct ExhibitScreen {
    pub key: String,
}

/// Gold bar shown on a screen until it has a texture.
#[derive(Component, Debug)]
pub struct ScreenPlaceholder {
    pub key: String,
}

#[derive(Component, Debug)]
pub struct ScreenGlow {
    pub key: String,
}

#[derive(Component, Debug)]
pub struct Plaque {
    pub key: String,
}

#[derive(Component, Debug)]
pub struct SectionArch {
    pub label: String,
    pub count: usize,
}

/// Layout index to spawned root entity.
#[derive(Resource, Default, Debug)]
pub struct MountedExhibits {
    pub entities: HashMap<usize, Entity>,
}

/// Meshes and materials shared by every exhibit.
#[derive(Resource)]
pub struct ExhibitAssets {
    frame_mesh: Handle<Mesh>,
    frame_material: Handle<StandardMaterial>,
    bezel_mesh: Handle<Mesh>,
    bezels: HashMap<Tier, Handle<StandardMaterial>>,
    screen_mesh: Handle<Mesh>,
    placeholder_mesh: Handle<Mesh>,
    placeholder_material: Handle<StandardMaterial>,
    badge_mesh: Handle<Mesh>,
    badge_material: Handle<StandardMaterial>,
    plaque_mesh: Handle<Mesh>,
    plaque_material: Handle<StandardMaterial>,
    plaque_stripe_mesh: Handle<Mesh>,
    beam_mesh: Handle<Mesh>,
    beam_material: Handle<StandardMaterial>,
    strip_mesh: Handle<Mesh>,
    gold_material: Handle<StandardMaterial>,
}

const TIERS: [Tier; 6] = [
    Tier::Ultimate,
    Tier::Legendary,
    Tier::Rare,
    Tier::Fandom,
    Tier::Common,
    Tier::Unknown,
];

fn unlit(colour: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: colour,
        unlit: true,
        ..default()
    }
}

/// Material of a screen with no texture yet.
fn placeholder_screen() -> StandardMaterial {
    StandardMaterial {
        base_color: SCREEN_PLACEHOLDER_COLOUR,
        emissive: SCREEN_PLACEHOLDER_EMISSIVE.to_linear() * 0.8,
        perceptual_roughness: 0.5,
        ..default()
    }
}

pub fn setup_exhibit_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let bezels = TIERS
        .iter()
        .map(|tier| (*tier, materials.add(unlit(tier.colour()))))
        .collect();

    commands.insert_resource(ExhibitAssets {
        frame_mesh: meshes.add(Cuboid::new(SCREEN_SIZE + 0.4, SCREEN_SIZE + 0.4, 0.06)),
        frame_material: materials.add(StandardMaterial {
            base_color: SCREEN_FRAME_COLOUR,
            perceptual_roughness: 0.3,
            metallic: 0.9,
            ..default()
        }),
        bezel_mesh: meshes.add(Rectangle::new(SCREEN_SIZE + 0.15, SCREEN_SIZE + 0.15)),
        bezels,
        screen_mesh: meshes.add(Rectangle::new(SCREEN_SIZE, SCREEN_SIZE)),
        placeholder_mesh: meshes.add(Rectangle::new(SCREEN_SIZE * 0.6, 0.08)),
        placeholder_material: materials.add(StandardMaterial {
            base_color: ACCENT_GOLD.with_alpha(0.15),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        }),
        badge_mesh: meshes.add(Cuboid::new(0.5, 0.18, 0.02)),
        badge_material: materials.add(unlit(OWNED_BADGE_COLOUR)),
        plaque_mesh: meshes.add(Cuboid::new(2.2, 1.0, 0.04)),
        plaque_material: materials.add(StandardMaterial {
            base_color: PLAQUE_COLOUR,
            perceptual_roughness: 0.6,
            metallic: 0.4,
            ..default()
        }),
        plaque_stripe_mesh: meshes.add(Rectangle::new(2.2, 0.05)),
        beam_mesh: meshes.add(Cuboid::new(CORRIDOR_WIDTH - 0.5, 0.4, 0.3)),
        beam_material: materials.add(StandardMaterial {
            base_color: ARCH_BEAM_COLOUR,
            perceptual_roughness: 0.5,
            metallic: 0.4,
            ..default()
        }),
        strip_mesh: meshes.add(Cuboid::new(CORRIDOR_WIDTH - 0.6, 0.08, 0.02)),
        gold_material: materials.add(unlit(ACCENT_GOLD)),
    });
}

/// Spawn and despawn entities for mount changes.
pub fn apply_mount_events(
    mut commands: Commands,
    mut events: EventReader<MountEvent>,
    layout: Res<MuseumLayout>,
    assets: Res<ExhibitAssets>,
    mut mounted: ResMut<MountedExhibits>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for event in events.read() {
        match *event {
            MountEvent::Unmounted(index) => {
                if let Some(entity) = mounted.entities.remove(&index) {
                    commands.entity(entity).despawn();
                }
            }
            MountEvent::Mounted(index) => {
                if mounted.entities.contains_key(&index) {
                    continue;
                }
                let entity = if let Some(placement) = layout.placement(index) {
                    spawn_exhibit(&mut commands, placement, &assets, &mut materials)
                } else if let Some(banner) = layout.banner(index) {
                    spawn_arch(&mut commands, banner, &assets)
                } else {
                    continue;
                };
                mounted.entities.insert(index, entity);
            }
        }
    }
}

/// Despawn every mounted exhibit and arch.
pub fn despawn_mounted_exhibits(mut commands: Commands, mut mounted: ResMut<MountedExhibits>) {
    for (_, entity) in mounted.entities.drain() {
        commands.entity(entity).despawn();
    }
}

fn spawn_exhibit(
    commands: &mut Commands,
    placement: &Placement,
    assets: &ExhibitAssets,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let item = &placement.item;
    let key = item.key.clone();
    let bezel = assets
        .bezels
        .get(&item.tier)
        .cloned()
        .unwrap_or_else(|| materials.add(unlit(item.tier.colour())));
    // Each screen owns its material so its texture can be swapped alone.
    let screen_material = materials.add(placeholder_screen());
    let half = SCREEN_SIZE * 0.5;

    commands
        .spawn((
            Exhibit { key: key.clone() },
            Transform::from_translation(placement.position).with_rotation(placement.rotation),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(assets.frame_mesh.clone()),
                MeshMaterial3d(assets.frame_material.clone()),
                Transform::from_xyz(0.0, 0.0, -0.04),
            ));
            parent.spawn((
                Mesh3d(assets.bezel_mesh.clone()),
                MeshMaterial3d(bezel),
                Transform::from_xyz(0.0, 0.0, -0.015),
            ));
            parent.spawn((
                ExhibitScreen { key: key.clone() },
                Mesh3d(assets.screen_mesh.clone()),
                MeshMaterial3d(screen_material),
                Transform::from_xyz(0.0, 0.0, 0.005),
            ));
            parent.spawn((
                ScreenPlaceholder { key: key.clone() },
                Mesh3d(assets.placeholder_mesh.clone()),
                MeshMaterial3d(assets.placeholder_material.clone()),
                Transform::from_xyz(0.0, half - 0.3, 0.01),
            ));
            parent.spawn((
                ScreenGlow { key: key.clone() },
                PointLight {
                    color: item.tier.colour(),
                    intensity: 0.0,
                    range: SCREEN_GLOW_RANGE,
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, 1.0),
            ));
            if item.is_owned() {
                parent.spawn((
                    Mesh3d(assets.badge_mesh.clone()),
                    MeshMaterial3d(assets.badge_material.clone()),
                    Transform::from_xyz(half - 0.35, half - 0.25, 0.02),
                ));
            }
            parent
                .spawn((
                    Plaque { key: key.clone() },
                    Mesh3d(assets.plaque_mesh.clone()),
                    MeshMaterial3d(assets.plaque_material.clone()),
                    Transform::from_xyz(0.0, -(half + 0.9), 0.06),
                    Visibility::Hidden,
                ))
                .with_children(|plaque| {
                    plaque.spawn((
                        Mesh3d(assets.plaque_stripe_mesh.clone()),
                        MeshMaterial3d(assets.bezels.get(&item.tier).cloned().unwrap_or_default()),
                        Transform::from_xyz(0.0, 0.47, 0.021),
                    ));
                });
        })
        .id()
}

fn spawn_arch(commands: &mut Commands, banner: &SectionBanner, assets: &ExhibitAssets) -> Entity {
    commands
        .spawn((
            SectionArch {
                label: banner.label.clone(),
                count: banner.count,
            },
            Transform::from_xyz(0.0, 0.0, banner.z),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(assets.beam_mesh.clone()),
                MeshMaterial3d(assets.beam_material.clone()),
                Transform::from_xyz(0.0, CORRIDOR_HEIGHT - 0.3, 0.0),
            ));
            parent.spawn((
                Mesh3d(assets.strip_mesh.clone()),
                MeshMaterial3d(assets.gold_material.clone()),
                Transform::from_xyz(0.0, CORRIDOR_HEIGHT - 0.08, 0.16),
            ));
            parent.spawn((
                PointLight {
                    color: ACCENT_GOLD,
                    intensity: BANNER_LIGHT_INTENSITY,
                    range: BANNER_LIGHT_RANGE,
                    ..default()
                },
                Transform::from_xyz(0.0, CORRIDOR_HEIGHT - 0.8, 0.0),
            ));
        })
        .id()
}

/// Point each screen at its slot's video or image, falling back to the
/// placeholder. Video-bound materials are touched every frame so the
/// refreshed frame is picked up.
pub fn update_screen_textures(
    loader: Res<ProximityLoader>,
    screens: Query<(&ExhibitScreen, &MeshMaterial3d<StandardMaterial>)>,
    mut placeholders: Query<(&ScreenPlaceholder, &mut Visibility)>,
    mut glows: Query<(&ScreenGlow, &mut PointLight)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (screen, material) in &screens {
        let slot = loader.slot(&screen.key);
        let wanted = slot.and_then(|s| s.active_texture()).cloned();
        let playing = slot.is_some_and(|s| s.video.is_some());

        let current = materials
            .get(&material.0)
            .map(|m| m.base_color_texture.clone());
        if current.as_ref() == Some(&wanted) && !playing {
            continue;
        }
        let Some(material) = materials.get_mut(&material.0) else {
            continue;
        };
        match wanted {
            Some(texture) => {
                material.base_color = Color::WHITE;
                material.base_color_texture = Some(texture);
                material.emissive = LinearRgba::BLACK;
                material.unlit = true;
            }
            None => *material = placeholder_screen(),
        }
    }

    for (placeholder, mut visibility) in &mut placeholders {
        let textured = loader
            .slot(&placeholder.key)
            .and_then(|s| s.active_texture())
            .is_some();
        let wanted = if textured {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        };
        visibility.set_if_neq(wanted);
    }

    for (glow, mut light) in &mut glows {
        let textured = loader
            .slot(&glow.key)
            .and_then(|s| s.active_texture())
            .is_some();
        let intensity = if textured { SCREEN_GLOW_INTENSITY } else { 0.0 };
        if light.intensity != intensity {
            light.intensity = intensity;
        }
    }
}

/// Plaques follow their slot's plaque flag.
pub fn update_plaques(loader: Res<ProximityLoader>, mut plaques: Query<(&Plaque, &mut Visibility)>) {
    for (plaque, mut visibility) in &mut plaques {
        let visible = loader.slot(&plaque.key).is_some_and(|s| s.plaque_visible);
        visibility.set_if_neq(if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::item::{Item, ItemDetails};
    use crate::engine::layout::layout;
    use crate::engine::loading::catalog::Section;

    fn museum() -> MuseumLayout {
        let items = (0..3)
            .map(|i| Item {
                key: format!("k{i}"),
                tier: Tier::Legendary,
                section_key: "2023-24".into(),
                owned_count: i,
                image_url: None,
                video_url: None,
                date_sort_value: "Z".into(),
                parallels: None,
                details: ItemDetails::default(),
            })
            .collect();
        layout(&[Section {
            key: "2023-24".into(),
            items,
        }])
    }

    fn app() -> App {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<MountedExhibits>()
            .insert_resource(museum())
            .add_event::<MountEvent>()
            .add_systems(Startup, setup_exhibit_assets)
            .add_systems(Update, apply_mount_events);
        app
    }

    fn count<C: Component>(app: &mut App) -> usize {
        let mut query = app.world_mut().query::<&C>();
        query.iter(app.world()).count()
    }

    #[test]
    fn mount_and_unmount_spawn_and_despawn() {
        let mut app = app();
        for index in 0..4 {
            app.world_mut().send_event(MountEvent::Mounted(index));
        }
        app.update();

        assert_eq!(count::<SectionArch>(&mut app), 1);
        assert_eq!(count::<Exhibit>(&mut app), 3);
        assert_eq!(count::<Plaque>(&mut app), 3);
        assert_eq!(app.world().resource::<MountedExhibits>().entities.len(), 4);

        app.world_mut().send_event(MountEvent::Unmounted(1));
        app.world_mut().send_event(MountEvent::Unmounted(0));
        app.update();

        assert_eq!(count::<SectionArch>(&mut app), 0);
        assert_eq!(count::<Exhibit>(&mut app), 2);
        assert_eq!(count::<ExhibitScreen>(&mut app), 2);
    }

    #[test]
    fn repeated_mount_is_ignored() {
        let mut app = app();
        app.world_mut().send_event(MountEvent::Mounted(1));
        app.world_mut().send_event(MountEvent::Mounted(1));
        app.update();
        assert_eq!(count::<Exhibit>(&mut app), 1);
    }

    #[test]
    fn despawn_clears_every_mounted_entry() {
        let mut app = app();
        app.add_systems(PostUpdate, despawn_mounted_exhibits);
        for index in 0..4 {
            app.world_mut().send_event(MountEvent::Mounted(index));
        }
        app.update();

        assert_eq!(count::<Exhibit>(&mut app), 0);
        assert_eq!(count::<SectionArch>(&mut app), 0);
        assert!(app.world().resource::<MountedExhibits>().entities.is_empty());
    }
}
