use std::collections::HashMap;

use bevy::prelude::*;
use bevy::tasks::{Task, block_on, futures_lite::future};

use super::loader::{MediaBackend, ProximityLoader};
use super::video::VideoSurfaces;
use crate::engine::assets::settings::MuseumSettings;
use crate::engine::camera::MuseumCamera;
use crate::engine::layout::MuseumLayout;
use crate::engine::loading::media_loader::{MediaError, spawn_image_load};

/// A layout entry entering or leaving the mounted neighbourhood.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountEvent {
    Mounted(usize),
    Unmounted(usize),
}

struct PendingImage {
    generation: u64,
    task: Task<Result<Image, MediaError>>,
}

/// In-flight image downloads, at most one per item.
#[derive(Resource, Default)]
pub struct PendingImages {
    tasks: HashMap<String, PendingImage>,
}

impl PendingImages {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

/// Media side effects against the live app: IO pool downloads and browser
/// video surfaces.
struct SceneMediaBackend<'a> {
    pending: &'a mut PendingImages,
    videos: &'a mut VideoSurfaces,
    images: &'a mut Assets<Image>,
}

impl MediaBackend for SceneMediaBackend<'_> {
    fn request_image(&mut self, key: &str, generation: u64, url: &str) {
        self.pending.tasks.insert(
            key.to_owned(),
            PendingImage {
                generation,
                task: spawn_image_load(url.to_owned()),
            },
        );
    }

    fn cancel_image(&mut self, key: &str) {
        // Dropping the task cancels it.
        self.pending.tasks.remove(key);
    }

    fn open_video(&mut self, key: &str, url: &str) -> Option<Handle<Image>> {
        match self.videos.open(key, url, self.images) {
            Ok(texture) => Some(texture),
            Err(e) => {
                debug!("No video for {}: {}", key, e);
                None
            }
        }
    }

    fn close_video(&mut self, key: &str) {
        self.videos.close(key);
    }
}

/// Run the proximity evaluation on its frame cadence and announce mount
/// changes. A new layout or new settings tear every slot down first.
pub fn evaluate_proximity(
    mut loader: ResMut<ProximityLoader>,
    layout: Res<MuseumLayout>,
    settings: Res<MuseumSettings>,
    camera: Query<&Transform, With<MuseumCamera>>,
    mut pending: ResMut<PendingImages>,
    mut videos: NonSendMut<VideoSurfaces>,
    mut images: ResMut<Assets<Image>>,
    mut mount_events: EventWriter<MountEvent>,
) {
    let mut backend = SceneMediaBackend {
        pending: &mut *pending,
        videos: &mut *videos,
        images: &mut *images,
    };

    let mut unmounted = Vec::new();
    if settings.is_changed() {
        info!("Applying proximity settings");
        unmounted = loader.apply_settings(&settings, &mut backend);
    } else if layout.is_changed() {
        unmounted = loader.reset(&mut backend);
    }
    for index in unmounted {
        mount_events.write(MountEvent::Unmounted(index));
    }

    if !loader.tick() {
        return;
    }
    let Ok(transform) = camera.single() else {
        return;
    };

    let changes = loader.evaluate(transform.translation, &layout, &mut backend);
    for index in changes.unmounted {
        mount_events.write(MountEvent::Unmounted(index));
    }
    for index in changes.mounted {
        mount_events.write(MountEvent::Mounted(index));
    }
}

/// Leaving the walkthrough: stop every video, cancel pending downloads and
/// unmount everything. The next walk starts from an immediate evaluation.
pub fn release_all_media(
    mut loader: ResMut<ProximityLoader>,
    mut pending: ResMut<PendingImages>,
    mut videos: NonSendMut<VideoSurfaces>,
    mut images: ResMut<Assets<Image>>,
    mut mount_events: EventWriter<MountEvent>,
) {
    let mut backend = SceneMediaBackend {
        pending: &mut *pending,
        videos: &mut *videos,
        images: &mut *images,
    };
    let unmounted = loader.reset(&mut backend);
    debug!("Released media for {} mounted entries", unmounted.len());
    for index in unmounted {
        mount_events.write(MountEvent::Unmounted(index));
    }
}

/// Hand finished downloads to their slots. Late arrivals for slots that
/// were destroyed or recreated are dropped along with their texture.
pub fn poll_image_loads(
    mut loader: ResMut<ProximityLoader>,
    mut pending: ResMut<PendingImages>,
    mut images: ResMut<Assets<Image>>,
) {
    pending.tasks.retain(|key, load| {
        let Some(result) = block_on(future::poll_once(&mut load.task)) else {
            return true;
        };
        match result {
            Ok(image) => {
                let handle = images.add(image);
                if !loader.finish_image_load(key, load.generation, handle) {
                    debug!("Discarded stale image for {}", key);
                }
            }
            Err(e) => {
                warn!("Image for {} failed to load: {}", key, e);
                loader.fail_image_load(key, load.generation);
            }
        }
        false
    });
}

/// Push the current frame of every bound video into its texture.
pub fn upload_video_frames(videos: NonSend<VideoSurfaces>, mut images: ResMut<Assets<Image>>) {
    if videos.is_empty() {
        return;
    }
    videos.upload_frames(&mut images);
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;

    use super::*;
    use crate::engine::assets::item::{Item, ItemDetails, Tier};
    use crate::engine::layout::layout;
    use crate::engine::loading::catalog::Section;
    use crate::engine::scene::exhibits::{
        Exhibit, MountedExhibits, apply_mount_events, despawn_mounted_exhibits,
        setup_exhibit_assets,
    };

    /// Binds every video it is asked for.
    struct BindingBackend;

    impl MediaBackend for BindingBackend {
        fn request_image(&mut self, _key: &str, _generation: u64, _url: &str) {}
        fn cancel_image(&mut self, _key: &str) {}
        fn open_video(&mut self, _key: &str, _url: &str) -> Option<Handle<Image>> {
            Some(Handle::default())
        }
        fn close_video(&mut self, _key: &str) {}
    }

    fn museum() -> MuseumLayout {
        let items = (0..4)
            .map(|i| Item {
                key: format!("v{i}"),
                tier: Tier::Ultimate,
                section_key: "2022-23".into(),
                owned_count: 0,
                image_url: None,
                video_url: Some(format!("https://cdn.example/v{i}.mp4")),
                date_sort_value: "Z".into(),
                parallels: None,
                details: ItemDetails::default(),
            })
            .collect();
        layout(&[Section {
            key: "2022-23".into(),
            items,
        }])
    }

    fn walking_app() -> App {
        let museum = museum();
        let mut loader = ProximityLoader::default();
        let camera = Vec3::new(
            0.0,
            1.65,
            museum.placement(1).map_or(0.0, |p| p.position.z),
        );
        let changes = loader.evaluate(camera, &museum, &mut BindingBackend);

        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<Assets<Image>>()
            .init_resource::<MountedExhibits>()
            .init_resource::<PendingImages>()
            .init_non_send_resource::<VideoSurfaces>()
            .insert_resource(museum)
            .insert_resource(loader)
            .add_event::<MountEvent>();

        for index in changes.mounted {
            app.world_mut().send_event(MountEvent::Mounted(index));
        }
        app.world_mut().run_system_once(setup_exhibit_assets).unwrap();
        app.world_mut().run_system_once(apply_mount_events).unwrap();
        app
    }

    fn exhibits(app: &mut App) -> usize {
        let mut query = app.world_mut().query::<&Exhibit>();
        query.iter(app.world()).count()
    }

    #[test]
    fn leaving_the_walkthrough_releases_videos_and_exhibits() {
        let mut app = walking_app();
        assert!(app.world().resource::<ProximityLoader>().active_videos() > 0);
        assert_eq!(exhibits(&mut app), 4);

        app.world_mut().run_system_once(release_all_media).unwrap();
        app.world_mut().run_system_once(despawn_mounted_exhibits).unwrap();

        let loader = app.world().resource::<ProximityLoader>();
        assert_eq!(loader.active_videos(), 0);
        assert_eq!(loader.slots().count(), 0);
        assert_eq!(loader.mounted().count(), 0);
        assert!(app.world().resource::<MountedExhibits>().entities.is_empty());
        assert_eq!(exhibits(&mut app), 0);
    }
}
