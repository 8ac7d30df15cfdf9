use std::collections::{BTreeSet, HashMap};

use bevy::prelude::*;

use super::media_slot::{ImageSlot, MediaSlot, VideoBinding};
use super::video_pool::VideoPool;
use crate::engine::assets::settings::MuseumSettings;
use crate::engine::layout::MuseumLayout;

/// Side effects the loader asks of the media layer.
///
/// Kept behind a trait so the mount/bind bookkeeping runs without a renderer
/// or a browser in tests.
pub trait MediaBackend {
    /// Start an asynchronous still image load. Completion is reported back
    /// through `finish_image_load` / `fail_image_load` with the same generation.
    fn request_image(&mut self, key: &str, generation: u64, url: &str);
    /// Drop an in-flight load for a slot that went away.
    fn cancel_image(&mut self, key: &str);
    /// Start a looping, muted video and return the texture it draws into.
    /// `None` when video cannot be played on this platform or the element
    /// could not be created.
    fn open_video(&mut self, key: &str, url: &str) -> Option<Handle<Image>>;
    /// Stop playback and release the video element.
    fn close_video(&mut self, key: &str);
}

/// Distance thresholds, ascending in cost: plaque < texture < mount,
/// video < texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityRanges {
    pub mount: f32,
    pub texture: f32,
    pub video: f32,
    pub video_hysteresis: f32,
    pub plaque: f32,
}

impl From<&MuseumSettings> for ProximityRanges {
    fn from(settings: &MuseumSettings) -> Self {
        Self {
            mount: settings.mount_range,
            texture: settings.texture_range,
            video: settings.video_range,
            video_hysteresis: settings.video_hysteresis,
            plaque: settings.plaque_range,
        }
    }
}

/// Layout indices that entered or left the mounted neighbourhood.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountChanges {
    pub mounted: Vec<usize>,
    pub unmounted: Vec<usize>,
}

impl MountChanges {
    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty() && self.unmounted.is_empty()
    }
}

/// Owns every `MediaSlot` and the video pool. Evaluated on a frame cadence
/// from a single system, so evaluations are strictly ordered.
#[derive(Resource, Debug)]
pub struct ProximityLoader {
    ranges: ProximityRanges,
    interval: u32,
    frames_since_evaluation: u32,
    pool: VideoPool,
    mounted: BTreeSet<usize>,
    slots: HashMap<String, MediaSlot>,
    next_generation: u64,
}

impl Default for ProximityLoader {
    fn default() -> Self {
        Self::new(&MuseumSettings::default())
    }
}

impl ProximityLoader {
    pub fn new(settings: &MuseumSettings) -> Self {
        let interval = settings.evaluation_interval_frames.max(1);
        Self {
            ranges: ProximityRanges::from(settings),
            interval,
            // First tick evaluates immediately.
            frames_since_evaluation: interval,
            pool: VideoPool::new(settings.max_concurrent_videos),
            mounted: BTreeSet::new(),
            slots: HashMap::new(),
            next_generation: 0,
        }
    }

    pub fn ranges(&self) -> ProximityRanges {
        self.ranges
    }

    /// Count a rendered frame. True when an evaluation is due.
    pub fn tick(&mut self) -> bool {
        self.frames_since_evaluation += 1;
        if self.frames_since_evaluation >= self.interval {
            self.frames_since_evaluation = 0;
            true
        } else {
            false
        }
    }

    /// Make the next `tick` evaluate regardless of cadence.
    pub fn request_evaluation(&mut self) {
        self.frames_since_evaluation = self.interval;
    }

    /// Re-evaluate the mounted set and every mounted item's media against
    /// the camera position.
    pub fn evaluate(
        &mut self,
        camera: Vec3,
        layout: &MuseumLayout,
        backend: &mut impl MediaBackend,
    ) -> MountChanges {
        let visible: BTreeSet<usize> = layout
            .items
            .iter()
            .enumerate()
            .filter(|(_, entry)| (camera.z - entry.axis_position()).abs() < self.ranges.mount)
            .map(|(index, _)| index)
            .collect();

        let mut changes = MountChanges::default();

        let leaving: Vec<usize> = self.mounted.difference(&visible).copied().collect();
        for index in leaving {
            self.mounted.remove(&index);
            if let Some(placement) = layout.placement(index) {
                self.destroy_slot(&placement.item.key, backend);
            }
            changes.unmounted.push(index);
        }

        let entering: Vec<usize> = visible.difference(&self.mounted).copied().collect();
        for index in entering {
            self.mounted.insert(index);
            if let Some(placement) = layout.placement(index) {
                self.create_slot(&placement.item.key, index);
            }
            changes.mounted.push(index);
        }

        let ranges = self.ranges;
        for &index in &self.mounted {
            let Some(placement) = layout.placement(index) else {
                continue;
            };
            let item = &placement.item;
            let Some(slot) = self.slots.get_mut(&item.key) else {
                continue;
            };

            let distance = camera.distance(placement.position);
            slot.distance = distance;
            slot.plaque_visible = distance < ranges.plaque;

            if distance < ranges.texture {
                if slot.image == ImageSlot::Empty {
                    if let Some(url) = item.image_url.as_deref() {
                        backend.request_image(&item.key, slot.generation, url);
                        slot.image = ImageSlot::Loading;
                    }
                }
            } else if slot.image == ImageSlot::Failed {
                // Leaving texture range re-arms a failed load.
                slot.image = ImageSlot::Empty;
            }

            match (&slot.video, item.video_url.as_deref()) {
                (None, Some(url)) if distance < ranges.video => {
                    let Some(permit) = self.pool.try_acquire() else {
                        continue;
                    };
                    match backend.open_video(&item.key, url) {
                        Some(texture) => {
                            debug!("Bound video for {} at {:.1}m", item.key, distance);
                            slot.video = Some(VideoBinding { permit, texture });
                        }
                        None => self.pool.release(permit),
                    }
                }
                (Some(_), _) if distance >= ranges.video + ranges.video_hysteresis => {
                    backend.close_video(&item.key);
                    if let Some(binding) = slot.video.take() {
                        self.pool.release(binding.permit);
                    }
                }
                _ => {}
            }
        }

        changes
    }

    /// Fresh slot for a newly mounted item. Any previous slot for the key is
    /// replaced, and its generation retired.
    pub fn create_slot(&mut self, key: &str, layout_index: usize) -> &MediaSlot {
        self.next_generation += 1;
        let slot = MediaSlot::new(layout_index, self.next_generation);
        self.slots.insert(key.to_owned(), slot);
        &self.slots[key]
    }

    /// Tear down a slot: cancel its pending load and release its video.
    /// The only path that returns a video permit outside of the hysteresis
    /// check, so unmount always frees the pool exactly once.
    pub fn destroy_slot(&mut self, key: &str, backend: &mut impl MediaBackend) {
        let Some(slot) = self.slots.remove(key) else {
            return;
        };
        if slot.image == ImageSlot::Loading {
            backend.cancel_image(key);
        }
        if let Some(binding) = slot.video {
            backend.close_video(key);
            self.pool.release(binding.permit);
        }
    }

    /// Store a finished image. Returns false when the load is stale: the slot
    /// was destroyed or recreated since the request.
    pub fn finish_image_load(&mut self, key: &str, generation: u64, handle: Handle<Image>) -> bool {
        match self.slots.get_mut(key) {
            Some(slot) if slot.generation == generation && slot.image == ImageSlot::Loading => {
                slot.image = ImageSlot::Ready(handle);
                true
            }
            _ => false,
        }
    }

    /// Mark a load as failed. The slot keeps its placeholder; the load is
    /// retried once the camera leaves texture range and comes back.
    pub fn fail_image_load(&mut self, key: &str, generation: u64) {
        if let Some(slot) = self.slots.get_mut(key) {
            if slot.generation == generation && slot.image == ImageSlot::Loading {
                slot.image = ImageSlot::Failed;
            }
        }
    }

    /// Destroy every slot and forget the mounted set, returning what was
    /// mounted. Used when the layout is replaced.
    pub fn reset(&mut self, backend: &mut impl MediaBackend) -> Vec<usize> {
        let keys: Vec<String> = self.slots.keys().cloned().collect();
        for key in keys {
            self.destroy_slot(&key, backend);
        }
        self.request_evaluation();
        std::mem::take(&mut self.mounted).into_iter().collect()
    }

    /// Swap in new tuning. Tears everything down first so no permit outlives
    /// the pool it came from.
    pub fn apply_settings(
        &mut self,
        settings: &MuseumSettings,
        backend: &mut impl MediaBackend,
    ) -> Vec<usize> {
        let unmounted = self.reset(backend);
        let generation = self.next_generation;
        *self = Self::new(settings);
        self.next_generation = generation;
        unmounted
    }

    pub fn slot(&self, key: &str) -> Option<&MediaSlot> {
        self.slots.get(key)
    }

    pub fn slots(&self) -> impl Iterator<Item = (&String, &MediaSlot)> {
        self.slots.iter()
    }

    pub fn is_mounted(&self, index: usize) -> bool {
        self.mounted.contains(&index)
    }

    pub fn mounted(&self) -> impl Iterator<Item = usize> + '_ {
        self.mounted.iter().copied()
    }

    pub fn active_videos(&self) -> usize {
        self.pool.active()
    }

    pub fn video_capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Closest item whose plaque is showing.
    pub fn nearest_plaque(&self) -> Option<(&str, &MediaSlot)> {
        self.slots
            .iter()
            .filter(|(_, slot)| slot.plaque_visible)
            .min_by(|a, b| a.1.distance.total_cmp(&b.1.distance))
            .map(|(key, slot)| (key.as_str(), slot))
    }
}
