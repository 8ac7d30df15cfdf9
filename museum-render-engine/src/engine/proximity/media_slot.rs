use bevy::prelude::*;

use super::video_pool::VideoPermit;

/// Still image state of one exhibit.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ImageSlot {
    #[default]
    Empty,
    /// A load is in flight; no second request is issued meanwhile.
    Loading,
    Ready(Handle<Image>),
    /// The last load failed. Cleared once the camera leaves texture range.
    Failed,
}

/// A bound video and the pool slot it occupies.
#[derive(Debug)]
pub struct VideoBinding {
    pub permit: VideoPermit,
    pub texture: Handle<Image>,
}

/// Media bound to one mounted exhibit. Created on mount, destroyed on unmount.
#[derive(Debug)]
pub struct MediaSlot {
    /// Index of the exhibit in the layout.
    pub layout_index: usize,
    /// Distinguishes this slot from earlier slots for the same key so late
    /// image loads cannot land in a newer slot.
    pub generation: u64,
    pub image: ImageSlot,
    pub video: Option<VideoBinding>,
    pub plaque_visible: bool,
    /// Camera distance at the last evaluation.
    pub distance: f32,
}

impl MediaSlot {
    pub fn new(layout_index: usize, generation: u64) -> Self {
        Self {
            layout_index,
            generation,
            image: ImageSlot::Empty,
            video: None,
            plaque_visible: false,
            distance: f32::INFINITY,
        }
    }

    /// Texture the screen should show: the video when bound, else the image.
    pub fn active_texture(&self) -> Option<&Handle<Image>> {
        match (&self.video, &self.image) {
            (Some(video), _) => Some(&video.texture),
            (None, ImageSlot::Ready(handle)) => Some(handle),
            _ => None,
        }
    }
}
