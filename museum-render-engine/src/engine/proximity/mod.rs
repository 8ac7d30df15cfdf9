//! Distance-driven mounting of exhibits and their media.
//!
//! Every few frames the camera position is compared against the layout.
//! Entries near the camera along the corridor are mounted; mounted exhibits
//! load their still image, bind a video within a tighter radius (bounded by
//! a shared pool) and show their plaque when the visitor is close.

pub mod loader;
pub mod media_slot;
pub mod systems;
pub mod video;
pub mod video_pool;

use bevy::prelude::*;

use loader::ProximityLoader;
use systems::{MountEvent, PendingImages};
use video::VideoSurfaces;

pub struct ProximityPlugin;

impl Plugin for ProximityPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProximityLoader>()
            .init_resource::<PendingImages>()
            .init_non_send_resource::<VideoSurfaces>()
            .add_event::<MountEvent>();
    }
}
