use bevy::prelude::*;
use constants::navigation::WALK_SPEED;
use constants::proximity::{
    EVALUATION_INTERVAL_FRAMES, MAX_CONCURRENT_VIDEOS, MOUNT_RANGE, PLAQUE_RANGE, TEXTURE_RANGE,
    VIDEO_HYSTERESIS, VIDEO_RANGE,
};
use serde::{Deserialize, Serialize};

/// Runtime tuning read from `museum_settings.json`.
/// Every field is optional in the file; missing fields keep the compiled defaults.
#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MuseumSettings {
    pub mount_range: f32,
    pub texture_range: f32,
    pub video_range: f32,
    pub video_hysteresis: f32,
    pub plaque_range: f32,
    pub max_concurrent_videos: usize,
    pub evaluation_interval_frames: u32,
    pub walk_speed: f32,
}

impl Default for MuseumSettings {
    fn default() -> Self {
        Self {
            mount_range: MOUNT_RANGE,
            texture_range: TEXTURE_RANGE,
            video_range: VIDEO_RANGE,
            video_hysteresis: VIDEO_HYSTERESIS,
            plaque_range: PLAQUE_RANGE,
            max_concurrent_videos: MAX_CONCURRENT_VIDEOS,
            evaluation_interval_frames: EVALUATION_INTERVAL_FRAMES,
            walk_speed: WALK_SPEED,
        }
    }
}

impl MuseumSettings {
    /// Repair values that would break the proximity ordering
    /// (plaque < texture range, video < mount range) or stall evaluation.
    pub fn sanitised(mut self) -> Self {
        let defaults = Self::default();
        if !(self.mount_range > 0.0) {
            self.mount_range = defaults.mount_range;
        }
        self.texture_range = self.texture_range.clamp(0.0, self.mount_range);
        self.video_range = self.video_range.clamp(0.0, self.texture_range);
        self.plaque_range = self.plaque_range.clamp(0.0, self.texture_range);
        self.video_hysteresis = self.video_hysteresis.max(0.0);
        self.evaluation_interval_frames = self.evaluation_interval_frames.max(1);
        if !(self.walk_speed > 0.0) {
            self.walk_speed = defaults.walk_speed;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings: MuseumSettings =
            serde_json::from_str(r#"{ "max_concurrent_videos": 2 }"#).unwrap();
        assert_eq!(settings.max_concurrent_videos, 2);
        assert_eq!(settings.video_range, VIDEO_RANGE);
        assert_eq!(settings.evaluation_interval_frames, EVALUATION_INTERVAL_FRAMES);
    }

    #[test]
    fn sanitised_restores_range_ordering() {
        let settings = MuseumSettings {
            mount_range: 20.0,
            texture_range: 40.0,
            video_range: 30.0,
            plaque_range: 50.0,
            evaluation_interval_frames: 0,
            walk_speed: -1.0,
            ..Default::default()
        }
        .sanitised();

        assert_eq!(settings.texture_range, 20.0);
        assert_eq!(settings.video_range, 20.0);
        assert_eq!(settings.plaque_range, 20.0);
        assert_eq!(settings.evaluation_interval_frames, 1);
        assert_eq!(settings.walk_speed, WALK_SPEED);
    }
}
