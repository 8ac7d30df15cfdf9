/// Items further than this along the corridor axis are not mounted at all.
pub const MOUNT_RANGE: f32 = 50.0;

/// Start loading the still image below this distance.
pub const TEXTURE_RANGE: f32 = 35.0;

/// Bind a video below this distance.
pub const VIDEO_RANGE: f32 = 14.0;

/// Videos are released only once the camera is this much past `VIDEO_RANGE`.
pub const VIDEO_HYSTERESIS: f32 = 5.0;

/// Show the descriptive plaque below this distance.
pub const PLAQUE_RANGE: f32 = 10.0;

/// Maximum number of simultaneously bound video sources.
pub const MAX_CONCURRENT_VIDEOS: usize = 4;

/// Proximity is re-evaluated once every this many rendered frames.
pub const EVALUATION_INTERVAL_FRAMES: u32 = 20;

/// Pixel size of the offscreen canvas video frames are copied through.
pub const VIDEO_FRAME_SIZE: u32 = 256;
