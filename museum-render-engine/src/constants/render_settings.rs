/// Vertical field of view of the walkthrough camera (degrees).
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 200.0;

/// Point lights that travel with the camera, (z offset, intensity, range).
pub const CAMERA_LIGHTS: [(f32, f32, f32); 2] = [(-4.0, 60_000.0, 20.0), (4.0, 36_000.0, 15.0)];

/// Height of the camera-following lights below the ceiling.
pub const CAMERA_LIGHT_DROP: f32 = 0.5;

/// Warm light under each section arch.
pub const BANNER_LIGHT_INTENSITY: f32 = 24_000.0;
pub const BANNER_LIGHT_RANGE: f32 = 8.0;

/// Glow in front of an exhibit once its screen has a texture.
pub const SCREEN_GLOW_INTENSITY: f32 = 12_000.0;
pub const SCREEN_GLOW_RANGE: f32 = 4.0;
