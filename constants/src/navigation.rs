/// Camera height above the floor.
pub const EYE_HEIGHT: f32 = 1.65;

/// Initial camera Z, just inside the entrance.
pub const START_Z: f32 = 2.0;

/// Walk speed in world units per second.
pub const WALK_SPEED: f32 = 6.0;

/// Largest frame delta integrated in one step (seconds).
pub const MAX_FRAME_STEP: f32 = 0.1;

/// Minimum clearance between the camera and a side wall.
pub const WALL_MARGIN: f32 = 0.6;

/// Minimum clearance between the camera and the back wall.
pub const END_MARGIN: f32 = 1.0;

/// Furthest the camera may back up towards the entrance.
pub const ENTRANCE_MARGIN: f32 = 4.0;

/// Vertical look limit, applied on every platform (radians, 60°).
pub const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_3;

/// Radians of rotation per pixel of locked mouse motion.
pub const MOUSE_SENSITIVITY: f32 = 0.002;

/// Radians of rotation per pixel of touch drag.
pub const TOUCH_LOOK_SENSITIVITY: f32 = 0.005;

/// Virtual joystick radius in logical pixels.
pub const JOYSTICK_RADIUS: f32 = 60.0;

/// Joystick deflection below this fraction of the radius is ignored.
pub const JOYSTICK_DEAD_ZONE: f32 = 0.1;
