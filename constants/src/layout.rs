/// Corridor width in world units (wall to wall).
pub const CORRIDOR_WIDTH: f32 = 14.0;

/// Half the corridor width, the X coordinate of each wall.
pub const HALF_WIDTH: f32 = CORRIDOR_WIDTH / 2.0;

/// Floor to ceiling height.
pub const CORRIDOR_HEIGHT: f32 = 5.5;

/// Exhibit screen edge length (square screens).
pub const SCREEN_SIZE: f32 = 3.0;

/// Height of the screen centre above the floor.
pub const SCREEN_Y: f32 = 2.8;

/// Distance exhibits sit off the wall plane to avoid z-fighting.
pub const WALL_INSET: f32 = 0.02;

/// Cursor start, keeps the first banner just past the entrance.
pub const START_OFFSET: f32 = -10.0;

/// Advance after a section banner before its first pair.
pub const SECTION_GAP: f32 = 5.0;

/// Advance between consecutive left/right pairs.
pub const PAIR_GAP: f32 = 8.0;

/// Extra advance after the last pair of a section.
pub const SECTION_TRAILING_GAP: f32 = 4.0;

/// Corridor extension past the final cursor position.
pub const TRAILING_MARGIN: f32 = 10.0;

/// Z position of the entrance end cap.
pub const ENTRANCE_WALL_Z: f32 = 5.0;

/// Spacing between ceiling light fixtures.
pub const LIGHT_SPACING: f32 = 12.0;

/// Offset of the first ceiling light from the entrance.
pub const LIGHT_START_OFFSET: f32 = 8.0;

/// Spacing between floor carpet decals.
pub const CARPET_SPACING: f32 = 24.0;

/// Carpet decal length along the corridor axis.
pub const CARPET_LENGTH: f32 = 6.0;

/// Carpet decal width.
pub const CARPET_WIDTH: f32 = 3.2;

/// One wall ornament per this many units of corridor length.
pub const ORNAMENT_SPACING: f32 = 6.0;

/// World units covered by one repeat of the floor and ceiling tiles.
pub const FLOOR_TILE_WORLD_SIZE: f32 = 4.0;

/// World units covered by one repeat of the wall panel texture.
pub const WALL_TILE_WORLD_SIZE: f32 = 6.0;
