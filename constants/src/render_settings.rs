use bevy::color::Color;

/// Clear colour and fog colour of the corridor.
pub const BACKGROUND_COLOUR: Color = Color::srgb(0.031, 0.031, 0.071);

pub const FOG_START: f32 = 12.0;
pub const FOG_END: f32 = 65.0;

/// Team gold used for accents, glow markers and banner strips.
pub const ACCENT_GOLD: Color = Color::srgb(0.992, 0.725, 0.153);

pub const AMBIENT_COLOUR: Color = Color::srgb(0.667, 0.667, 0.8);
pub const AMBIENT_BRIGHTNESS: f32 = 350.0;

pub const BASEBOARD_COLOUR: Color = Color::srgb(0.102, 0.102, 0.208);
pub const MOLDING_COLOUR: Color = Color::srgb(0.2, 0.2, 0.376);
pub const END_CAP_COLOUR: Color = Color::srgb(0.078, 0.078, 0.196);
pub const LIGHT_FIXTURE_COLOUR: Color = Color::srgb(0.933, 0.8, 0.533);
pub const CARPET_COLOUR: Color = Color::srgb(0.35, 0.08, 0.1);

pub const ORNAMENT_FRAME_COLOUR: Color = Color::srgb(0.165, 0.157, 0.271);
pub const ORNAMENT_INNER_COLOUR: Color = Color::srgb(0.086, 0.086, 0.188);
pub const SCONCE_COLOUR: Color = Color::srgb(0.227, 0.227, 0.353);

pub const ARCH_BEAM_COLOUR: Color = Color::srgb(0.059, 0.063, 0.161);
pub const SCREEN_FRAME_COLOUR: Color = Color::srgb(0.067, 0.067, 0.067);
pub const SCREEN_PLACEHOLDER_COLOUR: Color = Color::srgb(0.094, 0.094, 0.188);
pub const SCREEN_PLACEHOLDER_EMISSIVE: Color = Color::srgb(0.063, 0.063, 0.157);
pub const PLAQUE_COLOUR: Color = Color::srgb(0.12, 0.11, 0.09);
pub const OWNED_BADGE_COLOUR: Color = Color::srgb(0.18, 0.8, 0.44);

/// Edge length in pixels of the generated floor tile.
pub const FLOOR_TEXTURE_SIZE: u32 = 512;

/// Edge length in pixels of the generated wall panel tile.
pub const WALL_TEXTURE_SIZE: u32 = 512;

/// Edge length in pixels of the generated ceiling tile.
pub const CEILING_TEXTURE_SIZE: u32 = 256;
