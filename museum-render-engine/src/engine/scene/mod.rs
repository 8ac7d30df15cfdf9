//! Corridor scene: static shell, mounted exhibits and lighting.
//!
//! The shell is rebuilt only when the corridor length changes; exhibits and
//! section arches come and go with proximity mount events.

/// Floor, ceiling, walls, trims, light fixtures and carpets.
pub mod corridor;

/// Exhibit screens, plaques and section arches spawned on mount.
pub mod exhibits;

/// Ambient fill and the lights that travel with the camera.
pub mod lights;

/// Deterministic wall decorations.
pub mod ornaments;

/// Procedurally painted tile textures.
///
/// Painted once at startup and tiled by UV repeat.
pub mod textures;
