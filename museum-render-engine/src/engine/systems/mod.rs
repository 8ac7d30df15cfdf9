//! Runtime systems around the walkthrough: overlays and diagnostics.

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to the host page via RPC and updates the native overlay.
pub mod fps_tracking;

/// Entrance card, crosshair, pause overlay, section label and plaque panel.
pub mod hud;
