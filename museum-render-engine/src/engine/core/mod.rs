//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, state transitions,
//! launch parameters and the wallet session pushed by the host page.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app and schedules every system against the app state.
pub mod app_setup;

/// Application state machine: loading, entrance card, walkthrough.
pub mod app_state;

/// API base and `sectionId` deep link.
pub mod launch_config;

/// Wallet session reported by the host page.
pub mod session;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
