//! First-person walkthrough camera.
//!
//! Input from the keyboard, the locked pointer or the touch screen is turned
//! into a per-frame navigation step that keeps the visitor inside the
//! corridor.

/// Camera spawn and the systems feeding input into navigation.
pub mod controller;

/// Pure movement integration and corridor bounds.
pub mod navigation;

/// Pointer-lock and touch-drag look providers behind one interface.
pub mod orientation;

/// Virtual joystick and touch look split.
pub mod touch;

use bevy::prelude::*;

/// Marks the walkthrough camera entity.
#[derive(Component)]
pub struct MuseumCamera;
