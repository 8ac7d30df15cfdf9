use bevy::prelude::*;
use constants::navigation::{MOUSE_SENSITIVITY, TOUCH_LOOK_SENSITIVITY};

/// Raw look input gathered for one frame, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LookInput {
    pub mouse_delta: Vec2,
    pub pointer_locked: bool,
    pub touch_drag: Vec2,
}

/// Turns platform look input into rotation deltas, so the navigation step
/// integrates orientation the same way on every device.
pub trait CameraOrientationSource: Send + Sync {
    fn feed(&mut self, input: &LookInput);

    /// Whether this source currently captures input. Navigation is idle
    /// while it is not.
    fn is_engaged(&self) -> bool;

    /// Accumulated rotation in radians since the last call.
    fn take_look_delta(&mut self) -> Vec2;

    fn name(&self) -> &'static str;
}

/// Desktop: relative mouse motion while the pointer is locked to the canvas.
#[derive(Debug, Clone)]
pub struct PointerLockLook {
    sensitivity: f32,
    engaged: bool,
    pending: Vec2,
}

impl Default for PointerLockLook {
    fn default() -> Self {
        Self {
            sensitivity: MOUSE_SENSITIVITY,
            engaged: false,
            pending: Vec2::ZERO,
        }
    }
}

impl CameraOrientationSource for PointerLockLook {
    fn feed(&mut self, input: &LookInput) {
        self.engaged = input.pointer_locked;
        if self.engaged {
            self.pending += input.mouse_delta * self.sensitivity;
        } else {
            self.pending = Vec2::ZERO;
        }
    }

    fn is_engaged(&self) -> bool {
        self.engaged
    }

    fn take_look_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.pending)
    }

    fn name(&self) -> &'static str {
        "pointer-lock"
    }
}

/// Touch devices: drag on the look half of the screen. Always engaged.
#[derive(Debug, Clone)]
pub struct TouchDragLook {
    sensitivity: f32,
    pending: Vec2,
}

impl Default for TouchDragLook {
    fn default() -> Self {
        Self {
            sensitivity: TOUCH_LOOK_SENSITIVITY,
            pending: Vec2::ZERO,
        }
    }
}

impl CameraOrientationSource for TouchDragLook {
    fn feed(&mut self, input: &LookInput) {
        self.pending += input.touch_drag * self.sensitivity;
    }

    fn is_engaged(&self) -> bool {
        true
    }

    fn take_look_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.pending)
    }

    fn name(&self) -> &'static str {
        "touch-drag"
    }
}

/// The orientation source picked for this device at startup.
#[derive(Resource)]
pub struct LookSource(pub Box<dyn CameraOrientationSource>);

impl LookSource {
    pub fn for_device(touch_capable: bool) -> Self {
        if touch_capable {
            Self(Box::new(TouchDragLook::default()))
        } else {
            Self(Box::new(PointerLockLook::default()))
        }
    }

    pub fn is_touch(&self) -> bool {
        self.0.name() == "touch-drag"
    }
}

impl Default for LookSource {
    fn default() -> Self {
        Self::for_device(detect_touch_capability())
    }
}

#[cfg(target_arch = "wasm32")]
pub fn detect_touch_capability() -> bool {
    web_sys::window()
        .map(|window| window.navigator().max_touch_points() > 0)
        .unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn detect_touch_capability() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_lock_only_rotates_while_locked() {
        let mut source = PointerLockLook::default();
        source.feed(&LookInput {
            mouse_delta: Vec2::new(100.0, 0.0),
            pointer_locked: false,
            ..Default::default()
        });
        assert!(!source.is_engaged());
        assert_eq!(source.take_look_delta(), Vec2::ZERO);

        source.feed(&LookInput {
            mouse_delta: Vec2::new(100.0, -50.0),
            pointer_locked: true,
            ..Default::default()
        });
        assert!(source.is_engaged());
        let delta = source.take_look_delta();
        assert!((delta.x - 100.0 * MOUSE_SENSITIVITY).abs() < 1e-6);
        assert!((delta.y + 50.0 * MOUSE_SENSITIVITY).abs() < 1e-6);
        assert_eq!(source.take_look_delta(), Vec2::ZERO);
    }

    #[test]
    fn touch_drag_is_always_engaged_and_ignores_mouse() {
        let mut source = TouchDragLook::default();
        assert!(source.is_engaged());
        source.feed(&LookInput {
            mouse_delta: Vec2::new(500.0, 500.0),
            pointer_locked: false,
            touch_drag: Vec2::new(10.0, 0.0),
        });
        let delta = source.take_look_delta();
        assert!((delta.x - 10.0 * TOUCH_LOOK_SENSITIVITY).abs() < 1e-6);
        assert_eq!(delta.y, 0.0);
    }

    #[test]
    fn device_capability_selects_source() {
        assert!(LookSource::for_device(true).is_touch());
        assert!(!LookSource::for_device(false).is_touch());
    }
}
