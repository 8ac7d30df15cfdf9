use bevy::prelude::*;
use constants::layout::{ENTRANCE_WALL_Z, HALF_WIDTH};
use constants::navigation::{
    END_MARGIN, ENTRANCE_MARGIN, EYE_HEIGHT, MAX_FRAME_STEP, MAX_PITCH, START_Z, WALK_SPEED,
    WALL_MARGIN,
};

/// Where the visitor stands and looks. Yaw 0 faces down the corridor (-Z).
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, EYE_HEIGHT, START_Z),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl CameraState {
    /// Horizontal facing direction.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Horizontal direction to the visitor's right.
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn to_transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.rotation())
    }
}

/// Walkable box inside the corridor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorridorBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
    pub eye_height: f32,
}

impl CorridorBounds {
    pub fn for_length(corridor_length: f32) -> Self {
        let half = HALF_WIDTH - WALL_MARGIN;
        let max_z = ENTRANCE_MARGIN.min(ENTRANCE_WALL_Z);
        Self {
            min_x: -half,
            max_x: half,
            min_z: (-corridor_length + END_MARGIN).min(max_z),
            max_z,
            eye_height: EYE_HEIGHT,
        }
    }

    pub fn clamp(&self, position: Vec3) -> Vec3 {
        Vec3::new(
            position.x.clamp(self.min_x, self.max_x),
            self.eye_height,
            position.z.clamp(self.min_z, self.max_z),
        )
    }
}

/// Requested movement in the visitor's frame, each axis in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    pub forward: f32,
    pub right: f32,
}

impl MoveIntent {
    /// WASD and arrow keys.
    pub fn from_keys(keys: &ButtonInput<KeyCode>) -> Self {
        let axis = |positive: [KeyCode; 2], negative: [KeyCode; 2]| {
            let pos = positive.iter().any(|k| keys.pressed(*k)) as i32;
            let neg = negative.iter().any(|k| keys.pressed(*k)) as i32;
            (pos - neg) as f32
        };
        Self {
            forward: axis(
                [KeyCode::KeyW, KeyCode::ArrowUp],
                [KeyCode::KeyS, KeyCode::ArrowDown],
            ),
            right: axis(
                [KeyCode::KeyD, KeyCode::ArrowRight],
                [KeyCode::KeyA, KeyCode::ArrowLeft],
            ),
        }
    }

    pub fn combine(self, other: MoveIntent) -> Self {
        Self {
            forward: (self.forward + other.forward).clamp(-1.0, 1.0),
            right: (self.right + other.right).clamp(-1.0, 1.0),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.forward == 0.0 && self.right == 0.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavigationMode {
    #[default]
    Idle,
    /// Input is captured: pointer lock on desktop, always on touch devices.
    Active,
}

/// Per-frame integration of movement and look input.
#[derive(Resource, Debug, Clone)]
pub struct NavigationController {
    pub mode: NavigationMode,
    pub speed: f32,
    pub bounds: CorridorBounds,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self {
            mode: NavigationMode::Idle,
            speed: WALK_SPEED,
            bounds: CorridorBounds::for_length(0.0),
        }
    }
}

impl NavigationController {
    /// Advance the camera by one frame. `look` is a rotation delta in
    /// radians (x turns right, y tilts down). Nothing moves while idle.
    pub fn step(&self, state: &mut CameraState, intent: MoveIntent, look: Vec2, dt: f32) {
        if self.mode == NavigationMode::Idle {
            return;
        }
        let dt = dt.clamp(0.0, MAX_FRAME_STEP);

        state.yaw -= look.x;
        state.pitch = (state.pitch - look.y).clamp(-MAX_PITCH, MAX_PITCH);

        let planar = Vec2::new(intent.right, intent.forward).clamp_length_max(1.0);
        let displacement =
            (state.forward() * planar.y + state.right() * planar.x) * self.speed * dt;

        state.position = self.bounds.clamp(state.position + displacement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn active() -> NavigationController {
        NavigationController {
            mode: NavigationMode::Active,
            bounds: CorridorBounds::for_length(100.0),
            ..Default::default()
        }
    }

    const FORWARD: MoveIntent = MoveIntent {
        forward: 1.0,
        right: 0.0,
    };

    #[test]
    fn idle_controller_ignores_input() {
        let controller = NavigationController::default();
        let mut state = CameraState::default();
        controller.step(&mut state, FORWARD, Vec2::new(0.3, 0.3), 0.05);
        assert_eq!(state, CameraState::default());
    }

    #[test]
    fn forward_walks_down_the_corridor() {
        let controller = active();
        let mut state = CameraState::default();
        controller.step(&mut state, FORWARD, Vec2::ZERO, 0.05);
        assert!((state.position.z - (START_Z - WALK_SPEED * 0.05)).abs() < 1e-5);
        assert_eq!(state.position.x, 0.0);
    }

    #[test]
    fn movement_follows_yaw() {
        let controller = active();
        let mut state = CameraState {
            yaw: -FRAC_PI_2,
            ..Default::default()
        };
        // Yaw -90° faces +X.
        controller.step(&mut state, FORWARD, Vec2::ZERO, 0.05);
        assert!(state.position.x > 0.29);
        assert!((state.position.z - START_Z).abs() < 1e-5);
    }

    #[test]
    fn long_frames_are_clamped() {
        let controller = active();
        let mut state = CameraState::default();
        controller.step(&mut state, FORWARD, Vec2::ZERO, 5.0);
        let travelled = START_Z - state.position.z;
        assert!((travelled - WALK_SPEED * MAX_FRAME_STEP).abs() < 1e-5);
    }

    #[test]
    fn diagonal_is_not_faster() {
        let controller = active();
        let mut state = CameraState::default();
        let diagonal = MoveIntent {
            forward: 1.0,
            right: 1.0,
        };
        controller.step(&mut state, diagonal, Vec2::ZERO, 0.1);
        let travelled = state.position.distance(CameraState::default().position);
        assert!((travelled - WALK_SPEED * 0.1).abs() < 1e-4);
    }

    #[test]
    fn pitch_is_limited() {
        let controller = active();
        let mut state = CameraState::default();
        controller.step(&mut state, MoveIntent::default(), Vec2::new(0.0, -10.0), 0.016);
        assert_eq!(state.pitch, MAX_PITCH);
        controller.step(&mut state, MoveIntent::default(), Vec2::new(0.0, 20.0), 0.016);
        assert_eq!(state.pitch, -MAX_PITCH);
    }

    #[test]
    fn position_stays_inside_corridor() {
        let controller = active();
        let bounds = controller.bounds;
        let mut state = CameraState {
            position: Vec3::new(bounds.max_x - 0.01, EYE_HEIGHT, bounds.min_z + 0.01),
            ..Default::default()
        };
        for _ in 0..50 {
            controller.step(
                &mut state,
                MoveIntent {
                    forward: 1.0,
                    right: 1.0,
                },
                Vec2::ZERO,
                0.1,
            );
        }
        assert_eq!(state.position.x, bounds.max_x);
        assert_eq!(state.position.z, bounds.min_z);
        assert_eq!(state.position.y, EYE_HEIGHT);

        for _ in 0..400 {
            controller.step(
                &mut state,
                MoveIntent {
                    forward: -1.0,
                    right: -1.0,
                },
                Vec2::ZERO,
                0.1,
            );
        }
        assert_eq!(state.position.x, bounds.min_x);
        assert_eq!(state.position.z, bounds.max_z);
    }

    #[test]
    fn bounds_track_corridor_length() {
        let bounds = CorridorBounds::for_length(60.0);
        assert_eq!(bounds.min_z, -60.0 + END_MARGIN);
        assert_eq!(bounds.max_z, ENTRANCE_MARGIN);
        assert_eq!(bounds.max_x, HALF_WIDTH - WALL_MARGIN);
    }

    #[test]
    fn transform_looks_along_forward() {
        let state = CameraState {
            yaw: 0.7,
            ..Default::default()
        };
        let look = state.to_transform().forward();
        assert!(look.dot(state.forward()) > 0.999);
    }
}
