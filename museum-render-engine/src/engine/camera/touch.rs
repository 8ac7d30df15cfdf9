use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::navigation::{JOYSTICK_DEAD_ZONE, JOYSTICK_RADIUS};

use super::navigation::MoveIntent;

#[derive(Debug, Clone, Copy, PartialEq)]
struct JoystickTouch {
    id: u64,
    origin: Vec2,
    current: Vec2,
}

/// Touch split: a finger landing on the left half drives the virtual
/// joystick, one landing on the right half drags the view.
#[derive(Resource, Debug, Default)]
pub struct TouchControls {
    joystick: Option<JoystickTouch>,
    look_touch: Option<u64>,
}

impl TouchControls {
    pub fn begin(&mut self, id: u64, position: Vec2, screen_width: f32) {
        if position.x < screen_width * 0.5 {
            if self.joystick.is_none() {
                self.joystick = Some(JoystickTouch {
                    id,
                    origin: position,
                    current: position,
                });
            }
        } else if self.look_touch.is_none() {
            self.look_touch = Some(id);
        }
    }

    pub fn moved(&mut self, id: u64, position: Vec2) {
        if let Some(joystick) = self.joystick.as_mut().filter(|j| j.id == id) {
            joystick.current = position;
        }
    }

    pub fn end(&mut self, id: u64) {
        if self.joystick.is_some_and(|j| j.id == id) {
            self.joystick = None;
        }
        if self.look_touch == Some(id) {
            self.look_touch = None;
        }
    }

    pub fn is_look_touch(&self, id: u64) -> bool {
        self.look_touch == Some(id)
    }

    pub fn move_intent(&self) -> MoveIntent {
        self.joystick
            .map(|j| joystick_intent(j.origin, j.current))
            .unwrap_or_default()
    }

    /// Joystick base centre and knob position, when a thumb is down.
    pub fn joystick(&self) -> Option<(Vec2, Vec2)> {
        self.joystick.map(|j| {
            let offset = (j.current - j.origin).clamp_length_max(JOYSTICK_RADIUS);
            (j.origin, j.origin + offset)
        })
    }
}

/// Joystick deflection as a movement intent. Screen Y grows downwards, so
/// pushing up walks forward.
pub fn joystick_intent(origin: Vec2, current: Vec2) -> MoveIntent {
    let deflection = (current - origin).clamp_length_max(JOYSTICK_RADIUS) / JOYSTICK_RADIUS;
    if deflection.length() < JOYSTICK_DEAD_ZONE {
        return MoveIntent::default();
    }
    MoveIntent {
        forward: -deflection.y,
        right: deflection.x,
    }
}

/// Track touches into `TouchControls` and return this frame's look drag.
pub fn read_touches(
    touches: &Touches,
    controls: &mut TouchControls,
    screen_width: f32,
) -> Vec2 {
    for touch in touches.iter_just_pressed() {
        controls.begin(touch.id(), touch.position(), screen_width);
    }

    let mut drag = Vec2::ZERO;
    for touch in touches.iter() {
        controls.moved(touch.id(), touch.position());
        if controls.is_look_touch(touch.id()) {
            drag += touch.delta();
        }
    }

    for touch in touches
        .iter_just_released()
        .chain(touches.iter_just_canceled())
    {
        controls.end(touch.id());
    }
    drag
}

#[derive(Component)]
pub struct JoystickBase;

#[derive(Component)]
pub struct JoystickKnob;

const KNOB_SIZE: f32 = 44.0;

pub fn spawn_joystick_overlay(mut commands: Commands) {
    let base_size = JOYSTICK_RADIUS * 2.0;
    commands.spawn((
        JoystickBase,
        Node {
            position_type: PositionType::Absolute,
            width: Val::Px(base_size),
            height: Val::Px(base_size),
            ..default()
        },
        BorderRadius::MAX,
        BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.12)),
        Visibility::Hidden,
    ));
    commands.spawn((
        JoystickKnob,
        Node {
            position_type: PositionType::Absolute,
            width: Val::Px(KNOB_SIZE),
            height: Val::Px(KNOB_SIZE),
            ..default()
        },
        BorderRadius::MAX,
        BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.35)),
        Visibility::Hidden,
    ));
}

pub fn update_joystick_overlay(
    controls: Res<TouchControls>,
    mut base: Query<(&mut Node, &mut Visibility), (With<JoystickBase>, Without<JoystickKnob>)>,
    mut knob: Query<(&mut Node, &mut Visibility), (With<JoystickKnob>, Without<JoystickBase>)>,
) {
    if !controls.is_changed() {
        return;
    }
    let joystick = controls.joystick();

    if let Ok((mut node, mut visibility)) = base.single_mut() {
        place(&mut node, &mut visibility, joystick.map(|(c, _)| c), JOYSTICK_RADIUS);
    }
    if let Ok((mut node, mut visibility)) = knob.single_mut() {
        place(&mut node, &mut visibility, joystick.map(|(_, k)| k), KNOB_SIZE * 0.5);
    }
}

fn place(node: &mut Node, visibility: &mut Visibility, centre: Option<Vec2>, half: f32) {
    match centre {
        Some(centre) => {
            node.left = Val::Px(centre.x - half);
            node.top = Val::Px(centre.y - half);
            *visibility = Visibility::Visible;
        }
        None => *visibility = Visibility::Hidden,
    }
}

/// Logical width of the primary window.
pub fn screen_width(window: &Query<&Window, With<PrimaryWindow>>) -> f32 {
    window.single().map(Window::width).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_deflection_is_ignored() {
        let intent = joystick_intent(Vec2::ZERO, Vec2::new(JOYSTICK_RADIUS * 0.05, 0.0));
        assert!(intent.is_idle());
    }

    #[test]
    fn pushing_up_walks_forward_at_full_speed() {
        let intent = joystick_intent(Vec2::new(100.0, 300.0), Vec2::new(100.0, 0.0));
        assert!((intent.forward - 1.0).abs() < 1e-5);
        assert_eq!(intent.right, 0.0);
    }

    #[test]
    fn halves_of_the_screen_have_separate_roles() {
        let mut controls = TouchControls::default();
        controls.begin(1, Vec2::new(100.0, 500.0), 800.0);
        controls.begin(2, Vec2::new(600.0, 500.0), 800.0);
        // A second thumb on the left does not steal the joystick.
        controls.begin(3, Vec2::new(50.0, 50.0), 800.0);

        assert!(controls.is_look_touch(2));
        assert!(!controls.is_look_touch(1));

        controls.moved(1, Vec2::new(100.0 + JOYSTICK_RADIUS, 500.0));
        let intent = controls.move_intent();
        assert_eq!(intent.right, 1.0);
        assert_eq!(intent.forward, 0.0);

        controls.moved(3, Vec2::new(0.0, 0.0));
        assert_eq!(controls.move_intent().right, 1.0);

        controls.end(1);
        assert!(controls.move_intent().is_idle());
        assert!(controls.joystick().is_none());
        controls.end(2);
        assert!(!controls.is_look_touch(2));
    }

    #[test]
    fn knob_stays_on_the_base_rim() {
        let mut controls = TouchControls::default();
        controls.begin(7, Vec2::new(100.0, 100.0), 1000.0);
        controls.moved(7, Vec2::new(100.0, 100.0 + JOYSTICK_RADIUS * 3.0));
        let (base, knob) = controls.joystick().unwrap();
        assert!((knob.distance(base) - JOYSTICK_RADIUS).abs() < 1e-3);
        assert!((controls.move_intent().forward + 1.0).abs() < 1e-5);
    }
}
