use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Pointer and movement input gathered once per frame for the camera controllers.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct RigInput {
    /// Cursor motion in pixels since the last frame.
    pub cursor_delta: Vec2,
    pub primary_held: bool,
    pub secondary_held: bool,
    /// Wheel notches, positive when scrolling away from the user.
    pub scroll: f32,
    /// Planar movement request: x is right, y is forward.
    pub movement: Vec2,
    pub sprint: bool,
    pub viewport_height: f32,
}

pub fn gather_rig_input(
    mut input: ResMut<RigInput>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    input.cursor_delta = mouse_motion.read().map(|motion| motion.delta).sum();
    input.primary_held = mouse_button.pressed(MouseButton::Left);
    input.secondary_held = mouse_button.pressed(MouseButton::Right);

    input.scroll = scroll_events
        .read()
        .map(|event| match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y * 0.05,
        })
        .sum();

    let mut movement = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        movement.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        movement.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        movement.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        movement.x -= 1.0;
    }
    input.movement = movement;
    input.sprint = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);

    if let Ok(window) = windows.single() {
        input.viewport_height = window.height();
    }
}
