use bevy::prelude::*;
use constants::train::SPEED_STEP;

use super::control_panel::ControlEvent;

const DIGIT_KEYS: [KeyCode; 10] = [
    KeyCode::Digit0,
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Control event bound to a single key press, if any.
pub fn shortcut(key: KeyCode) -> Option<ControlEvent> {
    let event = match key {
        KeyCode::KeyT => ControlEvent::ToggleTrainLight,
        KeyCode::KeyL => ControlEvent::ToggleLampLights,
        KeyCode::KeyZ => ControlEvent::AdjustTrainSpeed(-SPEED_STEP),
        KeyCode::KeyX => ControlEvent::AdjustTrainSpeed(SPEED_STEP),
        KeyCode::KeyC => ControlEvent::AdjustDaySpeed(-1.0),
        KeyCode::KeyV => ControlEvent::AdjustDaySpeed(1.0),
        KeyCode::KeyR => ControlEvent::AdjustWaterLevel(1.0),
        KeyCode::KeyF => ControlEvent::AdjustWaterLevel(-1.0),
        KeyCode::KeyP => ControlEvent::ToggleShadows,
        _ => {
            let slot = DIGIT_KEYS.iter().position(|&digit| digit == key)?;
            ControlEvent::SelectCamera(slot as u8)
        }
    };
    Some(event)
}

pub fn keyboard_shortcuts(keyboard: Res<ButtonInput<KeyCode>>, mut events: EventWriter<ControlEvent>) {
    for key in keyboard.get_just_pressed() {
        if let Some(event) = shortcut(*key) {
            events.write(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_select_their_camera_slot() {
        assert_eq!(shortcut(KeyCode::Digit0), Some(ControlEvent::SelectCamera(0)));
        assert_eq!(shortcut(KeyCode::Digit7), Some(ControlEvent::SelectCamera(7)));
        assert_eq!(shortcut(KeyCode::Digit9), Some(ControlEvent::SelectCamera(9)));
    }

    #[test]
    fn speed_keys_step_by_five() {
        assert_eq!(shortcut(KeyCode::KeyZ), Some(ControlEvent::AdjustTrainSpeed(-5.0)));
        assert_eq!(shortcut(KeyCode::KeyX), Some(ControlEvent::AdjustTrainSpeed(5.0)));
    }

    #[test]
    fn walking_keys_are_not_shortcuts() {
        for key in [KeyCode::KeyW, KeyCode::KeyA, KeyCode::KeyS, KeyCode::KeyD] {
            assert_eq!(shortcut(key), None);
        }
    }
}
