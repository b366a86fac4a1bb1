use bevy::prelude::*;
use constants::train::MAX_SPEED;
use serde::{Deserialize, Serialize};

use crate::engine::assets::scene_config::SceneConfig;

/// User-facing scene settings. Mutated only through [`ControlEvent`]s.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPanel {
    pub train_light: bool,
    pub lamp_lights: bool,
    pub train_speed: f32,
    pub day_speed: f32,
    pub water_level: f32,
    pub shadows: bool,
    pub camera: u8,
}

/// A single change request from the keyboard or the browser bridge.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    SetTrainLight(bool),
    ToggleTrainLight,
    SetLampLights(bool),
    ToggleLampLights,
    SetTrainSpeed(f32),
    AdjustTrainSpeed(f32),
    SetDaySpeed(f32),
    AdjustDaySpeed(f32),
    SetWaterLevel(f32),
    AdjustWaterLevel(f32),
    SetShadows(bool),
    ToggleShadows,
    SelectCamera(u8),
}

impl ControlPanel {
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            train_light: config.train_light,
            lamp_lights: config.lamp_lights,
            train_speed: config.train_speed.clamp(-MAX_SPEED, MAX_SPEED),
            day_speed: config.day_speed,
            water_level: config.water_level,
            shadows: config.shadows,
            camera: config.initial_camera,
        }
    }

    /// Apply `event`, returning whether anything changed.
    pub fn apply(&mut self, event: ControlEvent) -> bool {
        let before = self.clone();
        match event {
            ControlEvent::SetTrainLight(on) => self.train_light = on,
            ControlEvent::ToggleTrainLight => self.train_light = !self.train_light,
            ControlEvent::SetLampLights(on) => self.lamp_lights = on,
            ControlEvent::ToggleLampLights => self.lamp_lights = !self.lamp_lights,
            ControlEvent::SetTrainSpeed(speed) => self.train_speed = speed.clamp(-MAX_SPEED, MAX_SPEED),
            ControlEvent::AdjustTrainSpeed(delta) => {
                self.train_speed = (self.train_speed + delta).clamp(-MAX_SPEED, MAX_SPEED)
            }
            ControlEvent::SetDaySpeed(speed) => self.day_speed = speed,
            ControlEvent::AdjustDaySpeed(delta) => self.day_speed += delta,
            ControlEvent::SetWaterLevel(level) => self.water_level = level,
            ControlEvent::AdjustWaterLevel(delta) => self.water_level += delta,
            ControlEvent::SetShadows(on) => self.shadows = on,
            ControlEvent::ToggleShadows => self.shadows = !self.shadows,
            ControlEvent::SelectCamera(slot) => self.camera = slot,
        }
        *self != before
    }
}

/// Drain queued control events into the panel.
///
/// The panel is only marked changed when an event actually altered it.
pub fn apply_control_events(mut events: EventReader<ControlEvent>, mut panel: ResMut<ControlPanel>) {
    let mut next = panel.clone();
    let mut changed = false;
    for event in events.read() {
        if next.apply(*event) {
            debug!("Control {:?}", event);
            changed = true;
        }
    }
    if changed {
        info!(
            "Controls: speed {:.0}, day speed {:.0}, water {:.1}, camera {}",
            next.train_speed, next.day_speed, next.water_level, next.camera
        );
        *panel = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn panel() -> ControlPanel {
        ControlPanel::from_config(&SceneConfig::default())
    }

    #[test]
    fn speed_is_clamped_in_both_directions() {
        let mut panel = panel();
        panel.apply(ControlEvent::SetTrainSpeed(400.0));
        assert_eq!(panel.train_speed, MAX_SPEED);
        for _ in 0..100 {
            panel.apply(ControlEvent::AdjustTrainSpeed(-5.0));
        }
        assert_eq!(panel.train_speed, -MAX_SPEED);
    }

    #[test]
    fn toggles_flip_and_report_changes() {
        let mut panel = panel();
        let lights = panel.train_light;
        assert!(panel.apply(ControlEvent::ToggleTrainLight));
        assert_eq!(panel.train_light, !lights);
        assert!(panel.apply(ControlEvent::ToggleTrainLight));
        assert_eq!(panel.train_light, lights);
    }

    #[test]
    fn redundant_events_report_no_change() {
        let mut panel = panel();
        let shadows = panel.shadows;
        assert!(!panel.apply(ControlEvent::SetShadows(shadows)));
        assert!(!panel.apply(ControlEvent::SelectCamera(panel.camera)));
        assert!(!panel.apply(ControlEvent::AdjustWaterLevel(0.0)));
    }

    #[test]
    fn events_reach_the_panel_through_the_system() {
        let mut world = World::new();
        world.init_resource::<Events<ControlEvent>>();
        world.insert_resource(panel());

        world.send_event(ControlEvent::AdjustTrainSpeed(5.0));
        world.send_event(ControlEvent::SelectCamera(3));
        world.send_event(ControlEvent::AdjustWaterLevel(-1.0));
        world.run_system_once(apply_control_events).unwrap();

        let expected = panel();
        let panel = world.resource::<ControlPanel>();
        assert_eq!(panel.train_speed, expected.train_speed + 5.0);
        assert_eq!(panel.camera, 3);
        assert_eq!(panel.water_level, expected.water_level - 1.0);
    }
}
