use bevy::math::EulerRot;
use bevy::prelude::*;
use constants::camera::{LOOK_SENSITIVITY, MAX_PITCH, WALK_SPEED};

use super::input::RigInput;

/// Walk-around camera: mouse look while the right button is held, WASD on the ground plane.
#[derive(Debug, Clone, PartialEq)]
pub struct FirstPersonController {
    pub enabled: bool,
    pub yaw: f32,
    pub pitch: f32,
    pub move_speed: f32,
    pub sprint_multiplier: f32,
    pub look_sensitivity: f32,
}

impl Default for FirstPersonController {
    fn default() -> Self {
        Self {
            enabled: false,
            yaw: 0.0,
            pitch: 0.0,
            move_speed: WALK_SPEED,
            sprint_multiplier: 3.5,
            look_sensitivity: LOOK_SENSITIVITY,
        }
    }
}

impl FirstPersonController {
    /// Take over yaw and pitch from the camera's current orientation.
    pub fn align(&mut self, camera: &Transform) {
        let (yaw, pitch, _) = camera.rotation.to_euler(EulerRot::YXZ);
        self.yaw = yaw;
        self.pitch = pitch.clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn update(&mut self, input: &RigInput, dt: f32, camera: &mut Transform) {
        if input.secondary_held && input.cursor_delta != Vec2::ZERO {
            self.yaw -= input.cursor_delta.x * self.look_sensitivity;
            self.pitch = (self.pitch - input.cursor_delta.y * self.look_sensitivity)
                .clamp(-MAX_PITCH, MAX_PITCH);
        }
        camera.rotation = self.rotation();

        if input.movement != Vec2::ZERO {
            // Movement ignores pitch so the walker stays on the ground plane.
            let heading = Quat::from_rotation_y(self.yaw);
            let forward = heading * Vec3::NEG_Z;
            let right = heading * Vec3::X;
            let mut speed = self.move_speed;
            if input.sprint {
                speed *= self.sprint_multiplier;
            }
            let direction = (right * input.movement.x + forward * input.movement.y).normalize_or_zero();
            camera.translation += direction * speed * dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_clamped() {
        let mut walker = FirstPersonController::default();
        let mut camera = Transform::default();
        let look_up = RigInput {
            cursor_delta: Vec2::new(0.0, -10_000.0),
            secondary_held: true,
            ..default()
        };
        walker.update(&look_up, 0.016, &mut camera);
        assert_eq!(walker.pitch, MAX_PITCH);
    }

    #[test]
    fn looking_requires_the_right_button() {
        let mut walker = FirstPersonController::default();
        let mut camera = Transform::default();
        let hover = RigInput {
            cursor_delta: Vec2::new(50.0, 20.0),
            ..default()
        };
        walker.update(&hover, 0.016, &mut camera);
        assert_eq!((walker.yaw, walker.pitch), (0.0, 0.0));
    }

    #[test]
    fn walking_stays_level_while_looking_down() {
        let mut walker = FirstPersonController {
            pitch: -1.0,
            ..default()
        };
        let mut camera = Transform::from_xyz(0.0, 10.0, 0.0);
        let forward = RigInput {
            movement: Vec2::Y,
            ..default()
        };
        walker.update(&forward, 1.0, &mut camera);
        assert!((camera.translation.y - 10.0).abs() < 1e-5);
        assert!(camera.translation.distance(Vec3::new(0.0, 10.0, -WALK_SPEED)) < 1e-3);
    }

    #[test]
    fn align_recovers_yaw_and_pitch() {
        let camera = Transform::from_xyz(0.0, 0.0, 0.0).looking_to(Vec3::new(1.0, -0.5, 0.0), Vec3::Y);
        let mut walker = FirstPersonController::default();
        walker.align(&camera);
        assert!(walker.rotation().angle_between(camera.rotation) < 1e-4);
    }
}
