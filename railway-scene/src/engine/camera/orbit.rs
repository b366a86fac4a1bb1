use std::f32::consts::PI;

use bevy::prelude::*;
use constants::camera::{FIELD_OF_VIEW_DEGREES, ORBIT_DAMPING, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE};

use super::input::RigInput;

const POLAR_EPSILON: f32 = 1e-4;
const TARGET_FPS: f32 = 60.0;

/// Orbit camera around a target point in spherical coordinates.
///
/// Left drag rotates with damped inertia, right drag pans the target and the
/// wheel zooms.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitController {
    pub enabled: bool,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping_factor: f32,
    pub enable_damping: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    pub fov_degrees: f32,

    pub target: Vec3,
    pub radius: f32,
    /// Azimuth around +Y, measured from +Z towards +X.
    pub theta: f32,
    /// Polar angle from +Y.
    pub phi: f32,

    rotate_delta: Vec2,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self {
            enabled: false,
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            pan_speed: 1.0,
            damping_factor: ORBIT_DAMPING,
            enable_damping: true,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            fov_degrees: FIELD_OF_VIEW_DEGREES,
            target: Vec3::ZERO,
            radius: 100.0,
            theta: 0.0,
            phi: PI / 2.0,
            rotate_delta: Vec2::ZERO,
        }
    }
}

impl OrbitController {
    /// Orbit `target` from the current camera `position` without moving the camera.
    pub fn retarget(&mut self, position: Vec3, target: Vec3) {
        let offset = position - target;
        self.target = target;
        self.radius = offset.length().clamp(self.min_distance, self.max_distance);
        self.theta = offset.x.atan2(offset.z);
        self.phi = (offset.y / offset.length().max(f32::EPSILON))
            .clamp(-1.0, 1.0)
            .acos()
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.rotate_delta = Vec2::ZERO;
    }

    /// Pending rotation still to be released by damping.
    pub fn pending_rotation(&self) -> Vec2 {
        self.rotate_delta
    }

    /// Advance the controller by `dt`. Input is only read while `input` is given.
    pub fn update(&mut self, input: Option<&RigInput>, dt: f32) {
        let screen_height = input.map_or(1.0, |input| input.viewport_height.max(1.0));

        if let Some(input) = input.filter(|input| input.primary_held) {
            let rotate_per_pixel = 2.0 * PI / screen_height;
            self.rotate_delta -= input.cursor_delta * rotate_per_pixel * self.rotate_speed;
        }

        if self.enable_damping {
            let retention = (1.0 - self.damping_factor).powf(dt * TARGET_FPS);
            let applied = self.rotate_delta * (1.0 - retention);
            self.theta += applied.x;
            self.phi += applied.y;
            self.rotate_delta *= retention;
        } else {
            self.theta += self.rotate_delta.x;
            self.phi += self.rotate_delta.y;
            self.rotate_delta = Vec2::ZERO;
        }
        self.phi = self.phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        let Some(input) = input else {
            return;
        };

        if input.scroll != 0.0 {
            let scale = (1.0 - self.zoom_speed).powf(input.scroll.abs());
            if input.scroll > 0.0 {
                self.radius *= scale;
            } else {
                self.radius /= scale;
            }
            self.radius = self.radius.clamp(self.min_distance, self.max_distance);
        }

        if input.secondary_held && input.cursor_delta != Vec2::ZERO {
            let half_fov = self.fov_degrees.to_radians() / 2.0;
            let pixels_to_world = 2.0 * self.radius * half_fov.tan() / screen_height;

            let forward = -self.direction();
            let right = forward.cross(Vec3::Y).normalize_or_zero();
            let up = right.cross(forward).normalize_or_zero();
            self.target += (right * -input.cursor_delta.x + up * input.cursor_delta.y)
                * pixels_to_world
                * self.pan_speed;
        }
    }

    /// Camera position for the current spherical coordinates.
    pub fn position(&self) -> Vec3 {
        self.target + self.direction() * self.radius
    }

    pub fn apply(&self, camera: &mut Transform) {
        camera.translation = self.position();
        camera.look_at(self.target, Vec3::Y);
    }

    fn direction(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(delta: Vec2) -> RigInput {
        RigInput {
            cursor_delta: delta,
            primary_held: true,
            viewport_height: 800.0,
            ..default()
        }
    }

    #[test]
    fn retarget_keeps_the_camera_in_place() {
        let mut orbit = OrbitController::default();
        let position = Vec3::new(300.0, 100.0, 300.0);
        let target = Vec3::new(0.0, 60.0, 0.0);
        orbit.retarget(position, target);
        assert!(orbit.position().distance(position) < 1e-2);
        assert_eq!(orbit.target, target);
    }

    #[test]
    fn damped_rotation_is_released_over_several_frames() {
        let mut orbit = OrbitController::default();
        orbit.retarget(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO);
        let theta_before = orbit.theta;

        orbit.update(Some(&drag(Vec2::new(-40.0, 0.0))), 1.0 / 60.0);
        let first_step = orbit.theta - theta_before;
        assert!(first_step > 0.0);
        assert!(orbit.pending_rotation().x > 0.0);

        for _ in 0..600 {
            orbit.update(None, 1.0 / 60.0);
        }
        let total = 2.0 * PI / 800.0 * 40.0;
        assert!((orbit.theta - theta_before - total).abs() < 1e-3);
        assert!(orbit.pending_rotation().length() < 1e-6);
    }

    #[test]
    fn polar_angle_never_flips_over_the_pole() {
        let mut orbit = OrbitController {
            enable_damping: false,
            ..default()
        };
        orbit.update(Some(&drag(Vec2::new(0.0, 5_000.0))), 0.016);
        assert!(orbit.phi >= POLAR_EPSILON);
        orbit.update(Some(&drag(Vec2::new(0.0, -50_000.0))), 0.016);
        assert!(orbit.phi <= PI - POLAR_EPSILON);
    }

    #[test]
    fn zoom_is_clamped_to_the_distance_range() {
        let mut orbit = OrbitController::default();
        let zoom_in = RigInput {
            scroll: 500.0,
            viewport_height: 800.0,
            ..default()
        };
        orbit.update(Some(&zoom_in), 0.016);
        assert_eq!(orbit.radius, ORBIT_MIN_DISTANCE);

        let zoom_out = RigInput {
            scroll: -5_000.0,
            viewport_height: 800.0,
            ..default()
        };
        orbit.update(Some(&zoom_out), 0.016);
        assert_eq!(orbit.radius, ORBIT_MAX_DISTANCE);
    }

    #[test]
    fn pan_moves_the_target_sideways() {
        let mut orbit = OrbitController::default();
        orbit.retarget(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO);
        let pan = RigInput {
            cursor_delta: Vec2::new(-10.0, 0.0),
            secondary_held: true,
            viewport_height: 800.0,
            ..default()
        };
        orbit.update(Some(&pan), 0.016);
        assert!(orbit.target.x > 0.0);
        assert!(orbit.target.y.abs() < 1e-4);
        assert!(orbit.target.z.abs() < 1e-4);
    }
}
