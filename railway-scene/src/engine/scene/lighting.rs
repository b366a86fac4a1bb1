//! Sun, ambient light and sky colour driven by a day/night cycle.
use bevy::pbr::CascadeShadowConfigBuilder;
use bevy::prelude::*;
use constants::lighting::{
    AMBIENT_BRIGHTNESS, AMBIENT_COLOR, DAY_SKY_COLOR, LIGHT_OFF_COLOR, LIGHT_ON_COLOR, MAX_GRADIENT_ANGLE,
    NIGHT_AMBIENT_BRIGHTNESS, NIGHT_SKY_COLOR, SUN_AZIMUTH_DEGREES, SUN_DISTANCE, SUN_ILLUMINANCE,
    SUN_LIGHT_COLOR_GRADIENT,
};

use super::nodes::{NodeRegistry, SceneNode, spawn_named};
use crate::constants::render_settings::{SHADOW_FIRST_CASCADE_FAR_BOUND, SHADOW_MAX_DISTANCE};
use crate::controls::ControlPanel;

/// Shared off/on materials for every light bulb in the scene.
#[derive(Resource, Clone)]
pub struct LightMaterials {
    pub off: Handle<StandardMaterial>,
    pub on: Handle<StandardMaterial>,
    pub on_color: Color,
}

impl LightMaterials {
    pub fn new(materials: &mut Assets<StandardMaterial>) -> Self {
        let [r, g, b] = LIGHT_OFF_COLOR;
        let off = materials.add(StandardMaterial {
            base_color: Color::srgb_u8(r, g, b),
            perceptual_roughness: 0.4,
            ..default()
        });
        let [r, g, b] = LIGHT_ON_COLOR;
        let on_color = Color::srgb_u8(r, g, b);
        let on = materials.add(StandardMaterial {
            base_color: on_color,
            emissive: on_color.to_linear() * 8.0,
            ..default()
        });
        Self { off, on, on_color }
    }

    pub fn for_state(&self, on: bool) -> Handle<StandardMaterial> {
        if on { self.on.clone() } else { self.off.clone() }
    }
}

/// Sun polar angle in degrees; 0 is the zenith.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct DayCycle {
    pub angle: f32,
}

impl DayCycle {
    pub fn new(angle: f32) -> Self {
        Self {
            angle: angle.rem_euclid(360.0),
        }
    }

    pub fn advance(&mut self, degrees_per_second: f32, dt: f32) {
        self.angle = (self.angle + degrees_per_second * dt).rem_euclid(360.0);
    }

    /// 1 in full daylight, 0 at night, blended around the horizon.
    pub fn daylight(&self) -> f32 {
        let elevation = self.angle.to_radians().cos();
        let t = ((elevation + 0.1) / 0.3).clamp(0.0, 1.0);
        t * t * (3.0 - 2.0 * t)
    }
}

#[derive(Component)]
pub struct Sun;

/// Unit vector from the origin towards the sun.
pub fn sun_direction(angle: f32) -> Vec3 {
    let phi = angle.to_radians();
    let theta = SUN_AZIMUTH_DEGREES.to_radians();
    Vec3::new(phi.sin() * theta.sin(), phi.cos(), phi.sin() * theta.cos())
}

/// Gradient colour while the sun is within `MAX_GRADIENT_ANGLE` of the zenith,
/// `None` otherwise so the last colour is kept through the night.
pub fn sun_color(angle: f32) -> Option<[u8; 3]> {
    let angle = angle.rem_euclid(360.0);
    let step = MAX_GRADIENT_ANGLE / SUN_LIGHT_COLOR_GRADIENT.len() as f32;
    let from_zenith = if angle < MAX_GRADIENT_ANGLE {
        angle
    } else if angle > 360.0 - MAX_GRADIENT_ANGLE {
        360.0 - angle
    } else {
        return None;
    };
    let index = ((from_zenith / step).floor() as usize).min(SUN_LIGHT_COLOR_GRADIENT.len() - 1);
    Some(SUN_LIGHT_COLOR_GRADIENT[index])
}

fn sun_transform(angle: f32) -> Transform {
    // The sun stays in the XY plane, so Z is never parallel to the view direction.
    Transform::from_translation(sun_direction(angle) * SUN_DISTANCE).looking_at(Vec3::ZERO, Vec3::Z)
}

fn blend(from: [u8; 3], to: [u8; 3], t: f32) -> Color {
    let from = Color::srgb_u8(from[0], from[1], from[2]).to_srgba();
    let to = Color::srgb_u8(to[0], to[1], to[2]).to_srgba();
    Color::srgb(
        from.red + (to.red - from.red) * t,
        from.green + (to.green - from.green) * t,
        from.blue + (to.blue - from.blue) * t,
    )
}

pub fn spawn_sun(commands: &mut Commands, registry: &mut NodeRegistry, cycle: DayCycle, shadows: bool) {
    let [r, g, b] = sun_color(cycle.angle).unwrap_or(SUN_LIGHT_COLOR_GRADIENT[0]);
    let cascades = CascadeShadowConfigBuilder {
        maximum_distance: SHADOW_MAX_DISTANCE,
        first_cascade_far_bound: SHADOW_FIRST_CASCADE_FAR_BOUND,
        ..default()
    }
    .build();

    spawn_named(
        commands,
        registry,
        SceneNode::Sun,
        (
            DirectionalLight {
                color: Color::srgb_u8(r, g, b),
                illuminance: SUN_ILLUMINANCE * cycle.daylight(),
                shadows_enabled: shadows,
                ..default()
            },
            cascades,
            sun_transform(cycle.angle),
            Sun,
        ),
    );

    let [r, g, b] = AMBIENT_COLOR;
    commands.insert_resource(AmbientLight {
        color: Color::srgb_u8(r, g, b),
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });
    commands.insert_resource(ClearColor(blend(NIGHT_SKY_COLOR, DAY_SKY_COLOR, cycle.daylight())));
}

pub fn advance_day_cycle(time: Res<Time>, panel: Res<ControlPanel>, mut cycle: ResMut<DayCycle>) {
    if panel.day_speed != 0.0 {
        cycle.advance(panel.day_speed, time.delta_secs());
    }
}

pub fn update_sun(
    cycle: Res<DayCycle>,
    panel: Res<ControlPanel>,
    mut ambient: ResMut<AmbientLight>,
    mut clear_color: ResMut<ClearColor>,
    mut sun: Query<(&mut DirectionalLight, &mut Transform), With<Sun>>,
) -> Result {
    if !cycle.is_changed() && !panel.is_changed() {
        return Ok(());
    }
    let (mut light, mut transform) = sun.single_mut()?;
    let daylight = cycle.daylight();

    *transform = sun_transform(cycle.angle);
    if let Some([r, g, b]) = sun_color(cycle.angle) {
        light.color = Color::srgb_u8(r, g, b);
    }
    light.illuminance = SUN_ILLUMINANCE * daylight;
    light.shadows_enabled = panel.shadows && daylight > 0.0;

    ambient.brightness = NIGHT_AMBIENT_BRIGHTNESS + (AMBIENT_BRIGHTNESS - NIGHT_AMBIENT_BRIGHTNESS) * daylight;
    clear_color.0 = blend(NIGHT_SKY_COLOR, DAY_SKY_COLOR, daylight);
    Ok(())
}
