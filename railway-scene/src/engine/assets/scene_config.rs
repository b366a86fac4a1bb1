use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Startup tunables read from `scene_config.json`. Missing fields take their defaults.
#[derive(Asset, Debug, Clone, PartialEq, Serialize, Deserialize, TypePath, Resource)]
#[serde(default)]
pub struct SceneConfig {
    /// Initial train speed in metres per second.
    pub train_speed: f32,
    /// Sun angle advance in degrees per second.
    pub day_speed: f32,
    /// Sun angle from the zenith at startup, in degrees.
    pub sun_angle: f32,
    pub water_level: f32,
    /// Height of the rail bed on which the train runs.
    pub rail_height: f32,
    /// Camera height for the first-person walker.
    pub eye_height: f32,
    pub shadows: bool,
    pub train_light: bool,
    pub lamp_lights: bool,
    pub initial_camera: u8,
    /// Optional clamp on the per-frame time step of the train.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_frame_delta: Option<f32>,
    pub forest: ForestConfig,
    /// Distance along the track between lamp posts.
    pub lamp_spacing: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    pub seed: u64,
    pub tree_count: usize,
    pub min_size: f32,
    pub max_size: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            train_speed: 20.0,
            day_speed: 1.0,
            sun_angle: 40.0,
            water_level: 30.0,
            rail_height: 56.0,
            eye_height: 62.0,
            shadows: true,
            train_light: false,
            lamp_lights: false,
            initial_camera: 0,
            max_frame_delta: None,
            forest: ForestConfig::default(),
            lamp_spacing: 120.0,
        }
    }
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tree_count: 600,
            min_size: 0.8,
            max_size: 1.6,
        }
    }
}
