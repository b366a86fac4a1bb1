use bevy::math::Vec2;

pub const TERRAIN_SIZE: f32 = 1024.0;
pub const TERRAIN_RESOLUTION: usize = 256;

pub const HILL_AMPLITUDE: f32 = 14.0;

pub const LAKE_CENTER: Vec2 = Vec2::new(40.0, -110.0);
pub const LAKE_RADIUS: f32 = 120.0;
pub const LAKE_DEPTH: f32 = 30.0;

pub const MOUNTAIN_CENTER: Vec2 = Vec2::new(-70.0, -420.0);
pub const MOUNTAIN_RADIUS: f32 = 170.0;
pub const MOUNTAIN_HEIGHT: f32 = 60.0;

/// River valley crossed by the bridge, running along X.
pub const RIVER_CENTER_Z: f32 = -40.0;
pub const RIVER_HALF_WIDTH: f32 = 45.0;
pub const RIVER_DEPTH: f32 = 28.0;

/// Half width of the strip around the track flattened under the embankment.
pub const TRACK_CLEARANCE: f32 = 16.0;
