/// Seconds between FPS readouts on screen and over the browser bridge.
pub const FPS_UPDATE_INTERVAL: f32 = 0.5;

/// Cascade extent for the sun's shadow map.
pub const SHADOW_MAX_DISTANCE: f32 = 900.0;
pub const SHADOW_FIRST_CASCADE_FAR_BOUND: f32 = 120.0;

pub const TERRAIN_GRASS_COLOR: [u8; 3] = [96, 140, 64];
pub const TERRAIN_ROCK_COLOR: [u8; 3] = [128, 118, 104];
pub const TERRAIN_SAND_COLOR: [u8; 3] = [196, 180, 132];
pub const WATER_COLOR: [u8; 4] = [46, 110, 150, 190];
pub const EMBANKMENT_COLOR: [u8; 3] = [120, 104, 88];
pub const RAIL_COLOR: [u8; 3] = [150, 150, 160];
pub const SLEEPER_COLOR: [u8; 3] = [92, 64, 44];
pub const CONCRETE_COLOR: [u8; 3] = [170, 166, 158];
pub const STEEL_COLOR: [u8; 3] = [70, 74, 80];
pub const TRUNK_COLOR: [u8; 3] = [61, 33, 22];
pub const LEAF_COLOR: [u8; 3] = [102, 151, 57];

pub const TRAIN_BODY_COLOR: [u8; 3] = [255, 102, 0];
pub const TRAIN_SMOKE_STACK_COLOR: [u8; 3] = [255, 123, 0];
pub const TRAIN_ROOF_COLOR: [u8; 3] = [240, 232, 125];
pub const TRAIN_MOTOR_COLOR: [u8; 3] = [124, 124, 124];
pub const TRAIN_WHEEL_COLOR: [u8; 3] = [12, 12, 12];
pub const TRAIN_ROD_COLOR: [u8; 3] = [51, 51, 51];
pub const TRAIN_PISTON_COLOR: [u8; 3] = [49, 0, 0];
