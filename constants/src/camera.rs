use bevy::math::Vec3;

/// Pose used when the selected camera slot has no registered rig.
pub const FALLBACK_CAMERA_POSITION: Vec3 = Vec3::new(300.0, 100.0, 300.0);
pub const FALLBACK_CAMERA_LOOK_AT: Vec3 = Vec3::new(0.0, 60.0, 0.0);

pub const FIELD_OF_VIEW_DEGREES: f32 = 75.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 10_000.0;

/// Slot numbers of the registered camera rigs.
pub const SLOT_OVERVIEW: u8 = 0;
pub const SLOT_CABIN: u8 = 1;
pub const SLOT_TRAIN_FRONT: u8 = 2;
pub const SLOT_TRAIN_CHASE: u8 = 3;
pub const SLOT_BRIDGE: u8 = 4;
pub const SLOT_TUNNEL: u8 = 5;
pub const SLOT_WALKER: u8 = 6;
pub const SLOT_LAKE: u8 = 7;

/// Walker start position (x, z) and look direction target.
pub const WALKER_START: Vec3 = Vec3::new(120.0, 0.0, 60.0);
pub const WALKER_LOOK_AT: Vec3 = Vec3::new(60.0, 0.0, -100.0);

pub const ORBIT_MIN_DISTANCE: f32 = 5.0;
pub const ORBIT_MAX_DISTANCE: f32 = 2_000.0;
pub const ORBIT_DAMPING: f32 = 0.05;

pub const WALK_SPEED: f32 = 20.0;
pub const LOOK_SENSITIVITY: f32 = 0.0035;
pub const MAX_PITCH: f32 = 1.55;
