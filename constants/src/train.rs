pub const BARREL_DIAMETER: f32 = 5.0;
pub const BARREL_LENGTH: f32 = 12.0;
pub const FRONT_DIAMETER: f32 = 5.6;
pub const FRONT_WIDTH: f32 = 1.2;
pub const FLOOR_WIDTH: f32 = 0.2;
pub const CABIN_LENGTH: f32 = 4.0;
pub const CABIN_WIDTH: f32 = 5.0;
pub const CABIN_HEIGHT: f32 = 8.0;
pub const CABIN_FLOOR_WIDTH: f32 = 3.0;
pub const CABIN_PANEL_HEIGHT: f32 = 3.5;
pub const CABIN_PANEL_WIDTH: f32 = 0.2;
pub const INNER_RAIL_GAP: f32 = 4.0;
pub const MOTOR_LENGTH: f32 = 10.0;
pub const MOTOR_HEIGHT: f32 = 1.0;
pub const WHEEL_RADIUS: f32 = 1.0;
pub const WHEEL_WIDTH: f32 = 0.4;
pub const WHEEL_SEPARATION: f32 = 2.6;
pub const CENTER_WHEEL_POSITION: f32 = -1.0;
pub const PISTON_RADIUS: f32 = 0.8;
pub const PISTON_LENGTH: f32 = 2.0;
pub const EXTRA_ROD_LENGTH: f32 = 3.0;
pub const ROD_WIDTH: f32 = 0.2;
pub const ROD_HEIGHT: f32 = 0.2;
pub const BOLT_DEPTH: f32 = 0.2;
pub const LIGHT_SIZE: f32 = 1.0;
pub const SMOKE_STACK_HEIGHT: f32 = 4.0;

/// Height of the wheel axles above the train origin.
pub const AXLE_HEIGHT: f32 = -BARREL_DIAMETER / 2.0 - FLOOR_WIDTH - MOTOR_HEIGHT;

/// Distance from the rail top to the train origin so wheels sit on the rails.
pub const ORIGIN_ABOVE_RAIL: f32 = WHEEL_RADIUS - AXLE_HEIGHT;

/// Headlight spot light settings.
pub const HEADLIGHT_INTENSITY: f32 = 8_000_000.0;
pub const HEADLIGHT_RANGE: f32 = 200.0;
pub const HEADLIGHT_OUTER_ANGLE: f32 = 0.5;

/// Speed step applied by the keyboard shortcuts.
pub const SPEED_STEP: f32 = 5.0;
pub const MAX_SPEED: f32 = 100.0;
