use bevy::math::Vec3;

pub const TUNNEL_WIDTH: f32 = 35.0;
pub const TUNNEL_HEIGHT: f32 = 20.0;
pub const TUNNEL_CURVE: f32 = 1.0;
pub const TUNNEL_LENGTH: f32 = 120.0;
pub const TUNNEL_WALL: f32 = 1.0;
/// Entrance centre; the tunnel runs along -X from here.
pub const TUNNEL_ENTRANCE: Vec3 = Vec3::new(-10.0, 0.0, -360.0);

pub const BRIDGE_ARC_WIDTH: f32 = 12.0;
pub const BRIDGE_COLUMN_DEPTH: f32 = 2.0;
pub const BRIDGE_BAR_SIZE: f32 = 0.7;
pub const BRIDGE_LENGTH: f32 = 120.0;
pub const BRIDGE_WIDTH: f32 = 18.0;
pub const BRIDGE_TOP_HEIGHT: f32 = 14.0;
pub const BRIDGE_TOP_SEGMENTS: usize = 6;
/// Start of the bridge deck centre line; the bridge runs along -Z from here.
pub const BRIDGE_START: Vec3 = Vec3::new(300.0, 0.0, 20.0);

pub const LAMP_POST_HEIGHT: f32 = 14.0;
pub const LAMP_POST_RADIUS: f32 = 0.3;
pub const LAMP_BULB_RADIUS: f32 = 0.8;
pub const LAMP_OFFSET_FROM_TRACK: f32 = 11.0;
pub const LAMP_INTENSITY: f32 = 2_000_000.0;
pub const LAMP_RANGE: f32 = 60.0;
