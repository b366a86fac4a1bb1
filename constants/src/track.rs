use bevy::math::{Vec2, Vec3};

/// Cubic Bezier control points of the closed rail loop.
/// Every 4 points form one segment: start, control 1, control 2, end.
pub const TRACK_CONTROL_POINTS: [Vec3; 48] = [
    Vec3::new(200.0, 0.0, 150.0),
    Vec3::new(340.0, 0.0, 150.0),
    Vec3::new(300.0, 0.0, 150.0),
    Vec3::new(300.0, 0.0, 50.0),
    //
    Vec3::new(300.0, 0.0, 50.0),
    Vec3::new(300.0, 0.0, -50.0),
    Vec3::new(300.0, 0.0, -150.0),
    Vec3::new(300.0, 0.0, -200.0),
    //
    Vec3::new(300.0, 0.0, -200.0),
    Vec3::new(300.0, 0.0, -260.0),
    Vec3::new(300.0, 0.0, -260.0),
    Vec3::new(250.0, 0.0, -260.0),
    //
    Vec3::new(250.0, 0.0, -260.0),
    Vec3::new(180.0, 0.0, -260.0),
    Vec3::new(155.0, 0.0, -260.0),
    Vec3::new(150.0, 0.0, -320.0),
    //
    Vec3::new(150.0, 0.0, -320.0),
    Vec3::new(145.0, 0.0, -360.0),
    Vec3::new(50.0, 0.0, -360.0),
    Vec3::new(0.0, 0.0, -360.0),
    //
    Vec3::new(0.0, 0.0, -360.0),
    Vec3::new(-50.0, 0.0, -360.0),
    Vec3::new(-125.0, 0.0, -360.0),
    Vec3::new(-160.0, 0.0, -360.0),
    //
    Vec3::new(-160.0, 0.0, -360.0),
    Vec3::new(-220.0, 0.0, -360.0),
    Vec3::new(-230.0, 0.0, -350.0),
    Vec3::new(-230.0, 0.0, -300.0),
    //
    Vec3::new(-230.0, 0.0, -300.0),
    Vec3::new(-230.0, 0.0, -260.0),
    Vec3::new(-230.0, 0.0, -40.0),
    Vec3::new(-230.0, 0.0, 0.0),
    //
    Vec3::new(-230.0, 0.0, 0.0),
    Vec3::new(-230.0, 0.0, 50.0),
    Vec3::new(-280.0, 0.0, 50.0),
    Vec3::new(-280.0, 0.0, 100.0),
    //
    Vec3::new(-280.0, 0.0, 100.0),
    Vec3::new(-280.0, 0.0, 175.0),
    Vec3::new(-240.0, 0.0, 180.0),
    Vec3::new(-150.0, 0.0, 180.0),
    //
    Vec3::new(-150.0, 0.0, 180.0),
    Vec3::new(-80.0, 0.0, 180.0),
    Vec3::new(-100.0, 0.0, 150.0),
    Vec3::new(-20.0, 0.0, 150.0),
    //
    Vec3::new(-20.0, 0.0, 150.0),
    Vec3::new(40.0, 0.0, 150.0),
    Vec3::new(150.0, 0.0, 150.0),
    Vec3::new(200.0, 0.0, 150.0),
];

/// Arc-length table resolution per Bezier segment.
pub const ARC_LENGTH_DIVISIONS: usize = 200;

/// Samples used when sweeping the embankment along the track.
pub const EMBANKMENT_STEPS: usize = 500;

/// Embankment cross-section (x across the track, y up), counter-clockwise.
pub const EMBANKMENT_PROFILE: [Vec2; 8] = [
    Vec2::new(-10.0, -12.0),
    Vec2::new(10.0, -12.0),
    Vec2::new(9.2, -4.0),
    Vec2::new(7.0, -0.6),
    Vec2::new(5.0, 0.0),
    Vec2::new(-5.0, 0.0),
    Vec2::new(-7.0, -0.6),
    Vec2::new(-9.2, -4.0),
];

/// Distance between rail centres.
pub const RAIL_GAUGE: f32 = 4.4;
pub const RAIL_WIDTH: f32 = 0.35;
pub const RAIL_HEIGHT_ABOVE_BED: f32 = 0.6;

pub const SLEEPER_SPACING: f32 = 2.5;
pub const SLEEPER_SIZE: Vec3 = Vec3::new(7.0, 0.3, 0.9);
