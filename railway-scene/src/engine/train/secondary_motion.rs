use bevy::prelude::*;

/// Rotation driven by the distance the train moved this frame.
///
/// Both variants spin about the node's local Y axis, which is the wheel axle
/// for every animated train part.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum SecondaryMotion {
    /// Rolling wheel. `side` is -1 for the left set and +1 for the mirrored right set.
    Wheel { radius: f32, side: f32 },
    /// Connecting rod pivot. Turns against its wheel so the rod stays level.
    Rod { radius: f32, side: f32 },
}

impl SecondaryMotion {
    pub const fn left_wheel(radius: f32) -> Self {
        Self::Wheel { radius, side: -1.0 }
    }

    pub const fn right_wheel(radius: f32) -> Self {
        Self::Wheel { radius, side: 1.0 }
    }

    pub const fn left_rod(radius: f32) -> Self {
        Self::Rod { radius, side: 1.0 }
    }

    pub const fn right_rod(radius: f32) -> Self {
        Self::Rod { radius, side: -1.0 }
    }

    /// Angle in radians for a distance increment `delta`.
    pub fn angle(&self, delta: f32) -> f32 {
        match *self {
            Self::Wheel { radius, side } | Self::Rod { radius, side } => side * delta / radius,
        }
    }

    pub fn apply(&self, transform: &mut Transform, delta: f32) {
        if delta != 0.0 {
            transform.rotate_local_y(self.angle(delta));
        }
    }
}
