use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::engine::track::CurvePath;

/// Distance accumulator that moves the train along the track.
///
/// `distance_traveled` grows without bound and is only wrapped when the
/// path is queried.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TrainKinematics {
    /// Signed speed in metres per second of real time.
    pub speed: f32,
    /// Upper bound on a single frame delta. `None` keeps the raw wall-clock delta.
    pub max_frame_delta: Option<f32>,
    /// Height of the train origin above the world origin.
    pub train_height: f32,
    last_timestamp: f64,
    distance_traveled: f64,
}

/// World placement of the train derived from the travelled distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainPose {
    pub translation: Vec3,
    pub yaw: f32,
}

impl TrainKinematics {
    /// Start at the beginning of the track with the clock at `now` seconds.
    pub fn new(now: f64, speed: f32, train_height: f32) -> Self {
        Self {
            speed,
            max_frame_delta: None,
            train_height,
            last_timestamp: now,
            distance_traveled: 0.0,
        }
    }

    pub fn with_max_frame_delta(mut self, max_frame_delta: Option<f32>) -> Self {
        self.max_frame_delta = max_frame_delta;
        self
    }

    pub fn distance_traveled(&self) -> f64 {
        self.distance_traveled
    }

    pub fn last_timestamp(&self) -> f64 {
        self.last_timestamp
    }

    /// Move the clock to `now` and integrate the elapsed time.
    ///
    /// Returns the distance increment of this step.
    pub fn advance_to(&mut self, now: f64) -> f32 {
        let dt = (now - self.last_timestamp).max(0.0) as f32;
        self.last_timestamp = now;
        self.advance(dt)
    }

    /// Integrate `dt` seconds at the current speed, returning the distance increment.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let dt = match self.max_frame_delta {
            Some(limit) => dt.min(limit),
            None => dt,
        };
        let delta = f64::from(dt) * f64::from(self.speed);
        self.distance_traveled += delta;
        delta as f32
    }

    /// Train pose for the current distance on `path`.
    pub fn pose(&self, path: &CurvePath) -> TrainPose {
        TrainPose::at(path, path.wrap_distance(self.distance_traveled), self.train_height)
    }
}

impl TrainPose {
    pub fn at(path: &CurvePath, distance: f32, height: f32) -> Self {
        let point = path.point_at(distance);
        let tangent = path.tangent_at(distance);
        Self {
            translation: Vec3::new(point.x, height, point.z),
            yaw: heading_yaw(tangent),
        }
    }

    /// Rotation about Y only; the train never pitches or rolls.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.translation).with_rotation(self.rotation())
    }
}

/// Yaw that turns the model's +Z front onto the horizontal part of `tangent`.
pub fn heading_yaw(tangent: Vec3) -> f32 {
    (-tangent.z).atan2(tangent.x) + FRAC_PI_2
}
